//! Curated fashion trends
//!
//! A fixed catalog stands in for a Pinterest-style feed.

use crate::models::TrendItem;

fn trend(id: &str, title: &str, image_url: &str, description: &str, tags: &[&str]) -> TrendItem {
    TrendItem {
        id: id.to_string(),
        title: title.to_string(),
        image_url: image_url.to_string(),
        description: description.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

/// The full catalog, in display order
#[must_use]
pub fn catalog() -> Vec<TrendItem> {
    vec![
        trend(
            "1",
            "Minimalist Beige Layering",
            "https://images.unsplash.com/photo-1515886657613-9f3515b0c78f?w=800&q=80",
            "Neutral tones and soft layers for a chic, effortless look.",
            &["minimalist", "beige", "layering", "fall"],
        ),
        trend(
            "2",
            "Streetwear Essentials",
            "https://images.unsplash.com/photo-1552374196-1ab2a1c593e8?w=800&q=80",
            "Bold accessories and oversized fits defining modern street style.",
            &["streetwear", "urban", "casual"],
        ),
        trend(
            "3",
            "Classic Denim",
            "https://images.unsplash.com/photo-1541099649105-f69ad21f3246?w=800&q=80",
            "Timeless denim jackets paired with white tees.",
            &["denim", "classic", "casual"],
        ),
        trend(
            "4",
            "Elegant Evening Wear",
            "https://images.unsplash.com/photo-1566174053879-31528523f8ae?w=800&q=80",
            "Sophisticated dresses for special occasions.",
            &["elegant", "evening", "formal"],
        ),
        trend(
            "5",
            "Summer Vibes",
            "https://images.unsplash.com/photo-1523381210434-271e8be1f52b?w=800&q=80",
            "Light fabrics and bright colors for the perfect summer outfit.",
            &["summer", "bright", "casual"],
        ),
    ]
}

/// Trends tagged with `category`, or all of them when no category is given
#[must_use]
pub fn trends_for(category: Option<&str>) -> Vec<TrendItem> {
    let items = catalog();
    match category.map(str::trim).filter(|c| !c.is_empty()) {
        Some(category) => items
            .into_iter()
            .filter(|item| item.has_tag(category))
            .collect(),
        None => items,
    }
}
