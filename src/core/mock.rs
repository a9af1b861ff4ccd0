use crate::models::{GiftTheme, ThemeSet};

fn theme(name: &str, description: &str, products: &str, score: u8, id: &str, image: &str) -> GiftTheme {
    GiftTheme {
        gift_theme: name.to_string(),
        gift_theme_description: description.to_string(),
        gift_theme_example_products: products.to_string(),
        match_score: score,
        id: id.to_string(),
        theme_image_url: Some(image.to_string()),
    }
}

/// The five fixed themes served whenever live recommendations are unavailable
pub fn mock_themes() -> Vec<GiftTheme> {
    vec![
        theme(
            "Personalized Jewelry",
            "Celebrate their unique style with personalized jewelry: engraved necklaces, bracelets or rings carrying meaningful symbols or initials. A fashionable accessory that doubles as a constant reminder of the bond you share.",
            "1. Engraved birthstone necklace (~$150). 2. Custom charm bracelet (~$120).",
            85,
            "76fb8435-81a1-4e7a-b226-f1d75cc477cb",
            "https://images.unsplash.com/photo-1515562141207-7a88fb7ce338?q=80&w=2070&auto=format&fit=crop",
        ),
        theme(
            "Luxury Experience Package",
            "A memorable day out with an exclusive experience. A spa day, a wine tasting tour or a gourmet dining adventure makes the occasion special and stress-free.",
            "1. Spa retreat voucher (~$200). 2. Wine tasting tour for two (~$180).",
            80,
            "c4d01687-e7d9-47db-9c6a-f6a83c338089",
            "https://images.unsplash.com/photo-1540555700478-4be289fbecef?q=80&w=2070&auto=format&fit=crop",
        ),
        theme(
            "Subscription Box",
            "The gift that keeps on giving: a subscription box matched to their interests. Beauty products, books, gourmet snacks or craft supplies arrive as a monthly reminder of your thoughtfulness.",
            "1. 6-month beauty box subscription (~$150). 2. Monthly book club with wine pairing (~$180).",
            75,
            "bdb9c9dd-efb5-4d3e-9732-a1bfc22f5247",
            "https://images.unsplash.com/photo-1607083206968-13611e3d76db?q=80&w=2215&auto=format&fit=crop",
        ),
        theme(
            "Personalized Home Decor",
            "Help them make their living space their own with personalized decor. Custom photo frames and monogrammed throw pillows add a personal touch to any home.",
            "1. Custom family photo canvas (~$100). 2. Personalized throw blanket with name or monogram (~$80).",
            70,
            "0253a9d9-bdfd-4606-8748-3b537bec6c57",
            "https://images.unsplash.com/photo-1513694203232-719a280e022f?q=80&w=2069&auto=format&fit=crop",
        ),
        theme(
            "Tech Gadgets",
            "For the tech-savvy, the latest gadgets are both exciting and practical. Smart home devices and wireless earbuds bring innovation into everyday life.",
            "1. Wireless noise-canceling earbuds (~$150). 2. Smart speaker with voice assistant (~$100).",
            65,
            "9bddc3b1-744e-475c-ab6e-6716ec17ba7c",
            "https://images.unsplash.com/photo-1519558260268-cde7e03a0152?q=80&w=2070&auto=format&fit=crop",
        ),
    ]
}

pub fn mock_theme_set() -> ThemeSet {
    ThemeSet {
        themes: mock_themes(),
        is_mock_data: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_payload_is_fixed() {
        let set = mock_theme_set();
        assert!(set.is_mock_data);
        assert_eq!(set.themes.len(), 5);
        assert_eq!(set, mock_theme_set());
        for theme in &set.themes {
            assert_eq!(theme.id.len(), 36);
            assert!(theme.theme_image_url.is_some());
            assert_eq!(theme.example_products().len(), 2);
        }
    }

    #[test]
    fn test_mock_payload_wire_shape() {
        let value = serde_json::to_value(mock_theme_set()).unwrap();
        assert_eq!(value["isMockData"], serde_json::json!(true));
        assert_eq!(value["themes"][0]["gift_theme"], "Personalized Jewelry");
        assert_eq!(value["themes"][4]["match_score"], 65);
    }
}
