use crate::models::{CatalogGift, Gender, PriceRange};

fn entry(
    title: &str,
    description: &str,
    tags: &[&str],
    (low, high): (f64, f64),
    for_gender: Option<&[Gender]>,
    (min_age, max_age): (u8, u8),
    base_match_score: u8,
) -> CatalogGift {
    CatalogGift {
        title: title.to_string(),
        description: description.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        price_range: PriceRange { low, high },
        for_gender: for_gender.map(<[Gender]>::to_vec),
        min_age,
        max_age,
        base_match_score,
    }
}

/// Built-in gift catalog used for local scoring
pub fn default_catalog() -> Vec<CatalogGift> {
    use Gender::*;

    vec![
        entry(
            "Personalized Star Map",
            "A custom print of the night sky from a date that matters to both of you.",
            &["personalized", "sentimental", "art", "astronomy", "home decor"],
            (40.0, 90.0),
            None,
            (16, 90),
            78,
        ),
        entry(
            "Gourmet Cooking Class",
            "A hands-on class with a professional chef, ingredients included.",
            &["cooking", "food", "experience", "learning"],
            (80.0, 150.0),
            None,
            (18, 75),
            75,
        ),
        entry(
            "Hiking Daypack Kit",
            "Lightweight pack with water bladder, first aid kit and trail snacks.",
            &["hiking", "outdoors", "fitness", "adventure", "travel"],
            (60.0, 130.0),
            Some(&[Female, Male, NonBinary, Other]),
            (14, 65),
            72,
        ),
        entry(
            "Engraved Birthstone Necklace",
            "Delicate pendant set with the recipient's birthstone and engraved initials.",
            &["jewelry", "fashion", "personalized", "sentimental"],
            (90.0, 200.0),
            Some(&[Female, NonBinary]),
            (16, 90),
            80,
        ),
        entry(
            "Wireless Noise-Canceling Earbuds",
            "Compact earbuds with active noise canceling and all-day battery.",
            &["tech", "music", "gadgets", "travel", "fitness"],
            (100.0, 250.0),
            None,
            (12, 70),
            74,
        ),
        entry(
            "Craft Beer Tasting Set",
            "Twelve small-batch beers with tasting notes and a branded glass.",
            &["beer", "food", "tasting", "social"],
            (40.0, 70.0),
            Some(&[Male, Other]),
            (21, 80),
            68,
        ),
        entry(
            "Spa Retreat Voucher",
            "A day of massages, sauna and relaxation at a local spa.",
            &["wellness", "relaxation", "self-care", "experience"],
            (120.0, 250.0),
            Some(&[Female, NonBinary, Other]),
            (18, 90),
            77,
        ),
        entry(
            "Board Game Night Bundle",
            "Three modern strategy and party games for evenings with friends.",
            &["games", "board games", "social", "family", "strategy"],
            (50.0, 110.0),
            None,
            (8, 99),
            70,
        ),
        entry(
            "Indoor Herb Garden",
            "Self-watering planter with grow light and seeds for six herbs.",
            &["gardening", "cooking", "sustainability", "home decor", "plants"],
            (35.0, 80.0),
            None,
            (15, 99),
            69,
        ),
        entry(
            "Book Club Subscription",
            "A hand-picked hardcover delivered monthly with a discussion guide.",
            &["reading", "books", "learning", "subscription"],
            (90.0, 180.0),
            None,
            (12, 99),
            71,
        ),
        entry(
            "Charity Donation in Their Name",
            "A donation to a cause the recipient cares about, with a personal certificate.",
            &["charity", "giving back", "sustainability", "community", "values"],
            (25.0, 100.0),
            None,
            (10, 120),
            65,
        ),
        entry(
            "Kids' Science Experiment Kit",
            "Twenty safe experiments covering chemistry, physics and biology.",
            &["science", "learning", "kids", "stem", "toys"],
            (25.0, 45.0),
            None,
            (6, 12),
            73,
        ),
    ]
}
