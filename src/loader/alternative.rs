// alternative.rs
//
// Turns generic placeholder records (`{ id, title, thumbnailUrl }`) into
// listings so the site has something plausible to show when the primary
// document is down.

use crate::domain::listing::{Contact, Listing, BUY, RENT};
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::Value;

const STREETS: [&str; 12] = [
    "University Blvd",
    "Campus Drive",
    "Viking Drive",
    "Stadium Way",
    "Porter Park Rd",
    "Main Street",
    "Center Street",
    "First East",
    "Second West",
    "Third North",
    "College Avenue",
    "Yellowstone Hwy",
];

const DISTANCES: [f64; 6] = [0.2, 0.5, 0.8, 1.2, 1.5, 2.0];

const RENTAL_DESCRIPTIONS: [&str; 4] = [
    "Comfortable student housing close to campus. Perfect for students looking for affordable living.",
    "Modern apartment with updated appliances and great location near campus amenities.",
    "Cozy rental home in quiet neighborhood, ideal for small families or graduate students.",
    "Spacious student apartment with study areas and easy campus access.",
];

const SALE_DESCRIPTIONS: [&str; 4] = [
    "Beautiful family home in established neighborhood with mature landscaping.",
    "Well-maintained property perfect for first-time homebuyers or investors.",
    "Charming home with modern updates and great potential for customization.",
    "Solid construction home in desirable area close to schools and shopping.",
];

const FEATURES: [&str; 16] = [
    "Air conditioning",
    "Washer/dryer hookups",
    "Dishwasher",
    "Garage",
    "Hardwood floors",
    "Updated kitchen",
    "Fenced yard",
    "Fireplace",
    "Walk-in closets",
    "Ceiling fans",
    "Storage space",
    "Patio/deck",
    "Garden space",
    "Close to bus stop",
    "Bike storage",
    "Internet ready",
];

/// Every third record (starting with the first) becomes a rental priced
/// 400..1600 a month; the rest are sales priced 150k..350k.
pub fn synthesize_listings<R: Rng>(records: &[Value], rng: &mut R) -> Vec<Listing> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| synthesize(index, record, rng))
        .collect()
}

fn synthesize<R: Rng>(index: usize, record: &Value, rng: &mut R) -> Listing {
    let is_rental = index % 3 == 0;

    let id = match record.get("id") {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        _ => (index + 1).to_string(),
    };

    let mut listing = Listing::new(id.clone());
    listing.title = format!("Property {id}");
    listing.listing_type = Some(if is_rental { RENT } else { BUY }.to_string());
    listing.price = Some(if is_rental {
        rng.gen_range(400..1600) as f64
    } else {
        rng.gen_range(150_000..350_000) as f64
    });
    listing.bedrooms = Some(rng.gen_range(1..=4) as f64);
    listing.bathrooms = Some(rng.gen_range(1..=3) as f64);
    listing.area = Some(rng.gen_range(800..1800) as f64);
    listing.distance = DISTANCES.choose(rng).copied();
    listing.address = format!(
        "{} {}, Rexburg, ID 83440",
        rng.gen_range(100..1100),
        STREETS[index % STREETS.len()]
    );

    let descriptions = if is_rental {
        &RENTAL_DESCRIPTIONS
    } else {
        &SALE_DESCRIPTIONS
    };
    listing.description = descriptions
        .choose(rng)
        .map(|d| d.to_string())
        .unwrap_or_default();

    let feature_count = rng.gen_range(4..=6);
    listing.tags = FEATURES
        .choose_multiple(rng, feature_count)
        .map(|f| f.to_string())
        .collect();

    listing.contact = Some(Contact {
        phone: Some(format!("(208) 555-{}", rng.gen_range(1000..10000))),
        email: Some(format!("agent{}@rexburghomes.com", index + 1)),
    });
    listing.image = record
        .get("thumbnailUrl")
        .and_then(Value::as_str)
        .map(str::to_string);

    listing
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;

    #[test]
    fn test_records_become_mixed_listings() {
        let records: Vec<Value> = (1..=6)
            .map(|i| json!({ "id": i, "title": "photo", "thumbnailUrl": format!("https://img/{i}") }))
            .collect();
        let mut rng = StdRng::seed_from_u64(7);

        let listings = synthesize_listings(&records, &mut rng);
        assert_eq!(listings.len(), 6);

        for (index, listing) in listings.iter().enumerate() {
            assert_eq!(listing.id, (index + 1).to_string());
            let price = listing.price.unwrap();
            if index % 3 == 0 {
                assert!(listing.is_rental());
                assert!((400.0..1600.0).contains(&price));
            } else {
                assert_eq!(listing.listing_type.as_deref(), Some(BUY));
                assert!((150_000.0..350_000.0).contains(&price));
            }
            assert!((4..=6).contains(&listing.tags.len()));
            assert!(listing.address.ends_with("Rexburg, ID 83440"));
            assert_eq!(listing.image.as_deref(), Some(format!("https://img/{}", index + 1).as_str()));
        }
    }

    #[test]
    fn test_missing_id_uses_position() {
        let mut rng = StdRng::seed_from_u64(1);
        let listings = synthesize_listings(&[json!({}), json!({ "id": "x9" })], &mut rng);
        assert_eq!(listings[0].id, "1");
        assert_eq!(listings[1].id, "x9");
        assert_eq!(listings[1].title, "Property x9");
    }
}
