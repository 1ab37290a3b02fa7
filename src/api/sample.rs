use chrono::Utc;
use tracing::info;

use crate::models::{Listing, ListingImage, ListingOwner, PropertyType};

/// Fixed sample listings shown when the backend cannot be reached.
///
/// Demo data only: the write path never fabricates records from this set.
pub fn listings() -> Vec<Listing> {
    info!("📋 Generating built-in sample listings");

    let now = Utc::now();
    let anna = ListingOwner {
        id: 1,
        first_name: "Anna".to_string(),
        last_name: "Kowalska".to_string(),
        email: "anna.kowalska@propertyhub.com".to_string(),
        phone_number: Some("+48 604 549 449".to_string()),
    };
    let tomasz = ListingOwner {
        id: 2,
        first_name: "Tomasz".to_string(),
        last_name: "Nowak".to_string(),
        email: "tomasz.nowak@propertyhub.com".to_string(),
        phone_number: Some("+48 604 549 450".to_string()),
    };

    vec![
        Listing {
            id: 1,
            title: "Ocean View Penthouse".to_string(),
            description: "Stunning penthouse with panoramic ocean views and premium finishes. \
                          Modern architecture meets luxury living."
                .to_string(),
            price: 2_850_000.0,
            property_type: PropertyType::Sale,
            city: "Gdańsk".to_string(),
            street: Some("Marina Boulevard 15".to_string()),
            postal_code: Some("80-001".to_string()),
            area_sqm: 180.0,
            room_count: Some(4),
            floor_number: Some(25),
            created_at: now,
            updated_at: now,
            owner: Some(anna.clone()),
            images: vec![ListingImage {
                image_url: "https://images.unsplash.com/photo-1613977257363-707ba9348227.jpg"
                    .to_string(),
                display_order: 1,
                original_file_name: Some("photo-1613977257363-707ba9348227.jpg".to_string()),
                content_type: Some("image/jpeg".to_string()),
            }],
        },
        Listing {
            id: 2,
            title: "Modern Tech Loft".to_string(),
            description: "Contemporary design meets urban innovation in the heart of the city. \
                          Smart home technology integrated throughout."
                .to_string(),
            price: 1_650_000.0,
            property_type: PropertyType::Rent,
            city: "Warsaw".to_string(),
            street: Some("Innovation District 44".to_string()),
            postal_code: Some("00-844".to_string()),
            area_sqm: 95.0,
            room_count: Some(2),
            floor_number: Some(12),
            created_at: now,
            updated_at: now,
            owner: Some(tomasz.clone()),
            images: vec![ListingImage {
                image_url: "https://images.unsplash.com/photo-1560448204-e02f11c3d0e2.jpg"
                    .to_string(),
                display_order: 1,
                original_file_name: Some("photo-1560448204-e02f11c3d0e2.jpg".to_string()),
                content_type: Some("image/jpeg".to_string()),
            }],
        },
        Listing {
            id: 3,
            title: "Heritage Townhouse".to_string(),
            description: "Beautifully restored 19th-century townhouse with modern amenities. \
                          Perfect blend of history and comfort."
                .to_string(),
            price: 3_200_000.0,
            property_type: PropertyType::Sale,
            city: "Kraków".to_string(),
            street: Some("Old Town Square 7".to_string()),
            postal_code: Some("31-008".to_string()),
            area_sqm: 220.0,
            room_count: Some(5),
            floor_number: Some(3),
            created_at: now,
            updated_at: now,
            owner: Some(anna),
            images: vec![ListingImage {
                image_url: "https://images.unsplash.com/photo-1570129477492-45c003edd2be.jpg"
                    .to_string(),
                display_order: 1,
                original_file_name: Some("photo-1570129477492-45c003edd2be.jpg".to_string()),
                content_type: Some("image/jpeg".to_string()),
            }],
        },
        Listing {
            id: 4,
            title: "Riverside Apartment".to_string(),
            description: "Contemporary riverside living with floor-to-ceiling windows and a \
                          private balcony overlooking the water."
                .to_string(),
            price: 1_850_000.0,
            property_type: PropertyType::Sale,
            city: "Wrocław".to_string(),
            street: Some("Odra Waterfront 23".to_string()),
            postal_code: Some("50-001".to_string()),
            area_sqm: 110.0,
            room_count: Some(3),
            floor_number: Some(8),
            created_at: now,
            updated_at: now,
            owner: Some(tomasz),
            images: vec![ListingImage {
                image_url: "https://images.unsplash.com/photo-1545324418-cc1a3fa10c00.jpg"
                    .to_string(),
                display_order: 1,
                original_file_name: Some("photo-1545324418-cc1a3fa10c00.jpg".to_string()),
                content_type: Some("image/jpeg".to_string()),
            }],
        },
    ]
}
