use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::api::types::CreateListingRequest;
use crate::form::images::ImageList;
use crate::form::validation::{validate_draft, Field};
use crate::models::PropertyType;

/// An in-progress, unvalidated set of form field values.
///
/// Everything the user types is held as a raw string; parsing happens once,
/// in [`ListingDraft::build_request`], after validation has passed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingDraft {
    pub title: String,
    pub description: String,
    pub price: String,
    pub area_sqm: String,
    pub room_count: String,
    pub floor_number: String,
    pub property_type: PropertyType,
    pub city: String,
    pub street: String,
    pub postal_code: String,
    pub owner_id: i64,
    pub images: ImageList,
}

impl Default for ListingDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            price: String::new(),
            area_sqm: String::new(),
            room_count: String::new(),
            floor_number: String::new(),
            property_type: PropertyType::Sale,
            city: String::new(),
            street: String::new(),
            postal_code: String::new(),
            // TODO: wire up account selection once the backend exposes users
            owner_id: 1,
            images: ImageList::default(),
        }
    }
}

impl ListingDraft {
    /// Raw value of a validated field
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Description => &self.description,
            Field::Price => &self.price,
            Field::AreaSqm => &self.area_sqm,
            Field::City => &self.city,
            Field::Street => &self.street,
            Field::PostalCode => &self.postal_code,
            Field::RoomCount => &self.room_count,
            Field::FloorNumber => &self.floor_number,
        }
    }

    pub fn set_field(&mut self, field: Field, value: String) {
        match field {
            Field::Title => self.title = value,
            Field::Description => self.description = value,
            Field::Price => self.price = value,
            Field::AreaSqm => self.area_sqm = value,
            Field::City => self.city = value,
            Field::Street => self.street = value,
            Field::PostalCode => self.postal_code = value,
            Field::RoomCount => self.room_count = value,
            Field::FloorNumber => self.floor_number = value,
        }
    }

    /// Run whole-form validation, then turn the draft into a create request:
    /// strings trimmed, numerics parsed, blank optionals normalized to
    /// absent, images passed through unchanged.
    pub fn build_request(&self) -> Result<CreateListingRequest, BTreeMap<Field, String>> {
        let errors = validate_draft(self);
        if !errors.is_empty() {
            return Err(errors);
        }

        // Numeric fields were just validated; parse failures cannot reach here.
        Ok(CreateListingRequest {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            price: self.price.trim().parse().unwrap_or_default(),
            area_sqm: self.area_sqm.trim().parse().unwrap_or_default(),
            room_count: optional_int(&self.room_count),
            floor_number: optional_int(&self.floor_number),
            property_type: self.property_type,
            city: self.city.trim().to_string(),
            street: optional_text(&self.street),
            postal_code: optional_text(&self.postal_code),
            owner_id: self.owner_id,
            images: self.images.clone().into_vec(),
        })
    }
}

fn optional_text(raw: &str) -> Option<String> {
    let value = raw.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn optional_int(raw: &str) -> Option<i32> {
    let value = raw.trim();
    (!value.is_empty()).then(|| value.parse().unwrap_or_default())
}
