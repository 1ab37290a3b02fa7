use serde::{Deserialize, Serialize};

use crate::models::{ListingImage, PropertyType};

/// Body of a listing create call.
///
/// Server-assigned fields (id, timestamps, owner record) are absent; the
/// owner is referenced by id. Optional fields that were left blank in the
/// form are omitted from the JSON entirely rather than sent as empty strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListingRequest {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub area_sqm: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_number: Option<i32>,
    pub property_type: PropertyType,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub owner_id: i64,
    pub images: Vec<ListingImage>,
}
