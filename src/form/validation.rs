use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::form::draft::ListingDraft;

/// Upper bounds mirrored from the backend's request validation
pub const MAX_PRICE: f64 = 99_999_999.99;
pub const MAX_AREA_SQM: f64 = 9_999.99;

lazy_static! {
    static ref POSTAL_CODE: Regex = Regex::new(r"^\d{2}-\d{3}$").unwrap();
}

/// Form fields subject to validation, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Title,
    Description,
    Price,
    AreaSqm,
    City,
    Street,
    PostalCode,
    RoomCount,
    FloorNumber,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Title,
        Field::Description,
        Field::Price,
        Field::AreaSqm,
        Field::City,
        Field::Street,
        Field::PostalCode,
        Field::RoomCount,
        Field::FloorNumber,
    ];

    /// Wire name, matching the backend's `validationErrors` keys
    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Description => "description",
            Field::Price => "price",
            Field::AreaSqm => "areaSqm",
            Field::City => "city",
            Field::Street => "street",
            Field::PostalCode => "postalCode",
            Field::RoomCount => "roomCount",
            Field::FloorNumber => "floorNumber",
        }
    }

    fn rule(self) -> FieldRule {
        match self {
            Field::Title => FieldRule {
                label: "Title",
                kind: RuleKind::Text {
                    required: true,
                    max_len: 200,
                },
            },
            Field::Description => FieldRule {
                label: "Description",
                kind: RuleKind::Text {
                    required: true,
                    max_len: 3000,
                },
            },
            Field::Price => FieldRule {
                label: "Price",
                kind: RuleKind::Decimal { max: MAX_PRICE },
            },
            Field::AreaSqm => FieldRule {
                label: "Area",
                kind: RuleKind::Decimal { max: MAX_AREA_SQM },
            },
            Field::City => FieldRule {
                label: "City",
                kind: RuleKind::Text {
                    required: true,
                    max_len: 100,
                },
            },
            Field::Street => FieldRule {
                label: "Street",
                kind: RuleKind::Text {
                    required: false,
                    max_len: 200,
                },
            },
            Field::PostalCode => FieldRule {
                label: "Postal code",
                kind: RuleKind::PostalCode,
            },
            Field::RoomCount => FieldRule {
                label: "Room count",
                kind: RuleKind::Integer { min: 1, max: 50 },
            },
            Field::FloorNumber => FieldRule {
                label: "Floor number",
                kind: RuleKind::Integer { min: -5, max: 200 },
            },
        }
    }
}

/// One row of the rule table
struct FieldRule {
    label: &'static str,
    kind: RuleKind,
}

enum RuleKind {
    /// Free text; `required` rejects blank input, `max_len` counts chars
    Text { required: bool, max_len: usize },
    /// Required positive decimal with an inclusive upper bound
    Decimal { max: f64 },
    /// Optional whole number within an inclusive range
    Integer { min: i64, max: i64 },
    /// Optional, must match the 00-000 shape when present
    PostalCode,
}

impl FieldRule {
    fn check(&self, raw: &str) -> Option<String> {
        let value = raw.trim();
        let label = self.label;
        match self.kind {
            RuleKind::Text { required, max_len } => {
                if value.is_empty() {
                    return required.then(|| format!("{label} is required"));
                }
                (value.chars().count() > max_len)
                    .then(|| format!("{label} must be at most {max_len} characters"))
            }
            RuleKind::Decimal { max } => {
                if value.is_empty() {
                    return Some(format!("{label} is required"));
                }
                match value.parse::<f64>() {
                    Err(_) => Some(format!("{label} must be a number")),
                    Ok(number) if number <= 0.0 => {
                        Some(format!("{label} must be greater than zero"))
                    }
                    Ok(number) if number > max => Some(format!("{label} must not exceed {max}")),
                    Ok(_) => None,
                }
            }
            RuleKind::Integer { min, max } => {
                if value.is_empty() {
                    return None;
                }
                match value.parse::<i64>() {
                    Err(_) => Some(format!("{label} must be a whole number")),
                    Ok(number) if number < min => Some(format!("{label} must be at least {min}")),
                    Ok(number) if number > max => Some(format!("{label} must not exceed {max}")),
                    Ok(_) => None,
                }
            }
            RuleKind::PostalCode => {
                if value.is_empty() {
                    return None;
                }
                (!POSTAL_CODE.is_match(value))
                    .then(|| format!("{label} must match the 00-000 format"))
            }
        }
    }
}

/// Validate a single field, as run on blur for immediate feedback.
/// Returns `None` when the raw value passes.
pub fn validate_field(field: Field, raw: &str) -> Option<String> {
    field.rule().check(raw)
}

/// Run every rule against the draft and collect the failures.
///
/// Submission re-runs this in full even when per-field blur checks have
/// already fired; blur results may be stale by submit time.
pub fn validate_draft(draft: &ListingDraft) -> BTreeMap<Field, String> {
    Field::ALL
        .iter()
        .filter_map(|&field| validate_field(field, draft.field(field)).map(|msg| (field, msg)))
        .collect()
}
