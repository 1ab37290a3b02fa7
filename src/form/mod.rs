pub mod draft;
pub mod images;
pub mod validation;

pub use draft::ListingDraft;
pub use images::{ImageError, ImageList, MAX_IMAGES};
pub use validation::{validate_draft, validate_field, Field};
