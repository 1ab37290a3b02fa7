pub mod client;
pub mod error;
pub mod sample;
pub mod traits;
pub mod types;

pub use client::HttpBackend;
pub use error::BackendError;
pub use traits::ListingBackend;
pub use types::CreateListingRequest;

use tracing::{info, warn};

use crate::models::{DataSource, Listing};

/// Read-path entry point: fetch one page of listings, substituting the
/// built-in sample set when the backend cannot be reached.
///
/// The substitution keeps the demo UI populated; the returned [`DataSource`]
/// records which set the caller is looking at. An empty page from a healthy
/// backend is returned as-is, not replaced.
pub async fn fetch_page_or_sample(
    backend: &dyn ListingBackend,
    page: u32,
    size: u32,
) -> (Vec<Listing>, DataSource) {
    match backend.list(page, size).await {
        Ok(page) => (page.content, DataSource::Backend),
        Err(err) => {
            warn!("Listing fetch failed: {err}");
            info!("Falling back to built-in sample listings");
            (sample::listings(), DataSource::Sample)
        }
    }
}
