use async_trait::async_trait;

use crate::api::error::BackendError;
use crate::api::types::CreateListingRequest;
use crate::models::{Listing, Page};

/// Common trait over the marketplace backend.
/// Keeps the read/submit flows testable against a stub instead of live HTTP.
#[async_trait]
pub trait ListingBackend: Send + Sync {
    /// Fetch one page of listings
    async fn list(&self, page: u32, size: u32) -> Result<Page<Listing>, BackendError>;

    /// Fetch a single listing by id
    async fn get(&self, id: i64) -> Result<Listing, BackendError>;

    /// Create a listing from a validated draft; the returned record is the
    /// backend's canonical copy
    async fn create(&self, request: &CreateListingRequest) -> Result<Listing, BackendError>;

    /// Replace a listing. Part of the service surface; no current screen
    /// drives it.
    async fn update(&self, id: i64, listing: &Listing) -> Result<Listing, BackendError>;

    /// Delete a listing by id. Part of the service surface; no current
    /// screen drives it.
    async fn delete(&self, id: i64) -> Result<(), BackendError>;
}
