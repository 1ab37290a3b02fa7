use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::api::{self, BackendError, ListingBackend};
use crate::form::{validate_field, Field, ListingDraft};
use crate::models::{DataSource, Listing};

/// Page size requested on the initial listing load
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Detail view: one listing plus the carousel position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailState {
    pub listing: Listing,
    pub image_index: usize,
}

impl DetailState {
    pub fn new(listing: Listing) -> Self {
        Self {
            listing,
            image_index: 0,
        }
    }

    /// Step the carousel forward, wrapping past the last image
    pub fn next_image(&mut self) {
        let count = self.listing.images.len();
        if count > 0 {
            self.image_index = (self.image_index + 1) % count;
        }
    }

    /// Step the carousel backward, wrapping before the first image
    pub fn prev_image(&mut self) {
        let count = self.listing.images.len();
        if count > 0 {
            self.image_index = (self.image_index + count - 1) % count;
        }
    }
}

/// Creation-form view state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormState {
    pub open: bool,
    pub draft: ListingDraft,
    /// Field errors keyed by wire name; local validation and backend
    /// `validationErrors` land in the same map
    pub errors: BTreeMap<String, String>,
    /// Single banner notice for non-field failures
    pub notice: Option<String>,
    /// True while a create request is in flight; gates resubmission and
    /// closing the form
    pub submitting: bool,
}

/// Top-level view state. Serializable, mutated only through [`reduce`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppState {
    pub listings: Vec<Listing>,
    pub data_source: DataSource,
    pub search: String,
    pub detail: Option<DetailState>,
    pub form: FormState,
}

impl AppState {
    /// Listings matching the free-text filter, case-insensitively, against
    /// title and city
    pub fn filtered_listings(&self) -> Vec<&Listing> {
        let needle = self.search.trim().to_lowercase();
        self.listings
            .iter()
            .filter(|listing| {
                needle.is_empty()
                    || listing.title.to_lowercase().contains(&needle)
                    || listing.city.to_lowercase().contains(&needle)
            })
            .collect()
    }
}

/// Everything that can happen to the view state
#[derive(Debug)]
pub enum Action {
    ListingsLoaded {
        listings: Vec<Listing>,
        source: DataSource,
    },
    SearchChanged(String),
    DetailOpened(Listing),
    DetailClosed,
    NextImage,
    PrevImage,
    FormOpened,
    FormClosed,
    FieldEdited {
        field: Field,
        value: String,
    },
    FieldBlurred {
        field: Field,
    },
    ImageAdded {
        url: String,
    },
    ImageRemoved {
        index: usize,
    },
    /// Local whole-form validation rejected the draft
    SubmitRejected {
        errors: BTreeMap<Field, String>,
    },
    SubmitStarted,
    /// The backend accepted the draft; carries the canonical record
    SubmitSucceeded(Listing),
    SubmitFailed(BackendError),
}

/// Single state-transition function. Pure: no I/O, no awaits; the async
/// drivers below dispatch into it.
pub fn reduce(state: &mut AppState, action: Action) {
    match action {
        Action::ListingsLoaded { listings, source } => {
            state.listings = listings;
            state.data_source = source;
        }
        Action::SearchChanged(term) => state.search = term,
        Action::DetailOpened(listing) => state.detail = Some(DetailState::new(listing)),
        Action::DetailClosed => state.detail = None,
        Action::NextImage => {
            if let Some(detail) = state.detail.as_mut() {
                detail.next_image();
            }
        }
        Action::PrevImage => {
            if let Some(detail) = state.detail.as_mut() {
                detail.prev_image();
            }
        }
        Action::FormOpened => {
            state.form.open = true;
            state.form.notice = None;
        }
        Action::FormClosed => {
            // No cancellation semantics: the form stays up while a request
            // is in flight.
            if !state.form.submitting {
                state.form.open = false;
            }
        }
        Action::FieldEdited { field, value } => {
            state.form.draft.set_field(field, value);
            state.form.errors.remove(field.name());
        }
        Action::FieldBlurred { field } => {
            match validate_field(field, state.form.draft.field(field)) {
                Some(message) => {
                    state.form.errors.insert(field.name().to_string(), message);
                }
                None => {
                    state.form.errors.remove(field.name());
                }
            }
        }
        Action::ImageAdded { url } => match state.form.draft.images.add(&url) {
            Ok(()) => state.form.notice = None,
            Err(err) => state.form.notice = Some(err.to_string()),
        },
        Action::ImageRemoved { index } => state.form.draft.images.remove(index),
        Action::SubmitRejected { errors } => {
            state.form.errors = errors
                .into_iter()
                .map(|(field, message)| (field.name().to_string(), message))
                .collect();
            state.form.notice = Some("Correct the highlighted fields".to_string());
        }
        Action::SubmitStarted => {
            if !state.form.submitting {
                state.form.submitting = true;
                state.form.notice = None;
            }
        }
        Action::SubmitSucceeded(listing) => {
            // The backend's record is the only thing merged into local
            // state; the draft is discarded.
            state.listings.insert(0, listing);
            state.form = FormState::default();
        }
        Action::SubmitFailed(err) => {
            state.form.submitting = false;
            match err {
                BackendError::Validation(errors) => {
                    state.form.errors = errors;
                    state.form.notice = Some("Correct the highlighted fields".to_string());
                }
                BackendError::Message(message) => state.form.notice = Some(message),
                BackendError::Status(status) => {
                    state.form.notice =
                        Some(format!("The backend returned an unexpected status ({status})"));
                }
                BackendError::Network(_) => {
                    state.form.notice =
                        Some("Could not reach the backend; is it running?".to_string());
                }
            }
        }
    }
}

/// Load the first page of listings into the state, using the sample set
/// when the backend is unreachable
pub async fn load_listings(state: &mut AppState, backend: &dyn ListingBackend) {
    let (listings, source) = api::fetch_page_or_sample(backend, 0, DEFAULT_PAGE_SIZE).await;
    reduce(
        state,
        Action::ListingsLoaded { listings, source },
    );
}

/// Validate and submit the current draft.
///
/// Runs whole-form validation before anything leaves the client; a draft
/// with errors never reaches the backend. At most one submission is in
/// flight at a time.
pub async fn submit(state: &mut AppState, backend: &dyn ListingBackend) {
    if state.form.submitting {
        return;
    }
    let request = match state.form.draft.build_request() {
        Ok(request) => request,
        Err(errors) => {
            reduce(state, Action::SubmitRejected { errors });
            return;
        }
    };

    reduce(state, Action::SubmitStarted);
    match backend.create(&request).await {
        Ok(listing) => reduce(state, Action::SubmitSucceeded(listing)),
        Err(err) => reduce(state, Action::SubmitFailed(err)),
    }
}

/// Open the detail view for `id`, preferring the backend's full record and
/// falling back to the locally held copy when the fetch fails
pub async fn open_detail(state: &mut AppState, backend: &dyn ListingBackend, id: i64) {
    match backend.get(id).await {
        Ok(listing) => reduce(state, Action::DetailOpened(listing)),
        Err(err) => {
            warn!("Detail fetch failed for listing {id}: {err}");
            if let Some(listing) = state.listings.iter().find(|l| l.id == id).cloned() {
                reduce(state, Action::DetailOpened(listing));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::CreateListingRequest;
    use crate::models::{ListingImage, Page, PropertyType};
    use async_trait::async_trait;
    use chrono::Utc;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn listing(id: i64, title: &str, city: &str) -> Listing {
        let now = Utc::now();
        Listing {
            id,
            title: title.to_string(),
            description: "A place to live.".to_string(),
            price: 500_000.0,
            property_type: PropertyType::Sale,
            city: city.to_string(),
            street: None,
            postal_code: None,
            area_sqm: 60.0,
            room_count: Some(3),
            floor_number: None,
            created_at: now,
            updated_at: now,
            owner: None,
            images: vec![],
        }
    }

    fn valid_form_state() -> FormState {
        let mut form = FormState {
            open: true,
            ..FormState::default()
        };
        form.draft.title = "Canal-side flat".to_string();
        form.draft.description = "Quiet street, good light.".to_string();
        form.draft.price = "420000".to_string();
        form.draft.area_sqm = "47".to_string();
        form.draft.city = "Gdańsk".to_string();
        form
    }

    /// Stub backend that answers `create` with one scripted result
    struct ScriptedBackend {
        create_result: Mutex<Option<Result<Listing, BackendError>>>,
        create_calls: AtomicUsize,
    }

    impl ScriptedBackend {
        fn new(result: Result<Listing, BackendError>) -> Self {
            Self {
                create_result: Mutex::new(Some(result)),
                create_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ListingBackend for ScriptedBackend {
        async fn list(&self, _page: u32, _size: u32) -> Result<Page<Listing>, BackendError> {
            Err(BackendError::Status(StatusCode::NOT_FOUND))
        }

        async fn get(&self, _id: i64) -> Result<Listing, BackendError> {
            Err(BackendError::Status(StatusCode::NOT_FOUND))
        }

        async fn create(
            &self,
            _request: &CreateListingRequest,
        ) -> Result<Listing, BackendError> {
            self.create_calls.fetch_add(1, Ordering::SeqCst);
            self.create_result
                .lock()
                .unwrap()
                .take()
                .expect("create called more than once")
        }

        async fn update(&self, _id: i64, _listing: &Listing) -> Result<Listing, BackendError> {
            Err(BackendError::Status(StatusCode::NOT_FOUND))
        }

        async fn delete(&self, _id: i64) -> Result<(), BackendError> {
            Err(BackendError::Status(StatusCode::NOT_FOUND))
        }
    }

    #[test]
    fn filter_matches_title_and_city_case_insensitively() {
        let mut state = AppState::default();
        reduce(
            &mut state,
            Action::ListingsLoaded {
                listings: vec![
                    listing(1, "Ocean View Penthouse", "Gdańsk"),
                    listing(2, "Modern Tech Loft", "Warsaw"),
                    listing(3, "Riverside Apartment", "Wrocław"),
                ],
                source: DataSource::Backend,
            },
        );

        reduce(&mut state, Action::SearchChanged("ocean".to_string()));
        assert_eq!(state.filtered_listings().len(), 1);

        reduce(&mut state, Action::SearchChanged("WARSAW".to_string()));
        let visible = state.filtered_listings();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, 2);

        reduce(&mut state, Action::SearchChanged(String::new()));
        assert_eq!(state.filtered_listings().len(), 3);

        reduce(&mut state, Action::SearchChanged("nowhere".to_string()));
        assert!(state.filtered_listings().is_empty());
    }

    #[test]
    fn carousel_wraps_in_both_directions() {
        let mut shown = listing(1, "Penthouse", "Gdańsk");
        shown.images = (1..=3)
            .map(|n| ListingImage {
                image_url: format!("https://cdn.example.com/{n}.jpg"),
                display_order: n,
                original_file_name: None,
                content_type: None,
            })
            .collect();

        let mut state = AppState::default();
        reduce(&mut state, Action::DetailOpened(shown));

        reduce(&mut state, Action::PrevImage);
        assert_eq!(state.detail.as_ref().unwrap().image_index, 2);

        reduce(&mut state, Action::NextImage);
        assert_eq!(state.detail.as_ref().unwrap().image_index, 0);
        reduce(&mut state, Action::NextImage);
        assert_eq!(state.detail.as_ref().unwrap().image_index, 1);
    }

    #[test]
    fn carousel_is_inert_without_images() {
        let mut state = AppState::default();
        reduce(&mut state, Action::DetailOpened(listing(1, "Flat", "Warsaw")));
        reduce(&mut state, Action::NextImage);
        reduce(&mut state, Action::PrevImage);
        assert_eq!(state.detail.as_ref().unwrap().image_index, 0);
    }

    #[test]
    fn editing_a_field_clears_its_error_and_blur_revalidates() {
        let mut state = AppState::default();
        reduce(&mut state, Action::FormOpened);

        reduce(&mut state, Action::FieldBlurred { field: Field::Title });
        assert!(state.form.errors.contains_key("title"));

        reduce(
            &mut state,
            Action::FieldEdited {
                field: Field::Title,
                value: "Canal-side flat".to_string(),
            },
        );
        assert!(!state.form.errors.contains_key("title"));

        reduce(
            &mut state,
            Action::FieldEdited {
                field: Field::PostalCode,
                value: "junk".to_string(),
            },
        );
        reduce(
            &mut state,
            Action::FieldBlurred {
                field: Field::PostalCode,
            },
        );
        assert!(state.form.errors.contains_key("postalCode"));
    }

    #[test]
    fn rejected_image_url_surfaces_a_notice() {
        let mut state = AppState::default();
        reduce(&mut state, Action::FormOpened);
        reduce(
            &mut state,
            Action::ImageAdded {
                url: "https://cdn.example.com/contract.pdf".to_string(),
            },
        );
        assert!(state.form.notice.is_some());
        assert!(state.form.draft.images.is_empty());

        reduce(
            &mut state,
            Action::ImageAdded {
                url: "https://cdn.example.com/front.jpg".to_string(),
            },
        );
        assert!(state.form.notice.is_none());
        assert_eq!(state.form.draft.images.len(), 1);
    }

    #[tokio::test]
    async fn backend_field_errors_land_in_the_form_and_keep_it_open() {
        let mut errors = BTreeMap::new();
        errors.insert("city".to_string(), "required".to_string());
        let backend = ScriptedBackend::new(Err(BackendError::Validation(errors)));

        let mut state = AppState {
            form: valid_form_state(),
            ..AppState::default()
        };
        submit(&mut state, &backend).await;

        assert!(state.form.open, "form must stay open on field errors");
        assert!(!state.form.submitting);
        assert_eq!(state.form.errors.len(), 1);
        assert_eq!(state.form.errors["city"], "required");
        assert!(state.listings.is_empty(), "no listing may be fabricated");
    }

    #[tokio::test]
    async fn successful_submit_prepends_the_backend_record_and_resets_the_form() {
        let canonical = listing(99, "Canal-side flat", "Gdańsk");
        let backend = ScriptedBackend::new(Ok(canonical));

        let mut state = AppState {
            listings: vec![listing(1, "Old listing", "Warsaw")],
            form: valid_form_state(),
            ..AppState::default()
        };
        submit(&mut state, &backend).await;

        assert_eq!(state.listings.len(), 2);
        assert_eq!(state.listings[0].id, 99, "server record goes first");
        assert!(!state.form.open);
        assert!(state.form.draft.title.is_empty());
        assert!(state.form.errors.is_empty());
    }

    #[tokio::test]
    async fn an_invalid_draft_never_reaches_the_backend() {
        let backend = ScriptedBackend::new(Ok(listing(99, "Unused", "Warsaw")));
        let mut state = AppState::default();
        state.form.open = true;

        submit(&mut state, &backend).await;

        assert_eq!(backend.create_calls.load(Ordering::SeqCst), 0);
        assert!(state.form.open);
        assert!(state.form.errors.contains_key("title"));
        assert!(state.form.notice.is_some());
    }

    #[tokio::test]
    async fn generic_backend_failure_becomes_a_single_notice() {
        let backend =
            ScriptedBackend::new(Err(BackendError::Message("Owner not found".to_string())));
        let mut state = AppState {
            form: valid_form_state(),
            ..AppState::default()
        };
        submit(&mut state, &backend).await;

        assert_eq!(state.form.notice.as_deref(), Some("Owner not found"));
        assert!(state.form.errors.is_empty());
        assert!(state.form.open);
        assert!(state.listings.is_empty());
    }

    #[tokio::test]
    async fn read_failure_renders_the_sample_set_without_an_error_state() {
        let backend = ScriptedBackend::new(Ok(listing(99, "Unused", "Warsaw")));
        let mut state = AppState::default();

        load_listings(&mut state, &backend).await;

        assert_eq!(state.data_source, DataSource::Sample);
        assert!(!state.listings.is_empty());
        assert!(state.form.notice.is_none(), "read fallback is silent");
        assert!(!state.filtered_listings().is_empty());
    }

    #[tokio::test]
    async fn detail_open_falls_back_to_the_local_copy_when_the_fetch_fails() {
        let backend = ScriptedBackend::new(Ok(listing(99, "Unused", "Warsaw")));
        let mut state = AppState {
            listings: vec![listing(5, "Penthouse", "Gdańsk")],
            ..AppState::default()
        };

        open_detail(&mut state, &backend, 5).await;
        assert_eq!(state.detail.as_ref().unwrap().listing.id, 5);

        // Unknown id: the failed fetch has no local copy to fall back to,
        // so the view is left as it was.
        open_detail(&mut state, &backend, 404).await;
        assert_eq!(state.detail.as_ref().unwrap().listing.id, 5);
    }

    #[test]
    fn the_form_cannot_close_mid_flight() {
        let mut state = AppState::default();
        reduce(&mut state, Action::FormOpened);
        reduce(&mut state, Action::SubmitStarted);
        reduce(&mut state, Action::FormClosed);
        assert!(state.form.open);

        reduce(&mut state, Action::SubmitFailed(BackendError::Message("x".to_string())));
        reduce(&mut state, Action::FormClosed);
        assert!(!state.form.open);
    }

    #[test]
    fn view_state_round_trips_through_serde() {
        let mut state = AppState::default();
        reduce(
            &mut state,
            Action::ListingsLoaded {
                listings: vec![listing(1, "Penthouse", "Gdańsk")],
                source: DataSource::Sample,
            },
        );
        reduce(&mut state, Action::SearchChanged("pent".to_string()));

        let json = serde_json::to_string(&state).expect("state should serialize");
        let restored: AppState = serde_json::from_str(&json).expect("state should parse");
        assert_eq!(restored.listings.len(), 1);
        assert_eq!(restored.search, "pent");
        assert_eq!(restored.data_source, DataSource::Sample);
    }
}
