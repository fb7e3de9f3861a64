//! Landlord listing workflow: draft editing, image handling, validation, and submission.

pub mod catalog;
pub mod controller;
pub mod domain;
pub mod draft;
pub mod form;
pub mod images;
pub mod presentation;
pub mod repository;
pub mod router;
pub mod services;
pub mod validation;

pub use catalog::ListingQuery;
pub use controller::{
    FormMode, SubmissionController, SubmissionOutcome, SubmissionState, SubmitError,
};
pub use domain::{
    Amenities, Amenity, ImageRef, ListingPayload, ListingSession, NearbyService, OwnerId,
    PropertyId, PropertyRecord, PropertyType,
};
pub use draft::{DraftField, FieldUpdate, PropertyDraft};
pub use form::{ImageUploadFailure, ListingForm, UploadSummary};
pub use images::{ImageGallery, ImageList, ImageListError};
pub use presentation::{format_price, whatsapp_link, ListingDetailView, ListingSummaryView};
pub use repository::{
    ImageFile, ImageStorage, ListingStore, PersistenceError, UploadError,
};
pub use router::{listing_router, OWNER_HEADER};
pub use services::NearbyServices;
pub use validation::{validate_draft, FieldError, FieldErrorReason, ValidationErrors};
