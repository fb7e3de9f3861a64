//! Listing workflow for the Makazi rental marketplace.
//!
//! Landlords create and edit property listings through a [`listings::ListingForm`]; the form
//! validates its draft and hands it to an external [`listings::ListingStore`]. Everything
//! else the site does (auth, storage, translations) lives behind collaborator traits.

pub mod accounts;
pub mod config;
pub mod error;
pub mod listings;
pub mod telemetry;
