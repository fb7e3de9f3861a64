use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{ListingSession, PropertyId, PropertyRecord};
use super::draft::PropertyDraft;
use super::repository::{ListingStore, PersistenceError};
use super::validation::{validate_draft, ValidationErrors};

/// Whether a submit creates a new listing or replaces an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(PropertyId),
}

/// Lifecycle of a single submit. `Succeeded` and `Failed` are transient and settle to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// Result of the most recent settled submit, kept for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Saved(PropertyId),
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("a submission is already in flight")]
    AlreadySubmitting,
    #[error("listing form was closed before the submission finished")]
    Discarded,
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl SubmitError {
    /// Banner text for the listing dialog.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Validation(errors) => {
                let fields: Vec<&str> = errors
                    .errors()
                    .iter()
                    .map(|error| error.field.as_str())
                    .collect();
                format!(
                    "Tafadhali rekebisha sehemu zifuatazo: {}",
                    fields.join(", ")
                )
            }
            SubmitError::AlreadySubmitting => {
                "Tafadhali subiri, nyumba bado inahifadhiwa".to_string()
            }
            SubmitError::Discarded => "Fomu ilifungwa kabla ya kuhifadhi".to_string(),
            SubmitError::Persistence(_) => {
                "Imeshindikana kuhifadhi nyumba. Tafadhali jaribu tena.".to_string()
            }
        }
    }
}

/// Gatekeeper for create/update calls: at most one in flight, results dropped once disposed.
#[derive(Debug)]
pub struct SubmissionController {
    state: Mutex<SubmissionState>,
    last_outcome: Mutex<Option<SubmissionOutcome>>,
    disposed: AtomicBool,
}

impl Default for SubmissionController {
    fn default() -> Self {
        Self {
            state: Mutex::new(SubmissionState::Idle),
            last_outcome: Mutex::new(None),
            disposed: AtomicBool::new(false),
        }
    }
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SubmissionState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mirrors the submit button's enabled state.
    pub fn can_submit(&self) -> bool {
        self.state() == SubmissionState::Idle && !self.is_disposed()
    }

    pub fn last_outcome(&self) -> Option<SubmissionOutcome> {
        self.last_outcome
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Mark the owning form as gone. An in-flight call keeps running but its result is ignored.
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::Release);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::Acquire)
    }

    /// Validate the draft and, if it passes, issue exactly one create or update call.
    pub async fn submit<S>(
        &self,
        session: &ListingSession,
        mode: &FormMode,
        draft: &PropertyDraft,
        store: &S,
    ) -> Result<PropertyRecord, SubmitError>
    where
        S: ListingStore + ?Sized,
    {
        if self.is_disposed() {
            return Err(SubmitError::Discarded);
        }
        let _in_flight = self.begin()?;

        let payload = match validate_draft(draft) {
            Ok(payload) => payload,
            Err(errors) => {
                debug!(invalid_fields = errors.errors().len(), "listing draft rejected");
                let err = SubmitError::from(errors);
                self.record(SubmissionOutcome::Rejected(err.user_message()));
                return Err(err);
            }
        };

        self.transition(SubmissionState::Submitting);
        let result = match mode {
            FormMode::Create => store.create(&session.owner, payload).await,
            FormMode::Edit(id) => store.update(id, payload).await,
        };

        if self.is_disposed() {
            debug!("listing form closed mid-submit; discarding result");
            return Err(SubmitError::Discarded);
        }

        match result {
            Ok(record) => {
                self.transition(SubmissionState::Succeeded);
                info!(property_id = %record.id.0, owner = %record.owner_id.0, "listing saved");
                self.record(SubmissionOutcome::Saved(record.id.clone()));
                Ok(record)
            }
            Err(source) => {
                self.transition(SubmissionState::Failed);
                warn!(error = %source, "listing persistence failed");
                let err = SubmitError::from(source);
                self.record(SubmissionOutcome::Rejected(err.user_message()));
                Err(err)
            }
        }
    }

    fn begin(&self) -> Result<InFlight<'_>, SubmitError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if *state != SubmissionState::Idle {
            debug!(state = ?*state, "submit ignored while another is in flight");
            return Err(SubmitError::AlreadySubmitting);
        }
        *state = SubmissionState::Validating;
        Ok(InFlight { controller: self })
    }

    fn transition(&self, next: SubmissionState) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        debug!(from = ?*state, to = ?next, "submission state change");
        *state = next;
    }

    fn record(&self, outcome: SubmissionOutcome) {
        if self.is_disposed() {
            return;
        }
        *self
            .last_outcome
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(outcome);
    }
}

// Returns the controller to `Idle` however the submit ends, including a dropped future.
struct InFlight<'a> {
    controller: &'a SubmissionController,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.controller.transition(SubmissionState::Idle);
    }
}
