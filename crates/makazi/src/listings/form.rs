use tracing::warn;

use super::controller::{FormMode, SubmissionController, SubmissionOutcome, SubmissionState, SubmitError};
use super::domain::{ImageRef, ListingSession, PropertyRecord};
use super::draft::{FieldUpdate, PropertyDraft};
use super::images::ImageListError;
use super::repository::{ImageFile, ImageStorage, ListingStore, UploadError};

/// Per-image result of an upload batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUploadFailure {
    pub file_name: String,
    pub error: UploadError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSummary {
    pub uploaded: Vec<ImageRef>,
    pub failures: Vec<ImageUploadFailure>,
}

/// The add/edit listing dialog: owns one draft and one submission controller.
///
/// Edits take `&mut self` while `submit` takes `&self`, so the draft cannot change underneath
/// an in-flight submission and is left untouched when it fails.
#[derive(Debug)]
pub struct ListingForm {
    session: ListingSession,
    mode: FormMode,
    draft: PropertyDraft,
    controller: SubmissionController,
}

impl ListingForm {
    /// Empty form for a new listing.
    pub fn new_listing(session: ListingSession) -> Self {
        Self {
            session,
            mode: FormMode::Create,
            draft: PropertyDraft::default(),
            controller: SubmissionController::new(),
        }
    }

    /// Form pre-filled from a stored listing. A missing record falls back to a new listing.
    pub fn edit_listing(session: ListingSession, existing: Option<&PropertyRecord>) -> Self {
        let mode = match existing {
            Some(record) => FormMode::Edit(record.id.clone()),
            None => FormMode::Create,
        };
        Self {
            session,
            mode,
            draft: PropertyDraft::from_record(existing),
            controller: SubmissionController::new(),
        }
    }

    pub fn session(&self) -> &ListingSession {
        &self.session
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn draft(&self) -> &PropertyDraft {
        &self.draft
    }

    /// Dialog heading, matching the create/edit buttons.
    pub fn heading(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Ongeza Nyumba Mpya",
            FormMode::Edit(_) => "Sasisha Nyumba",
        }
    }

    pub fn set_field(&mut self, update: FieldUpdate) {
        self.draft.set_field(update);
    }

    /// Replace the whole draft, e.g. with a body posted by an API client.
    pub fn replace_draft(&mut self, draft: PropertyDraft) {
        self.draft = draft;
    }

    pub fn toggle_service(&mut self, service: &str) -> bool {
        self.draft.nearby_services_mut().toggle(service)
    }

    pub fn add_images<I>(&mut self, refs: I)
    where
        I: IntoIterator,
        I::Item: Into<ImageRef>,
    {
        self.draft.images_mut().add_images(refs);
    }

    pub fn remove_image(&mut self, index: usize) -> Result<ImageRef, ImageListError> {
        self.draft.images_mut().remove_image(index)
    }

    /// Upload files one at a time, appending each reference as soon as it is stored.
    /// A failed file is reported and skipped; earlier uploads stay in the draft.
    pub async fn upload_images<U>(&mut self, storage: &U, files: Vec<ImageFile>) -> UploadSummary
    where
        U: ImageStorage + ?Sized,
    {
        let mut summary = UploadSummary::default();

        for file in files {
            let file_name = file.file_name.clone();
            let result = match precheck(&file) {
                Ok(()) => storage.upload(file).await,
                Err(err) => Err(err),
            };

            match result {
                Ok(reference) => {
                    self.add_images([reference.clone()]);
                    summary.uploaded.push(reference);
                }
                Err(error) => {
                    warn!(file = %file_name, %error, "listing image upload failed");
                    summary.failures.push(ImageUploadFailure { file_name, error });
                }
            }
        }

        summary
    }

    pub fn submission_state(&self) -> SubmissionState {
        self.controller.state()
    }

    pub fn can_submit(&self) -> bool {
        self.controller.can_submit()
    }

    pub fn last_outcome(&self) -> Option<SubmissionOutcome> {
        self.controller.last_outcome()
    }

    /// Validate and persist the current draft. Rejected while another submit is in flight.
    pub async fn submit<S>(&self, store: &S) -> Result<PropertyRecord, SubmitError>
    where
        S: ListingStore + ?Sized,
    {
        self.controller
            .submit(&self.session, &self.mode, &self.draft, store)
            .await
    }

    /// Dismiss the dialog. A pending submission may still complete remotely but is not applied.
    pub fn close(&self) {
        self.controller.dispose();
    }

    pub fn is_closed(&self) -> bool {
        self.controller.is_disposed()
    }
}

fn precheck(file: &ImageFile) -> Result<(), UploadError> {
    if file.content_type.type_() != mime::IMAGE {
        return Err(UploadError::UnsupportedMedia {
            file_name: file.file_name.clone(),
            content_type: file.content_type.to_string(),
        });
    }
    if file.bytes.is_empty() {
        return Err(UploadError::Empty {
            file_name: file.file_name.clone(),
        });
    }
    Ok(())
}
