use crate::infra::{InMemoryImageStorage, InMemoryListingStore};
use clap::Args;
use makazi::accounts::{ProfileDraft, SignUpDraft};
use makazi::config::{ListingConfig, DEFAULT_CURRENCY};
use makazi::error::AppError;
use makazi::listings::{
    validate_draft, FieldUpdate, ImageFile, ImageGallery, ListingDetailView, ListingForm,
    ListingQuery, ListingSession, ListingStore, ListingSummaryView, PropertyDraft, PropertyType,
    SubmitError, UploadSummary,
};
use std::fs;
use std::path::{Path, PathBuf};

const DEMO_IMAGE_BASE: &str = "https://cdn.makazi.test/listings";

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Landlord id used for the listing session.
    #[arg(long, default_value = "landlord-demo")]
    pub(crate) owner: String,
    /// Currency code shown in price labels.
    #[arg(long, default_value = DEFAULT_CURRENCY)]
    pub(crate) currency: String,
    /// Local photos to upload instead of the bundled samples.
    #[arg(long = "image")]
    pub(crate) images: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// Listing draft as JSON, using the same field names as the HTTP API.
    #[arg(long)]
    pub(crate) draft: PathBuf,
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        owner,
        currency,
        images,
    } = args;
    let display = ListingConfig {
        currency: currency.trim().to_ascii_uppercase(),
    };
    let store = InMemoryListingStore::default();
    let storage = InMemoryImageStorage::new(DEMO_IMAGE_BASE);

    println!("Makazi landlord demo");

    let registration = SignUpDraft {
        full_name: "Amina Mushi".to_string(),
        email: "Amina.Mushi@example.co.tz".to_string(),
        phone: "+255 712 345 678".to_string(),
        password: "nyumba2025".to_string(),
        confirm_password: "nyumba2025".to_string(),
    }
    .into_request()?;
    println!(
        "- Registered {} <{}> as {:?}",
        registration.metadata.full_name, registration.email, registration.metadata.user_type
    );

    let profile = ProfileDraft {
        full_name: registration.metadata.full_name.clone(),
        phone: "+255 754 000 111".to_string(),
        user_type: "tenant".to_string(),
    }
    .into_update()?;
    println!(
        "- Profile updated: {} | {} | {}",
        profile.full_name,
        profile.phone,
        profile.user_type.label()
    );

    let session = ListingSession::new(owner);
    let mut form = ListingForm::new_listing(session.clone());
    println!("\n{}", form.heading());
    for update in [
        FieldUpdate::Title("Nyumba ya Kisasa Mikocheni".to_string()),
        FieldUpdate::Description("Vyumba viwili vya kulala, sebule pana na jiko la kisasa".to_string()),
        FieldUpdate::Price("800000".to_string()),
        FieldUpdate::Location("Mikocheni, Dar es Salaam".to_string()),
        FieldUpdate::PropertyType(Some(PropertyType::House)),
        FieldUpdate::Bedrooms("2".to_string()),
        FieldUpdate::Bathrooms("1".to_string()),
    ] {
        form.set_field(update);
    }
    form.toggle_service("school");
    form.toggle_service("market");
    form.toggle_service("transport");

    let files = if images.is_empty() {
        sample_images()
    } else {
        read_images(&images)?
    };
    let summary = form.upload_images(&storage, files).await;
    render_upload_summary(&summary);

    match form.submit(&store).await {
        Err(SubmitError::Validation(errors)) => {
            println!("- First attempt rejected:");
            for error in errors.errors() {
                println!("  - {}: {}", error.field, error.reason.hint());
            }
        }
        Err(err) => return Err(err.into()),
        Ok(record) => println!("- Saved {} without a contact phone", record.id.0),
    }

    form.set_field(FieldUpdate::ContactPhone("+255 712 345 678".to_string()));
    let created = form.submit(&store).await?;
    println!(
        "- Saved {} ({} photos, state {:?})",
        created.id.0,
        created.listing.images.len(),
        form.submission_state()
    );
    form.close();

    let mut edit = ListingForm::edit_listing(session, Some(&created));
    println!("\n{}", edit.heading());
    edit.set_field(FieldUpdate::Price("750000".to_string()));
    edit.set_field(FieldUpdate::ContactWhatsappPhone("+255 754 000 111".to_string()));
    edit.toggle_service("transport");
    let updated = edit.submit(&store).await?;
    println!("- Updated {} at {}", updated.id.0, updated.updated_at.to_rfc3339());

    let detail = ListingDetailView::from_record(&updated, &display.currency);
    println!("\n{} | {}", detail.title, detail.price_label);
    println!("- Address: {}", detail.address);
    if let Some(label) = detail.property_type_label {
        println!("- Type: {label}");
    }
    if !detail.service_badges.is_empty() {
        println!("- Nearby: {}", detail.service_badges.join(", "));
    }
    if let Some(link) = &detail.whatsapp_link {
        println!("- WhatsApp: {link}");
    }

    let mut gallery = ImageGallery::new(&updated.listing.images);
    gallery.previous();
    if let (Some(image), Some(position)) = (gallery.current(), gallery.position_label()) {
        println!("- Gallery {position}: {}", image.0);
    }

    let query = ListingQuery {
        location: Some("mikocheni".to_string()),
        max_price: Some(1_000_000.0),
        ..ListingQuery::default()
    };
    let records = store.list().await.map_err(SubmitError::from)?;
    let matches = query.apply(records);
    println!("\nBrowse results for \"mikocheni\" under 1,000,000:");
    for record in &matches {
        let card = ListingSummaryView::from_record(record, &display.currency);
        println!("- {} | {} | {}", card.title, card.price_label, card.cover_image);
    }
    println!("({} bytes of photos stored)", storage.stored_bytes());

    Ok(())
}

pub(crate) fn run_validate(args: ValidateArgs) -> Result<(), AppError> {
    let draft = load_draft(&args.draft)?;

    match validate_draft(&draft) {
        Ok(payload) => {
            println!("Draft is valid:");
            println!("{}", serde_json::to_string_pretty(&payload)?);
            Ok(())
        }
        Err(errors) => {
            println!("Draft has {} problem(s):", errors.errors().len());
            for error in errors.errors() {
                println!("- {}: {}", error.field, error.reason.hint());
            }
            Err(SubmitError::from(errors).into())
        }
    }
}

pub(crate) fn load_draft(path: &Path) -> Result<PropertyDraft, AppError> {
    let raw = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

fn read_images(paths: &[PathBuf]) -> Result<Vec<ImageFile>, AppError> {
    paths
        .iter()
        .map(|path| -> Result<ImageFile, AppError> {
            let bytes = fs::read(path)?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let content_type = mime_guess::from_path(path).first_or_octet_stream();
            Ok(ImageFile::new(file_name, content_type, bytes))
        })
        .collect()
}

fn sample_images() -> Vec<ImageFile> {
    ["sebule.jpg", "chumba.png", "mkataba.pdf", "jiko.webp"]
        .into_iter()
        .map(|name| {
            let content_type = mime_guess::from_path(name).first_or_octet_stream();
            ImageFile::new(name, content_type, vec![0u8; 2048])
        })
        .collect()
}

fn render_upload_summary(summary: &UploadSummary) {
    println!("- Uploaded {} photo(s)", summary.uploaded.len());
    for failure in &summary.failures {
        println!("  - skipped {}: {}", failure.file_name, failure.error);
    }
}
