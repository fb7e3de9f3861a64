use std::fmt;

use serde::Serialize;

use super::domain::ListingPayload;
use super::draft::{DraftField, PropertyDraft};

const MIN_PHONE_DIGITS: usize = 7;
const MAX_PHONE_DIGITS: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorReason {
    Required,
    NotANumber,
    NotPositive,
    NotAWholeNumber,
    InvalidPhone,
}

impl FieldErrorReason {
    /// Swahili hint rendered next to the offending input.
    pub const fn hint(self) -> &'static str {
        match self {
            FieldErrorReason::Required => "Sehemu hii inahitajika",
            FieldErrorReason::NotANumber => "Weka namba sahihi",
            FieldErrorReason::NotPositive => "Thamani lazima iwe zaidi ya sifuri",
            FieldErrorReason::NotAWholeNumber => "Weka namba kamili",
            FieldErrorReason::InvalidPhone => "Nambari ya simu si sahihi",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: DraftField,
    pub reason: FieldErrorReason,
}

/// Every problem found in a draft, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn contains(&self, field: DraftField) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }

    pub fn reason_for(&self, field: DraftField) -> Option<FieldErrorReason> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.reason)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listing draft is invalid:")?;
        for (position, error) in self.errors.iter().enumerate() {
            let separator = if position == 0 { " " } else { ", " };
            write!(f, "{separator}{} ({:?})", error.field, error.reason)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Check the draft's required fields and coerce its raw text into a typed payload.
pub fn validate_draft(draft: &PropertyDraft) -> Result<ListingPayload, ValidationErrors> {
    let mut errors = Vec::new();

    let title = required(draft, DraftField::Title, &mut errors);
    let description = required(draft, DraftField::Description, &mut errors);
    let price = positive_number(draft, DraftField::Price, true, &mut errors);
    let location = required(draft, DraftField::Location, &mut errors);
    let full_address = optional(draft, DraftField::FullAddress);
    let bedrooms = whole_number(draft, DraftField::Bedrooms, &mut errors);
    let bathrooms = whole_number(draft, DraftField::Bathrooms, &mut errors);
    let area_sqm = positive_number(draft, DraftField::AreaSqm, false, &mut errors);
    let contact_phone = required(draft, DraftField::ContactPhone, &mut errors);
    if !contact_phone.is_empty() && !is_phone_formatted(&contact_phone) {
        errors.push(FieldError {
            field: DraftField::ContactPhone,
            reason: FieldErrorReason::InvalidPhone,
        });
    }
    let contact_whatsapp_phone = optional(draft, DraftField::ContactWhatsappPhone);
    if let Some(phone) = &contact_whatsapp_phone {
        if !is_phone_formatted(phone) {
            errors.push(FieldError {
                field: DraftField::ContactWhatsappPhone,
                reason: FieldErrorReason::InvalidPhone,
            });
        }
    }

    if !errors.is_empty() {
        return Err(ValidationErrors { errors });
    }

    Ok(ListingPayload {
        title,
        description,
        price: price.unwrap_or_default(),
        location,
        full_address,
        property_type: draft.property_type(),
        bedrooms,
        bathrooms,
        area_sqm,
        contact_phone,
        contact_whatsapp_phone,
        amenities: *draft.amenities(),
        nearby_services: draft.nearby_services().as_set().clone(),
        images: draft.images().to_vec(),
    })
}

/// Accepts an optional leading `+` followed by digits and common separators.
pub fn is_phone_formatted(raw: &str) -> bool {
    let trimmed = raw.trim();
    let body = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let separators_only = body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')'));
    let digits = body.chars().filter(char::is_ascii_digit).count();
    separators_only && (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}

fn required(draft: &PropertyDraft, field: DraftField, errors: &mut Vec<FieldError>) -> String {
    let value = draft.text(field).trim();
    if value.is_empty() {
        errors.push(FieldError {
            field,
            reason: FieldErrorReason::Required,
        });
    }
    value.to_string()
}

fn optional(draft: &PropertyDraft, field: DraftField) -> Option<String> {
    let value = draft.text(field).trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn positive_number(
    draft: &PropertyDraft,
    field: DraftField,
    is_required: bool,
    errors: &mut Vec<FieldError>,
) -> Option<f64> {
    let raw = draft.text(field).trim();
    if raw.is_empty() {
        if is_required {
            errors.push(FieldError {
                field,
                reason: FieldErrorReason::Required,
            });
        }
        return None;
    }

    let reason = match raw.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => return Some(value),
        Ok(value) if value.is_finite() => FieldErrorReason::NotPositive,
        _ => FieldErrorReason::NotANumber,
    };
    errors.push(FieldError { field, reason });
    None
}

fn whole_number(
    draft: &PropertyDraft,
    field: DraftField,
    errors: &mut Vec<FieldError>,
) -> Option<u32> {
    let raw = draft.text(field).trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<u32>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(FieldError {
                field,
                reason: FieldErrorReason::NotAWholeNumber,
            });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::draft::FieldUpdate;

    fn filled_draft() -> PropertyDraft {
        let mut draft = PropertyDraft::default();
        draft.set_field(FieldUpdate::Title("Nyumba ya Kisasa Mikocheni".to_string()));
        draft.set_field(FieldUpdate::Description("Vyumba viwili na sebule".to_string()));
        draft.set_field(FieldUpdate::Price("800000".to_string()));
        draft.set_field(FieldUpdate::Location("Mikocheni, Dar es Salaam".to_string()));
        draft.set_field(FieldUpdate::ContactPhone("+255712345678".to_string()));
        draft
    }

    #[test]
    fn price_is_coerced_to_number() {
        let payload = validate_draft(&filled_draft()).expect("valid draft");

        assert_eq!(payload.price, 800_000.0);
        assert_eq!(payload.full_address, None);
        assert_eq!(payload.bedrooms, None);
    }

    #[test]
    fn each_missing_required_field_is_reported() {
        let cases = [
            (FieldUpdate::Title(String::new()), DraftField::Title),
            (FieldUpdate::Description("  ".to_string()), DraftField::Description),
            (FieldUpdate::Price(String::new()), DraftField::Price),
            (FieldUpdate::Location(String::new()), DraftField::Location),
            (FieldUpdate::ContactPhone(String::new()), DraftField::ContactPhone),
        ];

        for (update, field) in cases {
            let mut draft = filled_draft();
            draft.set_field(update);
            let errors = validate_draft(&draft).expect_err("missing field rejected");
            assert_eq!(errors.errors().len(), 1, "only {field} should fail");
            assert_eq!(errors.reason_for(field), Some(FieldErrorReason::Required));
        }
    }

    #[test]
    fn empty_draft_collects_every_required_field() {
        let errors = validate_draft(&PropertyDraft::default()).expect_err("empty rejected");
        let fields: Vec<DraftField> = errors.errors().iter().map(|error| error.field).collect();

        assert_eq!(
            fields,
            vec![
                DraftField::Title,
                DraftField::Description,
                DraftField::Price,
                DraftField::Location,
                DraftField::ContactPhone,
            ]
        );
    }

    #[test]
    fn zero_and_non_numeric_prices_are_rejected() {
        let mut draft = filled_draft();
        draft.set_field(FieldUpdate::Price("0".to_string()));
        let errors = validate_draft(&draft).expect_err("zero price");
        assert_eq!(errors.reason_for(DraftField::Price), Some(FieldErrorReason::NotPositive));

        draft.set_field(FieldUpdate::Price("800k".to_string()));
        let errors = validate_draft(&draft).expect_err("text price");
        assert_eq!(errors.reason_for(DraftField::Price), Some(FieldErrorReason::NotANumber));

        draft.set_field(FieldUpdate::Price("inf".to_string()));
        assert!(validate_draft(&draft).is_err());
    }

    #[test]
    fn optional_numbers_must_be_well_formed_when_present() {
        let mut draft = filled_draft();
        draft.set_field(FieldUpdate::Bedrooms("2.5".to_string()));
        draft.set_field(FieldUpdate::Bathrooms("-1".to_string()));
        draft.set_field(FieldUpdate::AreaSqm("0".to_string()));

        let errors = validate_draft(&draft).expect_err("bad optional numbers");
        assert_eq!(
            errors.reason_for(DraftField::Bedrooms),
            Some(FieldErrorReason::NotAWholeNumber)
        );
        assert!(errors.contains(DraftField::Bathrooms));
        assert_eq!(
            errors.reason_for(DraftField::AreaSqm),
            Some(FieldErrorReason::NotPositive)
        );

        draft.set_field(FieldUpdate::Bedrooms(" 3 ".to_string()));
        draft.set_field(FieldUpdate::Bathrooms("0".to_string()));
        draft.set_field(FieldUpdate::AreaSqm("64.5".to_string()));
        let payload = validate_draft(&draft).expect("valid optional numbers");
        assert_eq!(payload.bedrooms, Some(3));
        assert_eq!(payload.bathrooms, Some(0));
        assert_eq!(payload.area_sqm, Some(64.5));
    }

    #[test]
    fn phone_numbers_must_look_like_phone_numbers() {
        assert!(is_phone_formatted("+255712345678"));
        assert!(is_phone_formatted("0712 345 678"));
        assert!(is_phone_formatted("(022) 211-0000"));
        assert!(!is_phone_formatted("call me"));
        assert!(!is_phone_formatted("12345"));
        assert!(!is_phone_formatted("++255712345678"));

        let mut draft = filled_draft();
        draft.set_field(FieldUpdate::ContactWhatsappPhone("whatsapp".to_string()));
        let errors = validate_draft(&draft).expect_err("bad whatsapp number");
        assert_eq!(
            errors.reason_for(DraftField::ContactWhatsappPhone),
            Some(FieldErrorReason::InvalidPhone)
        );
    }

    #[test]
    fn text_fields_are_trimmed() {
        let mut draft = filled_draft();
        draft.set_field(FieldUpdate::Title("  Chumba Sinza  ".to_string()));
        draft.set_field(FieldUpdate::FullAddress("   ".to_string()));

        let payload = validate_draft(&draft).expect("valid");
        assert_eq!(payload.title, "Chumba Sinza");
        assert_eq!(payload.full_address, None);
    }

    #[test]
    fn display_lists_offending_fields() {
        let mut draft = filled_draft();
        draft.set_field(FieldUpdate::ContactPhone(String::new()));
        let message = validate_draft(&draft).expect_err("invalid").to_string();
        assert_eq!(message, "listing draft is invalid: contact_phone (Required)");
    }
}
