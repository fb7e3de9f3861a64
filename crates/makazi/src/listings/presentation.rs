use serde::Serialize;

use super::domain::{ImageRef, PropertyId, PropertyRecord};

/// Shown when a listing has no photos yet.
pub const PLACEHOLDER_IMAGE: &str =
    "https://images.unsplash.com/photo-1721322800607-8c38375eef04?w=800&h=600&fit=crop";

const WHATSAPP_GREETING: &str = "Hujambo, ninapenda kujua zaidi kuhusu nyumba hii";

/// Card on the browse page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingSummaryView {
    pub id: PropertyId,
    pub title: String,
    pub price_label: String,
    pub location: String,
    pub property_type_label: Option<&'static str>,
    pub cover_image: String,
}

/// Everything the property detail page renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingDetailView {
    pub id: PropertyId,
    pub title: String,
    pub description: String,
    pub price_label: String,
    pub address: String,
    pub property_type_label: Option<&'static str>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub area_sqm: Option<f64>,
    pub amenity_badges: Vec<&'static str>,
    pub service_badges: Vec<String>,
    pub images: Vec<ImageRef>,
    pub cover_image: String,
    pub contact_phone: String,
    pub whatsapp_link: Option<String>,
}

impl ListingSummaryView {
    pub fn from_record(record: &PropertyRecord, currency: &str) -> Self {
        Self {
            id: record.id.clone(),
            title: record.listing.title.clone(),
            price_label: format_price(record.listing.price, currency),
            location: record.listing.location.clone(),
            property_type_label: record.listing.property_type.map(|kind| kind.label()),
            cover_image: cover_or_placeholder(record),
        }
    }
}

impl ListingDetailView {
    pub fn from_record(record: &PropertyRecord, currency: &str) -> Self {
        let listing = &record.listing;
        Self {
            id: record.id.clone(),
            title: listing.title.clone(),
            description: listing.description.clone(),
            price_label: format_price(listing.price, currency),
            address: listing
                .full_address
                .clone()
                .unwrap_or_else(|| listing.location.clone()),
            property_type_label: listing.property_type.map(|kind| kind.label()),
            bedrooms: listing.bedrooms,
            bathrooms: listing.bathrooms,
            area_sqm: listing.area_sqm,
            amenity_badges: listing.amenities.enabled().map(|amenity| amenity.label()).collect(),
            service_badges: listing
                .nearby_services
                .iter()
                .map(|service| format!("{} karibu", service.label()))
                .collect(),
            images: listing.images.clone(),
            cover_image: cover_or_placeholder(record),
            contact_phone: listing.contact_phone.clone(),
            whatsapp_link: whatsapp_link(record),
        }
    }
}

/// `TZS 800,000` style label. Fractions are rounded to whole units.
pub fn format_price(price: f64, currency: &str) -> String {
    let rounded = format!("{:.0}", price.abs());
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (position, digit) in rounded.chars().enumerate() {
        if position > 0 && (rounded.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if price < 0.0 { "-" } else { "" };
    format!("{currency} {sign}{grouped}")
}

/// Deep link that opens WhatsApp with a greeting about the listing. Prefers the WhatsApp
/// number and falls back to the contact phone.
pub fn whatsapp_link(record: &PropertyRecord) -> Option<String> {
    let listing = &record.listing;
    let phone = listing
        .contact_whatsapp_phone
        .as_deref()
        .filter(|phone| !phone.trim().is_empty())
        .unwrap_or(&listing.contact_phone);
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }

    let message = format!("{WHATSAPP_GREETING}: {}", listing.title);
    Some(format!(
        "https://wa.me/{digits}?text={}",
        urlencoding::encode(&message)
    ))
}

fn cover_or_placeholder(record: &PropertyRecord) -> String {
    record
        .cover_image()
        .map_or_else(|| PLACEHOLDER_IMAGE.to_string(), |image| image.0.clone())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::Utc;

    use super::*;
    use crate::listings::domain::{
        Amenities, ListingPayload, NearbyService, OwnerId, PropertyType,
    };

    fn record() -> PropertyRecord {
        let now = Utc::now();
        PropertyRecord {
            id: PropertyId("prop-000001".to_string()),
            owner_id: OwnerId("landlord-1".to_string()),
            listing: ListingPayload {
                title: "Nyumba Mikocheni".to_string(),
                description: "Vyumba vitatu".to_string(),
                price: 800_000.0,
                location: "Mikocheni".to_string(),
                full_address: Some("Plot 12, Mikocheni B".to_string()),
                property_type: Some(PropertyType::Apartment),
                bedrooms: Some(3),
                bathrooms: Some(2),
                area_sqm: None,
                contact_phone: "+255 712 345 678".to_string(),
                contact_whatsapp_phone: None,
                amenities: Amenities {
                    electricity: true,
                    furnished: true,
                    ..Amenities::default()
                },
                nearby_services: BTreeSet::from([NearbyService::Hospital, NearbyService::School]),
                images: Vec::new(),
            },
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn prices_are_grouped_by_thousands() {
        assert_eq!(format_price(800_000.0, "TZS"), "TZS 800,000");
        assert_eq!(format_price(1_250_000.4, "TZS"), "TZS 1,250,000");
        assert_eq!(format_price(950.0, "KES"), "KES 950");
    }

    #[test]
    fn whatsapp_link_uses_contact_phone_when_whatsapp_missing() {
        let link = whatsapp_link(&record()).expect("link built");
        assert_eq!(
            link,
            "https://wa.me/255712345678?text=Hujambo%2C%20ninapenda%20kujua%20zaidi%20kuhusu%20nyumba%20hii%3A%20Nyumba%20Mikocheni"
        );

        let mut with_whatsapp = record();
        with_whatsapp.listing.contact_whatsapp_phone = Some("+255 754 000 111".to_string());
        let link = whatsapp_link(&with_whatsapp).expect("link built");
        assert!(link.starts_with("https://wa.me/255754000111?text="));
    }

    #[test]
    fn detail_view_prefers_full_address_and_labels_badges() {
        let view = ListingDetailView::from_record(&record(), "TZS");

        assert_eq!(view.address, "Plot 12, Mikocheni B");
        assert_eq!(view.property_type_label, Some("Ghorofa"));
        assert_eq!(view.amenity_badges, vec!["Umeme", "Vifaa vya Nyumbani"]);
        assert_eq!(view.service_badges, vec!["Shule karibu", "Hospitali karibu"]);
        assert_eq!(view.cover_image, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn summary_view_uses_first_image_as_cover() {
        let mut record = record();
        record.listing.images = vec![ImageRef::from("cover.jpg"), ImageRef::from("two.jpg")];

        let view = ListingSummaryView::from_record(&record, "TZS");
        assert_eq!(view.cover_image, "cover.jpg");
        assert_eq!(view.price_label, "TZS 800,000");
    }
}
