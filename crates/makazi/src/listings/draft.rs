use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::{Amenities, Amenity, PropertyRecord, PropertyType};
use super::images::ImageList;
use super::services::NearbyServices;

/// Closed set of editable text/choice fields, used to address validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Title,
    Description,
    Price,
    Location,
    FullAddress,
    PropertyType,
    Bedrooms,
    Bathrooms,
    AreaSqm,
    ContactPhone,
    ContactWhatsappPhone,
}

impl DraftField {
    pub const fn as_str(self) -> &'static str {
        match self {
            DraftField::Title => "title",
            DraftField::Description => "description",
            DraftField::Price => "price",
            DraftField::Location => "location",
            DraftField::FullAddress => "full_address",
            DraftField::PropertyType => "property_type",
            DraftField::Bedrooms => "bedrooms",
            DraftField::Bathrooms => "bathrooms",
            DraftField::AreaSqm => "area_sqm",
            DraftField::ContactPhone => "contact_phone",
            DraftField::ContactWhatsappPhone => "contact_whatsapp_phone",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One user edit. Numeric fields stay as raw text until submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FieldUpdate {
    Title(String),
    Description(String),
    Price(String),
    Location(String),
    FullAddress(String),
    PropertyType(Option<PropertyType>),
    Bedrooms(String),
    Bathrooms(String),
    AreaSqm(String),
    ContactPhone(String),
    ContactWhatsappPhone(String),
    Amenity { amenity: Amenity, enabled: bool },
}

/// Editable listing before it is persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyDraft {
    title: String,
    description: String,
    price: String,
    location: String,
    full_address: String,
    property_type: Option<PropertyType>,
    bedrooms: String,
    bathrooms: String,
    area_sqm: String,
    contact_phone: String,
    contact_whatsapp_phone: String,
    #[serde(flatten)]
    amenities: Amenities,
    nearby_services: NearbyServices,
    images: ImageList,
    #[serde(skip)]
    dirty: bool,
}

impl PropertyDraft {
    /// Draft pre-populated from a stored listing, or empty when there is none.
    pub fn from_record(record: Option<&PropertyRecord>) -> Self {
        let mut draft = Self::default();
        draft.load_from_existing(record);
        draft
    }

    /// Replace every field with the stored listing's values. `None` resets to an empty draft.
    pub fn load_from_existing(&mut self, record: Option<&PropertyRecord>) {
        let Some(record) = record else {
            *self = Self::default();
            return;
        };
        let listing = &record.listing;

        *self = Self {
            title: listing.title.clone(),
            description: listing.description.clone(),
            price: format_number(listing.price),
            location: listing.location.clone(),
            full_address: listing.full_address.clone().unwrap_or_default(),
            property_type: listing.property_type,
            bedrooms: listing.bedrooms.map(|n| n.to_string()).unwrap_or_default(),
            bathrooms: listing.bathrooms.map(|n| n.to_string()).unwrap_or_default(),
            area_sqm: listing.area_sqm.map(format_number).unwrap_or_default(),
            contact_phone: listing.contact_phone.clone(),
            contact_whatsapp_phone: listing.contact_whatsapp_phone.clone().unwrap_or_default(),
            amenities: listing.amenities,
            nearby_services: NearbyServices::from(listing.nearby_services.clone()),
            images: ImageList::from(listing.images.clone()),
            dirty: false,
        };
    }

    /// Apply a single edit. No cross-field checks happen here.
    pub fn set_field(&mut self, update: FieldUpdate) {
        match update {
            FieldUpdate::Title(value) => self.title = value,
            FieldUpdate::Description(value) => self.description = value,
            FieldUpdate::Price(value) => self.price = value,
            FieldUpdate::Location(value) => self.location = value,
            FieldUpdate::FullAddress(value) => self.full_address = value,
            FieldUpdate::PropertyType(value) => self.property_type = value,
            FieldUpdate::Bedrooms(value) => self.bedrooms = value,
            FieldUpdate::Bathrooms(value) => self.bathrooms = value,
            FieldUpdate::AreaSqm(value) => self.area_sqm = value,
            FieldUpdate::ContactPhone(value) => self.contact_phone = value,
            FieldUpdate::ContactWhatsappPhone(value) => self.contact_whatsapp_phone = value,
            FieldUpdate::Amenity { amenity, enabled } => self.amenities.set(amenity, enabled),
        }
        self.dirty = true;
    }

    /// Raw text of a field as the user typed it.
    pub fn text(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.title,
            DraftField::Description => &self.description,
            DraftField::Price => &self.price,
            DraftField::Location => &self.location,
            DraftField::FullAddress => &self.full_address,
            DraftField::PropertyType => self.property_type.map_or("", PropertyType::as_str),
            DraftField::Bedrooms => &self.bedrooms,
            DraftField::Bathrooms => &self.bathrooms,
            DraftField::AreaSqm => &self.area_sqm,
            DraftField::ContactPhone => &self.contact_phone,
            DraftField::ContactWhatsappPhone => &self.contact_whatsapp_phone,
        }
    }

    pub fn property_type(&self) -> Option<PropertyType> {
        self.property_type
    }

    pub fn amenities(&self) -> &Amenities {
        &self.amenities
    }

    pub fn nearby_services(&self) -> &NearbyServices {
        &self.nearby_services
    }

    pub fn images(&self) -> &ImageList {
        &self.images
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) fn nearby_services_mut(&mut self) -> &mut NearbyServices {
        self.dirty = true;
        &mut self.nearby_services
    }

    pub(crate) fn images_mut(&mut self) -> &mut ImageList {
        self.dirty = true;
        &mut self.images
    }
}

// `f64`'s Display is the shortest string that parses back to the same value.
fn format_number(value: f64) -> String {
    value.to_string()
}
