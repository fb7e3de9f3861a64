use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned by the persistence backend.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(pub String);

/// Authenticated landlord owning a listing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(pub String);

/// Opaque reference returned by the image storage collaborator (usually a public URL).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl From<&str> for ImageRef {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ImageRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Apartment,
    House,
    Room,
    Studio,
}

impl PropertyType {
    pub const ALL: [PropertyType; 4] = [
        PropertyType::Apartment,
        PropertyType::House,
        PropertyType::Room,
        PropertyType::Studio,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::House => "house",
            PropertyType::Room => "room",
            PropertyType::Studio => "studio",
        }
    }

    /// Swahili label shown on the listing form and detail page.
    pub const fn label(self) -> &'static str {
        match self {
            PropertyType::Apartment => "Ghorofa",
            PropertyType::House => "Nyumba",
            PropertyType::Room => "Chumba",
            PropertyType::Studio => "Studio",
        }
    }
}

impl FromStr for PropertyType {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| UnknownVariant(value.to_string()))
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed vocabulary of services a listing can advertise as nearby.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NearbyService {
    School,
    Hospital,
    Market,
    Bank,
    Transport,
}

impl NearbyService {
    pub const ALL: [NearbyService; 5] = [
        NearbyService::School,
        NearbyService::Hospital,
        NearbyService::Market,
        NearbyService::Bank,
        NearbyService::Transport,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            NearbyService::School => "school",
            NearbyService::Hospital => "hospital",
            NearbyService::Market => "market",
            NearbyService::Bank => "bank",
            NearbyService::Transport => "transport",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            NearbyService::School => "Shule",
            NearbyService::Hospital => "Hospitali",
            NearbyService::Market => "Soko",
            NearbyService::Bank => "Benki",
            NearbyService::Transport => "Usafiri",
        }
    }
}

impl FromStr for NearbyService {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|service| service.as_str() == value)
            .ok_or_else(|| UnknownVariant(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a recognised value")]
pub struct UnknownVariant(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Amenity {
    Electricity,
    Water,
    Furnished,
    Parking,
    Security,
}

impl Amenity {
    pub const ALL: [Amenity; 5] = [
        Amenity::Electricity,
        Amenity::Water,
        Amenity::Furnished,
        Amenity::Parking,
        Amenity::Security,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Amenity::Electricity => "Umeme",
            Amenity::Water => "Maji",
            Amenity::Furnished => "Vifaa vya Nyumbani",
            Amenity::Parking => "Mahali pa Kuegesha Gari",
            Amenity::Security => "Usalama",
        }
    }
}

/// Boolean utility flags carried by every listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Amenities {
    pub electricity: bool,
    pub water: bool,
    pub furnished: bool,
    pub parking: bool,
    pub security: bool,
}

impl Amenities {
    pub fn get(&self, amenity: Amenity) -> bool {
        match amenity {
            Amenity::Electricity => self.electricity,
            Amenity::Water => self.water,
            Amenity::Furnished => self.furnished,
            Amenity::Parking => self.parking,
            Amenity::Security => self.security,
        }
    }

    pub fn set(&mut self, amenity: Amenity, enabled: bool) {
        let slot = match amenity {
            Amenity::Electricity => &mut self.electricity,
            Amenity::Water => &mut self.water,
            Amenity::Furnished => &mut self.furnished,
            Amenity::Parking => &mut self.parking,
            Amenity::Security => &mut self.security,
        };
        *slot = enabled;
    }

    pub fn enabled(&self) -> impl Iterator<Item = Amenity> + '_ {
        Amenity::ALL.into_iter().filter(|amenity| self.get(*amenity))
    }
}

/// Validated listing content as sent to the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingPayload {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub location: String,
    pub full_address: Option<String>,
    pub property_type: Option<PropertyType>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub area_sqm: Option<f64>,
    pub contact_phone: String,
    pub contact_whatsapp_phone: Option<String>,
    #[serde(flatten)]
    pub amenities: Amenities,
    pub nearby_services: BTreeSet<NearbyService>,
    pub images: Vec<ImageRef>,
}

/// Listing as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub id: PropertyId,
    pub owner_id: OwnerId,
    #[serde(flatten)]
    pub listing: ListingPayload,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PropertyRecord {
    pub fn cover_image(&self) -> Option<&ImageRef> {
        self.listing.images.first()
    }
}

/// Explicit identity context handed to a listing form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSession {
    pub owner: OwnerId,
}

impl ListingSession {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: OwnerId(owner.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_type_parses_case_insensitively() {
        assert_eq!("House".parse::<PropertyType>(), Ok(PropertyType::House));
        assert_eq!(" studio ".parse::<PropertyType>(), Ok(PropertyType::Studio));
        assert!("villa".parse::<PropertyType>().is_err());
    }

    #[test]
    fn nearby_service_vocabulary_is_exact() {
        assert_eq!("market".parse::<NearbyService>(), Ok(NearbyService::Market));
        assert!("Market".parse::<NearbyService>().is_err());
        assert!("gym".parse::<NearbyService>().is_err());
    }

    #[test]
    fn amenities_toggle_individually() {
        let mut amenities = Amenities::default();
        amenities.set(Amenity::Water, true);
        amenities.set(Amenity::Security, true);
        amenities.set(Amenity::Security, false);

        assert!(amenities.water);
        assert_eq!(amenities.enabled().collect::<Vec<_>>(), vec![Amenity::Water]);
    }

    #[test]
    fn payload_serializes_amenities_as_top_level_flags() {
        let payload = ListingPayload {
            title: "Nyumba ya Kisasa".to_string(),
            description: "Vyumba viwili".to_string(),
            price: 800_000.0,
            location: "Mikocheni".to_string(),
            full_address: None,
            property_type: Some(PropertyType::House),
            bedrooms: Some(2),
            bathrooms: None,
            area_sqm: None,
            contact_phone: "+255712345678".to_string(),
            contact_whatsapp_phone: None,
            amenities: Amenities {
                electricity: true,
                ..Amenities::default()
            },
            nearby_services: BTreeSet::from([NearbyService::School]),
            images: vec![ImageRef::from("https://cdn.example/a.jpg")],
        };

        let value = serde_json::to_value(&payload).expect("serializes");
        assert_eq!(value["electricity"], true);
        assert_eq!(value["property_type"], "house");
        assert_eq!(value["nearby_services"][0], "school");
    }
}
