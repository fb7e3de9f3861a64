use serde::{Deserialize, Deserializer};

use super::domain::{NearbyService, PropertyRecord, PropertyType};

/// Browse-page filters. Every populated filter must match.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ListingQuery {
    pub location: Option<String>,
    pub property_type: Option<PropertyType>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_bedrooms: Option<u32>,
    /// Comma separated on the wire, e.g. `services=school,bank`.
    #[serde(deserialize_with = "comma_separated_services")]
    pub services: Vec<NearbyService>,
}

fn comma_separated_services<'de, D>(deserializer: D) -> Result<Vec<NearbyService>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| name.parse::<NearbyService>().map_err(serde::de::Error::custom))
        .collect()
}

impl ListingQuery {
    pub fn matches(&self, record: &PropertyRecord) -> bool {
        let listing = &record.listing;

        if let Some(needle) = self.location.as_deref().map(str::trim) {
            let needle = needle.to_lowercase();
            let in_location = listing.location.to_lowercase().contains(&needle);
            let in_address = listing
                .full_address
                .as_deref()
                .is_some_and(|address| address.to_lowercase().contains(&needle));
            if !in_location && !in_address {
                return false;
            }
        }

        if self
            .property_type
            .is_some_and(|kind| listing.property_type != Some(kind))
        {
            return false;
        }
        if self.min_price.is_some_and(|min| listing.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| listing.price > max) {
            return false;
        }
        if let Some(min) = self.min_bedrooms {
            if listing.bedrooms.unwrap_or(0) < min {
                return false;
            }
        }

        self.services
            .iter()
            .all(|service| listing.nearby_services.contains(service))
    }

    /// Matching listings, newest first.
    pub fn apply(&self, records: Vec<PropertyRecord>) -> Vec<PropertyRecord> {
        let mut matches: Vec<PropertyRecord> =
            records.into_iter().filter(|record| self.matches(record)).collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matches
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::listings::domain::{Amenities, ListingPayload, OwnerId, PropertyId};

    fn record(
        id: &str,
        location: &str,
        kind: PropertyType,
        price: f64,
        bedrooms: Option<u32>,
        age_days: i64,
    ) -> PropertyRecord {
        let created = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap() - Duration::days(age_days);
        PropertyRecord {
            id: PropertyId(id.to_string()),
            owner_id: OwnerId("landlord-1".to_string()),
            listing: ListingPayload {
                title: format!("Listing {id}"),
                description: "Maelezo".to_string(),
                price,
                location: location.to_string(),
                full_address: None,
                property_type: Some(kind),
                bedrooms,
                bathrooms: None,
                area_sqm: None,
                contact_phone: "+255712345678".to_string(),
                contact_whatsapp_phone: None,
                amenities: Amenities::default(),
                nearby_services: BTreeSet::from([NearbyService::School]),
                images: Vec::new(),
            },
            created_at: created,
            updated_at: created,
        }
    }

    fn inventory() -> Vec<PropertyRecord> {
        vec![
            record("a", "Mikocheni, Dar es Salaam", PropertyType::House, 850_000.0, Some(3), 5),
            record("b", "Sinza, Dar es Salaam", PropertyType::Room, 150_000.0, Some(1), 1),
            record("c", "Njiro, Arusha", PropertyType::Apartment, 400_000.0, None, 3),
        ]
    }

    fn ids(records: &[PropertyRecord]) -> Vec<&str> {
        records.iter().map(|record| record.id.0.as_str()).collect()
    }

    #[test]
    fn empty_query_returns_everything_newest_first() {
        let results = ListingQuery::default().apply(inventory());
        assert_eq!(ids(&results), vec!["b", "c", "a"]);
    }

    #[test]
    fn location_filter_is_case_insensitive_substring() {
        let query = ListingQuery {
            location: Some("dar es salaam".to_string()),
            ..ListingQuery::default()
        };
        assert_eq!(ids(&query.apply(inventory())), vec!["b", "a"]);
    }

    #[test]
    fn price_type_and_bedroom_filters_combine() {
        let query = ListingQuery {
            max_price: Some(500_000.0),
            min_bedrooms: Some(1),
            ..ListingQuery::default()
        };
        assert_eq!(ids(&query.apply(inventory())), vec!["b"]);

        let query = ListingQuery {
            property_type: Some(PropertyType::Apartment),
            min_price: Some(100_000.0),
            ..ListingQuery::default()
        };
        assert_eq!(ids(&query.apply(inventory())), vec!["c"]);
    }

    #[test]
    fn service_filter_requires_every_service() {
        let query = ListingQuery {
            services: vec![NearbyService::School, NearbyService::Bank],
            ..ListingQuery::default()
        };
        assert!(query.apply(inventory()).is_empty());
    }
}
