use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::NearbyService;

/// Set of nearby services attached to a draft. Membership only changes through toggles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NearbyServices(BTreeSet<NearbyService>);

impl NearbyServices {
    /// Toggle a service by its wire name. Names outside the vocabulary are ignored;
    /// returns whether the set changed.
    pub fn toggle(&mut self, service: &str) -> bool {
        match service.parse::<NearbyService>() {
            Ok(service) => {
                self.toggle_service(service);
                true
            }
            Err(_) => false,
        }
    }

    /// Remove the service when present, add it otherwise. Returns membership after the toggle.
    pub fn toggle_service(&mut self, service: NearbyService) -> bool {
        if self.0.remove(&service) {
            false
        } else {
            self.0.insert(service);
            true
        }
    }

    pub fn contains(&self, service: NearbyService) -> bool {
        self.0.contains(&service)
    }

    pub fn iter(&self) -> impl Iterator<Item = NearbyService> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_set(&self) -> &BTreeSet<NearbyService> {
        &self.0
    }
}

impl From<BTreeSet<NearbyService>> for NearbyServices {
    fn from(value: BTreeSet<NearbyService>) -> Self {
        Self(value)
    }
}
