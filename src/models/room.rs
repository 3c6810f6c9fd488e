use serde::{Deserialize, Serialize};

/// Stay-length bounds for one room. Supplied by the backend's room metadata;
/// read-only to this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayConstraint {
    pub min_nights: u32,
    pub max_nights: u32,
}

impl Default for StayConstraint {
    fn default() -> Self {
        Self {
            min_nights: 1,
            max_nights: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDetails {
    pub id: String,
    pub name: String,
    pub price_per_night: f64,
    #[serde(default)]
    pub cleaning_fee: f64,
    #[serde(default = "default_min_nights")]
    pub min_nights: u32,
    #[serde(default = "default_max_nights")]
    pub max_nights: u32,
    #[serde(default)]
    pub max_guests: Option<u32>,
}

fn default_min_nights() -> u32 {
    1
}

fn default_max_nights() -> u32 {
    30
}

impl RoomDetails {
    pub fn constraint(&self) -> StayConstraint {
        StayConstraint {
            min_nights: self.min_nights,
            max_nights: self.max_nights,
        }
    }
}
