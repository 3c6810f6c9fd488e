use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::room::RoomDetails;

/// Body of the availability check call.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AvailabilityQuery {
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
}

/// Backend response for one availability check. The backend omits pricing
/// fields for some rooms, so everything beyond the verdict defaults to
/// zero/empty rather than failing deserialization.
///
/// `blocked_dates` is the room's full blocked calendar, not just the queried
/// window.
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityResponse {
    pub is_available: bool,
    #[serde(default)]
    pub base_price: f64,
    #[serde(default)]
    pub cleaning_fee: f64,
    #[serde(default)]
    pub nights: u32,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub blocked_dates: Vec<NaiveDate>,
    #[serde(default)]
    pub room_details: Option<RoomDetails>,
}

/// Outcome of exactly one `(room, range)` availability query. Immutable once
/// produced; the next query for the same room supersedes it.
#[derive(Debug, Clone, PartialEq)]
pub struct AvailabilityResult {
    pub available: bool,
    pub blocked_dates: Vec<NaiveDate>,
    pub price_per_night: f64,
    pub cleaning_fee: f64,
    pub nights: u32,
    pub total_price: f64,
    pub error: Option<String>,
}

impl AvailabilityResult {
    pub fn from_response(response: AvailabilityResponse) -> Self {
        Self {
            available: response.is_available,
            blocked_dates: response.blocked_dates,
            price_per_night: response.base_price,
            cleaning_fee: response.cleaning_fee,
            nights: response.nights,
            total_price: response.total_price,
            error: None,
        }
    }

    /// Failure surfaced as a result: not available, error populated, no
    /// pricing and no blocked dates (the cache is left untouched).
    pub fn unavailable(error: impl Into<String>) -> Self {
        Self {
            available: false,
            blocked_dates: Vec::new(),
            price_per_night: 0.0,
            cleaning_fee: 0.0,
            nights: 0,
            total_price: 0.0,
            error: Some(error.into()),
        }
    }
}
