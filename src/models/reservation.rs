use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Create-reservation call body. Built only from a complete selection whose
/// availability check came back positive; submitted exactly once.
#[derive(Debug, Clone, Serialize)]
pub struct ReservationRequest {
    pub room_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_name: String,
    pub email: String,
    pub guest_count: u32,
}

/// Reference to the reservation the backend persisted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReservationConfirmation {
    pub reservation_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoomSummary {
    pub name: String,
}

/// One row of the guest's reservation listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub room: RoomSummary,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}
