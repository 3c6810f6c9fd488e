use chrono::NaiveDate;

use crate::errors::EngineError;
use crate::models::availability::AvailabilityResponse;
use crate::models::reservation::{Reservation, ReservationConfirmation, ReservationRequest};
use crate::models::room::RoomDetails;

pub mod client;

pub use client::HttpBookingApi;

/// Outbound boundary to the hotel backend. The engine is generic over this
/// trait; tests script it with an in-memory implementation.
pub trait BookingApi {
    async fn check_availability(
        &self,
        room_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<AvailabilityResponse, EngineError>;

    async fn create_reservation(
        &self,
        request: &ReservationRequest,
    ) -> Result<ReservationConfirmation, EngineError>;

    async fn list_reservations(&self) -> Result<Vec<Reservation>, EngineError>;

    async fn room_details(&self, room_id: &str) -> Result<RoomDetails, EngineError>;
}
