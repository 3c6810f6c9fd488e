use std::sync::Arc;

use log::{info, warn};

use crate::api::BookingApi;
use crate::errors::EngineError;
use crate::models::availability::AvailabilityResult;
use crate::models::reservation::{ReservationConfirmation, ReservationRequest};
use crate::services::blocked_dates::BlockedDateCache;

/// Reservation Submission Orchestrator: exactly one create-reservation call
/// per user-initiated submit, never retried automatically.
pub struct ReservationService<B> {
    api: Arc<B>,
    cache: Arc<BlockedDateCache>,
}

impl<B: BookingApi> ReservationService<B> {
    pub fn new(api: Arc<B>, cache: Arc<BlockedDateCache>) -> Self {
        Self { api, cache }
    }

    /// Submit a reservation for a range whose availability check succeeded.
    ///
    /// Fails fast without a network call when the availability result is
    /// negative or a guest field is missing. On success the booked range is
    /// blocked locally right away, so a second rapid booking attempt on the
    /// same room is rejected before any refetch.
    pub async fn submit(
        &self,
        request: &ReservationRequest,
        availability: &AvailabilityResult,
    ) -> Result<ReservationConfirmation, EngineError> {
        if !availability.available {
            return Err(EngineError::validation(
                "the selected dates are not available",
            ));
        }
        validate_guest_details(request)?;

        match self.api.create_reservation(request).await {
            Ok(confirmation) => {
                self.cache
                    .add_range(&request.room_id, request.check_in, request.check_out);
                info!(
                    "reservation {} confirmed for room {} ({} to {})",
                    confirmation.reservation_id,
                    request.room_id,
                    request.check_in,
                    request.check_out
                );
                Ok(confirmation)
            }
            Err(err) => {
                if err.is_conflict() {
                    warn!(
                        "room {} was booked out from under us ({} to {})",
                        request.room_id, request.check_in, request.check_out
                    );
                }
                Err(err)
            }
        }
    }
}

fn validate_guest_details(request: &ReservationRequest) -> Result<(), EngineError> {
    if request.guest_name.trim().is_empty() {
        return Err(EngineError::validation("guest name is required"));
    }
    if request.email.trim().is_empty() {
        return Err(EngineError::validation("email address is required"));
    }
    if !is_valid_email(&request.email) {
        return Err(EngineError::validation("invalid email address"));
    }
    if request.guest_count == 0 {
        return Err(EngineError::validation("at least one guest is required"));
    }
    if request.check_in >= request.check_out {
        return Err(EngineError::validation("check-out must be after check-in"));
    }
    Ok(())
}

fn is_valid_email(email: &str) -> bool {
    let re = regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?)*$",
    );
    re.unwrap().is_match(email)
}
