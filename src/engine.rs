use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{Local, NaiveDate};
use log::warn;

use crate::api::BookingApi;
use crate::errors::EngineError;
use crate::models::availability::AvailabilityResult;
use crate::models::date_range::DateRange;
use crate::models::reservation::{Reservation, ReservationConfirmation, ReservationRequest};
use crate::models::room::RoomDetails;
use crate::models::selection::RangeSelection;
use crate::services::availability_service::AvailabilityService;
use crate::services::blocked_dates::BlockedDateCache;
use crate::services::pricing_service::{DiscountPolicy, PriceQuote, PricingService};
use crate::services::reservation_service::ReservationService;

#[derive(Debug, Default)]
struct Session {
    room: Option<RoomDetails>,
    selection: RangeSelection,
    availability: Option<AvailabilityResult>,
}

/// One booking surface's view of the engine: the current room, the
/// in-progress date selection, and the last availability result shown to the
/// user. All state lives here or in the blocked-date cache; nothing is read
/// from ambient storage.
///
/// Generic over [`BookingApi`] so every outbound call can be scripted in
/// tests.
pub struct BookingEngine<B> {
    api: Arc<B>,
    cache: Arc<BlockedDateCache>,
    availability: AvailabilityService<B>,
    reservations: ReservationService<B>,
    discounts: DiscountPolicy,
    session: Mutex<Session>,
}

impl<B: BookingApi> BookingEngine<B> {
    pub fn new(api: B, discounts: DiscountPolicy) -> Self {
        let api = Arc::new(api);
        let cache = Arc::new(BlockedDateCache::new());
        Self {
            availability: AvailabilityService::new(api.clone(), cache.clone()),
            reservations: ReservationService::new(api.clone(), cache.clone()),
            api,
            cache,
            discounts,
            session: Mutex::new(Session::default()),
        }
    }

    fn lock_session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().expect("session lock poisoned")
    }

    fn no_room() -> EngineError {
        EngineError::validation("no room is open")
    }

    /// Fetch a room's metadata and make it the session's current room.
    /// Any previous selection and availability result belong to the old
    /// context and are dropped.
    pub async fn open_room(&self, room_id: &str) -> Result<RoomDetails, EngineError> {
        let details = self.api.room_details(room_id).await?;
        let mut session = self.lock_session();
        session.room = Some(details.clone());
        session.selection = RangeSelection::Empty;
        session.availability = None;
        Ok(details)
    }

    pub fn current_room(&self) -> Option<RoomDetails> {
        self.lock_session().room.clone()
    }

    pub fn selection(&self) -> RangeSelection {
        self.lock_session().selection
    }

    /// Last availability result that survived staleness and context checks.
    pub fn current_availability(&self) -> Option<AvailabilityResult> {
        self.lock_session().availability.clone()
    }

    /// Apply a calendar click against today's date.
    pub fn select_date(&self, date: NaiveDate) -> Result<RangeSelection, EngineError> {
        self.select_date_as_of(date, Local::now().date_naive())
    }

    /// Apply a calendar click with an explicit "today". The click is checked
    /// against the room's stay constraints and the cached blocked dates.
    pub fn select_date_as_of(
        &self,
        date: NaiveDate,
        today: NaiveDate,
    ) -> Result<RangeSelection, EngineError> {
        let mut session = self.lock_session();
        let (room_id, constraint) = match &session.room {
            Some(room) => (room.id.clone(), room.constraint()),
            None => return Err(Self::no_room()),
        };
        let blocked = self.cache.get(&room_id);
        let state = session.selection.click(date, today, &blocked, &constraint)?;
        Ok(state)
    }

    pub fn reset_selection(&self) {
        let mut session = self.lock_session();
        session.selection.reset();
        session.availability = None;
    }

    /// Check availability for the current selection.
    pub async fn check_availability(&self) -> Result<AvailabilityResult, EngineError> {
        let (room_id, range) = {
            let session = self.lock_session();
            let room = session.room.as_ref().ok_or_else(Self::no_room)?;
            (room.id.clone(), session.selection.as_range())
        };
        self.check_room_availability(&room_id, &range).await
    }

    /// Check availability for an explicit `(room, range)` pair. The result is
    /// recorded as the session's current one only if it is not superseded and
    /// the room is still the open room.
    pub async fn check_room_availability(
        &self,
        room_id: &str,
        range: &DateRange,
    ) -> Result<AvailabilityResult, EngineError> {
        match self.availability.check_availability(room_id, range).await {
            Ok(result) => {
                self.expose_result(room_id, result.clone());
                Ok(result)
            }
            Err(EngineError::Superseded) => Err(EngineError::Superseded),
            Err(err) => {
                // Selection-rule violations stay local to the calendar; only
                // network and backend failures surface as a not-available
                // result.
                if !matches!(err, EngineError::InvalidRange(_)) {
                    self.expose_result(room_id, AvailabilityResult::unavailable(err.to_string()));
                }
                Err(err)
            }
        }
    }

    fn expose_result(&self, room_id: &str, result: AvailabilityResult) {
        let mut session = self.lock_session();
        // The user may have navigated to another room while the query was in
        // flight; a result for a gone context updates nothing.
        if session.room.as_ref().map(|room| room.id.as_str()) == Some(room_id) {
            session.availability = Some(result);
        }
    }

    /// Price a stay under the engine's discount policy.
    pub fn compute_price(&self, price_per_night: f64, cleaning_fee: f64, nights: u32) -> f64 {
        PricingService::compute_total(price_per_night, cleaning_fee, nights, &self.discounts)
    }

    /// Cost breakdown for the current availability result.
    pub fn current_quote(&self) -> Option<PriceQuote> {
        let session = self.lock_session();
        let availability = session.availability.as_ref()?;
        if !availability.available {
            return None;
        }
        Some(PricingService::quote(
            availability.price_per_night,
            availability.cleaning_fee,
            availability.nights,
            &self.discounts,
        ))
    }

    /// Submit a reservation for the current, positively-checked selection.
    ///
    /// Success resets the selection and blocks the booked range locally. A
    /// conflict keeps the selection (the user picks new dates from current
    /// state) and forces a fresh availability query for the same range.
    pub async fn submit_reservation(
        &self,
        request: &ReservationRequest,
    ) -> Result<ReservationConfirmation, EngineError> {
        let availability = {
            let session = self.lock_session();
            if let Some(room) = &session.room {
                if let Some(max_guests) = room.max_guests {
                    if request.guest_count > max_guests {
                        return Err(EngineError::validation(format!(
                            "room {} sleeps at most {max_guests} guests",
                            room.name
                        )));
                    }
                }
            }
            session.availability.clone().ok_or_else(|| {
                EngineError::validation("availability has not been checked for the selected dates")
            })?
        };

        match self.reservations.submit(request, &availability).await {
            Ok(confirmation) => {
                let mut session = self.lock_session();
                session.selection.reset();
                session.availability = None;
                Ok(confirmation)
            }
            Err(err) if err.is_conflict() => {
                let range = DateRange {
                    from: Some(request.check_in),
                    to: Some(request.check_out),
                };
                // Re-check so the user sees the room's real calendar; the
                // conflict outcome stands regardless of what the check says.
                if let Err(recheck) = self.check_room_availability(&request.room_id, &range).await {
                    warn!("availability re-check after conflict failed: {recheck}");
                }
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Blocked calendar for a room as currently cached.
    pub fn get_blocked_dates(&self, room_id: &str) -> BTreeSet<NaiveDate> {
        self.cache.get(room_id)
    }

    /// The guest's existing reservations, straight from the backend.
    pub async fn list_reservations(&self) -> Result<Vec<Reservation>, EngineError> {
        self.api.list_reservations().await
    }
}
