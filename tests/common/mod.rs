use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tokio::sync::Notify;

use lodgekit::api::BookingApi;
use lodgekit::{
    AvailabilityResponse, EngineError, Reservation, ReservationConfirmation, ReservationRequest,
    RoomDetails,
};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

pub fn room(id: &str, min_nights: u32) -> RoomDetails {
    RoomDetails {
        id: id.to_string(),
        name: format!("Room {id}"),
        price_per_night: 100.0,
        cleaning_fee: 20.0,
        min_nights,
        max_nights: 30,
        max_guests: Some(4),
    }
}

pub fn guest_request(room_id: &str, check_in: &str, check_out: &str) -> ReservationRequest {
    ReservationRequest {
        room_id: room_id.to_string(),
        check_in: date(check_in),
        check_out: date(check_out),
        guest_name: "Ada Guest".to_string(),
        email: "ada@example.com".to_string(),
        guest_count: 2,
    }
}

pub fn available_response(nights: u32, total_price: f64) -> AvailabilityResponse {
    AvailabilityResponse {
        is_available: true,
        base_price: 100.0,
        cleaning_fee: 20.0,
        nights,
        total_price,
        blocked_dates: Vec::new(),
        room_details: None,
    }
}

pub fn unavailable_response(blocked: &[&str]) -> AvailabilityResponse {
    AvailabilityResponse {
        is_available: false,
        base_price: 100.0,
        cleaning_fee: 20.0,
        nights: 0,
        total_price: 0.0,
        blocked_dates: blocked.iter().map(|d| date(d)).collect(),
        room_details: None,
    }
}

enum Scripted<T> {
    Ready(Result<T, EngineError>),
    /// Held back until the gate is notified, to order overlapping calls.
    Gated(Arc<Notify>, Result<T, EngineError>),
}

#[derive(Default)]
struct MockInner {
    rooms: Mutex<HashMap<String, RoomDetails>>,
    availability: Mutex<VecDeque<Scripted<AvailabilityResponse>>>,
    reservations: Mutex<VecDeque<Scripted<ReservationConfirmation>>>,
    listing: Mutex<Vec<Reservation>>,
    availability_calls: AtomicUsize,
    reservation_calls: AtomicUsize,
    submitted: Mutex<Vec<ReservationRequest>>,
}

/// Scripted in-memory backend. Clones share state, so tests can keep a
/// handle after moving one into the engine.
#[derive(Clone, Default)]
pub struct MockBackend {
    inner: Arc<MockInner>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_room(&self, details: RoomDetails) {
        self.inner
            .rooms
            .lock()
            .unwrap()
            .insert(details.id.clone(), details);
    }

    pub fn queue_availability(&self, response: AvailabilityResponse) {
        self.inner
            .availability
            .lock()
            .unwrap()
            .push_back(Scripted::Ready(Ok(response)));
    }

    pub fn queue_availability_error(&self, err: EngineError) {
        self.inner
            .availability
            .lock()
            .unwrap()
            .push_back(Scripted::Ready(Err(err)));
    }

    pub fn queue_gated_availability(&self, gate: Arc<Notify>, response: AvailabilityResponse) {
        self.inner
            .availability
            .lock()
            .unwrap()
            .push_back(Scripted::Gated(gate, Ok(response)));
    }

    pub fn queue_reservation(&self, reservation_id: &str) {
        self.inner
            .reservations
            .lock()
            .unwrap()
            .push_back(Scripted::Ready(Ok(ReservationConfirmation {
                reservation_id: reservation_id.to_string(),
            })));
    }

    pub fn queue_reservation_error(&self, err: EngineError) {
        self.inner
            .reservations
            .lock()
            .unwrap()
            .push_back(Scripted::Ready(Err(err)));
    }

    pub fn set_listing(&self, rows: Vec<Reservation>) {
        *self.inner.listing.lock().unwrap() = rows;
    }

    pub fn availability_calls(&self) -> usize {
        self.inner.availability_calls.load(Ordering::SeqCst)
    }

    pub fn reservation_calls(&self) -> usize {
        self.inner.reservation_calls.load(Ordering::SeqCst)
    }

    pub fn submitted(&self) -> Vec<ReservationRequest> {
        self.inner.submitted.lock().unwrap().clone()
    }
}

impl BookingApi for MockBackend {
    async fn check_availability(
        &self,
        room_id: &str,
        _check_in: NaiveDate,
        _check_out: NaiveDate,
    ) -> Result<AvailabilityResponse, EngineError> {
        self.inner.availability_calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self
            .inner
            .availability
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected availability call for room {room_id}"));
        match scripted {
            Scripted::Ready(result) => result,
            Scripted::Gated(gate, result) => {
                gate.notified().await;
                result
            }
        }
    }

    async fn create_reservation(
        &self,
        request: &ReservationRequest,
    ) -> Result<ReservationConfirmation, EngineError> {
        self.inner.reservation_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.submitted.lock().unwrap().push(request.clone());
        let scripted = self
            .inner
            .reservations
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected reservation call for room {}", request.room_id));
        match scripted {
            Scripted::Ready(result) => result,
            Scripted::Gated(gate, result) => {
                gate.notified().await;
                result
            }
        }
    }

    async fn list_reservations(&self) -> Result<Vec<Reservation>, EngineError> {
        Ok(self.inner.listing.lock().unwrap().clone())
    }

    async fn room_details(&self, room_id: &str) -> Result<RoomDetails, EngineError> {
        self.inner
            .rooms
            .lock()
            .unwrap()
            .get(room_id)
            .cloned()
            .ok_or_else(|| EngineError::Validation {
                message: format!("room {room_id} not found"),
            })
    }
}
