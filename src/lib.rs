//! Reservation availability and pricing engine for hotel-booking backends.
//!
//! The crate is the client-side core shared by booking surfaces: it turns
//! calendar clicks into validated date ranges, checks availability over the
//! backend's REST API, prices the stay, and submits the reservation, while a
//! per-room blocked-date cache keeps the calendar in sync. Overlapping
//! availability queries are resolved with per-room request tokens so a stale
//! response can never overwrite a newer one.

pub mod api;
pub mod engine;
pub mod errors;
pub mod models;
pub mod services;

pub use api::{BookingApi, HttpBookingApi};
pub use engine::BookingEngine;
pub use errors::{EngineError, SelectionViolation};
pub use models::availability::{AvailabilityResponse, AvailabilityResult};
pub use models::date_range::DateRange;
pub use models::reservation::{Reservation, ReservationConfirmation, ReservationRequest};
pub use models::room::{RoomDetails, StayConstraint};
pub use models::selection::RangeSelection;
pub use services::blocked_dates::BlockedDateCache;
pub use services::pricing_service::{DiscountPolicy, DiscountTier, PriceQuote, PricingService};
