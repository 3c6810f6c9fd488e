use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use log::debug;

use crate::api::BookingApi;
use crate::errors::{EngineError, SelectionViolation};
use crate::models::availability::AvailabilityResult;
use crate::models::date_range::DateRange;
use crate::services::blocked_dates::BlockedDateCache;

/// Availability Resolver: answers "is this range free and what does it cost"
/// with one outbound query per call.
///
/// Safe to call repeatedly while the user changes selection. Each call takes
/// a per-room token from an increasing sequence; a response whose token is no
/// longer the latest issued for that room is discarded (`Superseded`) without
/// touching the cache, so overlapping queries can resolve in any order.
pub struct AvailabilityService<B> {
    api: Arc<B>,
    cache: Arc<BlockedDateCache>,
    latest: Mutex<HashMap<String, u64>>,
}

impl<B: BookingApi> AvailabilityService<B> {
    pub fn new(api: Arc<B>, cache: Arc<BlockedDateCache>) -> Self {
        Self {
            api,
            cache,
            latest: Mutex::new(HashMap::new()),
        }
    }

    fn lock_tokens(&self) -> MutexGuard<'_, HashMap<String, u64>> {
        self.latest.lock().expect("availability token lock poisoned")
    }

    fn issue_token(&self, room_id: &str) -> u64 {
        let mut latest = self.lock_tokens();
        let token = latest.entry(room_id.to_owned()).or_insert(0);
        *token += 1;
        *token
    }

    fn is_latest(&self, room_id: &str, token: u64) -> bool {
        self.lock_tokens().get(room_id).copied() == Some(token)
    }

    pub async fn check_availability(
        &self,
        room_id: &str,
        range: &DateRange,
    ) -> Result<AvailabilityResult, EngineError> {
        let (from, to) = range.bounds().ok_or(SelectionViolation::Incomplete)?;
        if from >= to {
            return Err(SelectionViolation::Inverted.into());
        }

        let token = self.issue_token(room_id);
        debug!("availability query #{token} for room {room_id}: {from} to {to}");

        let outcome = self.api.check_availability(room_id, from, to).await;

        // Staleness first: even an error from an outdated query must not
        // reach the caller as current state.
        if !self.is_latest(room_id, token) {
            debug!("discarding superseded availability response #{token} for room {room_id}");
            return Err(EngineError::Superseded);
        }

        let response = outcome?;
        // The response carries the room's whole blocked calendar; refresh even
        // when the queried range itself is taken.
        self.cache.refresh(room_id, &response.blocked_dates);
        Ok(AvailabilityResult::from_response(response))
    }
}
