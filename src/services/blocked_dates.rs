use std::collections::{BTreeSet, HashMap};
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use log::debug;

use crate::models::date_range::nights_in;

#[derive(Debug, Default)]
struct RoomCalendar {
    blocked: BTreeSet<NaiveDate>,
    /// Optimistic ranges added after successful submissions that the backend
    /// has not yet confirmed. Re-applied over every wholesale refresh so a
    /// late-resolving refresh cannot silently drop them.
    pending: Vec<(NaiveDate, NaiveDate)>,
}

/// Per-room set of nights already committed to confirmed bookings. Reads are
/// synchronous; the calendar selector consults it on every click. The backend
/// is the authoritative source: every successful availability response
/// replaces a room's set wholesale.
#[derive(Debug, Default)]
pub struct BlockedDateCache {
    rooms: Mutex<HashMap<String, RoomCalendar>>,
}

impl BlockedDateCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, RoomCalendar>> {
        self.rooms.lock().expect("blocked-date cache lock poisoned")
    }

    /// Replace the room's blocked set with the backend's calendar, then
    /// re-apply pending optimistic ranges. A pending range the server now
    /// reports itself is retired.
    pub fn refresh(&self, room_id: &str, dates: &[NaiveDate]) {
        let mut rooms = self.lock();
        let calendar = rooms.entry(room_id.to_owned()).or_default();
        calendar.blocked = dates.iter().copied().collect();

        let RoomCalendar { blocked, pending } = calendar;
        pending.retain(|&(from, to)| {
            let confirmed = nights_in(from, to).all(|night| blocked.contains(&night));
            if !confirmed {
                for night in nights_in(from, to) {
                    blocked.insert(night);
                }
            }
            !confirmed
        });
        debug!(
            "refreshed blocked dates for room {room_id}: {} nights, {} pending ranges",
            blocked.len(),
            pending.len()
        );
    }

    /// Optimistically block `[from, to)` after a successful submission.
    /// Idempotent: adding the same range twice changes nothing.
    pub fn add_range(&self, room_id: &str, from: NaiveDate, to: NaiveDate) {
        if from >= to {
            return;
        }
        let mut rooms = self.lock();
        let calendar = rooms.entry(room_id.to_owned()).or_default();
        for night in nights_in(from, to) {
            calendar.blocked.insert(night);
        }
        if !calendar.pending.contains(&(from, to)) {
            calendar.pending.push((from, to));
        }
    }

    pub fn get(&self, room_id: &str) -> BTreeSet<NaiveDate> {
        self.lock()
            .get(room_id)
            .map(|calendar| calendar.blocked.clone())
            .unwrap_or_default()
    }
}
