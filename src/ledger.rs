use chrono::{NaiveDate, NaiveTime};

use crate::catalog::SpaceCatalog;
use crate::error::BookingError;
use crate::model::{IdAllocator, Reservation, ReservationId, Slot, Space, SpaceId};

/// Owns the reservation set and enforces the double-booking invariant:
/// for one space, no two live reservations may overlap in time. The
/// catalog is consulted per call and never stored.
pub struct BookingLedger {
    reservations: Vec<Reservation>,
    ids: IdAllocator,
}

impl Default for BookingLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingLedger {
    pub fn new() -> Self {
        Self {
            reservations: Vec::new(),
            ids: IdAllocator::new(),
        }
    }

    /// Spaces bookable for the window: administratively enabled and free
    /// of overlapping reservations, in catalog order. A full scan over
    /// spaces × reservations — no index is kept at this scale.
    pub fn available_spaces<'c>(
        &self,
        catalog: &'c SpaceCatalog,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Vec<&'c Space>, BookingError> {
        let window = Slot::new(date, start, end)?;
        Ok(catalog
            .list()
            .iter()
            .filter(|space| space.available)
            .filter(|space| {
                self.find_conflict(space.id, window.date, window.start, window.end)
                    .is_none()
            })
            .collect())
    }

    /// Commit a booking. Every check runs here, in a fixed order — space
    /// exists, space enabled, window free, window well-formed — and none
    /// is ever trusted from an earlier availability query.
    pub fn book(
        &mut self,
        catalog: &SpaceCatalog,
        customer: &str,
        space_id: SpaceId,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Reservation, BookingError> {
        let space = catalog
            .get(space_id)
            .ok_or(BookingError::NotFound(space_id))?;
        if !space.available {
            return Err(BookingError::Unavailable(space_id));
        }
        if let Some(existing) = self.find_conflict(space_id, date, start, end) {
            return Err(BookingError::Conflict(existing.clone()));
        }
        let slot = Slot::new(date, start, end)?;

        let reservation = Reservation {
            id: self.ids.allocate(),
            space_id,
            customer: customer.to_string(),
            slot,
        };
        self.reservations.push(reservation.clone());
        Ok(reservation)
    }

    /// Remove by id. Returns whether anything was removed; cancelling an
    /// unknown or already-cancelled id is a safe no-op.
    pub fn cancel(&mut self, id: ReservationId) -> bool {
        let before = self.reservations.len();
        self.reservations.retain(|r| r.id != id);
        self.reservations.len() < before
    }

    /// Case-insensitive exact match on the customer name, insertion order.
    pub fn list_by_customer(&self, name: &str) -> Vec<&Reservation> {
        let needle = name.to_lowercase();
        self.reservations
            .iter()
            .filter(|r| r.customer.to_lowercase() == needle)
            .collect()
    }

    /// All reservations in insertion order.
    pub fn list(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn list_by_space(&self, space_id: SpaceId) -> Vec<&Reservation> {
        self.reservations
            .iter()
            .filter(|r| r.space_id == space_id)
            .collect()
    }

    /// Purge every reservation for a space, returning them in insertion
    /// order. Callers preview with `list_by_space` and collect whatever
    /// acknowledgment their policy wants before committing; once this and
    /// the catalog removal have both run, nothing references the space id.
    pub fn cascade_remove(&mut self, space_id: SpaceId) -> Vec<Reservation> {
        let all = std::mem::take(&mut self.reservations);
        let (removed, kept): (Vec<_>, Vec<_>) =
            all.into_iter().partition(|r| r.space_id == space_id);
        self.reservations = kept;
        removed
    }

    fn find_conflict(
        &self,
        space_id: SpaceId,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Option<&Reservation> {
        self.reservations
            .iter()
            .find(|r| r.space_id == space_id && r.slot.overlaps(date, start, end))
    }
}
