use std::fmt;

use chrono::{NaiveDate, NaiveTime};

use crate::error::BookingError;

pub type SpaceId = u32;
pub type ReservationId = u32;

/// Monotonic id source. Each component owns its own allocator; ids start
/// at 1 and are never reused, even after the record they named is gone.
#[derive(Debug)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Panics once the id space is exhausted rather than wrapping into
    /// reuse.
    pub fn allocate(&mut self) -> u32 {
        let id = self.next;
        self.next = self.next.checked_add(1).expect("id space exhausted");
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// A single-day, half-open time window `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Slot {
    /// Build a slot, rejecting inverted and zero-length windows.
    pub fn new(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Result<Self, BookingError> {
        if start >= end {
            return Err(BookingError::InvalidArgument("end must be after start"));
        }
        Ok(Self { date, start, end })
    }

    /// Overlap test against a raw window: same date, and each side starts
    /// strictly before the other ends. Windows that merely touch at a
    /// boundary do not overlap.
    pub fn overlaps(&self, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> bool {
        self.date == date && self.start < end && start < self.end
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.date,
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        )
    }
}

/// A reservable space. `available` is the administrative flag — it says
/// nothing about bookings, only whether the space may take new ones.
#[derive(Debug, Clone, PartialEq)]
pub struct Space {
    pub id: SpaceId,
    pub category: String,
    pub hourly_rate: f64,
    pub available: bool,
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Category: {}, Rate/Hour: ${:.2}, Status: {}",
            self.id,
            self.category,
            self.hourly_rate,
            if self.available { "Available" } else { "Unavailable" }
        )
    }
}

/// A committed booking of one space for one customer over one slot.
/// Holds the space id only — space attributes are looked up through the
/// catalog at read time, so catalog edits show through.
#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub id: ReservationId,
    pub space_id: SpaceId,
    pub customer: String,
    pub slot: Slot,
}

impl fmt::Display for Reservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Reservation ID: {}, Customer: {}, Space ID: {}, Date: {}, Time: {} - {}",
            self.id,
            self.customer,
            self.space_id,
            self.slot.date,
            self.slot.start.format("%H:%M"),
            self.slot.end.format("%H:%M")
        )
    }
}
