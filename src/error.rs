use crate::model::{Reservation, SpaceId};

#[derive(Debug, Clone, PartialEq)]
pub enum BookingError {
    InvalidArgument(&'static str),
    NotFound(u32),
    Unavailable(SpaceId),
    /// Carries the reservation that blocks the requested window, so
    /// callers can show the customer what is in the way.
    Conflict(Reservation),
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            BookingError::NotFound(id) => write!(f, "not found: {id}"),
            BookingError::Unavailable(id) => write!(f, "space {id} is marked unavailable"),
            BookingError::Conflict(res) => {
                write!(f, "conflict with reservation {} at {}", res.id, res.slot)
            }
        }
    }
}

impl std::error::Error for BookingError {}
