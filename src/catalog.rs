use crate::error::BookingError;
use crate::model::{IdAllocator, Space, SpaceId};

fn validate_rate(rate: f64) -> Result<(), BookingError> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(BookingError::InvalidArgument(
            "rate must be a non-negative number",
        ));
    }
    Ok(())
}

/// Owns the space set. Availability here is the administrative flag only;
/// booking conflicts are the ledger's business.
pub struct SpaceCatalog {
    spaces: Vec<Space>,
    ids: IdAllocator,
}

impl Default for SpaceCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl SpaceCatalog {
    pub fn new() -> Self {
        Self {
            spaces: Vec::new(),
            ids: IdAllocator::new(),
        }
    }

    /// Create a space with the next id and the flag defaulted to available.
    pub fn add(
        &mut self,
        category: impl Into<String>,
        hourly_rate: f64,
    ) -> Result<&Space, BookingError> {
        validate_rate(hourly_rate)?;
        let space = Space {
            id: self.ids.allocate(),
            category: category.into(),
            hourly_rate,
            available: true,
        };
        self.spaces.push(space);
        Ok(&self.spaces[self.spaces.len() - 1])
    }

    /// Hard delete. Returns whether a space was actually removed.
    /// Dependent reservations are not this component's concern — callers
    /// run the ledger's cascade first.
    pub fn remove(&mut self, id: SpaceId) -> bool {
        let before = self.spaces.len();
        self.spaces.retain(|s| s.id != id);
        self.spaces.len() < before
    }

    pub fn get(&self, id: SpaceId) -> Option<&Space> {
        self.spaces.iter().find(|s| s.id == id)
    }

    /// All spaces in insertion order.
    pub fn list(&self) -> &[Space] {
        &self.spaces
    }

    pub fn set_category(
        &mut self,
        id: SpaceId,
        category: impl Into<String>,
    ) -> Result<(), BookingError> {
        self.get_mut(id)?.category = category.into();
        Ok(())
    }

    pub fn set_rate(&mut self, id: SpaceId, rate: f64) -> Result<(), BookingError> {
        validate_rate(rate)?;
        self.get_mut(id)?.hourly_rate = rate;
        Ok(())
    }

    pub fn set_available(&mut self, id: SpaceId, available: bool) -> Result<(), BookingError> {
        self.get_mut(id)?.available = available;
        Ok(())
    }

    fn get_mut(&mut self, id: SpaceId) -> Result<&mut Space, BookingError> {
        self.spaces
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(BookingError::NotFound(id))
    }
}
