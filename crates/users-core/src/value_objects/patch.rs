//! Patch - tagged optional used for partial updates
//!
//! A field is either `Absent` (leave the stored value alone) or `Set` with a
//! new value. For a nullable column, `Patch<Option<T>>::Set(None)` means "clear".

/// A single field of a partial update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// Field not provided; keep the current value
    Absent,
    /// Overwrite the current value
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> Patch<T> {
    /// Check if the field was left out
    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl<T: Clone> Patch<T> {
    /// Write the new value into `target` if set. Returns whether anything was written.
    pub fn apply_to(&self, target: &mut T) -> bool {
        match self {
            Self::Set(value) => {
                *target = value.clone();
                true
            }
            Self::Absent => false,
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Set(value),
            None => Self::Absent,
        }
    }
}
