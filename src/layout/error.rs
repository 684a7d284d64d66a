//! Error types for the placement engine

use thiserror::Error;

/// Errors that can occur while editing a layout.
///
/// Every variant is reported before anything is mutated, so a failed call
/// leaves the location exactly as it was.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    /// The candidate footprint overlaps an object already on the floor
    #[error("'{candidate}' would overlap '{existing}'")]
    Collision { candidate: String, existing: String },

    /// Reference to an object id that is not on the floor
    #[error("object '{id}' not found")]
    ObjectNotFound { id: String },

    /// Reference to a floor id that is not in the location
    #[error("floor '{id}' not found")]
    FloorNotFound { id: String },

    /// The location has no floor selected or none at all
    #[error("no active floor")]
    NoActiveFloor,

    /// Deleting the floor would leave fewer floors than the policy allows
    #[error("cannot delete floor '{floor_id}': a location must keep at least {min_floors} floor(s)")]
    LastFloor { floor_id: String, min_floors: usize },

    /// A field was given a value the model cannot hold
    #[error("invalid {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    /// Container bounds with zero or negative size cannot be mapped to the plan
    #[error("container bounds must have a positive width and height")]
    InvalidContainer,

    /// A gesture, an edit or a floor switch was attempted while a gesture
    /// is still active
    #[error("a {active} gesture is already in progress")]
    GestureInProgress { active: &'static str },

    /// update/commit/cancel was called with no gesture active
    #[error("no gesture in progress")]
    NoActiveGesture,
}

impl PlacementError {
    /// Create a collision error
    pub fn collision(candidate: impl Into<String>, existing: impl Into<String>) -> Self {
        Self::Collision {
            candidate: candidate.into(),
            existing: existing.into(),
        }
    }

    /// Create an object-not-found error
    pub fn object_not_found(id: impl Into<String>) -> Self {
        Self::ObjectNotFound { id: id.into() }
    }

    /// Create a floor-not-found error
    pub fn floor_not_found(id: impl Into<String>) -> Self {
        Self::FloorNotFound { id: id.into() }
    }

    /// Create an invalid value error
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn is_collision(&self) -> bool {
        matches!(self, Self::Collision { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ObjectNotFound { .. } | Self::FloorNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_display() {
        let err = PlacementError::collision("Table 2", "Table 1");
        assert_eq!(err.to_string(), "'Table 2' would overlap 'Table 1'");
        assert!(err.is_collision());
    }

    #[test]
    fn test_last_floor_display() {
        let err = PlacementError::LastFloor {
            floor_id: "floor-1".to_string(),
            min_floors: 1,
        };
        assert!(err.to_string().contains("at least 1 floor"));
    }

    #[test]
    fn test_not_found_kinds() {
        assert!(PlacementError::object_not_found("x").is_not_found());
        assert!(PlacementError::floor_not_found("x").is_not_found());
        assert!(!PlacementError::NoActiveGesture.is_not_found());
    }
}
