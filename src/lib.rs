//! Floor Placement - collision-free layout engine for venue floor plans
//!
//! This library owns the layout of bookable objects (tables, sunbeds,
//! workspaces, boats, rooms and custom kinds) on the floors of a venue. Every
//! mutation is checked against a strict non-overlap rule, and screen-space
//! pointer input is translated into plan percentages through a zoomable,
//! pannable viewport.
//!
//! # Example
//!
//! ```rust
//! use floor_placement::{Floor, ObjectKind, PlacementEngine, Point};
//!
//! let engine = PlacementEngine::default();
//! let mut floor = Floor::new("floor-1", "Ground");
//!
//! let table = engine
//!     .add_object(&mut floor, ObjectKind::Table, Point::new(50.0, 50.0))
//!     .unwrap();
//! assert_eq!(table.id, "table-1");
//! assert_eq!(table.name, "Table 1");
//!
//! // A second table on top of the first one is rejected
//! let err = engine
//!     .add_object(&mut floor, ObjectKind::Table, Point::new(52.0, 50.0))
//!     .unwrap_err();
//! assert!(err.is_collision());
//! assert_eq!(floor.objects.len(), 1);
//! ```

pub mod editor;
pub mod layout;
pub mod model;
pub mod repository;
pub mod suggest;

pub use editor::Editor;
pub use layout::{
    plan_to_screen, screen_to_plan, ConfigError, ContainerBounds, Delta, Footprint, Gesture,
    GestureFrame, GestureOutcome, GestureSession, Handle, LintWarning, ObjectPatch,
    PlacementConfig, PlacementEngine, PlacementError, Point, Viewport, ZoomControl,
};
pub use model::{BookableObject, Floor, Location, ObjectKind, ObjectStatus};
pub use repository::{JsonFileRepository, LayoutRepository, MemoryRepository, RepositoryError};
pub use suggest::{PlacementOracle, SuggestError, Suggestion, SuggestionRequest};

/// Check a loaded location for layout defects
///
/// # Example
///
/// ```rust
/// use floor_placement::{audit, Location, PlacementConfig};
///
/// let json = r#"{
///     "id": "beach",
///     "name": "Beach Club",
///     "floors": [{
///         "id": "floor-1",
///         "name": "Sand",
///         "floorPlanUrl": "",
///         "objects": [
///             {"id": "a", "name": "Sunbed 1", "type": "sunbed", "description": "",
///              "price": 20, "position": {"x": 10, "y": 10}, "width": 4, "height": 8,
///              "status": "Free"},
///             {"id": "b", "name": "Sunbed 2", "type": "sunbed", "description": "",
///              "price": 20, "position": {"x": 12, "y": 12}, "width": 4, "height": 8,
///              "status": "Free"}
///         ]
///     }]
/// }"#;
/// let location: Location = serde_json::from_str(json).unwrap();
///
/// let warnings = audit(&location, &PlacementConfig::default());
/// assert_eq!(warnings.len(), 1);
/// assert!(warnings[0].to_string().starts_with("[overlap] floor-1"));
/// ```
pub fn audit(location: &Location, config: &PlacementConfig) -> Vec<LintWarning> {
    layout::lint::check(location, config)
}
