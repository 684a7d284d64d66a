//! Placement engine for bookable objects on floor plans
//!
//! All geometry is expressed in percentages of the floor-plan image
//! (0..100 on both axes, centre-based footprints). The engine keeps every
//! floor free of overlapping objects: any mutation that would produce an
//! overlap is rejected and leaves the floor untouched.

pub mod config;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod lint;
pub mod types;
pub mod viewport;

pub use config::{ConfigError, Dimensions, PlacementConfig, ViewportConfig};
pub use engine::{find_collision, ObjectPatch, PlacementEngine};
pub use error::PlacementError;
pub use gesture::{Gesture, GestureFrame, GestureOutcome, GestureSession};
pub use lint::{LintCategory, LintWarning};
pub use types::*;
pub use viewport::{plan_to_screen, screen_to_plan, ContainerBounds, Viewport, ZoomControl};
