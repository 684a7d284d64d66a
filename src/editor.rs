//! Map editor state for one location.
//!
//! Bundles the location being edited, the active floor, the viewport and a
//! gesture session, and routes screen-space input through the placement
//! engine. Persisting after a committed change is left to the caller.

use crate::layout::config::PlacementConfig;
use crate::layout::engine::{ObjectPatch, PlacementEngine};
use crate::layout::error::PlacementError;
use crate::layout::gesture::{Gesture, GestureFrame, GestureOutcome, GestureSession};
use crate::layout::types::Point;
use crate::layout::viewport::{screen_to_plan, ContainerBounds, Viewport, ZoomControl};
use crate::model::{BookableObject, Floor, Location, ObjectKind};
use crate::suggest::Suggestion;

/// Editing session over a single location
#[derive(Debug, Clone)]
pub struct Editor {
    location: Location,
    active_floor: Option<String>,
    engine: PlacementEngine,
    viewport: Viewport,
    gestures: GestureSession,
}

impl Editor {
    /// Open a location; the first floor becomes active
    pub fn new(location: Location, config: PlacementConfig, container: ContainerBounds) -> Self {
        let active_floor = location.floors.first().map(|f| f.id.clone());
        let viewport = Viewport::new(config.viewport);
        Self {
            location,
            active_floor,
            engine: PlacementEngine::new(config),
            viewport,
            gestures: GestureSession::new(container),
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn into_location(self) -> Location {
        self.location
    }

    pub fn engine(&self) -> &PlacementEngine {
        &self.engine
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn active_floor(&self) -> Option<&Floor> {
        self.active_floor
            .as_deref()
            .and_then(|id| self.location.floor(id))
    }

    pub fn select_floor(&mut self, floor_id: &str) -> Result<(), PlacementError> {
        self.ensure_idle()?;
        if self.location.floor(floor_id).is_none() {
            return Err(PlacementError::floor_not_found(floor_id));
        }
        self.active_floor = Some(floor_id.to_string());
        Ok(())
    }

    pub fn set_container(&mut self, container: ContainerBounds) {
        self.gestures.set_container(container);
    }

    /// Drop a palette item at a screen position
    pub fn drop_object(
        &mut self,
        kind: ObjectKind,
        pointer: Point,
    ) -> Result<BookableObject, PlacementError> {
        self.ensure_idle()?;
        let position = screen_to_plan(pointer, &self.viewport, self.gestures.container())?;
        let floor = active_floor_mut(&mut self.location, &self.active_floor)?;
        self.engine.add_object(floor, kind, position)
    }

    pub fn accept_suggestion(
        &mut self,
        suggestion: &Suggestion,
    ) -> Result<BookableObject, PlacementError> {
        self.ensure_idle()?;
        let floor = active_floor_mut(&mut self.location, &self.active_floor)?;
        self.engine.accept_suggestion(floor, suggestion)
    }

    pub fn update_object(
        &mut self,
        object_id: &str,
        patch: &ObjectPatch,
    ) -> Result<BookableObject, PlacementError> {
        self.ensure_idle()?;
        let floor = active_floor_mut(&mut self.location, &self.active_floor)?;
        self.engine.update_object(floor, object_id, patch)
    }

    pub fn delete_object(&mut self, object_id: &str) -> Result<(), PlacementError> {
        self.ensure_idle()?;
        let floor = active_floor_mut(&mut self.location, &self.active_floor)?;
        self.engine.delete_object(floor, object_id)
    }

    pub fn clear_active_floor(&mut self) -> Result<usize, PlacementError> {
        self.ensure_idle()?;
        let floor = active_floor_mut(&mut self.location, &self.active_floor)?;
        Ok(self.engine.clear_floor(floor))
    }

    /// Add a floor and switch to it
    pub fn add_floor(&mut self, name: &str) -> Result<Floor, PlacementError> {
        self.ensure_idle()?;
        let floor = self.engine.add_floor(&mut self.location, name)?;
        self.active_floor = Some(floor.id.clone());
        Ok(floor)
    }

    /// Delete the active floor; the first remaining floor becomes active
    pub fn delete_active_floor(&mut self) -> Result<Floor, PlacementError> {
        self.ensure_idle()?;
        let floor_id = self
            .active_floor
            .clone()
            .ok_or(PlacementError::NoActiveFloor)?;
        let removed = self.engine.delete_floor(&mut self.location, &floor_id)?;
        self.active_floor = self.location.floors.first().map(|f| f.id.clone());
        Ok(removed)
    }

    pub fn begin_gesture(&mut self, gesture: Gesture) -> Result<(), PlacementError> {
        let floor = self
            .active_floor
            .as_deref()
            .and_then(|id| self.location.floor(id))
            .ok_or(PlacementError::NoActiveFloor)?;
        self.gestures.begin(floor, &self.viewport, gesture)
    }

    pub fn update_gesture(&mut self, pointer: Point) -> Result<GestureFrame, PlacementError> {
        let floor = active_floor_mut(&mut self.location, &self.active_floor)?;
        self.gestures
            .update(&self.engine, floor, &mut self.viewport, pointer)
    }

    pub fn commit_gesture(&mut self) -> Result<GestureOutcome, PlacementError> {
        let floor = active_floor_mut(&mut self.location, &self.active_floor)?;
        self.gestures.commit(&self.engine, floor, &self.viewport)
    }

    pub fn cancel_gesture(&mut self) -> Result<(), PlacementError> {
        let floor = active_floor_mut(&mut self.location, &self.active_floor)?;
        self.gestures
            .cancel(&self.engine, floor, &mut self.viewport)
    }

    /// Mouse-wheel zoom at the pointer
    pub fn wheel(&mut self, pointer: Point, delta_y: f64) {
        self.viewport
            .wheel(pointer, self.gestures.container(), delta_y);
    }

    pub fn zoom_control(&mut self, control: ZoomControl) {
        self.viewport
            .zoom_control(control, self.gestures.container());
    }

    /// Layout edits and floor switches wait until the running gesture ends
    fn ensure_idle(&self) -> Result<(), PlacementError> {
        match self.gestures.active_gesture() {
            Some(active) => Err(PlacementError::GestureInProgress { active }),
            None => Ok(()),
        }
    }
}

fn active_floor_mut<'a>(
    location: &'a mut Location,
    active: &Option<String>,
) -> Result<&'a mut Floor, PlacementError> {
    let id = active.as_deref().ok_or(PlacementError::NoActiveFloor)?;
    location
        .floor_mut(id)
        .ok_or_else(|| PlacementError::floor_not_found(id))
}
