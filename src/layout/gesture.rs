//! Framework-free gesture commands: `begin`, `update`, `commit`, `cancel`.
//!
//! A UI layer forwards raw pointer positions (screen pixels) and the session
//! turns them into engine calls:
//!
//! - **Drag** tracks a preview centre under the pointer and only touches the
//!   floor on commit, where the move can still be rejected.
//! - **Resize** is applied live on every update. A frame that would collide
//!   is skipped and the object keeps the last valid geometry, so the handle
//!   appears to stop at the obstacle.
//! - **Pan** moves the viewport translation with the pointer.
//!
//! Only one gesture can be active at a time.

use tracing::debug;

use crate::model::{BookableObject, Floor};

use super::engine::PlacementEngine;
use super::error::PlacementError;
use super::types::{Delta, Footprint, Handle, Point};
use super::viewport::{screen_to_plan, ContainerBounds, Viewport};

/// A gesture to start, with the pointer position where it starts
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Drag { object_id: String, pointer: Point },
    Resize {
        object_id: String,
        handle: Handle,
        pointer: Point,
    },
    Pan { pointer: Point },
}

#[derive(Debug, Clone, PartialEq)]
enum Active {
    Drag {
        object_id: String,
        preview: Point,
    },
    Resize {
        object_id: String,
        handle: Handle,
        start: Point,
        initial: Footprint,
        current: Footprint,
    },
    Pan {
        start: Point,
        initial: Delta,
    },
}

impl Active {
    fn name(&self) -> &'static str {
        match self {
            Active::Drag { .. } => "drag",
            Active::Resize { .. } => "resize",
            Active::Pan { .. } => "pan",
        }
    }
}

/// What an update did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureFrame {
    /// Drag preview centre in plan percentages
    Dragging { preview: Point },
    /// Current geometry of the resized object; `applied` is false when the
    /// frame collided and the previous geometry was kept
    Resizing { footprint: Footprint, applied: bool },
    Panning { translation: Delta },
}

/// Result of committing a gesture
#[derive(Debug, Clone, PartialEq)]
pub enum GestureOutcome {
    Moved(BookableObject),
    Resized(BookableObject),
    Panned(Delta),
}

/// Drives one gesture at a time against a floor and a viewport
#[derive(Debug, Clone)]
pub struct GestureSession {
    container: ContainerBounds,
    active: Option<Active>,
}

impl GestureSession {
    pub fn new(container: ContainerBounds) -> Self {
        Self {
            container,
            active: None,
        }
    }

    pub fn container(&self) -> &ContainerBounds {
        &self.container
    }

    /// Update the container bounds, e.g. after the window was resized
    pub fn set_container(&mut self, container: ContainerBounds) {
        self.container = container;
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Name of the running gesture, if any
    pub fn active_gesture(&self) -> Option<&'static str> {
        self.active.as_ref().map(Active::name)
    }

    pub fn begin(
        &mut self,
        floor: &Floor,
        viewport: &Viewport,
        gesture: Gesture,
    ) -> Result<(), PlacementError> {
        if let Some(active) = &self.active {
            return Err(PlacementError::GestureInProgress {
                active: active.name(),
            });
        }

        let active = match gesture {
            Gesture::Drag { object_id, pointer } => {
                lookup(floor, &object_id)?;
                let preview = screen_to_plan(pointer, viewport, &self.container)?;
                Active::Drag { object_id, preview }
            }
            Gesture::Resize {
                object_id,
                handle,
                pointer,
            } => {
                let initial = lookup(floor, &object_id)?.footprint();
                let start = screen_to_plan(pointer, viewport, &self.container)?;
                Active::Resize {
                    object_id,
                    handle,
                    start,
                    initial,
                    current: initial,
                }
            }
            Gesture::Pan { pointer } => Active::Pan {
                start: pointer,
                initial: viewport.translation(),
            },
        };

        debug!(gesture = active.name(), "gesture started");
        self.active = Some(active);
        Ok(())
    }

    /// Feed the latest pointer position
    pub fn update(
        &mut self,
        engine: &PlacementEngine,
        floor: &mut Floor,
        viewport: &mut Viewport,
        pointer: Point,
    ) -> Result<GestureFrame, PlacementError> {
        let container = self.container;
        let active = self.active.as_mut().ok_or(PlacementError::NoActiveGesture)?;

        match active {
            Active::Drag { preview, .. } => {
                *preview = screen_to_plan(pointer, viewport, &container)?;
                Ok(GestureFrame::Dragging { preview: *preview })
            }
            Active::Resize {
                object_id,
                handle,
                start,
                initial,
                current,
            } => {
                let now = screen_to_plan(pointer, viewport, &container)?;
                let candidate =
                    initial.resized(*handle, start.delta_to(now), engine.config().min_dimension);
                match engine.place_footprint(floor, object_id.as_str(), candidate) {
                    Ok(_) => {
                        *current = candidate;
                        Ok(GestureFrame::Resizing {
                            footprint: candidate,
                            applied: true,
                        })
                    }
                    Err(PlacementError::Collision { .. }) => Ok(GestureFrame::Resizing {
                        footprint: *current,
                        applied: false,
                    }),
                    Err(e) => Err(e),
                }
            }
            Active::Pan { start, initial } => {
                let moved = start.delta_to(pointer);
                let translation = Delta::new(initial.dx + moved.dx, initial.dy + moved.dy);
                viewport.set_translation(translation);
                Ok(GestureFrame::Panning { translation })
            }
        }
    }

    /// Finish the gesture. The session is idle afterwards even when the
    /// commit is rejected.
    pub fn commit(
        &mut self,
        engine: &PlacementEngine,
        floor: &mut Floor,
        viewport: &Viewport,
    ) -> Result<GestureOutcome, PlacementError> {
        let active = self.active.take().ok_or(PlacementError::NoActiveGesture)?;
        debug!(gesture = active.name(), "gesture committed");

        match active {
            Active::Drag { object_id, preview } => engine
                .move_object(floor, &object_id, preview)
                .map(GestureOutcome::Moved),
            Active::Resize { object_id, .. } => {
                let object = lookup(floor, &object_id)?;
                Ok(GestureOutcome::Resized(object.clone()))
            }
            Active::Pan { .. } => Ok(GestureOutcome::Panned(viewport.translation())),
        }
    }

    /// Abandon the gesture and restore the state from before `begin`.
    ///
    /// A resize goes back to its initial geometry through the collision
    /// check. If that geometry is no longer free, the object keeps its
    /// current footprint.
    pub fn cancel(
        &mut self,
        engine: &PlacementEngine,
        floor: &mut Floor,
        viewport: &mut Viewport,
    ) -> Result<(), PlacementError> {
        let active = self.active.take().ok_or(PlacementError::NoActiveGesture)?;
        debug!(gesture = active.name(), "gesture cancelled");

        match active {
            Active::Drag { .. } => Ok(()),
            Active::Resize {
                object_id, initial, ..
            } => match engine.place_footprint(floor, &object_id, initial) {
                Ok(_) => Ok(()),
                Err(PlacementError::Collision { existing, .. }) => {
                    debug!(object = %object_id, %existing, "initial geometry taken, keeping current");
                    Ok(())
                }
                Err(e) => Err(e),
            },
            Active::Pan { initial, .. } => {
                viewport.set_translation(initial);
                Ok(())
            }
        }
    }
}

fn lookup<'a>(floor: &'a Floor, object_id: &str) -> Result<&'a BookableObject, PlacementError> {
    floor
        .object(object_id)
        .ok_or_else(|| PlacementError::object_not_found(object_id))
}
