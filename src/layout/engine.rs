//! Placement engine: every mutation of a floor layout goes through here.
//!
//! Each operation builds a candidate, validates it against the floor, and
//! only then writes it back, so a rejected call never leaves a partial
//! change behind. Collision detection is a linear scan over the floor's
//! objects; floors hold tens of objects, not thousands.

use tracing::{debug, warn};

use crate::model::{BookableObject, Floor, Location, ObjectKind, ObjectStatus};
use crate::suggest::Suggestion;

use super::config::PlacementConfig;
use super::error::PlacementError;
use super::types::{Delta, Footprint, Handle, Point};

/// Description given to objects created from AI suggestions
pub const SUGGESTION_DESCRIPTION: &str = "Placed by AI assistant.";

/// Find the first object whose footprint overlaps `candidate`, skipping the
/// object with id `ignore`.
pub fn find_collision<'a>(
    objects: &'a [BookableObject],
    candidate: &Footprint,
    ignore: Option<&str>,
) -> Option<&'a BookableObject> {
    objects
        .iter()
        .filter(|o| Some(o.id.as_str()) != ignore)
        .find(|o| o.footprint().overlaps(candidate))
}

/// Field changes for a single object (form edit). `None` keeps the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub status: Option<ObjectStatus>,
    /// `Some("")` clears the colour override
    pub color: Option<String>,
    pub position: Option<Point>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

impl ObjectPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_status(mut self, status: ObjectStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Whether the patch touches position or size
    pub fn changes_geometry(&self) -> bool {
        self.position.is_some() || self.width.is_some() || self.height.is_some()
    }

    fn apply(&self, object: &mut BookableObject) {
        if let Some(name) = &self.name {
            object.name = name.clone();
        }
        if let Some(description) = &self.description {
            object.description = description.clone();
        }
        if let Some(price) = self.price {
            object.price = price;
        }
        if let Some(status) = self.status {
            object.status = status;
        }
        if let Some(color) = &self.color {
            object.color = if color.is_empty() {
                None
            } else {
                Some(color.clone())
            };
        }
        if let Some(position) = self.position {
            object.position = position;
        }
        if let Some(width) = self.width {
            object.width = width;
        }
        if let Some(height) = self.height {
            object.height = height;
        }
    }
}

/// The placement engine. Stateless apart from its configuration; the
/// floor or location being edited is passed into every call.
#[derive(Debug, Clone, Default)]
pub struct PlacementEngine {
    config: PlacementConfig,
}

impl PlacementEngine {
    pub fn new(config: PlacementConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Drop a new object of `kind` centred at `position`.
    pub fn add_object(
        &self,
        floor: &mut Floor,
        kind: ObjectKind,
        position: Point,
    ) -> Result<BookableObject, PlacementError> {
        let description = format!("A new {}.", kind.tag());
        let price = self.config.default_price;
        self.insert(floor, kind, position, description, price)
    }

    /// Turn an accepted AI suggestion into an object, subject to the same
    /// collision rule as a manual drop.
    pub fn accept_suggestion(
        &self,
        floor: &mut Floor,
        suggestion: &Suggestion,
    ) -> Result<BookableObject, PlacementError> {
        self.insert(
            floor,
            self.config.suggestion_kind.clone(),
            suggestion.position(),
            SUGGESTION_DESCRIPTION.to_string(),
            self.config.suggestion_price,
        )
    }

    fn insert(
        &self,
        floor: &mut Floor,
        kind: ObjectKind,
        position: Point,
        description: String,
        price: f64,
    ) -> Result<BookableObject, PlacementError> {
        check_position(position)?;
        let dims = self.config.dimensions_for(&kind);
        let object = BookableObject {
            id: next_object_id(floor, &kind),
            name: format!("{} {}", kind.name_prefix(), floor.count_of(&kind) + 1),
            kind,
            description,
            price,
            position,
            width: dims.width,
            height: dims.height,
            status: ObjectStatus::Free,
            color: None,
        };

        if let Some(existing) = find_collision(&floor.objects, &object.footprint(), None) {
            warn!(candidate = %object.name, existing = %existing.id, "placement rejected");
            return Err(PlacementError::collision(&object.name, &existing.id));
        }

        debug!(
            floor = %floor.id,
            object = %object.id,
            x = position.x,
            y = position.y,
            "object added"
        );
        floor.objects.push(object.clone());
        Ok(object)
    }

    /// Move an object's centre, keeping its size.
    pub fn move_object(
        &self,
        floor: &mut Floor,
        object_id: &str,
        position: Point,
    ) -> Result<BookableObject, PlacementError> {
        check_position(position)?;
        let current = lookup(floor, object_id)?.footprint();
        self.place_footprint(floor, object_id, current.moved_to(position))
    }

    /// Drag one corner of an object by `delta` (plan percentages). The
    /// opposite corner stays fixed and each side is floored at the
    /// configured minimum.
    pub fn resize_object(
        &self,
        floor: &mut Floor,
        object_id: &str,
        handle: Handle,
        delta: Delta,
    ) -> Result<BookableObject, PlacementError> {
        if !(delta.dx.is_finite() && delta.dy.is_finite()) {
            return Err(PlacementError::invalid("delta", "must be finite"));
        }
        let current = lookup(floor, object_id)?.footprint();
        let candidate = current.resized(handle, delta, self.config.min_dimension);
        self.place_footprint(floor, object_id, candidate)
    }

    /// Commit new geometry for an existing object if it is collision-free.
    pub fn place_footprint(
        &self,
        floor: &mut Floor,
        object_id: &str,
        footprint: Footprint,
    ) -> Result<BookableObject, PlacementError> {
        let name = lookup(floor, object_id)?.name.clone();
        if let Some(existing) = find_collision(&floor.objects, &footprint, Some(object_id)) {
            debug!(object = %object_id, existing = %existing.id, "geometry change rejected");
            return Err(PlacementError::collision(name, &existing.id));
        }

        let object = lookup_mut(floor, object_id)?;
        object.set_footprint(footprint);
        debug!(
            object = %object_id,
            x = footprint.center.x,
            y = footprint.center.y,
            width = footprint.width,
            height = footprint.height,
            "geometry committed"
        );
        Ok(object.clone())
    }

    /// Apply a form edit to one object
    pub fn update_object(
        &self,
        floor: &mut Floor,
        object_id: &str,
        patch: &ObjectPatch,
    ) -> Result<BookableObject, PlacementError> {
        self.check_patch(patch)?;
        let mut candidate = lookup(floor, object_id)?.clone();
        patch.apply(&mut candidate);

        if patch.changes_geometry() {
            if let Some(existing) =
                find_collision(&floor.objects, &candidate.footprint(), Some(object_id))
            {
                return Err(PlacementError::collision(&candidate.name, &existing.id));
            }
        }

        let object = lookup_mut(floor, object_id)?;
        *object = candidate.clone();
        debug!(object = %object_id, "object updated");
        Ok(candidate)
    }

    /// Apply the same non-geometric edit to several objects. Either every
    /// object is updated or none is.
    pub fn update_objects<S: AsRef<str>>(
        &self,
        floor: &mut Floor,
        object_ids: &[S],
        patch: &ObjectPatch,
    ) -> Result<usize, PlacementError> {
        if patch.changes_geometry() {
            return Err(PlacementError::invalid(
                "patch",
                "position and size cannot be bulk-edited",
            ));
        }
        self.check_patch(patch)?;
        for id in object_ids {
            lookup(floor, id.as_ref())?;
        }

        let mut updated = 0;
        for object in floor
            .objects
            .iter_mut()
            .filter(|o| object_ids.iter().any(|id| id.as_ref() == o.id))
        {
            patch.apply(object);
            updated += 1;
        }
        debug!(floor = %floor.id, count = updated, "bulk update applied");
        Ok(updated)
    }

    fn check_patch(&self, patch: &ObjectPatch) -> Result<(), PlacementError> {
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(PlacementError::invalid("name", "must not be blank"));
            }
        }
        if let Some(price) = patch.price {
            if !(price.is_finite() && price >= 0.0) {
                return Err(PlacementError::invalid("price", "must be a non-negative number"));
            }
        }
        if let Some(position) = patch.position {
            check_position(position)?;
        }
        let min = self.config.min_dimension;
        for (field, value) in [("width", patch.width), ("height", patch.height)] {
            if let Some(value) = value {
                if !(value.is_finite() && value >= min) {
                    return Err(PlacementError::invalid(
                        field,
                        format!("must be at least {}", min),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Remove one object
    pub fn delete_object(&self, floor: &mut Floor, object_id: &str) -> Result<(), PlacementError> {
        let index = floor
            .objects
            .iter()
            .position(|o| o.id == object_id)
            .ok_or_else(|| PlacementError::object_not_found(object_id))?;
        floor.objects.remove(index);
        debug!(floor = %floor.id, object = %object_id, "object deleted");
        Ok(())
    }

    /// Remove every object from the floor, returning how many were removed
    pub fn clear_floor(&self, floor: &mut Floor) -> usize {
        let removed = floor.objects.len();
        floor.objects.clear();
        debug!(floor = %floor.id, removed, "floor cleared");
        removed
    }

    /// Append an empty floor to the location
    pub fn add_floor(&self, location: &mut Location, name: &str) -> Result<Floor, PlacementError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlacementError::invalid("floor name", "is required"));
        }
        let floor = Floor::new(next_floor_id(location), name);
        debug!(location = %location.id, floor = %floor.id, "floor added");
        location.floors.push(floor.clone());
        Ok(floor)
    }

    pub fn rename_floor(
        &self,
        location: &mut Location,
        floor_id: &str,
        name: &str,
    ) -> Result<(), PlacementError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlacementError::invalid("floor name", "is required"));
        }
        let floor = location
            .floor_mut(floor_id)
            .ok_or_else(|| PlacementError::floor_not_found(floor_id))?;
        floor.name = name.to_string();
        Ok(())
    }

    /// Replace a floor's background image reference
    pub fn set_floor_plan(
        &self,
        location: &mut Location,
        floor_id: &str,
        url: impl Into<String>,
    ) -> Result<(), PlacementError> {
        let floor = location
            .floor_mut(floor_id)
            .ok_or_else(|| PlacementError::floor_not_found(floor_id))?;
        floor.floor_plan_url = url.into();
        Ok(())
    }

    /// Delete a floor together with its objects.
    pub fn delete_floor(
        &self,
        location: &mut Location,
        floor_id: &str,
    ) -> Result<Floor, PlacementError> {
        let index = location
            .floors
            .iter()
            .position(|f| f.id == floor_id)
            .ok_or_else(|| PlacementError::floor_not_found(floor_id))?;

        if location.floors.len() <= self.config.min_floors {
            warn!(location = %location.id, floor = %floor_id, "refusing to delete last floor");
            return Err(PlacementError::LastFloor {
                floor_id: floor_id.to_string(),
                min_floors: self.config.min_floors,
            });
        }

        let removed = location.floors.remove(index);
        debug!(
            location = %location.id,
            floor = %floor_id,
            objects = removed.objects.len(),
            "floor deleted"
        );
        Ok(removed)
    }
}

fn lookup<'a>(floor: &'a Floor, object_id: &str) -> Result<&'a BookableObject, PlacementError> {
    floor
        .object(object_id)
        .ok_or_else(|| PlacementError::object_not_found(object_id))
}

fn lookup_mut<'a>(
    floor: &'a mut Floor,
    object_id: &str,
) -> Result<&'a mut BookableObject, PlacementError> {
    floor
        .object_mut(object_id)
        .ok_or_else(|| PlacementError::object_not_found(object_id))
}

fn check_position(position: Point) -> Result<(), PlacementError> {
    if position.is_finite() {
        Ok(())
    } else {
        Err(PlacementError::invalid("position", "coordinates must be finite"))
    }
}

/// `<tag>-<n>`, starting from the object count and skipping taken ids
fn next_object_id(floor: &Floor, kind: &ObjectKind) -> String {
    let mut n = floor.objects.len() + 1;
    loop {
        let id = format!("{}-{}", kind.tag(), n);
        if floor.object(&id).is_none() {
            return id;
        }
        n += 1;
    }
}

fn next_floor_id(location: &Location) -> String {
    let mut n = location.floors.len() + 1;
    loop {
        let id = format!("floor-{}", n);
        if location.floor(&id).is_none() {
            return id;
        }
        n += 1;
    }
}
