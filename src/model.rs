//! Venue data model: locations, floors and bookable objects
//!
//! The serialized form is the layout JSON consumed by the booking front-end:
//!
//! ```text
//! { id, name, floors: [{ id, name, floorPlanUrl, objects: [
//!     { id, name, type, description, price, position: {x, y},
//!       width, height, status, color? } ] }] }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::layout::types::{Footprint, Point};

/// Width/height used for objects whose stored data predates explicit sizes
pub const LEGACY_EXTENT: f64 = 5.0;

fn legacy_extent() -> f64 {
    LEGACY_EXTENT
}

/// Kind of bookable object.
///
/// The built-in kinds cover the venues the editor ships with; anything else
/// is a custom kind identified by its tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ObjectKind {
    Table,
    Sunbed,
    Workspace,
    Boat,
    Room,
    Custom(String),
}

impl ObjectKind {
    pub const BUILTIN: [ObjectKind; 5] = [
        ObjectKind::Table,
        ObjectKind::Sunbed,
        ObjectKind::Workspace,
        ObjectKind::Boat,
        ObjectKind::Room,
    ];

    /// Resolve a stored tag. Unknown tags become custom kinds.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "table" => ObjectKind::Table,
            "sunbed" => ObjectKind::Sunbed,
            "workspace" => ObjectKind::Workspace,
            "boat" => ObjectKind::Boat,
            "room" => ObjectKind::Room,
            other => ObjectKind::Custom(other.to_string()),
        }
    }

    /// Create a kind from a user-supplied palette label.
    ///
    /// The tag is the lower-cased label with every whitespace character
    /// replaced by `-`, so "Beach Bar" becomes `beach-bar`.
    pub fn custom(label: &str) -> Self {
        let tag: String = label
            .to_lowercase()
            .chars()
            .map(|c| if c.is_whitespace() { '-' } else { c })
            .collect();
        Self::from_tag(&tag)
    }

    /// Stored tag (`table`, `sunbed`, ...)
    pub fn tag(&self) -> &str {
        match self {
            ObjectKind::Table => "table",
            ObjectKind::Sunbed => "sunbed",
            ObjectKind::Workspace => "workspace",
            ObjectKind::Boat => "boat",
            ObjectKind::Room => "room",
            ObjectKind::Custom(tag) => tag,
        }
    }

    /// Label shown in the object palette
    pub fn palette_label(&self) -> &str {
        match self {
            ObjectKind::Table => "Table",
            ObjectKind::Sunbed => "Sunbed",
            ObjectKind::Workspace => "Workspace",
            ObjectKind::Boat => "Boat/Jet Ski",
            ObjectKind::Room => "Room/House",
            ObjectKind::Custom(tag) => tag,
        }
    }

    /// Icon hint for renderers; custom kinds share a generic box
    pub fn icon(&self) -> &'static str {
        match self {
            ObjectKind::Table => "table",
            ObjectKind::Sunbed => "sunbed",
            ObjectKind::Workspace => "workspace",
            ObjectKind::Boat => "boat",
            ObjectKind::Room => "room",
            ObjectKind::Custom(_) => "box",
        }
    }

    /// Prefix for generated object names: the tag with its first letter
    /// upper-cased ("Table", "Beach-bar").
    pub fn name_prefix(&self) -> String {
        let tag = self.tag();
        let mut chars = tag.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, ObjectKind::Custom(_))
    }
}

impl From<String> for ObjectKind {
    fn from(tag: String) -> Self {
        ObjectKind::from_tag(&tag)
    }
}

impl From<ObjectKind> for String {
    fn from(kind: ObjectKind) -> Self {
        match kind {
            ObjectKind::Custom(tag) => tag,
            builtin => builtin.tag().to_string(),
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Booking status of an object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ObjectStatus {
    #[default]
    Free,
    Reserved,
    Occupied,
}

impl fmt::Display for ObjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectStatus::Free => write!(f, "Free"),
            ObjectStatus::Reserved => write!(f, "Reserved"),
            ObjectStatus::Occupied => write!(f, "Occupied"),
        }
    }
}

/// A placeable, reservable unit on a floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookableObject {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    /// Centre of the footprint, in percent of the plan
    pub position: Point,
    #[serde(default = "legacy_extent")]
    pub width: f64,
    #[serde(default = "legacy_extent")]
    pub height: f64,
    #[serde(default)]
    pub status: ObjectStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl BookableObject {
    pub fn footprint(&self) -> Footprint {
        Footprint::new(self.position, self.width, self.height)
    }

    pub fn set_footprint(&mut self, footprint: Footprint) {
        self.position = footprint.center;
        self.width = footprint.width;
        self.height = footprint.height;
    }
}

/// One layout surface of a location: a plan image and the objects on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Floor {
    pub id: String,
    pub name: String,
    /// Opaque background image reference, empty when none was uploaded
    #[serde(default)]
    pub floor_plan_url: String,
    #[serde(default)]
    pub objects: Vec<BookableObject>,
}

impl Floor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            floor_plan_url: String::new(),
            objects: vec![],
        }
    }

    pub fn object(&self, id: &str) -> Option<&BookableObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn object_mut(&mut self, id: &str) -> Option<&mut BookableObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Number of objects of the given kind
    pub fn count_of(&self, kind: &ObjectKind) -> usize {
        self.objects.iter().filter(|o| &o.kind == kind).count()
    }
}

/// A venue with one or more floors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub floors: Vec<Floor>,
}

impl Location {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            floors: vec![],
        }
    }

    pub fn floor(&self, id: &str) -> Option<&Floor> {
        self.floors.iter().find(|f| f.id == id)
    }

    pub fn floor_mut(&mut self, id: &str) -> Option<&mut Floor> {
        self.floors.iter_mut().find(|f| f.id == id)
    }

    /// Total number of objects across all floors
    pub fn object_count(&self) -> usize {
        self.floors.iter().map(|f| f.objects.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_tags_round_trip() {
        for kind in ObjectKind::BUILTIN {
            assert_eq!(ObjectKind::from_tag(kind.tag()), kind);
        }
        assert_eq!(
            ObjectKind::from_tag("cabana"),
            ObjectKind::Custom("cabana".to_string())
        );
    }

    #[test]
    fn test_custom_kind_from_label() {
        let kind = ObjectKind::custom("Beach Bar");
        assert_eq!(kind.tag(), "beach-bar");
        assert_eq!(kind.icon(), "box");
        assert_eq!(kind.name_prefix(), "Beach-bar");
        assert!(kind.is_custom());
    }

    #[test]
    fn test_custom_label_matching_builtin_resolves_builtin() {
        assert_eq!(ObjectKind::custom("Table"), ObjectKind::Table);
    }

    #[test]
    fn test_name_prefix() {
        assert_eq!(ObjectKind::Table.name_prefix(), "Table");
        assert_eq!(ObjectKind::Boat.name_prefix(), "Boat");
        assert_eq!(ObjectKind::Boat.palette_label(), "Boat/Jet Ski");
    }

    #[test]
    fn test_object_deserializes_with_defaults() {
        let json = r##"{
            "id": "sunbed-1",
            "name": "Sunbed 1",
            "type": "sunbed",
            "position": { "x": 10, "y": 20 },
            "status": "Reserved",
            "color": "#ff0000"
        }"##;
        let obj: BookableObject = serde_json::from_str(json).unwrap();
        assert_eq!(obj.kind, ObjectKind::Sunbed);
        assert_eq!(obj.width, LEGACY_EXTENT);
        assert_eq!(obj.height, LEGACY_EXTENT);
        assert_eq!(obj.status, ObjectStatus::Reserved);
        assert_eq!(obj.color.as_deref(), Some("#ff0000"));
        assert_eq!(obj.price, 0.0);
    }

    #[test]
    fn test_custom_kind_serializes_as_tag() {
        let json = serde_json::to_string(&ObjectKind::Custom("dj-booth".to_string())).unwrap();
        assert_eq!(json, r#""dj-booth""#);
    }

    #[test]
    fn test_location_ignores_unknown_fields() {
        let json = r#"{
            "id": "beach-club-1",
            "name": "Beach Club",
            "address": "Shore Road 1",
            "floors": [{ "id": "f1", "name": "Beach", "floorPlanUrl": "plan.png", "objects": [] }]
        }"#;
        let location: Location = serde_json::from_str(json).unwrap();
        assert_eq!(location.floors.len(), 1);
        assert_eq!(location.floor("f1").unwrap().floor_plan_url, "plan.png");
    }
}
