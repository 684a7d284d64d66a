//! Lint engine for detecting defects in stored layouts.
//!
//! The engine never produces these states itself, but layouts loaded from
//! storage may have been written by older versions or edited by hand. The
//! checks report problems without changing anything: overlapping objects,
//! duplicate ids, degenerate sizes, centres outside the plan, and prices the
//! booking flow cannot charge.

use std::collections::HashSet;
use std::fmt;

use crate::model::{Floor, Location};

use super::config::PlacementConfig;

/// A lint warning about a layout defect
#[derive(Debug, Clone, PartialEq)]
pub struct LintWarning {
    pub category: LintCategory,
    pub floor_id: String,
    pub message: String,
}

/// Category of lint defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    Overlap,
    DuplicateId,
    Dimension,
    OutOfPlan,
    Price,
    FloorCount,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::Overlap => write!(f, "overlap"),
            LintCategory::DuplicateId => write!(f, "duplicate-id"),
            LintCategory::Dimension => write!(f, "dimension"),
            LintCategory::OutOfPlan => write!(f, "out-of-plan"),
            LintCategory::Price => write!(f, "price"),
            LintCategory::FloorCount => write!(f, "floor-count"),
        }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.category, self.floor_id, self.message)
    }
}

/// Run all lint checks on every floor of a location.
pub fn check(location: &Location, config: &PlacementConfig) -> Vec<LintWarning> {
    let mut warnings = Vec::new();

    if !location.floors.is_empty() && location.floors.len() < config.min_floors {
        warnings.push(LintWarning {
            category: LintCategory::FloorCount,
            floor_id: String::new(),
            message: format!(
                "location has {} floor(s), policy requires {}",
                location.floors.len(),
                config.min_floors
            ),
        });
    }

    let mut floor_ids = HashSet::new();
    for floor in &location.floors {
        if !floor_ids.insert(floor.id.as_str()) {
            warn(
                &mut warnings,
                LintCategory::DuplicateId,
                floor,
                format!("floor id \"{}\" is used more than once", floor.id),
            );
        }
        warnings.extend(check_floor(floor, config));
    }
    warnings
}

/// Run all lint checks on a single floor.
pub fn check_floor(floor: &Floor, config: &PlacementConfig) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    check_ids(floor, &mut warnings);
    check_overlaps(floor, &mut warnings);
    check_dimensions(floor, config, &mut warnings);
    check_bounds(floor, &mut warnings);
    check_prices(floor, &mut warnings);
    warnings
}

fn warn(warnings: &mut Vec<LintWarning>, category: LintCategory, floor: &Floor, message: String) {
    warnings.push(LintWarning {
        category,
        floor_id: floor.id.clone(),
        message,
    });
}

fn check_ids(floor: &Floor, warnings: &mut Vec<LintWarning>) {
    let mut seen = HashSet::new();
    for obj in &floor.objects {
        if !seen.insert(obj.id.as_str()) {
            warn(
                warnings,
                LintCategory::DuplicateId,
                floor,
                format!("object id \"{}\" is used more than once", obj.id),
            );
        }
    }
}

// Each pair is reported once: only objects later in the list are compared.
fn check_overlaps(floor: &Floor, warnings: &mut Vec<LintWarning>) {
    for (i, a) in floor.objects.iter().enumerate() {
        for b in &floor.objects[i + 1..] {
            if a.footprint().overlaps(&b.footprint()) {
                warn(
                    warnings,
                    LintCategory::Overlap,
                    floor,
                    format!("\"{}\" overlaps \"{}\"", a.name, b.name),
                );
            }
        }
    }
}

fn check_dimensions(floor: &Floor, config: &PlacementConfig, warnings: &mut Vec<LintWarning>) {
    for obj in &floor.objects {
        let ok = |v: f64| v.is_finite() && v >= config.min_dimension;
        if !ok(obj.width) || !ok(obj.height) {
            warn(
                warnings,
                LintCategory::Dimension,
                floor,
                format!(
                    "\"{}\" is {}x{}, below the minimum of {}",
                    obj.name, obj.width, obj.height, config.min_dimension
                ),
            );
        }
    }
}

fn check_bounds(floor: &Floor, warnings: &mut Vec<LintWarning>) {
    let inside = |v: f64| (0.0..=100.0).contains(&v);
    for obj in &floor.objects {
        if !inside(obj.position.x) || !inside(obj.position.y) {
            warn(
                warnings,
                LintCategory::OutOfPlan,
                floor,
                format!(
                    "\"{}\" is centred at ({:.1}, {:.1}), outside the plan",
                    obj.name, obj.position.x, obj.position.y
                ),
            );
        }
    }
}

fn check_prices(floor: &Floor, warnings: &mut Vec<LintWarning>) {
    for obj in &floor.objects {
        if !(obj.price.is_finite() && obj.price >= 0.0) {
            warn(
                warnings,
                LintCategory::Price,
                floor,
                format!("\"{}\" has invalid price {}", obj.name, obj.price),
            );
        }
    }
}
