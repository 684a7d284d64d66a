//! Pan/zoom viewport and the screen ↔ plan coordinate mapping.
//!
//! The editor renders plan content inside a container element as
//! `translate(tx, ty) scale(s)` applied to a box the size of the container.
//! A plan point `(x%, y%)` therefore lands on screen at
//!
//! ```text
//! screen_x = left + tx + s * (x% / 100 * width)
//! screen_y = top  + ty + s * (y% / 100 * height)
//! ```
//!
//! and [`screen_to_plan`] is the exact inverse of that mapping. The viewport
//! is view state only: nothing here touches stored object geometry.

use super::config::ViewportConfig;
use super::error::PlacementError;
use super::types::{Delta, Point};

/// Pixel rectangle of the map container on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ContainerBounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Container anchored at the screen origin
    pub fn sized(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Centre of the container in screen pixels
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Pointer position relative to the container's top-left corner
    pub fn local(&self, pointer: Point) -> Point {
        Point::new(pointer.x - self.left, pointer.y - self.top)
    }

    fn check(&self) -> Result<(), PlacementError> {
        if self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
        {
            Ok(())
        } else {
            Err(PlacementError::InvalidContainer)
        }
    }
}

/// Zoom buttons shown next to the map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomControl {
    In,
    Out,
    Reset,
}

/// Scale and translation applied to the plan content
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    scale: f64,
    translation: Delta,
    config: ViewportConfig,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}

impl Viewport {
    /// Identity viewport with the given limits. Inverted scale bounds are
    /// swapped.
    pub fn new(mut config: ViewportConfig) -> Self {
        if config.min_scale > config.max_scale {
            std::mem::swap(&mut config.min_scale, &mut config.max_scale);
        }
        Self {
            scale: 1.0,
            translation: Delta::default(),
            config,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Translation in screen pixels
    pub fn translation(&self) -> Delta {
        self.translation
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// Set the scale, clamped to the configured bounds
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = self.clamp_scale(scale);
    }

    pub fn set_translation(&mut self, translation: Delta) {
        self.translation = translation;
    }

    fn clamp_scale(&self, scale: f64) -> f64 {
        scale.max(self.config.min_scale).min(self.config.max_scale)
    }

    /// Zoom by `factor` keeping the content under `pointer` fixed on screen.
    ///
    /// When the scale bound cuts the step short, the anchor still holds
    /// because the translation is derived from the scale actually applied.
    /// Factors that are not finite and positive are ignored.
    pub fn zoom_at(&mut self, pointer: Point, container: &ContainerBounds, factor: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let new_scale = self.clamp_scale(self.scale * factor);
        let applied = new_scale / self.scale;
        let anchor = container.local(pointer);

        self.translation = Delta::new(
            anchor.x - (anchor.x - self.translation.dx) * applied,
            anchor.y - (anchor.y - self.translation.dy) * applied,
        );
        self.scale = new_scale;
    }

    /// One mouse-wheel step at the pointer. Negative `delta_y` (scrolling
    /// up) zooms in.
    pub fn wheel(&mut self, pointer: Point, container: &ContainerBounds, delta_y: f64) {
        let step = self.config.wheel_zoom_factor;
        let factor = if delta_y < 0.0 { step } else { 1.0 / step };
        self.zoom_at(pointer, container, factor);
    }

    /// Apply a zoom button; in/out are anchored at the container centre
    pub fn zoom_control(&mut self, control: ZoomControl, container: &ContainerBounds) {
        let step = self.config.button_zoom_factor;
        match control {
            ZoomControl::In => self.zoom_at(container.center(), container, step),
            ZoomControl::Out => self.zoom_at(container.center(), container, 1.0 / step),
            ZoomControl::Reset => self.reset(),
        }
    }

    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.translation = Delta::default();
    }

    /// Shift the content by a screen-space delta
    pub fn pan_by(&mut self, delta: Delta) {
        self.translation = Delta::new(
            self.translation.dx + delta.dx,
            self.translation.dy + delta.dy,
        );
    }
}

/// Map a screen pointer to plan percentages.
pub fn screen_to_plan(
    pointer: Point,
    viewport: &Viewport,
    container: &ContainerBounds,
) -> Result<Point, PlacementError> {
    container.check()?;
    let local = container.local(pointer);
    let t = viewport.translation();
    let content_x = (local.x - t.dx) / viewport.scale();
    let content_y = (local.y - t.dy) / viewport.scale();
    Ok(Point::new(
        content_x / container.width * 100.0,
        content_y / container.height * 100.0,
    ))
}

/// Map a plan point to the screen pixel where it is rendered
pub fn plan_to_screen(
    plan: Point,
    viewport: &Viewport,
    container: &ContainerBounds,
) -> Result<Point, PlacementError> {
    container.check()?;
    let t = viewport.translation();
    Ok(Point::new(
        container.left + t.dx + viewport.scale() * (plan.x / 100.0 * container.width),
        container.top + t.dy + viewport.scale() * (plan.y / 100.0 * container.height),
    ))
}
