// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport state: center, signed spacing, and fit-to-viewport scale.

use kurbo::{Point, Rect, Size, Vec2};

/// State of the viewport over the reference plane.
///
/// `ViewSettings` tracks where the viewport looks ([`ViewSettings::center`]),
/// how large a reference-space step one device pixel covers
/// ([`ViewSettings::spacing`]; the sign of each component encodes an axis
/// flip), and the viewport size in device pixels.
///
/// Spacing components are never NaN: setters silently ignore non-finite
/// input, so a settings value read back is always safe to do arithmetic
/// with. Zoom computations layered on top rely on this.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewSettings {
    center: Point,
    spacing: Vec2,
    viewport_size: Size,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            center: Point::ZERO,
            spacing: Vec2::new(1.0, 1.0),
            viewport_size: Size::ZERO,
        }
    }
}

impl ViewSettings {
    /// Creates settings with a unit spacing, zero center, and zero size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the viewport center in the reference space.
    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Sets the viewport center. Non-finite input is ignored.
    pub fn set_center(&mut self, center: Point) {
        if center.is_finite() {
            self.center = center;
        }
    }

    /// Returns the signed per-axis spacing (reference units per pixel).
    #[must_use]
    pub fn spacing(&self) -> Vec2 {
        self.spacing
    }

    /// Sets the spacing. Non-finite input is ignored, keeping the
    /// no-NaN invariant intact.
    pub fn set_spacing(&mut self, spacing: Vec2) {
        if spacing.is_finite() {
            self.spacing = spacing;
        }
    }

    /// Returns the viewport size in device pixels.
    #[must_use]
    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    /// Sets the viewport size in device pixels. Non-finite input is ignored.
    pub fn set_viewport_size(&mut self, size: Size) {
        if size.is_finite() {
            self.viewport_size = size;
        }
    }

    /// Resets center, spacing, and size to their defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns the reference-space region currently covered by the viewport.
    ///
    /// The region is centered on [`ViewSettings::center`] and spans
    /// `viewport_size * |spacing|`; it is empty while the viewport has no
    /// size.
    #[must_use]
    pub fn viewport_extent(&self) -> Rect {
        let half = Vec2::new(
            0.5 * self.viewport_size.width * self.spacing.x.abs(),
            0.5 * self.viewport_size.height * self.spacing.y.abs(),
        );
        Rect::from_points(self.center - half, self.center + half)
    }

    /// Computes the isotropic scale (reference units per pixel) that fits
    /// the region spanned by `origin` and `extent` into the viewport.
    ///
    /// The corners may be given in any order. A degenerate viewport, a
    /// degenerate region, or non-finite input all yield `1.0`, so the result
    /// is always finite and strictly positive.
    #[must_use]
    pub fn fit_scale(&self, origin: Point, extent: Point) -> f64 {
        let (w, h) = (self.viewport_size.width, self.viewport_size.height);
        if w <= 0.0 || h <= 0.0 {
            return 1.0;
        }

        let scale = f64::max(
            (extent.x - origin.x).abs() / w,
            (extent.y - origin.y).abs() / h,
        );

        if scale.is_finite() && scale > 0.0 { scale } else { 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_scale_picks_the_limiting_axis() {
        let mut settings = ViewSettings::new();
        settings.set_viewport_size(Size::new(100.0, 100.0));

        // Wide region: X limits.
        let s = settings.fit_scale(Point::new(0.0, 0.0), Point::new(200.0, 50.0));
        assert_eq!(s, 2.0);

        // Tall region: Y limits.
        let s = settings.fit_scale(Point::new(0.0, 0.0), Point::new(50.0, 400.0));
        assert_eq!(s, 4.0);
    }

    #[test]
    fn fit_scale_is_order_independent() {
        let mut settings = ViewSettings::new();
        settings.set_viewport_size(Size::new(200.0, 100.0));

        let a = Point::new(-10.0, 30.0);
        let b = Point::new(90.0, -70.0);
        assert_eq!(settings.fit_scale(a, b), settings.fit_scale(b, a));
    }

    #[test]
    fn fit_scale_degenerate_cases_yield_unit_scale() {
        let settings = ViewSettings::new();
        // Zero-sized viewport.
        assert_eq!(
            settings.fit_scale(Point::ZERO, Point::new(10.0, 10.0)),
            1.0
        );

        let mut settings = ViewSettings::new();
        settings.set_viewport_size(Size::new(100.0, 100.0));
        // Zero-sized region.
        assert_eq!(settings.fit_scale(Point::ZERO, Point::ZERO), 1.0);
        // NaN region.
        assert_eq!(
            settings.fit_scale(Point::new(f64::NAN, 0.0), Point::new(10.0, 10.0)),
            1.0
        );
    }

    #[test]
    fn setters_ignore_non_finite_input() {
        let mut settings = ViewSettings::new();
        settings.set_spacing(Vec2::new(2.0, -2.0));
        settings.set_spacing(Vec2::new(f64::NAN, 1.0));
        assert_eq!(settings.spacing(), Vec2::new(2.0, -2.0));

        settings.set_center(Point::new(5.0, 5.0));
        settings.set_center(Point::new(f64::INFINITY, 0.0));
        assert_eq!(settings.center(), Point::new(5.0, 5.0));
    }

    #[test]
    fn viewport_extent_is_centered_and_unsigned() {
        let mut settings = ViewSettings::new();
        settings.set_viewport_size(Size::new(100.0, 50.0));
        settings.set_center(Point::new(10.0, 10.0));
        settings.set_spacing(Vec2::new(2.0, -2.0));

        let extent = settings.viewport_extent();
        assert_eq!(extent, Rect::new(-90.0, -40.0, 110.0, 60.0));
    }
}
