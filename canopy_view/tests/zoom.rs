// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the zoom/reprojection computations of `canopy_view`.
//!
//! Geo transforms here are small hand-built models: a translation, a
//! rotate+scale, and an always-failing projection. They are enough to pin
//! down the sign rules, the rotation-safe length measurements, and the
//! failure taxonomy (absent key, missing capability, failing transform).

use canopy_scene::{Actor, GeoTransform};
use canopy_view::View;
use kurbo::{Point, Rect, Size, Vec2};

enum Transform {
    Translate(Vec2),
    /// Uniform scale then rotation (radians), viewport to native.
    SpinScale(f64, f64),
    Broken,
}

struct GeoLayer {
    extent: Rect,
    native_spacing: Vec2,
    transform: Transform,
}

impl Actor for GeoLayer {
    fn extent(&self) -> Rect {
        self.extent
    }

    fn geo(&self) -> Option<&dyn GeoTransform> {
        Some(self)
    }
}

impl GeoTransform for GeoLayer {
    fn from_viewport(&self, pt: Point, _physical: bool) -> Option<Point> {
        match self.transform {
            Transform::Translate(offset) => Some(pt + offset),
            Transform::SpinScale(scale, angle) => {
                let (sin, cos) = angle.sin_cos();
                Some(Point::new(
                    scale * (cos * pt.x - sin * pt.y),
                    scale * (sin * pt.x + cos * pt.y),
                ))
            }
            Transform::Broken => None,
        }
    }

    fn native_spacing(&self) -> Vec2 {
        self.native_spacing
    }
}

struct Plain(Rect);

impl Actor for Plain {
    fn extent(&self) -> Rect {
        self.0
    }
}

fn view_with(key: &str, layer: GeoLayer) -> View {
    let mut view = View::new();
    view.initialize(Size::new(800.0, 600.0));
    view.scene_mut().insert_with_key(key, Box::new(layer));
    view
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "{actual} != {expected}"
    );
}

#[test]
fn zoom_to_full_equalizes_magnitudes_and_keeps_signs() {
    let mut view = view_with(
        "sensor",
        GeoLayer {
            extent: Rect::new(0.0, 0.0, 100.0, 100.0),
            // Anisotropic native grid: X pixels three times coarser.
            native_spacing: Vec2::new(3.0, -1.0),
            transform: Transform::SpinScale(0.5, 0.3),
        },
    );
    view.settings_mut().set_center(Point::new(10.0, 20.0));
    view.settings_mut().set_spacing(Vec2::new(2.0, -1.0));

    let (center, spacing) = view.zoom_to_full("sensor").expect("geo layer present");

    // The center is the current viewport center, untouched.
    assert_eq!(center, Point::new(10.0, 20.0));

    // Magnitudes are equal after the square-pixel correction; each axis
    // keeps the sign it had (from the viewport spacing).
    assert_close(spacing.x.abs(), spacing.y.abs());
    assert!(spacing.x > 0.0 && spacing.y < 0.0);

    // Pre-correction: X measures 3/0.5 = 6, Y measures 1/0.5 = -2; the
    // coarser X axis is clamped down to magnitude 2.
    assert_close(spacing.x, 2.0);
    assert_close(spacing.y, -2.0);
}

#[test]
fn zoom_to_full_failure_taxonomy() {
    let mut view = View::new();
    view.initialize(Size::new(100.0, 100.0));

    // Absent key.
    assert!(view.zoom_to_full("nothing").is_none());

    // Actor without the geo capability.
    view.scene_mut()
        .insert_with_key("flat", Box::new(Plain(Rect::new(0.0, 0.0, 1.0, 1.0))));
    assert!(view.zoom_to_full("flat").is_none());

    // Failing transform.
    view.scene_mut().insert_with_key(
        "broken",
        Box::new(GeoLayer {
            extent: Rect::new(0.0, 0.0, 1.0, 1.0),
            native_spacing: Vec2::new(1.0, 1.0),
            transform: Transform::Broken,
        }),
    );
    assert!(view.zoom_to_full("broken").is_none());
}

#[test]
fn reproject_through_translation() {
    let view = view_with(
        "map",
        GeoLayer {
            extent: Rect::new(0.0, 0.0, 100.0, 100.0),
            native_spacing: Vec2::new(1.0, -1.0),
            transform: Transform::Translate(Vec2::new(100.0, -50.0)),
        },
    );

    let (center, spacing) = view
        .reproject_from_view("map", Point::new(10.0, 10.0), Vec2::new(2.0, 4.0))
        .expect("translation always succeeds");

    assert_eq!(center, Point::new(110.0, -40.0));
    assert_close(spacing.x, 2.0);
    // Sign copied from the native spacing, not from the input.
    assert_close(spacing.y, -4.0);
}

#[test]
fn reproject_spacing_magnitude_survives_rotation() {
    let view = view_with(
        "rotated",
        GeoLayer {
            extent: Rect::new(0.0, 0.0, 100.0, 100.0),
            native_spacing: Vec2::new(1.0, 1.0),
            transform: Transform::SpinScale(1.0, core::f64::consts::FRAC_PI_4),
        },
    );

    let (_, spacing) = view
        .reproject_from_view("rotated", Point::new(0.0, 0.0), Vec2::new(2.0, 4.0))
        .expect("rotation is invertible everywhere");

    // Displacements are measured by vector length, so a rotation must not
    // change the recovered magnitudes.
    assert_close(spacing.x, 2.0);
    assert_close(spacing.y, 4.0);
}

#[test]
fn reproject_rejects_non_finite_input() {
    let view = view_with(
        "map",
        GeoLayer {
            extent: Rect::new(0.0, 0.0, 100.0, 100.0),
            native_spacing: Vec2::new(1.0, 1.0),
            transform: Transform::Translate(Vec2::ZERO),
        },
    );

    assert!(
        view.reproject_from_view("map", Point::new(f64::NAN, 0.0), Vec2::new(1.0, 1.0))
            .is_none()
    );
    assert!(
        view.reproject_from_view("map", Point::ZERO, Vec2::new(1.0, f64::INFINITY))
            .is_none()
    );
}

#[test]
fn reproject_failure_taxonomy() {
    let mut view = view_with(
        "broken",
        GeoLayer {
            extent: Rect::new(0.0, 0.0, 1.0, 1.0),
            native_spacing: Vec2::new(1.0, 1.0),
            transform: Transform::Broken,
        },
    );
    view.scene_mut()
        .insert_with_key("flat", Box::new(Plain(Rect::new(0.0, 0.0, 1.0, 1.0))));

    assert!(
        view.reproject_from_view("ghost", Point::ZERO, Vec2::new(1.0, 1.0))
            .is_none()
    );
    assert!(
        view.reproject_from_view("flat", Point::ZERO, Vec2::new(1.0, 1.0))
            .is_none()
    );
    assert!(
        view.reproject_from_view("broken", Point::ZERO, Vec2::new(1.0, 1.0))
            .is_none()
    );
}

#[test]
fn zoom_to_extent_skips_overlays_and_fits_the_rest() {
    use canopy_scene::ActorFlags;

    struct Overlay(Rect);

    impl Actor for Overlay {
        fn extent(&self) -> Rect {
            self.0
        }

        fn flags(&self) -> ActorFlags {
            ActorFlags::VISIBLE | ActorFlags::OVERLAY
        }
    }

    let mut view = View::new();
    view.initialize(Size::new(100.0, 100.0));

    // Only an overlay: nothing to fit.
    view.scene_mut()
        .insert(Box::new(Overlay(Rect::new(0.0, 0.0, 1000.0, 1000.0))));
    assert!(view.zoom_to_extent(Vec2::new(1.0, 1.0)).is_none());

    view.scene_mut()
        .insert(Box::new(Plain(Rect::new(0.0, 0.0, 10.0, 10.0))));
    view.scene_mut()
        .insert(Box::new(Plain(Rect::new(10.0, 10.0, 20.0, 20.0))));

    let (center, spacing) = view.zoom_to_extent(Vec2::new(1.0, -1.0)).unwrap();
    assert_eq!(center, Point::new(10.0, 10.0));
    assert_eq!(spacing, Vec2::new(0.2, -0.2));
}
