// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The view engine: render passes and zoom/reprojection computations.

use alloc::boxed::Box;

use canopy_scene::{ActorFlags, Scene, ViewSettings};
use kurbo::{Point, Size, Vec2};

use crate::surface::RenderSurface;

/// Default probe distance, in viewport spacing units, for the
/// finite-difference measurements in [`View::zoom_to_full`] and
/// [`View::reproject_from_view`].
pub const PROBE_DISTANCE: f64 = 1000.0;

/// A viewport over a scene of layered actors.
///
/// `View` owns the [`Scene`] (the keyed actor stack) and the
/// [`ViewSettings`] (center, spacing, viewport size), drives the render
/// passes, and computes zoom transforms between actor spaces and the
/// viewport reference space.
///
/// Zoom methods do not mutate the settings. They return the `(center,
/// spacing)` pair the caller should apply, which keeps them trivially
/// retryable and makes "probe a key that may be gone" a cheap, safe call.
#[derive(Default)]
pub struct View {
    scene: Scene,
    settings: ViewSettings,
    surface: Option<Box<dyn RenderSurface>>,
}

impl core::fmt::Debug for View {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("View")
            .field("scene", &self.scene)
            .field("settings", &self.settings)
            .field("has_surface", &self.surface.is_some())
            .finish_non_exhaustive()
    }
}

impl View {
    /// Creates an empty view with default settings and no surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Returns the scene for mutation.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Returns the view settings.
    #[must_use]
    pub fn settings(&self) -> &ViewSettings {
        &self.settings
    }

    /// Returns the view settings for mutation.
    pub fn settings_mut(&mut self) -> &mut ViewSettings {
        &mut self.settings
    }

    /// Attaches the render surface, replacing any previous one.
    pub fn set_surface(&mut self, surface: Box<dyn RenderSurface>) {
        self.surface = Some(surface);
    }

    /// Detaches and returns the render surface, if any.
    pub fn take_surface(&mut self) -> Option<Box<dyn RenderSurface>> {
        self.surface.take()
    }

    /// Resets the view to a given viewport size: settings back to defaults,
    /// all actors removed.
    pub fn initialize(&mut self, size: Size) {
        self.settings.reset();
        self.settings.set_viewport_size(size);
        self.scene.clear();
    }

    /// Updates the viewport size and notifies the surface.
    pub fn resize(&mut self, size: Size) {
        self.settings.set_viewport_size(size);
        if let Some(surface) = &mut self.surface {
            surface.resized(size);
        }
    }

    /// Frames a render pass: forwards to the surface's `begin_frame`.
    pub fn before_rendering(&mut self) {
        if let Some(surface) = &mut self.surface {
            surface.begin_frame(&self.settings);
        }
    }

    /// Closes a render pass: forwards to the surface's `end_frame`.
    pub fn after_rendering(&mut self) {
        if let Some(surface) = &mut self.surface {
            surface.end_frame();
        }
    }

    /// Renders every visible actor from already-resident data.
    ///
    /// Actors are visited in rendering order, back to front, so the front
    /// of the order ends up on top. No data is fetched; this pass is cheap
    /// enough to run on every interaction.
    pub fn light_render(&mut self) {
        let settings = &self.settings;
        self.scene.for_each_back_to_front(|actor| {
            if actor.flags().contains(ActorFlags::VISIBLE) {
                actor.render(settings);
            }
        });
    }

    /// Renders every visible actor, first letting each load any missing
    /// data.
    ///
    /// This is the slow, complete pass: one `update_data` sweep over the
    /// stack followed by a light render.
    pub fn heavy_render(&mut self) {
        self.scene.for_each_back_to_front(|actor| {
            if actor.flags().contains(ActorFlags::VISIBLE) {
                actor.update_data();
            }
        });
        self.light_render();
    }

    /// Captures the current frame to `path` through the surface.
    ///
    /// Returns `false` when no surface is attached or the surface cannot
    /// capture.
    pub fn save_screenshot(&mut self, path: &str) -> bool {
        match &mut self.surface {
            Some(surface) => surface.capture(path),
            None => false,
        }
    }

    /// Computes the `(center, spacing)` that fits the region spanned by
    /// `origin` and `extent` into the viewport.
    ///
    /// The corners may be given in any order. The spacing magnitude is the
    /// isotropic fit scale from [`ViewSettings::fit_scale`]; the sign of
    /// each axis is copied from `native`, never derived from the region, so
    /// the axis-flip convention of the reference layer survives whatever
    /// orientation the query region has.
    #[must_use]
    pub fn zoom_to_region(&self, origin: Point, extent: Point, native: Vec2) -> (Point, Vec2) {
        let center = origin.midpoint(extent);
        let scale = self.settings.fit_scale(origin, extent);

        let spacing = Vec2::new(
            if native.x < 0.0 { -scale } else { scale },
            if native.y < 0.0 { -scale } else { scale },
        );

        (center, spacing)
    }

    /// Computes the `(center, spacing)` that fits every base (non-overlay)
    /// layer into the viewport.
    ///
    /// Returns `None` when the scene holds no base layers.
    #[must_use]
    pub fn zoom_to_extent(&self, native: Vec2) -> Option<(Point, Vec2)> {
        let (count, extent) = self.scene.extent(false);
        if count == 0 {
            return None;
        }
        Some(self.zoom_to_region(extent.origin(), Point::new(extent.x1, extent.y1), native))
    }

    /// Computes the `(center, spacing)` that fits the single layer stored
    /// under `key` into the viewport.
    ///
    /// Returns `None` when the key is absent.
    #[must_use]
    pub fn zoom_to_layer(&self, key: &str, native: Vec2) -> Option<(Point, Vec2)> {
        let extent = self.scene.get(key)?.extent();
        Some(self.zoom_to_region(
            Point::new(extent.x0, extent.y0),
            Point::new(extent.x1, extent.y1),
            native,
        ))
    }

    /// Computes the `(center, spacing)` showing the layer under `key` at
    /// its native 1:1 scale, with the default probe distance.
    ///
    /// See [`View::zoom_to_full_with_units`].
    #[must_use]
    pub fn zoom_to_full(&self, key: &str) -> Option<(Point, Vec2)> {
        self.zoom_to_full_with_units(key, PROBE_DISTANCE)
    }

    /// Computes the `(center, spacing)` showing the layer under `key` at
    /// its native 1:1 scale.
    ///
    /// The center is the current viewport center, unchanged. For each axis,
    /// a point `units` spacing-units away is transformed into the actor's
    /// native space and the *length* of the native-space displacement is
    /// measured — per-axis differences would be corrupted by a rotating
    /// transform. The new spacing per axis is
    /// `|native| * units * spacing / length`, then the larger-magnitude
    /// axis is clamped down to the smaller magnitude (each axis keeping its
    /// own sign) so pixels come out square.
    ///
    /// Returns `None` when the key is absent, the actor has no
    /// [`GeoTransform`](canopy_scene::GeoTransform) capability, a transform
    /// step fails, or the result is not finite.
    #[must_use]
    pub fn zoom_to_full_with_units(&self, key: &str, units: f64) -> Option<(Point, Vec2)> {
        let geo = self.scene.get(key)?.geo()?;

        let center = self.settings.center();
        let spacing = self.settings.spacing();
        let native = geo.native_spacing();

        let origin = geo.from_viewport(center, true)?;

        let probe = geo.from_viewport(Point::new(center.x + units * spacing.x, center.y), true)?;
        let sx = native.x.abs() * units * spacing.x / (probe - origin).hypot();

        let probe = geo.from_viewport(Point::new(center.x, center.y + units * spacing.y), true)?;
        let sy = native.y.abs() * units * spacing.y / (probe - origin).hypot();

        // Square pixels: clamp the coarser axis down to the finer one,
        // restoring each axis's own sign afterwards.
        let (sx, sy) = if sx.abs() < sy.abs() {
            (sx, if sy < 0.0 { -sx.abs() } else { sx.abs() })
        } else {
            (if sx < 0.0 { -sy.abs() } else { sy.abs() }, sy)
        };

        let spacing = Vec2::new(sx, sy);
        if !spacing.is_finite() {
            return None;
        }
        Some((center, spacing))
    }

    /// Reprojects a viewport `(center, spacing)` pair into the coordinate
    /// space of the layer under `key`, with the default probe distance.
    ///
    /// See [`View::reproject_from_view_with_norm`].
    #[must_use]
    pub fn reproject_from_view(
        &self,
        key: &str,
        vcenter: Point,
        vspacing: Vec2,
    ) -> Option<(Point, Vec2)> {
        self.reproject_from_view_with_norm(key, vcenter, vspacing, PROBE_DISTANCE)
    }

    /// Reprojects a viewport `(center, spacing)` pair into the coordinate
    /// space of the layer under `key`.
    ///
    /// The center is transformed directly. Each spacing axis is measured by
    /// perturbing `vcenter` by `norm * vspacing` along that axis alone,
    /// transforming, and taking the displacement length divided by `norm`.
    /// The output spacing signs are copied from the actor's native spacing,
    /// which is read before any transform runs so a failing step cannot
    /// leave a stale sign reference.
    ///
    /// Returns `None` when any input component is non-finite, the key is
    /// absent, the actor has no geo capability, a transform step fails, or
    /// an output component is non-finite.
    #[must_use]
    pub fn reproject_from_view_with_norm(
        &self,
        key: &str,
        vcenter: Point,
        vspacing: Vec2,
        norm: f64,
    ) -> Option<(Point, Vec2)> {
        if !(vcenter.is_finite() && vspacing.is_finite() && norm.is_finite()) {
            return None;
        }

        let geo = self.scene.get(key)?.geo()?;
        let native = geo.native_spacing();

        let center = geo.from_viewport(vcenter, true)?;

        let x = geo.from_viewport(vcenter + Vec2::new(norm * vspacing.x, 0.0), true)?;
        let y = geo.from_viewport(vcenter + Vec2::new(0.0, norm * vspacing.y), true)?;

        let mut spacing = Vec2::new((x - center).hypot() / norm, (y - center).hypot() / norm);

        if native.x < 0.0 {
            spacing.x = -spacing.x;
        }
        if native.y < 0.0 {
            spacing.y = -spacing.y;
        }

        if !(center.is_finite() && spacing.is_finite()) {
            return None;
        }
        Some((center, spacing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_scene::Actor;
    use kurbo::Rect;

    struct Plain(Rect);

    impl Actor for Plain {
        fn extent(&self) -> Rect {
            self.0
        }
    }

    fn sized_view(w: f64, h: f64) -> View {
        let mut view = View::new();
        view.initialize(Size::new(w, h));
        view
    }

    #[test]
    fn zoom_to_region_copies_signs_from_native() {
        let view = sized_view(100.0, 100.0);

        let (center, spacing) = view.zoom_to_region(
            Point::new(0.0, 0.0),
            Point::new(100.0, 50.0),
            Vec2::new(1.0, -1.0),
        );
        assert_eq!(center, Point::new(50.0, 25.0));
        assert!(spacing.x > 0.0 && spacing.y < 0.0);
        assert_eq!(spacing.x, -spacing.y);

        // Same region handed in flipped: identical result.
        let (center2, spacing2) = view.zoom_to_region(
            Point::new(100.0, 50.0),
            Point::new(0.0, 0.0),
            Vec2::new(1.0, -1.0),
        );
        assert_eq!(center2, center);
        assert_eq!(spacing2, spacing);
    }

    #[test]
    fn zoom_to_extent_fails_on_empty_scene() {
        let view = sized_view(100.0, 100.0);
        assert!(view.zoom_to_extent(Vec2::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn zoom_to_layer_unknown_key_fails() {
        let mut view = sized_view(100.0, 100.0);
        view.scene_mut()
            .insert_with_key("base", Box::new(Plain(Rect::new(0.0, 0.0, 10.0, 10.0))));
        assert!(view.zoom_to_layer("ghost", Vec2::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn zoom_to_layer_uses_that_layer_alone() {
        let mut view = sized_view(100.0, 100.0);
        view.scene_mut()
            .insert_with_key("a", Box::new(Plain(Rect::new(0.0, 0.0, 10.0, 10.0))));
        view.scene_mut()
            .insert_with_key("b", Box::new(Plain(Rect::new(100.0, 100.0, 300.0, 300.0))));

        let (center, spacing) = view.zoom_to_layer("a", Vec2::new(1.0, 1.0)).unwrap();
        assert_eq!(center, Point::new(5.0, 5.0));
        assert_eq!(spacing, Vec2::new(0.1, 0.1));
    }
}
