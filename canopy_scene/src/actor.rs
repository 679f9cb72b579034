// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Actor capability contracts: renderable layers and optional geo-referencing.

use kurbo::{Point, Rect, Vec2};

use crate::settings::ViewSettings;

bitflags::bitflags! {
    /// Actor flags controlling visibility and layer classification.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ActorFlags: u8 {
        /// Actor is visible (participates in render passes).
        const VISIBLE = 0b0000_0001;
        /// Actor is an overlay layer rather than a base layer.
        ///
        /// Overlay and base layers form two disjoint populations for extent
        /// queries; see [`crate::Scene::extent`].
        const OVERLAY = 0b0000_0010;
    }
}

impl Default for ActorFlags {
    fn default() -> Self {
        Self::VISIBLE
    }
}

/// A renderable unit in a [`Scene`](crate::Scene).
///
/// Actors are constructed by the caller and moved into the scene, which owns
/// them exclusively from insertion until removal. The scene never inspects an
/// actor beyond this trait; pixel pipelines, caches, and data sources stay
/// entirely on the implementor's side.
///
/// The two render hooks split the classic refresh loop: [`Actor::update_data`]
/// may fetch or derive missing data (slow), while [`Actor::render`] must only
/// draw what is already resident (fast). Both default to no-ops so that purely
/// geometric actors stay trivial to implement.
pub trait Actor {
    /// Bounding region of this actor in the viewport reference space.
    ///
    /// The corners need not be ordered: `x1 < x0` or `y1 < y0` is legal and
    /// encodes a flipped axis. Consumers normalize with [`Rect::abs`] before
    /// aggregating.
    fn extent(&self) -> Rect;

    /// Visibility and classification flags. Defaults to [`ActorFlags::VISIBLE`].
    fn flags(&self) -> ActorFlags {
        ActorFlags::default()
    }

    /// Heavy-pass hook: compute and load any data missing for a complete
    /// render. May be slow; called only from heavy render passes.
    fn update_data(&mut self) {}

    /// Light-pass hook: draw using only already-resident data, honoring the
    /// current view settings.
    fn render(&mut self, settings: &ViewSettings) {
        let _ = settings;
    }

    /// Queries the optional geo-referencing capability.
    ///
    /// Returns `None` for actors that live directly in the viewport
    /// reference space. This is an explicit capability query; consumers must
    /// not attempt downcasting.
    fn geo(&self) -> Option<&dyn GeoTransform> {
        None
    }
}

/// Conversion between the viewport reference space and an actor's native
/// coordinate space.
///
/// Implementations wrap whatever projection machinery the actor's data
/// source carries (sensor models, map projections, plain affine grids). The
/// transform is allowed to fail: projections can be undefined or
/// non-invertible over parts of the plane.
pub trait GeoTransform {
    /// Transforms a viewport-space point into this actor's native space.
    ///
    /// `physical` selects physical (projected) native coordinates over raw
    /// grid indices, for sources that distinguish the two.
    ///
    /// Returns `None` when the transform is undefined at `pt` or would
    /// produce a non-finite point. Implementations must not return NaN or
    /// infinite coordinates inside `Some`.
    fn from_viewport(&self, pt: Point, physical: bool) -> Option<Point>;

    /// Native pixel spacing, signed per axis.
    ///
    /// The sign encodes the axis orientation of the native grid (north-up
    /// rasters commonly carry a negative Y spacing) and is used as the sign
    /// reference for zoom computations.
    fn native_spacing(&self) -> Vec2;
}
