// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The scene aggregate: keyed actor registry plus rendering order.

use alloc::borrow::ToOwned;
use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::Rect;

use crate::actor::{Actor, ActorFlags};

/// Which end of the rendering order an operation targets.
///
/// The front of the order is the topmost layer; render passes walk the order
/// back to front.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// The front of the order (topmost, painted last).
    Front,
    /// The back of the order (bottommost, painted first).
    Back,
}

/// Direction of a one-step movement within the rendering order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shift {
    /// Toward the front of the order (raise).
    TowardFront,
    /// Toward the back of the order (lower).
    TowardBack,
}

/// A keyed registry of [`Actor`]s together with their rendering order.
///
/// The scene owns its actors exclusively: they are moved in on insertion and
/// handed back (or dropped) on removal. Lookup goes through opaque string
/// keys, either caller-chosen or generated.
///
/// ## Invariant
///
/// The rendering order is a permutation of the registry's key set at all
/// times: every key in the order resolves to an actor and every actor
/// appears in the order exactly once. All mutating operations preserve this
/// pairing; it is the one property concurrent callers must not break with
/// whatever external serialization they apply.
#[derive(Default)]
pub struct Scene {
    actors: HashMap<String, Box<dyn Actor>>,
    order: Vec<String>,
    next_key: u64,
}

impl core::fmt::Debug for Scene {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scene")
            .field("len", &self.actors.len())
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

impl Scene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an actor under a generated key and returns that key.
    ///
    /// The key is guaranteed unique against the current key set, including
    /// caller-chosen keys; two calls never return equal keys while the first
    /// actor is still present. The actor is appended to the back of the
    /// rendering order.
    pub fn insert(&mut self, actor: Box<dyn Actor>) -> String {
        let key = loop {
            let candidate = format!("actor-{}", self.next_key);
            self.next_key += 1;
            if !self.actors.contains_key(&candidate) {
                break candidate;
            }
        };
        self.actors.insert(key.clone(), actor);
        self.order.push(key.clone());
        key
    }

    /// Inserts an actor under an explicit key and returns the key used.
    ///
    /// If the key is already present the existing actor is replaced in place
    /// and the rendering order is left untouched; otherwise the key is
    /// appended to the back of the order.
    pub fn insert_with_key(&mut self, key: impl Into<String>, actor: Box<dyn Actor>) -> String {
        let key = key.into();
        if self.actors.insert(key.clone(), actor).is_none() {
            self.order.push(key.clone());
        }
        key
    }

    /// Removes the actor stored under `key`, returning it.
    ///
    /// Returns `None` and leaves both registry and order untouched when the
    /// key is absent.
    pub fn remove(&mut self, key: &str) -> Option<Box<dyn Actor>> {
        let actor = self.actors.remove(key)?;
        self.order.retain(|k| k != key);
        Some(actor)
    }

    /// Removes all actors and empties the rendering order.
    pub fn clear(&mut self) {
        self.actors.clear();
        self.order.clear();
    }

    /// Returns the actor stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&dyn Actor> {
        self.actors.get(key).map(|a| a.as_ref())
    }

    /// Returns the actor stored under `key` for mutation, if any.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut dyn Actor> {
        self.actors.get_mut(key).map(|a| &mut **a as &mut dyn Actor)
    }

    /// Returns `true` if an actor is stored under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.actors.contains_key(key)
    }

    /// Returns the number of actors in the scene.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Returns `true` if the scene holds no actors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Returns all keys in registry order.
    ///
    /// The registry order is unspecified and distinct from the rendering
    /// order; use [`Scene::rendering_order`] for paint order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.actors.keys().cloned().collect()
    }

    /// Returns the rendering order, front (topmost) first.
    #[must_use]
    pub fn rendering_order(&self) -> &[String] {
        &self.order
    }

    /// Reorders some or all actors at once.
    ///
    /// Keys in `keys` that are not present in the registry are skipped.
    /// Non-selected actors keep their relative order. The selected keys (in
    /// the order given) are placed before all non-selected ones for
    /// [`Placement::Front`], after them for [`Placement::Back`].
    pub fn set_rendering_order(&mut self, keys: &[String], placement: Placement) {
        let mut selected: Vec<String> = Vec::with_capacity(keys.len());
        for key in keys {
            if self.actors.contains_key(key) && !selected.contains(key) {
                selected.push(key.clone());
            }
        }

        let rest: Vec<String> = self
            .order
            .iter()
            .filter(|k| !selected.contains(*k))
            .cloned()
            .collect();

        self.order = match placement {
            Placement::Front => {
                let mut order = selected;
                order.extend(rest);
                order
            }
            Placement::Back => {
                let mut order = rest;
                order.extend(selected);
                order
            }
        };
    }

    /// Rotates the rendering order cyclically by one position.
    ///
    /// [`Shift::TowardFront`] moves every key one slot frontward, wrapping
    /// the front key to the back; [`Shift::TowardBack`] is the inverse.
    /// No-op on orders with fewer than two keys.
    pub fn rotate_rendering_order(&mut self, shift: Shift) {
        if self.order.len() < 2 {
            return;
        }
        match shift {
            Shift::TowardFront => self.order.rotate_left(1),
            Shift::TowardBack => self.order.rotate_right(1),
        }
    }

    /// Swaps `key` with its immediate neighbor in the given direction.
    ///
    /// No-op when the key is absent or already at the boundary in that
    /// direction.
    pub fn move_in_rendering_order(&mut self, key: &str, shift: Shift) {
        let Some(idx) = self.order.iter().position(|k| k == key) else {
            return;
        };
        match shift {
            Shift::TowardFront if idx > 0 => self.order.swap(idx, idx - 1),
            Shift::TowardBack if idx + 1 < self.order.len() => self.order.swap(idx, idx + 1),
            _ => {}
        }
    }

    /// Moves `key` to the front or back of the rendering order.
    ///
    /// No-op when the key is absent.
    pub fn move_to_end_of_rendering_order(&mut self, key: &str, placement: Placement) {
        let Some(idx) = self.order.iter().position(|k| k == key) else {
            return;
        };
        self.order.remove(idx);
        match placement {
            Placement::Front => self.order.insert(0, key.to_owned()),
            Placement::Back => self.order.push(key.to_owned()),
        }
    }

    /// Computes the union extent over base or overlay layers.
    ///
    /// Actors whose [`ActorFlags::OVERLAY`] flag equals `overlay` contribute
    /// their normalized extent ([`Rect::abs`], so unordered corners and
    /// flipped per-actor extents aggregate correctly). Returns how many
    /// actors were considered together with their union bounding box; when
    /// the count is zero the box is [`Rect::ZERO`] and must not be trusted.
    #[must_use]
    pub fn extent(&self, overlay: bool) -> (usize, Rect) {
        let mut count = 0;
        let mut union = Rect::ZERO;

        for actor in self.actors.values() {
            if actor.flags().contains(ActorFlags::OVERLAY) != overlay {
                continue;
            }
            let extent = actor.extent().abs();
            union = if count == 0 { extent } else { union.union(extent) };
            count += 1;
        }

        if count == 0 { (0, Rect::ZERO) } else { (count, union) }
    }

    /// Calls `f` on every actor, in rendering order from back (bottommost)
    /// to front (topmost).
    ///
    /// This is the paint traversal: back-to-front iteration makes the front
    /// of the order the last layer drawn, and therefore the topmost.
    pub fn for_each_back_to_front<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut dyn Actor),
    {
        for key in self.order.iter().rev() {
            if let Some(actor) = self.actors.get_mut(key) {
                f(actor.as_mut());
            }
        }
    }
}
