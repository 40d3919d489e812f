//! Resource kinds stored by the hatchery
//!
//! Three consumables are tracked: fertilizer (litres), feed (kg) and salt
//! (kg). Every per-kind table in the crate is a [`PerResource`], and every
//! loop over kinds uses [`ResourceKind::ALL`] so checks, reports and billing
//! always visit kinds in the same order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

/// A consumable resource kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Fertilizer,
    Feed,
    Salt,
}

impl ResourceKind {
    /// All kinds in canonical order
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Fertilizer,
        ResourceKind::Feed,
        ResourceKind::Salt,
    ];

    /// Lowercase name
    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::Fertilizer => "fertilizer",
            ResourceKind::Feed => "feed",
            ResourceKind::Salt => "salt",
        }
    }

    /// Unit that stock of this kind is measured in
    pub fn unit(self) -> &'static str {
        match self {
            ResourceKind::Fertilizer => "L",
            ResourceKind::Feed | ResourceKind::Salt => "kg",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per resource kind
///
/// # Example
/// ```
/// use hatchery_simulator_core::{PerResource, ResourceKind};
///
/// let mut stock = PerResource::new(20.0, 400.0, 200.0);
/// stock[ResourceKind::Feed] -= 50.0;
/// assert_eq!(stock[ResourceKind::Feed], 350.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerResource<T> {
    pub fertilizer: T,
    pub feed: T,
    pub salt: T,
}

impl<T> PerResource<T> {
    pub const fn new(fertilizer: T, feed: T, salt: T) -> Self {
        Self {
            fertilizer,
            feed,
            salt,
        }
    }

    /// Build a table by evaluating `f` for each kind
    pub fn from_fn(mut f: impl FnMut(ResourceKind) -> T) -> Self {
        Self {
            fertilizer: f(ResourceKind::Fertilizer),
            feed: f(ResourceKind::Feed),
            salt: f(ResourceKind::Salt),
        }
    }

    /// Iterate `(kind, &value)` in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, &T)> {
        ResourceKind::ALL.into_iter().map(move |kind| (kind, &self[kind]))
    }
}

impl<T: Copy> PerResource<T> {
    /// Same value for every kind
    pub const fn splat(value: T) -> Self {
        Self {
            fertilizer: value,
            feed: value,
            salt: value,
        }
    }
}

impl PerResource<i64> {
    /// Sum across kinds
    pub fn total(&self) -> i64 {
        self.fertilizer + self.feed + self.salt
    }
}

impl<T> Index<ResourceKind> for PerResource<T> {
    type Output = T;

    fn index(&self, kind: ResourceKind) -> &T {
        match kind {
            ResourceKind::Fertilizer => &self.fertilizer,
            ResourceKind::Feed => &self.feed,
            ResourceKind::Salt => &self.salt,
        }
    }
}

impl<T> IndexMut<ResourceKind> for PerResource<T> {
    fn index_mut(&mut self, kind: ResourceKind) -> &mut T {
        match kind {
            ResourceKind::Fertilizer => &mut self.fertilizer,
            ResourceKind::Feed => &mut self.feed,
            ResourceKind::Salt => &mut self.salt,
        }
    }
}
