//! Viewport Visibility
//!
//! Host-agnostic wrapper over the platform's intersection-observation
//! capability: a small bind/unbind state machine that turns intersection
//! callbacks into a "has entered the viewport" signal.

use serde::{Deserialize, Serialize};

mod tracker;

pub use tracker::InViewTracker;

/// Default observation margin: start loading 200px before the element
/// scrolls into view.
pub const DEFAULT_ROOT_MARGIN: &str = "0px 0px 200px 0px";

/// Opaque handle identifying a host element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetId(pub u32);

/// Opaque handle for one live observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObservationId(pub u64);

/// One intersection callback payload.
///
/// Platform implementations vary in which field they populate, so either
/// signal counts as "visible".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub is_intersecting: bool,
    pub intersection_ratio: f64,
}

impl IntersectionEntry {
    /// Entry reporting full intersection.
    pub fn intersecting() -> Self {
        Self { is_intersecting: true, intersection_ratio: 1.0 }
    }

    /// Entry reporting no intersection.
    pub fn outside() -> Self {
        Self { is_intersecting: false, intersection_ratio: 0.0 }
    }

    /// Either signal is sufficient.
    pub fn is_visible(&self) -> bool {
        self.is_intersecting || self.intersection_ratio > 0.0
    }
}

/// Intersection threshold: a single ratio or a list of step ratios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Threshold {
    Ratio(f64),
    Steps(Vec<f64>),
}

impl Default for Threshold {
    fn default() -> Self {
        Self::Ratio(0.0)
    }
}

/// Observation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObserverOptions {
    /// Containing region to observe against; `None` is the viewport.
    pub root: Option<TargetId>,
    /// CSS margin syntax expanding the observation region.
    pub root_margin: String,
    pub threshold: Threshold,
    /// When true, the first visible entry latches the signal and tears the
    /// observation down; the flag never resets.
    pub once: bool,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            root: None,
            root_margin: DEFAULT_ROOT_MARGIN.to_string(),
            threshold: Threshold::default(),
            once: true,
        }
    }
}

impl ObserverOptions {
    pub fn with_root(mut self, root: TargetId) -> Self {
        self.root = Some(root);
        self
    }

    pub fn with_root_margin(mut self, margin: &str) -> Self {
        self.root_margin = margin.to_string();
        self
    }

    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }
}

/// The platform's intersection-observation capability.
///
/// Hosts adapt their observer primitive behind this trait; entries flow
/// back through [`InViewTracker::deliver`]. Implementations must stop
/// delivering entries for an observation once it is disconnected.
pub trait IntersectionSource {
    /// Start observing a target. Returns the handle for teardown.
    fn observe(&mut self, target: TargetId, options: &ObserverOptions) -> ObservationId;

    /// Stop a previously started observation. Must be idempotent.
    fn disconnect(&mut self, observation: ObservationId);
}
