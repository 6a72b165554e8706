//! In-View Tracker
//!
//! Two-state bind machine over an [`IntersectionSource`].

use crate::{IntersectionEntry, IntersectionSource, ObservationId, ObserverOptions, TargetId};

/// Binding state of a tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Binding {
    #[default]
    Unbound,
    Bound {
        target: TargetId,
        /// Live observation handle; `None` once consumed (`once` latched)
        /// or when no capability is available.
        observation: Option<ObservationId>,
    },
}

/// Tracks whether one bound element has entered (or is near) the viewport.
///
/// Owns at most one live observation at any time: rebinding tears down the
/// previous observation before the new one is established, and dropping
/// the tracker releases it. Without a capability the tracker fails open
/// and reports the element visible as soon as it is bound.
pub struct InViewTracker {
    options: ObserverOptions,
    source: Option<Box<dyn IntersectionSource>>,
    binding: Binding,
    in_view: bool,
}

impl std::fmt::Debug for InViewTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InViewTracker")
            .field("options", &self.options)
            .field("has_source", &self.source.is_some())
            .field("binding", &self.binding)
            .field("in_view", &self.in_view)
            .finish()
    }
}

impl InViewTracker {
    /// Create a tracker backed by a platform capability.
    pub fn new(options: ObserverOptions, source: Box<dyn IntersectionSource>) -> Self {
        Self::with_capability(options, Some(source))
    }

    /// Create a tracker with no observation capability (non-browser
    /// execution context). Reports visible on bind.
    pub fn without_source(options: ObserverOptions) -> Self {
        Self::with_capability(options, None)
    }

    /// Create a tracker with an optional capability.
    pub fn with_capability(
        options: ObserverOptions,
        source: Option<Box<dyn IntersectionSource>>,
    ) -> Self {
        Self {
            options,
            source,
            binding: Binding::Unbound,
            in_view: false,
        }
    }

    /// Current visibility signal.
    pub fn in_view(&self) -> bool {
        self.in_view
    }

    /// True while a target is bound.
    pub fn is_bound(&self) -> bool {
        self.binding != Binding::Unbound
    }

    /// Target currently bound, if any.
    pub fn bound_target(&self) -> Option<TargetId> {
        match self.binding {
            Binding::Bound { target, .. } => Some(target),
            Binding::Unbound => None,
        }
    }

    /// Observation configuration.
    pub fn options(&self) -> &ObserverOptions {
        &self.options
    }

    /// Bind to a target, or unbind with `None`.
    ///
    /// Any existing observation is torn down first, so rapid target changes
    /// never leave more than one observation live. Unbinding when nothing
    /// is bound is a no-op.
    pub fn bind(&mut self, target: Option<TargetId>) {
        self.teardown();

        let Some(target) = target else {
            tracing::debug!("tracker unbound");
            return;
        };

        match &mut self.source {
            Some(source) => {
                let observation = source.observe(target, &self.options);
                tracing::debug!("tracker bound to {:?} as {:?}", target, observation);
                self.binding = Binding::Bound { target, observation: Some(observation) };
            }
            None => {
                // Capability missing: fail open, assume visible
                tracing::debug!("no intersection capability for {:?}, assuming visible", target);
                self.in_view = true;
                self.binding = Binding::Bound { target, observation: None };
            }
        }
    }

    /// Feed one intersection callback into the tracker.
    ///
    /// Entries arriving while unbound, or after a `once` observation has
    /// latched, are ignored.
    pub fn deliver(&mut self, entry: IntersectionEntry) {
        let Binding::Bound { observation, .. } = &mut self.binding else {
            return;
        };
        let Some(live) = *observation else {
            return;
        };

        if entry.is_visible() {
            if !self.in_view {
                tracing::debug!("target entered viewport");
            }
            self.in_view = true;
            if self.options.once {
                if let Some(source) = &mut self.source {
                    source.disconnect(live);
                }
                *observation = None;
            }
        } else if !self.options.once {
            if self.in_view {
                tracing::debug!("target left viewport");
            }
            self.in_view = false;
        }
    }

    /// Disconnect the live observation, if any, and return to `Unbound`.
    fn teardown(&mut self) {
        if let Binding::Bound { observation: Some(live), .. } = self.binding {
            if let Some(source) = &mut self.source {
                source.disconnect(live);
            }
        }
        self.binding = Binding::Unbound;
    }
}

impl Drop for InViewTracker {
    fn drop(&mut self) {
        self.teardown();
    }
}
