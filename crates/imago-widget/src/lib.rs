//! Responsive Image Widget
//!
//! Composes the visibility tracker and the responsive-attribute
//! derivations into one render contract: given the configuration and the
//! current load/visibility state, emit the attributes, styles, and
//! placeholder layer for a single render.

mod attrs;
mod binding;
mod placeholder;
mod props;
mod widget;

pub use attrs::{Decoding, FetchPriority, ImgAttributes, Loading, PlaceholderLayer, RenderOutput};
pub use binding::TargetBinding;
pub use placeholder::{BlurhashDecoder, DecodeError, PlaceholderError};
pub use props::{ImageProps, PlaceholderMode};
pub use widget::{Image, LoadEvent};

pub use imago_canvas::{PlaceholderSurface, SURFACE_SIZE};
pub use imago_observe::{
    InViewTracker, IntersectionEntry, IntersectionSource, ObservationId, ObserverOptions,
    TargetId, Threshold,
};
pub use imago_srcset::{BreakpointValue, Breakpoints, UrlTransform};
pub use imago_style::Style;
