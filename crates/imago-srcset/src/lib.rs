//! Responsive Image Attributes
//!
//! Breakpoint tables and the pure derivations that turn them into
//! `srcset`, `sizes`, and aspect-ratio style output.

mod breakpoints;
mod derive;

pub use breakpoints::{Breakpoints, BreakpointValue};
pub use derive::{
    default_lqip_url, default_width_url, derive_aspect_style, derive_sizes, derive_source_set,
    UrlTransform,
};
