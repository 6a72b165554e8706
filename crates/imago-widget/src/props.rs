//! Widget Configuration
//!
//! The construction-time options of the image widget.

use crate::widget::LoadEvent;
use imago_srcset::{Breakpoints, UrlTransform};
use imago_style::Style;
use serde::{Deserialize, Serialize};

/// Placeholder rendering mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderMode {
    /// Paint a decoded blur-hash preview onto the placeholder surface.
    Blurhash,
    /// Show a low-quality image variant as a background layer.
    Lqip,
    /// No placeholder.
    #[default]
    None,
}

/// Image widget configuration.
///
/// `src` and `alt` are required; everything else defaults off. Builder
/// setters cover the optional surface.
pub struct ImageProps {
    pub src: String,
    pub alt: String,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub breakpoints: Option<Breakpoints>,
    pub placeholder: PlaceholderMode,
    /// Blur-hash string; meaningful only in `Blurhash` mode. An empty
    /// string degrades to no placeholder.
    pub blurhash: Option<String>,
    /// Eager-load hint: `loading="eager"` plus a high fetch-priority hint.
    pub priority: bool,
    /// CDN rewrite callback; absent means the default `?w=` / `?lqip` rules.
    pub transform_url: Option<Box<UrlTransform>>,
    /// Withhold the source until the element is near the viewport.
    pub defer_until_in_view: bool,
    /// Caller style overrides. `object-fit` is recognized by the widget;
    /// the rest lands on the wrapper verbatim.
    pub style: Style,
    /// Pass-through attributes for the underlying image element.
    pub attributes: Vec<(String, String)>,
    /// Invoked on every load-completion signal.
    pub on_load: Option<Box<dyn FnMut(&LoadEvent)>>,
}

impl ImageProps {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
            width: None,
            height: None,
            breakpoints: None,
            placeholder: PlaceholderMode::None,
            blurhash: None,
            priority: false,
            transform_url: None,
            defer_until_in_view: false,
            style: Style::new(),
            attributes: Vec::new(),
            on_load: None,
        }
    }

    pub fn with_dimensions(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_breakpoints(mut self, breakpoints: Breakpoints) -> Self {
        self.breakpoints = Some(breakpoints);
        self
    }

    pub fn with_placeholder(mut self, mode: PlaceholderMode) -> Self {
        self.placeholder = mode;
        self
    }

    pub fn with_blurhash(mut self, hash: impl Into<String>) -> Self {
        self.blurhash = Some(hash.into());
        self
    }

    pub fn with_priority(mut self, priority: bool) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_transform_url(
        mut self,
        transform: impl Fn(&str, Option<f64>) -> String + 'static,
    ) -> Self {
        self.transform_url = Some(Box::new(transform));
        self
    }

    pub fn with_defer_until_in_view(mut self, defer: bool) -> Self {
        self.defer_until_in_view = defer;
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_on_load(mut self, callback: impl FnMut(&LoadEvent) + 'static) -> Self {
        self.on_load = Some(Box::new(callback));
        self
    }
}

impl std::fmt::Debug for ImageProps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageProps")
            .field("src", &self.src)
            .field("alt", &self.alt)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("breakpoints", &self.breakpoints)
            .field("placeholder", &self.placeholder)
            .field("blurhash", &self.blurhash)
            .field("priority", &self.priority)
            .field("has_transform_url", &self.transform_url.is_some())
            .field("defer_until_in_view", &self.defer_until_in_view)
            .field("style", &self.style)
            .field("attributes", &self.attributes)
            .field("has_on_load", &self.on_load.is_some())
            .finish()
    }
}
