//! Render Output
//!
//! The attribute and style sets one render of the widget produces.

use imago_style::Style;

/// `loading` attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loading {
    Eager,
    Lazy,
}

impl Loading {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eager => "eager",
            Self::Lazy => "lazy",
        }
    }
}

/// `fetchpriority` attribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPriority {
    High,
    Low,
    Auto,
}

impl FetchPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
            Self::Auto => "auto",
        }
    }
}

/// `decoding` attribute values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Decoding {
    #[default]
    Async,
    Sync,
    Auto,
}

impl Decoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Async => "async",
            Self::Sync => "sync",
            Self::Auto => "auto",
        }
    }
}

/// Attributes for the underlying image element.
///
/// `src`, `srcset`, and `sizes` are optional: all three are withheld while
/// deferred loading is waiting on visibility, so the element issues no
/// request.
#[derive(Debug, Clone, PartialEq)]
pub struct ImgAttributes {
    pub src: Option<String>,
    pub srcset: Option<String>,
    pub sizes: Option<String>,
    pub alt: String,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub loading: Loading,
    pub fetch_priority: Option<FetchPriority>,
    pub decoding: Decoding,
    /// Caller pass-through attributes, in caller order.
    pub extra: Vec<(String, String)>,
}

impl ImgAttributes {
    /// Flatten into attribute name/value pairs for hosts that consume a
    /// flat list. Absent optional attributes are omitted entirely.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(src) = &self.src {
            pairs.push(("src".to_string(), src.clone()));
        }
        pairs.push(("alt".to_string(), self.alt.clone()));
        if let Some(w) = self.width {
            pairs.push(("width".to_string(), format!("{w}")));
        }
        if let Some(h) = self.height {
            pairs.push(("height".to_string(), format!("{h}")));
        }
        if let Some(srcset) = &self.srcset {
            pairs.push(("srcset".to_string(), srcset.clone()));
        }
        if let Some(sizes) = &self.sizes {
            pairs.push(("sizes".to_string(), sizes.clone()));
        }
        pairs.push(("loading".to_string(), self.loading.as_str().to_string()));
        if let Some(fp) = self.fetch_priority {
            pairs.push(("fetchpriority".to_string(), fp.as_str().to_string()));
        }
        pairs.push(("decoding".to_string(), self.decoding.as_str().to_string()));
        pairs.extend(self.extra.iter().cloned());
        pairs
    }
}

/// The placeholder visual for the current render.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceholderLayer {
    /// Display the widget's 32x32 placeholder surface, scaled to cover.
    Canvas { style: Style },
    /// Display a low-quality image variant as a background layer.
    Background { url: String, style: Style },
}

impl PlaceholderLayer {
    pub fn style(&self) -> &Style {
        match self {
            Self::Canvas { style } => style,
            Self::Background { style, .. } => style,
        }
    }
}

/// Everything one render of the widget produces.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOutput {
    /// Wrapper element style: relative positioning, aspect ratio, caller
    /// overrides.
    pub wrapper_style: Style,
    /// Placeholder layer, if the configuration and state call for one.
    /// Stays present (faded to opacity 0) after load.
    pub placeholder: Option<PlaceholderLayer>,
    /// Attributes for the image element.
    pub img: ImgAttributes,
    /// Style for the image element.
    pub img_style: Style,
}
