//! Image Widget
//!
//! Load state, deferred-loading gate, placeholder selection, and the
//! style/attribute merge for a single render.

use crate::attrs::{Decoding, FetchPriority, ImgAttributes, Loading, PlaceholderLayer, RenderOutput};
use crate::binding::TargetBinding;
use crate::placeholder::{BlurhashDecoder, PlaceholderError};
use crate::props::{ImageProps, PlaceholderMode};
use imago_canvas::{PlaceholderSurface, SURFACE_SIZE};
use imago_observe::{
    InViewTracker, IntersectionEntry, IntersectionSource, ObserverOptions, TargetId,
};
use imago_srcset::{default_lqip_url, derive_aspect_style, derive_sizes, derive_source_set};
use imago_style::{props as css, Style};

/// Fade applied to the image and its placeholder on load completion.
const FADE_TRANSITION: &str = "opacity 0.3s ease";

/// Candidate width handed to the URL transform for the LQIP variant.
const LQIP_WIDTH: f64 = 16.0;

/// Load-completion payload handed to the caller's callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadEvent {
    /// Element the load completed on, when the host knows it.
    pub target: Option<TargetId>,
}

/// The responsive image widget.
///
/// Owns the load flag, the visibility tracker, the attach fan-out, and the
/// placeholder surface; `render` derives everything else from them.
pub struct Image {
    props: ImageProps,
    loaded: bool,
    tracker: InViewTracker,
    binding: TargetBinding,
    surface: PlaceholderSurface,
}

impl std::fmt::Debug for Image {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("props", &self.props)
            .field("loaded", &self.loaded)
            .field("tracker", &self.tracker)
            .field("binding", &self.binding)
            .field("surface_painted", &self.surface.is_painted())
            .finish()
    }
}

impl Image {
    /// Create a widget backed by the platform's intersection capability.
    /// Pass `None` in execution contexts without one; deferred loading
    /// then fails open and loads immediately.
    pub fn new(props: ImageProps, source: Option<Box<dyn IntersectionSource>>) -> Self {
        let tracker = InViewTracker::with_capability(ObserverOptions::default(), source);
        Self {
            props,
            loaded: false,
            tracker,
            binding: TargetBinding::new(),
            surface: PlaceholderSurface::new(),
        }
    }

    pub fn props(&self) -> &ImageProps {
        &self.props
    }

    /// Replace the configuration. Load state is per mount, not per
    /// configuration, so it is kept.
    pub fn set_props(&mut self, props: ImageProps) {
        self.props = props;
    }

    /// Has the underlying image finished its initial load.
    pub fn loaded(&self) -> bool {
        self.loaded
    }

    /// Visibility signal from the tracker.
    pub fn in_view(&self) -> bool {
        self.tracker.in_view()
    }

    /// The placeholder surface (painted by [`Image::sync_placeholder`]).
    pub fn placeholder_surface(&self) -> &PlaceholderSurface {
        &self.surface
    }

    /// Register an external subscriber for element attach/detach, so a
    /// caller-held reference observes the same element the tracker does.
    pub fn subscribe_target(&mut self, subscriber: impl FnMut(Option<TargetId>) + 'static) {
        self.binding.subscribe(subscriber);
    }

    /// Attach the widget to its host element (or detach with `None`).
    ///
    /// Binds the visibility tracker and notifies external subscribers.
    /// Detaching synchronously releases the observation.
    pub fn attach(&mut self, target: Option<TargetId>) {
        self.tracker.bind(target);
        self.binding.attach(target);
    }

    /// Feed an intersection callback from the host into the tracker.
    pub fn deliver(&mut self, entry: IntersectionEntry) {
        self.tracker.deliver(entry);
    }

    /// Handle the underlying element's load-completion signal.
    ///
    /// Sets the load flag exactly once (a second signal leaves state
    /// untouched) and invokes the caller's callback on every signal.
    pub fn notify_load(&mut self, event: LoadEvent) {
        if !self.loaded {
            tracing::debug!("image loaded: {}", self.props.src);
            self.loaded = true;
        }
        if let Some(on_load) = &mut self.props.on_load {
            on_load(&event);
        }
    }

    /// Decode and paint the blur-hash placeholder, if configured.
    ///
    /// Call at mount and whenever the placeholder mode or hash changes.
    /// Returns whether a preview is painted. A missing or empty hash
    /// degrades to no placeholder; decode failures propagate, since only
    /// the external decoder can judge hash well-formedness.
    pub fn sync_placeholder(
        &mut self,
        decoder: &dyn BlurhashDecoder,
    ) -> Result<bool, PlaceholderError> {
        match (self.props.placeholder, self.props.blurhash.as_deref()) {
            (PlaceholderMode::Blurhash, Some(hash)) if !hash.is_empty() => {
                let pixels = decoder.decode(hash, SURFACE_SIZE, SURFACE_SIZE)?;
                self.surface.put_pixels(&pixels)?;
                Ok(true)
            }
            _ => {
                self.surface.clear();
                Ok(false)
            }
        }
    }

    /// Produce the attributes and styles for the current state.
    pub fn render(&self) -> RenderOutput {
        let deferred = self.props.defer_until_in_view && !self.tracker.in_view();

        RenderOutput {
            wrapper_style: self.wrapper_style(),
            placeholder: self.placeholder_layer(),
            img: self.img_attributes(deferred),
            img_style: self.img_style(),
        }
    }

    /// Resolve the primary source URL (ignoring the deferred gate).
    fn resolved_src(&self) -> String {
        match &self.props.transform_url {
            Some(transform) => transform(&self.props.src, self.props.width),
            None => self.props.src.clone(),
        }
    }

    fn wrapper_style(&self) -> Style {
        let base = Style::new().with(css::POSITION, "relative");
        base.merge_over(&derive_aspect_style(
            self.props.width,
            self.props.height,
            &self.props.style,
        ))
    }

    fn img_attributes(&self, deferred: bool) -> ImgAttributes {
        let (src, srcset, sizes) = if deferred {
            tracing::debug!("source withheld until in view: {}", self.props.src);
            (None, None, None)
        } else {
            (
                Some(self.resolved_src()),
                derive_source_set(
                    self.props.breakpoints.as_ref(),
                    self.props.transform_url.as_deref(),
                    &self.props.src,
                ),
                derive_sizes(self.props.breakpoints.as_ref()),
            )
        };

        ImgAttributes {
            src,
            srcset,
            sizes,
            alt: self.props.alt.clone(),
            width: self.props.width,
            height: self.props.height,
            loading: if self.props.priority { Loading::Eager } else { Loading::Lazy },
            fetch_priority: self.props.priority.then_some(FetchPriority::High),
            decoding: Decoding::Async,
            extra: self.props.attributes.clone(),
        }
    }

    fn img_style(&self) -> Style {
        let mut style = Style::new()
            .with(css::WIDTH, "100%")
            .with(css::HEIGHT, "100%")
            .with(
                css::OBJECT_FIT,
                self.props.style.get(css::OBJECT_FIT).unwrap_or("cover"),
            )
            // Keep the image above the placeholder for the fade-in
            .with(css::POSITION, "relative")
            .with(css::Z_INDEX, "1");

        // Reserved declarations, always last and always winning
        style.set(css::OPACITY, if self.loaded { "1" } else { "0" });
        style.set(css::TRANSITION, FADE_TRANSITION);
        style
    }

    fn placeholder_layer(&self) -> Option<PlaceholderLayer> {
        match self.props.placeholder {
            PlaceholderMode::Blurhash => {
                let hash = self.props.blurhash.as_deref().unwrap_or("");
                if hash.is_empty() {
                    // Configuration inconsistency degrades, never errors
                    return None;
                }
                let style = self
                    .placeholder_base_style()
                    .with(css::WIDTH, "100%")
                    .with(css::HEIGHT, "100%")
                    .with(css::OBJECT_FIT, "cover")
                    .with(css::FILTER, "blur(2px)");
                Some(PlaceholderLayer::Canvas { style })
            }
            PlaceholderMode::Lqip => {
                let url = match &self.props.transform_url {
                    Some(transform) => transform(&self.props.src, Some(LQIP_WIDTH)),
                    None => default_lqip_url(&self.props.src),
                };
                let style = self
                    .placeholder_base_style()
                    .with(css::BACKGROUND_IMAGE, format!("url({url})"))
                    .with(css::BACKGROUND_SIZE, "cover")
                    .with(css::BACKGROUND_POSITION, "center")
                    .with(css::FILTER, "blur(4px)");
                Some(PlaceholderLayer::Background { url, style })
            }
            PlaceholderMode::None => None,
        }
    }

    /// Shared placeholder layer style: absolutely positioned over the
    /// image, fading out on load but staying mounted at opacity 0.
    fn placeholder_base_style(&self) -> Style {
        Style::new()
            .with(css::POSITION, "absolute")
            .with(css::INSET, "0")
            .with(css::TRANSITION, FADE_TRANSITION)
            .with(css::OPACITY, if self.loaded { "0" } else { "1" })
            .with(css::POINTER_EVENTS, "none")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn widget(props: ImageProps) -> Image {
        Image::new(props, None)
    }

    #[test]
    fn test_resolved_src_without_transform() {
        let image = widget(ImageProps::new("test.jpg", "x"));
        let out = image.render();
        assert_eq!(out.img.src.as_deref(), Some("test.jpg"));
    }

    #[test]
    fn test_resolved_src_with_transform() {
        let props = ImageProps::new("test.jpg", "x")
            .with_dimensions(640.0, 480.0)
            .with_transform_url(|src, w| format!("cdn/{src}?width={}", w.unwrap_or(0.0)));
        let image = widget(props);
        assert_eq!(image.render().img.src.as_deref(), Some("cdn/test.jpg?width=640"));
    }

    #[test]
    fn test_load_state_latches_once() {
        let calls = Rc::new(Cell::new(0));
        let sink = calls.clone();
        let props =
            ImageProps::new("a.jpg", "x").with_on_load(move |_| sink.set(sink.get() + 1));
        let mut image = widget(props);
        assert!(!image.loaded());

        image.notify_load(LoadEvent { target: None });
        assert!(image.loaded());
        assert_eq!(calls.get(), 1);

        // Second signal: state no-op, callback still fires
        image.notify_load(LoadEvent { target: None });
        assert!(image.loaded());
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_opacity_follows_load_state() {
        let mut image = widget(ImageProps::new("a.jpg", "x"));
        assert_eq!(image.render().img_style.get("opacity"), Some("0"));

        image.notify_load(LoadEvent { target: None });
        let style = image.render().img_style;
        assert_eq!(style.get("opacity"), Some("1"));
        assert_eq!(style.get("transition"), Some("opacity 0.3s ease"));
    }

    #[test]
    fn test_reserved_style_wins_over_caller() {
        let props = ImageProps::new("a.jpg", "x")
            .with_style(Style::new().with("opacity", "0.5").with("object-fit", "contain"));
        let image = widget(props);
        let style = image.render().img_style;
        // Caller object-fit is honored, caller opacity is not
        assert_eq!(style.get("object-fit"), Some("contain"));
        assert_eq!(style.get("opacity"), Some("0"));
    }

    #[test]
    fn test_wrapper_gets_aspect_and_caller_style() {
        let props = ImageProps::new("a.jpg", "x")
            .with_dimensions(16.0, 9.0)
            .with_style(Style::new().with("margin", "10px"));
        let image = widget(props);
        let wrapper = image.render().wrapper_style;
        assert_eq!(wrapper.get("position"), Some("relative"));
        assert_eq!(wrapper.get("aspect-ratio"), Some("16 / 9"));
        assert_eq!(wrapper.get("margin"), Some("10px"));
    }

    #[test]
    fn test_priority_hints() {
        let eager = widget(ImageProps::new("a.jpg", "x").with_priority(true));
        let out = eager.render();
        assert_eq!(out.img.loading, Loading::Eager);
        assert_eq!(out.img.fetch_priority, Some(FetchPriority::High));
        assert_eq!(out.img.decoding, Decoding::Async);

        let lazy = widget(ImageProps::new("a.jpg", "x"));
        let out = lazy.render();
        assert_eq!(out.img.loading, Loading::Lazy);
        assert_eq!(out.img.fetch_priority, None);
    }

    #[test]
    fn test_lqip_layer_urls() {
        let image = widget(ImageProps::new("a.jpg", "x").with_placeholder(PlaceholderMode::Lqip));
        match image.render().placeholder {
            Some(PlaceholderLayer::Background { url, style }) => {
                assert_eq!(url, "a.jpg?lqip");
                assert_eq!(style.get("background-image"), Some("url(a.jpg?lqip)"));
                assert_eq!(style.get("opacity"), Some("1"));
            }
            other => panic!("expected background layer, got {other:?}"),
        }

        let transformed = widget(
            ImageProps::new("a.jpg", "x")
                .with_placeholder(PlaceholderMode::Lqip)
                .with_transform_url(|src, w| format!("{src}?tiny={}", w.unwrap_or(0.0))),
        );
        match transformed.render().placeholder {
            Some(PlaceholderLayer::Background { url, .. }) => assert_eq!(url, "a.jpg?tiny=16"),
            other => panic!("expected background layer, got {other:?}"),
        }
    }

    #[test]
    fn test_placeholder_stays_mounted_after_load() {
        let mut image = widget(
            ImageProps::new("a.jpg", "x")
                .with_placeholder(PlaceholderMode::Blurhash)
                .with_blurhash("LEHV6nWB2yk8"),
        );
        image.notify_load(LoadEvent { target: None });

        let layer = image.render().placeholder.expect("layer stays mounted");
        assert_eq!(layer.style().get("opacity"), Some("0"));
    }

    #[test]
    fn test_empty_blurhash_renders_no_placeholder() {
        let image = widget(
            ImageProps::new("a.jpg", "x")
                .with_placeholder(PlaceholderMode::Blurhash)
                .with_blurhash(""),
        );
        assert_eq!(image.render().placeholder, None);
    }

    #[test]
    fn test_missing_blurhash_renders_no_placeholder() {
        let image =
            widget(ImageProps::new("a.jpg", "x").with_placeholder(PlaceholderMode::Blurhash));
        assert_eq!(image.render().placeholder, None);
    }

    #[test]
    fn test_sync_placeholder_paints_surface() {
        let mut image = widget(
            ImageProps::new("a.jpg", "x")
                .with_placeholder(PlaceholderMode::Blurhash)
                .with_blurhash("LEHV6nWB2yk8"),
        );
        let decoder = |_: &str, w: u32, h: u32| -> Result<Vec<u8>, crate::DecodeError> {
            Ok(vec![64; (w * h * 4) as usize])
        };
        assert!(image.sync_placeholder(&decoder).unwrap());
        assert!(image.placeholder_surface().is_painted());
        assert_eq!(image.placeholder_surface().image_data().pixel(0, 0), Some([64; 4]));
    }

    #[test]
    fn test_sync_placeholder_degrades_without_hash() {
        let mut image =
            widget(ImageProps::new("a.jpg", "x").with_placeholder(PlaceholderMode::Blurhash));
        let decoder = |_: &str, _: u32, _: u32| -> Result<Vec<u8>, crate::DecodeError> {
            panic!("decoder must not run without a hash")
        };
        assert!(!image.sync_placeholder(&decoder).unwrap());
        assert!(!image.placeholder_surface().is_painted());
    }

    #[test]
    fn test_sync_placeholder_propagates_decode_failure() {
        let mut image = widget(
            ImageProps::new("a.jpg", "x")
                .with_placeholder(PlaceholderMode::Blurhash)
                .with_blurhash("not-a-hash"),
        );
        let decoder = |_: &str, _: u32, _: u32| -> Result<Vec<u8>, crate::DecodeError> {
            Err(crate::DecodeError("malformed hash".to_string()))
        };
        let err = image.sync_placeholder(&decoder).unwrap_err();
        assert!(matches!(err, PlaceholderError::Decode(_)));
    }

    #[test]
    fn test_sync_placeholder_rejects_short_buffer() {
        let mut image = widget(
            ImageProps::new("a.jpg", "x")
                .with_placeholder(PlaceholderMode::Blurhash)
                .with_blurhash("LEHV6nWB2yk8"),
        );
        let decoder =
            |_: &str, _: u32, _: u32| -> Result<Vec<u8>, crate::DecodeError> { Ok(vec![0; 5]) };
        let err = image.sync_placeholder(&decoder).unwrap_err();
        assert!(matches!(err, PlaceholderError::Surface(_)));
    }
}
