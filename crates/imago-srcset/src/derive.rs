//! Attribute Derivation
//!
//! Pure functions building `srcset` / `sizes` strings and aspect-ratio
//! style output from a breakpoint table.

use crate::{BreakpointValue, Breakpoints};
use imago_style::{props, Style};

/// URL rewrite callback: `(source, candidate_width) -> rewritten source`.
///
/// The width is the srcset candidate width, the caller-declared width for
/// the base source, or 16 for the low-quality placeholder variant.
pub type UrlTransform = dyn Fn(&str, Option<f64>) -> String;

/// Default rewrite when no transform is supplied: append `?w=<width>`.
pub fn default_width_url(src: &str, width: u32) -> String {
    format!("{src}?w={width}")
}

/// Default low-quality placeholder rewrite: append `?lqip`.
pub fn default_lqip_url(src: &str) -> String {
    format!("{src}?lqip")
}

/// Build a `srcset` attribute value from a breakpoint table.
///
/// Entries are emitted in ascending key order as `"<url> <width>w"`,
/// comma-joined. Values that do not coerce to a pixel width are dropped
/// silently; a dropped entry never blocks the others. An empty table yields
/// an empty string, an absent table yields `None`.
pub fn derive_source_set(
    breakpoints: Option<&Breakpoints>,
    transform: Option<&UrlTransform>,
    src: &str,
) -> Option<String> {
    let breakpoints = breakpoints?;
    let candidates: Vec<String> = breakpoints
        .sorted_entries()
        .iter()
        .filter_map(|(_, value)| value.as_width())
        .map(|width| {
            let url = match transform {
                Some(f) => f(src, Some(f64::from(width))),
                None => default_width_url(src, width),
            };
            format!("{url} {width}w")
        })
        .collect();
    Some(candidates.join(", "))
}

/// Build a `sizes` attribute value from a breakpoint table.
///
/// Entries are emitted in ascending key order as
/// `"(min-width: <key>px) <value>"`, comma-joined. Numeric values get a
/// `px` suffix; CSS length strings pass through verbatim — unlike
/// `derive_source_set`, nothing is ever dropped, since `sizes` accepts
/// arbitrary CSS lengths.
pub fn derive_sizes(breakpoints: Option<&Breakpoints>) -> Option<String> {
    let breakpoints = breakpoints?;
    let entries: Vec<String> = breakpoints
        .sorted_entries()
        .iter()
        .map(|(key, value)| {
            let length = match value {
                BreakpointValue::Width(w) => format!("{w}px"),
                BreakpointValue::Length(s) => s.clone(),
            };
            format!("(min-width: {key}px) {length}")
        })
        .collect();
    Some(entries.join(", "))
}

/// Merge an `aspect-ratio` declaration into a base style.
///
/// Emitted only when both dimensions are known and the width is nonzero
/// (a zero width would make a degenerate ratio; a zero height is allowed
/// and yields `"<w> / 0"`). The base style wins if it already declares an
/// aspect ratio. Otherwise the base style is returned unchanged.
pub fn derive_aspect_style(width: Option<f64>, height: Option<f64>, base: &Style) -> Style {
    match (width, height) {
        (Some(w), Some(h)) if w != 0.0 => {
            let mut style = base.clone();
            style.set_if_absent(props::ASPECT_RATIO, format!("{w} / {h}"));
            style
        }
        _ => base.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Breakpoints {
        Breakpoints::new()
            .with(320, 320u32)
            .with(768, 768u32)
            .with(1024, 1024u32)
    }

    #[test]
    fn test_source_set_default_transform() {
        let srcset = derive_source_set(Some(&table()), None, "test.jpg").unwrap();
        assert_eq!(
            srcset,
            "test.jpg?w=320 320w, test.jpg?w=768 768w, test.jpg?w=1024 1024w"
        );
    }

    #[test]
    fn test_source_set_sorted_regardless_of_insertion_order() {
        let table = Breakpoints::new()
            .with(1024, 1024u32)
            .with(320, 320u32)
            .with(768, 768u32);
        let srcset = derive_source_set(Some(&table), None, "a.png").unwrap();
        assert_eq!(srcset, "a.png?w=320 320w, a.png?w=768 768w, a.png?w=1024 1024w");
    }

    #[test]
    fn test_source_set_custom_transform() {
        let transform =
            |src: &str, w: Option<f64>| format!("https://cdn/{src}?width={}", w.unwrap_or(0.0));
        let table = Breakpoints::new().with(320, 320u32);
        let srcset = derive_source_set(Some(&table), Some(&transform), "test.jpg").unwrap();
        assert_eq!(srcset, "https://cdn/test.jpg?width=320 320w");
    }

    #[test]
    fn test_source_set_drops_non_numeric_values() {
        let table = Breakpoints::new()
            .with(320, 320u32)
            .with(768, "auto")
            .with(1024, 1024u32);
        let srcset = derive_source_set(Some(&table), None, "x.jpg").unwrap();
        assert_eq!(srcset, "x.jpg?w=320 320w, x.jpg?w=1024 1024w");
    }

    #[test]
    fn test_source_set_empty_and_absent() {
        assert_eq!(
            derive_source_set(Some(&Breakpoints::new()), None, "x.jpg"),
            Some(String::new())
        );
        assert_eq!(derive_source_set(None, None, "x.jpg"), None);
    }

    #[test]
    fn test_sizes_numeric_and_verbatim() {
        let table = Breakpoints::new()
            .with(320, 320u32)
            .with(768, "50vw");
        let sizes = derive_sizes(Some(&table)).unwrap();
        assert_eq!(sizes, "(min-width: 320px) 320px, (min-width: 768px) 50vw");
    }

    #[test]
    fn test_sizes_never_drops_entries() {
        let table = Breakpoints::new()
            .with(320, "auto")
            .with(768, 768u32);
        let sizes = derive_sizes(Some(&table)).unwrap();
        assert_eq!(sizes, "(min-width: 320px) auto, (min-width: 768px) 768px");
    }

    #[test]
    fn test_sizes_empty_and_absent() {
        assert_eq!(derive_sizes(Some(&Breakpoints::new())), Some(String::new()));
        assert_eq!(derive_sizes(None), None);
    }

    #[test]
    fn test_aspect_style_merges_with_base() {
        let base = Style::new().with("margin", "10px");
        let style = derive_aspect_style(Some(16.0), Some(9.0), &base);
        assert_eq!(style.get("aspect-ratio"), Some("16 / 9"));
        assert_eq!(style.get("margin"), Some("10px"));
    }

    #[test]
    fn test_aspect_style_preserves_decimals() {
        let style = derive_aspect_style(Some(1.85), Some(1.0), &Style::new());
        assert_eq!(style.get("aspect-ratio"), Some("1.85 / 1"));
    }

    #[test]
    fn test_aspect_style_base_wins_on_collision() {
        let base = Style::new().with("aspect-ratio", "4 / 3");
        let style = derive_aspect_style(Some(16.0), Some(9.0), &base);
        assert_eq!(style.get("aspect-ratio"), Some("4 / 3"));
    }

    #[test]
    fn test_aspect_style_zero_width_suppressed() {
        let base = Style::new().with("margin", "10px");
        let style = derive_aspect_style(Some(0.0), Some(9.0), &base);
        assert_eq!(style, base);
    }

    #[test]
    fn test_aspect_style_zero_height_allowed() {
        let style = derive_aspect_style(Some(16.0), Some(0.0), &Style::new());
        assert_eq!(style.get("aspect-ratio"), Some("16 / 0"));
    }

    #[test]
    fn test_aspect_style_missing_dimension() {
        let base = Style::new().with("margin", "10px");
        assert_eq!(derive_aspect_style(Some(16.0), None, &base), base);
        assert_eq!(derive_aspect_style(None, Some(9.0), &base), base);
        assert_eq!(derive_aspect_style(None, None, &base), base);
    }

    #[test]
    fn test_derivations_are_idempotent() {
        let table = Breakpoints::new().with(320, 320u32).with(768, "50vw");
        assert_eq!(
            derive_source_set(Some(&table), None, "i.jpg"),
            derive_source_set(Some(&table), None, "i.jpg")
        );
        assert_eq!(derive_sizes(Some(&table)), derive_sizes(Some(&table)));
    }
}
