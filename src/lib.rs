//! lucide-svg - Lucide icons for server-side templates
//!
//! Icons are read from a zip archive of `<name>.svg` entries (a bundled
//! default, or the file named by `LUCIDE_ICONS_ZIP_PATH`), parsed once per
//! name, and rendered as `<svg>` markup with caller attributes merged into
//! the root element.
//!
//! The bundled archive carries a small set of common icons (arrows,
//! chevrons, `check`, `x`, `plus`, `menu`, `alert-triangle` and friends).
//! Run `lucide-svg update -o lucide.zip` and point `LUCIDE_ICONS_ZIP_PATH`
//! at the result to serve the full Lucide release.
//!
//! Templates reach icons through [`template::handlebars`] or
//! [`template::jinja`].
//!
//! # Example
//!
//! ```rust
//! use lucide_svg::{render, IconStore, RenderAttributes};
//!
//! let store = IconStore::bundled();
//! let attrs = RenderAttributes::new()
//!     .with_size(Some(48))
//!     .with("data_test", "a < 2");
//!
//! let svg = render(&store, "a-arrow-down", &attrs).unwrap();
//! assert!(svg.starts_with("<svg"));
//! assert!(svg.contains(r#"width="48""#));
//! assert!(svg.contains(r#"data-test="a &lt; 2""#));
//! ```

pub mod archive;
pub mod config;
pub mod document;
pub mod error;
pub mod fetch;
pub mod renderer;
pub mod store;
pub mod template;

pub use archive::{ArchiveSource, IconArchive};
pub use config::{ConfigError, IconConfig};
pub use document::IconDocument;
pub use error::IconError;
pub use renderer::{render, render_document, AttrValue, RenderAttributes};
pub use store::IconStore;
pub use template::{IconTemplate, Markup};

/// Render an icon through the process-wide template
///
/// Never fails: unknown icons degrade to the fallback icon, then to a text
/// placeholder.
///
/// # Example
///
/// ```rust
/// use lucide_svg::{lucide, RenderAttributes};
///
/// let markup = lucide("hoome", &RenderAttributes::new());
/// assert!(markup.as_str().starts_with("<svg") || markup.as_str().starts_with("<span"));
/// ```
pub fn lucide(name: &str, attrs: &RenderAttributes) -> Markup {
    IconTemplate::global().render(name, attrs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_bundled_icon() {
        let store = IconStore::bundled();
        let svg = render(&store, "a-arrow-down", &RenderAttributes::new()).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_render_stroke_linecap() {
        let store = IconStore::bundled();
        let attrs = RenderAttributes::new().with("stroke_linecap", "butt");
        let svg = render(&store, "a-arrow-down", &attrs).unwrap();
        assert!(svg.contains(r#"stroke-linecap="butt""#));
        assert!(!svg.contains(r#"stroke-linecap="round""#));
    }

    #[test]
    fn test_render_size_none() {
        let store = IconStore::bundled();
        let svg = render(&store, "a-arrow-down", &RenderAttributes::new().with_size(None)).unwrap();
        assert!(!svg.contains(" width="));
        assert!(!svg.contains(" height="));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_render_unknown_icon() {
        let store = IconStore::bundled();
        let result = render(&store, "hoome", &RenderAttributes::new());
        assert!(matches!(result, Err(IconError::NotFound(_))));
    }
}
