//! Template call surface for icons
//!
//! Rendering an icon from a template never fails. The chain is:
//!
//! 1. render the requested icon
//! 2. render the fallback icon (`alert-triangle` by default) with the same
//!    attributes
//! 3. emit `<span class='lucide-fallback'>NAME</span>` with the name escaped
//!
//! # Example
//!
//! ```rust
//! use lucide_svg::template::lucide;
//! use lucide_svg::{IconStore, RenderAttributes};
//!
//! let store = IconStore::bundled();
//! let attrs = RenderAttributes::new().with("class", "h-4 w-4");
//!
//! let markup = lucide(&store, "a-arrow-down", &attrs);
//! assert!(markup.as_str().starts_with("<svg"));
//! ```

pub mod handlebars;
pub mod jinja;

use std::fmt;
use std::sync::{Arc, OnceLock};

use quick_xml::escape::escape;

use crate::config::{IconConfig, DEFAULT_FALLBACK_ICON};
use crate::error::IconError;
use crate::renderer::{render, RenderAttributes};
use crate::store::IconStore;

pub use self::handlebars::{register_helpers, LucideHelper, HELPER_NAME};
pub use self::jinja::{add_to_environment, FUNCTION_NAME};

/// Inert markup, safe to embed without further escaping
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Markup(String);

impl Markup {
    /// Wrap a string the caller vouches for
    pub fn from_trusted(markup: impl Into<String>) -> Self {
        Markup(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Markup {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Markup> for String {
    fn from(markup: Markup) -> Self {
        markup.0
    }
}

/// Render an icon for a template with the default fallback icon
pub fn lucide(store: &IconStore, name: &str, attrs: &RenderAttributes) -> Markup {
    lucide_with_fallback(store, name, attrs, DEFAULT_FALLBACK_ICON)
}

/// Render an icon for a template, degrading to `fallback_icon` and then to
/// a text placeholder
pub fn lucide_with_fallback(
    store: &IconStore,
    name: &str,
    attrs: &RenderAttributes,
    fallback_icon: &str,
) -> Markup {
    render_with_fallback(name, fallback_icon, |icon| render(store, icon, attrs))
}

/// Run the fallback chain over any render function
pub fn render_with_fallback<F>(name: &str, fallback_icon: &str, mut render: F) -> Markup
where
    F: FnMut(&str) -> Result<String, IconError>,
{
    match render(name) {
        Ok(svg) => return Markup(svg),
        Err(err) => {
            tracing::warn!(icon = name, error = %err, "icon unavailable, using fallback icon")
        }
    }

    match render(fallback_icon) {
        Ok(svg) => Markup(svg),
        Err(err) => {
            tracing::warn!(
                icon = name,
                fallback = fallback_icon,
                error = %err,
                "fallback icon unavailable, using text placeholder"
            );
            fallback_span(name)
        }
    }
}

/// Last-resort placeholder showing the requested name as text
pub fn fallback_span(name: &str) -> Markup {
    Markup(format!(
        "<span class='lucide-fallback'>{}</span>",
        escape(name)
    ))
}

/// A store bundled with the template-level settings
#[derive(Debug, Clone)]
pub struct IconTemplate {
    store: Arc<IconStore>,
    default_size: u32,
    fallback_icon: String,
}

impl IconTemplate {
    pub fn new(store: Arc<IconStore>, config: &IconConfig) -> Self {
        Self {
            store,
            default_size: config.default_size,
            fallback_icon: config.fallback_icon.clone(),
        }
    }

    /// A template with its own store for `config`'s archive
    pub fn from_config(config: &IconConfig) -> Self {
        Self::new(Arc::new(IconStore::from_config(config)), config)
    }

    /// The process-wide template, sharing [`IconStore::global`]
    pub fn global() -> &'static IconTemplate {
        static GLOBAL: OnceLock<IconTemplate> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            IconTemplate::new(IconStore::global(), &IconConfig::from_env_or_default())
        })
    }

    pub fn store(&self) -> &Arc<IconStore> {
        &self.store
    }

    pub fn default_size(&self) -> u32 {
        self.default_size
    }

    pub fn fallback_icon(&self) -> &str {
        &self.fallback_icon
    }

    /// Attributes carrying the configured default size
    pub fn attributes(&self) -> RenderAttributes {
        RenderAttributes::new().with_size(Some(self.default_size))
    }

    /// Render through the fallback chain
    pub fn render(&self, name: &str, attrs: &RenderAttributes) -> Markup {
        lucide_with_fallback(&self.store, name, attrs, &self.fallback_icon)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_first_choice_wins() {
        let markup = render_with_fallback("house", "alert-triangle", |icon| {
            Ok(format!("<svg id='{icon}'></svg>"))
        });
        assert_eq!(markup.as_str(), "<svg id='house'></svg>");
    }

    #[test]
    fn test_falls_back_to_alert_triangle() {
        let markup = render_with_fallback("missing-icon", "alert-triangle", |icon| match icon {
            "missing-icon" => Err(IconError::NotFound(icon.to_string())),
            "alert-triangle" => Ok("<svg><path d='fallback'/></svg>".to_string()),
            other => panic!("unexpected icon {other}"),
        });
        assert_eq!(markup.as_str(), "<svg><path d='fallback'/></svg>");
    }

    #[test]
    fn test_double_fallback_to_span() {
        let mut attempts = Vec::new();
        let markup = render_with_fallback("still-missing", "alert-triangle", |icon| {
            attempts.push(icon.to_string());
            Err(IconError::NotFound(icon.to_string()))
        });
        assert_eq!(
            markup.as_str(),
            "<span class='lucide-fallback'>still-missing</span>"
        );
        assert_eq!(attempts, vec!["still-missing", "alert-triangle"]);
    }

    #[test]
    fn test_span_escapes_name() {
        assert_eq!(
            fallback_span("<script>").as_str(),
            "<span class='lucide-fallback'>&lt;script&gt;</span>"
        );
    }

    #[test]
    fn test_non_lookup_errors_also_fall_back() {
        let markup = render_with_fallback("broken", "alert-triangle", |icon| match icon {
            "broken" => Err(IconError::MalformedSvg {
                name: icon.to_string(),
                message: "unexpected end of input".to_string(),
            }),
            _ => Ok("<svg></svg>".to_string()),
        });
        assert_eq!(markup.as_str(), "<svg></svg>");
    }

    #[test]
    fn test_template_uses_configured_defaults() {
        let config = IconConfig::new().with_default_size(16).with_fallback_icon("x");
        let template = IconTemplate::from_config(&config);
        assert_eq!(template.attributes().size, Some(16));

        let markup = template.render("hoome", &template.attributes());
        assert!(markup.as_str().contains("lucide-x"));
        assert!(markup.as_str().contains(r#"width="16""#));
    }
}
