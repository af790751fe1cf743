//! Handlebars integration
//!
//! ```text
//! {{lucide "a-arrow-down"}}
//! {{lucide "a-arrow-down" size=48 class="h-4 w-4" data_test="a < 2"}}
//! {{lucide "a-arrow-down" size=null}}
//! ```
//!
//! Handlebars keeps hash arguments in a sorted map, so attributes the icon
//! does not already carry are appended in alphabetical key order rather
//! than the order they were written in the template.

use handlebars::{Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext};
use serde_json::Value as JsonValue;

use crate::renderer::{AttrValue, RenderAttributes};

use super::IconTemplate;

/// Name the helper is registered under
pub const HELPER_NAME: &str = "lucide";

/// Renders `{{lucide "name" size=N key=value…}}`
#[derive(Debug, Clone)]
pub struct LucideHelper {
    template: IconTemplate,
}

impl LucideHelper {
    pub fn new(template: IconTemplate) -> Self {
        Self { template }
    }

    fn attributes(&self, h: &Helper<'_, '_>) -> RenderAttributes {
        let mut attrs = self.template.attributes();
        for (key, value) in h.hash() {
            if *key == "size" {
                attrs.size = size_from_json(value.value(), attrs.size);
            } else {
                attrs.insert(*key, attr_from_json(value.value()));
            }
        }
        attrs
    }
}

impl HelperDef for LucideHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let name = h
            .param(0)
            .and_then(|param| param.value().as_str())
            .unwrap_or_default();
        let markup = self.template.render(name, &self.attributes(h));
        out.write(markup.as_str())?;
        Ok(())
    }
}

/// Register the `lucide` helper
pub fn register_helpers(registry: &mut Handlebars<'_>, template: IconTemplate) {
    registry.register_helper(HELPER_NAME, Box::new(LucideHelper::new(template)));
}

fn size_from_json(value: &JsonValue, default: Option<u32>) -> Option<u32> {
    match value {
        JsonValue::Null => None,
        JsonValue::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .or(default),
        JsonValue::String(s) => s.trim().parse().ok().or(default),
        _ => default,
    }
}

fn attr_from_json(value: &JsonValue) -> AttrValue {
    match value {
        JsonValue::Null => AttrValue::Null,
        JsonValue::String(s) => AttrValue::Plain(s.clone()),
        other => AttrValue::Plain(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_size_from_json() {
        assert_eq!(size_from_json(&json!(48), Some(24)), Some(48));
        assert_eq!(size_from_json(&json!(null), Some(24)), None);
        assert_eq!(size_from_json(&json!("32"), Some(24)), Some(32));
        assert_eq!(size_from_json(&json!(-1), Some(24)), Some(24));
        assert_eq!(size_from_json(&json!(true), Some(24)), Some(24));
    }

    #[test]
    fn test_hash_attributes_appended_alphabetically() {
        let mut registry = Handlebars::new();
        register_helpers(
            &mut registry,
            IconTemplate::from_config(&crate::config::IconConfig::default()),
        );
        let out = registry
            .render_template(r#"{{lucide "check" size=null z_last="1" a_first="2"}}"#, &json!({}))
            .unwrap();
        let a = out.find(r#"a-first="2""#).unwrap();
        let z = out.find(r#"z-last="1""#).unwrap();
        assert!(a < z);
    }

    #[test]
    fn test_attr_from_json() {
        assert_eq!(attr_from_json(&json!("butt")), AttrValue::plain("butt"));
        assert_eq!(attr_from_json(&json!(2)), AttrValue::plain("2"));
        assert_eq!(attr_from_json(&json!(false)), AttrValue::plain("false"));
        assert_eq!(attr_from_json(&json!(null)), AttrValue::Null);
    }
}
