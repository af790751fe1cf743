//! MiniJinja integration
//!
//! ```text
//! {{ lucide("a-arrow-down") }}
//! {{ lucide("a-arrow-down", size=48, class="h-4 w-4", data_test="a < 2") }}
//! {{ lucide("a-arrow-down", size=none) }}
//! {{ lucide("a-arrow-down", title=label|safe) }}
//! ```
//!
//! Keyword values already marked safe are written without escaping.

use minijinja::value::{Kwargs, Value};
use minijinja::{Environment, Error};

use crate::renderer::{AttrValue, RenderAttributes};

use super::IconTemplate;

/// Name the global function is registered under
pub const FUNCTION_NAME: &str = "lucide";

/// Register `lucide(name, size=24, **attrs)` as a global function
pub fn add_to_environment(env: &mut Environment<'_>, template: IconTemplate) {
    env.add_function(
        FUNCTION_NAME,
        move |name: String, kwargs: Kwargs| -> Result<Value, Error> {
            let attrs = attributes(&template, &kwargs)?;
            let markup = template.render(&name, &attrs);
            Ok(Value::from_safe_string(markup.into_string()))
        },
    );
}

fn attributes(template: &IconTemplate, kwargs: &Kwargs) -> Result<RenderAttributes, Error> {
    let mut attrs = template.attributes();
    let keys: Vec<String> = kwargs.args().map(str::to_string).collect();
    for key in keys {
        let value: Value = kwargs.get(&key)?;
        if key == "size" {
            attrs.size = size_from_value(&value, attrs.size);
        } else {
            attrs.insert(key, attr_from_value(&value));
        }
    }
    Ok(attrs)
}

fn size_from_value(value: &Value, default: Option<u32>) -> Option<u32> {
    if value.is_none() {
        return None;
    }
    match value.as_str() {
        Some(s) => s.trim().parse().ok().or(default),
        None => u32::try_from(value.clone()).ok().or(default),
    }
}

fn attr_from_value(value: &Value) -> AttrValue {
    if value.is_none() || value.is_undefined() {
        return AttrValue::Null;
    }
    match value.as_str() {
        Some(s) if value.is_safe() => AttrValue::Trusted(s.to_string()),
        Some(s) => AttrValue::Plain(s.to_string()),
        None => AttrValue::Plain(value.to_string()),
    }
}
