//! Caller-supplied attribute overrides

use crate::config::DEFAULT_SIZE;
use crate::error::IconError;

/// Value of an override attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Escaped before it is written
    Plain(String),
    /// Already markup-safe, written verbatim
    Trusted(String),
    /// Removes the attribute
    Null,
}

impl AttrValue {
    pub fn plain(value: impl Into<String>) -> Self {
        AttrValue::Plain(value.into())
    }

    pub fn trusted(value: impl Into<String>) -> Self {
        AttrValue::Trusted(value.into())
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Plain(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Plain(value)
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(AttrValue::Null, Into::into)
    }
}

/// Overrides applied to an icon's root element at render time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderAttributes {
    /// Width and height; `None` removes both
    pub size: Option<u32>,
    attributes: Vec<(String, AttrValue)>,
}

impl Default for RenderAttributes {
    fn default() -> Self {
        Self {
            size: Some(DEFAULT_SIZE),
            attributes: Vec::new(),
        }
    }
}

impl RenderAttributes {
    /// Default size, no overrides
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size (`None` omits width and height)
    pub fn with_size(mut self, size: Option<u32>) -> Self {
        self.size = size;
        self
    }

    /// Add a plain attribute
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add a pre-trusted attribute
    pub fn with_trusted(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, AttrValue::Trusted(value.into()));
        self
    }

    /// Add an attribute; later entries for the same key win
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.attributes.push((key.into(), value.into()));
    }

    /// Overrides in insertion order, keys as the caller wrote them
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Translate a keyword-style name (`stroke_linecap`) to an attribute name
/// (`stroke-linecap`)
///
/// The translated name must be a valid XML name, so nothing a caller passes
/// as a key can break out of the root tag.
pub fn attribute_name(key: &str) -> Result<String, IconError> {
    let name = key.replace('_', "-");
    if is_xml_name(&name) {
        Ok(name)
    } else {
        Err(IconError::InvalidAttribute {
            key: key.to_string(),
        })
    }
}

fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '.' | ':' | '_'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_name() {
        assert_eq!(attribute_name("data_test").unwrap(), "data-test");
        assert_eq!(attribute_name("stroke_linecap").unwrap(), "stroke-linecap");
        assert_eq!(attribute_name("class").unwrap(), "class");
        assert_eq!(attribute_name("aria-hidden").unwrap(), "aria-hidden");
        assert_eq!(attribute_name("xlink:href").unwrap(), "xlink:href");
    }

    #[test]
    fn test_attribute_name_rejects_non_names() {
        for key in ["", "x onload", "a\"><script>", "a>b", "<b", "1st", "_private", "a=b", "q'"] {
            let err = attribute_name(key).unwrap_err();
            assert!(
                matches!(err, IconError::InvalidAttribute { key: ref k } if k == key),
                "key {:?}",
                key
            );
        }
    }

    #[test]
    fn test_default_size() {
        assert_eq!(RenderAttributes::new().size, Some(24));
        assert_eq!(RenderAttributes::new().with_size(None).size, None);
    }

    #[test]
    fn test_builder_keeps_order() {
        let attrs = RenderAttributes::new()
            .with("class", "h-4 w-4")
            .with_trusted("title", "a &amp; b")
            .with("hidden", None::<String>);

        let collected: Vec<_> = attrs.iter().collect();
        assert_eq!(
            collected,
            vec![
                ("class", &AttrValue::plain("h-4 w-4")),
                ("title", &AttrValue::trusted("a &amp; b")),
                ("hidden", &AttrValue::Null),
            ]
        );
    }
}
