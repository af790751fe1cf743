//! Serialize icons with merged attributes

use quick_xml::escape::escape;

use crate::document::IconDocument;
use crate::error::IconError;
use crate::store::IconStore;

use super::attributes::{attribute_name, AttrValue, RenderAttributes};

/// Resolve an icon and render it
///
/// Lookup errors are returned unchanged; fallback handling belongs to the
/// template layer.
pub fn render(store: &IconStore, name: &str, attrs: &RenderAttributes) -> Result<String, IconError> {
    let document = store.resolve(name)?;
    render_document(&document, attrs)
}

/// Render an already resolved icon
///
/// Fails with [`IconError::InvalidAttribute`] when a caller key is not a
/// valid attribute name.
pub fn render_document(
    document: &IconDocument,
    attrs: &RenderAttributes,
) -> Result<String, IconError> {
    let mut merged: Vec<(String, String)> = document
        .attributes()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();

    match attrs.size {
        Some(size) => {
            let size = size.to_string();
            set_attribute(&mut merged, "width", size.clone());
            set_attribute(&mut merged, "height", size);
        }
        None => {
            remove_attribute(&mut merged, "width");
            remove_attribute(&mut merged, "height");
        }
    }

    // `class` replaces the source classes like any other override
    for (key, value) in attrs.iter() {
        let key = attribute_name(key)?;
        match value {
            AttrValue::Plain(value) => {
                set_attribute(&mut merged, &key, escape(value.as_str()).into_owned())
            }
            AttrValue::Trusted(value) => set_attribute(&mut merged, &key, value.clone()),
            AttrValue::Null => remove_attribute(&mut merged, &key),
        }
    }

    Ok(document.to_svg_string_with(&merged))
}

fn set_attribute(attributes: &mut Vec<(String, String)>, key: &str, value: String) {
    match attributes.iter_mut().find(|(existing, _)| existing == key) {
        Some((_, slot)) => *slot = value,
        None => attributes.push((key.to_string(), value)),
    }
}

fn remove_attribute(attributes: &mut Vec<(String, String)>, key: &str) {
    attributes.retain(|(existing, _)| existing != key);
}
