//! Parsed SVG icon documents
//!
//! An [`IconDocument`] keeps the root element's attributes in source order
//! and the child tree exactly as it appeared in the archive. Attribute
//! values are stored in escaped form so they can be written back without
//! another pass.

use std::borrow::Cow;
use std::io::Write;

use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesCData, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::{Reader, Writer};

use crate::error::IconError;

/// Root tag every icon must have
pub const SVG_TAG: &str = "svg";

/// A node below the root element
#[derive(Debug, Clone, PartialEq)]
pub enum SvgNode {
    Element(SvgElement),
    /// Text in its escaped source form
    Text(String),
    Comment(String),
    CData(String),
    ProcessingInstruction(String),
}

/// An element with ordered, escaped attributes
#[derive(Debug, Clone, PartialEq)]
pub struct SvgElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<SvgNode>,
}

impl SvgElement {
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// The parsed root of one icon
#[derive(Debug, Clone, PartialEq)]
pub struct IconDocument {
    root: SvgElement,
}

impl IconDocument {
    /// Parse an icon's SVG source
    ///
    /// `name` is only used in error messages.
    pub fn parse(name: &str, source: &[u8]) -> Result<Self, IconError> {
        let text = std::str::from_utf8(source).map_err(|_| IconError::InvalidEncoding {
            name: name.to_string(),
        })?;

        let mut reader = Reader::from_str(text);
        let mut stack: Vec<SvgElement> = Vec::new();
        let mut root: Option<SvgElement> = None;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| IconError::malformed(name, e))?;
            match event {
                Event::Start(start) => stack.push(element_from(name, &start)?),
                Event::Empty(start) => {
                    let element = element_from(name, &start)?;
                    attach(name, &mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| IconError::malformed(name, "unexpected closing tag"))?;
                    attach(name, &mut stack, &mut root, element)?;
                }
                Event::Text(text) => match stack.last_mut() {
                    Some(parent) => parent.children.push(SvgNode::Text(lossy(&text))),
                    None if text.iter().all(u8::is_ascii_whitespace) => {}
                    None => {
                        return Err(IconError::malformed(name, "text outside the root element"))
                    }
                },
                Event::CData(data) => match stack.last_mut() {
                    Some(parent) => parent.children.push(SvgNode::CData(lossy(&data))),
                    None => {
                        return Err(IconError::malformed(name, "CDATA outside the root element"))
                    }
                },
                Event::Comment(comment) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(SvgNode::Comment(lossy(&comment)));
                    }
                }
                Event::PI(pi) => {
                    if let Some(parent) = stack.last_mut() {
                        parent
                            .children
                            .push(SvgNode::ProcessingInstruction(lossy(&pi)));
                    }
                }
                Event::Decl(_) | Event::DocType(_) => {}
                Event::Eof => break,
            }
        }

        if let Some(open) = stack.last() {
            return Err(IconError::malformed(
                name,
                format!("unclosed <{}> element", open.name),
            ));
        }
        let root = root.ok_or_else(|| IconError::malformed(name, "no root element"))?;
        if root.name != SVG_TAG {
            return Err(IconError::malformed(
                name,
                format!("root element is <{}>, expected <svg>", root.name),
            ));
        }

        Ok(Self { root })
    }

    /// Root tag name
    pub fn tag(&self) -> &str {
        &self.root.name
    }

    /// Escaped value of a root attribute
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.root.attribute(name)
    }

    /// Root attributes in source order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.root
            .attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn children(&self) -> &[SvgNode] {
        &self.root.children
    }

    /// Serialize with the source attributes
    pub fn to_svg_string(&self) -> String {
        self.to_svg_string_with(&self.root.attributes)
    }

    /// Serialize with a replacement root attribute list
    ///
    /// Values are written as given and must already be markup-safe. The root
    /// always gets an explicit closing tag.
    pub fn to_svg_string_with(&self, attributes: &[(String, String)]) -> String {
        let mut writer = Writer::new(Vec::new());
        let _ = writer.write_event(Event::Start(start_tag(&self.root.name, attributes)));
        for child in &self.root.children {
            write_node(&mut writer, child);
        }
        let _ = writer.write_event(Event::End(BytesEnd::new(self.root.name.as_str())));
        // Every name and value written above is already a `&str`
        String::from_utf8_lossy(&writer.into_inner()).into_owned()
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn element_from(icon: &str, start: &BytesStart<'_>) -> Result<SvgElement, IconError> {
    let name = lossy(start.name().as_ref());
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| IconError::malformed(icon, e))?;
        let key = lossy(attr.key.as_ref());
        let value = attr
            .unescape_value()
            .map_err(|e| IconError::malformed(icon, e))?;
        attributes.push((key, escape(&*value).into_owned()));
    }
    Ok(SvgElement {
        name,
        attributes,
        children: Vec::new(),
    })
}

/// Hand a finished element to its parent, or make it the root
fn attach(
    icon: &str,
    stack: &mut [SvgElement],
    root: &mut Option<SvgElement>,
    element: SvgElement,
) -> Result<(), IconError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(SvgNode::Element(element)),
        None if root.is_some() => {
            return Err(IconError::malformed(icon, "multiple root elements"));
        }
        None => *root = Some(element),
    }
    Ok(())
}

fn start_tag<'a>(name: &'a str, attributes: &'a [(String, String)]) -> BytesStart<'a> {
    let mut start = BytesStart::new(name);
    for (key, value) in attributes {
        start.push_attribute(Attribute {
            key: QName(key.as_bytes()),
            value: Cow::Borrowed(value.as_bytes()),
        });
    }
    start
}

fn write_node<W: Write>(writer: &mut Writer<W>, node: &SvgNode) {
    match node {
        SvgNode::Element(element) => {
            let start = start_tag(&element.name, &element.attributes);
            if element.children.is_empty() {
                let _ = writer.write_event(Event::Empty(start));
            } else {
                let _ = writer.write_event(Event::Start(start));
                for child in &element.children {
                    write_node(writer, child);
                }
                let _ = writer.write_event(Event::End(BytesEnd::new(element.name.as_str())));
            }
        }
        SvgNode::Text(text) => {
            let _ = writer.write_event(Event::Text(BytesText::from_escaped(text.as_str())));
        }
        SvgNode::Comment(comment) => {
            let _ = writer.write_event(Event::Comment(BytesText::from_escaped(comment.as_str())));
        }
        SvgNode::CData(data) => {
            let _ = writer.write_event(Event::CData(BytesCData::new(data.as_str())));
        }
        SvgNode::ProcessingInstruction(content) => {
            let _ = writer.write_event(Event::PI(BytesPI::new(content.as_str())));
        }
    }
}
