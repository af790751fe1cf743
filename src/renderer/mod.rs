//! SVG renderer for resolved icons
//!
//! This module merges caller overrides into an icon's root attributes and
//! serializes the result.

pub mod attributes;
pub mod svg;

pub use attributes::{attribute_name, AttrValue, RenderAttributes};
pub use svg::{render, render_document};
