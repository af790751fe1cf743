//! Rewrite an upstream release zip into an icon archive

use std::io::{Cursor, Read, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

use super::FetchError;

/// Directory holding the icons inside a release zip
pub const ICON_PREFIX: &str = "icons/";

const DATA_SLOT: &[u8] = br#" data-slot="icon""#;

/// A rewritten archive and the entry names it contains
#[derive(Debug, Clone)]
pub struct Repackaged {
    pub bytes: Vec<u8>,
    pub icons: Vec<String>,
}

/// Keep the `icons/*.svg` entries of a release zip, moved to the archive
/// root, in sorted order, with the `data-slot` attribute removed
pub fn repackage(release_zip: &[u8]) -> Result<Repackaged, FetchError> {
    let mut input = ZipArchive::new(Cursor::new(release_zip))?;

    let mut names: Vec<String> = input
        .file_names()
        .filter(|name| name.starts_with(ICON_PREFIX) && name.ends_with(".svg"))
        .map(str::to_string)
        .collect();
    names.sort();

    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(9))
        .last_modified_time(DateTime::default());

    let mut output = ZipWriter::new(Cursor::new(Vec::new()));
    let mut icons = Vec::with_capacity(names.len());
    for name in names {
        let mut data = Vec::new();
        input.by_name(&name)?.read_to_end(&mut data)?;

        let icon = name[ICON_PREFIX.len()..].to_string();
        output.start_file(icon.as_str(), options)?;
        output.write_all(&strip_data_slot(&data))?;
        tracing::debug!(%icon, "repackaged");
        icons.push(icon);
    }

    let bytes = output.finish()?.into_inner();
    Ok(Repackaged { bytes, icons })
}

/// Remove every ` data-slot="icon"` occurrence
pub fn strip_data_slot(svg: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(svg.len());
    let mut rest = svg;
    while !rest.is_empty() {
        if rest.starts_with(DATA_SLOT) {
            rest = &rest[DATA_SLOT.len()..];
        } else {
            out.push(rest[0]);
            rest = &rest[1..];
        }
    }
    out
}
