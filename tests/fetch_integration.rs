//! Integration tests for release download and archive repackaging

use std::io::{Cursor, Read, Write};

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use lucide_svg::fetch::{repackage, update_archive, FetchError, ReleaseClient};
use lucide_svg::{ArchiveSource, IconStore};

const FOO_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" data-slot="icon" width="24" height="24"><path d="M1 1"/></svg>"#;

fn release_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .expect("Should start entry");
        writer
            .write_all(content.as_bytes())
            .expect("Should write entry");
    }
    writer.finish().expect("Should finish zip").into_inner()
}

/// Release index that only knows about the latest tag
struct MockReleases {
    latest: &'static str,
    archive: Vec<u8>,
}

impl ReleaseClient for MockReleases {
    fn latest_tag(&self) -> Result<String, FetchError> {
        Ok(self.latest.to_string())
    }

    fn download_release(&self, tag: &str) -> Result<Vec<u8>, FetchError> {
        if tag == self.latest {
            Ok(self.archive.clone())
        } else {
            Err(FetchError::Status {
                url: format!("mock://{}", tag),
                status: 404,
            })
        }
    }
}

fn mock() -> MockReleases {
    MockReleases {
        latest: "v1.2.3",
        archive: release_zip(&[
            ("icons/foo.svg", FOO_SVG),
            ("icons/README.md", "not an icon"),
            ("not-icons/bar.svg", FOO_SVG),
            ("icons/abc.svg", "<svg/>"),
        ]),
    }
}

#[test]
fn test_repackage_keeps_only_icons() {
    let repackaged = repackage(&mock().archive).expect("Should repackage");
    assert_eq!(repackaged.icons, vec!["abc.svg", "foo.svg"]);

    let mut archive = ZipArchive::new(Cursor::new(repackaged.bytes)).unwrap();
    let names: Vec<_> = archive.file_names().map(str::to_string).collect();
    assert!(names.contains(&"foo.svg".to_string()));
    assert!(!names.iter().any(|n| n.contains("bar.svg")));

    let mut foo = String::new();
    let mut entry = archive.by_name("foo.svg").unwrap();
    assert_eq!(entry.compression(), CompressionMethod::Deflated);
    entry.read_to_string(&mut foo).unwrap();
    assert!(!foo.contains("data-slot"));
    assert_eq!(
        foo,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24"><path d="M1 1"/></svg>"#
    );
}

#[test]
fn test_repackage_is_sorted() {
    let repackaged = repackage(&mock().archive).unwrap();
    let mut archive = ZipArchive::new(Cursor::new(repackaged.bytes)).unwrap();
    let mut names: Vec<_> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    let in_order = names.clone();
    names.sort();
    assert_eq!(in_order, names);
}

#[test]
fn test_update_writes_archive() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("lucide.zip");

    let report = update_archive(&mock(), None, &output).expect("Should update");
    assert_eq!(report.tag, "v1.2.3");
    assert_eq!(report.path, output);
    assert_eq!(report.icons, vec!["abc.svg", "foo.svg"]);

    let store = IconStore::new(ArchiveSource::Path(output));
    let foo = store.resolve("foo").expect("Should resolve");
    assert_eq!(foo.attribute("data-slot"), None);
    assert!(store.resolve("bar").unwrap_err().is_not_found());
}

#[test]
fn test_update_unknown_version_falls_back_to_latest() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("lucide.zip");

    let report = update_archive(&mock(), Some("0.1.0"), &output).expect("Should update");
    assert_eq!(report.tag, "v1.2.3");
}

#[test]
fn test_failed_update_keeps_previous_archive() {
    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("lucide.zip");
    std::fs::write(&output, b"previous").unwrap();

    let broken = MockReleases {
        latest: "v9.9.9",
        archive: b"not a zip".to_vec(),
    };
    let err = update_archive(&broken, Some("9.9.9"), &output).unwrap_err();
    assert!(matches!(err, FetchError::Archive(_)));
    assert_eq!(std::fs::read(&output).unwrap(), b"previous");
}

#[test]
fn test_unresolvable_version() {
    struct Offline;

    impl ReleaseClient for Offline {
        fn latest_tag(&self) -> Result<String, FetchError> {
            Err(FetchError::Http("offline".to_string()))
        }

        fn download_release(&self, _tag: &str) -> Result<Vec<u8>, FetchError> {
            Err(FetchError::Http("offline".to_string()))
        }
    }

    let tmp = TempDir::new().unwrap();
    let output = tmp.path().join("lucide.zip");
    let err = update_archive(&Offline, Some("0.469.0"), &output).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Could not download Lucide for '0.469.0', and latest fallback failed."
    );
    assert!(!output.exists());
}
