// ── CSV export ──
//
// Rows go to a temporary file next to the target and the temp file is
// renamed over the target only after every row is written and synced.
// A failed export never leaves a partial file at the target path.

use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::info;

use crate::address::Address;
use crate::error::CoreError;

/// Default artifact name when none is configured.
pub const DEFAULT_EXPORT_PATH: &str = "customer_addresses.csv";

/// Write `addresses` to `path` as CSV with a fixed header row.
///
/// Returns the path written.
pub fn export_addresses(addresses: &[Address], path: &Path) -> Result<PathBuf, CoreError> {
    let fail = |message: String| CoreError::Export {
        path: path.to_path_buf(),
        message,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let tmp = NamedTempFile::new_in(dir).map_err(|e| fail(e.to_string()))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(tmp);

    writer
        .write_record(Address::header())
        .map_err(|e| fail(e.to_string()))?;
    for address in addresses {
        writer.serialize(address).map_err(|e| fail(e.to_string()))?;
    }

    let tmp = writer.into_inner().map_err(|e| fail(e.error().to_string()))?;
    tmp.as_file().sync_all().map_err(|e| fail(e.to_string()))?;
    tmp.persist(path).map_err(|e| fail(e.error.to_string()))?;

    info!(rows = addresses.len(), path = %path.display(), "addresses exported");
    Ok(path.to_path_buf())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::Number;

    fn address(id: u64, street: &str) -> Address {
        Address {
            id: Number::from(id),
            first_name: "Edsger".into(),
            last_name: "Dijkstra".into(),
            street: street.into(),
            postcode: "5600".into(),
            state: "NB".into(),
            country: "NL".into(),
            lat: Number::from_f64(51.44).unwrap(),
            lon: Number::from_f64(5.47).unwrap(),
        }
    }

    #[test]
    fn writes_header_and_rows_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let written =
            export_addresses(&[address(1, "Plantage 1"), address(2, "Plantage 2")], &path)
                .unwrap();

        assert_eq!(written, path);
        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(
            lines,
            vec![
                "ID,First Name,Last Name,Street,Postcode,State,Country,Latitude,Longitude",
                "1,Edsger,Dijkstra,Plantage 1,5600,NB,NL,51.44,5.47",
                "2,Edsger,Dijkstra,Plantage 2,5600,NB,NL,51.44,5.47",
            ]
        );
    }

    #[test]
    fn empty_collection_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        export_addresses(&[], &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 1);
    }

    #[test]
    fn fields_with_delimiters_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quoted.csv");

        export_addresses(&[address(1, "Flat 2, Plantage 1")], &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"Flat 2, Plantage 1\""));
    }

    #[test]
    fn integer_coordinates_are_written_as_sent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ints.csv");
        let mut row = address(3, "Navy Way");
        row.lat = Number::from(40);
        row.lon = Number::from(-74);

        export_addresses(&[row], &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents.lines().nth(1),
            Some("3,Edsger,Dijkstra,Navy Way,5600,NB,NL,40,-74")
        );
    }

    #[test]
    fn replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "stale\n").unwrap();

        export_addresses(&[address(9, "Plantage 9")], &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("stale"));
        assert!(contents.contains("Plantage 9"));
    }

    #[test]
    fn missing_directory_is_an_export_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.csv");

        let err = export_addresses(&[address(1, "x")], &path).unwrap_err();

        assert!(matches!(err, CoreError::Export { path: ref p, .. } if *p == path));
        assert!(!path.exists());
    }
}
