//! CSV loader for the raw survey export.

use crate::dataset::types::{RawDataset, RawRecord};
use crate::error::{EngineError, Result};
use flate2::read::GzDecoder;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Loads the raw survey rows from `path`. `*.gz` files are decompressed while reading.
///
/// # Errors
///
/// Returns [`EngineError::DataUnavailable`] if the file is missing, empty,
/// lacks a required column, contains an undecodable cell or repeats an `id`.
#[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_raw(path: impl AsRef<Path>) -> Result<RawDataset> {
    let path = path.as_ref();
    let source = path.display().to_string();

    let file = File::open(path).map_err(|e| EngineError::unavailable(&source, e))?;

    let gzipped = path.extension().and_then(|e| e.to_str()) == Some("gz");
    debug!(gzipped, "Opening survey source");

    if gzipped {
        read_raw(&source, GzDecoder::new(file))
    } else {
        read_raw(&source, file)
    }
}

/// Parses survey rows from any reader. `source` is only used in errors and logs.
pub fn read_raw<R: Read>(source: &str, reader: R) -> Result<RawDataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| EngineError::unavailable(source, e))?
        .clone();

    if headers.iter().all(str::is_empty) {
        return Err(EngineError::unavailable(source, "source is empty"));
    }

    let missing: Vec<&str> = RawRecord::REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !headers.iter().any(|h| h == *column))
        .collect();
    if !missing.is_empty() {
        return Err(EngineError::unavailable(
            source,
            format!("missing columns: {}", missing.join(", ")),
        ));
    }

    let mut records = Vec::new();
    let mut seen = HashSet::new();

    for result in rdr.deserialize() {
        let record: RawRecord = result.map_err(|e| EngineError::unavailable(source, e))?;
        if !seen.insert(record.id) {
            return Err(EngineError::unavailable(
                source,
                format!("duplicate id {}", record.id),
            ));
        }
        records.push(record);
    }

    if records.is_empty() {
        return Err(EngineError::unavailable(source, "no data rows"));
    }

    info!(source, rows = records.len(), "Survey data loaded");

    Ok(RawDataset {
        source: source.to_string(),
        records,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::env;
    use std::fs;
    use std::io::Write;

    pub(crate) const HEADER: &str = ",id,Gender,Customer Type,Age,Type of Travel,Class,Flight Distance,Inflight wifi service,Departure/Arrival time convenient,Ease of Online booking,Gate location,Food and drink,Online boarding,Seat comfort,Inflight entertainment,On-board service,Leg room service,Baggage handling,Checkin service,Inflight service,Cleanliness,Departure Delay in Minutes,Arrival Delay in Minutes,satisfaction";

    pub(crate) fn sample_csv() -> String {
        [
            HEADER,
            "0,70172,Male,Loyal Customer,13,Personal Travel,Eco Plus,460,3,4,3,1,5,3,5,5,4,3,4,4,5,5,25,18.0,neutral or dissatisfied",
            "1,5047,Male,disloyal Customer,25,Business travel,Business,235,3,2,3,3,1,3,1,1,1,5,3,1,4,1,1,6.0,neutral or dissatisfied",
            "2,110028,Female,Loyal Customer,26,Business travel,Business,1142,2,2,2,2,5,5,5,5,4,3,4,4,4,5,0,0.0,satisfied",
        ]
        .join("\n")
    }

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_read_raw_parses_rows() {
        let raw = read_raw("inline", sample_csv().as_bytes()).unwrap();

        assert_eq!(raw.records.len(), 3);
        let first = &raw.records[0];
        assert_eq!(first.id, 70172);
        assert_eq!(first.customer_type, "Loyal Customer");
        assert_eq!(first.age, Some(13.0));
        assert_eq!(first.inflight_wifi, Some(3));
        assert_eq!(first.arrival_delay, Some(18.0));
        assert_eq!(first.satisfaction, "neutral or dissatisfied");
    }

    #[test]
    fn test_headers_are_trimmed() {
        let csv = sample_csv().replace("Customer Type", "  Customer Type ");
        let raw = read_raw("inline", csv.as_bytes()).unwrap();
        assert_eq!(raw.records[1].customer_type, "disloyal Customer");
    }

    #[test]
    fn test_empty_cells_become_none() {
        let csv = format!(
            "{HEADER}\n0,1,Female,Loyal Customer,,Business travel,Eco,100,3,3,3,3,3,3,3,3,3,3,3,3,3,,0,,satisfied"
        );
        let raw = read_raw("inline", csv.as_bytes()).unwrap();
        assert_eq!(raw.records[0].age, None);
        assert_eq!(raw.records[0].cleanliness, None);
        assert_eq!(raw.records[0].arrival_delay, None);
    }

    #[test]
    fn test_missing_column_is_unavailable() {
        let csv = sample_csv().replace("Seat comfort", "Seat");
        let err = read_raw("inline", csv.as_bytes()).unwrap_err();
        match err {
            EngineError::DataUnavailable { reason, .. } => assert!(reason.contains("Seat comfort")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_source_is_unavailable() {
        assert!(matches!(
            read_raw("inline", "".as_bytes()),
            Err(EngineError::DataUnavailable { .. })
        ));
        assert!(matches!(
            read_raw("inline", HEADER.as_bytes()),
            Err(EngineError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn test_malformed_cell_is_unavailable() {
        let csv = sample_csv().replace("70172,Male", "abc,Male");
        assert!(matches!(
            read_raw("inline", csv.as_bytes()),
            Err(EngineError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn test_invalid_utf8_is_unavailable() {
        let csv = sample_csv().replacen("Male", "\0\0", 1);
        let bytes: Vec<u8> = csv
            .bytes()
            .map(|b| if b == 0 { 0xff } else { b })
            .collect();

        let err = read_raw("inline", bytes.as_slice()).unwrap_err();
        assert!(matches!(err, EngineError::DataUnavailable { .. }));
    }

    #[test]
    fn test_duplicate_id_is_unavailable() {
        let csv = sample_csv().replace("5047,Male", "70172,Male");
        assert!(matches!(
            read_raw("inline", csv.as_bytes()),
            Err(EngineError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let err = load_raw(temp_path("survey_etl_does_not_exist.csv")).unwrap_err();
        assert!(matches!(err, EngineError::DataUnavailable { .. }));
    }

    #[test]
    fn test_load_gzip_source() {
        let path = temp_path("survey_etl_test_load.csv.gz");
        let _ = fs::remove_file(&path);

        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(sample_csv().as_bytes()).unwrap();
        fs::write(&path, encoder.finish().unwrap()).unwrap();

        let raw = load_raw(&path).unwrap();
        assert_eq!(raw.records.len(), 3);

        fs::remove_file(&path).unwrap();
    }
}
