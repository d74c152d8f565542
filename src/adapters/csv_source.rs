use crate::domain::model::MovementRow;
use crate::domain::ports::MovementSource;
use crate::utils::error::{RebootError, Result};
use std::io::Read;
use std::path::PathBuf;

/// Reads movements from a headered CSV file.
#[derive(Debug, Clone)]
pub struct CsvMovementSource {
    path: PathBuf,
    play_id_column: String,
    pitch_type_column: String,
}

impl CsvMovementSource {
    pub fn new(
        path: impl Into<PathBuf>,
        play_id_column: impl Into<String>,
        pitch_type_column: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            play_id_column: play_id_column.into(),
            pitch_type_column: pitch_type_column.into(),
        }
    }

    pub fn parse<R: Read>(&self, reader: R) -> Result<Vec<MovementRow>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let play_id_idx = column_index(&headers, &self.play_id_column, "input.play_id_column")?;
        let pitch_type_idx =
            column_index(&headers, &self.pitch_type_column, "input.pitch_type_column")?;

        let mut rows = Vec::new();
        for (line, record) in csv_reader.records().enumerate() {
            let record = record?;
            // Field values are kept verbatim; pitch types match exactly.
            let play_id = record.get(play_id_idx).unwrap_or_default();
            if play_id.trim().is_empty() {
                tracing::warn!("Skipping CSV row {} with empty {}", line + 2, self.play_id_column);
                continue;
            }
            rows.push(MovementRow {
                external_context_id: play_id.to_string(),
                pitch_type: record.get(pitch_type_idx).unwrap_or_default().to_string(),
            });
        }

        tracing::debug!("Parsed {} movements from CSV", rows.len());
        Ok(rows)
    }
}

impl MovementSource for CsvMovementSource {
    fn read_movements(&self) -> Result<Vec<MovementRow>> {
        tracing::debug!("Reading movements from {}", self.path.display());
        let file = std::fs::File::open(&self.path)?;
        self.parse(file)
    }
}

fn column_index(headers: &csv::StringRecord, column: &str, field: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| RebootError::ConfigValidationError {
            field: field.to_string(),
            message: format!(
                "column '{}' not found in CSV header ({})",
                column,
                headers.iter().collect::<Vec<_>>().join(", ")
            ),
        })
}

/// Splits movements into primary and comparison id lists by exact pitch type.
/// Row order and duplicates are kept.
pub fn partition(
    rows: &[MovementRow],
    primary_type: &str,
    comparison_type: &str,
) -> (Vec<String>, Vec<String>) {
    let mut primary = Vec::new();
    let mut comparison = Vec::new();
    for row in rows {
        if row.pitch_type == primary_type {
            primary.push(row.external_context_id.clone());
        } else if row.pitch_type == comparison_type {
            comparison.push(row.external_context_id.clone());
        }
    }
    (primary, comparison)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "MLBPlayId,PitchType\n\
        aaa-1,Fastball\n\
        bbb-2,Curveball\n\
        ccc-3,Slider\n\
        ddd-4,Fastball\n\
        eee-5,fastball\n";

    fn source() -> CsvMovementSource {
        CsvMovementSource::new("unused.csv", "MLBPlayId", "PitchType")
    }

    #[test]
    fn test_parse_rows() {
        let rows = source().parse(SAMPLE.as_bytes()).unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].external_context_id, "aaa-1");
        assert_eq!(rows[1].pitch_type, "Curveball");
    }

    #[test]
    fn test_partition_is_exact_and_ordered() {
        let rows = source().parse(SAMPLE.as_bytes()).unwrap();
        let (primary, comparison) = partition(&rows, "Fastball", "Curveball");
        assert_eq!(primary, vec!["aaa-1", "ddd-4"]);
        assert_eq!(comparison, vec!["bbb-2"]);
    }

    #[test]
    fn test_extra_columns_and_blank_ids() {
        let data = "Game, PitchType ,MLBPlayId\n1,Curveball,x1\n2,Fastball,  \n";
        let rows = source().parse(data.as_bytes()).unwrap();
        assert_eq!(
            rows,
            vec![MovementRow {
                external_context_id: "x1".to_string(),
                pitch_type: "Curveball".to_string(),
            }]
        );
    }

    #[test]
    fn test_padded_pitch_type_does_not_match() {
        let data = "MLBPlayId,PitchType\np1, Fastball\np2,Fastball\np3,Curveball\n";
        let rows = source().parse(data.as_bytes()).unwrap();
        assert_eq!(rows[0].pitch_type, " Fastball");

        let (primary, comparison) = partition(&rows, "Fastball", "Curveball");
        assert_eq!(primary, vec!["p2"]);
        assert_eq!(comparison, vec!["p3"]);
    }

    #[test]
    fn test_missing_column_is_config_error() {
        let err = source().parse("PlayId,PitchType\n1,Fastball\n".as_bytes()).unwrap_err();
        match err {
            RebootError::ConfigValidationError { field, message } => {
                assert_eq!(field, "input.play_id_column");
                assert!(message.contains("MLBPlayId"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_read_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(SAMPLE.as_bytes()).unwrap();
        let source = CsvMovementSource::new(temp_file.path(), "MLBPlayId", "PitchType");
        assert_eq!(source.read_movements().unwrap().len(), 5);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = CsvMovementSource::new("/nonexistent/pitches.csv", "MLBPlayId", "PitchType");
        assert!(matches!(source.read_movements(), Err(RebootError::IoError(_))));
    }
}
