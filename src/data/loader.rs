//! Tariff CSV Loader Module
//! Reads the tariff CSV with an encoding probe, trims headers, and coerces the
//! rate columns from display text to numbers using Polars.

use crate::data::encoding::decode_probed;
use crate::data::schema::NUMERIC_COLUMNS;
use crate::data::table::TariffTable;
use polars::prelude::*;
use rayon::prelude::*;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is neither valid UTF-8 nor CP949 text", path.display())]
    Decode { path: PathBuf },
    #[error("failed to parse CSV {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

impl LoadError {
    /// True when the file simply does not exist, as opposed to being unreadable.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound { .. })
    }
}

/// Loads the tariff table from disk.
pub struct TariffLoader;

impl TariffLoader {
    /// Load and clean the CSV at `path`.
    ///
    /// A missing file, an undecodable file, and an unparseable file each come
    /// back as an `Err`; a file with a header and no rows is `Ok` with zero rows.
    pub fn load(path: impl AsRef<Path>) -> Result<TariffTable, LoadError> {
        let path = path.as_ref();

        let bytes = std::fs::read(path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), "tariff CSV not found");
                LoadError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                LoadError::Read {
                    path: path.to_path_buf(),
                    source: e,
                }
            }
        })?;

        let Some((text, encoding)) = decode_probed(&bytes) else {
            tracing::error!(path = %path.display(), "no candidate encoding decodes the file");
            return Err(LoadError::Decode {
                path: path.to_path_buf(),
            });
        };

        let parse_error = |e: PolarsError| LoadError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        let raw = Self::parse_csv(text).map_err(parse_error)?;
        let table = Self::clean(&raw).map_err(parse_error)?;

        tracing::info!(
            path = %path.display(),
            %encoding,
            rows = table.row_count(),
            columns = table.column_names().len(),
            "loaded tariff table"
        );
        Ok(table)
    }

    /// Parse decoded CSV text with every column kept as a string.
    pub fn parse_csv(text: String) -> PolarsResult<DataFrame> {
        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .into_reader_with_file_handle(Cursor::new(text.into_bytes()))
            .finish()
    }

    /// Trim header names and coerce the designated rate columns to `f64`.
    ///
    /// Columns are normalized in parallel; the new frame is only assembled if
    /// every column succeeds, so callers never see a half-cleaned table.
    pub fn clean(df: &DataFrame) -> PolarsResult<TariffTable> {
        let columns = df
            .get_columns()
            .par_iter()
            .map(normalize_column)
            .collect::<PolarsResult<Vec<Column>>>()?;

        Ok(TariffTable::new(DataFrame::new(columns)?))
    }
}

fn normalize_column(column: &Column) -> PolarsResult<Column> {
    let name = column.name().trim().to_string();
    if !NUMERIC_COLUMNS.contains(&name.as_str()) {
        return Ok(column.clone().with_name(name.into()));
    }

    let text = column.cast(&DataType::String)?;
    let values: Vec<f64> = text
        .str()?
        .into_iter()
        .map(|cell| cell.map(parse_numeric).unwrap_or(0.0))
        .collect();

    Ok(Column::new(name.into(), values))
}

/// Parse a display-formatted number such as `"1,234"`.
/// Anything that does not parse to a finite value becomes `0.0`.
pub fn parse_numeric(raw: &str) -> f64 {
    let cleaned: String = raw.trim().chars().filter(|&c| c != ',').collect();
    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::{
        HIGH_RATE_COLUMN, LOW_RATE_COLUMN, PRODUCT_COLUMN, SPECIFIC_DUTY_COLUMN,
    };
    use encoding_rs::EUC_KR;
    use std::collections::HashSet;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "품명 ,\"저율관세(추천, %) \", 고율종가(미추천),\"  종량(미추천, 원/kg)\",비고\n";

    fn create_temp_csv(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    fn scenario_csv() -> String {
        format!("{HEADER}Apple,\"1,500\",45,0,x\nRice,5,300,\"1,200\",y\n")
    }

    #[test]
    fn test_load_scenario() {
        let file = create_temp_csv(scenario_csv().as_bytes());
        let table = TariffLoader::load(file.path()).unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.numeric_series(LOW_RATE_COLUMN).unwrap(), vec![1500.0, 5.0]);
        assert_eq!(table.numeric_series(HIGH_RATE_COLUMN).unwrap(), vec![45.0, 300.0]);
        assert_eq!(
            table.numeric_series(SPECIFIC_DUTY_COLUMN).unwrap(),
            vec![0.0, 1200.0]
        );
        assert_eq!(table.product_names(), vec!["Apple", "Rice"]);
    }

    #[test]
    fn test_headers_are_trimmed() {
        let file = create_temp_csv(scenario_csv().as_bytes());
        let table = TariffLoader::load(file.path()).unwrap();

        let names = table.column_names();
        assert_eq!(
            names,
            vec![
                PRODUCT_COLUMN,
                LOW_RATE_COLUMN,
                HIGH_RATE_COLUMN,
                SPECIFIC_DUTY_COLUMN,
                "비고"
            ]
        );
        assert!(names.iter().all(|n| n.trim() == n));
    }

    #[test]
    fn test_invalid_and_missing_cells_become_zero() {
        let csv = format!("{HEADER}Pear,N/A,,abc,z\n");
        let file = create_temp_csv(csv.as_bytes());
        let table = TariffLoader::load(file.path()).unwrap();

        assert_eq!(table.row_count(), 1);
        for column in NUMERIC_COLUMNS {
            assert_eq!(table.numeric_series(column).unwrap(), vec![0.0]);
        }
    }

    #[test]
    fn test_passthrough_columns_stay_textual() {
        let csv = "품명,비고,코드\n쌀,\"1,000\",0101\n";
        let file = create_temp_csv(csv.as_bytes());
        let table = TariffLoader::load(file.path()).unwrap();

        assert_eq!(table.numeric_series("비고"), None);
        assert_eq!(table.display_rows(), vec![vec!["쌀", "1,000", "0101"]]);
    }

    #[test]
    fn test_absent_numeric_columns_are_skipped() {
        let csv = "품명,\"저율관세(추천, %)\"\n쌀,5\n";
        let file = create_temp_csv(csv.as_bytes());
        let table = TariffLoader::load(file.path()).unwrap();

        assert_eq!(table.numeric_series(LOW_RATE_COLUMN).unwrap(), vec![5.0]);
        let names = table.column_names();
        assert!(!names.iter().any(|n| n == HIGH_RATE_COLUMN));
        assert!(!names.iter().any(|n| n == SPECIFIC_DUTY_COLUMN));
    }

    #[test]
    fn test_blank_product_rows_survive_select_all() {
        let csv = "품명,\"저율관세(추천, %)\",고율종가(미추천)\n쌀,5,513\n,40,630\n보리,20,299\n";
        let file = create_temp_csv(csv.as_bytes());
        let table = TariffLoader::load(file.path()).unwrap();
        assert_eq!(table.row_count(), 3);

        let all: HashSet<String> = table.product_names().into_iter().collect();
        let filtered = table.filter_products(&all).unwrap();
        assert_eq!(filtered, table);
        assert_eq!(
            filtered.numeric_series(HIGH_RATE_COLUMN).unwrap(),
            vec![513.0, 630.0, 299.0]
        );
    }

    #[test]
    fn test_header_only_file_is_empty_not_absent() {
        let file = create_temp_csv(HEADER.as_bytes());
        let table = TariffLoader::load(file.path()).unwrap();

        assert!(table.is_empty());
        assert_eq!(table.column_names().len(), 5);
        assert_eq!(table.numeric_series(LOW_RATE_COLUMN), Some(vec![]));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let result = TariffLoader::load(dir.path().join("missing.csv"));
        assert!(matches!(result, Err(LoadError::NotFound { .. })));
        assert!(result.unwrap_err().is_not_found());
    }

    #[test]
    fn test_cp949_file_matches_utf8_file() {
        let csv = scenario_csv();
        let (legacy, _, had_errors) = EUC_KR.encode(&csv);
        assert!(!had_errors);

        let utf8_file = create_temp_csv(csv.as_bytes());
        let legacy_file = create_temp_csv(&legacy);

        let from_utf8 = TariffLoader::load(utf8_file.path()).unwrap();
        let from_legacy = TariffLoader::load(legacy_file.path()).unwrap();
        assert_eq!(from_utf8, from_legacy);
    }

    #[test]
    fn test_utf8_bom_file() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(scenario_csv().as_bytes());
        let file = create_temp_csv(&bytes);
        let table = TariffLoader::load(file.path()).unwrap();

        assert_eq!(table.column_names()[0], PRODUCT_COLUMN);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_undecodable_file() {
        let file = create_temp_csv(&[0x41, 0x80, 0xFF, 0x0A]);
        let result = TariffLoader::load(file.path());
        assert!(matches!(result, Err(LoadError::Decode { .. })));
    }

    #[test]
    fn test_duplicate_headers_after_trim() {
        let file = create_temp_csv("품명, 품명\n쌀,보리\n".as_bytes());
        let result = TariffLoader::load(file.path());
        assert!(matches!(result, Err(LoadError::Parse { .. })));
    }

    #[test]
    fn test_load_is_idempotent() {
        let file = create_temp_csv(scenario_csv().as_bytes());
        let first = TariffLoader::load(file.path()).unwrap();
        let second = TariffLoader::load(file.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parse_numeric() {
        assert_eq!(parse_numeric("1,234"), 1234.0);
        assert_eq!(parse_numeric(" 12.5 "), 12.5);
        assert_eq!(parse_numeric("1,234,567.25"), 1234567.25);
        assert_eq!(parse_numeric("N/A"), 0.0);
        assert_eq!(parse_numeric(""), 0.0);
        assert_eq!(parse_numeric("NaN"), 0.0);
        assert_eq!(parse_numeric("inf"), 0.0);
        assert_eq!(parse_numeric("-Infinity"), 0.0);
        assert_eq!(parse_numeric("1e400"), 0.0);
        assert_eq!(parse_numeric("-3"), -3.0);
    }
}
