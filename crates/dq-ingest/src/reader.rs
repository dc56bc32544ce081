//! CSV file reading into an all-string Polars DataFrame.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::*;

use crate::error::{IngestError, Result};

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Reject UTF-16 input. A UTF-8 BOM is accepted and stripped from the header.
pub fn validate_encoding(path: &Path) -> Result<()> {
    let mut file = open(path)?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    if bytes_read == 2 {
        let encoding = match buffer {
            [0xFF, 0xFE] => Some("UTF-16 LE"),
            [0xFE, 0xFF] => Some("UTF-16 BE"),
            _ => None,
        };
        if let Some(encoding) = encoding {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding,
            });
        }
    }
    Ok(())
}

/// Read a CSV file with every column as a string.
///
/// Schema inference is disabled so postal codes like `0123` or phone
/// numbers like `00386...` keep their leading zeros.
pub fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    validate_encoding(path)?;

    let parse_err = |e: PolarsError| IngestError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(parse_err)?
        .finish()
        .map_err(parse_err)?;

    if df.height() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Ok(df)
}

/// Materialize a frame column as optional strings.
pub fn column_values(column: &Column) -> Result<Vec<Option<String>>> {
    let column = column.cast(&DataType::String)?;
    let values = column
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect();
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_read_keeps_leading_zeros() {
        let file = create_temp_csv(b"ID,POSTAL_CODE,PHONE_NUMBER\n1,0123,0038641123456\n");
        let df = read_csv_frame(file.path()).unwrap();
        assert_eq!(df.height(), 1);

        let postal = column_values(&df.get_columns()[1]).unwrap();
        assert_eq!(postal, vec![Some("0123".to_string())]);
        let phone = column_values(&df.get_columns()[2]).unwrap();
        assert_eq!(phone, vec![Some("0038641123456".to_string())]);
    }

    #[test]
    fn test_read_header_only_is_empty() {
        let file = create_temp_csv(b"ID,EMAIL\n");
        let result = read_csv_frame(file.path());
        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_utf16_is_rejected() {
        let file = create_temp_csv(&[0xFF, 0xFE, b'I', 0, b'D', 0]);
        let result = validate_encoding(file.path());
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
                ..
            })
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = read_csv_frame(Path::new("/nonexistent/customers.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }
}
