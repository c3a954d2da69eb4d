// * CSV record store
// * Writes and reads the fixed `Text, Sentiment, Source, Date/Time, User ID, Location,
// * Confidence Score` schema. A missing path is a user cancellation, not an error.

use crate::config::constants::RECORD_COLUMNS;
use crate::persistence::record::ReviewRecord;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Errors raised by the record store
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O failure on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV failure: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column '{0}'")]
    MissingColumn(String),
}

/// Outcome of an operation that needs the user to pick a file
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<T> {
    Chosen(T),
    Cancelled,
}

impl<T> Selection<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub fn chosen(self) -> Option<T> {
        match self {
            Self::Chosen(value) => Some(value),
            Self::Cancelled => None,
        }
    }
}

/// Untyped view of a stored file; consumers degrade when columns are missing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RecordTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Values of one column, `None` if the column is absent. Short rows yield "".
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(idx).map(String::as_str).unwrap_or(""))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Writes the header and one row per record
pub fn write_records_to<W: Write>(writer: W, records: &[ReviewRecord]) -> Result<(), StorageError> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    writer.write_record(RECORD_COLUMNS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_records(path: &Path, records: &[ReviewRecord]) -> Result<(), StorageError> {
    let file = File::create(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_records_to(file, records)?;
    tracing::info!(path = %path.display(), records = records.len(), "Records saved");
    Ok(())
}

/// Strict typed reader; every row must match the record schema
pub fn read_records_from<R: Read>(reader: R) -> Result<Vec<ReviewRecord>, StorageError> {
    let mut reader = ReaderBuilder::new().from_reader(reader);
    let headers = reader.headers()?.clone();
    for column in RECORD_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(StorageError::MissingColumn(column.to_string()));
        }
    }
    reader
        .deserialize()
        .collect::<Result<Vec<ReviewRecord>, csv::Error>>()
        .map_err(StorageError::from)
}

pub fn read_records(path: &Path) -> Result<Vec<ReviewRecord>, StorageError> {
    read_records_from(open(path)?)
}

/// Lenient reader; keeps whatever columns the file has
pub fn read_table_from<R: Read>(reader: R) -> Result<RecordTable, StorageError> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader.headers()?.iter().map(str::to_string).collect();
    let rows = reader
        .records()
        .map(|row| row.map(|r| r.iter().map(str::to_string).collect()))
        .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;
    Ok(RecordTable { headers, rows })
}

pub fn read_table(path: &Path) -> Result<RecordTable, StorageError> {
    let table = read_table_from(open(path)?)?;
    tracing::info!(path = %path.display(), rows = table.len(), "Record table loaded");
    Ok(table)
}

/// Saves to the chosen path, or reports the cancellation
pub fn save(path: Option<&Path>, records: &[ReviewRecord]) -> Result<Selection<PathBuf>, StorageError> {
    match path {
        Some(path) => {
            write_records(path, records)?;
            Ok(Selection::Chosen(path.to_path_buf()))
        }
        None => Ok(Selection::Cancelled),
    }
}

/// Loads the chosen file, or reports the cancellation
pub fn load(path: Option<&Path>) -> Result<Selection<RecordTable>, StorageError> {
    match path {
        Some(path) => read_table(path).map(Selection::Chosen),
        None => Ok(Selection::Cancelled),
    }
}

fn open(path: &Path) -> Result<File, StorageError> {
    File::open(path).map_err(|source| StorageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::types::SentimentLabel;
    use chrono::NaiveDate;

    fn record(text: &str, sentiment: SentimentLabel, confidence: f64) -> ReviewRecord {
        ReviewRecord {
            text: text.to_string(),
            sentiment,
            source: "Web".to_string(),
            timestamp: NaiveDate::from_ymd_opt(2024, 1, 2)
                .unwrap()
                .and_hms_opt(3, 4, 5)
                .unwrap(),
            user_id: "Unknown".to_string(),
            location: "Unknown".to_string(),
            confidence,
        }
    }

    #[test]
    fn test_header_written_exactly() {
        let mut buf = Vec::new();
        write_records_to(&mut buf, &[]).unwrap();

        let out = String::from_utf8(buf).unwrap();
        assert_eq!(
            out,
            "Text,Sentiment,Source,Date/Time,User ID,Location,Confidence Score\n"
        );
    }

    #[test]
    fn test_row_layout() {
        let mut buf = Vec::new();
        write_records_to(&mut buf, &[record("Cold, stale bread.", SentimentLabel::Negative, -0.25)])
            .unwrap();

        let out = String::from_utf8(buf).unwrap();
        let row = out.lines().nth(1).unwrap();
        assert_eq!(row, "\"Cold, stale bread.\",NEGATIVE,Web,2024-01-02 03:04:05,Unknown,Unknown,-0.25");
    }

    #[test]
    fn test_typed_read_back() {
        let records = vec![
            record("Lovely view", SentimentLabel::Positive, 0.5),
            record("Meh", SentimentLabel::Neutral, 0.1),
        ];
        let mut buf = Vec::new();
        write_records_to(&mut buf, &records).unwrap();

        let loaded = read_records_from(buf.as_slice()).unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_typed_read_missing_column() {
        let data = "Text,Sentiment\nhello,POSITIVE\n";
        let err = read_records_from(data.as_bytes()).unwrap_err();
        assert!(matches!(err, StorageError::MissingColumn(ref c) if c == "Source"));
    }

    #[test]
    fn test_typed_read_rejects_unknown_label() {
        let data = "Text,Sentiment,Source,Date/Time,User ID,Location,Confidence Score\n\
                    hi,MIXED,Web,2024-01-02 03:04:05,Unknown,Unknown,0.1\n";
        assert!(matches!(read_records_from(data.as_bytes()), Err(StorageError::Csv(_))));
    }

    #[test]
    fn test_table_tolerates_partial_schema() {
        let data = "Sentiment,Other\nPOSITIVE,x\nNEGATIVE\n";
        let table = read_table_from(data.as_bytes()).unwrap();

        assert!(table.has_column("Sentiment"));
        assert!(!table.has_column("Text"));
        assert_eq!(table.column("Other").unwrap(), vec!["x", ""]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_save_and_load_cancelled() {
        assert!(save(None, &[]).unwrap().is_cancelled());
        assert!(load(None).unwrap().is_cancelled());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load(Some(Path::new("/definitely/not/here.csv"))).unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reviews.csv");
        let records = vec![record("Fine", SentimentLabel::Neutral, 0.02)];

        let saved = save(Some(&path), &records).unwrap();
        assert_eq!(saved, Selection::Chosen(path.clone()));

        let table = load(Some(&path)).unwrap().chosen().unwrap();
        assert_eq!(table.headers, RECORD_COLUMNS.to_vec());
        assert_eq!(table.column("Text").unwrap(), vec!["Fine"]);
        assert_eq!(read_records(&path).unwrap(), records);
    }
}
