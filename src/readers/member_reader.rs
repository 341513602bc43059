use crate::error::Result;
use crate::models::RawRow;
use crate::utils::constants::DEFAULT_BUFFER_SIZE;
use csv::{ReaderBuilder, StringRecord, StringRecordsIntoIter};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Reads a header-bearing member export into [`RawRow`]s.
///
/// Ragged rows are accepted: cells past the header are ignored and missing
/// trailing cells are simply absent from the row.
pub struct MemberReader {
    delimiter: u8,
}

impl MemberReader {
    pub fn new() -> Self {
        Self { delimiter: b',' }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Open a CSV file and stream its rows
    pub fn read_rows(&self, path: &Path) -> Result<MemberRows<BufReader<File>>> {
        let file = File::open(path)?;
        debug!(path = %path.display(), "Opened member export");
        self.rows_from_reader(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file))
    }

    /// Stream rows from any reader
    pub fn rows_from_reader<R: Read>(&self, reader: R) -> Result<MemberRows<R>> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(reader);

        let headers: StringRecord = csv_reader
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, name)| {
                if i == 0 {
                    name.trim_start_matches(BYTE_ORDER_MARK)
                } else {
                    name
                }
            })
            .collect();

        debug!(columns = headers.len(), "Read CSV header");

        Ok(MemberRows {
            headers,
            records: csv_reader.into_records(),
        })
    }

    /// Read every row into memory
    pub fn read_all(&self, path: &Path) -> Result<Vec<RawRow>> {
        self.read_rows(path)?.collect()
    }
}

impl Default for MemberReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the rows of a member export
pub struct MemberRows<R> {
    headers: StringRecord,
    records: StringRecordsIntoIter<R>,
}

impl<R> MemberRows<R> {
    fn to_raw_row(&self, record: &StringRecord) -> RawRow {
        self.headers
            .iter()
            .zip(record.iter())
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }
}

impl<R: Read> Iterator for MemberRows<R> {
    type Item = Result<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.records.next()? {
            Ok(record) => Some(Ok(self.to_raw_row(&record))),
            Err(e) => Some(Err(e.into())),
        }
    }
}
