use std::collections::HashSet;

use crate::flatten::FlatRecord;
use crate::model::Table;

/// Column holding the originating file name of each row. Normalization
/// later shortens it to `File` like any other column.
pub const FILE_COLUMN: &str = "XML_File";

/// Accumulates one flattened record per source file into a row-oriented
/// table whose column set is the union of every record's keys.
#[derive(Debug, Default)]
pub struct TableBuilder {
    columns: Vec<String>,
    seen: HashSet<String>,
    records: Vec<FlatRecord>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one record, tagging it with its source file name.
    ///
    /// Columns keep first-seen order across the whole batch: a record
    /// introduces its new keys after every column already discovered, so
    /// the first file's columns lead and later files only append.
    pub fn push_record(&mut self, mut record: FlatRecord, file_name: &str) {
        record.insert(FILE_COLUMN.to_string(), file_name.to_string());
        for key in record.keys() {
            if self.seen.insert(key.clone()) {
                self.columns.push(key.clone());
            }
        }
        self.records.push(record);
    }

    /// Materialises the accumulated records as a rectangular table. Cells
    /// a record never recorded are empty strings.
    pub fn into_table(self) -> Table {
        let mut rows = Vec::with_capacity(self.records.len());
        for record in self.records {
            let cells = self
                .columns
                .iter()
                .map(|column| record.get(column).cloned().unwrap_or_default())
                .collect();
            rows.push(cells);
        }

        Table {
            columns: self.columns,
            rows,
        }
    }
}
