use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::error::Result;
use crate::model::Table;

/// Curated projection exported to the `Filtered Data` sheet when the user
/// does not supply their own selection. Names refer to columns after
/// normalization and disambiguation.
pub const DEFAULT_SELECTION: &[&str] = &[
    "StationID",
    "TotalResult",
    "StartDate",
    "EndDate",
    "StepNumber",
    "StepTitle",
    "Result",
    "Utest",
    "StepTitle_2",
    "Ureal_2",
    "Ireal_2",
    "Result_2",
    "File",
    "ProgramFile",
    "StepNumber_3",
    "GoodTime",
    "StepTitle_3",
    "Unom",
    "Frequency_2",
    "StepNumber_4",
    "StepTitle_4",
    "StepNumber_5",
    "PrintTitle_5",
    "Result_5",
];

/// User-supplied replacement for [`DEFAULT_SELECTION`], read from a JSON
/// file of the form `{"columns": ["StationID", ...]}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColumnSelection {
    pub columns: Vec<String>,
}

impl ColumnSelection {
    /// Loads a selection file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&source)?)
    }

    /// The built-in curated column list.
    pub fn default_selection() -> Self {
        Self {
            columns: DEFAULT_SELECTION.iter().map(|name| name.to_string()).collect(),
        }
    }
}

/// Rewrites every column name to its last underscore-delimited segment.
///
/// Lossy and order-independent per column: `Step_1_Result` and
/// `Step_2_Result` both become `Result`. Single-segment names are returned
/// unchanged, so the pass is idempotent. Collisions are expected and left
/// for [`dedupe_columns`].
pub fn normalize_columns(table: &mut Table) {
    for column in &mut table.columns {
        if let Some(index) = column.rfind('_') {
            *column = column[index + 1..].to_string();
        }
    }
}

/// Renames duplicate columns so every name is unique.
///
/// Columns are scanned in their existing left-to-right order with a
/// per-name occurrence counter: the first occurrence keeps its name, the
/// k-th becomes `name_k`. The suffix denotes occurrence rank after
/// normalization, nothing about the field's original tree position.
pub fn dedupe_columns(table: &mut Table) {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for column in &mut table.columns {
        let count = counts.entry(column.clone()).or_insert(0);
        *count += 1;
        if *count > 1 {
            *column = format!("{column}_{count}");
        }
    }
}

/// Projects the table onto the requested columns, in request order.
///
/// Selection is by exact name against the table's current columns. Names
/// with no match are excluded from the projection after a warning; the
/// run never aborts over an absent column.
pub fn project(table: &Table, requested: &[String]) -> Table {
    let mut columns = Vec::with_capacity(requested.len());
    let mut indices = Vec::with_capacity(requested.len());

    for name in requested {
        match table.column_index(name) {
            Some(index) => {
                columns.push(name.clone());
                indices.push(index);
            }
            None => warn!(column = %name, "requested column not present; excluded from projection"),
        }
    }

    let rows = table
        .rows
        .iter()
        .map(|row| indices.iter().map(|&index| row[index].clone()).collect())
        .collect();

    Table { columns, rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
        Table {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    #[test]
    fn normalization_keeps_last_segment_only() {
        let mut subject = table(&["_Step_1_Result", "_Station", "XML_File"], &[]);

        normalize_columns(&mut subject);

        assert_eq!(subject.columns, vec!["Result", "Station", "File"]);
    }

    #[test]
    fn normalization_is_idempotent_on_single_segment_names() {
        let mut subject = table(&["Result", "Station"], &[]);

        normalize_columns(&mut subject);

        assert_eq!(subject.columns, vec!["Result", "Station"]);
    }

    #[test]
    fn dedupe_suffixes_by_occurrence_rank() {
        let mut subject = table(&["Result", "StepTitle", "Result", "Result"], &[]);

        dedupe_columns(&mut subject);

        assert_eq!(
            subject.columns,
            vec!["Result", "StepTitle", "Result_2", "Result_3"]
        );
    }

    #[test]
    fn dedupe_leaves_first_occurrence_unsuffixed() {
        let mut subject = table(&["File", "File"], &[]);

        dedupe_columns(&mut subject);

        assert_eq!(subject.columns, vec!["File", "File_2"]);
        assert!(
            subject
                .columns
                .iter()
                .collect::<std::collections::HashSet<_>>()
                .len()
                == subject.columns.len()
        );
    }

    #[test]
    fn projection_preserves_request_order_and_cells() {
        let subject = table(
            &["A", "B", "C"],
            &[&["a1", "b1", "c1"], &["a2", "b2", "c2"]],
        );
        let requested = vec!["C".to_string(), "A".to_string()];

        let projected = project(&subject, &requested);

        assert_eq!(projected.columns, vec!["C", "A"]);
        assert_eq!(projected.rows, vec![vec!["c1", "a1"], vec!["c2", "a2"]]);
    }

    #[test]
    fn projection_excludes_absent_columns_without_failing() {
        let subject = table(&["A"], &[&["a1"]]);
        let requested = vec!["Missing".to_string(), "A".to_string()];

        let projected = project(&subject, &requested);

        assert_eq!(projected.columns, vec!["A"]);
        assert_eq!(projected.rows, vec![vec!["a1"]]);
    }

    #[test]
    fn selection_file_round_trips_through_json() {
        let parsed: ColumnSelection =
            serde_json::from_str(r#"{"columns": ["StationID", "Result"]}"#).expect("valid JSON");

        assert_eq!(parsed.columns, vec!["StationID", "Result"]);
    }

    #[test]
    fn default_selection_starts_with_station_id() {
        let selection = ColumnSelection::default_selection();

        assert_eq!(selection.columns.first().map(String::as_str), Some("StationID"));
        assert!(selection.columns.iter().any(|name| name == "File"));
    }
}
