use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::aggregate::TableBuilder;
use crate::columns;
use crate::error::Result;
use crate::flatten;
use crate::io::{excel, xml};

/// Name of the workbook written into the output directory.
pub const OUTPUT_FILE_NAME: &str = "aligned_combined_data.xlsx";
/// Sheet holding every discovered column.
pub const RAW_SHEET: &str = "Raw Data";
/// Sheet holding the curated projection.
pub const FILTERED_SHEET: &str = "Filtered Data";

/// Outcome of one batch run, reported back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignSummary {
    /// `.xml` entries found in the input directory.
    pub files_found: usize,
    /// Files skipped because they failed to parse.
    pub files_skipped: usize,
    /// Rows in the raw table.
    pub rows: usize,
    /// Columns in the raw table after normalization and deduplication.
    pub columns: usize,
    /// Full path of the written workbook.
    pub output_path: PathBuf,
}

/// Converts every XML report in `input` into one workbook under `output`.
///
/// Each file is parsed and flattened into one row; the rows are aggregated
/// into a single table whose columns are then shortened to their last path
/// segment and disambiguated by occurrence rank. The full table and the
/// `selection` projection are written as the workbook's two sheets. Files
/// that fail to parse are skipped with a warning and counted in the
/// summary; selection names absent from the discovered columns are
/// excluded from the projection, never fatal.
#[instrument(
    level = "info",
    skip_all,
    fields(input = %input.display(), output = %output.display())
)]
pub fn align_directory(input: &Path, output: &Path, selection: &[String]) -> Result<AlignSummary> {
    let files = list_report_files(input)?;
    info!(file_count = files.len(), "discovered XML reports");

    let mut builder = TableBuilder::new();
    let mut skipped = 0usize;

    for path in &files {
        match xml::read_document(path) {
            Ok(root) => {
                let record = flatten::flatten_document(&root);
                let file_name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                builder.push_record(record, &file_name);
            }
            Err(error) => {
                warn!(file = %path.display(), %error, "skipping malformed report");
                skipped += 1;
            }
        }
    }

    let mut table = builder.into_table();
    columns::normalize_columns(&mut table);
    columns::dedupe_columns(&mut table);
    debug!(
        row_count = table.rows.len(),
        column_count = table.columns.len(),
        "aggregated table ready"
    );

    let filtered = columns::project(&table, selection);
    let output_path = output.join(OUTPUT_FILE_NAME);
    excel::write_workbook(
        &output_path,
        &[(RAW_SHEET, &table), (FILTERED_SHEET, &filtered)],
    )?;
    info!(path = %output_path.display(), "workbook written");

    Ok(AlignSummary {
        files_found: files.len(),
        files_skipped: skipped,
        rows: table.rows.len(),
        columns: table.columns.len(),
        output_path,
    })
}

/// Lists the `.xml` entries of a directory in enumeration order. Row order
/// of the final table follows this order, which is platform-dependent.
fn list_report_files(input: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(input)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if entry.file_name().to_string_lossy().ends_with(".xml") {
            files.push(path);
        }
    }
    Ok(files)
}
