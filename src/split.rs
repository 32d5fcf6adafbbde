//! Splitting spreadsheet workbooks into one CSV file per sheet.
//!
//! Sheets whose name contains the skip marker are left out; every other
//! sheet's used range is written as `<out_dir>/<sheet name>.csv`, with a
//! numeric suffix when two sheet names map to the same file.

use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Range, Reader};

use crate::error::{Error, Result};

/// Marker that flags a sheet as deprecated ("废弃", "abandoned").
pub const DEFAULT_SKIP_MARKER: &str = "废弃";

/// Options for [`split_workbook`].
#[derive(Debug, Clone)]
pub struct SplitOptions {
    /// Sheets whose name contains this token are skipped
    pub skip_marker: String,

    /// Create the output directory if it does not exist
    pub create_dir: bool,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            skip_marker: DEFAULT_SKIP_MARKER.to_string(),
            create_dir: true,
        }
    }
}

impl SplitOptions {
    /// Create default split options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the skip marker.
    pub fn with_skip_marker(mut self, marker: impl Into<String>) -> Self {
        self.skip_marker = marker.into();
        self
    }

    /// Set whether the output directory is created when missing.
    pub fn with_create_dir(mut self, create: bool) -> Self {
        self.create_dir = create;
        self
    }
}

/// One sheet written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetOutput {
    /// Sheet name as stored in the workbook
    pub sheet: String,
    /// CSV file written
    pub path: PathBuf,
    /// Number of records written
    pub rows: usize,
}

/// Summary of a workbook split.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitReport {
    /// Sheets written, in workbook order
    pub written: Vec<SheetOutput>,
    /// Names of the sheets that were skipped
    pub skipped: Vec<String>,
}

impl SplitReport {
    /// Total number of sheets seen.
    pub fn sheet_count(&self) -> usize {
        self.written.len() + self.skipped.len()
    }
}

/// Whether a sheet is flagged as deprecated by `marker`.
///
/// An empty marker never matches.
pub fn is_deprecated_sheet(name: &str, marker: &str) -> bool {
    !marker.is_empty() && name.contains(marker)
}

/// File name used for a sheet's CSV output.
///
/// Path separators in the sheet name are replaced so the file always lands
/// directly inside the output directory.
pub fn sheet_file_name(sheet: &str) -> String {
    let name: String = sheet
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{}.csv", name)
}

/// Pick a file name for `sheet` that is not already in `taken`.
///
/// Distinct sheets can map to the same name (`a/b` and `a_b`); later ones get
/// a numeric suffix (`a_b_2.csv`, `a_b_3.csv`, ...). The chosen name is added
/// to `taken`.
pub fn unique_sheet_file_name(sheet: &str, taken: &mut HashSet<String>) -> String {
    let base = sheet_file_name(sheet);
    if taken.insert(base.clone()) {
        return base;
    }

    let stem = base.trim_end_matches(".csv");
    let mut n = 2;
    loop {
        let candidate = format!("{}_{}.csv", stem, n);
        if taken.insert(candidate.clone()) {
            log::warn!(
                "Sheet {:?} collides with an earlier file name, writing {}",
                sheet,
                candidate
            );
            return candidate;
        }
        n += 1;
    }
}

/// Write a sheet's used range as CSV, one record per row.
///
/// Returns the number of records written.
pub fn write_sheet_csv<W: Write>(range: &Range<Data>, writer: W) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut rows = 0;

    for row in range.rows() {
        csv_writer.write_record(row.iter().map(cell_value))?;
        rows += 1;
    }
    csv_writer.flush()?;

    Ok(rows)
}

fn cell_value(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Split `path` into one CSV per sheet inside `out_dir`.
pub fn split_workbook(
    path: impl AsRef<Path>,
    out_dir: impl AsRef<Path>,
    options: &SplitOptions,
) -> Result<SplitReport> {
    split_workbook_with_progress(path, out_dir, options, |_, _| {})
}

/// Like [`split_workbook`], calling `on_sheet(index, name)` before each sheet.
pub fn split_workbook_with_progress<F>(
    path: impl AsRef<Path>,
    out_dir: impl AsRef<Path>,
    options: &SplitOptions,
    mut on_sheet: F,
) -> Result<SplitReport>
where
    F: FnMut(usize, &str),
{
    let path = path.as_ref();
    let out_dir = out_dir.as_ref();

    let mut workbook = open_workbook_auto(path).map_err(|e| Error::open(path, e))?;

    if options.create_dir {
        fs::create_dir_all(out_dir).map_err(|e| Error::write(out_dir, e))?;
    }

    let mut report = SplitReport::default();
    let mut taken = HashSet::new();
    let sheet_names = workbook.sheet_names().to_vec();
    log::debug!("{}: {} sheets", path.display(), sheet_names.len());

    for (index, sheet) in sheet_names.into_iter().enumerate() {
        on_sheet(index, &sheet);

        if is_deprecated_sheet(&sheet, &options.skip_marker) {
            log::info!("Skipping deprecated sheet: {}", sheet);
            report.skipped.push(sheet);
            continue;
        }

        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|e| Error::open(path, format!("sheet {}: {}", sheet, e)))?;

        let target = out_dir.join(unique_sheet_file_name(&sheet, &mut taken));
        let file = fs::File::create(&target).map_err(|e| Error::write(&target, e))?;
        let rows = write_sheet_csv(&range, io::BufWriter::new(file)).map_err(|e| match e {
            Error::Csv(err) => Error::write(&target, io::Error::from(err)),
            Error::Io(err) => Error::write(&target, err),
            other => other,
        })?;

        log::info!("Wrote {} ({} rows)", target.display(), rows);
        report.written.push(SheetOutput {
            sheet,
            path: target,
            rows,
        });
    }

    Ok(report)
}
