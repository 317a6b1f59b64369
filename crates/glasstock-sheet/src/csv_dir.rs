//! Directory-of-CSV worksheet store.
//!
//! Each worksheet lives in `<root>/<worksheet>.csv`, header first. Writes go
//! to a temporary file in the same directory, are fsynced, and then renamed
//! over the target, so a failed write never leaves a half-written worksheet.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::error::SheetError;
use crate::sheet::Sheet;
use crate::store::SheetStore;

/// A [`SheetStore`] keeping one CSV file per worksheet.
#[derive(Clone, Debug)]
pub struct CsvDirStore {
    root: PathBuf,
}

impl CsvDirStore {
    /// Create a store rooted at `root`. The directory is created on first
    /// write if it does not exist.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory holding the worksheets.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `worksheet`.
    ///
    /// # Errors
    /// Returns [`SheetError::InvalidName`] if the name is empty or would
    /// escape the store directory.
    pub fn worksheet_path(&self, worksheet: &str) -> Result<PathBuf, SheetError> {
        validate_name(worksheet)?;
        Ok(self.root.join(format!("{worksheet}.csv")))
    }
}

fn validate_name(name: &str) -> Result<(), SheetError> {
    let reason = if name.trim().is_empty() {
        Some("worksheet name must not be empty")
    } else if name.starts_with('.') {
        Some("worksheet name must not start with '.'")
    } else if name.contains(['/', '\\']) {
        Some("worksheet name must not contain path separators")
    } else {
        None
    };
    match reason {
        Some(reason) => Err(SheetError::InvalidName {
            name: name.to_owned(),
            reason: reason.to_owned(),
        }),
        None => Ok(()),
    }
}

/// Parse CSV text into a sheet. The first record is the header.
///
/// Returns `Ok(None)` for input with no records at all.
///
/// # Errors
/// Returns [`SheetError::Csv`] if the input is not valid CSV. `origin` is only
/// used for the error message.
pub fn parse_csv<R: std::io::Read>(input: R, origin: &Path) -> Result<Option<Sheet>, SheetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| SheetError::Csv {
            path: origin.to_owned(),
            source,
        })?;
        records.push(record.iter().map(str::to_owned).collect::<Vec<_>>());
    }

    let mut records = records.into_iter();
    let Some(header) = records.next() else {
        return Ok(None);
    };
    Ok(Some(Sheet::new(header, records.collect())))
}

impl SheetStore for CsvDirStore {
    #[instrument(skip(self), fields(root = %self.root.display()))]
    fn read(&self, worksheet: &str) -> Result<Option<Sheet>, SheetError> {
        let path = self.worksheet_path(worksheet)?;
        let file = match fs::File::open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "worksheet file absent");
                return Ok(None);
            }
            Err(e) => return Err(SheetError::Io(e)),
        };
        parse_csv(file, &path)
    }

    #[instrument(skip(self, sheet), fields(root = %self.root.display(), rows = sheet.rows.len()))]
    fn write(&self, worksheet: &str, sheet: &Sheet) -> Result<(), SheetError> {
        let path = self.worksheet_path(worksheet)?;
        fs::create_dir_all(&self.root)?;

        // Same directory as the target so the final rename stays on one filesystem.
        let mut tmp = tempfile::NamedTempFile::new_in(&self.root)?;
        {
            let to_csv_err = |source| SheetError::Csv {
                path: path.clone(),
                source,
            };
            let mut writer = csv::WriterBuilder::new()
                .flexible(true)
                .from_writer(tmp.as_file_mut());
            writer.write_record(&sheet.header).map_err(to_csv_err)?;
            for row in &sheet.rows {
                writer.write_record(row).map_err(to_csv_err)?;
            }
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| SheetError::Io(e.error))?;

        debug!(path = %path.display(), "worksheet written");
        Ok(())
    }
}
