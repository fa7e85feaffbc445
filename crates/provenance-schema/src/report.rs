//! # Fixture Validation Report
//!
//! Runs a schema over a directory of provenance fixtures and compares the
//! outcome with what each fixture's name says it should be. Fixture names
//! start with the expected validity followed by an underscore:
//! `valid_minimal.yaml`, `invalid_missing_name.yml`.
//!
//! The report does not assert anything. It prints expected and actual
//! side by side for a person or a CI step to diff. Any failure to load or
//! validate a fixture counts as `invalid`; one broken fixture never stops
//! the others from being reported.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::validate::SchemaValidator;

/// Column names of the TSV report, in output order.
pub const REPORT_HEADER: [&str; 3] = ["file", "expected_validity", "actual_validity"];

/// File extensions that mark a provenance fixture.
const PROVENANCE_EXTENSIONS: [&str; 2] = [".yml", ".yaml"];

/// Observed validity of a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Validity {
    /// The file satisfies the schema.
    Valid,
    /// The file failed to load or violates the schema.
    Invalid,
}

impl Validity {
    /// Lower-case name, as used in fixture file names and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Invalid => "invalid",
        }
    }
}

impl fmt::Display for Validity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A discovered fixture and the validity its name declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvenanceFile {
    /// Full path of the fixture.
    pub path: PathBuf,
    /// Prefix of the file name before the first `_`.
    pub expected_validity: String,
}

/// One line of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    /// Base name of the fixture.
    pub file: String,
    /// Validity declared by the file name.
    pub expected_validity: String,
    /// Validity observed by running the validator.
    pub actual_validity: Validity,
}

impl ReportRow {
    /// True when the observed validity is the one the file name declares.
    pub fn matches_expectation(&self) -> bool {
        self.expected_validity == self.actual_validity.as_str()
    }
}

/// Expected validity encoded in a fixture file name.
///
/// Everything up to the first `_`; the whole name when there is none.
pub fn expected_validity(file_name: &str) -> &str {
    file_name.split('_').next().unwrap_or(file_name)
}

/// Whether a file name marks a provenance fixture.
pub fn is_provenance_file(file_name: &str) -> bool {
    PROVENANCE_EXTENSIONS
        .iter()
        .any(|ext| file_name.ends_with(ext))
}

/// Recursively find provenance fixtures under `dir`.
///
/// Files of a directory come before the contents of its sub-directories.
/// Entries are taken in the order the filesystem lists them; nothing is
/// sorted. A missing or unreadable directory contributes no files.
pub fn find_provenance_files(dir: &Path) -> Vec<ProvenanceFile> {
    let mut found = Vec::new();
    walk_for_provenance_files(dir, &mut found);
    found
}

fn walk_for_provenance_files(dir: &Path, acc: &mut Vec<ProvenanceFile>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            tracing::warn!(
                dir = %dir.display(),
                error = %e,
                "failed to read directory during fixture walk"
            );
            return;
        }
    };

    let mut subdirs = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory entry");
                continue;
            }
        };
        let path = entry.path();
        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            subdirs.push(path);
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        if is_provenance_file(&file_name) {
            acc.push(ProvenanceFile {
                expected_validity: expected_validity(&file_name).to_string(),
                path,
            });
        }
    }

    for subdir in subdirs {
        walk_for_provenance_files(&subdir, acc);
    }
}

/// Validity of a single fixture; any load or validation error is `Invalid`.
pub fn check_file(path: &Path, validator: &SchemaValidator) -> Validity {
    match validator.validate_file(path) {
        Ok(_) => Validity::Valid,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "fixture is invalid");
            Validity::Invalid
        }
    }
}

/// Validate every fixture under `provenance_dir`, in discovery order.
pub fn report(provenance_dir: &Path, validator: &SchemaValidator) -> Vec<ReportRow> {
    let rows: Vec<ReportRow> = find_provenance_files(provenance_dir)
        .into_iter()
        .map(|fixture| ReportRow {
            file: fixture
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            actual_validity: check_file(&fixture.path, validator),
            expected_validity: fixture.expected_validity,
        })
        .collect();

    tracing::info!(
        dir = %provenance_dir.display(),
        schema = validator.schema_name(),
        fixtures = rows.len(),
        mismatches = rows.iter().filter(|r| !r.matches_expectation()).count(),
        "fixture report complete"
    );
    rows
}

/// Write rows as tab-separated values with a header line.
///
/// The header is written even when there are no rows.
pub fn write_report<W: io::Write>(rows: &[ReportRow], out: W) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .terminator(csv::Terminator::Any(b'\n'))
        .has_headers(false)
        .from_writer(out);

    writer.write_record(REPORT_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
