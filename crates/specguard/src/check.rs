//! Lock-directory compatibility check.
//!
//! Every spec in the source directory is compared against the last accepted
//! version of itself, stored as `<name>.lock` in the lock directory. A spec
//! seen for the first time is accepted as is. A compatible spec replaces its
//! lock; an incompatible one fails the run and leaves the lock untouched.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

use specguard_diff::check_compatibility;
use specguard_spec_parser::{parse_document_file, Document, ParseError};
use specguard_telemetry::{
    log_check_skipped, log_check_started, log_group_failed, log_group_initialized,
    log_group_passed, log_violation,
};

/// Directory used for both specs and locks when nothing else is configured.
pub const DEFAULT_SPEC_DIR: &str = "src/main/swagger";

/// Extension of accepted spec snapshots.
pub const LOCK_EXTENSION: &str = "lock";

const SOURCE_EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Configuration for a lock-directory check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    /// Directory holding the current specs.
    pub source_dir: PathBuf,
    /// Directory holding the accepted `<name>.lock` snapshots.
    pub lock_dir: PathBuf,
    /// Skip the check entirely.
    pub skip: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from(DEFAULT_SPEC_DIR),
            lock_dir: PathBuf::from(DEFAULT_SPEC_DIR),
            skip: false,
        }
    }
}

impl CheckConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.source_dir = dir.into();
        self
    }

    pub fn with_lock_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.lock_dir = dir.into();
        self
    }

    pub fn with_skip(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }

    /// Where the lock for `group` lives.
    pub fn lock_path(&self, group: &str) -> PathBuf {
        self.lock_dir.join(format!("{}.{}", group, LOCK_EXTENSION))
    }
}

/// Errors that stop a check run.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", file.display())]
    Parse {
        file: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("lock file {} has no corresponding spec for group {group}", path.display())]
    OrphanLock { group: String, path: PathBuf },

    #[error("backwards compatibility check failed for group {group}")]
    Incompatible {
        group: String,
        violations: Vec<String>,
    },
}

impl CheckError {
    fn io(path: &Path, source: io::Error) -> Self {
        CheckError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// What happened to a single group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupOutcome {
    /// No lock existed; the spec was copied to a new lock.
    Initialized,
    /// The spec is compatible with its lock; the lock was updated.
    Passed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupReport {
    pub group: String,
    pub outcome: GroupOutcome,
}

/// Result of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// True when nothing was checked, either on request or because the
    /// source directory does not exist.
    pub skipped: bool,
    pub groups: Vec<GroupReport>,
}

impl CheckReport {
    fn skipped() -> Self {
        Self {
            skipped: true,
            groups: Vec::new(),
        }
    }

    pub fn count(&self, outcome: GroupOutcome) -> usize {
        self.groups.iter().filter(|g| g.outcome == outcome).count()
    }
}

/// Files making up one group. At least one side is always set.
#[derive(Debug, Default)]
struct Group {
    source: Option<PathBuf>,
    lock: Option<PathBuf>,
}

/// Run the check described by `config`.
///
/// Groups are processed in name order and the run stops at the first group
/// that fails.
pub fn run_check(config: &CheckConfig) -> Result<CheckReport, CheckError> {
    if config.skip {
        log_check_skipped!(reason = "disabled", "skipping backwards compatibility check");
        return Ok(CheckReport::skipped());
    }

    if !config.source_dir.is_dir() {
        log_check_skipped!(
            reason = "missing_source_dir",
            source_dir = %config.source_dir.display(),
            "source directory does not exist, skipping"
        );
        return Ok(CheckReport::skipped());
    }

    let groups = collect_groups(config)?;
    log_check_started!(
        source_dir = %config.source_dir.display(),
        lock_dir = %config.lock_dir.display(),
        groups = groups.len(),
        "checking backwards compatibility"
    );

    let mut report = CheckReport::default();
    for (name, group) in &groups {
        let outcome = check_group(config, name, group)?;
        report.groups.push(GroupReport {
            group: name.clone(),
            outcome,
        });
    }

    Ok(report)
}

fn check_group(config: &CheckConfig, name: &str, group: &Group) -> Result<GroupOutcome, CheckError> {
    let Some(source) = &group.source else {
        let path = group.lock.clone().unwrap_or_else(|| config.lock_path(name));
        log_group_failed!(
            group = %name,
            lock = %path.display(),
            "lock file without a corresponding spec"
        );
        return Err(CheckError::OrphanLock {
            group: name.to_string(),
            path,
        });
    };

    let lock = config.lock_path(name);
    let Some(existing) = &group.lock else {
        accept(source, &lock, &config.lock_dir)?;
        log_group_initialized!(
            group = %name,
            lock = %lock.display(),
            "no lock file found, initialized from spec"
        );
        return Ok(GroupOutcome::Initialized);
    };

    let old = load(existing)?;
    let new = load(source)?;

    let violations = check_compatibility(&old, &new);
    if !violations.is_empty() {
        for violation in &violations {
            log_violation!(group = %name, "{}", violation);
        }
        log_group_failed!(
            group = %name,
            violations = violations.len(),
            "backwards compatibility check failed"
        );
        return Err(CheckError::Incompatible {
            group: name.to_string(),
            violations,
        });
    }

    accept(source, &lock, &config.lock_dir)?;
    log_group_passed!(group = %name, "spec is backwards compatible, lock updated");
    Ok(GroupOutcome::Passed)
}

fn load(path: &Path) -> Result<Document, CheckError> {
    parse_document_file(path).map_err(|source| CheckError::Parse {
        file: path.to_path_buf(),
        source,
    })
}

/// Copy `source` over the lock, creating the lock directory if needed.
fn accept(source: &Path, lock: &Path, lock_dir: &Path) -> Result<(), CheckError> {
    fs::create_dir_all(lock_dir).map_err(|e| CheckError::io(lock_dir, e))?;
    fs::copy(source, lock).map_err(|e| CheckError::io(lock, e))?;
    Ok(())
}

/// Pair specs with their locks by file stem.
fn collect_groups(config: &CheckConfig) -> Result<BTreeMap<String, Group>, CheckError> {
    let mut groups: BTreeMap<String, Group> = BTreeMap::new();

    for path in list_files(&config.source_dir)? {
        let Some((stem, ext)) = split_name(&path) else {
            continue;
        };
        if !SOURCE_EXTENSIONS.contains(&ext.as_str()) {
            continue;
        }
        let group = groups.entry(stem.clone()).or_default();
        match &group.source {
            Some(first) => tracing::warn!(
                group = %stem,
                kept = %first.display(),
                ignored = %path.display(),
                "several specs share a name, keeping the first"
            ),
            None => group.source = Some(path),
        }
    }

    if config.lock_dir.is_dir() {
        for path in list_files(&config.lock_dir)? {
            let Some((stem, ext)) = split_name(&path) else {
                continue;
            };
            if ext == LOCK_EXTENSION {
                groups.entry(stem).or_default().lock = Some(path);
            }
        }
    }

    Ok(groups)
}

/// Regular files in `dir`, sorted by path.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>, CheckError> {
    let entries = fs::read_dir(dir).map_err(|e| CheckError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| CheckError::io(dir, e))?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn split_name(path: &Path) -> Option<(String, String)> {
    let stem = path.file_stem()?.to_str()?;
    let ext = path.extension()?.to_str()?;
    Some((stem.to_string(), ext.to_ascii_lowercase()))
}
