//! Host platform objects and their YAML-backed state files.
//!
//! # Storage layout
//!
//! ```text
//! <root>/
//!   folders/
//!     <folder_name>/
//!       folder.yaml           (mode 0600)
//!   projects/
//!     <project_name>/
//!       project.yaml          (mode 0600)
//!       runs/
//!         <number>.yaml       (one file per run — mode 0600)
//! ```
//!
//! # API pattern
//!
//! Every constructor takes an explicit `root: &Path`; tests run against a
//! `TempDir` root. `create` is idempotent: if the state file already exists
//! it is loaded and returned unchanged. Each object remembers the path it
//! was loaded from and saves back to it on [`Attachments::persist`].
//!
//! The attachment slot is a plain string map serialized inline with the
//! object state, so anything written to it survives a reload.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use stamp_core::{Attachments, PersistError};

use crate::error::HostError;

// ---------------------------------------------------------------------------
// 1. Newtypes
// ---------------------------------------------------------------------------

/// A strongly-typed name for a project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectName(pub String);

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for ProjectName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ProjectName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A strongly-typed name for a folder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FolderName(pub String);

impl fmt::Display for FolderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for FolderName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for FolderName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// Sequential number of a run within its project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RunNumber(pub u32);

impl fmt::Display for RunNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u32> for RunNumber {
    fn from(n: u32) -> Self {
        Self(n)
    }
}

// ---------------------------------------------------------------------------
// 2. Path helpers
// ---------------------------------------------------------------------------

/// `<root>/projects/<project>/project.yaml` — pure, no I/O.
pub fn project_path(root: &Path, name: &ProjectName) -> PathBuf {
    root.join("projects").join(&name.0).join("project.yaml")
}

/// `<root>/projects/<project>/runs/<number>.yaml` — pure, no I/O.
pub fn run_path(root: &Path, project: &ProjectName, number: RunNumber) -> PathBuf {
    root.join("projects")
        .join(&project.0)
        .join("runs")
        .join(format!("{}.yaml", number.0))
}

/// `<root>/folders/<folder>/folder.yaml` — pure, no I/O.
pub fn folder_path(root: &Path, name: &FolderName) -> PathBuf {
    root.join("folders").join(&name.0).join("folder.yaml")
}

// ---------------------------------------------------------------------------
// 3. Object types
// ---------------------------------------------------------------------------

/// A project: the configured, long-lived thing that runs are recorded under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub name: ProjectName,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    attachments: BTreeMap<String, String>,
    #[serde(skip)]
    path: PathBuf,
}

/// One recorded execution of a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Run {
    pub project: ProjectName,
    pub number: RunNumber,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    attachments: BTreeMap<String, String>,
    #[serde(skip)]
    path: PathBuf,
}

/// A grouping container for projects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Folder {
    pub name: FolderName,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    attachments: BTreeMap<String, String>,
    #[serde(skip)]
    path: PathBuf,
}

impl Project {
    /// Create `<root>/projects/<name>/project.yaml`, or load it if it
    /// already exists (idempotent).
    pub fn create(root: &Path, name: impl Into<ProjectName>) -> Result<Self, HostError> {
        let name = name.into();
        let path = project_path(root, &name);
        if path.exists() {
            return Self::load(root, &name);
        }
        let project = Self {
            name,
            created_at: Utc::now(),
            attachments: BTreeMap::new(),
            path,
        };
        save_state(&project.path, &project)?;
        Ok(project)
    }

    /// Load a project from its state file.
    pub fn load(root: &Path, name: &ProjectName) -> Result<Self, HostError> {
        let path = project_path(root, name);
        let mut project: Self = load_state(&path)?;
        project.path = path;
        Ok(project)
    }
}

impl Run {
    /// Create `<root>/projects/<project>/runs/<number>.yaml`, or load it if
    /// it already exists (idempotent).
    pub fn create(
        root: &Path,
        project: &ProjectName,
        number: impl Into<RunNumber>,
    ) -> Result<Self, HostError> {
        let number = number.into();
        let path = run_path(root, project, number);
        if path.exists() {
            return Self::load(root, project, number);
        }
        let run = Self {
            project: project.clone(),
            number,
            started_at: Utc::now(),
            attachments: BTreeMap::new(),
            path,
        };
        save_state(&run.path, &run)?;
        Ok(run)
    }

    /// Load a run from its state file.
    pub fn load(root: &Path, project: &ProjectName, number: RunNumber) -> Result<Self, HostError> {
        let path = run_path(root, project, number);
        let mut run: Self = load_state(&path)?;
        run.path = path;
        Ok(run)
    }
}

impl Folder {
    /// Create `<root>/folders/<name>/folder.yaml`, or load it if it already
    /// exists (idempotent).
    pub fn create(root: &Path, name: impl Into<FolderName>) -> Result<Self, HostError> {
        let name = name.into();
        let path = folder_path(root, &name);
        if path.exists() {
            return Self::load(root, &name);
        }
        let folder = Self {
            name,
            created_at: Utc::now(),
            attachments: BTreeMap::new(),
            path,
        };
        save_state(&folder.path, &folder)?;
        Ok(folder)
    }

    /// Load a folder from its state file.
    pub fn load(root: &Path, name: &FolderName) -> Result<Self, HostError> {
        let path = folder_path(root, name);
        let mut folder: Self = load_state(&path)?;
        folder.path = path;
        Ok(folder)
    }
}

// ---------------------------------------------------------------------------
// 4. Attachments
// ---------------------------------------------------------------------------

macro_rules! impl_attachments {
    ($ty:ty) => {
        impl Attachments for $ty {
            fn attachment(&self, key: &str) -> Option<&str> {
                self.attachments.get(key).map(String::as_str)
            }

            fn set_attachment(&mut self, key: &str, value: String) {
                self.attachments.insert(key.to_owned(), value);
            }

            fn persist(&mut self) -> Result<(), PersistError> {
                save_state(&self.path, self).map_err(PersistError::new)
            }
        }
    };
}

impl_attachments!(Project);
impl_attachments!(Run);
impl_attachments!(Folder);

// ---------------------------------------------------------------------------
// 5. Load / save (atomic)
// ---------------------------------------------------------------------------

fn load_state<T: DeserializeOwned>(path: &Path) -> Result<T, HostError> {
    if !path.exists() {
        return Err(HostError::NotFound { path: path.to_owned() });
    }
    let contents = std::fs::read_to_string(path)?;
    serde_yaml::from_str(&contents)
        .map_err(|e| HostError::Parse { path: path.to_owned(), source: e })
}

/// Atomically save object state as YAML.
///
/// Write flow: create parent dirs (mode `0700`) → serialize → `.yaml.tmp`
/// sibling → `chmod 0600` → `rename`. The `.tmp` sibling keeps the rename
/// on one filesystem.
fn save_state<T: Serialize>(path: &Path, value: &T) -> Result<(), HostError> {
    let parent = path.parent().ok_or_else(|| HostError::NotFound { path: path.to_owned() })?;
    if !parent.exists() {
        std::fs::create_dir_all(parent)?;
        set_dir_permissions(parent)?;
    }
    let tmp = path.with_extension("yaml.tmp");

    let yaml = serde_yaml::to_string(value)?;
    std::fs::write(&tmp, yaml)?;
    set_file_permissions(&tmp)?;
    std::fs::rename(&tmp, path)?;
    tracing::debug!(path = %path.display(), "saved object state");
    Ok(())
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), HostError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), HostError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), HostError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), HostError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
