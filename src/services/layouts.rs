//! Layout storage service.
//!
//! This module centralizes all layout file operations. Every layout is a
//! [`DeviceConfig`] stored as pretty-printed JSON in `{root}/{id}.json`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::constants::{DEFAULT_LAYOUT_ID, DEFAULT_LAYOUT_NAME};
use crate::models::{Canvas, DeviceConfig, DeviceIdentity};
use crate::parser::{self, ImportError};
use crate::services::atomic::atomic_write;

/// Errors reported by [`LayoutStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The id is empty once sanitized.
    #[error("layout id is required")]
    InvalidId,
    /// No layout with this id.
    #[error("layout '{0}' not found")]
    NotFound(String),
    /// A layout with this id already exists.
    #[error("layout '{0}' already exists")]
    AlreadyExists(String),
    /// The layout may not be deleted.
    #[error("layout '{0}' cannot be deleted")]
    Protected(String),
    /// The snippet was rejected by the importer.
    #[error(transparent)]
    Import(#[from] ImportError),
    /// Filesystem or serialization failure.
    #[error(transparent)]
    Io(#[from] anyhow::Error),
}

impl StoreError {
    /// Stable machine-readable code reported to callers.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidId => "id_required",
            Self::NotFound(_) => "not_found",
            Self::AlreadyExists(_) => "already_exists",
            Self::Protected(_) => "cannot_delete_default",
            Self::Import(e) => e.code(),
            Self::Io(_) => "io_error",
        }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Listing entry for a stored layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutSummary {
    /// Layout id (file stem)
    pub id: String,
    /// Display name
    pub name: String,
    /// Number of pages
    pub page_count: usize,
    /// Number of widgets across all pages
    pub widget_count: usize,
    /// Last modification time (RFC 3339)
    pub modified: String,
}

/// Sanitizes a layout id for use as a filename.
///
/// Keeps ASCII alphanumerics, `-` and `_`, and converts to lowercase.
///
/// # Examples
///
/// ```
/// # use reterminal_designer::services::layouts::sanitize_layout_id;
/// assert_eq!(sanitize_layout_id("Living Room!").unwrap(), "livingroom");
/// assert!(sanitize_layout_id("../..").is_err());
/// ```
pub fn sanitize_layout_id(raw: &str) -> StoreResult<String> {
    let id: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect::<String>()
        .to_lowercase();
    if id.is_empty() {
        return Err(StoreError::InvalidId);
    }
    Ok(id)
}

/// Directory of layout JSON files.
#[derive(Debug, Clone)]
pub struct LayoutStore {
    root: PathBuf,
}

impl LayoutStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).with_context(|| {
            format!("Failed to create layouts directory: {}", root.display())
        })?;
        Ok(Self { root })
    }

    /// Root directory of the store.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }

    /// Lists stored layouts, newest first.
    ///
    /// Files that cannot be read or parsed are logged and skipped.
    pub fn list(&self) -> StoreResult<Vec<LayoutSummary>> {
        let entries = fs::read_dir(&self.root).with_context(|| {
            format!("Failed to read layouts directory: {}", self.root.display())
        })?;

        let mut found: Vec<(DateTime<Utc>, LayoutSummary)> = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };

            match read_layout(&path) {
                Ok(device) => {
                    let modified = entry
                        .metadata()
                        .and_then(|m| m.modified())
                        .map(DateTime::<Utc>::from)
                        .unwrap_or_default();
                    found.push((
                        modified,
                        LayoutSummary {
                            id,
                            name: device.name.clone(),
                            page_count: device.pages.len(),
                            widget_count: device.widget_count(),
                            modified: modified.to_rfc3339(),
                        },
                    ));
                }
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable layout"),
            }
        }

        found.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.id.cmp(&b.1.id)));
        Ok(found.into_iter().map(|(_, summary)| summary).collect())
    }

    /// Loads a layout, or `None` if no layout has this id.
    pub fn get(&self, id: &str) -> StoreResult<Option<DeviceConfig>> {
        let path = self.path_for(&sanitize_layout_id(id)?);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(read_layout(&path)?))
    }

    /// Saves a layout under its `device_id`.
    pub fn save(&self, device: &DeviceConfig) -> StoreResult<()> {
        let id = sanitize_layout_id(&device.device_id)?;
        let json = serde_json::to_string_pretty(device).context("Failed to serialize layout")?;
        let path = self.path_for(&id);
        atomic_write(&path, &json)
            .with_context(|| format!("Failed to save layout to {}", path.display()))?;
        Ok(())
    }

    /// Creates an empty single-page layout.
    pub fn create(&self, id: &str, name: &str) -> StoreResult<DeviceConfig> {
        let id = sanitize_layout_id(id)?;
        if self.path_for(&id).exists() {
            return Err(StoreError::AlreadyExists(id));
        }

        let mut device = DeviceConfig::new(DeviceIdentity::new(id.as_str(), name));
        device.ensure_pages();
        self.save(&device)?;
        info!(layout = %id, "created layout");
        Ok(device)
    }

    /// Replaces the layout stored under `id`.
    ///
    /// The layout's `device_id` is forced to `id` and its pages normalized.
    pub fn update(&self, id: &str, mut device: DeviceConfig) -> StoreResult<DeviceConfig> {
        device.device_id = sanitize_layout_id(id)?;
        device.ensure_pages();
        self.save(&device)?;
        Ok(device)
    }

    /// Deletes a layout. The default layout cannot be deleted.
    pub fn delete(&self, id: &str) -> StoreResult<()> {
        let id = sanitize_layout_id(id)?;
        if id == DEFAULT_LAYOUT_ID {
            return Err(StoreError::Protected(id));
        }

        let path = self.path_for(&id);
        if !path.exists() {
            return Err(StoreError::NotFound(id));
        }
        fs::remove_file(&path)
            .with_context(|| format!("Failed to delete layout file: {}", path.display()))?;
        info!(layout = %id, "deleted layout");
        Ok(())
    }

    /// Returns the default layout, creating it if missing.
    pub fn get_or_create_default(&self) -> StoreResult<DeviceConfig> {
        match self.get(DEFAULT_LAYOUT_ID)? {
            Some(device) => Ok(device),
            None => self.create(DEFAULT_LAYOUT_ID, DEFAULT_LAYOUT_NAME),
        }
    }

    /// Imports a YAML snippet into the layout `id`.
    ///
    /// An existing layout keeps its name and API token; its pages are
    /// replaced by the imported ones.
    pub fn import_snippet(
        &self,
        id: &str,
        snippet: &str,
        canvas: &Canvas,
    ) -> StoreResult<DeviceConfig> {
        let id = sanitize_layout_id(id)?;

        let mut identity = DeviceIdentity {
            device_id: id.clone(),
            ..DeviceIdentity::default()
        };
        if let Some(existing) = self.get(&id)? {
            identity.name = existing.name;
            identity.api_token = existing.api_token;
        }

        let device = parser::yaml_to_layout_with(snippet, canvas, identity).inspect_err(|e| {
            warn!(layout = %id, code = e.code(), "snippet import rejected");
        })?;
        self.save(&device)?;
        info!(layout = %id, widgets = device.widget_count(), "stored imported layout");
        Ok(device)
    }
}

fn read_layout(path: &Path) -> anyhow::Result<DeviceConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read layout file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse layout file: {}", path.display()))
}
