//! Group manager — CRUD, toggling, import/export, persistence.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, info};

use launchpad_core::{Error, Result, DEFAULT_STORAGE_KEY};
use launchpad_store::KeyValueStore;

use crate::codec;
use crate::normalize::{normalize_groups, unique_id};
use crate::types::*;

/// Owns the ordered group list and writes it through to a [`KeyValueStore`]
/// after every change.
///
/// Unknown group ids and project paths are not errors: the operation does
/// nothing and reports `false`.
pub struct GroupManager {
    store: Arc<dyn KeyValueStore>,
    key: String,
    groups: RwLock<Vec<Group>>,
}

impl GroupManager {
    /// Create a manager over `store`, loading groups saved under the default key.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    /// Create a manager over `store`, loading groups saved under `key`.
    ///
    /// Stored data goes through the normalizer, so legacy shapes load fine.
    pub fn with_key(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let groups = match store.load(&key)? {
            Some(raw) => normalize_groups(&raw),
            None => Vec::new(),
        };
        info!("GroupManager: {} groups loaded from {}", groups.len(), key);

        Ok(Self {
            store,
            key,
            groups: RwLock::new(groups),
        })
    }

    // ---------------------------------------------------------------
    // Reads
    // ---------------------------------------------------------------

    /// All groups in display order.
    pub fn groups(&self) -> Vec<Group> {
        self.groups.read().clone()
    }

    /// Get a group by ID.
    pub fn get(&self, id: &str) -> Option<Group> {
        self.groups.read().iter().find(|g| g.id == id).cloned()
    }

    /// First group whose name matches `name` after trimming.
    pub fn find_by_name(&self, name: &str) -> Option<Group> {
        let name = name.trim();
        self.groups.read().iter().find(|g| g.name == name).cloned()
    }

    pub fn len(&self) -> usize {
        self.groups.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.read().is_empty()
    }

    /// Every project of every group, in display order.
    pub fn all_projects(&self) -> Vec<ProjectEntry> {
        self.groups
            .read()
            .iter()
            .flat_map(|group| {
                group.projects.iter().map(move |project| ProjectEntry {
                    group_id: group.id.clone(),
                    group_name: group.name.clone(),
                    project: project.clone(),
                })
            })
            .collect()
    }

    /// Whether a project is enabled. Unknown groups and paths read as enabled.
    pub fn project_state(&self, group_id: &str, path: &str) -> bool {
        self.groups
            .read()
            .iter()
            .find(|g| g.id == group_id)
            .and_then(|g| g.project(path.trim()))
            .map_or(true, |p| p.enabled)
    }

    // ---------------------------------------------------------------
    // CRUD
    // ---------------------------------------------------------------

    /// Append a new empty group. Blank names are rejected.
    pub fn create_group(&self, name: &str) -> Result<Group> {
        let name = required(name, "group name")?;

        let mut groups = self.groups.write();
        let taken: HashSet<String> = groups.iter().map(|g| g.id.clone()).collect();
        let group = Group {
            id: unique_id(&taken),
            name: name.to_string(),
            projects: Vec::new(),
        };
        groups.push(group.clone());
        self.persist(&groups)?;

        debug!("Created group {} ({})", group.name, group.id);
        Ok(group)
    }

    /// Delete a group. Returns true if found and deleted.
    pub fn delete_group(&self, group_id: &str) -> Result<bool> {
        let mut groups = self.groups.write();
        let len_before = groups.len();
        groups.retain(|g| g.id != group_id);
        if groups.len() == len_before {
            return Ok(false);
        }
        self.persist(&groups)?;

        debug!("Deleted group {}", group_id);
        Ok(true)
    }

    /// Rename a group. Returns false if the group does not exist.
    pub fn update_group_name(&self, group_id: &str, name: &str) -> Result<bool> {
        let name = required(name, "group name")?;

        let mut groups = self.groups.write();
        let Some(group) = groups.iter_mut().find(|g| g.id == group_id) else {
            return Ok(false);
        };
        group.name = name.to_string();
        self.persist(&groups)?;
        Ok(true)
    }

    /// Append an enabled project. Returns false if the group does not exist
    /// or already holds `path`.
    pub fn add_project_to_group(&self, group_id: &str, path: &str) -> Result<bool> {
        let path = required(path, "project path")?;

        let mut groups = self.groups.write();
        let Some(group) = groups.iter_mut().find(|g| g.id == group_id) else {
            return Ok(false);
        };
        if group.contains(path) {
            return Ok(false);
        }
        group.projects.push(Project::new(path));
        self.persist(&groups)?;

        debug!("Added {} to group {}", path, group_id);
        Ok(true)
    }

    /// Remove a project. Returns false if nothing matched.
    pub fn remove_project_from_group(&self, group_id: &str, path: &str) -> Result<bool> {
        let path = path.trim();

        let mut groups = self.groups.write();
        let Some(group) = groups.iter_mut().find(|g| g.id == group_id) else {
            return Ok(false);
        };
        let len_before = group.projects.len();
        group.projects.retain(|p| p.path != path);
        if group.projects.len() == len_before {
            return Ok(false);
        }
        self.persist(&groups)?;
        Ok(true)
    }

    /// Flip a project's enabled flag. Returns false if nothing matched.
    pub fn toggle_project_enabled(&self, group_id: &str, path: &str) -> Result<bool> {
        let path = path.trim();

        let mut groups = self.groups.write();
        let Some(project) = groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .and_then(|g| g.projects.iter_mut().find(|p| p.path == path))
        else {
            return Ok(false);
        };
        project.enabled = !project.enabled;
        let enabled = project.enabled;
        self.persist(&groups)?;

        debug!("Project {} in group {} enabled={}", path, group_id, enabled);
        Ok(true)
    }

    // ---------------------------------------------------------------
    // Import / Export
    // ---------------------------------------------------------------

    /// Snapshot as a versioned export document.
    pub fn export_data(&self) -> ExportDocument {
        codec::encode(&self.groups.read())
    }

    /// Export document as pretty-printed JSON.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.export_data())?)
    }

    /// Replace every group with the contents of `raw`.
    ///
    /// Returns the number of groups imported. A payload of the wrong shape
    /// fails with [`Error::Format`] and leaves the current groups alone.
    pub fn import_data(&self, raw: &Value) -> Result<usize> {
        let imported = codec::decode(raw)?;
        let count = imported.len();

        let mut groups = self.groups.write();
        *groups = imported;
        self.persist(&groups)?;

        info!("Imported {} groups", count);
        Ok(count)
    }

    /// [`import_data`](Self::import_data) from JSON text.
    pub fn import_json(&self, text: &str) -> Result<usize> {
        self.import_data(&codec::parse(text)?)
    }

    // ---------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------

    fn persist(&self, groups: &[Group]) -> Result<()> {
        let value = serde_json::to_value(groups)?;
        self.store.save(&self.key, &value)
    }
}

fn required<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation(format!("{} must not be blank", what)));
    }
    Ok(trimmed)
}
