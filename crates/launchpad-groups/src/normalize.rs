//! Turns untrusted or legacy-shaped JSON into canonical groups.
//!
//! Individual bad elements are dropped with a warning; only the caller
//! decides whether a whole payload is unusable.

use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use launchpad_core::{Error, Result};

use crate::types::{new_id, Group, Project, RawProject};

/// Normalize one project entry.
///
/// Accepts a bare path string (enabled) or `{ "path": ..., "enabled": ... }`.
/// A missing or non-boolean `enabled` means enabled. Returns `None` for any
/// other shape or a blank path.
pub fn normalize_project(raw: &Value) -> Option<Project> {
    let (path, enabled) = match RawProject::deserialize(raw).ok()? {
        RawProject::Legacy(path) => (path, true),
        RawProject::Entry { path, enabled } => {
            (path, enabled.and_then(|v| v.as_bool()).unwrap_or(true))
        }
    };

    let path = path.trim();
    if path.is_empty() {
        return None;
    }

    Some(Project {
        path: path.to_string(),
        enabled,
    })
}

/// Normalize one group entry.
///
/// Fails with [`Error::Validation`] if `raw` is not an object or has no
/// usable `name`. A missing or blank `id` is replaced with a fresh one.
/// Projects with a path already seen in this group are dropped.
pub fn normalize_group(raw: &Value) -> Result<Group> {
    let obj = raw
        .as_object()
        .ok_or_else(|| Error::Validation("group entry is not an object".into()))?;

    let name = obj
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| Error::Validation("group name must be a non-empty string".into()))?;

    let id = obj
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.trim().is_empty())
        .map(ToOwned::to_owned)
        .unwrap_or_else(new_id);

    let mut projects = Vec::new();
    let mut seen = HashSet::new();
    if let Some(entries) = obj.get("projects").and_then(Value::as_array) {
        for entry in entries {
            let Some(project) = normalize_project(entry) else {
                warn!("Dropping malformed project in group \"{}\": {}", name, entry);
                continue;
            };
            if !seen.insert(project.path.clone()) {
                debug!("Dropping duplicate project {} in group \"{}\"", project.path, name);
                continue;
            }
            projects.push(project);
        }
    }

    Ok(Group {
        id,
        name: name.to_string(),
        projects,
    })
}

/// Normalize a candidate list of groups.
///
/// Entries that fail [`normalize_group`] are skipped. A group whose id was
/// already accepted earlier in the list gets a fresh id. Anything other
/// than an array yields an empty list.
pub fn normalize_groups(raw: &Value) -> Vec<Group> {
    let Some(entries) = raw.as_array() else {
        debug!("Group list is not an array; treating as empty");
        return Vec::new();
    };

    let mut groups = Vec::with_capacity(entries.len());
    let mut ids = HashSet::new();

    for (index, entry) in entries.iter().enumerate() {
        let mut group = match normalize_group(entry) {
            Ok(group) => group,
            Err(e) => {
                warn!("Skipping group at index {}: {}", index, e);
                continue;
            }
        };

        if !ids.insert(group.id.clone()) {
            let fresh = unique_id(&ids);
            warn!(
                "Group \"{}\" reuses id {}; assigned {}",
                group.name, group.id, fresh
            );
            ids.insert(fresh.clone());
            group.id = fresh;
        }

        groups.push(group);
    }

    groups
}

/// A fresh id not present in `taken`.
pub(crate) fn unique_id(taken: &HashSet<String>) -> String {
    loop {
        let id = new_id();
        if !taken.contains(&id) {
            return id;
        }
    }
}
