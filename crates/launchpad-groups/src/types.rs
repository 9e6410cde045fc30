//! Group and project types, plus the shapes accepted at the JSON boundary.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// A filesystem location inside a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub path: String,
    pub enabled: bool,
}

impl Project {
    /// An enabled project at `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            enabled: true,
        }
    }

    /// Last path component, or the whole path when there is none.
    pub fn display_name(&self) -> &str {
        Path::new(&self.path)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(&self.path)
    }
}

/// A named, ordered collection of projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl Group {
    /// Look up a project by path.
    pub fn project(&self, path: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.path == path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.project(path).is_some()
    }

    /// Enabled projects in the order a group open launches them.
    pub fn enabled_projects(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|p| p.enabled)
    }

    pub fn summary(&self) -> GroupSummary {
        GroupSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            enabled: self.enabled_projects().count(),
            total: self.projects.len(),
        }
    }
}

/// Picker line for a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "enabledCount")]
    pub enabled: usize,
    #[serde(rename = "totalCount")]
    pub total: usize,
}

impl GroupSummary {
    /// e.g. `2/3 project(s) enabled`
    pub fn description(&self) -> String {
        format!("{}/{} project(s) enabled", self.enabled, self.total)
    }
}

/// One project together with the group holding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectEntry {
    #[serde(rename = "groupId")]
    pub group_id: String,
    #[serde(rename = "groupName")]
    pub group_name: String,
    pub project: Project,
}

/// Versioned export document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    #[serde(rename = "formatVersion")]
    pub format_version: u32,
    pub groups: Vec<Group>,
}

/// A project as it may appear in stored or imported JSON.
///
/// Older files list projects as bare path strings. Only the normalizer sees
/// this type; the canonical [`Project`] never carries the bare form.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawProject {
    Legacy(String),
    Entry {
        path: String,
        #[serde(default)]
        enabled: Option<serde_json::Value>,
    },
}

/// Fresh group id, unique for the life of the process.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
