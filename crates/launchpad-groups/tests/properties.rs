//! Property tests for normalization and manager invariants.

use std::collections::HashSet;
use std::sync::Arc;

use launchpad_groups::{codec, normalize_groups, Group, GroupManager, Project};
use launchpad_store::MemoryStore;
use proptest::prelude::*;
use serde_json::{json, Value};

fn path_strategy() -> impl Strategy<Value = String> {
    "/[a-z]{1,6}(/[a-z]{1,6}){0,2}"
}

fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,10}".prop_map(|s| s.trim().to_string())
}

/// Valid group lists: unique ids, unique paths per group.
fn groups_strategy() -> impl Strategy<Value = Vec<Group>> {
    prop::collection::vec(
        (
            name_strategy(),
            prop::collection::vec((path_strategy(), any::<bool>()), 0..6),
        ),
        0..6,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (name, projects))| {
                let mut seen = HashSet::new();
                Group {
                    id: format!("g{}", i),
                    name,
                    projects: projects
                        .into_iter()
                        .filter(|(path, _)| seen.insert(path.clone()))
                        .map(|(path, enabled)| Project { path, enabled })
                        .collect(),
                }
            })
            .collect()
    })
}

fn manager() -> GroupManager {
    GroupManager::new(Arc::new(MemoryStore::new())).unwrap()
}

fn assert_unique_ids(groups: &[Group]) {
    let ids: HashSet<&str> = groups.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(ids.len(), groups.len());
}

proptest! {
    #[test]
    fn export_then_normalize_round_trips(groups in groups_strategy()) {
        let doc = serde_json::to_value(codec::encode(&groups)).unwrap();
        prop_assert_eq!(normalize_groups(&doc["groups"]), groups);
    }

    #[test]
    fn imported_ids_are_unique(
        ids in prop::collection::vec(
            prop::option::of(prop::sample::select(vec!["a", "b", "c"])),
            0..12,
        )
    ) {
        let raw: Vec<Value> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| match id {
                Some(id) => json!({ "id": id, "name": format!("G{}", i) }),
                None => json!({ "name": format!("G{}", i) }),
            })
            .collect();

        let mgr = manager();
        prop_assert_eq!(mgr.import_data(&Value::Array(raw)).unwrap(), ids.len());
        mgr.create_group("after import").unwrap();
        assert_unique_ids(&mgr.groups());
    }

    #[test]
    fn added_paths_are_unique(paths in prop::collection::vec(path_strategy(), 0..20)) {
        let mgr = manager();
        let g = mgr.create_group("G").unwrap();
        for path in &paths {
            mgr.add_project_to_group(&g.id, path).unwrap();
        }

        let group = mgr.get(&g.id).unwrap();
        let distinct: HashSet<&String> = paths.iter().collect();
        let stored: HashSet<&String> = group.projects.iter().map(|p| &p.path).collect();
        prop_assert_eq!(group.projects.len(), distinct.len());
        prop_assert_eq!(stored, distinct);
    }

    #[test]
    fn toggle_twice_restores(groups in groups_strategy()) {
        let mgr = manager();
        mgr.import_data(&serde_json::to_value(&groups).unwrap()).unwrap();

        for group in &groups {
            for project in &group.projects {
                mgr.toggle_project_enabled(&group.id, &project.path).unwrap();
                mgr.toggle_project_enabled(&group.id, &project.path).unwrap();
            }
        }
        prop_assert_eq!(mgr.groups(), groups);
    }
}
