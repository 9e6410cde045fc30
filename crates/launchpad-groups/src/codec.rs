//! Versioned export document and import payload decoding.

use serde_json::Value;
use tracing::warn;

use launchpad_core::{Error, Result};

use crate::normalize::normalize_groups;
use crate::types::{ExportDocument, Group};

/// Current export format version.
pub const FORMAT_VERSION: u32 = 1;

/// Build the export document for `groups`.
pub fn encode(groups: &[Group]) -> ExportDocument {
    ExportDocument {
        format_version: FORMAT_VERSION,
        groups: groups.to_vec(),
    }
}

/// Parse import text. Unparsable text is a format error, not a JSON error.
pub fn parse(text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| Error::Format(format!("not valid JSON: {}", e)))
}

/// Decode an import payload into normalized groups.
///
/// The payload is either a bare group array or an object with a `groups`
/// array. Anything else fails with [`Error::Format`].
pub fn decode(raw: &Value) -> Result<Vec<Group>> {
    Ok(normalize_groups(group_list(raw)?))
}

fn group_list(raw: &Value) -> Result<&Value> {
    match raw {
        Value::Array(_) => Ok(raw),
        Value::Object(map) => {
            if let Some(version) = map.get("formatVersion").and_then(Value::as_u64) {
                if version > u64::from(FORMAT_VERSION) {
                    warn!(
                        "Importing formatVersion {} with a reader for version {}",
                        version, FORMAT_VERSION
                    );
                }
            }
            map.get("groups")
                .filter(|groups| groups.is_array())
                .ok_or_else(|| Error::Format("missing groups array".into()))
        }
        _ => Err(Error::Format("unsupported configuration format".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Project;
    use serde_json::json;

    #[test]
    fn test_encode_expands_projects() {
        let groups = vec![Group {
            id: "g".into(),
            name: "G".into(),
            projects: vec![Project::new("/a")],
        }];

        let doc = serde_json::to_value(encode(&groups)).unwrap();
        assert_eq!(
            doc,
            json!({
                "formatVersion": 1,
                "groups": [
                    { "id": "g", "name": "G", "projects": [{ "path": "/a", "enabled": true }] }
                ],
            })
        );
    }

    #[test]
    fn test_decode_bare_array() {
        let groups = decode(&json!([{ "name": "G", "projects": ["/a"] }])).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].projects, vec![Project::new("/a")]);
    }

    #[test]
    fn test_decode_document() {
        let groups = decode(&json!({
            "formatVersion": 1,
            "groups": [{ "id": "g", "name": "G" }],
        }))
        .unwrap();
        assert_eq!(groups[0].id, "g");
    }

    #[test]
    fn test_decode_newer_version_is_accepted() {
        let groups = decode(&json!({ "formatVersion": 9, "groups": [{ "name": "G" }] })).unwrap();
        assert_eq!(groups.len(), 1);
    }

    #[test]
    fn test_decode_rejects_shapes() {
        let unsupported = decode(&json!("not an object or array")).unwrap_err();
        assert!(
            matches!(unsupported, Error::Format(ref m) if m == "unsupported configuration format")
        );

        for raw in [json!({}), json!({ "groups": "nope" }), json!({ "groups": null })] {
            let err = decode(&raw).unwrap_err();
            assert!(matches!(err, Error::Format(ref m) if m == "missing groups array"));
        }

        assert!(matches!(decode(&json!(3)), Err(Error::Format(_))));
        assert!(matches!(decode(&json!(null)), Err(Error::Format(_))));
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse("{ groups: ").unwrap_err();
        assert!(matches!(err, Error::Format(ref m) if m.starts_with("not valid JSON")));
        assert_eq!(parse("[]").unwrap(), json!([]));
    }
}
