//! The persistence port the group manager depends on.

use serde_json::Value;

use launchpad_core::Result;

/// Opaque key-value persistence.
///
/// Implementations store arbitrary JSON under string keys and must hand
/// back arrays in the order they were saved. They know nothing about the
/// shape of what they hold.
pub trait KeyValueStore: Send + Sync {
    /// Load the value saved under `key`, or `None` if nothing was saved.
    fn load(&self, key: &str) -> Result<Option<Value>>;

    /// Save `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &Value) -> Result<()>;
}
