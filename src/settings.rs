use serde::{Deserialize, Serialize};

use crate::script::ScriptContext;
use crate::FilterError;

fn default_cache_max_size() -> usize {
    100
}

/// Settings of a [`ScriptService`](crate::script::ScriptService).
///
/// ```json
/// {
///     "allowed_types": ["expert_scripts"],
///     "allowed_contexts": ["filter"],
///     "cache_max_size": 100
/// }
/// ```
///
/// Every key is optional.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScriptSettings {
    /// Script types that may be compiled. `None` allows every registered type.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_types: Option<Vec<String>>,
    /// Contexts scripts may be compiled for. `None` allows every context.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_contexts: Option<Vec<ScriptContext>>,
    /// Maximum number of compiled scripts kept in cache. `0` disables the cache.
    #[serde(default = "default_cache_max_size")]
    pub cache_max_size: usize,
}

impl Default for ScriptSettings {
    fn default() -> Self {
        ScriptSettings {
            allowed_types: None,
            allowed_contexts: None,
            cache_max_size: default_cache_max_size(),
        }
    }
}

impl ScriptSettings {
    /// Parses settings from their JSON representation.
    pub fn from_json(json: &str) -> crate::Result<ScriptSettings> {
        serde_json::from_str(json).map_err(|err| {
            FilterError::InvalidArgument(format!("Failed to parse script settings: {err}"))
        })
    }

    /// Returns true if scripts of type `script_type` may be compiled.
    pub fn is_type_allowed(&self, script_type: &str) -> bool {
        self.allowed_types
            .as_ref()
            .map_or(true, |types| types.iter().any(|allowed| allowed == script_type))
    }

    /// Returns true if scripts may be compiled for `context`.
    pub fn is_context_allowed(&self, context: ScriptContext) -> bool {
        self.allowed_contexts
            .as_ref()
            .map_or(true, |contexts| contexts.contains(&context))
    }
}
