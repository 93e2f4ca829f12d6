use std::fmt;

use serde::{Deserialize, Serialize};

/// Execution context a script is compiled for.
///
/// The context determines what the script is asked to produce. Only
/// [`ScriptContext::Filter`], a boolean per document, is backed by a factory
/// type in this crate; the other contexts exist so that hosts can route
/// requests and engines can reject them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptContext {
    /// Boolean per-document filter.
    Filter,
    /// Per-document score.
    Score,
    /// Aggregation value.
    Aggs,
    /// Computed field value.
    Field,
    /// Document update.
    Update,
    /// Ingest pipeline processor.
    Ingest,
}

impl ScriptContext {
    /// Name of the context, as found in settings and error messages.
    pub fn name(self) -> &'static str {
        match self {
            ScriptContext::Filter => "filter",
            ScriptContext::Score => "score",
            ScriptContext::Aggs => "aggs",
            ScriptContext::Field => "field",
            ScriptContext::Update => "update",
            ScriptContext::Ingest => "ingest",
        }
    }
}

impl fmt::Display for ScriptContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
