use std::collections::HashMap;
use std::sync::Arc;

use crate::script::{FilterScriptFactory, ScriptContext};
use crate::ScriptSettings;

/// A script language, identified by its [`script_type`](ScriptEngine::script_type).
pub trait ScriptEngine: Send + Sync + 'static {
    /// Stable identifier the host uses to route scripts to this engine.
    fn script_type(&self) -> &str;

    /// Compiles `source` for `context`.
    ///
    /// `name` identifies the script for the host and `options` are
    /// compile-time options. Neither is interpreted by engines that
    /// recognize scripts by their source.
    ///
    /// # Errors
    ///
    /// Fails with a validation error if the engine does not support `context`
    /// or does not know the script.
    fn compile(
        &self,
        name: &str,
        source: &str,
        context: ScriptContext,
        options: &HashMap<String, String>,
    ) -> crate::Result<Arc<dyn FilterScriptFactory>>;

    /// Contexts this engine can compile scripts for.
    fn supported_contexts(&self) -> &[ScriptContext];
}

/// Extension point through which a plugin contributes a [`ScriptEngine`].
pub trait ScriptPlugin {
    /// Returns the engine of the plugin.
    ///
    /// `contexts` lists every context known to the host, including the ones
    /// the engine will not support.
    fn script_engine(
        &self,
        settings: &ScriptSettings,
        contexts: &[ScriptContext],
    ) -> Box<dyn ScriptEngine>;
}
