use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use fnv::FnvHashMap;
use log::{debug, info, warn};
use lru::LruCache;
use serde::{Deserialize, Serialize};

use crate::script::{
    ContainsMultiplePlugin, FilterScriptFactory, Params, ScriptContext, ScriptEngine, ScriptPlugin,
};
use crate::{FilterError, ScriptSettings};

const ALL_CONTEXTS: [ScriptContext; 6] = [
    ScriptContext::Filter,
    ScriptContext::Score,
    ScriptContext::Aggs,
    ScriptContext::Field,
    ScriptContext::Update,
    ScriptContext::Ingest,
];

/// A script, as found in a search request.
///
/// ```json
/// {
///     "lang": "expert_scripts",
///     "source": "contains_multiple",
///     "params": {"field": "text", "term": "foo", "count": 2}
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Type of the engine in charge of the script.
    pub lang: String,
    /// Name identifying the script for the host.
    #[serde(default)]
    pub name: String,
    /// Script source.
    pub source: String,
    /// Compile-time options.
    #[serde(default)]
    pub options: HashMap<String, String>,
    /// Parameters bound when the script runs.
    #[serde(default)]
    pub params: Params,
}

impl Script {
    /// Creates a script without options nor parameters.
    pub fn new(lang: impl Into<String>, source: impl Into<String>) -> Script {
        Script {
            lang: lang.into(),
            source: source.into(),
            ..Default::default()
        }
    }

    /// Sets the parameters of the script.
    pub fn with_params(mut self, params: Params) -> Script {
        self.params = params;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    lang: String,
    source: String,
    context: ScriptContext,
    options: Vec<(String, String)>,
}

impl CacheKey {
    fn new(script: &Script, context: ScriptContext) -> CacheKey {
        let mut options: Vec<(String, String)> = script
            .options
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        options.sort();
        CacheKey {
            lang: script.lang.clone(),
            source: script.source.clone(),
            context,
            options,
        }
    }
}

type CompiledScriptCache = Mutex<LruCache<CacheKey, Arc<dyn FilterScriptFactory>>>;

/// Registry of the script engines known to the host.
///
/// Engines are contributed by [`ScriptPlugin`]s and looked up by their
/// [`script_type`](ScriptEngine::script_type). Compiled scripts whose result
/// is deterministic are kept in an LRU cache.
pub struct ScriptService {
    engines: FnvHashMap<String, Arc<dyn ScriptEngine>>,
    settings: ScriptSettings,
    cache_opt: Option<CompiledScriptCache>,
}

impl fmt::Debug for ScriptService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptService")
            .field("script_types", &self.script_types())
            .field("settings", &self.settings)
            .finish()
    }
}

impl ScriptService {
    /// Creates a service with the engines of `plugins`.
    ///
    /// Fails if two engines share the same script type.
    pub fn new(
        settings: ScriptSettings,
        plugins: &[&dyn ScriptPlugin],
    ) -> crate::Result<ScriptService> {
        let mut engines: FnvHashMap<String, Arc<dyn ScriptEngine>> = FnvHashMap::default();
        for plugin in plugins {
            let engine: Arc<dyn ScriptEngine> =
                Arc::from(plugin.script_engine(&settings, &ALL_CONTEXTS));
            let script_type = engine.script_type().to_string();
            if engines.contains_key(&script_type) {
                return Err(FilterError::InvalidArgument(format!(
                    "script engine for type [{script_type}] is already registered"
                )));
            }
            info!("registered script engine [{script_type}]");
            engines.insert(script_type, engine);
        }
        let cache_opt = NonZeroUsize::new(settings.cache_max_size)
            .map(|capacity| Mutex::new(LruCache::new(capacity)));
        Ok(ScriptService {
            engines,
            settings,
            cache_opt,
        })
    }

    /// Creates a service with the engines shipped with this crate.
    pub fn with_default_plugins(settings: ScriptSettings) -> crate::Result<ScriptService> {
        ScriptService::new(settings, &[&ContainsMultiplePlugin])
    }

    /// Settings of the service.
    pub fn settings(&self) -> &ScriptSettings {
        &self.settings
    }

    /// Sorted list of the registered script types.
    pub fn script_types(&self) -> Vec<&str> {
        let mut script_types: Vec<&str> = self.engines.keys().map(String::as_str).collect();
        script_types.sort_unstable();
        script_types
    }

    /// Number of compiled scripts currently in cache.
    pub fn num_cached_scripts(&self) -> crate::Result<usize> {
        match &self.cache_opt {
            Some(cache) => Ok(cache.lock()?.len()),
            None => Ok(0),
        }
    }

    /// Compiles `script` for `context`.
    ///
    /// The script parameters are not looked at: they are bound later, through
    /// [`FilterScriptFactory::new_factory`].
    pub fn compile(
        &self,
        script: &Script,
        context: ScriptContext,
    ) -> crate::Result<Arc<dyn FilterScriptFactory>> {
        if !self.settings.is_type_allowed(&script.lang) {
            warn!("rejected script of type [{}]: type not allowed", script.lang);
            return Err(FilterError::InvalidArgument(format!(
                "script type [{}] not allowed",
                script.lang
            )));
        }
        if !self.settings.is_context_allowed(context) {
            warn!("rejected script for context [{context}]: context not allowed");
            return Err(FilterError::InvalidArgument(format!(
                "cannot execute scripts using [{context}] context"
            )));
        }
        let engine = self.engines.get(&script.lang).ok_or_else(|| {
            FilterError::InvalidArgument(format!("script_lang not supported [{}]", script.lang))
        })?;
        if !engine.supported_contexts().contains(&context) {
            return Err(FilterError::UnsupportedContext {
                script_type: script.lang.clone(),
                context,
            });
        }
        let cache_key = CacheKey::new(script, context);
        if let Some(cache) = &self.cache_opt {
            if let Some(factory) = cache.lock()?.get(&cache_key) {
                debug!("compiled script cache hit for [{}]", script.source);
                return Ok(factory.clone());
            }
        }
        let factory = engine.compile(&script.name, &script.source, context, &script.options)?;
        if factory.is_result_deterministic() {
            if let Some(cache) = &self.cache_opt {
                cache.lock()?.put(cache_key, factory.clone());
            }
        }
        Ok(factory)
    }
}
