use std::collections::HashMap;
use std::sync::Arc;

use log::debug;

use crate::index::SegmentReader;
use crate::postings::{CursorPosition, TermCursor};
use crate::script::{
    ContainsMultipleParams, FilterLeafFactory, FilterScript, FilterScriptFactory, NoMatchScript,
    Params, ScriptContext, ScriptEngine, ScriptPlugin,
};
use crate::{DocId, FilterError, ScriptSettings};

/// Type identifier of [`ContainsMultipleEngine`].
pub const EXPERT_SCRIPT_TYPE: &str = "expert_scripts";

/// Source of the only script [`ContainsMultipleEngine`] knows.
pub const CONTAINS_MULTIPLE_SCRIPT_NAME: &str = "contains_multiple";

const SUPPORTED_CONTEXTS: [ScriptContext; 1] = [ScriptContext::Filter];

/// Plugin contributing [`ContainsMultipleEngine`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ContainsMultiplePlugin;

impl ScriptPlugin for ContainsMultiplePlugin {
    fn script_engine(
        &self,
        _settings: &ScriptSettings,
        _contexts: &[ScriptContext],
    ) -> Box<dyn ScriptEngine> {
        Box::new(ContainsMultipleEngine)
    }
}

/// Engine of the `expert_scripts` type.
///
/// It knows a single script, `contains_multiple`, which keeps the documents
/// containing a term at least `count` times in a field. The script source is
/// the script identifier.
#[derive(Clone, Copy, Debug, Default)]
pub struct ContainsMultipleEngine;

impl ScriptEngine for ContainsMultipleEngine {
    fn script_type(&self) -> &str {
        EXPERT_SCRIPT_TYPE
    }

    fn compile(
        &self,
        name: &str,
        source: &str,
        context: ScriptContext,
        _options: &HashMap<String, String>,
    ) -> crate::Result<Arc<dyn FilterScriptFactory>> {
        if context != ScriptContext::Filter {
            return Err(FilterError::UnsupportedContext {
                script_type: self.script_type().to_string(),
                context,
            });
        }
        if source != CONTAINS_MULTIPLE_SCRIPT_NAME {
            return Err(FilterError::UnknownScript(source.to_string()));
        }
        debug!("compiled {EXPERT_SCRIPT_TYPE} script {name:?} for context [{context}]");
        Ok(Arc::new(ContainsMultipleFactory))
    }

    fn supported_contexts(&self) -> &[ScriptContext] {
        &SUPPORTED_CONTEXTS
    }
}

/// Compiled `contains_multiple` script.
#[derive(Clone, Copy, Debug, Default)]
pub struct ContainsMultipleFactory;

impl FilterScriptFactory for ContainsMultipleFactory {
    fn is_result_deterministic(&self) -> bool {
        true
    }

    fn new_factory(&self, params: &Params) -> crate::Result<Box<dyn FilterLeafFactory>> {
        let params = ContainsMultipleParams::from_params(params)?;
        Ok(Box::new(ContainsMultipleLeafFactory::new(params)))
    }
}

/// `contains_multiple` bound to its parameters, for one query.
#[derive(Clone, Debug)]
pub struct ContainsMultipleLeafFactory {
    params: Arc<ContainsMultipleParams>,
}

impl ContainsMultipleLeafFactory {
    /// Creates a leaf factory. No segment is read until
    /// [`new_instance`](FilterLeafFactory::new_instance) is called.
    pub fn new(params: ContainsMultipleParams) -> ContainsMultipleLeafFactory {
        ContainsMultipleLeafFactory {
            params: Arc::new(params),
        }
    }

    /// The parameters shared by all the evaluators of the query.
    pub fn params(&self) -> &ContainsMultipleParams {
        &self.params
    }
}

impl FilterLeafFactory for ContainsMultipleLeafFactory {
    fn new_instance(&self, segment: &dyn SegmentReader) -> crate::Result<Box<dyn FilterScript>> {
        let cursor = TermCursor::open(segment, &self.params.field, &self.params.term)?;
        if cursor.is_empty() {
            debug!(
                "term {:?} absent from field {:?} in segment, no document can match",
                self.params.term, self.params.field
            );
            return Ok(Box::new(NoMatchScript));
        }
        Ok(Box::new(ContainsMultipleScript::new(
            cursor,
            self.params.clone(),
        )))
    }
}

/// Evaluates `contains_multiple` over the documents of one segment.
///
/// The script tracks two positions: the postings cursor, and the document
/// last passed to `set_document`. A document matches when both are equal
/// and the term frequency reaches the threshold.
pub struct ContainsMultipleScript {
    cursor: TermCursor,
    params: Arc<ContainsMultipleParams>,
    current_doc: Option<DocId>,
}

impl ContainsMultipleScript {
    /// Creates an evaluator reading `cursor`, which must not have been
    /// advanced yet.
    pub fn new(cursor: TermCursor, params: Arc<ContainsMultipleParams>) -> ContainsMultipleScript {
        ContainsMultipleScript {
            cursor,
            params,
            current_doc: None,
        }
    }
}

impl FilterScript for ContainsMultipleScript {
    fn set_document(&mut self, doc: DocId) -> crate::Result<()> {
        debug_assert!(
            self.current_doc.map_or(true, |previous_doc| previous_doc <= doc),
            "doc ids must be increasing, got {doc} after {:?}",
            self.current_doc
        );
        // Advancing to a doc lower or equal to the cursor's is undefined.
        // The cursor may also already be past `doc` if the term is sparse.
        if self.cursor.position() < CursorPosition::At(doc) {
            self.cursor.advance_to(doc)?;
        }
        self.current_doc = Some(doc);
        Ok(())
    }

    fn execute(&mut self) -> crate::Result<bool> {
        let Some(doc) = self.current_doc else {
            return Ok(false);
        };
        if self.cursor.current_id() != Some(doc) {
            // The cursor went past `doc`: the term does not occur in it.
            return Ok(false);
        }
        let term_freq = self.cursor.frequency_at_current()?;
        Ok(i64::from(term_freq) >= i64::from(self.params.count))
    }
}
