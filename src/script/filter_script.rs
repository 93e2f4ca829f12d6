use crate::index::SegmentReader;
use crate::script::Params;
use crate::DocId;

/// Per-segment evaluator of a filter script.
///
/// The host calls [`set_document`](FilterScript::set_document) for each
/// candidate document, then [`execute`](FilterScript::execute) one or more
/// times to read the outcome.
///
/// # Precondition
///
/// Doc ids passed to `set_document` over the lifetime of a `FilterScript`
/// must be strictly increasing. This is not checked in release builds.
pub trait FilterScript: Send {
    /// Sets the document the next calls to `execute` are about.
    fn set_document(&mut self, doc: DocId) -> crate::Result<()>;

    /// Returns true if the current document matches.
    ///
    /// Calling `execute` several times without calling `set_document` in
    /// between returns the same result.
    fn execute(&mut self) -> crate::Result<bool>;
}

/// Creates the [`FilterScript`] of each segment of a query.
pub trait FilterLeafFactory: Send + Sync {
    /// Opens whatever the script needs in `segment` and returns its evaluator.
    ///
    /// Called lazily, only for the segments the query actually visits.
    fn new_instance(&self, segment: &dyn SegmentReader) -> crate::Result<Box<dyn FilterScript>>;
}

/// Compiled filter script.
///
/// A compiled script can be reused by many queries, each binding its own
/// parameters.
pub trait FilterScriptFactory: Send + Sync {
    /// Returns true if, given the same parameters and the same segment, a
    /// document always gets the same outcome.
    ///
    /// Hosts may cache compiled scripts and query results when this holds.
    fn is_result_deterministic(&self) -> bool {
        false
    }

    /// Validates `params` and returns the factory of per-segment evaluators.
    ///
    /// This does not touch any segment.
    fn new_factory(&self, params: &Params) -> crate::Result<Box<dyn FilterLeafFactory>>;
}

/// `FilterScript` that matches no document.
///
/// Used for segments in which the filtered term does not exist.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoMatchScript;

impl FilterScript for NoMatchScript {
    fn set_document(&mut self, _doc: DocId) -> crate::Result<()> {
        Ok(())
    }

    fn execute(&mut self) -> crate::Result<bool> {
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::{FilterScript, NoMatchScript};

    #[test]
    fn test_no_match_script() -> crate::Result<()> {
        let mut script = NoMatchScript;
        for doc in [0, 1, 5, 1_000] {
            script.set_document(doc)?;
            assert!(!script.execute()?);
        }
        Ok(())
    }
}
