use crate::docset::{AllDocs, DocSet, TERMINATED};
use crate::index::SegmentReader;
use crate::script::{FilterLeafFactory, FilterScript};
use crate::{DocId, Executor};

/// Runs `script` over the documents of `candidates` and returns the ones that
/// match, in increasing order.
///
/// `script` and `candidates` must belong to the same segment.
pub fn filter_docset(
    script: &mut dyn FilterScript,
    candidates: &mut dyn DocSet,
) -> crate::Result<Vec<DocId>> {
    let mut matching_docs = Vec::new();
    let mut doc = candidates.doc();
    while doc != TERMINATED {
        script.set_document(doc)?;
        if script.execute()? {
            matching_docs.push(doc);
        }
        doc = candidates.advance();
    }
    Ok(matching_docs)
}

/// Runs the scripts created by `leaf_factory` over every document of every
/// segment.
///
/// Each segment gets its own [`FilterScript`], created on the thread that
/// evaluates it. The result holds the matching docs of each segment, in the
/// order of `segments`.
pub fn filter_segments<TSegmentReader: SegmentReader>(
    leaf_factory: &dyn FilterLeafFactory,
    segments: &[TSegmentReader],
    executor: &Executor,
) -> crate::Result<Vec<Vec<DocId>>> {
    executor.map(
        |segment| {
            let mut script = leaf_factory.new_instance(segment)?;
            filter_docset(script.as_mut(), &mut AllDocs::new(segment.max_doc()))
        },
        segments.iter(),
    )
}
