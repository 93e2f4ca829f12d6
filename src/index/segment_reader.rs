use std::io;
use std::sync::Arc;

use crate::postings::Postings;
use crate::DocId;

/// Read access to one segment of an index.
///
/// Segments are owned by the host. A segment reader is shared by all the
/// threads searching the segment, hence the `Send + Sync` bound, while the
/// [`Postings`] it hands out belong to a single consumer.
pub trait SegmentReader: Send + Sync {
    /// Returns the highest document id ever attributed in
    /// this segment + 1.
    fn max_doc(&self) -> DocId;

    /// Returns the postings of `term` in `field`, positioned before their
    /// first document, or `None` if the field is unknown to the segment or the
    /// term was never indexed in it.
    fn postings(&self, field: &str, term: &str) -> io::Result<Option<Box<dyn Postings>>>;
}

impl<TSegmentReader: SegmentReader + ?Sized> SegmentReader for Arc<TSegmentReader> {
    fn max_doc(&self) -> DocId {
        (**self).max_doc()
    }

    fn postings(&self, field: &str, term: &str) -> io::Result<Option<Box<dyn Postings>>> {
        (**self).postings(field, term)
    }
}
