use std::fmt;

use crate::index::SegmentReader;
use crate::postings::{CursorPosition, Postings};
use crate::{DocId, FilterError, TermFreq};

/// Cursor over the postings of one `(field, term)` pair in one segment.
///
/// If the segment holds no postings for the pair (the field is missing or the
/// term was never indexed), the cursor is [`TermCursor::Empty`]: its
/// current id is always `None` and it is never advanced.
///
/// The cursor owns its postings. They are released when the cursor is
/// dropped.
pub enum TermCursor {
    /// The term does not exist in the segment.
    Empty,
    /// Postings of the term in the segment.
    Postings(Box<dyn Postings>),
}

impl fmt::Debug for TermCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TermCursor::Empty => write!(f, "TermCursor::Empty"),
            TermCursor::Postings(postings) => f
                .debug_struct("TermCursor::Postings")
                .field("position", &postings.position())
                .field("doc_freq", &postings.doc_freq())
                .finish(),
        }
    }
}

impl TermCursor {
    /// Opens the postings of `term` in `field` within `segment`.
    ///
    /// This is the only place where the index is read to locate the term.
    pub fn open(segment: &dyn SegmentReader, field: &str, term: &str) -> crate::Result<TermCursor> {
        let postings_opt = segment.postings(field, term)?;
        Ok(postings_opt
            .map(TermCursor::Postings)
            .unwrap_or(TermCursor::Empty))
    }

    /// Returns true if the term has no postings in the segment.
    pub fn is_empty(&self) -> bool {
        matches!(self, TermCursor::Empty)
    }

    /// Returns the ordered position of the cursor.
    ///
    /// An empty cursor is always `Exhausted`: no document can ever be reached.
    pub fn position(&self) -> CursorPosition {
        match self {
            TermCursor::Empty => CursorPosition::Exhausted,
            TermCursor::Postings(postings) => postings.position(),
        }
    }

    /// Returns the document id the cursor sits on.
    ///
    /// `None` before the first advance, after the end of the list, and
    /// always for an empty cursor.
    pub fn current_id(&self) -> Option<DocId> {
        self.position().doc()
    }

    /// Moves the cursor to the first document with an id greater or equal to
    /// `target`.
    ///
    /// # Precondition
    ///
    /// `target` must be strictly greater than the current document. This is
    /// not checked here.
    pub fn advance_to(&mut self, target: DocId) -> crate::Result<CursorPosition> {
        match self {
            TermCursor::Empty => Ok(CursorPosition::Exhausted),
            TermCursor::Postings(postings) => Ok(postings.seek(target)?),
        }
    }

    /// Returns the frequency of the term in the current document.
    ///
    /// Only valid right after checking that [`current_id`](Self::current_id)
    /// is the document under evaluation.
    pub fn frequency_at_current(&mut self) -> crate::Result<TermFreq> {
        match self {
            TermCursor::Empty => Err(FilterError::InvalidArgument(
                "an empty term cursor has no current document".to_string(),
            )),
            TermCursor::Postings(postings) => Ok(postings.term_freq()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TermCursor;
    use crate::index::RamSegmentBuilder;
    use crate::postings::CursorPosition;

    #[test]
    fn test_term_cursor_absent_term() -> crate::Result<()> {
        let mut segment_builder = RamSegmentBuilder::default();
        segment_builder.add_document([("text", "foo")]);
        let segment = segment_builder.build();
        let mut cursor = TermCursor::open(&segment, "text", "bar")?;
        assert!(cursor.is_empty());
        assert_eq!(cursor.current_id(), None);
        assert_eq!(cursor.advance_to(0)?, CursorPosition::Exhausted);
        assert!(cursor.frequency_at_current().is_err());
        Ok(())
    }

    #[test]
    fn test_term_cursor_absent_field() -> crate::Result<()> {
        let mut segment_builder = RamSegmentBuilder::default();
        segment_builder.add_document([("text", "foo")]);
        let segment = segment_builder.build();
        let cursor = TermCursor::open(&segment, "title", "foo")?;
        assert!(cursor.is_empty());
        Ok(())
    }

    #[test]
    fn test_term_cursor_advance() -> crate::Result<()> {
        let mut segment_builder = RamSegmentBuilder::default();
        segment_builder.add_document([("text", "foo foo")]);
        segment_builder.add_document([("text", "bar")]);
        segment_builder.add_document([("text", "foo bar foo foo")]);
        let segment = segment_builder.build();
        let mut cursor = TermCursor::open(&segment, "text", "foo")?;
        assert!(!cursor.is_empty());
        assert_eq!(cursor.current_id(), None);
        assert_eq!(cursor.position(), CursorPosition::Unpositioned);
        assert_eq!(cursor.advance_to(0)?, CursorPosition::At(0));
        assert_eq!(cursor.frequency_at_current()?, 2);
        assert_eq!(cursor.advance_to(1)?, CursorPosition::At(2));
        assert_eq!(cursor.current_id(), Some(2));
        assert_eq!(cursor.frequency_at_current()?, 3);
        assert_eq!(cursor.advance_to(3)?, CursorPosition::Exhausted);
        assert_eq!(cursor.current_id(), None);
        Ok(())
    }
}
