use std::io;

use crate::{DocId, TermFreq};

/// Position of a postings cursor.
///
/// Positions are totally ordered: `Unpositioned` sorts before any
/// document, `Exhausted` after any document. This is what makes
/// "is the cursor behind `doc`?" a single comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CursorPosition {
    /// The cursor was never advanced.
    Unpositioned,
    /// The cursor sits on a document containing the term.
    At(DocId),
    /// The cursor went past the last document of the list.
    Exhausted,
}

impl CursorPosition {
    /// Returns the document the cursor sits on, if any.
    pub fn doc(self) -> Option<DocId> {
        match self {
            CursorPosition::At(doc) => Some(doc),
            CursorPosition::Unpositioned | CursorPosition::Exhausted => None,
        }
    }
}

/// Forward-only cursor over the postings of one term in one segment.
///
/// Unlike a [`DocSet`](crate::DocSet), moving the cursor and reading the
/// term frequency may hit the index, and therefore return an `io::Error`.
pub trait Postings: Send {
    /// Returns the current position of the cursor.
    ///
    /// Right after being opened, postings are `Unpositioned`.
    fn position(&self) -> CursorPosition;

    /// Moves the cursor to the first document whose id is greater or
    /// equal to `target`, and returns the new position.
    ///
    /// # Precondition
    ///
    /// `target` must be strictly greater than the current document.
    /// Calling `seek` with a target lower or equal to the current document
    /// has an undefined result. Callers are in charge of checking this.
    fn seek(&mut self, target: DocId) -> io::Result<CursorPosition>;

    /// Returns the number of occurrences of the term in the current document.
    ///
    /// Only valid when the cursor is positioned on a document.
    fn term_freq(&mut self) -> io::Result<TermFreq>;

    /// Returns the number of documents in the postings list.
    fn doc_freq(&self) -> u32;
}

impl<TPostings: Postings + ?Sized> Postings for Box<TPostings> {
    fn position(&self) -> CursorPosition {
        (**self).position()
    }

    fn seek(&mut self, target: DocId) -> io::Result<CursorPosition> {
        (**self).seek(target)
    }

    fn term_freq(&mut self) -> io::Result<TermFreq> {
        (**self).term_freq()
    }

    fn doc_freq(&self) -> u32 {
        (**self).doc_freq()
    }
}
