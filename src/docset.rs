//! Iteration over sorted doc ids.
//!
//! A [`DocSet`] is how the host presents candidate documents to a
//! [`FilterScript`](crate::script::FilterScript): in increasing order,
//! each doc id at most once.

use std::borrow::{Borrow, BorrowMut};

use crate::DocId;

/// Sentinel value returned when a DocSet has been entirely consumed.
///
/// This is not u32::MAX as one would have expected, due to the lack of SSE2 instructions
/// to compare [u32; 4].
pub const TERMINATED: DocId = i32::MAX as u32;

/// Represents an iterable set of sorted doc ids.
pub trait DocSet: Send {
    /// Goes to the next element.
    ///
    /// The DocId of the next element is returned.
    /// In other words we should always have :
    /// ```ignore
    /// let doc = docset.advance();
    /// assert_eq!(doc, docset.doc());
    /// ```
    ///
    /// If we reached the end of the DocSet, TERMINATED should be returned.
    ///
    /// Calling `.advance()` on a terminated DocSet should be supported, and TERMINATED should
    /// be returned.
    fn advance(&mut self) -> DocId;

    /// Advances the DocSet forward until reaching the target, or going to the
    /// lowest DocId greater than the target.
    ///
    /// If the end of the DocSet is reached, TERMINATED is returned.
    ///
    /// Calling `.seek(target)` on a terminated DocSet is legal. Implementation
    /// of DocSet should support it.
    ///
    /// Calling `seek(TERMINATED)` is also legal and is the normal way to consume a DocSet.
    fn seek(&mut self, target: DocId) -> DocId {
        let mut doc = self.doc();
        debug_assert!(doc <= target);
        while doc < target {
            doc = self.advance();
        }
        doc
    }

    /// Returns the current document
    /// Right after creating a new DocSet, the docset points to the first document.
    ///
    /// If the DocSet is empty, .doc() should return `TERMINATED`.
    fn doc(&self) -> DocId;

    /// Returns a best-effort hint of the
    /// length of the docset.
    fn size_hint(&self) -> u32;
}

impl DocSet for &mut dyn DocSet {
    fn advance(&mut self) -> DocId {
        (**self).advance()
    }

    fn seek(&mut self, target: DocId) -> DocId {
        (**self).seek(target)
    }

    fn doc(&self) -> DocId {
        (**self).doc()
    }

    fn size_hint(&self) -> u32 {
        (**self).size_hint()
    }
}

impl<TDocSet: DocSet + ?Sized> DocSet for Box<TDocSet> {
    fn advance(&mut self) -> DocId {
        let unboxed: &mut TDocSet = self.borrow_mut();
        unboxed.advance()
    }

    fn seek(&mut self, target: DocId) -> DocId {
        let unboxed: &mut TDocSet = self.borrow_mut();
        unboxed.seek(target)
    }

    fn doc(&self) -> DocId {
        let unboxed: &TDocSet = self.borrow();
        unboxed.doc()
    }

    fn size_hint(&self) -> u32 {
        let unboxed: &TDocSet = self.borrow();
        unboxed.size_hint()
    }
}

/// `DocSet` over every doc id of a segment, `0..max_doc`.
pub struct AllDocs {
    doc: DocId,
    max_doc: DocId,
}

impl AllDocs {
    /// Creates a `DocSet` positioned on the first document of a segment
    /// holding `max_doc` documents.
    pub fn new(max_doc: DocId) -> AllDocs {
        let doc = if max_doc == 0 { TERMINATED } else { 0 };
        AllDocs { doc, max_doc }
    }
}

impl DocSet for AllDocs {
    fn advance(&mut self) -> DocId {
        if self.doc + 1 >= self.max_doc {
            self.doc = TERMINATED;
        } else {
            self.doc += 1;
        }
        self.doc
    }

    fn seek(&mut self, target: DocId) -> DocId {
        debug_assert!(self.doc <= target);
        self.doc = if target >= self.max_doc {
            TERMINATED
        } else {
            target
        };
        self.doc
    }

    fn doc(&self) -> DocId {
        self.doc
    }

    fn size_hint(&self) -> u32 {
        self.max_doc
    }
}

/// Simulates a `DocSet` from a sorted `Vec` of doc ids.
pub struct VecDocSet {
    doc_ids: Vec<DocId>,
    cursor: usize,
}

impl From<Vec<DocId>> for VecDocSet {
    fn from(doc_ids: Vec<DocId>) -> VecDocSet {
        debug_assert!(
            doc_ids.windows(2).all(|w| w[0] < w[1]),
            "doc ids must be strictly increasing"
        );
        VecDocSet { doc_ids, cursor: 0 }
    }
}

impl DocSet for VecDocSet {
    fn advance(&mut self) -> DocId {
        if self.cursor < self.doc_ids.len() {
            self.cursor += 1;
        }
        self.doc()
    }

    fn doc(&self) -> DocId {
        self.doc_ids
            .get(self.cursor)
            .copied()
            .unwrap_or(TERMINATED)
    }

    fn size_hint(&self) -> u32 {
        self.doc_ids.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::{AllDocs, DocSet, VecDocSet, TERMINATED};

    #[test]
    fn test_all_docs() {
        let mut docset = AllDocs::new(3);
        assert_eq!(docset.doc(), 0);
        assert_eq!(docset.advance(), 1);
        assert_eq!(docset.advance(), 2);
        assert_eq!(docset.advance(), TERMINATED);
        assert_eq!(docset.advance(), TERMINATED);
    }

    #[test]
    fn test_all_docs_empty_segment() {
        let docset = AllDocs::new(0);
        assert_eq!(docset.doc(), TERMINATED);
    }

    #[test]
    fn test_all_docs_seek() {
        let mut docset = AllDocs::new(10);
        assert_eq!(docset.seek(4), 4);
        assert_eq!(docset.advance(), 5);
        assert_eq!(docset.seek(10), TERMINATED);
    }

    #[test]
    fn test_vec_docset() {
        let mut docset = VecDocSet::from(vec![1, 4, 9]);
        assert_eq!(docset.doc(), 1);
        assert_eq!(docset.seek(5), 9);
        assert_eq!(docset.advance(), TERMINATED);
        assert_eq!(docset.advance(), TERMINATED);
        assert_eq!(docset.size_hint(), 3);
    }

    #[test]
    fn test_boxed_docset() {
        let mut docset: Box<dyn DocSet> = Box::new(VecDocSet::from(vec![2, 3]));
        assert_eq!(docset.doc(), 2);
        assert_eq!(docset.advance(), 3);
        assert_eq!(docset.advance(), TERMINATED);
    }
}
