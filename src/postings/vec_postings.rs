use std::io;
use std::sync::Arc;

use crate::postings::{CursorPosition, Postings};
use crate::{DocId, TermFreq};

/// In-memory `Postings`, backed by a shared sorted slice of
/// `(doc, term_freq)` pairs.
///
/// `VecPostings` is what [`RamSegment`](crate::index::RamSegment) hands out,
/// and is convenient to build postings by hand in tests.
pub struct VecPostings {
    doc_freqs: Arc<[(DocId, TermFreq)]>,
    // `None` until the first seek.
    cursor: Option<usize>,
}

impl From<Vec<(DocId, TermFreq)>> for VecPostings {
    fn from(doc_freqs: Vec<(DocId, TermFreq)>) -> VecPostings {
        VecPostings::new(doc_freqs.into())
    }
}

impl VecPostings {
    /// Creates unpositioned postings over `doc_freqs`.
    ///
    /// Doc ids must be strictly increasing.
    pub fn new(doc_freqs: Arc<[(DocId, TermFreq)]>) -> VecPostings {
        debug_assert!(
            doc_freqs.windows(2).all(|w| w[0].0 < w[1].0),
            "postings doc ids must be strictly increasing"
        );
        VecPostings {
            doc_freqs,
            cursor: None,
        }
    }
}

impl Postings for VecPostings {
    fn position(&self) -> CursorPosition {
        match self.cursor {
            None => CursorPosition::Unpositioned,
            Some(ord) => self
                .doc_freqs
                .get(ord)
                .map(|&(doc, _)| CursorPosition::At(doc))
                .unwrap_or(CursorPosition::Exhausted),
        }
    }

    fn seek(&mut self, target: DocId) -> io::Result<CursorPosition> {
        debug_assert!(self.position() < CursorPosition::At(target));
        fail_point!("VecPostings::seek", |msg: Option<String>| {
            Err(io::Error::new(io::ErrorKind::Other, format!("{:?}", msg)))
        });
        let start = self.cursor.unwrap_or(0).min(self.doc_freqs.len());
        let offset = self.doc_freqs[start..].partition_point(|&(doc, _)| doc < target);
        self.cursor = Some(start + offset);
        Ok(self.position())
    }

    fn term_freq(&mut self) -> io::Result<TermFreq> {
        fail_point!("VecPostings::term_freq", |msg: Option<String>| {
            Err(io::Error::new(io::ErrorKind::Other, format!("{:?}", msg)))
        });
        self.cursor
            .and_then(|ord| self.doc_freqs.get(ord))
            .map(|&(_, term_freq)| term_freq)
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "term frequency requested while the postings are not positioned on a document",
                )
            })
    }

    fn doc_freq(&self) -> u32 {
        self.doc_freqs.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::VecPostings;
    use crate::postings::{CursorPosition, Postings};

    #[test]
    fn test_vec_postings() {
        let doc_freqs: Vec<(u32, u32)> = (0u32..1024u32).map(|e| (e * 3, e % 5 + 1)).collect();
        let mut postings = VecPostings::from(doc_freqs);
        assert_eq!(postings.position(), CursorPosition::Unpositioned);
        assert_eq!(postings.doc_freq(), 1024);
        assert_eq!(postings.seek(0).unwrap(), CursorPosition::At(0));
        assert_eq!(postings.term_freq().unwrap(), 1);
        assert_eq!(postings.seek(14).unwrap(), CursorPosition::At(15));
        assert_eq!(postings.term_freq().unwrap(), 1);
        assert_eq!(postings.seek(300).unwrap(), CursorPosition::At(300));
        assert_eq!(postings.term_freq().unwrap(), 1);
        assert_eq!(postings.seek(301).unwrap(), CursorPosition::At(303));
        assert_eq!(postings.term_freq().unwrap(), 2);
        assert_eq!(postings.seek(6000).unwrap(), CursorPosition::Exhausted);
        assert!(postings.term_freq().is_err());
    }

    #[test]
    fn test_vec_postings_empty() {
        let mut postings = VecPostings::from(Vec::new());
        assert_eq!(postings.doc_freq(), 0);
        assert_eq!(postings.seek(0).unwrap(), CursorPosition::Exhausted);
    }

    #[test]
    fn test_term_freq_before_first_seek_is_an_error() {
        let mut postings = VecPostings::from(vec![(1, 3)]);
        let err = postings.term_freq().unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }
}
