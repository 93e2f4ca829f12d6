use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use fnv::FnvHashMap;

use crate::index::SegmentReader;
use crate::postings::{Postings, VecPostings};
use crate::{DocId, TermFreq};

type TermPostings = FnvHashMap<String, Vec<(DocId, TermFreq)>>;

/// Builds a [`RamSegment`] one document at a time.
///
/// Field values are split on whitespace. Every token is a term.
#[derive(Default)]
pub struct RamSegmentBuilder {
    max_doc: DocId,
    fields: FnvHashMap<String, TermPostings>,
}

impl RamSegmentBuilder {
    /// Adds a document made of `(field, text)` pairs and returns its `DocId`.
    ///
    /// A field may appear several times, its term frequencies then add up.
    /// A document without any field is legal: it simply matches nothing.
    pub fn add_document<'a, I>(&mut self, field_values: I) -> DocId
    where I: IntoIterator<Item = (&'a str, &'a str)> {
        let doc = self.max_doc;
        for (field, text) in field_values {
            let term_postings = self.fields.entry(field.to_string()).or_default();
            for token in text.split_whitespace() {
                let doc_freqs = term_postings.entry(token.to_string()).or_default();
                match doc_freqs.last_mut() {
                    Some((last_doc, term_freq)) if *last_doc == doc => *term_freq += 1,
                    _ => doc_freqs.push((doc, 1)),
                }
            }
        }
        self.max_doc += 1;
        doc
    }

    /// Freezes the documents added so far into a segment.
    pub fn build(self) -> RamSegment {
        let fields = self
            .fields
            .into_iter()
            .map(|(field, term_postings)| {
                let term_postings = term_postings
                    .into_iter()
                    .map(|(term, doc_freqs)| (term, Arc::from(doc_freqs)))
                    .collect();
                (field, term_postings)
            })
            .collect();
        RamSegment {
            max_doc: self.max_doc,
            fields,
            num_postings_opened: AtomicUsize::new(0),
        }
    }
}

/// Immutable in-memory segment.
pub struct RamSegment {
    max_doc: DocId,
    fields: FnvHashMap<String, FnvHashMap<String, Arc<[(DocId, TermFreq)]>>>,
    num_postings_opened: AtomicUsize,
}

impl RamSegment {
    /// Returns the number of times postings were looked up in this segment,
    /// whether the term was found or not.
    pub fn num_postings_opened(&self) -> usize {
        self.num_postings_opened.load(Ordering::Relaxed)
    }

    /// Returns the number of documents containing `term` in `field`.
    pub fn doc_freq(&self, field: &str, term: &str) -> u32 {
        self.fields
            .get(field)
            .and_then(|term_postings| term_postings.get(term))
            .map(|doc_freqs| doc_freqs.len() as u32)
            .unwrap_or(0u32)
    }
}

impl SegmentReader for RamSegment {
    fn max_doc(&self) -> DocId {
        self.max_doc
    }

    fn postings(&self, field: &str, term: &str) -> io::Result<Option<Box<dyn Postings>>> {
        self.num_postings_opened.fetch_add(1, Ordering::Relaxed);
        fail_point!("RamSegment::postings", |msg: Option<String>| {
            Err(io::Error::new(io::ErrorKind::Other, format!("{:?}", msg)))
        });
        let postings_opt = self
            .fields
            .get(field)
            .and_then(|term_postings| term_postings.get(term))
            .map(|doc_freqs| Box::new(VecPostings::new(doc_freqs.clone())) as Box<dyn Postings>);
        Ok(postings_opt)
    }
}

#[cfg(test)]
mod tests {
    use super::RamSegmentBuilder;
    use crate::index::SegmentReader;
    use crate::postings::CursorPosition;

    #[test]
    fn test_ram_segment_term_freqs() -> crate::Result<()> {
        let mut segment_builder = RamSegmentBuilder::default();
        assert_eq!(segment_builder.add_document([("text", "a b a")]), 0);
        assert_eq!(segment_builder.add_document([("title", "a")]), 1);
        assert_eq!(
            segment_builder.add_document([("text", "b"), ("text", "a b")]),
            2
        );
        let segment = segment_builder.build();
        assert_eq!(segment.max_doc(), 3);
        assert_eq!(segment.doc_freq("text", "a"), 2);
        assert_eq!(segment.doc_freq("text", "b"), 2);
        assert_eq!(segment.doc_freq("title", "a"), 1);
        assert_eq!(segment.doc_freq("body", "a"), 0);

        let mut postings = segment.postings("text", "b")?.unwrap();
        assert_eq!(postings.seek(0)?, CursorPosition::At(0));
        assert_eq!(postings.term_freq()?, 1);
        assert_eq!(postings.seek(1)?, CursorPosition::At(2));
        assert_eq!(postings.term_freq()?, 2);
        Ok(())
    }

    #[test]
    fn test_ram_segment_missing_postings() -> crate::Result<()> {
        let mut segment_builder = RamSegmentBuilder::default();
        segment_builder.add_document([("text", "a")]);
        let segment = segment_builder.build();
        assert!(segment.postings("text", "z")?.is_none());
        assert!(segment.postings("other", "a")?.is_none());
        assert_eq!(segment.num_postings_opened(), 2);
        Ok(())
    }

    #[test]
    fn test_ram_segment_empty_document() {
        let mut segment_builder = RamSegmentBuilder::default();
        segment_builder.add_document(std::iter::empty());
        let segment = segment_builder.build();
        assert_eq!(segment.max_doc(), 1);
    }
}
