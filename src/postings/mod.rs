//! Postings module (also called inverted index)
//!
//! Postings, also called inverted lists, are the per-term list of documents
//! containing that term, together with the number of occurrences of the term
//! in each document.
//!
//! The storage engine exposes them through the [`Postings`] trait. The
//! filter never talks to a [`Postings`] directly: it goes through a
//! [`TermCursor`], which also covers the case of a term that was never
//! indexed in the segment.

mod postings;
mod term_cursor;
mod vec_postings;

pub use self::postings::{CursorPosition, Postings};
pub use self::term_cursor::TermCursor;
pub use self::vec_postings::VecPostings;
