//! Access to the segments of an index.
//!
//! The filter only needs one thing from a segment: the postings of a single
//! `(field, term)` pair. [`SegmentReader`] is that boundary.
//! [`RamSegment`] is an in-memory implementation.

mod ram_segment;
mod segment_reader;

pub use self::ram_segment::{RamSegment, RamSegmentBuilder};
pub use self::segment_reader::SegmentReader;
