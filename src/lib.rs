#![warn(missing_docs)]

//! # `termfreq-filter`
//!
//! A filter predicate that matches the documents of a segment in which a
//! given term appears at least `count` times in a given field.
//!
//! The predicate plugs into a per-segment execution model:
//!
//! - a [`ScriptEngine`](script::ScriptEngine) compiles a named script into a
//!   [`FilterScriptFactory`](script::FilterScriptFactory),
//! - the factory validates the script parameters and returns a
//!   [`FilterLeafFactory`](script::FilterLeafFactory),
//! - the leaf factory opens the term's postings in one
//!   [`SegmentReader`](index::SegmentReader) and returns a
//!   [`FilterScript`](script::FilterScript),
//! - the host then calls [`set_document`](script::FilterScript::set_document)
//!   and [`execute`](script::FilterScript::execute) for increasing doc ids.
//!
//! ```rust
//! use maplit::hashmap;
//! use termfreq_filter::index::{RamSegmentBuilder, SegmentReader};
//! use termfreq_filter::script::{ContainsMultipleEngine, ScriptContext, ScriptEngine};
//! use termfreq_filter::filter_docset;
//! use termfreq_filter::docset::AllDocs;
//!
//! # fn main() -> termfreq_filter::Result<()> {
//! let mut segment_builder = RamSegmentBuilder::default();
//! segment_builder.add_document([("text", "foo foo foo")]);
//! segment_builder.add_document([("text", "foo bar")]);
//! let segment = segment_builder.build();
//!
//! let engine = ContainsMultipleEngine;
//! let factory = engine.compile(
//!     "my_script",
//!     "contains_multiple",
//!     ScriptContext::Filter,
//!     &Default::default(),
//! )?;
//! let params = hashmap! {
//!     "field".to_string() => "text".into(),
//!     "term".to_string() => "foo".into(),
//!     "count".to_string() => 2.into(),
//! };
//! let leaf_factory = factory.new_factory(&params)?;
//! let mut script = leaf_factory.new_instance(&segment)?;
//! let matching_docs = filter_docset(script.as_mut(), &mut AllDocs::new(segment.max_doc()))?;
//! assert_eq!(matching_docs, vec![0]);
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod macros;

mod core;
mod error;
mod settings;

pub mod docset;
pub mod index;
pub mod postings;
pub mod script;

pub use crate::core::{filter_docset, filter_segments, Executor};
pub use crate::docset::{DocSet, TERMINATED};
pub use crate::error::FilterError;
pub use crate::settings::ScriptSettings;

/// `termfreq-filter` result type.
pub type Result<T> = std::result::Result<T, FilterError>;

/// A `u32` identifying a document within a segment.
/// Documents have their `DocId` assigned incrementally,
/// as they are added in the segment.
pub type DocId = u32;

/// Frequency of a term within one document field.
pub type TermFreq = u32;

/// Expose the current version of the crate.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
