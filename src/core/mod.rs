mod executor;
mod filter;

pub use self::executor::Executor;
pub use self::filter::{filter_docset, filter_segments};
