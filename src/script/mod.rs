//! Filter scripts.
//!
//! A script goes through the following stages:
//!
//! - a [`ScriptEngine`] compiles the script source for a [`ScriptContext`]
//!   and returns a [`FilterScriptFactory`],
//! - the [`FilterScriptFactory`] binds the script parameters, once per query,
//!   and returns a [`FilterLeafFactory`],
//! - the [`FilterLeafFactory`] creates one [`FilterScript`] per segment
//!   visited by the query.
//!
//! [`ScriptService`] is the host-side registry of engines.

mod contains_multiple;
mod context;
mod engine;
mod filter_script;
mod params;
mod service;

pub use self::contains_multiple::{
    ContainsMultipleEngine, ContainsMultipleFactory, ContainsMultipleLeafFactory,
    ContainsMultiplePlugin, ContainsMultipleScript, CONTAINS_MULTIPLE_SCRIPT_NAME,
    EXPERT_SCRIPT_TYPE,
};
pub use self::context::ScriptContext;
pub use self::engine::{ScriptEngine, ScriptPlugin};
pub use self::filter_script::{FilterLeafFactory, FilterScript, FilterScriptFactory, NoMatchScript};
pub use self::params::{ContainsMultipleParams, Params};
pub use self::service::{Script, ScriptService};
