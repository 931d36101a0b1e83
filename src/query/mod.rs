//! Query compiler: FilterSpec -> parameterized predicate.

pub mod compile;
pub mod predicate;
pub mod sql;

pub use compile::{CompiledQuery, compile, compile_population};
