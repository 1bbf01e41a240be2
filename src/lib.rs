//! Tetrogue (workspace facade crate).
//!
//! Re-exports the workspace crates as `tetrogue::{core,input,term,types}` so
//! the viewer binary, integration tests and benchmarks share one import root.
//! The implementation lives in dedicated crates under `crates/`.

pub use tetrogue_core as core;
pub use tetrogue_input as input;
pub use tetrogue_term as term;
pub use tetrogue_types as types;
