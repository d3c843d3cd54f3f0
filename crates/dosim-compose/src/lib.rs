//! Dose composition: structural validation and local evaluation of
//! operation trees over voxel dose grids.
//!
//! The evaluator is pure and synchronous; it performs no I/O and holds no
//! shared state, so independent callers may run it concurrently on their own
//! trees and resolvers.

mod error;
mod evaluate;
mod resolver;
mod validate;

pub use error::ComposeError;
pub use evaluate::{evaluate, evaluate_task};
pub use resolver::{GridStore, ResampleError, Resolver};
pub use validate::{validate, validate_task};
