//! A handful of executor independent synchronization primitives.
//!
//! The goal is to provide synchronization across tasks managed by a single
//! executor, with explicit interruption of waiting tasks.
pub mod mutex;
pub mod semaphore;

pub use mutex::*;
pub use semaphore::*;
