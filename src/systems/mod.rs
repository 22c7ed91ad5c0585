//! Systems - the per-cell update rule
//!
//! movement.rs  - neighbor-resolution movement rule (candidate next cell)
//! lifecycle.rs - ttl decay, clear reseed, capture spawn (post-processing)
//!
//! Both are pure over a read-only source grid; all writes happen in the
//! step orchestrator.

pub mod lifecycle;
pub mod movement;
