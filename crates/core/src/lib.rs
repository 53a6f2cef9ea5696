//! Domain core for the simq dispatch frontend.
//!
//! Pure types and formatters shared by the dispatch tooling: the external
//! job descriptor, the job list emitted to the downstream scheduler, and
//! scheduling priority helpers. No internal deps, no I/O beyond writing
//! finished records to a caller-supplied stream.

pub mod error;
pub mod job;
pub mod joblist;
pub mod scheduling;
