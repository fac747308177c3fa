//! Mental-health provider lookup backed by the NPI Registry.
//!
//! The [`lookup`] module holds the request pipeline: validate a zip, query the
//! registry once, keep only mental-health practitioners, score them against an
//! optional focus and return them ordered by relevance.

pub mod config;
pub mod error;
pub mod lookup;
pub mod registry;
pub mod telemetry;
