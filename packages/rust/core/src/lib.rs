//! Core pipeline orchestration for tfdoc.
//!
//! This crate ties together URL resolution, fetching and extraction into the
//! end-to-end [`pipeline::scrape`] workflow, and renders the resulting records.

pub mod pipeline;
pub mod render;
