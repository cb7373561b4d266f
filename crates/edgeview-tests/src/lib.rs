//! Integration tests for the edgeview crates.
//!
//! This crate contains end-to-end tests that verify the interaction
//! between the pipeline, the handle lifecycle, and the boundary surface.
