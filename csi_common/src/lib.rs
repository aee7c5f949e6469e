//! Common utilities and shared types for the CSI workspace.
//!
//! This crate provides vertex and edge identifiers, the solver configuration,
//! and the dense integer set used to track vertex availability during a search.

mod config;
mod dense_set;
mod ids;

pub use crate::config::*;
pub use crate::dense_set::*;
pub use crate::ids::*;
