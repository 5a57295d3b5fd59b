//! Navigation and analysis over the cast graph.
//!
//! Provides shortest-path queries, the diameter-witness sweep (longest
//! shortest paths with ties), endpoint/interior frequency tables, report
//! rendering, player search, and DOT/Mermaid export.

pub mod diameter;
pub mod export;
pub mod frequency;
pub mod paths;
pub mod report;
pub mod search;
