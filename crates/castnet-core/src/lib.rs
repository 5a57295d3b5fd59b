//! Core types and storage for castnet.
//!
//! Provides the cast dataset model ([`dataset::Dataset`]), the season
//! co-membership graph ([`graph::CastGraph`]), the season-overlap view,
//! JSON persistence for datasets, and TOML configuration.

pub mod config;
pub mod dataset;
pub mod graph;
pub mod seasons;
pub mod storage;
