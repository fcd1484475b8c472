//! reqgen - Pinned requirements generator library
//!
//! This library turns a declarative dependency configuration into a
//! deterministic `requirements.txt`:
//! - Configuration loading (YAML, TOML, JSON)
//! - Name and version constraint validation
//! - Environment and feature selection
//! - Manifest rendering, writing and up-to-date checks

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod generator;
pub mod logging;
pub mod manifest;
pub mod orchestrator;
pub mod output;
pub mod parser;
