//! Service layer containing business logic and side-effect helpers.
//!
//! ## Service map
//! - `discovery.rs` — dependent lookup against the package index.
//! - `engine.rs` — per-project fetch/test loop and error summaries.
//! - `toolchain.rs` — fetcher/test-runner seams and their command-backed impls.
//! - `process.rs` — child spawning with a hard deadline.
//! - `compare.rs` — before/after verdict diff.
//! - `report.rs` — run summary and impact report rendering.
//! - `storage.rs` — project list and verdict file persistence.
//! - `config.rs` — TOML config file loading.
//! - `output.rs` — JSON/text output helpers.
//!
//! ## Conventions
//! - Prefer pure helpers where possible.
//! - Side effects should be explicit and localized.
//! - Keep command handlers thin; delegate to services.

pub mod compare;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod output;
pub mod process;
pub mod report;
pub mod storage;
pub mod toolchain;
