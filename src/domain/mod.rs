//! Shared data model layer (structs/constants only).
//!
//! ## Purpose
//! - Keep persisted records and report structs in one place.
//! - Avoid cyclic imports and duplicated type definitions.
//! - Make JSON schema changes explicit and reviewable.
//!
//! ## Files
//! - `models.rs` — projects, verdicts, reports, config file structs.
//! - `constants.rs` — stable defaults and caps.
//! - `errors.rs` — command-level error taxonomy.
//!
//! ## Rule of thumb
//! Domain types should be data-only: no filesystem/network side effects.
//!
//! ## Compatibility note
//! `Project` and `Verdict` are the persisted formats. Field names and order
//! must stay in sync with `docs/contracts/*`.

pub mod constants;
pub mod errors;
pub mod models;
