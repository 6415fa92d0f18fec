// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules for the persistence layer.
//!
//! This module contains all state-changing operations.
//!
//! ## Module Organization
//!
//! - `leads` — Transition execution and bulk insertion of lead records
//! - `agents` — Agent profile cache upserts
//!
//! ## Backend-Specific Code
//!
//! Backend-specific helpers (e.g., `get_last_insert_rowid()`) are imported
//! from the `backend` module. All other code uses Diesel DSL exclusively.

pub mod agents;
pub mod leads;

pub use agents::upsert_agent;
pub use leads::{PersistTransitionResult, insert_lead_batch, persist_transition};
