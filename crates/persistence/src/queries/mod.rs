// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for the persistence layer.
//!
//! This module contains all read-only queries.
//!
//! ## Module Organization
//!
//! - `leads` — Single-record lookup and the listing engine
//! - `history` — Lead history queries
//! - `agents` — Agent profile cache queries

pub mod agents;
pub mod history;
pub mod leads;

pub use agents::get_agent;
pub use history::get_lead_history;
pub use leads::{get_lead, list_leads};
