// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend utilities.
//!
//! `SQLite` is the only supported backend. It covers development, unit and
//! integration tests (in-memory databases), and production deployments
//! (file-based databases with WAL mode). Backend-specific code lives here;
//! everything in `queries/` and `mutations/` uses plain Diesel DSL.

pub mod sqlite;
