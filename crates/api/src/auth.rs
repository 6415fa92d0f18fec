// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authenticated actor identity.

use leadbook_domain::Agent;

/// An authenticated actor, as resolved at the transport boundary.
///
/// The external identity provider vouches for these values before any
/// handler runs; a request with no actor id never reaches a handler.
/// Admin standing arrives with the identity and is not stored
/// authoritatively by this system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// Opaque id from the identity provider.
    pub id: String,
    /// Human-readable name, when the provider supplies one.
    pub display_name: Option<String>,
    /// Contact email, when the provider supplies one.
    pub email: Option<String>,
    /// Whether the actor holds the admin capability.
    pub is_admin: bool,
}

impl AuthenticatedActor {
    /// Creates an authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `display_name` - Human-readable name, if known
    /// * `email` - Contact email, if known
    /// * `is_admin` - Whether the actor holds the admin capability
    #[must_use]
    pub const fn new(
        id: String,
        display_name: Option<String>,
        email: Option<String>,
        is_admin: bool,
    ) -> Self {
        Self {
            id,
            display_name,
            email,
            is_admin,
        }
    }

    /// Converts this actor into the domain identity.
    ///
    /// The domain [`Agent`] drives ownership checks and is cached as a
    /// profile row on every write path.
    #[must_use]
    pub fn to_agent(&self) -> Agent {
        Agent::new(
            self.id.clone(),
            self.display_name.clone(),
            self.email.clone(),
            self.is_admin,
        )
    }
}
