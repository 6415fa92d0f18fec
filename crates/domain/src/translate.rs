// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage-token bijections for the vocabularies whose persisted spelling
//! differs from the user-facing one.
//!
//! Only BHK, timeline, and source need a mapping; city, property type,
//! purpose, and status persist under their `as_str` tokens. The forward
//! direction is total by construction (a `match` on the enum); the reverse
//! direction rejects unmapped tokens, which can only appear if the stored
//! data was written by something other than this system.

use crate::enums::{Bhk, Source, Timeline};
use crate::error::DomainError;

impl Bhk {
    /// Returns the persisted token for this BHK value.
    #[must_use]
    pub const fn storage_token(&self) -> &'static str {
        match self {
            Self::One => "ONE",
            Self::Two => "TWO",
            Self::Three => "THREE",
            Self::Four => "FOUR",
            Self::Studio => "STUDIO",
        }
    }

    /// Parses a BHK value from its persisted token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token has no user-facing counterpart.
    pub fn from_storage_token(token: &str) -> Result<Self, DomainError> {
        match token {
            "ONE" => Ok(Self::One),
            "TWO" => Ok(Self::Two),
            "THREE" => Ok(Self::Three),
            "FOUR" => Ok(Self::Four),
            "STUDIO" => Ok(Self::Studio),
            _ => Err(DomainError::UnmappedStorageToken {
                field: "bhk",
                token: token.to_string(),
            }),
        }
    }
}

impl Timeline {
    /// Returns the persisted token for this timeline.
    #[must_use]
    pub const fn storage_token(&self) -> &'static str {
        match self {
            Self::ZeroToThreeMonths => "ZERO_THREE_MONTHS",
            Self::ThreeToSixMonths => "THREE_SIX_MONTHS",
            Self::MoreThanSixMonths => "GREATER_SIX_MONTHS",
            Self::Exploring => "EXPLORING",
        }
    }

    /// Parses a timeline from its persisted token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token has no user-facing counterpart.
    pub fn from_storage_token(token: &str) -> Result<Self, DomainError> {
        match token {
            "ZERO_THREE_MONTHS" => Ok(Self::ZeroToThreeMonths),
            "THREE_SIX_MONTHS" => Ok(Self::ThreeToSixMonths),
            "GREATER_SIX_MONTHS" => Ok(Self::MoreThanSixMonths),
            "EXPLORING" => Ok(Self::Exploring),
            _ => Err(DomainError::UnmappedStorageToken {
                field: "timeline",
                token: token.to_string(),
            }),
        }
    }
}

impl Source {
    /// Returns the persisted token for this source.
    ///
    /// `Walk-in` persists as `Walk_in`; the store's vocabulary disallows
    /// hyphens in tokens. The rest persist as displayed.
    #[must_use]
    pub const fn storage_token(&self) -> &'static str {
        match self {
            Self::Website => "Website",
            Self::Referral => "Referral",
            Self::WalkIn => "Walk_in",
            Self::Call => "Call",
            Self::Other => "Other",
        }
    }

    /// Parses a source from its persisted token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token has no user-facing counterpart.
    pub fn from_storage_token(token: &str) -> Result<Self, DomainError> {
        match token {
            "Website" => Ok(Self::Website),
            "Referral" => Ok(Self::Referral),
            "Walk_in" => Ok(Self::WalkIn),
            "Call" => Ok(Self::Call),
            "Other" => Ok(Self::Other),
            _ => Err(DomainError::UnmappedStorageToken {
                field: "source",
                token: token.to_string(),
            }),
        }
    }
}
