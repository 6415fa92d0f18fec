// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur when parsing domain vocabulary tokens.
///
/// Field-level form validation does not use this type; it reports through
/// [`crate::ValidationErrors`] so every failing field is surfaced at once.
/// `DomainError` covers single-token parsing, which is also how storage
/// tokens are decoded when records are read back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// City token is not a known city.
    InvalidCity(String),
    /// Property type token is not a known property type.
    InvalidPropertyType(String),
    /// BHK token is not a known unit size.
    InvalidBhk(String),
    /// Purpose token is not `Buy` or `Rent`.
    InvalidPurpose(String),
    /// Timeline token is not a known timeline.
    InvalidTimeline(String),
    /// Source token is not a known source.
    InvalidSource(String),
    /// Status token is not a known pipeline stage.
    InvalidStatus(String),
    /// A persisted storage token has no user-facing counterpart.
    ///
    /// Validation restricts every write to mapped enum members, so hitting
    /// this on a read means the stored data was produced by something other
    /// than this system.
    UnmappedStorageToken {
        /// The field the token was read from.
        field: &'static str,
        /// The unmapped token.
        token: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCity(token) => write!(f, "Invalid city: {token}"),
            Self::InvalidPropertyType(token) => write!(f, "Invalid property type: {token}"),
            Self::InvalidBhk(token) => write!(f, "Invalid BHK: {token}"),
            Self::InvalidPurpose(token) => write!(f, "Invalid purpose: {token}"),
            Self::InvalidTimeline(token) => write!(f, "Invalid timeline: {token}"),
            Self::InvalidSource(token) => write!(f, "Invalid source: {token}"),
            Self::InvalidStatus(token) => write!(f, "Invalid status: {token}"),
            Self::UnmappedStorageToken { field, token } => {
                write!(f, "Unmapped storage token for {field}: '{token}'")
            }
        }
    }
}

impl std::error::Error for DomainError {}
