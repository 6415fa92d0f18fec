// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Closed enum vocabularies for lead records.
//!
//! Every enum here serializes with its user-facing token (the value shown in
//! forms, CSV files, and API payloads). Three of these vocabularies persist
//! under a different spelling; see the `translate` module for the
//! storage-token bijections.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// City a lead is shopping in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    Chandigarh,
    Mohali,
    Zirakpur,
    Panchkula,
    Other,
}

impl City {
    /// Converts this city to its canonical token.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Chandigarh => "Chandigarh",
            Self::Mohali => "Mohali",
            Self::Zirakpur => "Zirakpur",
            Self::Panchkula => "Panchkula",
            Self::Other => "Other",
        }
    }

    /// Parses a city from its canonical token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a known city.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "Chandigarh" => Ok(Self::Chandigarh),
            "Mohali" => Ok(Self::Mohali),
            "Zirakpur" => Ok(Self::Zirakpur),
            "Panchkula" => Ok(Self::Panchkula),
            "Other" => Ok(Self::Other),
            _ => Err(DomainError::InvalidCity(s.to_string())),
        }
    }
}

impl FromStr for City {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of property the lead is interested in.
///
/// BHK requiredness hangs off this: Apartment and Villa listings are sized in
/// BHK units, the rest are not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    Apartment,
    Villa,
    Plot,
    Office,
    Retail,
}

impl PropertyType {
    /// Converts this property type to its canonical token.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Apartment => "Apartment",
            Self::Villa => "Villa",
            Self::Plot => "Plot",
            Self::Office => "Office",
            Self::Retail => "Retail",
        }
    }

    /// Parses a property type from its canonical token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a known property type.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "Apartment" => Ok(Self::Apartment),
            "Villa" => Ok(Self::Villa),
            "Plot" => Ok(Self::Plot),
            "Office" => Ok(Self::Office),
            "Retail" => Ok(Self::Retail),
            _ => Err(DomainError::InvalidPropertyType(s.to_string())),
        }
    }

    /// Returns whether leads for this property type carry a BHK size.
    #[must_use]
    pub const fn requires_bhk(&self) -> bool {
        matches!(self, Self::Apartment | Self::Villa)
    }
}

impl FromStr for PropertyType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Unit-size category for residential property types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bhk {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    Studio,
}

impl Bhk {
    /// Converts this BHK to its user-facing token.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::One => "1",
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Studio => "Studio",
        }
    }

    /// Parses a BHK from its user-facing token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a known BHK value.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "1" => Ok(Self::One),
            "2" => Ok(Self::Two),
            "3" => Ok(Self::Three),
            "4" => Ok(Self::Four),
            "Studio" => Ok(Self::Studio),
            _ => Err(DomainError::InvalidBhk(s.to_string())),
        }
    }
}

impl FromStr for Bhk {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Bhk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether the lead wants to buy or rent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Purpose {
    Buy,
    Rent,
}

impl Purpose {
    /// Converts this purpose to its canonical token.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "Buy",
            Self::Rent => "Rent",
        }
    }

    /// Parses a purpose from its canonical token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not `Buy` or `Rent`.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "Buy" => Ok(Self::Buy),
            "Rent" => Ok(Self::Rent),
            _ => Err(DomainError::InvalidPurpose(s.to_string())),
        }
    }
}

impl FromStr for Purpose {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Purpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Purchase horizon the lead has stated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeline {
    /// Ready within three months.
    #[serde(rename = "0-3m")]
    ZeroToThreeMonths,
    /// Three to six months out.
    #[serde(rename = "3-6m")]
    ThreeToSixMonths,
    /// More than six months out.
    #[serde(rename = ">6m")]
    MoreThanSixMonths,
    /// Browsing with no committed window.
    Exploring,
}

impl Timeline {
    /// Converts this timeline to its user-facing token.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ZeroToThreeMonths => "0-3m",
            Self::ThreeToSixMonths => "3-6m",
            Self::MoreThanSixMonths => ">6m",
            Self::Exploring => "Exploring",
        }
    }

    /// Parses a timeline from its user-facing token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a known timeline.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "0-3m" => Ok(Self::ZeroToThreeMonths),
            "3-6m" => Ok(Self::ThreeToSixMonths),
            ">6m" => Ok(Self::MoreThanSixMonths),
            "Exploring" => Ok(Self::Exploring),
            _ => Err(DomainError::InvalidTimeline(s.to_string())),
        }
    }
}

impl FromStr for Timeline {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Timeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Channel that produced the lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Source {
    Website,
    Referral,
    #[serde(rename = "Walk-in")]
    WalkIn,
    Call,
    Other,
}

impl Source {
    /// Converts this source to its user-facing token.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Website => "Website",
            Self::Referral => "Referral",
            Self::WalkIn => "Walk-in",
            Self::Call => "Call",
            Self::Other => "Other",
        }
    }

    /// Parses a source from its user-facing token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a known source.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "Website" => Ok(Self::Website),
            "Referral" => Ok(Self::Referral),
            "Walk-in" => Ok(Self::WalkIn),
            "Call" => Ok(Self::Call),
            "Other" => Ok(Self::Other),
            _ => Err(DomainError::InvalidSource(s.to_string())),
        }
    }
}

impl FromStr for Source {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pipeline stage of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LeadStatus {
    /// Freshly captured, nobody has worked it yet.
    #[default]
    New,
    Qualified,
    Contacted,
    Visited,
    Negotiation,
    Converted,
    Dropped,
}

impl LeadStatus {
    /// Converts this status to its canonical token.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Qualified => "Qualified",
            Self::Contacted => "Contacted",
            Self::Visited => "Visited",
            Self::Negotiation => "Negotiation",
            Self::Converted => "Converted",
            Self::Dropped => "Dropped",
        }
    }

    /// Parses a status from its canonical token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a known status.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "New" => Ok(Self::New),
            "Qualified" => Ok(Self::Qualified),
            "Contacted" => Ok(Self::Contacted),
            "Visited" => Ok(Self::Visited),
            "Negotiation" => Ok(Self::Negotiation),
            "Converted" => Ok(Self::Converted),
            "Dropped" => Ok(Self::Dropped),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl FromStr for LeadStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
