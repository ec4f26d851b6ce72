/// Username status definitions for check results
///
/// This module defines all possible outcomes of checking one username
/// against the marketplace.
use serde::Serialize;
use std::fmt;

/// Represents the final status of one checked username
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UsernameStatus {
    // ===== Marketplace States =====
    /// Username is open for bids or purchase
    Available,

    /// Username is listed at a fixed price
    ForSale,

    /// Username is currently being auctioned
    OnAuction,

    /// Username is already claimed by someone
    Taken,

    /// Username was recently sold
    Sold,

    /// Username exists but is not offered on the marketplace
    Unavailable,

    /// Username did not appear in the marketplace results
    NotFound,

    // ===== Failure States =====
    /// Request was blocked by upstream anti-automation defenses (HTTP 403/429)
    CfBlocked,

    /// Request exceeded its deadline
    Timeout,

    /// Transport failure or any other unexpected error during processing
    Error,
}

impl UsernameStatus {
    /// Returns true if this status was produced by a fetch failure rather
    /// than by classifying marketplace markup.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::CfBlocked | Self::Timeout | Self::Error)
    }

    /// Returns true if the username can currently be acquired on the marketplace
    pub fn is_purchasable(&self) -> bool {
        matches!(self, Self::Available | Self::ForSale | Self::OnAuction)
    }

    /// Converts the status to its wire string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::ForSale => "for_sale",
            Self::OnAuction => "on_auction",
            Self::Taken => "taken",
            Self::Sold => "sold",
            Self::Unavailable => "unavailable",
            Self::NotFound => "not_found",
            Self::CfBlocked => "cf_blocked",
            Self::Timeout => "timeout",
            Self::Error => "error",
        }
    }

    /// Parses a status from its wire string representation
    ///
    /// Returns None if the string doesn't match any known status.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "available" => Some(Self::Available),
            "for_sale" => Some(Self::ForSale),
            "on_auction" => Some(Self::OnAuction),
            "taken" => Some(Self::Taken),
            "sold" => Some(Self::Sold),
            "unavailable" => Some(Self::Unavailable),
            "not_found" => Some(Self::NotFound),
            "cf_blocked" => Some(Self::CfBlocked),
            "timeout" => Some(Self::Timeout),
            "error" => Some(Self::Error),
            _ => None,
        }
    }
}

impl fmt::Display for UsernameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
