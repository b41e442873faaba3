//! Shared primitive types used across the generator and the analyzer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sequential complaint identifier, e.g. `CMP_100001`.
pub type ComplaintId = String;

/// Offset added to the 1-based row index to form a complaint id.
pub const COMPLAINT_ID_BASE: u64 = 100_000;

pub fn complaint_id(index: u64) -> ComplaintId {
    format!("CMP_{}", COMPLAINT_ID_BASE + index)
}

/// Category of cyber financial fraud reported in a complaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FraudType {
    #[serde(rename = "Phishing")]
    Phishing,
    #[serde(rename = "UPI Fraud")]
    UpiFraud,
    #[serde(rename = "Credit Card Fraud")]
    CreditCardFraud,
    #[serde(rename = "Fake Loan App")]
    FakeLoanApp,
    #[serde(rename = "OTP Scam")]
    OtpScam,
    #[serde(rename = "Online Shopping Scam")]
    OnlineShoppingScam,
}

impl FraudType {
    /// Declaration order. NEVER reorder: weights and chart rows index into it.
    pub const ALL: [FraudType; 6] = [
        Self::Phishing,
        Self::UpiFraud,
        Self::CreditCardFraud,
        Self::FakeLoanApp,
        Self::OtpScam,
        Self::OnlineShoppingScam,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Phishing           => "Phishing",
            Self::UpiFraud           => "UPI Fraud",
            Self::CreditCardFraud    => "Credit Card Fraud",
            Self::FakeLoanApp        => "Fake Loan App",
            Self::OtpScam            => "OTP Scam",
            Self::OnlineShoppingScam => "Online Shopping Scam",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for FraudType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FraudType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown fraud type '{s}'"))
    }
}

/// Victim or withdrawal location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum City {
    Delhi,
    Mumbai,
    Bengaluru,
    Hyderabad,
    Chennai,
    Pune,
    Kolkata,
    Jaipur,
    Indore,
    Lucknow,
}

impl City {
    pub const ALL: [City; 10] = [
        Self::Delhi,
        Self::Mumbai,
        Self::Bengaluru,
        Self::Hyderabad,
        Self::Chennai,
        Self::Pune,
        Self::Kolkata,
        Self::Jaipur,
        Self::Indore,
        Self::Lucknow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Delhi     => "Delhi",
            Self::Mumbai    => "Mumbai",
            Self::Bengaluru => "Bengaluru",
            Self::Hyderabad => "Hyderabad",
            Self::Chennai   => "Chennai",
            Self::Pune      => "Pune",
            Self::Kolkata   => "Kolkata",
            Self::Jaipur    => "Jaipur",
            Self::Indore    => "Indore",
            Self::Lucknow   => "Lucknow",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for City {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown city '{s}'"))
    }
}
