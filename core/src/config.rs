//! Generation policy and analysis settings.
//!
//! Every categorical distribution, range and threshold lives here as a named
//! constant so the generation policy can be audited and tested apart from the
//! row-assembly loop. `GeneratorConfig::default()` reproduces the reference
//! dataset; a JSON file may override any subset of fields.

use crate::{
    error::{DatasetError, DatasetResult},
    types::{City, FraudType},
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ── Constants ────────────────────────────────────────────────────────────────

pub const DEFAULT_ROWS: usize = 10_000;
pub const DEFAULT_SEED: u64 = 42;

pub const FRAUD_TYPE_WEIGHTS: [(FraudType, f64); 6] = [
    (FraudType::Phishing, 0.15),
    (FraudType::UpiFraud, 0.30),
    (FraudType::CreditCardFraud, 0.15),
    (FraudType::FakeLoanApp, 0.10),
    (FraudType::OtpScam, 0.20),
    (FraudType::OnlineShoppingScam, 0.10),
];

/// Fraud types drawn from the large amount range.
pub const LARGE_AMOUNT_TYPES: [FraudType; 2] = [FraudType::CreditCardFraud, FraudType::FakeLoanApp];
pub const LARGE_AMOUNT_RANGE: AmountRange = AmountRange { min: 10_000.0, max: 500_000.0 };
pub const STANDARD_AMOUNT_RANGE: AmountRange = AmountRange { min: 1_000.0, max: 100_000.0 };

pub const NIGHT_PROBABILITY: f64 = 0.30;
pub const NIGHT_HOURS: [u32; 8] = [22, 23, 0, 1, 2, 3, 4, 5];

/// Fraud types whose proceeds are withdrawn quickly.
pub const FAST_WITHDRAWAL_TYPES: [FraudType; 2] = [FraudType::UpiFraud, FraudType::OtpScam];
pub const FAST_WITHDRAWAL_RANGE: MinuteRange = MinuteRange { min: 5, max: 120 };
pub const STANDARD_WITHDRAWAL_RANGE: MinuteRange = MinuteRange { min: 60, max: 1_440 };

pub const SAME_CITY_PROBABILITY: f64 = 0.70;

pub const HIGH_RISK_AMOUNT: f64 = 50_000.0;
pub const HIGH_RISK_MINUTES: u32 = 120;

pub const HOTSPOT_PROBABILITY: f64 = 0.60;
pub const HOTSPOT_CITIES: [City; 3] = [City::Delhi, City::Mumbai, City::Kolkata];

pub const DEFAULT_DATASET_PATH: &str = "cybercrime_dataset.csv";
pub const DEFAULT_CHARTS_DIR: &str = "eda_plots";
pub const FAST_WITHDRAWAL_REPORT_MINUTES: u32 = 10;
pub const TOP_WITHDRAWAL_CITIES: usize = 5;
pub const HISTOGRAM_BINS: usize = 50;

// ── Building blocks ──────────────────────────────────────────────────────────

/// Inclusive monetary range; draws are rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmountRange {
    pub min: f64,
    pub max: f64,
}

impl AmountRange {
    pub fn contains(&self, amount: f64) -> bool {
        amount >= self.min && amount <= self.max
    }
}

/// Inclusive range of whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinuteRange {
    pub min: u32,
    pub max: u32,
}

impl MinuteRange {
    pub fn contains(&self, minutes: u32) -> bool {
        (self.min..=self.max).contains(&minutes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FraudTypeWeight {
    pub fraud_type: FraudType,
    pub weight: f64,
}

/// Thresholds defining a high-risk case. Both comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HighRiskRule {
    pub amount_above: f64,
    pub minutes_below: u32,
}

impl HighRiskRule {
    pub fn is_high_risk(&self, amount: f64, minutes_to_withdrawal: u32) -> bool {
        amount > self.amount_above && minutes_to_withdrawal < self.minutes_below
    }
}

impl Default for HighRiskRule {
    fn default() -> Self {
        Self {
            amount_above: HIGH_RISK_AMOUNT,
            minutes_below: HIGH_RISK_MINUTES,
        }
    }
}

// ── Generator ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub rows: usize,
    pub seed: u64,
    /// Inclusive start of the complaint window.
    pub start: NaiveDateTime,
    /// Exclusive end of the complaint window.
    pub end: NaiveDateTime,
    pub fraud_type_weights: Vec<FraudTypeWeight>,
    pub large_amount_types: Vec<FraudType>,
    pub large_amount: AmountRange,
    pub standard_amount: AmountRange,
    pub night_probability: f64,
    pub night_hours: Vec<u32>,
    pub fast_withdrawal_types: Vec<FraudType>,
    pub fast_withdrawal: MinuteRange,
    pub standard_withdrawal: MinuteRange,
    pub same_city_probability: f64,
    pub high_risk: HighRiskRule,
    pub hotspot_probability: f64,
    pub hotspot_cities: Vec<City>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            seed: DEFAULT_SEED,
            start: midnight(2023, 1, 1),
            end: midnight(2024, 12, 31),
            fraud_type_weights: FRAUD_TYPE_WEIGHTS
                .iter()
                .map(|&(fraud_type, weight)| FraudTypeWeight { fraud_type, weight })
                .collect(),
            large_amount_types: LARGE_AMOUNT_TYPES.to_vec(),
            large_amount: LARGE_AMOUNT_RANGE,
            standard_amount: STANDARD_AMOUNT_RANGE,
            night_probability: NIGHT_PROBABILITY,
            night_hours: NIGHT_HOURS.to_vec(),
            fast_withdrawal_types: FAST_WITHDRAWAL_TYPES.to_vec(),
            fast_withdrawal: FAST_WITHDRAWAL_RANGE,
            standard_withdrawal: STANDARD_WITHDRAWAL_RANGE,
            same_city_probability: SAME_CITY_PROBABILITY,
            high_risk: HighRiskRule::default(),
            hotspot_probability: HOTSPOT_PROBABILITY,
            hotspot_cities: HOTSPOT_CITIES.to_vec(),
        }
    }
}

impl GeneratorConfig {
    /// Load overrides from a JSON file. Missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> DatasetResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| DatasetError::io(path, e))?;
        let config: Self = serde_json::from_str(&content).map_err(|source| {
            DatasetError::ConfigParse {
                path: path.to_path_buf(),
                source,
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that would produce degenerate output.
    /// Called before any draw is made.
    pub fn validate(&self) -> DatasetResult<()> {
        if self.rows == 0 {
            return Err(DatasetError::InvalidRowCount(self.rows));
        }
        if self.end <= self.start {
            return Err(DatasetError::InvertedDateRange {
                start: self.start.to_string(),
                end: self.end.to_string(),
            });
        }

        if self.fraud_type_weights.is_empty() {
            return invalid("fraud_type_weights is empty");
        }
        if self
            .fraud_type_weights
            .iter()
            .any(|w| !w.weight.is_finite() || w.weight < 0.0)
        {
            return invalid("fraud type weights must be finite and non-negative");
        }
        if self.fraud_type_weights.iter().map(|w| w.weight).sum::<f64>() <= 0.0 {
            return invalid("fraud type weights sum to zero");
        }

        for (name, p) in [
            ("night_probability", self.night_probability),
            ("same_city_probability", self.same_city_probability),
            ("hotspot_probability", self.hotspot_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return invalid(&format!("{name} must be within [0, 1], got {p}"));
            }
        }

        for (name, range) in [
            ("large_amount", self.large_amount),
            ("standard_amount", self.standard_amount),
        ] {
            if !range.min.is_finite() || !range.max.is_finite() || range.min > range.max {
                return invalid(&format!("{name} range is inverted or not finite"));
            }
        }
        for (name, range) in [
            ("fast_withdrawal", self.fast_withdrawal),
            ("standard_withdrawal", self.standard_withdrawal),
        ] {
            if range.min > range.max {
                return invalid(&format!("{name} range is inverted"));
            }
        }

        if self.night_hours.is_empty() || self.night_hours.iter().any(|h| *h > 23) {
            return invalid("night_hours must be non-empty hours in 0..=23");
        }
        if self.hotspot_cities.is_empty() {
            return invalid("hotspot_cities is empty");
        }
        Ok(())
    }

    pub fn window_seconds(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }

    pub fn is_large_amount(&self, fraud_type: FraudType) -> bool {
        self.large_amount_types.contains(&fraud_type)
    }

    pub fn is_fast_withdrawal(&self, fraud_type: FraudType) -> bool {
        self.fast_withdrawal_types.contains(&fraud_type)
    }
}

fn invalid(msg: &str) -> DatasetResult<()> {
    Err(DatasetError::InvalidConfig(msg.to_string()))
}

fn midnight(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

// ── Analyzer ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub input: PathBuf,
    pub charts_dir: PathBuf,
    /// Withdrawals strictly below this many minutes count as extremely fast.
    pub fast_withdrawal_minutes: u32,
    pub top_cities: usize,
    pub histogram_bins: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_DATASET_PATH),
            charts_dir: PathBuf::from(DEFAULT_CHARTS_DIR),
            fast_withdrawal_minutes: FAST_WITHDRAWAL_REPORT_MINUTES,
            top_cities: TOP_WITHDRAWAL_CITIES,
            histogram_bins: HISTOGRAM_BINS,
        }
    }
}
