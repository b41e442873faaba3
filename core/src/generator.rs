//! Complaint generator.
//!
//! PER-RECORD ORDER (fixed, never reordered):
//!   1. Sequential id
//!   2. Timestamp, uniform over the window
//!   3. Fraud type, weighted draw
//!   4. Amount, range chosen by fraud type
//!   5. Victim city, uniform
//!   6. Night-time shift of the timestamp hour
//!   7. Time to withdrawal, range chosen by fraud type
//!   8. Withdrawal city, usually the victim city
//!   9. High-risk label from amount and time
//!  10. Hotspot override of the withdrawal city, high-risk cases only
//!
//! The label in step 9 depends only on amount and time. Step 10 runs after it
//! and only for labelled cases; keep that order or the joint city
//! distribution changes.

use crate::{
    config::GeneratorConfig,
    error::DatasetResult,
    record::{round_amount, ComplaintRecord},
    rng::{RngBank, RuleRng, RuleSlot},
    types::{complaint_id, City, FraudType},
};
use chrono::{Duration, NaiveDateTime, Timelike};

pub struct ComplaintGenerator {
    config: GeneratorConfig,
    fraud_types: Vec<FraudType>,
    fraud_weights: Vec<f64>,
    next_index: u64,
    timestamp_rng: RuleRng,
    fraud_type_rng: RuleRng,
    amount_rng: RuleRng,
    victim_city_rng: RuleRng,
    night_rng: RuleRng,
    withdrawal_rng: RuleRng,
    withdrawal_city_rng: RuleRng,
    hotspot_rng: RuleRng,
}

impl ComplaintGenerator {
    /// Validates the configuration before any stream is created.
    pub fn new(config: GeneratorConfig) -> DatasetResult<Self> {
        config.validate()?;
        let bank = RngBank::new(config.seed);
        let (fraud_types, fraud_weights): (Vec<FraudType>, Vec<f64>) = config
            .fraud_type_weights
            .iter()
            .map(|w| (w.fraud_type, w.weight))
            .unzip();
        Ok(Self {
            fraud_types,
            fraud_weights,
            next_index: 1,
            timestamp_rng: bank.for_rule(RuleSlot::Timestamp),
            fraud_type_rng: bank.for_rule(RuleSlot::FraudType),
            amount_rng: bank.for_rule(RuleSlot::Amount),
            victim_city_rng: bank.for_rule(RuleSlot::VictimCity),
            night_rng: bank.for_rule(RuleSlot::NightShift),
            withdrawal_rng: bank.for_rule(RuleSlot::Withdrawal),
            withdrawal_city_rng: bank.for_rule(RuleSlot::WithdrawalCity),
            hotspot_rng: bank.for_rule(RuleSlot::Hotspot),
            config,
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the full table of `config.rows` records.
    pub fn generate(mut self) -> Vec<ComplaintRecord> {
        let rows = self.config.rows;
        log::info!("Generating {rows} complaint records (seed {})", self.config.seed);
        let mut records = Vec::with_capacity(rows);
        for _ in 0..rows {
            records.push(self.next_record());
            if records.len() % 5_000 == 0 {
                log::debug!("generated {} / {rows}", records.len());
            }
        }
        let high_risk = records.iter().filter(|r| r.is_high_risk).count();
        log::info!("Generated {} records, {high_risk} high-risk", records.len());
        records
    }

    /// Produce the next record in sequence.
    pub fn next_record(&mut self) -> ComplaintRecord {
        let complaint_id = complaint_id(self.next_index);
        self.next_index += 1;

        let drawn_time = self.draw_timestamp();
        let fraud_type = self.draw_fraud_type();
        let fraud_amount = self.draw_amount(fraud_type);
        let victim_city = *self.victim_city_rng.pick(&City::ALL);
        let complaint_time = self.apply_night_shift(drawn_time);
        let time_to_withdrawal = self.draw_withdrawal_minutes(fraud_type);
        let mut withdrawal_city = self.draw_withdrawal_city(victim_city);

        let is_high_risk = self
            .config
            .high_risk
            .is_high_risk(fraud_amount, time_to_withdrawal);

        if is_high_risk && self.hotspot_rng.chance(self.config.hotspot_probability) {
            withdrawal_city = *self.hotspot_rng.pick(&self.config.hotspot_cities);
        }

        ComplaintRecord {
            complaint_id,
            complaint_time,
            fraud_type,
            fraud_amount,
            victim_city,
            time_to_withdrawal,
            withdrawal_city,
            is_high_risk,
        }
    }

    fn draw_timestamp(&mut self) -> NaiveDateTime {
        let window = self.config.window_seconds() as u64;
        let offset = self.timestamp_rng.next_u64_below(window) as i64;
        self.config.start + Duration::seconds(offset)
    }

    fn draw_fraud_type(&mut self) -> FraudType {
        let idx = self.fraud_type_rng.weighted_index(&self.fraud_weights);
        self.fraud_types[idx]
    }

    fn draw_amount(&mut self, fraud_type: FraudType) -> f64 {
        let range = if self.config.is_large_amount(fraud_type) {
            self.config.large_amount
        } else {
            self.config.standard_amount
        };
        round_amount(self.amount_rng.uniform(range.min, range.max))
    }

    /// With fixed probability move the hour into the night window and
    /// re-draw the minute. Date and seconds are kept. A shifted time that
    /// would leave `[start, end)` is discarded and the drawn time stands.
    fn apply_night_shift(&mut self, time: NaiveDateTime) -> NaiveDateTime {
        if !self.night_rng.chance(self.config.night_probability) {
            return time;
        }
        let hour = *self.night_rng.pick(&self.config.night_hours);
        let minute = self.night_rng.range_inclusive(0, 59);
        time.with_hour(hour)
            .and_then(|t| t.with_minute(minute))
            .filter(|t| (self.config.start..self.config.end).contains(t))
            .unwrap_or(time)
    }

    fn draw_withdrawal_minutes(&mut self, fraud_type: FraudType) -> u32 {
        let range = if self.config.is_fast_withdrawal(fraud_type) {
            self.config.fast_withdrawal
        } else {
            self.config.standard_withdrawal
        };
        self.withdrawal_rng.range_inclusive(range.min, range.max)
    }

    fn draw_withdrawal_city(&mut self, victim_city: City) -> City {
        if self.withdrawal_city_rng.chance(self.config.same_city_probability) {
            victim_city
        } else {
            *self.withdrawal_city_rng.pick(&City::ALL)
        }
    }
}

/// Validate `config` and generate every record.
pub fn generate_dataset(config: GeneratorConfig) -> DatasetResult<Vec<ComplaintRecord>> {
    Ok(ComplaintGenerator::new(config)?.generate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DatasetError;

    fn small(rows: usize, seed: u64) -> GeneratorConfig {
        GeneratorConfig { rows, seed, ..Default::default() }
    }

    #[test]
    fn invalid_config_fails_before_generation() {
        let err = ComplaintGenerator::new(small(0, 1)).err().unwrap();
        assert!(matches!(err, DatasetError::InvalidRowCount(0)));
    }

    #[test]
    fn ids_start_at_base_plus_one() {
        let mut gen = ComplaintGenerator::new(small(3, 1)).unwrap();
        assert_eq!(gen.next_record().complaint_id, "CMP_100001");
        assert_eq!(gen.next_record().complaint_id, "CMP_100002");
    }

    #[test]
    fn timestamps_fall_inside_window() {
        let config = small(2_000, 5);
        let (start, end) = (config.start, config.end);
        for r in generate_dataset(config).unwrap() {
            assert!(r.complaint_time >= start && r.complaint_time < end, "{:?}", r.complaint_time);
        }
    }

    #[test]
    fn night_shift_stays_inside_unaligned_window() {
        let base = GeneratorConfig::default();
        let start = base.start + Duration::hours(12);
        let config = GeneratorConfig {
            start,
            end: start + Duration::days(1),
            night_probability: 1.0,
            ..small(2_000, 5)
        };
        let (start, end) = (config.start, config.end);
        let records = generate_dataset(config).unwrap();
        for r in &records {
            assert!(r.complaint_time >= start && r.complaint_time < end, "{:?}", r.complaint_time);
        }
        // 22:00 and 23:00 on the first day are still reachable.
        assert!(records.iter().any(|r| r.hour() >= 22));
    }

    #[test]
    fn night_probability_one_forces_night_hours() {
        let config = GeneratorConfig {
            night_probability: 1.0,
            ..small(500, 9)
        };
        let hours = config.night_hours.clone();
        for r in generate_dataset(config).unwrap() {
            assert!(hours.contains(&r.hour()), "hour {}", r.hour());
        }
    }

    #[test]
    fn hotspot_probability_one_routes_every_high_risk_case() {
        let config = GeneratorConfig {
            hotspot_probability: 1.0,
            ..small(3_000, 11)
        };
        let hotspots = config.hotspot_cities.clone();
        let records = generate_dataset(config).unwrap();
        assert!(records.iter().any(|r| r.is_high_risk));
        for r in records.iter().filter(|r| r.is_high_risk) {
            assert!(hotspots.contains(&r.withdrawal_city));
        }
    }

    #[test]
    fn same_city_probability_one_without_hotspots() {
        let config = GeneratorConfig {
            same_city_probability: 1.0,
            hotspot_probability: 0.0,
            ..small(1_000, 13)
        };
        for r in generate_dataset(config).unwrap() {
            assert_eq!(r.victim_city, r.withdrawal_city);
        }
    }

    #[test]
    fn zero_weight_type_never_drawn() {
        let mut config = small(2_000, 17);
        for w in config.fraud_type_weights.iter_mut() {
            if w.fraud_type == FraudType::Phishing {
                w.weight = 0.0;
            }
        }
        let records = generate_dataset(config).unwrap();
        assert!(records.iter().all(|r| r.fraud_type != FraudType::Phishing));
    }
}
