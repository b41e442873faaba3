//! Exploratory analysis over a loaded complaint table.
//!
//! Computes, in one pass over the records plus a few sorts:
//!   1. Descriptive statistics for amount and time-to-withdrawal
//!   2. Frequency per fraud type
//!   3. Victim × withdrawal city contingency table
//!   4. Mean amount and withdrawal-time distribution per fraud type
//!   5. Hourly histogram of high-risk cases
//!   6. Pattern findings: high-risk share, top withdrawal cities for
//!      high-risk cases, extremely fast withdrawals, amount/time correlation

use crate::{
    config::AnalysisConfig,
    record::ComplaintRecord,
    stats::{self, Summary},
    types::{City, FraudType},
};
use serde::Serialize;

// ── Public types ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    pub fraud_type: FraudType,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CityCount {
    pub city: City,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TypeMean {
    pub fraud_type: FraudType,
    pub count: usize,
    pub mean_amount: f64,
}

/// Box-plot shape of time-to-withdrawal for one fraud type. Whiskers reach
/// the furthest observation within 1.5 × IQR of the box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeDistribution {
    pub fraud_type: FraudType,
    pub summary: Summary,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: usize,
}

/// Rows are victim cities, columns withdrawal cities, both in `City::ALL` order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityCrosstab {
    pub counts: Vec<Vec<usize>>,
}

impl CityCrosstab {
    pub fn get(&self, victim: City, withdrawal: City) -> usize {
        self.counts[victim.index()][withdrawal.index()]
    }

    pub fn max(&self) -> usize {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Sum of the diagonal: complaints cashed out in the victim's own city.
    pub fn same_city(&self) -> usize {
        (0..self.counts.len()).map(|i| self.counts[i][i]).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiskDistribution {
    pub high_risk: usize,
    pub low_risk: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetAnalysis {
    pub rows: usize,
    pub risk_distribution: RiskDistribution,
    pub amount_summary: Option<Summary>,
    pub withdrawal_summary: Option<Summary>,
    /// Most frequent first.
    pub fraud_type_counts: Vec<TypeCount>,
    pub city_crosstab: CityCrosstab,
    pub mean_amount_by_type: Vec<TypeMean>,
    pub withdrawal_by_type: Vec<TypeDistribution>,
    pub hourly_high_risk: [usize; 24],
    pub high_risk_pct: f64,
    pub top_high_risk_cities: Vec<CityCount>,
    pub fast_withdrawal_minutes: u32,
    pub fast_withdrawals: usize,
    pub amount_time_correlation: Option<f64>,
    pub same_city_pct: f64,
}

// ── Computation ──────────────────────────────────────────────────────────────

impl DatasetAnalysis {
    pub fn compute(records: &[ComplaintRecord], config: &AnalysisConfig) -> Self {
        let rows = records.len();
        let amounts: Vec<f64> = records.iter().map(|r| r.fraud_amount).collect();
        let minutes: Vec<f64> = records.iter().map(|r| f64::from(r.time_to_withdrawal)).collect();

        let mut type_counts = [0usize; FraudType::ALL.len()];
        let mut type_amount_sums = [0.0f64; FraudType::ALL.len()];
        let mut type_minutes: Vec<Vec<f64>> = vec![Vec::new(); FraudType::ALL.len()];
        let mut crosstab = vec![vec![0usize; City::ALL.len()]; City::ALL.len()];
        let mut hourly_high_risk = [0usize; 24];
        let mut high_risk_cities = [0usize; City::ALL.len()];
        let mut high_risk = 0;
        let mut fast_withdrawals = 0;

        for r in records {
            let t = r.fraud_type.index();
            type_counts[t] += 1;
            type_amount_sums[t] += r.fraud_amount;
            type_minutes[t].push(f64::from(r.time_to_withdrawal));
            crosstab[r.victim_city.index()][r.withdrawal_city.index()] += 1;

            if r.is_high_risk {
                high_risk += 1;
                hourly_high_risk[r.hour() as usize] += 1;
                high_risk_cities[r.withdrawal_city.index()] += 1;
            }
            if r.time_to_withdrawal < config.fast_withdrawal_minutes {
                fast_withdrawals += 1;
            }
        }

        let mut fraud_type_counts: Vec<TypeCount> = FraudType::ALL
            .iter()
            .map(|&fraud_type| TypeCount {
                fraud_type,
                count: type_counts[fraud_type.index()],
            })
            .filter(|c| c.count > 0)
            .collect();
        fraud_type_counts.sort_by(|a, b| b.count.cmp(&a.count).then(a.fraud_type.cmp(&b.fraud_type)));

        let mean_amount_by_type = FraudType::ALL
            .iter()
            .filter(|t| type_counts[t.index()] > 0)
            .map(|&fraud_type| {
                let count = type_counts[fraud_type.index()];
                TypeMean {
                    fraud_type,
                    count,
                    mean_amount: type_amount_sums[fraud_type.index()] / count as f64,
                }
            })
            .collect();

        let withdrawal_by_type = FraudType::ALL
            .iter()
            .filter_map(|&fraud_type| distribution(fraud_type, &type_minutes[fraud_type.index()]))
            .collect();

        let mut top_high_risk_cities: Vec<CityCount> = City::ALL
            .iter()
            .map(|&city| CityCount {
                city,
                count: high_risk_cities[city.index()],
            })
            .filter(|c| c.count > 0)
            .collect();
        top_high_risk_cities.sort_by(|a, b| b.count.cmp(&a.count).then(a.city.cmp(&b.city)));
        top_high_risk_cities.truncate(config.top_cities);

        let city_crosstab = CityCrosstab { counts: crosstab };
        let same_city_pct = percent(city_crosstab.same_city(), rows);

        Self {
            rows,
            risk_distribution: RiskDistribution {
                high_risk,
                low_risk: rows - high_risk,
            },
            amount_summary: Summary::of(&amounts),
            withdrawal_summary: Summary::of(&minutes),
            fraud_type_counts,
            city_crosstab,
            mean_amount_by_type,
            withdrawal_by_type,
            hourly_high_risk,
            high_risk_pct: percent(high_risk, rows),
            top_high_risk_cities,
            fast_withdrawal_minutes: config.fast_withdrawal_minutes,
            fast_withdrawals,
            amount_time_correlation: stats::pearson(&amounts, &minutes),
            same_city_pct,
        }
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

fn distribution(fraud_type: FraudType, values: &[f64]) -> Option<TypeDistribution> {
    let summary = Summary::of(values)?;
    let fence_low = summary.q25 - 1.5 * summary.iqr();
    let fence_high = summary.q75 + 1.5 * summary.iqr();

    let inside = || values.iter().copied().filter(move |v| *v >= fence_low && *v <= fence_high);
    let whisker_low = inside().fold(f64::INFINITY, f64::min);
    let whisker_high = inside().fold(f64::NEG_INFINITY, f64::max);
    let outliers = values.len() - inside().count();

    Some(TypeDistribution {
        fraud_type,
        summary,
        whisker_low,
        whisker_high,
        outliers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(
        fraud_type: FraudType,
        amount: f64,
        minutes: u32,
        victim: City,
        withdrawal: City,
        high_risk: bool,
    ) -> ComplaintRecord {
        ComplaintRecord {
            complaint_id: "CMP_100001".into(),
            complaint_time: NaiveDate::from_ymd_opt(2023, 1, 1)
                .unwrap()
                .and_hms_opt(2, 0, 0)
                .unwrap(),
            fraud_type,
            fraud_amount: amount,
            victim_city: victim,
            time_to_withdrawal: minutes,
            withdrawal_city: withdrawal,
            is_high_risk: high_risk,
        }
    }

    #[test]
    fn type_counts_sorted_by_frequency() {
        let records = vec![
            record(FraudType::Phishing, 1_000.0, 200, City::Pune, City::Pune, false),
            record(FraudType::OtpScam, 1_000.0, 20, City::Pune, City::Pune, false),
            record(FraudType::OtpScam, 1_000.0, 30, City::Pune, City::Delhi, false),
        ];
        let a = DatasetAnalysis::compute(&records, &AnalysisConfig::default());
        assert_eq!(a.fraud_type_counts[0], TypeCount { fraud_type: FraudType::OtpScam, count: 2 });
        assert_eq!(a.fraud_type_counts.len(), 2);
        assert_eq!(a.city_crosstab.get(City::Pune, City::Delhi), 1);
        assert_eq!(a.city_crosstab.same_city(), 2);
    }

    #[test]
    fn whiskers_exclude_outliers() {
        let d = distribution(FraudType::Phishing, &[10.0, 11.0, 12.0, 13.0, 500.0]).unwrap();
        assert_eq!(d.whisker_low, 10.0);
        assert_eq!(d.whisker_high, 13.0);
        assert_eq!(d.outliers, 1);
    }

    #[test]
    fn empty_table_yields_empty_analysis() {
        let a = DatasetAnalysis::compute(&[], &AnalysisConfig::default());
        assert_eq!(a.rows, 0);
        assert_eq!(a.high_risk_pct, 0.0);
        assert!(a.amount_summary.is_none());
        assert!(a.amount_time_correlation.is_none());
    }
}
