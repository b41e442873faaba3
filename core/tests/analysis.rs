//! Analyzer tests against a five-row table with hand-computed answers.

use cybercrime_core::{
    analysis::{CityCount, DatasetAnalysis},
    charts,
    config::AnalysisConfig,
    dataset,
    error::DatasetError,
    pipeline,
    report,
    types::{City, FraudType},
};
use std::path::PathBuf;

const FIXTURE: &str = "\
complaint_id,complaint_time,fraud_type,fraud_amount,victim_city,time_to_withdrawal,withdrawal_city,is_high_risk
CMP_100001,2023-01-05 23:15:00,UPI Fraud,60000,Delhi,30,Mumbai,1
CMP_100002,2023-02-10 02:40:00,OTP Scam,80000,Pune,8,Delhi,1
CMP_100003,2023-03-15 14:00:00,Phishing,20000,Chennai,600,Chennai,0
CMP_100004,2023-04-20 23:50:00,Credit Card Fraud,100000,Delhi,100,Delhi,1
CMP_100005,2023-05-25 09:30:00,Fake Loan App,40000,Mumbai,1000,Mumbai,0
";

fn write_fixture(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("fixture.csv");
    std::fs::write(&path, FIXTURE).unwrap();
    path
}

fn analyze_fixture() -> DatasetAnalysis {
    let dir = tempfile::tempdir().unwrap();
    let loaded = dataset::read_csv(write_fixture(&dir)).unwrap();
    assert_eq!(loaded.records.len(), 5);
    assert_eq!(loaded.total_nulls(), 0);
    DatasetAnalysis::compute(&loaded.records, &AnalysisConfig::default())
}

#[test]
fn high_risk_percentage_matches_hand_count() {
    let a = analyze_fixture();
    // Rows 1, 2 and 4 are high-risk.
    assert_eq!(a.high_risk_pct, 60.0);
    assert_eq!(a.risk_distribution.high_risk, 3);
    assert_eq!(a.risk_distribution.low_risk, 2);
}

#[test]
fn top_withdrawal_cities_for_high_risk() {
    let a = analyze_fixture();
    assert_eq!(
        a.top_high_risk_cities,
        vec![
            CityCount { city: City::Delhi, count: 2 },
            CityCount { city: City::Mumbai, count: 1 },
        ]
    );
}

#[test]
fn amount_time_correlation_matches_hand_computation() {
    let a = analyze_fixture();
    // cov = −39 840 000, Σdx² = 4e9, Σdy² = 766 835.2
    let expected = -39_840_000.0 / (4.0e9f64 * 766_835.2).sqrt();
    let r = a.amount_time_correlation.unwrap();
    assert!((r - expected).abs() < 1e-12, "r = {r}");
    assert!((r + 0.719_346_796_789_497_9).abs() < 1e-12);
}

#[test]
fn descriptive_statistics() {
    let a = analyze_fixture();
    let amount = a.amount_summary.unwrap();
    assert_eq!(amount.count, 5);
    assert_eq!(amount.mean, 60_000.0);
    assert!((amount.std - 31_622.776_601_683_792).abs() < 1e-6);
    assert_eq!(amount.q25, 40_000.0);
    assert_eq!(amount.median, 60_000.0);
    assert_eq!(amount.q75, 80_000.0);

    let minutes = a.withdrawal_summary.unwrap();
    assert_eq!(minutes.min, 8.0);
    assert_eq!(minutes.max, 1_000.0);
    assert_eq!(minutes.median, 100.0);
}

#[test]
fn breakdowns_by_type_city_and_hour() {
    let a = analyze_fixture();
    assert_eq!(a.fast_withdrawals, 1);
    assert_eq!(a.hourly_high_risk[23], 2);
    assert_eq!(a.hourly_high_risk[2], 1);
    assert_eq!(a.hourly_high_risk.iter().sum::<usize>(), 3);

    assert_eq!(a.city_crosstab.get(City::Delhi, City::Mumbai), 1);
    assert_eq!(a.city_crosstab.get(City::Pune, City::Delhi), 1);
    assert_eq!(a.city_crosstab.same_city(), 3);
    assert_eq!(a.same_city_pct, 60.0);

    assert_eq!(a.fraud_type_counts.len(), 5);
    assert!(a.fraud_type_counts.iter().all(|c| c.count == 1));

    let loan = a
        .mean_amount_by_type
        .iter()
        .find(|m| m.fraud_type == FraudType::FakeLoanApp)
        .unwrap();
    assert_eq!(loan.mean_amount, 40_000.0);
    assert_eq!(a.withdrawal_by_type.len(), 5);
}

#[test]
fn findings_report_mentions_every_metric() {
    let text = report::findings(&analyze_fixture());
    assert!(text.contains("Percentage of High-Risk Cases: 60.00%"));
    assert!(text.contains("Number of cases with < 10 min withdrawal: 1"));
    assert!(text.contains("Correlation between Amount and Time to Withdrawal: -0.7193"));
    assert!(text.contains("Delhi"));
}

#[test]
fn full_run_renders_every_chart() {
    let dir = tempfile::tempdir().unwrap();
    let config = AnalysisConfig {
        input: write_fixture(&dir),
        charts_dir: dir.path().join("plots"),
        ..Default::default()
    };
    let run = pipeline::run_analysis(&config).unwrap();
    assert_eq!(run.charts.len(), 7);
    for name in [
        charts::DIST_FRAUD_AMOUNT,
        charts::DIST_TIME_WITHDRAWAL,
        charts::FREQ_FRAUD_TYPE,
        charts::HEATMAP_CITIES,
        charts::AVG_AMOUNT_BY_TYPE,
        charts::TIME_WITHDRAWAL_BY_TYPE,
        charts::HOURLY_HIGH_RISK,
    ] {
        let path = config.charts_dir.join(name);
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"), "{} is not an SVG", path.display());
    }
}

#[test]
fn missing_input_is_fatal_and_names_path() {
    let dir = tempfile::tempdir().unwrap();
    let config = AnalysisConfig {
        input: dir.path().join("nope.csv"),
        charts_dir: dir.path().join("plots"),
        ..Default::default()
    };
    let err = pipeline::run_analysis(&config).err().unwrap();
    assert!(matches!(err, DatasetError::Io { .. }));
    assert!(err.to_string().contains("nope.csv"), "{err}");
    assert!(!config.charts_dir.exists());
}

#[test]
fn header_only_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.csv");
    std::fs::write(&path, FIXTURE.lines().next().unwrap()).unwrap();
    let config = AnalysisConfig {
        input: path,
        charts_dir: dir.path().join("plots"),
        ..Default::default()
    };
    assert!(matches!(
        pipeline::run_analysis(&config),
        Err(DatasetError::EmptyDataset(_))
    ));
}
