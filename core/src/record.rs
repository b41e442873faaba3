//! The Complaint Record: one row of the synthetic dataset.

use crate::{
    config::HighRiskRule,
    types::{City, ComplaintId, FraudType},
};
use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Column order of the delimited file. NEVER reorder.
pub const COLUMNS: [&str; 8] = [
    "complaint_id",
    "complaint_time",
    "fraud_type",
    "fraud_amount",
    "victim_city",
    "time_to_withdrawal",
    "withdrawal_city",
    "is_high_risk",
];

pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplaintRecord {
    pub complaint_id: ComplaintId,
    #[serde(with = "complaint_time")]
    pub complaint_time: NaiveDateTime,
    pub fraud_type: FraudType,
    pub fraud_amount: f64,
    pub victim_city: City,
    /// Minutes between the fraud and the cash-out.
    pub time_to_withdrawal: u32,
    pub withdrawal_city: City,
    #[serde(with = "flag")]
    pub is_high_risk: bool,
}

impl ComplaintRecord {
    pub fn hour(&self) -> u32 {
        self.complaint_time.hour()
    }

    /// True if the stored label agrees with `rule` applied to amount and time.
    pub fn risk_label_consistent(&self, rule: &HighRiskRule) -> bool {
        self.is_high_risk == rule.is_high_risk(self.fraud_amount, self.time_to_withdrawal)
    }
}

/// Round to whole paise.
pub fn round_amount(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// `YYYY-MM-DD HH:MM:SS`; ISO `T`-separated input is accepted on read.
mod complaint_time {
    use super::TIME_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&t.format(TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        let raw = raw.trim();
        NaiveDateTime::parse_from_str(raw, TIME_FORMAT)
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
            .map_err(|e| D::Error::custom(format!("bad complaint_time '{raw}': {e}")))
    }
}

/// Written as `1`/`0`; `true`/`false` accepted on read.
mod flag {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &bool, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u8(u8::from(*v))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(d)?;
        match raw.trim() {
            "1" | "true" | "True" => Ok(true),
            "0" | "false" | "False" => Ok(false),
            other => Err(D::Error::custom(format!("bad is_high_risk '{other}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> ComplaintRecord {
        ComplaintRecord {
            complaint_id: "CMP_100001".into(),
            complaint_time: NaiveDate::from_ymd_opt(2023, 5, 14)
                .unwrap()
                .and_hms_opt(23, 7, 45)
                .unwrap(),
            fraud_type: FraudType::UpiFraud,
            fraud_amount: 72_500.5,
            victim_city: City::Pune,
            time_to_withdrawal: 45,
            withdrawal_city: City::Mumbai,
            is_high_risk: true,
        }
    }

    #[test]
    fn hour_reads_complaint_time() {
        assert_eq!(sample().hour(), 23);
    }

    #[test]
    fn risk_label_consistency() {
        let rule = HighRiskRule::default();
        let mut r = sample();
        assert!(r.risk_label_consistent(&rule));
        r.time_to_withdrawal = 500;
        assert!(!r.risk_label_consistent(&rule));
    }

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round_amount(1234.5678), 1234.57);
        assert_eq!(round_amount(10_000.0), 10_000.0);
    }

    #[test]
    fn csv_row_uses_display_names_and_flag() {
        let mut w = csv::Writer::from_writer(Vec::new());
        w.serialize(sample()).unwrap();
        let text = String::from_utf8(w.into_inner().unwrap()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next().unwrap(), COLUMNS.join(","));
        assert_eq!(
            lines.next().unwrap(),
            "CMP_100001,2023-05-14 23:07:45,UPI Fraud,72500.5,Pune,45,Mumbai,1"
        );
    }

    #[test]
    fn reads_iso_time_and_bool_words() {
        let data = format!(
            "{}\nCMP_100009,2024-02-01T04:30:00,OTP Scam,999.99,Delhi,12,Delhi,false\n",
            COLUMNS.join(",")
        );
        let mut rdr = csv::Reader::from_reader(data.as_bytes());
        let rec: ComplaintRecord = rdr.deserialize().next().unwrap().unwrap();
        assert_eq!(rec.hour(), 4);
        assert!(!rec.is_high_risk);
        assert_eq!(rec.fraud_type, FraudType::OtpScam);
    }
}
