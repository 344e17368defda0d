//! Core data types for loaded dashboard data
//!
//! This module defines the envelope produced by the external data pipeline
//! and the row shapes the charts read from:
//! - `DataFile`: metadata + rows
//! - `DataMetadata`: provenance of a data set
//! - `FieldValue`: one cell (string, number, boolean or null)
//! - `Row`: anything charts can read fields from
//! - `Record`, `MonthlyDataRow`, `BudgetDataRow`: concrete row types

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Provenance of a loaded data set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataMetadata {
    /// Where the data came from (sheet id, csv path, ...)
    pub source: String,
    /// Optional worksheet name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet: Option<String>,
    /// When the pipeline fetched the data, as written by the producer
    pub fetched_at: String,
    /// Row count claimed by the producer
    pub row_count: u64,
}

impl DataMetadata {
    /// Parse `fetched_at` as a UTC timestamp.
    ///
    /// Accepts RFC 3339 (`2024-01-15T10:30:00Z`) and naive ISO-8601 without
    /// an offset, which is read as UTC.
    pub fn fetched_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.fetched_at)
    }
}

/// Parse a producer timestamp string
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Top-level envelope returned by the data loader
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataFile<R> {
    pub metadata: DataMetadata,
    pub data: Vec<R>,
}

impl<R> DataFile<R> {
    /// Number of rows actually present
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// `(claimed, actual)` when the metadata row count disagrees with the rows
    pub fn row_count_mismatch(&self) -> Option<(u64, usize)> {
        if self.metadata.row_count as usize != self.data.len() {
            Some((self.metadata.row_count, self.data.len()))
        } else {
            None
        }
    }
}

/// A single cell value. Decoding never fails: nested arrays and objects
/// become `Null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged, from = "serde_json::Value")]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Numeric value, if this cell is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    /// Value to plot: a number, or text that parses as one
    pub fn as_plot_value(&self) -> Option<f64> {
        match self {
            FieldValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            other => other.as_f64(),
        }
    }

    pub fn is_number(&self) -> bool {
        self.as_f64().is_some()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        FieldValue::from(&value)
    }
}

impl From<&serde_json::Value> for FieldValue {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Bool(b) => FieldValue::Bool(*b),
            serde_json::Value::Number(n) => n.as_f64().map(FieldValue::Number).unwrap_or_default(),
            serde_json::Value::String(s) => FieldValue::Text(s.clone()),
            // Nested structures are not chartable
            _ => FieldValue::Null,
        }
    }
}

/// A data record charts can read named fields from
pub trait Row {
    /// Value of a field, `None` when the row has no such field
    fn value(&self, key: &str) -> Option<FieldValue>;

    /// Field names present on this row, in a stable order
    fn field_names(&self) -> Vec<String>;
}

/// Open, ordered mapping from field name to value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub BTreeMap<String, FieldValue>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set a field
    pub fn field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(key.into(), value.into());
    }
}

impl Row for Record {
    fn value(&self, key: &str) -> Option<FieldValue> {
        self.0.get(key).cloned()
    }

    fn field_names(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }
}

/// Example monthly data row. Replace the open fields with real ones after
/// forking for a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyDataRow {
    /// e.g. "2024-01". Producers may write a number (a bare year) or leave
    /// it out, which reads as `Null`.
    #[serde(default, skip_serializing_if = "FieldValue::is_null")]
    pub period: FieldValue,
    /// Client-specific fields
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl MonthlyDataRow {
    pub fn new(period: impl Into<String>) -> Self {
        Self {
            period: FieldValue::Text(period.into()),
            fields: BTreeMap::new(),
        }
    }

    /// Period as a display label, empty when the row has none
    pub fn period_label(&self) -> String {
        self.period.to_string()
    }

    /// Builder method: set a field
    pub fn field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

impl From<MonthlyDataRow> for Record {
    fn from(row: MonthlyDataRow) -> Self {
        let mut record = Record(row.fields);
        if !row.period.is_null() {
            record.insert("period", row.period);
        }
        record
    }
}

impl Row for MonthlyDataRow {
    fn value(&self, key: &str) -> Option<FieldValue> {
        if key == "period" {
            return (!self.period.is_null()).then(|| self.period.clone());
        }
        self.fields.get(key).cloned()
    }

    fn field_names(&self) -> Vec<String> {
        let period = (!self.period.is_null()).then(|| "period".to_string());
        period.into_iter().chain(self.fields.keys().cloned()).collect()
    }
}

/// Example budget data row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetDataRow {
    pub period: String,
    pub category: String,
    pub budgeted: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<f64>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl BudgetDataRow {
    /// Actual minus budgeted, once actuals are known
    pub fn variance(&self) -> Option<f64> {
        self.actual.map(|actual| actual - self.budgeted)
    }
}

impl Row for BudgetDataRow {
    fn value(&self, key: &str) -> Option<FieldValue> {
        match key {
            "period" => Some(FieldValue::Text(self.period.clone())),
            "category" => Some(FieldValue::Text(self.category.clone())),
            "budgeted" => Some(FieldValue::Number(self.budgeted)),
            "actual" => Some(self.actual.into()),
            _ => self.fields.get(key).cloned(),
        }
    }

    fn field_names(&self) -> Vec<String> {
        ["period", "category", "budgeted", "actual"]
            .iter()
            .map(|s| s.to_string())
            .chain(self.fields.keys().cloned())
            .collect()
    }
}

impl Row for serde_json::Map<String, serde_json::Value> {
    fn value(&self, key: &str) -> Option<FieldValue> {
        self.get(key).map(FieldValue::from)
    }

    fn field_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }
}

impl Row for BTreeMap<String, FieldValue> {
    fn value(&self, key: &str) -> Option<FieldValue> {
        self.get(key).cloned()
    }

    fn field_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }
}

impl Row for HashMap<String, FieldValue> {
    fn value(&self, key: &str) -> Option<FieldValue> {
        self.get(key).cloned()
    }

    fn field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.keys().cloned().collect();
        names.sort();
        names
    }
}

impl<R: Row + ?Sized> Row for &R {
    fn value(&self, key: &str) -> Option<FieldValue> {
        (**self).value(key)
    }

    fn field_names(&self) -> Vec<String> {
        (**self).field_names()
    }
}

/// Union of field names over all rows, first-seen order
pub fn field_names<R: Row>(rows: &[R]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for row in rows {
        for name in row.field_names() {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_row_into_record() {
        let record: Record = MonthlyDataRow::new("2024-03").field("revenue", 10).into();
        assert_eq!(record.value("period"), Some(FieldValue::Text("2024-03".into())));
        assert_eq!(record.value("revenue"), Some(FieldValue::Number(10.0)));
    }

    const SAMPLE: &str = r#"{
        "metadata": {
            "source": "google_sheets",
            "sheet": "Monthly",
            "fetched_at": "2024-01-15T10:30:00.123456Z",
            "row_count": 2
        },
        "data": [
            {"period": "2024-01", "revenue": 1200.5, "region": "north", "active": true, "notes": null},
            {"period": "2024-02", "revenue": 1320, "extra_field": "anything"}
        ]
    }"#;

    #[test]
    fn test_parse_monthly_envelope() {
        let file: DataFile<MonthlyDataRow> = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(file.metadata.source, "google_sheets");
        assert_eq!(file.metadata.sheet.as_deref(), Some("Monthly"));
        assert_eq!(file.len(), 2);
        assert!(file.row_count_mismatch().is_none());

        let first = &file.data[0];
        assert_eq!(first.period_label(), "2024-01");
        assert_eq!(first.value("revenue"), Some(FieldValue::Number(1200.5)));
        assert_eq!(first.value("region"), Some(FieldValue::Text("north".into())));
        assert_eq!(first.value("active"), Some(FieldValue::Bool(true)));
        assert_eq!(first.value("notes"), Some(FieldValue::Null));
        assert_eq!(first.value("missing"), None);

        let second = &file.data[1];
        assert_eq!(second.value("extra_field").and_then(|v| v.as_str().map(String::from)), Some("anything".into()));
    }

    #[test]
    fn test_metadata_without_sheet() {
        let json = r#"{"source": "csv", "fetched_at": "2024-01-01T00:00:00Z", "row_count": 0}"#;
        let metadata: DataMetadata = serde_json::from_str(json).unwrap();
        assert!(metadata.sheet.is_none());
        assert!(metadata.fetched_at_utc().is_some());
    }

    #[test]
    fn test_row_count_mismatch() {
        let mut file: DataFile<MonthlyDataRow> = serde_json::from_str(SAMPLE).unwrap();
        file.metadata.row_count = 5;
        assert_eq!(file.row_count_mismatch(), Some((5, 2)));
    }

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2024-01-15T10:30:00Z").is_some());
        assert!(parse_timestamp("2024-01-15T10:30:00+02:00").is_some());
        assert!(parse_timestamp("2024-01-15T10:30:00.123456").is_some());
        assert!(parse_timestamp("2024-01-15 10:30:00").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_field_value_numbers() {
        assert_eq!(FieldValue::from(3).as_f64(), Some(3.0));
        assert_eq!(FieldValue::Number(f64::NAN).as_f64(), None);
        assert_eq!(FieldValue::from("3").as_f64(), None);
        assert!(FieldValue::from(None::<f64>).is_null());
    }

    #[test]
    fn test_plot_values_accept_numeric_text() {
        assert_eq!(FieldValue::from("1200").as_plot_value(), Some(1200.0));
        assert_eq!(FieldValue::from(" -3.5 ").as_plot_value(), Some(-3.5));
        assert_eq!(FieldValue::from(7).as_plot_value(), Some(7.0));
        assert_eq!(FieldValue::from("NaN").as_plot_value(), None);
        assert_eq!(FieldValue::from("Q1").as_plot_value(), None);
        assert_eq!(FieldValue::Bool(true).as_plot_value(), None);
        // still text for tooltips
        assert!(!FieldValue::from("1200").is_number());
    }

    #[test]
    fn test_monthly_row_without_period() {
        let row: MonthlyDataRow = serde_json::from_str(r#"{"Period": "2024-02", "rev": 2}"#).unwrap();
        assert!(row.period.is_null());
        assert_eq!(row.field_names(), vec!["Period", "rev"]);

        let record: Record = row.into();
        assert_eq!(record.value("period"), None);
        assert_eq!(record.value("Period"), Some(FieldValue::Text("2024-02".into())));
    }

    #[test]
    fn test_record_and_json_map_rows() {
        let record = Record::new().field("month", "Jan").field("value1", 400);
        assert_eq!(record.value("value1"), Some(FieldValue::Number(400.0)));
        assert_eq!(record.field_names(), vec!["month", "value1"]);

        let map: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(r#"{"month": "Feb", "value1": 300, "nested": {"a": 1}}"#).unwrap();
        assert_eq!(map.value("value1"), Some(FieldValue::Number(300.0)));
        assert_eq!(map.value("nested"), Some(FieldValue::Null));
    }

    #[test]
    fn test_budget_row() {
        let row: BudgetDataRow = serde_json::from_str(
            r#"{"period": "2024-03", "category": "Ops", "budgeted": 100.0, "actual": 120.0, "owner": "kim"}"#,
        )
        .unwrap();
        assert_eq!(row.variance(), Some(20.0));
        assert_eq!(row.value("owner"), Some(FieldValue::Text("kim".into())));
        assert_eq!(row.value("budgeted"), Some(FieldValue::Number(100.0)));
    }

    #[test]
    fn test_field_names_union() {
        let rows = vec![
            MonthlyDataRow::new("2024-01").field("a", 1),
            MonthlyDataRow::new("2024-02").field("b", 2),
        ];
        assert_eq!(field_names(&rows), vec!["period", "a", "b"]);
    }
}
