// Affiliate leaderboard records and the ranking pipeline
// Upstream payloads are untrusted: every field is coerced, nothing here fails

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

// Longest leading decimal: sign, digits, fraction, exponent
static DECIMAL_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("decimal pattern is a valid regex")
});

/// One ranked row of the leaderboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateRecord {
    pub id: String,
    pub username: String,
    /// Never negative
    pub total_wagered: f64,
    pub total_earnings: f64,
    pub bet_count: u64,
    /// 1-based position after sorting
    pub rank: u32,
}

/// Turn a raw upstream payload into a densely ranked leaderboard.
///
/// Records are ordered by `total_wagered` descending. Ties keep their
/// upstream order, so the same payload always produces the same ranking.
pub fn normalize(payload: &Value) -> Vec<AffiliateRecord> {
    let mut records: Vec<AffiliateRecord> = unwrap_records(payload)
        .iter()
        .enumerate()
        .map(|(index, raw)| coerce_record(index, raw))
        .collect();

    // sort_by is stable
    records.sort_by(|a, b| b.total_wagered.total_cmp(&a.total_wagered));

    for (index, record) in records.iter_mut().enumerate() {
        record.rank = index as u32 + 1;
    }

    records
}

/// Locate the record list inside one of the known envelopes.
///
/// Checked in order: a bare array, then an `affiliates` array, then a
/// `data` array. Anything else is an empty leaderboard.
pub fn unwrap_records(payload: &Value) -> &[Value] {
    match payload {
        Value::Array(items) => items.as_slice(),
        Value::Object(envelope) => ["affiliates", "data"]
            .iter()
            .find_map(|key| envelope.get(*key).and_then(Value::as_array))
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    }
}

/// Parse a decimal from a JSON number or string, or fall back to zero.
///
/// Strings are read up to the end of their leading decimal, so
/// `"1500.25 USD"` is `1500.25`. Never panics and never returns NaN or
/// infinity: absent, null, empty, non-numeric and non-finite inputs all
/// yield `0.0`.
pub fn parse_decimal_or_zero(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => DECIMAL_PREFIX
            .find(s.trim_start())
            .and_then(|m| m.as_str().parse::<f64>().ok()),
        _ => None,
    };

    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

/// Whole, non-negative count; anything unusable becomes zero
pub fn parse_count_or_zero(value: Option<&Value>) -> u64 {
    if let Some(count) = value.and_then(Value::as_u64) {
        return count;
    }

    let decimal = parse_decimal_or_zero(value);
    if decimal > 0.0 {
        decimal.trunc() as u64
    } else {
        0
    }
}

fn coerce_record(index: usize, raw: &Value) -> AffiliateRecord {
    let fields = raw.as_object();

    let id = field(fields, "id")
        .or_else(|| field(fields, "affiliate_id"))
        .map(as_text)
        .unwrap_or_else(|| format!("affiliate-{}", index));

    let username = field(fields, "username")
        .map(as_text)
        .unwrap_or_else(|| format!("User{}", index + 1));

    let wagered = parse_decimal_or_zero(
        field(fields, "wagered_amount").or_else(|| field(fields, "total_wagered")),
    );

    AffiliateRecord {
        id,
        username,
        // also folds -0.0 into 0.0 so ordering stays consistent
        total_wagered: if wagered > 0.0 { wagered } else { 0.0 },
        total_earnings: parse_decimal_or_zero(field(fields, "total_earnings")),
        bet_count: parse_count_or_zero(field(fields, "bet_count")),
        rank: 0,
    }
}

/// A field counts as present unless it is missing, null, false, zero or ""
fn field<'a>(fields: Option<&'a Map<String, Value>>, key: &str) -> Option<&'a Value> {
    fields?.get(key).filter(|value| match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().map_or(true, |v| v != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    })
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
