use serde::{Deserialize, Serialize};

/// The signed dollar profit of a trade as it arrives from the reporting endpoint.
///
/// The endpoint is inconsistent: some rows carry a JSON number, others a display string
/// such as `"$1,234.56"` or `"-$42.10"`. The shape is resolved once, here, and the rest of
/// the pipeline only ever sees the `f64` returned by [`ProfitField::normalize`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfitField {
    Number(f64),
    Text(String),
}

impl ProfitField {
    /// Coerces the field into a signed number.
    ///
    /// Strings keep only ASCII digits, `.` and `-`, and the longest leading float is
    /// parsed from what remains. Returns `NaN` when no digits are present.
    pub fn normalize(&self) -> f64 {
        match self {
            ProfitField::Number(value) => *value,
            ProfitField::Text(raw) => parse_leading_float(raw),
        }
    }

    /// Like [`normalize`](Self::normalize), but `NaN` becomes `0.0` so it can be summed.
    pub fn value_or_zero(&self) -> f64 {
        let value = self.normalize();
        if value.is_nan() { 0.0 } else { value }
    }
}

impl Default for ProfitField {
    fn default() -> Self {
        ProfitField::Number(0.0)
    }
}

impl From<f64> for ProfitField {
    fn from(value: f64) -> Self {
        ProfitField::Number(value)
    }
}

impl From<&str> for ProfitField {
    fn from(value: &str) -> Self {
        ProfitField::Text(value.to_string())
    }
}

fn parse_leading_float(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    let bytes = cleaned.as_bytes();
    let mut end = 0;
    if bytes.first() == Some(&b'-') {
        end = 1;
    }

    let mut digits = 0;
    let mut seen_point = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => digits += 1,
            b'.' if !seen_point => seen_point = true,
            _ => break,
        }
        end += 1;
    }

    if digits == 0 {
        return f64::NAN;
    }

    // A trailing '.' ("12.") is accepted by `f64::from_str`, so the prefix always parses.
    cleaned[..end].parse().unwrap_or(f64::NAN)
}
