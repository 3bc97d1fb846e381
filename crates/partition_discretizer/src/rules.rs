use crate::conf::{INTERVAL_SEPARATOR, NEG_INF_TOKEN, POS_INF_TOKEN};
use crate::error::DiscretizeError;
use core::fmt;
use std::str::FromStr;

/// -------------------
/// Interval
/// -------------------
/// A left-open, right-closed interval `(low, high]`. An infinite `high` makes
/// the right end open as well, so `(low, +inf)` never contains infinity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    pub low: f64,
    pub high: f64,
}

impl Interval {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// The whole real line, `(-inf, +inf)`.
    pub fn unbounded() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    pub fn contains(&self, value: f64) -> bool {
        let lower_check = value > self.low;
        let upper_check = if self.high == f64::INFINITY {
            value < self.high
        } else {
            value <= self.high
        };
        lower_check && upper_check
    }

    pub fn is_bounded(&self) -> bool {
        self.low.is_finite() && self.high.is_finite()
    }

    /// Split at `point`: `(low, point]` and `(point, high]`.
    pub fn split(&self, point: f64) -> (Self, Self) {
        (Self::new(self.low, point), Self::new(point, self.high))
    }

    /// A value guaranteed to lie inside the interval.
    pub fn representative(&self) -> f64 {
        match (self.low.is_finite(), self.high.is_finite()) {
            (true, true) => (self.low + self.high) / 2.0,
            (false, true) => self.high,
            (true, false) => self.low + 1.0,
            (false, false) => 0.0,
        }
    }
}

fn format_bound(value: f64) -> String {
    if value == f64::NEG_INFINITY {
        NEG_INF_TOKEN.to_string()
    } else if value == f64::INFINITY {
        POS_INF_TOKEN.to_string()
    } else {
        format!("{}", value)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let closing = if self.high == f64::INFINITY { ')' } else { ']' };
        write!(
            f,
            "({}{}{}{}",
            format_bound(self.low),
            INTERVAL_SEPARATOR,
            format_bound(self.high),
            closing
        )
    }
}

fn parse_bound(token: &str) -> Option<f64> {
    match token.trim() {
        t if t == NEG_INF_TOKEN => Some(f64::NEG_INFINITY),
        t if t == POS_INF_TOKEN || t == "+inf" => Some(f64::INFINITY),
        t => t.parse::<f64>().ok(),
    }
}

impl FromStr for Interval {
    type Err = DiscretizeError;

    /// Parses the labels written by `Display`, e.g. `(-inf; 2.5]` or `(2.5; inf)`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || DiscretizeError::InvalidDataset(format!("malformed interval label '{s}'"));
        let body = s
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(']').or_else(|| rest.strip_suffix(')')))
            .ok_or_else(malformed)?;
        let (low, high) = body.split_once(';').ok_or_else(malformed)?;
        let low = parse_bound(low).ok_or_else(malformed)?;
        let high = parse_bound(high).ok_or_else(malformed)?;
        if low > high {
            return Err(malformed());
        }
        Ok(Interval::new(low, high))
    }
}
