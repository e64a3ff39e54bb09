use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};

use super::series::TokenSeries;
use super::ScoringError;

/// Default window set: recent windows weigh most, `24h` is informational only.
pub const DEFAULT_WINDOWS: &str = "1h:0.4,2h:0.35,4h:0.2,12h:0.05,24h:0.0";

/// A look-back duration with its label and decay weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Window {
    pub label: String,
    pub duration: Duration,
    pub decay_weight: f64,
}

impl Window {
    pub fn new(label: impl Into<String>, duration: Duration, decay_weight: f64) -> Self {
        Self {
            label: label.into(),
            duration,
            decay_weight,
        }
    }
}

impl FromStr for Window {
    type Err = ScoringError;

    /// Parse `<label>:<decay_weight>` where the label is `<n>m`, `<n>h` or `<n>d`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ScoringError::InvalidWindow {
            window: s.to_string(),
            reason: reason.to_string(),
        };

        let (label, weight) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| invalid("expected <label>:<decay_weight>"))?;
        let label = label.trim();
        let decay_weight: f64 = weight
            .trim()
            .parse()
            .map_err(|_| invalid("decay weight is not a number"))?;
        if !decay_weight.is_finite() || decay_weight < 0.0 {
            return Err(invalid("decay weight must be a finite, non-negative number"));
        }

        let split_at = label
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| invalid("missing duration unit"))?;
        let (amount, unit) = label.split_at(split_at);
        let amount: i64 = amount
            .parse()
            .map_err(|_| invalid("duration amount is not an integer"))?;
        if amount <= 0 {
            return Err(invalid("duration must be positive"));
        }

        let duration = match unit {
            "m" => Duration::try_minutes(amount),
            "h" => Duration::try_hours(amount),
            "d" => Duration::try_days(amount),
            _ => return Err(invalid("unit must be one of m, h, d")),
        }
        .ok_or_else(|| invalid("duration out of range"))?;

        Ok(Window::new(label, duration, decay_weight))
    }
}

/// Ordered, process-wide set of scoring windows.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSet(Vec<Window>);

impl WindowSet {
    pub fn new(windows: Vec<Window>) -> Result<Self, ScoringError> {
        if windows.is_empty() {
            return Err(ScoringError::EmptyWindowSet);
        }
        for (i, window) in windows.iter().enumerate() {
            if windows[..i].iter().any(|w| w.label == window.label) {
                return Err(ScoringError::DuplicateWindow(window.label.clone()));
            }
        }
        Ok(Self(windows))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Window> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Longest configured look-back.
    pub fn max_duration(&self) -> Duration {
        self.0
            .iter()
            .map(|w| w.duration)
            .max()
            .unwrap_or_else(Duration::zero)
    }
}

impl Default for WindowSet {
    fn default() -> Self {
        Self(vec![
            Window::new("1h", Duration::hours(1), 0.4),
            Window::new("2h", Duration::hours(2), 0.35),
            Window::new("4h", Duration::hours(4), 0.2),
            Window::new("12h", Duration::hours(12), 0.05),
            Window::new("24h", Duration::hours(24), 0.0),
        ])
    }
}

impl FromStr for WindowSet {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let windows = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::parse)
            .collect::<Result<Vec<Window>, _>>()?;
        WindowSet::new(windows)
    }
}

impl fmt::Display for WindowSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|w| format!("{}:{}", w.label, w.decay_weight))
            .collect();
        write!(f, "{}", parts.join(","))
    }
}

// ---------------------------------------------------------------------------
// Window Planner
// ---------------------------------------------------------------------------

/// One (token, window) pair with the instant its past snapshot should
/// be matched against.
#[derive(Debug, Clone)]
pub struct TokenPeriod<'a> {
    pub token_symbol: &'a str,
    pub window: &'a Window,
    pub most_recent_date: DateTime<Utc>,
    pub target_date: DateTime<Utc>,
}

/// Derive one period per configured window for a token. Periods are not
/// filtered here; the aligner drops the ones without enough history.
pub fn plan_periods<'a>(
    series: &TokenSeries<'a>,
    windows: &'a WindowSet,
) -> Result<Vec<TokenPeriod<'a>>, ScoringError> {
    let most_recent_date = series.most_recent_date();

    windows
        .iter()
        .map(|window| {
            let target_date = most_recent_date
                .checked_sub_signed(window.duration)
                .ok_or_else(|| ScoringError::TimestampOutOfRange {
                    token: series.token_symbol.to_string(),
                    window: window.label.clone(),
                })?;
            Ok(TokenPeriod {
                token_symbol: series.token_symbol,
                window,
                most_recent_date,
                target_date,
            })
        })
        .collect()
}
