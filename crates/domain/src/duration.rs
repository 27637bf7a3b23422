//! Work duration parsing and the wire encodings the tracker may accept.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Value, json};

/// Minutes assumed when a duration string carries no usable number.
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

/// A human-readable work duration together with its total minutes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkDuration {
    presentation: String,
    minutes: u32,
}

impl WorkDuration {
    /// Parses a duration such as `"1h 30m"`, `"45m"` or `"90"`.
    ///
    /// Never fails: input without a usable number falls back to
    /// [`DEFAULT_DURATION_MINUTES`].
    #[must_use]
    pub fn parse(presentation: impl Into<String>) -> Self {
        let presentation = presentation.into();
        let minutes = parse_duration_minutes(presentation.as_str());
        Self {
            presentation,
            minutes,
        }
    }

    /// Returns the duration exactly as the caller wrote it.
    #[must_use]
    pub fn presentation(&self) -> &str {
        self.presentation.as_str()
    }

    /// Returns the parsed total minutes.
    #[must_use]
    pub fn minutes(&self) -> u32 {
        self.minutes
    }
}

/// Shape used for the `duration` member of a work item write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationEncoding {
    /// `{"presentation": "1h 30m"}`
    Presentation,
    /// `"1h 30m"`
    Bare,
    /// `{"minutes": 90}`
    Minutes,
}

impl DurationEncoding {
    /// Order in which encodings are offered to the tracker.
    pub const FALLBACK_ORDER: [Self; 3] = [Self::Presentation, Self::Bare, Self::Minutes];

    /// Returns the stable label for logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Presentation => "presentation",
            Self::Bare => "bare",
            Self::Minutes => "minutes",
        }
    }

    /// Encodes a duration in this shape.
    #[must_use]
    pub fn encode(self, duration: &WorkDuration) -> Value {
        match self {
            Self::Presentation => json!({ "presentation": duration.presentation() }),
            Self::Bare => Value::String(duration.presentation().to_owned()),
            Self::Minutes => json!({ "minutes": duration.minutes() }),
        }
    }
}

/// Parses a human-readable duration into total whole minutes.
///
/// `<digits>h` and `<digits>m` (unit directly after the digits) are searched anywhere in the string, case
/// insensitively, and summed. Without either, the first bare integer is used.
#[must_use]
pub fn parse_duration_minutes(input: &str) -> u32 {
    try_parse_minutes(input).unwrap_or(DEFAULT_DURATION_MINUTES)
}

fn try_parse_minutes(input: &str) -> Option<u32> {
    let hours = first_number(hours_pattern()?, input);
    let minutes = first_number(minutes_pattern()?, input);

    match (hours, minutes) {
        (None, None) => first_number(integer_pattern()?, input)?.ok(),
        (hours, minutes) => {
            let hours = hours.transpose().ok()?.unwrap_or(0);
            let minutes = minutes.transpose().ok()?.unwrap_or(0);
            hours.checked_mul(60)?.checked_add(minutes)
        }
    }
}

fn first_number(
    pattern: &Regex,
    input: &str,
) -> Option<Result<u32, std::num::ParseIntError>> {
    pattern
        .captures(input)
        .and_then(|captures| captures.get(1))
        .map(|digits| digits.as_str().parse::<u32>())
}

fn hours_pattern() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(\d+)h").ok()).as_ref()
}

fn minutes_pattern() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(\d+)m").ok()).as_ref()
}

fn integer_pattern() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)").ok()).as_ref()
}
