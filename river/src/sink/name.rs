use chrono::{DateTime, Datelike, Timelike, Utc};

use river_config::shared::DestinationConfig;

use crate::bail;
use crate::error::{ErrorKind, RiverError, RiverResult};

/// Destination-name resolution strategy for a mouth.
///
/// Either a fixed name, or a date pattern producing one partition per time
/// bucket. Resolution is deterministic for a given instant and pattern and
/// keeps no state across calls.
#[derive(Debug, Clone)]
pub enum DestinationName {
    /// Fixed destination name.
    Static(String),
    /// Destination name formatted from a timestamp.
    TimeWindowed(TimeWindowPattern),
}

impl DestinationName {
    /// Builds a resolver from its configuration, parsing the pattern eagerly
    /// so an invalid pattern fails at startup instead of at dispatch time.
    pub fn from_config(config: &DestinationConfig) -> RiverResult<Self> {
        config.validate()?;

        match config {
            DestinationConfig::Static { name } => Ok(Self::Static(name.clone())),
            DestinationConfig::TimeWindowed { pattern } => {
                Ok(Self::TimeWindowed(TimeWindowPattern::parse(pattern)?))
            }
        }
    }

    /// Resolves the destination name for the given instant.
    pub fn resolve(&self, at: DateTime<Utc>) -> String {
        match self {
            Self::Static(name) => name.clone(),
            Self::TimeWindowed(pattern) => pattern.format(at),
        }
    }
}

/// A parsed date pattern with quoted literal sections.
///
/// Supported tokens: `yyyy`/`YYYY` (year), `MM` (month), `dd` (day of
/// month), `HH` (hour), `mm` (minute). Text between single quotes is copied
/// verbatim and `''` produces a literal quote, so `'logs-'yyyy.MM.dd`
/// resolves to `logs-2026.08.06`.
#[derive(Debug, Clone)]
pub struct TimeWindowPattern {
    segments: Vec<PatternSegment>,
}

#[derive(Debug, Clone)]
enum PatternSegment {
    Literal(String),
    Year,
    Month,
    Day,
    Hour,
    Minute,
}

impl TimeWindowPattern {
    /// Parses `pattern`, rejecting unknown pattern letters and unterminated
    /// quotes.
    pub fn parse(pattern: &str) -> RiverResult<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = pattern.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '\'' {
                if chars.peek() == Some(&'\'') {
                    chars.next();
                    literal.push('\'');
                    continue;
                }
                // Quoted section: copy verbatim until the closing quote,
                // where '' still means a literal quote.
                loop {
                    match chars.next() {
                        Some('\'') if chars.peek() == Some(&'\'') => {
                            chars.next();
                            literal.push('\'');
                        }
                        Some('\'') => break,
                        Some(c) => literal.push(c),
                        None => {
                            bail!(
                                ErrorKind::DestinationNameInvalid,
                                "The destination pattern has an unterminated quote",
                                pattern
                            );
                        }
                    }
                }
                continue;
            }

            if !c.is_ascii_alphabetic() {
                literal.push(c);
                continue;
            }

            let segment = match c {
                'y' | 'Y' => PatternSegment::Year,
                'M' => PatternSegment::Month,
                'd' => PatternSegment::Day,
                'H' => PatternSegment::Hour,
                'm' => PatternSegment::Minute,
                other => {
                    bail!(
                        ErrorKind::DestinationNameInvalid,
                        "The destination pattern contains an unsupported letter",
                        format!("{other} in {pattern}")
                    );
                }
            };

            // A token is a run of the same letter; its length carries no
            // extra meaning beyond selecting the field.
            while chars.peek() == Some(&c) {
                chars.next();
            }

            if !literal.is_empty() {
                segments.push(PatternSegment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(segment);
        }

        if !literal.is_empty() {
            segments.push(PatternSegment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// Formats the pattern for the given instant.
    pub fn format(&self, at: DateTime<Utc>) -> String {
        use std::fmt::Write;

        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                PatternSegment::Literal(text) => out.push_str(text),
                PatternSegment::Year => {
                    let _ = write!(out, "{:04}", at.year());
                }
                PatternSegment::Month => {
                    let _ = write!(out, "{:02}", at.month());
                }
                PatternSegment::Day => {
                    let _ = write!(out, "{:02}", at.day());
                }
                PatternSegment::Hour => {
                    let _ = write!(out, "{:02}", at.hour());
                }
                PatternSegment::Minute => {
                    let _ = write!(out, "{:02}", at.minute());
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 6, 7, 5, 0).unwrap()
    }

    #[test]
    fn daily_partition_pattern_resolves() {
        let pattern = TimeWindowPattern::parse("'test-'YYYY.MM.dd").unwrap();
        assert_eq!(pattern.format(instant()), "test-2026.08.06");
    }

    #[test]
    fn resolution_is_stable_for_the_same_instant() {
        let name = DestinationName::from_config(&DestinationConfig::TimeWindowed {
            pattern: "'test-'YYYY.MM.dd".into(),
        })
        .unwrap();
        assert_eq!(name.resolve(instant()), name.resolve(instant()));
    }

    #[test]
    fn lowercase_year_and_time_tokens_resolve() {
        let pattern = TimeWindowPattern::parse("'metrics-'yyyy.MM.dd.HH.mm").unwrap();
        assert_eq!(pattern.format(instant()), "metrics-2026.08.06.07.05");
    }

    #[test]
    fn escaped_quote_is_literal() {
        let pattern = TimeWindowPattern::parse("'it''s-'yyyy").unwrap();
        assert_eq!(pattern.format(instant()), "it's-2026");
    }

    #[test]
    fn unsupported_letter_is_rejected() {
        let err = TimeWindowPattern::parse("'test-'QQ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DestinationNameInvalid);
    }

    #[test]
    fn unterminated_quote_is_rejected() {
        let err = TimeWindowPattern::parse("'test-").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DestinationNameInvalid);
    }

    #[test]
    fn static_name_resolves_verbatim() {
        let name = DestinationName::from_config(&DestinationConfig::Static {
            name: "products".into(),
        })
        .unwrap();
        assert_eq!(name.resolve(instant()), "products");
    }
}
