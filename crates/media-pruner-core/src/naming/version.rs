//! Typed version tokens and their ordering.

use crate::error::Error;
use chrono::{NaiveDate, NaiveDateTime};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VersionFamily {
    Date,
    Sequence,
}

impl fmt::Display for VersionFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionFamily::Date => write!(f, "date (vYYYYMMDD)"),
            VersionFamily::Sequence => write!(f, "numeric (_vN)"),
        }
    }
}

/// A parsed version suffix. Ordering is only defined between tokens of the
/// same family; see [`VersionToken::compare`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionToken {
    Date {
        /// Date-only tokens are placed at midnight.
        timestamp: NaiveDateTime,
        /// Whether the token carried `HHMM`, kept so the token can be written back out.
        has_time: bool,
        letter: Option<char>,
    },
    Sequence {
        number: u64,
    },
}

impl VersionToken {
    /// Classify a raw suffix as produced by [`crate::naming::filename::parse`].
    pub fn classify(raw: &str) -> Result<Self, Error> {
        if let Some(digits) = raw.strip_prefix("_v") {
            return parse_sequence(raw, digits);
        }
        if let Some(body) = raw.strip_prefix('v') {
            return parse_date(raw, body);
        }
        Err(Error::InvalidVersionFormat(raw.to_string()))
    }

    pub fn family(&self) -> VersionFamily {
        match self {
            VersionToken::Date { .. } => VersionFamily::Date,
            VersionToken::Sequence { .. } => VersionFamily::Sequence,
        }
    }

    pub fn date(&self) -> Option<NaiveDateTime> {
        match self {
            VersionToken::Date { timestamp, .. } => Some(*timestamp),
            VersionToken::Sequence { .. } => None,
        }
    }

    pub fn letter(&self) -> Option<char> {
        match self {
            VersionToken::Date { letter, .. } => *letter,
            VersionToken::Sequence { .. } => None,
        }
    }

    pub fn sequence_number(&self) -> Option<u64> {
        match self {
            VersionToken::Sequence { number } => Some(*number),
            VersionToken::Date { .. } => None,
        }
    }

    /// Total order within a family. Dates compare by timestamp, then by
    /// letter, where a missing letter is older than any letter.
    pub fn compare(&self, other: &Self) -> Result<Ordering, Error> {
        match (self, other) {
            (
                VersionToken::Date {
                    timestamp: a,
                    letter: a_letter,
                    ..
                },
                VersionToken::Date {
                    timestamp: b,
                    letter: b_letter,
                    ..
                },
            ) => Ok(a.cmp(b).then_with(|| a_letter.cmp(b_letter))),
            (VersionToken::Sequence { number: a }, VersionToken::Sequence { number: b }) => {
                Ok(a.cmp(b))
            }
            _ => Err(Error::IncomparableVersions),
        }
    }
}

impl fmt::Display for VersionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionToken::Date {
                timestamp,
                has_time,
                letter,
            } => {
                let pattern = if *has_time { "%Y%m%d%H%M" } else { "%Y%m%d" };
                write!(f, "v{}", timestamp.format(pattern))?;
                if let Some(letter) = letter {
                    write!(f, "{}", letter)?;
                }
                Ok(())
            }
            VersionToken::Sequence { number } => write!(f, "_v{}", number),
        }
    }
}

fn parse_sequence(raw: &str, digits: &str) -> Result<VersionToken, Error> {
    if digits.is_empty() {
        return Err(Error::InvalidSequence(raw.to_string()));
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidVersionFormat(raw.to_string()));
    }
    let number = digits
        .parse::<u64>()
        .map_err(|_| Error::InvalidSequence(raw.to_string()))?;
    Ok(VersionToken::Sequence { number })
}

fn parse_date(raw: &str, body: &str) -> Result<VersionToken, Error> {
    let (digits, letter) = match body.chars().last() {
        Some(c) if c.is_ascii_alphabetic() => (&body[..body.len() - 1], Some(c)),
        _ => (body, None),
    };

    if !(digits.len() == 8 || digits.len() == 12) || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(Error::InvalidVersionFormat(raw.to_string()));
    }

    let field = |range: std::ops::Range<usize>| -> u32 {
        // Every byte was checked to be an ASCII digit above.
        digits[range]
            .bytes()
            .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
    };

    let year = field(0..4);
    let date = NaiveDate::from_ymd_opt(year as i32, field(4..6), field(6..8))
        .filter(|_| year >= 1)
        .ok_or_else(|| Error::InvalidDate(raw.to_string()))?;

    let has_time = digits.len() == 12;
    let (hour, minute) = if has_time {
        (field(8..10), field(10..12))
    } else {
        (0, 0)
    };
    let timestamp = date
        .and_hms_opt(hour, minute, 0)
        .ok_or_else(|| Error::InvalidDate(raw.to_string()))?;

    Ok(VersionToken::Date {
        timestamp,
        has_time,
        letter,
    })
}
