//! Splitting a media filename into base name, version suffix and extension.
//!
//! Two suffix grammars are recognised, tried in this order:
//!
//! 1. `v` + 8 digits (`YYYYMMDD`), optionally 4 more digits (`HHMM`), optionally
//!    one ASCII letter: `shot_v20240301a.mov`
//! 2. `_v` + one or more digits: `render_v10.mov`
//!
//! Anything else is unversioned. A name ending in two letters after the date
//! (`shot_v20240301ab`) matches neither grammar and is unversioned too.

/// The version suffix found at the end of a filename stem, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawVersion {
    Date(String),
    Sequence(String),
    Unversioned,
}

impl RawVersion {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            RawVersion::Date(token) | RawVersion::Sequence(token) => Some(token),
            RawVersion::Unversioned => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFilename {
    pub base_name: String,
    pub version: RawVersion,
    /// Extension without the leading dot; empty when the name has none.
    pub extension: String,
}

impl ParsedFilename {
    pub fn raw_token(&self) -> Option<&str> {
        self.version.as_str()
    }
}

/// Parse a bare filename (no directory components).
pub fn parse(filename: &str) -> ParsedFilename {
    let (stem, extension) = split_extension(filename);

    let (split_at, version) = if let Some(start) = match_date_suffix(stem) {
        (start, RawVersion::Date(stem[start..].to_string()))
    } else if let Some(start) = match_sequence_suffix(stem) {
        (start, RawVersion::Sequence(stem[start..].to_string()))
    } else {
        (stem.len(), RawVersion::Unversioned)
    };

    ParsedFilename {
        base_name: stem[..split_at].to_string(),
        version,
        extension: extension.to_string(),
    }
}

/// Split on the final `.`, ignoring dots that only lead the name (`.hidden`).
fn split_extension(filename: &str) -> (&str, &str) {
    let leading_dots = filename.len() - filename.trim_start_matches('.').len();
    match filename[leading_dots..].rfind('.') {
        Some(pos) => {
            let dot = leading_dots + pos;
            (&filename[..dot], &filename[dot + 1..])
        }
        None => (filename, ""),
    }
}

/// Length of the run of ASCII digits that ends at byte offset `end`.
fn digit_run_before(bytes: &[u8], end: usize) -> usize {
    bytes[..end]
        .iter()
        .rev()
        .take_while(|b| b.is_ascii_digit())
        .count()
}

/// Start offset of a trailing `vYYYYMMDD[HHMM][letter]` suffix.
fn match_date_suffix(stem: &str) -> Option<usize> {
    let bytes = stem.as_bytes();
    let digits_end = match bytes.last() {
        Some(b) if b.is_ascii_alphabetic() => bytes.len() - 1,
        Some(_) => bytes.len(),
        None => return None,
    };
    let run = digit_run_before(bytes, digits_end);

    // The leftmost candidate wins, so the 12-digit form is checked first.
    [12usize, 8].into_iter().find_map(|width| {
        if run < width || digits_end < width + 1 {
            return None;
        }
        let v_pos = digits_end - width - 1;
        (bytes[v_pos] == b'v').then_some(v_pos)
    })
}

/// Start offset of a trailing `_v<digits>` suffix.
fn match_sequence_suffix(stem: &str) -> Option<usize> {
    let bytes = stem.as_bytes();
    let run = digit_run_before(bytes, bytes.len());
    if run == 0 {
        return None;
    }
    let digits_start = bytes.len() - run;
    if digits_start >= 2 && &bytes[digits_start - 2..digits_start] == b"_v" {
        Some(digits_start - 2)
    } else {
        None
    }
}
