//! # Compound Name Normalization
//!
//! Library search hits name the same substance in many ways: `"1-Butanol"`,
//! `(+)-2-Bornanone`, `ETHYL ACETATE`, `Limonene (1)`. Every cross-sample
//! comparison joins on the canonical form produced here, so normalization
//! must be deterministic and idempotent.
//!
//! ## Pipeline
//!
//! 1. Trim whitespace and one enclosing ASCII quote on each side.
//! 2. Drop a leading numeric locant (`1-`, `23 `, `4.`).
//! 3. Drop a leading stereo descriptor (`(+)-`, `(R)-`, `(2S,3R)-`).
//! 4. Drop a trailing index suffix (`(1)`, `[2] ...`).
//!
//! Steps 1-4 repeat until nothing changes, so `(+)-2-Bornanone` loses both
//! the descriptor and the locant it exposes. Then:
//!
//! 5. Collapse internal whitespace.
//! 6. Title-case all-caps names longer than three characters.
//! 7. Reject residues that cannot name a compound.
//!
//! [`Strictness::Strict`] additionally strips bare digit and single-letter
//! tokens anywhere in the name, drops any trailing `[...]` annotation, and
//! requires a run of three consecutive letters.

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};


/// Display text used wherever a compound could not be identified.
pub const UNKNOWN: &str = "Unknown";

/// Names shorter than this (in characters) are rejected.
const MIN_NAME_CHARS: usize = 3;

/// All-caps names must be longer than this to be title-cased.
const MAX_ACRONYM_CHARS: usize = 3;

lazy_static! {
    static ref LEADING_LOCANT: Regex = Regex::new(r"^\d+[\s\-.]+").expect("static pattern");
    static ref LEADING_SIGN_STEREO: Regex = Regex::new(r"^\([+\-RSEZ]+\)[\s\-.]*").expect("static pattern");
    static ref LEADING_LOCANT_STEREO: Regex =
        Regex::new(r"^\(\d*[RSEZ][\d,RSEZ]*\)[\s\-.]*").expect("static pattern");
    static ref TRAILING_INDEX: Regex = Regex::new(r"\s*\(\d+\)\s*$").expect("static pattern");
    static ref TRAILING_BRACKET_INDEX: Regex = Regex::new(r"\s*\[\d+\].*$").expect("static pattern");
    static ref TRAILING_BRACKET_ANY: Regex = Regex::new(r"\s*\[.*$").expect("static pattern");
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").expect("static pattern");
    static ref ALPHA_RUN: Regex = Regex::new(r"\p{Alphabetic}{3}").expect("static pattern");
}

/// How aggressively raw identifiers are cleaned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    /// Strip only leading and trailing decorations (default).
    #[default]
    Standard,
    /// Also strip embedded digit / single-letter tokens and any trailing
    /// bracketed annotation; require three consecutive letters.
    Strict,
}

impl fmt::Display for Strictness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strictness::Standard => write!(f, "standard"),
            Strictness::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for Strictness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" | "default" => Ok(Strictness::Standard),
            "strict" => Ok(Strictness::Strict),
            _ => Err(format!(
                "Unknown strictness '{}'. Valid options: standard, strict",
                s
            )),
        }
    }
}

/// Result of normalizing a raw library identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CompoundName {
    /// Cleaned, comparable display name.
    Canonical(String),
    /// The identifier could not be reduced to a usable name.
    Unidentified,
}

impl CompoundName {
    /// Whether this name takes part in cross-sample comparisons.
    pub fn is_identified(&self) -> bool {
        matches!(self, CompoundName::Canonical(_))
    }

    /// The canonical name, if any.
    pub fn as_canonical(&self) -> Option<&str> {
        match self {
            CompoundName::Canonical(name) => Some(name),
            CompoundName::Unidentified => None,
        }
    }

    /// Display text; [`UNKNOWN`] for unidentified names.
    pub fn as_str(&self) -> &str {
        self.as_canonical().unwrap_or(UNKNOWN)
    }
}

impl fmt::Display for CompoundName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stateless compound-name normalizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NameNormalizer {
    strictness: Strictness,
}

impl NameNormalizer {
    /// Create a normalizer with the given strictness.
    pub fn new(strictness: Strictness) -> Self {
        Self { strictness }
    }

    /// Strictness this normalizer applies.
    pub fn strictness(&self) -> Strictness {
        self.strictness
    }

    /// Normalize a raw identifier into a [`CompoundName`].
    pub fn normalize(&self, raw: &str) -> CompoundName {
        let mut current = raw.to_string();
        loop {
            let next = self.strip_decorations(&current);
            if next == current {
                break;
            }
            current = next;
        }

        let collapsed = WHITESPACE_RUN.replace_all(&current, " ");
        let mut cleaned = collapsed.trim().to_string();

        if is_all_caps(&cleaned) && cleaned.chars().count() > MAX_ACRONYM_CHARS {
            cleaned = title_case(&cleaned);
        }

        if self.is_acceptable(&cleaned) {
            CompoundName::Canonical(cleaned)
        } else {
            CompoundName::Unidentified
        }
    }

    /// One pass of steps 1-4.
    fn strip_decorations(&self, input: &str) -> String {
        let trimmed = strip_enclosing_quotes(input.trim()).trim();

        let s = LEADING_LOCANT.replace(trimmed, "");
        let s = LEADING_SIGN_STEREO.replace(&s, "");
        let s = LEADING_LOCANT_STEREO.replace(&s, "");
        let s = TRAILING_INDEX.replace(&s, "");
        let s = TRAILING_BRACKET_INDEX.replace(&s, "");

        match self.strictness {
            Strictness::Standard => s.trim().to_string(),
            Strictness::Strict => {
                let s = TRAILING_BRACKET_ANY.replace(&s, "");
                s.split_whitespace()
                    .filter(|token| !is_stray_token(token))
                    .collect::<Vec<_>>()
                    .join(" ")
            }
        }
    }

    fn is_acceptable(&self, name: &str) -> bool {
        if name.chars().count() < MIN_NAME_CHARS {
            return false;
        }
        match self.strictness {
            Strictness::Standard => name.chars().any(char::is_alphabetic),
            Strictness::Strict => ALPHA_RUN.is_match(name),
        }
    }
}

/// Normalize with the default ([`Strictness::Standard`]) policy.
pub fn normalize(raw: &str) -> CompoundName {
    NameNormalizer::default().normalize(raw)
}

/// Remove at most one ASCII quote character from each end.
fn strip_enclosing_quotes(s: &str) -> &str {
    const QUOTES: &[char] = &['"', '\''];
    let s = s.strip_prefix(QUOTES).unwrap_or(s);
    s.strip_suffix(QUOTES).unwrap_or(s)
}

/// Bare number or lone letter left over inside a name.
fn is_stray_token(token: &str) -> bool {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.is_alphabetic() || c.is_ascii_digit(),
        _ => token.chars().all(|c| c.is_ascii_digit()),
    }
}

fn is_all_caps(s: &str) -> bool {
    s.chars().any(char::is_uppercase) && !s.chars().any(char::is_lowercase)
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
///
/// Letters whose case mapping is not a single character are kept as they
/// are, so the output has the same length and title-casing it again is a
/// no-op.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.push(single_char(c.to_lowercase()).unwrap_or(c));
            } else {
                out.push(single_char(c.to_uppercase()).unwrap_or(c));
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

fn single_char(mut mapped: impl Iterator<Item = char>) -> Option<char> {
    match (mapped.next(), mapped.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
