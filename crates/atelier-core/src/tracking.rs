//! # Tracking Numbers
//!
//! Structured identifiers correlating the four records of one customer
//! engagement: call log, quote, order, and production batch.
//!
//! ## One Engagement, Four Numbers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Engagement Correlation                              │
//! │                                                                         │
//! │  Customer calls about a custom ring                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CL-2026-0042   ← minted once, at call-log creation                    │
//! │       │                                                                 │
//! │       ├──► Q-2026-0042     (quote sent)                                │
//! │       ├──► ORD-2026-0042   (order placed)                              │
//! │       └──► PRD-2026-0042   (production batch opened)                   │
//! │                                                                         │
//! │  Same (year, sequence) = same engagement. Given any one number the     │
//! │  other three are computed without a database lookup.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Text Format
//! `PREFIX-YYYY-NNNN` — uppercase prefix, 4-digit year, sequence zero-padded
//! to at least 4 digits. Sequences of 10000 and above render at their natural
//! width (`CL-2026-10032`), never truncated.
//!
//! ## Minting vs Deriving
//! Only call-log numbers are ever *minted* (advancing the process-wide
//! sequence counter). Quote, order, and production numbers are *derived* by
//! swapping the prefix on an existing number — deriving never touches the
//! counter.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

use crate::error::TrackingError;

/// Minimum rendered width of the sequence component.
pub const SEQUENCE_PAD_WIDTH: usize = 4;

// =============================================================================
// Tracking Prefix
// =============================================================================

/// The record type a tracking number belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackingPrefix {
    /// Call log — the record that opens an engagement (`CL`).
    CallLog,
    /// Quote (`Q`).
    Quote,
    /// Order (`ORD`).
    Order,
    /// Production batch (`PRD`).
    Production,
}

impl TrackingPrefix {
    /// All prefixes, in engagement lifecycle order.
    pub const ALL: [TrackingPrefix; 4] = [
        TrackingPrefix::CallLog,
        TrackingPrefix::Quote,
        TrackingPrefix::Order,
        TrackingPrefix::Production,
    ];

    /// Returns the prefix code used in the text form.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            TrackingPrefix::CallLog => "CL",
            TrackingPrefix::Quote => "Q",
            TrackingPrefix::Order => "ORD",
            TrackingPrefix::Production => "PRD",
        }
    }

    /// Looks up a prefix by its code. Codes are case-sensitive: `cl` is not
    /// a valid prefix, matching the parse grammar.
    fn from_code(code: &str) -> Option<Self> {
        match code {
            "CL" => Some(TrackingPrefix::CallLog),
            "Q" => Some(TrackingPrefix::Quote),
            "ORD" => Some(TrackingPrefix::Order),
            "PRD" => Some(TrackingPrefix::Production),
            _ => None,
        }
    }
}

impl fmt::Display for TrackingPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackingPrefix {
    type Err = TrackingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrackingPrefix::from_code(s).ok_or_else(|| {
            TrackingError::invalid_format(s, "unknown prefix (expected CL, Q, ORD, or PRD)")
        })
    }
}

// =============================================================================
// Tracking Number
// =============================================================================

/// A structured tracking identifier: prefix, 4-digit year, positive sequence.
///
/// ## Invariants
/// - `year` fits in 4 digits (<= 9999)
/// - `sequence` is strictly positive
/// - `parse(format(x)) == x` for every value of this type
///
/// Numbers are immutable values: once created they are only referenced,
/// never mutated. Serialization uses the text form, so a `CallLog` record
/// carrying `"CL-2026-0042"` round-trips through JSON unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TrackingNumber {
    prefix: TrackingPrefix,
    year: u16,
    sequence: u32,
}

impl TrackingNumber {
    /// Creates a tracking number from its parts.
    ///
    /// ## Errors
    /// `InvalidFormat` if the year does not fit in 4 digits or the sequence
    /// is zero. Both would produce text the parser rejects.
    pub fn new(prefix: TrackingPrefix, year: u16, sequence: u32) -> Result<Self, TrackingError> {
        if year > 9999 {
            return Err(TrackingError::invalid_format(
                format!("{}-{}-{}", prefix, year, sequence),
                "year must fit in 4 digits",
            ));
        }
        if sequence == 0 {
            return Err(TrackingError::invalid_format(
                format!("{}-{:04}-{}", prefix, year, sequence),
                "sequence must be positive",
            ));
        }
        Ok(TrackingNumber {
            prefix,
            year,
            sequence,
        })
    }

    /// Returns the record-type prefix.
    #[inline]
    pub const fn prefix(&self) -> TrackingPrefix {
        self.prefix
    }

    /// Returns the 4-digit year.
    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Returns the sequence number. Unique per year among minted numbers.
    #[inline]
    pub const fn sequence(&self) -> u32 {
        self.sequence
    }

    /// Derives the sibling number with the given prefix.
    ///
    /// Pure value math: the (year, sequence) pair is reused, only the prefix
    /// changes. Deriving never advances the mint counter.
    ///
    /// ## Example
    /// ```rust
    /// use atelier_core::tracking::{TrackingNumber, TrackingPrefix};
    ///
    /// let call: TrackingNumber = "CL-2026-0042".parse().unwrap();
    /// let quote = call.with_prefix(TrackingPrefix::Quote);
    /// assert_eq!(quote.to_string(), "Q-2026-0042");
    /// ```
    #[inline]
    pub const fn with_prefix(self, prefix: TrackingPrefix) -> Self {
        TrackingNumber {
            prefix,
            year: self.year,
            sequence: self.sequence,
        }
    }

    /// Returns all four sibling numbers for this engagement.
    pub const fn related_set(self) -> EngagementNumbers {
        EngagementNumbers {
            call_log: self.with_prefix(TrackingPrefix::CallLog),
            quote: self.with_prefix(TrackingPrefix::Quote),
            order: self.with_prefix(TrackingPrefix::Order),
            production: self.with_prefix(TrackingPrefix::Production),
        }
    }

    /// True iff both numbers share the same (year, sequence) pair.
    ///
    /// Prefix and textual representation are irrelevant: `CL-2026-0042` and
    /// `PRD-2026-0042` belong to the same engagement.
    #[inline]
    pub const fn is_related_to(&self, other: &TrackingNumber) -> bool {
        self.year == other.year && self.sequence == other.sequence
    }
}

/// Sequence is rendered zero-padded to at least 4 digits; wider sequences
/// keep their natural width.
impl fmt::Display for TrackingNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{:04}-{:04}",
            self.prefix.as_str(),
            self.year,
            self.sequence
        )
    }
}

/// Parses the `PREFIX-YYYY-NNNN` text form.
///
/// Grammar: uppercase prefix letters, exactly 4 year digits, at least 4
/// sequence digits. The prefix must be one of the known codes. Every failure
/// is `TrackingError::InvalidFormat` carrying the offending text.
impl FromStr for TrackingNumber {
    type Err = TrackingError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut parts = text.split('-');
        let (Some(prefix_part), Some(year_part), Some(seq_part), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TrackingError::invalid_format(
                text,
                "expected PREFIX-YYYY-NNNN",
            ));
        };

        if prefix_part.is_empty() || !prefix_part.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(TrackingError::invalid_format(
                text,
                "prefix must be uppercase letters",
            ));
        }
        let prefix = TrackingPrefix::from_code(prefix_part).ok_or_else(|| {
            TrackingError::invalid_format(text, "unknown prefix (expected CL, Q, ORD, or PRD)")
        })?;

        if year_part.len() != 4 || !year_part.chars().all(|c| c.is_ascii_digit()) {
            return Err(TrackingError::invalid_format(
                text,
                "year must be exactly 4 digits",
            ));
        }
        let year: u16 = year_part
            .parse()
            .map_err(|_| TrackingError::invalid_format(text, "year must be exactly 4 digits"))?;

        if seq_part.len() < SEQUENCE_PAD_WIDTH || !seq_part.chars().all(|c| c.is_ascii_digit()) {
            return Err(TrackingError::invalid_format(
                text,
                "sequence must be at least 4 digits",
            ));
        }
        let sequence: u32 = seq_part
            .parse()
            .map_err(|_| TrackingError::invalid_format(text, "sequence out of range"))?;
        if sequence == 0 {
            return Err(TrackingError::invalid_format(
                text,
                "sequence must be positive",
            ));
        }

        Ok(TrackingNumber {
            prefix,
            year,
            sequence,
        })
    }
}

impl From<TrackingNumber> for String {
    fn from(number: TrackingNumber) -> Self {
        number.to_string()
    }
}

impl TryFrom<String> for TrackingNumber {
    type Error = TrackingError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

// =============================================================================
// String Entry Points
// =============================================================================
// Route handlers receive tracking numbers as text (search boxes, URL params).
// These helpers parse first and keep the InvalidFormat failure mode explicit.

/// Derives a sibling number from tracking-number text.
///
/// ## Errors
/// `InvalidFormat` when the input text does not parse.
pub fn derive_sibling(text: &str, target: TrackingPrefix) -> Result<TrackingNumber, TrackingError> {
    let number: TrackingNumber = text.parse()?;
    Ok(number.with_prefix(target))
}

/// Returns all four engagement numbers for tracking-number text.
///
/// ## Errors
/// `InvalidFormat` when the input text does not parse.
pub fn related_set(text: &str) -> Result<EngagementNumbers, TrackingError> {
    let number: TrackingNumber = text.parse()?;
    Ok(number.related_set())
}

/// True iff both texts parse and share the same (year, sequence) pair.
///
/// Malformed input is not an error here: a number that doesn't parse is
/// related to nothing.
pub fn are_related(a: &str, b: &str) -> bool {
    match (a.parse::<TrackingNumber>(), b.parse::<TrackingNumber>()) {
        (Ok(a), Ok(b)) => a.is_related_to(&b),
        _ => false,
    }
}

// =============================================================================
// Engagement Numbers
// =============================================================================

/// The four sibling numbers of one engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementNumbers {
    pub call_log: TrackingNumber,
    pub quote: TrackingNumber,
    pub order: TrackingNumber,
    pub production: TrackingNumber,
}

// =============================================================================
// Tracking Sequence
// =============================================================================

/// The process-wide mint counter for call-log numbers.
///
/// ## Thread Safety
/// The counter is shared mutable state: two concurrent mints must never
/// return the same sequence value. Every mint is an atomic
/// increment-and-read under a `Mutex` — never a read-then-write without the
/// lock. Year rollover happens inside the same critical section, so the
/// reset and the first mint of a new year cannot interleave.
///
/// ## Lifecycle
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Process start                                                          │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  TrackingSequence::seeded(year, last)  ← seed from persisted storage   │
/// │       │                                   (or ::new() to start fresh)  │
/// │       ▼                                                                 │
/// │  mint_call_log() → CL-2026-0042        ← increment-and-read            │
/// │  mint_call_log() → CL-2026-0043                                        │
/// │       │                                                                 │
/// │       ▼  (Jan 1st)                                                      │
/// │  mint_call_log() → CL-2027-0001        ← sequence resets yearly        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Persisting the counter across restarts is the surrounding system's job:
/// read [`TrackingSequence::snapshot`] after minting, store it, and pass it
/// back to [`TrackingSequence::seeded`] at startup.
#[derive(Debug)]
pub struct TrackingSequence {
    state: Mutex<SequenceState>,
}

#[derive(Debug)]
struct SequenceState {
    year: u16,
    last: u32,
}

impl TrackingSequence {
    /// Creates a counter starting fresh in the current year.
    pub fn new() -> Self {
        TrackingSequence::seeded(current_year(), 0)
    }

    /// Creates a counter seeded from persisted state.
    ///
    /// `last` is the last sequence value already issued for `year`; the next
    /// mint in that year returns `last + 1`.
    pub fn seeded(year: u16, last: u32) -> Self {
        TrackingSequence {
            state: Mutex::new(SequenceState { year, last }),
        }
    }

    /// Mints a new call-log number.
    ///
    /// Advances the counter by 1 and returns a number with prefix `CL`, the
    /// current year, and the new counter value. Not idempotent — every call
    /// returns a distinct value.
    pub fn mint_call_log(&self) -> TrackingNumber {
        self.mint_for_year(current_year())
    }

    /// Returns the counter state as `(year, last_issued)` for persistence.
    pub fn snapshot(&self) -> (u16, u32) {
        let state = self.state.lock().expect("Tracking sequence mutex poisoned");
        (state.year, state.last)
    }

    fn mint_for_year(&self, year: u16) -> TrackingNumber {
        let mut state = self.state.lock().expect("Tracking sequence mutex poisoned");
        if state.year != year {
            // Year rollover: numbering restarts at 1. Identifier text cannot
            // collide with the previous year because the year component
            // differs.
            state.year = year;
            state.last = 0;
        }
        state.last += 1;
        TrackingNumber {
            prefix: TrackingPrefix::CallLog,
            year,
            sequence: state.last,
        }
    }
}

impl Default for TrackingSequence {
    fn default() -> Self {
        TrackingSequence::new()
    }
}

/// The current UTC year, as the 4-digit year component.
fn current_year() -> u16 {
    Utc::now().year() as u16
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn number(prefix: TrackingPrefix, year: u16, sequence: u32) -> TrackingNumber {
        TrackingNumber::new(prefix, year, sequence).unwrap()
    }

    #[test]
    fn test_format_pads_to_four_digits() {
        let n = number(TrackingPrefix::Quote, 2024, 7);
        assert_eq!(n.to_string(), "Q-2024-0007");
    }

    #[test]
    fn test_format_wide_sequence_natural_width() {
        let n = number(TrackingPrefix::Quote, 2024, 12345);
        assert_eq!(n.to_string(), "Q-2024-12345");

        let n = number(TrackingPrefix::CallLog, 2024, 10032);
        assert_eq!(n.to_string(), "CL-2024-10032");
    }

    #[test]
    fn test_parse_valid() {
        let n: TrackingNumber = "CL-2026-0042".parse().unwrap();
        assert_eq!(n.prefix(), TrackingPrefix::CallLog);
        assert_eq!(n.year(), 2026);
        assert_eq!(n.sequence(), 42);

        let n: TrackingNumber = "ORD-2026-10032".parse().unwrap();
        assert_eq!(n.prefix(), TrackingPrefix::Order);
        assert_eq!(n.sequence(), 10032);
    }

    #[test]
    fn test_parse_round_trip() {
        let cases = [
            number(TrackingPrefix::CallLog, 2026, 1),
            number(TrackingPrefix::Quote, 2024, 7),
            number(TrackingPrefix::Order, 2025, 9999),
            number(TrackingPrefix::Production, 2026, 10032),
            number(TrackingPrefix::Quote, 2026, 123_456),
        ];
        for original in cases {
            let parsed: TrackingNumber = original.to_string().parse().unwrap();
            assert_eq!(parsed, original);
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let invalid = [
            "Q-24-7",      // 2-digit year, 1-digit sequence
            "q-2024-0007", // lowercase prefix
            "Q20240007",   // missing separators
            "Q-2024-007",  // sequence below minimum width
            "ZZ-2024-0007",   // unknown prefix
            "Q-2024-0000",    // zero sequence
            "Q-2024-0007-X",  // trailing component
            "-2024-0007",     // empty prefix
            "Q-2O24-0007",    // letter in year
            "",
        ];
        for text in invalid {
            let result: Result<TrackingNumber, _> = text.parse();
            assert!(
                matches!(result, Err(TrackingError::InvalidFormat { .. })),
                "expected InvalidFormat for {text:?}"
            );
        }
    }

    #[test]
    fn test_new_rejects_zero_sequence() {
        assert!(TrackingNumber::new(TrackingPrefix::Quote, 2026, 0).is_err());
    }

    #[test]
    fn test_serde_uses_text_form() {
        let n = number(TrackingPrefix::Production, 2026, 42);
        let json = serde_json::to_string(&n).unwrap();
        assert_eq!(json, "\"PRD-2026-0042\"");

        let back: TrackingNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(back, n);

        let bad: Result<TrackingNumber, _> = serde_json::from_str("\"PRD-26-42\"");
        assert!(bad.is_err());
    }

    #[test]
    fn test_with_prefix_keeps_year_and_sequence() {
        let call = number(TrackingPrefix::CallLog, 2026, 42);
        let quote = call.with_prefix(TrackingPrefix::Quote);
        assert_eq!(quote.to_string(), "Q-2026-0042");
        assert_eq!(quote.year(), call.year());
        assert_eq!(quote.sequence(), call.sequence());
    }

    #[test]
    fn test_derive_sibling_from_text() {
        let production = derive_sibling("CL-2026-0042", TrackingPrefix::Production).unwrap();
        assert_eq!(production.to_string(), "PRD-2026-0042");

        let err = derive_sibling("CL-26-42", TrackingPrefix::Production);
        assert!(matches!(err, Err(TrackingError::InvalidFormat { .. })));
    }

    #[test]
    fn test_related_set() {
        let set = related_set("ORD-2026-0042").unwrap();
        assert_eq!(set.call_log.to_string(), "CL-2026-0042");
        assert_eq!(set.quote.to_string(), "Q-2026-0042");
        assert_eq!(set.order.to_string(), "ORD-2026-0042");
        assert_eq!(set.production.to_string(), "PRD-2026-0042");
    }

    #[test]
    fn test_relatedness_symmetric_and_transitive() {
        let call = number(TrackingPrefix::CallLog, 2026, 42);

        // Every derived sibling is related to the original, symmetrically.
        for prefix in TrackingPrefix::ALL {
            let sibling = call.with_prefix(prefix);
            assert!(call.is_related_to(&sibling));
            assert!(sibling.is_related_to(&call));
        }

        // Transitive within one (year, sequence) group.
        let quote = call.with_prefix(TrackingPrefix::Quote);
        let production = call.with_prefix(TrackingPrefix::Production);
        assert!(quote.is_related_to(&production));
    }

    #[test]
    fn test_unrelated_numbers() {
        let a = number(TrackingPrefix::CallLog, 2026, 42);
        assert!(!a.is_related_to(&number(TrackingPrefix::CallLog, 2026, 43)));
        assert!(!a.is_related_to(&number(TrackingPrefix::CallLog, 2025, 42)));

        assert!(are_related("CL-2026-0042", "PRD-2026-0042"));
        assert!(!are_related("CL-2026-0042", "PRD-2025-0042"));
        assert!(!are_related("not-a-number", "PRD-2026-0042"));
        assert!(!are_related("not-a-number", "not-a-number"));
    }

    #[test]
    fn test_mint_starts_at_one() {
        let sequence = TrackingSequence::seeded(2026, 0);
        let first = sequence.mint_for_year(2026);
        assert_eq!(first.to_string(), "CL-2026-0001");
        assert_eq!(first.prefix(), TrackingPrefix::CallLog);
    }

    #[test]
    fn test_mint_resumes_from_seed() {
        let sequence = TrackingSequence::seeded(2026, 41);
        assert_eq!(sequence.mint_for_year(2026).sequence(), 42);
        assert_eq!(sequence.mint_for_year(2026).sequence(), 43);
        assert_eq!(sequence.snapshot(), (2026, 43));
    }

    #[test]
    fn test_mint_resets_on_year_rollover() {
        let sequence = TrackingSequence::seeded(2026, 812);
        assert_eq!(sequence.mint_for_year(2026).sequence(), 813);

        let first_of_year = sequence.mint_for_year(2027);
        assert_eq!(first_of_year.to_string(), "CL-2027-0001");
        assert_eq!(sequence.snapshot(), (2027, 1));
    }

    #[test]
    fn test_concurrent_mints_are_distinct() {
        const THREADS: usize = 8;
        const MINTS_PER_THREAD: usize = 50;

        let sequence = TrackingSequence::seeded(2026, 0);

        let minted: Vec<TrackingNumber> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    scope.spawn(|| {
                        (0..MINTS_PER_THREAD)
                            .map(|_| sequence.mint_for_year(2026))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|h| h.join().expect("mint thread panicked"))
                .collect()
        });

        let distinct: HashSet<u32> = minted.iter().map(|n| n.sequence()).collect();
        assert_eq!(distinct.len(), THREADS * MINTS_PER_THREAD);
        assert_eq!(sequence.snapshot(), (2026, (THREADS * MINTS_PER_THREAD) as u32));
    }
}
