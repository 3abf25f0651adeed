//! The observer contract: structural events, vetoes, and the error model.
//!
//! The observer is the parser's only output channel. Events arrive in
//! strict source order and begin/end pairs nest strictly; for every
//! `begin_*` the matching `end_*` fires even when the production fails,
//! carrying `success = false`.
//!
//! Each production family has its own trait with default no-op methods,
//! so a caller driving a single fragment advancer implements only the
//! family it cares about. [`Observer`] composes all of them for the
//! mutually-recursive structural advancers.
//!
//! Callbacks returning `bool` may veto: returning `false` makes the
//! current advancer fail as if the production had not matched, and the
//! failure cascades upward, closing every open bracket with
//! `success = false`. End callbacks receive the computed success and may
//! additionally force failure; both verdicts are ANDed.

use crate::span::{Location, Span};

/// Radix tag for numeric literals: `%b...`, `%d...`, `%x...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFlag {
    Unspecified,
    Binary,
    Decimal,
    Hexadecimal,
}

/// How a rule was defined: `=` or `=/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinedAs {
    /// Basic rule definition (`=`).
    Basic,
    /// Incremental alternatives for an existing rule (`=/`).
    Incremental,
}

impl DefinedAs {
    #[inline]
    pub fn is_incremental(self) -> bool {
        matches!(self, DefinedAs::Incremental)
    }
}

/// Diagnostic codes reported through [`ErrorObserver::error`].
///
/// Errors are reported, never thrown: after the callback the advancer
/// returns failure and the recursion unwinds through the normal
/// success/failure channel. Backtracking can report the same mistake from
/// several branches; observers that want one diagnostic can dedupe by
/// `(code, location)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorCode {
    /// Opening quote with no closing quote before end of line or input.
    UnbalancedQuote = 0,
    /// Byte outside `%x20-21 / %x23-7E` inside a quoted string.
    BadQuotedChar,
    /// Quoted string longer than the observer-supplied limit.
    MaxLengthExceeded,
    /// Repeat bounds that overflow, or a lower bound above the upper.
    BadRepeatRange,
}

impl ErrorCode {
    /// Human-readable message for this error code.
    pub fn message(self) -> &'static str {
        match self {
            Self::UnbalancedQuote => "unbalanced quote",
            Self::BadQuotedChar => "bad quoted character",
            Self::MaxLengthExceeded => "max quoted string length exceeded",
            Self::BadRepeatRange => "bad repeat range",
        }
    }
}

// ========== Per-family observer traits ==========

/// Document (rulelist) bracket events.
pub trait DocumentObserver {
    fn begin_document(&mut self) -> bool {
        true
    }
    fn end_document(&mut self, success: bool) -> bool {
        let _ = success;
        true
    }
}

/// Rule bracket events and definition acceptance.
///
/// Exactly one of `accept_basic_rule_definition` /
/// `accept_incremental_alternatives` fires between `begin_rule` and an
/// `end_rule` carrying `success = true`, matching the `incremental` flag.
pub trait RuleObserver {
    fn begin_rule(&mut self, name: &[u8], span: Span, incremental: bool) -> bool {
        let _ = (name, span, incremental);
        true
    }
    fn end_rule(&mut self, name: &[u8], span: Span, incremental: bool, success: bool) -> bool {
        let _ = (name, span, incremental, success);
        true
    }
    fn accept_basic_rule_definition(&mut self) {}
    fn accept_incremental_alternatives(&mut self) {}
}

/// Alternation bracket events.
pub trait AlternationObserver {
    fn begin_alternation(&mut self) -> bool {
        true
    }
    fn end_alternation(&mut self, success: bool) -> bool {
        let _ = success;
        true
    }
}

/// Concatenation bracket events.
pub trait ConcatenationObserver {
    fn begin_concatenation(&mut self) -> bool {
        true
    }
    fn end_concatenation(&mut self, success: bool) -> bool {
        let _ = success;
        true
    }
}

/// Repetition bracket events and repeat bounds.
pub trait RepetitionObserver {
    fn begin_repetition(&mut self) -> bool {
        true
    }
    fn end_repetition(&mut self, success: bool) -> bool {
        let _ = success;
        true
    }
    /// Bounds of a `repeat` prefix; `high` is [`UNBOUNDED`] for `n*`.
    ///
    /// [`UNBOUNDED`]: crate::repeat::UNBOUNDED
    fn repeat(&mut self, low: i64, high: i64) -> bool {
        let _ = (low, high);
        true
    }
}

/// Group (`(...)`) and option (`[...]`) bracket events.
pub trait GroupObserver {
    fn begin_group(&mut self) -> bool {
        true
    }
    fn end_group(&mut self, success: bool) -> bool {
        let _ = success;
        true
    }
    fn begin_option(&mut self) -> bool {
        true
    }
    fn end_option(&mut self, success: bool) -> bool {
        let _ = success;
        true
    }
}

/// Leaf value events: rulenames, quoted strings, prose, numeric values.
///
/// The slices borrow from the input for the duration of the call; the
/// spans are plain values an observer can store and re-slice with later.
pub trait LeafObserver {
    fn rulename(&mut self, name: &[u8], span: Span) -> bool {
        let _ = (name, span);
        true
    }
    fn quoted_string(&mut self, text: &[u8], span: Span) -> bool {
        let _ = (text, span);
        true
    }
    fn prose(&mut self, text: &[u8], span: Span) -> bool {
        let _ = (text, span);
        true
    }
    /// First run of a numeric value (`%x41...`). Always fires once per
    /// recognized num-val.
    fn first_number(&mut self, flag: NumberFlag, text: &[u8], span: Span) -> bool {
        let _ = (flag, text, span);
        true
    }
    /// One `"." run` continuation of a dotted numeric sequence.
    fn next_number(&mut self, flag: NumberFlag, text: &[u8], span: Span) -> bool {
        let _ = (flag, text, span);
        true
    }
    /// Closes a numeric value. Carries the second run of a `-` range;
    /// for lone and dotted values the span is empty, anchored at the end.
    fn last_number(&mut self, flag: NumberFlag, text: &[u8], span: Span) -> bool {
        let _ = (flag, text, span);
        true
    }
}

/// Comment events. Not vetoable.
pub trait CommentObserver {
    fn comment(&mut self, text: &[u8], span: Span) {
        let _ = (text, span);
    }
}

/// Observer-supplied limits.
pub trait ConfigObserver {
    /// Maximum accepted quoted-string length; 0 means no limit.
    fn max_quoted_string_length(&self) -> usize {
        0
    }
}

/// Diagnostic channel.
pub trait ErrorObserver {
    fn error(&mut self, code: ErrorCode, at: Location) {
        let _ = (code, at);
    }
}

/// Everything the mutually-recursive structural advancers need.
///
/// Blanket-implemented for any type implementing all the family traits.
pub trait Observer:
    DocumentObserver
    + RuleObserver
    + AlternationObserver
    + ConcatenationObserver
    + RepetitionObserver
    + GroupObserver
    + LeafObserver
    + CommentObserver
    + ConfigObserver
    + ErrorObserver
{
}

impl<T> Observer for T where
    T: DocumentObserver
        + RuleObserver
        + AlternationObserver
        + ConcatenationObserver
        + RepetitionObserver
        + GroupObserver
        + LeafObserver
        + CommentObserver
        + ConfigObserver
        + ErrorObserver
{
}
