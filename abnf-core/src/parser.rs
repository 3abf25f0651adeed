//! The mutually-recursive structural advancers.
//!
//! This is a PEG-style recognizer: ordered choice, first match wins, and
//! every advancer either commits the cursor past its production or leaves
//! it untouched. Each advancer works on a local cursor copy and writes
//! back through [`commit`] only on full success, so speculative branches
//! roll back for free.
//!
//! Grammar per RFC 5234 section 4, with two deliberate departures:
//!
//! - comments accept any byte before the terminator, and the terminator
//!   may be CRLF, LF, or CR unless [`ParsePolicy::strict_crlf`] is set;
//! - a lone `n` repeat prefix means exactly `n` (`n*` is the unbounded
//!   form).

use crate::core_rules::{
    advance_bit_chars, advance_digit_chars, advance_hexdigit_chars, advance_linear_whitespace,
    advance_newline, advance_whitespace_char, is_alpha_char, is_bit_char, is_cr_char,
    is_digit_char, is_dquote_char, is_hexdigit_char, is_lf_char, is_prose_value_char,
    is_space_char, is_visible_char,
};
use crate::cursor::{commit, Cursor, ParsePolicy};
use crate::observer::{
    CommentObserver, ConfigObserver, DefinedAs, ErrorCode, ErrorObserver, LeafObserver,
    NumberFlag, Observer, RepetitionObserver,
};
use crate::repeat::{advance_repeated, to_decimal, RepeatRange, UNBOUNDED};
use crate::span::{Location, Span};

// ========== Leaf advancers ==========

/// Advance past a prose value, emitting `prose` on the bracketed text.
///
/// ```text
/// prose-val = "<" *(%x20-3D / %x3F-7E) ">"
/// ```
///
/// An unterminated bracket fails silently; prose is the last resort of
/// the element choice and reports no diagnostic of its own.
pub fn advance_prose<'a, O: LeafObserver>(pos: &mut Cursor<'a>, ctx: &mut O) -> bool {
    let mut p = *pos;
    if p.peek() != Some(b'<') {
        return false;
    }
    p.bump();
    let body = p;
    while p.peek().is_some_and(is_prose_value_char) {
        p.bump();
    }
    if p.peek() != Some(b'>') {
        return false;
    }
    let success = ctx.prose(p.slice_from(&body), p.span_from(&body));
    p.bump();
    success && commit(pos, p)
}

/// Advance past a numeric value.
///
/// ```text
/// num-val = "%" (bin-val / dec-val / hex-val)
/// bin-val = "b" 1*BIT    [ 1*("." 1*BIT)    / ("-" 1*BIT)    ]
/// dec-val = "d" 1*DIGIT  [ 1*("." 1*DIGIT)  / ("-" 1*DIGIT)  ]
/// hex-val = "x" 1*HEXDIG [ 1*("." 1*HEXDIG) / ("-" 1*HEXDIG) ]
/// ```
///
/// The first run always emits `first_number`. A `-` range emits its
/// second run as `last_number`; a dotted sequence emits each extra run
/// as `next_number` and closes with an empty `last_number`, as does a
/// lone run.
pub fn advance_number<'a, O: LeafObserver>(pos: &mut Cursor<'a>, ctx: &mut O) -> bool {
    let mut p = *pos;
    if p.peek() != Some(b'%') {
        return false;
    }
    p.bump();

    type DigitFn = fn(u8) -> bool;
    type RunFn = for<'b> fn(&mut Cursor<'b>) -> bool;
    let (flag, is_digit, advance_run): (NumberFlag, DigitFn, RunFn) = match p.peek() {
        Some(b'x') => (NumberFlag::Hexadecimal, is_hexdigit_char, advance_hexdigit_chars),
        Some(b'd') => (NumberFlag::Decimal, is_digit_char, advance_digit_chars),
        Some(b'b') => (NumberFlag::Binary, is_bit_char, advance_bit_chars),
        _ => return false,
    };
    p.bump();

    let run = p;
    if !advance_run(&mut p) {
        return false;
    }
    let mut success = ctx.first_number(flag, p.slice_from(&run), p.span_from(&run));

    match p.peek() {
        Some(b'-') => {
            p.bump();
            if !p.peek().is_some_and(is_digit) {
                return false;
            }
            let run = p;
            advance_run(&mut p);
            success = success && ctx.last_number(flag, p.slice_from(&run), p.span_from(&run));
        }
        Some(b'.') => {
            while p.peek() == Some(b'.') {
                p.bump();
                if !p.peek().is_some_and(is_digit) {
                    return false;
                }
                let run = p;
                advance_run(&mut p);
                success = success && ctx.next_number(flag, p.slice_from(&run), p.span_from(&run));
            }
            success = success && ctx.last_number(flag, p.slice_from(&p), p.span_from(&p));
        }
        _ => {
            success = success && ctx.last_number(flag, p.slice_from(&p), p.span_from(&p));
        }
    }

    success && commit(pos, p)
}

/// Advance past a quoted string, emitting `quoted_string` on the content
/// between the quotes.
///
/// ```text
/// char-val = DQUOTE *(%x20-21 / %x23-7E) DQUOTE
/// ```
///
/// Reports `UnbalancedQuote` when the line or input ends before the
/// closing quote, `BadQuotedChar` on a byte outside the allowed range,
/// and `MaxLengthExceeded` when the observer's limit is passed.
pub fn advance_quoted_string<'a, O>(pos: &mut Cursor<'a>, ctx: &mut O) -> bool
where
    O: LeafObserver + ConfigObserver + ErrorObserver,
{
    let mut p = *pos;
    if !p.peek().is_some_and(is_dquote_char) {
        return false;
    }
    p.bump();
    let body = p;

    let max_length = match ctx.max_quoted_string_length() {
        0 => usize::MAX,
        n => n,
    };
    let mut length = 0usize;

    loop {
        match p.peek() {
            None => {
                ctx.error(ErrorCode::UnbalancedQuote, body.location());
                return false;
            }
            Some(b) if is_dquote_char(b) => break,
            Some(b) if is_cr_char(b) || is_lf_char(b) => {
                ctx.error(ErrorCode::UnbalancedQuote, body.location());
                return false;
            }
            Some(b) if !(is_visible_char(b) || is_space_char(b)) => {
                ctx.error(ErrorCode::BadQuotedChar, p.location());
                return false;
            }
            Some(_) => {
                if length == max_length {
                    ctx.error(ErrorCode::MaxLengthExceeded, body.location());
                    return false;
                }
                length += 1;
                p.bump();
            }
        }
    }

    let success = ctx.quoted_string(p.slice_from(&body), p.span_from(&body));
    p.bump(); // closing quote
    success && commit(pos, p)
}

/// Advance past a repeat prefix, emitting `repeat(low, high)`.
///
/// ```text
/// repeat = 1*DIGIT / (*DIGIT "*" *DIGIT)
/// ```
///
/// `n` alone is the exact bound `(n, n)`; `n*`, `*m`, `*`, and `n*m`
/// produce `(n, UNBOUNDED)`, `(0, m)`, `(0, UNBOUNDED)`, and `(n, m)`.
/// Reports `BadRepeatRange` on numeric overflow or `low > high`.
pub fn advance_repeat<'a, O>(pos: &mut Cursor<'a>, ctx: &mut O) -> bool
where
    O: RepetitionObserver + ErrorObserver,
{
    let mut p = *pos;
    let from_start = p;
    advance_digit_chars(&mut p);
    let from_end = p;

    let mut to_run = None;
    if p.peek() == Some(b'*') {
        p.bump();
        let to_start = p;
        advance_digit_chars(&mut p);
        to_run = Some((to_start, p));
    }

    // Neither digits nor a star: not a repeat prefix at all.
    if p.offset() == pos.offset() {
        return false;
    }

    let (low, low_ok) = to_decimal(from_end.slice_from(&from_start));
    if !low_ok {
        ctx.error(ErrorCode::BadRepeatRange, from_start.location());
        return false;
    }

    let high = match to_run {
        Some((to_start, to_end)) => {
            if to_start.offset() == to_end.offset() {
                UNBOUNDED
            } else {
                let (high, high_ok) = to_decimal(to_end.slice_from(&to_start));
                if !high_ok {
                    ctx.error(ErrorCode::BadRepeatRange, to_start.location());
                    return false;
                }
                high
            }
        }
        None => low,
    };

    if low > high {
        ctx.error(ErrorCode::BadRepeatRange, from_start.location());
        return false;
    }

    ctx.repeat(low, high) && commit(pos, p)
}

// Shared by advance_rulename() and advance_rule().
fn advance_rulename_chars(pos: &mut Cursor<'_>) -> bool {
    let mut p = *pos;
    if !p.peek().is_some_and(is_alpha_char) {
        return false;
    }
    p.bump();
    while p
        .peek()
        .is_some_and(|b| is_alpha_char(b) || is_digit_char(b) || b == b'-')
    {
        p.bump();
    }
    commit(pos, p)
}

/// Advance past a rule name, emitting `rulename` on the verbatim span.
///
/// ```text
/// rulename = ALPHA *(ALPHA / DIGIT / "-")
/// ```
///
/// Comparison semantics (case-insensitive per RFC 5234) are the
/// observer's business; the parser reports the spelling as written.
pub fn advance_rulename<'a, O: LeafObserver>(pos: &mut Cursor<'a>, ctx: &mut O) -> bool {
    let mut p = *pos;
    if !advance_rulename_chars(&mut p) {
        return false;
    }
    let success = ctx.rulename(p.slice_from(pos), p.span_from(pos));
    success && commit(pos, p)
}

/// Advance past a comment, emitting `comment` on the body text.
///
/// ```text
/// comment = ";" *(any byte but CR or LF) newline
/// ```
///
/// Relaxed from RFC 5234's `";" *(WSP / VCHAR) CRLF`: the body accepts
/// arbitrary non-terminator bytes, and the terminator follows the cursor
/// policy. A comment at end of input needs no terminator.
pub fn advance_comment<'a, O: CommentObserver>(pos: &mut Cursor<'a>, ctx: &mut O) -> bool {
    let mut p = *pos;
    match scan_comment(&mut p) {
        Some((text, span)) => {
            ctx.comment(text, span);
            commit(pos, p)
        }
        None => false,
    }
}

// Consume a comment without reporting it. The c-wsp lookahead uses this
// so that a comment probed by a failing unit is not reported twice.
fn scan_comment<'a>(p: &mut Cursor<'a>) -> Option<(&'a [u8], Span)> {
    if p.peek() != Some(b';') {
        return None;
    }
    p.bump();
    let body = *p;
    p.skip_to_line_end();
    let (text, span) = (p.slice_from(&body), p.span_from(&body));
    if !p.is_eof() && !advance_newline(p) {
        return None;
    }
    Some((text, span))
}

/// Advance past a comment or a bare newline.
///
/// ```text
/// c-nl = comment / CRLF
/// ```
pub fn advance_comment_newline<'a, O: CommentObserver>(pos: &mut Cursor<'a>, ctx: &mut O) -> bool {
    advance_newline(pos) || advance_comment(pos, ctx)
}

/// Advance past one c-wsp unit.
///
/// ```text
/// c-wsp = WSP / (c-nl WSP)
/// ```
///
/// A comment consumed here is reported only when the whole unit lands,
/// so the same comment is not reported again by a later c-nl.
pub fn advance_comment_whitespace<'a, O: CommentObserver>(
    pos: &mut Cursor<'a>,
    ctx: &mut O,
) -> bool {
    let mut p = *pos;
    if advance_whitespace_char(&mut p) {
        return commit(pos, p);
    }
    let mut comment = None;
    if !advance_newline(&mut p) {
        comment = scan_comment(&mut p);
        if comment.is_none() {
            return false;
        }
    }
    if !advance_whitespace_char(&mut p) {
        return false;
    }
    if let Some((text, span)) = comment {
        ctx.comment(text, span);
    }
    commit(pos, p)
}

/// `*c-wsp`
fn skip_comment_whitespace<'a, O: CommentObserver>(pos: &mut Cursor<'a>, ctx: &mut O) {
    while advance_comment_whitespace(pos, ctx) {}
}

/// Advance past a defined-as marker, distinguishing a basic definition
/// from an incremental alternative.
///
/// ```text
/// defined-as = *c-wsp ("=" / "=/") *c-wsp
/// ```
pub fn advance_defined_as<'a, O: CommentObserver>(
    pos: &mut Cursor<'a>,
    ctx: &mut O,
) -> Option<DefinedAs> {
    let mut p = *pos;
    skip_comment_whitespace(&mut p, ctx);
    if p.peek() != Some(b'=') {
        return None;
    }
    p.bump();
    let defined = if p.peek() == Some(b'/') {
        p.bump();
        DefinedAs::Incremental
    } else {
        DefinedAs::Basic
    };
    skip_comment_whitespace(&mut p, ctx);
    commit(pos, p);
    Some(defined)
}

// ========== Structural advancers ==========

/// Advance past one element. Ordered choice, first match wins.
///
/// ```text
/// element = rulename / group / option / num-val / char-val / prose-val
/// ```
pub fn advance_element<'a, O: Observer>(pos: &mut Cursor<'a>, ctx: &mut O) -> bool {
    advance_rulename(pos, ctx)
        || advance_group(pos, ctx)
        || advance_option(pos, ctx)
        || advance_number(pos, ctx)
        || advance_quoted_string(pos, ctx)
        || advance_prose(pos, ctx)
}

/// Advance past a repetition, bracketing the attempt with
/// `begin_repetition` / `end_repetition(success)`.
///
/// ```text
/// repetition = [repeat] element
/// ```
pub fn advance_repetition<'a, O: Observer>(pos: &mut Cursor<'a>, ctx: &mut O) -> bool {
    if pos.is_eof() {
        return false;
    }
    let mut p = *pos;
    let mut success = ctx.begin_repetition();
    if success {
        advance_repeat(&mut p, ctx);
        success = advance_element(&mut p, ctx);
    }
    success = ctx.end_repetition(success) && success;
    success && commit(pos, p)
}

/// Advance past a concatenation, bracketing with `begin_concatenation` /
/// `end_concatenation(success)`.
///
/// ```text
/// concatenation = repetition *(1*c-wsp repetition)
/// ```
pub fn advance_concatenation<'a, O: Observer>(pos: &mut Cursor<'a>, ctx: &mut O) -> bool {
    if pos.is_eof() {
        return false;
    }
    let mut p = *pos;
    let mut success = ctx.begin_concatenation();
    success = success && advance_repetition(&mut p, ctx);
    success = success
        && advance_repeated(&mut p, RepeatRange::any(), |q| {
            let mut r = *q;
            if !advance_repeated(&mut r, RepeatRange::at_least(1), |s| {
                advance_comment_whitespace(s, ctx)
            }) {
                return false;
            }
            if !advance_repetition(&mut r, ctx) {
                return false;
            }
            commit(q, r)
        });
    success = ctx.end_concatenation(success) && success;
    success && commit(pos, p)
}

/// Advance past an alternation, bracketing with `begin_alternation` /
/// `end_alternation(success)`.
///
/// ```text
/// alternation = concatenation *(*c-wsp "/" *c-wsp concatenation)
/// ```
pub fn advance_alternation<'a, O: Observer>(pos: &mut Cursor<'a>, ctx: &mut O) -> bool {
    if pos.is_eof() {
        return false;
    }
    let mut p = *pos;
    let mut success = ctx.begin_alternation();
    success = success && advance_concatenation(&mut p, ctx);
    success = success
        && advance_repeated(&mut p, RepeatRange::any(), |q| {
            let mut r = *q;
            skip_comment_whitespace(&mut r, ctx);
            if r.peek() != Some(b'/') {
                return false;
            }
            r.bump();
            skip_comment_whitespace(&mut r, ctx);
            if !advance_concatenation(&mut r, ctx) {
                return false;
            }
            commit(q, r)
        });
    success = ctx.end_alternation(success) && success;
    success && commit(pos, p)
}

// group  = "(" *c-wsp alternation *c-wsp ")"
// option = "[" *c-wsp alternation *c-wsp "]"
fn advance_bracketed<'a, O: Observer>(pos: &mut Cursor<'a>, close: u8, ctx: &mut O) -> bool {
    let mut p = *pos;
    p.bump(); // opening bracket, checked by the caller
    skip_comment_whitespace(&mut p, ctx);
    if !advance_alternation(&mut p, ctx) {
        return false;
    }
    skip_comment_whitespace(&mut p, ctx);
    if p.peek() != Some(close) {
        return false;
    }
    p.bump();
    commit(pos, p)
}

/// Advance past a parenthesized group, bracketing with `begin_group` /
/// `end_group(success)`.
pub fn advance_group<'a, O: Observer>(pos: &mut Cursor<'a>, ctx: &mut O) -> bool {
    if pos.peek() != Some(b'(') {
        return false;
    }
    let mut p = *pos;
    let mut success = ctx.begin_group();
    success = success && advance_bracketed(&mut p, b')', ctx);
    success = ctx.end_group(success) && success;
    success && commit(pos, p)
}

/// Advance past an optional group, bracketing with `begin_option` /
/// `end_option(success)`.
pub fn advance_option<'a, O: Observer>(pos: &mut Cursor<'a>, ctx: &mut O) -> bool {
    if pos.peek() != Some(b'[') {
        return false;
    }
    let mut p = *pos;
    let mut success = ctx.begin_option();
    success = success && advance_bracketed(&mut p, b']', ctx);
    success = ctx.end_option(success) && success;
    success && commit(pos, p)
}

/// Advance past a rule's right-hand side.
///
/// ```text
/// elements = alternation *c-wsp
/// ```
pub fn advance_elements<'a, O: Observer>(pos: &mut Cursor<'a>, ctx: &mut O) -> bool {
    let mut p = *pos;
    if !advance_alternation(&mut p, ctx) {
        return false;
    }
    skip_comment_whitespace(&mut p, ctx);
    commit(pos, p)
}

/// Advance past a complete rule.
///
/// ```text
/// rule = rulename defined-as elements c-nl *LWSP
/// ```
///
/// `begin_rule` fires once the name and defined-as marker are in hand;
/// on success exactly one of `accept_basic_rule_definition` /
/// `accept_incremental_alternatives` fires before `end_rule`. The
/// terminator is optional at end of input, and trailing LWSP (including
/// white-space-led continuation lines) belongs to the rule.
pub fn advance_rule<'a, O: Observer>(pos: &mut Cursor<'a>, ctx: &mut O) -> bool {
    if pos.is_eof() {
        return false;
    }
    let mut p = *pos;

    let name_start = p;
    if !advance_rulename_chars(&mut p) {
        return false;
    }
    let name_end = p;

    let Some(defined) = advance_defined_as(&mut p, ctx) else {
        return false;
    };

    let name = name_end.slice_from(&name_start);
    let span = name_end.span_from(&name_start);
    let incremental = defined.is_incremental();

    let mut success = ctx.begin_rule(name, span, incremental);
    success = success && advance_elements(&mut p, ctx);
    if success && !p.is_eof() {
        success = advance_comment_newline(&mut p, ctx);
    }
    while success && advance_linear_whitespace(&mut p) {}

    if success {
        match defined {
            DefinedAs::Basic => ctx.accept_basic_rule_definition(),
            DefinedAs::Incremental => ctx.accept_incremental_alternatives(),
        }
    }
    success = ctx.end_rule(name, span, incremental, success) && success;
    success && commit(pos, p)
}

/// Advance past a rulelist, bracketing with `begin_document` /
/// `end_document(success)`.
///
/// ```text
/// rulelist = 1*(rule / (*c-wsp c-nl))
/// ```
///
/// At least one rule or blank/comment line must be consumed; anything
/// the rulelist cannot parse is left for the caller, with the cursor at
/// the last consumed byte.
pub fn advance_rulelist<'a, O: Observer>(pos: &mut Cursor<'a>, ctx: &mut O) -> bool {
    let mut success = ctx.begin_document();
    success = success
        && advance_repeated(pos, RepeatRange::at_least(1), |p| {
            let mut q = *p;
            if !advance_rule(&mut q, ctx) {
                skip_comment_whitespace(&mut q, ctx);
                if !q.is_eof() && !advance_comment_newline(&mut q, ctx) {
                    return false;
                }
            }
            commit(p, q)
        });
    success = ctx.end_document(success) && success;
    success
}

// ========== Facade ==========

/// One-shot parser over an in-memory buffer.
///
/// Thin wrapper tying an input, a [`ParsePolicy`], and the rulelist entry
/// point together. The free `advance_*` functions stay available for
/// callers that want to parse a fragment.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Parser {
            cursor: Cursor::new(input),
        }
    }

    pub fn with_policy(input: &'a [u8], policy: ParsePolicy) -> Self {
        Parser {
            cursor: Cursor::with_policy(input, policy),
        }
    }

    /// Parse a rulelist, delivering events to `ctx`.
    ///
    /// Returns whether a document was accepted. The cursor stops at the
    /// last consumed byte, so a `true` result with [`Parser::at_end`]
    /// still false means trailing input the grammar could not absorb.
    pub fn parse<O: Observer>(&mut self, ctx: &mut O) -> bool {
        advance_rulelist(&mut self.cursor, ctx)
    }

    /// The cursor in its current state.
    pub fn cursor(&self) -> Cursor<'a> {
        self.cursor
    }

    /// Current position, for error reporting after a partial parse.
    pub fn location(&self) -> Location {
        self.cursor.location()
    }

    /// Whether the whole input was consumed.
    pub fn at_end(&self) -> bool {
        self.cursor.is_eof()
    }
}
