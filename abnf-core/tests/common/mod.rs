//! Shared test support: an observer that records every event.

// Not every test binary uses every helper.
#![allow(dead_code)]

use abnf_core::observer::{
    AlternationObserver, CommentObserver, ConcatenationObserver, ConfigObserver, DocumentObserver,
    ErrorObserver, GroupObserver, LeafObserver, RepetitionObserver, RuleObserver,
};
use abnf_core::{ErrorCode, Location, NumberFlag, Parser, Span};

/// Simplified owned event for comparison (spans dropped, text copied).
#[derive(Debug, Clone, PartialEq)]
pub enum Ev {
    BeginDocument,
    EndDocument(bool),
    BeginRule { name: String, incremental: bool },
    EndRule { name: String, incremental: bool, success: bool },
    AcceptBasic,
    AcceptIncremental,
    BeginAlternation,
    EndAlternation(bool),
    BeginConcatenation,
    EndConcatenation(bool),
    BeginRepetition,
    EndRepetition(bool),
    Repeat { low: i64, high: i64 },
    BeginGroup,
    EndGroup(bool),
    BeginOption,
    EndOption(bool),
    Rulename(String),
    QuotedString(String),
    Prose(String),
    FirstNumber { flag: NumberFlag, text: String },
    NextNumber { flag: NumberFlag, text: String },
    LastNumber { flag: NumberFlag, text: String },
    Comment(String),
    Error { code: ErrorCode, line: u32, column: u32 },
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Observer that records events in arrival order.
///
/// `veto_at` makes the callback that records the event at that index
/// return `false`, for cancellation tests. `max_quoted` feeds the
/// quoted-string length limit.
#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Ev>,
    pub max_quoted: usize,
    pub veto_at: Option<usize>,
}

impl Recorder {
    pub fn vetoing_at(index: usize) -> Self {
        Recorder {
            veto_at: Some(index),
            ..Recorder::default()
        }
    }

    fn record(&mut self, ev: Ev) -> bool {
        self.events.push(ev);
        self.veto_at != Some(self.events.len() - 1)
    }
}

impl DocumentObserver for Recorder {
    fn begin_document(&mut self) -> bool {
        self.record(Ev::BeginDocument)
    }
    fn end_document(&mut self, success: bool) -> bool {
        self.record(Ev::EndDocument(success))
    }
}

impl RuleObserver for Recorder {
    fn begin_rule(&mut self, name: &[u8], _span: Span, incremental: bool) -> bool {
        self.record(Ev::BeginRule {
            name: text(name),
            incremental,
        })
    }
    fn end_rule(&mut self, name: &[u8], _span: Span, incremental: bool, success: bool) -> bool {
        self.record(Ev::EndRule {
            name: text(name),
            incremental,
            success,
        })
    }
    fn accept_basic_rule_definition(&mut self) {
        self.record(Ev::AcceptBasic);
    }
    fn accept_incremental_alternatives(&mut self) {
        self.record(Ev::AcceptIncremental);
    }
}

impl AlternationObserver for Recorder {
    fn begin_alternation(&mut self) -> bool {
        self.record(Ev::BeginAlternation)
    }
    fn end_alternation(&mut self, success: bool) -> bool {
        self.record(Ev::EndAlternation(success))
    }
}

impl ConcatenationObserver for Recorder {
    fn begin_concatenation(&mut self) -> bool {
        self.record(Ev::BeginConcatenation)
    }
    fn end_concatenation(&mut self, success: bool) -> bool {
        self.record(Ev::EndConcatenation(success))
    }
}

impl RepetitionObserver for Recorder {
    fn begin_repetition(&mut self) -> bool {
        self.record(Ev::BeginRepetition)
    }
    fn end_repetition(&mut self, success: bool) -> bool {
        self.record(Ev::EndRepetition(success))
    }
    fn repeat(&mut self, low: i64, high: i64) -> bool {
        self.record(Ev::Repeat { low, high })
    }
}

impl GroupObserver for Recorder {
    fn begin_group(&mut self) -> bool {
        self.record(Ev::BeginGroup)
    }
    fn end_group(&mut self, success: bool) -> bool {
        self.record(Ev::EndGroup(success))
    }
    fn begin_option(&mut self) -> bool {
        self.record(Ev::BeginOption)
    }
    fn end_option(&mut self, success: bool) -> bool {
        self.record(Ev::EndOption(success))
    }
}

impl LeafObserver for Recorder {
    fn rulename(&mut self, name: &[u8], _span: Span) -> bool {
        self.record(Ev::Rulename(text(name)))
    }
    fn quoted_string(&mut self, s: &[u8], _span: Span) -> bool {
        self.record(Ev::QuotedString(text(s)))
    }
    fn prose(&mut self, s: &[u8], _span: Span) -> bool {
        self.record(Ev::Prose(text(s)))
    }
    fn first_number(&mut self, flag: NumberFlag, s: &[u8], _span: Span) -> bool {
        self.record(Ev::FirstNumber {
            flag,
            text: text(s),
        })
    }
    fn next_number(&mut self, flag: NumberFlag, s: &[u8], _span: Span) -> bool {
        self.record(Ev::NextNumber {
            flag,
            text: text(s),
        })
    }
    fn last_number(&mut self, flag: NumberFlag, s: &[u8], _span: Span) -> bool {
        self.record(Ev::LastNumber {
            flag,
            text: text(s),
        })
    }
}

impl CommentObserver for Recorder {
    fn comment(&mut self, s: &[u8], _span: Span) {
        self.record(Ev::Comment(text(s)));
    }
}

impl ConfigObserver for Recorder {
    fn max_quoted_string_length(&self) -> usize {
        self.max_quoted
    }
}

impl ErrorObserver for Recorder {
    fn error(&mut self, code: ErrorCode, at: Location) {
        self.record(Ev::Error {
            code,
            line: at.line,
            column: at.column,
        });
    }
}

/// Parse `input` and return the verdict with the recorded events.
pub fn parse(input: &[u8]) -> (bool, Vec<Ev>) {
    let mut recorder = Recorder::default();
    let accepted = Parser::new(input).parse(&mut recorder);
    (accepted, recorder.events)
}
