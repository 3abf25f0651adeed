//! Parse the RFC 3986 grammar and report what was found.
//!
//! Run with: cargo run --example count_rules

use abnf_core::observer::{
    AlternationObserver, CommentObserver, ConcatenationObserver, ConfigObserver, DocumentObserver,
    ErrorObserver, GroupObserver, LeafObserver, RepetitionObserver, RuleObserver,
};
use abnf_core::{ErrorCode, Location, Parser, Span};

#[derive(Default)]
struct GrammarStats {
    basic_rules: usize,
    incremental_rules: usize,
    rulename_refs: usize,
    comments: usize,
    last_error: Option<(ErrorCode, Location)>,
}

impl RuleObserver for GrammarStats {
    fn accept_basic_rule_definition(&mut self) {
        self.basic_rules += 1;
    }
    fn accept_incremental_alternatives(&mut self) {
        self.incremental_rules += 1;
    }
}

impl LeafObserver for GrammarStats {
    fn rulename(&mut self, _name: &[u8], _span: Span) -> bool {
        self.rulename_refs += 1;
        true
    }
}

impl CommentObserver for GrammarStats {
    fn comment(&mut self, _text: &[u8], _span: Span) {
        self.comments += 1;
    }
}

impl ErrorObserver for GrammarStats {
    fn error(&mut self, code: ErrorCode, at: Location) {
        self.last_error = Some((code, at));
    }
}

impl DocumentObserver for GrammarStats {}
impl AlternationObserver for GrammarStats {}
impl ConcatenationObserver for GrammarStats {}
impl RepetitionObserver for GrammarStats {}
impl GroupObserver for GrammarStats {}
impl ConfigObserver for GrammarStats {}

fn main() {
    let grammar = include_bytes!("rfc3986.abnf");

    let mut stats = GrammarStats::default();
    let mut parser = Parser::new(grammar);
    let accepted = parser.parse(&mut stats);

    println!("accepted:          {}", accepted);
    println!("fully consumed:    {}", parser.at_end());
    println!("basic rules:       {}", stats.basic_rules);
    println!("incremental rules: {}", stats.incremental_rules);
    println!("rulename refs:     {}", stats.rulename_refs);
    println!("comments:          {}", stats.comments);

    if let Some((code, at)) = stats.last_error {
        println!("last error:        {} at {}", code.message(), at);
    }
    if !parser.at_end() {
        println!("stopped at:        {}", parser.location());
    }
}
