//! Print the event stream for a small grammar, indented by nesting depth.
//!
//! Run with: cargo run --example show_events

use abnf_core::observer::{
    AlternationObserver, CommentObserver, ConcatenationObserver, ConfigObserver, DocumentObserver,
    ErrorObserver, GroupObserver, LeafObserver, NumberFlag, RepetitionObserver, RuleObserver,
};
use abnf_core::{ErrorCode, Location, Parser, Span};

#[derive(Default)]
struct Printer {
    depth: usize,
}

impl Printer {
    fn open(&mut self, what: &str) -> bool {
        println!("{}{} {{", "  ".repeat(self.depth), what);
        self.depth += 1;
        true
    }

    fn close(&mut self, success: bool) -> bool {
        self.depth -= 1;
        println!("{}}} {}", "  ".repeat(self.depth), if success { "ok" } else { "failed" });
        true
    }

    fn leaf(&mut self, what: &str, text: &[u8]) -> bool {
        println!(
            "{}{}: {:?}",
            "  ".repeat(self.depth),
            what,
            String::from_utf8_lossy(text)
        );
        true
    }
}

impl DocumentObserver for Printer {
    fn begin_document(&mut self) -> bool {
        self.open("document")
    }
    fn end_document(&mut self, success: bool) -> bool {
        self.close(success)
    }
}

impl RuleObserver for Printer {
    fn begin_rule(&mut self, name: &[u8], _span: Span, incremental: bool) -> bool {
        let marker = if incremental { "=/" } else { "=" };
        println!(
            "{}rule {} ({}) {{",
            "  ".repeat(self.depth),
            String::from_utf8_lossy(name),
            marker
        );
        self.depth += 1;
        true
    }
    fn end_rule(&mut self, _name: &[u8], _span: Span, _incremental: bool, success: bool) -> bool {
        self.close(success)
    }
}

impl AlternationObserver for Printer {
    fn begin_alternation(&mut self) -> bool {
        self.open("alternation")
    }
    fn end_alternation(&mut self, success: bool) -> bool {
        self.close(success)
    }
}

impl ConcatenationObserver for Printer {
    fn begin_concatenation(&mut self) -> bool {
        self.open("concatenation")
    }
    fn end_concatenation(&mut self, success: bool) -> bool {
        self.close(success)
    }
}

impl RepetitionObserver for Printer {
    fn begin_repetition(&mut self) -> bool {
        self.open("repetition")
    }
    fn end_repetition(&mut self, success: bool) -> bool {
        self.close(success)
    }
    fn repeat(&mut self, low: i64, high: i64) -> bool {
        if high == i64::MAX {
            println!("{}repeat: {}*", "  ".repeat(self.depth), low);
        } else {
            println!("{}repeat: {}*{}", "  ".repeat(self.depth), low, high);
        }
        true
    }
}

impl GroupObserver for Printer {
    fn begin_group(&mut self) -> bool {
        self.open("group")
    }
    fn end_group(&mut self, success: bool) -> bool {
        self.close(success)
    }
    fn begin_option(&mut self) -> bool {
        self.open("option")
    }
    fn end_option(&mut self, success: bool) -> bool {
        self.close(success)
    }
}

impl LeafObserver for Printer {
    fn rulename(&mut self, name: &[u8], _span: Span) -> bool {
        self.leaf("rulename", name)
    }
    fn quoted_string(&mut self, text: &[u8], _span: Span) -> bool {
        self.leaf("string", text)
    }
    fn prose(&mut self, text: &[u8], _span: Span) -> bool {
        self.leaf("prose", text)
    }
    fn first_number(&mut self, flag: NumberFlag, text: &[u8], _span: Span) -> bool {
        self.leaf(&format!("number {:?}", flag), text)
    }
    fn next_number(&mut self, _flag: NumberFlag, text: &[u8], _span: Span) -> bool {
        self.leaf("number .", text)
    }
    fn last_number(&mut self, _flag: NumberFlag, text: &[u8], _span: Span) -> bool {
        if !text.is_empty() {
            self.leaf("number -", text);
        }
        true
    }
}

impl CommentObserver for Printer {
    fn comment(&mut self, text: &[u8], _span: Span) {
        self.leaf("comment", text);
    }
}

impl ConfigObserver for Printer {}

impl ErrorObserver for Printer {
    fn error(&mut self, code: ErrorCode, at: Location) {
        println!("{}error: {} at {}", "  ".repeat(self.depth), code.message(), at);
    }
}

fn main() {
    let grammar = b"\
; toy grammar\r\n\
greeting = 1*3(\"hi\" / \"ho\") [\"!\"]\r\n\
codepoint = %x41-5A\r\n";

    println!("input:\n{}\n", String::from_utf8_lossy(grammar));

    let accepted = Parser::new(grammar).parse(&mut Printer::default());
    println!("\naccepted: {}", accepted);
}
