//! ABNF Core Parser
//!
//! Event-based recursive-descent parser for ABNF (RFC 5234, aware of the
//! RFC 7405 case-sensitive string extension). Emits structural events
//! without building an AST: the caller supplies an observer, the parser
//! reports rule brackets, repeat bounds, literals, numeric values,
//! groups, options, and comments as it recognizes them.
//!
//! # Architecture
//!
//! - **span.rs** - Location/Span types (byte offsets plus line/column)
//! - **cursor.rs** - position-tracking cursor and parse policy
//! - **core_rules.rs** - RFC 5234 core-rule predicates and token advancers
//! - **repeat.rs** - bounded repetition driver, decimal conversion
//! - **observer.rs** - the observer contract and error model
//! - **parser.rs** - the mutually-recursive structural advancers
//!
//! # Example
//!
//! Count accepted rule definitions in a grammar:
//!
//! ```
//! use abnf_core::observer::{
//!     AlternationObserver, CommentObserver, ConcatenationObserver, ConfigObserver,
//!     DocumentObserver, ErrorObserver, GroupObserver, LeafObserver, RepetitionObserver,
//!     RuleObserver,
//! };
//! use abnf_core::Parser;
//!
//! #[derive(Default)]
//! struct RuleCount(usize);
//!
//! impl RuleObserver for RuleCount {
//!     fn accept_basic_rule_definition(&mut self) {
//!         self.0 += 1;
//!     }
//! }
//! impl DocumentObserver for RuleCount {}
//! impl AlternationObserver for RuleCount {}
//! impl ConcatenationObserver for RuleCount {}
//! impl RepetitionObserver for RuleCount {}
//! impl GroupObserver for RuleCount {}
//! impl LeafObserver for RuleCount {}
//! impl CommentObserver for RuleCount {}
//! impl ConfigObserver for RuleCount {}
//! impl ErrorObserver for RuleCount {}
//!
//! let grammar = b"scheme = ALPHA *(ALPHA / DIGIT / \"+\" / \"-\" / \".\")\r\n";
//! let mut count = RuleCount::default();
//! assert!(Parser::new(grammar).parse(&mut count));
//! assert_eq!(count.0, 1);
//! ```

pub mod core_rules;
pub mod cursor;
pub mod observer;
pub mod parser;
pub mod repeat;
pub mod span;

pub use cursor::{Cursor, ParsePolicy};
pub use observer::{DefinedAs, ErrorCode, NumberFlag, Observer};
pub use parser::Parser;
pub use repeat::{RepeatRange, UNBOUNDED};
pub use span::{Location, Span};
