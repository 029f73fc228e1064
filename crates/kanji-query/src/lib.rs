//! Query language for filtering kanji records.
//!
//! A query is a boolean expression over record fields:
//!
//! - **Text**: `fire` - kanji, Hán Việt, English or Vietnamese meaning contains the text
//! - **Exact**: `"fire"` - one of those fields equals the text
//! - **Fields**: `en:fire`, `kun:ひ`, `hv:hỏa` - search a specific field
//! - **AND / OR / NOT**: `&`, `|`, `!` or the keywords, with AND binding tighter than OR
//! - **Grouping**: `(on:コウ | kun:い) & jlpt:N5`
//! - **Numbers**: `freq:<500`, `freq:100-200`, `freq:42`
//! - **JLPT levels**: `jlpt:<N3` means easier than N3 (N4, N5)
//!
//! # Example
//!
//! ```
//! use kanji_query::{Kanji, execute_query};
//!
//! let records = vec![Kanji {
//!     meaning: "fire".into(),
//!     jlpt_level: "N5".into(),
//!     frequency: Some(300),
//!     ..Kanji::new("火")
//! }];
//!
//! let outcome = execute_query("jlpt:N5 & freq:<500", &records);
//! assert!(outcome.errors.is_empty());
//! assert_eq!(outcome.results.len(), 1);
//! ```

#![warn(missing_docs)]

mod api;
mod ast;
mod error;
mod eval;
mod field;
mod lexer;
mod parser;
mod record;
mod suggest;

pub use api::{
    QueryOutcome, RESULT_LIMIT, SyntaxCheck, execute_query, execute_query_with_limit,
    validate_syntax,
};
pub use ast::{CompareOp, QueryNode, SearchField};
pub use error::{ParseError, QueryError};
pub use eval::{evaluate, filter_records};
pub use field::{Field, jlpt_rank};
pub use lexer::{Token, TokenKind, UNCLOSED_QUOTE, tokenize};
pub use parser::{MAX_NESTING, ParseOutcome, parse, parse_query};
pub use record::{FieldValue, Kanji, Record};
pub use suggest::get_suggestions;
