//! kanji: query a kanji dictionary from the command line.
//!
//! Records are loaded from JSON files named in `.kanji.toml` (or passed with
//! `--data`) and filtered with the query language from `kanji-query`, e.g.
//! `kanji search '(on:コウ | kun:い) & jlpt:N5'`.

#![warn(missing_docs)]

pub mod cli;
pub mod data;
