//! Query abstract syntax tree.
//!
//! Nodes are built fresh for every query and never mutated afterwards.

use std::fmt;

use serde::Serialize;

use crate::field::Field;

/// A numeric comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompareOp {
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Lte,
    /// `>=`
    Gte,
    /// Exact equality, produced by a bare number such as `freq:100`.
    Eq,
}

impl CompareOp {
    /// The operator as written in a query (`==` for equality).
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Lt => "<",
            Self::Gt => ">",
            Self::Lte => "<=",
            Self::Gte => ">=",
            Self::Eq => "==",
        }
    }

    /// Applies the operator in its natural numeric sense: `lhs op rhs`.
    pub fn compare(self, lhs: u64, rhs: u64) -> bool {
        match self {
            Self::Lt => lhs < rhs,
            Self::Gt => lhs > rhs,
            Self::Lte => lhs <= rhs,
            Self::Gte => lhs >= rhs,
            Self::Eq => lhs == rhs,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The target of a text search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchField {
    /// No prefix: kanji, hanViet, meaning and vietnameseMeaning are searched.
    Default,
    /// A single named field.
    Field(Field),
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::Field(field) => write!(f, "{field}"),
        }
    }
}

/// A parsed query expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum QueryNode {
    /// Both sides must match.
    And {
        /// Left operand.
        left: Box<Self>,
        /// Right operand.
        right: Box<Self>,
    },

    /// At least one side must match.
    Or {
        /// Left operand.
        left: Box<Self>,
        /// Right operand.
        right: Box<Self>,
    },

    /// The operand must not match.
    Not(Box<Self>),

    /// Numeric comparison of a field against a constant.
    Comparison {
        /// Comparison operator.
        op: CompareOp,
        /// Field being compared.
        field: Field,
        /// Constant on the right-hand side. For `jlptLevel` this is a rank.
        value: u64,
    },

    /// Inclusive numeric range.
    Range {
        /// Field being tested.
        field: Field,
        /// Lower bound, inclusive.
        min: u64,
        /// Upper bound, inclusive.
        max: u64,
    },

    /// Case-insensitive text search.
    FieldSearch {
        /// Where to search.
        field: SearchField,
        /// Text to look for.
        value: String,
        /// Whole-value match (quoted) instead of substring match.
        exact: bool,
    },

    /// A parenthesized sub-expression.
    Group(Box<Self>),
}

impl QueryNode {
    /// Creates an And node.
    pub fn and(left: Self, right: Self) -> Self {
        Self::And {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Creates an Or node.
    pub fn or(left: Self, right: Self) -> Self {
        Self::Or {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Creates a Not node.
    pub fn not(operand: Self) -> Self {
        Self::Not(Box::new(operand))
    }

    /// Creates a Group node.
    pub fn group(inner: Self) -> Self {
        Self::Group(Box::new(inner))
    }

    /// Creates a text search node.
    pub fn search(field: SearchField, value: impl Into<String>, exact: bool) -> Self {
        Self::FieldSearch {
            field,
            value: value.into(),
            exact,
        }
    }

    /// Returns the node with any enclosing groups removed.
    pub fn ungrouped(&self) -> &Self {
        let mut node = self;
        while let Self::Group(inner) = node {
            node = inner;
        }
        node
    }

    /// Formats the expression as a tree structure with the given indentation level.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        match self {
            Self::And { left, right } => {
                writeln!(f, "{prefix}And")?;
                left.fmt_tree(f, indent + 1)?;
                right.fmt_tree(f, indent + 1)
            }
            Self::Or { left, right } => {
                writeln!(f, "{prefix}Or")?;
                left.fmt_tree(f, indent + 1)?;
                right.fmt_tree(f, indent + 1)
            }
            Self::Not(inner) => {
                writeln!(f, "{prefix}Not")?;
                inner.fmt_tree(f, indent + 1)
            }
            Self::Comparison { op, field, value } => {
                writeln!(f, "{prefix}Comparison({field} {op} {value})")
            }
            Self::Range { field, min, max } => {
                writeln!(f, "{prefix}Range({field} {min}..={max})")
            }
            Self::FieldSearch {
                field,
                value,
                exact,
            } => {
                let mode = if *exact { "exact" } else { "contains" };
                writeln!(f, "{prefix}FieldSearch({field} {mode} {value:?})")
            }
            Self::Group(inner) => {
                writeln!(f, "{prefix}Group")?;
                inner.fmt_tree(f, indent + 1)
            }
        }
    }

    /// Formats the expression back into query syntax.
    ///
    /// Prefixes use their shortest spelling and JLPT comparisons are written
    /// as levels, so `jlpt:<n3` renders as `jlpt:<N3`.
    pub fn to_query_string(&self) -> String {
        match self {
            Self::And { left, right } => {
                format!("{} & {}", left.to_query_string(), right.to_query_string())
            }
            Self::Or { left, right } => {
                format!("{} | {}", left.to_query_string(), right.to_query_string())
            }
            Self::Not(inner) => format!("!{}", inner.to_query_string()),
            Self::Comparison { op, field, value } => {
                let prefix = field.short_prefix();
                match (field, op) {
                    (Field::JlptLevel, CompareOp::Eq) => format!("{prefix}:N{value}"),
                    (Field::JlptLevel, _) => format!("{prefix}:{op}N{value}"),
                    (_, CompareOp::Eq) => format!("{prefix}:{value}"),
                    _ => format!("{prefix}:{op}{value}"),
                }
            }
            Self::Range { field, min, max } => {
                format!("{}:{min}-{max}", field.short_prefix())
            }
            Self::FieldSearch {
                field,
                value,
                exact,
            } => {
                let value = if *exact {
                    format!("\"{}\"", value.replace('"', "\\\""))
                } else {
                    value.clone()
                };
                match field {
                    SearchField::Default => value,
                    SearchField::Field(field) => format!("{}:{value}", field.short_prefix()),
                }
            }
            Self::Group(inner) => format!("({})", inner.to_query_string()),
        }
    }
}

impl fmt::Display for QueryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}
