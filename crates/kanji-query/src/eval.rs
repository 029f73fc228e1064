//! Query evaluation against records.

use crate::{
    ast::{CompareOp, QueryNode, SearchField},
    field::{Field, jlpt_rank},
    record::{FieldValue, Record},
};

/// Returns true if `record` matches the query tree rooted at `node`.
pub fn evaluate<R: Record + ?Sized>(node: &QueryNode, record: &R) -> bool {
    match node {
        QueryNode::And { left, right } => evaluate(left, record) && evaluate(right, record),
        QueryNode::Or { left, right } => evaluate(left, record) || evaluate(right, record),
        QueryNode::Not(inner) => !evaluate(inner, record),
        QueryNode::Group(inner) => evaluate(inner, record),
        QueryNode::Comparison { op, field, value } => compare(record, *field, *op, *value),
        QueryNode::Range { field, min, max } => {
            numeric_value(record, *field).is_some_and(|n| (*min..=*max).contains(&n))
        }
        QueryNode::FieldSearch {
            field,
            value,
            exact,
        } => {
            let needle = value.to_lowercase();
            match field {
                SearchField::Default => Field::DEFAULT_SEARCH
                    .iter()
                    .any(|f| value_matches(record.field_value(*f), &needle, *exact)),
                SearchField::Field(f) => value_matches(record.field_value(*f), &needle, *exact),
            }
        }
    }
}

/// Filters `records` down to those matching `node`, preserving order.
pub fn filter_records<'n, 'a, R: Record>(
    node: &'n QueryNode,
    records: &'a [R],
) -> impl Iterator<Item = &'a R> + use<'n, 'a, R> {
    records.iter().filter(move |record| evaluate(node, *record))
}

/// Numeric reading of a field. JLPT levels read as their rank.
fn numeric_value<R: Record + ?Sized>(record: &R, field: Field) -> Option<u64> {
    let value = record.field_value(field);
    match (field, value) {
        (Field::JlptLevel, FieldValue::Text(level)) => jlpt_rank(level).map(u64::from),
        _ => value.as_number(),
    }
}

/// Evaluates a comparison node.
///
/// JLPT ranks run from 1 (hardest) to 5 (easiest), so the operators are read
/// in reverse: `jlpt:<N3` asks for levels easier than N3, i.e. rank above 3.
fn compare<R: Record + ?Sized>(record: &R, field: Field, op: CompareOp, value: u64) -> bool {
    let Some(actual) = numeric_value(record, field) else {
        return false;
    };

    if field == Field::JlptLevel {
        return match op {
            CompareOp::Lt => actual > value,
            CompareOp::Gt => actual < value,
            CompareOp::Lte => actual >= value,
            CompareOp::Gte => actual <= value,
            CompareOp::Eq => actual == value,
        };
    }

    op.compare(actual, value)
}

/// Case-insensitive equality or substring test. `needle` is already lower-cased.
fn text_matches(haystack: &str, needle: &str, exact: bool) -> bool {
    if haystack.is_empty() {
        return false;
    }
    let haystack = haystack.to_lowercase();
    if exact {
        haystack == needle
    } else {
        haystack.contains(needle)
    }
}

/// Applies a text test to any kind of field value.
fn value_matches(value: FieldValue<'_>, needle: &str, exact: bool) -> bool {
    match value {
        FieldValue::Text(text) => text_matches(text, needle, exact),
        FieldValue::List(items) => items.iter().any(|item| text_matches(item, needle, exact)),
        FieldValue::Number(Some(n)) => text_matches(&n.to_string(), needle, exact),
        FieldValue::Number(None) => false,
    }
}
