//! Column type inference.
//!
//! A column gets the narrowest type that every non-missing value parses as,
//! tried in the order integer, float, date. Anything else is text. Values are
//! trimmed before parsing, so `" 30 "` counts as an integer.

use chrono::NaiveDate;

use crate::clean::NullTokens;
use crate::config::DATE_FORMATS;
use crate::table::{ColumnType, Value};

pub(crate) fn parse_integer(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()
}

pub(crate) fn parse_float(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|x| x.is_finite())
}

pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Infers the type of one column from all of its raw values.
pub(crate) fn infer_column_type<'a, I>(values: I, null_tokens: &NullTokens) -> ColumnType
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen_value = false;
    let mut integer = true;
    let mut float = true;
    let mut date = true;

    for raw in values {
        if null_tokens.is_null(raw) {
            continue;
        }
        seen_value = true;
        integer = integer && parse_integer(raw).is_some();
        float = float && parse_float(raw).is_some();
        date = date && parse_date(raw).is_some();
        if !(integer || float || date) {
            return ColumnType::Text;
        }
    }

    match (seen_value, integer, float, date) {
        (false, ..) => ColumnType::Text,
        (true, true, _, _) => ColumnType::Integer,
        (true, false, true, _) => ColumnType::Float,
        (true, false, false, true) => ColumnType::Date,
        _ => ColumnType::Text,
    }
}

/// Converts one raw cell to a value of the column's type.
///
/// Text cells are kept verbatim for the cleaner. Missing cells in typed
/// columns become `Null`. Returns `None` if the cell does not parse, which
/// cannot happen for a type produced by [`infer_column_type`] over the same
/// values.
pub(crate) fn convert_cell(
    raw: &str,
    column_type: ColumnType,
    null_tokens: &NullTokens,
) -> Option<Value> {
    if column_type == ColumnType::Text {
        return Some(Value::Text(raw.to_string()));
    }
    if null_tokens.is_null(raw) {
        return Some(Value::Null);
    }
    match column_type {
        ColumnType::Integer => parse_integer(raw).map(Value::Integer),
        ColumnType::Float => parse_float(raw).map(Value::Float),
        ColumnType::Date => parse_date(raw).map(Value::Date),
        ColumnType::Text => Some(Value::Text(raw.to_string())),
    }
}
