//! Key casing and format-pattern rendering shared by the converter and codecs.

use crate::data::Scalar;

/// Converts a field or link name to its canonical camelCase form.
///
/// Only the first letter is lowercased; the rest of the name is left
/// untouched so that `"Message"` becomes `"message"` and `"lastName"` stays
/// `"lastName"`.
pub fn camel_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// A parsed numeric format pattern.
///
/// Patterns use `0`/`#` digit placeholders: an optional `.` introduces fixed
/// fractional digits and a `,` in the integer part requests thousands
/// grouping (`"0.00"`, `"#,##0.##"`). Anything the pattern does not describe
/// is ignored.
struct Pattern {
    decimals: usize,
    grouped: bool,
}

impl Pattern {
    fn parse(pattern: &str) -> Self {
        let (integer, fraction) = match pattern.split_once('.') {
            Some((i, f)) => (i, f),
            None => (pattern, ""),
        };
        Pattern {
            decimals: fraction.chars().filter(|c| matches!(c, '0' | '#')).count(),
            grouped: integer.contains(','),
        }
    }
}

/// Renders a scalar through a format pattern.
///
/// Returns the rendered text together with a flag marking whether the text
/// is a bare numeric token that a format with native numbers (JSON) may emit
/// unquoted. Grouped output always quotes; non-numeric scalars render their
/// plain textual form.
pub(crate) fn apply_format(pattern: &str, scalar: &Scalar) -> (String, bool) {
    let parsed = Pattern::parse(pattern);
    match scalar {
        Scalar::Int(v) => {
            let text = render_int(*v, &parsed);
            (text, !parsed.grouped)
        }
        Scalar::Float(v) => {
            let text = render_float(*v, &parsed);
            (text, !parsed.grouped)
        }
        other => (other.to_string(), false),
    }
}

fn render_int(value: i64, pattern: &Pattern) -> String {
    let mut text = if pattern.grouped {
        group_digits(&value.to_string())
    } else {
        value.to_string()
    };
    if pattern.decimals > 0 {
        text.push('.');
        text.push_str(&"0".repeat(pattern.decimals));
    }
    text
}

fn render_float(value: f64, pattern: &Pattern) -> String {
    let text = format!("{value:.prec$}", prec = pattern.decimals);
    if pattern.grouped {
        match text.split_once('.') {
            Some((integer, fraction)) => format!("{}.{}", group_digits(integer), fraction),
            None => group_digits(&text),
        }
    } else {
        text
    }
}

/// Inserts `,` separators every three digits, counting from the right.
fn group_digits(digits: &str) -> String {
    let (sign, magnitude) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };
    let mut grouped = String::with_capacity(magnitude.len() + magnitude.len() / 3 + 1);
    let offset = magnitude.len() % 3;
    for (i, c) in magnitude.chars().enumerate() {
        if i > 0 && i % 3 == offset {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("{sign}{grouped}")
}
