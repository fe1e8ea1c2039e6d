//! Unicode formatting utilities
use std::ops::Range;

use crate::value::Value;

const SUPERSCRIPTS: [(char, char); 13] = [
    ('0', '⁰'),
    ('1', '¹'),
    ('2', '²'),
    ('3', '³'),
    ('4', '⁴'),
    ('5', '⁵'),
    ('6', '⁶'),
    ('7', '⁷'),
    ('8', '⁸'),
    ('9', '⁹'),
    ('+', '⁺'),
    ('-', '⁻'),
    ('n', 'ⁿ'),
];

const SUBSCRIPTS: [(char, char); 16] = [
    ('0', '₀'),
    ('1', '₁'),
    ('2', '₂'),
    ('3', '₃'),
    ('4', '₄'),
    ('5', '₅'),
    ('6', '₆'),
    ('7', '₇'),
    ('8', '₈'),
    ('9', '₉'),
    ('+', '₊'),
    ('-', '₋'),
    ('j', 'ⱼ'),
    ('k', 'ₖ'),
    ('n', 'ₙ'),
    ('s', 'ₛ'),
];

/// Format a floating point number as a string
///
/// Values inside `fixed_range` use fixed notation, everything else scientific notation.
pub fn float<T: Value>(n: T, fixed_range: Option<Range<T>>, precision: usize) -> String {
    match fixed_range {
        Some(range) if range.contains(&n) => format!("{n:.precision$}"),
        _ => format!("{n:.precision$e}"),
    }
}

/// Convert a string into a superscript string, dropping characters without one
pub fn superscript(s: &str) -> String {
    s.chars().filter_map(|c| lookup(&SUPERSCRIPTS, c)).collect()
}

/// Convert a string into a subscript string, dropping characters without one
pub fn subscript(s: &str) -> String {
    s.chars().filter_map(|c| lookup(&SUBSCRIPTS, c)).collect()
}

fn lookup(table: &[(char, char)], c: char) -> Option<char> {
    table.iter().find(|(from, _)| *from == c).map(|(_, to)| *to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripts() {
        assert_eq!(superscript("-12"), "⁻¹²");
        assert_eq!(subscript("s"), "ₛ");
        assert_eq!(subscript("10"), "₁₀");
        assert_eq!(subscript("?"), "");
    }

    #[test]
    fn test_float() {
        assert_eq!(float(2.5, Some(1e-3..1e3), 2), "2.50");
        assert_eq!(float(12345.0, Some(1e-3..1e3), 1), "1.2e4");
    }
}
