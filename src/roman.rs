//! Roman numeral formatting for part numbers.

const ROMAN_PAIRS: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Format `n` as a roman numeral, greedy largest-first.
///
/// Callers pre-increment their counters, so `n` is at least 1; `0` clamps to
/// the empty string rather than panicking.
pub fn to_roman(mut n: u32) -> String {
    let mut out = String::new();
    for (value, symbol) in ROMAN_PAIRS {
        while n >= value {
            out.push_str(symbol);
            n -= value;
        }
    }
    out
}
