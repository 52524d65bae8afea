//! Notation expanders for scientific and compact numeric shorthand.
//!
//! Both expanders are pure string-to-string transforms. They move the
//! decimal point through the digit string instead of multiplying floats, so
//! values with more significant digits than a double can hold survive
//! expansion exactly.

/// Exponents beyond this magnitude are left unexpanded rather than
/// allocating an arbitrarily long zero run.
const MAX_EXPONENT: i64 = 9999;

/// Compact suffix table, longest suffixes first so `qa` wins over a
/// hypothetical single-letter prefix match. Matching is case-insensitive.
const COMPACT_SUFFIXES: &[(&str, i32)] = &[
    ("no", 30),
    ("oc", 27),
    ("sp", 24),
    ("sx", 21),
    ("qi", 18),
    ("qa", 15),
    ("t", 12),
    ("b", 9),
    ("m", 6),
    ("k", 3),
];

/// Expand every scientific-notation substring (`1.5e-7`, `2E+5`) into its
/// plain decimal form.
///
/// Substrings that do not complete the pattern are passed through
/// unchanged; the function never fails.
///
/// # Examples
///
/// ```
/// use numfield_core::notation::expand_scientific;
///
/// assert_eq!(expand_scientific("1.5e-7", '.'), "0.00000015");
/// assert_eq!(expand_scientific("2e+5", '.'), "200000");
/// assert_eq!(expand_scientific("1.50e0", '.'), "1.50");
/// ```
pub fn expand_scientific(input: &str, decimal: char) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;
    while i < chars.len() {
        if let Some((consumed, expansion)) = match_scientific(&chars[i..], decimal) {
            out.push_str(&expansion);
            i += consumed;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

/// Expand every compact-notation substring (`1.5k`, `2.5678m`) into its
/// plain decimal form.
///
/// The suffix table covers `k`/`m`/`b`/`t` plus the multi-letter suffixes
/// up to `no` (10^30). A suffix immediately followed by another letter or
/// digit (`1kk`, `2b3`) is not a match and flows through untouched.
///
/// # Examples
///
/// ```
/// use numfield_core::notation::expand_compact;
///
/// assert_eq!(expand_compact("1.5k", '.'), "1500");
/// assert_eq!(expand_compact("2.5678m", '.'), "2567800");
/// assert_eq!(expand_compact("1kk", '.'), "1kk");
/// ```
pub fn expand_compact(input: &str, decimal: char) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;
    while i < chars.len() {
        if let Some((consumed, expansion)) = match_compact(&chars[i..], decimal) {
            out.push_str(&expansion);
            i += consumed;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

/// Whether the entire string is a single compact-notation literal
/// (`[sign]digits[.digits]suffix`).
pub fn is_compact_literal(s: &str, decimal: char) -> bool {
    let chars: Vec<char> = s.chars().collect();
    match match_compact(&chars, decimal) {
        Some((consumed, _)) => consumed == chars.len(),
        None => false,
    }
}

/// Try to match `[sign]digits[.digits][eE][sign]digits` at the start of
/// `chars`, returning the consumed length and the expansion.
fn match_scientific(chars: &[char], decimal: char) -> Option<(usize, String)> {
    let mut j = 0;
    let negative = matches!(chars.first(), Some(&'-'));
    if matches!(chars.first(), Some(&'-') | Some(&'+')) {
        j += 1;
    }
    let (int_part, frac_part, mantissa_end) = scan_mantissa(chars, j, decimal)?;
    j = mantissa_end;
    if !matches!(chars.get(j), Some(&'e') | Some(&'E')) {
        return None;
    }
    j += 1;
    let exp_negative = matches!(chars.get(j), Some(&'-'));
    if matches!(chars.get(j), Some(&'-') | Some(&'+')) {
        j += 1;
    }
    let exp_start = j;
    let mut exp: i64 = 0;
    while let Some(c) = chars.get(j).filter(|c| c.is_ascii_digit()) {
        exp = exp * 10 + (*c as u8 - b'0') as i64;
        if exp > MAX_EXPONENT {
            return None;
        }
        j += 1;
    }
    if j == exp_start {
        return None;
    }
    let exp = (if exp_negative { -exp } else { exp }) as i32;
    let sign = if negative { "-" } else { "" };
    let body = if exp == 0 {
        // exponent zero returns the base unchanged
        if frac_part.is_empty() {
            int_part
        } else {
            format!("{int_part}{decimal}{frac_part}")
        }
    } else {
        shift_point(&int_part, &frac_part, exp, decimal)
    };
    Some((j, format!("{sign}{body}")))
}

/// Try to match `[sign]digits[.digits]suffix` at the start of `chars`.
fn match_compact(chars: &[char], decimal: char) -> Option<(usize, String)> {
    let mut j = 0;
    let negative = matches!(chars.first(), Some(&'-'));
    if matches!(chars.first(), Some(&'-') | Some(&'+')) {
        j += 1;
    }
    let (int_part, frac_part, mantissa_end) = scan_mantissa(chars, j, decimal)?;
    j = mantissa_end;
    let (suffix_len, power) = COMPACT_SUFFIXES.iter().find_map(|&(suffix, power)| {
        let len = suffix.len();
        if chars.len() - j >= len
            && suffix
                .chars()
                .zip(chars[j..j + len].iter())
                .all(|(a, &b)| a.eq_ignore_ascii_case(&b))
        {
            Some((len, power))
        } else {
            None
        }
    })?;
    // require a word boundary after the suffix so "1kk" and "2b3" flow
    // through as junk instead of expanding mid-token
    if let Some(next) = chars.get(j + suffix_len) {
        if next.is_ascii_alphanumeric() {
            return None;
        }
    }
    j += suffix_len;
    let sign = if negative { "-" } else { "" };
    let body = shift_point(&int_part, &frac_part, power, decimal);
    Some((j, format!("{sign}{body}")))
}

/// Scan `digits[.digits]` starting at `from`. Returns the integer digits,
/// the fractional digits (possibly empty), and the index past the mantissa.
fn scan_mantissa(chars: &[char], from: usize, decimal: char) -> Option<(String, String, usize)> {
    let mut j = from;
    while j < chars.len() && chars[j].is_ascii_digit() {
        j += 1;
    }
    if j == from {
        return None;
    }
    let int_part: String = chars[from..j].iter().collect();
    let mut frac_part = String::new();
    if chars.get(j) == Some(&decimal) {
        let frac_start = j + 1;
        let mut k = frac_start;
        while k < chars.len() && chars[k].is_ascii_digit() {
            k += 1;
        }
        // a bare trailing separator is not part of the mantissa
        if k > frac_start {
            frac_part = chars[frac_start..k].iter().collect();
            j = k;
        }
    }
    Some((int_part, frac_part, j))
}

/// Move the decimal point of `int.frac` by `exponent` places using string
/// arithmetic only. Positive exponents move right.
fn shift_point(int_part: &str, frac_part: &str, exponent: i32, decimal: char) -> String {
    let digits = format!("{int_part}{frac_part}");
    let len = digits.len() as i64;
    let point = int_part.len() as i64 + exponent as i64;
    let (int_out, frac_out) = if point <= 0 {
        (
            "0".to_string(),
            format!("{}{}", "0".repeat(-point as usize), digits),
        )
    } else if point >= len {
        (
            format!("{}{}", digits, "0".repeat((point - len) as usize)),
            String::new(),
        )
    } else {
        (
            digits[..point as usize].to_string(),
            digits[point as usize..].to_string(),
        )
    };
    // trailing zeros introduced by the shift are dropped from the fraction
    let frac_out = frac_out.trim_end_matches('0');
    let int_trimmed = int_out.trim_start_matches('0');
    let int_out = if int_trimmed.is_empty() { "0" } else { int_trimmed };
    if frac_out.is_empty() {
        int_out.to_string()
    } else {
        format!("{int_out}{decimal}{frac_out}")
    }
}
