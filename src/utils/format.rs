//! Fixed-width column rendering
//!
//! Every value written to a DSSAT file goes through `fit`: text is cut to
//! the column width, reals are printed with a fixed number of decimals and
//! cut (with a warning) when they still overflow. The output is always
//! exactly `leading + width` characters.

use tracing::warn;

use crate::model::Scalar;

/// Sentinel written for missing values.
pub const MISSING: &str = "-99";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Text,
    Real,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justify {
    Left,
    Right,
}

/// Column layout: leading spaces, width, kind, justification, decimals and
/// zero padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Col {
    pub leading: usize,
    pub width: usize,
    pub kind: Kind,
    pub justify: Justify,
    pub decimals: usize,
    pub zero_pad: bool,
}

impl Col {
    /// Right-justified text column with one leading space.
    pub const fn text(width: usize) -> Self {
        Col {
            leading: 1,
            width,
            kind: Kind::Text,
            justify: Justify::Right,
            decimals: 0,
            zero_pad: false,
        }
    }

    /// Right-justified real column with one leading space and no decimals.
    pub const fn real(width: usize) -> Self {
        Col {
            kind: Kind::Real,
            ..Col::text(width)
        }
    }

    pub const fn lead(self, leading: usize) -> Self {
        Col { leading, ..self }
    }

    pub const fn left(self) -> Self {
        Col {
            justify: Justify::Left,
            ..self
        }
    }

    pub const fn dec(self, decimals: usize) -> Self {
        Col { decimals, ..self }
    }

    pub const fn zero_pad(self) -> Self {
        Col {
            zero_pad: true,
            ..self
        }
    }

    /// Render a value.
    pub fn fmt(&self, value: &str) -> String {
        fit(value, self).text
    }

    /// Render an optional record field, falling back to `default`.
    pub fn field(&self, value: &Option<Scalar>, default: &str) -> String {
        self.fmt(value.as_ref().map(|s| s.as_str()).unwrap_or(default))
    }

    /// Render a computed number.
    pub fn num(&self, value: f64) -> String {
        match self.kind {
            Kind::Real => {
                let (text, truncated) = clip(real_text(value, self.decimals), self.width);
                if truncated {
                    warn!(value, width = self.width, "real number is too long for its column");
                }
                pad(text, self)
            }
            Kind::Text => self.fmt(&format!("{:?}", value)),
        }
    }
}

/// Rendered column and whether a real value lost characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fitted {
    pub text: String,
    pub truncated: bool,
}

/// Render `value` into `col`.
///
/// A real that does not parse as a number is rendered as text in the same
/// column.
pub fn fit(value: &str, col: &Col) -> Fitted {
    let (text, truncated) = match col.kind {
        Kind::Text => (clip(value.to_string(), col.width).0, false),
        Kind::Real => match value.trim().parse::<f64>() {
            Ok(v) => clip(real_text(v, col.decimals), col.width),
            Err(_) => {
                warn!(value, "non-numeric value in a real column, written as text");
                (clip(value.to_string(), col.width).0, false)
            }
        },
    };
    if truncated {
        warn!(value, width = col.width, "real number is too long for its column");
    }
    Fitted {
        text: pad(text, col),
        truncated,
    }
}

fn real_text(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else {
        format!("{:.*}", decimals, value)
    }
}

fn clip(text: String, width: usize) -> (String, bool) {
    if text.chars().count() > width {
        (text.chars().take(width).collect(), true)
    } else {
        (text, false)
    }
}

fn pad(text: String, col: &Col) -> String {
    let len = text.chars().count();
    let fill = col.width.saturating_sub(len);
    let mut out = String::with_capacity(col.leading + col.width.max(len));
    out.extend(std::iter::repeat(' ').take(col.leading));

    match (col.justify, col.zero_pad) {
        (Justify::Right, true) => {
            // zeros go between the sign and the digits
            let (sign, digits) = match text.chars().next() {
                Some(c @ ('+' | '-')) => (Some(c), &text[1..]),
                _ => (None, text.as_str()),
            };
            if let Some(c) = sign {
                out.push(c);
            }
            out.extend(std::iter::repeat('0').take(fill));
            out.push_str(digits);
        }
        (Justify::Right, false) => {
            out.extend(std::iter::repeat(' ').take(fill));
            out.push_str(&text);
        }
        (Justify::Left, zero) => {
            out.push_str(&text);
            out.extend(std::iter::repeat(if zero { '0' } else { ' ' }).take(fill));
        }
    }
    out
}

/// Integer part of a year or day value (`"95.0"` -> `"95"`).
pub fn integer_part(value: &str) -> &str {
    value.split('.').next().unwrap_or(value)
}

/// Left-justified index column of width 7 that opens most section rows.
pub fn index7(index: usize) -> String {
    Col::real(7).lead(0).left().fmt(&index.to_string())
}

/// Two-character index column used by the compact sections.
pub fn index2(index: usize) -> String {
    Col::real(2).lead(0).fmt(&index.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_truncates_silently() {
        let f = fit("ABCDEFGHIJ", &Col::text(5));
        assert_eq!(f.text, " ABCDE");
        assert!(!f.truncated);
    }

    #[test]
    fn test_real_rounding_and_overflow() {
        assert_eq!(Col::real(5).dec(2).fmt("12.345"), " 12.35");

        let f = fit("-99", &Col::real(5).dec(2));
        assert_eq!(f.text, " -99.0");
        assert!(f.truncated);

        let f = fit("123456.7", &Col::real(5).lead(0).dec(1));
        assert_eq!(f.text, "12345");
        assert!(f.truncated);
    }

    #[test]
    fn test_zero_padding_keeps_sign_first() {
        assert_eq!(Col::text(4).lead(0).zero_pad().fmt("-5"), "-005");
        assert_eq!(Col::text(3).lead(0).zero_pad().fmt("5"), "005");
        assert_eq!(Col::text(4).lead(0).left().zero_pad().fmt("5"), "5000");
    }

    #[test]
    fn test_left_justify() {
        assert_eq!(Col::text(8).left().fmt("UFGA"), " UFGA    ");
    }

    #[test]
    fn test_non_numeric_real_written_as_text() {
        let f = fit("abc", &Col::real(5).dec(1));
        assert_eq!(f.text, "   abc");
        assert!(!f.truncated);
    }

    #[test]
    fn test_output_width_invariant() {
        let values = ["", "1", "-99", "3.14159", "123456789.123", "TEXTTEXTTEXT", "-0.004"];
        for leading in 0..3 {
            for width in 1..9 {
                for decimals in 0..4 {
                    for justify in [Justify::Left, Justify::Right] {
                        for kind in [Kind::Text, Kind::Real] {
                            for zero_pad in [false, true] {
                                let col = Col {
                                    leading,
                                    width,
                                    kind,
                                    justify,
                                    decimals,
                                    zero_pad,
                                };
                                for v in values {
                                    let f = fit(v, &col);
                                    assert_eq!(
                                        f.text.chars().count(),
                                        leading + width,
                                        "{:?} {:?}",
                                        v,
                                        col
                                    );
                                    if kind == Kind::Text {
                                        assert!(!f.truncated);
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_num_matches_fmt() {
        assert_eq!(Col::real(5).dec(3).num(0.2632374), Col::real(5).dec(3).fmt("0.2632374"));
        assert_eq!(Col::real(5).dec(3).num(0.2632374), " 0.263");
    }

    #[test]
    fn test_index_columns() {
        assert_eq!(index7(12), "12     ");
        assert_eq!(index2(3), " 3");
        assert_eq!(integer_part("95.0"), "95");
        assert_eq!(integer_part("-99"), "-99");
    }
}
