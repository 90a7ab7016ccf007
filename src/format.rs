//! printf-style number formatting for the value label.
//!
//! Supports literal text, `%%`, and a single `%[flags][width][.precision]conv`
//! conversion where `conv` is one of `f`, `e`, `E`. Output never depends on
//! the process locale.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

const DEFAULT_PRECISION: usize = 6;
/// Largest field width a template may request.
pub const MAX_WIDTH: usize = 64;
/// Largest precision a template may request.
pub const MAX_PRECISION: usize = 32;

/// Errors produced when parsing a format string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The template contains no value conversion
    #[error("format string `{0}` has no value conversion")]
    MissingConversion(String),

    /// The template contains more than one value conversion
    #[error("format string `{0}` has more than one value conversion")]
    MultipleConversions(String),

    /// The conversion character is not a floating point conversion
    #[error("unsupported conversion `%{conversion}` in format string `{template}`")]
    UnsupportedConversion {
        /// The offending conversion character
        conversion: char,
        /// The whole template
        template: String,
    },

    /// The template ends in the middle of a conversion
    #[error("format string `{0}` ends with an incomplete conversion")]
    Incomplete(String),

    /// Width or precision exceeds [`MAX_WIDTH`] or [`MAX_PRECISION`]
    #[error("format string `{0}` asks for a width or precision that is too large")]
    OutOfRange(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    Fixed,
    Scientific { upper: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Flags {
    left: bool,
    plus: bool,
    space: bool,
    zero: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Directive {
    flags: Flags,
    width: usize,
    precision: usize,
    conversion: Conversion,
}

/// A parsed value format such as `"%.1f"` or `"%+.2f dB"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    template: String,
    prefix: String,
    directive: Directive,
    suffix: String,
}

impl NumberFormat {
    /// Parse a printf-style template.
    pub fn parse(template: &str) -> Result<Self, FormatError> {
        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut directive: Option<Directive> = None;
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            let out = if directive.is_some() { &mut suffix } else { &mut prefix };
            if c != '%' {
                out.push(c);
                continue;
            }
            if chars.peek() == Some(&'%') {
                chars.next();
                out.push('%');
                continue;
            }
            if directive.is_some() {
                return Err(FormatError::MultipleConversions(template.to_string()));
            }

            let mut flags = Flags::default();
            while let Some(&f) = chars.peek() {
                match f {
                    '-' => flags.left = true,
                    '+' => flags.plus = true,
                    ' ' => flags.space = true,
                    '0' => flags.zero = true,
                    _ => break,
                }
                chars.next();
            }

            let out_of_range = || FormatError::OutOfRange(template.to_string());
            let width = read_number(&mut chars, MAX_WIDTH).ok_or_else(out_of_range)?;

            let mut precision = DEFAULT_PRECISION;
            if chars.peek() == Some(&'.') {
                chars.next();
                precision = read_number(&mut chars, MAX_PRECISION).ok_or_else(out_of_range)?;
            }

            let conversion = match chars.next() {
                Some('f') => Conversion::Fixed,
                Some('e') => Conversion::Scientific { upper: false },
                Some('E') => Conversion::Scientific { upper: true },
                Some(other) => {
                    return Err(FormatError::UnsupportedConversion {
                        conversion: other,
                        template: template.to_string(),
                    })
                }
                None => return Err(FormatError::Incomplete(template.to_string())),
            };

            directive = Some(Directive {
                flags,
                width,
                precision,
                conversion,
            });
        }

        let directive =
            directive.ok_or_else(|| FormatError::MissingConversion(template.to_string()))?;
        Ok(Self {
            template: template.to_string(),
            prefix,
            directive,
            suffix,
        })
    }

    /// The template this format was parsed from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Render `value` through the template.
    pub fn format(&self, value: f64) -> String {
        let mut out = String::with_capacity(self.prefix.len() + self.suffix.len() + 16);
        out.push_str(&self.prefix);
        out.push_str(&self.directive.render(value));
        out.push_str(&self.suffix);
        out
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            template: "%.1f".to_string(),
            prefix: String::new(),
            directive: Directive {
                flags: Flags::default(),
                width: 0,
                precision: 1,
                conversion: Conversion::Fixed,
            },
            suffix: String::new(),
        }
    }
}

impl std::str::FromStr for NumberFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

/// Consume a run of digits. `None` if the number exceeds `max`.
fn read_number(chars: &mut Peekable<Chars<'_>>, max: usize) -> Option<usize> {
    let mut n = 0usize;
    let mut too_large = false;
    while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
        chars.next();
        n = n.saturating_mul(10).saturating_add(d as usize);
        too_large |= n > max;
    }
    (!too_large).then_some(n)
}

impl Directive {
    fn render(&self, value: f64) -> String {
        let negative = value.is_sign_negative() && !value.is_nan();
        let magnitude = value.abs();

        let digits = if value.is_nan() {
            "NaN".to_string()
        } else if magnitude.is_infinite() {
            "Infinity".to_string()
        } else {
            let decimal = Decimal::from_f64(magnitude);
            match self.conversion {
                Conversion::Fixed => decimal.fixed(self.precision),
                Conversion::Scientific { upper } => decimal.scientific(self.precision, upper),
            }
        };

        // Values that round to zero keep their sign, as with printf.
        let sign = if negative {
            "-"
        } else if self.flags.plus && !value.is_nan() {
            "+"
        } else if self.flags.space && !value.is_nan() {
            " "
        } else {
            ""
        };

        let len = sign.len() + digits.len();
        if len >= self.width {
            return format!("{sign}{digits}");
        }
        let pad = self.width - len;
        if self.flags.left {
            format!("{sign}{digits}{}", " ".repeat(pad))
        } else if self.flags.zero && value.is_finite() {
            format!("{sign}{}{digits}", "0".repeat(pad))
        } else {
            format!("{}{sign}{digits}", " ".repeat(pad))
        }
    }
}

/// A non-negative finite number as its shortest round-trip decimal digits.
///
/// The value is `0.d1d2d3... * 10^point`. Rounding works on these digits, half
/// up, so `0.25` renders as `0.3` at one decimal rather than following the
/// binary value below it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Decimal {
    digits: Vec<u8>,
    point: i32,
}

impl Decimal {
    fn from_f64(magnitude: f64) -> Self {
        let raw = format!("{magnitude:e}");
        let (mantissa, exponent) = raw.split_once('e').unwrap_or((raw.as_str(), "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);
        let mut digits: Vec<u8> = mantissa
            .bytes()
            .filter(u8::is_ascii_digit)
            .map(|b| b - b'0')
            .collect();
        while digits.last() == Some(&0) {
            digits.pop();
        }
        Self {
            digits,
            point: exponent + 1,
        }
    }

    fn digit(&self, index: i64) -> u8 {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.digits.get(i).copied())
            .unwrap_or(0)
    }

    /// Keep the first `keep` digits, rounding half up on the rest.
    fn round(&mut self, keep: i64) {
        let Ok(keep) = usize::try_from(keep) else {
            self.digits.clear();
            return;
        };
        if keep >= self.digits.len() {
            return;
        }
        let up = self.digits[keep] >= 5;
        self.digits.truncate(keep);
        if up {
            let mut i = keep;
            loop {
                if i == 0 {
                    self.digits.insert(0, 1);
                    self.point += 1;
                    break;
                }
                i -= 1;
                if self.digits[i] == 9 {
                    self.digits[i] = 0;
                } else {
                    self.digits[i] += 1;
                    break;
                }
            }
        }
        while self.digits.last() == Some(&0) {
            self.digits.pop();
        }
    }

    fn fixed(mut self, precision: usize) -> String {
        self.round(i64::from(self.point) + precision as i64);
        let mut out = String::new();
        if self.digits.is_empty() || self.point <= 0 {
            out.push('0');
        } else {
            for i in 0..i64::from(self.point) {
                out.push(char::from(b'0' + self.digit(i)));
            }
        }
        if precision > 0 {
            out.push('.');
            for i in 0..precision as i64 {
                out.push(char::from(b'0' + self.digit(i64::from(self.point) + i)));
            }
        }
        out
    }

    /// Scientific notation with a signed, at least two digit exponent.
    fn scientific(mut self, precision: usize, upper: bool) -> String {
        self.round(precision as i64 + 1);
        let exponent = if self.digits.is_empty() { 0 } else { self.point - 1 };
        let mut out = String::new();
        out.push(char::from(b'0' + self.digit(0)));
        if precision > 0 {
            out.push('.');
            for i in 1..=precision as i64 {
                out.push(char::from(b'0' + self.digit(i)));
            }
        }
        out.push(if upper { 'E' } else { 'e' });
        out.push(if exponent < 0 { '-' } else { '+' });
        out.push_str(&format!("{:02}", exponent.abs()));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(template: &str, value: f64) -> String {
        NumberFormat::parse(template).unwrap().format(value)
    }

    #[test]
    fn default_is_one_decimal() {
        assert_eq!(NumberFormat::default().format(12.345), "12.3");
        assert_eq!(NumberFormat::default(), NumberFormat::parse("%.1f").unwrap());
    }

    #[test]
    fn fixed_precision() {
        assert_eq!(render("%.0f", 49.6), "50");
        assert_eq!(render("%.2f", -0.5), "-0.50");
        assert_eq!(render("%f", 1.0), "1.000000");
    }

    #[test]
    fn literal_text_and_percent() {
        assert_eq!(render("Vol %.0f%%", 75.0), "Vol 75%");
        assert_eq!(render("%+.1f dB", 3.0), "+3.0 dB");
    }

    #[test]
    fn width_and_padding() {
        assert_eq!(render("%6.1f", 2.5), "   2.5");
        assert_eq!(render("%-6.1f|", 2.5), "2.5   |");
        assert_eq!(render("%06.1f", -2.5), "-002.5");
        assert_eq!(render("% .1f", 2.5), " 2.5");
    }

    #[test]
    fn scientific_exponent_has_sign_and_two_digits() {
        assert_eq!(render("%.2e", 1234.5), "1.23e+03");
        assert_eq!(render("%.1E", 0.00015), "1.5E-04");
        assert_eq!(render("%.0e", 0.0), "0e+00");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(render("%.1f", f64::NAN), "NaN");
        assert_eq!(render("%.1f", f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn rounds_half_up_on_decimal_digits() {
        assert_eq!(render("%.1f", 0.25), "0.3");
        assert_eq!(render("%.1f", 0.15), "0.2");
        assert_eq!(render("%.0f", 2.5), "3");
        assert_eq!(render("%.2f", 1.005), "1.01");
        assert_eq!(render("%.1f", -12.25), "-12.3");
        assert_eq!(render("%.2e", 1.125), "1.13e+00");
    }

    #[test]
    fn rounding_carries_into_new_digits() {
        assert_eq!(render("%.1f", 9.96), "10.0");
        assert_eq!(render("%.1f", 0.999), "1.0");
        assert_eq!(render("%.0f", 0.5), "1");
        assert_eq!(render("%.1e", 9.96), "1.0e+01");
    }

    #[test]
    fn small_and_large_magnitudes() {
        assert_eq!(render("%.1f", 0.04), "0.0");
        assert_eq!(render("%.1f", -0.04), "-0.0");
        assert_eq!(render("%.3f", 0.0005), "0.001");
        assert_eq!(render("%.0f", 1e20), "100000000000000000000");
    }

    #[test]
    fn oversized_width_and_precision_are_rejected() {
        for template in ["%99999999999999999999f", "%.70000f", "%65f", "%.33e"] {
            assert_eq!(
                NumberFormat::parse(template),
                Err(FormatError::OutOfRange(template.into()))
            );
        }
        assert!(NumberFormat::parse("%64.32f").is_ok());
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            NumberFormat::parse("value"),
            Err(FormatError::MissingConversion("value".into()))
        );
        assert_eq!(
            NumberFormat::parse("%f %f"),
            Err(FormatError::MultipleConversions("%f %f".into()))
        );
        assert_eq!(
            NumberFormat::parse("%d"),
            Err(FormatError::UnsupportedConversion {
                conversion: 'd',
                template: "%d".into()
            })
        );
        assert_eq!(
            NumberFormat::parse("%.2"),
            Err(FormatError::Incomplete("%.2".into()))
        );
    }
}
