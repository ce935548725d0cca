use std::fmt::{self, Display, Formatter, Write};

use maud::{Escaper, Render};

/// Price in INR, grouped the Indian way: `₹1,84,31,818.182`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rupees(pub f64);

impl Rupees {
    const MAX_FRACTION_DIGITS: usize = 3;
}

impl Display for Rupees {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("₹")?;
        if !self.0.is_finite() {
            return write!(f, "{}", self.0);
        }

        let rounded = format!("{:.*}", Self::MAX_FRACTION_DIGITS, self.0.abs());
        let (integer, fraction) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
        let fraction = fraction.trim_end_matches('0');

        if self.0 < 0.0 && (integer != "0" || !fraction.is_empty()) {
            f.write_char('-')?;
        }
        write_grouped(f, integer)?;
        if !fraction.is_empty() {
            write!(f, ".{}", fraction)?;
        }
        Ok(())
    }
}

impl Render for Rupees {
    fn render_to(&self, buffer: &mut String) {
        let _ = write!(Escaper::new(buffer), "{}", self);
    }
}

/// Last three digits form a group, the rest are grouped by two.
fn write_grouped(f: &mut Formatter<'_>, digits: &str) -> fmt::Result {
    if digits.len() <= 3 {
        return f.write_str(digits);
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let (first, rest) = head.split_at(head.len() % 2);
    if !first.is_empty() {
        write!(f, "{},", first)?;
    }
    for pair in rest.as_bytes().chunks(2) {
        f.write_str(std::str::from_utf8(pair).map_err(|_| fmt::Error)?)?;
        f.write_char(',')?;
    }
    f.write_str(tail)
}
