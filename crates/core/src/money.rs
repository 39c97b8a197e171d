//! Locale-aware number and currency formatting for notification emails.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// No-break space placed between an amount and a trailing currency glyph.
const NBSP: char = '\u{a0}';

/// Narrow no-break space, the French thousands separator.
const NARROW_NBSP: char = '\u{202f}';

/// Locales supported for money rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    EnUs,
    DeDe,
    FrFr,
    EnIn,
}

impl Locale {
    pub const ALL: [Locale; 4] = [Locale::EnUs, Locale::DeDe, Locale::FrFr, Locale::EnIn];

    /// BCP 47 tag, e.g. `en-US`.
    pub fn tag(self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::DeDe => "de-DE",
            Locale::FrFr => "fr-FR",
            Locale::EnIn => "en-IN",
        }
    }

    fn group_separator(self) -> char {
        match self {
            Locale::EnUs | Locale::EnIn => ',',
            Locale::DeDe => '.',
            Locale::FrFr => NARROW_NBSP,
        }
    }

    fn decimal_separator(self) -> char {
        match self {
            Locale::EnUs | Locale::EnIn => '.',
            Locale::DeDe | Locale::FrFr => ',',
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|locale| locale.tag().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| CoreError::Validation(format!("Unsupported locale '{s}'")))
    }
}

/// Largest magnitude still rendered to the cent. `f64` cannot hold cents
/// reliably beyond this, so larger amounts are shown as whole units.
const CENT_PRECISION_LIMIT: f64 = 1e15;

/// Format a plain number with the locale's grouping and decimal separators.
///
/// Whole values render without decimals; anything with a fractional part is
/// rounded to two decimals.
pub fn format_number(value: f64, locale: Locale) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let magnitude = value.abs();
    let (whole, fraction) = if magnitude < CENT_PRECISION_LIMIT {
        let cents = (magnitude * 100.0).round() as u64;
        ((cents / 100).to_string(), cents % 100)
    } else {
        (format!("{:.0}", magnitude.round()), 0)
    };

    let mut out = String::new();
    if value.is_sign_negative() && (whole != "0" || fraction > 0) {
        out.push('-');
    }
    out.push_str(&group_digits(&whole, locale));
    if fraction > 0 {
        out.push(locale.decimal_separator());
        out.push_str(&format!("{fraction:02}"));
    }
    out
}

/// Format a monetary amount with grouping and the locale's currency glyph.
pub fn format_currency(amount: f64, locale: Locale) -> String {
    let number = format_number(amount, locale);
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number.as_str()),
    };

    match locale {
        Locale::EnUs => format!("{sign}${digits}"),
        Locale::EnIn => format!("{sign}₹{digits}"),
        Locale::DeDe | Locale::FrFr => format!("{sign}{digits}{NBSP}€"),
    }
}

/// Round a percentage to the one decimal place it is displayed with.
pub fn round_percent(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Format a percentage value: whole numbers as-is, otherwise one decimal
/// place. Rounding goes through [`round_percent`].
pub fn format_percent(value: f64) -> String {
    let rounded = round_percent(value);
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

/// Insert group separators into the integer part.
///
/// Western locales group by three; `en-IN` groups the last three digits and
/// then pairs (lakh/crore).
fn group_digits(digits: &str, locale: Locale) -> String {
    let sep = locale.group_separator();

    let (head, tail) = if digits.len() > 3 {
        digits.split_at(digits.len() - 3)
    } else {
        return digits.to_string();
    };

    let head_group = match locale {
        Locale::EnIn => 2,
        _ => 3,
    };

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(head_group);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    let mut out = String::with_capacity(digits.len() + groups.len() + 1);
    for group in groups {
        out.push_str(group);
        out.push(sep);
    }
    out.push_str(tail);
    out
}
