// Token amounts
//
// MinorUnitAmount is the only amount type the instruction codec accepts.
// DisplayAmount is floating point and exists for estimates and rendering.

use std::fmt;

use crate::errors::{Result, VaultClientError};

/// Exact token quantity in the mint's smallest unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MinorUnitAmount(u64);

/// Human-scale token quantity (e.g. 25.5 QUP). Never encoded.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct DisplayAmount(f64);

impl MinorUnitAmount {
    pub const ZERO: Self = Self(0);

    pub const fn new(minor_units: u64) -> Self {
        Self(minor_units)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// `tokens * 10^decimals`, checked.
    pub fn from_whole_tokens(tokens: u64, decimals: u8) -> Result<Self> {
        scale_factor(decimals)?
            .checked_mul(tokens)
            .map(Self)
            .ok_or(VaultClientError::ArithmeticOverflow)
    }

    /// Parse a decimal string such as `"25"` or `"0.125"` exactly.
    ///
    /// Fractional digits beyond `decimals` are rejected rather than rounded.
    pub fn from_display_str(input: &str, decimals: u8) -> Result<Self> {
        let invalid = |reason| VaultClientError::InvalidAmount {
            input: input.to_string(),
            reason,
        };

        let scale = scale_factor(decimals)?;
        let trimmed = input.trim();
        let (whole, fraction) = match trimmed.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (trimmed, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid("empty amount"));
        }
        if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid("only digits and a single decimal point are allowed"));
        }
        if fraction.len() > decimals as usize {
            return Err(invalid("more fractional digits than the token supports"));
        }

        let whole_units: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("whole part out of range"))?
        };

        // Right-pad the fraction to exactly `decimals` digits
        let mut fraction_units: u64 = 0;
        for digit in fraction
            .bytes()
            .chain(std::iter::repeat(b'0'))
            .take(decimals as usize)
        {
            fraction_units = fraction_units * 10 + u64::from(digit - b'0');
        }

        let scaled = whole_units
            .checked_mul(scale)
            .and_then(|units| units.checked_add(fraction_units))
            .ok_or(VaultClientError::ArithmeticOverflow)?;

        Ok(Self(scaled))
    }

    /// Floor-convert a display amount. Rejects negative and non-finite input.
    pub fn from_display(amount: DisplayAmount, decimals: u8) -> Result<Self> {
        let value = amount.value();
        if !value.is_finite() || value < 0.0 {
            return Err(VaultClientError::InvalidAmount {
                input: value.to_string(),
                reason: "amount must be a finite, non-negative number",
            });
        }

        let scaled = (value * scale_factor(decimals)? as f64).floor();
        if scaled > u64::MAX as f64 {
            return Err(VaultClientError::ArithmeticOverflow);
        }
        Ok(Self(scaled as u64))
    }

    pub fn to_display(self, decimals: u8) -> DisplayAmount {
        DisplayAmount(self.0 as f64 / 10f64.powi(i32::from(decimals)))
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }
}

impl From<u64> for MinorUnitAmount {
    fn from(minor_units: u64) -> Self {
        Self(minor_units)
    }
}

impl fmt::Display for MinorUnitAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl DisplayAmount {
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for DisplayAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

fn scale_factor(decimals: u8) -> Result<u64> {
    10u64
        .checked_pow(u32::from(decimals))
        .ok_or(VaultClientError::ArithmeticOverflow)
}
