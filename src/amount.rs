//! Guard before moving zero or negative amounts between accounts, and read numbers typed by
//! the user.

use std::{borrow::Borrow, ops::Deref, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Represent strictly positive amount of money
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    /// Create new amount of `num` with `scale` decimal places. Zero is rejected.
    #[cfg(test)]
    pub(crate) fn new(num: u64, scale: u32) -> Result<Amount, AmountErr> {
        Decimal::from_i128_with_scale(num.into(), scale).try_into()
    }

    /// Parse user input and keep it only if it is a positive number
    pub fn parse(input: &str) -> Result<Amount, AmountErr> {
        parse_number(input).ok_or(AmountErr::NotANumber)?.try_into()
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
/// represent error when action want to operate on an unusable amount of money
pub enum AmountErr {
    /// input text is not a number
    #[error("amount is not a number")]
    NotANumber,
    /// zero or negative amount
    #[error("amount is not positive")]
    NotPositive,
}

impl TryFrom<Decimal> for Amount {
    type Error = AmountErr;
    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(AmountErr::NotPositive)
        }
    }
}

impl From<Amount> for Decimal {
    fn from(this: Amount) -> Self {
        this.0
    }
}

impl Borrow<Decimal> for Amount {
    fn borrow(&self) -> &Decimal {
        &self.0
    }
}

impl Deref for Amount {
    type Target = Decimal;
    fn deref(&self) -> &Self::Target {
        self.borrow()
    }
}

/// Read a number from a form field.
///
/// Surrounding whitespace is ignored and blank text reads as zero, so an empty field fails
/// every "greater than zero" check instead of being an error. `None` means the text is not a
/// number at all, digit separators included.
pub fn parse_number(input: &str) -> Option<Decimal> {
    let input = input.trim();
    if input.is_empty() {
        return Some(Decimal::ZERO);
    }
    // `Decimal::from_str` skips underscores
    if input.contains('_') {
        return None;
    }

    Decimal::from_str(input)
        .or_else(|_| Decimal::from_scientific(input))
        .ok()
}
