//! Account traits and structs
use rust_decimal::Decimal;

pub(crate) mod balance;
pub(crate) mod client_account;
pub(crate) mod movements;

pub use balance::Summary;
pub use client_account::ClientAcc;
pub use movements::{MovementKind, MovementRow};

/// Represent an account history and the figures derived from it.
///
/// Every figure is recomputed from the movements on each call, nothing is cached. Figures that
/// do not fit in a [`Decimal`] stop at the limit.
pub trait Account {
    /// signed amounts in chronological order, deposits positive
    fn movements(&self) -> &[Decimal];
    /// percentage paid on each deposit
    fn interest_rate(&self) -> Decimal;

    /// sum of all movements
    fn balance(&self) -> Decimal {
        balance::saturating_sum(self.movements().iter().copied())
    }

    /// sum of deposits
    fn income(&self) -> Decimal {
        balance::saturating_sum(
            self.movements()
                .iter()
                .copied()
                .filter(|mov| *mov > Decimal::ZERO),
        )
    }

    /// absolute value of the sum of withdrawals
    fn expense(&self) -> Decimal {
        balance::saturating_sum(
            self.movements()
                .iter()
                .copied()
                .filter(|mov| *mov < Decimal::ZERO),
        )
        .abs()
    }

    /// interest over deposits, each deposit counted only if it earns at least 1
    fn interest(&self) -> Decimal {
        balance::qualifying_interest(self.movements(), self.interest_rate())
    }
}
