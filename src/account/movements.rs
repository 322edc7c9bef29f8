//! Represents the movement list the way the renderer shows it
use rust_decimal::Decimal;

/// Label of a movement row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementKind {
    /// money came in
    Deposit,
    /// money went out
    Withdrawal,
}

impl MovementKind {
    /// Anything that is not positive is labelled a withdrawal
    pub fn of(mov: &Decimal) -> Self {
        if *mov > Decimal::ZERO {
            Self::Deposit
        } else {
            Self::Withdrawal
        }
    }
}

/// One line of the movement list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementRow {
    /// position in the displayed order, starting at 1
    pub number: usize,
    /// deposit or withdrawal
    pub kind: MovementKind,
    /// signed amount
    pub value: Decimal,
}

/// Movements in display order. Sorting works on a copy; `movements` is never reordered.
pub(crate) fn displayed(movements: &[Decimal], sorted: bool) -> Vec<Decimal> {
    let mut movs = movements.to_vec();
    if sorted {
        // stable, equal amounts keep their chronological order
        movs.sort();
    }
    movs
}

pub(crate) fn rows(movements: &[Decimal], sorted: bool) -> Vec<MovementRow> {
    displayed(movements, sorted)
        .into_iter()
        .enumerate()
        .map(|(i, value)| MovementRow {
            number: i + 1,
            kind: MovementKind::of(&value),
            value,
        })
        .collect()
}
