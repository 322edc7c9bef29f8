use super::Account;
use rust_decimal::Decimal;

/// Figures shown next to the movement list, computed in one go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// sum of all movements
    pub balance: Decimal,
    /// sum of deposits
    pub income: Decimal,
    /// absolute sum of withdrawals
    pub expense: Decimal,
    /// qualifying interest over deposits
    pub interest: Decimal,
}

impl Summary {
    /// Compute every figure of `acc` from its current movements
    pub fn of(acc: &impl Account) -> Self {
        Self {
            balance: acc.balance(),
            income: acc.income(),
            expense: acc.expense(),
            interest: acc.interest(),
        }
    }
}

/// Sum that stops at the largest representable amount instead of overflowing
pub(crate) fn saturating_sum(movements: impl IntoIterator<Item = Decimal>) -> Decimal {
    movements
        .into_iter()
        .fold(Decimal::ZERO, |total, mov| total.saturating_add(mov))
}

fn deposit_interest(deposit: Decimal, rate: Decimal) -> Option<Decimal> {
    Some(deposit.checked_mul(rate)? / Decimal::new(100, 0))
}

// The threshold applies to the interest earned by a single deposit, not to the deposit and
// not to the total.
pub(crate) fn qualifying_interest(movements: &[Decimal], rate: Decimal) -> Decimal {
    saturating_sum(
        movements
            .iter()
            .filter(|mov| **mov > Decimal::ZERO)
            .map(|deposit| deposit_interest(*deposit, rate).unwrap_or(Decimal::MAX))
            .filter(|interest| *interest >= Decimal::ONE),
    )
}

/// Every figure of `movements`, or `None` if one of them does not fit in a [`Decimal`].
pub(crate) fn checked_summary(
    movements: impl IntoIterator<Item = Decimal>,
    rate: Decimal,
) -> Option<Summary> {
    let mut summary = Summary {
        balance: Decimal::ZERO,
        income: Decimal::ZERO,
        expense: Decimal::ZERO,
        interest: Decimal::ZERO,
    };

    for mov in movements {
        summary.balance = summary.balance.checked_add(mov)?;
        if mov > Decimal::ZERO {
            summary.income = summary.income.checked_add(mov)?;
            let interest = deposit_interest(mov, rate)?;
            if interest >= Decimal::ONE {
                summary.interest = summary.interest.checked_add(interest)?;
            }
        } else if mov < Decimal::ZERO {
            summary.expense = summary.expense.checked_sub(mov)?;
        }
    }

    Some(summary)
}
