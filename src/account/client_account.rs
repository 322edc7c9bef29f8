use super::movements::{self, MovementRow};
use super::{balance, Account};
use crate::{amount::Amount, Pin, Username};
use rust_decimal::Decimal;
use std::iter;

/// Client owner details, credentials and movement history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAcc {
    owner: String,
    movements: Vec<Decimal>,
    interest_rate: Decimal,
    pin: Pin,
    // empty until usernames are derived for the whole store
    username: Username,
}

impl ClientAcc {
    /// Create an account without username. See [`crate::username::create_usernames`].
    pub fn new(
        owner: impl Into<String>,
        movements: Vec<Decimal>,
        interest_rate: Decimal,
        pin: Pin,
    ) -> Self {
        Self {
            owner: owner.into(),
            movements,
            interest_rate,
            pin,
            username: Username::new(),
        }
    }

    /// display name
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// First word of the owner, used to greet them after login
    pub fn first_name(&self) -> &str {
        self.owner.split(' ').next().unwrap_or_default()
    }

    /// derived login handle
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn set_username(&mut self, username: Username) {
        self.username = username;
    }

    /// Numeric comparison with the stored pin. `pin` is what the user typed.
    pub fn pin_matches(&self, pin: &str) -> bool {
        crate::amount::parse_number(pin) == Some(Decimal::from(self.pin))
    }

    /// Movements in display order, see [`movements`](Account::movements) for the stored order
    pub fn displayed_movements(&self, sorted: bool) -> Vec<Decimal> {
        movements::displayed(&self.movements, sorted)
    }

    /// Numbered and labelled movement list
    pub fn movement_rows(&self, sorted: bool) -> Vec<MovementRow> {
        movements::rows(&self.movements, sorted)
    }

    /// append money received
    pub(crate) fn record_deposit(&mut self, amount: Amount) {
        self.movements.push(amount.into());
    }

    /// append money sent
    pub(crate) fn record_withdrawal(&mut self, amount: Amount) {
        self.movements.push(-Decimal::from(amount));
    }

    /// Whether `mov` can be appended with every figure of the account still representable
    pub fn can_record(&self, mov: Decimal) -> bool {
        let movements = self.movements.iter().copied().chain(iter::once(mov));
        balance::checked_summary(movements, self.interest_rate).is_some()
    }

    /// Whether a loan of `amount` is covered: some past movement reaches 10% of it
    pub fn qualifies_for_loan(&self, amount: &Amount) -> bool {
        let threshold = **amount * Decimal::new(1, 1);
        self.movements.iter().any(|mov| *mov >= threshold)
    }
}

impl Account for ClientAcc {
    fn movements(&self) -> &[Decimal] {
        &self.movements
    }

    fn interest_rate(&self) -> Decimal {
        self.interest_rate
    }
}
