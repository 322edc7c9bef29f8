//! The running application: account store, session and sort toggle.
//!
//! Every action is a method on [`Bank`] that either applies completely or returns the reason it
//! was turned down without touching any state. Callers are expected to ignore rejections; the
//! user sees nothing happen.

use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    account::{balance, Account, ClientAcc, Summary},
    amount::Amount,
    csv::{RawAction, RawActionType},
    errors::ActionErr,
    username::create_usernames,
    Username,
};

/// Account store with the logged in session
#[derive(Debug, Clone)]
pub struct Bank {
    accounts: Vec<ClientAcc>,
    // username of the session account; lookups resolve to the first match, same as login
    session: Option<Username>,
    sorted: bool,
}

impl Bank {
    /// Load `accounts` and derive their usernames. Nobody is logged in.
    pub fn new(accounts: Vec<ClientAcc>) -> Self {
        let mut accounts = accounts;
        create_usernames(&mut accounts);

        Self {
            accounts,
            session: None,
            sorted: false,
        }
    }

    /// The four fixed demo accounts
    pub fn demo() -> Self {
        let decs = |v: &[i64]| -> Vec<Decimal> {
            v.iter().map(|v| Decimal::new(*v, 0)).collect()
        };

        Self::new(vec![
            ClientAcc::new(
                "Jonas Schmedtmann",
                decs(&[200, 450, -400, 3000, -650, -130, 70, 1300]),
                Decimal::new(12, 1),
                1111,
            ),
            ClientAcc::new(
                "Jessica Davis",
                decs(&[5000, 3400, -150, -790, -3210, -1000, 8500, -30]),
                Decimal::new(15, 1),
                2222,
            ),
            ClientAcc::new(
                "Steven Thomas Williams",
                decs(&[200, -200, 340, -300, -20, 50, 400, -460]),
                Decimal::new(7, 1),
                3333,
            ),
            ClientAcc::new(
                "Sarah Smith",
                decs(&[430, 1000, 700, 50, 90]),
                Decimal::ONE,
                4444,
            ),
        ])
    }

    /// All open accounts in store order
    pub fn accounts(&self) -> &[ClientAcc] {
        &self.accounts
    }

    /// First account with exactly this username
    pub fn find(&self, username: &str) -> Option<&ClientAcc> {
        self.position(username).map(|i| &self.accounts[i])
    }

    fn position(&self, username: &str) -> Option<usize> {
        self.accounts.iter().position(|acc| acc.username() == username)
    }

    /// Account of the logged in user
    pub fn session_account(&self) -> Option<&ClientAcc> {
        self.session.as_deref().and_then(|username| self.find(username))
    }

    fn session_position(&self) -> Result<usize, ActionErr> {
        self.session
            .as_deref()
            .and_then(|username| self.position(username))
            .ok_or(ActionErr::NoSession)
    }

    /// Current value of the sort toggle
    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Sum of every movement of every open account
    pub fn overall_balance(&self) -> Decimal {
        balance::saturating_sum(
            self.accounts
                .iter()
                .flat_map(|acc| acc.movements().iter().copied()),
        )
    }

    /// Log in with `username` and the typed `pin`.
    ///
    /// A failed attempt keeps whoever was logged in before.
    pub fn login(&mut self, username: &str, pin: &str) -> Result<&ClientAcc, ActionErr> {
        let i = self.position(username).ok_or(ActionErr::UnknownUser)?;
        let acc = &self.accounts[i];
        if !acc.pin_matches(pin) {
            return Err(ActionErr::WrongPin);
        }

        debug!(username, owner = acc.owner(), "logged in");
        self.session = Some(acc.username().to_owned());
        Ok(&self.accounts[i])
    }

    /// Move `amount` from the session account to the account named `receiver`
    pub fn transfer(&mut self, receiver: &str, amount: &str) -> Result<&ClientAcc, ActionErr> {
        let sender = self.session_position()?;
        let amount = Amount::parse(amount)?;
        let receiver = self.position(receiver).ok_or(ActionErr::ReceiverNotFound)?;

        if self.accounts[sender].balance() < *amount {
            return Err(ActionErr::InsufficientBalance);
        }
        if self.accounts[receiver].username() == self.accounts[sender].username() {
            return Err(ActionErr::SelfTransfer);
        }
        if !self.accounts[sender].can_record(-*amount)
            || !self.accounts[receiver].can_record(*amount)
        {
            return Err(ActionErr::Overflow);
        }

        self.accounts[sender].record_withdrawal(amount);
        self.accounts[receiver].record_deposit(amount);
        debug!(
            from = self.accounts[sender].username(),
            to = self.accounts[receiver].username(),
            amount = %*amount,
            "transfer"
        );

        Ok(&self.accounts[sender])
    }

    /// Grant a loan to the session account if some movement covers 10% of it
    pub fn request_loan(&mut self, amount: &str) -> Result<&ClientAcc, ActionErr> {
        let i = self.session_position()?;
        let amount = Amount::parse(amount)?;

        let acc = &mut self.accounts[i];
        if !acc.qualifies_for_loan(&amount) {
            return Err(ActionErr::LoanNotQualified);
        }
        if !acc.can_record(*amount) {
            return Err(ActionErr::Overflow);
        }

        acc.record_deposit(amount);
        debug!(username = acc.username(), amount = %*amount, "loan granted");
        Ok(&*acc)
    }

    /// Remove the session account after the user confirmed its username and pin.
    ///
    /// The session ends with it, so later actions are turned down until someone logs in.
    pub fn close_account(&mut self, username: &str, pin: &str) -> Result<ClientAcc, ActionErr> {
        let i = self.session_position()?;
        let acc = &self.accounts[i];
        if username != acc.username() || !acc.pin_matches(pin) {
            return Err(ActionErr::CredentialsMismatch);
        }

        let index = self
            .position(username)
            .ok_or(ActionErr::CredentialsMismatch)?;
        debug!(username, index, "closing account");

        self.session = None;
        Ok(self.accounts.remove(index))
    }

    /// Flip the sort toggle and return the session movements in the new display order
    pub fn toggle_sort(&mut self) -> Result<Vec<Decimal>, ActionErr> {
        let i = self.session_position()?;
        self.sorted = !self.sorted;
        Ok(self.accounts[i].displayed_movements(self.sorted))
    }

    /// Summary of the session account
    pub fn session_summary(&self) -> Option<Summary> {
        self.session_account().map(Summary::of)
    }

    /// Apply one form submission. Missing fields count as empty input.
    ///
    /// Be aware that actions must be applied in the order the user made them.
    pub fn try_apply_raw_action(&mut self, raw: &RawAction) -> Result<Outcome<'_>, ActionErr> {
        match raw.action {
            RawActionType::Login => {
                let acc = self.login(field(&raw.user), field(&raw.pin))?;
                Ok(Outcome::Refresh(acc))
            }
            RawActionType::Transfer => {
                let acc = self.transfer(field(&raw.target), field(&raw.amount))?;
                Ok(Outcome::Refresh(acc))
            }
            RawActionType::Loan => {
                let acc = self.request_loan(field(&raw.amount))?;
                Ok(Outcome::Refresh(acc))
            }
            RawActionType::Close => {
                let closed = self.close_account(field(&raw.user), field(&raw.pin))?;
                Ok(Outcome::Closed(closed))
            }
            RawActionType::Sort => self.toggle_sort().map(Outcome::Sorted),
        }
    }
}

fn field(f: &Option<String>) -> &str {
    f.as_deref().unwrap_or_default()
}

/// What the view has to do after an accepted action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<'a> {
    /// redraw movements and summary of this account
    Refresh(&'a ClientAcc),
    /// redraw the movement list in this order
    Sorted(Vec<Decimal>),
    /// the session account is gone, hide the application
    Closed(ClientAcc),
}

impl Default for Bank {
    fn default() -> Self {
        Self::demo()
    }
}

#[cfg(test)]
mod test {
    use super::{Bank, Outcome};
    use crate::{
        account::{Account, ClientAcc},
        amount::AmountErr,
        csv::{RawAction, RawActionType},
        errors::ActionErr,
    };
    use rust_decimal::Decimal;

    fn dec(v: i64) -> Decimal {
        Decimal::new(v, 0)
    }

    fn logged_in(username: &str, pin: &str) -> Bank {
        let mut bank = Bank::demo();
        bank.login(username, pin).unwrap();
        bank
    }

    fn movements(bank: &Bank, username: &str) -> Vec<Decimal> {
        bank.find(username).unwrap().movements().to_vec()
    }

    #[test]
    fn demo_store_has_usernames() {
        let bank = Bank::demo();
        let names: Vec<_> = bank.accounts().iter().map(|a| a.username()).collect();

        assert_eq!(names, vec!["js", "jd", "stw", "ss"]);
        assert!(bank.session_account().is_none());
        assert!(!bank.is_sorted());
    }

    #[test]
    fn login_success_and_failures() {
        let mut bank = Bank::demo();

        assert_eq!(bank.login("js", "1111").unwrap().first_name(), "Jonas");
        assert_eq!(bank.session_account().unwrap().username(), "js");

        // a failed attempt keeps the current session
        assert_eq!(bank.login("jd", "1111").unwrap_err(), ActionErr::WrongPin);
        assert_eq!(bank.login("JS", "1111").unwrap_err(), ActionErr::UnknownUser);
        assert_eq!(bank.login("zz", "1111").unwrap_err(), ActionErr::UnknownUser);
        assert_eq!(bank.session_account().unwrap().username(), "js");

        bank.login("jd", "2222").unwrap();
        assert_eq!(bank.session_account().unwrap().username(), "jd");
    }

    #[test]
    fn failed_login_leaves_nobody_logged_in() {
        let mut bank = Bank::demo();
        bank.login("js", "").unwrap_err();
        assert!(bank.session_account().is_none());
    }

    #[test]
    fn transfer_moves_money() {
        let mut bank = logged_in("js", "1111");
        let receiver_before = bank.find("jd").unwrap().balance();

        let sender = bank.transfer("jd", "500").unwrap();
        assert_eq!(sender.balance(), dec(3340));

        assert_eq!(*movements(&bank, "js").last().unwrap(), dec(-500));
        assert_eq!(*movements(&bank, "jd").last().unwrap(), dec(500));
        assert_eq!(bank.find("jd").unwrap().balance(), receiver_before + dec(500));
    }

    #[test]
    fn transfer_of_whole_balance_is_allowed() {
        let mut bank = logged_in("js", "1111");
        bank.transfer("ss", "3840").unwrap();
        assert_eq!(bank.session_account().unwrap().balance(), Decimal::ZERO);
    }

    #[test]
    fn rejected_transfers_change_nothing() {
        let mut bank = logged_in("js", "1111");
        let before = bank.accounts().to_vec();

        let cases = [
            ("jd", "0", ActionErr::Amount(AmountErr::NotPositive)),
            ("jd", "-10", ActionErr::Amount(AmountErr::NotPositive)),
            ("jd", "", ActionErr::Amount(AmountErr::NotPositive)),
            ("jd", "ten", ActionErr::Amount(AmountErr::NotANumber)),
            ("jd", "1_000", ActionErr::Amount(AmountErr::NotANumber)),
            ("nobody", "10", ActionErr::ReceiverNotFound),
            ("jd", "3841", ActionErr::InsufficientBalance),
            ("js", "10", ActionErr::SelfTransfer),
        ];

        for (receiver, amount, err) in cases {
            assert_eq!(bank.transfer(receiver, amount).unwrap_err(), err);
        }
        assert_eq!(bank.accounts(), before.as_slice());
    }

    #[test]
    fn loan_is_granted_against_a_large_enough_movement() {
        let mut bank = logged_in("js", "1111");

        // 3000 covers 10% of 30000
        let acc = bank.request_loan("30000").unwrap();
        assert_eq!(*acc.movements().last().unwrap(), dec(30000));
        assert_eq!(acc.balance(), dec(33840));
    }

    #[test]
    fn loan_is_refused() {
        let mut bank = logged_in("stw", "3333");
        let before = movements(&bank, "stw");

        // largest movement is 400
        assert_eq!(
            bank.request_loan("4001").unwrap_err(),
            ActionErr::LoanNotQualified
        );
        assert_eq!(
            bank.request_loan("0").unwrap_err(),
            ActionErr::Amount(AmountErr::NotPositive)
        );
        assert_eq!(movements(&bank, "stw"), before);

        bank.request_loan("4000").unwrap();
        assert_eq!(*movements(&bank, "stw").last().unwrap(), dec(4000));
    }

    #[test]
    fn close_removes_session_account() {
        let mut bank = logged_in("jd", "2222");

        assert_eq!(
            bank.close_account("js", "1111").unwrap_err(),
            ActionErr::CredentialsMismatch
        );
        assert_eq!(
            bank.close_account("jd", "1111").unwrap_err(),
            ActionErr::CredentialsMismatch
        );
        assert_eq!(bank.accounts().len(), 4);

        let closed = bank.close_account("jd", "2222").unwrap();
        assert_eq!(closed.owner(), "Jessica Davis");
        assert_eq!(bank.accounts().len(), 3);
        assert!(bank.find("jd").is_none());
        // later accounts moved up
        assert_eq!(bank.accounts()[1].username(), "stw");
    }

    #[test]
    fn closed_session_rejects_further_actions() {
        let mut bank = logged_in("js", "1111");
        bank.close_account("js", "1111").unwrap();

        assert!(bank.session_account().is_none());
        assert_eq!(bank.transfer("jd", "10").unwrap_err(), ActionErr::NoSession);
        assert_eq!(bank.request_loan("10").unwrap_err(), ActionErr::NoSession);
        assert_eq!(
            bank.close_account("js", "1111").unwrap_err(),
            ActionErr::NoSession
        );
        assert_eq!(bank.toggle_sort().unwrap_err(), ActionErr::NoSession);
        // a closed account cannot log in again
        assert_eq!(bank.login("js", "1111").unwrap_err(), ActionErr::UnknownUser);
    }

    #[test]
    fn sort_toggles_display_order() {
        let mut bank = logged_in("js", "1111");
        let chronological = movements(&bank, "js");

        let sorted = bank.toggle_sort().unwrap();
        assert_eq!(
            sorted,
            [-650, -400, -130, 70, 200, 450, 1300, 3000]
                .into_iter()
                .map(dec)
                .collect::<Vec<_>>()
        );
        assert!(bank.is_sorted());
        assert_eq!(movements(&bank, "js"), chronological);

        assert_eq!(bank.toggle_sort().unwrap(), chronological);
        assert!(!bank.is_sorted());
    }

    #[test]
    fn overall_balance_of_all_accounts() {
        let mut bank = logged_in("js", "1111");
        assert_eq!(bank.overall_balance(), dec(17840));

        // transfers move money around without creating any
        bank.transfer("jd", "100").unwrap();
        assert_eq!(bank.overall_balance(), dec(17840));
    }

    #[test]
    fn duplicate_usernames_resolve_to_first_account() {
        let mut bank = Bank::new(vec![
            ClientAcc::new("Ann Lee", vec![dec(100)], Decimal::ONE, 1),
            ClientAcc::new("Al Lo", vec![dec(900)], Decimal::ONE, 2),
        ]);

        assert_eq!(bank.login("al", "2").unwrap_err(), ActionErr::WrongPin);
        assert_eq!(bank.login("al", "1").unwrap().owner(), "Ann Lee");
    }

    #[test]
    fn session_summary_follows_movements() {
        let mut bank = logged_in("ss", "4444");
        assert_eq!(bank.session_summary().unwrap().balance, dec(2270));

        bank.transfer("js", "270").unwrap();
        let summary = bank.session_summary().unwrap();
        assert_eq!(summary.balance, dec(2000));
        assert_eq!(summary.expense, dec(270));
    }

    #[test]
    fn raw_actions_drive_the_session() {
        let mut bank = Bank::demo();
        let raw = |action, user: &str, pin: &str, target: &str, amount: &str| {
            let opt = |s: &str| (!s.is_empty()).then(|| s.to_owned());
            RawAction {
                action,
                user: opt(user),
                pin: opt(pin),
                target: opt(target),
                amount: opt(amount),
            }
        };

        // nothing works before login
        assert_eq!(
            bank.try_apply_raw_action(&raw(RawActionType::Sort, "", "", "", ""))
                .unwrap_err(),
            ActionErr::NoSession
        );

        let outcome = bank
            .try_apply_raw_action(&raw(RawActionType::Login, "ss", "4444", "", ""))
            .unwrap();
        assert!(matches!(outcome, Outcome::Refresh(acc) if acc.username() == "ss"));

        // missing amount reads as zero
        assert_eq!(
            bank.try_apply_raw_action(&raw(RawActionType::Loan, "", "", "", ""))
                .unwrap_err(),
            ActionErr::Amount(AmountErr::NotPositive)
        );

        let outcome = bank
            .try_apply_raw_action(&raw(RawActionType::Transfer, "", "", "stw", "70"))
            .unwrap();
        assert!(matches!(outcome, Outcome::Refresh(acc) if acc.balance() == dec(2200)));

        let outcome = bank
            .try_apply_raw_action(&raw(RawActionType::Sort, "", "", "", ""))
            .unwrap();
        assert!(matches!(outcome, Outcome::Sorted(movs) if movs[0] == dec(-70)));

        let outcome = bank
            .try_apply_raw_action(&raw(RawActionType::Close, "ss", "4444", "", ""))
            .unwrap();
        assert!(matches!(outcome, Outcome::Closed(acc) if acc.owner() == "Sarah Smith"));
        assert_eq!(bank.accounts().len(), 3);
    }

    #[test]
    fn chained_loans_stop_at_the_limit() {
        let mut bank = logged_in("js", "1111");

        // each granted loan covers the next one, ten times larger
        let mut amount = dec(3000);
        for _ in 0..25 {
            amount *= dec(10);
            bank.request_loan(&amount.to_string()).unwrap();
        }
        let before = movements(&bank, "js");

        assert_eq!(
            bank.request_loan(&Decimal::MAX.to_string()).unwrap_err(),
            ActionErr::Overflow
        );
        assert_eq!(movements(&bank, "js"), before);

        // figures of the account can still be computed
        let summary = bank.session_summary().unwrap();
        assert!(summary.balance > dec(30000) * Decimal::from(10u64.pow(19)));
        assert!(summary.interest > Decimal::ZERO);
        assert!(bank.overall_balance() > summary.balance);
    }

    #[test]
    fn transfer_that_overflows_receiver_is_rejected() {
        let mut bank = Bank::new(vec![
            ClientAcc::new("Ann Lee", vec![dec(1000)], Decimal::ONE, 1),
            ClientAcc::new("Bo Ma", vec![Decimal::MAX - dec(5)], Decimal::ONE, 2),
        ]);
        bank.login("al", "1").unwrap();
        let before = bank.accounts().to_vec();

        assert_eq!(bank.transfer("bm", "10").unwrap_err(), ActionErr::Overflow);
        assert_eq!(bank.accounts(), before.as_slice());

        bank.transfer("bm", "5").unwrap();
        assert_eq!(bank.find("bm").unwrap().balance(), Decimal::MAX);
    }
}
