//! Possible errors

use crate::amount::AmountErr;
use thiserror::Error;

/// Group reasons for which a user action is turned down.
///
/// Rejections are never shown to the user: the action simply has no effect. They exist so the
/// caller can log them and tests can tell the gates apart.
#[allow(missing_docs)]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActionErr {
    #[error("nobody is logged in")]
    NoSession,
    #[error("no account with this username")]
    UnknownUser,
    #[error("pin does not match")]
    WrongPin,
    #[error("unusable amount")]
    Amount(#[from] AmountErr),
    #[error("no receiver account with this username")]
    ReceiverNotFound,
    #[error("not enough balance for this transfer")]
    InsufficientBalance,
    #[error("cannot transfer to own account")]
    SelfTransfer,
    #[error("no movement reaches 10% of the requested loan")]
    LoanNotQualified,
    #[error("confirmation does not match the logged in account")]
    CredentialsMismatch,
    #[error("amount does not fit in the account figures")]
    Overflow,
}
