//! Login handles derived from owner names

use crate::{account::ClientAcc, Username};

/// Lowercase initials of every word of `owner`, joined without separator.
///
/// Words are separated by single spaces; empty segments left by repeated, leading or
/// trailing spaces contribute nothing.
pub fn derive_username(owner: &str) -> Username {
    owner
        .to_lowercase()
        .split(' ')
        .filter_map(|word| word.chars().next())
        .collect()
}

/// Attach a derived username to each account. Running it again gives the same result.
pub fn create_usernames(accounts: &mut [ClientAcc]) {
    for acc in accounts {
        let username = derive_username(acc.owner());
        acc.set_username(username);
    }
}
