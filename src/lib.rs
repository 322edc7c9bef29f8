//! Bankist demo bank: fixed mock accounts, login sessions and movements

#![deny(missing_docs)]

pub mod account;
pub mod amount;
pub mod bank;
pub mod csv;
pub mod errors;
pub mod username;

/// Login handle derived from the owner name
pub type Username = String;
/// Numeric account credential
pub type Pin = u32;
