use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Insufficient balance (have {balance}, requested {requested})")]
    InsufficientBalance {
        balance: Uint128,
        requested: Uint128,
    },

    #[error("Beneficiary not found")]
    BeneficiaryNotFound {},

    #[error("Allowance exceeded (allowance {allowance}, requested {requested})")]
    AllowanceExceeded {
        allowance: Uint128,
        requested: Uint128,
    },

    #[error("Amount must be greater than zero")]
    InvalidAmount {},

    #[error("Denomination must not be empty")]
    InvalidDenom {},

    #[error("Deposit must be a single coin of {denom}")]
    InvalidFunds { denom: String },

    #[error("This message does not accept funds")]
    UnexpectedFunds {},

    #[error("The owner cannot be removed from the beneficiary list")]
    CannotRemoveOwner {},

    #[error("Cannot migrate from a different contract ({contract})")]
    InvalidMigration { contract: String },
}
