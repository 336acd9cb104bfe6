use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

#[cw_serde]
pub struct InstantiateMsg {
    /// Native denomination held by the wallet
    pub denom: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Deposit the attached funds (anyone)
    Deposit {},
    /// Withdraw funds to the sender (owner or beneficiary with allowance)
    Withdraw { amount: Uint128 },
    /// Add or overwrite a beneficiary (owner)
    AddBeneficiary { id: String, allowance: Uint128 },
    /// Change the allowance of an existing beneficiary (owner)
    ChangeAllowance { id: String, allowance: Uint128 },
    /// Remove a beneficiary, no-op if absent (owner)
    RemoveBeneficiary { id: String },
    /// Hand the wallet to a new owner (owner)
    TransferOwnership { new_owner: String },
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Get the current owner
    #[returns(OwnerResponse)]
    Owner {},

    /// Get a beneficiary entry; absent entries read as `{ id: null, allowance: 0 }`
    #[returns(BeneficiaryResponse)]
    Beneficiary { id: String },

    /// List beneficiaries in address order
    #[returns(BeneficiariesResponse)]
    Beneficiaries {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    /// Get the wallet balance
    #[returns(BalanceResponse)]
    Balance {},

    /// Get the wallet configuration
    #[returns(ConfigResponse)]
    Config {},
}

// Response types

#[cw_serde]
pub struct OwnerResponse {
    pub owner: Addr,
}

#[cw_serde]
pub struct BeneficiaryResponse {
    pub id: Option<Addr>,
    pub allowance: Uint128,
}

#[cw_serde]
pub struct BeneficiariesResponse {
    pub beneficiaries: Vec<BeneficiaryResponse>,
}

#[cw_serde]
pub struct BalanceResponse {
    pub denom: String,
    pub amount: Uint128,
}

#[cw_serde]
pub struct ConfigResponse {
    pub owner: Addr,
    pub denom: String,
}
