use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

#[cw_serde]
pub struct Config {
    /// Sole administrator of the wallet
    pub owner: Addr,
    /// Native denomination accepted on deposit and paid out on withdrawal
    pub denom: String,
}

#[cw_serde]
pub struct Beneficiary {
    pub id: Addr,
    /// Remaining spending budget (informational for the owner)
    pub allowance: Uint128,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// Beneficiaries indexed by address. A missing key means "not a beneficiary".
pub const BENEFICIARIES: Map<&Addr, Beneficiary> = Map::new("beneficiaries");
