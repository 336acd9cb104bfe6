use cosmwasm_std::{Addr, MessageInfo, Storage, Uint128};

use crate::error::ContractError;
use crate::state::{Config, BENEFICIARIES, CONFIG};

/// Capability a handler needs from its caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    /// Administrative operations
    Owner,
    /// Withdrawals: the owner, or a beneficiary with a non-zero allowance
    Spender,
}

/// Who the caller turned out to be once authorized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Caller {
    Owner,
    Beneficiary { allowance: Uint128 },
}

/// Single authorization check shared by every mutating handler.
/// Hands back the loaded config along with the caller's standing.
pub fn requires(
    storage: &dyn Storage,
    caller: &Addr,
    role: Role,
) -> Result<(Config, Caller), ContractError> {
    let config = CONFIG.load(storage)?;
    if *caller == config.owner {
        return Ok((config, Caller::Owner));
    }

    let caller = match role {
        Role::Owner => return Err(ContractError::Unauthorized {}),
        Role::Spender => match BENEFICIARIES.may_load(storage, caller)? {
            Some(beneficiary) if !beneficiary.allowance.is_zero() => Caller::Beneficiary {
                allowance: beneficiary.allowance,
            },
            _ => return Err(ContractError::Unauthorized {}),
        },
    };

    Ok((config, caller))
}

/// Rejects funds attached to any message other than a deposit.
pub fn nonpayable(info: &MessageInfo) -> Result<(), ContractError> {
    if info.funds.is_empty() {
        Ok(())
    } else {
        Err(ContractError::UnexpectedFunds {})
    }
}
