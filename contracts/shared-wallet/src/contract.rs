use cosmwasm_std::{
    coins, entry_point, to_json_binary, BankMsg, Binary, Deps, DepsMut, Env, MessageInfo,
    Order, Response, StdResult, Uint128,
};
use cw2::{ensure_from_older_version, get_contract_version, set_contract_version};
use cw_storage_plus::Bound;

use crate::auth::{nonpayable, requires, Caller, Role};
use crate::error::ContractError;
use crate::msg::{
    BalanceResponse, BeneficiariesResponse, BeneficiaryResponse, ConfigResponse, ExecuteMsg,
    InstantiateMsg, MigrateMsg, OwnerResponse, QueryMsg,
};
use crate::state::{Beneficiary, Config, BENEFICIARIES, CONFIG};

const CONTRACT_NAME: &str = "crates.io:shared-wallet";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    if msg.denom.is_empty() {
        return Err(ContractError::InvalidDenom {});
    }

    // Funds sent along with instantiation are the first deposit
    let initial_deposit = if info.funds.is_empty() {
        Uint128::zero()
    } else {
        deposit_amount(&info, &msg.denom)?
    };

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let config = Config {
        owner: info.sender.clone(),
        denom: msg.denom,
    };
    CONFIG.save(deps.storage, &config)?;
    BENEFICIARIES.save(
        deps.storage,
        &info.sender,
        &Beneficiary {
            id: info.sender.clone(),
            allowance: Uint128::zero(),
        },
    )?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", info.sender)
        .add_attribute("denom", config.denom)
        .add_attribute("deposit", initial_deposit))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Deposit {} => execute_deposit(deps, env, info),
        ExecuteMsg::Withdraw { amount } => execute_withdraw(deps, env, info, amount),
        ExecuteMsg::AddBeneficiary { id, allowance } => {
            execute_add_beneficiary(deps, info, id, allowance)
        }
        ExecuteMsg::ChangeAllowance { id, allowance } => {
            execute_change_allowance(deps, info, id, allowance)
        }
        ExecuteMsg::RemoveBeneficiary { id } => execute_remove_beneficiary(deps, info, id),
        ExecuteMsg::TransferOwnership { new_owner } => {
            execute_transfer_ownership(deps, info, new_owner)
        }
    }
}

/// The bank has already credited the attached funds by the time this runs;
/// plain transfers to the contract are credited the same way, without an event.
pub fn execute_deposit(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let amount = deposit_amount(&info, &config.denom)?;
    let balance = wallet_balance(deps.as_ref(), &env, &config.denom)?;

    Ok(Response::new()
        .add_attribute("method", "deposit")
        .add_attribute("sender", info.sender)
        .add_attribute("amount", amount)
        .add_attribute("balance", balance))
}

pub fn execute_withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let (config, caller) = requires(deps.storage, &info.sender, Role::Spender)?;

    if amount.is_zero() {
        return Err(ContractError::InvalidAmount {});
    }

    let balance = wallet_balance(deps.as_ref(), &env, &config.denom)?;
    let remaining_balance =
        balance
            .checked_sub(amount)
            .map_err(|_| ContractError::InsufficientBalance {
                balance,
                requested: amount,
            })?;

    // Beneficiaries spend out of their allowance; the owner is unbounded
    let remaining_allowance = match caller {
        Caller::Owner => None,
        Caller::Beneficiary { allowance } => Some(allowance.checked_sub(amount).map_err(
            |_| ContractError::AllowanceExceeded {
                allowance,
                requested: amount,
            },
        )?),
    };

    if let Some(allowance) = remaining_allowance {
        BENEFICIARIES.save(
            deps.storage,
            &info.sender,
            &Beneficiary {
                id: info.sender.clone(),
                allowance,
            },
        )?;
    }

    let mut response = Response::new()
        .add_message(BankMsg::Send {
            to_address: info.sender.to_string(),
            amount: coins(amount.u128(), config.denom),
        })
        .add_attribute("method", "withdraw")
        .add_attribute("recipient", info.sender)
        .add_attribute("amount", amount)
        .add_attribute("balance", remaining_balance);
    if let Some(allowance) = remaining_allowance {
        response = response.add_attribute("allowance", allowance);
    }

    Ok(response)
}

pub fn execute_add_beneficiary(
    deps: DepsMut,
    info: MessageInfo,
    id: String,
    allowance: Uint128,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    requires(deps.storage, &info.sender, Role::Owner)?;
    let id_addr = deps.api.addr_validate(&id)?;

    BENEFICIARIES.save(
        deps.storage,
        &id_addr,
        &Beneficiary {
            id: id_addr.clone(),
            allowance,
        },
    )?;

    Ok(Response::new()
        .add_attribute("method", "add_beneficiary")
        .add_attribute("beneficiary", id_addr)
        .add_attribute("allowance", allowance))
}

pub fn execute_change_allowance(
    deps: DepsMut,
    info: MessageInfo,
    id: String,
    allowance: Uint128,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    requires(deps.storage, &info.sender, Role::Owner)?;
    let id_addr = deps.api.addr_validate(&id)?;

    BENEFICIARIES.update(deps.storage, &id_addr, |maybe_beneficiary| {
        let mut beneficiary = maybe_beneficiary.ok_or(ContractError::BeneficiaryNotFound {})?;
        beneficiary.allowance = allowance;
        Ok::<_, ContractError>(beneficiary)
    })?;

    Ok(Response::new()
        .add_attribute("method", "change_allowance")
        .add_attribute("beneficiary", id_addr)
        .add_attribute("allowance", allowance))
}

pub fn execute_remove_beneficiary(
    deps: DepsMut,
    info: MessageInfo,
    id: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let (config, _) = requires(deps.storage, &info.sender, Role::Owner)?;
    let id_addr = deps.api.addr_validate(&id)?;

    if id_addr == config.owner {
        return Err(ContractError::CannotRemoveOwner {});
    }

    let existed = BENEFICIARIES.has(deps.storage, &id_addr);
    BENEFICIARIES.remove(deps.storage, &id_addr);

    Ok(Response::new()
        .add_attribute("method", "remove_beneficiary")
        .add_attribute("beneficiary", id_addr)
        .add_attribute("existed", existed.to_string()))
}

pub fn execute_transfer_ownership(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let (mut config, _) = requires(deps.storage, &info.sender, Role::Owner)?;
    let new_owner_addr = deps.api.addr_validate(&new_owner)?;

    config.owner = new_owner_addr.clone();
    CONFIG.save(deps.storage, &config)?;

    // The owner is always listed; an existing entry keeps its allowance
    if !BENEFICIARIES.has(deps.storage, &new_owner_addr) {
        BENEFICIARIES.save(
            deps.storage,
            &new_owner_addr,
            &Beneficiary {
                id: new_owner_addr.clone(),
                allowance: Uint128::zero(),
            },
        )?;
    }

    Ok(Response::new()
        .add_attribute("method", "transfer_ownership")
        .add_attribute("previous_owner", info.sender)
        .add_attribute("new_owner", new_owner_addr))
}

/// Amount of a deposit: exactly one non-zero coin of the wallet denom.
fn deposit_amount(info: &MessageInfo, denom: &str) -> Result<Uint128, ContractError> {
    match info.funds.as_slice() {
        [coin] if coin.denom == denom => {
            if coin.amount.is_zero() {
                Err(ContractError::InvalidAmount {})
            } else {
                Ok(coin.amount)
            }
        }
        [] => Err(ContractError::InvalidAmount {}),
        _ => Err(ContractError::InvalidFunds {
            denom: denom.to_string(),
        }),
    }
}

/// Funds held by the contract account in the bank module.
fn wallet_balance(deps: Deps, env: &Env, denom: &str) -> StdResult<Uint128> {
    let coin = deps.querier.query_balance(&env.contract.address, denom)?;
    Ok(coin.amount)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Owner {} => to_json_binary(&query_owner(deps)?),
        QueryMsg::Beneficiary { id } => to_json_binary(&query_beneficiary(deps, id)?),
        QueryMsg::Beneficiaries { start_after, limit } => {
            to_json_binary(&query_beneficiaries(deps, start_after, limit)?)
        }
        QueryMsg::Balance {} => to_json_binary(&query_balance(deps, env)?),
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
    }
}

fn query_owner(deps: Deps) -> StdResult<OwnerResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(OwnerResponse {
        owner: config.owner,
    })
}

fn query_beneficiary(deps: Deps, id: String) -> StdResult<BeneficiaryResponse> {
    let id_addr = deps.api.addr_validate(&id)?;
    let beneficiary = BENEFICIARIES.may_load(deps.storage, &id_addr)?;

    Ok(beneficiary
        .map(beneficiary_to_response)
        .unwrap_or(BeneficiaryResponse {
            id: None,
            allowance: Uint128::zero(),
        }))
}

fn query_beneficiaries(
    deps: Deps,
    start_after: Option<String>,
    limit: Option<u32>,
) -> StdResult<BeneficiariesResponse> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start_addr = start_after
        .map(|addr| deps.api.addr_validate(&addr))
        .transpose()?;
    let start = start_addr.as_ref().map(Bound::exclusive);

    let beneficiaries = BENEFICIARIES
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(_, beneficiary)| beneficiary_to_response(beneficiary)))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(BeneficiariesResponse { beneficiaries })
}

fn query_balance(deps: Deps, env: Env) -> StdResult<BalanceResponse> {
    let config = CONFIG.load(deps.storage)?;
    let amount = wallet_balance(deps, &env, &config.denom)?;
    Ok(BalanceResponse {
        denom: config.denom,
        amount,
    })
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: config.owner,
        denom: config.denom,
    })
}

fn beneficiary_to_response(beneficiary: Beneficiary) -> BeneficiaryResponse {
    BeneficiaryResponse {
        id: Some(beneficiary.id),
        allowance: beneficiary.allowance,
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::InvalidMigration {
            contract: stored.contract,
        });
    }
    // Rejects downgrades and records the new version
    ensure_from_older_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}
