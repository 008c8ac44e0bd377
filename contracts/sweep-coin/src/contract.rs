#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    attr, to_binary, Addr, Api, Binary, CosmosMsg, Deps, DepsMut, Env, MessageInfo, QuerierWrapper,
    Response, StdError, StdResult, Storage, Uint128,
};
use cw2::set_contract_version;
use cw20::Cw20ReceiveMsg;

use sweep::helpers::query_transfer_allowed;
use sweep::math::PRECISION;
use sweep::sweep_coin::{Config, ExecuteMsg, InstantiateMsg, QueryMsg};

use crate::error::ContractError;
use crate::minters::{
    add_minter, minter_burn_from, minter_mint, remove_minter, set_minter_enabled,
    set_minter_max_amount,
};
use crate::query::{
    get_amm_price, get_target_price, is_mint_allowed, query_allowance, query_balance,
    query_convert_to_sweep, query_convert_to_usd, query_is_valid_minter, query_minter,
    query_minters, query_token_info,
};
use crate::state::{TokenInfo, ALLOWANCES, BALANCES, CONFIG, MINTERS, OWNERSHIP_TRANSFER, TOKEN_INFO};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:sweep-coin";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

//Constants
const DEFAULT_TARGET_PRICE: u128 = 1_000_000u128;
const DEFAULT_PERIOD_TIME: u64 = 604_800u64;
const DEFAULT_STEP_VALUE: u32 = 2_500u32;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    let owner = match msg.owner {
        Some(owner) => validate_address(deps.api, &owner)?,
        None => info.sender,
    };
    let optional_addr = |addr: Option<String>| -> Result<Option<Addr>, ContractError> {
        addr.map(|addr| validate_address(deps.api, &addr)).transpose()
    };

    let target_price = msg.target_price.unwrap_or(Uint128::new(DEFAULT_TARGET_PRICE));
    if target_price.is_zero() {
        return Err(ContractError::ZeroAmountDetected {});
    }
    if msg.arb_spread > PRECISION {
        return Err(ContractError::InvalidRatio { ratio: msg.arb_spread });
    }

    let config = Config {
        treasury: optional_addr(msg.treasury)?.unwrap_or_else(|| owner.clone()),
        balancer: optional_addr(msg.balancer)?,
        collateral_agency: optional_addr(msg.collateral_agency)?.unwrap_or_else(|| owner.clone()),
        amm: optional_addr(msg.amm)?,
        transfer_approver: optional_addr(msg.transfer_approver)?,
        owner,
        paused: false,
        arb_spread: msg.arb_spread,
        current_target_price: target_price,
        next_target_price: target_price,
        period_start: env.block.time.seconds(),
        period_time: msg.period_time.unwrap_or(DEFAULT_PERIOD_TIME),
        interest_rate: 0,
        step_value: DEFAULT_STEP_VALUE,
    };

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    CONFIG.save(deps.storage, &config)?;
    TOKEN_INFO.save(
        deps.storage,
        &TokenInfo {
            name: msg.name,
            symbol: msg.symbol,
            decimals: msg.decimals,
            total_supply: Uint128::zero(),
        },
    )?;
    MINTERS.save(deps.storage, &vec![])?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("config", format!("{:?}", config))
        .add_attribute("contract_address", env.contract.address))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Transfer { recipient, amount } => {
            execute_transfer(deps, info, recipient, amount)
        }
        ExecuteMsg::TransferFrom { owner, recipient, amount } => {
            execute_transfer_from(deps, info, owner, recipient, amount)
        }
        ExecuteMsg::Send { contract, amount, msg } => {
            execute_send(deps, info, contract, amount, msg)
        }
        ExecuteMsg::IncreaseAllowance { spender, amount } => {
            update_allowance(deps, info, spender, amount, true)
        }
        ExecuteMsg::DecreaseAllowance { spender, amount } => {
            update_allowance(deps, info, spender, amount, false)
        }
        ExecuteMsg::MinterMint { recipient, amount } => {
            minter_mint(deps, env, info, recipient, amount)
        }
        ExecuteMsg::MinterBurnFrom { amount } => minter_burn_from(deps, info, amount),
        ExecuteMsg::AddMinter { minter, max_amount } => add_minter(deps, info, minter, max_amount),
        ExecuteMsg::RemoveMinter { minter } => remove_minter(deps, info, minter),
        ExecuteMsg::SetMinterMaxAmount { minter, max_amount } => {
            set_minter_max_amount(deps, info, minter, max_amount)
        }
        ExecuteMsg::SetMinterEnabled { minter, is_enabled } => {
            set_minter_enabled(deps, info, minter, is_enabled)
        }
        ExecuteMsg::StartNewPeriod {} => start_new_period(deps, env, info),
        ExecuteMsg::SetArbSpread { arb_spread } => set_arb_spread(deps, info, arb_spread),
        ExecuteMsg::SetInterestRate { interest_rate } => {
            set_interest_rate(deps, info, interest_rate)
        }
        ExecuteMsg::SetTargetPrice { current, next } => {
            set_target_price(deps, info, current, next)
        }
        ExecuteMsg::TransferOwnership { new_owner } => {
            let config = CONFIG.load(deps.storage)?;
            assert_owner(&config, &info.sender)?;

            let new_owner = validate_address(deps.api, &new_owner)?;
            OWNERSHIP_TRANSFER.save(deps.storage, &new_owner)?;

            Ok(Response::new().add_attributes(vec![
                attr("method", "transfer_ownership"),
                attr("owner_transfer", new_owner),
            ]))
        }
        ExecuteMsg::AcceptOwnership {} => {
            let pending = OWNERSHIP_TRANSFER.may_load(deps.storage)?;
            if pending.as_ref() != Some(&info.sender) {
                return Err(ContractError::Unauthorized {});
            }
            OWNERSHIP_TRANSFER.remove(deps.storage);

            let mut config = CONFIG.load(deps.storage)?;
            config.owner = info.sender;
            CONFIG.save(deps.storage, &config)?;

            Ok(Response::new().add_attributes(vec![
                attr("method", "accept_ownership"),
                attr("owner", config.owner),
            ]))
        }
        msg @ (ExecuteMsg::SetTransferApprover { .. }
        | ExecuteMsg::SetTreasury { .. }
        | ExecuteMsg::SetBalancer { .. }
        | ExecuteMsg::SetCollateralAgent { .. }
        | ExecuteMsg::SetAmm { .. }
        | ExecuteMsg::Pause {}
        | ExecuteMsg::Unpause {}
        | ExecuteMsg::SetPeriodTime { .. }
        | ExecuteMsg::SetStepValue { .. }) => update_config(deps, info, msg),
    }
}

/// Owner-only role & risk setters
fn update_config(
    deps: DepsMut,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    assert_owner(&config, &info.sender)?;

    let mut attrs = vec![attr("method", "update_config")];

    match msg {
        ExecuteMsg::SetTransferApprover { approver } => {
            config.transfer_approver = approver
                .map(|approver| validate_address(deps.api, &approver))
                .transpose()?;
            attrs.push(attr("transfer_approver", format!("{:?}", config.transfer_approver)));
        }
        ExecuteMsg::SetTreasury { treasury } => {
            config.treasury = validate_address(deps.api, &treasury)?;
            attrs.push(attr("treasury", config.treasury.to_string()));
        }
        ExecuteMsg::SetBalancer { balancer } => {
            let balancer = validate_address(deps.api, &balancer)?;
            attrs.push(attr("balancer", balancer.to_string()));
            config.balancer = Some(balancer);
        }
        ExecuteMsg::SetCollateralAgent { agent } => {
            config.collateral_agency = validate_address(deps.api, &agent)?;
            attrs.push(attr("collateral_agency", config.collateral_agency.to_string()));
        }
        ExecuteMsg::SetAmm { amm } => {
            let amm = validate_address(deps.api, &amm)?;
            attrs.push(attr("amm", amm.to_string()));
            config.amm = Some(amm);
        }
        ExecuteMsg::Pause {} => {
            config.paused = true;
            attrs.push(attr("paused", "true"));
        }
        ExecuteMsg::Unpause {} => {
            config.paused = false;
            attrs.push(attr("paused", "false"));
        }
        ExecuteMsg::SetPeriodTime { period_time } => {
            config.period_time = period_time;
            attrs.push(attr("period_time", period_time.to_string()));
        }
        ExecuteMsg::SetStepValue { step_value } => {
            config.step_value = step_value;
            attrs.push(attr("step_value", step_value.to_string()));
        }
        msg => {
            return Err(StdError::generic_err(format!("not a config update: {:?}", msg)).into())
        }
    }

    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attributes(attrs))
}

/// Commits the next target price as the current anchor and restarts the crawl
fn start_new_period(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    assert_owner(&config, &info.sender)?;

    config.current_target_price = config.next_target_price;
    config.period_start = env.block.time.seconds();
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "start_new_period"),
        attr("target_price", config.current_target_price),
        attr("period_start", config.period_start.to_string()),
    ]))
}

fn set_arb_spread(deps: DepsMut, info: MessageInfo, arb_spread: u32) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    assert_owner_or_balancer(&config, &info.sender)?;
    if arb_spread > PRECISION {
        return Err(ContractError::InvalidRatio { ratio: arb_spread });
    }

    config.arb_spread = arb_spread;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "set_arb_spread"),
        attr("arb_spread", arb_spread.to_string()),
    ]))
}

fn set_interest_rate(
    deps: DepsMut,
    info: MessageInfo,
    interest_rate: i64,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    assert_owner_or_balancer(&config, &info.sender)?;

    config.interest_rate = interest_rate;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "set_interest_rate"),
        attr("interest_rate", interest_rate.to_string()),
    ]))
}

/// Sets both anchors. The crawl keeps its current period start.
fn set_target_price(
    deps: DepsMut,
    info: MessageInfo,
    current: Uint128,
    next: Uint128,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    assert_owner_or_balancer(&config, &info.sender)?;
    if current.is_zero() || next.is_zero() {
        return Err(ContractError::ZeroAmountDetected {});
    }

    config.current_target_price = current;
    config.next_target_price = next;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "set_target_price"),
        attr("current_target_price", current),
        attr("next_target_price", next),
    ]))
}

fn execute_transfer(
    deps: DepsMut,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let recipient = validate_address(deps.api, &recipient)?;
    if amount.is_zero() {
        return Err(ContractError::ZeroAmountDetected {});
    }
    assert_transfer(&deps.querier, &config, &recipient)?;

    debit(deps.storage, &info.sender, amount)?;
    credit(deps.storage, &recipient, amount)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "transfer"),
        attr("from", info.sender),
        attr("to", recipient),
        attr("amount", amount),
    ]))
}

fn execute_transfer_from(
    deps: DepsMut,
    info: MessageInfo,
    owner: String,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let owner = validate_address(deps.api, &owner)?;
    let recipient = validate_address(deps.api, &recipient)?;
    if amount.is_zero() {
        return Err(ContractError::ZeroAmountDetected {});
    }
    assert_transfer(&deps.querier, &config, &recipient)?;

    ALLOWANCES.update(
        deps.storage,
        (&owner, &info.sender),
        |allowance| -> Result<_, ContractError> {
            allowance
                .unwrap_or_default()
                .checked_sub(amount)
                .map_err(|_| ContractError::InsufficientAllowance {})
        },
    )?;
    debit(deps.storage, &owner, amount)?;
    credit(deps.storage, &recipient, amount)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "transfer_from"),
        attr("from", owner),
        attr("to", recipient),
        attr("by", info.sender),
        attr("amount", amount),
    ]))
}

/// Transfer to `contract` followed by its `Receive` hook
fn execute_send(
    deps: DepsMut,
    info: MessageInfo,
    contract: String,
    amount: Uint128,
    msg: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let contract = validate_address(deps.api, &contract)?;
    if amount.is_zero() {
        return Err(ContractError::ZeroAmountDetected {});
    }
    assert_transfer(&deps.querier, &config, &contract)?;

    debit(deps.storage, &info.sender, amount)?;
    credit(deps.storage, &contract, amount)?;

    let hook: CosmosMsg = Cw20ReceiveMsg {
        sender: info.sender.to_string(),
        amount,
        msg,
    }
    .into_cosmos_msg(contract.to_string())?;

    Ok(Response::new()
        .add_message(hook)
        .add_attributes(vec![
            attr("method", "send"),
            attr("from", info.sender),
            attr("to", contract),
            attr("amount", amount),
        ]))
}

fn update_allowance(
    deps: DepsMut,
    info: MessageInfo,
    spender: String,
    amount: Uint128,
    increase: bool,
) -> Result<Response, ContractError> {
    let spender = validate_address(deps.api, &spender)?;
    if spender == info.sender {
        return Err(ContractError::Unauthorized {});
    }

    let key = (&info.sender, &spender);
    let current = ALLOWANCES.may_load(deps.storage, key)?.unwrap_or_default();
    let allowance = if increase {
        current.checked_add(amount)?
    } else {
        current.saturating_sub(amount)
    };

    if allowance.is_zero() {
        ALLOWANCES.remove(deps.storage, key);
    } else {
        ALLOWANCES.save(deps.storage, key, &allowance)?;
    }

    Ok(Response::new().add_attributes(vec![
        attr("method", if increase { "increase_allowance" } else { "decrease_allowance" }),
        attr("owner", info.sender.to_string()),
        attr("spender", spender),
        attr("allowance", allowance),
    ]))
}

/// Pause & transfer policy checks for any movement of tokens
fn assert_transfer(querier: &QuerierWrapper, config: &Config, recipient: &Addr) -> Result<(), ContractError> {
    if config.paused {
        return Err(ContractError::Paused {});
    }
    assert_credit_allowed(querier, config, recipient)
}

/// Runs the transfer policy predicate on the receiving party. No policy, no restriction.
pub fn assert_credit_allowed(
    querier: &QuerierWrapper,
    config: &Config,
    recipient: &Addr,
) -> Result<(), ContractError> {
    if let Some(approver) = &config.transfer_approver {
        if !query_transfer_allowed(querier, approver, recipient)? {
            return Err(ContractError::TransferNotAllowed {});
        }
    }
    Ok(())
}

pub fn credit(storage: &mut dyn Storage, address: &Addr, amount: Uint128) -> Result<Uint128, ContractError> {
    BALANCES.update(storage, address, |balance| -> Result<_, ContractError> {
        Ok(balance.unwrap_or_default().checked_add(amount)?)
    })
}

pub fn debit(storage: &mut dyn Storage, address: &Addr, amount: Uint128) -> Result<Uint128, ContractError> {
    BALANCES.update(storage, address, |balance| -> Result<_, ContractError> {
        balance
            .unwrap_or_default()
            .checked_sub(amount)
            .map_err(|_| ContractError::NotEnoughBalance {})
    })
}

pub fn assert_owner(config: &Config, sender: &Addr) -> Result<(), ContractError> {
    if sender != &config.owner {
        return Err(ContractError::NotGovernance {});
    }
    Ok(())
}

fn assert_owner_or_balancer(config: &Config, sender: &Addr) -> Result<(), ContractError> {
    if sender != &config.owner && Some(sender) != config.balancer.as_ref() {
        return Err(ContractError::NotOwnerOrBalancer {});
    }
    Ok(())
}

/// Empty addresses are reported as `ZeroAddressDetected`
pub fn validate_address(api: &dyn Api, address: &str) -> Result<Addr, ContractError> {
    if address.trim().is_empty() {
        return Err(ContractError::ZeroAddressDetected {});
    }
    Ok(api.addr_validate(address)?)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::TokenInfo {} => to_binary(&query_token_info(deps)?),
        QueryMsg::Balance { address } => to_binary(&query_balance(deps, address)?),
        QueryMsg::Allowance { owner, spender } => {
            to_binary(&query_allowance(deps, owner, spender)?)
        }
        QueryMsg::Minter { minter } => to_binary(&query_minter(deps, minter)?),
        QueryMsg::Minters { offset, limit } => to_binary(&query_minters(deps, offset, limit)?),
        QueryMsg::IsValidMinter { minter } => to_binary(&query_is_valid_minter(deps, minter)?),
        QueryMsg::TargetPrice {} => {
            let config = CONFIG.load(deps.storage)?;
            to_binary(&get_target_price(&config, &env)?)
        }
        QueryMsg::AmmPrice {} => {
            let config = CONFIG.load(deps.storage)?;
            to_binary(&get_amm_price(&deps.querier, &config, &env)?)
        }
        QueryMsg::IsMintAllowed {} => {
            let config = CONFIG.load(deps.storage)?;
            to_binary(&is_mint_allowed(&deps.querier, &config, &env)?)
        }
        QueryMsg::ConvertToUsd { amount } => to_binary(&query_convert_to_usd(deps, env, amount)?),
        QueryMsg::ConvertToSweep { amount } => {
            to_binary(&query_convert_to_sweep(deps, env, amount)?)
        }
    }
}
