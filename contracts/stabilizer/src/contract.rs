#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    attr, to_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response, StdError,
    StdResult, Uint128,
};
use cw2::set_contract_version;

use sweep::helpers::SweepContract;
use sweep::math::PRECISION;
use sweep::stabilizer::{Config, ExecuteMsg, InstantiateMsg, QueryMsg, RiskConfig};

use crate::error::ContractError;
use crate::invest::{
    auto_invest, buy_sweep_on_amm, collect, divest, invest, sell_sweep_on_amm, DIVEST_REPLY_ID,
    SWAP_REPLY_ID,
};
use crate::liquidations::liquidate;
use crate::positions::{assert_borrower, borrow, pay_fee, repay, withdraw};
use crate::query::{query_debt, query_equity_ratio, query_is_defaulted, query_position};
use crate::reply::{handle_divest_reply, handle_swap_reply};
use crate::risk_engine::{checkpoint_fee, get_valuation};
use crate::state::{Position, CONFIG, POSITION, RISK_CONFIG};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:stabilizer";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    let validate = |address: &str| -> Result<_, ContractError> {
        if address.trim().is_empty() {
            return Err(ContractError::ZeroAddressDetected {});
        }
        Ok(deps.api.addr_validate(address)?)
    };

    let config = Config {
        name: msg.name,
        sweep: validate(&msg.sweep)?,
        borrower: validate(&msg.borrower)?,
        yield_backend: validate(&msg.yield_backend)?,
        amm: validate(&msg.amm)?,
        quote_denom: msg.quote_denom,
    };
    let risk_config = msg.risk_config.unwrap_or_default();
    validate_risk_config(&risk_config)?;

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    CONFIG.save(deps.storage, &config)?;
    RISK_CONFIG.save(deps.storage, &risk_config)?;
    POSITION.save(
        deps.storage,
        &Position {
            sweep_borrowed: Uint128::zero(),
            accrued_fee: Uint128::zero(),
            fee_checkpoint: env.block.time.seconds(),
            asset_value_override: None,
            paused: false,
        },
    )?;

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
        ExecuteMsg::Configure(risk_config) => configure(deps, env, info, risk_config),
        ExecuteMsg::Borrow { amount } => borrow(deps, env, info, amount),
        ExecuteMsg::Repay { amount } => repay(deps, env, info, amount),
        ExecuteMsg::PayFee {} => pay_fee(deps, env, info),
        ExecuteMsg::Invest { amount, slippage } => invest(deps, env, info, amount, slippage),
        ExecuteMsg::Divest { amount, slippage } => divest(deps, env, info, amount, slippage),
        ExecuteMsg::SellSweepOnAmm { amount, min_amount_out } => {
            sell_sweep_on_amm(deps, env, info, amount, min_amount_out)
        }
        ExecuteMsg::BuySweepOnAmm { amount, min_amount_out } => {
            buy_sweep_on_amm(deps, env, info, amount, min_amount_out)
        }
        ExecuteMsg::Collect {} => collect(deps, info),
        ExecuteMsg::Withdraw { asset, amount } => withdraw(deps, env, info, asset, amount),
        ExecuteMsg::AutoInvest { amount, slippage } => {
            auto_invest(deps, env, info, amount, slippage)
        }
        ExecuteMsg::UpdateValue { value } => update_value(deps, info, value),
        ExecuteMsg::Pause {} => set_paused(deps, info, true),
        ExecuteMsg::Unpause {} => set_paused(deps, info, false),
        ExecuteMsg::Liquidate {} => liquidate(deps, env, info),
    }
}

fn validate_risk_config(risk_config: &RiskConfig) -> Result<(), ContractError> {
    for ratio in [
        risk_config.min_equity_ratio,
        risk_config.spread_fee,
        risk_config.liquidator_discount,
        risk_config.auto_invest_min_equity_ratio,
    ] {
        if ratio > PRECISION {
            return Err(ContractError::InvalidRatio { ratio });
        }
    }
    Ok(())
}

/// Replaces the risk configuration wholesale
fn configure(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    risk_config: RiskConfig,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_borrower(&config, &info.sender)?;
    validate_risk_config(&risk_config)?;

    //Fee accrued so far is charged at the old rate
    let mut position = POSITION.load(deps.storage)?;
    checkpoint_fee(deps.storage, &mut position, &env)?;
    POSITION.save(deps.storage, &position)?;

    RISK_CONFIG.save(deps.storage, &risk_config)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "configure"),
        attr("risk_config", format!("{:?}", risk_config)),
    ]))
}

/// Collateral agency pushes the backend's value when it can't be read on-chain
fn update_value(
    deps: DepsMut,
    info: MessageInfo,
    value: Option<Uint128>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let ledger_config = SweepContract(config.sweep).config(&deps.querier)?;
    if info.sender != ledger_config.collateral_agency {
        return Err(ContractError::NotCollateralAgent {});
    }

    POSITION.update(deps.storage, |mut position| -> StdResult<_> {
        position.asset_value_override = value;
        Ok(position)
    })?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "update_value"),
        attr("value", format!("{:?}", value)),
    ]))
}

fn set_paused(deps: DepsMut, info: MessageInfo, paused: bool) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let ledger_config = SweepContract(config.sweep).config(&deps.querier)?;
    if info.sender != ledger_config.owner {
        return Err(ContractError::NotGovernance {});
    }

    POSITION.update(deps.storage, |mut position| -> StdResult<_> {
        position.paused = paused;
        Ok(position)
    })?;

    Ok(Response::new().add_attributes(vec![
        attr("method", if paused { "pause" } else { "unpause" }),
        attr("paused", paused.to_string()),
    ]))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, env: Env, msg: Reply) -> Result<Response, ContractError> {
    match msg.id {
        SWAP_REPLY_ID => handle_swap_reply(deps, env, msg),
        DIVEST_REPLY_ID => handle_divest_reply(deps, env, msg),
        id => Err(StdError::generic_err(format!("invalid reply id: {}", id)).into()),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::RiskConfig {} => to_binary(&RISK_CONFIG.load(deps.storage)?),
        QueryMsg::Position {} => to_binary(&query_position(deps, env)?),
        QueryMsg::EquityRatio {} => to_binary(&query_equity_ratio(deps, env)?),
        QueryMsg::IsDefaulted {} => to_binary(&query_is_defaulted(deps, env)?),
        QueryMsg::AssetValue {} => to_binary(&get_valuation(deps, &env)?.asset_value),
        QueryMsg::CurrentValue {} => to_binary(&get_valuation(deps, &env)?.current_value()?),
        QueryMsg::Debt {} => to_binary(&query_debt(deps, env)?),
    }
}
