use cosmwasm_std::{
    attr, coins, to_binary, CosmosMsg, DepsMut, Env, MessageInfo, Response, StdResult, SubMsg,
    Uint128, WasmMsg,
};

use sweep::amm::{ExecuteMsg as AmmExecuteMsg, SwapHookMsg};
use sweep::helpers::SweepContract;
use sweep::math::{apply_ratio, convert_to_sweep, convert_to_usd, PRECISION};
use sweep::stabilizer::{Config, StabilizerAsset};
use sweep::sweep_coin::ExecuteMsg as SweepExecuteMsg;
use sweep::yield_backend::ExecuteMsg as BackendExecuteMsg;

use crate::error::ContractError;
use crate::positions::{assert_borrower, assert_not_paused, increase_debt};
use crate::risk_engine::get_valuation;
use crate::state::{
    AfterSwap, DivestPropagation, Position, SwapPropagation, CONFIG, DIVEST, POSITION, RISK_CONFIG,
    SWAP,
};

pub const SWAP_REPLY_ID: u64 = 1u64;
pub const DIVEST_REPLY_ID: u64 = 2u64;

fn assert_slippage(slippage: u32) -> Result<(), ContractError> {
    if slippage > PRECISION {
        return Err(ContractError::InvalidRatio { ratio: slippage });
    }
    Ok(())
}

/// Sends `amount` of quote currency into the yield backend
pub fn invest_msg(config: &Config, amount: Uint128) -> StdResult<CosmosMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: config.yield_backend.to_string(),
        msg: to_binary(&BackendExecuteMsg::Invest {})?,
        funds: coins(amount.u128(), config.quote_denom.clone()),
    }
    .into())
}

pub fn divest_msg(config: &Config, amount: Uint128) -> StdResult<CosmosMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: config.yield_backend.to_string(),
        msg: to_binary(&BackendExecuteMsg::Divest { amount })?,
        funds: vec![],
    }
    .into())
}

/// Sells stablecoin through the ledger's `Send` hook on the swap venue
fn sell_sweep_msg(config: &Config, amount: Uint128, min_amount_out: Uint128) -> StdResult<CosmosMsg> {
    SweepContract(config.sweep.clone()).call(SweepExecuteMsg::Send {
        contract: config.amm.to_string(),
        amount,
        msg: to_binary(&SwapHookMsg::Swap { min_amount_out })?,
    })
}

/// Buys stablecoin with `amount` of quote currency
pub fn buy_sweep_msg(config: &Config, amount: Uint128, min_amount_out: Uint128) -> StdResult<CosmosMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: config.amm.to_string(),
        msg: to_binary(&AmmExecuteMsg::Swap { min_amount_out })?,
        funds: coins(amount.u128(), config.quote_denom.clone()),
    }
    .into())
}

/// Keeps a pushed asset value in step with funds moved in or out of the backend
pub fn adjust_asset_value(position: &mut Position, invested: Uint128, divested: Uint128) {
    if let Some(value) = position.asset_value_override {
        position.asset_value_override = Some(value.saturating_add(invested).saturating_sub(divested));
    }
}

/// Invests `amount` of quote currency.
/// A short quote balance is topped up by selling idle stablecoin, priced at target within `slippage`.
pub fn invest(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
    slippage: u32,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_borrower(&config, &info.sender)?;

    let mut position = POSITION.load(deps.storage)?;
    assert_not_paused(&position)?;
    assert_slippage(slippage)?;
    if amount.is_zero() {
        return Err(ContractError::ZeroAmountDetected {});
    }

    let valuation = get_valuation(deps.as_ref(), &env)?;
    let attrs = vec![
        attr("method", "invest"),
        attr("amount", amount),
        attr("slippage", slippage.to_string()),
    ];

    if valuation.quote_balance >= amount {
        adjust_asset_value(&mut position, amount, Uint128::zero());
        POSITION.save(deps.storage, &position)?;

        return Ok(Response::new()
            .add_message(invest_msg(&config, amount)?)
            .add_attributes(attrs));
    }

    let shortfall = amount - valuation.quote_balance;
    let sweep_amount = convert_to_sweep(shortfall, valuation.target_price)?;
    if sweep_amount > valuation.sweep_balance {
        return Err(ContractError::NotEnoughBalance {});
    }
    let min_amount_out = apply_ratio(shortfall, PRECISION - slippage)?;

    SWAP.save(
        deps.storage,
        &SwapPropagation {
            asset_out: StabilizerAsset::Quote,
            balance_before: valuation.quote_balance,
            min_amount_out,
            after_swap: AfterSwap::Invest { amount },
        },
    )?;
    let sub_msg = SubMsg::reply_on_success(
        sell_sweep_msg(&config, sweep_amount, min_amount_out)?,
        SWAP_REPLY_ID,
    );

    Ok(Response::new()
        .add_submessage(sub_msg)
        .add_attributes(attrs)
        .add_attribute("sweep_sold", sweep_amount))
}

/// Pulls `amount` of quote currency out of the backend.
/// With a `slippage` bound the proceeds are used to buy back stablecoin.
pub fn divest(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
    slippage: Option<u32>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_borrower(&config, &info.sender)?;

    if amount.is_zero() {
        return Err(ContractError::ZeroAmountDetected {});
    }
    let valuation = get_valuation(deps.as_ref(), &env)?;
    if amount > valuation.asset_value {
        return Err(ContractError::NotEnoughBalance {});
    }

    let mut position = POSITION.load(deps.storage)?;
    adjust_asset_value(&mut position, Uint128::zero(), amount);
    POSITION.save(deps.storage, &position)?;

    let msg = divest_msg(&config, amount)?;
    let response = Response::new().add_attributes(vec![
        attr("method", "divest"),
        attr("amount", amount),
    ]);

    match slippage {
        Some(slippage) => {
            assert_slippage(slippage)?;
            DIVEST.save(
                deps.storage,
                &DivestPropagation {
                    quote_before: valuation.quote_balance,
                    slippage,
                },
            )?;

            Ok(response
                .add_submessage(SubMsg::reply_on_success(msg, DIVEST_REPLY_ID))
                .add_attribute("slippage", slippage.to_string()))
        }
        None => Ok(response.add_message(msg)),
    }
}

/// Sells `amount` of idle stablecoin for at least `min_amount_out` quote currency
pub fn sell_sweep_on_amm(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
    min_amount_out: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_borrower(&config, &info.sender)?;
    assert_not_paused(&POSITION.load(deps.storage)?)?;
    if amount.is_zero() {
        return Err(ContractError::ZeroAmountDetected {});
    }

    let valuation = get_valuation(deps.as_ref(), &env)?;
    if amount > valuation.sweep_balance {
        return Err(ContractError::NotEnoughBalance {});
    }

    SWAP.save(
        deps.storage,
        &SwapPropagation {
            asset_out: StabilizerAsset::Quote,
            balance_before: valuation.quote_balance,
            min_amount_out,
            after_swap: AfterSwap::Hold,
        },
    )?;

    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_success(
            sell_sweep_msg(&config, amount, min_amount_out)?,
            SWAP_REPLY_ID,
        ))
        .add_attributes(vec![
            attr("method", "sell_sweep_on_amm"),
            attr("amount", amount),
            attr("min_amount_out", min_amount_out),
        ]))
}

/// Spends `amount` of idle quote currency on at least `min_amount_out` stablecoin
pub fn buy_sweep_on_amm(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
    min_amount_out: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_borrower(&config, &info.sender)?;
    assert_not_paused(&POSITION.load(deps.storage)?)?;
    if amount.is_zero() {
        return Err(ContractError::ZeroAmountDetected {});
    }

    let valuation = get_valuation(deps.as_ref(), &env)?;
    if amount > valuation.quote_balance {
        return Err(ContractError::NotEnoughBalance {});
    }

    SWAP.save(
        deps.storage,
        &SwapPropagation {
            asset_out: StabilizerAsset::Sweep,
            balance_before: valuation.sweep_balance,
            min_amount_out,
            after_swap: AfterSwap::Hold,
        },
    )?;

    Ok(Response::new()
        .add_submessage(SubMsg::reply_on_success(
            buy_sweep_msg(&config, amount, min_amount_out)?,
            SWAP_REPLY_ID,
        ))
        .add_attributes(vec![
            attr("method", "buy_sweep_on_amm"),
            attr("amount", amount),
            attr("min_amount_out", min_amount_out),
        ]))
}

/// Harvests backend rewards straight to the borrower
pub fn collect(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_borrower(&config, &info.sender)?;

    let msg = WasmMsg::Execute {
        contract_addr: config.yield_backend.to_string(),
        msg: to_binary(&BackendExecuteMsg::Collect {
            recipient: config.borrower.to_string(),
        })?,
        funds: vec![],
    };

    Ok(Response::new().add_message(msg).add_attributes(vec![
        attr("method", "collect"),
        attr("recipient", config.borrower),
    ]))
}

/// Balancer-driven: borrow `amount`, sell it and invest the proceeds
pub fn auto_invest(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
    slippage: u32,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let sweep = SweepContract(config.sweep.clone());
    if Some(&info.sender) != sweep.config(&deps.querier)?.balancer.as_ref() {
        return Err(ContractError::NotBalancer {});
    }

    let mut position = POSITION.load(deps.storage)?;
    assert_not_paused(&position)?;
    assert_slippage(slippage)?;

    let risk_config = RISK_CONFIG.load(deps.storage)?;
    if !risk_config.auto_invest_enabled {
        return Err(ContractError::AutoInvestDisabled {});
    }
    if amount < risk_config.auto_invest_min_amount {
        return Err(ContractError::AutoInvestMinAmount {});
    }

    let valuation = get_valuation(deps.as_ref(), &env)?;
    let ratio = valuation.equity_ratio(position.sweep_borrowed)?;
    if ratio < risk_config.auto_invest_min_equity_ratio {
        return Err(ContractError::AutoInvestMinRatio {});
    }

    let mint_msg = increase_debt(deps.storage, &env, &config, &mut position, amount)?;

    let min_amount_out = apply_ratio(
        convert_to_usd(amount, valuation.target_price)?,
        PRECISION - slippage,
    )?;
    SWAP.save(
        deps.storage,
        &SwapPropagation {
            asset_out: StabilizerAsset::Quote,
            balance_before: valuation.quote_balance,
            min_amount_out,
            after_swap: AfterSwap::InvestReceived,
        },
    )?;

    Ok(Response::new()
        .add_message(mint_msg)
        .add_submessage(SubMsg::reply_on_success(
            sell_sweep_msg(&config, amount, min_amount_out)?,
            SWAP_REPLY_ID,
        ))
        .add_attributes(vec![
            attr("method", "auto_invest"),
            attr("amount", amount),
            attr("sweep_borrowed", position.sweep_borrowed),
        ]))
}
