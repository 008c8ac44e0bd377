use cosmwasm_std::{Deps, Env, StdResult, Uint128};

use sweep::stabilizer::PositionResponse;

use crate::risk_engine::{get_accrued_fee, get_valuation, is_defaulted};
use crate::state::{POSITION, RISK_CONFIG};

pub fn query_position(deps: Deps, env: Env) -> StdResult<PositionResponse> {
    let position = POSITION.load(deps.storage)?;
    let risk_config = RISK_CONFIG.load(deps.storage)?;
    let valuation = get_valuation(deps, &env)?;
    let equity_ratio = valuation.equity_ratio(position.sweep_borrowed)?;

    Ok(PositionResponse {
        sweep_borrowed: position.sweep_borrowed,
        accrued_fee: get_accrued_fee(&position, &risk_config, &env)?,
        asset_value: valuation.asset_value,
        current_value: valuation.current_value()?,
        equity_ratio,
        is_defaulted: is_defaulted(equity_ratio, &risk_config),
        paused: position.paused,
    })
}

pub fn query_equity_ratio(deps: Deps, env: Env) -> StdResult<u32> {
    let position = POSITION.load(deps.storage)?;
    get_valuation(deps, &env)?.equity_ratio(position.sweep_borrowed)
}

pub fn query_is_defaulted(deps: Deps, env: Env) -> StdResult<bool> {
    let risk_config = RISK_CONFIG.load(deps.storage)?;
    Ok(is_defaulted(query_equity_ratio(deps, env)?, &risk_config))
}

/// Borrowed amount plus accrued spread fee
pub fn query_debt(deps: Deps, env: Env) -> StdResult<Uint128> {
    let position = POSITION.load(deps.storage)?;
    let risk_config = RISK_CONFIG.load(deps.storage)?;
    let fee = get_accrued_fee(&position, &risk_config, &env)?;

    Ok(position.sweep_borrowed.checked_add(fee)?)
}
