use cosmwasm_std::{Deps, Env, StdResult, Storage, Uint128};

use sweep::helpers::{query_backend_value, SweepContract};
use sweep::math::{accrue_annual_fee, convert_to_usd, mul_div, PRECISION};
use sweep::stabilizer::{Config, RiskConfig};

use crate::state::{Position, CONFIG, POSITION, RISK_CONFIG};

/// Snapshot of everything the account holds, valued in quote currency
pub struct Valuation {
    pub asset_value: Uint128,
    pub quote_balance: Uint128,
    pub sweep_balance: Uint128,
    pub target_price: Uint128,
}

impl Valuation {
    /// Backend position + idle quote + idle stablecoin at target price
    pub fn current_value(&self) -> StdResult<Uint128> {
        Ok(self
            .asset_value
            .checked_add(self.quote_balance)?
            .checked_add(convert_to_usd(self.sweep_balance, self.target_price)?)?)
    }

    pub fn debt_value(&self, sweep_borrowed: Uint128) -> StdResult<Uint128> {
        convert_to_usd(sweep_borrowed, self.target_price)
    }

    pub fn equity_ratio(&self, sweep_borrowed: Uint128) -> StdResult<u32> {
        equity_ratio(self.current_value()?, self.debt_value(sweep_borrowed)?)
    }
}

/// `(value - debt) / value` on a 1e6 scale, floored at 0.
/// An empty account is fully equity without debt and fully underwater with it.
pub fn equity_ratio(current_value: Uint128, debt_value: Uint128) -> StdResult<u32> {
    if current_value.is_zero() {
        return Ok(if debt_value.is_zero() { PRECISION } else { 0 });
    }
    if debt_value >= current_value {
        return Ok(0);
    }

    let ratio = mul_div(current_value - debt_value, PRECISION, current_value)?;
    Ok(ratio.u128() as u32)
}

/// Strictly below the minimum. Sitting on it is healthy.
pub fn is_defaulted(ratio: u32, risk_config: &RiskConfig) -> bool {
    ratio < risk_config.min_equity_ratio
}

pub fn get_asset_value(deps: Deps, env: &Env, config: &Config, position: &Position) -> StdResult<Uint128> {
    match position.asset_value_override {
        Some(value) => Ok(value),
        None => query_backend_value(&deps.querier, &config.yield_backend, env.contract.address.as_str()),
    }
}

pub fn get_valuation(deps: Deps, env: &Env) -> StdResult<Valuation> {
    let config = CONFIG.load(deps.storage)?;
    let position = POSITION.load(deps.storage)?;
    let sweep = SweepContract(config.sweep.clone());

    Ok(Valuation {
        asset_value: get_asset_value(deps, env, &config, &position)?,
        quote_balance: deps
            .querier
            .query_balance(env.contract.address.as_str(), config.quote_denom.clone())?
            .amount,
        sweep_balance: sweep.balance(&deps.querier, env.contract.address.as_str())?,
        target_price: sweep.target_price(&deps.querier)?,
    })
}

/// Accrued spread fee including what accrued since the last checkpoint
pub fn get_accrued_fee(position: &Position, risk_config: &RiskConfig, env: &Env) -> StdResult<Uint128> {
    let elapsed = env.block.time.seconds().saturating_sub(position.fee_checkpoint);
    let pending = accrue_annual_fee(position.sweep_borrowed, risk_config.spread_fee, elapsed)?;

    Ok(position.accrued_fee.checked_add(pending)?)
}

/// Rolls pending fee into `accrued_fee`. Call before anything that changes debt or the fee rate.
pub fn checkpoint_fee(storage: &dyn Storage, position: &mut Position, env: &Env) -> StdResult<()> {
    let risk_config = RISK_CONFIG.load(storage)?;
    position.accrued_fee = get_accrued_fee(position, &risk_config, env)?;
    position.fee_checkpoint = env.block.time.seconds();

    Ok(())
}
