use cosmwasm_std::{Addr, Deps, Env, QuerierWrapper, StdResult, Storage, Uint128};
use cw20::{AllowanceResponse, BalanceResponse, Expiration, TokenInfoResponse};

use sweep::helpers::query_amm_price;
use sweep::math::{apply_ratio, convert_to_sweep, convert_to_usd, interpolate_target_price, PRECISION};
use sweep::sweep_coin::{Config, MinterInfo};

use crate::state::{ALLOWANCES, BALANCES, CONFIG, MINTERS, MINTER_INFO, TOKEN_INFO};

const DEFAULT_LIMIT: u32 = 32;
const MAX_LIMIT: u32 = 64;

/// Target price at the current block time
pub fn get_target_price(config: &Config, env: &Env) -> StdResult<Uint128> {
    interpolate_target_price(
        config.current_target_price,
        config.next_target_price,
        config.period_start,
        config.period_time,
        env.block.time.seconds(),
    )
}

/// Market price from the swap venue. Without a venue the market is taken to sit on target.
pub fn get_amm_price(querier: &QuerierWrapper, config: &Config, env: &Env) -> StdResult<Uint128> {
    match &config.amm {
        Some(amm) => query_amm_price(querier, amm),
        None => get_target_price(config, env),
    }
}

/// Peg gate: market price must be at or above `target * (1 - arb_spread)`
pub fn is_mint_allowed(querier: &QuerierWrapper, config: &Config, env: &Env) -> StdResult<bool> {
    let target_price = get_target_price(config, env)?;
    let floor = apply_ratio(target_price, PRECISION - config.arb_spread)?;
    let amm_price = get_amm_price(querier, config, env)?;

    Ok(amm_price >= floor)
}

pub fn query_token_info(deps: Deps) -> StdResult<TokenInfoResponse> {
    let info = TOKEN_INFO.load(deps.storage)?;
    Ok(TokenInfoResponse {
        name: info.name,
        symbol: info.symbol,
        decimals: info.decimals,
        total_supply: info.total_supply,
    })
}

pub fn query_balance(deps: Deps, address: String) -> StdResult<BalanceResponse> {
    let address = deps.api.addr_validate(&address)?;
    Ok(BalanceResponse {
        balance: get_balance(deps.storage, &address)?,
    })
}

pub fn get_balance(storage: &dyn Storage, address: &Addr) -> StdResult<Uint128> {
    Ok(BALANCES.may_load(storage, address)?.unwrap_or_default())
}

pub fn query_allowance(deps: Deps, owner: String, spender: String) -> StdResult<AllowanceResponse> {
    let owner = deps.api.addr_validate(&owner)?;
    let spender = deps.api.addr_validate(&spender)?;
    let allowance = ALLOWANCES
        .may_load(deps.storage, (&owner, &spender))?
        .unwrap_or_default();

    Ok(AllowanceResponse {
        allowance,
        expires: Expiration::Never {},
    })
}

/// Unlisted or unknown minters come back as an empty, unlisted entry
pub fn query_minter(deps: Deps, minter: String) -> StdResult<MinterInfo> {
    let minter = deps.api.addr_validate(&minter)?;
    Ok(MINTER_INFO
        .may_load(deps.storage, &minter)?
        .unwrap_or(MinterInfo {
            max_amount: Uint128::zero(),
            minted_amount: Uint128::zero(),
            is_listed: false,
            is_enabled: false,
        }))
}

pub fn query_minters(deps: Deps, offset: Option<u32>, limit: Option<u32>) -> StdResult<Vec<Addr>> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let offset = offset.unwrap_or(0) as usize;

    Ok(MINTERS
        .load(deps.storage)?
        .into_iter()
        .skip(offset)
        .take(limit)
        .collect())
}

/// Listed and enabled
pub fn query_is_valid_minter(deps: Deps, minter: String) -> StdResult<bool> {
    let minter = query_minter(deps, minter)?;
    Ok(minter.is_listed && minter.is_enabled)
}

pub fn query_convert_to_usd(deps: Deps, env: Env, amount: Uint128) -> StdResult<Uint128> {
    let config = CONFIG.load(deps.storage)?;
    convert_to_usd(amount, get_target_price(&config, &env)?)
}

pub fn query_convert_to_sweep(deps: Deps, env: Env, amount: Uint128) -> StdResult<Uint128> {
    let config = CONFIG.load(deps.storage)?;
    convert_to_sweep(amount, get_target_price(&config, &env)?)
}
