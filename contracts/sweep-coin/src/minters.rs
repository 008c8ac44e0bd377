use cosmwasm_std::{attr, Addr, DepsMut, Env, MessageInfo, Response, Storage, Uint128};

use sweep::sweep_coin::{Config, MinterInfo};

use crate::contract::{assert_credit_allowed, assert_owner, credit, debit, validate_address};
use crate::error::ContractError;
use crate::query::is_mint_allowed;
use crate::state::{CONFIG, MINTERS, MINTER_INFO, TOKEN_INFO};

/// Loads a listed minter, enabled or not
fn load_listed_minter(storage: &dyn Storage, minter: &Addr) -> Result<MinterInfo, ContractError> {
    match MINTER_INFO.may_load(storage, minter)? {
        Some(info) if info.is_listed => Ok(info),
        _ => Err(ContractError::InvalidMinter {}),
    }
}

pub fn add_minter(
    deps: DepsMut,
    info: MessageInfo,
    minter: String,
    max_amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_owner(&config, &info.sender)?;

    let minter = validate_address(deps.api, &minter)?;
    if max_amount.is_zero() {
        return Err(ContractError::ZeroAmountDetected {});
    }
    if let Some(existing) = MINTER_INFO.may_load(deps.storage, &minter)? {
        if existing.is_listed {
            return Err(ContractError::MinterExist {});
        }
    }

    //Re-adding a removed minter starts a fresh entry
    MINTER_INFO.save(
        deps.storage,
        &minter,
        &MinterInfo {
            max_amount,
            minted_amount: Uint128::zero(),
            is_listed: true,
            is_enabled: true,
        },
    )?;
    MINTERS.update(deps.storage, |mut minters| -> Result<_, ContractError> {
        minters.push(minter.clone());
        Ok(minters)
    })?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "add_minter"),
        attr("minter", minter),
        attr("max_amount", max_amount),
    ]))
}

/// Unlists the minter. Its minted amount is left as is.
pub fn remove_minter(
    deps: DepsMut,
    info: MessageInfo,
    minter: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_owner(&config, &info.sender)?;

    let minter = validate_address(deps.api, &minter)?;
    let mut minter_info = load_listed_minter(deps.storage, &minter)?;

    let mut minters = MINTERS.load(deps.storage)?;
    if let Some(index) = minters.iter().position(|listed| listed == &minter) {
        minters.swap_remove(index);
    }
    MINTERS.save(deps.storage, &minters)?;

    minter_info.is_listed = false;
    MINTER_INFO.save(deps.storage, &minter, &minter_info)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "remove_minter"),
        attr("minter", minter),
        attr("minted_amount", minter_info.minted_amount),
    ]))
}

pub fn set_minter_max_amount(
    deps: DepsMut,
    info: MessageInfo,
    minter: String,
    max_amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_owner(&config, &info.sender)?;

    let minter = validate_address(deps.api, &minter)?;
    let mut minter_info = load_listed_minter(deps.storage, &minter)?;
    if max_amount < minter_info.minted_amount {
        return Err(ContractError::MaxAmountBelowMinted {
            minted_amount: minter_info.minted_amount.to_string(),
        });
    }

    minter_info.max_amount = max_amount;
    MINTER_INFO.save(deps.storage, &minter, &minter_info)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "set_minter_max_amount"),
        attr("minter", minter),
        attr("max_amount", max_amount),
    ]))
}

pub fn set_minter_enabled(
    deps: DepsMut,
    info: MessageInfo,
    minter: String,
    is_enabled: bool,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_owner(&config, &info.sender)?;

    let minter = validate_address(deps.api, &minter)?;
    let mut minter_info = load_listed_minter(deps.storage, &minter)?;

    minter_info.is_enabled = is_enabled;
    MINTER_INFO.save(deps.storage, &minter, &minter_info)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "set_minter_enabled"),
        attr("minter", minter),
        attr("is_enabled", is_enabled.to_string()),
    ]))
}

/// Mints `amount` to `recipient` against the sender's capacity.
/// Fails while the market price sits below the arb band around the target price.
pub fn minter_mint(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config: Config = CONFIG.load(deps.storage)?;

    let mut minter_info = match MINTER_INFO.may_load(deps.storage, &info.sender)? {
        Some(minter) if minter.is_listed && minter.is_enabled => minter,
        _ => return Err(ContractError::InvalidMinter {}),
    };
    if config.paused {
        return Err(ContractError::Paused {});
    }
    let recipient = validate_address(deps.api, &recipient)?;
    if amount.is_zero() {
        return Err(ContractError::ZeroAmountDetected {});
    }

    let minted_amount = minter_info.minted_amount.checked_add(amount)?;
    if minted_amount > minter_info.max_amount {
        return Err(ContractError::MintCapReached {});
    }
    if !is_mint_allowed(&deps.querier, &config, &env)? {
        return Err(ContractError::MintNotAllowed {});
    }
    assert_credit_allowed(&deps.querier, &config, &recipient)?;

    minter_info.minted_amount = minted_amount;
    MINTER_INFO.save(deps.storage, &info.sender, &minter_info)?;

    credit(deps.storage, &recipient, amount)?;
    TOKEN_INFO.update(deps.storage, |mut token| -> Result<_, ContractError> {
        token.total_supply = token.total_supply.checked_add(amount)?;
        Ok(token)
    })?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "minter_mint"),
        attr("minter", info.sender),
        attr("recipient", recipient),
        attr("amount", amount),
        attr("minted_amount", minted_amount),
    ]))
}

/// Burns `amount` from the sender's own balance and frees the same capacity
pub fn minter_burn_from(
    deps: DepsMut,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let mut minter_info = load_listed_minter(deps.storage, &info.sender)?;
    if amount.is_zero() {
        return Err(ContractError::ZeroAmountDetected {});
    }
    if amount > minter_info.minted_amount {
        return Err(ContractError::ExceedBurnAmount {});
    }

    debit(deps.storage, &info.sender, amount)?;
    TOKEN_INFO.update(deps.storage, |mut token| -> Result<_, ContractError> {
        token.total_supply = token.total_supply.checked_sub(amount)?;
        Ok(token)
    })?;

    minter_info.minted_amount -= amount;
    MINTER_INFO.save(deps.storage, &info.sender, &minter_info)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "minter_burn_from"),
        attr("minter", info.sender),
        attr("amount", amount),
        attr("minted_amount", minter_info.minted_amount),
    ]))
}
