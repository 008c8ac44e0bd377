use cosmwasm_std::{attr, coins, Addr, BankMsg, CosmosMsg, DepsMut, Env, MessageInfo, Response, Storage, Uint128};

use sweep::helpers::SweepContract;
use sweep::math::convert_to_usd;
use sweep::stabilizer::{Config, StabilizerAsset};
use sweep::sweep_coin::ExecuteMsg as SweepExecuteMsg;

use crate::error::ContractError;
use crate::risk_engine::{checkpoint_fee, equity_ratio, get_accrued_fee, get_valuation};
use crate::state::{Position, CONFIG, POSITION, RISK_CONFIG};

pub fn assert_borrower(config: &Config, sender: &Addr) -> Result<(), ContractError> {
    if sender != &config.borrower {
        return Err(ContractError::OnlyBorrower {});
    }
    Ok(())
}

pub fn assert_not_paused(position: &Position) -> Result<(), ContractError> {
    if position.paused {
        return Err(ContractError::Paused {});
    }
    Ok(())
}

/// Mints `amount` of stablecoin into the account against its max borrow.
/// Solvency isn't checked here, a thin equity ratio shows up as a default.
pub fn borrow(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_borrower(&config, &info.sender)?;

    let mut position = POSITION.load(deps.storage)?;
    assert_not_paused(&position)?;

    let mint_msg = increase_debt(deps.storage, &env, &config, &mut position, amount)?;

    Ok(Response::new()
        .add_message(mint_msg)
        .add_attributes(vec![
            attr("method", "borrow"),
            attr("amount", amount),
            attr("sweep_borrowed", position.sweep_borrowed),
        ]))
}

/// Books `amount` of new debt and returns the ledger mint to this account
pub fn increase_debt(
    storage: &mut dyn Storage,
    env: &Env,
    config: &Config,
    position: &mut Position,
    amount: Uint128,
) -> Result<CosmosMsg, ContractError> {
    if amount.is_zero() {
        return Err(ContractError::ZeroAmountDetected {});
    }
    let risk_config = RISK_CONFIG.load(storage)?;
    let sweep_borrowed = position.sweep_borrowed.checked_add(amount)?;
    if sweep_borrowed > risk_config.max_borrow {
        return Err(ContractError::ExceedsMaxBorrow {
            max_borrow: risk_config.max_borrow,
        });
    }

    checkpoint_fee(storage, position, env)?;
    position.sweep_borrowed = sweep_borrowed;
    POSITION.save(storage, position)?;

    Ok(SweepContract(config.sweep.clone()).call(SweepExecuteMsg::MinterMint {
        recipient: env.contract.address.to_string(),
        amount,
    })?)
}

/// Burns `amount` of the account's idle stablecoin against its debt
pub fn repay(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_borrower(&config, &info.sender)?;

    if amount.is_zero() {
        return Err(ContractError::ZeroAmountDetected {});
    }
    let mut position = POSITION.load(deps.storage)?;
    if amount > position.sweep_borrowed {
        return Err(ContractError::ExcessRepayment {});
    }

    let sweep = SweepContract(config.sweep);
    if sweep.balance(&deps.querier, env.contract.address.as_str())? < amount {
        return Err(ContractError::NotEnoughBalance {});
    }

    checkpoint_fee(deps.storage, &mut position, &env)?;
    position.sweep_borrowed -= amount;
    POSITION.save(deps.storage, &position)?;

    Ok(Response::new()
        .add_message(sweep.call(SweepExecuteMsg::MinterBurnFrom { amount })?)
        .add_attributes(vec![
            attr("method", "repay"),
            attr("amount", amount),
            attr("sweep_borrowed", position.sweep_borrowed),
        ]))
}

/// Sends the accrued spread fee to the ledger's treasury
pub fn pay_fee(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_borrower(&config, &info.sender)?;

    let mut position = POSITION.load(deps.storage)?;
    let risk_config = RISK_CONFIG.load(deps.storage)?;
    let fee = get_accrued_fee(&position, &risk_config, &env)?;
    if fee.is_zero() {
        return Err(ContractError::NoFeeDue {});
    }

    let sweep = SweepContract(config.sweep);
    if sweep.balance(&deps.querier, env.contract.address.as_str())? < fee {
        return Err(ContractError::NotEnoughBalance {});
    }
    let treasury = sweep.config(&deps.querier)?.treasury;

    position.accrued_fee = Uint128::zero();
    position.fee_checkpoint = env.block.time.seconds();
    POSITION.save(deps.storage, &position)?;

    Ok(Response::new()
        .add_message(sweep.call(SweepExecuteMsg::Transfer {
            recipient: treasury.to_string(),
            amount: fee,
        })?)
        .add_attributes(vec![
            attr("method", "pay_fee"),
            attr("fee", fee),
            attr("treasury", treasury),
        ]))
}

/// Sends idle funds to the borrower as long as the account stays above its minimum equity ratio
pub fn withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    asset: StabilizerAsset,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    assert_borrower(&config, &info.sender)?;

    let position = POSITION.load(deps.storage)?;
    assert_not_paused(&position)?;
    if amount.is_zero() {
        return Err(ContractError::ZeroAmountDetected {});
    }

    let valuation = get_valuation(deps.as_ref(), &env)?;
    let (idle, withdrawn_value) = match asset {
        StabilizerAsset::Quote => (valuation.quote_balance, amount),
        StabilizerAsset::Sweep => (
            valuation.sweep_balance,
            convert_to_usd(amount, valuation.target_price)?,
        ),
    };
    if amount > idle {
        return Err(ContractError::NotEnoughBalance {});
    }

    if !position.sweep_borrowed.is_zero() {
        let risk_config = RISK_CONFIG.load(deps.storage)?;
        let value_after = valuation.current_value()?.saturating_sub(withdrawn_value);
        let debt_value = valuation.debt_value(position.sweep_borrowed)?;

        if value_after < debt_value
            || equity_ratio(value_after, debt_value)? < risk_config.min_equity_ratio
        {
            return Err(ContractError::EquityRatioExceeded {});
        }
    }

    let msg: CosmosMsg = match asset {
        StabilizerAsset::Quote => BankMsg::Send {
            to_address: config.borrower.to_string(),
            amount: coins(amount.u128(), config.quote_denom.clone()),
        }
        .into(),
        StabilizerAsset::Sweep => SweepContract(config.sweep.clone()).call(SweepExecuteMsg::Transfer {
            recipient: config.borrower.to_string(),
            amount,
        })?,
    };

    Ok(Response::new().add_message(msg).add_attributes(vec![
        attr("method", "withdraw"),
        attr("asset", format!("{:?}", asset)),
        attr("amount", amount),
        attr("recipient", config.borrower),
    ]))
}
