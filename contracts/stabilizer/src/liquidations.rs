use cosmwasm_std::{attr, coins, BankMsg, CosmosMsg, DepsMut, Env, MessageInfo, Response, Uint128};

use sweep::helpers::SweepContract;
use sweep::math::{apply_ratio, convert_to_sweep, convert_to_usd, PRECISION};
use sweep::sweep_coin::ExecuteMsg as SweepExecuteMsg;

use crate::error::ContractError;
use crate::invest::{adjust_asset_value, divest_msg};
use crate::risk_engine::{get_valuation, is_defaulted};
use crate::state::{CONFIG, POSITION, RISK_CONFIG};

/// Closes a defaulted account.
/// The liquidator covers the debt in stablecoin (pulled through its allowance) and is paid
/// `debt * (1 + liquidator_discount)` in value, capped at what the account holds.
/// Payment comes from idle quote first, then the backend, then idle stablecoin.
pub fn liquidate(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let risk_config = RISK_CONFIG.load(deps.storage)?;
    let mut position = POSITION.load(deps.storage)?;

    let valuation = get_valuation(deps.as_ref(), &env)?;
    let ratio = valuation.equity_ratio(position.sweep_borrowed)?;
    if position.sweep_borrowed.is_zero() || !is_defaulted(ratio, &risk_config) {
        return Err(ContractError::NotDefaulted {});
    }

    let debt = position.sweep_borrowed;
    let sweep = SweepContract(config.sweep.clone());
    let mut msgs: Vec<CosmosMsg> = vec![
        sweep.call(SweepExecuteMsg::TransferFrom {
            owner: info.sender.to_string(),
            recipient: env.contract.address.to_string(),
            amount: debt,
        })?,
        sweep.call(SweepExecuteMsg::MinterBurnFrom { amount: debt })?,
    ];

    let payout = apply_ratio(
        valuation.debt_value(debt)?,
        PRECISION.saturating_add(risk_config.liquidator_discount),
    )?
    .min(valuation.current_value()?);
    let mut remaining = payout;

    //Idle quote
    let from_quote = remaining.min(valuation.quote_balance);
    remaining -= from_quote;

    //Backend, paid on once the divest lands
    let from_backend = remaining.min(valuation.asset_value);
    remaining -= from_backend;
    if !from_backend.is_zero() {
        msgs.push(divest_msg(&config, from_backend)?);
        adjust_asset_value(&mut position, Uint128::zero(), from_backend);
    }

    let quote_paid = from_quote + from_backend;
    if !quote_paid.is_zero() {
        msgs.push(
            BankMsg::Send {
                to_address: info.sender.to_string(),
                amount: coins(quote_paid.u128(), config.quote_denom.clone()),
            }
            .into(),
        );
    }

    //Idle stablecoin at target price
    let sweep_paid = convert_to_sweep(remaining, valuation.target_price)?.min(valuation.sweep_balance);
    if !sweep_paid.is_zero() {
        msgs.push(sweep.call(SweepExecuteMsg::Transfer {
            recipient: info.sender.to_string(),
            amount: sweep_paid,
        })?);
    }

    //Accrued fee is forfeited with the debt
    position.sweep_borrowed = Uint128::zero();
    position.accrued_fee = Uint128::zero();
    position.fee_checkpoint = env.block.time.seconds();
    POSITION.save(deps.storage, &position)?;

    Ok(Response::new().add_messages(msgs).add_attributes(vec![
        attr("method", "liquidate"),
        attr("liquidator", info.sender),
        attr("debt", debt),
        attr("equity_ratio", ratio.to_string()),
        attr("quote_paid", quote_paid),
        attr("sweep_paid", sweep_paid),
        attr("payout_value", convert_to_usd(sweep_paid, valuation.target_price)?.checked_add(quote_paid)?),
    ]))
}
