use cosmwasm_std::{attr, DepsMut, Env, Reply, Response, SubMsg, Uint128};

use sweep::helpers::SweepContract;
use sweep::math::{apply_ratio, convert_to_sweep, PRECISION};
use sweep::stabilizer::StabilizerAsset;

use crate::error::ContractError;
use crate::invest::{adjust_asset_value, buy_sweep_msg, invest_msg, SWAP_REPLY_ID};
use crate::state::{AfterSwap, SwapPropagation, CONFIG, DIVEST, POSITION, SWAP};

//On success....
//Check what the swap returned against its minimum
//Invest the proceeds if the swap was funding an investment
pub fn handle_swap_reply(deps: DepsMut, env: Env, _msg: Reply) -> Result<Response, ContractError> {
    let propagation = SWAP.load(deps.storage)?;
    SWAP.remove(deps.storage);

    let config = CONFIG.load(deps.storage)?;
    let balance_after = match propagation.asset_out {
        StabilizerAsset::Quote => {
            deps.querier
                .query_balance(env.contract.address.as_str(), config.quote_denom.clone())?
                .amount
        }
        StabilizerAsset::Sweep => {
            SweepContract(config.sweep.clone()).balance(&deps.querier, env.contract.address.as_str())?
        }
    };

    let received = balance_after.saturating_sub(propagation.balance_before);
    if received < propagation.min_amount_out {
        return Err(ContractError::SlippageExceeded {
            received,
            min_amount_out: propagation.min_amount_out,
        });
    }

    let invest_amount = match propagation.after_swap {
        AfterSwap::Hold => None,
        AfterSwap::Invest { amount } => Some(amount.min(balance_after)),
        AfterSwap::InvestReceived => Some(received),
    };

    let mut response = Response::new().add_attributes(vec![
        attr("method", "handle_swap_reply"),
        attr("asset_out", format!("{:?}", propagation.asset_out)),
        attr("received", received),
    ]);

    if let Some(amount) = invest_amount.filter(|amount| !amount.is_zero()) {
        let mut position = POSITION.load(deps.storage)?;
        adjust_asset_value(&mut position, amount, Uint128::zero());
        POSITION.save(deps.storage, &position)?;

        response = response
            .add_message(invest_msg(&config, amount)?)
            .add_attribute("invested", amount);
    }

    Ok(response)
}

//On success....
//Buy back stablecoin with whatever the backend returned
pub fn handle_divest_reply(deps: DepsMut, env: Env, _msg: Reply) -> Result<Response, ContractError> {
    let propagation = DIVEST.load(deps.storage)?;
    DIVEST.remove(deps.storage);

    let config = CONFIG.load(deps.storage)?;
    let quote_balance = deps
        .querier
        .query_balance(env.contract.address.as_str(), config.quote_denom.clone())?
        .amount;
    let received = quote_balance.saturating_sub(propagation.quote_before);

    let mut response = Response::new().add_attributes(vec![
        attr("method", "handle_divest_reply"),
        attr("divested", received),
    ]);
    if received.is_zero() {
        return Ok(response);
    }

    let sweep = SweepContract(config.sweep.clone());
    let target_price = sweep.target_price(&deps.querier)?;
    let min_amount_out = apply_ratio(
        convert_to_sweep(received, target_price)?,
        PRECISION - propagation.slippage,
    )?;

    SWAP.save(
        deps.storage,
        &SwapPropagation {
            asset_out: StabilizerAsset::Sweep,
            balance_before: sweep.balance(&deps.querier, env.contract.address.as_str())?,
            min_amount_out,
            after_swap: AfterSwap::Hold,
        },
    )?;
    response = response.add_submessage(SubMsg::reply_on_success(
        buy_sweep_msg(&config, received, min_amount_out)?,
        SWAP_REPLY_ID,
    ));

    Ok(response)
}
