//! Swap venue interface. The venue is also the market price source for the mint gate.
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;
use cw20::Cw20ReceiveMsg;

#[cw_serde]
pub enum ExecuteMsg {
    /// Quote currency attached as funds, stablecoin paid to the sender
    Swap { min_amount_out: Uint128 },
    /// Stablecoin sent through the ledger's `Send`, quote currency paid to the sender
    Receive(Cw20ReceiveMsg),
}

/// Hook carried in `Cw20ReceiveMsg::msg`
#[cw_serde]
pub enum SwapHookMsg {
    Swap { min_amount_out: Uint128 },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(PriceResponse)]
    Price {},
}

#[cw_serde]
pub struct PriceResponse {
    /// Stablecoin price in quote currency, 1e6 scale
    pub price: Uint128,
}
