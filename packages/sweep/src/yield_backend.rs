//! Yield backend interface consumed by the stabilizer
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;

#[cw_serde]
pub enum ExecuteMsg {
    /// Quote currency attached as funds
    Invest {},
    /// Returns `amount` of quote currency to the sender
    Divest { amount: Uint128 },
    /// Harvests rewards straight to `recipient`
    Collect { recipient: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    /// Value of the position held for `account`, in quote currency
    #[returns(Uint128)]
    AssetValue { account: String },
    /// Position value plus anything the backend holds idle for `account`
    #[returns(Uint128)]
    CurrentValue { account: String },
}
