use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

#[cw_serde]
pub struct InstantiateMsg {
    pub name: String,
    /// Stablecoin ledger
    pub sweep: String,
    pub borrower: String,
    pub yield_backend: String,
    /// Swap venue
    pub amm: String,
    /// Native denom of the quote currency
    pub quote_denom: String,
    /// Optional starting risk configuration, defaults to all zero
    pub risk_config: Option<RiskConfig>,
}

/// Borrower-managed risk configuration. Ratios use a 1e6 denominator.
#[cw_serde]
#[derive(Default)]
pub struct RiskConfig {
    pub min_equity_ratio: u32,
    /// Annual fee charged on outstanding debt
    pub spread_fee: u32,
    pub max_borrow: Uint128,
    pub liquidator_discount: u32,
    /// Seconds
    pub call_delay: u64,
    pub auto_invest_min_equity_ratio: u32,
    pub auto_invest_min_amount: Uint128,
    pub auto_invest_enabled: bool,
    pub metadata_url: String,
}

#[cw_serde]
pub enum StabilizerAsset {
    Quote,
    Sweep,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Borrower only
    Configure(RiskConfig),
    Borrow { amount: Uint128 },
    Repay { amount: Uint128 },
    PayFee {},
    /// Invest `amount` of quote into the backend, selling idle stablecoin for any shortfall
    Invest { amount: Uint128, slippage: u32 },
    /// Pull `amount` of quote out of the backend, optionally buying stablecoin with it
    Divest { amount: Uint128, slippage: Option<u32> },
    SellSweepOnAmm { amount: Uint128, min_amount_out: Uint128 },
    BuySweepOnAmm { amount: Uint128, min_amount_out: Uint128 },
    Collect {},
    Withdraw { asset: StabilizerAsset, amount: Uint128 },
    /// Ledger balancer only
    AutoInvest { amount: Uint128, slippage: u32 },
    /// Ledger collateral agency only. `None` goes back to valuing through the backend.
    UpdateValue { value: Option<Uint128> },
    /// Ledger owner only
    Pause {},
    Unpause {},
    /// Anyone, once defaulted
    Liquidate {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    #[returns(RiskConfig)]
    RiskConfig {},
    #[returns(PositionResponse)]
    Position {},
    #[returns(u32)]
    EquityRatio {},
    #[returns(bool)]
    IsDefaulted {},
    #[returns(Uint128)]
    AssetValue {},
    #[returns(Uint128)]
    CurrentValue {},
    /// Borrowed amount plus accrued spread fee
    #[returns(Uint128)]
    Debt {},
}

#[cw_serde]
pub struct Config {
    pub name: String,
    pub sweep: Addr,
    pub borrower: Addr,
    pub yield_backend: Addr,
    pub amm: Addr,
    pub quote_denom: String,
}

#[cw_serde]
pub struct PositionResponse {
    pub sweep_borrowed: Uint128,
    pub accrued_fee: Uint128,
    pub asset_value: Uint128,
    pub current_value: Uint128,
    pub equity_ratio: u32,
    pub is_defaulted: bool,
    pub paused: bool,
}
