use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;
use cw_storage_plus::Item;

use sweep::stabilizer::{Config, RiskConfig, StabilizerAsset};

#[cw_serde]
pub struct Position {
    /// Outstanding stablecoin debt
    pub sweep_borrowed: Uint128,
    /// Spread fee accrued up to `fee_checkpoint`
    pub accrued_fee: Uint128,
    pub fee_checkpoint: u64,
    /// Set by the collateral agency for backends that can't be valued on-chain
    pub asset_value_override: Option<Uint128>,
    pub paused: bool,
}

/// What to do with the output of a swap once it's checked
#[cw_serde]
pub enum AfterSwap {
    Hold,
    /// Invest up to `amount` of the quote balance
    Invest { amount: Uint128 },
    /// Invest everything the swap returned
    InvestReceived,
}

#[cw_serde]
pub struct SwapPropagation {
    pub asset_out: StabilizerAsset,
    pub balance_before: Uint128,
    pub min_amount_out: Uint128,
    pub after_swap: AfterSwap,
}

#[cw_serde]
pub struct DivestPropagation {
    pub quote_before: Uint128,
    pub slippage: u32,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const RISK_CONFIG: Item<RiskConfig> = Item::new("risk_config");
pub const POSITION: Item<Position> = Item::new("position");

//Reply State Propagations
pub const SWAP: Item<SwapPropagation> = Item::new("swap_propagation");
pub const DIVEST: Item<DivestPropagation> = Item::new("divest_propagation");
