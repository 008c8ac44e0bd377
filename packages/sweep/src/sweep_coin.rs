use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};
use cw20::{AllowanceResponse, BalanceResponse, TokenInfoResponse};

#[cw_serde]
pub struct InstantiateMsg {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Governance multisig, defaults to the sender
    pub owner: Option<String>,
    /// Initial target price, both anchors. Defaults to 1.00 (1_000_000)
    pub target_price: Option<Uint128>,
    /// Tolerated discount of market price to target before minting is blocked (1e6 scale)
    pub arb_spread: u32,
    /// Length of a target price crawl in seconds. Defaults to 7 days
    pub period_time: Option<u64>,
    /// Swap venue used as the market price source
    pub amm: Option<String>,
    pub treasury: Option<String>,
    pub balancer: Option<String>,
    /// Defaults to the owner
    pub collateral_agency: Option<String>,
    pub transfer_approver: Option<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Move tokens from the sender to `recipient`
    Transfer { recipient: String, amount: Uint128 },
    /// Move tokens out of `owner`'s balance using the sender's allowance
    TransferFrom {
        owner: String,
        recipient: String,
        amount: Uint128,
    },
    /// Transfer to a contract and call its `Receive` hook
    Send {
        contract: String,
        amount: Uint128,
        msg: Binary,
    },
    IncreaseAllowance { spender: String, amount: Uint128 },
    DecreaseAllowance { spender: String, amount: Uint128 },
    /// Listed & enabled minters only. Gated on market price vs target price.
    MinterMint { recipient: String, amount: Uint128 },
    /// Listed minters only. Burns from the minter's own balance.
    MinterBurnFrom { amount: Uint128 },
    /// Governance
    AddMinter { minter: String, max_amount: Uint128 },
    RemoveMinter { minter: String },
    SetMinterMaxAmount { minter: String, max_amount: Uint128 },
    SetMinterEnabled { minter: String, is_enabled: bool },
    /// `None` removes the transfer policy
    SetTransferApprover { approver: Option<String> },
    SetTreasury { treasury: String },
    SetBalancer { balancer: String },
    SetCollateralAgent { agent: String },
    SetAmm { amm: String },
    Pause {},
    Unpause {},
    SetPeriodTime { period_time: u64 },
    /// Size of one target price adjustment step (1e6 scale)
    SetStepValue { step_value: u32 },
    StartNewPeriod {},
    /// Governance or balancer
    SetArbSpread { arb_spread: u32 },
    /// Annual rate, negative to charge holders (1e6 scale)
    SetInterestRate { interest_rate: i64 },
    SetTargetPrice { current: Uint128, next: Uint128 },
    /// Nominate a new owner, who must accept
    TransferOwnership { new_owner: String },
    AcceptOwnership {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    #[returns(TokenInfoResponse)]
    TokenInfo {},
    #[returns(BalanceResponse)]
    Balance { address: String },
    #[returns(AllowanceResponse)]
    Allowance { owner: String, spender: String },
    #[returns(MinterInfo)]
    Minter { minter: String },
    /// Enumerates listed minters. Ordering is not stable across removals.
    #[returns(Vec<Addr>)]
    Minters {
        offset: Option<u32>,
        limit: Option<u32>,
    },
    #[returns(bool)]
    IsValidMinter { minter: String },
    /// Interpolated target price at the current block time
    #[returns(Uint128)]
    TargetPrice {},
    /// Market price from the swap venue, target price if none is set
    #[returns(Uint128)]
    AmmPrice {},
    #[returns(bool)]
    IsMintAllowed {},
    #[returns(Uint128)]
    ConvertToUsd { amount: Uint128 },
    #[returns(Uint128)]
    ConvertToSweep { amount: Uint128 },
}

#[cw_serde]
pub struct Config {
    pub owner: Addr,
    pub treasury: Addr,
    pub balancer: Option<Addr>,
    pub collateral_agency: Addr,
    pub amm: Option<Addr>,
    pub transfer_approver: Option<Addr>,
    pub paused: bool,
    pub arb_spread: u32,
    pub current_target_price: Uint128,
    pub next_target_price: Uint128,
    pub period_start: u64,
    pub period_time: u64,
    pub interest_rate: i64,
    pub step_value: u32,
}

#[cw_serde]
pub struct MinterInfo {
    pub max_amount: Uint128,
    pub minted_amount: Uint128,
    pub is_listed: bool,
    pub is_enabled: bool,
}
