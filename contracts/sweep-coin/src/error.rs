use cosmwasm_std::{OverflowError, StdError};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Info.sender is not the governance multisig")]
    NotGovernance {},

    #[error("Info.sender is neither the governance multisig nor the balancer")]
    NotOwnerOrBalancer {},

    #[error("Zero address detected")]
    ZeroAddressDetected {},

    #[error("Zero amount detected")]
    ZeroAmountDetected {},

    #[error("Minter already exists")]
    MinterExist {},

    #[error("Invalid minter")]
    InvalidMinter {},

    #[error("Mint cap reached")]
    MintCapReached {},

    #[error("Max amount can't be below the amount already minted: {minted_amount}")]
    MaxAmountBelowMinted { minted_amount: String },

    #[error("Burn amount exceeds the minter's minted amount")]
    ExceedBurnAmount {},

    #[error("Minting is blocked while the market price is below the target band")]
    MintNotAllowed {},

    #[error("Transfer not allowed")]
    TransferNotAllowed {},

    #[error("Ledger is paused")]
    Paused {},

    #[error("Not enough balance")]
    NotEnoughBalance {},

    #[error("Insufficient allowance")]
    InsufficientAllowance {},

    #[error("Ratio must be within [0, 1_000_000]: {ratio}")]
    InvalidRatio { ratio: u32 },
}
