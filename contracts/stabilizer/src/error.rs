use cosmwasm_std::{OverflowError, StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("Info.sender is not the borrower")]
    OnlyBorrower {},

    #[error("Info.sender is not the ledger's governance multisig")]
    NotGovernance {},

    #[error("Info.sender is not the ledger's collateral agency")]
    NotCollateralAgent {},

    #[error("Info.sender is not the ledger's balancer")]
    NotBalancer {},

    #[error("Stabilizer is paused")]
    Paused {},

    #[error("Zero address detected")]
    ZeroAddressDetected {},

    #[error("Zero amount detected")]
    ZeroAmountDetected {},

    #[error("Ratio must be within [0, 1_000_000]: {ratio}")]
    InvalidRatio { ratio: u32 },

    #[error("Borrow would exceed max borrow: {max_borrow}")]
    ExceedsMaxBorrow { max_borrow: Uint128 },

    #[error("Repayment exceeds outstanding debt")]
    ExcessRepayment {},

    #[error("Not enough balance")]
    NotEnoughBalance {},

    #[error("Withdrawal would take the equity ratio below its minimum")]
    EquityRatioExceeded {},

    #[error("Stabilizer is not defaulted")]
    NotDefaulted {},

    #[error("Swap returned {received}, below the minimum of {min_amount_out}")]
    SlippageExceeded {
        received: Uint128,
        min_amount_out: Uint128,
    },

    #[error("Auto invest is disabled")]
    AutoInvestDisabled {},

    #[error("Auto invest amount is below the minimum")]
    AutoInvestMinAmount {},

    #[error("Equity ratio is below the auto invest minimum")]
    AutoInvestMinRatio {},

    #[error("No fee to pay")]
    NoFeeDue {},
}
