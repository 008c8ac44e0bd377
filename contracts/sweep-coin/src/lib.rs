#![allow(non_camel_case_types)]
#![allow(clippy::too_many_arguments)]
pub mod contract;
mod error;
pub mod minters;
pub mod query;
pub mod state;

pub use crate::error::ContractError;

#[cfg(test)]
pub mod testing;
