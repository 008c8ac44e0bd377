#![allow(non_camel_case_types)]
#![allow(clippy::too_many_arguments)]
pub mod contract;
mod error;
pub mod invest;
pub mod liquidations;
pub mod positions;
pub mod query;
pub mod reply;
pub mod risk_engine;
pub mod state;

pub use crate::error::ContractError;

#[cfg(test)]
#[allow(unused_variables)]
pub mod testing;
