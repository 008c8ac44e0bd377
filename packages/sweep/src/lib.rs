#![allow(clippy::too_many_arguments)]
pub mod amm;
pub mod helpers;
pub mod math;
pub mod stabilizer;
pub mod sweep_coin;
pub mod transfer_approver;
pub mod yield_backend;
