use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

use sweep::sweep_coin::{Config, MinterInfo};

#[cw_serde]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: Uint128,
}

pub const CONFIG: Item<Config> = Item::new("config");
pub const TOKEN_INFO: Item<TokenInfo> = Item::new("token_info");
pub const BALANCES: Map<&Addr, Uint128> = Map::new("balances");
/// (owner, spender) -> remaining allowance
pub const ALLOWANCES: Map<(&Addr, &Addr), Uint128> = Map::new("allowances");

/// Listed minters. Removal swaps the last entry into the freed slot.
pub const MINTERS: Item<Vec<Addr>> = Item::new("minters");
/// Every minter ever added, listed or not
pub const MINTER_INFO: Map<&Addr, MinterInfo> = Map::new("minter_info");

/// Config ownership transfer
pub const OWNERSHIP_TRANSFER: Item<Addr> = Item::new("ownership_transfer");
