use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

use sweep::transfer_approver::Config;

pub const CONFIG: Item<Config> = Item::new("config");
/// Black- or whitelisted addresses depending on `Config::mode`
pub const LISTED: Map<&Addr, bool> = Map::new("listed");
