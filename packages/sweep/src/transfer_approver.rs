use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Addr;

#[cw_serde]
pub enum ApprovalMode {
    /// Allowed unless listed
    Blacklist,
    /// Allowed only if listed
    Whitelist,
}

impl ApprovalMode {
    pub fn is_allowed(&self, listed: bool) -> bool {
        match self {
            ApprovalMode::Blacklist => !listed,
            ApprovalMode::Whitelist => listed,
        }
    }
}

#[cw_serde]
pub struct InstantiateMsg {
    pub owner: Option<String>,
    pub mode: ApprovalMode,
}

#[cw_serde]
pub enum ExecuteMsg {
    List { address: String },
    Unlist { address: String },
    UpdateOwner { owner: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    /// The policy predicate
    #[returns(bool)]
    IsAllowed { address: String },
    #[returns(bool)]
    IsListed { address: String },
}

#[cw_serde]
pub struct Config {
    pub owner: Addr,
    pub mode: ApprovalMode,
}
