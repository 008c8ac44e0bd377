#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    attr, to_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use sweep::transfer_approver::{Config, ExecuteMsg, InstantiateMsg, QueryMsg};

use crate::error::ContractError;
use crate::state::{CONFIG, LISTED};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:transfer-approver";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    let owner = match msg.owner {
        Some(owner) => deps.api.addr_validate(&owner)?,
        None => info.sender,
    };
    let config = Config { owner, mode: msg.mode };

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attributes(vec![
        attr("method", "instantiate"),
        attr("owner", config.owner.to_string()),
        attr("mode", format!("{:?}", config.mode)),
    ]))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized {});
    }

    match msg {
        ExecuteMsg::List { address } => {
            let address = deps.api.addr_validate(&address)?;
            if LISTED.has(deps.storage, &address) {
                return Err(ContractError::AlreadyListed {});
            }
            LISTED.save(deps.storage, &address, &true)?;

            Ok(Response::new().add_attributes(vec![
                attr("method", "list"),
                attr("address", address),
            ]))
        }
        ExecuteMsg::Unlist { address } => {
            let address = deps.api.addr_validate(&address)?;
            if !LISTED.has(deps.storage, &address) {
                return Err(ContractError::NotListed {});
            }
            LISTED.remove(deps.storage, &address);

            Ok(Response::new().add_attributes(vec![
                attr("method", "unlist"),
                attr("address", address),
            ]))
        }
        ExecuteMsg::UpdateOwner { owner } => {
            config.owner = deps.api.addr_validate(&owner)?;
            CONFIG.save(deps.storage, &config)?;

            Ok(Response::new().add_attributes(vec![
                attr("method", "update_owner"),
                attr("owner", config.owner),
            ]))
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_binary(&CONFIG.load(deps.storage)?),
        QueryMsg::IsAllowed { address } => {
            let config = CONFIG.load(deps.storage)?;
            let listed = is_listed(deps, address)?;
            to_binary(&config.mode.is_allowed(listed))
        }
        QueryMsg::IsListed { address } => to_binary(&is_listed(deps, address)?),
    }
}

fn is_listed(deps: Deps, address: String) -> StdResult<bool> {
    let address = deps.api.addr_validate(&address)?;
    Ok(LISTED.has(deps.storage, &address))
}
