use cosmwasm_schema::cw_serde;
use cosmwasm_std::{
    to_binary, Addr, CosmosMsg, QuerierWrapper, StdResult, Uint128, WasmMsg,
};
use cw20::BalanceResponse;

use crate::amm::{PriceResponse, QueryMsg as AmmQueryMsg};
use crate::sweep_coin::{Config as SweepConfig, ExecuteMsg as SweepExecuteMsg, QueryMsg as SweepQueryMsg};
use crate::transfer_approver::QueryMsg as ApproverQueryMsg;
use crate::yield_backend::QueryMsg as BackendQueryMsg;

/// SweepContract is a wrapper around the ledger's Addr with helpers
/// for building its messages and queries
#[cw_serde]
pub struct SweepContract(pub Addr);

impl SweepContract {
    pub fn addr(&self) -> Addr {
        self.0.clone()
    }

    pub fn call<T: Into<SweepExecuteMsg>>(&self, msg: T) -> StdResult<CosmosMsg> {
        let msg = to_binary(&msg.into())?;
        Ok(WasmMsg::Execute {
            contract_addr: self.addr().into(),
            msg,
            funds: vec![],
        }
        .into())
    }

    pub fn config(&self, querier: &QuerierWrapper) -> StdResult<SweepConfig> {
        querier.query_wasm_smart(self.addr(), &SweepQueryMsg::Config {})
    }

    pub fn target_price(&self, querier: &QuerierWrapper) -> StdResult<Uint128> {
        querier.query_wasm_smart(self.addr(), &SweepQueryMsg::TargetPrice {})
    }

    pub fn balance(&self, querier: &QuerierWrapper, address: impl Into<String>) -> StdResult<Uint128> {
        let res: BalanceResponse = querier.query_wasm_smart(
            self.addr(),
            &SweepQueryMsg::Balance { address: address.into() },
        )?;
        Ok(res.balance)
    }
}

/// Swap venue spot price, 1e6 scale
pub fn query_amm_price(querier: &QuerierWrapper, amm: &Addr) -> StdResult<Uint128> {
    let res: PriceResponse = querier.query_wasm_smart(amm, &AmmQueryMsg::Price {})?;
    Ok(res.price)
}

/// Transfer policy predicate for `address`
pub fn query_transfer_allowed(
    querier: &QuerierWrapper,
    approver: &Addr,
    address: impl Into<String>,
) -> StdResult<bool> {
    querier.query_wasm_smart(
        approver,
        &ApproverQueryMsg::IsAllowed { address: address.into() },
    )
}

/// Value the yield backend holds for `account`
pub fn query_backend_value(
    querier: &QuerierWrapper,
    backend: &Addr,
    account: impl Into<String>,
) -> StdResult<Uint128> {
    querier.query_wasm_smart(
        backend,
        &BackendQueryMsg::AssetValue { account: account.into() },
    )
}
