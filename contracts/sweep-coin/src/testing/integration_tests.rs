#[cfg(test)]
#[allow(unused_variables)]
mod tests {

    use crate::ContractError;

    use sweep::sweep_coin::{ExecuteMsg, InstantiateMsg, QueryMsg};
    use sweep::transfer_approver::{
        ApprovalMode, ExecuteMsg as ApproverExecuteMsg, InstantiateMsg as ApproverInstantiateMsg,
    };

    use cosmwasm_schema::cw_serde;
    use cosmwasm_std::{to_binary, Addr, Binary, Empty, Response, StdResult, Uint128};
    use cw20::{BalanceResponse, Cw20ReceiveMsg};
    use cw_multi_test::{App, AppBuilder, Contract, ContractWrapper, Executor};

    const ADMIN: &str = "admin";
    const USER: &str = "user";
    const MINTER: &str = "minter";

    //Sweep Coin Contract
    pub fn sweep_coin_contract() -> Box<dyn Contract<Empty>> {
        let contract = ContractWrapper::new(
            crate::contract::execute,
            crate::contract::instantiate,
            crate::contract::query,
        );
        Box::new(contract)
    }

    //Transfer Approver Contract
    pub fn transfer_approver_contract() -> Box<dyn Contract<Empty>> {
        let contract = ContractWrapper::new(
            transfer_approver::contract::execute,
            transfer_approver::contract::instantiate,
            transfer_approver::contract::query,
        );
        Box::new(contract)
    }

    //Mock Receiver Contract
    #[cw_serde]
    pub enum Receiver_MockExecuteMsg {
        Receive(Cw20ReceiveMsg),
    }

    #[cw_serde]
    pub struct Receiver_MockInstantiateMsg {}

    #[cw_serde]
    pub enum Receiver_MockQueryMsg {
        Ping {},
    }

    pub fn receiver_contract() -> Box<dyn Contract<Empty>> {
        let contract = ContractWrapper::new(
            |deps, _, info, msg: Receiver_MockExecuteMsg| -> StdResult<Response> {
                match msg {
                    Receiver_MockExecuteMsg::Receive(receive) => Ok(Response::new()
                        .add_attribute("hook_sender", receive.sender)
                        .add_attribute("hook_amount", receive.amount)),
                }
            },
            |_, _, _, _: Receiver_MockInstantiateMsg| -> StdResult<Response> {
                Ok(Response::default())
            },
            |_, _, _: Receiver_MockQueryMsg| -> StdResult<Binary> { to_binary(&true) },
        );
        Box::new(contract)
    }

    fn mock_app() -> App {
        AppBuilder::new().build(|_router, _, _storage| {})
    }

    fn proper_instantiate() -> (App, Addr, Addr) {
        let mut app = mock_app();

        let approver_id = app.store_code(transfer_approver_contract());
        let approver_contract_addr = app
            .instantiate_contract(
                approver_id,
                Addr::unchecked(ADMIN),
                &ApproverInstantiateMsg {
                    owner: None,
                    mode: ApprovalMode::Blacklist,
                },
                &[],
                "transfer_approver",
                None,
            )
            .unwrap();

        let sweep_id = app.store_code(sweep_coin_contract());
        let msg = InstantiateMsg {
            name: String::from("Sweep Dollar"),
            symbol: String::from("SWEEP"),
            decimals: 6,
            owner: None,
            target_price: None,
            arb_spread: 0,
            period_time: None,
            amm: None,
            treasury: None,
            balancer: None,
            collateral_agency: None,
            transfer_approver: None,
        };
        let sweep_contract_addr = app
            .instantiate_contract(sweep_id, Addr::unchecked(ADMIN), &msg, &[], "sweep_coin", None)
            .unwrap();

        //Fund the user through a minter
        app.execute_contract(
            Addr::unchecked(ADMIN),
            sweep_contract_addr.clone(),
            &ExecuteMsg::AddMinter {
                minter: MINTER.to_string(),
                max_amount: Uint128::new(1_000_000_000),
            },
            &[],
        )
        .unwrap();
        app.execute_contract(
            Addr::unchecked(MINTER),
            sweep_contract_addr.clone(),
            &ExecuteMsg::MinterMint {
                recipient: USER.to_string(),
                amount: Uint128::new(1_000_000),
            },
            &[],
        )
        .unwrap();

        (app, sweep_contract_addr, approver_contract_addr)
    }

    fn balance(app: &App, sweep: &Addr, address: &str) -> Uint128 {
        let res: BalanceResponse = app
            .wrap()
            .query_wasm_smart(sweep.clone(), &QueryMsg::Balance { address: address.to_string() })
            .unwrap();
        res.balance
    }

    fn transfer_msg(recipient: &str, amount: u128) -> ExecuteMsg {
        ExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount: Uint128::new(amount),
        }
    }

    #[test]
    fn paused_transfers() {
        let (mut app, sweep, _approver) = proper_instantiate();

        app.execute_contract(Addr::unchecked(ADMIN), sweep.clone(), &ExecuteMsg::Pause {}, &[])
            .unwrap();

        let err = app
            .execute_contract(Addr::unchecked(USER), sweep.clone(), &transfer_msg("bob", 100), &[])
            .unwrap_err();
        assert_eq!(err.root_cause().to_string(), ContractError::Paused {}.to_string());

        //Minting is a credit too
        let err = app
            .execute_contract(
                Addr::unchecked(MINTER),
                sweep.clone(),
                &ExecuteMsg::MinterMint {
                    recipient: USER.to_string(),
                    amount: Uint128::new(1),
                },
                &[],
            )
            .unwrap_err();
        assert_eq!(err.root_cause().to_string(), ContractError::Paused {}.to_string());

        app.execute_contract(Addr::unchecked(ADMIN), sweep.clone(), &ExecuteMsg::Unpause {}, &[])
            .unwrap();
        app.execute_contract(Addr::unchecked(USER), sweep.clone(), &transfer_msg("bob", 100), &[])
            .unwrap();

        assert_eq!(balance(&app, &sweep, "bob"), Uint128::new(100));
        assert_eq!(balance(&app, &sweep, USER), Uint128::new(999_900));
    }

    #[test]
    fn blacklist_policy_switch() {
        let (mut app, sweep, approver) = proper_instantiate();

        app.execute_contract(
            Addr::unchecked(ADMIN),
            sweep.clone(),
            &ExecuteMsg::SetTransferApprover { approver: Some(approver.to_string()) },
            &[],
        )
        .unwrap();
        app.execute_contract(
            Addr::unchecked(ADMIN),
            approver.clone(),
            &ApproverExecuteMsg::List { address: String::from("bob") },
            &[],
        )
        .unwrap();

        let err = app
            .execute_contract(Addr::unchecked(USER), sweep.clone(), &transfer_msg("bob", 100), &[])
            .unwrap_err();
        assert_eq!(
            err.root_cause().to_string(),
            ContractError::TransferNotAllowed {}.to_string()
        );

        //Unlisted parties are unaffected
        app.execute_contract(Addr::unchecked(USER), sweep.clone(), &transfer_msg("carol", 100), &[])
            .unwrap();

        //De-listing permits the same transfer
        app.execute_contract(
            Addr::unchecked(ADMIN),
            approver.clone(),
            &ApproverExecuteMsg::Unlist { address: String::from("bob") },
            &[],
        )
        .unwrap();
        app.execute_contract(Addr::unchecked(USER), sweep.clone(), &transfer_msg("bob", 100), &[])
            .unwrap();

        assert_eq!(balance(&app, &sweep, "bob"), Uint128::new(100));
        assert_eq!(balance(&app, &sweep, USER), Uint128::new(999_800));
    }

    #[test]
    fn whitelist_policy() {
        let (mut app, sweep, _) = proper_instantiate();

        let approver_id = app.store_code(transfer_approver_contract());
        let whitelist = app
            .instantiate_contract(
                approver_id,
                Addr::unchecked(ADMIN),
                &ApproverInstantiateMsg {
                    owner: None,
                    mode: ApprovalMode::Whitelist,
                },
                &[],
                "whitelist",
                None,
            )
            .unwrap();
        app.execute_contract(
            Addr::unchecked(ADMIN),
            sweep.clone(),
            &ExecuteMsg::SetTransferApprover { approver: Some(whitelist.to_string()) },
            &[],
        )
        .unwrap();

        let err = app
            .execute_contract(Addr::unchecked(USER), sweep.clone(), &transfer_msg("bob", 100), &[])
            .unwrap_err();
        assert_eq!(
            err.root_cause().to_string(),
            ContractError::TransferNotAllowed {}.to_string()
        );

        app.execute_contract(
            Addr::unchecked(ADMIN),
            whitelist,
            &ApproverExecuteMsg::List { address: String::from("bob") },
            &[],
        )
        .unwrap();
        app.execute_contract(Addr::unchecked(USER), sweep.clone(), &transfer_msg("bob", 100), &[])
            .unwrap();

        //Removing the policy lifts every restriction
        app.execute_contract(
            Addr::unchecked(ADMIN),
            sweep.clone(),
            &ExecuteMsg::SetTransferApprover { approver: None },
            &[],
        )
        .unwrap();
        app.execute_contract(Addr::unchecked(USER), sweep.clone(), &transfer_msg("carol", 100), &[])
            .unwrap();
        assert_eq!(balance(&app, &sweep, "carol"), Uint128::new(100));
    }

    #[test]
    fn send_calls_receive_hook() {
        let (mut app, sweep, _) = proper_instantiate();

        let receiver_id = app.store_code(receiver_contract());
        let receiver = app
            .instantiate_contract(
                receiver_id,
                Addr::unchecked(ADMIN),
                &Receiver_MockInstantiateMsg {},
                &[],
                "receiver",
                None,
            )
            .unwrap();

        let res = app
            .execute_contract(
                Addr::unchecked(USER),
                sweep.clone(),
                &ExecuteMsg::Send {
                    contract: receiver.to_string(),
                    amount: Uint128::new(250),
                    msg: to_binary(&"hook").unwrap(),
                },
                &[],
            )
            .unwrap();

        let hook_event = res
            .events
            .iter()
            .find(|event| event.ty == "wasm" && event.attributes.iter().any(|attr| attr.key == "hook_amount"))
            .unwrap();
        assert!(hook_event
            .attributes
            .iter()
            .any(|attr| attr.key == "hook_sender" && attr.value == USER));

        assert_eq!(balance(&app, &sweep, receiver.as_str()), Uint128::new(250));
    }
}
