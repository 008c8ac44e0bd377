use crate::contract::{execute, instantiate, query};
use crate::ContractError;

use cosmwasm_std::testing::{mock_dependencies, mock_env, mock_info};
use cosmwasm_std::{from_binary, Uint128};

use sweep::stabilizer::{ExecuteMsg, InstantiateMsg, QueryMsg, RiskConfig};

fn instantiate_msg() -> InstantiateMsg {
    InstantiateMsg {
        name: String::from("Stabilizer"),
        sweep: String::from("sweep"),
        borrower: String::from("borrower"),
        yield_backend: String::from("backend"),
        amm: String::from("amm"),
        quote_denom: String::from("uusdc"),
        risk_config: None,
    }
}

fn risk_config() -> RiskConfig {
    RiskConfig {
        min_equity_ratio: 100_000,
        spread_fee: 20_000,
        max_borrow: Uint128::new(1_000_000_000),
        liquidator_discount: 50_000,
        call_delay: 86_400,
        auto_invest_min_equity_ratio: 200_000,
        auto_invest_min_amount: Uint128::new(10_000_000),
        auto_invest_enabled: true,
        metadata_url: String::from("https://sweep.example/stabilizer"),
    }
}

#[test]
fn instantiate_validation() {
    let mut deps = mock_dependencies();

    let mut msg = instantiate_msg();
    msg.borrower = String::new();
    let err = instantiate(deps.as_mut(), mock_env(), mock_info("deployer", &[]), msg).unwrap_err();
    assert_eq!(err, ContractError::ZeroAddressDetected {});

    let mut msg = instantiate_msg();
    msg.risk_config = Some(RiskConfig {
        liquidator_discount: 1_000_001,
        ..RiskConfig::default()
    });
    let err = instantiate(deps.as_mut(), mock_env(), mock_info("deployer", &[]), msg).unwrap_err();
    assert_eq!(err, ContractError::InvalidRatio { ratio: 1_000_001 });

    instantiate(deps.as_mut(), mock_env(), mock_info("deployer", &[]), instantiate_msg()).unwrap();
    let res = query(deps.as_ref(), mock_env(), QueryMsg::RiskConfig {}).unwrap();
    let stored: RiskConfig = from_binary(&res).unwrap();
    assert_eq!(stored, RiskConfig::default());
}

#[test]
fn configure() {
    let mut deps = mock_dependencies();
    instantiate(deps.as_mut(), mock_env(), mock_info("deployer", &[]), instantiate_msg()).unwrap();

    let err = execute(
        deps.as_mut(),
        mock_env(),
        mock_info("stranger", &[]),
        ExecuteMsg::Configure(risk_config()),
    )
    .unwrap_err();
    assert_eq!(err, ContractError::OnlyBorrower {});

    //Every ratio is bounded by 100%
    for invalid in [
        RiskConfig { min_equity_ratio: 1_000_001, ..risk_config() },
        RiskConfig { spread_fee: 1_000_001, ..risk_config() },
        RiskConfig { auto_invest_min_equity_ratio: 2_000_000, ..risk_config() },
    ] {
        let err = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("borrower", &[]),
            ExecuteMsg::Configure(invalid),
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::InvalidRatio { .. }));
    }

    //Full range is accepted
    execute(
        deps.as_mut(),
        mock_env(),
        mock_info("borrower", &[]),
        ExecuteMsg::Configure(RiskConfig { min_equity_ratio: 1_000_000, ..risk_config() }),
    )
    .unwrap();

    //Resubmitting the same values changes nothing
    for _ in 0..2 {
        execute(
            deps.as_mut(),
            mock_env(),
            mock_info("borrower", &[]),
            ExecuteMsg::Configure(risk_config()),
        )
        .unwrap();

        let res = query(deps.as_ref(), mock_env(), QueryMsg::RiskConfig {}).unwrap();
        let stored: RiskConfig = from_binary(&res).unwrap();
        assert_eq!(stored, risk_config());
    }
}

#[test]
fn borrower_only_operations() {
    let mut deps = mock_dependencies();
    instantiate(deps.as_mut(), mock_env(), mock_info("deployer", &[]), instantiate_msg()).unwrap();

    for msg in [
        ExecuteMsg::Borrow { amount: Uint128::new(1) },
        ExecuteMsg::Repay { amount: Uint128::new(1) },
        ExecuteMsg::PayFee {},
        ExecuteMsg::Invest { amount: Uint128::new(1), slippage: 0 },
        ExecuteMsg::Divest { amount: Uint128::new(1), slippage: None },
        ExecuteMsg::Collect {},
    ] {
        let err = execute(deps.as_mut(), mock_env(), mock_info("stranger", &[]), msg).unwrap_err();
        assert_eq!(err, ContractError::OnlyBorrower {});
    }

    //Max borrow defaults to zero
    let err = execute(
        deps.as_mut(),
        mock_env(),
        mock_info("borrower", &[]),
        ExecuteMsg::Borrow { amount: Uint128::new(1) },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::ExceedsMaxBorrow { max_borrow: Uint128::zero() });

    let err = execute(
        deps.as_mut(),
        mock_env(),
        mock_info("borrower", &[]),
        ExecuteMsg::Repay { amount: Uint128::new(1) },
    )
    .unwrap_err();
    assert_eq!(err, ContractError::ExcessRepayment {});
}
