#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pool_staking::{
    EmptyPoolPolicy, LedgerPolicy, MinDepositPolicy, PoolStakingContract,
    PoolStakingContractClient, StakingAsset,
};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    Address, Env,
};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { pid: u8, amount: u64 },
    Unstake { pid: u8, amount: u64 },
    Withdraw { pid: u8 },
    Claim { pid: u8 },
    Advance { secs: u16 },
    SetWeight { pid: u8, weight: u32 },
    SetRate { rate: u32 },
}

#[derive(Arbitrary, Debug)]
pub struct FuzzInput {
    carry: bool,
    every_deposit: bool,
    actions: Vec<FuzzAction>,
}

fuzz_target!(|input: FuzzInput| {
    let env = Env::default();
    env.mock_all_auths();

    let reward = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let native = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(PoolStakingContract, ());
    let client = PoolStakingContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let policy = LedgerPolicy {
        empty_pool: if input.carry {
            EmptyPoolPolicy::Carry
        } else {
            EmptyPoolPolicy::Forfeit
        },
        min_deposit: if input.every_deposit {
            MinDepositPolicy::EveryDeposit
        } else {
            MinDepositPolicy::FirstDeposit
        },
    };
    client.initialize(&admin, &reward, &native, &0, &u64::MAX, &1_000, &policy);
    client.add_pool(&admin, &StakingAsset::Native, &100, &10, &30, &true);
    client.add_pool(&admin, &StakingAsset::Token(token.clone()), &100, &10, &30, &true);
    StellarAssetClient::new(&env, &reward).mint(&contract_id, &i128::MAX);

    let mut users = vec![admin.clone()];
    for _ in 0..4 {
        let user = Address::generate(&env);
        StellarAssetClient::new(&env, &native).mint(&user, &(u64::MAX as i128));
        StellarAssetClient::new(&env, &token).mint(&user, &(u64::MAX as i128));
        users.push(user);
    }

    let mut now = 0u64;
    // Contract errors are expected; host panics and broken invariants are not.
    for (i, action) in input.actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Deposit { pid, amount } => {
                let _ = client.try_deposit(caller, &u32::from(pid % 3), &(amount as i128));
            }
            FuzzAction::Unstake { pid, amount } => {
                let _ = client.try_unstake(caller, &u32::from(pid % 3), &(amount as i128));
            }
            FuzzAction::Withdraw { pid } => {
                let _ = client.try_withdraw(caller, &u32::from(pid % 3));
            }
            FuzzAction::Claim { pid } => {
                let _ = client.try_claim(caller, &u32::from(pid % 3));
            }
            FuzzAction::Advance { secs } => {
                now = now.saturating_add(u64::from(secs));
                env.ledger().set_timestamp(now);
            }
            FuzzAction::SetWeight { pid, weight } => {
                let _ = client.try_set_pool_weight(&admin, &u32::from(pid % 3), &i128::from(weight));
            }
            FuzzAction::SetRate { rate } => {
                let _ = client.try_set_reward_rate(&admin, &i128::from(rate));
            }
        }

        for pid in 0..2u32 {
            let total = client.pool(&pid).total_staked;
            let sum: i128 = users.iter().map(|u| client.staking_balance(&pid, u)).sum();
            assert_eq!(total, sum, "pool {pid} total_staked drifted");
            for user in users.iter() {
                if let Ok(Ok(pending)) = client.try_pending_reward(&pid, user) {
                    assert!(pending >= 0);
                }
            }
        }
    }
});
