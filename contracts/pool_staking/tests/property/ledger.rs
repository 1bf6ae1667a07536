#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based state machine tests for the staking ledger.
//!
//! Random sequences of deposit / unstake / withdraw / claim / time travel
//! run against a live contract. After every step:
//! - `total_staked` equals the sum of every user's `staked`
//! - the contract holds exactly `total_staked` plus all queued withdrawals,
//!   and reports that same figure as principal held
//! - no user's pending reward is negative
//! - pending plus claimed reward never exceeds what the pool emitted
//! - a successful claim leaves nothing pending

use pool_staking::{
    EmptyPoolPolicy, LedgerPolicy, MinDepositPolicy, PoolStakingContract,
    PoolStakingContractClient, StakingAsset,
};
use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::testutils::{Address as _, Ledger as _};
use soroban_sdk::token::{Client as TokenClient, StellarAssetClient};
use soroban_sdk::{Address, Env};

const USERS: usize = 3;
const PID: u32 = 1;
const RATE: i128 = 7;
const END: u64 = 5_000;

#[derive(Arbitrary, Clone, Debug)]
enum Op {
    Deposit {
        #[proptest(strategy = "0usize..USERS")]
        user: usize,
        #[proptest(strategy = "1i128..5_000")]
        amount: i128,
    },
    Unstake {
        #[proptest(strategy = "0usize..USERS")]
        user: usize,
        #[proptest(strategy = "1i128..5_000")]
        amount: i128,
    },
    Withdraw {
        #[proptest(strategy = "0usize..USERS")]
        user: usize,
    },
    Claim {
        #[proptest(strategy = "0usize..USERS")]
        user: usize,
    },
    Advance {
        #[proptest(strategy = "0u64..400")]
        secs: u64,
    },
}

struct World {
    env: Env,
    client: PoolStakingContractClient<'static>,
    contract_id: Address,
    stake_token: Address,
    users: Vec<Address>,
    now: u64,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn setup(empty_pool: EmptyPoolPolicy) -> World {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(0);

    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let native_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(PoolStakingContract, ());
    let client = PoolStakingContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let policy = LedgerPolicy {
        empty_pool,
        min_deposit: MinDepositPolicy::FirstDeposit,
    };
    client.initialize(&admin, &reward_token, &native_token, &0, &END, &RATE, &policy);
    client.add_pool(&admin, &StakingAsset::Native, &100, &0, &0, &true);
    client.add_pool(
        &admin,
        &StakingAsset::Token(stake_token.clone()),
        &100,
        &100,
        &60,
        &true,
    );

    StellarAssetClient::new(&env, &reward_token).mint(&contract_id, &1_000_000_000);
    let users = (0..USERS)
        .map(|_| {
            let user = Address::generate(&env);
            StellarAssetClient::new(&env, &stake_token).mint(&user, &1_000_000);
            user
        })
        .collect();

    World {
        env,
        client,
        contract_id,
        stake_token,
        users,
        now: 0,
    }
}

fn apply(world: &mut World, op: &Op) -> Result<(), TestCaseError> {
    match *op {
        Op::Deposit { user, amount } => {
            let _ = world.client.try_deposit(&world.users[user], &PID, &amount);
        }
        Op::Unstake { user, amount } => {
            let who = &world.users[user];
            let staked = world.client.staking_balance(&PID, who);
            let amount = amount.min(staked);
            if amount > 0 {
                world.client.unstake(who, &PID, &amount);
            }
        }
        Op::Withdraw { user } => {
            let who = &world.users[user];
            let (_, ready) = world.client.withdraw_amount(&PID, who);
            let paid = world.client.withdraw(who, &PID);
            prop_assert_eq!(paid, ready);
            prop_assert_eq!(world.client.withdraw_amount(&PID, who).1, 0);
        }
        Op::Claim { user } => {
            let who = &world.users[user];
            let expected = world.client.pending_reward(&PID, who);
            let paid = world.client.claim(who, &PID);
            prop_assert_eq!(paid, expected);
            prop_assert_eq!(world.client.pending_reward(&PID, who), 0);
        }
        Op::Advance { secs } => {
            world.now += secs;
            world.env.ledger().set_timestamp(world.now);
        }
    }
    Ok(())
}

fn check_invariants(world: &World) -> Result<(), TestCaseError> {
    let pool = world.client.pool(&PID);

    let mut staked_sum = 0i128;
    let mut queued_sum = 0i128;
    let mut reward_sum = 0i128;
    for user in world.users.iter() {
        let stake = world.client.user_stake(&PID, user);
        let pending = world.client.pending_reward(&PID, user);
        prop_assert!(pending >= 0);

        staked_sum += stake.staked;
        queued_sum += world.client.withdraw_amount(&PID, user).0;
        reward_sum += pending + stake.claimed_reward;
    }

    prop_assert_eq!(pool.total_staked, staked_sum);

    let held = TokenClient::new(&world.env, &world.stake_token).balance(&world.contract_id);
    prop_assert_eq!(held, staked_sum + queued_sum);
    prop_assert_eq!(world.client.principal_held(&world.stake_token), held);

    // Pool 1 holds half the total weight.
    let emitted = i128::from(world.now.min(END)) * RATE / 2;
    prop_assert!(reward_sum <= emitted);
    Ok(())
}

// ── proptest! blocks ──────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_ledger_invariants_forfeit(ops in proptest::collection::vec(any::<Op>(), 1..40)) {
        let mut world = setup(EmptyPoolPolicy::Forfeit);
        for op in ops.iter() {
            apply(&mut world, op)?;
            check_invariants(&world)?;
        }
    }

    #[test]
    fn prop_ledger_invariants_carry(ops in proptest::collection::vec(any::<Op>(), 1..40)) {
        let mut world = setup(EmptyPoolPolicy::Carry);
        for op in ops.iter() {
            apply(&mut world, op)?;
            check_invariants(&world)?;
        }
    }

    /// A single staker alone in the pool for the whole window receives the
    /// pool's entire emission, give or take truncation.
    #[test]
    fn prop_sole_staker_gets_pool_emission(
        amount in 100i128..100_000,
        secs in 1u64..END,
    ) {
        let world = setup(EmptyPoolPolicy::Forfeit);
        let user = &world.users[0];
        world.client.deposit(user, &PID, &amount);

        world.env.ledger().set_timestamp(secs);
        let pending = world.client.pending_reward(&PID, user);
        let emitted = i128::from(secs) * RATE / 2;

        prop_assert!(pending <= emitted);
        prop_assert!(emitted - pending <= 1);
    }
}
