#![allow(deprecated)] // events().publish migration tracked separately

use common::Role;
use soroban_sdk::{symbol_short, Address, BytesN, Env};

use crate::{
    circuit_breaker::PauseScope,
    types::{LedgerPolicy, StakingAsset},
};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the ledger is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub reward_token: Address,
    pub native_token: Address,
    pub start_time: u64,
    pub end_time: u64,
    pub reward_rate: i128,
    pub timestamp: u64,
}

/// Fired when an admin appends a pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolAddedEvent {
    pub pid: u32,
    pub asset: StakingAsset,
    pub weight: i128,
    pub min_deposit: i128,
    pub unlock_delay: u64,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolWeightSetEvent {
    pub pid: u32,
    pub weight: i128,
    pub total_pool_weight: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolUpdatedEvent {
    pub pid: u32,
    pub min_deposit: i128,
    pub unlock_delay: u64,
    pub timestamp: u64,
}

/// Fired whenever the start time, end time or emission rate changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScheduleSetEvent {
    pub start_time: u64,
    pub end_time: u64,
    pub reward_rate: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PolicySetEvent {
    pub policy: LedgerPolicy,
    pub timestamp: u64,
}

/// Fired when a user deposits stake into a pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositedEvent {
    pub pid: u32,
    pub user: Address,
    pub amount: i128,
    pub new_staked: i128,
    pub pool_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when a user queues an unstake request.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakeRequestedEvent {
    pub pid: u32,
    pub user: Address,
    pub amount: i128,
    pub ready_at: u64,
    pub timestamp: u64,
}

/// Fired when matured unstake requests are paid out.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub pid: u32,
    pub user: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardClaimedEvent {
    pub pid: u32,
    pub user: Address,
    pub amount: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseChangedEvent {
    pub caller: Address,
    pub scope: PauseScope,
    pub paused: bool,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleChangedEvent {
    pub caller: Address,
    pub target: Address,
    pub role: Role,
    pub granted: bool,
    pub timestamp: u64,
}

/// Fired before the executable is swapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpgradedEvent {
    pub caller: Address,
    pub from_version: u32,
    pub to_version: u32,
    pub wasm_hash: BytesN<32>,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MigratedEvent {
    pub caller: Address,
    pub version: u32,
    pub pools_touched: u32,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    reward_token: Address,
    native_token: Address,
    start_time: u64,
    end_time: u64,
    reward_rate: i128,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            reward_token,
            native_token,
            start_time,
            end_time,
            reward_rate,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_added(
    env: &Env,
    pid: u32,
    asset: StakingAsset,
    weight: i128,
    min_deposit: i128,
    unlock_delay: u64,
) {
    env.events().publish(
        (symbol_short!("POOL_ADD"), pid),
        PoolAddedEvent {
            pid,
            asset,
            weight,
            min_deposit,
            unlock_delay,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_weight_set(env: &Env, pid: u32, weight: i128, total_pool_weight: i128) {
    env.events().publish(
        (symbol_short!("POOL_WGT"), pid),
        PoolWeightSetEvent {
            pid,
            weight,
            total_pool_weight,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_updated(env: &Env, pid: u32, min_deposit: i128, unlock_delay: u64) {
    env.events().publish(
        (symbol_short!("POOL_UPD"), pid),
        PoolUpdatedEvent {
            pid,
            min_deposit,
            unlock_delay,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_schedule_set(env: &Env, start_time: u64, end_time: u64, reward_rate: i128) {
    env.events().publish(
        (symbol_short!("SCHED"),),
        ScheduleSetEvent {
            start_time,
            end_time,
            reward_rate,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_policy_set(env: &Env, policy: LedgerPolicy) {
    env.events().publish(
        (symbol_short!("POLICY"),),
        PolicySetEvent {
            policy,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposited(
    env: &Env,
    pid: u32,
    user: Address,
    amount: i128,
    new_staked: i128,
    pool_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), pid, user.clone()),
        DepositedEvent {
            pid,
            user,
            amount,
            new_staked,
            pool_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstake_requested(env: &Env, pid: u32, user: Address, amount: i128, ready_at: u64) {
    env.events().publish(
        (symbol_short!("UNSTK_REQ"), pid, user.clone()),
        UnstakeRequestedEvent {
            pid,
            user,
            amount,
            ready_at,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(env: &Env, pid: u32, user: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), pid, user.clone()),
        WithdrawnEvent {
            pid,
            user,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_claimed(env: &Env, pid: u32, user: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("CLMD"), pid, user.clone()),
        RewardClaimedEvent {
            pid,
            user,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pause_changed(env: &Env, caller: Address, scope: PauseScope, paused: bool) {
    let topic = if paused {
        symbol_short!("PAUSED")
    } else {
        symbol_short!("RESUMED")
    };
    env.events().publish(
        (topic, caller.clone()),
        PauseChangedEvent {
            caller,
            scope,
            paused,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_role_changed(env: &Env, caller: Address, target: Address, role: Role, granted: bool) {
    let topic = if granted {
        symbol_short!("ROLE_GRNT")
    } else {
        symbol_short!("ROLE_RVK")
    };
    env.events().publish(
        (topic, target.clone()),
        RoleChangedEvent {
            caller,
            target,
            role,
            granted,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_upgraded(
    env: &Env,
    caller: Address,
    from_version: u32,
    to_version: u32,
    wasm_hash: BytesN<32>,
) {
    env.events().publish(
        (symbol_short!("UPGRADED"),),
        UpgradedEvent {
            caller,
            from_version,
            to_version,
            wasm_hash,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_migrated(env: &Env, caller: Address, version: u32, pools_touched: u32) {
    env.events().publish(
        (symbol_short!("MIGRATED"),),
        MigratedEvent {
            caller,
            version,
            pools_touched,
            timestamp: env.ledger().timestamp(),
        },
    );
}
