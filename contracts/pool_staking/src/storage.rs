//! Storage layout and typed accessors.
//!
//! Instance storage holds the singletons (`CONFIG`, pool count, lifecycle
//! markers); persistent storage holds one entry per pool, one per
//! (pool, user) pair and one principal counter per staked asset. New
//! versions may add keys here but must never rename or repurpose an
//! existing one.

use common::{TTL_EXTEND_TO, TTL_THRESHOLD};
use soroban_sdk::{symbol_short, Address, Env, Symbol, Vec};

use crate::{
    types::{GlobalConfig, Pool, UserStake},
    ContractError,
};

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const CONFIG: Symbol = symbol_short!("CONFIG");
const POOL_COUNT: Symbol = symbol_short!("POOL_CNT");

// Persistent entries use tuple keys: (prefix, pid) and (prefix, pid, user).
const POOL: Symbol = symbol_short!("POOL");
const USER: Symbol = symbol_short!("USER");
const CUSTODY: Symbol = symbol_short!("CUSTODY");

fn pool_key(pid: u32) -> (Symbol, u32) {
    (POOL, pid)
}

fn user_key(pid: u32, user: &Address) -> (Symbol, u32, Address) {
    (USER, pid, user.clone())
}

fn custody_key(asset: &Address) -> (Symbol, Address) {
    (CUSTODY, asset.clone())
}

/// Keeps every instance key (config, counters, pause flags) alive.
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Lifecycle ────────────────────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

pub fn set_initialized(env: &Env) {
    env.storage().instance().set(&INITIALIZED, &true);
}

// ── Global config ────────────────────────────────────────────────────────────

pub fn get_config(env: &Env) -> Result<GlobalConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

pub fn set_config(env: &Env, config: &GlobalConfig) {
    env.storage().instance().set(&CONFIG, config);
    extend_instance(env);
}

// ── Pools ────────────────────────────────────────────────────────────────────

pub fn pool_count(env: &Env) -> u32 {
    env.storage().instance().get(&POOL_COUNT).unwrap_or(0)
}

pub fn get_pool(env: &Env, pid: u32) -> Result<Pool, ContractError> {
    if pid >= pool_count(env) {
        return Err(ContractError::PoolNotFound);
    }
    let key = pool_key(pid);
    let pool = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(ContractError::PoolNotFound)?;
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    Ok(pool)
}

pub fn set_pool(env: &Env, pid: u32, pool: &Pool) {
    let key = pool_key(pid);
    env.storage().persistent().set(&key, pool);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Appends `pool` to the registry and returns its index.
pub fn push_pool(env: &Env, pool: &Pool) -> Result<u32, ContractError> {
    let pid = pool_count(env);
    let next = pid.checked_add(1).ok_or(ContractError::ArithmeticOverflow)?;
    set_pool(env, pid, pool);
    env.storage().instance().set(&POOL_COUNT, &next);
    Ok(pid)
}

// ── User positions ───────────────────────────────────────────────────────────

/// Returns the stored position, or an empty one if the user never deposited.
pub fn get_user(env: &Env, pid: u32, user: &Address) -> UserStake {
    let key = user_key(pid, user);
    match env.storage().persistent().get(&key) {
        Some(stake) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
            stake
        }
        None => UserStake {
            staked: 0,
            reward_debt: 0,
            pending_reward: 0,
            claimed_reward: 0,
            withdrawals: Vec::new(env),
        },
    }
}

pub fn set_user(env: &Env, pid: u32, user: &Address, stake: &UserStake) {
    let key = user_key(pid, user);
    env.storage().persistent().set(&key, stake);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Principal custody ────────────────────────────────────────────────────────

/// Principal of `asset` the contract holds for stakers across every pool,
/// staked or queued for withdrawal. Reward payouts may not dip into it.
pub fn custody(env: &Env, asset: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&custody_key(asset))
        .unwrap_or(0)
}

/// Adjusts the custodied principal of `asset` by `delta`.
pub fn adjust_custody(env: &Env, asset: &Address, delta: i128) -> Result<i128, ContractError> {
    let held = custody(env, asset)
        .checked_add(delta)
        .ok_or(ContractError::ArithmeticOverflow)?;
    if held < 0 {
        return Err(ContractError::ArithmeticOverflow);
    }
    let key = custody_key(asset);
    env.storage().persistent().set(&key, &held);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    Ok(held)
}
