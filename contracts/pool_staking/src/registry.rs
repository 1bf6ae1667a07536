//! Pool registry: appending pools, re-weighting them and keeping their
//! reward checkpoints current.
//!
//! Every function that changes `total_pool_weight` or the emission schedule
//! first checkpoints the pools whose accrual would otherwise be recomputed
//! under the new parameters.

use soroban_sdk::{log, Env};

use crate::{
    rewards, storage,
    types::{EmptyPoolPolicy, GlobalConfig, LedgerPolicy, Pool, StakingAsset},
    ContractError,
};

/// Loads pool `pid` and brings its checkpoint to the current ledger time
/// without persisting it.
pub fn load_current(env: &Env, config: &GlobalConfig, pid: u32) -> Result<Pool, ContractError> {
    let mut pool = storage::get_pool(env, pid)?;
    rewards::checkpoint(&mut pool, config, env.ledger().timestamp())?;
    Ok(pool)
}

/// Checkpoints pool `pid` and persists the result.
pub fn checkpoint(env: &Env, config: &GlobalConfig, pid: u32) -> Result<Pool, ContractError> {
    let pool = load_current(env, config, pid)?;
    storage::set_pool(env, pid, &pool);
    Ok(pool)
}

/// Checkpoints every pool. Returns the number of pools touched.
pub fn checkpoint_all(env: &Env, config: &GlobalConfig) -> Result<u32, ContractError> {
    let count = storage::pool_count(env);
    for pid in 0..count {
        checkpoint(env, config, pid)?;
    }
    Ok(count)
}

/// Appends a pool and folds its weight into `config.total_pool_weight`.
///
/// Pool 0 must stake the native asset and every later pool a token. When
/// `recalc_all` is set, existing pools are checkpointed under the old total
/// weight before it changes.
pub fn add_pool(
    env: &Env,
    config: &mut GlobalConfig,
    asset: StakingAsset,
    weight: i128,
    min_deposit: i128,
    unlock_delay: u64,
    recalc_all: bool,
) -> Result<u32, ContractError> {
    let count = storage::pool_count(env);
    let is_native = asset == StakingAsset::Native;
    if (count == 0) != is_native {
        log!(env, "pool 0 must be native and only pool 0", count);
        return Err(ContractError::InvalidPoolOrder);
    }
    if weight < 0 || min_deposit < 0 {
        return Err(ContractError::InvalidInput);
    }

    if recalc_all {
        checkpoint_all(env, config)?;
    }

    config.total_pool_weight = config
        .total_pool_weight
        .checked_add(weight)
        .ok_or(ContractError::ArithmeticOverflow)?;

    let pool = Pool {
        asset,
        weight,
        min_deposit,
        unlock_delay,
        total_staked: 0,
        last_checkpoint: env.ledger().timestamp(),
        acc_reward_per_share: 0,
        carried_reward: 0,
    };
    let pid = storage::push_pool(env, &pool)?;
    storage::set_config(env, config);
    Ok(pid)
}

/// Re-weights pool `pid`. All pools are checkpointed under the old weights
/// first, since every pool's share depends on the total.
pub fn set_weight(
    env: &Env,
    config: &mut GlobalConfig,
    pid: u32,
    weight: i128,
) -> Result<(), ContractError> {
    if weight < 0 {
        return Err(ContractError::InvalidInput);
    }
    // Existence check before any write.
    storage::get_pool(env, pid)?;
    checkpoint_all(env, config)?;

    let mut pool = storage::get_pool(env, pid)?;
    config.total_pool_weight = config
        .total_pool_weight
        .checked_sub(pool.weight)
        .and_then(|w| w.checked_add(weight))
        .ok_or(ContractError::ArithmeticOverflow)?;
    pool.weight = weight;

    storage::set_pool(env, pid, &pool);
    storage::set_config(env, config);
    Ok(())
}

/// Changes a pool's deposit minimum and unlock delay. The new delay applies
/// to unstake requests made from now on; queued requests keep their
/// `ready_at`.
pub fn update_params(
    env: &Env,
    pid: u32,
    min_deposit: i128,
    unlock_delay: u64,
) -> Result<(), ContractError> {
    if min_deposit < 0 {
        return Err(ContractError::InvalidInput);
    }
    let mut pool = storage::get_pool(env, pid)?;
    pool.min_deposit = min_deposit;
    pool.unlock_delay = unlock_delay;
    storage::set_pool(env, pid, &pool);
    Ok(())
}

/// Applies `change` to the global config. Every pool is checkpointed under
/// the current schedule and policy before the new values take effect.
pub fn reschedule<F>(env: &Env, change: F) -> Result<GlobalConfig, ContractError>
where
    F: FnOnce(&mut GlobalConfig),
{
    let config = storage::get_config(env)?;
    let mut next = config.clone();
    change(&mut next);
    if next.start_time > next.end_time {
        log!(env, "start after end", next.start_time, next.end_time);
        return Err(ContractError::InvalidSchedule);
    }
    if next.reward_rate < 0 {
        return Err(ContractError::InvalidInput);
    }

    checkpoint_all(env, &config)?;
    storage::set_config(env, &next);
    Ok(next)
}

/// Switches the ledger policy. Moving to `Forfeit` drops whatever reward
/// pools were carrying under `Carry`, since nobody earned it. Returns the
/// amount dropped.
pub fn set_policy(env: &Env, policy: LedgerPolicy) -> Result<i128, ContractError> {
    reschedule(env, |c| c.policy = policy)?;
    if policy.empty_pool != EmptyPoolPolicy::Forfeit {
        return Ok(0);
    }

    let mut dropped: i128 = 0;
    for pid in 0..storage::pool_count(env) {
        let mut pool = storage::get_pool(env, pid)?;
        if pool.carried_reward == 0 {
            continue;
        }
        dropped = dropped
            .checked_add(pool.carried_reward)
            .ok_or(ContractError::ArithmeticOverflow)?;
        pool.carried_reward = 0;
        storage::set_pool(env, pid, &pool);
    }
    if dropped > 0 {
        log!(env, "carried reward forfeited", dropped);
    }
    Ok(dropped)
}
