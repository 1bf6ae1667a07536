use crate::{
    types::{EmptyPoolPolicy, GlobalConfig, Pool, UserStake},
    ContractError,
};

/// Fixed-point scaling factor.
///
/// `acc_reward_per_share` is stored multiplied by this constant so that a
/// pool's per-share increment keeps 18 decimal places even when the pool
/// holds far more stake than the interval emits in reward.
pub const SCALE: i128 = 1_000_000_000_000_000_000;

fn checked_mul(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_mul(b).ok_or(ContractError::ArithmeticOverflow)
}

fn checked_add(a: i128, b: i128) -> Result<i128, ContractError> {
    a.checked_add(b).ok_or(ContractError::ArithmeticOverflow)
}

// ── Core reward engine ──────────────────────────────────────────────────────

/// Reward a pool earns over `elapsed` seconds:
///
/// ```text
/// pool_reward = elapsed × reward_rate × weight / total_weight
/// ```
///
/// Truncates toward zero. A zero `total_weight` yields zero reward.
pub fn pool_reward(
    elapsed: u64,
    reward_rate: i128,
    weight: i128,
    total_weight: i128,
) -> Result<i128, ContractError> {
    if total_weight <= 0 {
        return Ok(0);
    }
    let emitted = checked_mul(i128::from(elapsed), reward_rate)?;
    let weighted = checked_mul(emitted, weight)?;
    Ok(weighted / total_weight)
}

/// Per-share increment for distributing `reward` over `total_staked`,
/// scaled by [`SCALE`].
pub fn reward_per_share(reward: i128, total_staked: i128) -> Result<i128, ContractError> {
    if total_staked <= 0 {
        return Ok(0);
    }
    Ok(checked_mul(reward, SCALE)? / total_staked)
}

/// Reward a balance of `staked` has accrued at accumulator value `acc`.
pub fn accrued(staked: i128, acc: i128) -> Result<i128, ContractError> {
    Ok(checked_mul(staked, acc)? / SCALE)
}

/// Brings `pool` current to `now`.
///
/// Only the part of `(last_checkpoint, now]` that overlaps the emission
/// window `[start_time, end_time]` earns reward. When the pool is empty the
/// interval's reward is forfeited or carried according to the ledger policy;
/// either way the checkpoint advances.
pub fn checkpoint(pool: &mut Pool, config: &GlobalConfig, now: u64) -> Result<(), ContractError> {
    if now <= pool.last_checkpoint {
        return Ok(());
    }

    let effective_start = pool.last_checkpoint.max(config.start_time);
    let effective_end = now.min(config.end_time);

    if effective_end > effective_start {
        let reward = pool_reward(
            effective_end - effective_start,
            config.reward_rate,
            pool.weight,
            config.total_pool_weight,
        )?;

        if pool.total_staked > 0 {
            let distributable = checked_add(reward, pool.carried_reward)?;
            let delta = reward_per_share(distributable, pool.total_staked)?;
            pool.acc_reward_per_share = checked_add(pool.acc_reward_per_share, delta)?;
            pool.carried_reward = 0;
        } else if config.policy.empty_pool == EmptyPoolPolicy::Carry {
            pool.carried_reward = checked_add(pool.carried_reward, reward)?;
        }
    }

    pool.last_checkpoint = now;
    Ok(())
}

/// Reward accrued on the position's current balance since its last
/// settlement.
///
/// The accumulator never decreases and `reward_debt` was computed from the
/// same balance at an earlier accumulator value. A negative difference means
/// the ledger is corrupt and fails with `ArithmeticOverflow`.
pub fn unsettled(stake: &UserStake, acc: i128) -> Result<i128, ContractError> {
    let fresh = accrued(stake.staked, acc)?
        .checked_sub(stake.reward_debt)
        .ok_or(ContractError::ArithmeticOverflow)?;
    if fresh < 0 {
        return Err(ContractError::ArithmeticOverflow);
    }
    Ok(fresh)
}

/// Total claimable reward: previously settled plus newly accrued.
pub fn pending(stake: &UserStake, acc: i128) -> Result<i128, ContractError> {
    checked_add(stake.pending_reward, unsettled(stake, acc)?)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
