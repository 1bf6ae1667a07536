//! Staking operations.
//!
//! Each operation checkpoints the pool, checks the pause switches, settles
//! the caller's reward, writes every storage change and only then calls out
//! to a token contract.

use soroban_sdk::{log, token, Address, Env};

use crate::{
    circuit_breaker::{self, OP_CLAIM, OP_DEPOSIT, OP_UNSTAKE, OP_WITHDRAW},
    events, ledger, registry, storage, timelock,
    types::{GlobalConfig, MinDepositPolicy, StakingAsset},
    ContractError,
};

fn asset_address(config: &GlobalConfig, asset: &StakingAsset) -> Address {
    match asset {
        StakingAsset::Native => config.native_token.clone(),
        StakingAsset::Token(address) => address.clone(),
    }
}

/// Locks `amount` of pool `pid`'s asset for `user`. Returns the new balance.
pub fn deposit(env: &Env, user: &Address, pid: u32, amount: i128) -> Result<i128, ContractError> {
    let config = storage::get_config(env)?;
    let mut pool = registry::load_current(env, &config, pid)?;
    circuit_breaker::require_not_paused(env, &OP_DEPOSIT)?;
    if amount <= 0 {
        return Err(ContractError::InvalidInput);
    }

    let mut stake = storage::get_user(env, pid, user);
    let enforce_min = match config.policy.min_deposit {
        MinDepositPolicy::FirstDeposit => stake.staked == 0,
        MinDepositPolicy::EveryDeposit => true,
    };
    if enforce_min && amount < pool.min_deposit {
        log!(env, "deposit below minimum", pid, amount, pool.min_deposit);
        return Err(ContractError::BelowMinDeposit);
    }

    ledger::settle(&mut stake, pool.acc_reward_per_share)?;
    let new_staked = ledger::credit(&mut stake, amount, pool.acc_reward_per_share)?;
    pool.total_staked = pool
        .total_staked
        .checked_add(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;

    let asset = asset_address(&config, &pool.asset);
    storage::set_pool(env, pid, &pool);
    storage::set_user(env, pid, user, &stake);
    storage::adjust_custody(env, &asset, amount)?;

    token::Client::new(env, &asset).transfer(
        user,
        &env.current_contract_address(),
        &amount,
    );

    events::publish_deposited(env, pid, user.clone(), amount, new_staked, pool.total_staked);

    Ok(new_staked)
}

/// Moves `amount` of `user`'s stake into the withdrawal queue. Returns the
/// time at which the request matures.
pub fn unstake(env: &Env, user: &Address, pid: u32, amount: i128) -> Result<u64, ContractError> {
    let config = storage::get_config(env)?;
    let mut pool = registry::load_current(env, &config, pid)?;
    circuit_breaker::require_not_paused(env, &OP_UNSTAKE)?;

    let mut stake = storage::get_user(env, pid, user);
    if amount <= 0 || amount > stake.staked {
        log!(env, "unstake exceeds stake", pid, amount, stake.staked);
        return Err(ContractError::InsufficientStake);
    }

    ledger::settle(&mut stake, pool.acc_reward_per_share)?;
    ledger::debit(&mut stake, amount, pool.acc_reward_per_share)?;
    pool.total_staked = pool
        .total_staked
        .checked_sub(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;

    let ready_at = timelock::enqueue(
        &mut stake.withdrawals,
        amount,
        env.ledger().timestamp(),
        pool.unlock_delay,
    )?;

    storage::set_pool(env, pid, &pool);
    storage::set_user(env, pid, user, &stake);

    events::publish_unstake_requested(env, pid, user.clone(), amount, ready_at);

    Ok(ready_at)
}

/// Pays out every matured withdrawal request. Returns the amount paid.
/// When nothing has matured nothing is written.
pub fn withdraw(env: &Env, user: &Address, pid: u32) -> Result<i128, ContractError> {
    let config = storage::get_config(env)?;
    let pool = registry::load_current(env, &config, pid)?;
    circuit_breaker::require_not_paused(env, &OP_WITHDRAW)?;

    let mut stake = storage::get_user(env, pid, user);
    let (locked, released) =
        timelock::drain_ready(env, &stake.withdrawals, env.ledger().timestamp())?;
    if released == 0 {
        return Ok(0);
    }

    stake.withdrawals = locked;
    let asset = asset_address(&config, &pool.asset);
    storage::set_pool(env, pid, &pool);
    storage::set_user(env, pid, user, &stake);
    storage::adjust_custody(env, &asset, -released)?;

    token::Client::new(env, &asset).transfer(
        &env.current_contract_address(),
        user,
        &released,
    );

    events::publish_withdrawn(env, pid, user.clone(), released);

    Ok(released)
}

/// Transfers all reward settled and accrued for `user` in pool `pid`.
/// Returns the amount paid, which is zero when nothing is pending.
pub fn claim(env: &Env, user: &Address, pid: u32) -> Result<i128, ContractError> {
    let config = storage::get_config(env)?;
    let pool = registry::load_current(env, &config, pid)?;
    circuit_breaker::require_not_paused(env, &OP_CLAIM)?;

    let mut stake = storage::get_user(env, pid, user);
    ledger::settle(&mut stake, pool.acc_reward_per_share)?;
    let amount = stake.pending_reward;
    if amount == 0 {
        return Ok(0);
    }

    // Principal staked in the reward token is never paid out as reward.
    let reward = token::Client::new(env, &config.reward_token);
    let available = reward
        .balance(&env.current_contract_address())
        .checked_sub(storage::custody(env, &config.reward_token))
        .ok_or(ContractError::ArithmeticOverflow)?;
    if available < amount {
        log!(env, "reward balance short", pid, amount, available);
        return Err(ContractError::InsufficientRewardFunds);
    }

    stake.pending_reward = 0;
    stake.claimed_reward = stake
        .claimed_reward
        .checked_add(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;
    storage::set_pool(env, pid, &pool);
    storage::set_user(env, pid, user, &stake);

    reward.transfer(&env.current_contract_address(), user, &amount);

    events::publish_reward_claimed(env, pid, user.clone(), amount);

    Ok(amount)
}
