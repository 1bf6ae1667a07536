#![no_std]

pub mod circuit_breaker;
pub mod engine;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod registry;
pub mod rewards;
pub mod storage;
pub mod timelock;
pub mod types;
pub mod upgrade;

use common::roles::{self, Role};
use soroban_sdk::{contract, contractimpl, log, Address, BytesN, Env, Vec};

pub use circuit_breaker::PauseScope;
pub use errors::{ContractError, ErrorCategory};
pub use types::{
    EmptyPoolPolicy, GlobalConfig, LedgerPolicy, MinDepositPolicy, Pool, StakingAsset, UserStake,
    WithdrawalRequest,
};

/// Guard: revert with `Unauthorized` if `caller` does not hold `role`.
/// The failed invocation rolls back its events, so the caller and role are
/// reported through a diagnostic log.
pub(crate) fn require_role(env: &Env, caller: &Address, role: Role) -> Result<(), ContractError> {
    if roles::has_role(env, caller, role) {
        return Ok(());
    }
    log!(env, "caller lacks role", caller.clone(), role);
    Err(ContractError::Unauthorized)
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct PoolStakingContract;

#[contractimpl]
impl PoolStakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the ledger.
    ///
    /// * `reward_token` – SAC address of the token paid out as reward.
    /// * `native_token` – SAC address of the native asset staked in pool 0.
    /// * `start_time`, `end_time` – emission window (inclusive bounds).
    /// * `reward_rate`  – reward units emitted **per second** across all pools.
    /// * `policy`       – empty-pool and minimum-deposit behaviour.
    ///
    /// `admin` receives both the `Admin` and `Upgrader` roles.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        env: Env,
        admin: Address,
        reward_token: Address,
        native_token: Address,
        start_time: u64,
        end_time: u64,
        reward_rate: i128,
        policy: LedgerPolicy,
    ) -> Result<(), ContractError> {
        if storage::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        if start_time > end_time {
            return Err(ContractError::InvalidSchedule);
        }
        if reward_rate < 0 {
            return Err(ContractError::InvalidInput);
        }

        let config = GlobalConfig {
            reward_token: reward_token.clone(),
            native_token: native_token.clone(),
            start_time,
            end_time,
            reward_rate,
            total_pool_weight: 0,
            policy,
        };
        storage::set_config(&env, &config);
        storage::set_initialized(&env);
        upgrade::init(&env);

        roles::set_role(&env, &admin, Role::Admin);
        roles::set_role(&env, &admin, Role::Upgrader);

        events::publish_initialized(
            &env,
            admin,
            reward_token,
            native_token,
            start_time,
            end_time,
            reward_rate,
        );

        Ok(())
    }

    // ── Pool administration ─────────────────────────────────────────────────

    /// Append a pool. Pool 0 must be `StakingAsset::Native`; every later
    /// pool must be a token. With `recalc_all`, existing pools are
    /// checkpointed before the total weight changes.
    ///
    /// Requires `Admin`.
    pub fn add_pool(
        env: Env,
        caller: Address,
        asset: StakingAsset,
        weight: i128,
        min_deposit: i128,
        unlock_delay: u64,
        recalc_all: bool,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        require_role(&env, &caller, Role::Admin)?;

        let mut config = storage::get_config(&env)?;
        let pid = registry::add_pool(
            &env,
            &mut config,
            asset.clone(),
            weight,
            min_deposit,
            unlock_delay,
            recalc_all,
        )?;

        events::publish_pool_added(&env, pid, asset, weight, min_deposit, unlock_delay);

        Ok(pid)
    }

    /// Change a pool's weight. Every pool is checkpointed first.
    ///
    /// Requires `Admin`.
    pub fn set_pool_weight(
        env: Env,
        caller: Address,
        pid: u32,
        weight: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        require_role(&env, &caller, Role::Admin)?;

        let mut config = storage::get_config(&env)?;
        registry::set_weight(&env, &mut config, pid, weight)?;

        events::publish_pool_weight_set(&env, pid, weight, config.total_pool_weight);

        Ok(())
    }

    /// Change a pool's deposit minimum and unlock delay.
    ///
    /// Requires `Admin`.
    pub fn update_pool(
        env: Env,
        caller: Address,
        pid: u32,
        min_deposit: i128,
        unlock_delay: u64,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        require_role(&env, &caller, Role::Admin)?;

        registry::update_params(&env, pid, min_deposit, unlock_delay)?;

        events::publish_pool_updated(&env, pid, min_deposit, unlock_delay);

        Ok(())
    }

    // ── Schedule administration ─────────────────────────────────────────────

    /// Requires `Admin`. Fails with `InvalidSchedule` if after `end_time`.
    pub fn set_start_time(env: Env, caller: Address, start_time: u64) -> Result<(), ContractError> {
        Self::require_schedule_admin(&env, &caller)?;
        let config = registry::reschedule(&env, |c| c.start_time = start_time)?;
        Self::publish_schedule(&env, &config);
        Ok(())
    }

    /// Requires `Admin`. Fails with `InvalidSchedule` if before `start_time`.
    pub fn set_end_time(env: Env, caller: Address, end_time: u64) -> Result<(), ContractError> {
        Self::require_schedule_admin(&env, &caller)?;
        let config = registry::reschedule(&env, |c| c.end_time = end_time)?;
        Self::publish_schedule(&env, &config);
        Ok(())
    }

    /// Update the emission rate.
    ///
    /// Every pool is checkpointed at the old rate *before* the rate changes,
    /// so no staker gains or loses reward retroactively.
    ///
    /// Requires `Admin`.
    pub fn set_reward_rate(env: Env, caller: Address, reward_rate: i128) -> Result<(), ContractError> {
        Self::require_schedule_admin(&env, &caller)?;
        let config = registry::reschedule(&env, |c| c.reward_rate = reward_rate)?;
        Self::publish_schedule(&env, &config);
        Ok(())
    }

    /// Switch the empty-pool or minimum-deposit policy. Switching to
    /// `Forfeit` drops any reward pools are carrying.
    ///
    /// Requires `Admin`.
    pub fn set_policy(env: Env, caller: Address, policy: LedgerPolicy) -> Result<(), ContractError> {
        Self::require_schedule_admin(&env, &caller)?;
        registry::set_policy(&env, policy)?;
        events::publish_policy_set(&env, policy);
        Ok(())
    }

    // ── Circuit breaker ─────────────────────────────────────────────────────

    /// Halt staking operations for `scope`. Views and admin calls keep
    /// working. Requires `Admin`.
    pub fn pause(env: Env, caller: Address, scope: PauseScope) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        circuit_breaker::pause(&env, &caller, scope)
    }

    /// Resume staking operations for `scope`. Requires `Admin`.
    pub fn unpause(env: Env, caller: Address, scope: PauseScope) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        circuit_breaker::resume(&env, &caller, scope)
    }

    pub fn is_paused(env: Env, scope: PauseScope) -> bool {
        circuit_breaker::is_paused(&env, &scope)
    }

    // ── Role management ─────────────────────────────────────────────────────

    /// Grant `role` to `target`. Requires `Admin`.
    pub fn grant_role(
        env: Env,
        caller: Address,
        target: Address,
        role: Role,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !roles::grant_role(&env, &caller, &target, role) {
            log!(&env, "role grant refused", caller, target, role);
            return Err(ContractError::Unauthorized);
        }
        events::publish_role_changed(&env, caller, target, role, true);
        Ok(())
    }

    /// Revoke `role` from `target`. Requires `Admin`; an admin cannot revoke
    /// its own `Admin` role.
    pub fn revoke_role(
        env: Env,
        caller: Address,
        target: Address,
        role: Role,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        if !roles::revoke_role(&env, &caller, &target, role) {
            log!(&env, "role revoke refused", caller, target, role);
            return Err(ContractError::Unauthorized);
        }
        events::publish_role_changed(&env, caller, target, role, false);
        Ok(())
    }

    pub fn has_role(env: Env, holder: Address, role: Role) -> bool {
        roles::has_role(&env, &holder, role)
    }

    pub fn role_holders(env: Env, role: Role) -> Vec<Address> {
        roles::holders(&env, role)
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` of pool `pid`'s asset. Returns the new staked balance.
    ///
    /// The pool checkpoint is brought current and reward on the previous
    /// balance is settled before the balance grows.
    pub fn deposit(env: Env, user: Address, pid: u32, amount: i128) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        user.require_auth();
        engine::deposit(&env, &user, pid, amount)
    }

    /// Queue `amount` of stake for withdrawal after the pool's unlock delay.
    /// Returns the time at which the request can be withdrawn.
    ///
    /// The staked balance drops immediately, so the queued amount stops
    /// earning reward, but the tokens stay in the contract until `withdraw`.
    pub fn unstake(env: Env, user: Address, pid: u32, amount: i128) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;
        user.require_auth();
        engine::unstake(&env, &user, pid, amount)
    }

    /// Pay out every matured unstake request in pool `pid`.
    ///
    /// Returns zero, without failing, when nothing has matured yet.
    pub fn withdraw(env: Env, user: Address, pid: u32) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        user.require_auth();
        engine::withdraw(&env, &user, pid)
    }

    /// Claim all pending reward from pool `pid`. Returns the amount paid.
    ///
    /// The contract must hold enough reward tokens (funded by the admin).
    pub fn claim(env: Env, user: Address, pid: u32) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        user.require_auth();
        engine::claim(&env, &user, pid)
    }

    /// Bring pool `pid`'s checkpoint current. Callable by anyone, also while
    /// paused.
    pub fn checkpoint_pool(env: Env, pid: u32) -> Result<Pool, ContractError> {
        let config = storage::get_config(&env)?;
        registry::checkpoint(&env, &config, pid)
    }

    /// Bring every pool's checkpoint current. Returns the number of pools.
    pub fn mass_update_pools(env: Env) -> Result<u32, ContractError> {
        let config = storage::get_config(&env)?;
        registry::checkpoint_all(&env, &config)
    }

    // ── Upgrade ─────────────────────────────────────────────────────────────

    /// Replace the contract logic with the uploaded executable
    /// `new_wasm_hash`, recording `new_version`. Storage is left untouched;
    /// the new logic runs its one-time `migrate` afterwards.
    ///
    /// Requires `Upgrader`.
    pub fn upgrade(
        env: Env,
        caller: Address,
        new_wasm_hash: BytesN<32>,
        new_version: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        require_role(&env, &caller, Role::Upgrader)?;

        let previous = upgrade::record(&env, new_version)?;
        events::publish_upgraded(&env, caller, previous, new_version, new_wasm_hash.clone());

        env.deployer().update_current_contract_wasm(new_wasm_hash);

        Ok(())
    }

    /// One-time initialization for the currently recorded version. Fails
    /// with `AlreadyInitialized` when it has already run.
    ///
    /// Requires `Upgrader`.
    pub fn migrate(env: Env, caller: Address) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        require_role(&env, &caller, Role::Upgrader)?;

        let touched = upgrade::migrate(&env)?;
        events::publish_migrated(&env, caller, upgrade::version(&env), touched);

        Ok(touched)
    }

    pub fn version(env: Env) -> u32 {
        upgrade::version(&env)
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Return the stored pool. The checkpoint is as of the last mutation;
    /// use `pending_reward` for a live figure.
    pub fn pool(env: Env, pid: u32) -> Result<Pool, ContractError> {
        storage::get_pool(&env, pid)
    }

    pub fn pool_length(env: Env) -> u32 {
        storage::pool_count(&env)
    }

    /// Return the user's staked balance in pool `pid` (zero if none).
    pub fn staking_balance(env: Env, pid: u32, user: Address) -> i128 {
        storage::get_user(&env, pid, &user).staked
    }

    /// Return `(requested, ready)`: every queued withdrawal, and the part of
    /// it that can be withdrawn now.
    pub fn withdraw_amount(env: Env, pid: u32, user: Address) -> Result<(i128, i128), ContractError> {
        storage::get_pool(&env, pid)?;
        let stake = storage::get_user(&env, pid, &user);
        timelock::totals(&stake.withdrawals, env.ledger().timestamp())
    }

    /// Return real-time pending reward without mutating state.
    pub fn pending_reward(env: Env, pid: u32, user: Address) -> Result<i128, ContractError> {
        let config = storage::get_config(&env)?;
        let pool = registry::load_current(&env, &config, pid)?;
        let stake = storage::get_user(&env, pid, &user);
        rewards::pending(&stake, pool.acc_reward_per_share)
    }

    /// Return the principal of `asset` held for stakers across all pools,
    /// including queued withdrawals.
    pub fn principal_held(env: Env, asset: Address) -> i128 {
        storage::custody(&env, &asset)
    }

    /// Return the full position record for a user in pool `pid`.
    pub fn user_stake(env: Env, pid: u32, user: Address) -> UserStake {
        storage::get_user(&env, pid, &user)
    }

    pub fn start_time(env: Env) -> Result<u64, ContractError> {
        Ok(storage::get_config(&env)?.start_time)
    }

    pub fn end_time(env: Env) -> Result<u64, ContractError> {
        Ok(storage::get_config(&env)?.end_time)
    }

    pub fn reward_rate(env: Env) -> Result<i128, ContractError> {
        Ok(storage::get_config(&env)?.reward_rate)
    }

    pub fn total_pool_weight(env: Env) -> Result<i128, ContractError> {
        Ok(storage::get_config(&env)?.total_pool_weight)
    }

    pub fn config(env: Env) -> Result<GlobalConfig, ContractError> {
        storage::get_config(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        storage::is_initialized(&env)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !storage::is_initialized(env) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn require_schedule_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        Self::require_initialized(env)?;
        caller.require_auth();
        require_role(env, caller, Role::Admin)
    }

    fn publish_schedule(env: &Env, config: &GlobalConfig) {
        events::publish_schedule_set(env, config.start_time, config.end_time, config.reward_rate);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────



#[cfg(test)]
mod test_pause;

#[cfg(test)]
mod test_upgrade;
