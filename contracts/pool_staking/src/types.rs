use soroban_sdk::{contracttype, Address, Vec};

/// What happens to reward emitted for a pool while nobody is staked in it.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EmptyPoolPolicy {
    /// The interval's reward is dropped for good.
    Forfeit,
    /// The interval's reward is held on the pool and handed to the stake
    /// present at the next checkpoint.
    Carry,
}

/// When a pool's `min_deposit` is enforced.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MinDepositPolicy {
    /// Only when the depositor's balance in the pool is zero beforehand.
    FirstDeposit,
    /// On every deposit call.
    EveryDeposit,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LedgerPolicy {
    pub empty_pool: EmptyPoolPolicy,
    pub min_deposit: MinDepositPolicy,
}

impl Default for LedgerPolicy {
    fn default() -> Self {
        LedgerPolicy {
            empty_pool: EmptyPoolPolicy::Forfeit,
            min_deposit: MinDepositPolicy::FirstDeposit,
        }
    }
}

/// Process-wide emission schedule and asset configuration.
///
/// `total_pool_weight` always equals the sum of every pool's `weight`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GlobalConfig {
    pub reward_token: Address,
    /// Stellar Asset Contract backing the native-asset pool (pool 0).
    pub native_token: Address,
    pub start_time: u64,
    pub end_time: u64,
    /// Reward base units emitted per second across all pools.
    pub reward_rate: i128,
    pub total_pool_weight: i128,
    pub policy: LedgerPolicy,
}

/// Asset a pool accepts as stake.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StakingAsset {
    /// Sentinel for the network's native asset; only pool 0 may use it.
    Native,
    Token(Address),
}

/// An isolated staking compartment with its own reward checkpoint.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub asset: StakingAsset,
    pub weight: i128,
    pub min_deposit: i128,
    /// Seconds an unstake request waits before it can be withdrawn.
    pub unlock_delay: u64,
    pub total_staked: i128,
    pub last_checkpoint: u64,
    /// Reward per staked unit, scaled by `rewards::SCALE`. Never decreases.
    pub acc_reward_per_share: i128,
    /// Reward accrued while the pool was empty under `EmptyPoolPolicy::Carry`.
    pub carried_reward: i128,
}

/// A queued unstake waiting for its unlock delay to pass.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawalRequest {
    pub amount: i128,
    pub ready_at: u64,
}

/// A user's position in one pool. Created on first deposit, never removed.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserStake {
    pub staked: i128,
    /// `staked * acc_reward_per_share / SCALE` as of the last settlement.
    pub reward_debt: i128,
    /// Reward settled against this position but not yet claimed.
    pub pending_reward: i128,
    /// Lifetime reward transferred out by `claim`.
    pub claimed_reward: i128,
    /// Unstake requests in the order they were made.
    pub withdrawals: Vec<WithdrawalRequest>,
}
