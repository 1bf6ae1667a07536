use soroban_sdk::contracttype;

/// Error categories for classifying ledger failures.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Lifecycle errors: initialisation and upgrade sequencing
    Lifecycle = 1,
    /// Authorization errors: the caller lacks a required role
    Authorization = 2,
    /// Not found errors: unknown pool index
    NotFound = 3,
    /// Validation errors: amounts, schedule or pool ordering rejected
    Validation = 4,
    /// Arithmetic errors: an intermediate value left the representable range
    Arithmetic = 5,
    /// System errors: paused operations or unfunded reward balance
    System = 6,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    PoolNotFound = 4,
    InvalidPoolOrder = 5,
    BelowMinDeposit = 6,
    InsufficientStake = 7,
    Paused = 8,
    ArithmeticOverflow = 9,
    InvalidInput = 10,
    InvalidSchedule = 11,
    InvalidVersion = 12,
    InsufficientRewardFunds = 13,
}

impl ContractError {
    /// Returns the error category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::InvalidVersion => ErrorCategory::Lifecycle,
            ContractError::Unauthorized => ErrorCategory::Authorization,
            ContractError::PoolNotFound => ErrorCategory::NotFound,
            ContractError::InvalidPoolOrder
            | ContractError::BelowMinDeposit
            | ContractError::InsufficientStake
            | ContractError::InvalidInput
            | ContractError::InvalidSchedule => ErrorCategory::Validation,
            ContractError::ArithmeticOverflow => ErrorCategory::Arithmetic,
            ContractError::Paused | ContractError::InsufficientRewardFunds => ErrorCategory::System,
        }
    }

    /// Returns whether resubmitting the same call can succeed later without
    /// the caller changing its arguments (an admin unpausing or refunding
    /// the reward balance).
    pub fn retryable(&self) -> bool {
        matches!(
            self,
            ContractError::Paused | ContractError::InsufficientRewardFunds
        )
    }

    /// Returns a human-readable error message for this error.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Initialization has already run for this version",
            ContractError::Unauthorized => "Caller does not hold the required role",
            ContractError::PoolNotFound => "No pool exists at the given index",
            ContractError::InvalidPoolOrder => "Pool 0 must be the native-asset pool and added first",
            ContractError::BelowMinDeposit => "Deposit is below the pool minimum",
            ContractError::InsufficientStake => "Unstake amount exceeds the staked balance",
            ContractError::Paused => "Staking operations are currently paused",
            ContractError::ArithmeticOverflow => "Arithmetic overflow in reward accounting",
            ContractError::InvalidInput => "Invalid input parameters provided",
            ContractError::InvalidSchedule => "Reward start time must not exceed end time",
            ContractError::InvalidVersion => "Upgrade version must exceed the current version",
            ContractError::InsufficientRewardFunds => "Contract reward balance cannot cover the claim",
        }
    }
}
