use crate::{rewards, types::UserStake, ContractError};

/// Moves reward accrued on the current balance into `pending_reward` and
/// re-bases `reward_debt` to `acc`. Must run before `staked` changes so the
/// old balance is credited for the interval it was held.
pub fn settle(stake: &mut UserStake, acc: i128) -> Result<(), ContractError> {
    let fresh = rewards::unsettled(stake, acc)?;
    stake.pending_reward = stake
        .pending_reward
        .checked_add(fresh)
        .ok_or(ContractError::ArithmeticOverflow)?;
    sync_debt(stake, acc)
}

/// Re-bases `reward_debt` so the current balance has nothing unsettled at
/// `acc`.
pub fn sync_debt(stake: &mut UserStake, acc: i128) -> Result<(), ContractError> {
    stake.reward_debt = rewards::accrued(stake.staked, acc)?;
    Ok(())
}

/// Adds `amount` to the position. The caller settles first.
pub fn credit(stake: &mut UserStake, amount: i128, acc: i128) -> Result<i128, ContractError> {
    stake.staked = stake
        .staked
        .checked_add(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;
    sync_debt(stake, acc)?;
    Ok(stake.staked)
}

/// Removes `amount` from the position. The caller settles first.
pub fn debit(stake: &mut UserStake, amount: i128, acc: i128) -> Result<i128, ContractError> {
    if amount <= 0 || amount > stake.staked {
        return Err(ContractError::InsufficientStake);
    }
    stake.staked -= amount;
    sync_debt(stake, acc)?;
    Ok(stake.staked)
}
