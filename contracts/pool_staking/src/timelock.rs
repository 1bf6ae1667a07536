use soroban_sdk::{Env, Vec};

use crate::{types::WithdrawalRequest, ContractError};

/// Appends a request maturing at `now + unlock_delay`.
pub fn enqueue(
    queue: &mut Vec<WithdrawalRequest>,
    amount: i128,
    now: u64,
    unlock_delay: u64,
) -> Result<u64, ContractError> {
    let ready_at = now
        .checked_add(unlock_delay)
        .ok_or(ContractError::ArithmeticOverflow)?;
    queue.push_back(WithdrawalRequest { amount, ready_at });
    Ok(ready_at)
}

/// Returns `(requested, ready)`: the sum of every queued request and the sum
/// of those already matured at `now`.
pub fn totals(queue: &Vec<WithdrawalRequest>, now: u64) -> Result<(i128, i128), ContractError> {
    let mut requested: i128 = 0;
    let mut ready: i128 = 0;
    for request in queue.iter() {
        requested = requested
            .checked_add(request.amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        if request.ready_at <= now {
            ready = ready
                .checked_add(request.amount)
                .ok_or(ContractError::ArithmeticOverflow)?;
        }
    }
    Ok((requested, ready))
}

/// Splits off every request matured at `now`.
///
/// Returns the still-locked requests in their original order together with
/// the released amount.
pub fn drain_ready(
    env: &Env,
    queue: &Vec<WithdrawalRequest>,
    now: u64,
) -> Result<(Vec<WithdrawalRequest>, i128), ContractError> {
    let mut locked = Vec::new(env);
    let mut released: i128 = 0;
    for request in queue.iter() {
        if request.ready_at <= now {
            released = released
                .checked_add(request.amount)
                .ok_or(ContractError::ArithmeticOverflow)?;
        } else {
            locked.push_back(request);
        }
    }
    Ok((locked, released))
}
