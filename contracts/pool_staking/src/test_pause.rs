extern crate std;

use soroban_sdk::{symbol_short, testutils::Address as _, Address};

use crate::circuit_breaker::{OP_CLAIM, OP_DEPOSIT, OP_UNSTAKE, OP_WITHDRAW};
use crate::test::{setup, START, TOKEN_PID};
use crate::{ContractError, PauseScope};

#[test]
fn test_global_pause_halts_staking_operations() {
    let ctx = setup();
    let user = ctx.funded_user(&ctx.stake_token, 2_000);
    ctx.at(START);
    ctx.client.deposit(&user, &TOKEN_PID, &1_000);
    ctx.client.unstake(&user, &TOKEN_PID, &200);
    ctx.at(START + 100);

    ctx.client.pause(&ctx.admin, &PauseScope::Global);
    assert!(ctx.client.is_paused(&PauseScope::Global));

    let result = ctx.client.try_deposit(&user, &TOKEN_PID, &500);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::Paused);
    let result = ctx.client.try_unstake(&user, &TOKEN_PID, &100);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::Paused);
    let result = ctx.client.try_withdraw(&user, &TOKEN_PID);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::Paused);
    let result = ctx.client.try_claim(&user, &TOKEN_PID);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::Paused);

    assert_eq!(ctx.client.staking_balance(&TOKEN_PID, &user), 800);
    assert_eq!(ctx.balance(&ctx.stake_token, &user), 1_000);
}

#[test]
fn test_pause_is_reported_before_amount_validation() {
    let ctx = setup();
    let user = ctx.funded_user(&ctx.stake_token, 1_000);
    ctx.client.pause(&ctx.admin, &PauseScope::Global);

    let result = ctx.client.try_deposit(&user, &TOKEN_PID, &0);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::Paused);
    let result = ctx.client.try_deposit(&user, &TOKEN_PID, &-5);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::Paused);
    let result = ctx.client.try_unstake(&user, &TOKEN_PID, &0);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::Paused);
}

#[test]
fn test_views_and_admin_work_while_paused() {
    let ctx = setup();
    let user = ctx.funded_user(&ctx.stake_token, 1_000);
    ctx.at(START);
    ctx.client.deposit(&user, &TOKEN_PID, &1_000);

    ctx.client.pause(&ctx.admin, &PauseScope::Global);
    ctx.at(START + 1_000);

    assert_eq!(ctx.client.pending_reward(&TOKEN_PID, &user), 5_000);
    assert_eq!(ctx.client.withdraw_amount(&TOKEN_PID, &user), (0, 0));
    assert_eq!(ctx.client.pool_length(), 2);

    ctx.client.set_reward_rate(&ctx.admin, &20);
    ctx.client.update_pool(&ctx.admin, &TOKEN_PID, &10, &10);
    let pool = ctx.client.checkpoint_pool(&TOKEN_PID);
    assert_eq!(pool.last_checkpoint, START + 1_000);
}

#[test]
fn test_unpause_restores_operations() {
    let ctx = setup();
    let user = ctx.funded_user(&ctx.stake_token, 1_000);

    ctx.client.pause(&ctx.admin, &PauseScope::Global);
    let result = ctx.client.try_deposit(&user, &TOKEN_PID, &1_000);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::Paused);

    ctx.client.unpause(&ctx.admin, &PauseScope::Global);
    assert!(!ctx.client.is_paused(&PauseScope::Global));
    assert_eq!(ctx.client.deposit(&user, &TOKEN_PID, &1_000), 1_000);
}

#[test]
fn test_function_pause_is_selective() {
    let ctx = setup();
    let user = ctx.funded_user(&ctx.stake_token, 2_000);
    ctx.at(START);
    ctx.client.deposit(&user, &TOKEN_PID, &1_000);

    let claim_scope = PauseScope::Function(OP_CLAIM);
    ctx.client.pause(&ctx.admin, &claim_scope);
    assert!(ctx.client.is_paused(&claim_scope));
    assert!(!ctx.client.is_paused(&PauseScope::Global));

    ctx.at(START + 1_000);
    let result = ctx.client.try_claim(&user, &TOKEN_PID);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::Paused);

    // Other operations are unaffected.
    ctx.client.deposit(&user, &TOKEN_PID, &500);
    ctx.client.unstake(&user, &TOKEN_PID, &500);
    ctx.at(START + 1_050);
    assert_eq!(ctx.client.withdraw(&user, &TOKEN_PID), 500);

    ctx.client.unpause(&ctx.admin, &claim_scope);
    // 5_000 on 1_000 staked, then 50s × 10 × ½ = 250.
    assert_eq!(ctx.client.claim(&user, &TOKEN_PID), 5_250);
}

#[test]
fn test_each_staking_operation_can_be_paused() {
    let ctx = setup();
    for op in [OP_DEPOSIT, OP_UNSTAKE, OP_WITHDRAW, OP_CLAIM] {
        let scope = PauseScope::Function(op);
        ctx.client.pause(&ctx.admin, &scope);
        assert!(ctx.client.is_paused(&scope));
    }

    let user = ctx.funded_user(&ctx.stake_token, 1_000);
    let result = ctx.client.try_deposit(&user, &TOKEN_PID, &1_000);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::Paused);
}

#[test]
fn test_function_pause_rejects_unknown_operation() {
    let ctx = setup();

    let result = ctx
        .client
        .try_pause(&ctx.admin, &PauseScope::Function(symbol_short!("ADD_POOL")));
    assert_eq!(result.unwrap_err().unwrap(), ContractError::InvalidInput);
}

#[test]
fn test_non_admin_cannot_pause() {
    let ctx = setup();
    let stranger = Address::generate(&ctx.env);

    let result = ctx.client.try_pause(&stranger, &PauseScope::Global);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::Unauthorized);
    assert!(!ctx.client.is_paused(&PauseScope::Global));

    ctx.client.pause(&ctx.admin, &PauseScope::Global);
    let result = ctx.client.try_unpause(&stranger, &PauseScope::Global);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::Unauthorized);
    assert!(ctx.client.is_paused(&PauseScope::Global));
}
