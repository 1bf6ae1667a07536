extern crate std;

use common::Role;
use soroban_sdk::{testutils::Address as _, Address, BytesN};

use crate::test::{setup, TestContext, NATIVE_PID, START, TOKEN_PID};
use crate::{upgrade, ContractError};

/// Stands in for `update_current_contract_wasm`: records the new version
/// exactly as `upgrade` does, without swapping the executable.
fn simulate_upgrade(ctx: &TestContext, new_version: u32) {
    let previous = ctx
        .env
        .as_contract(&ctx.contract_id, || upgrade::record(&ctx.env, new_version))
        .unwrap();
    assert!(previous < new_version);
}

#[test]
fn test_genesis_version() {
    let ctx = setup();
    assert_eq!(ctx.client.version(), upgrade::GENESIS_VERSION);
}

#[test]
fn test_migrate_at_genesis_already_done() {
    let ctx = setup();

    let result = ctx.client.try_migrate(&ctx.admin);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::AlreadyInitialized);
}

#[test]
fn test_upgrade_requires_upgrader_role() {
    let ctx = setup();
    let stranger = Address::generate(&ctx.env);
    let hash = BytesN::from_array(&ctx.env, &[7u8; 32]);

    let result = ctx.client.try_upgrade(&stranger, &hash, &2);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::Unauthorized);

    // Admin without Upgrader is refused too.
    ctx.client.revoke_role(&ctx.admin, &ctx.admin, &Role::Upgrader);
    let result = ctx.client.try_upgrade(&ctx.admin, &hash, &2);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::Unauthorized);
    assert_eq!(ctx.client.version(), 1);
}

#[test]
fn test_upgrade_must_move_version_forward() {
    let ctx = setup();
    let hash = BytesN::from_array(&ctx.env, &[7u8; 32]);

    let result = ctx.client.try_upgrade(&ctx.admin, &hash, &1);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::InvalidVersion);
    let result = ctx.client.try_upgrade(&ctx.admin, &hash, &0);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::InvalidVersion);
    assert_eq!(ctx.client.version(), 1);
}

#[test]
fn test_upgrade_preserves_state_and_migrates_once() {
    let ctx = setup();
    let user = ctx.funded_user(&ctx.stake_token, 1_250);
    ctx.at(START);
    ctx.client.deposit(&user, &TOKEN_PID, &1_250);
    ctx.client.unstake(&user, &TOKEN_PID, &250);

    let native_before = ctx.client.pool(&NATIVE_PID);
    let token_before = ctx.client.pool(&TOKEN_PID);
    let stake_before = ctx.client.user_stake(&TOKEN_PID, &user);
    let config_before = ctx.client.config();

    simulate_upgrade(&ctx, 2);
    assert_eq!(ctx.client.version(), 2);

    assert_eq!(ctx.client.pool(&NATIVE_PID), native_before);
    assert_eq!(ctx.client.pool(&TOKEN_PID), token_before);
    assert_eq!(ctx.client.user_stake(&TOKEN_PID, &user), stake_before);
    assert_eq!(ctx.client.config(), config_before);
    assert!(ctx.client.has_role(&ctx.admin, &Role::Admin));

    assert_eq!(ctx.client.migrate(&ctx.admin), 2);
    let result = ctx.client.try_migrate(&ctx.admin);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::AlreadyInitialized);

    // Accrual carries on across the upgrade.
    ctx.at(START + 1_000);
    assert_eq!(ctx.client.pending_reward(&TOKEN_PID, &user), 5_000);
}

#[test]
fn test_migrate_requires_upgrader_role() {
    let ctx = setup();
    simulate_upgrade(&ctx, 2);
    let stranger = Address::generate(&ctx.env);

    let result = ctx.client.try_migrate(&stranger);
    assert_eq!(result.unwrap_err().unwrap(), ContractError::Unauthorized);

    assert_eq!(ctx.client.migrate(&ctx.admin), 2);
}

#[test]
fn test_each_version_gets_its_own_migration() {
    let ctx = setup();

    simulate_upgrade(&ctx, 2);
    ctx.client.migrate(&ctx.admin);

    simulate_upgrade(&ctx, 5);
    assert_eq!(ctx.client.version(), 5);
    assert_eq!(ctx.client.migrate(&ctx.admin), 2);
}
