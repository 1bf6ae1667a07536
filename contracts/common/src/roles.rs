use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::{TTL_EXTEND_TO, TTL_THRESHOLD};

// ── Storage Keys ─────────────────────────────────────────────────────────────

const ROLE_PREFIX: Symbol = symbol_short!("ROLE");
const ROLE_HOLDERS: Symbol = symbol_short!("ROLE_LST");

// ── Role Enum ────────────────────────────────────────────────────────────────

/// Capabilities an address can hold on a ledger contract.
///
/// - `Admin`    – Manages pools, reward schedule, pause switches and the
///                role set itself.
/// - `Upgrader` – May replace the contract logic and run the one-shot
///                migration that follows an upgrade.
///
/// Roles are independent: holding `Admin` does not imply `Upgrader`.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Admin = 1,
    Upgrader = 2,
}

// ── Storage Helpers ──────────────────────────────────────────────────────────

fn role_key(role: Role, holder: &Address) -> (Symbol, Role, Address) {
    (ROLE_PREFIX, role, holder.clone())
}

fn holders_key(role: Role) -> (Symbol, Role) {
    (ROLE_HOLDERS, role)
}

// ── Core Functions ───────────────────────────────────────────────────────────

/// Returns whether `holder` currently holds `role`.
pub fn has_role(env: &Env, holder: &Address, role: Role) -> bool {
    let key = role_key(role, holder);
    let held = env.storage().persistent().get(&key).unwrap_or(false);
    if held {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    held
}

/// Assigns `role` to `holder` without any authorization check.
/// Used while bootstrapping; callers must verify authorization beforehand.
pub fn set_role(env: &Env, holder: &Address, role: Role) {
    let key = role_key(role, holder);
    env.storage().persistent().set(&key, &true);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    track_holder(env, holder, role);
}

/// Removes `role` from `holder` without any authorization check.
pub fn clear_role(env: &Env, holder: &Address, role: Role) {
    env.storage().persistent().remove(&role_key(role, holder));
    untrack_holder(env, holder, role);
}

// ── Grant / Revoke ───────────────────────────────────────────────────────────

/// Grants `role` to `target` on behalf of `caller`.
///
/// Only an `Admin` may grant roles. The caller must have already been
/// authenticated via `require_auth()`.
///
/// Returns `true` on success, `false` if the caller is not an `Admin`.
pub fn grant_role(env: &Env, caller: &Address, target: &Address, role: Role) -> bool {
    if !has_role(env, caller, Role::Admin) {
        return false;
    }
    set_role(env, target, role);
    true
}

/// Revokes `role` from `target` on behalf of `caller`.
///
/// Only an `Admin` may revoke roles, and an admin may not strip its own
/// `Admin` role so the contract always keeps at least the revoking admin.
pub fn revoke_role(env: &Env, caller: &Address, target: &Address, role: Role) -> bool {
    if !has_role(env, caller, Role::Admin) {
        return false;
    }
    if role == Role::Admin && caller == target {
        return false;
    }
    clear_role(env, target, role);
    true
}

/// Returns every address currently holding `role`.
pub fn holders(env: &Env, role: Role) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&holders_key(role))
        .unwrap_or(Vec::new(env))
}

fn track_holder(env: &Env, holder: &Address, role: Role) {
    let key = holders_key(role);
    let mut list: Vec<Address> = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or(Vec::new(env));

    if !list.contains(holder) {
        list.push_back(holder.clone());
        env.storage().persistent().set(&key, &list);
    }
}

fn untrack_holder(env: &Env, holder: &Address, role: Role) {
    let key = holders_key(role);
    let list: Vec<Address> = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or(Vec::new(env));

    let mut kept = Vec::new(env);
    for a in list.iter() {
        if a != *holder {
            kept.push_back(a);
        }
    }
    env.storage().persistent().set(&key, &kept);
}
