use common::Role;
use soroban_sdk::{contracttype, log, symbol_short, Address, Env, Symbol};

use crate::{events, require_role, ContractError};

// ── Types ─────────────────────────────────────────────────────

/// Defines the scope of the pause mechanism
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PauseScope {
    /// Halts deposit, unstake, withdraw and claim on every pool
    Global,
    /// Halts a single staking operation, named by one of the `OP_*` symbols
    Function(Symbol),
}

/// Operation names accepted by `PauseScope::Function`.
pub const OP_DEPOSIT: Symbol = symbol_short!("DEPOSIT");
pub const OP_UNSTAKE: Symbol = symbol_short!("UNSTAKE");
pub const OP_WITHDRAW: Symbol = symbol_short!("WITHDRAW");
pub const OP_CLAIM: Symbol = symbol_short!("CLAIM");

// ── Storage Keys ─────────────────────────────────────────────

fn global_pause_key() -> Symbol {
    symbol_short!("P_GLOB")
}

fn function_pause_key(func: &Symbol) -> (Symbol, Symbol) {
    (symbol_short!("P_FUNC"), func.clone())
}

// ── Core Logistics ───────────────────────────────────────────

/// Returns whether `scope` itself is switched off. A function scope does not
/// report the global switch; use `require_not_paused` for the combined check.
pub fn is_paused(env: &Env, scope: &PauseScope) -> bool {
    match scope {
        PauseScope::Global => env
            .storage()
            .instance()
            .get(&global_pause_key())
            .unwrap_or(false),
        PauseScope::Function(func) => env
            .storage()
            .instance()
            .get(&function_pause_key(func))
            .unwrap_or(false),
    }
}

/// Fails with `Paused` if either the global switch or the switch for `op` is
/// engaged.
pub fn require_not_paused(env: &Env, op: &Symbol) -> Result<(), ContractError> {
    if is_paused(env, &PauseScope::Global) || is_paused(env, &PauseScope::Function(op.clone())) {
        log!(env, "operation rejected while paused", op.clone());
        return Err(ContractError::Paused);
    }
    Ok(())
}

/// Engages a circuit breaker for the specified scope. Requires `Admin`.
pub fn pause(env: &Env, caller: &Address, scope: PauseScope) -> Result<(), ContractError> {
    set_scope(env, caller, scope, true)
}

/// Releases a circuit breaker for the specified scope. Requires `Admin`.
pub fn resume(env: &Env, caller: &Address, scope: PauseScope) -> Result<(), ContractError> {
    set_scope(env, caller, scope, false)
}

fn set_scope(
    env: &Env,
    caller: &Address,
    scope: PauseScope,
    paused: bool,
) -> Result<(), ContractError> {
    require_role(env, caller, Role::Admin)?;

    match &scope {
        PauseScope::Global => {
            env.storage().instance().set(&global_pause_key(), &paused);
        }
        PauseScope::Function(func_name) => {
            if !is_staking_op(func_name) {
                return Err(ContractError::InvalidInput);
            }
            env.storage()
                .instance()
                .set(&function_pause_key(func_name), &paused);
        }
    }

    events::publish_pause_changed(env, caller.clone(), scope, paused);

    Ok(())
}

fn is_staking_op(func: &Symbol) -> bool {
    *func == OP_DEPOSIT || *func == OP_UNSTAKE || *func == OP_WITHDRAW || *func == OP_CLAIM
}
