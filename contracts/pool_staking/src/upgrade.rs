//! Versioned logic replacement.
//!
//! The executable is swapped in place with
//! `update_current_contract_wasm`, which leaves every storage entry as it
//! was. The recorded version moves forward only, and each version gets
//! exactly one `migrate` run.

use soroban_sdk::{log, symbol_short, Env, Symbol};

use crate::{registry, storage, ContractError};

/// Version recorded at `initialize`.
pub const GENESIS_VERSION: u32 = 1;

const VERSION: Symbol = symbol_short!("VERSION");
const MIGRATED: Symbol = symbol_short!("MIGRATED");

pub fn version(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&VERSION)
        .unwrap_or(GENESIS_VERSION)
}

/// Records the genesis version as already migrated.
pub fn init(env: &Env) {
    env.storage().instance().set(&VERSION, &GENESIS_VERSION);
    env.storage().instance().set(&MIGRATED, &GENESIS_VERSION);
}

/// Moves the recorded version to `new_version`, leaving the migration for
/// that version pending. Returns the previous version.
pub fn record(env: &Env, new_version: u32) -> Result<u32, ContractError> {
    let current = version(env);
    if new_version <= current {
        log!(env, "upgrade must move version forward", current, new_version);
        return Err(ContractError::InvalidVersion);
    }
    env.storage().instance().set(&VERSION, &new_version);
    Ok(current)
}

/// Runs the one-time migration for the recorded version.
///
/// The layout is append-only, so migrating means re-touching every pool to
/// refresh its TTL under the new logic. A second run for the same version
/// fails with `AlreadyInitialized`. Returns the number of pools touched.
pub fn migrate(env: &Env) -> Result<u32, ContractError> {
    let current = version(env);
    let migrated: u32 = env
        .storage()
        .instance()
        .get(&MIGRATED)
        .unwrap_or(GENESIS_VERSION);
    if migrated >= current {
        return Err(ContractError::AlreadyInitialized);
    }

    let config = storage::get_config(env)?;
    let touched = registry::checkpoint_all(env, &config)?;

    env.storage().instance().set(&MIGRATED, &current);
    storage::extend_instance(env);
    Ok(touched)
}
