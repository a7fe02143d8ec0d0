//! # Storage
//!
//! Provides typed helpers over Soroban's two storage tiers used by the contract:
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key            | Type           | Description                          |
//! |----------------|----------------|--------------------------------------|
//! | `BatchCount`   | `u64`          | Number of batches ever created       |
//! | `StatusPolicy` | `StatusPolicy` | Who may call `update_status`         |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                | Type          | Description                      |
//! |--------------------|---------------|----------------------------------|
//! | `BatchConfig(id)`  | `BatchConfig` | Immutable batch configuration    |
//! | `BatchState(id)`   | `BatchState`  | Mutable custody / status state   |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.
//!
//! Batches are never deleted, so the presence of `BatchConfig(id)` is the
//! uniqueness record for `id`.

use soroban_sdk::{contracttype, Env, IntoVal, String, Val};

use crate::types::{Batch, BatchConfig, BatchState, StatusPolicy};
use crate::Error;

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Count of batches ever created (Instance).
    BatchCount,
    /// Active status update policy (Instance).
    StatusPolicy,
    /// Immutable batch configuration keyed by batch id (Persistent).
    BatchConfig(String),
    /// Mutable batch state keyed by batch id (Persistent).
    BatchState(String),
}

// ── TTL Helpers ──────────────────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// Extend the TTL for any persistent storage key.
pub fn bump_persistent_key<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

// ── Instance Storage Helpers ─────────────────────────────────────────

pub fn batch_count(env: &Env) -> u64 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::BatchCount)
        .unwrap_or(0)
}

fn increment_batch_count(env: &Env) {
    let next = batch_count(env) + 1;
    env.storage().instance().set(&DataKey::BatchCount, &next);
}

/// Current status policy; `AnyOwner` until an admin changes it.
pub fn status_policy(env: &Env) -> StatusPolicy {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::StatusPolicy)
        .unwrap_or(StatusPolicy::AnyOwner)
}

pub fn set_status_policy(env: &Env, policy: StatusPolicy) {
    env.storage().instance().set(&DataKey::StatusPolicy, &policy);
    bump_instance(env);
}

// ── Persistent Storage Helpers ───────────────────────────────────────

pub fn batch_exists(env: &Env, id: &String) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::BatchConfig(id.clone()))
}

/// Persist a freshly created batch and bump the batch counter.
pub fn save_new_batch(env: &Env, config: &BatchConfig, state: &BatchState) {
    let config_key = DataKey::BatchConfig(config.id.clone());
    env.storage().persistent().set(&config_key, config);
    bump_persistent_key(env, &config_key);
    save_batch_state(env, &config.id, state);
    increment_batch_count(env);
}

/// Load only the immutable batch configuration.
pub fn load_batch_config(env: &Env, id: &String) -> Result<BatchConfig, Error> {
    let key = DataKey::BatchConfig(id.clone());
    let config: BatchConfig = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::BatchNotFound)?;
    bump_persistent_key(env, &key);
    Ok(config)
}

/// Load only the mutable batch state.
pub fn load_batch_state(env: &Env, id: &String) -> Result<BatchState, Error> {
    let key = DataKey::BatchState(id.clone());
    let state: BatchState = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::BatchNotFound)?;
    bump_persistent_key(env, &key);
    Ok(state)
}

/// Load the full `Batch` by combining config and state.
pub fn load_batch(env: &Env, id: &String) -> Result<Batch, Error> {
    let config = load_batch_config(env, id)?;
    let state = load_batch_state(env, id)?;
    Ok(Batch::from_parts(config, state))
}

/// Save only the mutable batch state.
pub fn save_batch_state(env: &Env, id: &String, state: &BatchState) {
    let key = DataKey::BatchState(id.clone());
    env.storage().persistent().set(&key, state);
    bump_persistent_key(env, &key);
}
