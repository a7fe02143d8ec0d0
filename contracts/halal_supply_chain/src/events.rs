//! # Events
//!
//! Every successful state change publishes exactly one event. Topics are
//! `(symbol, key)` where `key` is the batch id for batch events and the
//! affected address for access-control events. The off-chain indexer keys
//! on the leading symbol, so these names are part of the public interface.

use soroban_sdk::{contracttype, symbol_short, Address, Env, String};

use crate::rbac::Role;
use crate::types::StatusPolicy;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Initialized {
    pub admin: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RoleAssigned {
    pub target: Address,
    pub role: Role,
    pub by: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatusPolicyChanged {
    pub policy: StatusPolicy,
    pub by: Address,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchCreated {
    pub batch_id: String,
    pub product_name: String,
    pub producer: Address,
    pub created_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchTransferred {
    pub batch_id: String,
    pub from: Address,
    pub to: Address,
    pub to_role: Role,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchCertified {
    pub batch_id: String,
    pub authority: Address,
    pub cert_hash: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StatusUpdated {
    pub batch_id: String,
    pub owner: Address,
    pub status: String,
}

pub fn emit_initialized(env: &Env, admin: Address) {
    let topics = (symbol_short!("init"), admin.clone());
    env.events().publish(topics, Initialized { admin });
}

pub fn emit_role_assigned(env: &Env, target: Address, role: Role, by: Address) {
    let topics = (symbol_short!("role_set"), target.clone());
    env.events().publish(topics, RoleAssigned { target, role, by });
}

pub fn emit_status_policy_changed(env: &Env, policy: StatusPolicy, by: Address) {
    let topics = (symbol_short!("policy"),);
    env.events()
        .publish(topics, StatusPolicyChanged { policy, by });
}

pub fn emit_batch_created(
    env: &Env,
    batch_id: String,
    product_name: String,
    producer: Address,
    created_at: u64,
) {
    let topics = (symbol_short!("created"), batch_id.clone());
    env.events().publish(
        topics,
        BatchCreated {
            batch_id,
            product_name,
            producer,
            created_at,
        },
    );
}

pub fn emit_batch_transferred(env: &Env, batch_id: String, from: Address, to: Address, to_role: Role) {
    let topics = (symbol_short!("transfer"), batch_id.clone());
    env.events().publish(
        topics,
        BatchTransferred {
            batch_id,
            from,
            to,
            to_role,
        },
    );
}

pub fn emit_batch_certified(env: &Env, batch_id: String, authority: Address, cert_hash: String) {
    let topics = (symbol_short!("certified"), batch_id.clone());
    env.events().publish(
        topics,
        BatchCertified {
            batch_id,
            authority,
            cert_hash,
        },
    );
}

pub fn emit_status_updated(env: &Env, batch_id: String, owner: Address, status: String) {
    let topics = (symbol_short!("status"), batch_id.clone());
    env.events().publish(
        topics,
        StatusUpdated {
            batch_id,
            owner,
            status,
        },
    );
}
