//! # Halal Supply Chain Contract
//!
//! Tracks custody and halal certification of product batches as they move
//! through a fixed pipeline:
//!
//! ```text
//! Producer ──► HalalAuthority ──► Distributor ──► Retailer
//! ```
//!
//! | Phase         | Entry Point(s)                                   |
//! |---------------|--------------------------------------------------|
//! | Bootstrap     | [`HalalSupplyChain::init`]                       |
//! | Role admin    | `assign_role`, `set_status_policy`               |
//! | Creation      | [`HalalSupplyChain::create_batch`]               |
//! | Custody       | [`HalalSupplyChain::transfer_batch`]             |
//! | Certification | [`HalalSupplyChain::set_halal_certificate`]      |
//! | Annotation    | [`HalalSupplyChain::update_status`]              |
//! | Queries       | `get_batch`, `get_batch_view`, `get_stage`, `is_batch_exists`, `batch_count`, `role_of`, `has_role`, `admin`, `status_policy` |
//!
//! ## Architecture
//!
//! Authorization lives in [`rbac`], transition rules in [`lifecycle`], and
//! storage access in [`storage`]. This file wires them together: resolve
//! roles, load state, apply one transition, persist, emit. Every business
//! rule violation is returned as an [`Error`]; nothing is written before all
//! checks have passed.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, Address, Env, String};

mod events;
mod lifecycle;
mod storage;
mod types;
pub mod rbac;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_auth;
#[cfg(test)]
mod test_events;

pub use events::{
    BatchCertified, BatchCreated, BatchTransferred, Initialized, RoleAssigned, StatusPolicyChanged,
    StatusUpdated,
};
pub use rbac::Role;
pub use types::{Batch, BatchView, Stage, StatusPolicy};

use types::{BatchConfig, BatchState, INITIAL_STATUS};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    Unauthorized = 1,
    BatchNotFound = 2,
    DuplicateBatch = 3,
    NotCurrentOwner = 4,
    AlreadyCertified = 5,
    // InvalidSequence family: one code per expected next role.
    ExpectedHalalAuthority = 6,
    ExpectedDistributor = 7,
    ExpectedRetailer = 8,
    AlreadyInitialized = 9,
    SelfRoleChange = 10,
    EmptyBatchId = 11,
    EmptyCertHash = 12,
    StageUndetermined = 13,
}

impl Error {
    /// Human-readable rejection reason, stable across releases.
    pub fn reason(&self) -> &'static str {
        match self {
            Error::Unauthorized => "Invalid role for this action",
            Error::BatchNotFound => "Batch not found",
            Error::DuplicateBatch => "Duplicate batchId",
            Error::NotCurrentOwner => "Not current owner",
            Error::AlreadyCertified => "Halal already certified",
            Error::ExpectedHalalAuthority => "Producer -> HalalAuthority only",
            Error::ExpectedDistributor => "HalalAuthority -> Distributor only",
            Error::ExpectedRetailer => "Distributor -> Retailer only",
            Error::AlreadyInitialized => "Already initialized",
            Error::SelfRoleChange => "Admin cannot change own role",
            Error::EmptyBatchId => "Batch id required",
            Error::EmptyCertHash => "Cert hash required",
            Error::StageUndetermined => "Owner holds no pipeline role",
        }
    }

    /// The sequence error for a transfer whose target should have held `expected`.
    pub(crate) fn invalid_sequence(expected: Role) -> Error {
        match expected {
            Role::HalalAuthority => Error::ExpectedHalalAuthority,
            Role::Distributor => Error::ExpectedDistributor,
            Role::Retailer => Error::ExpectedRetailer,
            Role::None | Role::Admin | Role::Producer => Error::Unauthorized,
        }
    }

    pub fn is_invalid_sequence(&self) -> bool {
        self.expected_role().is_some()
    }

    /// For `InvalidSequence` errors, the role the transfer target needed.
    pub fn expected_role(&self) -> Option<Role> {
        match self {
            Error::ExpectedHalalAuthority => Some(Role::HalalAuthority),
            Error::ExpectedDistributor => Some(Role::Distributor),
            Error::ExpectedRetailer => Some(Role::Retailer),
            _ => None,
        }
    }
}

#[contract]
pub struct HalalSupplyChain;

#[contractimpl]
impl HalalSupplyChain {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Initialise the contract and grant `Admin` to `admin`.
    ///
    /// Must be called exactly once immediately after deployment.
    /// Subsequent calls fail with `Error::AlreadyInitialized`.
    pub fn init(env: Env, admin: Address) -> Result<(), Error> {
        admin.require_auth();
        rbac::init_admin(&env, &admin)
    }

    // ─────────────────────────────────────────────────────────
    // Access control
    // ─────────────────────────────────────────────────────────

    /// Overwrite `target`'s role. Assigning `Role::None` revokes.
    ///
    /// - `caller` must hold `Admin`.
    /// - `caller` may not change its own role.
    pub fn assign_role(env: Env, caller: Address, target: Address, role: Role) -> Result<(), Error> {
        caller.require_auth();
        rbac::assign_role(&env, &caller, &target, role)
    }

    /// Return the role held by `address`; `Role::None` if never assigned.
    pub fn role_of(env: Env, address: Address) -> Role {
        rbac::role_of(&env, &address)
    }

    /// Return `true` if `address` holds `role`.
    pub fn has_role(env: Env, address: Address, role: Role) -> bool {
        rbac::has_role(&env, &address, role)
    }

    /// Return the address the contract was initialised with.
    pub fn admin(env: Env) -> Option<Address> {
        rbac::admin(&env)
    }

    /// Choose who may call `update_status`. `caller` must hold `Admin`.
    pub fn set_status_policy(env: Env, caller: Address, policy: StatusPolicy) -> Result<(), Error> {
        caller.require_auth();
        rbac::require_role(&env, &caller, Role::Admin)?;
        storage::set_status_policy(&env, policy);
        events::emit_status_policy_changed(&env, policy, caller);
        Ok(())
    }

    pub fn status_policy(env: Env) -> StatusPolicy {
        storage::status_policy(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Batch lifecycle
    // ─────────────────────────────────────────────────────────

    /// Create a batch owned by its producer.
    ///
    /// `caller` must hold `Producer`. `id` must be non-empty and never used
    /// before; ids are not recycled.
    pub fn create_batch(
        env: Env,
        caller: Address,
        id: String,
        product_name: String,
    ) -> Result<Batch, Error> {
        caller.require_auth();
        rbac::require_role(&env, &caller, Role::Producer)?;

        if id.len() == 0 {
            return Err(Error::EmptyBatchId);
        }
        if storage::batch_exists(&env, &id) {
            return Err(Error::DuplicateBatch);
        }

        let created_at = env.ledger().timestamp();
        let config = BatchConfig {
            id: id.clone(),
            product_name: product_name.clone(),
            producer: caller.clone(),
            created_at,
        };
        let state = BatchState {
            current_owner: caller.clone(),
            status: String::from_str(&env, INITIAL_STATUS),
            halal_cert_hash: String::from_str(&env, ""),
        };

        storage::save_new_batch(&env, &config, &state);
        events::emit_batch_created(&env, id, product_name, caller, created_at);

        Ok(Batch::from_parts(config, state))
    }

    /// Hand custody of batch `id` from `caller` to `to`.
    ///
    /// `to` must hold the role immediately after `caller`'s in the pipeline.
    pub fn transfer_batch(env: Env, caller: Address, id: String, to: Address) -> Result<(), Error> {
        caller.require_auth();
        let caller_role = rbac::role_of(&env, &caller);
        lifecycle::require_can_transfer(caller_role)?;

        let state = storage::load_batch_state(&env, &id)?;
        let to_role = rbac::role_of(&env, &to);
        let next = lifecycle::transfer(&state, &caller, caller_role, &to, to_role)?;

        storage::save_batch_state(&env, &id, &next);
        events::emit_batch_transferred(&env, id, caller, to, to_role);
        Ok(())
    }

    /// Record the halal certificate for batch `id`.
    ///
    /// `caller` must hold `HalalAuthority` **and** currently own the batch.
    /// The certificate can be set only once.
    pub fn set_halal_certificate(
        env: Env,
        caller: Address,
        id: String,
        cert_hash: String,
    ) -> Result<(), Error> {
        caller.require_auth();
        let caller_role = rbac::role_of(&env, &caller);
        lifecycle::require_can_certify(caller_role)?;

        let state = storage::load_batch_state(&env, &id)?;
        let next = lifecycle::certify(&state, &caller, caller_role, &cert_hash)?;

        storage::save_batch_state(&env, &id, &next);
        events::emit_batch_certified(&env, id, caller, cert_hash);
        Ok(())
    }

    /// Replace the free-form status text of batch `id`.
    ///
    /// `caller` must own the batch and satisfy the active [`StatusPolicy`].
    pub fn update_status(
        env: Env,
        caller: Address,
        id: String,
        new_status: String,
    ) -> Result<(), Error> {
        caller.require_auth();
        let caller_role = rbac::role_of(&env, &caller);
        let policy = storage::status_policy(&env);
        lifecycle::require_can_update_status(caller_role, policy)?;

        let state = storage::load_batch_state(&env, &id)?;
        let next = lifecycle::update_status(&state, &caller, caller_role, policy, &new_status)?;

        storage::save_batch_state(&env, &id, &next);
        events::emit_status_updated(&env, id, caller, new_status);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────

    /// Retrieve a batch by id.
    pub fn get_batch(env: Env, id: String) -> Result<Batch, Error> {
        storage::load_batch(&env, &id)
    }

    pub fn is_batch_exists(env: Env, id: String) -> bool {
        storage::batch_exists(&env, &id)
    }

    /// Number of batches ever created.
    pub fn batch_count(env: Env) -> u64 {
        storage::batch_count(&env)
    }

    /// Pipeline stage of batch `id`, derived from its owner's current role.
    pub fn get_stage(env: Env, id: String) -> Result<Stage, Error> {
        Ok(Self::get_batch_view(env, id)?.stage)
    }

    /// Batch plus everything a consumer needs to judge it: the owner's role,
    /// the derived stage and whether it carries a certificate.
    pub fn get_batch_view(env: Env, id: String) -> Result<BatchView, Error> {
        let batch = storage::load_batch(&env, &id)?;
        let owner_role = rbac::role_of(&env, &batch.current_owner);
        let certified = batch.halal_cert_hash.len() > 0;
        let stage = Stage::derive(owner_role, certified).ok_or(Error::StageUndetermined)?;
        Ok(BatchView {
            batch,
            owner_role,
            stage,
            certified,
        })
    }
}
