//! # Types
//!
//! Shared data structures used across all modules of the supply chain contract.
//!
//! ## Design decisions
//!
//! ### Config / State split
//!
//! A `Batch` is internally stored as two separate ledger entries:
//!
//! - [`BatchConfig`] — written once at creation; never mutated.
//! - [`BatchState`] — rewritten on every transfer, certification and status update.
//!
//! The public API exposes the reconstructed [`Batch`] struct for convenience.
//!
//! ### Stage is derived, never stored
//!
//! The pipeline position of a batch is a function of its current owner's role
//! and whether a halal certificate has been recorded:
//!
//! ```text
//! Created ──► WithAuthority ──► Certified ──► WithDistributor ──► WithRetailer
//!                   └─────────────────────────────►┘
//! ```
//!
//! [`Stage::derive`] is the only place that mapping is written down.

use soroban_sdk::{contracttype, Address, String};

use crate::rbac::Role;

/// Status text given to every batch at creation.
pub const INITIAL_STATUS: &str = "Created";

/// Immutable batch configuration, written once at creation.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchConfig {
    pub id: String,
    pub product_name: String,
    pub producer: Address,
    pub created_at: u64,
}

/// Mutable batch state, updated by transfers, certification and status updates.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchState {
    pub current_owner: Address,
    pub status: String,
    pub halal_cert_hash: String,
}

impl BatchState {
    /// `true` once a halal certificate hash has been recorded.
    pub fn is_certified(&self) -> bool {
        self.halal_cert_hash.len() > 0
    }
}

/// Full on-chain representation of a product batch.
///
/// Used as the public API return type; reconstructed internally from
/// the split `BatchConfig` + `BatchState` storage entries.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Batch {
    /// Caller-supplied identifier, unique among all batches ever created.
    pub id: String,
    /// Product label, e.g. "Halal Beef".
    pub product_name: String,
    /// Address that created the batch.
    pub producer: Address,
    /// Address currently holding custody.
    pub current_owner: Address,
    /// Free-form status text maintained by the current owner.
    pub status: String,
    /// Certificate reference (e.g. an IPFS CID). Empty until certified.
    pub halal_cert_hash: String,
    /// Ledger timestamp at creation.
    pub created_at: u64,
}

impl Batch {
    pub fn from_parts(config: BatchConfig, state: BatchState) -> Self {
        Batch {
            id: config.id,
            product_name: config.product_name,
            producer: config.producer,
            current_owner: state.current_owner,
            status: state.status,
            halal_cert_hash: state.halal_cert_hash,
            created_at: config.created_at,
        }
    }
}

/// Position of a batch in the supply chain pipeline.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum Stage {
    /// Held by its producer.
    Created,
    /// Held by a halal authority, not yet certified.
    WithAuthority,
    /// Held by a halal authority that has recorded the certificate.
    Certified,
    /// Held by a distributor.
    WithDistributor,
    /// Held by a retailer. Terminal.
    WithRetailer,
}

impl Stage {
    /// Derive the stage from the owner's current role and certificate presence.
    ///
    /// Returns `None` when the owner no longer holds a pipeline role
    /// (e.g. the role was revoked after the batch was handed over).
    pub fn derive(owner_role: Role, certified: bool) -> Option<Stage> {
        match owner_role {
            Role::Producer => Some(Stage::Created),
            Role::HalalAuthority if certified => Some(Stage::Certified),
            Role::HalalAuthority => Some(Stage::WithAuthority),
            Role::Distributor => Some(Stage::WithDistributor),
            Role::Retailer => Some(Stage::WithRetailer),
            Role::None | Role::Admin => None,
        }
    }
}

/// Who may call `update_status`, beyond being the current owner.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StatusPolicy {
    /// Any owner holding a non-`None` role.
    AnyOwner,
    /// Only owners holding `Distributor` or `Retailer`.
    DownstreamOnly,
}

/// Consumer-facing verification record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchView {
    pub batch: Batch,
    pub owner_role: Role,
    pub stage: Stage,
    pub certified: bool,
}
