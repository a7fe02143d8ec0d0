//! Canonical event types emitted by the supply chain contract.
//!
//! These mirror the Soroban contract events defined in
//! `contracts/halal_supply_chain/src/events.rs`.

use serde::{Deserialize, Serialize};

/// All recognised event kinds from the supply chain contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The contract was bootstrapped (`init` topic).
    Initialized,
    /// A role was assigned or revoked (`role_set` topic).
    RoleAssigned,
    /// The status update policy changed (`policy` topic).
    StatusPolicyChanged,
    /// A producer created a batch (`created` topic).
    BatchCreated,
    /// Custody moved to the next stage (`transfer` topic).
    BatchTransferred,
    /// A halal authority recorded the certificate (`certified` topic).
    BatchCertified,
    /// The owner replaced the status text (`status` topic).
    StatusUpdated,
    /// An event from this contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol string produced by Soroban into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "init" => Self::Initialized,
            "role_set" => Self::RoleAssigned,
            "policy" => Self::StatusPolicyChanged,
            "created" => Self::BatchCreated,
            "transfer" => Self::BatchTransferred,
            "certified" => Self::BatchCertified,
            "status" => Self::StatusUpdated,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Initialized => "initialized",
            Self::RoleAssigned => "role_assigned",
            Self::StatusPolicyChanged => "status_policy_changed",
            Self::BatchCreated => "batch_created",
            Self::BatchTransferred => "batch_transferred",
            Self::BatchCertified => "batch_certified",
            Self::StatusUpdated => "status_updated",
            Self::Unknown => "unknown",
        }
    }

    /// Inverse of [`EventKind::as_str`].
    pub fn from_stored(value: &str) -> Self {
        match value {
            "initialized" => Self::Initialized,
            "role_assigned" => Self::RoleAssigned,
            "status_policy_changed" => Self::StatusPolicyChanged,
            "batch_created" => Self::BatchCreated,
            "batch_transferred" => Self::BatchTransferred,
            "batch_certified" => Self::BatchCertified,
            "status_updated" => Self::StatusUpdated,
            _ => Self::Unknown,
        }
    }

    /// Whether the second topic of this event is a batch id.
    pub fn is_batch_event(&self) -> bool {
        matches!(
            self,
            Self::BatchCreated | Self::BatchTransferred | Self::BatchCertified | Self::StatusUpdated
        )
    }
}

/// A fully decoded supply chain event, ready to be stored in the database.
///
/// Column meaning depends on the kind:
///
/// | kind                    | actor      | subject   | detail          |
/// |-------------------------|------------|-----------|-----------------|
/// | `initialized`           | admin      |           |                 |
/// | `role_assigned`         | admin      | target    | role code       |
/// | `status_policy_changed` | admin      |           | policy name     |
/// | `batch_created`         | producer   |           | product name    |
/// | `batch_transferred`     | from       | to        | to role code    |
/// | `batch_certified`       | authority  |           | cert hash       |
/// | `status_updated`        | owner      |           | status text     |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplyChainEvent {
    pub event_id: String,
    pub event_type: String,
    pub batch_id: Option<String>,
    pub actor: Option<String>,
    pub subject: Option<String>,
    pub detail: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// A raw event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_id: String,
    pub event_type: String,
    pub batch_id: Option<String>,
    pub actor: Option<String>,
    pub subject: Option<String>,
    pub detail: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}

impl EventRecord {
    pub fn kind(&self) -> EventKind {
        EventKind::from_stored(&self.event_type)
    }
}
