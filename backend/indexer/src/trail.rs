//! Provenance trail: folds the indexed event history of one batch into the
//! record a consumer sees when verifying it.
//!
//! The stage table here must agree with `Stage::derive` in the contract.
//! The only difference is the input: the contract reads the owner's *current*
//! role, the indexer uses the role the owner held when the batch was handed
//! to it (the `to_role` recorded in the transfer event).

use serde::Serialize;

use crate::events::{EventKind, EventRecord};

/// Role codes as emitted by the contract.
pub const ROLE_PRODUCER: u32 = 2;
pub const ROLE_HALAL_AUTHORITY: u32 = 3;
pub const ROLE_DISTRIBUTOR: u32 = 4;
pub const ROLE_RETAILER: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Created,
    WithAuthority,
    Certified,
    WithDistributor,
    WithRetailer,
}

impl Stage {
    pub fn derive(owner_role: u32, certified: bool) -> Option<Stage> {
        match owner_role {
            ROLE_PRODUCER => Some(Stage::Created),
            ROLE_HALAL_AUTHORITY if certified => Some(Stage::Certified),
            ROLE_HALAL_AUTHORITY => Some(Stage::WithAuthority),
            ROLE_DISTRIBUTOR => Some(Stage::WithDistributor),
            ROLE_RETAILER => Some(Stage::WithRetailer),
            _ => None,
        }
    }
}

/// One entry in the human-readable timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrailStep {
    pub event_type: String,
    pub actor: Option<String>,
    pub detail: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub tx_hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchTrail {
    pub batch_id: String,
    pub product_name: Option<String>,
    pub producer: Option<String>,
    pub created_at: Option<i64>,
    pub current_owner: Option<String>,
    pub current_owner_role: u32,
    pub halal_authority: Option<String>,
    pub halal_cert_hash: Option<String>,
    pub distributor: Option<String>,
    pub retailer: Option<String>,
    pub status: Option<String>,
    pub stage: Option<Stage>,
    pub steps: Vec<TrailStep>,
}

/// Fold `events` (already filtered to `batch_id`, in ledger order) into a trail.
///
/// Returns `None` when no creation event has been indexed for the batch.
pub fn build_trail(batch_id: &str, events: &[EventRecord]) -> Option<BatchTrail> {
    let created = events
        .iter()
        .find(|e| e.kind() == EventKind::BatchCreated)?;

    let mut trail = BatchTrail {
        batch_id: batch_id.to_string(),
        product_name: created.detail.clone(),
        producer: created.actor.clone(),
        created_at: Some(created.timestamp),
        current_owner: created.actor.clone(),
        current_owner_role: ROLE_PRODUCER,
        halal_authority: None,
        halal_cert_hash: None,
        distributor: None,
        retailer: None,
        status: Some("Created".to_string()),
        stage: None,
        steps: Vec::with_capacity(events.len()),
    };

    for event in events {
        match event.kind() {
            EventKind::BatchTransferred => {
                let role = event
                    .detail
                    .as_deref()
                    .and_then(|d| d.parse::<u32>().ok())
                    .unwrap_or(0);
                trail.current_owner = event.subject.clone();
                trail.current_owner_role = role;
                match role {
                    ROLE_HALAL_AUTHORITY => trail.halal_authority = event.subject.clone(),
                    ROLE_DISTRIBUTOR => trail.distributor = event.subject.clone(),
                    ROLE_RETAILER => trail.retailer = event.subject.clone(),
                    _ => {}
                }
            }
            EventKind::BatchCertified => {
                trail.halal_cert_hash = event.detail.clone();
            }
            EventKind::StatusUpdated => {
                trail.status = event.detail.clone();
            }
            _ => {}
        }
        trail.steps.push(TrailStep {
            event_type: event.event_type.clone(),
            actor: event.actor.clone(),
            detail: event.detail.clone(),
            ledger: event.ledger,
            timestamp: event.timestamp,
            tx_hash: event.tx_hash.clone(),
        });
    }

    trail.stage = Stage::derive(trail.current_owner_role, trail.halal_cert_hash.is_some());
    Some(trail)
}
