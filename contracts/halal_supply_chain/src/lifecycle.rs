//! # Batch lifecycle
//!
//! Pure transition functions over [`BatchState`]. Nothing here touches
//! storage: callers resolve roles and load state, apply one transition, and
//! persist the returned state only on `Ok`. A rejected call therefore never
//! leaves a partially updated batch behind.
//!
//! Every transition checks, in order: the caller's role, the caller's
//! custody of the batch, then the rule specific to the operation.

use soroban_sdk::{Address, String};

use crate::rbac::Role;
use crate::types::{BatchState, StatusPolicy};
use crate::Error;

/// Role gate for `transfer_batch`, checked before the batch is loaded.
pub fn require_can_transfer(caller_role: Role) -> Result<(), Error> {
    match caller_role.next_in_pipeline() {
        Some(_) => Ok(()),
        None => Err(Error::Unauthorized),
    }
}

/// Role gate for `set_halal_certificate`, checked before the batch is loaded.
pub fn require_can_certify(caller_role: Role) -> Result<(), Error> {
    if caller_role == Role::HalalAuthority {
        Ok(())
    } else {
        Err(Error::Unauthorized)
    }
}

/// Role gate for `update_status`, checked before the batch is loaded.
pub fn require_can_update_status(caller_role: Role, policy: StatusPolicy) -> Result<(), Error> {
    let allowed = match policy {
        StatusPolicy::AnyOwner => caller_role != Role::None,
        StatusPolicy::DownstreamOnly => {
            matches!(caller_role, Role::Distributor | Role::Retailer)
        }
    };
    if allowed {
        Ok(())
    } else {
        Err(Error::Unauthorized)
    }
}

fn require_owner(state: &BatchState, caller: &Address) -> Result<(), Error> {
    if &state.current_owner == caller {
        Ok(())
    } else {
        Err(Error::NotCurrentOwner)
    }
}

/// Hand custody from `caller` to `to`.
///
/// `to_role` must be the immediate successor of `caller_role`; anything else
/// (backwards, sideways, skipping a stage) is rejected with the
/// `InvalidSequence` error naming the expected role.
pub fn transfer(
    state: &BatchState,
    caller: &Address,
    caller_role: Role,
    to: &Address,
    to_role: Role,
) -> Result<BatchState, Error> {
    require_can_transfer(caller_role)?;
    require_owner(state, caller)?;

    let expected = caller_role
        .next_in_pipeline()
        .ok_or(Error::Unauthorized)?;
    if to_role != expected {
        return Err(Error::invalid_sequence(expected));
    }

    Ok(BatchState {
        current_owner: to.clone(),
        status: state.status.clone(),
        halal_cert_hash: state.halal_cert_hash.clone(),
    })
}

/// Record the halal certificate. Allowed once per batch, by the halal
/// authority currently holding it.
pub fn certify(
    state: &BatchState,
    caller: &Address,
    caller_role: Role,
    cert_hash: &String,
) -> Result<BatchState, Error> {
    require_can_certify(caller_role)?;
    require_owner(state, caller)?;

    if state.is_certified() {
        return Err(Error::AlreadyCertified);
    }
    if cert_hash.len() == 0 {
        return Err(Error::EmptyCertHash);
    }

    Ok(BatchState {
        current_owner: state.current_owner.clone(),
        status: state.status.clone(),
        halal_cert_hash: cert_hash.clone(),
    })
}

/// Replace the status text. Any string is accepted, including an empty one.
pub fn update_status(
    state: &BatchState,
    caller: &Address,
    caller_role: Role,
    policy: StatusPolicy,
    new_status: &String,
) -> Result<BatchState, Error> {
    require_can_update_status(caller_role, policy)?;
    require_owner(state, caller)?;

    Ok(BatchState {
        current_owner: state.current_owner.clone(),
        status: new_status.clone(),
        halal_cert_hash: state.halal_cert_hash.clone(),
    })
}
