#![allow(dead_code)]

extern crate std;

use crate::rbac::Role;
use crate::types::Batch;

/// INV-1: A batch id is never empty.
pub fn assert_id_non_empty(batch: &Batch) {
    assert!(batch.id.len() > 0, "INV-1 violated: batch with empty id");
}

/// INV-2: Fields written at creation never change.
pub fn assert_batch_immutable_fields(original: &Batch, current: &Batch) {
    assert_eq!(original.id, current.id, "INV-2 violated: batch id changed");
    assert_eq!(
        original.product_name, current.product_name,
        "INV-2 violated: product_name changed"
    );
    assert_eq!(
        original.producer, current.producer,
        "INV-2 violated: producer changed"
    );
    assert_eq!(
        original.created_at, current.created_at,
        "INV-2 violated: created_at changed"
    );
}

/// INV-3: Once set, the certificate hash never changes or clears.
pub fn assert_certificate_kept(before: &Batch, after: &Batch) {
    if before.halal_cert_hash.len() > 0 {
        assert_eq!(
            before.halal_cert_hash, after.halal_cert_hash,
            "INV-3 violated: halal certificate was overwritten"
        );
    }
}

/// INV-4: The sequence of owner roles is a prefix of the pipeline, one step
/// at a time, with no repeats and no skips.
pub fn assert_owner_walk(roles: &[Role]) {
    const PIPELINE: [Role; 4] = [
        Role::Producer,
        Role::HalalAuthority,
        Role::Distributor,
        Role::Retailer,
    ];
    assert!(
        roles.len() <= PIPELINE.len(),
        "INV-4 violated: {} owners for a 4-stage pipeline",
        roles.len()
    );
    for (i, role) in roles.iter().enumerate() {
        assert_eq!(
            *role, PIPELINE[i],
            "INV-4 violated: owner #{} had role {:?}, expected {:?}",
            i, role, PIPELINE[i]
        );
    }
}
