//! # Role-Based Access Control
//!
//! One global table maps every [`Address`] to exactly one [`Role`]. Roles are
//! capabilities valid across the whole ledger: they are not scoped to a batch,
//! never expire, and are read fresh on every call.
//!
//! | Role             | Code | Capabilities                                         |
//! |------------------|------|------------------------------------------------------|
//! | `None`           | 0    | Read-only. Default for every address.                |
//! | `Admin`          | 1    | Assign and revoke roles, set the status policy.      |
//! | `Producer`       | 2    | Create batches, hand them to a halal authority.      |
//! | `HalalAuthority` | 3    | Certify batches it holds, hand them to a distributor.|
//! | `Distributor`    | 4    | Hand batches to a retailer, update status.           |
//! | `Retailer`       | 5    | Update status. End of the pipeline.                  |
//!
//! ## Storage
//!
//! | Key                  | Tier       | Type      |
//! |----------------------|------------|-----------|
//! | `RbacKey::Admin`     | Instance   | `Address` |
//! | `RbacKey::Role(a)`   | Persistent | `Role`    |
//!
//! Assignment overwrites. Assigning `Role::None` removes the entry entirely,
//! so revoked addresses cost no rent.

use soroban_sdk::{contracttype, Address, Env};

use crate::events;
use crate::storage::{bump_instance, bump_persistent_key};
use crate::Error;

/// Supply chain role. Numeric codes are stable and used by off-chain clients.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Role {
    None = 0,
    Admin = 1,
    Producer = 2,
    HalalAuthority = 3,
    Distributor = 4,
    Retailer = 5,
}

impl Role {
    /// The role that must receive a batch from a holder of `self`.
    ///
    /// `None` for roles that cannot hand a batch on: `Retailer` ends the
    /// pipeline, and `None`/`Admin` never hold custody legitimately.
    pub fn next_in_pipeline(self) -> Option<Role> {
        match self {
            Role::Producer => Some(Role::HalalAuthority),
            Role::HalalAuthority => Some(Role::Distributor),
            Role::Distributor => Some(Role::Retailer),
            Role::Retailer | Role::Admin | Role::None => None,
        }
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RbacKey {
    /// Address that bootstrapped the contract (Instance).
    Admin,
    /// Role held by an address (Persistent).
    Role(Address),
}

/// Grant `Admin` to `admin`. Fails if the contract was already initialised.
pub fn init_admin(env: &Env, admin: &Address) -> Result<(), Error> {
    if env.storage().instance().has(&RbacKey::Admin) {
        return Err(Error::AlreadyInitialized);
    }
    env.storage().instance().set(&RbacKey::Admin, admin);
    bump_instance(env);
    write_role(env, admin, Role::Admin);
    events::emit_initialized(env, admin.clone());
    Ok(())
}

/// The address passed to `init`, if any.
pub fn admin(env: &Env) -> Option<Address> {
    env.storage().instance().get(&RbacKey::Admin)
}

/// Overwrite `target`'s role. `caller` must hold `Admin` and may not
/// change its own role.
pub fn assign_role(env: &Env, caller: &Address, target: &Address, role: Role) -> Result<(), Error> {
    require_role(env, caller, Role::Admin)?;
    if caller == target {
        return Err(Error::SelfRoleChange);
    }
    write_role(env, target, role);
    events::emit_role_assigned(env, target.clone(), role, caller.clone());
    Ok(())
}

/// Role currently held by `address`; `Role::None` if never assigned.
pub fn role_of(env: &Env, address: &Address) -> Role {
    let key = RbacKey::Role(address.clone());
    match env.storage().persistent().get::<_, Role>(&key) {
        Some(role) => {
            bump_persistent_key(env, &key);
            role
        }
        None => Role::None,
    }
}

pub fn has_role(env: &Env, address: &Address, role: Role) -> bool {
    role_of(env, address) == role
}

/// Fail with `Unauthorized` unless `address` holds exactly `role`.
pub fn require_role(env: &Env, address: &Address, role: Role) -> Result<(), Error> {
    if has_role(env, address, role) {
        Ok(())
    } else {
        Err(Error::Unauthorized)
    }
}

fn write_role(env: &Env, address: &Address, role: Role) {
    let key = RbacKey::Role(address.clone());
    if role == Role::None {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &role);
        bump_persistent_key(env, &key);
    }
}
