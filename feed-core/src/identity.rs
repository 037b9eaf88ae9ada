use std::{future::Future, sync::Arc};

use candid::Principal;
use ic_agent::{identity::DelegatedIdentity, Identity};
use types::delegated_identity::DelegatedIdentityWire;
use web_time::{SystemTime, UNIX_EPOCH};

use crate::{Error, Result};

/// Supplies the caller's principal and mints short lived identities
/// for scoped canister calls.
///
/// Every call to [`IdentityProvider::mint_delegated_identity`] must
/// return a new identity instance, callers never share one.
pub trait IdentityProvider: Send + Sync {
    fn current_principal(&self) -> Option<Principal>;

    fn mint_delegated_identity(&self) -> impl Future<Output = Result<Arc<dyn Identity>>> + Send;
}

impl<T: IdentityProvider> IdentityProvider for Arc<T> {
    fn current_principal(&self) -> Option<Principal> {
        (**self).current_principal()
    }

    fn mint_delegated_identity(&self) -> impl Future<Output = Result<Arc<dyn Identity>>> + Send {
        (**self).mint_delegated_identity()
    }
}

/// Identity provider backed by the delegation handed over by the auth flow
#[derive(Clone, Debug)]
pub struct WireIdentityProvider {
    wire: DelegatedIdentityWire,
    principal: Option<Principal>,
}

impl WireIdentityProvider {
    pub fn new(wire: DelegatedIdentityWire, principal: Option<Principal>) -> Self {
        Self { wire, principal }
    }

    pub fn expiry_ns(&self) -> u64 {
        self.wire.expiry_ns()
    }
}

fn now_ns() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}

impl IdentityProvider for WireIdentityProvider {
    fn current_principal(&self) -> Option<Principal> {
        self.principal
    }

    async fn mint_delegated_identity(&self) -> Result<Arc<dyn Identity>> {
        if self.wire.is_expired_at(now_ns()) {
            return Err(Error::IdentityUnavailable("delegation has expired".into()));
        }
        let id = DelegatedIdentity::try_from(self.wire.clone())
            .map_err(|e| Error::IdentityUnavailable(e.to_string()))?;
        Ok(Arc::new(id))
    }
}
