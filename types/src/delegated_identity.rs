use ic_agent::identity::{DelegatedIdentity, Secp256k1Identity, SignedDelegation};
use k256::elliptic_curve::JwkEcKey;

use serde::{Deserialize, Serialize};

/// Delegated identity as handed over by the auth flow.
/// Every feed call reconstructs a fresh [`DelegatedIdentity`] from this
#[derive(Serialize, Deserialize, Clone)]
pub struct DelegatedIdentityWire {
    /// raw bytes of delegated identity's public key
    pub from_key: Vec<u8>,
    /// JWK(JSON Web Key) encoded Secp256k1 secret key
    /// identity allowed to sign on behalf of `from_key`
    pub to_secret: JwkEcKey,
    /// Proof of delegation
    /// connecting from_key to `to_secret`
    pub delegation_chain: Vec<SignedDelegation>,
}

impl DelegatedIdentityWire {
    /// Expiry of the whole chain in nanoseconds since epoch,
    /// i.e the earliest expiration of any delegation in it
    pub fn expiry_ns(&self) -> u64 {
        chain_expiry_ns(&self.delegation_chain)
    }

    pub fn is_expired_at(&self, now_ns: u64) -> bool {
        self.expiry_ns() <= now_ns
    }
}

pub fn chain_expiry_ns(chain: &[SignedDelegation]) -> u64 {
    chain.iter().fold(u64::MAX, |prev_expiry, del| {
        del.delegation.expiration.min(prev_expiry)
    })
}

impl std::fmt::Debug for DelegatedIdentityWire {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelegatedIdentityWire")
            .field("expiry_ns", &self.expiry_ns())
            .finish_non_exhaustive()
    }
}

impl TryFrom<DelegatedIdentityWire> for DelegatedIdentity {
    type Error = k256::elliptic_curve::Error;

    fn try_from(value: DelegatedIdentityWire) -> Result<Self, Self::Error> {
        let to_secret = k256::SecretKey::from_jwk(&value.to_secret)?;
        let to_identity = Secp256k1Identity::from_private_key(to_secret);
        Ok(Self::new(
            value.from_key,
            Box::new(to_identity),
            value.delegation_chain,
        ))
    }
}
