use core::fmt;

use crate::encoding::{SiaDecodable, SiaDecode, SiaEncodable, SiaEncode};
use crate::types::{Hash256, HexParseError};
use ed25519_dalek::{Signature as ED25519Signature, Signer, SigningKey, Verifier, VerifyingKey};
use serde::de::Error;
use serde::{Deserialize, Serialize};

/// An ed25519 public key that can be used to verify a signature
#[derive(Debug, PartialEq, Clone, Copy, SiaEncode, SiaDecode)]
pub struct PublicKey([u8; 32]);

impl PublicKey {
    const PREFIX: &'static str = "ed25519:";
}

impl Serialize for PublicKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        String::serialize(
            &format!("{}{}", Self::PREFIX, &self.to_string()),
            serializer,
        )
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let s = s.strip_prefix(Self::PREFIX).ok_or(Error::custom(format!(
            "key must have prefix '{}'",
            Self::PREFIX
        )))?;
        let mut pk = [0; 32];
        hex::decode_to_slice(s, &mut pk).map_err(|e| Error::custom(format!("{:?}", e)))?;
        Ok(Self::new(pk))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        hex::encode(self.0).fmt(f)
    }
}

impl PublicKey {
    pub const fn new(buf: [u8; 32]) -> Self {
        PublicKey(buf)
    }

    pub fn verify(&self, sig_hash: &Hash256, signature: &Signature) -> bool {
        let pk = VerifyingKey::from_bytes(&self.0).unwrap();
        pk.verify(
            sig_hash.as_ref(),
            &ED25519Signature::from_bytes(signature.as_ref()),
        )
        .is_ok()
    }
}

impl AsRef<[u8]> for PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// An ed25519 private key that can be used to sign a hash
#[derive(Debug, PartialEq, Clone)]
pub struct PrivateKey([u8; 64]);

impl PrivateKey {
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let sk = SigningKey::from_bytes(seed);
        PrivateKey(sk.to_keypair_bytes())
    }

    pub fn public_key(&self) -> PublicKey {
        let mut buf = [0u8; 32];
        buf.copy_from_slice(&self.0[32..]);
        PublicKey::new(buf)
    }

    pub fn sign_hash(&self, h: &Hash256) -> Signature {
        let sk = SigningKey::from_bytes(&self.0[..32].try_into().unwrap());
        Signature::new(sk.sign(h.as_ref()).to_bytes())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 64]> for PrivateKey {
    fn from(key: [u8; 64]) -> Self {
        PrivateKey(key)
    }
}

impl From<Hash256> for PrivateKey {
    fn from(hash: Hash256) -> Self {
        PrivateKey::from_seed(hash.as_ref())
    }
}

impl Drop for PrivateKey {
    fn drop(&mut self) {
        // Zero out the private key
        for byte in self.0.iter_mut() {
            *byte = 0;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, SiaEncode, SiaDecode)]
pub struct Signature([u8; 64]);

impl Serialize for Signature {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        String::serialize(&hex::encode(self.0), serializer)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> Result<Signature, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let buf = hex::decode(String::deserialize(deserializer)?)
            .map_err(|e| D::Error::custom(format!("{:?}", e)))?;
        if buf.len() != 64 {
            return Err(D::Error::custom("Invalid signature length"));
        }
        Ok(Signature(buf.try_into().unwrap()))
    }
}

impl Signature {
    pub fn new(sig: [u8; 64]) -> Self {
        Signature(sig)
    }

    pub fn data(&self) -> &[u8] {
        &self.0
    }

    pub fn parse_string(s: &str) -> Result<Self, HexParseError> {
        let data = hex::decode(s).map_err(HexParseError::HexError)?;
        if data.len() != 64 {
            return Err(HexParseError::InvalidLength);
        }

        let mut sig = [0u8; 64];
        sig.copy_from_slice(&data);
        Ok(Signature(sig))
    }
}

impl Default for Signature {
    fn default() -> Self {
        Signature([0; 64])
    }
}

impl AsRef<[u8; 64]> for Signature {
    fn as_ref(&self) -> &[u8; 64] {
        &self.0
    }
}

impl From<[u8; 64]> for Signature {
    fn from(buf: [u8; 64]) -> Self {
        Signature(buf)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_public_key() {
        let key_bytes: [u8; 32] = core::array::from_fn(|i| i as u8 * 3);
        let public_key = PublicKey::new(key_bytes);

        // binary: the raw key bytes
        let mut serialized = Vec::new();
        public_key.encode(&mut serialized).unwrap();
        assert_eq!(serialized, key_bytes);
        assert_eq!(PublicKey::decode(&mut &serialized[..]).unwrap(), public_key);

        // json: prefixed hex
        let json = serde_json::to_string(&public_key).unwrap();
        assert_eq!(json, format!("\"ed25519:{}\"", hex::encode(key_bytes)));
        let deserialized: PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, public_key);

        // the algorithm prefix is required
        let unprefixed = format!("\"{}\"", hex::encode(key_bytes));
        assert!(serde_json::from_str::<PublicKey>(&unprefixed).is_err());
    }

    #[test]
    fn test_serialize_signature() {
        let signature = Signature::new(core::array::from_fn(|i| i as u8));

        let json = serde_json::to_string(&signature).unwrap();
        assert_eq!(json, format!("\"{}\"", hex::encode(signature.data())));
        let deserialized: Signature = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, signature);

        assert_eq!(
            Signature::parse_string("89eb0d6a8a69"),
            Err(HexParseError::InvalidLength)
        );
    }

    #[test]
    fn test_key_derivation() {
        // key derivation is deterministic in the seed
        let key = PrivateKey::from_seed(&[5u8; 32]);
        assert_eq!(
            key.public_key(),
            PrivateKey::from_seed(&[5u8; 32]).public_key()
        );
        assert_ne!(
            key.public_key(),
            PrivateKey::from_seed(&[6u8; 32]).public_key()
        );
    }

    #[test]
    fn test_sign_verify() {
        // a revision hash is co-signed by the renter and the host
        let renter = PrivateKey::from_seed(&[11u8; 32]);
        let host = PrivateKey::from_seed(&[22u8; 32]);
        let sig_hash = Hash256::from([0xd9u8; 32]);

        let renter_sig = renter.sign_hash(&sig_hash);
        let host_sig = host.sign_hash(&sig_hash);
        assert!(renter.public_key().verify(&sig_hash, &renter_sig));
        assert!(host.public_key().verify(&sig_hash, &host_sig));

        // signatures do not cross-verify
        assert!(!renter.public_key().verify(&sig_hash, &host_sig));
        assert!(!host.public_key().verify(&sig_hash, &renter_sig));

        // nor cover any other hash
        assert!(!renter.public_key().verify(&Hash256::from([0u8; 32]), &renter_sig));
    }
}
