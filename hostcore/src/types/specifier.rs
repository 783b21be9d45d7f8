use core::fmt;

use serde::{Deserialize, Serialize};

use crate::encoding::{SiaDecodable, SiaDecode, SiaEncodable, SiaEncode};

pub const SPECIFIER_SIZE: usize = 16;

/// A Specifier is a fixed-size, zero-padded identifier used to tag signature
/// algorithms and typed hashes on the chain.
#[derive(Debug, PartialEq, Clone, Copy, SiaEncode, SiaDecode)]
pub struct Specifier([u8; SPECIFIER_SIZE]);

impl Specifier {
    pub const fn new(buf: [u8; SPECIFIER_SIZE]) -> Self {
        Specifier(buf)
    }

    pub const fn as_bytes(&self) -> &[u8; SPECIFIER_SIZE] {
        &self.0
    }
}

impl<T: AsRef<[u8]>> From<T> for Specifier {
    fn from(src: T) -> Self {
        let src = src.as_ref();
        assert!(src.len() <= SPECIFIER_SIZE, "specifier too long");
        let mut spec = Specifier([0; SPECIFIER_SIZE]);
        spec.0[..src.len()].copy_from_slice(src);
        spec
    }
}

impl fmt::Display for Specifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let end = self
            .0
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(SPECIFIER_SIZE);
        String::from_utf8_lossy(&self.0[..end]).fmt(f)
    }
}

impl Serialize for Specifier {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        String::serialize(&self.to_string(), serializer)
    }
}

impl<'de> Deserialize<'de> for Specifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s.len() > SPECIFIER_SIZE {
            return Err(serde::de::Error::custom("specifier too long"));
        }
        Ok(Specifier::from(s))
    }
}

/// A macro to create a Specifier from a literal string. The string must fit in
/// 16 bytes; the remainder is zero-padded.
#[macro_export]
macro_rules! specifier {
    ($text:literal) => {{
        let src = $text.as_bytes();
        if src.len() > 16 {
            panic!("specifier too long");
        }
        let mut buf = [0u8; 16];
        let mut i = 0;
        while i < src.len() {
            buf[i] = src[i];
            i += 1;
        }
        $crate::types::Specifier::new(buf)
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_specifier() {
        const ED25519: Specifier = specifier!("ed25519");
        let expected = Specifier([
            b'e', b'd', b'2', b'5', b'5', b'1', b'9', 0, 0, 0, 0, 0, 0, 0, 0, 0,
        ]);
        assert_eq!(ED25519, expected);
        assert_eq!(Specifier::from("ed25519"), expected);
        assert_eq!(ED25519.to_string(), "ed25519");
    }
}
