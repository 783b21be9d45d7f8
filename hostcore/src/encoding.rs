use std::io::{self, Read, Write};

use thiserror::Error;

pub use hostcore_derive::{SiaDecode, SiaEncode};

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Invalid length")]
    InvalidLength,
    #[error("Invalid value")]
    InvalidValue,
    #[error("Custom error: {0}")]
    Custom(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Serializes a value into the canonical on-chain byte layout. Integers are
/// 8-byte little-endian, collections carry an 8-byte length prefix, and
/// fixed-size byte arrays are written raw. Structs derive this via
/// `SiaEncode`, encoding fields in declaration order to match the chain.
pub trait SiaEncodable {
    fn encode<W: Write>(&self, w: &mut W) -> Result<()>;
}

pub trait SiaDecodable: Sized {
    fn decode<R: Read>(r: &mut R) -> Result<Self>;
}

impl SiaEncodable for u8 {
    fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_all(&[*self])?;
        Ok(())
    }
}

impl SiaDecodable for u8 {
    fn decode<R: Read>(r: &mut R) -> Result<Self> {
        let mut buf = [0; 1];
        r.read_exact(&mut buf)?;
        Ok(buf[0])
    }
}

impl SiaEncodable for bool {
    fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        (*self as u8).encode(w)
    }
}

impl SiaDecodable for bool {
    fn decode<R: Read>(r: &mut R) -> Result<Self> {
        let v = u8::decode(r)?;
        match v {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(Error::InvalidValue),
        }
    }
}

macro_rules! impl_sia_numeric {
    ($($t:ty),*) => {
        $(
            impl SiaEncodable for $t {
                fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
                    w.write_all(&(*self as u64).to_le_bytes())?;
                    Ok(())
                }
            }

            impl SiaDecodable for $t {
                fn decode<R: Read>(r: &mut R) -> Result<Self> {
                    let mut buf = [0u8; 8];
                    r.read_exact(&mut buf)?;
                    Ok(u64::from_le_bytes(buf) as Self)
                }
            }
        )*
    }
}

impl_sia_numeric!(u16, u32, usize, i16, i32, i64, u64);

impl<T: SiaEncodable> SiaEncodable for [T] {
    fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        self.len().encode(w)?;
        for item in self {
            item.encode(w)?;
        }
        Ok(())
    }
}

impl<T: SiaEncodable> SiaEncodable for Vec<T> {
    fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        self.as_slice().encode(w)
    }
}

impl<T: SiaDecodable> SiaDecodable for Vec<T> {
    fn decode<R: Read>(r: &mut R) -> Result<Self> {
        let len = usize::decode(r)?;
        let mut vec = Vec::with_capacity(len);
        for _ in 0..len {
            vec.push(T::decode(r)?);
        }
        Ok(vec)
    }
}

impl<T: SiaEncodable> SiaEncodable for Option<T> {
    fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        match self {
            Some(v) => {
                true.encode(w)?;
                v.encode(w)
            }
            None => false.encode(w),
        }
    }
}

impl<T: SiaDecodable> SiaDecodable for Option<T> {
    fn decode<R: Read>(r: &mut R) -> Result<Self> {
        let has_value = bool::decode(r)?;
        if has_value {
            Ok(Some(T::decode(r)?))
        } else {
            Ok(None)
        }
    }
}

impl SiaEncodable for String {
    fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        self.as_bytes().encode(w)
    }
}

impl SiaDecodable for String {
    fn decode<R: Read>(r: &mut R) -> Result<Self> {
        let buf = Vec::<u8>::decode(r)?;
        String::from_utf8(buf).map_err(|_| Error::InvalidLength)
    }
}

impl<const N: usize> SiaEncodable for [u8; N] {
    fn encode<W: Write>(&self, w: &mut W) -> Result<()> {
        w.write_all(self)?;
        Ok(())
    }
}

impl<const N: usize> SiaDecodable for [u8; N] {
    fn decode<R: Read>(r: &mut R) -> Result<Self> {
        let mut arr = [0u8; N];
        r.read_exact(&mut arr)?;
        Ok(arr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Address, Currency, SiacoinOutput};

    /// encodes a value, decodes it back, and returns the wire bytes
    fn roundtrip<T: SiaEncodable + SiaDecodable + std::fmt::Debug + PartialEq>(value: T) -> Vec<u8> {
        let mut buf = Vec::new();
        value
            .encode(&mut buf)
            .unwrap_or_else(|e| panic!("failed to encode: {:?}", e));

        let mut r = &buf[..];
        let decoded = T::decode(&mut r).unwrap_or_else(|e| panic!("failed to decode: {:?}", e));
        assert_eq!(decoded, value, "roundtrip mismatch for {:?}", value);
        assert!(r.is_empty(), "leftover bytes for {:?}", value);
        buf
    }

    #[test]
    fn test_integers() {
        assert_eq!(roundtrip(200u8), vec![200]);
        assert_eq!(roundtrip(true), vec![1]);
        assert_eq!(roundtrip(7usize), vec![7, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(
            roundtrip(0x0102030405060708u64),
            vec![8, 7, 6, 5, 4, 3, 2, 1]
        );
        assert_eq!(roundtrip(-1i64), vec![255u8; 8]);
    }

    #[test]
    fn test_siacoin_output() {
        let output = SiacoinOutput {
            value: Currency::new(300),
            address: Address::new([0xaa; 32]),
        };
        // a 300 H value is two big-endian bytes behind a length prefix,
        // followed by the raw address
        let mut expected = vec![2, 0, 0, 0, 0, 0, 0, 0, 0x01, 0x2c];
        expected.extend_from_slice(&[0xaa; 32]);
        assert_eq!(roundtrip(output), expected);
    }

    #[test]
    fn test_output_vector() {
        let outputs = vec![
            SiacoinOutput {
                value: Currency::new(1),
                address: Address::VOID,
            },
            SiacoinOutput {
                value: Currency::zero(),
                address: Address::VOID,
            },
        ];
        let buf = roundtrip(outputs);
        assert_eq!(&buf[..8], &[2, 0, 0, 0, 0, 0, 0, 0]);
        // 1 H takes a single value byte, a zero value takes none
        assert_eq!(buf.len(), 8 + (8 + 1 + 32) + (8 + 32));
    }

    #[test]
    fn test_option() {
        // a presence byte ahead of the value
        assert_eq!(
            roundtrip(Some(Currency::new(5))),
            vec![1, 1, 0, 0, 0, 0, 0, 0, 0, 5]
        );
        assert_eq!(roundtrip(None::<Currency>), vec![0]);
    }

    #[test]
    fn test_strings_and_bytes() {
        assert_eq!(
            roundtrip("contract".to_string()),
            vec![8, 0, 0, 0, 0, 0, 0, 0, 99, 111, 110, 116, 114, 97, 99, 116]
        );
        assert_eq!(roundtrip(String::new()), vec![0, 0, 0, 0, 0, 0, 0, 0]);
        // fixed-size arrays carry no length prefix
        assert_eq!(roundtrip([0xde, 0xad, 0xbe, 0xef]), vec![0xde, 0xad, 0xbe, 0xef]);
        // nested arbitrary data is prefixed at every level
        assert_eq!(
            roundtrip(vec![vec![9u8], vec![8u8, 7u8]]),
            vec![
                2, 0, 0, 0, 0, 0, 0, 0, // outer length
                1, 0, 0, 0, 0, 0, 0, 0, 9, // first entry
                2, 0, 0, 0, 0, 0, 0, 0, 8, 7, // second entry
            ]
        );
    }

    #[test]
    fn test_decode_rejects_bad_bool() {
        assert!(matches!(
            bool::decode(&mut &[2u8][..]),
            Err(Error::InvalidValue)
        ));
    }
}
