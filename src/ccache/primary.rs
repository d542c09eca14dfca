/*
 * The "krb_ccache:primary" key in a collection names the subsidiary that
 * holds the active credentials.
 *
 * $ keyctl read 557625224
 * 11 bytes of data in key:
 * 00000001 00000003 666f6f
 *                   f o o
 */

use super::{take_bytes, take_u32};
use crate::error::KrbError;
use binrw::{binwrite, BinWrite};
use tracing::error;

#[binwrite]
#[bw(big)]
struct PrimaryNameRecord {
    version: u32,
    #[bw(try_calc(u32::try_from(strval.len())))]
    strlen: u32,
    strval: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimaryName {
    pub version: u32,
    pub name: String,
}

impl PrimaryName {
    pub fn new(name: &str) -> Self {
        PrimaryName {
            version: 1,
            name: name.to_string(),
        }
    }

    pub fn decode(input: &[u8]) -> Result<Self, KrbError> {
        if input.len() < 8 {
            error!(len = input.len(), "primary name record shorter than its header");
            return Err(KrbError::TooShort);
        }

        let mut buf = input;
        let version = take_u32(&mut buf, KrbError::TooShort)?;
        let strlen = take_u32(&mut buf, KrbError::TooShort)?;
        let strval = take_bytes(&mut buf, strlen, KrbError::LengthMismatch).inspect_err(|_| {
            error!(strlen, remaining = buf.len(), "primary name exceeds record")
        })?;

        Ok(PrimaryName {
            version,
            name: String::from_utf8_lossy(strval).to_string(),
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>, KrbError> {
        let record = PrimaryNameRecord {
            version: self.version,
            strval: self.name.as_bytes().to_vec(),
        };
        let mut c = std::io::Cursor::new(Vec::new());
        record.write(&mut c).map_err(|err| {
            error!(name = ?self.name, ?err, "Failed to encode primary name");
            KrbError::BinRWError
        })?;
        Ok(c.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_hex::assert_eq_hex;

    #[test]
    fn test_primary_name_decode() -> Result<(), KrbError> {
        let raw = [0, 0, 0, 1, 0, 0, 0, 5, b'a', b'l', b'p', b'h', b'a'];
        let pn = PrimaryName::decode(&raw)?;
        assert_eq!(pn.name, "alpha");
        assert_eq!(pn.version, 1);
        assert_eq_hex!(pn.encode()?, raw.to_vec());
        Ok(())
    }

    #[test]
    fn test_primary_name_decode_too_short() {
        let raw = [0, 0, 0, 1, 0, 0];
        assert_eq!(PrimaryName::decode(&raw), Err(KrbError::TooShort));
        assert_eq!(PrimaryName::decode(&[]), Err(KrbError::TooShort));
    }

    #[test]
    fn test_primary_name_decode_length_mismatch() {
        let raw = [0, 0, 0, 1, 0, 0, 0, 6, b'f', b'o', b'o'];
        assert_eq!(PrimaryName::decode(&raw), Err(KrbError::LengthMismatch));
    }

    #[test]
    fn test_primary_name_edge_lengths() -> Result<(), KrbError> {
        // An empty name is passed through, opening it is the caller's problem.
        let pn = PrimaryName::decode(&[0, 0, 0, 1, 0, 0, 0, 0])?;
        assert_eq!(pn.name, "");

        // Bytes past the declared length are not part of the name.
        let pn = PrimaryName::decode(&[0, 0, 0, 2, 0, 0, 0, 3, b'f', b'o', b'o', 0, 0])?;
        assert_eq!(pn, PrimaryName { version: 2, name: "foo".to_string() });
        Ok(())
    }
}
