/*
 * The principal record stored under "__krb5_princ__" in a keyring subsidiary.
 *
 * $ keyctl read 106708269
 * 28 bytes of data in key:
 * 00000001 00000001 0000000a 41464f52 4553542e 41440000 00027531
 *                            A F O R  E S T .  A D          u 1
 *
 * version(u32) count(u32) realm_len(u32) realm count*(len(u32) component)
 *
 * Everything is big endian. MIT writes the principal name type in the
 * version slot, we carry it through untouched.
 */

use super::{take_bytes, take_u32};
use crate::error::KrbError;
use binrw::{binwrite, BinWrite};
use std::fmt;
use tracing::error;

#[binwrite]
#[bw(big)]
struct DataComponent {
    #[bw(try_calc(u32::try_from(value.len())))]
    value_len: u32,
    value: Vec<u8>,
}

#[binwrite]
#[bw(big)]
struct PrincipalRecord {
    version: u32,
    #[bw(try_calc(u32::try_from(components.len())))]
    components_count: u32,
    realm: DataComponent,
    components: Vec<DataComponent>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Principal {
    pub version: u32,
    pub realm: String,
    pub components: Vec<Vec<u8>>,
}

impl Principal {
    pub fn new(realm: &str, components: &[&str]) -> Self {
        Principal {
            version: 1,
            realm: realm.to_string(),
            components: components.iter().map(|c| c.as_bytes().to_vec()).collect(),
        }
    }

    /// Decodes one principal record from the front of `input`.
    ///
    /// Returns the principal together with the number of bytes it occupied, so a
    /// caller can carry on decoding whatever follows it.
    pub fn decode(input: &[u8]) -> Result<(Self, usize), KrbError> {
        if input.len() < 12 {
            error!(len = input.len(), "principal record shorter than its header");
            return Err(KrbError::TooShort);
        }

        let mut buf = input;
        let version = take_u32(&mut buf, KrbError::TooShort)?;
        let count = take_u32(&mut buf, KrbError::TooShort)?;
        let realm_len = take_u32(&mut buf, KrbError::TooShort)?;

        let realm = take_bytes(&mut buf, realm_len, KrbError::RealmLengthMismatch)
            .inspect_err(|_| {
                error!(realm_len, remaining = buf.len(), "realm exceeds principal record")
            })?;
        let realm = String::from_utf8_lossy(realm).to_string();

        // The count comes off the wire, so don't trust it for the allocation.
        let mut components = Vec::new();
        for idx in 0..count {
            let item_len = take_u32(&mut buf, KrbError::ItemLengthMismatch).inspect_err(|_| {
                error!(idx, count, "principal component length is truncated")
            })?;
            let item = take_bytes(&mut buf, item_len, KrbError::ItemDataMismatch).inspect_err(
                |_| error!(idx, item_len, remaining = buf.len(), "principal component is truncated"),
            )?;
            components.push(item.to_vec());
        }

        let consumed = input.len() - buf.len();
        Ok((
            Principal {
                version,
                realm,
                components,
            },
            consumed,
        ))
    }

    pub fn encode(&self) -> Result<Vec<u8>, KrbError> {
        let record = PrincipalRecord {
            version: self.version,
            realm: DataComponent {
                value: self.realm.as_bytes().to_vec(),
            },
            components: self
                .components
                .iter()
                .map(|c| DataComponent { value: c.clone() })
                .collect(),
        };

        let mut c = std::io::Cursor::new(Vec::new());
        record.write(&mut c).map_err(|err| {
            error!(principal = ?self, ?err, "Failed to encode principal");
            KrbError::BinRWError
        })?;
        Ok(c.into_inner())
    }

    /// The key name the ticket granting ticket for this principal's realm is stored under.
    pub fn tgt_key_name(&self) -> String {
        format!("krbtgt/{0}@{0}", self.realm)
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name: Vec<_> = self
            .components
            .iter()
            .map(|x| String::from_utf8_lossy(x.as_slice()))
            .collect();
        write!(f, "{}@{}", name.join("/"), self.realm)
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c: Vec<_> = self
            .components
            .iter()
            .map(|x| String::from_utf8_lossy(x.as_slice()))
            .collect();
        f.debug_struct("Principal")
            .field("version", &self.version)
            .field("components", &c)
            .field("realm", &self.realm)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_hex::assert_eq_hex;

    #[test]
    fn test_principal_decode_keyctl_dump() -> Result<(), KrbError> {
        let _ = tracing_subscriber::fmt::try_init();

        let raw = [
            0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x0a, 0x41, 0x46,
            0x4f, 0x52, 0x45, 0x53, 0x54, 0x2e, 0x41, 0x44, 0x00, 0x00, 0x00, 0x02, 0x75, 0x31,
        ];

        let (princ, consumed) = Principal::decode(&raw)?;
        assert_eq!(consumed, raw.len());
        assert_eq!(princ.version, 1);
        assert_eq!(princ.realm, "AFOREST.AD");
        assert_eq!(princ.components, vec![b"u1".to_vec()]);
        assert_eq!(princ.to_string(), "u1@AFOREST.AD");
        assert_eq!(princ.tgt_key_name(), "krbtgt/AFOREST.AD@AFOREST.AD");

        assert_eq_hex!(princ.encode()?, raw.to_vec());
        Ok(())
    }

    #[test]
    fn test_principal_round_trip() -> Result<(), KrbError> {
        let big = vec![0xa5u8; 65535];
        let cases = [
            Principal::new("EXAMPLE.COM", &[]),
            Principal::new("", &["alice"]),
            Principal::new("EXAMPLE.COM", &["HTTP", "www.example.com"]),
            Principal {
                version: 0x0102_0304,
                realm: "R".repeat(65535),
                components: vec![vec![], big, vec![0x00, 0xff]],
            },
        ];

        for princ in cases {
            let bytes = princ.encode()?;
            let (decoded, consumed) = Principal::decode(&bytes)?;
            assert_eq!(decoded, princ);
            assert_eq!(consumed, bytes.len());
        }
        Ok(())
    }

    #[test]
    fn test_principal_decode_reports_consumed_with_trailing_data() -> Result<(), KrbError> {
        let first = Principal::new("EXAMPLE.COM", &["alice"]);
        let second = Principal::new("OTHER.ORG", &["HTTP", "web"]);

        let mut bytes = first.encode()?;
        let first_len = bytes.len();
        bytes.extend(second.encode()?);

        let (decoded, consumed) = Principal::decode(&bytes)?;
        assert_eq!(decoded, first);
        assert_eq!(consumed, first_len);

        let (decoded, _) = Principal::decode(&bytes[consumed..])?;
        assert_eq!(decoded, second);
        Ok(())
    }

    #[test]
    fn test_principal_decode_too_short() {
        let bytes = [0u8; 12];
        for len in 0..12 {
            assert_eq!(Principal::decode(&bytes[..len]), Err(KrbError::TooShort));
        }
    }

    #[test]
    fn test_principal_decode_realm_mismatch() {
        // Realm claims 11 bytes but only 3 follow.
        let bytes = [0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 11, b'A', b'B', b'C'];
        assert_eq!(
            Principal::decode(&bytes),
            Err(KrbError::RealmLengthMismatch)
        );

        // A length that can't fit in any buffer.
        let bytes = [0, 0, 0, 1, 0, 0, 0, 0, 0xff, 0xff, 0xff, 0xff];
        assert_eq!(
            Principal::decode(&bytes),
            Err(KrbError::RealmLengthMismatch)
        );
    }

    #[test]
    fn test_principal_decode_item_mismatch() -> Result<(), KrbError> {
        let bytes = Principal::new("EXAMPLE.COM", &["alice"]).encode()?;

        // Drop the last byte of "alice".
        let truncated = &bytes[..bytes.len() - 1];
        assert_eq!(
            Principal::decode(truncated),
            Err(KrbError::ItemDataMismatch)
        );

        // Keep only two bytes of the component length.
        let truncated = &bytes[..12 + 11 + 2];
        assert_eq!(
            Principal::decode(truncated),
            Err(KrbError::ItemLengthMismatch)
        );

        // Count claims a second component that isn't there.
        let mut extra = bytes.clone();
        extra[7] = 2;
        assert_eq!(Principal::decode(&extra), Err(KrbError::ItemLengthMismatch));

        // Component length larger than the rest of the buffer.
        let mut oversized = bytes;
        oversized[12 + 11..12 + 11 + 4].copy_from_slice(&[0x7f, 0xff, 0xff, 0xff]);
        assert_eq!(
            Principal::decode(&oversized),
            Err(KrbError::ItemDataMismatch)
        );
        Ok(())
    }

    #[test]
    fn test_principal_decode_huge_count_is_bounded() {
        // A hostile count with no components must fail rather than allocate.
        let bytes = [0, 0, 0, 1, 0xff, 0xff, 0xff, 0xff, 0, 0, 0, 0];
        assert_eq!(Principal::decode(&bytes), Err(KrbError::ItemLengthMismatch));
    }
}
