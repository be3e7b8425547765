//! Built-in comparator types

use super::ColumnType;
use crate::error::DecodingError;
use byteorder::{BigEndian, ByteOrder};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Raw bytes, compared lexically
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BytesType(pub Vec<u8>);

impl ColumnType for BytesType {
    const NAME: &'static str = "BytesType";

    fn decode(bytes: &[u8]) -> Result<Self, DecodingError> {
        Ok(Self(bytes.to_vec()))
    }

    fn encode(&self) -> Vec<u8> {
        self.0.clone()
    }
}

impl From<&[u8]> for BytesType {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

/// 7-bit ASCII text
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AsciiType(pub String);

impl ColumnType for AsciiType {
    const NAME: &'static str = "AsciiType";

    fn decode(bytes: &[u8]) -> Result<Self, DecodingError> {
        if let Some(offset) = bytes.iter().position(|b| !b.is_ascii()) {
            return Err(DecodingError::NonAscii {
                type_name: Self::NAME,
                offset,
            });
        }
        // All bytes are ASCII, so this is valid UTF-8
        Ok(Self(bytes.iter().map(|&b| char::from(b)).collect()))
    }

    fn encode(&self) -> Vec<u8> {
        self.0.as_bytes().to_vec()
    }
}

/// UTF-8 text
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Utf8Type(pub String);

impl ColumnType for Utf8Type {
    const NAME: &'static str = "UTF8Type";

    fn decode(bytes: &[u8]) -> Result<Self, DecodingError> {
        std::str::from_utf8(bytes)
            .map(|text| Self(text.to_string()))
            .map_err(|_| DecodingError::InvalidUtf8 {
                type_name: Self::NAME,
            })
    }

    fn encode(&self) -> Vec<u8> {
        self.0.as_bytes().to_vec()
    }
}

impl From<&str> for Utf8Type {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl fmt::Display for Utf8Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Signed 64-bit integer, fixed 8-byte big-endian
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LongType(pub i64);

impl ColumnType for LongType {
    const NAME: &'static str = "LongType";

    fn decode(bytes: &[u8]) -> Result<Self, DecodingError> {
        if bytes.len() != 8 {
            return Err(DecodingError::invalid_length(Self::NAME, 8, bytes.len()));
        }
        Ok(Self(BigEndian::read_i64(bytes)))
    }

    fn encode(&self) -> Vec<u8> {
        let mut buf = [0u8; 8];
        BigEndian::write_i64(&mut buf, self.0);
        buf.to_vec()
    }
}

impl From<i64> for LongType {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Variable-length big-endian two's complement integer (1 to 8 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IntegerType(pub i64);

impl IntegerType {
    /// Smallest byte width that holds the value
    fn width(value: i64) -> usize {
        (1..8)
            .find(|&n| {
                let bound = 1i128 << (8 * n - 1);
                (-bound..bound).contains(&i128::from(value))
            })
            .unwrap_or(8)
    }
}

impl ColumnType for IntegerType {
    const NAME: &'static str = "IntegerType";

    fn decode(bytes: &[u8]) -> Result<Self, DecodingError> {
        if bytes.is_empty() || bytes.len() > 8 {
            return Err(DecodingError::invalid_length(Self::NAME, "1..=8", bytes.len()));
        }
        Ok(Self(BigEndian::read_int(bytes, bytes.len())))
    }

    fn encode(&self) -> Vec<u8> {
        let width = Self::width(self.0);
        let mut buf = vec![0u8; width];
        BigEndian::write_int(&mut buf, self.0, width);
        buf
    }
}

/// 16-byte UUID compared by its bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LexicalUuidType(pub Uuid);

impl ColumnType for LexicalUuidType {
    const NAME: &'static str = "LexicalUUIDType";

    fn decode(bytes: &[u8]) -> Result<Self, DecodingError> {
        Uuid::from_slice(bytes)
            .map(Self)
            .map_err(|_| DecodingError::invalid_length(Self::NAME, 16, bytes.len()))
    }

    fn encode(&self) -> Vec<u8> {
        self.0.as_bytes().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_passthrough() {
        let value = BytesType::decode(&[0, 1, 255]).unwrap();
        assert_eq!(value, BytesType(vec![0, 1, 255]));
        assert_eq!(value.encode(), vec![0, 1, 255]);
    }

    #[test]
    fn test_ascii_rejects_high_bytes() {
        assert_eq!(AsciiType::decode(b"name").unwrap(), AsciiType("name".into()));
        assert_eq!(
            AsciiType::decode(&[b'a', 0xc3, 0xa9]).unwrap_err(),
            DecodingError::NonAscii {
                type_name: "AsciiType",
                offset: 1
            }
        );
    }

    #[test]
    fn test_utf8_decode() {
        assert_eq!(Utf8Type::decode("héllo".as_bytes()).unwrap(), Utf8Type::from("héllo"));
        assert!(matches!(
            Utf8Type::decode(&[0xff, 0xfe]),
            Err(DecodingError::InvalidUtf8 { type_name: "UTF8Type" })
        ));
    }

    #[test]
    fn test_long_requires_eight_bytes() {
        assert_eq!(LongType::decode(&LongType(-42).encode()).unwrap(), LongType(-42));
        assert_eq!(
            LongType::decode(&[0, 1, 2]).unwrap_err(),
            DecodingError::invalid_length("LongType", 8, 3)
        );
    }

    #[test]
    fn test_long_ordering_is_numeric() {
        let mut values = vec![LongType(10), LongType(-3), LongType(7)];
        values.sort();
        assert_eq!(values, vec![LongType(-3), LongType(7), LongType(10)]);
    }

    #[test]
    fn test_integer_minimal_width() {
        assert_eq!(IntegerType(0).encode(), vec![0x00]);
        assert_eq!(IntegerType(127).encode(), vec![0x7f]);
        assert_eq!(IntegerType(128).encode(), vec![0x00, 0x80]);
        assert_eq!(IntegerType(-1).encode(), vec![0xff]);
        assert_eq!(IntegerType(-129).encode(), vec![0xff, 0x7f]);
        assert_eq!(IntegerType(i64::MIN).encode().len(), 8);
    }

    #[test]
    fn test_integer_sign_extends() {
        assert_eq!(IntegerType::decode(&[0xff, 0x7f]).unwrap(), IntegerType(-129));
        assert_eq!(IntegerType::decode(&[0x00, 0x80]).unwrap(), IntegerType(128));
        assert!(IntegerType::decode(&[]).is_err());
        assert!(IntegerType::decode(&[0; 9]).is_err());
    }

    #[test]
    fn test_uuid_requires_sixteen_bytes() {
        let id = Uuid::from_u128(0x1234_5678_9abc_def0_1234_5678_9abc_def0);
        assert_eq!(
            LexicalUuidType::decode(&LexicalUuidType(id).encode()).unwrap(),
            LexicalUuidType(id)
        );
        assert_eq!(
            LexicalUuidType::decode(&[1; 4]).unwrap_err(),
            DecodingError::invalid_length("LexicalUUIDType", 16, 4)
        );
    }
}
