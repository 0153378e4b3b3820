//! Human-readable size formatting and parsing utilities

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseSizeError {
    #[error("empty size string")]
    Empty,

    #[error("invalid number: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),

    #[error("invalid unit: {0}")]
    InvalidUnit(String),
}

/// Byte size wrapper with human-readable parsing ("5MB", "1GB")
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct ByteSize(pub u64);

const UNITS: &[(u64, &str)] = &[
    (1 << 40, "TB"),
    (1 << 30, "GB"),
    (1 << 20, "MB"),
    (1 << 10, "KB"),
];

impl ByteSize {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

fn unit_multiplier(unit: &str) -> Option<u64> {
    match unit {
        "" | "B" => Some(1),
        "KB" => Some(1 << 10),
        "MB" => Some(1 << 20),
        "GB" => Some(1 << 30),
        "TB" => Some(1 << 40),
        _ => None,
    }
}

impl FromStr for ByteSize {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseSizeError::Empty);
        }

        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(s.len());
        let (digits, unit) = s.split_at(split);
        let value: u64 = digits.parse()?;

        let unit = unit.trim().to_ascii_uppercase();
        let multiplier = unit_multiplier(&unit)
            .ok_or_else(|| ParseSizeError::InvalidUnit(unit.clone()))?;

        Ok(ByteSize(value * multiplier))
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &(divisor, unit) in UNITS {
            if self.0 >= divisor {
                let whole = self.0 / divisor;
                let tenths = (self.0 % divisor) * 10 / divisor;
                if tenths > 0 {
                    return write!(f, "{whole}.{tenths}{unit}");
                }
                return write!(f, "{whole}{unit}");
            }
        }
        write!(f, "{}B", self.0)
    }
}

impl<'de> serde::Deserialize<'de> for ByteSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct ByteSizeVisitor;

        impl serde::de::Visitor<'_> for ByteSizeVisitor {
            type Value = ByteSize;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter
                    .write_str("a byte size as string (e.g. \"5MB\", \"1GB\") or integer")
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(ByteSize(v))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                u64::try_from(v)
                    .map(ByteSize)
                    .map_err(|_| E::custom("byte size cannot be negative"))
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(ByteSizeVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_units() {
        assert_eq!("500".parse::<ByteSize>().unwrap().as_u64(), 500);
        assert_eq!("500B".parse::<ByteSize>().unwrap().as_u64(), 500);
        assert_eq!("5MB".parse::<ByteSize>().unwrap().as_u64(), 5 * 1024 * 1024);
        assert_eq!("1GB".parse::<ByteSize>().unwrap().as_u64(), 1 << 30);
        assert_eq!("2 TB".parse::<ByteSize>().unwrap().as_u64(), 2 << 40);
        assert_eq!("8gb".parse::<ByteSize>().unwrap().as_u64(), 8u64 << 30);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!("".parse::<ByteSize>(), Err(ParseSizeError::Empty)));
        assert!(matches!(
            "MB".parse::<ByteSize>(),
            Err(ParseSizeError::InvalidNumber(_))
        ));
        assert!(matches!(
            "5XB".parse::<ByteSize>(),
            Err(ParseSizeError::InvalidUnit(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(ByteSize(512).to_string(), "512B");
        assert_eq!(ByteSize(5 * 1024 * 1024).to_string(), "5MB");
        assert_eq!(ByteSize(1536).to_string(), "1.5KB");
        assert_eq!(ByteSize(8u64 << 30).to_string(), "8GB");
    }

    #[test]
    fn test_display_parse_roundtrip() {
        for size in ["5MB", "1GB", "8GB", "512B"] {
            let parsed: ByteSize = size.parse().unwrap();
            assert_eq!(parsed.to_string(), size);
        }
    }

    #[test]
    fn test_deserialize_string_or_integer() {
        let from_str: ByteSize = serde_json::from_str("\"5MB\"").unwrap();
        assert_eq!(from_str.as_u64(), 5 * 1024 * 1024);

        let from_int: ByteSize = serde_json::from_str("1048576").unwrap();
        assert_eq!(from_int.as_u64(), 1024 * 1024);
    }
}
