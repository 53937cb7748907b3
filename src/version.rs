use std::fmt;
use std::str::FromStr;

use crate::error::MaruError;

/// MarU report release version. Report files released on or after
/// 2025-03-04 use `V20250304`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaruVersion {
    V20241128,
    V20250304,
}

impl MaruVersion {
    pub const ALL: [MaruVersion; 2] = [MaruVersion::V20241128, MaruVersion::V20250304];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V20241128 => "20241128",
            Self::V20250304 => "20250304",
        }
    }

    /// Comma-separated, quoted list of every valid tag, for diagnostics.
    pub fn valid_values() -> String {
        Self::ALL
            .iter()
            .map(|v| format!("\"{}\"", v.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for MaruVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MaruVersion {
    type Err = MaruError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == s.trim())
            .ok_or_else(|| MaruError::UnsupportedVersion {
                given: s.to_string(),
                valid: Self::valid_values(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_tags() {
        assert_eq!("20241128".parse::<MaruVersion>().unwrap(), MaruVersion::V20241128);
        assert_eq!("20250304".parse::<MaruVersion>().unwrap(), MaruVersion::V20250304);
    }

    #[test]
    fn unknown_tag_names_valid_set() {
        let err = "20230101".parse::<MaruVersion>().unwrap_err();
        let msg = err.to_string();
        assert!(matches!(err, MaruError::UnsupportedVersion { .. }));
        assert!(msg.contains("20241128"));
        assert!(msg.contains("20250304"));
    }

    #[test]
    fn display_round_trips() {
        for v in MaruVersion::ALL {
            assert_eq!(v.to_string().parse::<MaruVersion>().unwrap(), v);
        }
    }
}
