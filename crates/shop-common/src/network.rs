//! Networks and their API hosts

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Network the app is running against
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Production
    #[default]
    Livenet,
    /// Test environment
    Testnet,
}

impl Network {
    /// Base URL of the account and shop APIs for this network
    pub fn base_url(&self) -> &'static str {
        match self {
            Network::Livenet => "https://bitpay.com",
            Network::Testnet => "https://test.bitpay.com",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Livenet => write!(f, "livenet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "livenet" | "mainnet" => Ok(Network::Livenet),
            "testnet" => Ok(Network::Testnet),
            _ => Err(format!("Unknown network: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_from_str() {
        assert_eq!(Network::from_str("livenet"), Ok(Network::Livenet));
        assert_eq!(Network::from_str("MAINNET"), Ok(Network::Livenet));
        assert_eq!(Network::from_str("testnet"), Ok(Network::Testnet));
        assert!(Network::from_str("regtest").is_err());
    }

    #[test]
    fn test_base_url() {
        assert_eq!(Network::Testnet.base_url(), "https://test.bitpay.com");
    }
}
