//! Hedera networks known to HashScan.
//!
//! The table is plain `const` data; lookups never allocate except for the
//! fallback descriptor returned for chains that aren't listed.

use std::fmt;

pub const MAINNET_CHAIN_ID: u64 = 295;
pub const TESTNET_CHAIN_ID: u64 = 296;
pub const PREVIEWNET_CHAIN_ID: u64 = 297;
pub const LOCAL_CHAIN_ID: u64 = 298;

/// Verification service used when nothing more specific is known.
pub const DEFAULT_API_URL: &str = "https://server-verify.hashscan.io";

pub const UNKNOWN_NETWORK_NAME: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkDescriptor {
    pub chain_id: u64,
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub api_url: &'static str,
    pub explorer_base_url: Option<&'static str>,
}

pub const NETWORKS: [NetworkDescriptor; 4] = [
    NetworkDescriptor {
        chain_id: MAINNET_CHAIN_ID,
        name: "mainnet",
        aliases: &["mainnet", "hedera_mainnet"],
        api_url: DEFAULT_API_URL,
        explorer_base_url: Some("https://hashscan.io/mainnet"),
    },
    NetworkDescriptor {
        chain_id: TESTNET_CHAIN_ID,
        name: "testnet",
        aliases: &["testnet", "hedera_testnet"],
        api_url: DEFAULT_API_URL,
        explorer_base_url: Some("https://hashscan.io/testnet"),
    },
    NetworkDescriptor {
        chain_id: PREVIEWNET_CHAIN_ID,
        name: "previewnet",
        aliases: &["previewnet", "hedera_previewnet"],
        api_url: DEFAULT_API_URL,
        explorer_base_url: Some("https://hashscan.io/previewnet"),
    },
    NetworkDescriptor {
        chain_id: LOCAL_CHAIN_ID,
        name: "local",
        aliases: &["local", "hedera_local", "localhost"],
        api_url: "http://localhost:8080",
        explorer_base_url: Some("http://localhost:8080/local"),
    },
];

impl NetworkDescriptor {
    const fn unknown(chain_id: u64) -> Self {
        Self {
            chain_id,
            name: UNKNOWN_NETWORK_NAME,
            aliases: &[],
            api_url: DEFAULT_API_URL,
            explorer_base_url: None,
        }
    }

    pub fn is_known(&self) -> bool {
        is_known(self.chain_id)
    }

    /// Explorer page of `address` on this network, if the network has one.
    pub fn explorer_url(&self, address: impl fmt::Display) -> Option<String> {
        self.explorer_base_url
            .map(|base| format!("{base}/contract/{address}"))
    }
}

impl fmt::Display for NetworkDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.chain_id)
    }
}

/// Descriptor for `chain_id`, or an "unknown" one pointing at the
/// default verification service.
pub fn lookup(chain_id: u64) -> NetworkDescriptor {
    NETWORKS
        .iter()
        .find(|network| network.chain_id == chain_id)
        .copied()
        .unwrap_or(NetworkDescriptor::unknown(chain_id))
}

pub fn is_known(chain_id: u64) -> bool {
    NETWORKS.iter().any(|network| network.chain_id == chain_id)
}

pub fn resolve_explorer_url(
    descriptor: &NetworkDescriptor,
    address: impl fmt::Display,
) -> Option<String> {
    descriptor.explorer_url(address)
}

/// Case-sensitive lookup by any of the network's aliases.
pub fn find_by_alias(alias: &str) -> Option<NetworkDescriptor> {
    NETWORKS
        .iter()
        .find(|network| network.aliases.contains(&alias))
        .copied()
}

pub fn known_aliases() -> impl Iterator<Item = &'static str> {
    NETWORKS.iter().flat_map(|network| network.aliases.iter().copied())
}
