//! Wallet connect configuration and account display.

#[cfg(test)]
#[path = "wallet_test.rs"]
mod wallet_test;

pub const APP_NAME: &str = "NicheNet";
pub const DEFAULT_PROJECT_ID: &str = "9f4bd472c01ba49282b42e5e1874c2af";

/// An EVM chain the connect button offers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chain {
    pub id: u64,
    pub name: &'static str,
    pub rpc_url: &'static str,
}

pub const MAINNET: Chain = Chain { id: 1, name: "Ethereum", rpc_url: "https://cloudflare-eth.com" };
pub const POLYGON: Chain = Chain { id: 137, name: "Polygon", rpc_url: "https://polygon-rpc.com" };
pub const OPTIMISM: Chain = Chain { id: 10, name: "OP Mainnet", rpc_url: "https://mainnet.optimism.io" };
pub const ARBITRUM: Chain = Chain { id: 42_161, name: "Arbitrum One", rpc_url: "https://arb1.arbitrum.io/rpc" };
pub const BASE: Chain = Chain { id: 8_453, name: "Base", rpc_url: "https://mainnet.base.org" };

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalletConfig {
    pub app_name: &'static str,
    pub project_id: String,
    pub chains: Vec<Chain>,
}

impl WalletConfig {
    /// Default chain set; `project_id` falls back to the app's registered id.
    #[must_use]
    pub fn new(project_id: Option<&str>) -> Self {
        let project_id = project_id
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_PROJECT_ID)
            .to_owned();
        Self {
            app_name: APP_NAME,
            project_id,
            chains: vec![MAINNET, POLYGON, OPTIMISM, ARBITRUM, BASE],
        }
    }

    /// One of the offered chains, `None` for anything else.
    #[must_use]
    pub fn chain(&self, id: u64) -> Option<&Chain> {
        self.chains.iter().find(|c| c.id == id)
    }
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Provider-reported chain id, decimal or `0x` hex.
#[must_use]
pub fn parse_chain_id(reported: &str) -> Option<u64> {
    let trimmed = reported.trim();
    match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).ok(),
        None => trimmed.parse().ok(),
    }
}

/// `0x1234…abcd`; short or non-hex input is returned unchanged.
#[must_use]
pub fn shorten_address(address: &str) -> String {
    if address.len() <= 10 || !address.is_ascii() {
        return address.to_owned();
    }
    format!("{}…{}", &address[..6], &address[address.len() - 4..])
}

/// State of the connect button.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum WalletState {
    #[default]
    Disconnected,
    Connecting,
    Connected { address: String, chain_id: Option<u64> },
    NoProvider,
    Error(String),
}

impl WalletState {
    #[must_use]
    pub fn label(&self, config: &WalletConfig) -> String {
        match self {
            Self::Disconnected => "Connect Wallet".to_owned(),
            Self::Connecting => "Connecting...".to_owned(),
            Self::Connected { address, chain_id } => {
                let chain = chain_id
                    .and_then(|id| config.chain(id))
                    .map(|c| format!(" · {}", c.name))
                    .unwrap_or_default();
                format!("{}{chain}", shorten_address(address))
            }
            Self::NoProvider => "No wallet detected".to_owned(),
            Self::Error(_) => "Connection failed".to_owned(),
        }
    }
}
