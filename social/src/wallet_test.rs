use super::*;

#[test]
fn default_config_lists_five_chains() {
    let config = WalletConfig::default();
    let ids: Vec<u64> = config.chains.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 137, 10, 42_161, 8_453]);
    assert_eq!(config.app_name, "NicheNet");
    assert_eq!(config.project_id, DEFAULT_PROJECT_ID);
}

#[test]
fn project_id_override() {
    assert_eq!(WalletConfig::new(Some("abc")).project_id, "abc");
    assert_eq!(WalletConfig::new(Some(" ")).project_id, DEFAULT_PROJECT_ID);
}

#[test]
fn reported_chain_ids_resolve_to_offered_chains() {
    let config = WalletConfig::default();
    let name = |reported: &str| parse_chain_id(reported).and_then(|id| config.chain(id)).map(|c| c.name);
    assert_eq!(name("0x89"), Some("Polygon"));
    assert_eq!(name("8453"), Some("Base"));
    assert_eq!(name("0xa4b1"), Some("Arbitrum One"));
    assert_eq!(name("0x5"), None);
    assert_eq!(parse_chain_id("zz"), None);
}

#[test]
fn shorten_address_keeps_prefix_and_suffix() {
    assert_eq!(shorten_address("0x1234567890abcdef1234567890abcdef12345678"), "0x1234…5678");
    assert_eq!(shorten_address("0x1234"), "0x1234");
}

#[test]
fn labels_per_state() {
    let config = WalletConfig::default();
    assert_eq!(WalletState::Disconnected.label(&config), "Connect Wallet");
    assert_eq!(WalletState::NoProvider.label(&config), "No wallet detected");
    let connected = WalletState::Connected {
        address: "0xabcdef0000000000000000000000000000001234".to_owned(),
        chain_id: Some(1),
    };
    assert_eq!(connected.label(&config), "0xabcd…1234 · Ethereum");
    let unknown_chain = WalletState::Connected {
        address: "0xabcdef0000000000000000000000000000001234".to_owned(),
        chain_id: Some(5),
    };
    assert_eq!(unknown_chain.label(&config), "0xabcd…1234");
}
