//! End-to-end conformance checks against the embedded catalog.
//!
//! Each standard ships the ABI it was built from, so these tests score the
//! catalog's own ABIs against one another.

use eip_solver::parsing::abi::parse_abi_text;
use eip_solver::{
    Codec, ConfidenceLevel, ConformanceEngine, ContractInterface, Discovery, MatchingConfig,
    OutputMatching, StandardCatalog, StandardId,
};

fn catalog() -> StandardCatalog {
    StandardCatalog::load_embedded().expect("embedded catalog loads")
}

fn standard_abi(catalog: &StandardCatalog, id: &str) -> ContractInterface {
    let standard = catalog
        .get(&StandardId::new(id))
        .unwrap_or_else(|| panic!("{id} is in the catalog"));
    parse_abi_text(id, standard.abi()).expect("catalog ABI parses")
}

fn check(catalog: &StandardCatalog, id: &str, contract: &ContractInterface) -> Discovery {
    let engine = ConformanceEngine::new(catalog);
    let (discovery, _) = engine
        .check(&StandardId::new(id), contract)
        .expect("standard exists");
    discovery
}

#[test]
fn test_embedded_catalog_maximum_tokens() {
    let catalog = catalog();
    let expected = [
        ("ERC20", 68),
        ("ERC721", 90),
        ("ERC1155", 115),
        ("ERC1820", 67),
        ("ERC1822", 29),
        ("ERC1967", 67),
        ("OZOWNABLE", 26),
    ];
    assert_eq!(catalog.len(), expected.len());
    for (id, tokens) in expected {
        let standard = catalog.get(&StandardId::new(id)).unwrap();
        assert_eq!(standard.token_count(), tokens, "maximum tokens of {id}");
    }
}

#[test]
fn test_erc20_abi_is_perfect_erc20() {
    let catalog = catalog();
    let contract = standard_abi(&catalog, "ERC20");

    let discovery = check(&catalog, "ERC20", &contract);
    assert_eq!(discovery.discovered_tokens, 68);
    assert_eq!(discovery.maximum_tokens, 68);
    assert_eq!(discovery.confidence, ConfidenceLevel::Perfect);
    assert!(discovery.missing_signatures().is_empty());
}

#[test]
fn test_erc20_abi_against_other_token_standards() {
    let catalog = catalog();
    let contract = standard_abi(&catalog, "ERC20");

    let erc721 = check(&catalog, "ERC721", &contract);
    assert_eq!(erc721.discovered_tokens, 52);
    assert_eq!(erc721.confidence, ConfidenceLevel::Medium);

    let erc1155 = check(&catalog, "ERC1155", &contract);
    assert_eq!(erc1155.discovered_tokens, 9);
    assert_eq!(erc1155.confidence, ConfidenceLevel::No);
}

#[test]
fn test_erc721_abi_against_token_standards() {
    let catalog = catalog();
    let contract = standard_abi(&catalog, "ERC721");

    assert_eq!(check(&catalog, "ERC721", &contract).discovered_tokens, 90);

    let erc20 = check(&catalog, "ERC20", &contract);
    assert_eq!(erc20.discovered_tokens, 46);
    assert_eq!(erc20.confidence, ConfidenceLevel::Medium);

    let erc1155 = check(&catalog, "ERC1155", &contract);
    assert_eq!(erc1155.discovered_tokens, 51);
    assert_eq!(erc1155.confidence, ConfidenceLevel::Low);
}

#[test]
fn test_every_standard_is_perfect_against_itself() {
    let catalog = catalog();
    for standard in catalog.list() {
        for mode in [OutputMatching::Compatible, OutputMatching::Strict] {
            let engine = ConformanceEngine::with_config(
                &catalog,
                MatchingConfig {
                    output_matching: mode,
                    ..MatchingConfig::default()
                },
            );
            let (discovery, found) = engine
                .check(&standard.id, &standard.as_interface())
                .unwrap();
            assert!(found);
            assert_eq!(
                discovery.confidence,
                ConfidenceLevel::Perfect,
                "{} in {mode:?} mode",
                standard.id
            );
        }
    }
}

#[test]
fn test_check_all_filters_by_minimum_confidence() {
    let catalog = catalog();
    let contract = standard_abi(&catalog, "ERC20");
    let engine = ConformanceEngine::with_config(
        &catalog,
        MatchingConfig {
            min_confidence: ConfidenceLevel::Low,
            ..MatchingConfig::default()
        },
    );

    let discoveries = engine.check_all(&contract);
    let ids: Vec<&str> = discoveries.iter().map(|d| d.standard.as_str()).collect();
    assert!(ids.contains(&"ERC20"));
    assert!(ids.contains(&"ERC721"));
    assert!(!ids.contains(&"ERC1155"));
    assert!(discoveries
        .iter()
        .all(|d| d.confidence >= ConfidenceLevel::Low));
}

#[test]
fn test_check_all_reports_every_standard_by_default() {
    let catalog = catalog();
    let engine = ConformanceEngine::new(&catalog);
    let discoveries = engine.check_all(&ContractInterface::new("empty"));

    assert_eq!(discoveries.len(), catalog.len());
    for d in &discoveries {
        assert_eq!(d.discovered_tokens, 0);
        assert_eq!(d.confidence, ConfidenceLevel::No);
        assert!(!d.is_found());
    }
}

#[test]
fn test_concurrent_checks_share_one_catalog() {
    let catalog = catalog();
    let contracts: Vec<ContractInterface> = ["ERC20", "ERC721", "ERC1155"]
        .iter()
        .map(|id| standard_abi(&catalog, id))
        .collect();
    let engine = ConformanceEngine::new(&catalog);
    let sequential: Vec<Vec<Discovery>> = contracts.iter().map(|c| engine.check_all(c)).collect();

    let parallel: Vec<Vec<Discovery>> = std::thread::scope(|scope| {
        let handles: Vec<_> = contracts
            .iter()
            .map(|contract| {
                let catalog = &catalog;
                scope.spawn(move || ConformanceEngine::new(catalog).check_all(contract))
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, parallel);
}

#[test]
fn test_encodings_agree() {
    let catalog = catalog();
    let contract = standard_abi(&catalog, "ERC721");
    let discovery = check(&catalog, "ERC20", &contract);

    let from_json = Discovery::from_json(&discovery.to_json().unwrap()).unwrap();
    let from_bytes = Discovery::from_bytes(&discovery.to_bytes().unwrap()).unwrap();
    assert_eq!(from_json, discovery);
    assert_eq!(from_bytes, from_json);
}

#[test]
fn test_function_check_against_catalog() {
    let catalog = catalog();
    let contract = standard_abi(&catalog, "ERC20");
    let engine = ConformanceEngine::new(&catalog);
    let transfer = contract.function("transfer").unwrap();

    let (discovery, found) = engine
        .check_function(&StandardId::new("ERC20"), transfer)
        .unwrap();
    assert!(found);
    assert_eq!(discovery.maximum_tokens, 9);
    assert_eq!(discovery.discovered_tokens, 9);
    assert_eq!(discovery.confidence, ConfidenceLevel::Perfect);
}
