use std::collections::HashSet;
use std::path::Path;

const CATALOG_PATH: &str = "catalogs/standards.json";

fn main() {
    let catalog_path = Path::new(CATALOG_PATH);
    validate_catalog_file(catalog_path);
    set_build_dependencies();
}

fn validate_catalog_file(catalog_path: &Path) {
    // Ensure catalog exists at build time
    assert!(
        catalog_path.exists(),
        "\n\nCATALOG BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the catalog file before building.\n",
        catalog_path.display()
    );

    // Read catalog file
    let catalog_contents = std::fs::read_to_string(catalog_path).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            catalog_path.display()
        );
    });

    // Parse and validate JSON
    let catalog: serde_json::Value = serde_json::from_str(&catalog_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            catalog_path.display()
        );
    });

    validate_catalog_structure(&catalog);
}

fn validate_catalog_structure(catalog: &serde_json::Value) {
    // Validate structure
    assert!(
        catalog.is_object(),
        "\n\nCATALOG BUILD ERROR: Root must be a JSON object\n\
         Got: {catalog}\n"
    );

    let standards = catalog.get("standards").unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: Missing 'standards' field\n\
             The catalog must have a top-level 'standards' array.\n"
        );
    });

    let standards = standards.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nCATALOG BUILD ERROR: 'standards' must be an array\n\
             Got: {standards}\n"
        );
    });

    // Validate each standard
    let total_signatures = validate_standards(standards);

    println!(
        "cargo:warning=Validated catalog: {} standards, {total_signatures} total signatures",
        standards.len()
    );
}

fn validate_standards(standards: &[serde_json::Value]) -> usize {
    let mut seen_ids = HashSet::new();
    let mut total_signatures = 0;

    for (i, standard) in standards.iter().enumerate() {
        let id = standard
            .get("id")
            .and_then(|v| v.as_str())
            .unwrap_or("<unknown>");

        validate_standard_fields(standard, id, i);
        assert!(
            seen_ids.insert(id.to_string()),
            "\n\nCATALOG BUILD ERROR: Duplicate standard id '{id}' (index {i})\n"
        );
        total_signatures += validate_signatures(standard, id);
    }

    total_signatures
}

fn validate_standard_fields(standard: &serde_json::Value, id: &str, index: usize) {
    assert!(
        standard.get("id").and_then(|v| v.as_str()).is_some(),
        "\n\nCATALOG BUILD ERROR: Standard at index {index} missing 'id' field\n"
    );
    assert!(
        standard.get("name").and_then(|v| v.as_str()).is_some(),
        "\n\nCATALOG BUILD ERROR: Standard '{id}' (index {index}) missing 'name' field\n"
    );

    if let Some(abi) = standard.get("abi").and_then(|v| v.as_str()) {
        let parsed: Result<serde_json::Value, _> = serde_json::from_str(abi);
        assert!(
            parsed.is_ok_and(|v| v.is_array()),
            "\n\nCATALOG BUILD ERROR: Standard '{id}' has an 'abi' that is not a JSON array\n"
        );
    }
}

fn validate_signatures(standard: &serde_json::Value, id: &str) -> usize {
    let mut total = 0;
    for kind in ["functions", "events"] {
        if let Some(signatures) = standard.get(kind).and_then(|c| c.as_array()) {
            for (j, signature) in signatures.iter().enumerate() {
                validate_signature_fields(signature, id, kind, j);
            }
            total += signatures.len();
        }
    }

    assert!(
        total > 0,
        "\n\nCATALOG BUILD ERROR: Standard '{id}' declares no functions or events\n\
         A standard must have at least one signature to score against.\n"
    );
    total
}

fn validate_signature_fields(signature: &serde_json::Value, id: &str, kind: &str, index: usize) {
    let name = signature
        .get("name")
        .and_then(|v| v.as_str())
        .unwrap_or("");

    assert!(
        !name.is_empty(),
        "\n\nCATALOG BUILD ERROR: Standard '{id}' {kind} {index} missing 'name' field\n"
    );

    for slot in ["inputs", "outputs"] {
        let params = signature
            .get(slot)
            .and_then(|v| v.as_array())
            .map_or(&[][..], Vec::as_slice);
        for (k, param) in params.iter().enumerate() {
            assert!(
                param
                    .get("type")
                    .and_then(|v| v.as_str())
                    .is_some_and(|t| !t.is_empty()),
                "\n\nCATALOG BUILD ERROR: Standard '{id}' {kind} '{name}' {slot} {k} missing 'type' field\n"
            );
        }
    }
}

fn set_build_dependencies() {
    // Tell cargo to rerun if catalog changes
    println!("cargo:rerun-if-changed={CATALOG_PATH}");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
