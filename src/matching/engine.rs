use std::collections::HashSet;

use crate::catalog::store::{CatalogError, StandardCatalog};
use crate::core::interface::ContractInterface;
use crate::core::signature::Signature;
use crate::core::standard::Standard;
use crate::core::types::{ConfidenceLevel, StandardId};
use crate::matching::discovery::{Discovery, FunctionDiscovery};
use crate::matching::scoring::{match_event, match_function, OutputMatching, SignatureMatch};

/// Configuration for the conformance engine
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchingConfig {
    /// Lowest tier kept by [`ConformanceEngine::check_all`]
    pub min_confidence: ConfidenceLevel,
    /// How output slots are scored
    pub output_matching: OutputMatching,
}

type Matcher = fn(&Signature, &Signature, OutputMatching) -> Option<SignatureMatch>;

/// Reconstruct each declared signature from the first same-named candidate.
///
/// A candidate name is consumed by its first match, so a repeated name in
/// the candidate list is only counted once.
fn discover_signatures(
    standard: &StandardId,
    declared: &[Signature],
    candidates: &[Signature],
    matcher: Matcher,
    mode: OutputMatching,
    discovered_tokens: &mut usize,
) -> Vec<Signature> {
    let mut consumed: HashSet<&str> = HashSet::new();
    let mut reconstructed = Vec::with_capacity(declared.len());

    for reference in declared {
        let hit = candidates
            .iter()
            .filter(|c| !consumed.contains(c.name.as_str()))
            .find_map(|c| matcher(reference, c, mode).map(|m| (c.name.as_str(), m)));

        match hit {
            Some((name, found)) => {
                tracing::debug!(
                    "{}: {} scored {}/{}",
                    standard,
                    name,
                    found.tokens,
                    reference.token_weight()
                );
                consumed.insert(name);
                *discovered_tokens += found.tokens;
                reconstructed.push(found.signature);
            }
            None => {
                tracing::debug!("{}: {} not found", standard, reference.name);
                reconstructed.push(reference.unmatched());
            }
        }
    }

    reconstructed
}

#[allow(clippy::cast_precision_loss)] // Token counts are far below 2^52
fn confidence_points(discovered: usize, maximum: usize) -> f64 {
    if maximum == 0 {
        return 0.0;
    }
    discovered as f64 / maximum as f64
}

/// Check a contract interface against one standard.
///
/// Returns the discovery record and whether any token was discovered.
#[must_use]
pub fn check_interface(
    standard: &Standard,
    interface: &ContractInterface,
    config: &MatchingConfig,
) -> (Discovery, bool) {
    let maximum_tokens = standard.token_count();
    let mut discovered_tokens = 0;

    let functions = discover_signatures(
        &standard.id,
        &standard.functions,
        &interface.functions,
        match_function,
        config.output_matching,
        &mut discovered_tokens,
    );
    let events = discover_signatures(
        &standard.id,
        &standard.events,
        &interface.events,
        match_event,
        config.output_matching,
        &mut discovered_tokens,
    );

    let points = confidence_points(discovered_tokens, maximum_tokens);
    let (confidence, threshold) = ConfidenceLevel::classify(points);

    let discovery = Discovery {
        standard: standard.id.clone(),
        confidence,
        confidence_points: points,
        threshold,
        maximum_tokens,
        discovered_tokens,
        contract: ContractInterface::new(interface.name.clone())
            .with_functions(functions)
            .with_events(events),
    };
    let found = discovery.is_found();
    (discovery, found)
}

/// Check a single function against the standard's function(s) of the same name.
///
/// Overloads declared under one name are all scored and their parameters
/// concatenated into the returned reconstruction. An undeclared name yields
/// a zero maximum and `found == false`.
#[must_use]
pub fn check_function(
    standard: &Standard,
    function: &Signature,
    config: &MatchingConfig,
) -> (FunctionDiscovery, bool) {
    let maximum_tokens = standard.function_token_count(&function.name);
    let mut discovered_tokens = 0;
    let mut reconstructed = Signature::new(function.name.clone());

    for reference in standard.functions.iter().filter(|f| f.name == function.name) {
        if let Some(found) = match_function(reference, function, config.output_matching) {
            discovered_tokens += found.tokens;
            reconstructed.matched = true;
            reconstructed.inputs.extend(found.signature.inputs);
            reconstructed.outputs.extend(found.signature.outputs);
        }
    }

    let points = confidence_points(discovered_tokens, maximum_tokens);
    let (confidence, threshold) = ConfidenceLevel::classify(points);

    let discovery = FunctionDiscovery {
        standard: standard.id.clone(),
        confidence,
        confidence_points: points,
        threshold,
        maximum_tokens,
        discovered_tokens,
        function: reconstructed,
    };
    let found = discovery.is_found();
    (discovery, found)
}

/// Runs conformance checks against the standards of a catalog
pub struct ConformanceEngine<'a> {
    catalog: &'a StandardCatalog,
    config: MatchingConfig,
}

impl<'a> ConformanceEngine<'a> {
    /// Create a new engine with default configuration
    #[must_use]
    pub fn new(catalog: &'a StandardCatalog) -> Self {
        Self::with_config(catalog, MatchingConfig::default())
    }

    #[must_use]
    pub fn with_config(catalog: &'a StandardCatalog, config: MatchingConfig) -> Self {
        Self { catalog, config }
    }

    #[must_use]
    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Check an interface against the standard registered under `id`
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the standard is not registered.
    pub fn check(
        &self,
        id: &StandardId,
        interface: &ContractInterface,
    ) -> Result<(Discovery, bool), CatalogError> {
        let standard = self.catalog.lookup(id)?;
        Ok(check_interface(standard, interface, &self.config))
    }

    /// Check one function against the standard registered under `id`
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the standard is not registered.
    pub fn check_function(
        &self,
        id: &StandardId,
        function: &Signature,
    ) -> Result<(FunctionDiscovery, bool), CatalogError> {
        let standard = self.catalog.lookup(id)?;
        Ok(check_function(standard, function, &self.config))
    }

    /// Check an interface against every standard in the catalog.
    ///
    /// Results come back in standard ID order, keeping only those at or above
    /// the configured minimum confidence. Each standard is judged on its own;
    /// no single winner is chosen.
    #[must_use]
    pub fn check_all(&self, interface: &ContractInterface) -> Vec<Discovery> {
        self.catalog
            .list()
            .into_iter()
            .map(|standard| check_interface(standard, interface, &self.config).0)
            .filter(|d| d.confidence >= self.config.min_confidence)
            .collect()
    }
}
