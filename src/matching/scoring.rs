use serde::{Deserialize, Serialize};

use crate::core::signature::{Parameter, Signature, INDEXED_TOKENS, NAME_TOKENS, TYPE_TOKENS};

/// How output slots are scored and annotated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMatching {
    /// Legacy scoring: only the candidate's first output is
    /// examined, and every output slot is marked matched as soon as the
    /// candidate declares any output at all.
    #[default]
    Compatible,
    /// Outputs are scored like inputs minus the indexed bonus: a slot is
    /// matched only when some candidate output's type occurs in the
    /// reference outputs.
    Strict,
}

/// Result of comparing one candidate signature against one reference signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureMatch {
    /// Tokens scored, at most the reference's [`Signature::token_weight`]
    pub tokens: usize,

    /// Fresh reconstruction of the reference declaration with match flags set
    pub signature: Signature,
}

impl SignatureMatch {
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.tokens > 0
    }
}

/// Find the first parameter in `pool` with the same type as `needle`.
///
/// Position, multiplicity and the `indexed` flag are ignored, and nothing
/// is consumed: one pool entry can satisfy any number of needles.
#[must_use]
pub fn find_by_type<'a>(pool: &'a [Parameter], needle: &Parameter) -> Option<&'a Parameter> {
    pool.iter().find(|p| p.ty == needle.ty)
}

/// Score a candidate function against a reference function.
///
/// Returns `None` when the names differ.
#[must_use]
pub fn match_function(
    reference: &Signature,
    candidate: &Signature,
    mode: OutputMatching,
) -> Option<SignatureMatch> {
    match_signature(reference, candidate, mode)
}

/// Score a candidate event against a reference event.
///
/// Returns `None` when the names differ.
#[must_use]
pub fn match_event(
    reference: &Signature,
    candidate: &Signature,
    mode: OutputMatching,
) -> Option<SignatureMatch> {
    match_signature(reference, candidate, mode)
}

fn match_signature(
    reference: &Signature,
    candidate: &Signature,
    mode: OutputMatching,
) -> Option<SignatureMatch> {
    if reference.name != candidate.name {
        return None;
    }

    let mut tokens = NAME_TOKENS;
    let mut signature = Signature::new(candidate.name.clone());
    signature.matched = true;

    // The hit is a presence test of the candidate's inputs against the whole
    // reference input set, so every reference slot sees the same first hit.
    let input_hit = candidate
        .inputs
        .iter()
        .find_map(|input| find_by_type(&reference.inputs, input).map(|declared| (declared, input)));

    for slot in &reference.inputs {
        let mut input = slot.unmatched();
        if let Some((declared, found)) = input_hit {
            tokens += TYPE_TOKENS;
            if declared.indexed == found.indexed {
                tokens += INDEXED_TOKENS;
            }
            input.matched = true;
        }
        signature.inputs.push(input);
    }

    for slot in &reference.outputs {
        let mut output = slot.unmatched();
        match mode {
            OutputMatching::Compatible => {
                if let Some(first) = candidate.outputs.first() {
                    if find_by_type(&reference.outputs, first).is_some() {
                        tokens += TYPE_TOKENS;
                    }
                    output.matched = true;
                }
            }
            OutputMatching::Strict => {
                if candidate
                    .outputs
                    .iter()
                    .any(|o| find_by_type(&reference.outputs, o).is_some())
                {
                    tokens += TYPE_TOKENS;
                    output.matched = true;
                }
            }
        }
        signature.outputs.push(output);
    }

    Some(SignatureMatch { tokens, signature })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer() -> Signature {
        Signature::new("transfer")
            .with_inputs(vec![Parameter::new("address"), Parameter::new("uint256")])
            .with_outputs(vec![Parameter::new("bool")])
    }

    fn transfer_event() -> Signature {
        Signature::new("Transfer").with_inputs(vec![
            Parameter::indexed("address"),
            Parameter::indexed("address"),
            Parameter::new("uint256"),
        ])
    }

    #[test]
    fn test_find_by_type_returns_first() {
        let pool = vec![
            Parameter::indexed("address"),
            Parameter::new("address"),
            Parameter::new("uint256"),
        ];
        let found = find_by_type(&pool, &Parameter::new("address")).unwrap();
        assert!(found.indexed);
        assert!(find_by_type(&pool, &Parameter::new("bytes32")).is_none());
        assert!(find_by_type(&[], &Parameter::new("address")).is_none());
    }

    #[test]
    fn test_identical_function_scores_nine() {
        let m = match_function(&transfer(), &transfer(), OutputMatching::Compatible).unwrap();
        assert_eq!(m.tokens, 9);
        assert!(m.is_match());
        assert!(m.signature.matched);
        assert!(m.signature.inputs.iter().all(|p| p.matched));
        assert!(m.signature.outputs.iter().all(|p| p.matched));
    }

    #[test]
    fn test_identical_event_scores_ten() {
        let m = match_event(
            &transfer_event(),
            &transfer_event(),
            OutputMatching::Compatible,
        )
        .unwrap();
        assert_eq!(m.tokens, 10);
        assert!(m.signature.outputs.is_empty());
        assert!(m.signature.inputs[0].indexed);
        assert!(!m.signature.inputs[2].indexed);
    }

    #[test]
    fn test_name_mismatch_is_rejected() {
        let other = Signature::new("transferFrom").with_inputs(transfer().inputs);
        assert!(match_function(&transfer(), &other, OutputMatching::Compatible).is_none());
    }

    #[test]
    fn test_name_only_match() {
        let bare = Signature::new("transfer");
        let m = match_function(&transfer(), &bare, OutputMatching::Compatible).unwrap();
        assert_eq!(m.tokens, 1);
        assert!(m.signature.inputs.iter().all(|p| !p.matched));
        assert!(m.signature.outputs.iter().all(|p| !p.matched));
        // The reconstruction still lists every declared slot
        assert_eq!(m.signature.inputs.len(), 2);
        assert_eq!(m.signature.outputs.len(), 1);
    }

    #[test]
    fn test_presence_semantics_reuse_single_candidate_input() {
        // One candidate address satisfies every reference slot because the
        // test is presence in the declared set, not pairing.
        let candidate = Signature::new("transfer")
            .with_inputs(vec![Parameter::new("address")])
            .with_outputs(vec![Parameter::new("bool")]);
        let m = match_function(&transfer(), &candidate, OutputMatching::Compatible).unwrap();
        assert_eq!(m.tokens, 9);
    }

    #[test]
    fn test_unknown_input_types_are_skipped() {
        let candidate = Signature::new("transfer")
            .with_inputs(vec![Parameter::new("bytes32"), Parameter::new("uint256")])
            .with_outputs(vec![Parameter::new("bool")]);
        let m = match_function(&transfer(), &candidate, OutputMatching::Compatible).unwrap();
        assert_eq!(m.tokens, 9);

        let unrelated = Signature::new("transfer").with_inputs(vec![Parameter::new("bytes32")]);
        let m = match_function(&transfer(), &unrelated, OutputMatching::Compatible).unwrap();
        assert_eq!(m.tokens, 1);
    }

    #[test]
    fn test_indexed_mismatch_loses_bonus() {
        let candidate = Signature::new("Transfer").with_inputs(vec![
            Parameter::new("address"),
            Parameter::new("address"),
            Parameter::new("uint256"),
        ]);
        let m = match_event(&transfer_event(), &candidate, OutputMatching::Compatible).unwrap();
        // First hit is a non-indexed address against an indexed declaration
        assert_eq!(m.tokens, 1 + 2 * 3);
        assert!(m.signature.inputs.iter().all(|p| p.matched));
    }

    #[test]
    fn test_compatible_outputs_flag_without_type_hit() {
        let candidate = Signature::new("transfer")
            .with_inputs(transfer().inputs)
            .with_outputs(vec![Parameter::new("uint8")]);
        let m = match_function(&transfer(), &candidate, OutputMatching::Compatible).unwrap();
        assert_eq!(m.tokens, 7);
        assert!(m.signature.outputs[0].matched);
    }

    #[test]
    fn test_compatible_outputs_only_examine_first() {
        let candidate = Signature::new("transfer")
            .with_inputs(transfer().inputs)
            .with_outputs(vec![Parameter::new("uint8"), Parameter::new("bool")]);
        let m = match_function(&transfer(), &candidate, OutputMatching::Compatible).unwrap();
        assert_eq!(m.tokens, 7);
    }

    #[test]
    fn test_strict_outputs_require_type_hit() {
        let wrong = Signature::new("transfer")
            .with_inputs(transfer().inputs)
            .with_outputs(vec![Parameter::new("uint8")]);
        let m = match_function(&transfer(), &wrong, OutputMatching::Strict).unwrap();
        assert_eq!(m.tokens, 7);
        assert!(!m.signature.outputs[0].matched);

        let later = Signature::new("transfer")
            .with_inputs(transfer().inputs)
            .with_outputs(vec![Parameter::new("uint8"), Parameter::new("bool")]);
        let m = match_function(&transfer(), &later, OutputMatching::Strict).unwrap();
        assert_eq!(m.tokens, 9);
        assert!(m.signature.outputs[0].matched);
    }

    #[test]
    fn test_modes_agree_on_exact_match() {
        let exact = match_function(&transfer(), &transfer(), OutputMatching::Compatible).unwrap();
        let strict = match_function(&transfer(), &transfer(), OutputMatching::Strict).unwrap();
        assert_eq!(exact, strict);
    }

    #[test]
    fn test_adding_missing_parameter_is_monotonic() {
        let reference = Signature::new("transferFrom")
            .with_inputs(vec![
                Parameter::new("address"),
                Parameter::new("address"),
                Parameter::new("uint256"),
            ])
            .with_outputs(vec![Parameter::new("bool")]);

        let mut candidate = Signature::new("transferFrom");
        let mut previous = 0;
        for param in [
            Parameter::new("bytes"),
            Parameter::new("uint256"),
            Parameter::new("address"),
            Parameter::new("address"),
        ] {
            candidate.inputs.push(param);
            for mode in [OutputMatching::Compatible, OutputMatching::Strict] {
                let m = match_function(&reference, &candidate, mode).unwrap();
                assert!(m.tokens >= previous);
                assert!(m.tokens <= reference.token_weight());
            }
            previous = match_function(&reference, &candidate, OutputMatching::Strict)
                .unwrap()
                .tokens;
        }
    }

    #[test]
    fn test_reference_is_not_mutated() {
        let reference = transfer();
        let candidate = transfer();
        let _ = match_function(&reference, &candidate, OutputMatching::Compatible);
        assert_eq!(reference, transfer());
        assert_eq!(candidate, transfer());
    }

    #[test]
    fn test_deserialize_output_matching() {
        let strict: OutputMatching = serde_json::from_str("\"strict\"").unwrap();
        assert_eq!(strict, OutputMatching::Strict);
        assert_eq!(OutputMatching::default(), OutputMatching::Compatible);
        assert!(serde_json::from_str::<OutputMatching>("\"loose\"").is_err());
    }
}
