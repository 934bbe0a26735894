//! Property-based tests for parsing, minimization and netlists
//!
//! Random expressions over `A`-`F` are checked against their own truth
//! tables, so every law below holds for all 64 input rows.

use logic_compiler::cover::{CONSTANT_FALSE, CONSTANT_TRUE};
use logic_compiler::netlist::{generate, NetlistLimits, NodeKind};
use logic_compiler::pipeline::{Channel, ChannelState, Pipeline};
use logic_compiler::{Expr, Minimizable, Minimized, PipelineError, StateError, TruthTable};
use proptest::prelude::*;

// ============================================================================
// Helpers
// ============================================================================

fn arb_expr() -> impl Strategy<Value = Expr> {
    let leaf = (0u8..6).prop_map(|i| Expr::var((b'A' + i) as char));
    leaf.prop_recursive(5, 32, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Expr::negate),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| l.and(r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| l.or(r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| l.xor(r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| l.nand(r)),
            (inner.clone(), inner).prop_map(|(l, r)| l.nor(r)),
        ]
    })
}

fn rendered_value(text: &str, mask: u64) -> bool {
    match text {
        CONSTANT_FALSE => false,
        CONSTANT_TRUE => true,
        _ => Expr::parse(text).unwrap().evaluate(mask),
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn display_reparses_to_same_tree(expr in arb_expr()) {
        let text = expr.to_string();
        prop_assert_eq!(Expr::parse(&text).unwrap(), expr);
    }

    #[test]
    fn sop_and_pos_preserve_the_function(expr in arb_expr()) {
        let result = Minimized::from_expr(&expr);
        for mask in 0..64u64 {
            let expected = expr.evaluate(mask);
            prop_assert_eq!(rendered_value(&result.sop, mask), expected);
            prop_assert_eq!(rendered_value(&result.pos, mask), expected);
        }
    }

    #[test]
    fn primes_cover_exactly_the_minterms(expr in arb_expr()) {
        let primes = expr.prime_implicants();
        prop_assert_eq!(primes.covered_rows(), TruthTable::minterms(&expr));
        prop_assert_eq!(primes.prime_implicants(), primes);
    }

    #[test]
    fn negation_swaps_minterms_and_maxterms(expr in arb_expr()) {
        let negated = expr.clone().negate();
        prop_assert_eq!(TruthTable::minterms(&negated), TruthTable::maxterms(&expr));
        prop_assert_eq!(negated.to_sop(), TruthTable::maxterms(&expr).to_sop());
    }

    #[test]
    fn netlist_has_one_output_fed_by_the_root(expr in arb_expr()) {
        let netlist = generate("X", &expr, NetlistLimits::COMBINED).unwrap();
        let outputs: Vec<_> = netlist
            .nodes()
            .filter(|(_, _, kind)| *kind == NodeKind::Output)
            .collect();
        prop_assert_eq!(outputs.len(), 1);
        prop_assert_eq!(netlist.inputs_of(outputs[0].0 .0).len(), 1);
        prop_assert_eq!(netlist.edges().count() + 1, netlist.nodes().count());
    }

    #[test]
    fn programming_from_minterms_round_trips(rows in proptest::collection::btree_set(0u8..64, 0..12)) {
        let csv = rows.iter().map(u8::to_string).collect::<Vec<_>>().join(", ");
        let state = ChannelState::new();
        let pipeline = Pipeline::default();
        let result = pipeline.program_from_minterms(Channel::X, &csv, &state);
        // Scattered rows can render to more text than a channel stores
        prop_assume!(!matches!(
            result,
            Err(PipelineError::State(StateError::EquationTooLong { .. }))
        ));
        let stored = result.unwrap();

        let table = match pipeline.compile(&stored).unwrap() {
            Some(expr) => TruthTable::minterms(&expr),
            None => TruthTable::default(),
        };
        let expected: Vec<u8> = rows.into_iter().collect();
        prop_assert_eq!(table.terms(), expected.as_slice());
    }
}
