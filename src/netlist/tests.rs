//! Tests for netlist generation

use super::*;
use crate::expression::Expr;

fn single(input: &str) -> Netlist {
    let expr = Expr::parse(input).unwrap();
    generate("X", &expr, NetlistLimits::SINGLE).unwrap()
}

fn labels(netlist: &Netlist) -> Vec<&str> {
    netlist.nodes().map(|(_, label, _)| label).collect()
}

fn count_label(netlist: &Netlist, wanted: &str) -> usize {
    netlist.nodes().filter(|(_, label, _)| *label == wanted).count()
}

// ========== Structure ==========

#[test]
fn test_single_variable() {
    let netlist = single("A");
    assert_eq!(labels(&netlist), ["A", "X"]);
    assert_eq!(netlist.node(0), Some(("A", NodeKind::Var)));
    assert_eq!(netlist.node(1), Some(("X", NodeKind::Output)));
    assert_eq!(netlist.inputs_of(1), [NodeId(0)]);
    assert_eq!(netlist.len(), 3);
}

#[test]
fn test_and_chain_flattens_to_one_gate() {
    let netlist = single("A*B*C");
    assert_eq!(labels(&netlist), ["AND", "A", "B", "C", "X"]);
    assert_eq!(count_label(&netlist, "AND"), 1);
    assert_eq!(netlist.inputs_of(0), [NodeId(1), NodeId(2), NodeId(3)]);
    assert_eq!(netlist.inputs_of(4), [NodeId(0)]);
}

#[test]
fn test_flattening_ignores_grouping() {
    for input in ["(A*B)*C", "A*(B*C)", "A(BC)"] {
        let netlist = single(input);
        assert_eq!(count_label(&netlist, "AND"), 1, "{}", input);
        assert_eq!(netlist.inputs_of(0).len(), 3, "{}", input);
    }
}

#[test]
fn test_or_and_xor_chains_flatten() {
    let netlist = single("A + B + C + D");
    assert_eq!(count_label(&netlist, "OR"), 1);
    assert_eq!(netlist.inputs_of(0).len(), 4);

    let netlist = single("A ^ B ^ C");
    assert_eq!(count_label(&netlist, "XOR"), 1);
    assert_eq!(netlist.inputs_of(0).len(), 3);
}

#[test]
fn test_different_operators_do_not_flatten() {
    // OR(A, AND(B, C))
    let netlist = single("A + B*C");
    assert_eq!(labels(&netlist), ["OR", "A", "AND", "B", "C", "X"]);
    assert_eq!(netlist.inputs_of(0), [NodeId(1), NodeId(2)]);
    assert_eq!(netlist.inputs_of(2), [NodeId(3), NodeId(4)]);
}

#[test]
fn test_nand_and_nor_never_flatten() {
    let netlist = single("A % B % C");
    assert_eq!(count_label(&netlist, "NAND"), 2);

    let netlist = single("A $ B $ C");
    assert_eq!(count_label(&netlist, "NOR"), 2);
    // Left-associative: NOR(NOR(A, B), C)
    assert_eq!(netlist.node(1), Some(("NOR", NodeKind::Gate)));
    assert_eq!(netlist.inputs_of(0).len(), 2);
}

#[test]
fn test_double_negation_keeps_both_gates() {
    let netlist = single("!!A");
    assert_eq!(labels(&netlist), ["NOT", "NOT", "A", "X"]);
    assert_eq!(netlist.inputs_of(0), [NodeId(1)]);
    assert_eq!(netlist.inputs_of(1), [NodeId(2)]);
}

#[test]
fn test_negation_breaks_a_chain() {
    // AND(A, NOT(AND(B, C)))
    let netlist = single("A * !(B * C)");
    assert_eq!(count_label(&netlist, "AND"), 2);
    assert_eq!(netlist.inputs_of(0).len(), 2);
}

#[test]
fn test_every_node_except_output_feeds_something() {
    let netlist = single("(A + B')(C ^ D ^ E) + F % A");
    for (id, _, kind) in netlist.nodes() {
        let feeds = netlist.edges().filter(|(source, _)| *source == id).count();
        if kind == NodeKind::Output {
            assert_eq!(feeds, 0);
        } else {
            assert_eq!(feeds, 1, "node {} should have one fan-out edge", id);
        }
    }
}

#[test]
fn test_ids_are_unique_and_sequential() {
    let netlist = single("A*B + C*D + E'");
    let ids: Vec<usize> = netlist.nodes().map(|(id, _, _)| id.0).collect();
    let expected: Vec<usize> = (0..ids.len()).collect();
    assert_eq!(ids, expected);
}

// ========== Serialization ==========

#[test]
fn test_json_format() {
    let netlist = single("A'");
    assert_eq!(
        netlist.to_json().unwrap(),
        concat!(
            r#"[{"data":{"id":"n0","label":"NOT","type":"gate"}},"#,
            r#"{"data":{"id":"n1","label":"A","type":"var"}},"#,
            r#"{"data":{"source":"n1","target":"n0"}},"#,
            r#"{"data":{"id":"n2","label":"X","type":"output"}},"#,
            r#"{"data":{"source":"n0","target":"n2"}}]"#
        )
    );
}

#[test]
fn test_empty_netlist_json() {
    assert_eq!(Netlist::default().to_json().unwrap(), "[]");
}

// ========== Combined ==========

#[test]
fn test_combined_shares_id_space() {
    let x = Expr::parse("A").unwrap();
    let y = Expr::parse("B*C").unwrap();
    let netlist = generate_combined(
        &[("X", Some(&x)), ("Y", Some(&y)), ("Z", None), ("W", None)],
        NetlistLimits::COMBINED,
    )
    .unwrap();

    assert_eq!(labels(&netlist), ["A", "X", "AND", "B", "C", "Y"]);
    assert_eq!(netlist.inputs_of(1), [NodeId(0)]);
    assert_eq!(netlist.inputs_of(2), [NodeId(3), NodeId(4)]);
    assert_eq!(netlist.inputs_of(5), [NodeId(2)]);
}

#[test]
fn test_combined_with_no_channels_is_empty() {
    let netlist = generate_combined(
        &[("X", None), ("Y", None), ("Z", None), ("W", None)],
        NetlistLimits::COMBINED,
    )
    .unwrap();
    assert!(netlist.is_empty());
}

// ========== Limits ==========

fn long_sum(terms: usize) -> Expr {
    let input: Vec<String> = (0..terms)
        .map(|i| char::from(b'A' + (i % 6) as u8).to_string())
        .collect();
    Expr::parse(&input.join(" + ")).unwrap()
}

#[test]
fn test_byte_limit_is_an_error() {
    let expr = long_sum(200);
    let err = generate("X", &expr, NetlistLimits::SINGLE).unwrap_err();
    assert!(matches!(
        err,
        NetlistError::CapacityExceeded {
            capacity: Capacity::Bytes,
            limit: 8192
        }
    ));

    // The same tree fits in the combined budget
    let netlist = generate("X", &expr, NetlistLimits::COMBINED).unwrap();
    assert!(netlist.to_json().unwrap().len() <= NetlistLimits::COMBINED.max_bytes);
}

#[test]
fn test_element_limit_is_an_error() {
    let limits = NetlistLimits {
        max_bytes: usize::MAX,
        max_elements: 4,
    };
    let expr = Expr::parse("A*B").unwrap();
    let err = generate("X", &expr, limits).unwrap_err();
    assert!(matches!(
        err,
        NetlistError::CapacityExceeded {
            capacity: Capacity::Elements,
            limit: 4
        }
    ));
}

#[test]
fn test_output_within_limit_is_complete() {
    let expr = long_sum(40);
    let netlist = generate("X", &expr, NetlistLimits::SINGLE).unwrap();
    let json = netlist.to_json().unwrap();
    assert!(json.len() <= NetlistLimits::SINGLE.max_bytes);
    assert_eq!(netlist.nodes().count(), 42);
    assert_eq!(netlist.edges().count(), 41);
}
