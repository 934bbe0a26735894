//! Netlist generation through the public API

use logic_compiler::netlist::{generate, generate_combined, Capacity, NetlistLimits, NodeKind};
use logic_compiler::{Expr, Netlist, NetlistError};
use std::collections::HashSet;

/// Evaluate the gate graph feeding node `id`
fn simulate(netlist: &Netlist, id: usize, mask: u64) -> bool {
    let (label, kind) = netlist.node(id).unwrap();
    let inputs: Vec<bool> = netlist
        .inputs_of(id)
        .into_iter()
        .map(|source| simulate(netlist, source.0, mask))
        .collect();
    match kind {
        NodeKind::Var => Expr::var(label.chars().next().unwrap()).evaluate(mask),
        NodeKind::Output => {
            assert_eq!(inputs.len(), 1);
            inputs[0]
        }
        NodeKind::Gate => match label {
            "AND" => inputs.iter().all(|&v| v),
            "OR" => inputs.iter().any(|&v| v),
            "XOR" => inputs.iter().filter(|&&v| v).count() % 2 == 1,
            "NOT" => !inputs[0],
            "NAND" => !inputs.iter().all(|&v| v),
            "NOR" => !inputs.iter().any(|&v| v),
            other => panic!("unknown gate {}", other),
        },
    }
}

fn output_id(netlist: &Netlist, label: &str) -> usize {
    netlist
        .nodes()
        .find(|(_, l, kind)| *l == label && *kind == NodeKind::Output)
        .map(|(id, _, _)| id.0)
        .unwrap()
}

#[test]
fn test_netlist_computes_the_expression() {
    for input in [
        "A",
        "A'",
        "A*B*C + D",
        "A ^ B ^ C ^ D",
        "(A % B) % C",
        "A $ (B $ C)",
        "!(AB + CD)'E",
        "A'B'C'D'E'F' + (A ^ B ^ C ^ D ^ E ^ F)",
    ] {
        let expr = Expr::parse(input).unwrap();
        let netlist = generate("X", &expr, NetlistLimits::SINGLE).unwrap();
        let out = output_id(&netlist, "X");
        for mask in 0..64 {
            assert_eq!(simulate(&netlist, out, mask), expr.evaluate(mask), "{} @ {}", input, mask);
        }
    }
}

#[test]
fn test_chains_flatten_into_one_gate() {
    let expr = Expr::parse("A + B + C + D + E").unwrap();
    let netlist = generate("Y", &expr, NetlistLimits::SINGLE).unwrap();
    let gates: Vec<_> = netlist
        .nodes()
        .filter(|(_, _, kind)| *kind == NodeKind::Gate)
        .collect();
    assert_eq!(gates.len(), 1);
    assert_eq!(netlist.inputs_of(gates[0].0 .0).len(), 5);
}

#[test]
fn test_ids_are_unique_and_edges_resolve() {
    let x = Expr::parse("AB + C").unwrap();
    let y = Expr::parse("(A ^ B)'").unwrap();
    let netlist =
        generate_combined(&[("X", Some(&x)), ("Y", Some(&y))], NetlistLimits::COMBINED).unwrap();

    let ids: Vec<usize> = netlist.nodes().map(|(id, _, _)| id.0).collect();
    let unique: HashSet<usize> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len());

    // Every edge refers to nodes emitted before it
    let mut seen = HashSet::new();
    for element in netlist.elements() {
        let value = serde_json::to_value(element).unwrap();
        let data = &value["data"];
        if let Some(id) = data["id"].as_str() {
            seen.insert(id.to_string());
        } else {
            assert!(seen.contains(data["source"].as_str().unwrap()));
            assert!(seen.contains(data["target"].as_str().unwrap()));
        }
    }
}

#[test]
fn test_json_shape() {
    let netlist = generate("Z", &Expr::parse("A + B").unwrap(), NetlistLimits::SINGLE).unwrap();
    let value: serde_json::Value = serde_json::from_str(&netlist.to_json().unwrap()).unwrap();
    let elements = value.as_array().unwrap();
    assert_eq!(elements.len(), netlist.len());

    assert_eq!(
        elements[0],
        serde_json::json!({"data": {"id": "n0", "label": "OR", "type": "gate"}})
    );
    assert_eq!(
        elements[1],
        serde_json::json!({"data": {"id": "n1", "label": "A", "type": "var"}})
    );
    assert_eq!(
        elements[2],
        serde_json::json!({"data": {"source": "n1", "target": "n0"}})
    );
    let last = elements.last().unwrap();
    assert_eq!(last["data"]["target"], "n3");
    assert_eq!(last["data"]["source"], "n0");
}

#[test]
fn test_limits_are_enforced() {
    let long = (0..100).map(|_| "A").collect::<Vec<_>>().join(" + ");
    let expr = Expr::parse(&long).unwrap();

    assert!(generate("X", &expr, NetlistLimits::COMBINED).is_ok());

    let tiny = NetlistLimits {
        max_bytes: 1024,
        max_elements: usize::MAX,
    };
    match generate("X", &expr, tiny) {
        Err(NetlistError::CapacityExceeded { capacity, limit }) => {
            assert_eq!(capacity, Capacity::Bytes);
            assert_eq!(limit, 1024);
        }
        other => panic!("expected a capacity error, got {:?}", other),
    }

    let few = NetlistLimits {
        max_bytes: usize::MAX,
        max_elements: 10,
    };
    assert!(matches!(
        generate("X", &expr, few),
        Err(NetlistError::CapacityExceeded {
            capacity: Capacity::Elements,
            ..
        })
    ));
}

#[test]
fn test_skipped_channels_leave_no_trace() {
    let netlist = generate_combined(&[("X", None), ("Y", None)], NetlistLimits::COMBINED).unwrap();
    assert!(netlist.is_empty());
    assert_eq!(netlist.to_json().unwrap(), "[]");
}
