// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn deps(pairs: &[(&str, &[&str])]) -> HashMap<String, Vec<String>> {
    pairs
        .iter()
        .map(|(name, ds)| (name.to_string(), ds.iter().map(|d| d.to_string()).collect()))
        .collect()
}

#[test]
fn independent_components_keep_input_order() {
    let names = vec!["a".to_string(), "b".to_string()];
    let order = topo_sort(&names, &deps(&[])).unwrap();
    assert_eq!(order, vec!["a", "b"]);
}

#[test]
fn dependency_is_ordered_before_dependent() {
    let names = vec!["storage".to_string(), "ingress".to_string()];
    let order = topo_sort(&names, &deps(&[("ingress", &["storage"])])).unwrap();
    assert_eq!(order, vec!["storage", "ingress"]);
}

#[test]
fn diamond_dependency_resolves_once() {
    let names = vec!["a".to_string(), "b".to_string(), "c".to_string(), "d".to_string()];
    let graph = deps(&[("b", &["a"]), ("c", &["a"]), ("d", &["b", "c"])]);
    let order = topo_sort(&names, &graph).unwrap();
    let pos = |n: &str| order.iter().position(|x| x == n).unwrap();
    assert!(pos("a") < pos("b"));
    assert!(pos("a") < pos("c"));
    assert!(pos("b") < pos("d"));
    assert!(pos("c") < pos("d"));
}

#[test]
fn unknown_dependency_is_rejected() {
    let names = vec!["a".to_string()];
    let err = topo_sort(&names, &deps(&[("a", &["missing"])])).unwrap_err();
    assert_eq!(err, GraphError::UnknownDependency("a".to_string(), "missing".to_string()));
}

#[test]
fn cycle_is_rejected() {
    let names = vec!["a".to_string(), "b".to_string()];
    let graph = deps(&[("a", &["b"]), ("b", &["a"])]);
    let err = topo_sort(&names, &graph).unwrap_err();
    assert!(matches!(err, GraphError::Cycle(_)));
}
