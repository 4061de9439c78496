// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dependency-ordered start/stop sequencing: a DFS topological sort
//! over each component's declared dependencies, computed once at supervisor
//! construction.

use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    #[error("component {0:?} depends on unknown component {1:?}")]
    UnknownDependency(String, String),

    #[error("dependency cycle detected involving component {0:?}")]
    Cycle(String),
}

/// Return component names in dependency order: a name always appears after
/// every name in its `dependencies` list. Reversing this order gives a valid
/// shutdown sequence.
pub fn topo_sort(names: &[String], dependencies: &HashMap<String, Vec<String>>) -> Result<Vec<String>, GraphError> {
    let known: HashSet<&str> = names.iter().map(String::as_str).collect();
    for (name, deps) in dependencies {
        for dep in deps {
            if !known.contains(dep.as_str()) {
                return Err(GraphError::UnknownDependency(name.clone(), dep.clone()));
            }
        }
    }

    let mut order = Vec::with_capacity(names.len());
    let mut visited = HashSet::new();
    let mut on_stack = HashSet::new();

    for name in names {
        visit(name, dependencies, &mut visited, &mut on_stack, &mut order)?;
    }

    Ok(order)
}

fn visit(
    name: &str,
    dependencies: &HashMap<String, Vec<String>>,
    visited: &mut HashSet<String>,
    on_stack: &mut HashSet<String>,
    order: &mut Vec<String>,
) -> Result<(), GraphError> {
    if visited.contains(name) {
        return Ok(());
    }
    if on_stack.contains(name) {
        return Err(GraphError::Cycle(name.to_string()));
    }
    on_stack.insert(name.to_string());

    if let Some(deps) = dependencies.get(name) {
        for dep in deps {
            visit(dep, dependencies, visited, on_stack, order)?;
        }
    }

    on_stack.remove(name);
    visited.insert(name.to_string());
    order.push(name.to_string());
    Ok(())
}

#[cfg(test)]
#[path = "graph_tests.rs"]
mod tests;
