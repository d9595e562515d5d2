//! Static, read-only registries of everything an expression may call.

pub mod arithmetic;
pub mod comparison;
pub mod constants;
pub mod functions;
pub mod logical;

use crate::types::{functions_to_map, FunctionDefinition, FunctionMap, Value};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

pub type ArithmeticFn = fn(f64, f64) -> f64;
pub type ComparisonFn = fn(&Value, &Value) -> bool;
pub type LogicalFn = fn(bool, bool) -> bool;

/// Operator, function and constant tables, built once per process.
pub struct Registry {
    arithmetic: HashMap<&'static str, ArithmeticFn>,
    comparison: HashMap<&'static str, ComparisonFn>,
    logical: HashMap<&'static str, LogicalFn>,
    functions: FunctionMap,
    constants: HashMap<&'static str, f64>,
}

impl Registry {
    fn build() -> Self {
        Registry {
            arithmetic: arithmetic::operators().into_iter().collect(),
            comparison: comparison::operators().into_iter().collect(),
            logical: logical::operators().into_iter().collect(),
            functions: functions_to_map(functions::functions()),
            constants: constants::constants().into_iter().collect(),
        }
    }

    pub fn arithmetic(&self, symbol: &str) -> Option<ArithmeticFn> {
        self.arithmetic.get(symbol).copied()
    }

    pub fn comparison(&self, symbol: &str) -> Option<ComparisonFn> {
        self.comparison.get(symbol).copied()
    }

    pub fn logical(&self, symbol: &str) -> Option<LogicalFn> {
        self.logical.get(symbol).copied()
    }

    pub fn function(&self, name: &str) -> Option<&Arc<FunctionDefinition>> {
        self.functions.get(name)
    }

    pub fn constant(&self, name: &str) -> Option<f64> {
        self.constants.get(name).copied()
    }
}

/// Returns the process-wide registry.
pub fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(Registry::build)
}
