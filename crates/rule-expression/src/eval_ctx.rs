use crate::context::Context;
use crate::error::ExprError;
use crate::operators::{registry, Registry};
use crate::options::{Precedence, DEFAULT_MAX_DEPTH, MAX_DEPTH_CEILING};
use std::cell::Cell;

/// Everything a single evaluation reads from: the caller's bindings, the
/// static registries and the split rules in effect.
///
/// Also tracks how deeply [`evaluate`](crate::evaluate()) has recursed, so a
/// pathological expression fails with [`ExprError::TooDeep`] instead of
/// exhausting the stack.
pub struct EvalCtx<'a> {
    pub context: &'a Context,
    pub registry: &'static Registry,
    pub precedence: Precedence,
    max_depth: usize,
    depth: Cell<usize>,
}

impl<'a> EvalCtx<'a> {
    pub fn new(context: &'a Context) -> Self {
        EvalCtx {
            context,
            registry: registry(),
            precedence: Precedence::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            depth: Cell::new(0),
        }
    }

    pub fn with_precedence(mut self, precedence: Precedence) -> Self {
        self.precedence = precedence;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(MAX_DEPTH_CEILING);
        self
    }

    /// Whether operator scans skip tokens nested inside brackets.
    pub fn depth_aware(&self) -> bool {
        self.precedence == Precedence::Conventional
    }

    pub(crate) fn enter(&self) -> Result<(), ExprError> {
        let depth = self.depth.get() + 1;
        if depth > self.max_depth {
            return Err(ExprError::TooDeep {
                max: self.max_depth,
            });
        }
        self.depth.set(depth);
        Ok(())
    }

    pub(crate) fn leave(&self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}
