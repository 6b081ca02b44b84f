//! Aggregate composition
//!
//! Combines independent validators into a single logical AND. Combination
//! consumes its operands: each absorbed child is reset to unvalidated and
//! its hooks move into the aggregate, so the aggregate's outcome alone
//! decides which hooks fire.

use std::ops;

use super::core::{Validator, ValidatorKind};

impl Validator {
    /// Combines two validators into one flat AND-aggregate.
    ///
    /// Constituents of either operand are unioned and deduplicated by
    /// (identity, method label); combining aggregates flattens rather than
    /// nesting, so combination is associative up to set equality. A
    /// duplicate dropped by deduplication still contributes its hooks, so
    /// no registered callback is silently lost.
    ///
    /// The aggregate validates as true only if every child's underlying
    /// check passes, and it always re-runs those checks the first time it is
    /// validated, regardless of whether a child had settled before being
    /// absorbed.
    pub fn combine(x: Validator, y: Validator) -> Validator {
        let mut children: Vec<Validator> = Vec::new();
        let mut success_hooks = Vec::new();
        let mut failure_hooks = Vec::new();

        for operand in [x, y] {
            let (constituents, mut fused_success, mut fused_failure) = operand.into_constituents();
            success_hooks.append(&mut fused_success);
            failure_hooks.append(&mut fused_failure);

            for mut child in constituents {
                child.cached = None;
                success_hooks.append(&mut child.success_hooks);
                failure_hooks.append(&mut child.failure_hooks);

                let duplicate = children
                    .iter()
                    .any(|c| c.identity == child.identity && c.method_label == child.method_label);
                if !duplicate {
                    children.push(child);
                }
            }
        }

        let identity = children
            .first()
            .map(|c| c.identity.clone())
            .unwrap_or_default();
        let method_label = children
            .iter()
            .map(|c| c.method_label.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        Validator {
            identity,
            method_label,
            kind: ValidatorKind::Aggregate(children),
            cached: None,
            success_hooks,
            failure_hooks,
        }
    }

    /// Yields this validator's constituents for combination.
    ///
    /// A leaf yields itself; an aggregate yields its children along with the
    /// hooks it had already fused, so flattening carries them forward.
    fn into_constituents(self) -> (Vec<Validator>, Vec<super::Hook>, Vec<super::Hook>) {
        match self.kind {
            ValidatorKind::Aggregate(children) => {
                (children, self.success_hooks, self.failure_hooks)
            }
            _ => (vec![self], Vec::new(), Vec::new()),
        }
    }

    #[cfg(test)]
    pub(crate) fn constituent_keys(&self) -> Vec<(String, String)> {
        match &self.kind {
            ValidatorKind::Aggregate(children) => children
                .iter()
                .map(|c| (c.identity.clone(), c.method_label.clone()))
                .collect(),
            _ => vec![(self.identity.clone(), self.method_label.clone())],
        }
    }
}

/// Infix shorthand for [`Validator::combine`].
impl ops::Add for Validator {
    type Output = Validator;

    fn add(self, rhs: Validator) -> Validator {
        Validator::combine(self, rhs)
    }
}
