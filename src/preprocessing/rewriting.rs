//! Semantics-preserving rewrites of CTL formulae: negation normalisation,
//! translation into the restricted operator fragment `{not, or, EX, EU, EG}`,
//! and the fair-paths encoding used when fairness constraints are present.

use crate::preprocessing::ctl_tree::{CtlTreeNode, NodeType};
use crate::preprocessing::operator_enums::{Atomic, BinaryOp, UnaryOp};

/// Smart negation: cancels stacked negations instead of growing the tree.
///
/// `lnot(not not φ)` is `lnot(φ)`, `lnot(not φ)` is `φ`, and anything else is
/// wrapped in a fresh negation node.
pub fn lnot(formula: &CtlTreeNode) -> CtlTreeNode {
    if let NodeType::Unary(UnaryOp::Not, child) = &formula.node_type {
        if let NodeType::Unary(UnaryOp::Not, grandchild) = &child.node_type {
            return lnot(grandchild);
        }
        return child.as_ref().clone();
    }
    CtlTreeNode::mk_unary(formula.clone(), UnaryOp::Not)
}

impl CtlTreeNode {
    /// Rewrite the formula into the restricted fragment
    /// `{not, or, EX, EU, EG, atomic, bool}`, which is all the model checker
    /// evaluates directly.
    ///
    /// Universally quantified operators are dualised into `not E ...` with the
    /// negation pushed through the path operator, so every produced quantifier
    /// directly wraps `X`, `U` or `G`:
    ///   - `A X φ   -> not E X not φ`
    ///   - `A F φ   -> not E G not φ`
    ///   - `A G φ   -> not E (true U not φ)`
    ///   - `A(φ U ψ) -> not (E(not ψ U not (φ or ψ)) or E G not ψ)`
    ///   - `A(φ R ψ) -> not E(not φ U not ψ)`
    /// and `E(φ R ψ)` becomes `E(ψ U (φ and ψ)) or E G ψ`.
    pub fn get_equivalent_restricted_formula(&self) -> CtlTreeNode {
        match &self.node_type {
            NodeType::Terminal(_) => self.clone(),
            NodeType::Unary(UnaryOp::Not, child) => {
                lnot(&child.get_equivalent_restricted_formula())
            }
            NodeType::Unary(UnaryOp::E, path) => restricted_existential(path),
            NodeType::Unary(UnaryOp::A, path) => restricted_universal(path),
            NodeType::Unary(UnaryOp::X, child) => CtlTreeNode::mk_unary(
                child.get_equivalent_restricted_formula(),
                UnaryOp::X,
            ),
            // F φ == (true U φ)
            NodeType::Unary(UnaryOp::F, child) => CtlTreeNode::mk_binary(
                CtlTreeNode::mk_constant(true),
                child.get_equivalent_restricted_formula(),
                BinaryOp::U,
            ),
            // G φ == not (true U not φ)
            NodeType::Unary(UnaryOp::G, child) => CtlTreeNode::mk_unary(
                CtlTreeNode::mk_binary(
                    CtlTreeNode::mk_constant(true),
                    lnot(&child.get_equivalent_restricted_formula()),
                    BinaryOp::U,
                ),
                UnaryOp::Not,
            ),
            NodeType::Binary(BinaryOp::Or, left, right) => CtlTreeNode::mk_binary(
                left.get_equivalent_restricted_formula(),
                right.get_equivalent_restricted_formula(),
                BinaryOp::Or,
            ),
            // (φ and ψ) == not (not φ or not ψ)
            NodeType::Binary(BinaryOp::And, left, right) => CtlTreeNode::mk_unary(
                CtlTreeNode::mk_binary(
                    lnot(&left.get_equivalent_restricted_formula()),
                    lnot(&right.get_equivalent_restricted_formula()),
                    BinaryOp::Or,
                ),
                UnaryOp::Not,
            ),
            // (φ -> ψ) == (not φ or ψ)
            NodeType::Binary(BinaryOp::Imply, left, right) => CtlTreeNode::mk_binary(
                lnot(&left.get_equivalent_restricted_formula()),
                right.get_equivalent_restricted_formula(),
                BinaryOp::Or,
            ),
            NodeType::Binary(BinaryOp::U, left, right) => CtlTreeNode::mk_binary(
                left.get_equivalent_restricted_formula(),
                right.get_equivalent_restricted_formula(),
                BinaryOp::U,
            ),
            // (φ R ψ) == not (not φ U not ψ)
            NodeType::Binary(BinaryOp::R, left, right) => CtlTreeNode::mk_unary(
                CtlTreeNode::mk_binary(
                    lnot(&left.get_equivalent_restricted_formula()),
                    lnot(&right.get_equivalent_restricted_formula()),
                    BinaryOp::U,
                ),
                UnaryOp::Not,
            ),
        }
    }

    /// Translate CTL-under-fairness into plain CTL over a model where the
    /// atomic proposition `fair_atom` labels exactly the fair states.
    ///
    /// The fair atom is conjoined at the point where a quantified path commits
    /// to its future: `E X φ -> E X (φ and fair)`,
    /// `E(φ U ψ) -> E(φ U (ψ and fair))`, and analogously for `F`, `G`, `R`.
    /// `A φ` dualises to `not E (not φ)` first, so the insertion always
    /// happens on an existential quantifier. Atomic propositions are
    /// additionally conjoined with the fair atom.
    pub fn get_equivalent_non_fair_formula(&self, fair_atom: &CtlTreeNode) -> CtlTreeNode {
        match &self.node_type {
            NodeType::Terminal(Atomic::Prop(_)) => {
                CtlTreeNode::mk_binary(self.clone(), fair_atom.clone(), BinaryOp::And)
            }
            NodeType::Terminal(_) => self.clone(),
            NodeType::Unary(UnaryOp::Not, child) => CtlTreeNode::mk_unary(
                child.get_equivalent_non_fair_formula(fair_atom),
                UnaryOp::Not,
            ),
            NodeType::Unary(UnaryOp::E, path) => {
                let rewritten = path.get_equivalent_non_fair_formula(fair_atom);
                CtlTreeNode::mk_unary(commit_to_fair_path(rewritten, fair_atom), UnaryOp::E)
            }
            // A φ == not E not φ, with the fair commitment on the E side
            NodeType::Unary(UnaryOp::A, path) => {
                let rewritten = path.get_equivalent_non_fair_formula(fair_atom);
                let negated = negated_path_formula(&rewritten);
                CtlTreeNode::mk_unary(
                    CtlTreeNode::mk_unary(
                        commit_to_fair_path(negated, fair_atom),
                        UnaryOp::E,
                    ),
                    UnaryOp::Not,
                )
            }
            NodeType::Unary(op, child) => CtlTreeNode::mk_unary(
                child.get_equivalent_non_fair_formula(fair_atom),
                *op,
            ),
            NodeType::Binary(op, left, right) => CtlTreeNode::mk_binary(
                left.get_equivalent_non_fair_formula(fair_atom),
                right.get_equivalent_non_fair_formula(fair_atom),
                *op,
            ),
        }
    }
}

/// Restricted form of `E path`: the produced quantifier wraps `X`, `U` or `G`
/// directly. `E(φ R ψ)` uses `E(ψ U (φ and ψ)) or E G ψ`.
fn restricted_existential(path: &CtlTreeNode) -> CtlTreeNode {
    match &path.node_type {
        NodeType::Unary(UnaryOp::X, child) => CtlTreeNode::mk_unary(
            CtlTreeNode::mk_unary(child.get_equivalent_restricted_formula(), UnaryOp::X),
            UnaryOp::E,
        ),
        NodeType::Unary(UnaryOp::F, child) => CtlTreeNode::mk_unary(
            CtlTreeNode::mk_binary(
                CtlTreeNode::mk_constant(true),
                child.get_equivalent_restricted_formula(),
                BinaryOp::U,
            ),
            UnaryOp::E,
        ),
        NodeType::Unary(UnaryOp::G, child) => CtlTreeNode::mk_unary(
            CtlTreeNode::mk_unary(child.get_equivalent_restricted_formula(), UnaryOp::G),
            UnaryOp::E,
        ),
        NodeType::Binary(BinaryOp::U, left, right) => CtlTreeNode::mk_unary(
            CtlTreeNode::mk_binary(
                left.get_equivalent_restricted_formula(),
                right.get_equivalent_restricted_formula(),
                BinaryOp::U,
            ),
            UnaryOp::E,
        ),
        NodeType::Binary(BinaryOp::R, left, right) => {
            let released = left.get_equivalent_restricted_formula();
            let invariant = right.get_equivalent_restricted_formula();
            // (φ and ψ) spelled inside the restricted fragment
            let both = CtlTreeNode::mk_unary(
                CtlTreeNode::mk_binary(lnot(&released), lnot(&invariant), BinaryOp::Or),
                UnaryOp::Not,
            );
            CtlTreeNode::mk_binary(
                CtlTreeNode::mk_unary(
                    CtlTreeNode::mk_binary(invariant.clone(), both, BinaryOp::U),
                    UnaryOp::E,
                ),
                CtlTreeNode::mk_unary(
                    CtlTreeNode::mk_unary(invariant, UnaryOp::G),
                    UnaryOp::E,
                ),
                BinaryOp::Or,
            )
        }
        // not a temporal operator; the checker rejects such quantifications
        _ => CtlTreeNode::mk_unary(path.get_equivalent_restricted_formula(), UnaryOp::E),
    }
}

/// Restricted form of `A path` via the `not E not` dual, with the negation
/// pushed through the path operator.
fn restricted_universal(path: &CtlTreeNode) -> CtlTreeNode {
    let dual = match &path.node_type {
        NodeType::Unary(UnaryOp::X, child) => CtlTreeNode::mk_unary(
            CtlTreeNode::mk_unary(
                lnot(&child.get_equivalent_restricted_formula()),
                UnaryOp::X,
            ),
            UnaryOp::E,
        ),
        NodeType::Unary(UnaryOp::F, child) => CtlTreeNode::mk_unary(
            CtlTreeNode::mk_unary(
                lnot(&child.get_equivalent_restricted_formula()),
                UnaryOp::G,
            ),
            UnaryOp::E,
        ),
        NodeType::Unary(UnaryOp::G, child) => CtlTreeNode::mk_unary(
            CtlTreeNode::mk_binary(
                CtlTreeNode::mk_constant(true),
                lnot(&child.get_equivalent_restricted_formula()),
                BinaryOp::U,
            ),
            UnaryOp::E,
        ),
        // A(φ U ψ) == not (E(not ψ U not (φ or ψ)) or E G not ψ)
        NodeType::Binary(BinaryOp::U, left, right) => {
            let holds = left.get_equivalent_restricted_formula();
            let target = right.get_equivalent_restricted_formula();
            let neither = CtlTreeNode::mk_unary(
                CtlTreeNode::mk_binary(holds, target.clone(), BinaryOp::Or),
                UnaryOp::Not,
            );
            CtlTreeNode::mk_binary(
                CtlTreeNode::mk_unary(
                    CtlTreeNode::mk_binary(lnot(&target), neither, BinaryOp::U),
                    UnaryOp::E,
                ),
                CtlTreeNode::mk_unary(
                    CtlTreeNode::mk_unary(lnot(&target), UnaryOp::G),
                    UnaryOp::E,
                ),
                BinaryOp::Or,
            )
        }
        // A(φ R ψ) == not E(not φ U not ψ)
        NodeType::Binary(BinaryOp::R, left, right) => CtlTreeNode::mk_unary(
            CtlTreeNode::mk_binary(
                lnot(&left.get_equivalent_restricted_formula()),
                lnot(&right.get_equivalent_restricted_formula()),
                BinaryOp::U,
            ),
            UnaryOp::E,
        ),
        // not a temporal operator; the checker rejects such quantifications
        _ => CtlTreeNode::mk_unary(
            lnot(&path.get_equivalent_restricted_formula()),
            UnaryOp::E,
        ),
    };
    CtlTreeNode::mk_unary(dual, UnaryOp::Not)
}

/// Conjoin the fair atom at the point where the path operator commits: the
/// next state for `X`, the released/target state for `U`, `R` and `F`, every
/// state for `G`.
fn commit_to_fair_path(path: CtlTreeNode, fair_atom: &CtlTreeNode) -> CtlTreeNode {
    let with_fair = |formula: &CtlTreeNode| {
        CtlTreeNode::mk_binary(formula.clone(), fair_atom.clone(), BinaryOp::And)
    };
    match &path.node_type {
        NodeType::Unary(op, child) if op.is_path_operator() => {
            CtlTreeNode::mk_unary(with_fair(child), *op)
        }
        NodeType::Binary(op @ (BinaryOp::U | BinaryOp::R), left, right) => {
            CtlTreeNode::mk_binary(left.as_ref().clone(), with_fair(right), *op)
        }
        _ => with_fair(&path),
    }
}

/// Negation of a path formula, pushed through the outermost temporal operator
/// (`not X φ == X not φ`, `not F φ == G not φ`, `not (φ U ψ) == (not φ R not ψ)`,
/// and vice versa).
fn negated_path_formula(path: &CtlTreeNode) -> CtlTreeNode {
    match &path.node_type {
        NodeType::Unary(UnaryOp::X, child) => CtlTreeNode::mk_unary(lnot(child), UnaryOp::X),
        NodeType::Unary(UnaryOp::F, child) => CtlTreeNode::mk_unary(lnot(child), UnaryOp::G),
        NodeType::Unary(UnaryOp::G, child) => CtlTreeNode::mk_unary(lnot(child), UnaryOp::F),
        NodeType::Binary(BinaryOp::U, left, right) => {
            CtlTreeNode::mk_binary(lnot(left), lnot(right), BinaryOp::R)
        }
        NodeType::Binary(BinaryOp::R, left, right) => {
            CtlTreeNode::mk_binary(lnot(left), lnot(right), BinaryOp::U)
        }
        _ => lnot(path),
    }
}
