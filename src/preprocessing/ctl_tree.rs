//! A syntax tree struct for CTL formulae and functionality for its manipulation.

use crate::preprocessing::operator_enums::*;
use crate::preprocessing::parser::parse_ctl_tokens;
use crate::preprocessing::tokenizer::CtlToken;

use rand::prelude::StdRng;
use rand::{RngCore, SeedableRng};
use std::cmp;
use std::fmt;
use std::rc::Rc;

/// Enum of possible node types in a CTL formula syntax tree.
///
/// In particular, a node can be:
///     - A "terminal" node, containing an atomic value (proposition or constant).
///     - A "unary" node, with a `UnaryOp` and a single sub-formula.
///     - A "binary" node, with a `BinaryOp` and two sub-formulae.
///
/// Sub-formulae are held behind `Rc` handles, so rewrites can share unchanged
/// subtrees instead of copying them.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum NodeType {
    Terminal(Atomic),
    Unary(UnaryOp, Rc<CtlTreeNode>),
    Binary(BinaryOp, Rc<CtlTreeNode>, Rc<CtlTreeNode>),
}

/// A single node in a syntax tree of a CTL formula.
///
/// Each node tracks its:
///     - `formula_str`; A canonical string rendering of the formula rooted at
///       this node, computed once at construction. The rendering is the key
///       of the labelling map during model checking, so two nodes with equal
///       strings are treated as the same formula.
///     - `height`; A positive integer starting from 0 (for terminals).
///     - `node_type`; A collection of node data represented through [NodeType].
///
/// Nodes are immutable after construction.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CtlTreeNode {
    pub formula_str: String,
    pub height: u32,
    pub node_type: NodeType,
}

impl CtlTreeNode {
    /// "Parse" a new [CtlTreeNode] from a list of [CtlToken] objects.
    ///
    /// Note that this is a very "low-level" function. Unless you know what you
    /// are doing, you should probably use [crate::preprocessing::parser] instead.
    pub fn from_tokens(tokens: &[CtlToken]) -> Result<CtlTreeNode, String> {
        parse_ctl_tokens(tokens)
    }

    /// Create a "unary" [CtlTreeNode] from the given arguments.
    ///
    /// The canonical rendering is `not φ` for negation and `Op(φ)` for the
    /// path quantifiers and unary temporal operators.
    pub fn mk_unary(child: CtlTreeNode, op: UnaryOp) -> CtlTreeNode {
        let formula_str = if matches!(op, UnaryOp::Not) {
            format!("{op} {child}")
        } else {
            format!("{op}({child})")
        };
        CtlTreeNode {
            formula_str,
            height: child.height + 1,
            node_type: NodeType::Unary(op, Rc::new(child)),
        }
    }

    /// Create a "binary" [CtlTreeNode] from the given arguments.
    ///
    /// Every binary operator renders as `(φ op ψ)`.
    pub fn mk_binary(left: CtlTreeNode, right: CtlTreeNode, op: BinaryOp) -> CtlTreeNode {
        CtlTreeNode {
            formula_str: format!("({left} {op} {right})"),
            height: cmp::max(left.height, right.height) + 1,
            node_type: NodeType::Binary(op, Rc::new(left), Rc::new(right)),
        }
    }

    /// Create a [CtlTreeNode] representing a Boolean constant.
    pub fn mk_constant(constant_val: bool) -> CtlTreeNode {
        Self::mk_atom(Atomic::from(constant_val))
    }

    /// Create a [CtlTreeNode] representing an atomic proposition.
    pub fn mk_proposition(prop_name: &str) -> CtlTreeNode {
        Self::mk_atom(Atomic::Prop(prop_name.to_string()))
    }

    /// A helper function which creates a new [CtlTreeNode] for the given [Atomic] value.
    fn mk_atom(atom: Atomic) -> CtlTreeNode {
        CtlTreeNode {
            formula_str: atom.to_string(),
            height: 0,
            node_type: NodeType::Terminal(atom),
        }
    }

    /// A state formula is true or false of a state; a path formula is true or
    /// false of a path. Terminals and quantified formulae are state formulae,
    /// bare temporal operators are not, and logical connectives are state
    /// formulae iff all their operands are.
    pub fn is_state_formula(&self) -> bool {
        match &self.node_type {
            NodeType::Terminal(_) => true,
            NodeType::Unary(UnaryOp::A | UnaryOp::E, _) => true,
            NodeType::Unary(UnaryOp::Not, child) => child.is_state_formula(),
            NodeType::Unary(_, _) => false,
            NodeType::Binary(BinaryOp::U | BinaryOp::R, _, _) => false,
            NodeType::Binary(_, left, right) => {
                left.is_state_formula() && right.is_state_formula()
            }
        }
    }

    /// Create a new random tree containing Boolean operations and propositions.
    /// The `tree_height` is the number of levels in the tree (not counting
    /// random negation nodes between each "level"). The number of leaves will
    /// be `2^tree_height`.
    pub fn new_random_boolean(
        tree_height: u8,
        propositions: &Vec<String>,
        seed: u64,
    ) -> CtlTreeNode {
        let num_props = propositions.len() as u32;
        let mut rand = StdRng::seed_from_u64(seed);

        if tree_height <= 1 {
            let prop_index = rand.next_u32() % num_props;
            let prop = propositions.get(prop_index as usize).unwrap();
            return CtlTreeNode::mk_proposition(prop);
        }

        let binary_op = match rand.next_u32() % 3 {
            0 => BinaryOp::And,
            1 => BinaryOp::Or,
            _ => BinaryOp::Imply,
        };

        let binary_node = CtlTreeNode::mk_binary(
            CtlTreeNode::new_random_boolean(tree_height - 1, propositions, rand.next_u64()),
            CtlTreeNode::new_random_boolean(tree_height - 1, propositions, rand.next_u64()),
            binary_op,
        );

        let negate = rand.next_u32() % 2 == 0;
        if negate {
            CtlTreeNode::mk_unary(binary_node, UnaryOp::Not)
        } else {
            binary_node
        }
    }
}

impl CtlTreeNode {
    pub fn as_str(&self) -> &str {
        self.formula_str.as_str()
    }
}

impl fmt::Display for CtlTreeNode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.formula_str)
    }
}
