//! Contains functionality regarding parsing a formula (or formula tokens)
//! into a syntax tree.
//!
//! The operator precedence is following (the lower, the stronger):
//!  - unary operators (negation + quantifiers + unary temporal): 1
//!  - binary temporal operators ('U', 'R'): 2
//!  - boolean binary operators: and=3, or=4, imp=5
//!
//! All binary operators are right-associative.

use crate::preprocessing::ctl_tree::*;
use crate::preprocessing::operator_enums::*;
use crate::preprocessing::tokenizer::{try_tokenize_formula, CtlToken};

/// Parse a CTL formula string representation into an actual formula tree.
/// Basically a wrapper for tokenize+parse.
///
/// The parser accepts any well-formed formula tree, including bare path
/// formulae; whether the tree is a state formula is checked by the
/// model-checking entry point.
pub fn parse_ctl_formula(formula: &str) -> Result<CtlTreeNode, String> {
    let tokens = try_tokenize_formula(formula.to_string())?;
    let tree = parse_ctl_tokens(&tokens)?;
    Ok(tree)
}

/// Predicate for whether given token represents a temporal binary operator.
fn is_binary_temporal(token: &CtlToken) -> bool {
    matches!(
        token,
        CtlToken::Binary(BinaryOp::U) | CtlToken::Binary(BinaryOp::R)
    )
}

/// Predicate for whether given token represents an unary operator.
fn is_unary(token: &CtlToken) -> bool {
    matches!(token, CtlToken::Unary(_))
}

/// Utility method to find the first occurrence of a specific token in the token tree.
fn index_of_first(tokens: &[CtlToken], token: CtlToken) -> Option<usize> {
    tokens.iter().position(|t| *t == token)
}

/// Utility method to find the first occurrence of a binary temporal operator
/// in the token tree.
fn index_of_first_binary_temp(tokens: &[CtlToken]) -> Option<usize> {
    tokens.iter().position(is_binary_temporal)
}

/// Utility method to find the first occurrence of an unary operator in the token tree.
fn index_of_first_unary(tokens: &[CtlToken]) -> Option<usize> {
    tokens.iter().position(is_unary)
}

/// Parse `tokens` of a CTL formula into a syntax tree using recursive steps.
pub fn parse_ctl_tokens(tokens: &[CtlToken]) -> Result<CtlTreeNode, String> {
    parse_1_imply(tokens)
}

/// Recursive parsing step 1: extract `->` operators.
fn parse_1_imply(tokens: &[CtlToken]) -> Result<CtlTreeNode, String> {
    let imply_token = index_of_first(tokens, CtlToken::Binary(BinaryOp::Imply));
    Ok(if let Some(i) = imply_token {
        CtlTreeNode::mk_binary(
            parse_2_or(&tokens[..i])?,
            parse_1_imply(&tokens[(i + 1)..])?,
            BinaryOp::Imply,
        )
    } else {
        parse_2_or(tokens)?
    })
}

/// Recursive parsing step 2: extract `or` operators.
fn parse_2_or(tokens: &[CtlToken]) -> Result<CtlTreeNode, String> {
    let or_token = index_of_first(tokens, CtlToken::Binary(BinaryOp::Or));
    Ok(if let Some(i) = or_token {
        CtlTreeNode::mk_binary(
            parse_3_and(&tokens[..i])?,
            parse_2_or(&tokens[(i + 1)..])?,
            BinaryOp::Or,
        )
    } else {
        parse_3_and(tokens)?
    })
}

/// Recursive parsing step 3: extract `and` operators.
fn parse_3_and(tokens: &[CtlToken]) -> Result<CtlTreeNode, String> {
    let and_token = index_of_first(tokens, CtlToken::Binary(BinaryOp::And));
    Ok(if let Some(i) = and_token {
        CtlTreeNode::mk_binary(
            parse_4_binary_temp(&tokens[..i])?,
            parse_3_and(&tokens[(i + 1)..])?,
            BinaryOp::And,
        )
    } else {
        parse_4_binary_temp(tokens)?
    })
}

/// Recursive parsing step 4: extract binary temporal operators.
fn parse_4_binary_temp(tokens: &[CtlToken]) -> Result<CtlTreeNode, String> {
    let binary_token = index_of_first_binary_temp(tokens);
    Ok(if let Some(i) = binary_token {
        match &tokens[i] {
            CtlToken::Binary(op) => CtlTreeNode::mk_binary(
                parse_5_unary(&tokens[..i])?,
                parse_4_binary_temp(&tokens[(i + 1)..])?,
                *op,
            ),
            _ => unreachable!(), // we already made sure that this is indeed a binary token
        }
    } else {
        parse_5_unary(tokens)?
    })
}

/// Recursive parsing step 5: extract unary operators (negation, quantifiers,
/// unary temporal operators).
fn parse_5_unary(tokens: &[CtlToken]) -> Result<CtlTreeNode, String> {
    let unary_token = index_of_first_unary(tokens);
    Ok(if let Some(i) = unary_token {
        // unary operators are prefixes, nothing may stand before them
        if i > 0 {
            return Err(format!(
                "Unary operator can't be directly preceded by {}.",
                &tokens[i - 1]
            ));
        }

        match &tokens[i] {
            CtlToken::Unary(op) => {
                CtlTreeNode::mk_unary(parse_5_unary(&tokens[(i + 1)..])?, *op)
            }
            _ => unreachable!(), // we already made sure that this is indeed an unary token
        }
    } else {
        parse_6_terminal_and_parentheses(tokens)?
    })
}

/// Recursive parsing step 6: extract terminals and recursively solve
/// sub-formulae in parentheses.
fn parse_6_terminal_and_parentheses(tokens: &[CtlToken]) -> Result<CtlTreeNode, String> {
    if tokens.is_empty() {
        Err("Expected formula, found nothing.".to_string())
    } else {
        if tokens.len() == 1 {
            // This should be a proposition name or a parenthesis group,
            // anything else does not make sense (constants are still
            // tokenized as propositions at this point).
            match &tokens[0] {
                CtlToken::Atom(Atomic::Prop(name)) => {
                    return if name == "true" || name == "True" || name == "1" {
                        Ok(CtlTreeNode::mk_constant(true))
                    } else if name == "false" || name == "False" || name == "0" {
                        Ok(CtlTreeNode::mk_constant(false))
                    } else {
                        Ok(CtlTreeNode::mk_proposition(name.as_str()))
                    };
                }
                // recursively solve sub-formulae in parentheses
                CtlToken::Tokens(inner) => return parse_ctl_tokens(inner),
                _ => {} // otherwise, fall through to the error at the end
            }
        }
        Err(format!("Unexpected: {tokens:?}. Expecting formula."))
    }
}

#[cfg(test)]
mod tests {
    use crate::preprocessing::ctl_tree::CtlTreeNode;
    use crate::preprocessing::operator_enums::{BinaryOp, UnaryOp};
    use crate::preprocessing::parser::parse_ctl_formula;

    #[test]
    /// Test whether several valid CTL formulae are parsed without causing
    /// errors, and check the canonical renderings stored in the tree roots.
    fn parse_valid_formulae() {
        let tree = parse_ctl_formula("E(p U q)").unwrap();
        assert_eq!(tree.as_str(), "E((p U q))");

        let tree = parse_ctl_formula("AG (p -> EF q)").unwrap();
        assert_eq!(tree.as_str(), "A(G((p -> E(F(q)))))");

        let tree = parse_ctl_formula("~p & (q | r)").unwrap();
        assert_eq!(tree.as_str(), "(not p and (q or r))");

        // constants are unified to true/false, whichever way they are written
        let tree = parse_ctl_formula("True & 0 -> false").unwrap();
        assert_eq!(tree.as_str(), "((true and false) -> false)");
    }

    #[test]
    fn operator_priority() {
        assert_eq!(
            "((not a and not b) -> (not c or E(X(d))))",
            parse_ctl_formula("~a & ~b -> ~c | EX d").unwrap().as_str()
        );
    }

    #[test]
    fn operator_associativity() {
        assert_eq!(
            "(a and (b and c))",
            parse_ctl_formula("a & b & c").unwrap().as_str()
        );
        assert_eq!(
            "(a or (b or c))",
            parse_ctl_formula("a | b | c").unwrap().as_str()
        );
        assert_eq!(
            "(a -> (b -> c))",
            parse_ctl_formula("a -> b -> c").unwrap().as_str()
        );
        assert_eq!(
            "(a U (b U c))",
            parse_ctl_formula("a U b U c").unwrap().as_str()
        );
    }

    #[test]
    /// Test parsing of several valid CTL formulae against expected trees.
    fn compare_parser_with_expected() {
        let expected_tree = CtlTreeNode::mk_binary(
            CtlTreeNode::mk_constant(false),
            CtlTreeNode::mk_proposition("p1"),
            BinaryOp::And,
        );
        assert_eq!(parse_ctl_formula("(false & p1)").unwrap(), expected_tree);

        let expected_tree = CtlTreeNode::mk_unary(
            CtlTreeNode::mk_unary(
                CtlTreeNode::mk_binary(
                    CtlTreeNode::mk_proposition("p"),
                    CtlTreeNode::mk_proposition("q"),
                    BinaryOp::U,
                ),
                UnaryOp::E,
            ),
            UnaryOp::Not,
        );
        assert_eq!(parse_ctl_formula("~E(p U q)").unwrap(), expected_tree);
    }

    #[test]
    /// The canonical rendering of a parsed formula parses back to the same tree.
    fn canonical_rendering_round_trip() {
        let formulae = vec![
            "E(p U q)",
            "A(p R ~q)",
            "AG EF p",
            "p & q -> r | ~s",
            "E X (p & true)",
        ];
        for formula in formulae {
            let tree = parse_ctl_formula(formula).unwrap();
            let reparsed = parse_ctl_formula(tree.as_str()).unwrap();
            assert_eq!(tree, reparsed);
        }
    }

    #[test]
    /// Test parsing of several completely invalid CTL formulae.
    fn parse_invalid_formulae() {
        let invalid_formulae = vec![
            "",
            "p q",
            "p ~ q",
            "p &",
            "& p",
            "p U",
            "U p",
            "p (q)",
            "E p X",
            "p -> -> q",
        ];

        for formula in invalid_formulae {
            assert!(parse_ctl_formula(formula).is_err());
        }
    }
}
