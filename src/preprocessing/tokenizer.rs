//! Contains functionality regarding the tokenizing of CTL formula strings.
//!
//! Operators can be written symbolically (`~`, `&`, `|`, `->`) or as words
//! (`not`, `and`, `or`). The single letters `A`, `E`, `X`, `F`, `G`, `U`, `R`
//! and the compounds `EX`, `EF`, `EG`, `AX`, `AF`, `AG` are reserved operator
//! names; any other alphanumeric word is a proposition name (so `EXtra` is a
//! proposition, not `E X tra`).

use crate::preprocessing::operator_enums::*;

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

/// Enum of all possible tokens occurring in a CTL formula string.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum CtlToken {
    /// Unary operators: `~`/`not`, `A`, `E`, `X`, `F`, `G`.
    Unary(UnaryOp),
    /// Binary operators: `&`/`and`, `|`/`or`, `->`, `U`, `R`.
    Binary(BinaryOp),
    /// Proposition or `true`/`false` constant. Constants are kept as
    /// propositions here and only distinguished during parsing.
    Atom(Atomic),
    /// A block of tokens inside parentheses.
    Tokens(Vec<CtlToken>),
}

/// Try to tokenize the given CTL formula string.
pub fn try_tokenize_formula(formula: String) -> Result<Vec<CtlToken>, String> {
    try_tokenize_recursive(&mut formula.chars().peekable(), true)
}

/// Process a peekable iterator of characters into a vector of [CtlToken]s.
fn try_tokenize_recursive(
    input_chars: &mut Peekable<Chars>,
    top_level: bool,
) -> Result<Vec<CtlToken>, String> {
    let mut output = Vec::new();

    while let Some(c) = input_chars.next() {
        match c {
            c if c.is_whitespace() => {} // skip whitespace
            '~' => output.push(CtlToken::Unary(UnaryOp::Not)),
            '&' => output.push(CtlToken::Binary(BinaryOp::And)),
            '|' => output.push(CtlToken::Binary(BinaryOp::Or)),
            '-' => {
                if Some('>') == input_chars.next() {
                    output.push(CtlToken::Binary(BinaryOp::Imply));
                } else {
                    return Err("Expected '>' after '-'.".to_string());
                }
            }
            ')' => {
                return if !top_level {
                    Ok(output)
                } else {
                    Err("Unexpected ')' without opening counterpart.".to_string())
                };
            }
            '(' => {
                // start a nested token group
                let token_group = try_tokenize_recursive(input_chars, false)?;
                output.push(CtlToken::Tokens(token_group));
            }
            // operator word, proposition name, or constant
            c if is_valid_in_name(c) => {
                let name = c.to_string() + &collect_name(input_chars);
                output.extend(tokens_for_name(name));
            }
            _ => return Err(format!("Unexpected char '{c}'.")),
        }
    }

    if top_level {
        Ok(output)
    } else {
        Err("Expected ')' to previously encountered opening counterpart.".to_string())
    }
}

/// Classify a collected word as operator token(s) or a proposition atom.
/// Compound quantifier-temporal words expand into two unary tokens.
fn tokens_for_name(name: String) -> Vec<CtlToken> {
    match name.as_str() {
        "not" => vec![CtlToken::Unary(UnaryOp::Not)],
        "and" => vec![CtlToken::Binary(BinaryOp::And)],
        "or" => vec![CtlToken::Binary(BinaryOp::Or)],
        "A" => vec![CtlToken::Unary(UnaryOp::A)],
        "E" => vec![CtlToken::Unary(UnaryOp::E)],
        "X" => vec![CtlToken::Unary(UnaryOp::X)],
        "F" => vec![CtlToken::Unary(UnaryOp::F)],
        "G" => vec![CtlToken::Unary(UnaryOp::G)],
        "U" => vec![CtlToken::Binary(BinaryOp::U)],
        "R" => vec![CtlToken::Binary(BinaryOp::R)],
        "EX" => vec![CtlToken::Unary(UnaryOp::E), CtlToken::Unary(UnaryOp::X)],
        "EF" => vec![CtlToken::Unary(UnaryOp::E), CtlToken::Unary(UnaryOp::F)],
        "EG" => vec![CtlToken::Unary(UnaryOp::E), CtlToken::Unary(UnaryOp::G)],
        "AX" => vec![CtlToken::Unary(UnaryOp::A), CtlToken::Unary(UnaryOp::X)],
        "AF" => vec![CtlToken::Unary(UnaryOp::A), CtlToken::Unary(UnaryOp::F)],
        "AG" => vec![CtlToken::Unary(UnaryOp::A), CtlToken::Unary(UnaryOp::G)],
        _ => vec![CtlToken::Atom(Atomic::Prop(name))],
    }
}

/// Check if given char can appear in a name.
fn is_valid_in_name(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Retrieve the rest of a name from the input; the first character has
/// already been consumed by the caller.
fn collect_name(input_chars: &mut Peekable<Chars>) -> String {
    let mut name = Vec::new();
    while let Some(c) = input_chars.peek() {
        if !is_valid_in_name(*c) {
            break;
        }
        name.push(*c);
        input_chars.next(); // advance iterator
    }
    name.into_iter().collect()
}

impl fmt::Display for CtlToken {
    /// Display tokens for debug purposes.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CtlToken::Unary(op) => write!(f, "{op}"),
            CtlToken::Binary(op) => write!(f, "{op}"),
            CtlToken::Atom(atom) => write!(f, "{atom}"),
            CtlToken::Tokens(_) => write!(f, "( TOKENS )"), // debug purposes only
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::preprocessing::operator_enums::*;
    use crate::preprocessing::tokenizer::{try_tokenize_formula, CtlToken};

    #[test]
    /// Test tokenization process on several valid CTL formulae, covering
    /// both word and symbol syntax for the logical operators.
    fn tokenize_valid_formulae() {
        let formula = "E(p U q)".to_string();
        let tokens = try_tokenize_formula(formula).unwrap();
        let expected_tokens = vec![
            CtlToken::Unary(UnaryOp::E),
            CtlToken::Tokens(vec![
                CtlToken::Atom(Atomic::Prop("p".to_string())),
                CtlToken::Binary(BinaryOp::U),
                CtlToken::Atom(Atomic::Prop("q".to_string())),
            ]),
        ];
        assert_eq!(tokens, expected_tokens);

        let formula = "~p & (q | r) -> true".to_string();
        let formula_v2 = "not p and (q or r) -> true".to_string();
        let tokens = try_tokenize_formula(formula).unwrap();
        let tokens_v2 = try_tokenize_formula(formula_v2).unwrap();
        let expected_tokens = vec![
            CtlToken::Unary(UnaryOp::Not),
            CtlToken::Atom(Atomic::Prop("p".to_string())),
            CtlToken::Binary(BinaryOp::And),
            CtlToken::Tokens(vec![
                CtlToken::Atom(Atomic::Prop("q".to_string())),
                CtlToken::Binary(BinaryOp::Or),
                CtlToken::Atom(Atomic::Prop("r".to_string())),
            ]),
            CtlToken::Binary(BinaryOp::Imply),
            CtlToken::Atom(Atomic::Prop("true".to_string())),
        ];
        assert_eq!(tokens, expected_tokens);
    }

    #[test]
    /// Compound quantifier-temporal words expand into two unary tokens, while
    /// longer words stay propositions.
    fn tokenize_compound_operators() {
        let tokens = try_tokenize_formula("AG EF p".to_string()).unwrap();
        let expected_tokens = vec![
            CtlToken::Unary(UnaryOp::A),
            CtlToken::Unary(UnaryOp::G),
            CtlToken::Unary(UnaryOp::E),
            CtlToken::Unary(UnaryOp::F),
            CtlToken::Atom(Atomic::Prop("p".to_string())),
        ];
        assert_eq!(tokens, expected_tokens);

        // names that merely start with an operator prefix are propositions
        let tokens = try_tokenize_formula("EXtra U Ready".to_string()).unwrap();
        let expected_tokens = vec![
            CtlToken::Atom(Atomic::Prop("EXtra".to_string())),
            CtlToken::Binary(BinaryOp::U),
            CtlToken::Atom(Atomic::Prop("Ready".to_string())),
        ];
        assert_eq!(tokens, expected_tokens);
    }

    #[test]
    /// Test tokenization process on a CTL formula with several whitespaces.
    fn tokenize_with_whitespaces() {
        let valid_formula = "  E   ( p   U    q )   ";
        assert!(try_tokenize_formula(valid_formula.to_string()).is_ok());
    }

    #[test]
    /// Test tokenization process on several invalid CTL formulae.
    fn tokenize_invalid_formulae() {
        let invalid_formulae = vec![
            "p & q)",
            "( p & q",
            "p # q",
            "p - q",
            "p < q",
            "p ! q",
        ];

        for formula in invalid_formulae {
            assert!(try_tokenize_formula(formula.to_string()).is_err());
        }
    }
}
