use std::collections::HashMap;

use muse_core::Symbol;

/// A successful match result: a mapping from variable names to the `Symbol`
/// they were bound to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment(pub HashMap<String, Symbol>);

impl Assignment {
    pub fn get(&self, name: &str) -> Option<Symbol> {
        self.0.get(name).copied()
    }
}

#[derive(Clone, Debug)]
pub(crate) enum Value {
    Number(i32),
    Str(String),
    Supremum,
    Infimum,
}

/// A compiled pattern, ready to be matched against ground symbols.
#[derive(Clone, Debug)]
pub enum Matcher {
    /// A literal value: an integer, a quoted string, `#sup` or `#inf`.
    Value(Value),
    /// A variable (`X`, `Foo`) or the anonymous wildcard `_`.
    Variable(String),
    /// A function or tuple: `f(X, 10)`, `(X, Y)`. An empty `name` denotes a
    /// tuple, which is always positive.
    Function {
        name: String,
        arguments: Vec<Matcher>,
        positive: bool,
    },
}

impl Matcher {
    pub fn matches(&self, symbol: Symbol) -> Option<Assignment> {
        let mut assignment = Assignment::default();
        if self.match_into(symbol, &mut assignment) {
            Some(assignment)
        } else {
            None
        }
    }

    fn match_into(&self, symbol: Symbol, assignment: &mut Assignment) -> bool {
        match self {
            Matcher::Value(Value::Number(n)) => symbol.as_number() == Some(*n),
            Matcher::Value(Value::Str(s)) => symbol.as_string().as_deref() == Some(s.as_str()),
            Matcher::Value(Value::Supremum) => symbol.is_supremum(),
            Matcher::Value(Value::Infimum) => symbol.is_infimum(),
            Matcher::Variable(name) => {
                if name == "_" {
                    return true;
                }
                match assignment.0.get(name) {
                    Some(bound) => *bound == symbol,
                    None => {
                        assignment.0.insert(name.clone(), symbol);
                        true
                    }
                }
            }
            Matcher::Function {
                name,
                arguments,
                positive,
            } => {
                let (Ok(sym_name), Ok(sym_arity), Ok(sym_positive), Ok(sym_args)) =
                    (symbol.name(), symbol.arity(), symbol.is_positive(), symbol.arguments())
                else {
                    return false;
                };
                if name.is_empty() {
                    // Tuples: empty function name, always positive, arity must line up.
                    sym_name.is_empty()
                        && sym_arity == arguments.len()
                        && arguments
                            .iter()
                            .zip(sym_args.iter())
                            .all(|(m, &a)| m.match_into(a, assignment))
                } else {
                    sym_name == name.as_str()
                        && sym_arity == arguments.len()
                        && sym_positive == *positive
                        && arguments
                            .iter()
                            .zip(sym_args.iter())
                            .all(|(m, &a)| m.match_into(a, assignment))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn compile(pattern: &str) -> Matcher {
        Parser::new(pattern).unwrap().parse().unwrap()
    }

    #[test]
    fn variable_binds_then_requires_equality() {
        let m = compile("f(X, X)");
        let a = Symbol::number(1);
        let b = Symbol::number(2);
        let same = Symbol::function("f", &[a, a], true).unwrap();
        let different = Symbol::function("f", &[a, b], true).unwrap();
        assert!(m.matches(same).is_some());
        assert!(m.matches(different).is_none());
    }

    #[test]
    fn anonymous_variable_never_constrains() {
        let m = compile("f(_, _)");
        let a = Symbol::number(1);
        let b = Symbol::number(2);
        let sym = Symbol::function("f", &[a, b], true).unwrap();
        assert!(m.matches(sym).is_some());
    }

    #[test]
    fn assignment_exposes_bound_variables() {
        let m = compile("f(X)");
        let sym = Symbol::function("f", &[Symbol::number(7)], true).unwrap();
        let assignment = m.matches(sym).unwrap();
        assert_eq!(assignment.get("X"), Some(Symbol::number(7)));
    }

    #[test]
    fn signature_mismatch_fails() {
        let m = compile("f(X)");
        let sym = Symbol::function("g", &[Symbol::number(7)], true).unwrap();
        assert!(m.matches(sym).is_none());
    }

    #[test]
    fn negated_function_requires_negative_symbol() {
        let m = compile("-f(X)");
        let positive = Symbol::function("f", &[Symbol::number(1)], true).unwrap();
        let negative = Symbol::function("f", &[Symbol::number(1)], false).unwrap();
        assert!(m.matches(positive).is_none());
        assert!(m.matches(negative).is_some());
    }

    #[test]
    fn tuple_matches_only_tuples_of_same_arity() {
        let m = compile("(X, Y)");
        let tuple = Symbol::tuple(&[Symbol::number(1), Symbol::number(2)]).unwrap();
        let function = Symbol::function("f", &[Symbol::number(1), Symbol::number(2)], true).unwrap();
        assert!(m.matches(tuple).is_some());
        assert!(m.matches(function).is_none());
    }

    #[test]
    fn string_and_number_literals_match_by_value() {
        assert!(compile("\"hi\"").matches(Symbol::string("hi").unwrap()).is_some());
        assert!(compile("\"hi\"").matches(Symbol::string("bye").unwrap()).is_none());
        assert!(compile("42").matches(Symbol::number(42)).is_some());
    }
}
