/// Whether `statement` is a directive (`#minimize`, `#maximize`, `#const`,
/// `#show`, `#program`, ...) rather than a rule.
pub fn is_directive(statement: &str) -> bool {
    statement.trim_start().starts_with('#')
}

/// Splits a rule into `(head, body)` on the first top-level `:-`. `body` is
/// `None` for facts and choice rules; `head` is `None` for a bodiless
/// integrity constraint (`:- B.`).
pub fn split_head_body(statement: &str) -> (Option<&str>, Option<&str>) {
    let inner = statement.trim().trim_end_matches('.').trim();
    match find_top_level_arrow(inner) {
        Some(pos) => {
            let head = inner[..pos].trim();
            let body = inner[pos + 2..].trim();
            (if head.is_empty() { None } else { Some(head) }, Some(body))
        }
        None => (Some(inner), None),
    }
}

/// Whether `statement` is an integrity constraint: `:- B.` with no head.
pub fn is_integrity_constraint(statement: &str) -> bool {
    matches!(split_head_body(statement), (None, Some(_)))
}

fn find_top_level_arrow(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0i32;
    let mut in_string = false;
    let mut i = 0usize;
    while i + 1 < bytes.len() {
        let c = bytes[i] as char;
        if in_string {
            if c == '\\' {
                i += 2;
                continue;
            }
            if c == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        match c {
            '"' => in_string = true,
            '(' | '{' => depth += 1,
            ')' | '}' => depth -= 1,
            ':' if depth == 0 && bytes[i + 1] as char == '-' => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}

/// The `(name, arity)` signature of a simple atomic head (`name` or
/// `name(arg, ...)`, optionally classically negated with a leading `-`).
/// Returns `None` for heads that are not a single atom (aggregates,
/// disjunctions, choices) since those never arise as the head of a fact.
pub fn atom_signature(head: &str) -> Option<(String, usize)> {
    let head = head.trim();
    let head = head.strip_prefix('-').unwrap_or(head).trim();
    if head.is_empty() {
        return None;
    }
    let first = head.chars().next()?;
    if !(first.is_ascii_lowercase() || first == '_' || first == '\'') {
        return None;
    }
    match head.find('(') {
        None => {
            if head.chars().all(is_identifier_char) {
                Some((head.to_string(), 0))
            } else {
                None
            }
        }
        Some(paren) => {
            let name = &head[..paren];
            if !name.chars().all(is_identifier_char) {
                return None;
            }
            if !head.ends_with(')') {
                return None;
            }
            let args = &head[paren + 1..head.len() - 1];
            let arity = top_level_comma_split(args).len();
            Some((name.to_string(), arity))
        }
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '\''
}

/// Splits `args` on top-level commas, respecting nested parens/braces and
/// string literals.
pub fn top_level_comma_split(args: &str) -> Vec<&str> {
    if args.trim().is_empty() {
        return Vec::new();
    }
    let bytes = args.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut in_string = false;
    let mut start = 0usize;
    let mut i = 0usize;
    while i < bytes.len() {
        let c = bytes[i] as char;
        if in_string {
            if c == '\\' {
                i += 2;
                continue;
            }
            if c == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        match c {
            '"' => in_string = true,
            '(' | '{' => depth += 1,
            ')' | '}' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(args[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    parts.push(args[start..].trim());
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_directives() {
        assert!(is_directive("#minimize { 1,X : tag(X) }."));
        assert!(!is_directive("a :- b."));
    }

    #[test]
    fn splits_fact_as_head_only() {
        assert_eq!(split_head_body("a."), (Some("a"), None));
    }

    #[test]
    fn splits_rule_into_head_and_body() {
        assert_eq!(split_head_body("a :- b, c."), (Some("a"), Some("b, c")));
    }

    #[test]
    fn integrity_constraint_has_no_head() {
        assert_eq!(split_head_body(":- a, not b."), (None, Some("a, not b")));
        assert!(is_integrity_constraint(":- a, not b."));
        assert!(!is_integrity_constraint("a :- b."));
    }

    #[test]
    fn arrow_inside_nested_structure_is_not_top_level() {
        // A guard-like body that happens to contain ":-"-looking text inside
        // a string must not be mistaken for the rule's own arrow.
        let (head, body) = split_head_body(r#"msg("a:-b") :- c."#);
        assert_eq!(head, Some(r#"msg("a:-b")"#));
        assert_eq!(body, Some("c"));
    }

    #[test]
    fn atom_signature_of_zero_arity_atom() {
        assert_eq!(atom_signature("foo"), Some(("foo".to_string(), 0)));
    }

    #[test]
    fn atom_signature_of_function() {
        assert_eq!(atom_signature("foo(X, 1)"), Some(("foo".to_string(), 2)));
    }

    #[test]
    fn atom_signature_ignores_classical_negation() {
        assert_eq!(atom_signature("-foo(X)"), Some(("foo".to_string(), 1)));
    }

    #[test]
    fn atom_signature_none_for_aggregate_head() {
        assert_eq!(atom_signature("1 { a; b } 1"), None);
    }

    #[test]
    fn comma_split_respects_nesting_and_strings() {
        assert_eq!(
            top_level_comma_split(r#"f(1,2), "a,b", g()"#),
            vec!["f(1,2)", "\"a,b\"", "g()"]
        );
    }
}
