use muse_core::SourceLocation;

/// One top-level program statement: a rule, directive, or `#program`
/// declaration, with the exact source text (including the terminating `.`)
/// and the line range it spans.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Statement {
    pub text: String,
    pub location: SourceLocation,
}

/// Splits `source` into top-level statements, each ending at a `.` that is
/// not part of a `..` range operator and is not nested inside a string,
/// a line/block comment, or unbalanced parentheses/braces.
///
/// `file` labels the resulting locations; pass `"<string>"` for text that
/// did not come from a real file.
pub fn split_statements(source: &str, file: &str) -> Vec<Statement> {
    let mut statements = Vec::new();
    let chars: Vec<char> = source.chars().collect();
    let mut i = 0usize;
    let mut line = 1u32;
    let mut start = None;
    let mut start_line = 1u32;
    let mut depth = 0i32;

    while i < chars.len() {
        let c = chars[i];

        if c == '\n' {
            line += 1;
            i += 1;
            continue;
        }
        if c.is_whitespace() {
            i += 1;
            continue;
        }
        if start.is_none() {
            start = Some(i);
            start_line = line;
        }

        // Line comment: skip to end of line.
        if c == '%' && chars.get(i + 1) != Some(&'*') {
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
            continue;
        }
        // Block comment: skip to closing `*%`.
        if c == '%' && chars.get(i + 1) == Some(&'*') {
            i += 2;
            while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'%')) {
                if chars[i] == '\n' {
                    line += 1;
                }
                i += 1;
            }
            i = (i + 2).min(chars.len());
            continue;
        }
        // String literal.
        if c == '"' {
            i += 1;
            while i < chars.len() && chars[i] != '"' {
                if chars[i] == '\\' {
                    i += 1;
                }
                if i < chars.len() && chars[i] == '\n' {
                    line += 1;
                }
                i += 1;
            }
            i += 1; // closing quote
            continue;
        }
        if c == '(' || c == '{' {
            depth += 1;
            i += 1;
            continue;
        }
        if c == ')' || c == '}' {
            depth -= 1;
            i += 1;
            continue;
        }
        if c == '.' && depth <= 0 {
            if chars.get(i + 1) == Some(&'.') {
                // `..` range operator, not a statement terminator.
                i += 2;
                continue;
            }
            let begin = start.take().unwrap_or(i);
            let text: String = chars[begin..=i].iter().collect();
            statements.push(Statement {
                text: text.trim().to_string(),
                location: SourceLocation::new(file.to_string(), start_line, line),
            });
            depth = 0;
            i += 1;
            continue;
        }
        i += 1;
    }

    statements
}
