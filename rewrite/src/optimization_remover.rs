use crate::statement::split_statements;

/// Deletes every `#minimize`/`#maximize` statement from a program, leaving
/// everything else untouched.
pub struct OptimizationRemover;

impl OptimizationRemover {
    pub fn process_string(&self, text: &str) -> String {
        split_statements(text, "<string>")
            .into_iter()
            .filter(|stmt| !is_optimization_statement(&stmt.text))
            .map(|stmt| stmt.text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn is_optimization_statement(statement: &str) -> bool {
    let trimmed = statement.trim_start();
    trimmed.starts_with("#minimize") || trimmed.starts_with("#maximize")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_minimize_statements() {
        let remover = OptimizationRemover;
        let out = remover.process_string("a.\n#minimize { 1,X : tag(X) }.\nb.");
        assert_eq!(out, "a.\nb.");
    }

    #[test]
    fn removes_maximize_statements() {
        let remover = OptimizationRemover;
        let out = remover.process_string("#maximize { 1@2,X : tag(X) }.\nb.");
        assert_eq!(out, "b.");
    }

    #[test]
    fn leaves_other_directives_untouched() {
        let remover = OptimizationRemover;
        let out = remover.process_string("#const n = 3.\na.");
        assert_eq!(out, "#const n = 3.\na.");
    }
}
