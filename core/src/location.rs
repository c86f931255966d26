use std::fmt;

/// `(file, begin_line, end_line)` identifying where a constraint came from.
///
/// `file` is authoritative only when the producing component was given real
/// files to parse (`process_files`/`parse_files`); otherwise it is synthetic.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub file: String,
    pub begin_line: u32,
    pub end_line: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, begin_line: u32, end_line: u32) -> Self {
        SourceLocation {
            file: file.into(),
            begin_line,
            end_line,
        }
    }

    /// Location for text that was not attached to any real file (e.g. a
    /// program string passed to `process`/`parse_string` rather than
    /// `process_files`/`parse_files`).
    pub fn synthetic(begin_line: u32, end_line: u32) -> Self {
        SourceLocation::new("<string>", begin_line, end_line)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.begin_line == self.end_line {
            write!(f, "{}:line {}", self.file, self.begin_line)
        } else {
            write!(f, "{}:lines {}-{}", self.file, self.begin_line, self.end_line)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_line_renders_as_line() {
        let loc = SourceLocation::new("prog.lp", 4, 4);
        assert_eq!(loc.to_string(), "prog.lp:line 4");
    }

    #[test]
    fn multi_line_renders_as_range() {
        let loc = SourceLocation::new("prog.lp", 3, 5);
        assert_eq!(loc.to_string(), "prog.lp:lines 3-5");
    }

    #[test]
    fn synthetic_location_uses_placeholder_file() {
        let loc = SourceLocation::synthetic(1, 1);
        assert_eq!(loc.file, "<string>");
    }
}
