//! Status lines for `tips build` and `tips check`.
//!
//! Everything here goes to stderr. `tips build` without `--out` writes the
//! index artifact to stdout, so status text must never land there.

use console::{Style, Term};

/// Styled status writer.
///
/// Colors are dropped automatically when stderr is not a terminal.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
        }
    }

    /// Plain progress line, e.g. the resolved source directory.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Final line of a successful run: artifact path or document count.
    pub(crate) fn success(&self, msg: &str) {
        let _ = self.term.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Non-fatal condition, such as a source with nothing to index.
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.term.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// One failing document (`<id>: <Kind>: <detail>`), the failure
    /// summary, or a configuration/IO error.
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }
}
