use codespan_reporting::diagnostic::Severity;
use codespan_reporting::files::SimpleFile;

pub type File<'a> = SimpleFile<&'a str, &'a str>;
pub type Diagnostic = codespan_reporting::diagnostic::Diagnostic<()>;

/// One assembly run: the source text plus the file wrapper that
/// `codespan_reporting` needs to render line/column positions.
#[derive(Debug, Clone)]
pub struct Process<'a> {
    source: &'a str,
    file: File<'a>,
}

impl<'a> Process<'a> {
    #[must_use]
    pub fn new(source: &'a str, name: &'a str) -> Self {
        Self {
            source,
            file: SimpleFile::new(name, source),
        }
    }

    #[must_use]
    pub fn source(&self) -> &'a str {
        self.source
    }

    #[must_use]
    pub fn file(&self) -> &File<'a> {
        &self.file
    }
}

/// Knobs for a machine run.
#[derive(Debug, Copy, Clone, Default)]
pub struct RunConfig {
    /// Print each instruction to stderr as it executes.
    pub trace_execution: bool,
}

pub trait VmDiagnostic {
    fn severity(&self) -> Severity;
    fn to_diagnostic(&self, process: &Process) -> Diagnostic;
}
