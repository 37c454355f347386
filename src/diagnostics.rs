use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Info => write!(f, "[info] {}", self.message),
            Severity::Warning => write!(f, "[warn] {}", self.message),
        }
    }
}

/// Advisory messages raised while building a manifest.
///
/// Messages below the threshold are dropped. Everything kept is also forwarded to
/// the `log` facade, so a binary gets console output for free while an embedding
/// caller can read [`Diagnostics::messages`] instead.
#[derive(Clone, Debug)]
pub struct Diagnostics {
    threshold: Severity,
    messages: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new(threshold: Severity) -> Self {
        Self {
            threshold,
            messages: Vec::new(),
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Severity::Info, message.into());
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(Severity::Warning, message.into());
    }

    fn push(&mut self, severity: Severity, message: String) {
        if severity < self.threshold {
            return;
        }

        match severity {
            Severity::Info => log::info!("{message}"),
            Severity::Warning => log::warn!("{message}"),
        }

        self.messages.push(Diagnostic { severity, message });
    }

    pub fn messages(&self) -> &[Diagnostic] {
        &self.messages
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.messages()
            .iter()
            .filter(|diagnostic| diagnostic.severity == Severity::Warning)
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(Severity::Info)
    }
}
