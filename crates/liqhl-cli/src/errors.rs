use colored::*;

/// A fatal error as shown to the user, with optional hints.
pub struct Report {
    pub message: String,
    pub causes: Vec<String>,
    pub help: Option<String>,
}

impl Report {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            causes: Vec::new(),
            help: None,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}", "error:".red().bold(), self.message.bold());

        for cause in &self.causes {
            eprintln!("  {} {}", "caused by:".yellow(), cause);
        }

        if let Some(help) = &self.help {
            eprintln!();
            eprintln!("{} {}", "help:".cyan().bold(), help);
        }
    }
}

/// Splits an `anyhow` chain into a headline and its causes.
pub fn report(err: &anyhow::Error) -> Report {
    let mut chain = err.chain().map(|cause| cause.to_string());
    let mut report = Report::new(chain.next().unwrap_or_default());
    report.causes = chain.collect();

    if report.message.contains("config file") {
        report.with_help("Run `liqhl init` to write a fresh .liqhlrc")
    } else {
        report
    }
}
