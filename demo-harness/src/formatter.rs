use colored::*;
use demo_core::{connection::ConnectError, report::ScenarioReport, scenarios::ScenarioError};

/// A wrapper struct for a formatted, colored string.
///
/// Implements `Display` so it can be printed directly.
pub struct FormattedString(pub String);

impl std::fmt::Display for FormattedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", self.0)?;
        Ok(())
    }
}

impl From<serde_json::Value> for FormattedString {
    fn from(value: serde_json::Value) -> Self {
        FormattedString(serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()))
    }
}

impl From<&ScenarioReport> for FormattedString {
    fn from(report: &ScenarioReport) -> Self {
        FormattedString(format!(
            "{}\n{}",
            format!("[{}]", report.scenario()).green().bold(),
            report
        ))
    }
}

impl From<ScenarioError> for FormattedString {
    fn from(err: ScenarioError) -> Self {
        match err {
            ScenarioError::Connect(err) => FormattedString::from(err),
            ScenarioError::Call { method, status } => FormattedString(format!(
                "{} {} code={:?} message={:?}",
                "gRPC Failed:".red().bold(),
                method.yellow(),
                status.code(),
                status.message()
            )),
            err => FormattedString(format!("{}\n\n'{}'", "Scenario Failed:".red().bold(), err)),
        }
    }
}

impl From<ConnectError> for FormattedString {
    fn from(err: ConnectError) -> Self {
        FormattedString(format!("{}\n\n'{}'", "Connection Error:".red().bold(), err))
    }
}
