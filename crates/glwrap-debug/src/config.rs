//! Runtime knobs of the debug output.

use std::env;

use anyhow::{anyhow, Context, Result};

/// What happens once `stop_after_errors` reports have been printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LimitAction {
    /// Abort the process, like an uncaught C++ exception would.
    #[default]
    Abort,
    /// Panic on the reporting thread.
    Panic,
}

/// Configuration of a [`DebugOutput`](crate::DebugOutput).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugConfig {
    /// Number of reports after which [`LimitAction`] fires. `None` never stops.
    pub stop_after_errors: Option<usize>,
    /// Look up the knowledge base explanation of driver errors.
    pub detailed_output: bool,
    /// Capture a backtrace for every report.
    pub print_backtrace: bool,
    /// Innermost backtrace frames to hide; these belong to the reporting
    /// machinery itself.
    pub skip_frames: usize,
    pub limit_action: LimitAction,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            stop_after_errors: Some(10),
            detailed_output: true,
            print_backtrace: true,
            skip_frames: 4,
            limit_action: LimitAction::Abort,
        }
    }
}

impl DebugConfig {
    pub const STOP_AFTER_ERRORS_VAR: &'static str = "GLWRAP_STOP_AFTER_ERRORS";
    pub const DETAILED_OUTPUT_VAR: &'static str = "GLWRAP_DETAILED_OUTPUT";
    pub const BACKTRACE_VAR: &'static str = "GLWRAP_BACKTRACE";

    /// Defaults overridden by the `GLWRAP_*` environment variables.
    ///
    /// `GLWRAP_STOP_AFTER_ERRORS` takes a count, `0` meaning never stop.
    /// `GLWRAP_DETAILED_OUTPUT` and `GLWRAP_BACKTRACE` take `0/1`,
    /// `true/false`, `on/off` or `yes/no`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`DebugConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup(Self::STOP_AFTER_ERRORS_VAR) {
            let count: usize = value
                .trim()
                .parse()
                .with_context(|| format!("invalid {}: {value:?}", Self::STOP_AFTER_ERRORS_VAR))?;
            config.stop_after_errors = (count != 0).then_some(count);
        }
        if let Some(value) = lookup(Self::DETAILED_OUTPUT_VAR) {
            config.detailed_output = parse_flag(Self::DETAILED_OUTPUT_VAR, &value)?;
        }
        if let Some(value) = lookup(Self::BACKTRACE_VAR) {
            config.print_backtrace = parse_flag(Self::BACKTRACE_VAR, &value)?;
        }

        Ok(config)
    }

    pub fn stop_after_errors(mut self, limit: Option<usize>) -> Self {
        self.stop_after_errors = limit;
        self
    }

    pub fn detailed_output(mut self, enabled: bool) -> Self {
        self.detailed_output = enabled;
        self
    }

    pub fn print_backtrace(mut self, enabled: bool) -> Self {
        self.print_backtrace = enabled;
        self
    }

    pub fn skip_frames(mut self, frames: usize) -> Self {
        self.skip_frames = frames;
        self
    }

    pub fn limit_action(mut self, action: LimitAction) -> Self {
        self.limit_action = action;
        self
    }
}

fn parse_flag(var: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(anyhow!("invalid {var}: expected a boolean, got {value:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let config = DebugConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, DebugConfig::default());
        assert_eq!(config.stop_after_errors, Some(10));
    }

    #[test]
    fn reads_every_variable() {
        let config = DebugConfig::from_lookup(lookup(&[
            ("GLWRAP_STOP_AFTER_ERRORS", "3"),
            ("GLWRAP_DETAILED_OUTPUT", "off"),
            ("GLWRAP_BACKTRACE", "0"),
        ]))
        .unwrap();
        assert_eq!(config.stop_after_errors, Some(3));
        assert!(!config.detailed_output);
        assert!(!config.print_backtrace);
    }

    #[test]
    fn zero_disables_the_error_limit() {
        let config = DebugConfig::from_lookup(lookup(&[("GLWRAP_STOP_AFTER_ERRORS", "0")])).unwrap();
        assert_eq!(config.stop_after_errors, None);
    }

    #[test]
    fn rejects_malformed_values() {
        let err = DebugConfig::from_lookup(lookup(&[("GLWRAP_STOP_AFTER_ERRORS", "many")]))
            .unwrap_err();
        assert!(err.to_string().contains("GLWRAP_STOP_AFTER_ERRORS"));

        let err = DebugConfig::from_lookup(lookup(&[("GLWRAP_BACKTRACE", "maybe")])).unwrap_err();
        assert!(err.to_string().contains("GLWRAP_BACKTRACE"));
    }

    #[test]
    fn builder_overrides() {
        let config = DebugConfig::default()
            .stop_after_errors(None)
            .limit_action(LimitAction::Panic)
            .skip_frames(0);
        assert_eq!(config.stop_after_errors, None);
        assert_eq!(config.limit_action, LimitAction::Panic);
        assert_eq!(config.skip_frames, 0);
    }
}
