//! Runtime configuration from the environment
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `DAFNY_LOG` | `warn` | tracing filter directive for [`crate::diagnostics::init_logging`] |
//! | `DAFNY_HALT_OUTPUT` | `stdout` | stream for the `[Program halted]` line |
//!
//! Unset or malformed values fall back to the defaults.

/// Where the halt guard writes its message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HaltOutput {
    #[default]
    Stdout,
    Stderr,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Filter directive, e.g. `warn` or `dafny_runtime=trace`
    pub log_filter: String,
    pub halt_output: HaltOutput,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            log_filter: "warn".to_string(),
            halt_output: HaltOutput::Stdout,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let log_filter = std::env::var("DAFNY_LOG")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "warn".to_string());

        let halt_output = std::env::var("DAFNY_HALT_OUTPUT")
            .ok()
            .map(|s| match s.to_lowercase().as_str() {
                "stderr" => HaltOutput::Stderr,
                _ => HaltOutput::Stdout,
            })
            .unwrap_or_default();

        Self {
            log_filter,
            halt_output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // Caller must hold the serial lock
    unsafe fn set_env(key: &str, value: Option<&str>) {
        // SAFETY: #[serial] keeps env access single-threaded
        unsafe {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }

    #[test]
    #[serial]
    fn test_defaults_when_unset() {
        unsafe {
            set_env("DAFNY_LOG", None);
            set_env("DAFNY_HALT_OUTPUT", None);
        }
        let config = RuntimeConfig::from_env();
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.halt_output, HaltOutput::Stdout);
    }

    #[test]
    #[serial]
    fn test_from_env_all_values() {
        unsafe {
            set_env("DAFNY_LOG", Some("dafny_runtime=trace"));
            set_env("DAFNY_HALT_OUTPUT", Some("STDERR"));
        }
        let config = RuntimeConfig::from_env();
        assert_eq!(config.log_filter, "dafny_runtime=trace");
        assert_eq!(config.halt_output, HaltOutput::Stderr);
        unsafe {
            set_env("DAFNY_LOG", None);
            set_env("DAFNY_HALT_OUTPUT", None);
        }
    }

    #[test]
    #[serial]
    fn test_malformed_values_fall_back() {
        unsafe {
            set_env("DAFNY_LOG", Some("   "));
            set_env("DAFNY_HALT_OUTPUT", Some("printer"));
        }
        let config = RuntimeConfig::from_env();
        assert_eq!(config.log_filter, "warn");
        assert_eq!(config.halt_output, HaltOutput::Stdout);
        unsafe {
            set_env("DAFNY_LOG", None);
            set_env("DAFNY_HALT_OUTPUT", None);
        }
    }
}
