use crate::models::Algorithm;
use simplelog::LevelFilter;

/// Environment variable that overrides the log level.
pub const LOG_ENV: &str = "HASHCHECK_LOG";

#[derive(Debug, Clone)]
pub struct Settings {
    /// Used when the algorithm prompt is left empty.
    pub default_algorithm: Algorithm,
    /// Logs go to stderr so they never interleave with the dialogue on stdout.
    pub log_level: LevelFilter,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_algorithm: Algorithm::Sha256,
            log_level: LevelFilter::Warn,
        }
    }
}

impl Settings {
    /// Defaults plus the `HASHCHECK_LOG` override, if set.
    pub fn from_env() -> Self {
        Self::default().with_log_override(std::env::var(LOG_ENV).ok().as_deref())
    }

    /// Unparsable levels are ignored.
    pub fn with_log_override(mut self, level: Option<&str>) -> Self {
        if let Some(level) = level.and_then(|l| l.trim().parse::<LevelFilter>().ok()) {
            self.log_level = level;
        }
        self
    }
}
