//! The process-wide sink for statistics.

use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::io::stdout;
use std::io::Write;
use std::sync::OnceLock;
use std::sync::RwLock;

use convert_case::Case;
use convert_case::Casing;

/// How statistics are written: every statistic becomes one line `{prefix} {name}={value}`.
pub struct StatisticOptions {
    /// Written in front of every statistic line.
    pub prefix: String,
    /// An optional line written by [`log_statistic_postfix`] after a block of statistics.
    pub postfix: Option<String>,
    /// If set, statistic names are converted to this casing before being written.
    pub casing: Option<Case>,
    pub writer: Box<dyn Write + Send + Sync>,
}

impl Default for StatisticOptions {
    fn default() -> Self {
        StatisticOptions {
            prefix: "%%%mzn-stat:".to_owned(),
            postfix: None,
            casing: None,
            writer: Box::new(stdout()),
        }
    }
}

impl Debug for StatisticOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatisticOptions")
            .field("prefix", &self.prefix)
            .field("postfix", &self.postfix)
            .field("casing", &self.casing)
            .field("writer", &"<Writer>")
            .finish()
    }
}

static STATISTIC_OPTIONS: OnceLock<RwLock<StatisticOptions>> = OnceLock::new();

/// Enables statistic logging. Only the first call has an effect.
pub fn configure_statistic_logging(options: StatisticOptions) {
    let _ = STATISTIC_OPTIONS.get_or_init(|| RwLock::new(options));
}

/// Writes a single statistic if statistic logging has been configured.
pub fn log_statistic(name: impl Display, value: impl Display) {
    let Some(lock) = STATISTIC_OPTIONS.get() else {
        return;
    };
    let Ok(mut options) = lock.write() else {
        return;
    };

    let name = match options.casing {
        Some(casing) => name.to_string().to_case(casing),
        None => name.to_string(),
    };
    let prefix = options.prefix.clone();
    let _ = writeln!(options.writer, "{prefix} {name}={value}");
}

/// Writes the configured postfix line, if there is one.
pub fn log_statistic_postfix() {
    let Some(lock) = STATISTIC_OPTIONS.get() else {
        return;
    };
    let Ok(mut options) = lock.write() else {
        return;
    };

    if let Some(postfix) = options.postfix.clone() {
        let _ = writeln!(options.writer, "{postfix}");
    }
}

/// Whether [`configure_statistic_logging`] has been called.
pub fn should_log_statistics() -> bool {
    STATISTIC_OPTIONS.get().is_some()
}
