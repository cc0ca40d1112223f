//! # Logger
//!
//! Installs the global `tracing` subscriber of the stacker: a compact console layer and an
//! optional rolling file layer (plain or JSON) behind one `EnvFilter`.
//!
//! [`Logger::from_config`] is the usual entry point; it reads the `[logging]` section of
//! `stacker.toml`. The builder is public for tools that configure logging in code.
//!
//! ```rust,no_run
//! # use stk_domain::config::LoggingConfig;
//! # use stk_logger::Logger;
//! let _logger = Logger::from_config("stacker", &LoggingConfig::default())?;
//! # Ok::<(), stk_logger::LoggerError>(())
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use private::Sealed;
use std::fs;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::str::FromStr;
use stk_domain::config::LoggingConfig;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const LOG_FILE_SUFFIX: &str = "log";

#[derive(Debug)]
struct Outputs {
    console: bool,
    directory: Option<PathBuf>,
    level: LevelFilter,
    filter: Option<String>,
    rotation: Rotation,
    max_files: usize,
    json: bool,
}

impl Default for Outputs {
    fn default() -> Self {
        Self {
            console: true,
            directory: None,
            level: LevelFilter::INFO,
            filter: None,
            rotation: Rotation::DAILY,
            max_files: 10,
            json: false,
        }
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);
#[derive(Debug)]
pub struct NoFile;
#[derive(Debug)]
pub struct WithFile;

mod private {
    pub trait Sealed {}
}
impl Sealed for NoName {}
impl Sealed for WithName {}
impl Sealed for NoFile {}
impl Sealed for WithFile {}

/// Builder of the global subscriber. A name is required before [`LoggerBuilder::init`]; file
/// options only exist once a directory is set.
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = NoName, F: Sealed = NoFile> {
    outputs: Outputs,
    name: N,
    file: PhantomData<F>,
}

impl<F: Sealed> LoggerBuilder<NoName, F> {
    /// Names the logger; rolling files are prefixed with it.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName, F> {
        LoggerBuilder { outputs: self.outputs, name: WithName(name.into()), file: PhantomData }
    }
}

impl LoggerBuilder<WithName, WithFile> {
    #[must_use]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.outputs.max_files = max;
        self
    }

    #[must_use]
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.outputs.rotation = rotation;
        self
    }

    /// Writes file records as JSON lines. The console stays compact text.
    #[must_use]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.outputs.json = enabled;
        self
    }
}

impl<F: Sealed> LoggerBuilder<WithName, F> {
    #[must_use]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.outputs.level = level;
        self
    }

    /// Extra directives such as `stk_settings=debug`. `RUST_LOG` is ignored when set.
    #[must_use]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.outputs.filter = Some(filter.into());
        self
    }

    #[must_use]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.outputs.console = enabled;
        self
    }

    /// Enables the rolling file layer in `directory`.
    pub fn path(self, directory: impl Into<PathBuf>) -> LoggerBuilder<WithName, WithFile> {
        let mut outputs = self.outputs;
        outputs.directory = Some(directory.into());
        LoggerBuilder { outputs, name: self.name, file: PhantomData }
    }

    /// Installs the global subscriber.
    ///
    /// Keep the returned [`Logger`] alive until shutdown; dropping it stops the file worker.
    ///
    /// # Errors
    /// - [`LoggerError::InvalidConfiguration`] for an empty name, zero `max_files`, a bad
    ///   filter, or when neither console nor file output is enabled.
    /// - [`LoggerError::Internal`] when the log directory cannot be created.
    /// - [`LoggerError::Appender`] when the rolling appender cannot be opened.
    /// - [`LoggerError::Subscriber`] when a global subscriber is already installed.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let Self { outputs, name: WithName(name), .. } = self;
        validate(&outputs, &name)?;

        let env_filter = env_filter(&outputs)?;
        let mut layers = Vec::new();

        if outputs.console {
            layers.push(layer().compact().with_ansi(true).boxed());
        }

        let guard = match outputs.directory {
            Some(directory) => {
                fs::create_dir_all(&directory).map_err(|e| LoggerError::Internal {
                    message: e.to_string().into(),
                    context: Some(format!("Log directory {}", directory.display()).into()),
                })?;

                let appender = RollingFileAppender::builder()
                    .rotation(outputs.rotation)
                    .filename_prefix(&name)
                    .filename_suffix(LOG_FILE_SUFFIX)
                    .max_log_files(outputs.max_files)
                    .build(directory)?;
                let (writer, guard) = tracing_appender::non_blocking(appender);

                let file_layer = layer().with_writer(writer).with_ansi(false);
                layers.push(if outputs.json {
                    file_layer.json().boxed()
                } else {
                    file_layer.boxed()
                });
                Some(guard)
            },
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "Neither console nor file output is enabled".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;

        Ok(Logger { guard })
    }
}

/// Handle of the installed subscriber. Holds the file worker guard, if any.
#[must_use = "Dropping this handle stops the background file writer."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { outputs: Outputs::default(), name: NoName, file: PhantomData }
    }

    /// Installs the global subscriber from the `[logging]` section of the stacker config.
    ///
    /// File output is enabled when `directory` is set; `json`, `rotation` and `max_files`
    /// only apply to it.
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] for an unknown `level` or `rotation`,
    /// plus every error of [`LoggerBuilder::init`].
    pub fn from_config(
        name: impl Into<String>,
        config: &LoggingConfig,
    ) -> Result<Self, LoggerError> {
        let level = parse_level(&config.level)?;

        let mut builder = Self::builder().name(name).console(config.console).level(level);
        if let Some(filter) = &config.filter {
            builder = builder.env_filter(filter.as_str());
        }

        match &config.directory {
            Some(directory) => builder
                .path(directory)
                .rotation(parse_rotation(&config.rotation)?)
                .max_files(config.max_files)
                .json(config.json)
                .init(),
            None => builder.init(),
        }
    }

    /// Whether a file layer is active.
    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::debug!("Flushing log files");
        }
    }
}

fn parse_level(level: &str) -> Result<LevelFilter, LoggerError> {
    LevelFilter::from_str(level.trim()).map_err(|e| LoggerError::InvalidConfiguration {
        message: format!("Invalid log level '{level}': {e}").into(),
        context: None,
    })
}

fn parse_rotation(rotation: &str) -> Result<Rotation, LoggerError> {
    match rotation.trim().to_ascii_lowercase().as_str() {
        "minutely" => Ok(Rotation::MINUTELY),
        "hourly" => Ok(Rotation::HOURLY),
        "daily" => Ok(Rotation::DAILY),
        "never" => Ok(Rotation::NEVER),
        other => Err(LoggerError::InvalidConfiguration {
            message: format!("Invalid log rotation '{other}'").into(),
            context: Some("expected minutely, hourly, daily or never".into()),
        }),
    }
}

fn validate(outputs: &Outputs, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
            context: None,
        });
    }
    if outputs.directory.is_some() && outputs.max_files == 0 {
        return Err(LoggerError::InvalidConfiguration {
            message: "max_files must be greater than zero".into(),
            context: None,
        });
    }
    Ok(())
}

fn env_filter(outputs: &Outputs) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(outputs.level.into());
    match &outputs.filter {
        Some(filter) => builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
            message: format!("Invalid env filter '{filter}': {e}").into(),
            context: None,
        }),
        None => Ok(builder.from_env_lossy()),
    }
}
