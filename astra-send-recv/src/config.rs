// Copyright (c) 2026 Graphcore Ltd. All rights reserved.

//! Configuration of the `send-recv` application.
//!
//! Every option can be given in several places. Where the same option is set
//! more than once the following priority order is applied:
//! 1. Command-line argument.
//! 1. Environment variable, named after the option with a `SEND_RECV_` prefix
//!    (e.g. `SEND_RECV_NPUS_COUNT`).
//! 1. The TOML file passed with `--conf-file`.
//! 1. Default value (see [Options::default]).
//!
//! All fields are wrapped in `Option` so that the parsed results of each
//! source can be merged without clap filling in its own defaults.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{fmt, io};

use clap::Parser;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::types::SendRecvConfig;

pub const ENV_PREFIX: &str = "SEND_RECV_";

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Extract(Box<figment::Error>),
    /// A required option was not set by any source.
    Missing(&'static str),
    LogLevel(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "{e}"),
            ConfigError::Extract(e) => write!(f, "Invalid configuration: {e}"),
            ConfigError::Missing(option) => {
                write!(f, "--{option} must be set (or {})", env_var_name(option))
            }
            ConfigError::LogLevel(level) => write!(f, "Unknown log level '{level}'"),
        }
    }
}

impl Error for ConfigError {}

fn env_var_name(option: &str) -> String {
    format!("{ENV_PREFIX}{}", option.replace('-', "_").to_uppercase())
}

/// Command-line arguments.
#[derive(Parser, Debug, PartialEq, Deserialize, Serialize)]
#[command(
    name = "send-recv",
    about = "Generate point-to-point Send/Recv Chakra ET files in ./send_recv"
)]
pub struct Options {
    /// Number of NPUs in the job (at least 2)
    #[arg(long, allow_negative_numbers = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub npus_count: Option<i32>,

    /// Message size in MB
    #[arg(long, allow_negative_numbers = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg_size: Option<i64>,

    /// Source NPU rank [default: 0]
    #[arg(long, allow_negative_numbers = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<i32>,

    /// Destination NPU rank [default: 1]
    #[arg(long, allow_negative_numbers = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dst: Option<i32>,

    /// Communication tag used to match the Send with the Recv [default: 0]
    #[arg(long, allow_negative_numbers = true)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<i32>,

    /// Level of log message to display [default: info]
    #[arg(long)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Path to additional configuration file
    ///
    /// This file must contain TOML, and can set any of the other options.
    #[arg(long)]
    #[serde(skip)]
    pub conf_file: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            npus_count: None,
            msg_size: None,
            src: Some(0),
            dst: Some(1),
            tag: Some(0),
            log_level: Some("info".to_string()),
            conf_file: None,
        }
    }
}

impl Options {
    /// Merge all configuration sources, using `cli` as the command-line
    /// values (and the source of the `--conf-file` path).
    pub fn resolve(cli: Options) -> Result<Options, ConfigError> {
        Self::resolve_with_env(cli, Env::prefixed(ENV_PREFIX))
    }

    fn resolve_with_env(cli: Options, env: Env) -> Result<Options, ConfigError> {
        let figment = Self::figment(cli.conf_file.as_deref(), env)?;
        let config: Options = figment
            .extract()
            .map_err(|e| ConfigError::Extract(Box::new(e)))?;
        Ok(config.merge_cli(cli))
    }

    fn figment(conf_file: Option<&Path>, env: Env) -> Result<Figment, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Options::default()));
        if let Some(conf_file) = conf_file {
            check_conf_file(conf_file)?;
            figment = figment.merge(Toml::file(conf_file));
        }
        Ok(figment.merge(env))
    }

    fn merge_cli(mut self, cli: Options) -> Options {
        if cli.npus_count.is_some() {
            self.npus_count = cli.npus_count;
        }
        if cli.msg_size.is_some() {
            self.msg_size = cli.msg_size;
        }
        if cli.src.is_some() {
            self.src = cli.src;
        }
        if cli.dst.is_some() {
            self.dst = cli.dst;
        }
        if cli.tag.is_some() {
            self.tag = cli.tag;
        }
        if cli.log_level.is_some() {
            self.log_level = cli.log_level;
        }
        self.conf_file = cli.conf_file;
        self
    }

    pub fn log_level(&self) -> Result<LevelFilter, ConfigError> {
        match &self.log_level {
            Some(level) => {
                LevelFilter::from_str(level).map_err(|_| ConfigError::LogLevel(level.clone()))
            }
            None => Ok(LevelFilter::Info),
        }
    }

    /// Build the generator parameters. The job size and message size have no
    /// default and must have been set by one of the sources.
    pub fn send_recv_config(&self) -> Result<SendRecvConfig, ConfigError> {
        let npus_count = self.npus_count.ok_or(ConfigError::Missing("npus-count"))?;
        let msg_size = self.msg_size.ok_or(ConfigError::Missing("msg-size"))?;

        let mut config = SendRecvConfig::new(npus_count, msg_size);
        if let Some(src) = self.src {
            config = config.with_src(src);
        }
        if let Some(dst) = self.dst {
            config = config.with_dst(dst);
        }
        if let Some(tag) = self.tag {
            config = config.with_tag(tag);
        }
        Ok(config)
    }
}

fn check_conf_file(conf_file: &Path) -> Result<(), ConfigError> {
    if conf_file.is_dir() {
        return Err(ConfigError::Io(io::Error::new(
            io::ErrorKind::IsADirectory,
            format!("{} is not a file path", conf_file.display()),
        )));
    }
    if !conf_file.exists() {
        return Err(ConfigError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} not found", conf_file.display()),
        )));
    }
    Ok(())
}
