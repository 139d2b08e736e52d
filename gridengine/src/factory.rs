//! Building engines for a named host framework.

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::adapter::{FrameworkAdapter, HeadlessAdapter, TerminalAdapter};
use crate::config::GridEngineConfig;
use crate::engine::{DataGrid, GridEngine};
use crate::error::EngineError;

/// Host frameworks the factory knows by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Framework {
    Terminal,
    Headless,
    /// Browser hosts; no adapter in this build.
    Web,
}

impl Framework {
    pub fn name(&self) -> &'static str {
        match self {
            Framework::Terminal => "terminal",
            Framework::Headless => "headless",
            Framework::Web => "web",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Framework {
    type Err = EngineError;

    /// Names are matched case-insensitively. `web` is recognized but fails.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "terminal" | "crossterm" => Ok(Framework::Terminal),
            "headless" => Ok(Framework::Headless),
            "web" => Err(EngineError::UnsupportedFramework {
                framework: s.to_string(),
            }),
            _ => Err(EngineError::UnknownFramework(s.to_string())),
        }
    }
}

/// Pairs engines with adapters.
pub struct GridFactory;

impl GridFactory {
    pub fn create_engine<A: FrameworkAdapter>(config: GridEngineConfig, adapter: A) -> GridEngine<A> {
        debug!(
            "Creating grid engine for {} adapter: {} column(s), {} row(s)",
            adapter.name(),
            config.columns.len(),
            config.row_count()
        );
        GridEngine::new(config, adapter)
    }

    pub fn create_terminal_engine(config: GridEngineConfig) -> GridEngine<TerminalAdapter> {
        Self::create_engine(config, TerminalAdapter::new())
    }

    pub fn create_headless_engine(config: GridEngineConfig) -> GridEngine<HeadlessAdapter> {
        Self::create_engine(config, HeadlessAdapter::new())
    }

    /// Engine for `framework` behind the [`DataGrid`] interface.
    pub fn create(framework: Framework, config: GridEngineConfig) -> Result<Box<dyn DataGrid>, EngineError> {
        match framework {
            Framework::Terminal => Ok(Box::new(Self::create_terminal_engine(config))),
            Framework::Headless => Ok(Box::new(Self::create_headless_engine(config))),
            Framework::Web => Err(EngineError::UnsupportedFramework {
                framework: framework.to_string(),
            }),
        }
    }

    /// Like [`GridFactory::create`], with the framework given by name.
    pub fn create_named(name: &str, config: GridEngineConfig) -> Result<Box<dyn DataGrid>, EngineError> {
        Self::create(name.parse()?, config)
    }
}
