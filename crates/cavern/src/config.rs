//! Server configuration loaded from environment variables.

use std::net::SocketAddr;
use std::str::FromStr;

use cavern_engine::CaveConfig;

use crate::error::CavernError;

/// Default listen address.
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

/// Everything the binary needs to start a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind: SocketAddr,
    /// Settings for every game the server hosts.
    pub cave: CaveConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `CAVERN_BIND` -- listen address (default `127.0.0.1:8080`)
    /// - `CAVERN_CAVES` -- caves per map (default 20)
    /// - `CAVERN_PITS` -- bottomless pits (default 2)
    /// - `CAVERN_BATS` -- bat colonies (default 2)
    /// - `CAVERN_ARROWS` -- arrows per player (default 5)
    /// - `CAVERN_SEED` -- fixed RNG seed (default: random per game)
    ///
    /// # Errors
    ///
    /// Returns [`CavernError::Config`] if a variable is set but does not
    /// parse.
    pub fn from_env() -> Result<Self, CavernError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading variables through
    /// `lookup` instead of the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CavernError> {
        let defaults = CaveConfig::default();

        let bind = parse_or(&lookup, "CAVERN_BIND", || DEFAULT_BIND.parse())?;
        let caves = parse_or(&lookup, "CAVERN_CAVES", || Ok(defaults.caves))?;
        let pits = parse_or(&lookup, "CAVERN_PITS", || Ok(defaults.pits))?;
        let bats = parse_or(&lookup, "CAVERN_BATS", || Ok(defaults.bats))?;
        let arrows = parse_or(&lookup, "CAVERN_ARROWS", || Ok(defaults.arrows))?;
        let seed = match lookup("CAVERN_SEED") {
            Some(raw) => Some(parse_var("CAVERN_SEED", &raw)?),
            None => None,
        };

        Ok(Self {
            bind,
            cave: CaveConfig {
                caves,
                pits,
                bats,
                arrows,
                seed,
            },
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
            cave: CaveConfig::default(),
        }
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: impl FnOnce() -> Result<T, T::Err>,
) -> Result<T, CavernError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => parse_var(name, &raw),
        None => default()
            .map_err(|e| CavernError::Config(format!("invalid default for {name}: {e}"))),
    }
}

fn parse_var<T>(name: &str, raw: &str) -> Result<T, CavernError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| CavernError::Config(format!("invalid {name}: {e}")))
}
