use crate::Error;
use std::{
    env, error, fmt,
    net::{IpAddr, Ipv4Addr},
};

#[derive(Debug, Clone)]
pub struct Configuration {
    host: IpAddr,
    port: u16,
    tick_interval: u64,
    log_interval: usize,
}

fn var(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: Option<String>) -> Result<String, Error> {
    match lookup(key) {
        Some(value) => Ok(value),
        None => default.ok_or_else(|| Error::new(format!("Missing {}", key))),
    }
}

fn var_map<T, E: error::Error>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    mut f: impl FnMut(&str) -> Result<T, E>,
    default: Option<T>,
) -> Result<T, Error> {
    match var(lookup, key, None) {
        Ok(value) => f(&value).map_err(|_| Error::new(format!("Invalid {} {}", key, value))),
        Err(err) => default.ok_or(err),
    }
}

fn positive<T: PartialOrd + Default + fmt::Display>(key: &str, value: T) -> Result<T, Error> {
    if value > T::default() {
        Ok(value)
    } else {
        Err(Error::new(format!("Invalid {} {}", key, value)))
    }
}

impl Configuration {
    pub fn new() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let host = var_map(&lookup, "HOST", |host| host.parse(), Some(IpAddr::V4(Ipv4Addr::LOCALHOST)))?;
        let port = var_map(&lookup, "PORT", |port| port.parse(), Some(8000))?;
        let tick_interval = var_map(&lookup, "TICK_INTERVAL", |interval| interval.parse(), Some(1))?;
        let log_interval = var_map(&lookup, "LOG_INTERVAL", |interval| interval.parse(), Some(1000))?;
        Ok(Self {
            host,
            port,
            tick_interval: positive("TICK_INTERVAL", tick_interval)?,
            log_interval: positive("LOG_INTERVAL", log_interval)?,
        })
    }

    pub fn host(&self) -> IpAddr {
        self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Milliseconds between ticks while running.
    pub fn tick_interval(&self) -> u64 {
        self.tick_interval
    }

    /// Ticks between two tick log lines.
    pub fn log_interval(&self) -> usize {
        self.log_interval
    }
}
