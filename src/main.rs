pub mod breakdown;
pub mod chronometer;
pub mod clock;
pub mod configuration;
pub mod create_server;
pub mod error;
pub mod executor;
pub mod logger;
pub mod panel;
pub mod server;
pub mod state;
pub mod stopwatch;
pub mod ticker;

use self::{
    breakdown::{Unit, UnitBreakdown},
    chronometer::Chronometer,
    clock::{Clock, MonotonicClock},
    configuration::Configuration,
    create_server::create_server,
    error::Error,
    executor::Executor,
    logger::{Logger, PartialLogger},
    panel::Panel,
    server::Server,
    state::State,
    stopwatch::{RunState, Stopwatch},
    ticker::Ticker,
};
#[cfg(test)]
use self::clock::ManualClock;
use hyper::StatusCode;
use serde_json::json;
use std::{net::SocketAddr, process, sync::Arc};
use tokio::sync::{Mutex, Notify, RwLock};

fn main() {
    let configuration = match Configuration::new() {
        Ok(configuration) => configuration,
        Err(error) => {
            eprintln!("{}", error);
            process::exit(1);
        }
    };

    let state = Arc::new(State::new());

    let mut executor = Executor::new();

    executor.spawn_runtime("ticker", state.clone(), {
        let configuration = configuration.clone();
        |state| async move {
            let logger = Logger::new("ticker");
            let mut partial_logger = PartialLogger::new(configuration.log_interval(), &logger);
            Ticker::from_millis(configuration.tick_interval()).run(&state, &mut partial_logger).await;
            Ok(())
        }
    });

    executor.spawn_runtime("server", state, {
        let configuration = configuration.clone();
        |state| async move {
            let server = create_server(state);
            let address = SocketAddr::new(configuration.host(), configuration.port());
            server.run(address).await
        }
    });

    if let Err(error) = executor.join() {
        eprintln!("{}", error);
        process::exit(1);
    }
}
