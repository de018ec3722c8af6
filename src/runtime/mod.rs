//! Dispatch runtime: configuration and the request scheduler.

mod config;
mod dispatcher;

pub use config::{DispatchConfig, DEFAULT_INTERVAL, DEFAULT_REQUESTS, DEFAULT_URL};
pub use dispatcher::Dispatcher;
