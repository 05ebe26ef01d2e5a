//! Application-Layer: Controller, State, Events, Handler und Jobs.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod handlers;
mod intent_mapping;
pub mod jobs;
pub mod state;

pub use command_log::CommandLog;
pub use controller::AppController;
pub use events::{AppCommand, AppIntent};
pub use jobs::{JobRunner, Providers};
pub use state::{AppState, FetchState, RoutePanelState, StatusTone, ROUTE_PROMPT_INITIAL};
