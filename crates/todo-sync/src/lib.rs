//! Todo Sync
//!
//! Model, filtering and REST synchronization for the todo web client.
//! Nothing here depends on the UI, so it runs natively under test.

pub mod api;
pub mod config;
pub mod error;
pub mod filter;
pub mod inflight;
pub mod model;
pub mod state;

pub use api::{RestClient, TodoApi};
pub use config::{ApiConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, ApiResult, SyncError};
pub use filter::{Filter, FILTERS};
pub use inflight::{InFlight, InFlightGuard, OpKey};
pub use model::{items_left, Status, Todo, TodoId};
pub use state::{ClearReport, TodoCollection, TodoManager};
