pub mod api;
pub mod config;
pub mod display;
pub mod download;
pub mod error;
pub mod form;
pub mod period;
pub mod state;
pub mod views;

pub use api::{BackendClient, HttpTransport, ReqwestTransport};
pub use config::Config;
pub use error::ApiError;
pub use period::Period;
pub use state::{ListState, LoadStatus};
pub use views::{RosterBoard, StaffDirectory};
