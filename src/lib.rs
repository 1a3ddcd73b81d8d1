pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod format;
pub mod input;
pub mod mapper;
pub mod method;
pub mod model;
pub mod validation;

pub use client::QiwiClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::QiwiError;
pub use input::InputFile;
pub use mapper::ResponseMapper;
pub use method::{ApiMethod, HttpMethod, PathParams, Payload, Request, Service};
