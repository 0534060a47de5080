#![doc = "The `listforge` library crate."]
#![doc = ""]
#![doc = "Backend core for collaborative task lists: credential handling, the"]
#![doc = "persistence gateway, membership authorization, the task-list and to-do"]
#![doc = "service with its computed fields, and the actix-web routes exposing it."]
#![doc = "The binary (`main.rs`) wires these together from configuration."]

pub mod auth;
pub mod config;
pub mod context;
pub mod error;
pub mod guard;
pub mod models;
pub mod routes;
pub mod service;
pub mod store;

pub use context::RequestContext;
pub use error::AppError;
pub use service::TaskService;
