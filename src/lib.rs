pub mod cli;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod inventory;
pub mod manifest;
pub mod output;

pub use command::{synthesize, CrackCommand, Selection};
pub use config::Config;
pub use error::{Error, Result};
pub use inventory::Inventory;
