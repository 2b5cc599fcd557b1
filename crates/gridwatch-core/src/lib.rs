//! gridwatch-core - Workbook storage, collaborators, and command dispatch.

pub mod command;
pub mod document;
pub mod error;
pub mod notify;
pub mod pipeline;
pub mod settings;
pub mod storage;
pub mod traits;

pub use command::{Command, MENU, MenuItem, dispatch};
pub use document::Workbook;
pub use error::{GridwatchError, Result};
pub use settings::Settings;

pub use gridwatch_engine::engine::CellRef;
