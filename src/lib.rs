pub mod core;
pub mod services;
pub mod utils;

pub use crate::core::error::{CompileError, ParseError};
pub use crate::services::workflow::{CompileReport, ScriptCompiler};
