pub mod check;
mod command_result;
pub mod context;
pub mod init;
pub mod sync;

pub use command_result::*;
