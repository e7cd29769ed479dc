mod command_result;
pub mod helper;
pub mod run;
pub mod seed;
pub mod status;

pub use command_result::*;
