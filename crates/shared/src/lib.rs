mod command;
mod date;

pub use command::*;
pub use date::*;
