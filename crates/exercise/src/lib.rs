mod calendar;
mod command;
mod query;
mod source;
mod types;

pub use calendar::*;
pub use command::*;
pub use query::*;
pub use source::*;
pub use types::*;
