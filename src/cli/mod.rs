mod migrate;
mod server;
mod sms;

pub use migrate::*;
pub use server::*;
pub use sms::*;
