mod service;
mod sms;

pub use service::*;
pub use sms::*;
