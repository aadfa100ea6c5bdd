mod assistant;
mod client;
mod gemini;

pub use assistant::*;
pub use client::*;
pub use gemini::*;
