//! HTTP Handlers

mod emotion;
mod generate;
mod history;
mod ping;
mod settings;
mod voice;

pub use emotion::*;
pub use generate::*;
pub use history::*;
pub use ping::*;
pub use settings::*;
pub use voice::*;
