pub mod catalog;
pub mod client;
pub mod config;
pub mod detail;
pub mod diagnostics;
pub mod error;
pub mod evolution;
mod fanout;
pub mod ids;
pub mod pokemon;
pub mod server;
pub mod session;
pub mod task;
pub mod types;
pub mod view;
pub mod weakness;

#[cfg(test)]
mod testing;

pub use catalog::*;
pub use client::*;
pub use config::*;
pub use detail::*;
pub use diagnostics::*;
pub use error::*;
pub use evolution::*;
pub use ids::*;
pub use session::*;
pub use task::*;
pub use types::*;
pub use view::*;
pub use weakness::*;
