mod history;
mod pilot;
mod session;
mod simulation;
pub mod init;

pub use history::*;
pub use pilot::*;
pub use session::*;
pub use simulation::*;
