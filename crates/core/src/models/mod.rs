//! Data models for the hostel system

mod room;
mod booking;
mod change;
mod ticket;
mod session;

pub use room::*;
pub use booking::*;
pub use change::*;
pub use ticket::*;
pub use session::*;
