//! Row and request types for users, skills and the hardware ledger.

pub mod hardware;
pub mod skill;
pub mod user;

pub use hardware::*;
pub use skill::*;
pub use user::*;
