//! Data access for users, skills and hardware. Every function takes the pool
//! (or an open transaction) explicitly.

mod hardware;
pub mod reconcile;
mod skills;
mod users;
mod validation;

pub use hardware::HardwareService;
pub use reconcile::{reconcile, SkillDiff};
pub use skills::{skill_name_from_slug, SkillService};
pub use users::UserService;
pub use validation::RequestValidator;
