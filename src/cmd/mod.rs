mod auth;
mod classify;
mod content;
mod home;
pub mod output;
mod search;
mod share;

pub use auth::{cmd_signin, cmd_signout, cmd_signup};
pub use classify::cmd_classify;
pub use content::{cmd_add, cmd_delete, cmd_list, cmd_view};
pub use home::cmd_home;
pub use search::cmd_search;
pub use share::{cmd_share, cmd_shared};
