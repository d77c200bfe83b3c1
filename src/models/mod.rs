pub mod badge;
pub mod follow;
pub mod habit;
pub mod profile;
pub mod reel;
pub mod user_badge;
pub mod user_task;
