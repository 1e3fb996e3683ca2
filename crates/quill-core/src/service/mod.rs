//! Application services - orchestrate entities, ports, and policy.

mod accounts;
mod posts;

pub use accounts::{AccountService, UpdateProfile};
pub use posts::{CreatePost, PostService, UpdatePost};
