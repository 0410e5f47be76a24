pub mod auth;
pub mod tasks;
pub mod users;

pub use auth::AuthService;
pub use tasks::TaskService;
pub use users::UserService;
