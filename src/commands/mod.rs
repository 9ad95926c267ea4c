pub mod auth;
pub mod completions;
pub mod configure;
pub mod web;

pub use auth::AuthCommand;
pub use completions::CompletionsCommand;
pub use configure::ConfigureCommand;
pub use web::WebCommand;
