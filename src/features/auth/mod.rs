pub mod model;
mod validator;

pub use validator::JwtValidator;
