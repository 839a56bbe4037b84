pub mod time;
pub mod validator;
