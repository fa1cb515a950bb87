mod email;
mod password;
mod username;

pub use email::{Email, EmailError};
pub use password::{Password, PasswordError};
pub use username::{Username, UsernameError};
