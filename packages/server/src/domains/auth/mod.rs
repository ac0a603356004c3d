pub mod actions;
pub mod jwt;
pub mod models;
pub mod password;

pub use actions::{change_password, sign_in, sign_up, AuthSession, SignUpInput};
pub use jwt::{Claims, JwtService};
pub use models::Credential;
