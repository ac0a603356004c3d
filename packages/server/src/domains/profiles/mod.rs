pub mod models;

pub use models::{CreateProfile, Profile, UpdateProfile, UserType};
