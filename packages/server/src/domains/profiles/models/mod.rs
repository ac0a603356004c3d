pub mod profile;

pub use profile::{CreateProfile, Profile, UpdateProfile, UserType};
