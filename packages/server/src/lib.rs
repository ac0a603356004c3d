// Conecta Brasil - Marketplace API Core
//
// Backend for the services marketplace: clients post service requests,
// professionals spend credits to unlock client contacts. Organized as
// domain modules over a shared Postgres pool, served over REST via Axum.

pub mod common;
pub mod config;
pub mod domains;
pub mod server;

pub use config::*;
