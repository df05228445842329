//! Web presentation
//!
//! An Axum router that renders the configured matchup's win probability as
//! a page, alongside JSON probability, profile, health and metrics endpoints.

pub mod handlers;
pub mod server;

pub use handlers::{ProbabilityQuery, ProbabilityResponse};
pub use server::{create_router, PageServer, PageServerConfig};
