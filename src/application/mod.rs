//! Application layer services implementing business logic.
//!
//! Services consume the repository and cache traits and provide a clean API
//! for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Short link registration and listing
//! - [`services::resolver_service::ResolverService`] - Cache-aside resolution

pub mod services;
