//! Per-tenant index orchestration.
//!
//! Layered bottom-up:
//! - [`schema`] fixes the engine field layout,
//! - [`document`] builds flat field sets from content items,
//! - [`session`] scopes writer/reader handles over one storage location,
//! - [`coordinator`] owns one tenant's update protocol and lock,
//! - [`service`] fronts all tenants and resolves configuration.

pub mod coordinator;
pub mod document;
pub mod schema;
pub mod session;
pub mod service;

pub use coordinator::TenantIndex;
pub use document::IndexableDocument;
pub use service::SearchService;
