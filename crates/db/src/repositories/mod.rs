//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod event_repo;
pub mod phase_repo;
pub mod project_repo;

pub use event_repo::EventRepo;
pub use phase_repo::PhaseRepo;
pub use project_repo::ProjectRepo;
