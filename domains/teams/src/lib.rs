//! Teams domain: users, teams and the memberships linking them

pub mod api;
pub mod domain;
pub mod repository;
pub mod service;

// Re-export domain types at the crate root for convenience
pub use domain::entities::*;
pub use domain::error::TeamsError;
// Re-export repository types
pub use repository::{
    create_membership_tx, create_team_tx, delete_memberships_for_team_tx, delete_team_tx,
    InMemoryStore, MembershipRepository, TeamRepository, TeamsRepositories, UserRepository,
};
pub use service::TeamsService;

// Re-export API types
pub use api::routes;
pub use api::TeamsState;
