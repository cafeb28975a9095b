//! Caller identity as seen by the auth layer

use serde::Serialize;
use uuid::Uuid;

/// The authenticated caller ("me").
///
/// A lightweight view of the user row owned by the teams domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthIdentity {
    pub id: Uuid,
    pub email: Option<String>,
    pub name: Option<String>,
}
