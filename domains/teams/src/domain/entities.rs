//! Domain entities for the teams domain
//!
//! Teams, users and the team membership association. Each entity carries
//! its own validation rules.

use apicore_auth::AuthIdentity;
use apicore_common::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::validation::{
    safe_text, validate_team_identifier, MAX_IDENTIFIER_LEN, MAX_NAME_LEN,
};

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: Option<String>,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: Uuid, email: Option<String>, name: Option<String>) -> Self {
        User {
            id,
            email,
            name,
            created_at: Utc::now(),
        }
    }
}

impl From<User> for AuthIdentity {
    fn from(user: User) -> Self {
        AuthIdentity {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

/// Team entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub identifier: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Requested changes to a team's name and identifier.
///
/// A new name without an explicit identifier re-derives the identifier
/// from the name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamChanges {
    pub name: Option<String>,
    pub identifier: Option<String>,
}

impl Team {
    /// Create a new team, deriving the identifier from the name when absent
    pub fn new(name: String, identifier: Option<String>) -> Result<Self> {
        let identifier = match identifier {
            Some(identifier) => identifier,
            None => Self::derive_identifier(&name)?,
        };

        let now = Utc::now();
        let team = Team {
            id: Uuid::new_v4(),
            name,
            identifier,
            created_at: now,
            updated_at: now,
        };
        team.validate()?;

        Ok(team)
    }

    /// Identifier that a name maps to
    pub fn derive_identifier(name: &str) -> Result<String> {
        let identifier = safe_text(name);
        if identifier.is_empty() {
            return Err(Error::Validation(
                "Cannot derive an identifier from the team name".to_string(),
            ));
        }
        Ok(identifier)
    }

    /// Apply a rename. Leaves `self` untouched when the result is invalid.
    pub fn apply_changes(&mut self, changes: TeamChanges) -> Result<()> {
        let identifier = match (changes.identifier, changes.name.as_deref()) {
            (Some(identifier), _) => Some(identifier),
            (None, Some(name)) => Some(Self::derive_identifier(name)?),
            (None, None) => None,
        };

        let mut updated = self.clone();
        if let Some(name) = changes.name {
            updated.name = name;
        }
        if let Some(identifier) = identifier {
            updated.identifier = identifier;
        }
        updated.validate()?;
        updated.updated_at = Utc::now();

        *self = updated;
        Ok(())
    }

    /// Validate invariants
    pub fn validate(&self) -> Result<()> {
        let name_len = self.name.chars().count();
        if self.name.trim().is_empty() || name_len > MAX_NAME_LEN {
            return Err(Error::Validation(format!(
                "Team name must be 1-{} characters",
                MAX_NAME_LEN
            )));
        }

        if !validate_team_identifier(&self.identifier) {
            return Err(Error::Validation(format!(
                "Identifier must be 1-{} lowercase letters, digits or single hyphens",
                MAX_IDENTIFIER_LEN
            )));
        }

        Ok(())
    }
}

/// Membership entity - association between User and Team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Membership {
    pub team_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Membership {
    pub fn new(team_id: Uuid, user_id: Uuid) -> Self {
        Membership {
            team_id,
            user_id,
            created_at: Utc::now(),
        }
    }
}
