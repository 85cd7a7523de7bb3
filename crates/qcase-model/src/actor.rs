//! Actors, roles and permission scopes

use crate::entry_point::EntryPointKey;
use crate::error::ModelError;
use crate::sector::Sector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Identity issued by the external identity provider
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActorId(pub String);

impl ActorId {
    /// Wrap a provider identity
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl Display for ActorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Role held by an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Bypasses all scoping
    Admin,
    /// Field inspector
    Inspector,
    /// Head of an inspection section
    HeadOfSection,
    /// Clerical data entry
    DataEntry,
    /// Laboratory staff
    Laboratory,
}

impl Role {
    /// Stored string form
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Inspector => "inspector",
            Self::HeadOfSection => "head_of_section",
            Self::DataEntry => "data_entry",
            Self::Laboratory => "laboratory",
        }
    }
}

impl FromStr for Role {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "admin" => Ok(Self::Admin),
            "inspector" => Ok(Self::Inspector),
            "head_of_section" => Ok(Self::HeadOfSection),
            "data_entry" => Ok(Self::DataEntry),
            "laboratory" => Ok(Self::Laboratory),
            other => Err(ModelError::UnknownRole(other.to_string())),
        }
    }
}

/// Entry points and sectors an actor may observe
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permissions {
    /// Entry-point keys, resolved through the reference table when filtering
    pub allowed_entry_points: BTreeSet<EntryPointKey>,
    /// Sectors, compared directly against records
    pub allowed_sectors: BTreeSet<Sector>,
}

/// Authenticated user together with their roles and permission scopes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    /// Provider identity
    pub identity: ActorId,
    /// Display name
    pub name: String,
    /// Login e-mail
    #[serde(default)]
    pub email: String,
    /// Role set
    pub roles: BTreeSet<Role>,
    /// Permission scopes
    #[serde(default)]
    pub permissions: Permissions,
    /// Laboratory this actor works for, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub laboratory_name: Option<String>,
}

impl Actor {
    /// Create an actor with no roles and no permissions
    #[must_use]
    pub fn new(identity: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            identity: ActorId::new(identity),
            name: name.into(),
            email: String::new(),
            roles: BTreeSet::new(),
            permissions: Permissions::default(),
            laboratory_name: None,
        }
    }

    /// With e-mail
    #[inline]
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// With an additional role
    #[inline]
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.insert(role);
        self
    }

    /// With an additional allowed entry point
    #[inline]
    #[must_use]
    pub fn with_entry_point(mut self, key: EntryPointKey) -> Self {
        self.permissions.allowed_entry_points.insert(key);
        self
    }

    /// With an additional allowed sector
    #[inline]
    #[must_use]
    pub fn with_sector(mut self, sector: Sector) -> Self {
        self.permissions.allowed_sectors.insert(sector);
        self
    }

    /// With laboratory affiliation
    #[inline]
    #[must_use]
    pub fn with_laboratory(mut self, laboratory: impl Into<String>) -> Self {
        self.laboratory_name = Some(laboratory.into());
        self
    }

    /// Whether the actor holds `role`
    #[inline]
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Admins bypass every scoping rule
    #[inline]
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parse_rejects_unknown() {
        assert_eq!("head_of_section".parse::<Role>().unwrap(), Role::HeadOfSection);
        assert!(matches!("root".parse::<Role>(), Err(ModelError::UnknownRole(_))));
    }

    #[test]
    fn actor_builder_accumulates_scopes() {
        let actor = Actor::new("u-7", "Lab Tech")
            .with_role(Role::Laboratory)
            .with_sector(Sector::Veterinary)
            .with_sector(Sector::Veterinary)
            .with_laboratory("Central Lab");

        assert!(actor.has_role(Role::Laboratory));
        assert!(!actor.is_admin());
        assert_eq!(actor.permissions.allowed_sectors.len(), 1);
        assert_eq!(actor.laboratory_name.as_deref(), Some("Central Lab"));
    }

    #[test]
    fn permissions_use_camel_case_field_names() {
        let json = r#"{"allowedEntryPoints":["sohar_port"],"allowedSectors":["agricultural"]}"#;
        let perms: Permissions = serde_json::from_str(json).unwrap();

        assert!(perms
            .allowed_entry_points
            .contains(&EntryPointKey::new("sohar_port").unwrap()));
        assert!(perms.allowed_sectors.contains(&Sector::Agricultural));
    }
}
