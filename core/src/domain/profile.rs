//! Profile Entity
//!
//! Per-user application profile; the role gates write controls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{DomainResult, Entity, RecordId};
use super::record::{is_blank, optional_text, text, Draft, OrderBy, Record, Row, Table};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Admin, Role::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: RecordId,
    /// Identifier of the auth user this profile belongs to
    pub user_id: String,
    pub username: String,
    pub role: Role,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Name to greet the user with
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !is_blank(name))
            .unwrap_or(&self.username)
    }
}

impl Entity for Profile {
    fn id(&self) -> &RecordId {
        &self.id
    }
}

impl Record for Profile {
    const TABLE: Table = Table::Profiles;
    const ORDER: OrderBy = OrderBy::asc("username");
    const NOUN: &'static str = "profile";
    const PLURAL: &'static str = "profiles";

    type Draft = ProfileDraft;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDraft {
    pub user_id: String,
    pub username: String,
    pub role: Role,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileField {
    UserId(String),
    Username(String),
    Role(Role),
    FullName(String),
}

impl ProfileField {
    pub fn column(&self) -> &'static str {
        match self {
            ProfileField::UserId(_) => "user_id",
            ProfileField::Username(_) => "username",
            ProfileField::Role(_) => "role",
            ProfileField::FullName(_) => "full_name",
        }
    }
}

impl Draft<Profile> for ProfileDraft {
    type Field = ProfileField;

    fn from_record(record: &Profile) -> Self {
        Self {
            user_id: record.user_id.clone(),
            username: record.username.clone(),
            role: record.role,
            full_name: record.full_name.clone().unwrap_or_default(),
        }
    }

    fn apply(&mut self, field: ProfileField) {
        match field {
            ProfileField::UserId(v) => self.user_id = v,
            ProfileField::Username(v) => self.username = v,
            ProfileField::Role(v) => self.role = v,
            ProfileField::FullName(v) => self.full_name = v,
        }
    }

    fn missing(&self) -> Vec<&'static str> {
        [("user_id", &self.user_id), ("username", &self.username)]
            .into_iter()
            .filter(|(_, value)| is_blank(value))
            .map(|(column, _)| column)
            .collect()
    }

    fn to_row(&self) -> DomainResult<Row> {
        let mut row = Row::new();
        row.insert("user_id".into(), text(&self.user_id));
        row.insert("username".into(), text(&self.username));
        row.insert("role".into(), self.role.as_str().into());
        row.insert("full_name".into(), optional_text(&self.full_name));
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(role: Role, full_name: Option<&str>) -> Profile {
        Profile {
            id: RecordId::new("p1"),
            user_id: "u1".into(),
            username: "treasurer".into(),
            role,
            full_name: full_name.map(String::from),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_admin_role() {
        assert!(profile(Role::Admin, None).is_admin());
        assert!(!profile(Role::User, None).is_admin());
        assert_eq!(Role::default(), Role::User);
    }

    #[test]
    fn test_display_name_prefers_full_name() {
        assert_eq!(profile(Role::User, Some("Suresh Gupta")).display_name(), "Suresh Gupta");
        assert_eq!(profile(Role::User, Some("  ")).display_name(), "treasurer");
        assert_eq!(profile(Role::User, None).display_name(), "treasurer");
    }
}
