use std::fmt::Display;

use clap::ValueEnum;
use serde::Deserialize;

/// Whether the owning account is a user or an organization.
/// GitHub scopes its package endpoints differently for the two.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    User,
    Organization,
}

impl Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Organization => f.write_str("organization"),
        }
    }
}

/// Reply of the account lookup endpoint, reduced to what we use.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub login: String,
    #[serde(rename = "type")]
    pub kind: AccountKind,
}

/// An account name with its resolved kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub name: String,
    pub kind: AccountKind,
}

impl Owner {
    /// Path prefix selecting the user- or org-scoped endpoint family.
    pub fn base_path(&self) -> String {
        match self.kind {
            AccountKind::User => format!("users/{}", self.name),
            AccountKind::Organization => format!("orgs/{}", self.name),
        }
    }
}

impl Display for Owner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Package ecosystems supported by GitHub packages.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageType {
    Npm,
    Maven,
    Rubygems,
    Docker,
    Nuget,
    Container,
}

impl Display for PackageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Npm => f.write_str("npm"),
            Self::Maven => f.write_str("maven"),
            Self::Rubygems => f.write_str("rubygems"),
            Self::Docker => f.write_str("docker"),
            Self::Nuget => f.write_str("nuget"),
            Self::Container => f.write_str("container"),
        }
    }
}

/// One version of a package as listed by GitHub. The id is the only
/// handle the deletion endpoint accepts; the name is the version label
/// shown to users.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PackageVersion {
    pub id: u64,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_deserialization() {
        let account: Account = serde_json::from_str(
            r#"{"login": "octocat", "id": 1, "type": "User"}"#,
        )
        .unwrap();
        assert_eq!(account.login, "octocat");
        assert_eq!(account.kind, AccountKind::User);

        let account: Account = serde_json::from_str(
            r#"{"login": "github", "id": 2, "type": "Organization"}"#,
        )
        .unwrap();
        assert_eq!(account.kind, AccountKind::Organization);
    }

    #[test]
    fn test_owner_base_path() {
        let user = Owner {
            name: "octocat".to_string(),
            kind: AccountKind::User,
        };
        assert_eq!(user.base_path(), "users/octocat");

        let org = Owner {
            name: "github".to_string(),
            kind: AccountKind::Organization,
        };
        assert_eq!(org.base_path(), "orgs/github");
    }

    #[test]
    fn test_package_type_display() {
        assert_eq!(PackageType::Npm.to_string(), "npm");
        assert_eq!(PackageType::Container.to_string(), "container");
    }

    #[test]
    fn test_package_version_deserialization() {
        let version: PackageVersion =
            serde_json::from_str(r#"{"id": 45763, "name": "1.0.2"}"#).unwrap();
        assert_eq!(version.id, 45763);
        assert_eq!(version.name, "1.0.2");
    }
}
