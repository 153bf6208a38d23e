use async_trait::async_trait;

mod api;
mod client;
mod error;

pub use api::{Account, AccountKind, Owner, PackageType, PackageVersion};
pub use client::GithubClientImpl;
pub use error::{is_last_version_refusal, ApiError};

/// The subset of the GitHub API this tool consumes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GithubClient {
    /// Look up an account to learn whether it is a user or an org.
    async fn get_account(&self, name: &str) -> Result<Account, ApiError>;

    /// Fetch one page of a package's versions.
    async fn list_package_versions(
        &self,
        owner: &Owner,
        package_type: PackageType,
        package_name: &str,
        page: u32,
    ) -> Result<Vec<PackageVersion>, ApiError>;

    /// Delete a single version of a package.
    async fn delete_package_version(
        &self,
        owner: &Owner,
        package_type: PackageType,
        package_name: &str,
        version_id: u64,
    ) -> Result<(), ApiError>;

    /// Delete a package with all its versions.
    async fn delete_package(
        &self,
        owner: &Owner,
        package_type: PackageType,
        package_name: &str,
    ) -> Result<(), ApiError>;
}
