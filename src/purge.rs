use anyhow::{Context, Result};

use crate::github::{
    is_last_version_refusal, ApiError, GithubClient, Owner, PackageType, PackageVersion,
};

/// Delete the requested versions of one package.
///
/// A missing package and version labels without a match are logged and
/// skipped. When GitHub refuses to delete the last remaining version,
/// the whole package is deleted instead, after every other matched
/// version has been attempted. Any other failure aborts the run.
pub async fn purge_package(
    client: &impl GithubClient,
    owner: &Owner,
    package_type: PackageType,
    package_name: &str,
    version_labels: &[String],
) -> Result<()> {
    let versions = match fetch_all_versions(client, owner, package_type, package_name).await {
        Ok(versions) => versions,
        Err(ApiError::NotFound(_)) => {
            log::warn!(
                "Package {}/{} does not exist, skipping it",
                owner,
                package_name,
            );
            return Ok(());
        }
        Err(error) => {
            return Err(error).context(format!(
                "Failed to get versions of package {}/{} from github",
                owner, package_name,
            ));
        }
    };

    let matched: Vec<&PackageVersion> = versions
        .iter()
        .filter(|version| version_labels.contains(&version.name))
        .collect();

    if matched.is_empty() {
        log::info!(
            "No version of {}/{} matches the requested versions, skipping it",
            owner,
            package_name,
        );
        return Ok(());
    }

    let mut delete_whole_package = false;
    for version in matched {
        log::info!(
            "Deleting {}/{}:{} (id {})",
            owner,
            package_name,
            version.name,
            version.id,
        );

        match client
            .delete_package_version(owner, package_type, package_name, version.id)
            .await
        {
            Ok(()) => log::info!("Deleted {}/{}:{}", owner, package_name, version.name),
            Err(ApiError::NotFound(_)) => log::warn!(
                "Version {}/{}:{} was already deleted",
                owner,
                package_name,
                version.name,
            ),
            Err(ref error) if is_last_version_refusal(error) => {
                log::info!(
                    "{}:{} is the last version of {}, the whole package will be deleted",
                    package_name,
                    version.name,
                    owner,
                );
                delete_whole_package = true;
            }
            Err(error) => {
                log::error!("Failed to delete {}/{}:{}", owner, package_name, version.name);
                return Err(error).context(format!(
                    "Failed to delete version {} of package {}/{}",
                    version.name, owner, package_name,
                ));
            }
        }
    }

    if delete_whole_package {
        match client.delete_package(owner, package_type, package_name).await {
            Ok(()) => log::info!("Deleted package {}/{}", owner, package_name),
            Err(ApiError::NotFound(_)) => log::warn!(
                "Package {}/{} was already deleted",
                owner,
                package_name,
            ),
            Err(error) => {
                return Err(error).context(format!(
                    "Failed to delete package {}/{}",
                    owner, package_name,
                ));
            }
        }
    }

    Ok(())
}

/// Collect every version of a package across all result pages.
async fn fetch_all_versions(
    client: &impl GithubClient,
    owner: &Owner,
    package_type: PackageType,
    package_name: &str,
) -> Result<Vec<PackageVersion>, ApiError> {
    let mut all = Vec::new();

    let mut page = 1;
    loop {
        let versions = client
            .list_package_versions(owner, package_type, package_name, page)
            .await?;

        if versions.is_empty() {
            break;
        }

        all.extend(versions);
        page += 1;
    }

    Ok(all)
}
