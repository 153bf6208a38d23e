use std::env;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use secrecy::SecretString;

use crate::github::{GithubClient, GithubClientImpl, Owner, PackageType};
use crate::purge::purge_package;

mod github;
mod purge;

/// Delete specific versions of GitHub packages.
#[derive(Parser)]
#[clap(version)]
struct Args {
    /// Ecosystem the packages belong to
    #[clap(long, value_enum)]
    package_type: PackageType,

    /// Comma-separated names of the packages to delete versions from
    #[clap(long, value_delimiter = ',', required = true)]
    packages: Vec<String>,

    /// Comma-separated version labels to delete from every listed package
    #[clap(long, value_delimiter = ',', required = true)]
    versions: Vec<String>,

    /// Account owning the packages.
    /// Defaults to the GITHUB_REPOSITORY_OWNER env variable.
    #[clap(long)]
    owner: Option<String>,

    /// Path to a file containing a GitHub token.
    /// You can also pass a token verbatim via the GITHUB_TOKEN env variable.
    #[clap(long)]
    token: Option<String>,

    /// Make logging more verbose.
    /// You can also specify the log level via the RUST_LOG env variable.
    #[clap(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if env::var("RUST_LOG").is_err() {
        let level = match args.verbose {
            true => "debug",
            false => "info",
        };
        env::set_var("RUST_LOG", format!("{}={}", env!("CARGO_PKG_NAME"), level));
    }
    env_logger::init();

    log::info!(
        "Starting {} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
    );
    log::debug!("With arguments {:?}", env::args().collect::<Vec<_>>());

    if let Err(error) = run(args).await {
        log::error!("{:?}", error);
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    // The token is wrapped before anything else can look at it and only
    // leaves the wrapper inside the client constructor.
    let token = SecretString::from(match args.token {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .context(format!("Failed to read the github token from {}", path))?
            .trim()
            .to_string(),
        None => env::var("GITHUB_TOKEN")
            .context("No github token provided via --token or GITHUB_TOKEN")?,
    });
    let client = GithubClientImpl::new(&token).context("Failed to create github client")?;

    let owner_name = match args.owner {
        Some(owner) => owner,
        None => env::var("GITHUB_REPOSITORY_OWNER")
            .context("No owner provided via --owner or GITHUB_REPOSITORY_OWNER")?,
    };

    let account = client
        .get_account(&owner_name)
        .await
        .context(format!("Failed to look up account {}", owner_name))?;
    log::info!("Account {} is of kind {}", account.login, account.kind);

    let owner = Owner {
        name: owner_name,
        kind: account.kind,
    };

    for package_name in &args.packages {
        purge_package(&client, &owner, args.package_type, package_name, &args.versions)
            .await
            .context(format!(
                "Failed to purge package {}/{}",
                owner, package_name,
            ))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_args() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_args_split_comma_separated_lists() {
        let args = Args::parse_from([
            "vanish",
            "--package-type",
            "npm",
            "--packages",
            "lib-a,lib-b",
            "--versions",
            "1.0.0,2.0.0",
        ]);

        assert_eq!(args.package_type, PackageType::Npm);
        assert_eq!(args.packages, vec!["lib-a", "lib-b"]);
        assert_eq!(args.versions, vec!["1.0.0", "2.0.0"]);
        assert!(args.owner.is_none());
    }

    #[test]
    fn test_args_require_packages_and_versions() {
        let result = Args::try_parse_from(["vanish", "--package-type", "npm"]);
        assert!(result.is_err());
    }
}
