use anyhow::Result;
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT},
    Client, ClientBuilder, Response, StatusCode,
};

use super::{Account, ApiError, GithubClient, Owner, PackageType, PackageVersion};

const PAGE_SIZE: u32 = 100;

/// Error body GitHub attaches to non-success responses.
#[derive(Deserialize)]
struct ErrorReply {
    message: String,
}

pub struct GithubClientImpl {
    client: Client,
}

impl GithubClientImpl {
    pub fn new(token: &SecretString) -> Result<Self> {
        let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        log::debug!("{}: {}", USER_AGENT.as_str(), user_agent);

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, "application/vnd.github.v3+json".try_into()?);
        let mut authorization: HeaderValue =
            format!("Bearer {}", token.expose_secret()).try_into()?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(USER_AGENT, user_agent.try_into()?);

        let client = ClientBuilder::new().default_headers(headers).build()?;
        Ok(Self { client })
    }

    fn package_url(
        &self,
        owner: &Owner,
        package_type: PackageType,
        package_name: &str,
    ) -> String {
        // Scoped npm names contain @ and / and must not end up raw in the path.
        format!(
            "https://api.github.com/{base}/packages/{package_type}/{package_name}",
            base = owner.base_path(),
            package_name = urlencoding::encode(package_name),
        )
    }
}

/// Map a response to our error taxonomy, consuming the body of failed
/// requests for its message.
async fn check(subject: String, response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Err(ApiError::NotFound(subject));
    }
    if !status.is_success() {
        let message = match response.json::<ErrorReply>().await {
            Ok(reply) => reply.message,
            Err(_) => status.to_string(),
        };
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response)
}

#[async_trait]
impl GithubClient for GithubClientImpl {
    async fn get_account(&self, name: &str) -> Result<Account, ApiError> {
        let response = self
            .client
            .get(format!("https://api.github.com/users/{name}"))
            .send()
            .await?;

        let response = check(format!("account {}", name), response).await?;
        Ok(response.json().await?)
    }

    async fn list_package_versions(
        &self,
        owner: &Owner,
        package_type: PackageType,
        package_name: &str,
        page: u32,
    ) -> Result<Vec<PackageVersion>, ApiError> {
        let response = self
            .client
            .get(format!(
                "{url}/versions?per_page={PAGE_SIZE}&page={page}",
                url = self.package_url(owner, package_type, package_name),
            ))
            .send()
            .await?;

        let response = check(
            format!("package {}/{}", owner, package_name),
            response,
        )
        .await?;
        Ok(response.json().await?)
    }

    async fn delete_package_version(
        &self,
        owner: &Owner,
        package_type: PackageType,
        package_name: &str,
        version_id: u64,
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(format!(
                "{url}/versions/{version_id}",
                url = self.package_url(owner, package_type, package_name),
            ))
            .send()
            .await?;

        check(
            format!("version {} of package {}/{}", version_id, owner, package_name),
            response,
        )
        .await?;
        Ok(())
    }

    async fn delete_package(
        &self,
        owner: &Owner,
        package_type: PackageType,
        package_name: &str,
    ) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.package_url(owner, package_type, package_name))
            .send()
            .await?;

        check(format!("package {}/{}", owner, package_name), response).await?;
        Ok(())
    }
}
