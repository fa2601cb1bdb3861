use crate::dto::meta_dto::MetaOption;
use crate::error::{Error, Result};
use reqwest::Client;

/// Client for the profile/meta API that owns the service-type and language lists.
#[derive(Clone)]
pub struct MetaService {
    client: Client,
    base_url: Option<String>,
}

impl MetaService {
    pub fn new(client: Client, base_url: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.map(|url| url.trim_end_matches('/').to_string()),
        }
    }

    pub async fn fetch_service_types(&self) -> Result<Vec<MetaOption>> {
        self.fetch_options("services").await
    }

    pub async fn fetch_languages(&self) -> Result<Vec<MetaOption>> {
        self.fetch_options("languages").await
    }

    async fn fetch_options(&self, resource: &str) -> Result<Vec<MetaOption>> {
        let Some(base_url) = self.base_url.as_deref() else {
            return Err(Error::Unavailable(
                "Profile/meta API is not configured".to_string(),
            ));
        };
        let url = format!("{}/{}", base_url, resource);
        tracing::debug!("Fetching meta options from: {}", url);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let options = response.json::<Vec<MetaOption>>().await?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unconfigured_client_reports_unavailable() {
        let service = MetaService::new(Client::new(), None);
        let err = service.fetch_languages().await.unwrap_err();
        assert!(matches!(err, Error::Unavailable(_)));
    }
}
