use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Proxy};
use url::Url;

use super::models::{combine_editions, ApiEnvelope, EditionSurah, Surah, SurahText};
use crate::config::AppConfig;
use crate::{Error, Result};

/// Source of surah metadata and verse text
#[async_trait]
pub trait QuranProvider: Send + Sync {
    /// List all 114 surahs in order
    async fn list_surahs(&self) -> Result<Vec<Surah>>;

    /// Fetch a surah's verses with the given translation edition
    async fn surah_verses(&self, number: u32, translation_edition: &str) -> Result<SurahText>;
}

/// HTTP client for the alquran.cloud API
pub struct QuranClient {
    client: Client,
    base_url: Url,
    arabic_edition: String,
}

impl QuranClient {
    /// Create a new client from configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Self::build_client(config.api.request_timeout_secs, &config.api.proxy_url)?;
        let base_url = Self::parse_base_url(&config.api.base_url)?;

        Ok(Self {
            client,
            base_url,
            arabic_edition: config.api.arabic_edition.clone(),
        })
    }

    /// Build HTTP client with optional proxy
    fn build_client(timeout_secs: u64, proxy_url: &Option<String>) -> Result<Client> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("tilawa/", env!("CARGO_PKG_VERSION"))),
        );

        let mut builder = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .gzip(true)
            .default_headers(headers);

        if let Some(ref proxy) = proxy_url {
            let proxy = Proxy::all(proxy)
                .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
            tracing::info!("Using HTTP proxy for Quran API");
        }

        builder.build().map_err(Error::Http)
    }

    /// Parse the base URL, making sure joined paths keep its last segment
    fn parse_base_url(base: &str) -> Result<Url> {
        let mut url = Url::parse(base)?;
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }

    /// Endpoint URL for a relative API path such as `surah/1/en.asad`
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        tracing::debug!("GET {}", url);

        let envelope: ApiEnvelope = self.client.get(url).send().await?.json().await?;
        envelope.into_data()
    }

    async fn fetch_edition(&self, number: u32, edition: &str) -> Result<EditionSurah> {
        self.get_json(&format!("surah/{}/{}", number, edition)).await
    }
}

#[async_trait]
impl QuranProvider for QuranClient {
    async fn list_surahs(&self) -> Result<Vec<Surah>> {
        tracing::info!("Fetching surah index");
        let surahs: Vec<EditionSurah> = self.get_json("surah").await?;
        Ok(surahs.iter().map(Surah::from).collect())
    }

    async fn surah_verses(&self, number: u32, translation_edition: &str) -> Result<SurahText> {
        let number = Surah::validate_number(number)?;
        tracing::info!(surah = number, edition = translation_edition, "Fetching surah text");

        let (arabic, translation) = tokio::try_join!(
            self.fetch_edition(number, &self.arabic_edition),
            self.fetch_edition(number, translation_edition),
        )?;

        if arabic.ayahs.len() != translation.ayahs.len() {
            tracing::warn!(
                surah = number,
                arabic = arabic.ayahs.len(),
                translation = translation.ayahs.len(),
                "Edition verse counts differ"
            );
        }

        Ok(combine_editions(arabic, Some(translation)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_with_base(base: &str) -> QuranClient {
        let mut config = AppConfig::default();
        config.api.base_url = base.to_string();
        QuranClient::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_keeps_version_segment() {
        let client = client_with_base("https://api.alquran.cloud/v1");
        assert_eq!(
            client.endpoint("surah/2/en.asad").unwrap().as_str(),
            "https://api.alquran.cloud/v1/surah/2/en.asad"
        );
        assert_eq!(
            client.endpoint("/surah").unwrap().as_str(),
            "https://api.alquran.cloud/v1/surah"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = AppConfig::default();
        config.api.base_url = "not a url".to_string();
        assert!(matches!(QuranClient::new(&config), Err(Error::UrlParse(_))));
    }

    #[tokio::test]
    async fn test_surah_verses_rejects_out_of_range() {
        let client = client_with_base("http://127.0.0.1:9/v1");
        let err = client.surah_verses(0, "en.asad").await.unwrap_err();
        assert!(matches!(err, Error::InvalidSurah(0)));
    }
}
