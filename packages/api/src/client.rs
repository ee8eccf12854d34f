//! `reqwest`-backed [`WeblingApi`] implementation.

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use webling_debtors_api_models::{DebtorId, DebtorList, Period, PeriodGroup, PeriodId};

use crate::config::ApiConfig;
use crate::url::{api_url, delete_path};
use crate::{ApiError, Filter, WeblingApi};

/// Name of the credential header.
pub const API_KEY_HEADER: &str = "apikey";

/// Client for a single Webling instance.
#[derive(Debug, Clone)]
pub struct HttpWeblingApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpWeblingApi {
    /// Builds a client that sends the API key on every request and applies
    /// the configured per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the key is not a valid header value or the
    /// underlying client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let mut key = HeaderValue::from_str(&config.api_key).map_err(|e| ApiError::InvalidHeader {
            message: format!("{API_KEY_HEADER}: {e}"),
        })?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_url.clone(),
        })
    }

    /// Sends a GET request and decodes the JSON body.
    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = api_url(&self.base_url, endpoint, params);
        log::debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport_error(e, &url))?;

        let status = response.status();
        if status == StatusCode::SERVICE_UNAVAILABLE {
            return Err(ApiError::ServiceUnavailable { url });
        }
        if !status.is_success() {
            return Err(ApiError::Status { status, url });
        }

        let text = response.text().await.map_err(|e| transport_error(e, &url))?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl WeblingApi for HttpWeblingApi {
    async fn fetch_debtor_ids(&self, filter: &Filter) -> Result<Vec<DebtorId>, ApiError> {
        let filter = filter.to_string();
        let list: DebtorList = self.get("debitor", &[("filter", &filter)]).await?;
        Ok(list.ids())
    }

    async fn fetch_period(&self, period_id: PeriodId) -> Result<Period, ApiError> {
        self.get(&format!("period/{period_id}"), &[]).await
    }

    async fn fetch_period_groups(&self, filter: &Filter) -> Result<Vec<PeriodGroup>, ApiError> {
        let filter = filter.to_string();
        self.get("periodgroup", &[("format", "full"), ("filter", &filter)])
            .await
    }

    async fn delete_debtors(&self, ids: &[DebtorId]) -> Result<StatusCode, ApiError> {
        let url = api_url(&self.base_url, &delete_path(ids), &[]);
        log::debug!("DELETE {url}");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|e| transport_error(e, &url))?;

        Ok(response.status())
    }
}

/// Separates timeouts from other transport failures.
fn transport_error(e: reqwest::Error, url: &str) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout {
            url: url.to_string(),
        }
    } else {
        ApiError::Http(e)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn api(server: &MockServer) -> HttpWeblingApi {
        HttpWeblingApi::new(&ApiConfig::new(&server.uri(), "secret-key")).unwrap()
    }

    #[tokio::test]
    async fn fetches_debtor_ids_with_encoded_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/debitor"))
            .and(header("apikey", "secret-key"))
            .and(query_param(
                "filter",
                r#"state = "open" AND $parents.$id = 42 AND `title` IN ("Membership")"#,
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "objects": [5, 3, 9]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let filter = Filter::open_debtors(PeriodId(42), &["Membership".to_string()]);
        let ids = api(&server).fetch_debtor_ids(&filter).await.unwrap();
        assert_eq!(ids, vec![DebtorId(5), DebtorId(3), DebtorId(9)]);
    }

    #[tokio::test]
    async fn ampersand_in_title_stays_inside_the_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/debitor"))
            .and(query_param(
                "filter",
                r#"state = "open" AND $parents.$id = 42 AND `title` IN ("R&D", "A=B")"#,
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "objects": [11, 12]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let titles = vec!["R&D".to_string(), "A=B".to_string()];
        let filter = Filter::open_debtors(PeriodId(42), &titles);
        let ids = api(&server).fetch_debtor_ids(&filter).await.unwrap();
        assert_eq!(ids, vec![DebtorId(11), DebtorId(12)]);
    }

    #[tokio::test]
    async fn maps_503_to_service_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/debitor"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = api(&server)
            .fetch_debtor_ids(&Filter::open_debtors(PeriodId(1), &[]))
            .await
            .unwrap_err();
        assert!(err.is_service_unavailable());
    }

    #[tokio::test]
    async fn other_error_statuses_are_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/period/8"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = api(&server).fetch_period(PeriodId(8)).await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status, .. } if status == StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn fetches_period_and_group_titles() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/period/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "properties": { "title": "2024" }
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/periodgroup"))
            .and(query_param("format", "full"))
            .and(query_param("filter", "$children.period.$id = 42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "properties": { "title": "Mitglieder" } }
            ])))
            .mount(&server)
            .await;

        let api = api(&server);
        let period = api.fetch_period(PeriodId(42)).await.unwrap();
        let groups = api
            .fetch_period_groups(&Filter::period_group_of(PeriodId(42)))
            .await
            .unwrap();
        assert_eq!(period.title(), "2024");
        assert_eq!(groups[0].title(), "Mitglieder");
    }

    #[tokio::test]
    async fn delete_returns_status_for_id_list() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/debitor/1,2,3"))
            .and(header("apikey", "secret-key"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let status = api(&server)
            .delete_debtors(&[DebtorId(1), DebtorId(2), DebtorId(3)])
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn slow_delete_is_a_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let config = ApiConfig::new(&server.uri(), "secret-key")
            .with_request_timeout(Duration::from_millis(50));
        let err = HttpWeblingApi::new(&config)
            .unwrap()
            .delete_debtors(&[DebtorId(1)])
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Timeout { .. }));
    }
}
