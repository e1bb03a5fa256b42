//! Thin typed wrapper over the HTTP surface. One method per endpoint,
//! no retries, no caching.

use api_types::{
    asset::{AcquisitionsResponse, AssetNew, AssetUpdate, AssetView, AssetsResponse},
    debt::{DebtCreated, DebtNew},
    interest::InterestSettingsUpsert,
    record::{LedgerLinks, RecordCreated, RecordNew},
    recurring::RecurringNew,
};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct RestClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{status}: {message}")]
    Server { status: StatusCode, message: String },
}

impl RestClient {
    pub fn new(client: Client, base_url: String, token: Option<String>) -> Self {
        Self {
            client,
            base_url,
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut req = self.client.request(method, self.url(path));
        if let Some(token) = &self.token {
            req = req.header("x-api-token", token);
        }
        req
    }

    async fn finish(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = match resp.json::<ErrorBody>().await {
            Ok(err) => err.error,
            Err(_) => "server error".to_string(),
        };
        Err(ApiError::Server { status, message })
    }

    async fn get_json<TResp: for<'de> serde::Deserialize<'de>>(
        &self,
        path: &str,
    ) -> Result<TResp, ApiError> {
        let resp = self.request(reqwest::Method::GET, path).send().await?;
        Ok(Self::finish(resp).await?.json::<TResp>().await?)
    }

    async fn post_json<TReq: serde::Serialize + ?Sized, TResp: for<'de> serde::Deserialize<'de>>(
        &self,
        path: &str,
        body: &TReq,
    ) -> Result<TResp, ApiError> {
        let resp = self
            .request(reqwest::Method::POST, path)
            .json(body)
            .send()
            .await?;
        Ok(Self::finish(resp).await?.json::<TResp>().await?)
    }

    async fn post_json_unit<TReq: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &TReq,
    ) -> Result<(), ApiError> {
        let resp = self
            .request(reqwest::Method::POST, path)
            .json(body)
            .send()
            .await?;
        Self::finish(resp).await.map(|_| ())
    }

    async fn patch_json_unit<TReq: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &TReq,
    ) -> Result<(), ApiError> {
        let resp = self
            .request(reqwest::Method::PATCH, path)
            .json(body)
            .send()
            .await?;
        Self::finish(resp).await.map(|_| ())
    }

    async fn put_json_unit<TReq: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &TReq,
    ) -> Result<(), ApiError> {
        let resp = self
            .request(reqwest::Method::PUT, path)
            .json(body)
            .send()
            .await?;
        Self::finish(resp).await.map(|_| ())
    }

    async fn delete_unit(&self, path: &str) -> Result<(), ApiError> {
        let resp = self.request(reqwest::Method::DELETE, path).send().await?;
        Self::finish(resp).await.map(|_| ())
    }

    pub async fn list_assets(&self) -> Result<AssetsResponse, ApiError> {
        self.get_json("/assets").await
    }

    pub async fn create_asset(&self, payload: &AssetNew) -> Result<AssetView, ApiError> {
        self.post_json("/assets", payload).await
    }

    pub async fn update_asset(&self, id: Uuid, payload: &AssetUpdate) -> Result<(), ApiError> {
        self.patch_json_unit(&format!("/assets/{id}"), payload).await
    }

    pub async fn delete_asset(&self, id: Uuid) -> Result<(), ApiError> {
        self.delete_unit(&format!("/assets/{id}")).await
    }

    pub async fn create_income(&self, payload: &RecordNew) -> Result<RecordCreated, ApiError> {
        self.post_json("/records/income", payload).await
    }

    pub async fn create_expense(&self, payload: &RecordNew) -> Result<RecordCreated, ApiError> {
        self.post_json("/records/expense", payload).await
    }

    pub async fn create_transfer(&self, payload: &RecordNew) -> Result<RecordCreated, ApiError> {
        self.post_json("/records/transfer", payload).await
    }

    pub async fn create_investment(&self, payload: &RecordNew) -> Result<RecordCreated, ApiError> {
        self.post_json("/records/investment", payload).await
    }

    pub async fn delete_record(&self, id: Uuid) -> Result<(), ApiError> {
        self.delete_unit(&format!("/records/{id}")).await
    }

    pub async fn create_debt(&self, payload: &DebtNew) -> Result<DebtCreated, ApiError> {
        self.post_json("/debts", payload).await
    }

    pub async fn create_debt_payment(
        &self,
        debt_id: Uuid,
        payload: &RecordNew,
    ) -> Result<RecordCreated, ApiError> {
        self.post_json(&format!("/debts/{debt_id}/payments"), payload)
            .await
    }

    pub async fn upsert_interest_settings(
        &self,
        asset_id: Uuid,
        payload: &InterestSettingsUpsert,
    ) -> Result<(), ApiError> {
        self.put_json_unit(&format!("/assets/{asset_id}/interest"), payload)
            .await
    }

    pub async fn create_recurring(&self, payload: &RecurringNew) -> Result<(), ApiError> {
        self.post_json_unit("/recurring", payload).await
    }

    pub async fn set_ledger_links(
        &self,
        record_id: Uuid,
        payload: &LedgerLinks,
    ) -> Result<(), ApiError> {
        self.put_json_unit(&format!("/records/{record_id}/ledgers"), payload)
            .await
    }

    pub async fn list_acquisitions(&self, asset_id: Uuid) -> Result<AcquisitionsResponse, ApiError> {
        self.get_json(&format!("/assets/{asset_id}/acquisitions"))
            .await
    }
}
