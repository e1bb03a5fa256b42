//! HTTP implementation of the engine's backend seam.

use engine::{
    AcquisitionLot, Asset, AssetNew, AssetUpdate, Backend, BackendError, CacheScope, DebtCreated,
    DebtNew, InterestSettings, RecordCreated, RecordNew, RecurringNew,
};
use tokio::sync::watch;
use tracing::debug;
use uuid::Uuid;

use crate::api::{ApiError, RestClient};
use crate::convert;

impl From<ApiError> for BackendError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Network(inner) => BackendError::Network(inner.to_string()),
            ApiError::Server { status, message } => BackendError::Rejected {
                status: status.as_u16(),
                message,
            },
        }
    }
}

/// One bump counter per cache scope. Readers keep a receiver and reload
/// when the value changes; bumping never blocks.
struct Invalidations {
    assets: watch::Sender<u64>,
    records: watch::Sender<u64>,
    stats: watch::Sender<u64>,
}

impl Invalidations {
    fn new() -> Self {
        Self {
            assets: watch::Sender::new(0),
            records: watch::Sender::new(0),
            stats: watch::Sender::new(0),
        }
    }

    fn sender(&self, scope: CacheScope) -> &watch::Sender<u64> {
        match scope {
            CacheScope::Assets => &self.assets,
            CacheScope::Records => &self.records,
            CacheScope::Stats => &self.stats,
        }
    }
}

/// [`Backend`] over the REST API.
pub struct HttpBackend {
    api: RestClient,
    invalidations: Invalidations,
}

impl HttpBackend {
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: String, token: Option<String>) -> Self {
        Self {
            api: RestClient::new(client, base_url, token),
            invalidations: Invalidations::new(),
        }
    }

    /// Receiver that yields a new value every time `scope` goes stale.
    #[must_use]
    pub fn subscribe(&self, scope: CacheScope) -> watch::Receiver<u64> {
        self.invalidations.sender(scope).subscribe()
    }

    /// Current asset snapshot. Reads bypass the submission paths; only
    /// mutations go through the [`Backend`] trait.
    pub async fn assets(&self) -> Result<Vec<Asset>, BackendError> {
        let response = self.api.list_assets().await?;
        Ok(response
            .assets
            .into_iter()
            .map(convert::asset_from_api)
            .collect())
    }

    /// Stored acquisition lots for a holding, oldest first.
    pub async fn acquisitions(&self, asset_id: Uuid) -> Result<Vec<AcquisitionLot>, BackendError> {
        Ok(self
            .api
            .list_acquisitions(asset_id)
            .await?
            .lots
            .into_iter()
            .map(convert::lot_from_api)
            .collect())
    }
}

impl Backend for HttpBackend {
    async fn create_asset(&self, spec: &AssetNew) -> Result<Asset, BackendError> {
        let view = self
            .api
            .create_asset(&convert::asset_new_to_api(spec))
            .await?;
        Ok(convert::asset_from_api(view))
    }

    async fn update_asset(&self, id: Uuid, update: &AssetUpdate) -> Result<(), BackendError> {
        self.api
            .update_asset(id, &convert::update_to_api(update))
            .await?;
        Ok(())
    }

    async fn delete_asset(&self, id: Uuid) -> Result<(), BackendError> {
        self.api.delete_asset(id).await?;
        Ok(())
    }

    async fn create_income(&self, record: &RecordNew) -> Result<RecordCreated, BackendError> {
        let created = self.api.create_income(&convert::record_to_api(record)).await?;
        Ok(RecordCreated { id: created.id })
    }

    async fn create_expense(&self, record: &RecordNew) -> Result<RecordCreated, BackendError> {
        let created = self
            .api
            .create_expense(&convert::record_to_api(record))
            .await?;
        Ok(RecordCreated { id: created.id })
    }

    async fn create_transfer(&self, record: &RecordNew) -> Result<RecordCreated, BackendError> {
        let created = self
            .api
            .create_transfer(&convert::record_to_api(record))
            .await?;
        Ok(RecordCreated { id: created.id })
    }

    async fn create_investment(&self, record: &RecordNew) -> Result<RecordCreated, BackendError> {
        let created = self
            .api
            .create_investment(&convert::record_to_api(record))
            .await?;
        Ok(RecordCreated { id: created.id })
    }

    async fn delete_record(&self, id: Uuid) -> Result<(), BackendError> {
        self.api.delete_record(id).await?;
        Ok(())
    }

    async fn create_debt(&self, spec: &DebtNew) -> Result<DebtCreated, BackendError> {
        let created = self.api.create_debt(&convert::debt_to_api(spec)).await?;
        Ok(DebtCreated { id: created.id })
    }

    async fn create_debt_payment(
        &self,
        debt_id: Uuid,
        record: &RecordNew,
    ) -> Result<RecordCreated, BackendError> {
        let created = self
            .api
            .create_debt_payment(debt_id, &convert::record_to_api(record))
            .await?;
        Ok(RecordCreated { id: created.id })
    }

    async fn upsert_interest_settings(
        &self,
        asset_id: Uuid,
        settings: &InterestSettings,
    ) -> Result<(), BackendError> {
        self.api
            .upsert_interest_settings(asset_id, &convert::settings_to_api(settings))
            .await?;
        Ok(())
    }

    async fn create_recurring(&self, spec: &RecurringNew) -> Result<(), BackendError> {
        self.api
            .create_recurring(&convert::recurring_to_api(spec))
            .await?;
        Ok(())
    }

    async fn set_linked_ledgers(
        &self,
        record_id: Uuid,
        ledger_ids: &[Uuid],
    ) -> Result<(), BackendError> {
        let payload = api_types::record::LedgerLinks {
            ledger_ids: ledger_ids.to_vec(),
        };
        self.api.set_ledger_links(record_id, &payload).await?;
        Ok(())
    }

    async fn list_acquisitions(
        &self,
        asset_id: Uuid,
    ) -> Result<Vec<AcquisitionLot>, BackendError> {
        self.acquisitions(asset_id).await
    }

    fn invalidate(&self, scope: CacheScope) {
        debug!(?scope, "cache invalidated");
        self.invalidations.sender(scope).send_modify(|n| *n += 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalidation_bumps_the_scope_counter() {
        let backend = HttpBackend::new(reqwest::Client::new(), "http://localhost".into(), None);
        let assets = backend.subscribe(CacheScope::Assets);
        let records = backend.subscribe(CacheScope::Records);

        backend.invalidate(CacheScope::Assets);
        backend.invalidate(CacheScope::Assets);

        assert_eq!(*assets.borrow(), 2);
        assert_eq!(*records.borrow(), 0);
    }

    #[test]
    fn api_errors_map_onto_backend_errors() {
        let err = ApiError::Server {
            status: reqwest::StatusCode::CONFLICT,
            message: "duplicate".into(),
        };
        assert_eq!(
            BackendError::from(err),
            BackendError::Rejected {
                status: 409,
                message: "duplicate".into(),
            }
        );
    }
}
