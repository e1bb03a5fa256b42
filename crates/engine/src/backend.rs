//! The module contains the backend seam the submission paths talk to.
//!
//! Every remote mutation the engine performs goes through [`Backend`].
//! The HTTP implementation lives in its own crate; tests drive the
//! orchestrator against an in-memory fake. Calls are awaited one at a
//! time and are never retried here; a failed call surfaces as a
//! [`BackendError`] and the caller decides what to unwind.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{
    Asset, AssetKind, Category, Currency, Frequency, Market, MetalKind, Money,
    calc::{interest::PayoutPeriod, metals::MetalUnit},
    form::FlowDraft,
};

/// Failure of one backend call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Transport-level failure; nothing is known about server state.
    #[error("network error: {0}")]
    Network(String),
    /// The server answered and refused.
    #[error("backend rejected the call ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Read caches a commit makes stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheScope {
    Assets,
    Records,
    Stats,
}

/// Category-specific payload attached to a record.
///
/// Closed union: the backend stores whatever is here verbatim, and every
/// producer in the engine goes through one of these variants. An unknown
/// `kind` on the wire is a decode error, not a silent passthrough.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordMeta {
    Investment {
        units: f64,
        price_per_unit: f64,
    },
    Dividend {
        gross_minor: i64,
        tax_rate: f64,
        tax_withheld_minor: i64,
    },
    Drip {
        units: f64,
    },
    Sale {
        units: f64,
        avg_cost_per_unit: Option<f64>,
        realized_pl_minor: Option<i64>,
    },
    Interest {
        period: Option<PayoutPeriod>,
        annual_rate: Option<f64>,
        principal_minor: Option<i64>,
    },
    DebtPayment {
        principal_minor: Option<i64>,
        interest_minor: Option<i64>,
    },
}

/// Spec for creating an asset.
#[derive(Clone, Debug, PartialEq)]
pub struct AssetNew {
    pub name: String,
    pub kind: AssetKind,
    pub currency: Currency,
    /// Unit depends on `kind`; see [`Asset::balance`](crate::Asset).
    pub balance: f64,
    pub ticker: Option<String>,
    pub metal: Option<MetalKind>,
    pub unit: Option<MetalUnit>,
    pub market: Option<Market>,
}

impl AssetNew {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: AssetKind, currency: Currency) -> Self {
        Self {
            name: name.into(),
            kind,
            currency,
            balance: 0.0,
            ticker: None,
            metal: None,
            unit: None,
            market: None,
        }
    }
}

/// Sparse asset update; `None` fields stay untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AssetUpdate {
    pub balance: Option<f64>,
    pub saved_rate: Option<f64>,
    pub rate_period: Option<PayoutPeriod>,
    pub realized_pl_minor: Option<i64>,
}

/// Spec for one record, shared by all record-creation families.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordNew {
    pub date: NaiveDate,
    pub category: Category,
    pub amount: Money,
    pub currency: Currency,
    pub note: Option<String>,
    /// Free-text counterparty when the source is external.
    pub source_name: Option<String>,
    pub source_asset: Option<Uuid>,
    pub destination_name: Option<String>,
    pub destination_asset: Option<Uuid>,
    pub recurring: Option<Frequency>,
    pub meta: Option<RecordMeta>,
}

impl RecordNew {
    /// Record skeleton from a draft: date, category, currency, note and
    /// recurring tag. Parties and metadata are the branch's business.
    #[must_use]
    pub fn from_draft(draft: &FlowDraft, amount: Money) -> Self {
        Self {
            date: draft.date,
            category: draft.category,
            amount,
            currency: draft.currency,
            note: draft.note.clone(),
            source_name: None,
            source_asset: None,
            destination_name: None,
            destination_asset: None,
            recurring: draft.recurring,
            meta: None,
        }
    }
}

/// Backend acknowledgement of a created record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordCreated {
    pub id: Uuid,
}

/// Spec for creating a debt.
#[derive(Clone, Debug, PartialEq)]
pub struct DebtNew {
    /// Lender or a user-chosen label.
    pub name: String,
    pub date: NaiveDate,
    pub currency: Currency,
    pub principal: Money,
    pub annual_rate: Option<f64>,
    pub term_months: Option<u32>,
    /// Precomputed amortized payment when rate and term are both known.
    pub monthly_payment: Option<Money>,
    /// Money account the borrowed principal lands in, if tracked.
    pub disburse_to: Option<Uuid>,
    pub note: Option<String>,
}

/// Backend acknowledgement of a created debt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebtCreated {
    pub id: Uuid,
}

/// Saved interest terms of a deposit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InterestSettings {
    /// Effective annual rate as a fraction.
    pub annual_rate: f64,
    pub period: PayoutPeriod,
}

/// Spec for a recurring schedule.
#[derive(Clone, Debug, PartialEq)]
pub struct RecurringNew {
    pub record: RecordNew,
    pub frequency: Frequency,
    pub first_run: NaiveDate,
}

/// One past acquisition of a holding, as the backend reports it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AcquisitionLot {
    pub date: NaiveDate,
    pub units: f64,
    /// Total cost of the lot in minor units.
    pub cost: Money,
}

/// The remote services a submission touches.
///
/// Implementations must not retry on their own: the orchestrator treats
/// every error as final for the attempt and compensates accordingly.
#[allow(async_fn_in_trait)]
pub trait Backend {
    async fn create_asset(&self, spec: &AssetNew) -> Result<Asset, BackendError>;
    async fn update_asset(&self, id: Uuid, update: &AssetUpdate) -> Result<(), BackendError>;
    async fn delete_asset(&self, id: Uuid) -> Result<(), BackendError>;

    async fn create_income(&self, record: &RecordNew) -> Result<RecordCreated, BackendError>;
    async fn create_expense(&self, record: &RecordNew) -> Result<RecordCreated, BackendError>;
    async fn create_transfer(&self, record: &RecordNew) -> Result<RecordCreated, BackendError>;
    async fn create_investment(&self, record: &RecordNew) -> Result<RecordCreated, BackendError>;
    async fn delete_record(&self, id: Uuid) -> Result<(), BackendError>;

    async fn create_debt(&self, spec: &DebtNew) -> Result<DebtCreated, BackendError>;
    async fn create_debt_payment(
        &self,
        debt_id: Uuid,
        record: &RecordNew,
    ) -> Result<RecordCreated, BackendError>;

    async fn upsert_interest_settings(
        &self,
        asset_id: Uuid,
        settings: &InterestSettings,
    ) -> Result<(), BackendError>;

    async fn create_recurring(&self, spec: &RecurringNew) -> Result<(), BackendError>;

    async fn set_linked_ledgers(
        &self,
        record_id: Uuid,
        ledger_ids: &[Uuid],
    ) -> Result<(), BackendError>;

    async fn list_acquisitions(&self, asset_id: Uuid)
    -> Result<Vec<AcquisitionLot>, BackendError>;

    /// Fire-and-forget staleness signal. Synchronous: implementations may
    /// only flip flags or send on a channel, never block.
    fn invalidate(&self, scope: CacheScope);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn meta_serializes_with_a_kind_tag() {
        let meta = RecordMeta::Dividend {
            gross_minor: 100_00,
            tax_rate: 0.30,
            tax_withheld_minor: 30_00,
        };
        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value["kind"], "dividend");
        assert_eq!(value["gross_minor"], 100_00);
        assert_eq!(value["tax_withheld_minor"], 30_00);
    }

    #[test]
    fn unknown_meta_kind_is_a_decode_error() {
        let result: Result<RecordMeta, _> =
            serde_json::from_value(json!({ "kind": "mystery", "units": 1.0 }));
        assert!(result.is_err());
    }

    #[test]
    fn meta_round_trips() {
        let meta = RecordMeta::Sale {
            units: 20.0,
            avg_cost_per_unit: Some(100.0),
            realized_pl_minor: Some(400_00),
        };
        let json = serde_json::to_string(&meta).unwrap();
        let back: RecordMeta = serde_json::from_str(&json).unwrap();
        assert_eq!(back, meta);
    }
}
