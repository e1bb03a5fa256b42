use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Krw,
}

pub mod asset {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::interest::PayoutPeriod;
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum AssetKind {
        Cash,
        Deposit,
        Stock,
        Etf,
        Metal,
        RealEstate,
        Other,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum MetalKind {
        Gold,
        Silver,
        Platinum,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum MetalUnit {
        Gram,
        Kilogram,
        TroyOunce,
        Don,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Market {
        Us,
        Kr,
        Eu,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AssetNew {
        pub name: String,
        pub kind: AssetKind,
        pub currency: Currency,
        /// Money-major for accounts, units for holdings, weight for metals.
        pub balance: f64,
        pub ticker: Option<String>,
        pub metal: Option<MetalKind>,
        pub unit: Option<MetalUnit>,
        pub market: Option<Market>,
    }

    /// Sparse update; absent fields stay untouched.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct AssetUpdate {
        pub balance: Option<f64>,
        pub saved_rate: Option<f64>,
        pub rate_period: Option<PayoutPeriod>,
        pub realized_pl_minor: Option<i64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AssetView {
        pub id: Uuid,
        pub name: String,
        pub kind: AssetKind,
        pub currency: Currency,
        pub balance: f64,
        pub ticker: Option<String>,
        pub metal: Option<MetalKind>,
        pub unit: Option<MetalUnit>,
        pub market: Option<Market>,
        pub saved_rate: Option<f64>,
        pub rate_period: Option<PayoutPeriod>,
        pub realized_pl_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AssetsResponse {
        pub assets: Vec<AssetView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AcquisitionLot {
        pub date: NaiveDate,
        pub units: f64,
        /// Total cost of the lot in minor units.
        pub cost_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AcquisitionsResponse {
        pub lots: Vec<AcquisitionLot>,
    }
}

pub mod record {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::interest::PayoutPeriod;
    use super::recurring::Frequency;
    use super::*;

    /// Category-shaped payload riding along with a flow record.
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

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecordNew {
        pub date: NaiveDate,
        /// Canonical category id, e.g. `"interest"` or `"metals_purchase"`.
        pub category: String,
        pub amount_minor: i64,
        pub currency: Currency,
        pub note: Option<String>,
        pub source_name: Option<String>,
        pub source_asset: Option<Uuid>,
        pub destination_name: Option<String>,
        pub destination_asset: Option<Uuid>,
        pub recurring: Option<Frequency>,
        pub meta: Option<RecordMeta>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecordCreated {
        pub id: Uuid,
    }

    /// Request body for replacing a record's linked personal ledgers.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct LedgerLinks {
        pub ledger_ids: Vec<Uuid>,
    }
}

pub mod debt {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DebtNew {
        pub name: String,
        pub date: NaiveDate,
        pub currency: Currency,
        pub principal_minor: i64,
        pub annual_rate: Option<f64>,
        pub term_months: Option<u32>,
        pub monthly_payment_minor: Option<i64>,
        /// Money account the borrowed principal lands in, if tracked.
        pub disburse_to: Option<Uuid>,
        pub note: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DebtCreated {
        pub id: Uuid,
    }
}

pub mod interest {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum PayoutPeriod {
        Weekly,
        Monthly,
        Quarterly,
        SemiAnnual,
        Annual,
        Biennial,
        Triennial,
        Quinquennial,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct InterestSettingsUpsert {
        /// Effective annual rate as a fraction.
        pub annual_rate: f64,
        pub period: PayoutPeriod,
    }
}

pub mod recurring {
    use chrono::NaiveDate;

    use super::record::RecordNew;
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum Frequency {
        Daily,
        Weekly,
        Monthly,
        Yearly,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecurringNew {
        pub record: RecordNew,
        pub frequency: Frequency,
        pub first_run: NaiveDate,
    }
}
