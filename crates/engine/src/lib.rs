pub use assets::{Asset, AssetKind, AssetSide, Market, MetalKind, NewAssetRequest};
pub use backend::{
    AcquisitionLot, AssetNew, AssetUpdate, Backend, BackendError, CacheScope, DebtCreated, DebtNew,
    InterestSettings, RecordCreated, RecordMeta, RecordNew, RecurringNew,
};
pub use calc::interest::PayoutPeriod;
pub use calc::metals::MetalUnit;
pub use categories::{Category, CategoryPreset, FlowDirection, PartyKind};
pub use currency::Currency;
pub use error::EngineError;
pub use form::{
    Field, FieldErrors, FieldUpdate, FlowDraft, FormState, MaturityChoice, PartySel, StartChoice,
};
pub use ledger::{CompensationLedger, CreatedResource};
pub use money::Money;
pub use recurring::Frequency;
pub use submit::{Orchestrator, SubmitOutcome};

mod assets;
mod backend;
pub mod calc;
mod categories;
mod currency;
mod error;
mod form;
mod ledger;
mod money;
mod recurring;
mod resolve;
mod submit;
mod util;
