//! The module contains the submission orchestrator.
//!
//! A submission is one linear pass: gate, validate, resolve parties,
//! run the category branch, then commit or compensate. Backend calls are
//! awaited one at a time, in a deliberate order; the only state shared
//! across submissions is the in-flight flag. Nothing here retries: a
//! failed call fails the attempt and the ledger unwinds what was created.

mod debt;
mod interest;
mod invest;
mod metals;
mod sell;
mod simple;
mod validate;

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDate;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    Asset, AssetSide, Category, EngineError, FormState, Money,
    backend::{Backend, CacheScope, RecordNew},
    categories::PartyKind,
    form::{FlowDraft, PartySel},
    ledger::CompensationLedger,
    resolve,
};

/// Successful outcome of a submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Everything the category required was created.
    Committed {
        category: Category,
        /// Main record, when the category creates one.
        record_id: Option<Uuid>,
        /// User-facing success wording.
        message: &'static str,
    },
    /// Nothing was created. A recurring-only submission dated today needs
    /// the user to choose whether the schedule starts now or at the next
    /// occurrence; the caller re-submits with the answer on the draft.
    StartChoiceNeeded { next_occurrence: NaiveDate },
}

/// Drives one flow submission at a time against a backend.
pub struct Orchestrator<B: Backend> {
    backend: B,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag when a submission leaves, on every path.
struct FlightGuard<'a>(&'a AtomicBool);

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<B: Backend> Orchestrator<B> {
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            in_flight: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// True while a submission is running.
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Submits the form against the backend.
    ///
    /// At most one submission runs at a time; a second call while one is
    /// in flight fails fast with [`EngineError::SubmissionInFlight`].
    /// `assets` is the caller's current snapshot; balances read during
    /// the submission come from it, not from fresh backend reads.
    ///
    /// On commit the stale read caches are signalled. On failure every
    /// resource this attempt created is deleted again, newest first,
    /// and the original error is returned.
    pub async fn submit(
        &self,
        form: &FormState,
        assets: &[Asset],
        today: NaiveDate,
    ) -> Result<SubmitOutcome, EngineError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(EngineError::SubmissionInFlight);
        }
        let _gate = FlightGuard(&self.in_flight);

        validate::validate(&form.draft, form.new_asset.as_ref(), assets)?;

        let mut ledger = CompensationLedger::new();
        match self.execute(form, assets, today, &mut ledger).await {
            Ok(outcome) => {
                match &outcome {
                    SubmitOutcome::Committed { record_id, .. } => {
                        self.backend.invalidate(CacheScope::Assets);
                        self.backend.invalidate(CacheScope::Records);
                        self.backend.invalidate(CacheScope::Stats);
                        info!(
                            category = %form.draft.category,
                            record_id = ?record_id,
                            created = ledger.len(),
                            "submission committed"
                        );
                    }
                    SubmitOutcome::StartChoiceNeeded { next_occurrence } => {
                        info!(%next_occurrence, "schedule needs a start choice");
                    }
                }
                Ok(outcome)
            }
            Err(err) => {
                if !ledger.is_empty() {
                    warn!(
                        category = %form.draft.category,
                        error = %err,
                        created = ledger.len(),
                        "submission failed, unwinding"
                    );
                    ledger.unwind(&self.backend).await;
                    self.backend.invalidate(CacheScope::Assets);
                    self.backend.invalidate(CacheScope::Records);
                }
                Err(err)
            }
        }
    }

    /// Category dispatch. Runs after validation with an empty ledger.
    async fn execute(
        &self,
        form: &FormState,
        assets: &[Asset],
        today: NaiveDate,
        ledger: &mut CompensationLedger,
    ) -> Result<SubmitOutcome, EngineError> {
        if form.draft.recurring_only {
            return self.schedule_only(form, assets, today, ledger).await;
        }
        match form.draft.category {
            Category::MetalsPurchase => self.execute_metals(form, assets, ledger).await,
            Category::DebtCreate => self.execute_debt(form, assets, ledger).await,
            Category::Interest => self.execute_interest(form, assets, ledger).await,
            Category::Sell => self.execute_sell(form, assets, ledger).await,
            Category::Invest | Category::PropertyPurchase => {
                self.execute_purchase(form, assets, ledger).await
            }
            Category::Drip => self.execute_drip(form, assets, ledger).await,
            _ => self.execute_simple(form, assets, ledger).await,
        }
    }

    /// Resolves one side of the flow per the category preset: the picked
    /// asset, the staged creation for that side, the sole qualifying
    /// asset for a required party, or the external name.
    pub(super) async fn resolve_party(
        &self,
        form: &FormState,
        assets: &[Asset],
        ledger: &mut CompensationLedger,
        side: AssetSide,
    ) -> Result<Party, EngineError> {
        let draft = &form.draft;
        let preset = draft.category.preset();
        let (kind, sel, kinds) = match side {
            AssetSide::Source => (preset.source, &draft.source, preset.source_kinds),
            AssetSide::Destination => (
                preset.destination,
                &draft.destination,
                preset.destination_kinds,
            ),
        };

        match kind {
            PartyKind::None | PartyKind::SameAsSource => Ok(Party::None),
            PartyKind::External => Ok(match sel {
                PartySel::External(name) if !name.trim().is_empty() => {
                    Party::External(name.trim().to_string())
                }
                _ => Party::None,
            }),
            PartyKind::Asset | PartyKind::OptionalAsset => {
                if let PartySel::Asset(id) = sel {
                    return Ok(Party::Asset(*id));
                }
                if let Some(request) = form.new_asset.as_ref().filter(|r| r.side == side) {
                    let id = resolve::resolve_or_create(
                        &self.backend,
                        ledger,
                        request,
                        assets,
                        draft.currency,
                    )
                    .await?;
                    return Ok(Party::Asset(id));
                }
                if kind == PartyKind::Asset {
                    if let Some(asset) = resolve::single_candidate(assets, kinds) {
                        return Ok(Party::Asset(asset.id));
                    }
                    return Err(EngineError::InvalidDraft(format!(
                        "no {} asset selected",
                        side.as_str()
                    )));
                }
                Ok(Party::None)
            }
        }
    }
}

/// A flow party after resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum Party {
    None,
    External(String),
    Asset(Uuid),
}

impl Party {
    pub(super) fn asset_id(&self) -> Option<Uuid> {
        match self {
            Party::Asset(id) => Some(*id),
            _ => None,
        }
    }
}

/// Writes resolved parties into a record spec.
pub(super) fn apply_parties(record: &mut RecordNew, source: &Party, destination: &Party) {
    match source {
        Party::Asset(id) => record.source_asset = Some(*id),
        Party::External(name) => record.source_name = Some(name.clone()),
        Party::None => {}
    }
    match destination {
        Party::Asset(id) => record.destination_asset = Some(*id),
        Party::External(name) => record.destination_name = Some(name.clone()),
        Party::None => {}
    }
}

pub(super) fn asset_by_id(assets: &[Asset], id: Uuid) -> Option<&Asset> {
    assets.iter().find(|asset| asset.id == id)
}

/// Snapshot lookup for an asset a branch needs state from. Failing here
/// means the draft references an asset the caller never loaded.
pub(super) fn require_asset(assets: &[Asset], id: Uuid) -> Result<&Asset, EngineError> {
    asset_by_id(assets, id)
        .ok_or_else(|| EngineError::InvalidDraft(format!("unknown asset: {id}")))
}

/// The draft amount, which validation has already required.
pub(super) fn require_amount(draft: &FlowDraft) -> Result<Money, EngineError> {
    draft
        .amount
        .ok_or_else(|| EngineError::InvalidDraft("amount missing after validation".to_string()))
}

/// Committed outcome with the category's stock success wording.
pub(super) fn committed(category: Category, record_id: Option<Uuid>) -> SubmitOutcome {
    SubmitOutcome::Committed {
        category,
        record_id,
        message: category.success_message(),
    }
}
