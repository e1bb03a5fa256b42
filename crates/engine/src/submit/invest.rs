//! Acquisitions: equity buys, property purchases and dividend
//! reinvestment.

use tracing::info;
use uuid::Uuid;

use crate::{
    Asset, AssetKind, AssetSide, Category, EngineError, FormState,
    backend::{AssetNew, AssetUpdate, Backend, RecordMeta, RecordNew},
    ledger::CompensationLedger,
    resolve,
};

use super::{
    Orchestrator, Party, SubmitOutcome, apply_parties, committed, require_amount, require_asset,
};

impl<B: Backend> Orchestrator<B> {
    /// Invest and property-purchase flows. The record carries the cost;
    /// equity buys also carry units and the per-unit price.
    pub(super) async fn execute_purchase(
        &self,
        form: &FormState,
        assets: &[Asset],
        ledger: &mut CompensationLedger,
    ) -> Result<SubmitOutcome, EngineError> {
        let draft = &form.draft;
        let amount = require_amount(draft)?;
        let source = self.resolve_party(form, assets, ledger, AssetSide::Source).await?;

        let (destination, meta) = match draft.category {
            Category::Invest => {
                let target = self.resolve_holding(form, assets, ledger).await?;
                let units = draft.shares.ok_or_else(|| {
                    EngineError::InvalidDraft("shares missing after validation".to_string())
                })?;
                let price_per_unit = amount.to_major(draft.currency) / units;
                (
                    Party::Asset(target),
                    Some(RecordMeta::Investment {
                        units,
                        price_per_unit,
                    }),
                )
            }
            _ => {
                let destination = self
                    .resolve_party(form, assets, ledger, AssetSide::Destination)
                    .await?;
                (destination, None)
            }
        };

        let mut record = RecordNew::from_draft(draft, amount);
        apply_parties(&mut record, &source, &destination);
        record.meta = meta;
        let created = self.backend.create_investment(&record).await?;
        ledger.record_record(created.id);

        // A property tracks its market value, not the sum of its records.
        if draft.category == Category::PropertyPurchase
            && let Some(id) = destination.asset_id()
        {
            let value = draft
                .current_value
                .unwrap_or_else(|| amount.to_major(draft.currency));
            let update = AssetUpdate {
                balance: Some(value),
                ..AssetUpdate::default()
            };
            self.backend.update_asset(id, &update).await?;
        }

        Ok(committed(draft.category, Some(created.id)))
    }

    /// Reinvested dividend: an income record against the holding, then the
    /// share count grows by the reinvested units.
    pub(super) async fn execute_drip(
        &self,
        form: &FormState,
        assets: &[Asset],
        ledger: &mut CompensationLedger,
    ) -> Result<SubmitOutcome, EngineError> {
        let draft = &form.draft;
        let amount = require_amount(draft)?;
        let units = draft.shares.ok_or_else(|| {
            EngineError::InvalidDraft("shares missing after validation".to_string())
        })?;

        let source = self.resolve_party(form, assets, ledger, AssetSide::Source).await?;
        let holding_id = source.asset_id().ok_or_else(|| {
            EngineError::InvalidDraft("no source asset selected".to_string())
        })?;
        let holding = require_asset(assets, holding_id)?;

        // Income-typed on purpose: the backend rejects a transfer whose
        // source and destination are the same asset.
        let mut record = RecordNew::from_draft(draft, amount);
        apply_parties(&mut record, &source, &source);
        record.meta = Some(RecordMeta::Drip { units });
        let created = self.backend.create_income(&record).await?;
        ledger.record_record(created.id);

        let update = AssetUpdate {
            balance: Some(holding.balance + units),
            ..AssetUpdate::default()
        };
        self.backend.update_asset(holding_id, &update).await?;

        Ok(committed(draft.category, Some(created.id)))
    }

    /// The holding an equity buy lands in: the picked asset, the staged
    /// creation, a holding matching the ticker, or a stock created from it.
    async fn resolve_holding(
        &self,
        form: &FormState,
        assets: &[Asset],
        ledger: &mut CompensationLedger,
    ) -> Result<Uuid, EngineError> {
        let draft = &form.draft;
        let destination = self
            .resolve_party(form, assets, ledger, AssetSide::Destination)
            .await?;
        if let Some(id) = destination.asset_id() {
            return Ok(id);
        }

        let ticker = draft
            .ticker
            .as_deref()
            .map(str::trim)
            .filter(|ticker| !ticker.is_empty())
            .ok_or_else(|| {
                EngineError::InvalidDraft("ticker missing after validation".to_string())
            })?;
        let kinds = draft.category.preset().destination_kinds;
        if let Some(existing) = resolve::find_named(assets, ticker, kinds) {
            return Ok(existing.id);
        }

        let symbol = ticker.to_uppercase();
        let mut spec = AssetNew::new(symbol.clone(), AssetKind::Stock, draft.currency);
        spec.ticker = Some(symbol);
        let created = self.backend.create_asset(&spec).await?;
        ledger.record_asset(created.id);
        info!(name = %created.name, id = %created.id, "created holding for ticker");
        Ok(created.id)
    }
}
