//! Disposal of a holding or a value asset into a money account.

use uuid::Uuid;

use crate::{
    Asset, AssetSide, EngineError, FormState, Money,
    backend::{AssetUpdate, Backend, RecordMeta, RecordNew},
    calc::holdings::{self, Lot},
    ledger::CompensationLedger,
};

use super::{Orchestrator, SubmitOutcome, apply_parties, committed, require_amount, require_asset};

impl<B: Backend> Orchestrator<B> {
    pub(super) async fn execute_sell(
        &self,
        form: &FormState,
        assets: &[Asset],
        ledger: &mut CompensationLedger,
    ) -> Result<SubmitOutcome, EngineError> {
        let draft = &form.draft;
        let amount = require_amount(draft)?;
        let source = self.resolve_party(form, assets, ledger, AssetSide::Source).await?;
        let destination = self
            .resolve_party(form, assets, ledger, AssetSide::Destination)
            .await?;
        let sold_id = source.asset_id().ok_or_else(|| {
            EngineError::InvalidDraft("no source asset selected".to_string())
        })?;
        let sold = require_asset(assets, sold_id)?;

        let mut record = RecordNew::from_draft(draft, amount);
        apply_parties(&mut record, &source, &destination);

        let mut update = AssetUpdate::default();
        if sold.kind.is_holding() {
            let units = draft.shares.ok_or_else(|| {
                EngineError::InvalidDraft("shares missing after validation".to_string())
            })?;
            let price_per_unit = draft
                .price_per_unit
                .unwrap_or_else(|| amount.to_major(draft.currency) / units);
            let avg_cost_per_unit = match draft.cost_basis {
                Some(avg) => Some(avg),
                None => self.average_cost(sold, sold_id).await?,
            };
            let realized = avg_cost_per_unit.map(|avg| {
                Money::from_major_f64(
                    holdings::realized_pl(price_per_unit, avg, units),
                    sold.currency,
                )
            });

            record.meta = Some(RecordMeta::Sale {
                units,
                avg_cost_per_unit,
                realized_pl_minor: realized.map(Money::minor),
            });
            update.balance = Some((sold.balance - units).max(0.0));
            if let Some(gain) = realized {
                update.realized_pl_minor = Some(sold.realized_pl_minor + gain.minor());
            }
        } else if draft.fully_disposed {
            update.balance = Some(0.0);
        }

        let created = self.backend.create_transfer(&record).await?;
        ledger.record_record(created.id);

        if update.balance.is_some() || update.realized_pl_minor.is_some() {
            self.backend.update_asset(sold_id, &update).await?;
        }

        Ok(committed(draft.category, Some(created.id)))
    }

    /// Average acquisition cost per unit, from the stored lots.
    async fn average_cost(&self, sold: &Asset, id: Uuid) -> Result<Option<f64>, EngineError> {
        let lots = self.backend.list_acquisitions(id).await?;
        let lots: Vec<Lot> = lots
            .iter()
            .map(|lot| Lot {
                units: lot.units,
                cost: lot.cost.to_major(sold.currency),
            })
            .collect();
        Ok(holdings::weighted_average_cost(&lots))
    }
}
