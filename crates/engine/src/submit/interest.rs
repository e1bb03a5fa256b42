//! Interest income. Linked to a deposit it refreshes the saved rate and
//! can settle a maturity; untethered it is a bare income record.

use tracing::warn;

use crate::{
    Asset, AssetSide, EngineError, FormState, Money,
    backend::{AssetUpdate, Backend, InterestSettings, RecordMeta, RecordNew},
    calc::interest,
    form::MaturityChoice,
    ledger::CompensationLedger,
};

use super::{
    Orchestrator, Party, SubmitOutcome, apply_parties, asset_by_id, committed, require_amount,
    require_asset,
};

impl<B: Backend> Orchestrator<B> {
    pub(super) async fn execute_interest(
        &self,
        form: &FormState,
        assets: &[Asset],
        ledger: &mut CompensationLedger,
    ) -> Result<SubmitOutcome, EngineError> {
        let draft = &form.draft;
        let amount = require_amount(draft)?;
        let source = self.resolve_party(form, assets, ledger, AssetSide::Source).await?;

        let Some(deposit_id) = source.asset_id() else {
            return self.untethered_interest(form, assets, ledger, amount).await;
        };
        let deposit = require_asset(assets, deposit_id)?;
        let period = draft.period.ok_or_else(|| {
            EngineError::InvalidDraft("period missing after validation".to_string())
        })?;

        let principal = draft
            .principal
            .unwrap_or_else(|| Money::from_major_f64(deposit.balance, deposit.currency));
        let annual = interest::annual_rate(
            amount.to_major(draft.currency),
            principal.to_major(deposit.currency),
            period,
        );

        // The saved rate only feeds the next draft's projection; losing it
        // must not fail the submission.
        if let Some(annual_rate) = annual
            && let Err(err) = self
                .backend
                .upsert_interest_settings(deposit_id, &InterestSettings { annual_rate, period })
                .await
        {
            warn!(%err, asset = %deposit.name, "interest settings not saved");
        }

        let meta = RecordMeta::Interest {
            period: Some(period),
            annual_rate: annual,
            principal_minor: Some(principal.minor()),
        };

        match draft.maturity {
            None => {
                let destination = self
                    .resolve_party(form, assets, ledger, AssetSide::Destination)
                    .await?;
                let mut record = RecordNew::from_draft(draft, amount);
                apply_parties(&mut record, &source, &destination);
                record.meta = Some(meta);
                let created = self.backend.create_income(&record).await?;
                ledger.record_record(created.id);
                Ok(committed(draft.category, Some(created.id)))
            }
            Some(MaturityChoice::KeepInAccount) => {
                let mut record = RecordNew::from_draft(draft, amount);
                apply_parties(&mut record, &Party::None, &Party::Asset(deposit_id));
                record.meta = Some(meta);
                let created = self.backend.create_income(&record).await?;
                ledger.record_record(created.id);

                let update = AssetUpdate {
                    balance: Some(deposit.balance + amount.to_major(deposit.currency)),
                    ..AssetUpdate::default()
                };
                self.backend.update_asset(deposit_id, &update).await?;
                Ok(committed(draft.category, Some(created.id)))
            }
            Some(MaturityChoice::WithdrawToCash) => {
                self.withdraw_matured(form, assets, ledger, deposit, principal, amount, meta)
                    .await
            }
        }
    }

    /// Closes a matured deposit: principal plus interest move to the chosen
    /// account in one transfer and the deposit empties.
    #[allow(clippy::too_many_arguments)]
    async fn withdraw_matured(
        &self,
        form: &FormState,
        assets: &[Asset],
        ledger: &mut CompensationLedger,
        deposit: &Asset,
        principal: Money,
        amount: Money,
        meta: RecordMeta,
    ) -> Result<SubmitOutcome, EngineError> {
        let draft = &form.draft;
        let destination = self
            .resolve_party(form, assets, ledger, AssetSide::Destination)
            .await?;
        let target_id = destination.asset_id().ok_or_else(|| {
            EngineError::InvalidDraft("no destination asset selected".to_string())
        })?;

        let total = principal + amount;
        let mut record = RecordNew::from_draft(draft, total);
        apply_parties(&mut record, &Party::Asset(deposit.id), &destination);
        record.meta = Some(meta);
        let created = self.backend.create_transfer(&record).await?;
        ledger.record_record(created.id);

        let empty = AssetUpdate {
            balance: Some(0.0),
            ..AssetUpdate::default()
        };
        self.backend.update_asset(deposit.id, &empty).await?;

        // A destination created in this submission is not in the snapshot
        // and starts empty.
        let (target_balance, target_currency) = match asset_by_id(assets, target_id) {
            Some(target) => (target.balance, target.currency),
            None => (0.0, draft.currency),
        };
        if target_currency != deposit.currency {
            warn!(
                from = deposit.currency.code(),
                to = target_currency.code(),
                "currencies differ, amount moved unconverted"
            );
        }
        let credit = AssetUpdate {
            balance: Some(target_balance + total.to_major(target_currency)),
            ..AssetUpdate::default()
        };
        self.backend.update_asset(target_id, &credit).await?;

        Ok(committed(draft.category, Some(created.id)))
    }

    /// Interest without a tracked deposit. The rate is recorded when the
    /// draft carries enough to derive it.
    async fn untethered_interest(
        &self,
        form: &FormState,
        assets: &[Asset],
        ledger: &mut CompensationLedger,
        amount: Money,
    ) -> Result<SubmitOutcome, EngineError> {
        let draft = &form.draft;
        let destination = self
            .resolve_party(form, assets, ledger, AssetSide::Destination)
            .await?;

        let annual = match (draft.principal, draft.period) {
            (Some(principal), Some(period)) => interest::annual_rate(
                amount.to_major(draft.currency),
                principal.to_major(draft.currency),
                period,
            ),
            _ => None,
        };

        let mut record = RecordNew::from_draft(draft, amount);
        apply_parties(&mut record, &Party::None, &destination);
        record.meta = Some(RecordMeta::Interest {
            period: draft.period,
            annual_rate: annual,
            principal_minor: draft.principal.map(Money::minor),
        });
        let created = self.backend.create_income(&record).await?;
        ledger.record_record(created.id);
        Ok(committed(draft.category, Some(created.id)))
    }
}
