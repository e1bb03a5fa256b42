//! Debt registration. Creates the debt entity and points it at the money
//! account the borrowed principal landed in.

use tracing::info;

use crate::{
    Asset, AssetSide, EngineError, FormState, Money,
    backend::{Backend, DebtNew},
    calc::loan,
    form::PartySel,
    ledger::CompensationLedger,
    util::normalize_optional_text,
};

use super::{Orchestrator, SubmitOutcome, committed};

impl<B: Backend> Orchestrator<B> {
    pub(super) async fn execute_debt(
        &self,
        form: &FormState,
        assets: &[Asset],
        ledger: &mut CompensationLedger,
    ) -> Result<SubmitOutcome, EngineError> {
        let draft = &form.draft;
        let principal = draft.principal.ok_or_else(|| {
            EngineError::InvalidDraft("principal missing after validation".to_string())
        })?;

        let destination = self
            .resolve_party(form, assets, ledger, AssetSide::Destination)
            .await?;

        let monthly_payment = match (draft.annual_rate, draft.term_months) {
            (Some(rate), Some(months)) => {
                loan::amortized_payment(principal.to_major(draft.currency), rate, months)
                    .map(|payment| Money::from_major_f64(payment, draft.currency))
            }
            _ => None,
        };

        let name = match &draft.source {
            PartySel::External(lender) if !lender.trim().is_empty() => lender.trim().to_string(),
            _ => normalize_optional_text(draft.note.as_deref())
                .unwrap_or_else(|| "Debt".to_string()),
        };

        let spec = DebtNew {
            name,
            date: draft.date,
            currency: draft.currency,
            principal,
            annual_rate: draft.annual_rate,
            term_months: draft.term_months,
            monthly_payment,
            disburse_to: destination.asset_id(),
            note: normalize_optional_text(draft.note.as_deref()),
        };
        let created = self.backend.create_debt(&spec).await?;
        info!(debt = %spec.name, id = %created.id, "debt registered");

        Ok(committed(draft.category, None))
    }
}
