//! Single-record categories. One record, routed by the preset direction,
//! plus the recurring-only path that stores a schedule instead.

use chrono::NaiveDate;

use crate::{
    Asset, AssetSide, Category, EngineError, FormState,
    backend::{Backend, RecordMeta, RecordNew, RecurringNew},
    calc::dividend,
    categories::FlowDirection,
    form::StartChoice,
    ledger::CompensationLedger,
};

use super::{
    Orchestrator, SubmitOutcome, apply_parties, asset_by_id, committed, require_amount,
};

impl<B: Backend> Orchestrator<B> {
    pub(super) async fn execute_simple(
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

        let mut record = RecordNew::from_draft(draft, amount);
        apply_parties(&mut record, &source, &destination);

        if draft.category == Category::Dividend {
            // Stored net of tax; the meta keeps the gross for reporting.
            let market = source
                .asset_id()
                .and_then(|id| asset_by_id(assets, id))
                .and_then(|asset| asset.market);
            let withholding = dividend::withhold(amount, dividend::withholding_rate(market));
            record.amount = withholding.net;
            record.meta = Some(RecordMeta::Dividend {
                gross_minor: withholding.gross.minor(),
                tax_rate: withholding.rate,
                tax_withheld_minor: withholding.withheld.minor(),
            });
        }

        let created = match draft.category {
            Category::DebtPayment => {
                let debt_id = draft.debt_id.ok_or_else(|| {
                    EngineError::InvalidDraft("debt missing after validation".to_string())
                })?;
                record.meta = Some(RecordMeta::DebtPayment {
                    principal_minor: draft.principal_part.map(|part| part.minor()),
                    interest_minor: draft.interest_part.map(|part| part.minor()),
                });
                self.backend.create_debt_payment(debt_id, &record).await?
            }
            // Funding a deposit from outside the tracked accounts is income
            // to the deposit, not a transfer.
            Category::Deposit if source.asset_id().is_none() => {
                self.backend.create_income(&record).await?
            }
            _ => match draft.category.preset().direction {
                FlowDirection::Income => self.backend.create_income(&record).await?,
                FlowDirection::Expense => self.backend.create_expense(&record).await?,
                FlowDirection::Transfer => self.backend.create_transfer(&record).await?,
            },
        };
        ledger.record_record(created.id);

        if !draft.linked_ledgers.is_empty() {
            self.backend
                .set_linked_ledgers(created.id, &draft.linked_ledgers)
                .await?;
        }

        Ok(committed(draft.category, Some(created.id)))
    }

    /// Stores a schedule without recording anything today. A draft dated
    /// today (or earlier) needs the caller to pick a start before anything
    /// is written, so the first pass returns [`SubmitOutcome::StartChoiceNeeded`].
    pub(super) async fn schedule_only(
        &self,
        form: &FormState,
        assets: &[Asset],
        today: NaiveDate,
        ledger: &mut CompensationLedger,
    ) -> Result<SubmitOutcome, EngineError> {
        let draft = &form.draft;
        let frequency = draft.recurring.ok_or_else(|| {
            EngineError::InvalidDraft("frequency missing after validation".to_string())
        })?;

        let first_run = if draft.date > today {
            draft.date
        } else {
            match draft.start_choice {
                None => {
                    return Ok(SubmitOutcome::StartChoiceNeeded {
                        next_occurrence: frequency.next_occurrence(today),
                    });
                }
                Some(StartChoice::Immediately) => today,
                Some(StartChoice::NextOccurrence) => frequency.next_occurrence(today),
            }
        };

        let amount = require_amount(draft)?;
        let source = self.resolve_party(form, assets, ledger, AssetSide::Source).await?;
        let destination = self
            .resolve_party(form, assets, ledger, AssetSide::Destination)
            .await?;
        let mut record = RecordNew::from_draft(draft, amount);
        apply_parties(&mut record, &source, &destination);
        record.recurring = Some(frequency);

        self.backend
            .create_recurring(&RecurringNew {
                record,
                frequency,
                first_run,
            })
            .await?;

        Ok(SubmitOutcome::Committed {
            category: draft.category,
            record_id: None,
            message: "Schedule created",
        })
    }
}
