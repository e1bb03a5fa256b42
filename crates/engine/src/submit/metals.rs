//! Bullion purchases. Weight lands on the matching metal asset, created
//! on first purchase; no flow record is written.

use tracing::info;

use crate::{
    Asset, AssetKind, AssetSide, EngineError, FormState,
    backend::{AssetNew, AssetUpdate, Backend},
    calc::metals::{self, MetalUnit},
    ledger::CompensationLedger,
    resolve,
};

use super::{Orchestrator, SubmitOutcome, committed};

impl<B: Backend> Orchestrator<B> {
    pub(super) async fn execute_metals(
        &self,
        form: &FormState,
        assets: &[Asset],
        ledger: &mut CompensationLedger,
    ) -> Result<SubmitOutcome, EngineError> {
        let draft = &form.draft;
        let metal = draft.metal.ok_or_else(|| {
            EngineError::InvalidDraft("metal missing after validation".to_string())
        })?;
        let weight = draft.weight.ok_or_else(|| {
            EngineError::InvalidDraft("weight missing after validation".to_string())
        })?;

        if let Some(existing) = resolve::find_metal(assets, metal) {
            // Weight converts into whatever unit the asset already tracks.
            let unit = existing.unit.unwrap_or(MetalUnit::Gram);
            let added = metals::convert(weight, draft.unit, unit);
            let update = AssetUpdate {
                balance: Some(existing.balance + added),
                ..AssetUpdate::default()
            };
            self.backend.update_asset(existing.id, &update).await?;
            info!(asset = %existing.name, added, "bullion weight increased");
            return Ok(committed(draft.category, None));
        }

        let name = form
            .new_asset
            .as_ref()
            .filter(|request| {
                request.side == AssetSide::Destination && !request.name.trim().is_empty()
            })
            .map(|request| request.name.trim().to_string())
            .unwrap_or_else(|| metal.display_name().to_string());

        let mut spec = AssetNew::new(name, AssetKind::Metal, draft.currency);
        spec.metal = Some(metal);
        spec.unit = Some(draft.unit);
        spec.balance = weight;
        let created = self.backend.create_asset(&spec).await?;
        ledger.record_asset(created.id);
        info!(name = %created.name, weight, "bullion asset created");

        Ok(committed(draft.category, None))
    }
}
