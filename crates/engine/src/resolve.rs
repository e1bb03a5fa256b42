//! Asset resolution: turning what the form names into asset ids.
//!
//! Matching is conservative. Names fold through [`normalize_key`]
//! (case, accents, spacing); tickers match the same way. Nothing fuzzy
//! beyond that: a near-miss creates a new asset rather than silently
//! reusing the wrong one.

use tracing::info;
use uuid::Uuid;

use crate::{
    Asset, AssetKind, Currency, MetalKind, NewAssetRequest,
    backend::{AssetNew, Backend, BackendError},
    ledger::CompensationLedger,
    util::normalize_key,
};

/// The sole asset matching one of `kinds`, if exactly one exists.
pub(crate) fn single_candidate<'a>(assets: &'a [Asset], kinds: &[AssetKind]) -> Option<&'a Asset> {
    let mut candidates = assets.iter().filter(|asset| kinds.contains(&asset.kind));
    let first = candidates.next()?;
    if candidates.next().is_some() {
        None
    } else {
        Some(first)
    }
}

/// Normalized match on asset name or ticker. An empty `kinds` slice
/// matches any kind.
pub(crate) fn find_named<'a>(
    assets: &'a [Asset],
    name: &str,
    kinds: &[AssetKind],
) -> Option<&'a Asset> {
    let needle = normalize_key(name)?;
    assets
        .iter()
        .filter(|asset| kinds.is_empty() || kinds.contains(&asset.kind))
        .find(|asset| {
            normalize_key(&asset.name).is_some_and(|key| key == needle)
                || asset
                    .ticker
                    .as_deref()
                    .and_then(normalize_key)
                    .is_some_and(|key| key == needle)
        })
}

/// First bullion asset holding the given metal.
pub(crate) fn find_metal<'a>(assets: &'a [Asset], metal: MetalKind) -> Option<&'a Asset> {
    assets
        .iter()
        .find(|asset| asset.kind == AssetKind::Metal && asset.metal == Some(metal))
}

/// Resolves a staged creation: reuses a matching existing asset, else
/// creates one with a zero balance. The created id lands on the ledger
/// before this returns, so a failure in any later step unwinds it.
pub(crate) async fn resolve_or_create<B: Backend>(
    backend: &B,
    ledger: &mut CompensationLedger,
    request: &NewAssetRequest,
    assets: &[Asset],
    currency: Currency,
) -> Result<Uuid, BackendError> {
    if let Some(existing) = find_named(assets, &request.name, &[]) {
        return Ok(existing.id);
    }
    if let Some(ticker) = request.ticker.as_deref()
        && let Some(existing) = find_named(assets, ticker, &[])
    {
        return Ok(existing.id);
    }

    let mut spec = AssetNew::new(request.name.clone(), request.kind, currency);
    spec.ticker = request.ticker.clone();
    let created = backend.create_asset(&spec).await?;
    ledger.record_asset(created.id);
    info!(asset_id = %created.id, name = %created.name, "asset created for submission");
    Ok(created.id)
}
