//! Draft validation. Collects every problem at once, keyed by field, so
//! the form can surface all of them in a single pass.

use uuid::Uuid;

use crate::{
    Asset, AssetKind, AssetSide, Category, EngineError, Money, NewAssetRequest,
    categories::{CategoryPreset, PartyKind},
    form::{Field, FieldErrors, FlowDraft, MaturityChoice, PartySel},
    resolve::single_candidate,
};

/// Categories whose source must be an already existing asset, because the
/// branch reads its balance, market or currency.
const SOURCE_MUST_EXIST: &[Category] = &[
    Category::Drip,
    Category::Sell,
    Category::Interest,
    Category::Dividend,
    Category::Rental,
];

/// Categories a recurring-only schedule may template.
const SCHEDULABLE: &[Category] = &[
    Category::Income,
    Category::Expense,
    Category::Transfer,
    Category::Deposit,
    Category::Dividend,
    Category::Rental,
    Category::Refund,
    Category::DebtPayment,
];

pub(super) fn validate(
    draft: &FlowDraft,
    new_asset: Option<&NewAssetRequest>,
    assets: &[Asset],
) -> Result<(), EngineError> {
    let mut errors = FieldErrors::new();
    let preset = draft.category.preset();

    match draft.amount {
        Some(amount) if amount.is_positive() => {}
        Some(_) => errors.insert(Field::Amount, "must be positive"),
        None if preset.amount_required => errors.insert(Field::Amount, "required"),
        None => {}
    }

    validate_party(
        &mut errors,
        draft,
        preset,
        new_asset,
        assets,
        AssetSide::Source,
    );
    validate_party(
        &mut errors,
        draft,
        preset,
        new_asset,
        assets,
        AssetSide::Destination,
    );

    if let (PartySel::Asset(source), PartySel::Asset(destination)) =
        (&draft.source, &draft.destination)
        && source == destination
    {
        errors.insert(Field::Destination, "must differ from the source");
    }

    if let Some(request) = new_asset {
        let field = match request.side {
            AssetSide::Source => Field::Source,
            AssetSide::Destination => Field::Destination,
        };
        if request.name.trim().is_empty() {
            errors.insert(field, "new asset needs a name");
        }
        if request.side == AssetSide::Source && SOURCE_MUST_EXIST.contains(&draft.category) {
            errors.insert(field, "select an existing asset");
        }
    }

    validate_extras(&mut errors, draft, new_asset, assets);

    if draft.recurring_only {
        if draft.recurring.is_none() {
            errors.insert(Field::Recurring, "required to schedule");
        }
        if !SCHEDULABLE.contains(&draft.category) {
            errors.insert(Field::Recurring, "this category cannot be scheduled");
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(EngineError::Validation(errors))
    }
}

fn validate_party(
    errors: &mut FieldErrors,
    draft: &FlowDraft,
    preset: &CategoryPreset,
    new_asset: Option<&NewAssetRequest>,
    assets: &[Asset],
    side: AssetSide,
) {
    let (kind, sel, kinds, field) = match side {
        AssetSide::Source => (
            preset.source,
            &draft.source,
            preset.source_kinds,
            Field::Source,
        ),
        AssetSide::Destination => (
            preset.destination,
            &draft.destination,
            preset.destination_kinds,
            Field::Destination,
        ),
    };
    let staged = new_asset.is_some_and(|request| request.side == side);

    match kind {
        PartyKind::None | PartyKind::SameAsSource | PartyKind::External => {}
        PartyKind::OptionalAsset => {
            if let PartySel::Asset(id) = sel {
                check_selected(errors, field, *id, kinds, assets);
            }
        }
        PartyKind::Asset => match sel {
            PartySel::Asset(id) => check_selected(errors, field, *id, kinds, assets),
            _ if staged => {}
            _ if single_candidate(assets, kinds).is_some() => {}
            _ => errors.insert(field, "required"),
        },
    }
}

fn check_selected(
    errors: &mut FieldErrors,
    field: Field,
    id: Uuid,
    kinds: &[AssetKind],
    assets: &[Asset],
) {
    match assets.iter().find(|asset| asset.id == id) {
        None => errors.insert(field, "unknown asset"),
        Some(asset) if !kinds.is_empty() && !kinds.contains(&asset.kind) => {
            errors.insert(field, "wrong asset type");
        }
        Some(_) => {}
    }
}

fn validate_extras(
    errors: &mut FieldErrors,
    draft: &FlowDraft,
    new_asset: Option<&NewAssetRequest>,
    assets: &[Asset],
) {
    match draft.category {
        Category::Invest => {
            positive(errors, Field::Shares, draft.shares, true);
            let has_target = draft.destination.asset_id().is_some()
                || new_asset.is_some_and(|r| r.side == AssetSide::Destination)
                || draft
                    .ticker
                    .as_deref()
                    .is_some_and(|ticker| !ticker.trim().is_empty());
            if !has_target {
                errors.insert(Field::Ticker, "required");
            }
        }
        Category::Drip => {
            positive(errors, Field::Shares, draft.shares, true);
        }
        Category::MetalsPurchase => {
            if draft.metal.is_none() {
                errors.insert(Field::Metal, "required");
            }
            positive(errors, Field::Weight, draft.weight, true);
        }
        Category::PropertyPurchase => {
            positive(errors, Field::CurrentValue, draft.current_value, false);
        }
        Category::Interest => {
            let linked = draft.source.asset_id().is_some();
            if linked && draft.period.is_none() {
                errors.insert(Field::Period, "required");
            }
            if !linked && draft.maturity.is_some() {
                errors.insert(Field::Maturity, "needs a linked deposit");
            }
            if draft.maturity == Some(MaturityChoice::WithdrawToCash)
                && draft.destination.asset_id().is_none()
                && !new_asset.is_some_and(|r| r.side == AssetSide::Destination)
            {
                errors.insert(Field::Destination, "required to withdraw");
            }
            positive_money(errors, Field::Principal, draft.principal, false);
        }
        Category::Sell => {
            let holding = draft
                .source
                .asset_id()
                .and_then(|id| assets.iter().find(|asset| asset.id == id))
                .is_some_and(|asset| asset.kind.is_holding());
            if holding {
                positive(errors, Field::Shares, draft.shares, true);
            }
            positive(errors, Field::PricePerUnit, draft.price_per_unit, false);
            positive(errors, Field::CostBasis, draft.cost_basis, false);
        }
        Category::DebtCreate => {
            positive_money(errors, Field::Principal, draft.principal, true);
            if draft.annual_rate.is_some_and(|rate| rate < 0.0) {
                errors.insert(Field::AnnualRate, "must not be negative");
            }
            if draft.term_months == Some(0) {
                errors.insert(Field::TermMonths, "must be positive");
            }
        }
        Category::DebtPayment => {
            if draft.debt_id.is_none() {
                errors.insert(Field::Debt, "required");
            }
            if let (Some(principal), Some(interest), Some(amount)) =
                (draft.principal_part, draft.interest_part, draft.amount)
                && principal + interest != amount
            {
                errors.insert(Field::PrincipalPart, "parts must sum to the amount");
            }
        }
        _ => {}
    }
}

fn positive(errors: &mut FieldErrors, field: Field, value: Option<f64>, required: bool) {
    match value {
        Some(v) if v > 0.0 => {}
        Some(_) => errors.insert(field, "must be positive"),
        None if required => errors.insert(field, "required"),
        None => {}
    }
}

fn positive_money(errors: &mut FieldErrors, field: Field, value: Option<Money>, required: bool) {
    match value {
        Some(v) if v.is_positive() => {}
        Some(_) => errors.insert(field, "must be positive"),
        None if required => errors.insert(field, "required"),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Currency, Frequency};
    use chrono::NaiveDate;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn draft(category: Category) -> FlowDraft {
        FlowDraft::new(category, date())
    }

    fn field_errors(result: Result<(), EngineError>) -> FieldErrors {
        match result {
            Err(EngineError::Validation(errors)) => errors,
            other => panic!("expected validation errors, got {other:?}"),
        }
    }

    #[test]
    fn empty_income_wants_amount_and_destination() {
        let errors = field_errors(validate(&draft(Category::Income), None, &[]));
        assert_eq!(errors.get(Field::Amount), Some("required"));
        assert_eq!(errors.get(Field::Destination), Some("required"));
    }

    #[test]
    fn negative_amount_is_rejected() {
        let mut d = draft(Category::Income);
        d.amount = Some(Money::new(-100));
        let errors = field_errors(validate(&d, None, &[]));
        assert_eq!(errors.get(Field::Amount), Some("must be positive"));
    }

    #[test]
    fn sole_candidate_covers_a_required_party() {
        let wallet = Asset::new("Wallet", AssetKind::Cash, Currency::Usd);
        let mut d = draft(Category::Income);
        d.amount = Some(Money::new(1_00));
        assert!(validate(&d, None, std::slice::from_ref(&wallet)).is_ok());
    }

    #[test]
    fn staged_creation_covers_a_required_party() {
        let mut d = draft(Category::Deposit);
        d.amount = Some(Money::new(5_000_00));
        let staged = NewAssetRequest {
            side: AssetSide::Destination,
            name: "Emergency Fund".to_string(),
            kind: AssetKind::Deposit,
            ticker: None,
        };
        assert!(validate(&d, Some(&staged), &[]).is_ok());
    }

    #[test]
    fn wrong_asset_kind_is_flagged() {
        let stock = Asset::new("Apple", AssetKind::Stock, Currency::Usd);
        let mut d = draft(Category::Expense);
        d.amount = Some(Money::new(1_00));
        d.source = PartySel::Asset(stock.id);
        let errors = field_errors(validate(&d, None, std::slice::from_ref(&stock)));
        assert_eq!(errors.get(Field::Source), Some("wrong asset type"));
    }

    #[test]
    fn transfer_to_itself_is_rejected() {
        let wallet = Asset::new("Wallet", AssetKind::Cash, Currency::Usd);
        let mut d = draft(Category::Transfer);
        d.amount = Some(Money::new(1_00));
        d.source = PartySel::Asset(wallet.id);
        d.destination = PartySel::Asset(wallet.id);
        let errors = field_errors(validate(&d, None, std::slice::from_ref(&wallet)));
        assert_eq!(
            errors.get(Field::Destination),
            Some("must differ from the source")
        );
    }

    #[test]
    fn invest_needs_shares_and_a_ticker() {
        let mut d = draft(Category::Invest);
        d.amount = Some(Money::new(1_500_00));
        let errors = field_errors(validate(&d, None, &[]));
        assert_eq!(errors.get(Field::Shares), Some("required"));
        assert_eq!(errors.get(Field::Ticker), Some("required"));

        d.shares = Some(10.0);
        d.ticker = Some("AAPL".to_string());
        assert!(validate(&d, None, &[]).is_ok());
    }

    #[test]
    fn metals_purchase_may_omit_the_amount() {
        let mut d = draft(Category::MetalsPurchase);
        d.metal = Some(crate::MetalKind::Gold);
        d.weight = Some(2.0);
        assert!(validate(&d, None, &[]).is_ok());
    }

    #[test]
    fn linked_interest_needs_a_period() {
        let deposit = Asset::new("Savings", AssetKind::Deposit, Currency::Usd);
        let mut d = draft(Category::Interest);
        d.amount = Some(Money::new(40_00));
        d.source = PartySel::Asset(deposit.id);
        let errors = field_errors(validate(&d, None, std::slice::from_ref(&deposit)));
        assert_eq!(errors.get(Field::Period), Some("required"));
    }

    #[test]
    fn untethered_interest_passes_without_a_period() {
        let mut d = draft(Category::Interest);
        d.amount = Some(Money::new(40_00));
        assert!(validate(&d, None, &[]).is_ok());
    }

    #[test]
    fn withdrawal_needs_a_destination_account() {
        let deposit = Asset::new("Savings", AssetKind::Deposit, Currency::Usd);
        let mut d = draft(Category::Interest);
        d.amount = Some(Money::new(40_00));
        d.source = PartySel::Asset(deposit.id);
        d.period = Some(crate::calc::interest::PayoutPeriod::Monthly);
        d.maturity = Some(MaturityChoice::WithdrawToCash);
        let errors = field_errors(validate(&d, None, std::slice::from_ref(&deposit)));
        assert_eq!(errors.get(Field::Destination), Some("required to withdraw"));
    }

    #[test]
    fn debt_needs_a_positive_principal() {
        let mut d = draft(Category::DebtCreate);
        let errors = field_errors(validate(&d, None, &[]));
        assert_eq!(errors.get(Field::Principal), Some("required"));
        assert!(errors.get(Field::Amount).is_none());

        d.principal = Some(Money::new(10_000_00));
        d.source = PartySel::External("Bank".to_string());
        assert!(validate(&d, None, &[]).is_ok());
    }

    #[test]
    fn debt_payment_split_must_sum() {
        let wallet = Asset::new("Wallet", AssetKind::Cash, Currency::Usd);
        let mut d = draft(Category::DebtPayment);
        d.amount = Some(Money::new(500_00));
        d.source = PartySel::Asset(wallet.id);
        d.debt_id = Some(Uuid::new_v4());
        d.principal_part = Some(Money::new(400_00));
        d.interest_part = Some(Money::new(90_00));
        let errors = field_errors(validate(&d, None, std::slice::from_ref(&wallet)));
        assert_eq!(
            errors.get(Field::PrincipalPart),
            Some("parts must sum to the amount")
        );
    }

    #[test]
    fn recurring_only_needs_a_frequency_and_a_schedulable_category() {
        let wallet = Asset::new("Wallet", AssetKind::Cash, Currency::Usd);
        let mut d = draft(Category::Expense);
        d.amount = Some(Money::new(12_00));
        d.source = PartySel::Asset(wallet.id);
        d.recurring_only = true;
        let errors = field_errors(validate(&d, None, std::slice::from_ref(&wallet)));
        assert_eq!(errors.get(Field::Recurring), Some("required to schedule"));

        d.recurring = Some(Frequency::Monthly);
        assert!(validate(&d, None, std::slice::from_ref(&wallet)).is_ok());

        let mut sell = draft(Category::Sell);
        sell.recurring_only = true;
        sell.recurring = Some(Frequency::Monthly);
        let errors = field_errors(validate(&sell, None, &[]));
        assert_eq!(
            errors.get(Field::Recurring),
            Some("this category cannot be scheduled")
        );
    }

    #[test]
    fn staged_source_is_refused_where_state_is_read() {
        let mut d = draft(Category::Sell);
        d.amount = Some(Money::new(100_00));
        let staged = NewAssetRequest {
            side: AssetSide::Source,
            name: "Apple".to_string(),
            kind: AssetKind::Stock,
            ticker: Some("AAPL".to_string()),
        };
        let errors = field_errors(validate(&d, Some(&staged), &[]));
        assert_eq!(errors.get(Field::Source), Some("select an existing asset"));
    }
}
