//! The module contains the entry form state and its transition functions.
//!
//! The form is plain data plus pure-ish transitions: `select_category`
//! resets the draft to a preset's defaults, `apply` folds one field update
//! in and runs the side-fill table. Nothing here talks to the backend;
//! submission consumes the finished [`FormState`].

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    Asset, AssetKind, AssetSide, Category, Currency, Frequency, MetalKind, Money, NewAssetRequest,
    PartyKind,
    calc::{self, interest::PayoutPeriod, metals::MetalUnit},
    resolve::single_candidate,
};

/// A form field, used as the key for validation errors and to describe
/// category-specific inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Amount,
    Date,
    Note,
    Source,
    Destination,
    Shares,
    Ticker,
    Metal,
    Weight,
    Unit,
    Period,
    Maturity,
    Principal,
    AnnualRate,
    TermMonths,
    Debt,
    PrincipalPart,
    InterestPart,
    PricePerUnit,
    CostBasis,
    FullyDisposed,
    CurrentValue,
    Recurring,
    StartChoice,
    LinkedLedgers,
}

impl Field {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Amount => "amount",
            Field::Date => "date",
            Field::Note => "note",
            Field::Source => "source",
            Field::Destination => "destination",
            Field::Shares => "shares",
            Field::Ticker => "ticker",
            Field::Metal => "metal",
            Field::Weight => "weight",
            Field::Unit => "unit",
            Field::Period => "period",
            Field::Maturity => "maturity",
            Field::Principal => "principal",
            Field::AnnualRate => "annual_rate",
            Field::TermMonths => "term_months",
            Field::Debt => "debt",
            Field::PrincipalPart => "principal_part",
            Field::InterestPart => "interest_part",
            Field::PricePerUnit => "price_per_unit",
            Field::CostBasis => "cost_basis",
            Field::FullyDisposed => "fully_disposed",
            Field::CurrentValue => "current_value",
            Field::Recurring => "recurring",
            Field::StartChoice => "start_choice",
            Field::LinkedLedgers => "linked_ledgers",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation messages keyed by the field they belong to.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// One party of the flow as currently selected on the form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PartySel {
    #[default]
    Unset,
    /// Free-text counterparty.
    External(String),
    /// Reference to a tracked asset.
    Asset(Uuid),
}

impl PartySel {
    #[must_use]
    pub fn is_unset(&self) -> bool {
        match self {
            PartySel::Unset => true,
            PartySel::External(name) => name.trim().is_empty(),
            PartySel::Asset(_) => false,
        }
    }

    #[must_use]
    pub fn asset_id(&self) -> Option<Uuid> {
        match self {
            PartySel::Asset(id) => Some(*id),
            _ => None,
        }
    }
}

/// What happens to a matured deposit's money.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaturityChoice {
    /// Interest credits the deposit itself.
    KeepInAccount,
    /// Principal plus interest moves out to a money account.
    WithdrawToCash,
}

/// Answer to the "schedule starts today" question.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartChoice {
    /// First occurrence runs today.
    Immediately,
    /// Skip today; first occurrence is the next calendar step.
    NextOccurrence,
}

/// Everything the user has entered for one flow.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowDraft {
    pub category: Category,
    pub date: NaiveDate,
    pub amount: Option<Money>,
    pub currency: Currency,
    pub note: Option<String>,
    pub source: PartySel,
    pub destination: PartySel,
    pub shares: Option<f64>,
    pub ticker: Option<String>,
    pub metal: Option<MetalKind>,
    pub unit: MetalUnit,
    pub weight: Option<f64>,
    pub period: Option<PayoutPeriod>,
    pub maturity: Option<MaturityChoice>,
    pub principal: Option<Money>,
    pub annual_rate: Option<f64>,
    pub term_months: Option<u32>,
    pub debt_id: Option<Uuid>,
    pub principal_part: Option<Money>,
    pub interest_part: Option<Money>,
    pub price_per_unit: Option<f64>,
    pub cost_basis: Option<f64>,
    pub fully_disposed: bool,
    pub current_value: Option<f64>,
    pub recurring: Option<Frequency>,
    /// Schedule without recording anything today.
    pub recurring_only: bool,
    pub start_choice: Option<StartChoice>,
    pub linked_ledgers: Vec<Uuid>,
}

impl FlowDraft {
    #[must_use]
    pub fn new(category: Category, date: NaiveDate) -> Self {
        Self {
            category,
            date,
            amount: None,
            currency: Currency::default(),
            note: None,
            source: PartySel::Unset,
            destination: PartySel::Unset,
            shares: None,
            ticker: None,
            metal: None,
            unit: MetalUnit::Gram,
            weight: None,
            period: None,
            maturity: None,
            principal: None,
            annual_rate: None,
            term_months: None,
            debt_id: None,
            principal_part: None,
            interest_part: None,
            price_per_unit: None,
            cost_basis: None,
            fully_disposed: false,
            current_value: None,
            recurring: None,
            recurring_only: false,
            start_choice: None,
            linked_ledgers: Vec::new(),
        }
    }
}

/// One typed field change coming from the UI.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldUpdate {
    Amount(Option<Money>),
    Date(NaiveDate),
    Note(Option<String>),
    Source(PartySel),
    Destination(PartySel),
    Shares(Option<f64>),
    Ticker(Option<String>),
    Metal(Option<MetalKind>),
    Unit(MetalUnit),
    Weight(Option<f64>),
    Period(Option<PayoutPeriod>),
    Maturity(Option<MaturityChoice>),
    Principal(Option<Money>),
    AnnualRate(Option<f64>),
    TermMonths(Option<u32>),
    Debt(Option<Uuid>),
    PrincipalPart(Option<Money>),
    InterestPart(Option<Money>),
    PricePerUnit(Option<f64>),
    CostBasis(Option<f64>),
    FullyDisposed(bool),
    CurrentValue(Option<f64>),
    Recurring(Option<Frequency>),
    RecurringOnly(bool),
    StartChoice(Option<StartChoice>),
    LinkedLedgers(Vec<Uuid>),
}

impl FieldUpdate {
    /// The field this update writes to.
    #[must_use]
    pub fn field(&self) -> Field {
        match self {
            FieldUpdate::Amount(_) => Field::Amount,
            FieldUpdate::Date(_) => Field::Date,
            FieldUpdate::Note(_) => Field::Note,
            FieldUpdate::Source(_) => Field::Source,
            FieldUpdate::Destination(_) => Field::Destination,
            FieldUpdate::Shares(_) => Field::Shares,
            FieldUpdate::Ticker(_) => Field::Ticker,
            FieldUpdate::Metal(_) => Field::Metal,
            FieldUpdate::Unit(_) => Field::Unit,
            FieldUpdate::Weight(_) => Field::Weight,
            FieldUpdate::Period(_) => Field::Period,
            FieldUpdate::Maturity(_) => Field::Maturity,
            FieldUpdate::Principal(_) => Field::Principal,
            FieldUpdate::AnnualRate(_) => Field::AnnualRate,
            FieldUpdate::TermMonths(_) => Field::TermMonths,
            FieldUpdate::Debt(_) => Field::Debt,
            FieldUpdate::PrincipalPart(_) => Field::PrincipalPart,
            FieldUpdate::InterestPart(_) => Field::InterestPart,
            FieldUpdate::PricePerUnit(_) => Field::PricePerUnit,
            FieldUpdate::CostBasis(_) => Field::CostBasis,
            FieldUpdate::FullyDisposed(_) => Field::FullyDisposed,
            FieldUpdate::CurrentValue(_) => Field::CurrentValue,
            FieldUpdate::Recurring(_) => Field::Recurring,
            FieldUpdate::RecurringOnly(_) => Field::Recurring,
            FieldUpdate::StartChoice(_) => Field::StartChoice,
            FieldUpdate::LinkedLedgers(_) => Field::LinkedLedgers,
        }
    }

    /// An empty update does not clear a pending validation error.
    fn is_empty(&self) -> bool {
        match self {
            FieldUpdate::Amount(v) => v.is_none(),
            FieldUpdate::Note(v) => v.is_none(),
            FieldUpdate::Source(v) | FieldUpdate::Destination(v) => v.is_unset(),
            FieldUpdate::Shares(v) | FieldUpdate::Weight(v) => v.is_none(),
            FieldUpdate::Ticker(v) => v.as_deref().is_none_or(|s| s.trim().is_empty()),
            FieldUpdate::Metal(v) => v.is_none(),
            FieldUpdate::Period(v) => v.is_none(),
            FieldUpdate::Maturity(v) => v.is_none(),
            FieldUpdate::Principal(v)
            | FieldUpdate::PrincipalPart(v)
            | FieldUpdate::InterestPart(v) => v.is_none(),
            FieldUpdate::AnnualRate(v) => v.is_none(),
            FieldUpdate::TermMonths(v) => v.is_none(),
            FieldUpdate::Debt(v) => v.is_none(),
            FieldUpdate::PricePerUnit(v) | FieldUpdate::CostBasis(v) => v.is_none(),
            FieldUpdate::CurrentValue(v) => v.is_none(),
            FieldUpdate::Recurring(v) => v.is_none(),
            FieldUpdate::StartChoice(v) => v.is_none(),
            FieldUpdate::LinkedLedgers(v) => v.is_empty(),
            FieldUpdate::Date(_) | FieldUpdate::Unit(_) => false,
            FieldUpdate::FullyDisposed(_) | FieldUpdate::RecurringOnly(_) => false,
        }
    }
}

/// The entry form: a draft, its validation errors and an optional staged
/// asset creation.
#[derive(Clone, Debug, PartialEq)]
pub struct FormState {
    pub draft: FlowDraft,
    pub errors: FieldErrors,
    /// Staged from the form, realized during submission, never before.
    pub new_asset: Option<NewAssetRequest>,
}

impl FormState {
    /// Fresh form for a category. When a required asset party has exactly
    /// one qualifying asset, it is pre-selected.
    #[must_use]
    pub fn for_category(category: Category, assets: &[Asset], date: NaiveDate) -> Self {
        let mut draft = FlowDraft::new(category, date);
        let preset = category.preset();
        if preset.source == PartyKind::Asset
            && let Some(asset) = single_candidate(assets, preset.source_kinds)
        {
            draft.source = PartySel::Asset(asset.id);
        }
        if preset.destination == PartyKind::Asset
            && let Some(asset) = single_candidate(assets, preset.destination_kinds)
        {
            draft.destination = PartySel::Asset(asset.id);
        }
        Self {
            draft,
            errors: FieldErrors::new(),
            new_asset: None,
        }
    }

    /// Switches category, resetting every field to the new preset's
    /// defaults. The picked date survives the switch.
    pub fn select_category(&mut self, category: Category, assets: &[Asset]) {
        let date = self.draft.date;
        *self = FormState::for_category(category, assets, date);
    }

    /// Applies one field update, clears that field's error when the new
    /// value is non-empty, then runs the side-fill table.
    pub fn apply(&mut self, update: FieldUpdate, assets: &[Asset]) {
        let field = update.field();
        let clears = !update.is_empty();

        match update {
            FieldUpdate::Amount(v) => self.draft.amount = v,
            FieldUpdate::Date(v) => self.draft.date = v,
            FieldUpdate::Note(v) => self.draft.note = v,
            FieldUpdate::Source(v) => self.draft.source = v,
            FieldUpdate::Destination(v) => self.draft.destination = v,
            FieldUpdate::Shares(v) => self.draft.shares = v,
            FieldUpdate::Ticker(v) => self.draft.ticker = v,
            FieldUpdate::Metal(v) => self.draft.metal = v,
            FieldUpdate::Unit(v) => self.draft.unit = v,
            FieldUpdate::Weight(v) => self.draft.weight = v,
            FieldUpdate::Period(v) => self.draft.period = v,
            FieldUpdate::Maturity(v) => self.draft.maturity = v,
            FieldUpdate::Principal(v) => self.draft.principal = v,
            FieldUpdate::AnnualRate(v) => self.draft.annual_rate = v,
            FieldUpdate::TermMonths(v) => self.draft.term_months = v,
            FieldUpdate::Debt(v) => self.draft.debt_id = v,
            FieldUpdate::PrincipalPart(v) => self.draft.principal_part = v,
            FieldUpdate::InterestPart(v) => self.draft.interest_part = v,
            FieldUpdate::PricePerUnit(v) => self.draft.price_per_unit = v,
            FieldUpdate::CostBasis(v) => self.draft.cost_basis = v,
            FieldUpdate::FullyDisposed(v) => self.draft.fully_disposed = v,
            FieldUpdate::CurrentValue(v) => self.draft.current_value = v,
            FieldUpdate::Recurring(v) => self.draft.recurring = v,
            FieldUpdate::RecurringOnly(v) => self.draft.recurring_only = v,
            FieldUpdate::StartChoice(v) => self.draft.start_choice = v,
            FieldUpdate::LinkedLedgers(v) => self.draft.linked_ledgers = v,
        }

        if clears {
            self.errors.clear(field);
        }

        self.side_fill(field, assets);
    }

    /// The side-fill table: reactions keyed on (category, changed field).
    fn side_fill(&mut self, field: Field, assets: &[Asset]) {
        match (self.draft.category, field) {
            // Picking the deposit an interest payment belongs to pulls its
            // saved rate into a projected amount, in the deposit's currency.
            (Category::Interest, Field::Source) => {
                if let PartySel::Asset(id) = self.draft.source
                    && let Some(asset) = assets.iter().find(|a| a.id == id)
                    && asset.kind == AssetKind::Deposit
                    && let (Some(rate), Some(period)) = (asset.saved_rate, asset.rate_period)
                {
                    let projected =
                        calc::interest::project_period_amount(rate, asset.balance, period);
                    self.draft.period = Some(period);
                    self.draft.amount = Some(Money::from_major_f64(projected, asset.currency));
                    self.draft.currency = asset.currency;
                }
            }
            // Rent is denominated in the property's currency.
            (Category::Rental, Field::Source) => {
                if let PartySel::Asset(id) = self.draft.source
                    && let Some(asset) = assets.iter().find(|a| a.id == id)
                {
                    self.draft.currency = asset.currency;
                }
            }
            _ => {}
        }
    }

    /// Stages an asset creation for one side of the flow. The matching
    /// party selection is cleared; validation treats the staged request as
    /// covering that side.
    pub fn request_new_asset(
        &mut self,
        side: AssetSide,
        name: impl Into<String>,
        kind: AssetKind,
        ticker: Option<String>,
    ) {
        self.new_asset = Some(NewAssetRequest {
            side,
            name: name.into(),
            kind,
            ticker,
        });
        match side {
            AssetSide::Source => {
                self.draft.source = PartySel::Unset;
                self.errors.clear(Field::Source);
            }
            AssetSide::Destination => {
                self.draft.destination = PartySel::Unset;
                self.errors.clear(Field::Destination);
            }
        }
    }

    pub fn cancel_new_asset(&mut self) {
        self.new_asset = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::interest::{PayoutPeriod, annualize};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn cash(name: &str) -> Asset {
        Asset::new(name, AssetKind::Cash, Currency::Usd)
    }

    #[test]
    fn sole_candidate_is_preselected() {
        let wallet = cash("Wallet");
        let assets = vec![wallet.clone()];
        let form = FormState::for_category(Category::Expense, &assets, date(2026, 3, 14));
        assert_eq!(form.draft.source, PartySel::Asset(wallet.id));
    }

    #[test]
    fn ambiguous_candidates_stay_unset() {
        let assets = vec![cash("Wallet"), cash("Bank")];
        let form = FormState::for_category(Category::Expense, &assets, date(2026, 3, 14));
        assert_eq!(form.draft.source, PartySel::Unset);
    }

    #[test]
    fn optional_asset_parties_are_never_preselected() {
        let assets = vec![cash("Wallet")];
        let form = FormState::for_category(Category::MetalsPurchase, &assets, date(2026, 3, 14));
        assert_eq!(form.draft.source, PartySel::Unset);
    }

    #[test]
    fn non_empty_update_clears_the_field_error() {
        let mut form = FormState::for_category(Category::Income, &[], date(2026, 3, 14));
        form.errors.insert(Field::Amount, "required");
        form.apply(FieldUpdate::Amount(Some(Money::new(100))), &[]);
        assert!(form.errors.is_empty());
    }

    #[test]
    fn empty_update_keeps_the_field_error() {
        let mut form = FormState::for_category(Category::Income, &[], date(2026, 3, 14));
        form.errors.insert(Field::Amount, "required");
        form.apply(FieldUpdate::Amount(None), &[]);
        assert_eq!(form.errors.get(Field::Amount), Some("required"));
    }

    #[test]
    fn interest_source_fills_period_and_projected_amount() {
        let mut deposit = Asset::new("Savings", AssetKind::Deposit, Currency::Usd);
        deposit.balance = 10_000.0;
        deposit.saved_rate = Some(annualize(0.004, PayoutPeriod::Monthly));
        deposit.rate_period = Some(PayoutPeriod::Monthly);
        let assets = vec![deposit.clone()];

        let mut form = FormState::for_category(Category::Interest, &assets, date(2026, 3, 14));
        form.apply(FieldUpdate::Source(PartySel::Asset(deposit.id)), &assets);

        assert_eq!(form.draft.period, Some(PayoutPeriod::Monthly));
        assert_eq!(form.draft.amount, Some(Money::new(40_00)));
        assert_eq!(form.draft.currency, Currency::Usd);
    }

    #[test]
    fn interest_source_without_saved_rate_fills_nothing() {
        let mut deposit = Asset::new("Savings", AssetKind::Deposit, Currency::Usd);
        deposit.balance = 10_000.0;
        let assets = vec![deposit.clone()];

        let mut form = FormState::for_category(Category::Interest, &assets, date(2026, 3, 14));
        form.apply(FieldUpdate::Source(PartySel::Asset(deposit.id)), &assets);

        assert_eq!(form.draft.period, None);
        assert_eq!(form.draft.amount, None);
    }

    #[test]
    fn rental_source_copies_the_property_currency() {
        let mut flat = Asset::new("Flat", AssetKind::RealEstate, Currency::Eur);
        flat.balance = 250_000.0;
        let assets = vec![flat.clone()];

        let mut form = FormState::for_category(Category::Rental, &assets, date(2026, 3, 14));
        assert_eq!(form.draft.currency, Currency::Usd);
        form.apply(FieldUpdate::Source(PartySel::Asset(flat.id)), &assets);
        assert_eq!(form.draft.currency, Currency::Eur);
    }

    #[test]
    fn select_category_resets_fields_but_keeps_the_date() {
        let mut form = FormState::for_category(Category::Income, &[], date(2026, 3, 14));
        form.apply(FieldUpdate::Amount(Some(Money::new(5_000_00))), &[]);
        form.apply(FieldUpdate::Note(Some("march".to_string())), &[]);

        form.select_category(Category::Expense, &[]);
        assert_eq!(form.draft.category, Category::Expense);
        assert_eq!(form.draft.amount, None);
        assert_eq!(form.draft.note, None);
        assert_eq!(form.draft.date, date(2026, 3, 14));
    }

    #[test]
    fn staging_a_new_asset_clears_that_side() {
        let mut form = FormState::for_category(Category::Deposit, &[], date(2026, 3, 14));
        form.errors.insert(Field::Destination, "required");
        form.request_new_asset(AssetSide::Destination, "Emergency Fund", AssetKind::Deposit, None);

        assert!(form.errors.is_empty());
        let staged = form.new_asset.as_ref().unwrap();
        assert_eq!(staged.name, "Emergency Fund");
        assert_eq!(staged.kind, AssetKind::Deposit);

        form.cancel_new_asset();
        assert!(form.new_asset.is_none());
    }
}
