//! The module contains the flow category registry.
//!
//! Category presets are process constants. Each preset names the flow
//! direction, what kind of party each side of the flow is, which asset
//! kinds qualify for those parties and which extra form fields the
//! category brings in. The registry is the single place that knowledge
//! lives; validation and the submission branches both read it.

use core::fmt;

use crate::{AssetKind, EngineError, form::Field};

/// Direction of the money movement a category represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowDirection {
    Income,
    Expense,
    Transfer,
}

/// What one side of a flow is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PartyKind {
    /// Free-text counterparty outside the tracked assets.
    External,
    /// A tracked asset, required.
    Asset,
    /// A tracked asset, optional.
    OptionalAsset,
    /// Mirrors whatever the source resolves to.
    SameAsSource,
    /// The side does not exist for this category.
    None,
}

/// Flow category selected on the entry form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Income,
    Expense,
    Transfer,
    Deposit,
    Invest,
    PropertyPurchase,
    MetalsPurchase,
    Dividend,
    Drip,
    Interest,
    Sell,
    DebtCreate,
    DebtPayment,
    Rental,
    Refund,
}

/// Static description of one category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryPreset {
    pub id: Category,
    pub direction: FlowDirection,
    pub source: PartyKind,
    pub destination: PartyKind,
    /// Asset kinds a source party may resolve to. Empty when the source is
    /// not an asset.
    pub source_kinds: &'static [AssetKind],
    pub destination_kinds: &'static [AssetKind],
    /// Category-specific form fields beyond the common set.
    pub extra_fields: &'static [Field],
    /// Debt creation and bullion purchases may omit the amount.
    pub amount_required: bool,
}

const MONEY_ACCOUNTS: &[AssetKind] = &[AssetKind::Cash, AssetKind::Deposit];
const HOLDINGS: &[AssetKind] = &[AssetKind::Stock, AssetKind::Etf];
const VALUE_ASSETS: &[AssetKind] = &[AssetKind::RealEstate, AssetKind::Other];
const SELLABLE: &[AssetKind] = &[
    AssetKind::Stock,
    AssetKind::Etf,
    AssetKind::RealEstate,
    AssetKind::Other,
];
const DEPOSITS: &[AssetKind] = &[AssetKind::Deposit];
const PROPERTIES: &[AssetKind] = &[AssetKind::RealEstate];
const NO_KINDS: &[AssetKind] = &[];

static INCOME: CategoryPreset = CategoryPreset {
    id: Category::Income,
    direction: FlowDirection::Income,
    source: PartyKind::External,
    destination: PartyKind::Asset,
    source_kinds: NO_KINDS,
    destination_kinds: MONEY_ACCOUNTS,
    extra_fields: &[],
    amount_required: true,
};

static EXPENSE: CategoryPreset = CategoryPreset {
    id: Category::Expense,
    direction: FlowDirection::Expense,
    source: PartyKind::Asset,
    destination: PartyKind::External,
    source_kinds: MONEY_ACCOUNTS,
    destination_kinds: NO_KINDS,
    extra_fields: &[],
    amount_required: true,
};

static TRANSFER: CategoryPreset = CategoryPreset {
    id: Category::Transfer,
    direction: FlowDirection::Transfer,
    source: PartyKind::Asset,
    destination: PartyKind::Asset,
    source_kinds: MONEY_ACCOUNTS,
    destination_kinds: MONEY_ACCOUNTS,
    extra_fields: &[],
    amount_required: true,
};

static DEPOSIT: CategoryPreset = CategoryPreset {
    id: Category::Deposit,
    direction: FlowDirection::Transfer,
    source: PartyKind::OptionalAsset,
    destination: PartyKind::Asset,
    source_kinds: MONEY_ACCOUNTS,
    destination_kinds: DEPOSITS,
    extra_fields: &[],
    amount_required: true,
};

// Destination is optional on the form: the ticker names the holding and
// the submission creates it when no asset matches.
static INVEST: CategoryPreset = CategoryPreset {
    id: Category::Invest,
    direction: FlowDirection::Transfer,
    source: PartyKind::OptionalAsset,
    destination: PartyKind::OptionalAsset,
    source_kinds: MONEY_ACCOUNTS,
    destination_kinds: HOLDINGS,
    extra_fields: &[Field::Ticker, Field::Shares],
    amount_required: true,
};

static PROPERTY_PURCHASE: CategoryPreset = CategoryPreset {
    id: Category::PropertyPurchase,
    direction: FlowDirection::Transfer,
    source: PartyKind::OptionalAsset,
    destination: PartyKind::Asset,
    source_kinds: MONEY_ACCOUNTS,
    destination_kinds: VALUE_ASSETS,
    extra_fields: &[Field::CurrentValue],
    amount_required: true,
};

static METALS_PURCHASE: CategoryPreset = CategoryPreset {
    id: Category::MetalsPurchase,
    direction: FlowDirection::Transfer,
    source: PartyKind::OptionalAsset,
    destination: PartyKind::None,
    source_kinds: MONEY_ACCOUNTS,
    destination_kinds: NO_KINDS,
    extra_fields: &[Field::Metal, Field::Weight, Field::Unit],
    amount_required: false,
};

static DIVIDEND: CategoryPreset = CategoryPreset {
    id: Category::Dividend,
    direction: FlowDirection::Income,
    source: PartyKind::Asset,
    destination: PartyKind::Asset,
    source_kinds: HOLDINGS,
    destination_kinds: MONEY_ACCOUNTS,
    extra_fields: &[],
    amount_required: true,
};

static DRIP: CategoryPreset = CategoryPreset {
    id: Category::Drip,
    direction: FlowDirection::Income,
    source: PartyKind::Asset,
    destination: PartyKind::SameAsSource,
    source_kinds: HOLDINGS,
    destination_kinds: NO_KINDS,
    extra_fields: &[Field::Shares],
    amount_required: true,
};

static INTEREST: CategoryPreset = CategoryPreset {
    id: Category::Interest,
    direction: FlowDirection::Income,
    source: PartyKind::OptionalAsset,
    destination: PartyKind::OptionalAsset,
    source_kinds: DEPOSITS,
    destination_kinds: MONEY_ACCOUNTS,
    extra_fields: &[Field::Period, Field::Maturity, Field::Principal],
    amount_required: true,
};

static SELL: CategoryPreset = CategoryPreset {
    id: Category::Sell,
    direction: FlowDirection::Transfer,
    source: PartyKind::Asset,
    destination: PartyKind::Asset,
    source_kinds: SELLABLE,
    destination_kinds: MONEY_ACCOUNTS,
    extra_fields: &[
        Field::Shares,
        Field::PricePerUnit,
        Field::CostBasis,
        Field::FullyDisposed,
    ],
    amount_required: true,
};

static DEBT_CREATE: CategoryPreset = CategoryPreset {
    id: Category::DebtCreate,
    direction: FlowDirection::Transfer,
    source: PartyKind::External,
    destination: PartyKind::OptionalAsset,
    source_kinds: NO_KINDS,
    destination_kinds: MONEY_ACCOUNTS,
    extra_fields: &[Field::Principal, Field::AnnualRate, Field::TermMonths],
    amount_required: false,
};

static DEBT_PAYMENT: CategoryPreset = CategoryPreset {
    id: Category::DebtPayment,
    direction: FlowDirection::Expense,
    source: PartyKind::Asset,
    destination: PartyKind::External,
    source_kinds: MONEY_ACCOUNTS,
    destination_kinds: NO_KINDS,
    extra_fields: &[Field::Debt, Field::PrincipalPart, Field::InterestPart],
    amount_required: true,
};

static RENTAL: CategoryPreset = CategoryPreset {
    id: Category::Rental,
    direction: FlowDirection::Income,
    source: PartyKind::Asset,
    destination: PartyKind::Asset,
    source_kinds: PROPERTIES,
    destination_kinds: MONEY_ACCOUNTS,
    extra_fields: &[],
    amount_required: true,
};

static REFUND: CategoryPreset = CategoryPreset {
    id: Category::Refund,
    direction: FlowDirection::Income,
    source: PartyKind::External,
    destination: PartyKind::Asset,
    source_kinds: NO_KINDS,
    destination_kinds: MONEY_ACCOUNTS,
    extra_fields: &[],
    amount_required: true,
};

impl Category {
    pub const ALL: [Category; 15] = [
        Category::Income,
        Category::Expense,
        Category::Transfer,
        Category::Deposit,
        Category::Invest,
        Category::PropertyPurchase,
        Category::MetalsPurchase,
        Category::Dividend,
        Category::Drip,
        Category::Interest,
        Category::Sell,
        Category::DebtCreate,
        Category::DebtPayment,
        Category::Rental,
        Category::Refund,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Category::Income => "income",
            Category::Expense => "expense",
            Category::Transfer => "transfer",
            Category::Deposit => "deposit",
            Category::Invest => "invest",
            Category::PropertyPurchase => "property_purchase",
            Category::MetalsPurchase => "metals_purchase",
            Category::Dividend => "dividend",
            Category::Drip => "drip",
            Category::Interest => "interest",
            Category::Sell => "sell",
            Category::DebtCreate => "debt_create",
            Category::DebtPayment => "debt_payment",
            Category::Rental => "rental",
            Category::Refund => "refund",
        }
    }

    /// The preset for this category. Total: the closed enum is the id
    /// space, so there is no missing-preset case.
    #[must_use]
    pub fn preset(self) -> &'static CategoryPreset {
        match self {
            Category::Income => &INCOME,
            Category::Expense => &EXPENSE,
            Category::Transfer => &TRANSFER,
            Category::Deposit => &DEPOSIT,
            Category::Invest => &INVEST,
            Category::PropertyPurchase => &PROPERTY_PURCHASE,
            Category::MetalsPurchase => &METALS_PURCHASE,
            Category::Dividend => &DIVIDEND,
            Category::Drip => &DRIP,
            Category::Interest => &INTEREST,
            Category::Sell => &SELL,
            Category::DebtCreate => &DEBT_CREATE,
            Category::DebtPayment => &DEBT_PAYMENT,
            Category::Rental => &RENTAL,
            Category::Refund => &REFUND,
        }
    }

    /// User-facing toast shown when a flow of this category commits.
    #[must_use]
    pub const fn success_message(self) -> &'static str {
        match self {
            Category::Income => "Income recorded",
            Category::Expense => "Expense recorded",
            Category::Transfer => "Transfer recorded",
            Category::Deposit => "Deposit recorded",
            Category::Invest => "Purchase recorded",
            Category::PropertyPurchase => "Purchase recorded",
            Category::MetalsPurchase => "Holdings updated",
            Category::Dividend => "Dividend recorded",
            Category::Drip => "Reinvestment recorded",
            Category::Interest => "Interest recorded",
            Category::Sell => "Sale recorded",
            Category::DebtCreate => "Debt recorded",
            Category::DebtPayment => "Payment recorded",
            Category::Rental => "Rent recorded",
            Category::Refund => "Refund recorded",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Category {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let needle = value.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == needle)
            .ok_or_else(|| EngineError::InvalidDraft(format!("unknown category: {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::try_from(category.as_str()).unwrap(), category);
        }
        assert!(Category::try_from("payday loan").is_err());
    }

    #[test]
    fn presets_cover_every_category() {
        for category in Category::ALL {
            assert_eq!(category.preset().id, category);
        }
    }

    #[test]
    fn only_cost_optional_categories_relax_the_amount() {
        for category in Category::ALL {
            let optional = matches!(category, Category::DebtCreate | Category::MetalsPurchase);
            assert_eq!(category.preset().amount_required, !optional, "{category}");
        }
    }

    #[test]
    fn asset_parties_always_name_their_kinds() {
        for category in Category::ALL {
            let preset = category.preset();
            if matches!(preset.source, PartyKind::Asset | PartyKind::OptionalAsset) {
                assert!(!preset.source_kinds.is_empty(), "{category}");
            }
            if matches!(preset.destination, PartyKind::Asset | PartyKind::OptionalAsset) {
                assert!(!preset.destination_kinds.is_empty(), "{category}");
            }
        }
    }
}
