//! Mappings between the engine's domain types and the wire DTOs. Kept
//! explicit so a wire contract change cannot silently reshape the domain.

use api_types::{asset, debt, interest, record, recurring};
use engine::{
    AcquisitionLot, Asset, AssetKind, AssetNew, AssetUpdate, Currency, DebtNew, Frequency,
    InterestSettings, Market, MetalKind, MetalUnit, Money, PayoutPeriod, RecordMeta, RecordNew,
    RecurringNew,
};

pub(crate) fn currency_to_api(value: Currency) -> api_types::Currency {
    match value {
        Currency::Usd => api_types::Currency::Usd,
        Currency::Eur => api_types::Currency::Eur,
        Currency::Krw => api_types::Currency::Krw,
    }
}

pub(crate) fn currency_from_api(value: api_types::Currency) -> Currency {
    match value {
        api_types::Currency::Usd => Currency::Usd,
        api_types::Currency::Eur => Currency::Eur,
        api_types::Currency::Krw => Currency::Krw,
    }
}

pub(crate) fn kind_to_api(value: AssetKind) -> asset::AssetKind {
    match value {
        AssetKind::Cash => asset::AssetKind::Cash,
        AssetKind::Deposit => asset::AssetKind::Deposit,
        AssetKind::Stock => asset::AssetKind::Stock,
        AssetKind::Etf => asset::AssetKind::Etf,
        AssetKind::Metal => asset::AssetKind::Metal,
        AssetKind::RealEstate => asset::AssetKind::RealEstate,
        AssetKind::Other => asset::AssetKind::Other,
    }
}

pub(crate) fn kind_from_api(value: asset::AssetKind) -> AssetKind {
    match value {
        asset::AssetKind::Cash => AssetKind::Cash,
        asset::AssetKind::Deposit => AssetKind::Deposit,
        asset::AssetKind::Stock => AssetKind::Stock,
        asset::AssetKind::Etf => AssetKind::Etf,
        asset::AssetKind::Metal => AssetKind::Metal,
        asset::AssetKind::RealEstate => AssetKind::RealEstate,
        asset::AssetKind::Other => AssetKind::Other,
    }
}

pub(crate) fn metal_to_api(value: MetalKind) -> asset::MetalKind {
    match value {
        MetalKind::Gold => asset::MetalKind::Gold,
        MetalKind::Silver => asset::MetalKind::Silver,
        MetalKind::Platinum => asset::MetalKind::Platinum,
    }
}

pub(crate) fn metal_from_api(value: asset::MetalKind) -> MetalKind {
    match value {
        asset::MetalKind::Gold => MetalKind::Gold,
        asset::MetalKind::Silver => MetalKind::Silver,
        asset::MetalKind::Platinum => MetalKind::Platinum,
    }
}

pub(crate) fn unit_to_api(value: MetalUnit) -> asset::MetalUnit {
    match value {
        MetalUnit::Gram => asset::MetalUnit::Gram,
        MetalUnit::Kilogram => asset::MetalUnit::Kilogram,
        MetalUnit::TroyOunce => asset::MetalUnit::TroyOunce,
        MetalUnit::Don => asset::MetalUnit::Don,
    }
}

pub(crate) fn unit_from_api(value: asset::MetalUnit) -> MetalUnit {
    match value {
        asset::MetalUnit::Gram => MetalUnit::Gram,
        asset::MetalUnit::Kilogram => MetalUnit::Kilogram,
        asset::MetalUnit::TroyOunce => MetalUnit::TroyOunce,
        asset::MetalUnit::Don => MetalUnit::Don,
    }
}

pub(crate) fn market_to_api(value: Market) -> asset::Market {
    match value {
        Market::Us => asset::Market::Us,
        Market::Kr => asset::Market::Kr,
        Market::Eu => asset::Market::Eu,
    }
}

pub(crate) fn market_from_api(value: asset::Market) -> Market {
    match value {
        asset::Market::Us => Market::Us,
        asset::Market::Kr => Market::Kr,
        asset::Market::Eu => Market::Eu,
    }
}

pub(crate) fn period_to_api(value: PayoutPeriod) -> interest::PayoutPeriod {
    match value {
        PayoutPeriod::Weekly => interest::PayoutPeriod::Weekly,
        PayoutPeriod::Monthly => interest::PayoutPeriod::Monthly,
        PayoutPeriod::Quarterly => interest::PayoutPeriod::Quarterly,
        PayoutPeriod::SemiAnnual => interest::PayoutPeriod::SemiAnnual,
        PayoutPeriod::Annual => interest::PayoutPeriod::Annual,
        PayoutPeriod::Biennial => interest::PayoutPeriod::Biennial,
        PayoutPeriod::Triennial => interest::PayoutPeriod::Triennial,
        PayoutPeriod::Quinquennial => interest::PayoutPeriod::Quinquennial,
    }
}

pub(crate) fn period_from_api(value: interest::PayoutPeriod) -> PayoutPeriod {
    match value {
        interest::PayoutPeriod::Weekly => PayoutPeriod::Weekly,
        interest::PayoutPeriod::Monthly => PayoutPeriod::Monthly,
        interest::PayoutPeriod::Quarterly => PayoutPeriod::Quarterly,
        interest::PayoutPeriod::SemiAnnual => PayoutPeriod::SemiAnnual,
        interest::PayoutPeriod::Annual => PayoutPeriod::Annual,
        interest::PayoutPeriod::Biennial => PayoutPeriod::Biennial,
        interest::PayoutPeriod::Triennial => PayoutPeriod::Triennial,
        interest::PayoutPeriod::Quinquennial => PayoutPeriod::Quinquennial,
    }
}

pub(crate) fn frequency_to_api(value: Frequency) -> recurring::Frequency {
    match value {
        Frequency::Daily => recurring::Frequency::Daily,
        Frequency::Weekly => recurring::Frequency::Weekly,
        Frequency::Monthly => recurring::Frequency::Monthly,
        Frequency::Yearly => recurring::Frequency::Yearly,
    }
}

pub(crate) fn meta_to_api(value: &RecordMeta) -> record::RecordMeta {
    match value {
        RecordMeta::Investment {
            units,
            price_per_unit,
        } => record::RecordMeta::Investment {
            units: *units,
            price_per_unit: *price_per_unit,
        },
        RecordMeta::Dividend {
            gross_minor,
            tax_rate,
            tax_withheld_minor,
        } => record::RecordMeta::Dividend {
            gross_minor: *gross_minor,
            tax_rate: *tax_rate,
            tax_withheld_minor: *tax_withheld_minor,
        },
        RecordMeta::Drip { units } => record::RecordMeta::Drip { units: *units },
        RecordMeta::Sale {
            units,
            avg_cost_per_unit,
            realized_pl_minor,
        } => record::RecordMeta::Sale {
            units: *units,
            avg_cost_per_unit: *avg_cost_per_unit,
            realized_pl_minor: *realized_pl_minor,
        },
        RecordMeta::Interest {
            period,
            annual_rate,
            principal_minor,
        } => record::RecordMeta::Interest {
            period: period.map(period_to_api),
            annual_rate: *annual_rate,
            principal_minor: *principal_minor,
        },
        RecordMeta::DebtPayment {
            principal_minor,
            interest_minor,
        } => record::RecordMeta::DebtPayment {
            principal_minor: *principal_minor,
            interest_minor: *interest_minor,
        },
    }
}

pub(crate) fn record_to_api(value: &RecordNew) -> record::RecordNew {
    record::RecordNew {
        date: value.date,
        category: value.category.as_str().to_string(),
        amount_minor: value.amount.minor(),
        currency: currency_to_api(value.currency),
        note: value.note.clone(),
        source_name: value.source_name.clone(),
        source_asset: value.source_asset,
        destination_name: value.destination_name.clone(),
        destination_asset: value.destination_asset,
        recurring: value.recurring.map(frequency_to_api),
        meta: value.meta.as_ref().map(meta_to_api),
    }
}

pub(crate) fn asset_new_to_api(value: &AssetNew) -> asset::AssetNew {
    asset::AssetNew {
        name: value.name.clone(),
        kind: kind_to_api(value.kind),
        currency: currency_to_api(value.currency),
        balance: value.balance,
        ticker: value.ticker.clone(),
        metal: value.metal.map(metal_to_api),
        unit: value.unit.map(unit_to_api),
        market: value.market.map(market_to_api),
    }
}

pub(crate) fn update_to_api(value: &AssetUpdate) -> asset::AssetUpdate {
    asset::AssetUpdate {
        balance: value.balance,
        saved_rate: value.saved_rate,
        rate_period: value.rate_period.map(period_to_api),
        realized_pl_minor: value.realized_pl_minor,
    }
}

pub(crate) fn asset_from_api(view: asset::AssetView) -> Asset {
    Asset {
        id: view.id,
        name: view.name,
        kind: kind_from_api(view.kind),
        currency: currency_from_api(view.currency),
        balance: view.balance,
        ticker: view.ticker,
        metal: view.metal.map(metal_from_api),
        unit: view.unit.map(unit_from_api),
        market: view.market.map(market_from_api),
        saved_rate: view.saved_rate,
        rate_period: view.rate_period.map(period_from_api),
        realized_pl_minor: view.realized_pl_minor,
    }
}

pub(crate) fn debt_to_api(value: &DebtNew) -> debt::DebtNew {
    debt::DebtNew {
        name: value.name.clone(),
        date: value.date,
        currency: currency_to_api(value.currency),
        principal_minor: value.principal.minor(),
        annual_rate: value.annual_rate,
        term_months: value.term_months,
        monthly_payment_minor: value.monthly_payment.map(Money::minor),
        disburse_to: value.disburse_to,
        note: value.note.clone(),
    }
}

pub(crate) fn settings_to_api(value: &InterestSettings) -> interest::InterestSettingsUpsert {
    interest::InterestSettingsUpsert {
        annual_rate: value.annual_rate,
        period: period_to_api(value.period),
    }
}

pub(crate) fn recurring_to_api(value: &RecurringNew) -> recurring::RecurringNew {
    recurring::RecurringNew {
        record: record_to_api(&value.record),
        frequency: frequency_to_api(value.frequency),
        first_run: value.first_run,
    }
}

pub(crate) fn lot_from_api(value: asset::AcquisitionLot) -> AcquisitionLot {
    AcquisitionLot {
        date: value.date,
        units: value.units,
        cost: Money::new(value.cost_minor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use engine::Category;

    #[test]
    fn record_carries_the_category_id_and_minor_amount() {
        let mut record = RecordNew::from_draft(
            &engine::FlowDraft::new(
                Category::MetalsPurchase,
                NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            ),
            Money::new(12_34),
        );
        record.meta = Some(RecordMeta::Drip { units: 1.5 });

        let wire = record_to_api(&record);
        assert_eq!(wire.category, "metals_purchase");
        assert_eq!(wire.amount_minor, 1234);
        assert!(matches!(
            wire.meta,
            Some(record::RecordMeta::Drip { units }) if units == 1.5
        ));
    }

    #[test]
    fn asset_round_trips_through_the_view() {
        let mut original = Asset::new("Savings", AssetKind::Deposit, Currency::Krw);
        original.saved_rate = Some(0.031);
        original.rate_period = Some(PayoutPeriod::Quarterly);

        let view = asset::AssetView {
            id: original.id,
            name: original.name.clone(),
            kind: asset::AssetKind::Deposit,
            currency: api_types::Currency::Krw,
            balance: original.balance,
            ticker: None,
            metal: None,
            unit: None,
            market: None,
            saved_rate: original.saved_rate,
            rate_period: Some(interest::PayoutPeriod::Quarterly),
            realized_pl_minor: 0,
        };
        assert_eq!(asset_from_api(view), original);
    }
}
