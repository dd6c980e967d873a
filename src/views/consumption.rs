//! Antimicrobial use (DDD per 1000 patient-days) by antibiotic class.

use super::{ViewBundle, ViewDefaults, ViewId, FACILITIES, YEARS};
use crate::core::MetricRecord;
use crate::filters::{FilterCategory, OptionCatalog};
use crate::projection::RecordOrder;
use crate::rules::{Adjustment, AdjustmentRule, RuleTable};

use FilterCategory::{AntibioticClass, Facility, Quarter, Ward, Year};

const CLASSES: &[(&str, &str, f64)] = &[
    ("penicillins", "Penicillins", 312.0),
    ("cephalosporins", "Cephalosporins", 268.0),
    ("fluoroquinolones", "Fluoroquinolones", 145.0),
    ("macrolides", "Macrolides", 98.0),
    ("aminoglycosides", "Aminoglycosides", 76.0),
    ("carbapenems", "Carbapenems", 34.0),
    ("glycopeptides", "Glycopeptides", 21.0),
];

pub(super) fn antimicrobial_use(defaults: &ViewDefaults) -> ViewBundle {
    let catalog = OptionCatalog::new()
        .with_category(Facility, "Facility", FACILITIES)
        .with_category(
            Ward,
            "Ward",
            &[
                ("icu", "Intensive Care Unit"),
                ("medical", "Medical Ward"),
                ("surgical", "Surgical Ward"),
                ("pediatric", "Pediatric Ward"),
            ],
        )
        .with_category(Year, "Year", YEARS)
        .with_category(
            Quarter,
            "Quarter",
            &[("q1", "Q1"), ("q2", "Q2"), ("q3", "Q3"), ("q4", "Q4")],
        );

    let rules = RuleTable::from_rules([
        AdjustmentRule::single(Facility, "korle_bu", Adjustment::multiply(1.12)),
        AdjustmentRule::single(Facility, "komfo_anokye", Adjustment::multiply(1.05)),
        AdjustmentRule::single(Facility, "tamale", Adjustment::multiply(0.84)),
        AdjustmentRule::single(Facility, "cape_coast", Adjustment::multiply(0.9)),
        AdjustmentRule::single(Ward, "icu", Adjustment::multiply(3.2))
            .targeting(AntibioticClass, "carbapenems"),
        AdjustmentRule::single(Ward, "icu", Adjustment::multiply(2.6))
            .targeting(AntibioticClass, "glycopeptides"),
        AdjustmentRule::single(Ward, "icu", Adjustment::multiply(1.8)),
        AdjustmentRule::single(Ward, "surgical", Adjustment::multiply(1.3))
            .targeting(AntibioticClass, "cephalosporins"),
        AdjustmentRule::single(Ward, "surgical", Adjustment::multiply(1.1)),
        AdjustmentRule::single(Ward, "medical", Adjustment::multiply(0.95)),
        AdjustmentRule::single(Ward, "pediatric", Adjustment::multiply(0.7)),
        AdjustmentRule::single(Year, "2021", Adjustment::multiply(0.82)),
        AdjustmentRule::single(Year, "2022", Adjustment::multiply(0.9)),
        AdjustmentRule::single(Year, "2023", Adjustment::multiply(0.96)),
        AdjustmentRule::single(Quarter, "q1", Adjustment::multiply(0.26)),
        AdjustmentRule::single(Quarter, "q2", Adjustment::multiply(0.24)),
        AdjustmentRule::single(Quarter, "q3", Adjustment::multiply(0.23)),
        AdjustmentRule::single(Quarter, "q4", Adjustment::multiply(0.27)),
    ]);

    let records = CLASSES
        .iter()
        .map(|(key, name, ddd)| MetricRecord::new(*name, *ddd).with_attribute(AntibioticClass, *key))
        .collect();

    let mut profile = super::profile(
        ViewId::AntimicrobialUse,
        catalog,
        rules,
        defaults.count_settings(RecordOrder::Catalog),
    );
    profile.remote_columns.insert(Ward, "ward_type".to_string());
    profile
        .remote_columns
        .insert(Facility, "facility_name".to_string());

    ViewBundle { profile, records }
}
