//! Regional resistance ranking.

use super::{ViewBundle, ViewDefaults, ViewId, YEARS};
use crate::core::MetricRecord;
use crate::filters::{FilterCategory, OptionCatalog};
use crate::projection::RecordOrder;
use crate::rules::{Adjustment, AdjustmentRule, RuleTable};

use FilterCategory::{AntibioticClass, Pathogen, Region, Year};

const REGIONS: &[(&str, &str, f64, u64)] = &[
    ("greater_accra", "Greater Accra", 42.3, 2140),
    ("ashanti", "Ashanti", 39.8, 1785),
    ("northern", "Northern", 31.2, 642),
    ("western", "Western", 35.6, 811),
    ("central", "Central", 33.9, 590),
    ("volta", "Volta", 29.4, 478),
    ("eastern", "Eastern", 36.1, 702),
    ("upper_east", "Upper East", 24.7, 315),
];

pub(super) fn ranking(defaults: &ViewDefaults) -> ViewBundle {
    let catalog = OptionCatalog::new()
        .with_category(
            Pathogen,
            "Pathogen",
            &[
                ("e_coli", "E. coli"),
                ("k_pneumoniae", "K. pneumoniae"),
                ("s_aureus", "S. aureus"),
                ("a_baumannii", "A. baumannii"),
            ],
        )
        .with_category(
            AntibioticClass,
            "Antibiotic Class",
            &[
                ("penicillins", "Penicillins"),
                ("cephalosporins", "Cephalosporins"),
                ("fluoroquinolones", "Fluoroquinolones"),
                ("carbapenems", "Carbapenems"),
                ("aminoglycosides", "Aminoglycosides"),
            ],
        )
        .with_category(Year, "Year", YEARS);

    let rules = RuleTable::from_rules([
        AdjustmentRule::compound(
            &[(Pathogen, "k_pneumoniae"), (AntibioticClass, "carbapenems")],
            Adjustment::multiply(0.6),
        ),
        AdjustmentRule::single(Pathogen, "a_baumannii", Adjustment::multiply(1.45))
            .targeting(Region, "greater_accra"),
        AdjustmentRule::single(Pathogen, "e_coli", Adjustment::multiply(1.02)),
        AdjustmentRule::single(Pathogen, "k_pneumoniae", Adjustment::multiply(1.14)),
        AdjustmentRule::single(Pathogen, "s_aureus", Adjustment::multiply(0.78)),
        AdjustmentRule::single(Pathogen, "a_baumannii", Adjustment::multiply(1.32)),
        AdjustmentRule::single(AntibioticClass, "penicillins", Adjustment::multiply(1.6)),
        AdjustmentRule::single(AntibioticClass, "cephalosporins", Adjustment::multiply(1.1)),
        AdjustmentRule::single(AntibioticClass, "fluoroquinolones", Adjustment::multiply(0.95)),
        AdjustmentRule::single(AntibioticClass, "carbapenems", Adjustment::multiply(0.3)),
        AdjustmentRule::single(AntibioticClass, "aminoglycosides", Adjustment::multiply(0.72)),
        AdjustmentRule::single(Year, "2021", Adjustment::multiply(0.88)),
        AdjustmentRule::single(Year, "2022", Adjustment::multiply(0.93)),
        AdjustmentRule::single(Year, "2023", Adjustment::multiply(0.97)),
    ]);

    let records = REGIONS
        .iter()
        .map(|(key, name, rate, isolates)| {
            MetricRecord::new(*name, *rate)
                .with_attribute(Region, *key)
                .with_total(*isolates)
        })
        .collect();

    ViewBundle {
        profile: super::profile(
            ViewId::RegionalRanking,
            catalog,
            rules,
            defaults.rate_settings(RecordOrder::Rank),
        ),
        records,
    }
}
