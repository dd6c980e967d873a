//! Isolate counts by patient age group.

use super::{ViewBundle, ViewDefaults, ViewId, FACILITIES, YEARS};
use crate::core::MetricRecord;
use crate::filters::{FilterCategory, OptionCatalog};
use crate::projection::RecordOrder;
use crate::rules::{Adjustment, AdjustmentRule, RuleTable};

use FilterCategory::{AgeBand, Facility, Sex, Year};

const AGE_BANDS: &[(&str, &str, f64)] = &[
    ("neonates", "Neonates", 186.0),
    ("1-4", "1-4", 342.0),
    ("5-14", "5-14", 298.0),
    ("15-24", "15-24", 415.0),
    ("25-34", "25-34", 587.0),
    ("35-44", "35-44", 523.0),
    ("45-64", "45-64", 764.0),
    ("65+", "65+", 611.0),
];

pub(super) fn age_distribution(defaults: &ViewDefaults) -> ViewBundle {
    let catalog = OptionCatalog::new()
        .with_category(Sex, "Sex", &[("female", "Female"), ("male", "Male")])
        .with_category(Facility, "Facility", FACILITIES)
        .with_category(Year, "Year", YEARS);

    let rules = RuleTable::from_rules([
        AdjustmentRule::compound(
            &[(Sex, "female"), (Facility, "korle_bu")],
            Adjustment::multiply(0.6),
        ),
        // maternity and urinary-tract sampling skews young adult women up
        AdjustmentRule::single(Sex, "female", Adjustment::multiply(0.68))
            .targeting(AgeBand, "15-24"),
        AdjustmentRule::single(Sex, "female", Adjustment::multiply(0.7))
            .targeting(AgeBand, "25-34"),
        AdjustmentRule::single(Sex, "female", Adjustment::multiply(0.55)),
        AdjustmentRule::single(Sex, "male", Adjustment::multiply(0.45)),
        AdjustmentRule::single(Facility, "korle_bu", Adjustment::multiply(0.38)),
        AdjustmentRule::single(Facility, "komfo_anokye", Adjustment::multiply(0.29)),
        AdjustmentRule::single(Facility, "tamale", Adjustment::multiply(0.18)),
        AdjustmentRule::single(Facility, "cape_coast", Adjustment::multiply(0.15)),
        AdjustmentRule::single(Year, "2021", Adjustment::multiply(0.21)),
        AdjustmentRule::single(Year, "2022", Adjustment::multiply(0.24)),
        AdjustmentRule::single(Year, "2023", Adjustment::multiply(0.26)),
        AdjustmentRule::single(Year, "2024", Adjustment::multiply(0.29)),
    ]);

    let records = AGE_BANDS
        .iter()
        .map(|(key, name, isolates)| {
            MetricRecord::new(*name, *isolates).with_attribute(AgeBand, *key)
        })
        .collect();

    let mut profile = super::profile(
        ViewId::AgeDistribution,
        catalog,
        rules,
        defaults.count_settings(RecordOrder::Catalog),
    );
    profile
        .remote_columns
        .insert(Facility, "facility_name".to_string());

    ViewBundle { profile, records }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterSet;
    use crate::projection::project;

    #[test]
    fn test_unfiltered_shares_sum_to_hundred() {
        let bundle = age_distribution(&ViewDefaults::default());
        let p = &bundle.profile;
        let derived = project(&bundle.records, &[], &p.rules, &p.settings);

        assert_eq!(derived.len(), AGE_BANDS.len());
        assert!(derived.iter().all(|r| r.tier.is_none()));
        let total: f64 = derived.iter().filter_map(|r| r.percentage_of_total).sum();
        assert!((total - 100.0).abs() < 0.5, "shares summed to {total}");
    }

    #[test]
    fn test_female_filter_targets_young_adults() {
        let bundle = age_distribution(&ViewDefaults::default());
        let p = &bundle.profile;
        let mut filters = FilterSet::new();
        filters.add(&p.catalog, "gender", "female");

        let derived = project(&bundle.records, &filters.to_vec(), &p.rules, &p.settings);
        let by_name = |name: &str| {
            derived
                .iter()
                .find(|r| r.name == name)
                .map(|r| r.adjusted_value)
                .unwrap()
        };
        // 415 * 0.68 = 282.2, 186 * 0.55 = 102.3
        assert_eq!(by_name("15-24"), 282.0);
        assert_eq!(by_name("Neonates"), 102.0);
    }

    #[test]
    fn test_palette_colors_are_distinct_per_band() {
        let bundle = age_distribution(&ViewDefaults::default());
        let p = &bundle.profile;
        let derived = project(&bundle.records, &[], &p.rules, &p.settings);
        assert_ne!(derived[0].color, derived[1].color);
        assert!(derived.iter().all(|r| r.color.starts_with('#')));
    }
}
