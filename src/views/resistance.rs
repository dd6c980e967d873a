//! Resistance-rate views.
//!
//! Rates are illustrative surveillance figures; the multipliers are view
//! heuristics, not epidemiological estimates.

use super::{ViewBundle, ViewDefaults, ViewId, FACILITIES, YEARS};
use crate::core::MetricRecord;
use crate::filters::{FilterCategory, OptionCatalog};
use crate::projection::RecordOrder;
use crate::rules::{Adjustment, AdjustmentRule, RuleTable};

use FilterCategory::{AgeBand, Antibiotic, Facility, Pathogen, Sex, SpecimenSource, Ward, Year};

const PATHOGENS: &[(&str, &str, f64, u64)] = &[
    ("e_coli", "E. coli", 38.7, 1245),
    ("k_pneumoniae", "K. pneumoniae", 45.2, 892),
    ("s_aureus", "S. aureus", 28.4, 1056),
    ("p_aeruginosa", "P. aeruginosa", 32.1, 534),
    ("a_baumannii", "A. baumannii", 61.8, 287),
    ("enterococcus", "Enterococcus spp.", 18.9, 412),
];

/// Resistance rate per pathogen, narrowed by facility, ward, specimen, year.
pub(super) fn overview(defaults: &ViewDefaults) -> ViewBundle {
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
                ("maternity", "Maternity Ward"),
                ("outpatient", "Outpatient"),
            ],
        )
        .with_category(
            SpecimenSource,
            "Specimen Source",
            &[
                ("blood", "Blood"),
                ("urine", "Urine"),
                ("wound", "Wound Swab"),
                ("sputum", "Sputum"),
                ("csf", "Cerebrospinal Fluid"),
            ],
        )
        .with_category(Year, "Year", YEARS);

    let rules = RuleTable::from_rules([
        AdjustmentRule::single(Facility, "korle_bu", Adjustment::multiply(1.15)),
        AdjustmentRule::single(Facility, "komfo_anokye", Adjustment::multiply(1.08)),
        AdjustmentRule::single(Facility, "tamale", Adjustment::multiply(0.92)),
        AdjustmentRule::single(Facility, "cape_coast", Adjustment::multiply(0.95)),
        AdjustmentRule::single(Ward, "icu", Adjustment::multiply(1.35)),
        AdjustmentRule::single(Ward, "surgical", Adjustment::multiply(1.12)),
        AdjustmentRule::single(Ward, "medical", Adjustment::multiply(1.04)),
        AdjustmentRule::single(Ward, "pediatric", Adjustment::multiply(0.9)),
        AdjustmentRule::single(Ward, "maternity", Adjustment::multiply(0.85)),
        AdjustmentRule::single(Ward, "outpatient", Adjustment::multiply(0.75)),
        AdjustmentRule::single(SpecimenSource, "urine", Adjustment::multiply(1.1))
            .targeting(Pathogen, "e_coli"),
        AdjustmentRule::single(SpecimenSource, "blood", Adjustment::multiply(1.2)),
        AdjustmentRule::single(SpecimenSource, "urine", Adjustment::multiply(0.95)),
        AdjustmentRule::single(SpecimenSource, "wound", Adjustment::multiply(1.1)),
        AdjustmentRule::single(SpecimenSource, "sputum", Adjustment::multiply(1.05)),
        AdjustmentRule::single(SpecimenSource, "csf", Adjustment::multiply(1.25)),
        AdjustmentRule::single(Year, "2021", Adjustment::multiply(0.85)),
        AdjustmentRule::single(Year, "2022", Adjustment::multiply(0.92)),
        AdjustmentRule::single(Year, "2023", Adjustment::multiply(0.97)),
    ]);

    let records = PATHOGENS
        .iter()
        .map(|(key, name, rate, isolates)| {
            MetricRecord::new(*name, *rate)
                .with_attribute(Pathogen, *key)
                .with_total(*isolates)
        })
        .collect();

    let mut profile = super::profile(
        ViewId::ResistanceOverview,
        catalog,
        rules,
        defaults.rate_settings(RecordOrder::Catalog),
    );
    profile
        .remote_columns
        .insert(Facility, "facility_name".to_string());
    profile.remote_columns.insert(Year, "collection_year".to_string());

    ViewBundle { profile, records }
}

const PROFILE_PAIRS: &[(&str, &str, &str, &str, f64)] = &[
    ("e_coli", "E. coli", "ampicillin", "Ampicillin", 78.4),
    ("e_coli", "E. coli", "ciprofloxacin", "Ciprofloxacin", 38.7),
    ("e_coli", "E. coli", "ceftriaxone", "Ceftriaxone", 41.2),
    ("e_coli", "E. coli", "gentamicin", "Gentamicin", 24.6),
    ("k_pneumoniae", "K. pneumoniae", "ceftriaxone", "Ceftriaxone", 56.3),
    ("k_pneumoniae", "K. pneumoniae", "meropenem", "Meropenem", 12.8),
    ("k_pneumoniae", "K. pneumoniae", "gentamicin", "Gentamicin", 35.9),
    ("s_aureus", "S. aureus", "oxacillin", "Oxacillin", 28.4),
    ("s_aureus", "S. aureus", "vancomycin", "Vancomycin", 1.9),
    ("s_aureus", "S. aureus", "erythromycin", "Erythromycin", 33.5),
];

/// Pathogen/antibiotic resistance pairs, narrowed by age band and sex.
pub(super) fn profile(defaults: &ViewDefaults) -> ViewBundle {
    let catalog = OptionCatalog::new()
        .with_category(
            AgeBand,
            "Age Group",
            &[
                ("neonates", "Neonates (0-28 days)"),
                ("1-4", "1-4 years"),
                ("5-14", "5-14 years"),
                ("15-24", "15-24 years"),
                ("25-34", "25-34 years"),
                ("35-44", "35-44 years"),
                ("45-64", "45-64 years"),
                ("65+", "65+ years"),
            ],
        )
        .with_category(Sex, "Sex", &[("female", "Female"), ("male", "Male")]);

    let rules = RuleTable::from_rules([
        AdjustmentRule::compound(
            &[(Sex, "female"), (AgeBand, "35-44")],
            Adjustment::multiply(1.22),
        ),
        AdjustmentRule::compound(
            &[(Sex, "female"), (AgeBand, "15-24")],
            Adjustment::multiply(1.1),
        ),
        AdjustmentRule::compound(
            &[(Sex, "male"), (AgeBand, "65+")],
            Adjustment::multiply(1.28),
        ),
        AdjustmentRule::single(AgeBand, "neonates", Adjustment::override_with(85.0))
            .targeting(Pathogen, "e_coli")
            .targeting(Antibiotic, "ampicillin"),
        AdjustmentRule::single(AgeBand, "neonates", Adjustment::override_with(48.0))
            .targeting(Pathogen, "e_coli")
            .targeting(Antibiotic, "gentamicin"),
        AdjustmentRule::single(AgeBand, "neonates", Adjustment::override_with(71.5))
            .targeting(Pathogen, "k_pneumoniae"),
        AdjustmentRule::single(AgeBand, "neonates", Adjustment::multiply(1.2)),
        AdjustmentRule::single(AgeBand, "1-4", Adjustment::multiply(0.9)),
        AdjustmentRule::single(AgeBand, "5-14", Adjustment::multiply(0.85)),
        AdjustmentRule::single(AgeBand, "15-24", Adjustment::multiply(0.95)),
        AdjustmentRule::single(AgeBand, "45-64", Adjustment::multiply(1.08)),
        AdjustmentRule::single(AgeBand, "65+", Adjustment::multiply(1.18)),
        AdjustmentRule::single(Sex, "female", Adjustment::multiply(1.05)),
        AdjustmentRule::single(Sex, "male", Adjustment::multiply(0.96)),
    ]);

    let records = PROFILE_PAIRS
        .iter()
        .map(|(pathogen, pathogen_name, drug, drug_name, rate)| {
            MetricRecord::new(*pathogen_name, *rate)
                .with_modifier(*drug_name)
                .with_attribute(Pathogen, *pathogen)
                .with_attribute(Antibiotic, *drug)
        })
        .collect();

    ViewBundle {
        profile: super::profile(
            ViewId::ResistanceProfile,
            catalog,
            rules,
            defaults.rate_settings(RecordOrder::ByName),
        ),
        records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterSet;
    use crate::projection::{project, RiskTier};

    fn value_of(records: &[crate::projection::DerivedRecord], name: &str) -> f64 {
        records
            .iter()
            .find(|r| r.name == name)
            .map(|r| r.adjusted_value)
            .unwrap()
    }

    #[test]
    fn test_overview_korle_bu_scenario() {
        let bundle = overview(&ViewDefaults::default());
        let mut filters = FilterSet::new();

        let p = &bundle.profile;
        let plain = project(&bundle.records, &filters.to_vec(), &p.rules, &p.settings);
        assert_eq!(value_of(&plain, "E. coli"), 38.7);
        assert_eq!(plain[0].tier, Some(RiskTier::Moderate));

        filters.add(&p.catalog, "facility", "korle_bu");
        let filtered = project(&bundle.records, &filters.to_vec(), &p.rules, &p.settings);
        assert_eq!(value_of(&filtered, "E. coli"), 44.5);
        assert_eq!(filtered[0].tier, Some(RiskTier::High));
    }

    #[test]
    fn test_overview_targeted_urine_rule() {
        let bundle = overview(&ViewDefaults::default());
        let p = &bundle.profile;
        let mut filters = FilterSet::new();
        filters.add(&p.catalog, "specimen_source", "urine");

        let derived = project(&bundle.records, &filters.to_vec(), &p.rules, &p.settings);
        // 38.7 * 1.1 for E. coli, 45.2 * 0.95 for the rest
        assert_eq!(value_of(&derived, "E. coli"), 42.6);
        assert_eq!(value_of(&derived, "K. pneumoniae"), 42.9);
    }

    #[test]
    fn test_profile_sorted_by_combined_name() {
        let bundle = profile(&ViewDefaults::default());
        let p = &bundle.profile;
        let derived = project(&bundle.records, &[], &p.rules, &p.settings);
        let names: Vec<_> = derived.iter().map(|r| r.name.clone()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names[0], "E. coli: Ampicillin");
    }

    #[test]
    fn test_profile_compound_beats_single() {
        let bundle = profile(&ViewDefaults::default());
        let p = &bundle.profile;
        let mut filters = FilterSet::new();
        filters.add(&p.catalog, "sex", "female");
        filters.add(&p.catalog, "age", "35-44");

        let derived = project(&bundle.records, &filters.to_vec(), &p.rules, &p.settings);
        // 38.7 * 1.22 = 47.214, not 38.7 * 1.05 = 40.635
        assert_eq!(value_of(&derived, "E. coli: Ciprofloxacin"), 47.2);
    }

    #[test]
    fn test_profile_neonate_override_replaces_rate() {
        let bundle = profile(&ViewDefaults::default());
        let p = &bundle.profile;
        let mut filters = FilterSet::new();
        filters.add(&p.catalog, "age_band", "neonates");

        let derived = project(&bundle.records, &filters.to_vec(), &p.rules, &p.settings);
        assert_eq!(value_of(&derived, "E. coli: Ampicillin"), 85.0);
        assert_eq!(value_of(&derived, "K. pneumoniae: Meropenem"), 71.5);
        // untargeted neonate multiplier: 38.7 * 1.2 = 46.44
        assert_eq!(value_of(&derived, "E. coli: Ciprofloxacin"), 46.4);
    }

    #[test]
    fn test_profile_clamps_extreme_override_chain() {
        let bundle = profile(&ViewDefaults::default());
        let p = &bundle.profile;
        let mut filters = FilterSet::new();
        filters.add(&p.catalog, "sex", "male");
        filters.add(&p.catalog, "age_band", "65+");

        let derived = project(&bundle.records, &filters.to_vec(), &p.rules, &p.settings);
        // 78.4 * 1.28 = 100.35 -> capped
        assert_eq!(value_of(&derived, "E. coli: Ampicillin"), 95.0);
    }
}
