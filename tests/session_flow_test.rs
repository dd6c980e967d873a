//! End-to-end session flows over the built-in views.

use amrscope::{
    builtin, DashboardSession, DerivedRecord, FilterCategory, RecordOrder, RiskTier, ViewDefaults,
    ViewId,
};
use pretty_assertions::assert_eq;

fn session(id: ViewId) -> DashboardSession {
    DashboardSession::from_bundle(builtin(id, &ViewDefaults::default()))
}

fn find<'a>(session: &'a DashboardSession, name: &str) -> &'a DerivedRecord {
    session
        .derived()
        .iter()
        .find(|r| r.name == name)
        .unwrap_or_else(|| panic!("no record named {name}"))
}

#[test]
fn test_e_coli_korle_bu_scenario() {
    let mut session = session(ViewId::ResistanceOverview);

    let before = find(&session, "E. coli");
    assert_eq!(before.adjusted_value, 38.7);
    assert_eq!(before.tier, Some(RiskTier::Moderate));
    assert_eq!(before.color, "#f59e0b");

    let filter = session.add_filter("facility", "korle_bu").unwrap();
    assert_eq!(filter.label, "Facility: Korle Bu Teaching Hospital");

    let after = find(&session, "E. coli");
    assert_eq!(after.adjusted_value, 44.5);
    assert_eq!(after.tier, Some(RiskTier::High));
    assert_eq!(after.color, "#ef4444");
    // 1245 isolates at 44.5%
    assert_eq!(after.resistant_count, Some(554));
}

#[test]
fn test_identity_projection_for_every_view() {
    for id in ViewId::ALL {
        let bundle = builtin(id, &ViewDefaults::default());
        let session = DashboardSession::from_bundle(bundle.clone());

        for record in &bundle.records {
            let derived = find(&session, &record.display_name());
            assert_eq!(derived.adjusted_value, record.base_value, "{id}");
            assert!(!derived.was_adjusted());
        }
    }
}

#[test]
fn test_filter_insertion_order_does_not_change_result() {
    let mut forward = session(ViewId::ResistanceProfile);
    forward.add_filter("sex", "female");
    forward.add_filter("age_band", "35-44");

    let mut reverse = session(ViewId::ResistanceProfile);
    reverse.add_filter("age_band", "35-44");
    reverse.add_filter("sex", "female");

    let values = |s: &DashboardSession| -> Vec<f64> {
        s.derived().iter().map(|r| r.adjusted_value).collect()
    };
    assert_eq!(values(&forward), values(&reverse));
    // badges keep insertion order
    assert_eq!(
        forward.filters().labels(),
        vec!["Sex: Female", "Age Group: 35-44 years"]
    );
    assert_eq!(
        reverse.filters().labels(),
        vec!["Age Group: 35-44 years", "Sex: Female"]
    );
}

#[test]
fn test_removing_the_compound_partner_falls_back_to_single_rule() {
    let mut session = session(ViewId::ResistanceProfile);
    session.add_filter("sex", "female");
    session.add_filter("age_band", "35-44");
    assert_eq!(find(&session, "E. coli: Ciprofloxacin").adjusted_value, 47.2);

    session.remove_matching(FilterCategory::AgeBand, "35-44");
    // 38.7 * 1.05 = 40.635
    assert_eq!(find(&session, "E. coli: Ciprofloxacin").adjusted_value, 40.6);
}

#[test]
fn test_distribution_view_shares_and_palette() {
    let session = session(ViewId::AgeDistribution);
    assert_eq!(session.profile().settings.order, RecordOrder::Catalog);

    let shares: f64 = session
        .derived()
        .iter()
        .filter_map(|r| r.percentage_of_total)
        .sum();
    assert!((shares - 100.0).abs() < 0.5);
    assert!(session.derived().iter().all(|r| r.tier.is_none()));

    let summary = session.summary();
    assert_eq!(summary.count, 8);
    assert_eq!(summary.total_value, 3726.0);
    assert_eq!(summary.highest.as_deref(), Some("45-64"));
}

#[test]
fn test_ranking_view_summary() {
    let mut session = session(ViewId::RegionalRanking);
    session.add_filter("year", "2021");

    let ranks: Vec<Option<usize>> = session.derived().iter().map(|r| r.rank).collect();
    assert_eq!(ranks, (1..=8).map(Some).collect::<Vec<_>>());

    let summary = session.summary();
    assert_eq!(summary.count, 8);
    assert!(summary.max >= summary.min);
    assert_eq!(summary.spread, summary.max - summary.min);
    assert!(summary.total_isolates > 0);
}

#[test]
fn test_snapshot_is_detached_from_later_changes() {
    let mut session = session(ViewId::AntimicrobialUse);
    let snapshot = session.snapshot();
    session.add_filter("ward", "icu");
    assert_ne!(snapshot, session.derived());
    assert_eq!(snapshot[0].adjusted_value, 312.0);
}
