use super::common::*;
use crate::workflows::staffing::analyze_staffing;
use crate::workflows::staffing::domain::{EventType, MemberId, RequirementTier};
use crate::workflows::staffing::matching::{match_requirements, RequirementVerdict};

#[test]
fn empty_service_roster_reports_every_requirement_missing() {
    let registry = registry();
    let result = analyze_staffing(&registry, EventType::Service, &[]);

    assert_eq!(
        role_labels(result.critical()),
        ["Lead Vocalist", "Piano Principal", "Drummer"]
    );
    assert_eq!(role_labels(result.high()), ["Guitarist", "Bassist"]);
    assert_eq!(
        role_labels(result.medium()),
        ["Backing Vocalist", "Sound Engineer"]
    );
    assert!(result.satisfied().is_empty());
    assert_eq!(result.total_members(), 0);
    assert!(result.is_under_staffed());
}

#[test]
fn single_pianist_fills_only_the_piano_role() {
    let registry = registry();
    let roster = vec![assigned("m-1", "Piano Principal", "Piano")];

    let result = analyze_staffing(&registry, EventType::Service, &roster);

    assert_eq!(satisfied_labels(&result), ["Piano Principal"]);
    assert_eq!(
        result.satisfied()[0].member_ids,
        vec![MemberId("m-1".to_string())]
    );
    assert_eq!(role_labels(result.critical()), ["Lead Vocalist", "Drummer"]);
    assert!(result.is_under_staffed());
}

#[test]
fn core_band_staffs_a_service() {
    let registry = registry();
    let result = analyze_staffing(&registry, EventType::Service, &service_core_roster());

    assert_eq!(result.satisfied().len(), 5);
    assert!(result.critical().is_empty());
    assert!(result.high().is_empty());
    assert_eq!(
        role_labels(result.medium()),
        ["Backing Vocalist", "Sound Engineer"]
    );
    assert_eq!(result.total_members(), 5);
    assert!(!result.is_under_staffed());
    assert_members_claimed_once(&result);
}

#[test]
fn rehearsal_missing_vocalist_is_not_under_staffed() {
    let registry = registry();
    let roster = vec![member("m-1", "piano"), member("m-2", "GUITAR")];

    let result = analyze_staffing(&registry, EventType::Rehearsal, &roster);

    assert!(result.critical().is_empty());
    assert_eq!(role_labels(result.high()), ["Lead Vocalist"]);
    assert!(result.medium().is_empty());
    assert!(!result.is_under_staffed());
}

#[test]
fn one_vocalist_feeds_the_critical_role_before_backing_vocals() {
    let registry = registry();
    let roster = vec![
        member("m-1", "piano"),
        member("m-2", "drums"),
        member("m-3", "vocal"),
    ];

    let result = analyze_staffing(&registry, EventType::Service, &roster);

    assert!(result.critical().is_empty());
    assert_eq!(
        role_labels(result.medium()),
        ["Backing Vocalist", "Sound Engineer"]
    );
    let lead = result
        .satisfied()
        .iter()
        .find(|entry| entry.requirement.role_label == "Lead Vocalist")
        .expect("lead vocalist satisfied");
    assert_eq!(lead.member_ids, vec![MemberId("m-3".to_string())]);
}

#[test]
fn member_count_below_minimum_marks_under_staffed_without_critical_gaps() {
    let registry = registry();
    let roster = vec![
        member("m-1", "piano"),
        member("m-2", "vocal"),
        member("m-3", "drums"),
    ];

    let result = analyze_staffing(&registry, EventType::Service, &roster);

    assert!(result.critical().is_empty());
    assert_eq!(result.total_members(), 3);
    assert!(result.is_under_staffed());
    assert_eq!(
        result.verdict_reasons(),
        vec!["roster has 3 member(s), 5 required".to_string()]
    );
}

#[test]
fn multi_member_requirement_is_all_or_nothing() {
    let registry = registry();

    let result = analyze_staffing(&registry, EventType::Concert, &[member("m-1", "vocal")]);
    assert!(role_labels(result.critical()).contains(&"Lead Vocalists"));
    assert!(role_labels(result.high()).contains(&"Backing Vocalists"));

    let roster = vec![
        member("m-1", "vocal"),
        member("m-2", "vocal"),
        member("m-3", "vocal"),
    ];
    let result = analyze_staffing(&registry, EventType::Concert, &roster);
    assert!(!role_labels(result.critical()).contains(&"Lead Vocalists"));
    assert!(role_labels(result.high()).contains(&"Backing Vocalists"));

    let roster = vec![
        member("m-1", "vocal"),
        member("m-2", "vocal"),
        member("m-3", "vocal"),
        member("m-4", "vocal"),
    ];
    let result = analyze_staffing(&registry, EventType::Concert, &roster);
    let labels = satisfied_labels(&result);
    assert!(labels.contains(&"Lead Vocalists"));
    assert!(labels.contains(&"Backing Vocalists"));
    assert_members_claimed_once(&result);
}

#[test]
fn unmatched_verdict_reports_remaining_supply() {
    let registry = registry();
    let profile = registry.profile_for(EventType::Concert);
    let roster = vec![member("m-1", "vocal")];

    let outcome = match_requirements(profile, &roster);
    let lead = outcome
        .matches
        .iter()
        .find(|matched| matched.requirement.role_label == "Lead Vocalists")
        .expect("lead vocalists evaluated");

    assert_eq!(lead.verdict, RequirementVerdict::Unmatched { available: 1 });
}

#[test]
fn requirements_are_evaluated_in_tier_order() {
    let registry = registry();
    let profile = registry.profile_for(EventType::Concert);

    let outcome = match_requirements(profile, &[]);
    let tiers: Vec<RequirementTier> = outcome
        .matches
        .iter()
        .map(|matched| matched.requirement.tier)
        .collect();

    let mut sorted = tiers.clone();
    sorted.sort();
    assert_eq!(tiers, sorted);
    assert_eq!(outcome.matches.len(), profile.requirements().len());
}

#[test]
fn unspecified_members_count_but_fill_nothing() {
    let registry = registry();
    let roster = vec![member("m-1", ""), member("m-2", "  ?? "), member("m-3", "")];

    let result = analyze_staffing(&registry, EventType::Training, &roster);

    assert_eq!(result.total_members(), 3);
    assert!(result.satisfied().is_empty());
    assert_eq!(role_labels(result.critical()), ["Accompanist"]);
    assert!(result.is_under_staffed());
}

#[test]
fn unknown_capabilities_are_ignored() {
    let registry = registry();
    let roster = vec![member("m-1", "Accordion"), member("m-2", "Piano")];

    let result = analyze_staffing(&registry, EventType::Training, &roster);

    assert_eq!(satisfied_labels(&result), ["Accompanist"]);
    assert_eq!(result.total_members(), 2);
}

#[test]
fn duplicate_member_ids_are_counted_once() {
    let registry = registry();
    let roster = vec![
        member("m-1", "vocal"),
        member("m-1", "piano"),
        member("m-2", "piano"),
    ];

    let result = analyze_staffing(&registry, EventType::Rehearsal, &roster);

    assert_eq!(result.total_members(), 2);
    let piano = result
        .satisfied()
        .iter()
        .find(|entry| entry.requirement.role_label == "Piano Principal")
        .expect("piano satisfied");
    assert_eq!(piano.member_ids, vec![MemberId("m-2".to_string())]);
    assert_members_claimed_once(&result);
}

#[test]
fn members_are_claimed_in_roster_order() {
    let registry = registry();
    let roster = vec![
        member("m-late", "piano"),
        member("m-vocal", "vocal"),
        member("m-other", "piano"),
    ];

    let result = analyze_staffing(&registry, EventType::Rehearsal, &roster);

    let piano = &result.satisfied()[0];
    assert_eq!(piano.requirement.role_label, "Piano Principal");
    assert_eq!(piano.member_ids, vec![MemberId("m-late".to_string())]);
}

#[test]
fn repeated_analysis_is_deterministic() {
    let registry = registry();
    let roster = service_core_roster();

    let first = analyze_staffing(&registry, EventType::Service, &roster);
    let second = analyze_staffing(&registry, EventType::Service, &roster);

    assert_eq!(first, second);
}

#[test]
fn roster_order_does_not_change_which_roles_are_filled() {
    let registry = registry();
    let roster = vec![
        member("m-1", "vocal"),
        member("m-2", "Piano"),
        member("m-3", "vocal"),
        member("m-4", ""),
        member("m-5", "drums"),
        member("m-6", "Vocal "),
    ];
    let mut reversed = roster.clone();
    reversed.reverse();

    for event_type in EventType::ordered() {
        let forward = analyze_staffing(&registry, event_type, &roster);
        let backward = analyze_staffing(&registry, event_type, &reversed);

        assert_eq!(role_labels(forward.critical()), role_labels(backward.critical()));
        assert_eq!(role_labels(forward.high()), role_labels(backward.high()));
        assert_eq!(role_labels(forward.medium()), role_labels(backward.medium()));
        assert_eq!(satisfied_labels(&forward), satisfied_labels(&backward));
        assert_eq!(forward.is_under_staffed(), backward.is_under_staffed());
        assert_eq!(forward.total_members(), backward.total_members());
        assert_eq!(forward.total_members(), 6);
        assert_members_claimed_once(&backward);
    }
}

#[test]
fn every_profile_requirement_lands_in_exactly_one_bucket() {
    let registry = registry();
    let roster = vec![
        member("m-1", "vocal"),
        member("m-2", "piano"),
        member("m-3", "violin"),
        member("m-4", "sound"),
    ];

    for event_type in EventType::ordered() {
        let result = analyze_staffing(&registry, event_type, &roster);
        let profile = registry.profile_for(event_type);
        assert_eq!(
            result.gap_count() + result.satisfied().len(),
            profile.requirements().len(),
            "{event_type}"
        );
        for tier in RequirementTier::ordered() {
            assert!(result
                .gaps_for(tier)
                .iter()
                .all(|requirement| requirement.tier == tier));
        }
    }
}
