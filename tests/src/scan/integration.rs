use sglobal_common::exclusion::ExclusionSet;
use sglobal_core::{RegionSelector, ScanError, ScanOrchestrator};

use crate::fake::{FakePage, FakeProvider, entry, group, open, scoped};

fn orchestrator(provider: &FakeProvider) -> ScanOrchestrator {
    ScanOrchestrator::new(Box::new(provider.clone()))
}

fn pair(region: &str, id: &str) -> (String, String) {
    (region.to_string(), id.to_string())
}

fn ids(results: &[sglobal_common::models::SecurityGroupResult]) -> Vec<(String, String)> {
    results
        .iter()
        .map(|r| (r.region.clone(), r.security_group_id.clone()))
        .collect()
}

#[tokio::test]
async fn empty_target_scans_session_region() {
    let provider = FakeProvider::new(Some("us-east-1"))
        .with_regions(Some(&["us-east-1", "eu-west-1"]))
        .with_pages("us-east-1", vec![FakePage::Ready(vec![open("sg-1")])]);

    let results = orchestrator(&provider)
        .run("", &ExclusionSet::new())
        .await
        .unwrap();

    assert_eq!(ids(&results), vec![pair("us-east-1", "sg-1")]);
    assert_eq!(provider.calls(), vec!["inventory us-east-1", "list_page us-east-1 0"]);
}

#[tokio::test]
async fn empty_target_without_session_region_fails() {
    let provider = FakeProvider::new(None);

    let err = orchestrator(&provider)
        .run("", &ExclusionSet::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ScanError::Session(_)));
    assert!(provider.calls().is_empty());
}

#[tokio::test]
async fn named_target_scans_exactly_that_region() {
    let provider = FakeProvider::new(Some("us-east-1"))
        .with_pages("eu-west-1", vec![FakePage::Ready(vec![open("sg-eu")])]);

    let orchestrator = orchestrator(&provider);
    let regions = orchestrator
        .resolve_regions(&RegionSelector::from("eu-west-1"))
        .await
        .unwrap();
    assert_eq!(regions, vec!["eu-west-1"]);

    let results = orchestrator.run("eu-west-1", &ExclusionSet::new()).await.unwrap();
    assert_eq!(ids(&results), vec![pair("eu-west-1", "sg-eu")]);
    assert!(!provider.calls().iter().any(|c| c.contains("us-east-1")));
}

#[tokio::test]
async fn all_target_follows_enumeration_order() {
    let provider = FakeProvider::new(Some("us-east-1"))
        .with_regions(Some(&["eu-north-1", "ap-south-1", "us-east-1"]))
        .with_pages("eu-north-1", vec![FakePage::Ready(vec![open("sg-n1"), open("sg-n2")])])
        .with_pages("ap-south-1", vec![FakePage::Ready(vec![scoped("sg-ap")])])
        .with_pages("us-east-1", vec![FakePage::Ready(vec![open("sg-us")])]);

    let results = orchestrator(&provider)
        .run("all", &ExclusionSet::new())
        .await
        .unwrap();

    assert_eq!(
        ids(&results),
        vec![
            pair("eu-north-1", "sg-n1"),
            pair("eu-north-1", "sg-n2"),
            pair("us-east-1", "sg-us"),
        ]
    );
    assert_eq!(
        provider.calls(),
        vec![
            "list_regions",
            "inventory eu-north-1",
            "list_page eu-north-1 0",
            "inventory ap-south-1",
            "list_page ap-south-1 0",
            "inventory us-east-1",
            "list_page us-east-1 0",
        ]
    );
}

#[tokio::test]
async fn failed_enumeration_fails_the_run() {
    let provider = FakeProvider::new(Some("us-east-1")).with_regions(None);

    let err = orchestrator(&provider)
        .run("all", &ExclusionSet::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ScanError::RegionEnumeration(_)));
    assert_eq!(err.to_string(), "failed to get regions: UnauthorizedOperation");
    assert_eq!(provider.calls(), vec!["list_regions"]);
}

#[tokio::test]
async fn failed_middle_page_returns_no_results() {
    let provider = FakeProvider::new(Some("us-east-1")).with_pages(
        "us-east-1",
        vec![
            FakePage::Ready(vec![open("sg-1")]),
            FakePage::Fail("RequestLimitExceeded".into()),
            FakePage::Ready(vec![open("sg-3")]),
        ],
    );

    let err = orchestrator(&provider)
        .run("", &ExclusionSet::new())
        .await
        .unwrap_err();

    match err {
        ScanError::Inventory { region, .. } => assert_eq!(region, "us-east-1"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!provider.calls().contains(&"list_page us-east-1 2".to_string()));
}

#[tokio::test]
async fn failed_region_discards_earlier_regions() {
    let provider = FakeProvider::new(None)
        .with_regions(Some(&["us-east-1", "us-west-2", "eu-west-1"]))
        .with_pages("us-east-1", vec![FakePage::Ready(vec![open("sg-1")])])
        .with_pages("us-west-2", vec![FakePage::Fail("AuthFailure".into())])
        .with_pages("eu-west-1", vec![FakePage::Ready(vec![open("sg-3")])]);

    let err = orchestrator(&provider)
        .run("all", &ExclusionSet::new())
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "failed to describe security groups in region us-west-2: AuthFailure"
    );
    assert!(!provider.calls().contains(&"inventory eu-west-1".to_string()));
}

#[tokio::test]
async fn excluded_groups_never_appear() {
    let provider = FakeProvider::new(Some("us-east-1")).with_pages(
        "us-east-1",
        vec![
            FakePage::Ready(vec![open("sg-keep"), open("sg-skip")]),
            FakePage::Ready(vec![open("sg-skip-too")]),
        ],
    );
    let exclusions = ExclusionSet::parse("# reviewed\nsg-skip\nsg-skip-too\n");

    let results = orchestrator(&provider).run("", &exclusions).await.unwrap();
    assert_eq!(ids(&results), vec![pair("us-east-1", "sg-keep")]);
}

#[tokio::test]
async fn groups_without_risky_rules_are_omitted() {
    let provider = FakeProvider::new(Some("us-east-1")).with_pages(
        "us-east-1",
        vec![FakePage::Ready(vec![
            scoped("sg-private"),
            group("sg-empty", vec![]),
            group("sg-loopback", vec![entry(80, &["127.0.0.1/32"], &["::1/128"], &[])]),
        ])],
    );

    let results = orchestrator(&provider)
        .run("", &ExclusionSet::new())
        .await
        .unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn rules_and_ranges_keep_discovery_order() {
    let provider = FakeProvider::new(Some("us-east-1")).with_pages(
        "us-east-1",
        vec![FakePage::Ready(vec![group(
            "sg-mixed",
            vec![
                entry(443, &["10.0.0.0/8", "0.0.0.0/0"], &["::/0"], &["pl-12345"]),
                entry(5432, &["172.16.0.0/12"], &[], &[]),
                entry(8080, &[], &[], &["pl-67890"]),
            ],
        )])],
    );

    let results = orchestrator(&provider)
        .run("", &ExclusionSet::new())
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    let rules = &results[0].risky_rules;
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].from_port, Some(443));
    assert_eq!(rules[0].cidr_blocks, vec!["0.0.0.0/0", "::/0", "prefix:pl-12345"]);
    assert_eq!(rules[1].from_port, Some(8080));
    assert_eq!(rules[1].cidr_blocks, vec!["prefix:pl-67890"]);
}

#[tokio::test]
async fn repeated_scans_are_identical() {
    let provider = FakeProvider::new(Some("us-east-1")).with_pages(
        "us-east-1",
        vec![
            FakePage::Ready(vec![open("sg-1"), scoped("sg-2")]),
            FakePage::Ready(vec![group("sg-3", vec![entry(3389, &["203.0.113.0/24"], &[], &[])])]),
        ],
    );
    let orchestrator = orchestrator(&provider);

    let first = orchestrator.run("", &ExclusionSet::new()).await.unwrap();
    let second = orchestrator.run("", &ExclusionSet::new()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
}
