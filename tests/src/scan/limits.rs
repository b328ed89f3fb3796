use std::sync::{Arc, Mutex};
use std::time::Duration;

use sglobal_common::exclusion::ExclusionSet;
use sglobal_core::{CallGuard, ScanError, ScanOrchestrator};
use tokio_util::sync::CancellationToken;

use crate::fake::{FakePage, FakeProvider, open};

#[tokio::test]
async fn cancellation_aborts_the_whole_run() {
    let provider = FakeProvider::new(None)
        .with_regions(Some(&["us-east-1", "eu-west-1"]))
        .with_pages("us-east-1", vec![FakePage::Ready(vec![open("sg-1")])])
        .with_pages("eu-west-1", vec![FakePage::Hang]);

    let cancel = CancellationToken::new();
    let orchestrator = ScanOrchestrator::new(Box::new(provider.clone()))
        .with_guard(CallGuard::new(cancel.clone(), None));

    let trigger = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        cancel.cancel();
    });

    let err = orchestrator.run("all", &ExclusionSet::new()).await.unwrap_err();
    assert!(matches!(err, ScanError::Cancelled));
    trigger.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn timeout_applies_to_each_call() {
    let provider = FakeProvider::new(Some("us-east-1")).with_pages(
        "us-east-1",
        vec![FakePage::Ready(vec![open("sg-1")]), FakePage::Hang],
    );

    let orchestrator = ScanOrchestrator::new(Box::new(provider.clone()))
        .with_guard(CallGuard::new(CancellationToken::new(), Some(Duration::from_secs(30))));

    let err = orchestrator.run("", &ExclusionSet::new()).await.unwrap_err();
    match err {
        ScanError::Timeout { operation, after } => {
            assert_eq!(operation, "describe security groups in us-east-1 (page 2)");
            assert_eq!(after, Duration::from_secs(30));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn progress_callback_sees_every_region_in_order() {
    let provider = FakeProvider::new(None)
        .with_regions(Some(&["us-east-1", "eu-west-1"]))
        .with_pages("us-east-1", vec![FakePage::Ready(vec![open("sg-1")])]);

    let seen: Arc<Mutex<Vec<(String, usize, usize)>>> = Arc::default();
    let sink = seen.clone();
    let orchestrator = ScanOrchestrator::new(Box::new(provider))
        .on_region(Box::new(move |region, idx, total| {
            sink.lock().unwrap().push((region.to_string(), idx, total));
        }));

    orchestrator.run("all", &ExclusionSet::new()).await.unwrap();
    assert_eq!(
        *seen.lock().unwrap(),
        vec![("us-east-1".to_string(), 0, 2), ("eu-west-1".to_string(), 1, 2)]
    );
}
