//! Lifetime Tests - Remote Reference Counting and Teardown
//!
//! Many callers share one stub's reference count. These tests exercise the
//! count under concurrency and pin the teardown contract: the release that
//! reaches zero detaches the target exactly once, and later calls answer
//! a not-connected status instead of touching a dead object.

mod common;

use bytes::Bytes;
use futures::future::join_all;

use common::*;
use orpc_bridge::appsupport::APP_SUPPORT_IID;
use orpc_bridge::types::hresult;
use orpc_bridge::BridgeError;

#[tokio::test]
async fn add_ref_and_release_track_the_stub_count() {
    let pair = app_support_pair();

    assert_eq!(pair.proxy.add_ref(1).await.unwrap(), 2);
    assert_eq!(pair.proxy.add_ref(4).await.unwrap(), 6);
    assert_eq!(pair.proxy.release(3).await.unwrap(), 3);
    assert_eq!(pair.stub.refs().count(), 3);
    assert!(pair.stub.is_connected());
}

#[tokio::test]
async fn last_release_detaches_the_target() {
    let pair = app_support_pair();

    pair.proxy.add_ref(1).await.unwrap();
    assert_eq!(pair.proxy.release(2).await.unwrap(), 0);

    assert!(!pair.stub.is_connected());
}

#[tokio::test]
async fn calls_after_teardown_answer_not_connected() {
    let pair = app_support_pair();
    pair.proxy.release(1).await.unwrap();
    assert!(!pair.stub.is_connected());

    let err = pair
        .proxy
        .query_interface(APP_SUPPORT_IID)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Fault(hresult::CO_E_OBJNOTCONNECTED)
    ));

    let err = pair.proxy.add_ref(1).await.unwrap_err();
    assert!(matches!(
        err,
        BridgeError::Fault(hresult::CO_E_OBJNOTCONNECTED)
    ));
}

#[tokio::test]
async fn releasing_past_zero_saturates() {
    let pair = app_support_pair();

    assert_eq!(pair.proxy.release(10).await.unwrap(), 0);
    assert_eq!(pair.proxy.release(1).await.unwrap(), 0);
    assert_eq!(pair.stub.refs().count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_holders_never_lose_references() {
    let pair = app_support_pair();

    // 16 concurrent holders each take and drop 8 references
    let acquires = (0..16).map(|_| {
        let proxy = pair.proxy.clone();
        async move {
            for _ in 0..8 {
                proxy.add_ref(1).await.unwrap();
            }
        }
    });
    join_all(acquires).await;
    assert_eq!(pair.stub.refs().count(), 129);

    let releases = (0..16).map(|_| {
        let proxy = pair.proxy.clone();
        async move {
            for _ in 0..8 {
                proxy.release(1).await.unwrap();
            }
        }
    });
    join_all(releases).await;

    // Only the exporter's own reference remains; the object stays live.
    assert_eq!(pair.stub.refs().count(), 1);
    assert!(pair.stub.is_connected());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_custom_calls_all_reach_the_target() {
    let iid = orpc_bridge::Guid::generate();
    let pair = pair_for(synthetic_descriptor(iid, 1), iid);

    let calls = (0..64).map(|i| {
        let proxy = pair.proxy.clone();
        async move {
            let payload = Bytes::from(vec![i as u8; 16]);
            let reply = proxy.call(7, payload.clone()).await.unwrap();
            assert_eq!(reply.payload, payload);
        }
    });
    join_all(calls).await;

    assert_eq!(pair.target.call_count(), 64);
}
