//! Round-Trip Tests - Proxy/Stub Delegation Transparency
//!
//! Invoking a base ordinal through the proxy must be observably equivalent
//! to handing the same request to the stub directly: the loopback transport
//! and the frame codec add nothing and lose nothing.

mod common;

use bytes::{Buf, BufMut, Bytes, BytesMut};

use common::*;
use orpc_bridge::appsupport::APP_SUPPORT_IID;
use orpc_bridge::descriptor::ordinal;
use orpc_bridge::types::hresult;
use orpc_bridge::{CallRequest, Guid};

fn encode_iid(iid: Guid) -> Bytes {
    let mut buf = BytesMut::new();
    iid.encode(&mut buf, true);
    buf.freeze()
}

#[tokio::test]
async fn query_interface_through_proxy_matches_direct_dispatch() {
    let via_proxy = app_support_pair();
    let direct = app_support_pair();

    let through = via_proxy
        .proxy
        .call(ordinal::QUERY_INTERFACE, encode_iid(APP_SUPPORT_IID))
        .await
        .unwrap();

    let request = CallRequest::new(
        APP_SUPPORT_IID,
        ordinal::QUERY_INTERFACE,
        encode_iid(APP_SUPPORT_IID),
    );
    let straight = direct.stub.dispatch(request).await.unwrap();

    assert_eq!(through.status, straight.status);
    assert_eq!(through.payload, straight.payload);
}

#[tokio::test]
async fn reference_counts_agree_between_proxy_and_direct_paths() {
    let via_proxy = app_support_pair();
    let direct = app_support_pair();

    // Same operation sequence down both paths
    let proxied = [
        via_proxy.proxy.add_ref(2).await.unwrap(),
        via_proxy.proxy.add_ref(3).await.unwrap(),
        via_proxy.proxy.release(4).await.unwrap(),
    ];

    let mut directed = Vec::new();
    for (ord, count) in [
        (ordinal::ADD_REF, 2u32),
        (ordinal::ADD_REF, 3),
        (ordinal::RELEASE, 4),
    ] {
        let mut payload = BytesMut::new();
        payload.put_u32_le(count);
        let request = CallRequest::new(APP_SUPPORT_IID, ord, payload.freeze());
        let mut reply = direct.stub.dispatch(request).await.unwrap().payload;
        directed.push(reply.get_u32_le());
    }

    assert_eq!(proxied.as_slice(), directed.as_slice());
    assert_eq!(via_proxy.stub.refs().count(), direct.stub.refs().count());
}

#[tokio::test]
async fn dispatch_capability_slots_report_unimplemented_through_the_proxy() {
    let pair = app_support_pair();

    for ord in [
        ordinal::GET_TYPE_INFO_COUNT,
        ordinal::GET_TYPE_INFO,
        ordinal::GET_IDS_OF_NAMES,
        ordinal::INVOKE,
    ] {
        let reply = pair.proxy.call(ord, Bytes::new()).await.unwrap();
        assert_eq!(reply.status, hresult::E_NOTIMPL, "ordinal {ord}");
        assert!(reply.payload.is_empty());
    }
}

#[tokio::test]
async fn custom_slot_payload_survives_the_round_trip_verbatim() {
    let iid = Guid::generate();
    let pair = pair_for(synthetic_descriptor(iid, 1), iid);

    let payload = Bytes::from(vec![0xa5; 4096]);
    let reply = pair.proxy.call(7, payload.clone()).await.unwrap();

    assert!(reply.succeeded());
    assert_eq!(reply.payload, payload);
    assert_eq!(pair.target.invoked_ordinals(), vec![7]);
}

#[tokio::test]
async fn query_interface_convenience_wrapper() {
    let pair = app_support_pair();

    assert!(pair.proxy.query_interface(APP_SUPPORT_IID).await.unwrap());
    assert!(!pair.proxy.query_interface(Guid::generate()).await.unwrap());
}

#[tokio::test]
async fn causality_ids_differ_per_logical_call() {
    let a = CallRequest::new(APP_SUPPORT_IID, 0, Bytes::new());
    let b = CallRequest::new(APP_SUPPORT_IID, 0, Bytes::new());
    assert_ne!(a.causality, b.causality);
}
