//! App-Support Bridge Demo
//!
//! Exports a stub for the app-support interface, binds a proxy to it over
//! the in-process loopback, and walks the base-capability operations:
//! identity negotiation, reference counting, and teardown on last release.
//!
//! Run with: cargo run -p appsupport-demo -- --refs 3

use std::sync::Arc;

use bytes::Bytes;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use orpc_bridge::appsupport::{self, APP_SUPPORT_IID, DISPATCH_IID};
use orpc_bridge::{
    BridgedObject, CallFuture, Guid, InterfaceProxy, LoopbackTransport, RuntimeVersion,
    StubDispatcher, TransferSyntax,
};

#[derive(Parser)]
#[command(name = "appsupport-demo")]
#[command(about = "App-Support Bridge Demo")]
struct Args {
    /// Number of remote references to take before releasing
    #[arg(short, long, default_value = "3")]
    refs: u32,

    /// Host runtime tier, as major.minor
    #[arg(long, default_value = "6.0")]
    host: String,
}

/// Stand-in for the speech engine's app-support object
struct AppSupportTarget;

impl BridgedObject for AppSupportTarget {
    fn supported_interfaces(&self) -> Vec<Guid> {
        vec![APP_SUPPORT_IID, DISPATCH_IID]
    }

    fn invoke(&self, _iid: &Guid, _ordinal: u16, payload: Bytes) -> CallFuture {
        Box::pin(async move { Ok(payload) })
    }
}

fn parse_host(s: &str) -> Option<RuntimeVersion> {
    let (major, minor) = s.split_once('.')?;
    Some(RuntimeVersion::new(
        major.parse().ok()?,
        minor.parse().ok()?,
    ))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let host = parse_host(&args.host).ok_or("host must be major.minor")?;

    info!(%host, "building interface registry");
    let registry = appsupport::registry(host)?;

    let stub = StubDispatcher::new(registry.clone(), Arc::new(AppSupportTarget));
    let transport = LoopbackTransport::bind(stub.clone(), TransferSyntax::NDR)?;
    let proxy = InterfaceProxy::new(&registry, APP_SUPPORT_IID, transport)?;

    info!(
        iid = %proxy.iid(),
        slots = proxy.slot_count(),
        "proxy bound over loopback"
    );

    let supported = proxy.query_interface(APP_SUPPORT_IID).await?;
    info!(supported, "query_interface({})", APP_SUPPORT_IID);

    let stranger = Guid::generate();
    let supported = proxy.query_interface(stranger).await?;
    info!(supported, "query_interface({})", stranger);

    let count = proxy.add_ref(args.refs).await?;
    info!(count, "took {} remote references", args.refs);

    // Release everything, including the exporter's own reference
    let remaining = proxy.release(count).await?;
    info!(
        remaining,
        connected = stub.is_connected(),
        "released all references"
    );

    info!("demo complete");
    Ok(())
}
