use mosaic_bus::transport::mock::MockTransport;
use mosaic_bus::{EventBridge, EventChannel, MessageFilter, WireEnvelope};
use mosaic_types::Message;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

const WAIT: Duration = Duration::from_secs(2);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Subscribes a collector that forwards delivered messages to an mpsc
/// receiver, so async tests can await deliveries instead of polling.
fn deliveries(channel: &EventChannel) -> mpsc::UnboundedReceiver<Message> {
    let (tx, rx) = mpsc::unbounded_channel();
    // Keep the subscription alive for the process; tests are short-lived.
    std::mem::forget(channel.subscribe(MessageFilter::any(), move |m| {
        let _ = tx.send(m.clone());
    }));
    rx
}

// ── Outward relay ───────────────────────────────────────────────

#[tokio::test]
async fn local_publish_is_mirrored_onto_transport() {
    let channel = EventChannel::new();
    let (transport, remote) = MockTransport::channel();
    let bridge = EventBridge::spawn(channel.clone(), Arc::new(transport));

    channel.emit("data_change", json!({"entity": "campaign"}), "campaign");

    let sent = timeout(WAIT, remote.next_sent()).await.unwrap().unwrap();
    assert_eq!(sent.kind, "data_change");
    assert_eq!(sent.source.as_str(), "campaign");
    assert_eq!(sent.origin, bridge.id());

    bridge.shutdown();
}

#[tokio::test]
async fn relayed_messages_are_not_mirrored_back_out() {
    let channel = EventChannel::new();
    let (transport, remote) = MockTransport::channel();
    let bridge = EventBridge::spawn(channel.clone(), Arc::new(transport));

    // A message that arrived via some relay must not leave again.
    channel.publish(Message::new("route_changed", json!("/campaign"), "shell".into()).via_relay());
    // A normal one right after should be the first thing on the wire.
    channel.emit("user_action", json!("click"), "shell");

    let sent = timeout(WAIT, remote.next_sent()).await.unwrap().unwrap();
    assert_eq!(sent.kind, "user_action");

    bridge.shutdown();
}

// ── Inward relay ────────────────────────────────────────────────

#[tokio::test]
async fn inbound_envelope_is_published_locally_tagged_as_relayed() {
    let channel = EventChannel::new();
    let mut seen = deliveries(&channel);
    let (transport, remote) = MockTransport::channel();
    let bridge = EventBridge::spawn(channel.clone(), Arc::new(transport));

    let foreign = WireEnvelope::from_message(
        &Message::new("template_selected", json!({"id": "2"}), "template".into()),
        mosaic_bus::BridgeId::new(),
    );
    remote.inject(foreign);

    let delivered = timeout(WAIT, seen.recv()).await.unwrap().unwrap();
    assert_eq!(delivered.kind, "template_selected");
    assert!(delivered.relayed);
    assert_eq!(delivered.source.as_str(), "template");

    bridge.shutdown();
}

#[tokio::test]
async fn echoed_own_envelope_is_dropped() {
    init_tracing();
    let channel = EventChannel::new();
    let mut seen = deliveries(&channel);
    let (transport, remote) = MockTransport::channel();
    let bridge = EventBridge::spawn(channel.clone(), Arc::new(transport));

    channel.emit("data_change", json!(1), "campaign");
    // Local subscriber sees the original publish once.
    let original = timeout(WAIT, seen.recv()).await.unwrap().unwrap();
    assert!(!original.relayed);

    // The transport echoes our own envelope straight back.
    let echoed = timeout(WAIT, remote.next_sent()).await.unwrap().unwrap();
    remote.inject(echoed);

    // Then a sentinel from elsewhere; if the echo had been re-published we
    // would see it before the sentinel.
    let sentinel = WireEnvelope::from_message(
        &Message::new("sentinel", json!(null), "other".into()),
        mosaic_bus::BridgeId::new(),
    );
    remote.inject(sentinel);

    let next = timeout(WAIT, seen.recv()).await.unwrap().unwrap();
    assert_eq!(next.kind, "sentinel");
    assert_eq!(bridge.dropped_echoes(), 1);

    bridge.shutdown();
}

// ── Two bridges over a shared transport ─────────────────────────

#[tokio::test]
async fn paired_bridges_exchange_messages_without_loops() {
    init_tracing();
    let shell_channel = EventChannel::new();
    let fragment_channel = EventChannel::new();
    let mut fragment_seen = deliveries(&fragment_channel);
    let mut shell_seen = deliveries(&shell_channel);

    let (shell_side, fragment_side) = MockTransport::pair();
    let shell_bridge = EventBridge::spawn(shell_channel.clone(), Arc::new(shell_side));
    let fragment_bridge = EventBridge::spawn(fragment_channel.clone(), Arc::new(fragment_side));

    shell_channel.emit("route_changed", json!("/template"), "shell");
    let got = timeout(WAIT, fragment_seen.recv()).await.unwrap().unwrap();
    assert_eq!(got.kind, "route_changed");
    assert!(got.relayed);

    fragment_channel.emit("data_change", json!({"op": "create"}), "template");
    // The fragment channel delivers its own publish synchronously.
    let own_publish = timeout(WAIT, fragment_seen.recv()).await.unwrap().unwrap();
    assert_eq!(own_publish.kind, "data_change");
    assert!(!own_publish.relayed);

    // Shell sees its own route_changed publish first, then the reply.
    let own = timeout(WAIT, shell_seen.recv()).await.unwrap().unwrap();
    assert_eq!(own.kind, "route_changed");
    let reply = timeout(WAIT, shell_seen.recv()).await.unwrap().unwrap();
    assert_eq!(reply.kind, "data_change");
    assert!(reply.relayed);

    // Relayed deliveries never bounce back: nothing further arrives.
    assert!(timeout(Duration::from_millis(200), fragment_seen.recv())
        .await
        .is_err());

    shell_bridge.shutdown();
    fragment_bridge.shutdown();
}
