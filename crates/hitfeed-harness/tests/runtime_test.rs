//! Runtime behavior under a scripted socket.
//!
//! # Test Strategy
//!
//! Each test drives the production [`Runtime`] cycle by cycle with a
//! [`SimDriver`] standing in for the terminal and the WebSocket:
//! 1. Script server frames, closes, and refused connects
//! 2. Step the runtime
//! 3. Verify what was sent, how often we connected, and what the App shows

use chrono::NaiveTime;
use hitfeed_app::{ACTIVITY_CAPACITY, BadgeField, ConnectionStatus, Driver, KeyInput, Runtime};
use hitfeed_client::StreamState;
use hitfeed_core::Origin;
use hitfeed_harness::{AppSnapshot, InvariantRegistry, SimDriver, SimEnv};

const SUBSCRIBE_ALL: &str = r#"{"name":"subscribe","payload":"all"}"#;
const ACK: &str = "successfully subscribed to all";

type SimRuntime = Runtime<SimDriver, SimEnv>;

fn runtime(driver: &SimDriver, env: &SimEnv) -> SimRuntime {
    Runtime::new(driver.clone(), env.clone(), Origin::default())
}

/// Start the runtime and complete the first handshake.
async fn subscribed_runtime(driver: &SimDriver, env: &SimEnv) -> SimRuntime {
    let mut rt = runtime(driver, env);
    rt.start().unwrap();
    assert!(!rt.step().await.unwrap());
    assert_eq!(driver.take_outgoing(), vec![SUBSCRIBE_ALL]);

    driver.inject_frame("");
    driver.inject_frame(ACK);
    assert!(!rt.step().await.unwrap());
    assert_eq!(rt.bridge().state(), StreamState::Subscribed);
    rt
}

/// Step until all injected input and frames are consumed.
async fn drain(rt: &mut SimRuntime, driver: &SimDriver) {
    for _ in 0..256 {
        if !driver.has_pending() {
            return;
        }
        assert!(!rt.step().await.unwrap());
    }
    panic!("runtime did not consume injected events");
}

fn feed_texts(rt: &SimRuntime) -> Vec<String> {
    rt.app().feed().events().map(|e| e.text.clone()).collect()
}

fn assert_invariants(rt: &SimRuntime, context: &str) {
    let delivered = rt.bridge().client().delivered();
    let snapshot = AppSnapshot::from_app(rt.app()).with_delivered(delivered);
    InvariantRegistry::standard().assert_all(&snapshot, context);
}

#[tokio::test]
async fn startup_connects_and_subscribes() {
    let driver = SimDriver::new();
    let env = SimEnv::default();
    let mut rt = runtime(&driver, &env);

    rt.start().unwrap();
    assert_eq!(rt.app().connection_status(), ConnectionStatus::Connecting);
    assert_eq!(driver.connect_count(), 0);

    rt.step().await.unwrap();

    assert_eq!(driver.connect_urls(), vec!["ws://localhost:8080/ws"]);
    assert_eq!(driver.take_outgoing(), vec![SUBSCRIBE_ALL]);
    assert_eq!(rt.app().connection_status(), ConnectionStatus::Subscribing);
    assert_eq!(rt.app().attempt(), 1);
    assert!(driver.render_count() > 0);
}

#[tokio::test]
async fn acknowledgment_and_noise_never_reach_feed() {
    let driver = SimDriver::new();
    let env = SimEnv::fixed(NaiveTime::from_hms_opt(7, 5, 9).unwrap());
    let mut rt = subscribed_runtime(&driver, &env).await;

    assert!(rt.app().feed().is_empty());
    assert_eq!(rt.app().connection_status(), ConnectionStatus::Live);

    driver.inject_frame("ok");
    driver.inject_frame("webklex/gohits");
    driver.inject_frame("");
    drain(&mut rt, &driver).await;

    assert_eq!(rt.app().feed().render(), vec!["07:05:09 webklex/gohits"]);
    assert_invariants(&rt, "after first delivery");
}

#[tokio::test]
async fn feed_renders_newest_first_with_capture_times() {
    let driver = SimDriver::new();
    let env = SimEnv::ticking_from(12, 0, 0);
    let mut rt = subscribed_runtime(&driver, &env).await;

    driver.inject_frame("webklex/first");
    driver.inject_frame("webklex/second");
    driver.inject_frame("webklex/third");
    drain(&mut rt, &driver).await;

    insta::assert_snapshot!(rt.app().feed().render_text(), @r"
    12:00:02 webklex/third
    12:00:01 webklex/second
    12:00:00 webklex/first
    ");
}

#[tokio::test]
async fn feed_evicts_oldest_beyond_capacity() {
    let driver = SimDriver::new();
    let env = SimEnv::default();
    let mut rt = subscribed_runtime(&driver, &env).await;

    for i in 0..20 {
        driver.inject_frame(format!("event-{i}"));
    }
    drain(&mut rt, &driver).await;

    let texts = feed_texts(&rt);
    assert_eq!(texts.len(), ACTIVITY_CAPACITY);
    assert_eq!(texts.first().map(String::as_str), Some("event-5"));
    assert_eq!(texts.last().map(String::as_str), Some("event-19"));
    assert_invariants(&rt, "after overflow");
}

#[tokio::test]
async fn server_close_reconnects_and_resubscribes() {
    let driver = SimDriver::new();
    let env = SimEnv::default();
    let mut rt = subscribed_runtime(&driver, &env).await;

    driver.inject_frame("before-close");
    driver.inject_close("server restart");
    rt.step().await.unwrap();

    assert_eq!(feed_texts(&rt), vec!["before-close"]);
    assert_eq!(driver.connect_count(), 2);
    assert_eq!(driver.take_outgoing(), vec![SUBSCRIBE_ALL]);
    assert_eq!(rt.app().connection_status(), ConnectionStatus::Subscribing);
    assert_eq!(rt.app().attempt(), 2);

    // The new socket has its own acknowledgment, which is dropped too.
    driver.inject_frame(ACK);
    driver.inject_frame("after-close");
    drain(&mut rt, &driver).await;

    assert_eq!(feed_texts(&rt), vec!["before-close", "after-close"]);
    assert_invariants(&rt, "after reconnect");
}

#[tokio::test]
async fn refused_connects_retry_once_per_cycle() {
    let driver = SimDriver::new();
    let env = SimEnv::default();
    driver.refuse_connects(3);

    let mut rt = runtime(&driver, &env);
    rt.start().unwrap();

    for expected in 1..=3 {
        rt.step().await.unwrap();
        assert_eq!(driver.connect_count(), expected);
        assert!(!driver.is_connected());
        assert!(rt.bridge().connect_pending());
        assert_eq!(rt.app().connection_status(), ConnectionStatus::Connecting);
    }

    rt.step().await.unwrap();
    assert_eq!(driver.connect_count(), 4);
    assert!(driver.is_connected());
    assert_eq!(driver.take_outgoing(), vec![SUBSCRIBE_ALL]);
    assert_eq!(rt.app().attempt(), 4);
    assert!(rt.app().status_message().is_none());
}

#[tokio::test]
async fn failed_handshake_send_reconnects() {
    let driver = SimDriver::new();
    let env = SimEnv::default();
    let mut rt = subscribed_runtime(&driver, &env).await;

    driver.inject_close("network drop");
    driver.fail_next_send();
    rt.step().await.unwrap();

    assert_eq!(driver.connect_count(), 2);
    assert!(driver.take_outgoing().is_empty());
    assert!(rt.bridge().connect_pending());

    rt.step().await.unwrap();
    assert_eq!(driver.connect_count(), 3);
    assert_eq!(driver.take_outgoing(), vec![SUBSCRIBE_ALL]);
}

#[tokio::test]
async fn badge_edits_apply_on_commit() {
    let driver = SimDriver::new();
    let env = SimEnv::default();
    let mut rt = subscribed_runtime(&driver, &env).await;

    driver.inject_key(KeyInput::End);
    for _ in 0.."webklex".len() {
        driver.inject_key(KeyInput::Backspace);
    }
    driver.inject_text("foo");
    driver.inject_key(KeyInput::Tab);
    drain(&mut rt, &driver).await;

    assert_eq!(rt.app().badge().inputs().get(BadgeField::Username), "foo");
    assert_eq!(rt.app().form().focus(), BadgeField::Repository);
    assert_eq!(
        rt.app().badge().output().markdown,
        "[![Hits](http://localhost:8080/svg/foo/gohits)](http://localhost:8080)"
    );
    assert_invariants(&rt, "after badge edit");
}

#[tokio::test]
async fn input_flows_while_handshake_is_pending() {
    let driver = SimDriver::new();
    let env = SimEnv::default();
    driver.hold_handshakes();

    let mut rt = runtime(&driver, &env);
    rt.start().unwrap();
    rt.step().await.unwrap();
    assert_eq!(driver.connect_count(), 1);
    assert_eq!(rt.app().connection_status(), ConnectionStatus::Connecting);

    driver.inject_key(KeyInput::Tab);
    rt.step().await.unwrap();
    driver.inject_key(KeyInput::Esc);
    assert!(rt.step().await.unwrap());

    assert_eq!(rt.app().form().focus(), BadgeField::Repository);
    assert_eq!(driver.connect_count(), 1);
    assert!(driver.take_outgoing().is_empty());
}

#[tokio::test]
async fn completed_handshake_subscribes() {
    let driver = SimDriver::new();
    let env = SimEnv::default();
    driver.hold_handshakes();

    let mut rt = runtime(&driver, &env);
    rt.start().unwrap();
    rt.step().await.unwrap();
    rt.step().await.unwrap();
    assert!(driver.take_outgoing().is_empty());

    driver.complete_handshake();
    rt.step().await.unwrap();

    assert_eq!(driver.take_outgoing(), vec![SUBSCRIBE_ALL]);
    assert_eq!(rt.app().connection_status(), ConnectionStatus::Subscribing);
    assert_eq!(driver.connect_count(), 1);
}

#[tokio::test]
async fn failed_handshake_retries_in_the_same_cycle() {
    let driver = SimDriver::new();
    let env = SimEnv::default();
    driver.hold_handshakes();

    let mut rt = runtime(&driver, &env);
    rt.start().unwrap();
    rt.step().await.unwrap();
    assert_eq!(driver.connect_count(), 1);

    driver.inject_close("handshake timed out");
    rt.step().await.unwrap();

    assert_eq!(driver.connect_count(), 2);
    assert!(driver.is_connected());
    assert!(!rt.bridge().connect_pending());
    assert_eq!(rt.app().connection_status(), ConnectionStatus::Connecting);
    assert_eq!(rt.app().attempt(), 2);
}

#[tokio::test]
async fn escape_stops_the_driver() {
    let driver = SimDriver::new();
    let env = SimEnv::default();
    driver.inject_key(KeyInput::Esc);

    runtime(&driver, &env).run().await.unwrap();

    assert!(driver.is_stopped());
    assert_eq!(driver.connect_count(), 0);
}

#[tokio::test]
async fn invariants_checked_on_every_render() {
    let driver = SimDriver::new().with_invariants(InvariantRegistry::standard());
    let env = SimEnv::default();
    let mut rt = subscribed_runtime(&driver, &env).await;

    for i in 0..40 {
        driver.inject_frame(format!("event-{i:02}"));
        if i % 7 == 0 {
            driver.inject_close("flap");
        }
        drain(&mut rt, &driver).await;
        driver.inject_frame(ACK);
    }
    drain(&mut rt, &driver).await;
}
