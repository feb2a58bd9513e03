//! Fuzz target for the StreamClient state machine
//!
//! Drives the client with arbitrary event sequences, the way a misbehaving
//! transport or server might.
//!
//! # Strategy
//!
//! - Opens: expected after Connect, duplicated, or out of order
//! - Frames: noise, acknowledgments, and activity in any state
//! - Closes: at any point, including before the first open
//!
//! # Invariants
//!
//! - Handling NEVER panics
//! - A close always ends in `Connecting` with a new attempt and a Connect
//! - Noise frames never change state or produce actions
//! - A rejected event leaves the state unchanged
//! - Deliveries only happen while subscribed

#![no_main]

use arbitrary::Arbitrary;
use hitfeed_client::{MAX_NOISE_LEN, StreamAction, StreamClient, StreamEvent, StreamState};
use hitfeed_core::Origin;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Clone, Arbitrary)]
enum Op {
    Opened,
    Frame(String),
    Close,
    Restart,
}

fuzz_target!(|ops: Vec<Op>| {
    let mut client = StreamClient::new(&Origin::default());
    client.start();

    for op in ops {
        let before = client.state();
        let attempt = client.attempt();

        match op {
            Op::Restart => {
                let actions = client.start();
                assert_eq!(client.state(), StreamState::Connecting);
                assert!(matches!(actions.last(), Some(StreamAction::Connect { .. })));
            },
            Op::Close => {
                let actions = client
                    .handle(StreamEvent::Closed { reason: "fuzz".to_string() })
                    .expect("close is valid in every state");
                assert_eq!(client.state(), StreamState::Connecting);
                assert_eq!(client.attempt(), attempt + 1);
                assert!(matches!(actions.last(), Some(StreamAction::Connect { .. })));
            },
            Op::Opened => match client.handle(StreamEvent::Opened) {
                Ok(_) => assert_eq!(before, StreamState::Connecting),
                Err(_) => assert_eq!(client.state(), before),
            },
            Op::Frame(text) => {
                let noise = text.encode_utf16().count() <= MAX_NOISE_LEN;
                match client.handle(StreamEvent::FrameReceived(text.clone())) {
                    Ok(actions) => {
                        if noise {
                            assert!(actions.is_empty());
                            assert_eq!(client.state(), before);
                        }
                        for action in actions {
                            if let StreamAction::Deliver(delivered) = action {
                                assert_eq!(before, StreamState::Subscribed);
                                assert_eq!(delivered, text);
                            }
                        }
                    },
                    Err(_) => assert_eq!(client.state(), before),
                }
            },
        }
    }
});
