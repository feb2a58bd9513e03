//! Property-based tests for the stream client state machine.
//!
//! Arbitrary transport event sequences are fed through the client and checked
//! against a simple model of what must be delivered.

use hitfeed_client::{
    ClientError, MAX_NOISE_LEN, Origin, StreamAction, StreamClient, StreamEvent, StreamState,
};
use proptest::prelude::*;

/// Generate random transport events, biased towards frames.
fn event_strategy() -> impl Strategy<Value = StreamEvent> {
    prop_oneof![
        2 => Just(StreamEvent::Opened),
        1 => "[a-z ]{0,12}".prop_map(|reason| StreamEvent::Closed { reason }),
        3 => "[a-z0-9/]{0,3}".prop_map(StreamEvent::FrameReceived),
        6 => "[a-z0-9/]{4,24}".prop_map(StreamEvent::FrameReceived),
    ]
}

fn is_substantive(text: &str) -> bool {
    text.encode_utf16().count() > MAX_NOISE_LEN
}

fn client() -> StreamClient {
    let mut client = StreamClient::new(&Origin::default());
    client.start();
    client
}

proptest! {
    #[test]
    fn prop_only_post_ack_substantive_frames_delivered(
        events in prop::collection::vec(event_strategy(), 0..80),
    ) {
        let mut client = client();
        let mut expected = Vec::new();
        let mut delivered = Vec::new();

        // Model: after each successful open, the first substantive frame is
        // swallowed and the rest are delivered until the next close.
        let mut awaiting_ack = false;
        let mut subscribed = false;

        for event in events {
            match &event {
                StreamEvent::Opened if client.state() == StreamState::Connecting => {
                    awaiting_ack = true;
                    subscribed = false;
                },
                StreamEvent::Closed { .. } => {
                    awaiting_ack = false;
                    subscribed = false;
                },
                StreamEvent::FrameReceived(text) if is_substantive(text) => {
                    if subscribed {
                        expected.push(text.clone());
                    } else if awaiting_ack {
                        awaiting_ack = false;
                        subscribed = true;
                    }
                },
                _ => {},
            }

            if let Ok(actions) = client.handle(event) {
                for action in actions {
                    if let StreamAction::Deliver(text) = action {
                        delivered.push(text);
                    }
                }
            }
        }

        prop_assert!(delivered.iter().all(|text| is_substantive(text)));
        prop_assert_eq!(delivered.len() as u64, client.delivered());
        prop_assert_eq!(delivered, expected);
    }

    #[test]
    fn prop_close_always_reconnects(
        events in prop::collection::vec(event_strategy(), 0..40),
        reason in "[a-z ]{0,12}",
    ) {
        let mut client = client();
        for event in events {
            let _ = client.handle(event);
        }

        let before = client.attempt();
        let actions = client.handle(StreamEvent::Closed { reason }).unwrap();

        prop_assert_eq!(client.state(), StreamState::Connecting);
        prop_assert_eq!(client.attempt(), before + 1);
        prop_assert_eq!(actions.len(), 3);
        let connects_to_stream = matches!(
            actions.last(),
            Some(StreamAction::Connect { url }) if url == client.url()
        );
        prop_assert!(connects_to_stream);
    }

    #[test]
    fn prop_noise_never_changes_state(
        events in prop::collection::vec(event_strategy(), 0..40),
        noise in "[a-z0-9]{0,3}",
    ) {
        let mut client = client();
        for event in events {
            let _ = client.handle(event);
        }

        let state = client.state();
        let actions = client.handle(StreamEvent::FrameReceived(noise)).unwrap();

        prop_assert!(actions.is_empty());
        prop_assert_eq!(client.state(), state);
    }

    #[test]
    fn prop_rejected_events_leave_state_unchanged(
        events in prop::collection::vec(event_strategy(), 0..40),
    ) {
        let mut client = client();
        for event in events {
            let state = client.state();
            let attempt = client.attempt();

            if let Err(err) = client.handle(event) {
                let expected_kind = matches!(
                    err,
                    ClientError::InvalidState { .. } | ClientError::UnexpectedFrame { .. }
                );
                prop_assert!(expected_kind, "unexpected error: {}", err);
                prop_assert_eq!(client.state(), state);
                prop_assert_eq!(client.attempt(), attempt);
            }
        }
    }
}
