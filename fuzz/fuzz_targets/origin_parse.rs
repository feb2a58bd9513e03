//! Fuzz target for Origin::parse
//!
//! Feeds arbitrary strings to the origin parser and checks that every
//! accepted origin derives endpoints consistently.
//!
//! # Invariants
//!
//! - Parsing NEVER panics
//! - An accepted origin survives a display/parse cycle unchanged
//! - The stream URL uses `ws` for `http` and `wss` for `https`
//! - Both endpoints share the origin's authority

#![no_main]

use hitfeed_core::{Origin, Scheme};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: &str| {
    let Ok(origin) = Origin::parse(input) else {
        return;
    };

    let reparsed = Origin::parse(&origin.to_string()).expect("displayed origin must parse");
    assert_eq!(reparsed, origin);

    let stream_url = origin.stream_url();
    let prefix = match origin.scheme() {
        Scheme::Http => "ws://",
        Scheme::Https => "wss://",
    };
    assert!(stream_url.starts_with(prefix), "{stream_url} for {origin}");
    assert!(stream_url.contains(&origin.authority()));
    assert!(origin.badge_url("u", "r").starts_with(&origin.to_string()));
});
