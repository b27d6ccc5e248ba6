//! Fuzz target for channel payload decoding
//!
//! The decoder takes whatever the messaging SDK delivers, so it must accept
//! arbitrary bytes without panicking. Anything it accepts must survive an
//! encode/decode round trip unchanged.

#![no_main]

use libfuzzer_sys::fuzz_target;
use liveroom_session::signal;

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };

    // Decoding must never panic, only return Err for malformed payloads.
    let Ok(message) = signal::decode(json) else {
        return;
    };

    let encoded = signal::encode(&message).expect("decoded message re-encodes");
    let reparsed = signal::decode(&encoded).expect("encoded message re-decodes");
    assert_eq!(message, reparsed);
});
