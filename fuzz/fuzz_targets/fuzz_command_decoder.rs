//! Fuzz target: `CommandDecoder::feed`
//!
//! Drives arbitrary byte sequences into the streaming command decoder and
//! asserts that it never panics, never yields more arguments than a frame
//! holds, and recovers cleanly after a reset.
//!
//! cargo fuzz run fuzz_command_decoder

#![no_main]

use libfuzzer_sys::fuzz_target;
use pinbridge::app::commands::MAX_ARGS;
use pinbridge::protocol::codec::CommandDecoder;

fuzz_target!(|data: &[u8]| {
    let mut decoder = CommandDecoder::new();

    let mut frames = 0usize;
    decoder.feed(data, |frame| {
        assert!(frame.args.len() <= MAX_ARGS, "frame exceeds MAX_ARGS");
        frames += 1;
    });
    let separators = data.iter().filter(|&&b| b == b';').count();
    assert!(frames <= separators, "decoder yielded a frame without ';'");

    // After a reset a plain version request must decode again.
    decoder.reset();
    let mut version = None;
    decoder.feed(b"1;", |frame| version = frame.code);
    assert_eq!(version, Some(1));
});
