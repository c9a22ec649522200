//! Fuzz target: `OutputStateBank::set_mode`
//!
//! Interprets the input as (channel, mode) byte pairs applied to a bank
//! seeded from the first four bytes, and asserts that each update changes
//! only the targeted 2-bit field.
//!
//! cargo fuzz run fuzz_output_state

#![no_main]

use libfuzzer_sys::fuzz_target;
use tlc59116::drivers::tlc59116::{Channel, OutputMode, OutputStateBank};

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    let (seed, ops) = data.split_at(4);
    let mut bank = OutputStateBank::from_bytes([seed[0], seed[1], seed[2], seed[3]]);

    for pair in ops.chunks_exact(2) {
        let Ok(channel) = Channel::new(pair[0]) else {
            assert!(pair[0] >= Channel::COUNT, "valid index rejected");
            continue;
        };
        let mode = OutputMode::from_code(pair[1]);
        let before = bank.bytes();
        bank.set_mode(channel, mode);
        let after = bank.bytes();

        assert_eq!(bank.mode(channel), mode);
        let mask = 0b11u8 << channel.bit_position();
        for (i, (b, a)) in before.iter().zip(after.iter()).enumerate() {
            if i == channel.bank_index() {
                assert_eq!(b & !mask, a & !mask, "sibling bits disturbed");
            } else {
                assert_eq!(b, a, "other LEDOUT byte disturbed");
            }
        }
    }
});
