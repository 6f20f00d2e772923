#![cfg(not(feature = "hydrate"))]

use super::*;

#[test]
fn now_secs_is_after_2020() {
    assert!(now_secs() > 1_577_836_800);
}

#[test]
fn sleep_ms_completes_under_block_on() {
    futures::executor::block_on(sleep_ms(100));
}
