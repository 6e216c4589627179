use atomcell::{
    AtomicBool, AtomicChar, AtomicF32, AtomicI32, AtomicRef, AtomicU64, AtomicUsize, Identity,
    Padded,
};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn cells_are_send_and_sync() {
    assert_send_sync::<AtomicBool>();
    assert_send_sync::<AtomicChar>();
    assert_send_sync::<AtomicF32>();
    assert_send_sync::<AtomicI32>();
    assert_send_sync::<AtomicU64>();
    assert_send_sync::<AtomicUsize>();
    assert_send_sync::<AtomicRef<String>>();
    assert_send_sync::<AtomicRef<Identity<Vec<u8>>>>();
    assert_send_sync::<Padded<AtomicU64>>();
    assert_send_sync::<Padded<AtomicRef<String>>>();
}
