use super::*;
use rand::RngCore;

#[test]
fn capacity_rounds_up_to_whole_blocks() {
    assert_eq!(MemoryBlockDevice::new(15_000).total_blocks(), 4);
    assert_eq!(MemoryBlockDevice::new(BLOCK_SIZE).total_blocks(), 1);
    assert_eq!(MemoryBlockDevice::new(BLOCK_SIZE + 1).total_blocks(), 2);
}

#[test]
fn zero_bytes_still_yields_one_block() {
    assert_eq!(MemoryBlockDevice::new(0).total_blocks(), 1);
}

#[test]
fn with_blocks_matches_requested_count() {
    assert_eq!(MemoryBlockDevice::with_blocks(100).total_blocks(), 100);
}

#[test]
fn fresh_blocks_read_as_zero() {
    let dev = MemoryBlockDevice::with_blocks(3);
    let mut buf = [0xAAu8; BLOCK_SIZE];
    dev.read_block(2, &mut buf);
    assert!(buf.iter().all(|&b| b == 0));
}

#[test]
fn write_then_read_returns_same_bytes() {
    let mut dev = MemoryBlockDevice::new(15_000);
    let mut payload = [0u8; BLOCK_SIZE];
    rand::rng().fill_bytes(&mut payload);
    dev.write_block(0, &payload);

    let mut back = [b'A'; BLOCK_SIZE];
    dev.read_block(0, &mut back);
    assert_eq!(back, payload);
}

#[test]
fn writes_do_not_leak_into_neighbours() {
    let mut dev = MemoryBlockDevice::with_blocks(3);
    dev.write_block(1, &[0x5Au8; BLOCK_SIZE]);

    let mut buf = [0u8; BLOCK_SIZE];
    dev.read_block(0, &mut buf);
    assert!(buf.iter().all(|&b| b == 0));
    dev.read_block(2, &mut buf);
    assert!(buf.iter().all(|&b| b == 0));
}

fn stamp_last_block<D: BlockDevice>(mut dev: D, byte: u8) -> u32 {
    let last = dev.total_blocks() - 1;
    dev.write_block(last, &[byte; BLOCK_SIZE]);
    last
}

#[test]
fn borrowed_device_writes_through() {
    let mut dev = MemoryBlockDevice::with_blocks(2);
    let last = stamp_last_block(&mut dev, 7);
    assert_eq!(last, 1);

    let mut buf = [0u8; BLOCK_SIZE];
    dev.read_block(1, &mut buf);
    assert!(buf.iter().all(|&b| b == 7));
}

#[test]
#[should_panic(expected = "out of range")]
fn read_past_end_panics() {
    let dev = MemoryBlockDevice::with_blocks(2);
    let mut buf = [0u8; BLOCK_SIZE];
    dev.read_block(2, &mut buf);
}

#[test]
#[should_panic(expected = "out of range")]
fn write_past_end_panics() {
    let mut dev = MemoryBlockDevice::with_blocks(2);
    dev.write_block(5, &[0u8; BLOCK_SIZE]);
}
