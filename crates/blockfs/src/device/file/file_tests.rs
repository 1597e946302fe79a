use super::*;
use rand::RngCore;
use tempfile::{NamedTempFile, TempDir};

const BLOCKS: u32 = 16;

#[test]
fn open_creates_and_sizes_image() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("disk.img");

    let dev = FileBlockDevice::open(&path, BLOCKS).expect("open");
    assert!(dev.created(), "missing image must be reported as created");
    assert_eq!(dev.total_blocks(), BLOCKS);
    assert_eq!(dev.path(), path.as_path());
    let meta = std::fs::metadata(&path).expect("metadata");
    assert_eq!(meta.len(), u64::from(BLOCKS) * BLOCK_SIZE as u64);
}

#[test]
fn resizing_a_populated_image_keeps_its_prefix() {
    let tf = NamedTempFile::new().expect("tempfile");
    let mut payload = vec![0u8; 2 * BLOCK_SIZE];
    rand::rng().fill_bytes(&mut payload);
    std::fs::write(tf.path(), &payload).expect("write");

    let dev = FileBlockDevice::open(tf.path(), BLOCKS).expect("open");
    assert!(!dev.created(), "populated image must not be reported as created");
    assert_eq!(dev.total_blocks(), BLOCKS);

    let mut buf = [0u8; BLOCK_SIZE];
    dev.read_block(1, &mut buf);
    assert_eq!(&buf[..], &payload[BLOCK_SIZE..]);
    dev.read_block(2, &mut buf);
    assert!(buf.iter().all(|&b| b == 0));
}

#[test]
fn empty_existing_file_counts_as_created() {
    let tf = NamedTempFile::new().expect("tmp file");
    let dev = FileBlockDevice::open(tf.path(), BLOCKS).expect("open");
    assert!(dev.created());
}

#[test]
fn zero_blocks_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    assert!(FileBlockDevice::open(dir.path().join("disk.img"), 0).is_err());
}

#[test]
fn fresh_image_reads_as_zero() {
    let tf = NamedTempFile::new().expect("tmp file");
    let dev = FileBlockDevice::open(tf.path(), BLOCKS).expect("open");

    let mut buf = [0xAAu8; BLOCK_SIZE];
    dev.read_block(BLOCKS - 1, &mut buf);
    assert!(buf.iter().all(|&b| b == 0));
}

#[test]
fn blocks_survive_reopen() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("disk.img");
    let mut payload = [0u8; BLOCK_SIZE];
    rand::rng().fill_bytes(&mut payload);

    {
        let mut dev = FileBlockDevice::open(&path, BLOCKS).expect("open");
        dev.write_block(7, &payload);
        dev.flush().expect("flush");
    }

    let dev = FileBlockDevice::open(&path, BLOCKS).expect("reopen");
    assert!(!dev.created(), "existing image must not be reported as created");
    let mut back = [0u8; BLOCK_SIZE];
    dev.read_block(7, &mut back);
    assert_eq!(back, payload);
}

#[test]
fn open_existing_derives_block_count() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("disk.img");
    {
        let mut dev = FileBlockDevice::open(&path, BLOCKS).expect("open");
        dev.write_block(3, &[0x42u8; BLOCK_SIZE]);
    }

    let dev = FileBlockDevice::open_existing(&path).expect("open existing");
    assert_eq!(dev.total_blocks(), BLOCKS);
    let mut buf = [0u8; BLOCK_SIZE];
    dev.read_block(3, &mut buf);
    assert!(buf.iter().all(|&b| b == 0x42));
}

#[test]
fn open_existing_rejects_partial_blocks() {
    let tf = NamedTempFile::new().expect("tmp file");
    std::fs::write(tf.path(), vec![0u8; BLOCK_SIZE + 10]).expect("write");
    assert!(FileBlockDevice::open_existing(tf.path()).is_err());
}

#[test]
fn open_existing_rejects_missing_image() {
    let dir = TempDir::new().expect("tempdir");
    assert!(FileBlockDevice::open_existing(dir.path().join("nope.img")).is_err());
}

#[test]
#[should_panic(expected = "out of range")]
fn read_past_end_panics() {
    let tf = NamedTempFile::new().expect("tmp file");
    let dev = FileBlockDevice::open(tf.path(), BLOCKS).expect("open");
    let mut buf = [0u8; BLOCK_SIZE];
    dev.read_block(BLOCKS, &mut buf);
}
