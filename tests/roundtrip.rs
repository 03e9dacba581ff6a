use stegan::image_buffer::ImageBuffer;
use stegan::pipeline::{embed, extract};
use stegan::Error;

fn solid_gray(n: u32, value: u8) -> ImageBuffer {
    let bytes = vec![value; (n * n * 3) as usize];
    let raw = image::RgbImage::from_raw(n, n, bytes).expect("dimensions match buffer length");
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cover.png");
    raw.save(&path).unwrap();
    ImageBuffer::open(&path).unwrap()
}

/// S1: 16x16 solid gray image, password "abc", 5-byte payload.
#[test]
fn s1_small_payload_roundtrips_exactly() {
    let cover = solid_gray(16, 128);
    let payload = b"hello";
    let stego = embed(cover, payload, b"abc", false).unwrap();
    let recovered = extract(stego, b"abc", false).unwrap();
    assert_eq!(recovered, b"\x68\x65\x6c\x6c\x6f");
}

/// S2: same image, 1 KiB of zero bytes.
#[test]
fn s2_larger_payload_roundtrips() {
    let cover = solid_gray(64, 128);
    let payload = vec![0u8; 1024];
    let stego = embed(cover, &payload, b"abc", false).unwrap();
    let recovered = extract(stego, b"abc", false).unwrap();
    assert_eq!(recovered, payload);
}

/// S3: extracting with the wrong password must fail and yield no bytes.
#[test]
fn s3_wrong_password_fails() {
    let cover = solid_gray(16, 128);
    let stego = embed(cover, b"some secret", b"abc", false).unwrap();
    assert!(extract(stego, b"abd", false).is_err());
}

/// S4: an 8x8 image (64 pixels) cannot even hold the header in normal mode.
#[test]
fn s4_undersized_image_cannot_hold_the_header() {
    let cover = solid_gray(8, 128);
    let err = embed(cover, b"x", b"abc", false).unwrap_err();
    assert!(matches!(err, Error::CapacityExhausted));
}

/// S5: a Sobel-mode embed can only be read back in Sobel mode.
#[test]
fn s5_sobel_and_normal_mode_are_not_interchangeable() {
    use rand::{Rng, SeedableRng};
    let n = 64;
    let mut rng = rand::rngs::StdRng::seed_from_u64(11);
    let bytes: Vec<u8> = (0..n * n * 3).map(|_| rng.gen::<bool>() as u8 * 255).collect();
    let raw = image::RgbImage::from_raw(n, n, bytes).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cover.png");
    raw.save(&path).unwrap();
    let cover = ImageBuffer::open(&path).unwrap();

    let stego = embed(cover, b"Z", b"abc", true).unwrap();
    let stego_bytes = {
        let out_path = dir.path().join("stego.png");
        stego.save(&out_path).unwrap();
        std::fs::read(&out_path).unwrap()
    };

    let for_sobel = ImageBuffer::open_bytes(&stego_bytes).unwrap();
    assert_eq!(extract(for_sobel, b"abc", true).unwrap(), b"Z");

    let for_normal = ImageBuffer::open_bytes(&stego_bytes).unwrap();
    assert!(extract(for_normal, b"abc", false).is_err());
}

/// S6: re-embedding over an already-stego image with a different password
/// must still extract correctly under the new password.
#[test]
fn s6_reembedding_with_a_different_password_overrides_the_payload() {
    let cover = solid_gray(64, 128);
    let stego1 = embed(cover, b"first secret", b"p1", false).unwrap();
    let stego2 = embed(stego1, b"second secret, longer than the first", b"p2", false).unwrap();
    let recovered = extract(stego2, b"p2", false).unwrap();
    assert_eq!(recovered, b"second secret, longer than the first");
}

#[test]
fn determinism_same_inputs_produce_bit_identical_images() {
    let cover_a = solid_gray(32, 100);
    let cover_b = solid_gray(32, 100);
    let stego_a = embed(cover_a, b"deterministic", b"abc", false).unwrap();
    let stego_b = embed(cover_b, b"deterministic", b"abc", false).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path_a = dir.path().join("a.png");
    let path_b = dir.path().join("b.png");
    stego_a.save(&path_a).unwrap();
    stego_b.save(&path_b).unwrap();
    assert_eq!(std::fs::read(path_a).unwrap(), std::fs::read(path_b).unwrap());
}

#[test]
fn empty_payload_is_rejected_immediately() {
    let cover = solid_gray(16, 128);
    assert!(matches!(embed(cover, b"", b"abc", false), Err(Error::EmptyPayload)));
}
