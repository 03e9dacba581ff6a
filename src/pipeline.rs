//! Ties the crypto, compression, edge detection, and site selection pieces
//! together into the two operations the CLI exposes.
use log::{debug, info};

use crate::compression;
use crate::crypto::{cbc_decrypt, cbc_encrypt, evp_bytes_to_key, BLOCK_BYTES};
use crate::edge::EdgeMask;
use crate::error::{Error, Result};
use crate::header::{Header, HEADER_BYTES};
use crate::image_buffer::ImageBuffer;
use crate::key_schedule::KeySchedule;
use crate::site_selector::SiteSelector;

/// Hides `payload` inside `img`, returning the modified image. `img` is
/// consumed and returned rather than mutated in place in the caller's
/// variable, so a failed embed can't leave a half-written buffer mistaken
/// for a complete one.
pub fn embed(mut img: ImageBuffer, payload: &[u8], password: &[u8], sobel_mode: bool) -> Result<ImageBuffer> {
    if img.pixel_count() == 0 {
        return Err(Error::NoImage);
    }
    if payload.is_empty() {
        return Err(Error::EmptyPayload);
    }

    let compressed = compression::compress(payload)?;
    let (key, iv) = evp_bytes_to_key(password);
    let ciphertext = cbc_encrypt(&compressed, key, iv);

    let mut iv_region = [0u8; BLOCK_BYTES];
    iv_region.copy_from_slice(&iv);
    let header = Header::new(payload.len() as u64, ciphertext.len() as u64, iv_region);

    info!(
        "embedding: uncompressed={} compressed={} encrypted={} bytes",
        payload.len(),
        compressed.len(),
        ciphertext.len()
    );

    let edge_mask = sobel_mode.then(|| EdgeMask::compute(&img));
    let mut schedule = KeySchedule::from_password(password);
    let mut selector = SiteSelector::new(&img, &mut schedule, edge_mask.as_ref());

    if !sobel_mode {
        // Each pixel contributes at most one bit: the candidate list holds
        // one entry per pixel, and a position is never revisited for a
        // second channel once consumed.
        let max_bytes = (img.pixel_count() / 8).saturating_sub(HEADER_BYTES);
        debug!("maximum payload size for this image: {max_bytes} bytes");
    }

    let mut bytes = header.encode().to_vec();
    bytes.extend_from_slice(&ciphertext);

    for byte in bytes {
        for bit in 0..8u8 {
            let channel = schedule.next_channel();
            let pixel = selector.next_site(&mut img, channel)?;
            img.set_bit(pixel, channel, (byte >> bit) & 1);
        }
    }

    Ok(img)
}

/// Recovers a payload previously hidden by [`embed`]. Any failure along the
/// way — a corrupt header, a wrong password, a bad padding, a broken zlib
/// stream — is reported identically as [`Error::InvalidHeader`] so that a
/// caller can't use error granularity to probe for the right password.
pub fn extract(mut img: ImageBuffer, password: &[u8], sobel_mode: bool) -> Result<Vec<u8>> {
    if img.pixel_count() == 0 {
        return Err(Error::NoImage);
    }

    let edge_mask = sobel_mode.then(|| EdgeMask::compute(&img));
    let mut schedule = KeySchedule::from_password(password);
    let mut selector = SiteSelector::new(&img, &mut schedule, edge_mask.as_ref());

    let mut header_bytes = [0u8; HEADER_BYTES];
    read_bytes(&mut img, &mut schedule, &mut selector, &mut header_bytes)
        .map_err(|_| Error::InvalidHeader)?;
    let header = Header::decode(&header_bytes).map_err(|_| Error::InvalidHeader)?;

    if (HEADER_BYTES as u64 + header.length_encrypted) * 8 > img.pixel_count() as u64 {
        return Err(Error::InvalidHeader);
    }

    let mut ciphertext = vec![0u8; header.length_encrypted as usize];
    read_bytes(&mut img, &mut schedule, &mut selector, &mut ciphertext)
        .map_err(|_| Error::InvalidHeader)?;

    let (key, _) = evp_bytes_to_key(password);
    let compressed = cbc_decrypt(&ciphertext, key, header.iv).ok_or(Error::DecryptFailed)?;
    let payload = compression::decompress(&compressed)?;

    if payload.len() as u64 != header.length_uncompressed {
        return Err(Error::DecompressFailed);
    }

    info!("extracted {} bytes", payload.len());
    Ok(payload)
}

fn read_bytes(
    img: &mut ImageBuffer,
    schedule: &mut KeySchedule,
    selector: &mut SiteSelector,
    out: &mut [u8],
) -> Result<()> {
    for byte in out.iter_mut() {
        let mut value = 0u8;
        for bit in 0..8u8 {
            let channel = schedule.next_channel();
            let pixel = selector.next_site(img, channel)?;
            value |= img.get_bit(pixel, channel) << bit;
        }
        *byte = value;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_image(n: u32) -> ImageBuffer {
        let bytes: Vec<u8> = (0..n * n * 3).map(|i| (i % 256) as u8).collect();
        let img = image::RgbImage::from_raw(n, n, bytes).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover.png");
        img.save(&path).unwrap();
        ImageBuffer::open(&path).unwrap()
    }

    #[test]
    fn embed_then_extract_recovers_the_payload() {
        let cover = blank_image(64);
        let payload = b"a short secret message";
        let stego = embed(cover, payload, b"hunter2", false).unwrap();
        let recovered = extract(stego, b"hunter2", false).unwrap();
        assert_eq!(recovered, payload);
    }

    #[test]
    fn wrong_password_does_not_recover_the_payload() {
        let cover = blank_image(64);
        let payload = b"a short secret message";
        let stego = embed(cover, payload, b"hunter2", false).unwrap();
        assert!(extract(stego, b"wrong password", false).is_err());
    }

    #[test]
    fn empty_payload_is_rejected() {
        let cover = blank_image(16);
        assert!(matches!(embed(cover, &[], b"pw", false), Err(Error::EmptyPayload)));
    }

    #[test]
    fn oversized_payload_reports_capacity_exhausted() {
        let cover = blank_image(8);
        let payload = vec![0u8; 10_000];
        assert!(matches!(
            embed(cover, &payload, b"pw", false),
            Err(Error::CapacityExhausted)
        ));
    }

    #[test]
    fn sobel_mode_roundtrips_when_the_image_has_enough_edges() {
        // High-frequency noise maximizes Sobel edge density, giving the
        // candidate list (and the 5x5-exclusion selector) plenty of room for
        // a single-byte payload.
        use rand::{Rng, SeedableRng};
        let n = 64;
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let bytes: Vec<u8> = (0..n * n * 3).map(|_| rng.gen::<bool>() as u8 * 255).collect();
        let img = image::RgbImage::from_raw(n, n, bytes).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover.png");
        img.save(&path).unwrap();
        let cover = ImageBuffer::open(&path).unwrap();

        let payload = b"X";
        let stego = embed(cover, payload, b"hunter2", true).unwrap();
        let recovered = extract(stego, b"hunter2", true).unwrap();
        assert_eq!(recovered, payload);
    }
}
