//! Derives the two pseudo-random streams that decide *where* and *which
//! channel* a payload bit is hidden in.
//!
//! The password is hashed once with SHA-256; the first half of the digest
//! seeds the permutation stream (`G1`, which shuffles the candidate pixel
//! list), the second half seeds the channel stream (`G2`, which picks R/G/B
//! per bit). Keeping the two independent means which sites get visited and
//! which channel gets touched don't correlate with each other.
use crate::crypto::sha256;
use crate::random::Mt19937;

/// The channel an embedded bit lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    fn from_index(i: u32) -> Self {
        match i {
            0 => Channel::Red,
            1 => Channel::Green,
            _ => Channel::Blue,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

pub struct KeySchedule {
    permutation_rng: Mt19937,
    channel_rng: Mt19937,
}

impl KeySchedule {
    pub fn from_password(password: &[u8]) -> Self {
        let digest = sha256(password);
        let (g1_half, g2_half) = digest.split_at(16);
        Self {
            permutation_rng: Mt19937::seeded(&to_u32_words(g1_half)),
            channel_rng: Mt19937::seeded(&to_u32_words(g2_half)),
        }
    }

    /// Shuffles `items` in place, in the same order of operations as
    /// `std::shuffle`: walk the indices from the last down to 1, swapping
    /// each with a uniformly chosen earlier-or-equal index.
    pub fn shuffle(&mut self, items: &mut [usize]) {
        for i in (1..items.len()).rev() {
            let j = self.permutation_rng.next_below((i + 1) as u32) as usize;
            items.swap(i, j);
        }
    }

    /// Draws the channel for the next bit from `G2`. Must be called exactly
    /// once per payload bit, regardless of how many candidate sites get
    /// rejected while placing it — skipping or repeating a draw would
    /// desync embed and extract.
    pub fn next_channel(&mut self) -> Channel {
        Channel::from_index(self.channel_rng.next_below(3))
    }
}

fn to_u32_words(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks(4)
        .map(|c| u32::from_le_bytes(c.try_into().expect("16-byte half splits evenly into u32s")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_password_same_schedule() {
        let mut a = KeySchedule::from_password(b"hunter2");
        let mut b = KeySchedule::from_password(b"hunter2");
        let mut va: Vec<usize> = (0..100).collect();
        let mut vb: Vec<usize> = (0..100).collect();
        a.shuffle(&mut va);
        b.shuffle(&mut vb);
        assert_eq!(va, vb);
        for _ in 0..50 {
            assert_eq!(a.next_channel(), b.next_channel());
        }
    }

    #[test]
    fn different_password_different_schedule() {
        let mut a = KeySchedule::from_password(b"hunter2");
        let mut b = KeySchedule::from_password(b"hunter3");
        let mut va: Vec<usize> = (0..200).collect();
        let mut vb: Vec<usize> = (0..200).collect();
        a.shuffle(&mut va);
        b.shuffle(&mut vb);
        assert_ne!(va, vb);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut ks = KeySchedule::from_password(b"whatever");
        let mut items: Vec<usize> = (0..500).collect();
        ks.shuffle(&mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..500).collect::<Vec<_>>());
    }

    #[test]
    fn channel_stream_is_independent_of_permutation_stream() {
        let mut a = KeySchedule::from_password(b"x");
        let mut b = KeySchedule::from_password(b"x");
        let mut va: Vec<usize> = (0..10).collect();
        let mut vb: Vec<usize> = (0..9999).collect();
        a.shuffle(&mut va);
        b.shuffle(&mut vb);
        assert_eq!(a.next_channel(), b.next_channel());
    }
}
