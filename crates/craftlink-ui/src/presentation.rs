//! Derived presentation helpers.
//!
//! Pure functions of a seed string, stable across calls and across runs:
//! the same account always gets the same avatar color and the same
//! displayed rating. No storage interaction.

/// Avatar background palette.
pub const AVATAR_PALETTE: [&str; 8] = [
    "#e07a5f", "#3d405b", "#81b29a", "#f2cc8f", "#6d597a", "#355070", "#b56576", "#4281a4",
];

/// Deterministic avatar color for `seed` (typically the account name).
pub fn avatar_color(seed: &str) -> &'static str {
    let index = fnv1a(seed) as usize % AVATAR_PALETTE.len();
    AVATAR_PALETTE[index]
}

/// Deterministic pseudo-rating for `seed` (typically the account id),
/// one decimal place in `[3.5, 5.0]`.
///
/// Display filler for workers who have no real reviews yet; it must
/// only be stable, not meaningful.
pub fn pseudo_rating(seed: &str) -> f32 {
    // 16 steps of 0.1 starting at 3.5.
    let step = fnv1a(seed) % 16;
    (35 + step) as f32 / 10.0
}

/// FNV-1a 64-bit. Inlined so the derivation can never drift with a
/// hasher implementation change.
fn fnv1a(input: &str) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = OFFSET_BASIS;
    for byte in input.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

// ── tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avatar_color_is_stable() {
        assert_eq!(avatar_color("Ada"), avatar_color("Ada"));
    }

    #[test]
    fn avatar_color_comes_from_palette() {
        for seed in ["Ada", "Joe", "", "名前"] {
            assert!(AVATAR_PALETTE.contains(&avatar_color(seed)));
        }
    }

    #[test]
    fn pseudo_rating_is_stable_and_bounded() {
        for seed in ["a", "b", "c", "0190c3e7", ""] {
            let rating = pseudo_rating(seed);
            assert_eq!(rating, pseudo_rating(seed));
            assert!((3.5..=5.0).contains(&rating), "out of range: {rating}");
        }
    }

    #[test]
    fn different_seeds_can_differ() {
        // Not guaranteed for any pair, but these two must not collide or
        // the hash is broken.
        assert_ne!(fnv1a("Ada"), fnv1a("Joe"));
    }
}
