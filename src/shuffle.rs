use rand::Rng;

/// Returns a uniformly random permutation of `items` (Fisher-Yates).
///
/// The input is only borrowed; the permutation is written to a fresh `Vec`.
pub fn shuffle<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();

    for i in (1..out.len()).rev() {
        let j = rng.random_range(0..=i);
        out.swap(i, j);
    }

    out
}
