use emojify_core::types::Embedding;

/// Element-wise arithmetic mean. Every input counts once, duplicates included.
/// Returns `None` for an empty input or when the inputs disagree on length.
///
/// Accumulates in f64 so reordering the inputs stays below f32 precision.
pub fn mean_pool<V: AsRef<[f32]>>(vectors: &[V]) -> Option<Embedding> {
    let first = vectors.first()?.as_ref();
    let dim = first.len();
    let mut sum = vec![0f64; dim];
    for v in vectors {
        let v = v.as_ref();
        if v.len() != dim { return None; }
        for (acc, x) in sum.iter_mut().zip(v) { *acc += f64::from(*x); }
    }
    let n = vectors.len() as f64;
    Some(sum.into_iter().map(|s| (s / n) as f32).collect())
}

pub fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Scale `v` to unit length in place; zero vectors are left untouched.
pub fn l2_normalize(v: &mut [f32]) {
    let norm = l2_norm(v);
    if norm > 0.0 { for x in v.iter_mut() { *x /= norm; } }
}
