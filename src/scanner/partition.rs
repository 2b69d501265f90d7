//! Work partitioning for the sweep phase.

/// Split `items` into at most `workers` contiguous chunks of near-equal
/// size (`ceil(len / workers)`, last chunk possibly smaller).
///
/// The chunks are a complete, non-overlapping partition of the input:
/// every element appears in exactly one chunk, in its original position.
/// Fewer items than workers yields size-1 chunks and idle worker slots;
/// empty input yields no chunks.
pub fn partition<T: Clone>(items: &[T], workers: usize) -> Vec<Vec<T>> {
    if items.is_empty() {
        return Vec::new();
    }

    let workers = workers.max(1);
    let chunk_size = items.len().div_ceil(workers);

    items.chunks(chunk_size).map(<[T]>::to_vec).collect()
}
