use alloc::vec::Vec;

/// Split `payload` into approximately equal-sized byte chunks.
///
/// Chunks may split multi-byte sequences anywhere; the streaming decoder is
/// expected to cope. Used by tests and benchmarks.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_chunks(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    assert!(parts > 0);
    let chunk_size = payload.len().div_ceil(parts).max(1);
    payload.chunks(chunk_size).collect()
}

/// Return a sequence of prefixes converging to `payload`.
///
/// # Panics
///
/// Panics if `parts` is zero.
#[must_use]
pub fn produce_prefixes(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    let chunks = produce_chunks(payload, parts);
    let mut prefixes = Vec::with_capacity(chunks.len());
    let mut end = 0;
    for chunk in chunks {
        end += chunk.len();
        prefixes.push(&payload[..end]);
    }
    prefixes
}
