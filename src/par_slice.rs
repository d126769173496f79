use num_traits::Float;
use rayon::prelude::*;

/// Copy `src` into `dst`.
/// `chunk_size` is break the work into tasks for multi-threading.
pub fn copy<NumType: Copy + Send + Sync>(
    src: &[NumType],
    dst: &mut [NumType],
    chunk_size: usize,
) {
    debug_assert_eq!(src.len(), dst.len());
    let chunk_size = chunk_size.max(1);
    dst.par_chunks_mut(chunk_size)
        .zip(src.par_chunks(chunk_size))
        .for_each(|(d_chunk, s_chunk)| {
            d_chunk.copy_from_slice(s_chunk);
        });
}

/// Largest `|a - b|` over two equally sized slices, zero when empty.
pub fn max_abs_diff<NumType: Float + Send + Sync>(
    a_slice: &[NumType],
    b_slice: &[NumType],
    chunk_size: usize,
) -> NumType {
    debug_assert_eq!(a_slice.len(), b_slice.len());
    let chunk_size = chunk_size.max(1);
    a_slice
        .par_chunks(chunk_size)
        .zip(b_slice.par_chunks(chunk_size))
        .map(|(a_chunk, b_chunk)| {
            let mut m = NumType::zero();
            for (a, b) in a_chunk.iter().zip(b_chunk.iter()) {
                m = m.max((*a - *b).abs());
            }
            m
        })
        .reduce(NumType::zero, |x, y| x.max(y))
}
