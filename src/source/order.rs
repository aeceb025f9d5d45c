/// Number of frames streamed for a source of `n` frames.
///
/// Ping-pong appends the reverse without its two endpoints, giving `2n - 2` for `n >= 2`.
pub fn sequence_len(n: usize, pingpong: bool) -> usize {
    if pingpong {
        n + n.saturating_sub(2)
    } else {
        n
    }
}

/// Source indices in streaming order: `0..n`, then `n-2` down to `1` when ping-pong is enabled.
pub fn sequence_order(n: usize, pingpong: bool) -> impl Iterator<Item = usize> {
    let back = if pingpong { 1..n.saturating_sub(1) } else { 0..0 };
    (0..n).chain(back.rev())
}

/// Apply the ping-pong order to a slice.
pub fn pingpong<T: Clone>(items: &[T]) -> Vec<T> {
    sequence_order(items.len(), true)
        .map(|i| items[i].clone())
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/source/order.rs"]
mod tests;
