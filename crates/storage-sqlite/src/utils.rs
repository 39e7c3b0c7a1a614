//! Utility functions for SQLite storage operations.

/// Rows per multi-row `INSERT`.
///
/// Each country row binds 9 parameters, so 100 rows stay well below SQLite's
/// per-statement variable limit (999 on older builds).
pub const SQLITE_INSERT_CHUNK: usize = 100;

/// Chunk a slice into batches for multi-row inserts.
pub fn chunk_for_insert<T>(items: &[T]) -> impl Iterator<Item = &[T]> {
    items.chunks(SQLITE_INSERT_CHUNK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_for_insert_empty() {
        let items: Vec<i32> = vec![];
        assert_eq!(chunk_for_insert(&items).count(), 0);
    }

    #[test]
    fn test_chunk_for_insert_exact_limit() {
        let items: Vec<i32> = (0..SQLITE_INSERT_CHUNK as i32).collect();
        let chunks: Vec<_> = chunk_for_insert(&items).collect();
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_chunk_for_insert_over_limit() {
        let items: Vec<i32> = (0..250).collect();
        let sizes: Vec<usize> = chunk_for_insert(&items).map(|c| c.len()).collect();
        assert_eq!(sizes, vec![100, 100, 50]);
    }
}
