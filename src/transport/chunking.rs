//! MTU-bounded write chunks.
//!
//! An ATT write carries 3 bytes of header (opcode + handle), so each chunk
//! holds at most `mtu - 3` bytes of payload.

/// ATT write request header length
pub const ATT_HEADER_LEN: usize = 3;

/// Payload bytes per write for a negotiated MTU, never less than 1.
#[inline]
pub fn chunk_len(mtu: usize) -> usize {
    mtu.saturating_sub(ATT_HEADER_LEN).max(1)
}

/// Split a buffer into consecutive MTU-sized chunks.
///
/// ```
/// use mizan::transport::chunking::split;
///
/// let chunks: Vec<&[u8]> = split(&[0u8; 45], 23).collect();
/// assert_eq!(chunks.iter().map(|c| c.len()).collect::<Vec<_>>(), [20, 20, 5]);
/// ```
pub fn split(bytes: &[u8], mtu: usize) -> std::slice::Chunks<'_, u8> {
    bytes.chunks(chunk_len(mtu))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunks_concatenate_to_input() {
        let data: Vec<u8> = (0..=255).collect();
        let joined: Vec<u8> = split(&data, 185).flatten().copied().collect();
        assert_eq!(joined, data);
    }

    #[test]
    fn test_no_chunk_exceeds_payload_len() {
        let data = vec![0xAA; 1000];
        assert!(split(&data, 185).all(|c| c.len() <= 182));
        assert_eq!(split(&data, 185).count(), 6);
    }

    #[test]
    fn test_small_buffer_is_one_chunk() {
        assert_eq!(split(b"hello", 23).count(), 1);
    }

    #[test]
    fn test_degenerate_mtu_still_progresses() {
        assert_eq!(chunk_len(0), 1);
        assert_eq!(chunk_len(3), 1);
        assert_eq!(split(b"abc", 2).count(), 3);
    }

    #[test]
    fn test_empty_buffer_has_no_chunks() {
        assert_eq!(split(&[], 185).count(), 0);
    }
}
