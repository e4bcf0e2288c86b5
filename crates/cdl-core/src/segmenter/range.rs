//! Byte range type and the fixed fan-out partitioner.

/// One partition of a resource: bytes `[start, end)` (half-open), 1-based `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// Position in merge order, `1..=N`.
    pub index: usize,
    /// Start offset (inclusive).
    pub start: u64,
    /// End offset (exclusive).
    pub end: u64,
}

impl ByteRange {
    /// Length of this range in bytes.
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// A degenerate range covers no bytes and needs no request.
    pub fn is_degenerate(&self) -> bool {
        self.start >= self.end
    }

    /// Inclusive span as libcurl's `CURLOPT_RANGE` expects it: `start-(end-1)`.
    /// `None` for a degenerate range.
    pub fn curl_range(&self) -> Option<String> {
        if self.is_degenerate() {
            None
        } else {
            Some(format!("{}-{}", self.start, self.end - 1))
        }
    }
}

/// Splits `total_size` bytes into `fan_out` contiguous ranges.
///
/// Every range spans `total_size / fan_out` bytes (at least one), and the last
/// range always ends at `total_size`, absorbing the division remainder. When
/// `total_size < fan_out` the trailing ranges are degenerate. Returns an empty
/// vec if `fan_out` is 0.
pub fn partition(total_size: u64, fan_out: usize) -> Vec<ByteRange> {
    if fan_out == 0 {
        return Vec::new();
    }

    let step = (total_size / fan_out as u64).max(1);
    let mut out = Vec::with_capacity(fan_out);

    for index in 1..=fan_out {
        let start = ((index as u64 - 1).saturating_mul(step)).min(total_size);
        let end = if index == fan_out {
            total_size
        } else {
            start.saturating_add(step).min(total_size)
        };
        out.push(ByteRange { index, start, end });
    }

    out
}
