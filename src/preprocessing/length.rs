//! Sample-axis adjustment (truncate / right zero-pad)

use crate::error::DecodeError;
use crate::io::sample_buffer::{grid_storage, DecodedAudio};

/// Fit every channel to exactly `target` samples
///
/// Channels longer than `target` keep their first `target` samples; shorter
/// channels are padded on the right with zeros. The channel count is never
/// changed.
///
/// # Errors
///
/// Returns `DecodeError::InvalidInput` if the resulting grid cannot be allocated.
///
/// # Example
///
/// ```
/// use stratum_decode::DecodedAudio;
/// use stratum_decode::preprocessing::length::fit_samples;
///
/// let audio = DecodedAudio::from_channels(vec![vec![1, 2, 3]], 8000)?;
/// let padded = fit_samples(audio, 5)?;
/// assert_eq!(padded.channel(0), Some(&[1, 2, 3, 0, 0][..]));
/// # Ok::<(), stratum_decode::DecodeError>(())
/// ```
pub fn fit_samples(audio: DecodedAudio, target: usize) -> Result<DecodedAudio, DecodeError> {
    let current = audio.samples();
    if current == target {
        return Ok(audio);
    }

    let channels = audio.channels();
    let sample_rate = audio.sample_rate();
    let keep = current.min(target);

    log::debug!(
        "Fitting {} channel(s) from {} to {} samples ({})",
        channels,
        current,
        target,
        if target < current { "truncate" } else { "zero-pad" }
    );

    let mut out = grid_storage(channels, target)?;
    let data = audio.into_data();
    for row in data.chunks_exact(current.max(1)).take(channels) {
        out.extend_from_slice(&row[..keep]);
        out.resize(out.len() + (target - keep), 0);
    }
    // Rows have no storage when the source has zero samples.
    if current == 0 {
        out.resize(channels * target, 0);
    }

    DecodedAudio::new(out, channels, target, sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: Vec<Vec<i16>>) -> DecodedAudio {
        DecodedAudio::from_channels(rows, 16000).unwrap()
    }

    #[test]
    fn test_truncate() {
        let out = fit_samples(grid(vec![vec![1, 2, 3, 4, 5]]), 3).unwrap();
        assert_eq!(out.shape(), [1, 3]);
        assert_eq!(out.channel(0).unwrap(), &[1, 2, 3]);
    }

    #[test]
    fn test_pad_right_with_zeros() {
        let out = fit_samples(grid(vec![vec![1, 2, 3], vec![-1, -2, -3]]), 5).unwrap();
        assert_eq!(out.shape(), [2, 5]);
        assert_eq!(out.channel(0).unwrap(), &[1, 2, 3, 0, 0]);
        assert_eq!(out.channel(1).unwrap(), &[-1, -2, -3, 0, 0]);
    }

    #[test]
    fn test_to_zero_samples() {
        let out = fit_samples(grid(vec![vec![1, 2], vec![3, 4]]), 0).unwrap();
        assert_eq!(out.shape(), [2, 0]);
        assert!(out.is_empty());
    }

    #[test]
    fn test_from_zero_samples() {
        let out = fit_samples(DecodedAudio::empty(3, 8000), 4).unwrap();
        assert_eq!(out.shape(), [3, 4]);
        assert!(out.as_slice().iter().all(|&s| s == 0));
        assert_eq!(out.sample_rate(), 8000);
    }

    #[test]
    fn test_zero_channels() {
        let out = fit_samples(DecodedAudio::new(vec![], 0, 7, 8000).unwrap(), 2).unwrap();
        assert_eq!(out.shape(), [0, 2]);
    }

    #[test]
    fn test_oversized_target_is_error() {
        let target = usize::try_from(i64::MAX).unwrap_or(usize::MAX);
        let result = fit_samples(grid(vec![vec![1, 2, 3], vec![4, 5, 6]]), target);
        assert!(matches!(result, Err(DecodeError::InvalidInput(_))));

        let result = fit_samples(grid(vec![vec![1, 2, 3]]), target);
        assert!(matches!(result, Err(DecodeError::InvalidInput(_))));
    }

    #[test]
    fn test_same_length_is_noop() {
        let input = grid(vec![vec![9, 8, 7]]);
        let out = fit_samples(input.clone(), 3).unwrap();
        assert_eq!(out, input);
    }
}
