//! Channel-axis adjustment (truncate / mono replication)

use crate::error::DecodeError;
use crate::io::sample_buffer::{grid_storage, DecodedAudio};

/// Fit the grid to exactly `target` channels
///
/// Extra channels are dropped (leading channels are kept as-is, never mixed
/// down). Missing channels are filled by replicating a single source channel.
///
/// # Errors
///
/// Returns `DecodeError::ChannelBroadcast` when more channels are requested
/// than the source has and the source is not mono, and
/// `DecodeError::InvalidInput` if the replicated grid cannot be allocated.
///
/// # Example
///
/// ```
/// use stratum_decode::DecodedAudio;
/// use stratum_decode::preprocessing::channel_mixer::fit_channels;
///
/// let mono = DecodedAudio::from_channels(vec![vec![1, 2, 3, 4]], 8000)?;
/// let stereo = fit_channels(mono, 2)?;
/// assert_eq!(stereo.channel(0), stereo.channel(1));
/// # Ok::<(), stratum_decode::DecodeError>(())
/// ```
pub fn fit_channels(audio: DecodedAudio, target: usize) -> Result<DecodedAudio, DecodeError> {
    let current = audio.channels();
    if current == target {
        return Ok(audio);
    }
    if current > target {
        return keep_leading_channels(audio, target);
    }
    if current != 1 {
        return Err(DecodeError::ChannelBroadcast {
            source: current,
            target,
        });
    }
    replicate_mono(audio, target)
}

/// Keep the first `target` channels (`target` < current channel count)
fn keep_leading_channels(audio: DecodedAudio, target: usize) -> Result<DecodedAudio, DecodeError> {
    let samples = audio.samples();
    let sample_rate = audio.sample_rate();
    log::debug!("Keeping {} of {} channels", target, audio.channels());

    let mut data = audio.into_data();
    data.truncate(target * samples);
    DecodedAudio::new(data, target, samples, sample_rate)
}

/// Replicate the single source channel `target` times
fn replicate_mono(audio: DecodedAudio, target: usize) -> Result<DecodedAudio, DecodeError> {
    let samples = audio.samples();
    let sample_rate = audio.sample_rate();
    log::debug!("Replicating mono channel to {} channels", target);

    let mut data = grid_storage(target, samples)?;
    let row = audio.into_data();
    for _ in 0..target {
        data.extend_from_slice(&row);
    }
    DecodedAudio::new(data, target, samples, sample_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: Vec<Vec<i16>>) -> DecodedAudio {
        DecodedAudio::from_channels(rows, 44100).unwrap()
    }

    #[test]
    fn test_mono_to_stereo() {
        let out = fit_channels(grid(vec![vec![1, 2, 3, 4]]), 2).unwrap();
        assert_eq!(out.shape(), [2, 4]);
        assert_eq!(out.channel(0).unwrap(), &[1, 2, 3, 4]);
        assert_eq!(out.channel(1).unwrap(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_mono_replication_any_count() {
        for n in 1..=8 {
            let out = fit_channels(grid(vec![vec![5, -5, 7]]), n).unwrap();
            assert_eq!(out.channels(), n);
            assert!(out.channels_iter().all(|row| row == [5, -5, 7]));
        }
    }

    #[test]
    fn test_keep_first_channel_no_averaging() {
        let out = fit_channels(grid(vec![vec![1, 2, 3, 4], vec![100, 200, 300, 400]]), 1).unwrap();
        assert_eq!(out.shape(), [1, 4]);
        assert_eq!(out.channel(0).unwrap(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_multichannel_expand_is_error() {
        let result = fit_channels(grid(vec![vec![1, 2], vec![3, 4]]), 3);
        assert_eq!(
            result,
            Err(DecodeError::ChannelBroadcast { source: 2, target: 3 })
        );
    }

    #[test]
    fn test_zero_channel_source_expand_is_error() {
        let result = fit_channels(DecodedAudio::new(vec![], 0, 4, 8000).unwrap(), 1);
        assert!(matches!(result, Err(DecodeError::ChannelBroadcast { source: 0, target: 1 })));
    }

    #[test]
    fn test_oversized_channel_count_is_error() {
        let target = usize::try_from(i64::MAX).unwrap_or(usize::MAX);
        let result = fit_channels(grid(vec![vec![1, 2, 3]]), target);
        assert!(matches!(result, Err(DecodeError::InvalidInput(_))));
    }

    #[test]
    fn test_to_zero_channels_keeps_sample_count() {
        let out = fit_channels(grid(vec![vec![1, 2, 3], vec![4, 5, 6]]), 0).unwrap();
        assert_eq!(out.shape(), [0, 3]);
        assert!(out.is_empty());
    }

    #[test]
    fn test_mono_with_zero_samples_replicates() {
        let out = fit_channels(DecodedAudio::empty(1, 8000), 4).unwrap();
        assert_eq!(out.shape(), [4, 0]);
    }
}
