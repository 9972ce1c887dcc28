//! Shape normalization for decoded audio
//!
//! Brings a decoded `[channels, samples]` grid to the caller's requested
//! dimensions:
//! - Sample axis: truncate, or zero-pad on the right
//! - Channel axis: keep leading channels, or replicate a mono source
//!
//! The sample axis is always adjusted first, so channel replication copies
//! rows that already have their final length.

pub mod channel_mixer;
pub mod length;

use crate::config::{Dimension, ShapeRequest};
use crate::error::DecodeError;
use crate::io::sample_buffer::DecodedAudio;

/// Normalize a decoded grid to the requested shape
///
/// # Arguments
///
/// * `audio` - Decoded grid, consumed
/// * `shape` - Requested channel and sample counts; `Unconstrained` axes are left alone
///
/// # Returns
///
/// Grid whose exact dimensions match the request
///
/// # Errors
///
/// Returns `DecodeError::ChannelBroadcast` if more channels are requested than
/// a non-mono source provides, and `DecodeError::InvalidInput` if the
/// requested shape is too large to allocate.
///
/// # Example
///
/// ```
/// use stratum_decode::{fix_shape, DecodeConfig, DecodedAudio};
///
/// let mono = DecodedAudio::from_channels(vec![vec![1, 2, 3]], 16000)?;
/// let shape = DecodeConfig::default().with_channels(2).with_samples(5).shape();
///
/// let out = fix_shape(mono, &shape)?;
/// assert_eq!(out.shape(), [2, 5]);
/// assert_eq!(out.channel(1), Some(&[1, 2, 3, 0, 0][..]));
/// # Ok::<(), stratum_decode::DecodeError>(())
/// ```
pub fn fix_shape(audio: DecodedAudio, shape: &ShapeRequest) -> Result<DecodedAudio, DecodeError> {
    if shape.is_identity() {
        return Ok(audio);
    }

    let audio = match shape.samples {
        Dimension::Exact(n) => length::fit_samples(audio, n)?,
        Dimension::Unconstrained => audio,
    };

    let audio = match shape.channels {
        Dimension::Exact(n) => channel_mixer::fit_channels(audio, n)?,
        Dimension::Unconstrained => audio,
    };

    debug_assert!(shape.samples.exact().map_or(true, |n| n == audio.samples()));
    debug_assert!(shape.channels.exact().map_or(true, |n| n == audio.channels()));

    Ok(audio)
}
