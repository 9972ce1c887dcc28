//! # Stratum Decode
//!
//! Decodes encoded audio (MP3, or any format the codec backend can detect)
//! into a signed 16-bit `[channels, samples]` grid and normalizes it to a
//! caller-requested shape.
//!
//! ## Features
//!
//! - **Autodetect decoding**: container and codec probed from the bytes
//! - **MP3 decoding**: strict path that rejects non-MP3 streams
//! - **Shape normalization**: truncate or zero-pad samples, keep leading
//!   channels or replicate a mono source
//! - **Injectable decoder**: the codec sits behind [`AudioDecoder`]
//!
//! ## Quick Start
//!
//! ```no_run
//! use stratum_decode::{decode, DecodeConfig};
//!
//! let contents = std::fs::read("track.mp3")?;
//!
//! // Stereo, exactly one second at the source rate
//! let config = DecodeConfig::default().with_channels(2).with_samples(44100);
//! let audio = decode(&contents, &config)?;
//!
//! println!("{:?} @ {} Hz", audio.shape(), audio.sample_rate());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Encoded bytes → AudioDecoder → DecodedAudio → fix_shape → DecodedAudio
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod io;
pub mod preprocessing;

// Re-export main types
pub use config::{DecodeConfig, Dimension, ShapeRequest};
pub use error::DecodeError;
pub use io::decoder::{AudioDecoder, AudioFormat, SymphoniaDecoder};
pub use io::sample_buffer::{AudioInfo, DecodedAudio};
pub use preprocessing::fix_shape;

/// Decode audio, detecting the format automatically
///
/// # Arguments
///
/// * `contents` - Encoded audio bytes
/// * `config` - Desired output shape and decoder options
///
/// # Returns
///
/// i16 grid of shape `[channels, samples]` with the stream's sample rate
///
/// # Errors
///
/// Decoder failures are returned unchanged; `DecodeError::ChannelBroadcast`
/// if the requested channel count cannot be produced from the source.
///
/// # Example
///
/// ```no_run
/// use stratum_decode::{decode, DecodeConfig};
///
/// let contents = std::fs::read("speech.wav")?;
/// let audio = decode(&contents, &DecodeConfig::from_sentinels(1, -1))?;
/// assert_eq!(audio.channels(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn decode(contents: &[u8], config: &DecodeConfig) -> Result<DecodedAudio, DecodeError> {
    decode_with(&SymphoniaDecoder::from(config), AudioFormat::Auto, contents, config)
}

/// Decode MP3 audio
///
/// Same contract as [`decode`], but streams that are not MP3 are rejected
/// with `DecodeError::UnsupportedFormat`.
pub fn decode_mp3(contents: &[u8], config: &DecodeConfig) -> Result<DecodedAudio, DecodeError> {
    decode_with(&SymphoniaDecoder::from(config), AudioFormat::Mp3, contents, config)
}

/// Decode with an explicit decoder, then normalize the shape
///
/// # Arguments
///
/// * `decoder` - Decode capability
/// * `format` - Decode path (autodetect or MP3)
/// * `contents` - Encoded audio bytes
/// * `config` - Desired output shape
pub fn decode_with<D>(
    decoder: &D,
    format: AudioFormat,
    contents: &[u8],
    config: &DecodeConfig,
) -> Result<DecodedAudio, DecodeError>
where
    D: AudioDecoder + ?Sized,
{
    let audio = decoder.decode_format(format, contents)?;
    log::debug!(
        "Decoded shape {:?} at {} Hz, requested {:?}",
        audio.shape(),
        audio.sample_rate(),
        config.shape()
    );
    fix_shape(audio, &config.shape())
}
