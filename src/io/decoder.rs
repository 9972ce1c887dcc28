//! Audio decoding using Symphonia
//!
//! The decode kernel is reached through the [`AudioDecoder`] trait so that
//! shape normalization and dispatch can be exercised without a real codec.
//! [`SymphoniaDecoder`] is the production implementation: it probes an
//! in-memory byte blob, decodes the first playable track and returns an i16
//! `[channels, samples]` grid.

use std::io::Cursor;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_MP3, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::default::{get_codecs, get_probe};

use crate::config::DecodeConfig;
use crate::error::DecodeError;
use crate::io::sample_buffer::DecodedAudio;

/// Which decode path to take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    /// Detect the container and codec from the bytes
    Auto,
    /// MPEG-1/2 Layer III only
    Mp3,
}

impl AudioFormat {
    /// Short lowercase name for logging
    pub fn name(&self) -> &'static str {
        match self {
            AudioFormat::Auto => "auto",
            AudioFormat::Mp3 => "mp3",
        }
    }
}

/// Capability that turns encoded bytes into a decoded grid
pub trait AudioDecoder {
    /// Decode bytes, detecting the format automatically
    fn decode_auto(&self, contents: &[u8]) -> Result<DecodedAudio, DecodeError>;

    /// Decode bytes that must contain an MP3 stream
    fn decode_mp3(&self, contents: &[u8]) -> Result<DecodedAudio, DecodeError>;

    /// Decode bytes along the path selected by `format`
    fn decode_format(
        &self,
        format: AudioFormat,
        contents: &[u8],
    ) -> Result<DecodedAudio, DecodeError> {
        match format {
            AudioFormat::Auto => self.decode_auto(contents),
            AudioFormat::Mp3 => self.decode_mp3(contents),
        }
    }
}

/// Symphonia-backed decoder for in-memory audio
#[derive(Debug, Clone)]
pub struct SymphoniaDecoder {
    /// Skip packets the codec rejects as malformed instead of failing
    pub skip_corrupt_packets: bool,
}

impl Default for SymphoniaDecoder {
    fn default() -> Self {
        Self {
            skip_corrupt_packets: true,
        }
    }
}

impl From<&DecodeConfig> for SymphoniaDecoder {
    fn from(config: &DecodeConfig) -> Self {
        Self {
            skip_corrupt_packets: config.skip_corrupt_packets,
        }
    }
}

impl AudioDecoder for SymphoniaDecoder {
    fn decode_auto(&self, contents: &[u8]) -> Result<DecodedAudio, DecodeError> {
        self.decode_bytes(contents, AudioFormat::Auto)
    }

    fn decode_mp3(&self, contents: &[u8]) -> Result<DecodedAudio, DecodeError> {
        self.decode_bytes(contents, AudioFormat::Mp3)
    }
}

impl SymphoniaDecoder {
    /// Decode an in-memory byte blob
    ///
    /// # Arguments
    ///
    /// * `contents` - Encoded audio bytes
    /// * `format` - `Auto` to accept any supported codec, `Mp3` to reject everything else
    ///
    /// # Returns
    ///
    /// Decoded i16 grid with the stream's sample rate
    ///
    /// # Errors
    ///
    /// - `InvalidInput` for empty contents
    /// - `UnsupportedFormat` when no reader/codec matches, or a non-MP3 track on the MP3 path
    /// - `DecodingError` for malformed streams
    fn decode_bytes(
        &self,
        contents: &[u8],
        format: AudioFormat,
    ) -> Result<DecodedAudio, DecodeError> {
        log::debug!("Decoding {} bytes ({})", contents.len(), format.name());

        if contents.is_empty() {
            return Err(DecodeError::InvalidInput("Empty audio contents".to_string()));
        }

        let src = Cursor::new(contents.to_vec());
        let mss = MediaSourceStream::new(Box::new(src), Default::default());

        let mut hint = Hint::new();
        if format == AudioFormat::Mp3 {
            hint.with_extension("mp3").mime_type("audio/mpeg");
        }

        let meta_opts: MetadataOptions = Default::default();
        let fmt_opts: FormatOptions = Default::default();

        let probed = get_probe().format(&hint, mss, &fmt_opts, &meta_opts)?;
        let mut reader = probed.format;

        let track = reader
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(|| {
                DecodeError::DecodingError("No supported audio tracks found".to_string())
            })?;

        if format == AudioFormat::Mp3 && track.codec_params.codec != CODEC_TYPE_MP3 {
            let codec_name = get_codecs()
                .get_codec(track.codec_params.codec)
                .map_or("unknown", |d| d.short_name);
            return Err(DecodeError::UnsupportedFormat(format!(
                "Expected an MP3 stream, found codec '{}'",
                codec_name
            )));
        }

        let track_id = track.id;
        let codec_params = track.codec_params.clone();
        let mut decoder = get_codecs().make(&codec_params, &DecoderOptions::default())?;

        let mut sample_rate = codec_params.sample_rate;
        let mut channels: Option<usize> = None;
        let mut interleaved: Vec<i16> = Vec::new();
        let mut skipped_packets = 0usize;

        loop {
            let packet = match reader.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    break;
                }
                Err(e) => return Err(e.into()),
            };

            if packet.track_id() != track_id {
                continue;
            }

            match decoder.decode(&packet) {
                Ok(decoded) => {
                    let spec = *decoded.spec();
                    let packet_channels = spec.channels.count();

                    match channels {
                        None => channels = Some(packet_channels),
                        Some(expected) if expected != packet_channels => {
                            return Err(DecodeError::DecodingError(format!(
                                "Channel count changed mid-stream from {} to {}",
                                expected, packet_channels
                            )));
                        }
                        Some(_) => {}
                    }
                    if sample_rate.is_none() {
                        sample_rate = Some(spec.rate);
                    }

                    if decoded.frames() == 0 {
                        continue;
                    }

                    let mut buf = SampleBuffer::<i16>::new(decoded.capacity() as u64, spec);
                    buf.copy_interleaved_ref(decoded);
                    interleaved.extend_from_slice(buf.samples());
                }
                Err(SymphoniaError::DecodeError(msg)) if self.skip_corrupt_packets => {
                    // Skip decode errors (corrupted packets)
                    skipped_packets += 1;
                    log::warn!("Skipping corrupt packet {}: {}", packet.ts(), msg);
                }
                Err(e) => return Err(e.into()),
            }
        }

        let sample_rate = sample_rate.ok_or_else(|| {
            DecodeError::DecodingError("Stream does not declare a sample rate".to_string())
        })?;
        let channels = channels
            .or_else(|| codec_params.channels.map(|c| c.count()))
            .unwrap_or(0);

        let audio = DecodedAudio::from_interleaved(&interleaved, channels, sample_rate)?;

        log::debug!(
            "Decoded {} channels x {} samples at {} Hz ({} packets skipped)",
            audio.channels(),
            audio.samples(),
            audio.sample_rate(),
            skipped_packets
        );

        Ok(audio)
    }
}
