//! Decoded sample grid
//!
//! [`DecodedAudio`] holds signed 16-bit samples laid out channel-major as a
//! `[channels, samples]` grid, together with the stream's sample rate.

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

/// Full-scale divisor for i16 -> f32 conversion
const I16_SCALE: f32 = 32768.0;

/// Empty buffer with room for a `[channels, samples]` grid
///
/// Fails instead of panicking when the element count overflows or the
/// allocation is refused.
pub(crate) fn grid_storage(channels: usize, samples: usize) -> Result<Vec<i16>, DecodeError> {
    let len = channels.checked_mul(samples).ok_or_else(|| {
        DecodeError::InvalidInput(format!("Grid shape [{}, {}] overflows", channels, samples))
    })?;
    let mut data = Vec::new();
    data.try_reserve_exact(len).map_err(|e| {
        DecodeError::InvalidInput(format!(
            "Cannot allocate grid shape [{}, {}]: {}",
            channels, samples, e
        ))
    })?;
    Ok(data)
}

/// Decoded audio: an i16 `[channels, samples]` grid plus its sample rate
///
/// Both dimensions are stored explicitly, so grids with zero channels or
/// zero samples keep their other dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAudio {
    /// Channel-major samples, `channels * samples` values
    data: Vec<i16>,
    channels: usize,
    samples: usize,
    sample_rate: u32,
}

impl DecodedAudio {
    /// Create a grid from channel-major data
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::InvalidInput` if `data.len() != channels * samples`.
    pub fn new(
        data: Vec<i16>,
        channels: usize,
        samples: usize,
        sample_rate: u32,
    ) -> Result<Self, DecodeError> {
        let expected = channels.checked_mul(samples).ok_or_else(|| {
            DecodeError::InvalidInput(format!("Grid shape [{}, {}] overflows", channels, samples))
        })?;
        if data.len() != expected {
            return Err(DecodeError::InvalidInput(format!(
                "Expected {} values for shape [{}, {}], got {}",
                expected,
                channels,
                samples,
                data.len()
            )));
        }
        Ok(Self {
            data,
            channels,
            samples,
            sample_rate,
        })
    }

    /// Create a grid from one vector per channel
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::InvalidInput` if the rows differ in length.
    ///
    /// # Example
    ///
    /// ```
    /// use stratum_decode::DecodedAudio;
    ///
    /// let audio = DecodedAudio::from_channels(vec![vec![1, 2, 3], vec![4, 5, 6]], 44100)?;
    /// assert_eq!(audio.shape(), [2, 3]);
    /// assert_eq!(audio.channel(1), Some(&[4, 5, 6][..]));
    /// # Ok::<(), stratum_decode::DecodeError>(())
    /// ```
    pub fn from_channels(rows: Vec<Vec<i16>>, sample_rate: u32) -> Result<Self, DecodeError> {
        let channels = rows.len();
        let samples = rows.first().map_or(0, Vec::len);
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != samples) {
            return Err(DecodeError::InvalidInput(format!(
                "Channel {} has {} samples, channel 0 has {}",
                idx,
                row.len(),
                samples
            )));
        }
        let data = rows.into_iter().flatten().collect();
        Self::new(data, channels, samples, sample_rate)
    }

    /// Create a grid from frame-interleaved samples (`L R L R ...`)
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::InvalidInput` if `channels` is zero while samples
    /// are present, or the sample count is not a multiple of `channels`.
    pub fn from_interleaved(
        interleaved: &[i16],
        channels: usize,
        sample_rate: u32,
    ) -> Result<Self, DecodeError> {
        if channels == 0 {
            if interleaved.is_empty() {
                return Ok(Self::empty(0, sample_rate));
            }
            return Err(DecodeError::InvalidInput(
                "Interleaved samples present but channel count is zero".to_string(),
            ));
        }
        if interleaved.len() % channels != 0 {
            return Err(DecodeError::InvalidInput(format!(
                "{} interleaved samples do not divide into {} channels",
                interleaved.len(),
                channels
            )));
        }

        let samples = interleaved.len() / channels;
        let mut data = vec![0i16; interleaved.len()];
        for (frame_idx, frame) in interleaved.chunks_exact(channels).enumerate() {
            for (ch, &value) in frame.iter().enumerate() {
                data[ch * samples + frame_idx] = value;
            }
        }
        Self::new(data, channels, samples, sample_rate)
    }

    /// Grid with `channels` rows and no samples
    pub fn empty(channels: usize, sample_rate: u32) -> Self {
        Self {
            data: Vec::new(),
            channels,
            samples: 0,
            sample_rate,
        }
    }

    /// Silent grid of the given shape
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::InvalidInput` if the shape cannot be allocated.
    pub fn zeros(channels: usize, samples: usize, sample_rate: u32) -> Result<Self, DecodeError> {
        let mut data = grid_storage(channels, samples)?;
        data.resize(channels * samples, 0);
        Self::new(data, channels, samples, sample_rate)
    }

    /// Number of channels (rows)
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Number of samples per channel (columns)
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// `[channels, samples]`
    pub fn shape(&self) -> [usize; 2] {
        [self.channels, self.samples]
    }

    /// Whether the grid holds no sample values
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Channel-major sample values
    pub fn as_slice(&self) -> &[i16] {
        &self.data
    }

    /// Samples of one channel
    pub fn channel(&self, index: usize) -> Option<&[i16]> {
        if index >= self.channels {
            return None;
        }
        let start = index * self.samples;
        Some(&self.data[start..start + self.samples])
    }

    /// Iterate over channels in order
    pub fn channels_iter(&self) -> impl Iterator<Item = &[i16]> + '_ {
        (0..self.channels).map(move |ch| {
            let start = ch * self.samples;
            &self.data[start..start + self.samples]
        })
    }

    /// Frame-interleaved copy of the samples (`L R L R ...`)
    pub fn to_interleaved(&self) -> Vec<i16> {
        let mut out = Vec::with_capacity(self.data.len());
        for frame in 0..self.samples {
            for ch in 0..self.channels {
                out.push(self.data[ch * self.samples + frame]);
            }
        }
        out
    }

    /// Per-channel samples normalized to [-1.0, 1.0)
    pub fn to_f32_channels(&self) -> Vec<Vec<f32>> {
        self.channels_iter()
            .map(|row| row.iter().map(|&s| s as f32 / I16_SCALE).collect())
            .collect()
    }

    /// Duration in seconds (0.0 when the sample rate is unknown)
    pub fn duration_seconds(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples as f32 / self.sample_rate as f32
    }

    /// Serializable summary of the grid
    pub fn info(&self) -> AudioInfo {
        AudioInfo {
            channels: self.channels,
            samples: self.samples,
            sample_rate: self.sample_rate,
            duration_seconds: self.duration_seconds(),
        }
    }

    /// Split into `(channel-major data, sample_rate)`
    pub fn into_parts(self) -> (Vec<i16>, u32) {
        (self.data, self.sample_rate)
    }

    /// Consume into channel-major data; used by the shape normalizer
    pub(crate) fn into_data(self) -> Vec<i16> {
        self.data
    }
}

/// Summary of a decoded grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioInfo {
    /// Channel count
    pub channels: usize,
    /// Samples per channel
    pub samples: usize,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Duration in seconds
    pub duration_seconds: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_wrong_length() {
        let result = DecodedAudio::new(vec![1, 2, 3], 2, 2, 8000);
        assert!(matches!(result, Err(DecodeError::InvalidInput(_))));
    }

    #[test]
    fn test_from_channels_ragged() {
        let result = DecodedAudio::from_channels(vec![vec![1, 2], vec![3]], 8000);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_interleaved_stereo() {
        let audio = DecodedAudio::from_interleaved(&[1, -1, 2, -2, 3, -3], 2, 22050).unwrap();
        assert_eq!(audio.shape(), [2, 3]);
        assert_eq!(audio.channel(0).unwrap(), &[1, 2, 3]);
        assert_eq!(audio.channel(1).unwrap(), &[-1, -2, -3]);
        assert_eq!(audio.to_interleaved(), vec![1, -1, 2, -2, 3, -3]);
    }

    #[test]
    fn test_from_interleaved_uneven() {
        let result = DecodedAudio::from_interleaved(&[1, 2, 3], 2, 8000);
        assert!(result.is_err());
        let result = DecodedAudio::from_interleaved(&[1], 0, 8000);
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_sized_dimensions() {
        let audio = DecodedAudio::new(vec![], 0, 5, 16000).unwrap();
        assert_eq!(audio.shape(), [0, 5]);
        assert!(audio.is_empty());
        assert_eq!(audio.channels_iter().count(), 0);

        let audio = DecodedAudio::zeros(3, 0, 16000).unwrap();
        assert_eq!(audio.shape(), [3, 0]);
        assert_eq!(audio.channel(2), Some(&[][..]));
        assert_eq!(audio.channel(3), None);
    }

    #[test]
    fn test_zeros_rejects_oversized_shape() {
        let result = DecodedAudio::zeros(usize::MAX, 2, 8000);
        assert!(matches!(result, Err(DecodeError::InvalidInput(_))));

        // Element count fits in usize, byte count does not
        let result = DecodedAudio::zeros(1, usize::MAX / 2, 8000);
        assert!(matches!(result, Err(DecodeError::InvalidInput(_))));
    }

    #[test]
    fn test_f32_conversion_and_duration() {
        let audio = DecodedAudio::from_channels(vec![vec![0, 16384, -32768, 32767]], 4).unwrap();
        let f = audio.to_f32_channels();
        assert_eq!(f[0][0], 0.0);
        assert!((f[0][1] - 0.5).abs() < 1e-6);
        assert_eq!(f[0][2], -1.0);
        assert!(f[0][3] < 1.0);
        assert!((audio.duration_seconds() - 1.0).abs() < 1e-6);
        assert_eq!(DecodedAudio::empty(1, 0).duration_seconds(), 0.0);
    }

    #[test]
    fn test_info_serializes() {
        let info = DecodedAudio::zeros(2, 44100, 44100).unwrap().info();
        assert_eq!(info.channels, 2);
        assert_eq!(info.samples, 44100);
        assert!((info.duration_seconds - 1.0).abs() < 1e-6);

        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"sample_rate\":44100"));
        let back: AudioInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, info);
    }
}
