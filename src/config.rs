//! Configuration parameters for decoding and shape normalization

/// Requested size of one axis of the decoded grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dimension {
    /// Keep whatever size the decoder produced
    #[default]
    Unconstrained,
    /// Force the axis to exactly this size
    Exact(usize),
}

impl Dimension {
    /// Build a dimension from the signed sentinel form
    ///
    /// Any negative value (conventionally `-1`) means unconstrained;
    /// non-negative values are absolute sizes.
    ///
    /// # Example
    ///
    /// ```
    /// use stratum_decode::Dimension;
    ///
    /// assert_eq!(Dimension::from_signed(-1), Dimension::Unconstrained);
    /// assert_eq!(Dimension::from_signed(-7), Dimension::Unconstrained);
    /// assert_eq!(Dimension::from_signed(0), Dimension::Exact(0));
    /// assert_eq!(Dimension::from_signed(16000), Dimension::Exact(16000));
    /// ```
    pub fn from_signed(value: i64) -> Self {
        if value < 0 {
            Dimension::Unconstrained
        } else {
            // Saturate on narrow targets; oversized grids are rejected downstream.
            Dimension::Exact(usize::try_from(value).unwrap_or(usize::MAX))
        }
    }

    /// The exact size, if one was requested
    pub fn exact(self) -> Option<usize> {
        match self {
            Dimension::Unconstrained => None,
            Dimension::Exact(n) => Some(n),
        }
    }

    /// Resolve against the size currently present on the axis
    pub fn resolve(self, current: usize) -> usize {
        self.exact().unwrap_or(current)
    }
}

impl From<Option<usize>> for Dimension {
    fn from(value: Option<usize>) -> Self {
        value.map_or(Dimension::Unconstrained, Dimension::Exact)
    }
}

impl From<usize> for Dimension {
    fn from(value: usize) -> Self {
        Dimension::Exact(value)
    }
}

/// Target shape for a decoded `[channels, samples]` grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShapeRequest {
    /// Desired channel count (rows)
    pub channels: Dimension,
    /// Desired sample count per channel (columns)
    pub samples: Dimension,
}

impl ShapeRequest {
    /// Shape request that leaves both axes untouched
    pub fn unconstrained() -> Self {
        Self::default()
    }

    /// Whether applying this request can never change a grid
    pub fn is_identity(&self) -> bool {
        self.channels == Dimension::Unconstrained && self.samples == Dimension::Unconstrained
    }
}

/// Decode configuration parameters
#[derive(Debug, Clone)]
pub struct DecodeConfig {
    /// Number of output channels (default: Unconstrained)
    /// More channels than the source are filled by replicating a mono source;
    /// fewer keep only the leading channels
    pub desired_channels: Dimension,

    /// Number of output samples per channel (default: Unconstrained)
    /// Longer outputs are zero-padded on the right, shorter ones truncated
    pub desired_samples: Dimension,

    /// Skip packets the codec reports as corrupt instead of failing (default: true)
    pub skip_corrupt_packets: bool,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            desired_channels: Dimension::Unconstrained,
            desired_samples: Dimension::Unconstrained,
            skip_corrupt_packets: true,
        }
    }
}

impl DecodeConfig {
    /// Build a config from signed sentinels (`-1` = unconstrained)
    pub fn from_sentinels(desired_channels: i64, desired_samples: i64) -> Self {
        Self {
            desired_channels: Dimension::from_signed(desired_channels),
            desired_samples: Dimension::from_signed(desired_samples),
            ..Self::default()
        }
    }

    /// Request an exact channel count
    pub fn with_channels(mut self, channels: usize) -> Self {
        self.desired_channels = Dimension::Exact(channels);
        self
    }

    /// Request an exact sample count per channel
    pub fn with_samples(mut self, samples: usize) -> Self {
        self.desired_samples = Dimension::Exact(samples);
        self
    }

    /// Shape the decoded grid will be normalized to
    pub fn shape(&self) -> ShapeRequest {
        ShapeRequest {
            channels: self.desired_channels,
            samples: self.desired_samples,
        }
    }
}
