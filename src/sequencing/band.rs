#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named target beat frequency
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyBand {
    /// Display name (only used for status output)
    pub name: String,
    /// Center frequency in Hz
    pub hertz: f64,
}

impl FrequencyBand {
    pub fn new(name: impl Into<String>, hertz: f64) -> Self {
        Self {
            name: name.into(),
            hertz,
        }
    }
}

impl std::fmt::Display for FrequencyBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({} Hz)", self.name, self.hertz)
    }
}

/// Parses `NAME=HZ`, e.g. `Alpha=8` or `Sigma=13.5`.
impl std::str::FromStr for FrequencyBand {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, hertz) = s
            .split_once('=')
            .ok_or_else(|| ScheduleError::Malformed(s.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ScheduleError::Malformed(s.to_string()));
        }
        let hertz: f64 = hertz
            .trim()
            .parse()
            .map_err(|_| ScheduleError::Malformed(s.to_string()))?;
        Ok(Self::new(name, hertz))
    }
}

/// One synthesized step of a schedule: `from` blending into `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition<'a> {
    /// Zero-based count of transitions since the run started
    pub index: usize,
    pub from: &'a FrequencyBand,
    pub to: &'a FrequencyBand,
}

/// An ordered, cyclic list of bands. The last band wraps to the first.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<FrequencyBand>", into = "Vec<FrequencyBand>"))]
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    bands: Vec<FrequencyBand>,
}

impl Schedule {
    /// Build a schedule, rejecting empty lists and non-positive frequencies.
    pub fn new(bands: Vec<FrequencyBand>) -> Result<Self, ScheduleError> {
        if bands.is_empty() {
            return Err(ScheduleError::Empty);
        }
        if let Some(band) = bands
            .iter()
            .find(|b| !(b.hertz.is_finite() && b.hertz > 0.0))
        {
            return Err(ScheduleError::InvalidBand(band.clone()));
        }
        Ok(Self { bands })
    }

    /// Delta → Theta → Alpha → Beta → Gamma.
    pub fn brainwaves() -> Self {
        Self {
            bands: vec![
                FrequencyBand::new("Delta", 1.0),
                FrequencyBand::new("Theta", 4.0),
                FrequencyBand::new("Alpha", 8.0),
                FrequencyBand::new("Beta", 12.0),
                FrequencyBand::new("Gamma", 30.0),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    pub fn bands(&self) -> &[FrequencyBand] {
        &self.bands
    }

    /// Band at `index`, wrapping past the end.
    pub fn band(&self, index: usize) -> &FrequencyBand {
        &self.bands[index % self.bands.len()]
    }

    /// The `index`-th transition of an endless traversal.
    ///
    /// Transition `k` always pairs band `k mod n` with band `(k + 1) mod n`.
    pub fn transition(&self, index: usize) -> Transition<'_> {
        Transition {
            index,
            from: self.band(index),
            to: self.band(index + 1),
        }
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::brainwaves()
    }
}

impl TryFrom<Vec<FrequencyBand>> for Schedule {
    type Error = ScheduleError;

    fn try_from(bands: Vec<FrequencyBand>) -> Result<Self, Self::Error> {
        Self::new(bands)
    }
}

impl From<Schedule> for Vec<FrequencyBand> {
    fn from(schedule: Schedule) -> Self {
        schedule.bands
    }
}

/// Errors that can occur when building a schedule
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// A schedule needs at least one band
    Empty,
    /// Band frequency is zero, negative or not finite
    InvalidBand(FrequencyBand),
    /// Band text was not `NAME=HZ`
    Malformed(String),
}

impl std::fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleError::Empty => write!(f, "Schedule has no bands"),
            ScheduleError::InvalidBand(band) => {
                write!(f, "Band {} must have a positive frequency", band)
            }
            ScheduleError::Malformed(text) => {
                write!(f, "Cannot parse band '{}' (expected NAME=HZ)", text)
            }
        }
    }
}

impl std::error::Error for ScheduleError {}
