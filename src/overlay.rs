//! Diagnostics snapshot and the text block a HUD overlay draws.
//!
//! The engine never renders text itself; it hands out a [`Diagnostics`]
//! value and, for convenience, the multi-line string an overlay would blit:
//!
//! ```text
//!   1042/frame
//!        60/60
//!       59/120
//!       60/600
//!   113/debris
//!    48/stars
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Horizontal alignment of overlay lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Justification {
    Left,
    Center,
    #[default]
    Right,
}

impl Justification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Justification::Left => "left",
            Justification::Center => "center",
            Justification::Right => "right",
        }
    }

    /// Pad `line` to `width` columns.
    pub fn pad(&self, line: &str, width: usize) -> String {
        match self {
            Justification::Left => format!("{line:<width$}"),
            Justification::Center => format!("{line:^width$}"),
            Justification::Right => format!("{line:>width$}"),
        }
    }
}

impl FromStr for Justification {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Justification::Left),
            "center" => Ok(Justification::Center),
            "right" => Ok(Justification::Right),
            other => Err(ConfigError::InvalidValue {
                field: "justification",
                value: other.to_owned(),
            }),
        }
    }
}

impl TryFrom<String> for Justification {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Justification> for String {
    fn from(value: Justification) -> Self {
        value.as_str().to_owned()
    }
}

impl fmt::Display for Justification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of the engine for a HUD.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    /// Frames recorded so far.
    pub frame: u64,
    pub fps_60: Option<f64>,
    pub fps_120: Option<f64>,
    pub fps_600: Option<f64>,
    /// Population per category, plus `emitters` and `all` (particles and
    /// emitters together).
    pub counts: BTreeMap<String, usize>,
}

impl Diagnostics {
    /// Lines of the overlay, unpadded. Unknown frame rates print as 0.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("{}/frame", self.frame),
            format!("{:.0}/60", self.fps_60.unwrap_or(0.0)),
            format!("{:.0}/120", self.fps_120.unwrap_or(0.0)),
            format!("{:.0}/600", self.fps_600.unwrap_or(0.0)),
        ];
        lines.extend(self.counts.iter().map(|(name, count)| format!("{count}/{name}")));
        lines
    }

    /// Overlay text with every line padded to the widest one.
    pub fn overlay_text(&self, justification: Justification) -> String {
        let lines = self.lines();
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        lines
            .iter()
            .map(|line| justification.pad(line, width))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
