// Fixed target-metric vocabulary and the direction of each metric.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether higher or lower raw values are considered better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    HigherIsBetter,
    LowerIsBetter,
}

/// One statistic of the target vocabulary.
///
/// Declaration order is the vocabulary order: the resolver walks metrics in
/// this order and result tables lay out their columns the same way. The serde
/// names are the display names, so a mapping file reads `"K%" = "K Rate"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Metric {
    #[serde(rename = "xwOBA")]
    XwOba,
    #[serde(rename = "xBA")]
    XBa,
    #[serde(rename = "xSLG")]
    XSlg,
    #[serde(rename = "xISO")]
    XIso,
    #[serde(rename = "xOBP")]
    XObp,
    #[serde(rename = "Brl")]
    Barrels,
    #[serde(rename = "Brl%")]
    BarrelPct,
    #[serde(rename = "EV")]
    ExitVelocity,
    #[serde(rename = "Max EV")]
    MaxExitVelocity,
    #[serde(rename = "HardHit%")]
    HardHitPct,
    #[serde(rename = "K%")]
    StrikeoutPct,
    #[serde(rename = "BB%")]
    WalkPct,
    #[serde(rename = "Whiff%")]
    WhiffPct,
    #[serde(rename = "Chase%")]
    ChasePct,
    #[serde(rename = "Speed")]
    Speed,
    #[serde(rename = "OAA")]
    OutsAboveAverage,
    #[serde(rename = "Arm Strength")]
    ArmStrength,
    #[serde(rename = "Bat Speed")]
    BatSpeed,
    #[serde(rename = "Squared-up Rate")]
    SquaredUpRate,
    #[serde(rename = "Swing Length")]
    SwingLength,
    #[serde(rename = "Contact%")]
    ContactPct,
}

impl Metric {
    /// The full vocabulary in order.
    pub const ALL: [Metric; 21] = [
        Metric::XwOba,
        Metric::XBa,
        Metric::XSlg,
        Metric::XIso,
        Metric::XObp,
        Metric::Barrels,
        Metric::BarrelPct,
        Metric::ExitVelocity,
        Metric::MaxExitVelocity,
        Metric::HardHitPct,
        Metric::StrikeoutPct,
        Metric::WalkPct,
        Metric::WhiffPct,
        Metric::ChasePct,
        Metric::Speed,
        Metric::OutsAboveAverage,
        Metric::ArmStrength,
        Metric::BatSpeed,
        Metric::SquaredUpRate,
        Metric::SwingLength,
        Metric::ContactPct,
    ];

    /// Metrics where a lower raw value ranks higher.
    pub const LOWER_IS_BETTER: [Metric; 4] = [
        Metric::StrikeoutPct,
        Metric::ChasePct,
        Metric::WhiffPct,
        Metric::SwingLength,
    ];

    /// Display name, e.g. `"Max EV"`.
    pub fn name(self) -> &'static str {
        match self {
            Metric::XwOba => "xwOBA",
            Metric::XBa => "xBA",
            Metric::XSlg => "xSLG",
            Metric::XIso => "xISO",
            Metric::XObp => "xOBP",
            Metric::Barrels => "Brl",
            Metric::BarrelPct => "Brl%",
            Metric::ExitVelocity => "EV",
            Metric::MaxExitVelocity => "Max EV",
            Metric::HardHitPct => "HardHit%",
            Metric::StrikeoutPct => "K%",
            Metric::WalkPct => "BB%",
            Metric::WhiffPct => "Whiff%",
            Metric::ChasePct => "Chase%",
            Metric::Speed => "Speed",
            Metric::OutsAboveAverage => "OAA",
            Metric::ArmStrength => "Arm Strength",
            Metric::BatSpeed => "Bat Speed",
            Metric::SquaredUpRate => "Squared-up Rate",
            Metric::SwingLength => "Swing Length",
            Metric::ContactPct => "Contact%",
        }
    }

    /// Look up a metric by its exact display name.
    pub fn from_name(name: &str) -> Option<Metric> {
        Metric::ALL.into_iter().find(|m| m.name() == name)
    }

    pub fn direction(self) -> Direction {
        if Metric::LOWER_IS_BETTER.contains(&self) {
            Direction::LowerIsBetter
        } else {
            Direction::HigherIsBetter
        }
    }

    /// Position of this metric in [`Metric::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
