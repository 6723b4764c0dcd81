use serde::{Deserialize, Serialize};

/// Semantic colour tokens resolved by the host's palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tone {
    // Globes
    DryLand,
    DryOcean,
    RichLand,
    RichOcean,
    Graticule,

    // Line charts
    TemperatureLine,
    /// Stroke a temperature reveal settles on once drawn.
    TemperatureHighlight,
    Co2Line,
    Co2RateLine,

    // Map layers
    SolarCircle,
    WindCircle,
    HydroCircle,
    CarbonCircle,
    MapLand,

    // Ranking dot strip; the host cycles a categorical palette by rank.
    RankDot,

    StepText,
}
