use serde::{Deserialize, Serialize};

/// Canvas layers of one plot, listed bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    Background,
    Grid,
    Series,
    Axis,
    Overlay,
    Crosshair,
}

impl CanvasLayerKind {
    /// Paint order used by every plot.
    pub const CANONICAL: [Self; 6] = [
        Self::Background,
        Self::Grid,
        Self::Series,
        Self::Axis,
        Self::Overlay,
        Self::Crosshair,
    ];

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::Background => 0,
            Self::Grid => 1,
            Self::Series => 2,
            Self::Axis => 3,
            Self::Overlay => 4,
            Self::Crosshair => 5,
        }
    }
}
