use serde::{Deserialize, Serialize};

/// Mutable width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

impl Size {
    #[must_use]
    pub const fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }

    pub fn set_elements(&mut self, w: f64, h: f64) -> &mut Self {
        self.w = w;
        self.h = h;
        self
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }
}
