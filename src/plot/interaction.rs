use serde::{Deserialize, Serialize};

/// Crosshair position in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CrosshairState {
    pub visible: bool,
    pub x: f64,
    pub y: f64,
}

/// Pointer tracking for one plot.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InteractionState {
    cursor_x: f64,
    cursor_y: f64,
    crosshair: CrosshairState,
}

impl InteractionState {
    /// Last pointer position in CSS pixels.
    #[must_use]
    pub fn cursor(self) -> (f64, f64) {
        (self.cursor_x, self.cursor_y)
    }

    #[must_use]
    pub fn crosshair(self) -> CrosshairState {
        self.crosshair
    }

    pub fn on_pointer_move(&mut self, css_x: f64, css_y: f64, device_x: f64, device_y: f64) {
        self.cursor_x = css_x;
        self.cursor_y = css_y;
        self.crosshair.visible = true;
        self.crosshair.x = device_x;
        self.crosshair.y = device_y;
    }

    pub fn on_pointer_leave(&mut self) {
        self.crosshair.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::InteractionState;

    #[test]
    fn leave_hides_but_keeps_last_position() {
        let mut state = InteractionState::default();
        state.on_pointer_move(10.0, 20.0, 20.0, 40.0);
        assert!(state.crosshair().visible);
        state.on_pointer_leave();
        assert!(!state.crosshair().visible);
        assert_eq!(state.cursor(), (10.0, 20.0));
    }
}
