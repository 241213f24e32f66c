use std::time::Duration;

/// Interactive runtime knobs.
#[derive(Debug, Clone)]
pub struct UiOptions {
    /// Longest wait for input before timers are checked and the frame redrawn.
    pub tick_rate: Duration,
    pub confirm_exit: bool,
    pub show_help: bool,
    /// Capture mouse presses so popups can close on outside clicks.
    pub mouse: bool,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            tick_rate: Duration::from_millis(100),
            confirm_exit: true,
            show_help: true,
            mouse: true,
        }
    }
}

impl UiOptions {
    pub fn with_help(mut self, show: bool) -> Self {
        self.show_help = show;
        self
    }

    pub fn with_confirm_exit(mut self, confirm: bool) -> Self {
        self.confirm_exit = confirm;
        self
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse = enabled;
        self
    }
}
