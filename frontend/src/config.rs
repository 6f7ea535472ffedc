use log::Level;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug  // Verbose console output when running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

pub const THEME_STORAGE_KEY: &str = "inkwell:theme";

// Timings in milliseconds
pub const THEME_TRANSITION_MS: u32 = 500;
pub const PRESS_FEEDBACK_MS: u32 = 150;
pub const SEARCH_DEBOUNCE_MS: u32 = 300;
pub const SEARCH_FOCUS_DELAY_MS: u32 = 300;
pub const NEWSLETTER_DELAY_MS: u32 = 2000;
pub const NEWSLETTER_RESET_MS: u32 = 3000;
pub const CONTACT_DELAY_MS: u32 = 1500;
pub const NOTIFICATION_LIFETIME_MS: u32 = 5000;
pub const NOTIFICATION_EXIT_MS: u32 = 300;
pub const RIPPLE_LIFETIME_MS: u32 = 600;
pub const TAG_STAGGER_MS: u32 = 50;

/// Gap left between the sticky header and a section scrolled into view.
pub const NAV_SCROLL_GAP: f64 = 20.0;

pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const REVEAL_SELECTOR: &str = ".featured-article, .article-card, .widget, .section__header";

/// Knobs for the scroll controller.
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    /// Header switches to its compact style past this many pixels.
    pub header_threshold: f64,
    /// Extra lookahead below the header when picking the active section.
    pub activation_margin: f64,
    pub parallax_base_speed: f64,
    pub parallax_speed_step: f64,
    /// Degrees of shape rotation per scrolled pixel.
    pub parallax_rotation_rate: f64,
    /// When set, a page without sections is a setup error.
    pub track_active_section: bool,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            header_threshold: 100.0,
            activation_margin: 100.0,
            parallax_base_speed: 0.5,
            parallax_speed_step: 0.1,
            parallax_rotation_rate: 0.1,
            track_active_section: false,
        }
    }
}
