//! Brightness and volume settings edited from the options overlay.

use face_invaders_core::{Event, OptionKind};

/// Step applied by one left or right press.
pub const OPTION_STEP: u8 = 10;
/// Lowest permitted brightness; the screen never goes fully dark.
pub const MIN_BRIGHTNESS: u8 = 10;
/// Highest value of either setting.
pub const MAX_LEVEL: u8 = 100;

/// Current settings and the entry under the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    brightness: u8,
    volume: u8,
    selected: OptionKind,
}

impl Options {
    /// Creates settings clamped into their permitted ranges.
    #[must_use]
    pub fn new(brightness: u8, volume: u8) -> Self {
        Self {
            brightness: brightness.clamp(MIN_BRIGHTNESS, MAX_LEVEL),
            volume: volume.min(MAX_LEVEL),
            selected: OptionKind::Brightness,
        }
    }

    /// Display brightness percentage.
    #[must_use]
    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Audio volume percentage.
    #[must_use]
    pub const fn volume(&self) -> u8 {
        self.volume
    }

    /// Entry under the cursor.
    #[must_use]
    pub const fn selected(&self) -> OptionKind {
        self.selected
    }

    /// Moves the cursor to the other entry; both directions wrap.
    pub fn cycle(&mut self) {
        self.selected = match self.selected {
            OptionKind::Brightness => OptionKind::Volume,
            OptionKind::Volume => OptionKind::Brightness,
        };
    }

    /// Raises or lowers the selected entry by one step and reports the result.
    pub fn adjust(&mut self, increase: bool) -> Event {
        let step = |level: u8, floor: u8| {
            if increase {
                level.saturating_add(OPTION_STEP).min(MAX_LEVEL)
            } else {
                level.saturating_sub(OPTION_STEP).max(floor)
            }
        };
        match self.selected {
            OptionKind::Brightness => {
                self.brightness = step(self.brightness, MIN_BRIGHTNESS);
                Event::BrightnessChanged {
                    level: self.brightness,
                }
            }
            OptionKind::Volume => {
                self.volume = step(self.volume, 0);
                Event::VolumeChanged { level: self.volume }
            }
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new(MAX_LEVEL, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness_never_drops_below_ten() {
        let mut options = Options::default();
        for _ in 0..15 {
            let _ = options.adjust(false);
        }
        assert_eq!(options.brightness(), MIN_BRIGHTNESS);
        assert_eq!(
            options.adjust(true),
            Event::BrightnessChanged { level: 20 }
        );
    }

    #[test]
    fn volume_is_clamped_to_the_percentage_range() {
        let mut options = Options::default();
        options.cycle();
        assert_eq!(options.adjust(false), Event::VolumeChanged { level: 0 });
        for _ in 0..12 {
            let _ = options.adjust(true);
        }
        assert_eq!(options.volume(), MAX_LEVEL);
        options.cycle();
        assert_eq!(options.selected(), OptionKind::Brightness);
    }
}
