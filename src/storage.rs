//! Control state persistence
//!
//! Settings occupy four bytes starting at a caller chosen base address:
//! hue offset, pattern index, color index and brightness, in that order.

use embedded_storage::{ReadStorage, Storage};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::ColorId;
use crate::control::ControlState;
use crate::pattern::PatternId;

/// Number of bytes taken by persisted settings
pub const SETTINGS_LEN: usize = 4;

const HUE_OFFSET: usize = 0;
const PATTERN: usize = 1;
const COLOR: usize = 2;
const BRIGHTNESS: usize = 3;

/// Persisted form of a [`ControlState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Settings([u8; SETTINGS_LEN]);

impl Settings {
    pub const fn from_bytes(bytes: [u8; SETTINGS_LEN]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; SETTINGS_LEN] {
        &self.0
    }

    /// Decode into a control state
    ///
    /// Pattern and color indices outside their registries select entry 0,
    /// so a blank or foreign store still yields a usable state.
    pub fn to_control(self) -> ControlState {
        let mut control = ControlState {
            hue_offset: self.0[HUE_OFFSET],
            brightness: self.0[BRIGHTNESS],
            ..ControlState::default()
        };
        control.set_pattern_index(self.0[PATTERN]);
        control.set_color_index(self.0[COLOR]);
        control
    }
}

impl From<&ControlState> for Settings {
    fn from(control: &ControlState) -> Self {
        let mut bytes = [0; SETTINGS_LEN];
        bytes[HUE_OFFSET] = control.hue_offset;
        bytes[PATTERN] = control.pattern_index.min(PatternId::COUNT - 1);
        bytes[COLOR] = control.color_index.min(ColorId::COUNT - 1);
        bytes[BRIGHTNESS] = control.brightness;
        Self(bytes)
    }
}

/// Read settings stored at `address`
pub fn load_settings<S: ReadStorage>(storage: &mut S, address: u32) -> Result<ControlState, S::Error> {
    let mut bytes = [0; SETTINGS_LEN];
    storage.read(address, &mut bytes)?;
    let control = Settings::from_bytes(bytes).to_control();
    #[cfg(feature = "esp32-log")]
    println!(
        "[storage] loaded pattern {} color {}",
        control.pattern().as_str(),
        control.color().as_str()
    );
    Ok(control)
}

/// Store settings at `address`
///
/// Bytes are only written when they differ from what is stored. Returns
/// whether a write happened.
pub fn save_settings<S: Storage>(
    storage: &mut S,
    address: u32,
    control: &ControlState,
) -> Result<bool, S::Error> {
    let settings = Settings::from(control);
    let mut stored = [0; SETTINGS_LEN];
    storage.read(address, &mut stored)?;
    if &stored == settings.as_bytes() {
        return Ok(false);
    }
    storage.write(address, settings.as_bytes())?;
    #[cfg(feature = "esp32-log")]
    println!("[storage] saved settings at {:#x}", address);
    Ok(true)
}
