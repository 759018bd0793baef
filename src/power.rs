//! Mains power supervision.
//!
//! On loss the clock saves its time and reboots into a state where only
//! timekeeping runs; on restore it saves again and reboots normally. The
//! monitor only decides which of those is due. [`VfdClock`](crate::VfdClock)
//! carries them out.

/// What the clock is running on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    /// Mains present: tube, buttons, buzzer and dimmer all active.
    #[default]
    Normal,
    /// Running from the backup cell: timekeeping only.
    LowPower,
}

/// Work required after a power signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerAction {
    /// Signal agrees with the current mode.
    None,
    /// Shut the peripherals down, checkpoint, reboot into low power.
    EnterLowPower,
    /// Checkpoint and reboot with everything on.
    Restore,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PowerMonitor {
    mode: PowerMode,
}

impl PowerMonitor {
    pub const fn new(mode: PowerMode) -> Self {
        Self { mode }
    }

    /// Feeds the level of the power-present line and transitions the mode.
    pub fn signal(&mut self, present: bool) -> PowerAction {
        match (self.mode, present) {
            (PowerMode::Normal, false) => {
                warn!("mains lost");
                self.mode = PowerMode::LowPower;
                PowerAction::EnterLowPower
            }
            (PowerMode::LowPower, true) => {
                info!("mains restored");
                self.mode = PowerMode::Normal;
                PowerAction::Restore
            }
            _ => PowerAction::None,
        }
    }

    pub fn mode(&self) -> PowerMode {
        self.mode
    }
}
