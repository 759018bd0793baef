//! Ambient dimmer: fire-and-forget light readings that pull brightness
//! down to the minimum in a bright room.
//!
//! The slow tick issues a [`request`](AmbientDimmer::request); the board
//! starts the ADC and reports back later through
//! [`complete`](AmbientDimmer::complete). Whether the reading still matters
//! is decided when it arrives, not when it was requested.

use crate::config::ClockConfig;
use crate::context::ClockContext;
use crate::hardware::{BoostConverter, LightSensor};
use crate::types::DisplayMode;

/// Outcome of a conversion completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reading {
    /// Applied; carries the level now on the boost converter.
    Applied(u8),
    /// The dimmer was switched off or the brightness screen took over
    /// while the conversion was in flight.
    Discarded,
    /// No conversion was outstanding.
    Unsolicited,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AmbientDimmer {
    in_flight: bool,
}

impl AmbientDimmer {
    pub const fn new() -> Self {
        Self { in_flight: false }
    }

    /// Starts a conversion if auto-dimming is on. Returns immediately.
    pub fn request<L: LightSensor + ?Sized>(&mut self, ctx: &ClockContext, sensor: &mut L) -> bool {
        if !ctx.dimmer_enabled {
            return false;
        }
        sensor.start_conversion();
        self.in_flight = true;
        true
    }

    /// Handles a finished conversion. Larger raw values mean a darker room.
    pub fn complete<B: BoostConverter + ?Sized>(
        &mut self,
        ctx: &mut ClockContext,
        boost: &mut B,
        config: &ClockConfig,
        raw: u8,
    ) -> Reading {
        if !core::mem::take(&mut self.in_flight) {
            return Reading::Unsolicited;
        }
        if !ctx.dimmer_enabled || ctx.mode == DisplayMode::SetBrightness {
            trace!("stale light reading dropped");
            return Reading::Discarded;
        }
        let target = if raw > config.dimmer_threshold {
            ctx.brightness
        } else {
            config.brightness_min
        };
        Reading::Applied(apply_brightness(ctx, boost, config, target))
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn reset(&mut self) {
        self.in_flight = false;
    }
}

/// Drives the boost converter at `level`, clamped and quantised. The
/// converter is only reprogrammed when the effective level changes.
pub fn apply_brightness<B: BoostConverter + ?Sized>(
    ctx: &mut ClockContext,
    boost: &mut B,
    config: &ClockConfig,
    level: u8,
) -> u8 {
    let level = config.quantize_brightness(level);
    if ctx.applied_brightness != Some(level) {
        boost.set_boost_level(level);
        ctx.applied_brightness = Some(level);
    }
    level
}
