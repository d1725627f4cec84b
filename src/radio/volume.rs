//! Slider to playback volume curve.
//!
//! The first half of the slider covers the quiet range (0 to 30%), the second
//! half tops out at 70% so the stream never gets too loud too fast.

pub const SLIDER_MAX: u8 = 100;
const SLIDER_KNEE: f64 = 50.0;
const VOLUME_KNEE: f64 = 0.3;
const VOLUME_CEILING: f64 = 0.7;
pub const MAX_VOLUME: f32 = VOLUME_CEILING as f32;

/// Startup volume (slider ~63)
pub const DEFAULT_VOLUME: f32 = 0.4;

/// Slider steps per key press
pub const SLIDER_STEP: u8 = 5;

pub fn slider_to_volume(slider: u8) -> f32 {
    let s = f64::from(slider.min(SLIDER_MAX));
    let volume = if s <= SLIDER_KNEE {
        (s / SLIDER_KNEE) * VOLUME_KNEE
    } else {
        VOLUME_KNEE + ((s - SLIDER_KNEE) / SLIDER_KNEE) * (VOLUME_CEILING - VOLUME_KNEE)
    };
    volume as f32
}

/// Exact inverse of [`slider_to_volume`], rounded to a slider position.
pub fn volume_to_slider(volume: f32) -> u8 {
    let v = if volume.is_finite() {
        f64::from(volume).clamp(0.0, VOLUME_CEILING)
    } else {
        0.0
    };

    let slider = if v <= VOLUME_KNEE {
        (v / VOLUME_KNEE) * SLIDER_KNEE
    } else {
        SLIDER_KNEE + ((v - VOLUME_KNEE) / (VOLUME_CEILING - VOLUME_KNEE)) * SLIDER_KNEE
    };

    slider.round().clamp(0.0, f64::from(SLIDER_MAX)) as u8
}

/// Clamp a persisted volume into the playable range.
pub fn sanitize_volume(volume: f32) -> f32 {
    if volume.is_finite() {
        volume.clamp(0.0, MAX_VOLUME)
    } else {
        DEFAULT_VOLUME
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeIcon {
    Muted,
    Low,
    High,
}

impl VolumeIcon {
    pub fn for_volume(volume: f32) -> Self {
        if volume <= 0.0 {
            Self::Muted
        } else if volume < 0.5 {
            Self::Low
        } else {
            Self::High
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Self::Muted => "🔇",
            Self::Low => "🔉",
            Self::High => "🔊",
        }
    }
}
