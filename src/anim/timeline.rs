//! Globaler Wiedergabezustand: Frame-Anzahl, Framerate, aktueller Frame.
//!
//! Keyframes gehören den einzelnen Spuren; die Timeline kennt nur Zeit.

use serde::{Deserialize, Serialize};

/// Standard-Anzahl Frames einer neuen Timeline
pub const DEFAULT_FRAMES: u32 = 180;
/// Standard-Framerate (Frames pro Sekunde)
pub const DEFAULT_FRAME_RATE: f64 = 30.0;
/// Standard-Glättung der Keyframe-Splines
pub const DEFAULT_SMOOTHNESS: f64 = 1.0;

/// Richtung für die Keyframe-Navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyDirection {
    /// Zum vorherigen Key (bzw. auf den Key am aktuellen Frame zurück)
    Back,
    /// Zum nächsten Key nach dem aktuellen Frame
    Forward,
}

/// Wiedergabezustand der Animation.
///
/// Beim Einlesen laufen alle Werte durch die Setter, ungültige Angaben
/// fallen auf die Standardwerte zurück bzw. werden begrenzt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TimelineData")]
pub struct Timeline {
    frames: u32,
    frame_rate: f64,
    smoothness: f64,
    frame: u32,
    #[serde(skip)]
    playing: bool,
    /// Kontinuierliche Zeit in Frames, nur während der Wiedergabe relevant
    #[serde(skip)]
    time: f64,
}

impl Default for Timeline {
    fn default() -> Self {
        Self {
            frames: DEFAULT_FRAMES,
            frame_rate: DEFAULT_FRAME_RATE,
            smoothness: DEFAULT_SMOOTHNESS,
            frame: 0,
            playing: false,
            time: 0.0,
        }
    }
}

/// Rohdaten einer Timeline, wie sie in Dokumenten stehen.
#[derive(Deserialize)]
#[serde(default)]
struct TimelineData {
    frames: u32,
    frame_rate: f64,
    smoothness: f64,
    frame: u32,
}

impl Default for TimelineData {
    fn default() -> Self {
        Self {
            frames: DEFAULT_FRAMES,
            frame_rate: DEFAULT_FRAME_RATE,
            smoothness: DEFAULT_SMOOTHNESS,
            frame: 0,
        }
    }
}

impl From<TimelineData> for Timeline {
    fn from(data: TimelineData) -> Self {
        let mut timeline = Self::default();
        timeline.set_frames(data.frames);
        if !timeline.set_frame_rate(data.frame_rate) && data.frame_rate != DEFAULT_FRAME_RATE {
            log::warn!("Ungültige Framerate {} verworfen", data.frame_rate);
        }
        timeline.set_smoothness(data.smoothness);
        timeline.set_frame(data.frame);
        timeline
    }
}

impl Timeline {
    /// Erstellt eine Timeline mit Standardwerten.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    pub fn smoothness(&self) -> f64 {
        self.smoothness
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Aktuelle Zeit in Frames (gebrochen während der Wiedergabe).
    pub fn time(&self) -> f64 {
        if self.playing {
            self.time
        } else {
            f64::from(self.frame)
        }
    }

    /// Setzt die Frame-Anzahl (mindestens 1). Meldet, ob sich der Wert geändert hat.
    pub fn set_frames(&mut self, frames: u32) -> bool {
        let frames = frames.max(1);
        if frames == self.frames {
            return false;
        }
        self.frames = frames;
        true
    }

    /// Setzt die Framerate; nicht-positive Werte werden ignoriert.
    pub fn set_frame_rate(&mut self, frame_rate: f64) -> bool {
        if frame_rate.is_nan() || frame_rate <= 0.0 || frame_rate == self.frame_rate {
            return false;
        }
        self.frame_rate = frame_rate;
        true
    }

    /// Setzt die Spline-Glättung (auf `0..=1` begrenzt).
    pub fn set_smoothness(&mut self, smoothness: f64) -> bool {
        let smoothness = smoothness.clamp(0.0, 1.0);
        if smoothness == self.smoothness {
            return false;
        }
        self.smoothness = smoothness;
        true
    }

    /// Springt auf einen Frame. Werte jenseits des Endes werden nicht begrenzt.
    pub fn set_frame(&mut self, frame: u32) -> bool {
        if frame == self.frame {
            return false;
        }
        self.frame = frame;
        self.time = f64::from(frame);
        true
    }

    /// Startet bzw. stoppt die Wiedergabe ab dem aktuellen Frame.
    pub fn set_playing(&mut self, playing: bool) -> bool {
        if playing == self.playing {
            return false;
        }
        self.playing = playing;
        if playing {
            self.time = f64::from(self.frame);
        }
        true
    }

    pub fn toggle_play(&mut self) -> bool {
        self.set_playing(!self.playing)
    }

    /// Schreitet die Wiedergabe um `dt` Sekunden fort.
    ///
    /// Liefert die neue Zeit, wenn die Timeline läuft. Die Zeit läuft
    /// modulo `frames` im Kreis.
    pub fn tick(&mut self, dt: f64) -> Option<f64> {
        if !self.playing {
            return None;
        }
        self.time = (self.time + dt * self.frame_rate).rem_euclid(f64::from(self.frames));
        self.frame = self.time.floor() as u32;
        Some(self.time)
    }

    /// Einen Frame zurück, vor Frame 0 auf den letzten Frame.
    pub fn prev_frame(&mut self) -> bool {
        let frames = u64::from(self.frames.max(1));
        let target = (u64::from(self.frame) % frames + frames - 1) % frames;
        self.set_frame(target as u32)
    }

    /// Einen Frame vor, nach dem letzten Frame auf Frame 0.
    pub fn next_frame(&mut self) -> bool {
        let frames = u64::from(self.frames.max(1));
        let target = (u64::from(self.frame) + 1) % frames;
        self.set_frame(target as u32)
    }

    /// Springt zum nächsten bzw. vorherigen Key aus `keys`.
    ///
    /// Die Navigation läuft im Kreis. Ohne Keys wird auf den ersten bzw.
    /// letzten Frame gesprungen.
    pub fn skip_to_key(&mut self, keys: &[u32], direction: KeyDirection) -> bool {
        if keys.is_empty() {
            let target = match direction {
                KeyDirection::Back => 0,
                KeyDirection::Forward => self.frames.saturating_sub(1),
            };
            return self.set_frame(target);
        }

        let mut ordered = keys.to_vec();
        ordered.sort_unstable();
        let len = ordered.len();
        let frame = self.frame;

        let next = ordered.iter().position(|&k| match direction {
            KeyDirection::Back => k >= frame,
            KeyDirection::Forward => k > frame,
        });
        let target = match (next, direction) {
            (None, KeyDirection::Back) => ordered[len - 1],
            (None, KeyDirection::Forward) => ordered[0],
            (Some(idx), KeyDirection::Back) => ordered[(idx + len - 1) % len],
            (Some(idx), KeyDirection::Forward) => ordered[idx],
        };
        self.set_frame(target)
    }
}
