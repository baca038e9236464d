//! Generische Keyframe-Spur: Keys pro Frame plus daraus gebauter Evaluator.
//!
//! Der Evaluator wird bei jeder Key- oder Timeline-Änderung komplett neu
//! aufgebaut; inkrementelle Updates gibt es nicht.

use crate::core::CubicSpline;
use serde::{Deserialize, Serialize};

/// Wert, der sich als feste Anzahl von `f64`-Kanälen interpolieren lässt.
pub trait TrackValue: Clone {
    /// Anzahl der Spline-Kanäle
    const CHANNELS: usize;

    /// Hängt die Kanalwerte an `out` an.
    fn write_channels(&self, out: &mut Vec<f64>);

    /// Baut einen Wert aus interpolierten Kanalwerten.
    fn from_channels(channels: &[f64]) -> Self;
}

/// Ein Keyframe: Wert an einem ganzzahligen Frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Key<V> {
    pub frame: u32,
    pub value: V,
}

/// Parameter der Timeline, von denen der Evaluator abhängt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackParams {
    /// Timeline-Länge in Frames
    pub frames: u32,
    /// Spline-Glättung
    pub smoothness: f64,
}

#[derive(Debug, Clone, Default)]
enum Evaluator<V> {
    #[default]
    Empty,
    Constant(V),
    Spline(CubicSpline),
}

/// Keyframe-Spur mit eindeutigen Frames.
#[derive(Debug, Clone)]
pub struct KeyframeTrack<V> {
    keys: Vec<Key<V>>,
    looping: bool,
    /// Nach Frame sortierte, im Evaluator verwendete Keys
    active: Vec<Key<V>>,
    evaluator: Evaluator<V>,
}

impl<V: TrackValue> KeyframeTrack<V> {
    /// Neue leere Spur. Loopende Spuren schließen den Spline über das
    /// Timeline-Ende zum Anfang.
    pub fn new(looping: bool) -> Self {
        Self {
            keys: Vec::new(),
            looping,
            active: Vec::new(),
            evaluator: Evaluator::Empty,
        }
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Keys in Einfügereihenfolge.
    pub fn keys(&self) -> &[Key<V>] {
        &self.keys
    }

    /// Frames aller Keys.
    pub fn key_frames(&self) -> Vec<u32> {
        self.keys.iter().map(|k| k.frame).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Nach Frame sortierte Keys, die der Evaluator verwendet.
    pub fn active_keys(&self) -> &[Key<V>] {
        &self.active
    }

    /// Setzt einen Key; ein vorhandener Key am selben Frame wird ersetzt.
    ///
    /// Gibt `true` zurück, wenn ein neuer Key entstanden ist.
    pub fn add(&mut self, frame: u32, value: V, params: TrackParams) -> bool {
        let is_new = match self.keys.iter_mut().find(|k| k.frame == frame) {
            Some(existing) => {
                existing.value = value;
                false
            }
            None => {
                self.keys.push(Key { frame, value });
                true
            }
        };
        self.rebuild(params);
        is_new
    }

    /// Entfernt den Key am Frame `frame`.
    pub fn remove(&mut self, frame: u32, params: TrackParams) -> Option<V> {
        let index = self.keys.iter().position(|k| k.frame == frame)?;
        let removed = self.keys.remove(index);
        self.rebuild(params);
        Some(removed.value)
    }

    /// Verschiebt den Key von `from` nach `to`; ein Key am Ziel-Frame entfällt.
    pub fn move_key(&mut self, from: u32, to: u32, params: TrackParams) -> bool {
        if from == to {
            return false;
        }
        let Some(from_index) = self.keys.iter().position(|k| k.frame == from) else {
            return false;
        };
        self.keys[from_index].frame = to;
        if let Some(to_index) = self
            .keys
            .iter()
            .enumerate()
            .position(|(i, k)| i != from_index && k.frame == to)
        {
            self.keys.remove(to_index);
        }
        self.rebuild(params);
        true
    }

    /// Entfernt alle Keys.
    pub fn clear(&mut self) {
        self.keys.clear();
        self.active.clear();
        self.evaluator = Evaluator::Empty;
    }

    /// Ersetzt alle Keys (z.B. beim Laden); doppelte Frames: der letzte gewinnt.
    pub fn set_keys(&mut self, keys: Vec<Key<V>>, params: TrackParams) {
        self.keys.clear();
        for key in keys {
            match self.keys.iter_mut().find(|k| k.frame == key.frame) {
                Some(existing) => existing.value = key.value,
                None => self.keys.push(key),
            }
        }
        self.rebuild(params);
    }

    /// Baut den Evaluator aus den aktuellen Keys neu auf.
    pub fn rebuild(&mut self, params: TrackParams) {
        let mut ordered: Vec<Key<V>> = self
            .keys
            .iter()
            .filter(|k| !self.looping || k.frame < params.frames)
            .cloned()
            .collect();
        ordered.sort_by_key(|k| k.frame);

        self.evaluator = match ordered.as_slice() {
            [] => Evaluator::Empty,
            [single] => Evaluator::Constant(single.value.clone()),
            keys => {
                let times: Vec<f64> = keys.iter().map(|k| f64::from(k.frame)).collect();
                let mut points = Vec::with_capacity(keys.len() * V::CHANNELS);
                for key in keys {
                    key.value.write_channels(&mut points);
                }
                let spline = if self.looping {
                    CubicSpline::from_points_looping(
                        f64::from(params.frames),
                        &times,
                        &points,
                        params.smoothness,
                    )
                } else {
                    CubicSpline::from_points(&times, &points, params.smoothness)
                };
                Evaluator::Spline(spline)
            }
        };
        self.active = ordered;
    }

    /// Wertet die Spur zur Zeit `time` (in Frames) aus. `None` ohne Keys.
    pub fn evaluate(&self, time: f64) -> Option<V> {
        match &self.evaluator {
            Evaluator::Empty => None,
            Evaluator::Constant(value) => Some(value.clone()),
            Evaluator::Spline(spline) => {
                let mut channels = vec![0.0; V::CHANNELS];
                spline.evaluate(time, &mut channels);
                Some(V::from_channels(&channels))
            }
        }
    }

    /// Ob ein Spline (mindestens zwei aktive Keys) vorliegt.
    pub fn has_spline(&self) -> bool {
        matches!(self.evaluator, Evaluator::Spline(_))
    }
}

impl TrackValue for f64 {
    const CHANNELS: usize = 1;

    fn write_channels(&self, out: &mut Vec<f64>) {
        out.push(*self);
    }

    fn from_channels(channels: &[f64]) -> Self {
        channels[0]
    }
}
