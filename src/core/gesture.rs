//! # Gesture Normalizer
//!
//! Turns raw wheel deltas and touch samples into at most one discrete
//! `Signal` per gesture.
//!
//! Wheel and touch are deliberately asymmetric: a wheel notch of any size in
//! the vertical direction counts, while a touch swipe must travel further than
//! the dead-zone threshold so that taps and small drags are ignored.

/// Direction a gesture asks the stack to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Content moves forward: the front card leaves.
    Advance,
    /// Content moves back: the previous card returns.
    Retreat,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct TouchTrack {
    start_y: f32,
    last_y: f32,
}

#[derive(Debug, Clone)]
pub struct GestureNormalizer {
    swipe_threshold_px: f32,
    touch: Option<TouchTrack>,
}

impl GestureNormalizer {
    pub fn new(swipe_threshold_px: f32) -> Self {
        Self {
            swipe_threshold_px: swipe_threshold_px.max(0.0),
            touch: None,
        }
    }

    /// A wheel event. The vertical component must dominate; positive delta advances.
    pub fn wheel(&self, delta_x: f32, delta_y: f32) -> Option<Signal> {
        if delta_y == 0.0 || delta_y.is_nan() || delta_y.abs() < delta_x.abs() {
            return None;
        }
        if delta_y > 0.0 {
            Some(Signal::Advance)
        } else {
            Some(Signal::Retreat)
        }
    }

    pub fn touch_start(&mut self, y: f32) {
        self.touch = Some(TouchTrack {
            start_y: y,
            last_y: y,
        });
    }

    pub fn touch_move(&mut self, y: f32) {
        if let Some(track) = self.touch.as_mut() {
            track.last_y = y;
        }
    }

    /// Finish the gesture. Swiping up (end above start) advances.
    pub fn touch_end(&mut self, y: f32) -> Option<Signal> {
        let mut track = self.touch.take()?;
        track.last_y = y;

        let travel = track.start_y - track.last_y;
        if !travel.is_finite() {
            log::debug!("Touch travel {travel} is not a distance, ignoring");
            return None;
        }
        if travel.abs() <= self.swipe_threshold_px {
            log::debug!(
                "Touch travel {:.1}px inside dead zone ({}px)",
                travel,
                self.swipe_threshold_px
            );
            return None;
        }
        if travel > 0.0 {
            Some(Signal::Advance)
        } else {
            Some(Signal::Retreat)
        }
    }

    pub fn touch_cancel(&mut self) {
        self.touch = None;
    }

    pub fn is_tracking_touch(&self) -> bool {
        self.touch.is_some()
    }
}
