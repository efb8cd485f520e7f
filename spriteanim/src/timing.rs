//! Binds animations to their frames and computes keyframe times.

use crate::{Animation, Frame, ReconstructedSheet, SheetLayout};
use std::ops::Range;

/// Cumulative frame start times in seconds; one entry more than there are frames.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyframeTimes(Vec<f32>);

impl KeyframeTimes {
    pub fn from_durations<I>(durations_ms: I) -> Self
    where
        I: IntoIterator<Item = u32>,
    {
        let mut times = vec![0.0f32];
        let mut elapsed = 0.0f32;
        for duration in durations_ms {
            elapsed += duration as f32 / 1000.0;
            times.push(elapsed);
        }
        Self(times)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn time(&self, index: usize) -> Option<f32> {
        self.0.get(index).copied()
    }

    /// End of the last frame, i.e. the full animation length.
    pub fn total(&self) -> f32 {
        self.0.last().copied().unwrap_or(0.0)
    }

    /// Time of the synthetic keyframe that repeats the final sprite one tick before the end, so
    /// the clip keeps its full length without wrapping to frame 0 early.
    pub fn last_keyframe_time(&self, frame_rate: f32) -> f32 {
        self.total() - 1.0 / frame_rate
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimedAnimation {
    pub animation: Animation,
    /// Bound sub-range of the sheet's frame list.
    pub frames: Range<usize>,
    pub key_times: KeyframeTimes,
}

impl TimedAnimation {
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimedSheet {
    pub layout: SheetLayout,
    pub frames: Vec<Frame>,
    pub animations: Vec<TimedAnimation>,
}

impl TimedSheet {
    pub fn has_animations(&self) -> bool {
        !self.animations.is_empty()
    }

    pub fn animation_frames(&self, animation: &TimedAnimation) -> &[Frame] {
        &self.frames[animation.frames.clone()]
    }
}

impl ReconstructedSheet {
    pub fn bind_frames(self) -> TimedSheet {
        let frame_count = self.frames.len();
        let animations = self
            .animations
            .into_iter()
            .map(|animation| {
                let frames = bound_range(&animation, frame_count);
                let key_times = KeyframeTimes::from_durations(
                    self.frames[frames.clone()].iter().map(|f| f.duration),
                );
                TimedAnimation {
                    animation,
                    frames,
                    key_times,
                }
            })
            .collect::<Vec<_>>();
        log::debug!("bound {} animations to {frame_count} frames", animations.len());
        TimedSheet {
            layout: self.layout,
            frames: self.frames,
            animations,
        }
    }
}

/// `first..=last` clamped to the frame list; inverted ranges bind no frames.
fn bound_range(animation: &Animation, frame_count: usize) -> Range<usize> {
    let end = animation.last.saturating_add(1).min(frame_count);
    let start = animation.first.min(end);
    if end - start != animation.frame_count() {
        log::warn!(
            "animation '{}' spans frames {}..={} but the sheet has {frame_count} frames",
            animation.name,
            animation.first,
            animation.last
        );
    }
    start..end
}
