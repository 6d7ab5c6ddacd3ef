//! Scripted playback
//!
//! Drives a [`Showcase`] at a fixed frame rate, applies scheduled scroll
//! jumps and collects snapshots at a regular interval.

use std::str::FromStr;

use crate::error::{Result, ShowcaseError};
use crate::showcase::Showcase;
use crate::snapshot::FrameSnapshot;

/// Scroll to `y` once playback reaches `at_ms`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollStep {
    pub at_ms: f64,
    pub y: f32,
}

impl FromStr for ScrollStep {
    type Err = ShowcaseError;

    /// Parses `AT_MS:Y`, e.g. `1500:400`
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ShowcaseError::InvalidConfig(format!("scroll step must be AT_MS:Y, got {s:?}"));
        let (at, y) = s.split_once(':').ok_or_else(invalid)?;
        let at_ms: f64 = at.trim().parse().map_err(|_| invalid())?;
        let y: f32 = y.trim().parse().map_err(|_| invalid())?;
        if at_ms < 0.0 || !y.is_finite() {
            return Err(invalid());
        }
        Ok(Self { at_ms, y })
    }
}

/// Playback settings
#[derive(Clone, Debug, PartialEq)]
pub struct Simulation {
    pub duration_ms: f64,
    pub fps: u32,
    /// Snapshot interval; 0 records only the final frame
    pub sample_ms: f64,
    pub scrolls: Vec<ScrollStep>,
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            duration_ms: 3000.0,
            fps: 60,
            sample_ms: 500.0,
            scrolls: Vec::new(),
        }
    }
}

impl Simulation {
    pub fn frame_ms(&self) -> f32 {
        1000.0 / self.fps.max(1) as f32
    }

    /// Play the script; snapshots include the mount frame and the last frame
    pub fn run(&self, showcase: &mut Showcase) -> Result<Vec<FrameSnapshot>> {
        let frame_ms = self.frame_ms();
        let mut scrolls = self.scrolls.clone();
        scrolls.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
        let mut pending = scrolls.into_iter().peekable();

        let start = showcase.elapsed_ms();
        let mut snapshots = vec![showcase.snapshot()];
        let mut next_sample = self.sample_ms;
        let mut frames = 0u64;

        loop {
            let elapsed = showcase.elapsed_ms() - start;
            while let Some(step) = pending.next_if(|step| step.at_ms <= elapsed) {
                let reached = showcase.scroll_to(step.y)?;
                tracing::debug!(at_ms = step.at_ms, requested = step.y, reached, "scripted scroll");
            }
            if elapsed >= self.duration_ms {
                break;
            }

            showcase.tick(frame_ms)?;
            frames += 1;

            let elapsed = showcase.elapsed_ms() - start;
            if self.sample_ms > 0.0 && elapsed >= next_sample && elapsed < self.duration_ms {
                snapshots.push(showcase.snapshot());
                while next_sample <= elapsed {
                    next_sample += self.sample_ms;
                }
            }
        }

        snapshots.push(showcase.snapshot());
        tracing::debug!(frames, snapshots = snapshots.len(), "simulation finished");
        Ok(snapshots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShowcaseConfig;

    #[test]
    fn test_parse_scroll_step() {
        let step: ScrollStep = "1500:400.5".parse().unwrap();
        assert_eq!(step, ScrollStep { at_ms: 1500.0, y: 400.5 });
        assert!("1500".parse::<ScrollStep>().is_err());
        assert!("-1:10".parse::<ScrollStep>().is_err());
        assert!("a:b".parse::<ScrollStep>().is_err());
    }

    #[test]
    fn test_samples_cover_the_run() {
        let mut showcase = Showcase::mount(ShowcaseConfig::default()).unwrap();
        let simulation = Simulation {
            duration_ms: 1000.0,
            fps: 50,
            sample_ms: 250.0,
            scrolls: vec![ScrollStep { at_ms: 500.0, y: 300.0 }],
        };
        let snapshots = simulation.run(&mut showcase).unwrap();

        // Mount, 250, 500, 750, final
        assert_eq!(snapshots.len(), 5);
        assert_eq!(snapshots[0].time_ms, 0.0);
        assert!((snapshots[4].time_ms - 1000.0).abs() < 1e-3);
        assert_eq!(snapshots[1].scroll.y, 0.0);
        assert_eq!(snapshots[4].scroll.y, 300.0);
        assert!(snapshots[4].heading.visible);
    }
}
