//! Floating emoji decorations and confetti bursts

use std::time::Duration;

use crate::timer::{Scheduler, TimerId};

/// Glyphs floating around the letter
pub const LETTER_GLYPHS: &[&str] = &["🎂", "🎁", "🎈", "✨", "🎊", "🥳", "🎉", "❤️", "🌸", "🌺"];

/// Glyphs orbiting the hero title
pub const HERO_GLYPHS: &[&str] = &["🎂", "🎁", "🎈", "🎊", "🥂", "✨", "💝", "💖", "🎉", "🍰"];

/// How long a confetti burst stays on screen
pub const CONFETTI_DURATION: Duration = Duration::from_millis(8000);

/// A decoration placed in percent coordinates of its container
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub id: usize,
    pub x: f32,
    pub y: f32,
    pub glyph: &'static str,
    pub size: u32,
    pub delay: Duration,
    pub duration: Duration,
}

/// Where a particle is drawn at some instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleFrame {
    pub x: f32,
    pub y: f32,
    /// 0.0 (invisible) ..= 0.9
    pub opacity: f32,
}

/// Spread `count` particles over the four quadrants of a container
pub fn scatter(count: usize, glyphs: &[&'static str]) -> Vec<Particle> {
    if glyphs.is_empty() {
        return Vec::new();
    }

    (0..count)
        .map(|i| {
            let (x_base, y_base) = match i % 4 {
                0 => (0.0, 0.0),
                1 => (50.0, 0.0),
                2 => (0.0, 50.0),
                _ => (50.0, 50.0),
            };

            Particle {
                id: i,
                x: x_base + ((i * 7) % 45) as f32,
                y: y_base + ((i * 11) % 45) as f32,
                glyph: glyphs[i % glyphs.len()],
                size: 24 + (i % 16) as u32,
                delay: Duration::from_millis(((i * 300) % 5000) as u64),
                duration: Duration::from_secs(10 + (i % 15) as u64),
            }
        })
        .collect()
}

impl Particle {
    /// Animated placement `elapsed` after the decorations appeared.
    ///
    /// Each cycle rises 15% and drifts 5% right while fading in and out,
    /// then rests for half the start delay. `None` while hidden.
    pub fn frame_at(&self, elapsed: Duration) -> Option<ParticleFrame> {
        let since_start = elapsed.checked_sub(self.delay)?;
        let cycle = self.duration + self.delay / 2;
        let t = (since_start.as_millis() % cycle.as_millis().max(1)) as f32;
        let duration = self.duration.as_millis().max(1) as f32;
        if t >= duration {
            return None;
        }

        // 0 -> 1 -> 0 over one cycle
        let phase = 1.0 - (2.0 * t / duration - 1.0).abs();
        Some(ParticleFrame {
            x: (self.x + 5.0 * phase).min(99.0),
            y: (self.y - 15.0 * phase).max(0.0),
            opacity: 0.9 * phase,
        })
    }
}

/// A timed confetti burst
#[derive(Debug, Default)]
pub struct Confetti {
    timer: Option<TimerId>,
}

impl Confetti {
    /// Show confetti for [`CONFETTI_DURATION`], restarting any running burst
    pub fn burst(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(id) = self.timer.take() {
            scheduler.cancel(id);
        }
        self.timer = Some(scheduler.schedule(CONFETTI_DURATION));
    }

    pub fn is_active(&self) -> bool {
        self.timer.is_some()
    }

    /// Returns true if `id` ended this burst
    pub fn handle_timer(&mut self, id: TimerId) -> bool {
        if self.timer == Some(id) {
            self.timer = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::TimerQueue;

    #[test]
    fn test_scatter_layout() {
        let particles = scatter(20, LETTER_GLYPHS);
        assert_eq!(particles.len(), 20);

        let p5 = &particles[5];
        // quadrant 1 (top-right), offsets 35 and 10
        assert_eq!((p5.x, p5.y), (85.0, 10.0));
        assert_eq!(p5.glyph, "🥳");
        assert_eq!(p5.size, 29);
        assert_eq!(p5.delay, Duration::from_millis(1500));
        assert_eq!(p5.duration, Duration::from_secs(15));

        assert_eq!(particles[17].delay, Duration::from_millis(100));
        assert_eq!(particles[10].glyph, LETTER_GLYPHS[0]);
    }

    #[test]
    fn test_particles_stay_in_bounds() {
        for particle in scatter(64, HERO_GLYPHS) {
            assert!((0.0..100.0).contains(&particle.x));
            assert!((0.0..100.0).contains(&particle.y));

            for ms in (0..40_000).step_by(250) {
                if let Some(frame) = particle.frame_at(Duration::from_millis(ms)) {
                    assert!((0.0..100.0).contains(&frame.x));
                    assert!((0.0..100.0).contains(&frame.y));
                    assert!((0.0..=0.9).contains(&frame.opacity));
                }
            }
        }
    }

    #[test]
    fn test_frame_waits_for_delay() {
        let particles = scatter(2, LETTER_GLYPHS);
        let particle = &particles[1];
        assert_eq!(particle.delay, Duration::from_millis(300));
        assert!(particle.frame_at(Duration::from_millis(299)).is_none());

        // halfway through the first cycle the particle is at its peak
        let peak = particle
            .frame_at(particle.delay + particle.duration / 2)
            .unwrap();
        assert!((peak.opacity - 0.9).abs() < 1e-3);
        assert!((peak.x - (particle.x + 5.0)).abs() < 1e-3);
    }

    #[test]
    fn test_no_glyphs() {
        assert!(scatter(5, &[]).is_empty());
    }

    #[test]
    fn test_confetti_burst() {
        let mut timers = TimerQueue::new();
        let mut confetti = Confetti::default();
        confetti.burst(&mut timers);
        assert!(confetti.is_active());

        assert_eq!(timers.pop_due(Duration::from_millis(7999)), None);
        let id = timers.pop_due(CONFETTI_DURATION).unwrap();
        assert!(confetti.handle_timer(id));
        assert!(!confetti.is_active());
        assert!(!confetti.handle_timer(id));
    }
}
