// Pointer trail: small glowing sparkles that follow the pen and fade out.
// It is an overlay only; the recognizer hides it while capturing the canvas.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sketch_match::pixel::{channel_from_f64, pack_rgb, rgb};
use sketch_match::FrameBuffer;

/// Blend one color into the pixel at (x,y) with weight `w` in [0,1].
#[inline]
fn blend_rgb(fb: &mut FrameBuffer, x: i32, y: i32, color: (u8, u8, u8), w: f32) {
    if x < 0 || y < 0 { return; }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height { return; }

    let idx = y * fb.width + x;
    let (or, og, ob) = rgb(fb.pixels[idx]);
    let w = w.clamp(0.0, 1.0) as f64;
    let mix = |o: u8, c: u8| channel_from_f64((o as f64 * (1.0 - w) + c as f64 * w).clamp(0.0, 255.0));

    fb.pixels[idx] = pack_rgb(mix(or, color.0), mix(og, color.1), mix(ob, color.2));
}

/// Soft round glow centered at (cx,cy); strongest in the middle.
fn draw_glow_disc(fb: &mut FrameBuffer, cx: i32, cy: i32, radius: i32, color: (u8, u8, u8), strength: f32) {
    if radius <= 0 { return; }
    let r2 = (radius * radius) as f32;
    let sigma = radius as f32 * 0.5;
    let denom = 2.0 * sigma * sigma;

    for y in (cy - radius)..=(cy + radius) {
        for x in (cx - radius)..=(cx + radius) {
            let dx = (x - cx) as f32;
            let dy = (y - cy) as f32;
            let d2 = dx * dx + dy * dy;
            if d2 > r2 { continue; }
            let w = (-d2 / denom).exp() * strength;
            blend_rgb(fb, x, y, color, w);
        }
    }
}

/// One sparkle: drifts a little and fades out.
struct Particle {
    x: f32, y: f32,     // position in pixels
    vx: f32, vy: f32,   // velocity in px/sec
    life: f32,          // remaining lifetime in seconds
    max_life: f32,      // initial lifetime (for fade)
    energy: f32,        // brightness multiplier (0..1)
}

impl Particle {
    #[inline] fn alive(&self) -> bool { self.life > 0.0 }
}

pub struct Trail {
    rng: StdRng,
    particles: Vec<Particle>,
    max_particles: usize,
}

impl Trail {
    pub fn new(max_particles: usize) -> Self {
        Self {
            rng: StdRng::seed_from_u64(0xC0FFEE),
            particles: Vec::with_capacity(max_particles),
            max_particles,
        }
    }

    /// Spawn a handful of sparkles at (x,y).
    pub fn spawn(&mut self, x: f32, y: f32, count: usize) {
        for _ in 0..count {
            if self.particles.len() >= self.max_particles { break; }
            let speed: f32 = self.rng.gen_range(30.0..90.0);
            let angle = self.rng.gen_range(0.0..std::f32::consts::TAU);
            let max_life: f32 = self.rng.gen_range(0.35..0.75);
            self.particles.push(Particle {
                x, y,
                vx: speed * angle.cos(),
                vy: speed * angle.sin() - self.rng.gen_range(0.0f32..20.0), // slight upward bias
                life: max_life,
                max_life,
                energy: self.rng.gen_range(0.6f32..1.0),
            });
        }
    }

    /// Advance the simulation by `dt` seconds and drop dead sparkles.
    pub fn update(&mut self, dt: f32) {
        for p in &mut self.particles {
            p.x += p.vx * dt;
            p.y += p.vy * dt;
            p.vx *= 0.98;
            p.vy = p.vy * 0.98 + 10.0 * dt;
            p.life -= dt;
        }
        self.particles.retain(Particle::alive);
    }

    /// Draw all live sparkles on top of `fb`.
    pub fn render(&self, fb: &mut FrameBuffer) {
        for p in &self.particles {
            let life01 = (p.life / p.max_life).clamp(0.0, 1.0);
            let radius = (6.0 * life01 + 2.0) as i32; // 2..8 px
            let strength = (0.9 * p.energy * life01).clamp(0.0, 1.0);
            draw_glow_disc(fb, p.x as i32, p.y as i32, radius, (255, 200, 80), strength);
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparkles_tint_the_canvas_then_expire() {
        let mut trail = Trail::new(16);
        trail.spawn(20.0, 20.0, 32);
        assert_eq!(trail.particles.len(), 16);

        let mut fb = FrameBuffer::filled(40, 40, 0x00FF_FFFF);
        trail.render(&mut fb);
        assert!(fb.pixels.iter().any(|&p| p != 0x00FF_FFFF));

        trail.update(1.0); // longer than any lifetime
        assert!(trail.particles.is_empty());
    }

    #[test]
    fn capacity_is_respected() {
        let mut trail = Trail::new(4);
        trail.spawn(0.0, 0.0, 10);
        assert_eq!(trail.particles.len(), 4);
        trail.clear();
        assert!(trail.particles.is_empty());
    }
}
