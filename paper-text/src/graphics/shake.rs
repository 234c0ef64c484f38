use std::{f32::consts::TAU, rc::Rc};

use crate::render::Pixel;

/// Maps a character index to a pixel offset.
///
/// The index counts characters from the start of the passage and restarts
/// at 0 on every draw. A shake that should look the same on every frame must
/// therefore depend on the index only; one that should tremble has to sample
/// something else (a frame counter, a clock) itself.
pub type Shake = Rc<dyn Fn(usize) -> (Pixel, Pixel)>;

/// Vertical sine bob, `wavelength` characters long.
///
/// `phase` is in wavelengths; advancing it a little every frame makes the wave travel.
pub fn wave(amplitude: Pixel, wavelength: f32, phase: f32) -> Shake {
    Rc::new(move |index| wave_offset(amplitude, wavelength, phase, index))
}

/// The offset [`wave`] gives character `index`
pub fn wave_offset(amplitude: Pixel, wavelength: f32, phase: f32, index: usize) -> (Pixel, Pixel) {
    let wavelength = if wavelength > 0.0 { wavelength } else { 1.0 };
    let angle = (index as f32 / wavelength + phase) * TAU;
    (0, (angle.sin() * amplitude as f32).round() as Pixel)
}

/// Pseudo-random offsets in `-amplitude..=amplitude` on both axes.
///
/// The same `seed` always produces the same offsets; changing it per frame gives a tremble.
pub fn jitter(amplitude: Pixel, seed: u64) -> Shake {
    Rc::new(move |index| jitter_offset(amplitude, seed, index))
}

/// Largest amplitude [`jitter`] honors; anything beyond is clamped to it
pub const MAX_JITTER: Pixel = Pixel::MAX / 2;

/// The offset [`jitter`] gives character `index`
pub fn jitter_offset(amplitude: Pixel, seed: u64, index: usize) -> (Pixel, Pixel) {
    let amplitude = amplitude.unsigned_abs().min(MAX_JITTER as u32) as Pixel;
    let span = amplitude as u64 * 2 + 1;
    let bits = mix(seed ^ (index as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15));
    let dx = (bits % span) as Pixel - amplitude;
    let dy = ((bits >> 32) % span) as Pixel - amplitude;
    (dx, dy)
}

// splitmix64 finalizer
fn mix(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wave_is_vertical_and_bounded() {
        let shake = wave(3, 4.0, 0.0);
        assert_eq!(shake(0), (0, 0));
        assert_eq!(shake(1), (0, 3));
        assert_eq!(shake(3), (0, -3));
        for index in 0..32 {
            let (dx, dy) = shake(index);
            assert_eq!(dx, 0);
            assert!(dy.abs() <= 3);
        }
    }

    #[test]
    fn wave_survives_bad_wavelength() {
        let shake = wave(2, 0.0, 0.25);
        assert_eq!(shake(5), (0, 2));
    }

    #[test]
    fn jitter_is_deterministic_per_seed() {
        let first = jitter(2, 7);
        let again = jitter(2, 7);
        let other = jitter(2, 8);

        let a: Vec<_> = (0..16).map(|i| first(i)).collect();
        let b: Vec<_> = (0..16).map(|i| again(i)).collect();
        let c: Vec<_> = (0..16).map(|i| other(i)).collect();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.iter().all(|(dx, dy)| dx.abs() <= 2 && dy.abs() <= 2));
    }

    #[test]
    fn extreme_jitter_is_clamped() {
        for amplitude in [Pixel::MIN, Pixel::MIN + 1, Pixel::MAX, MAX_JITTER + 1] {
            let shake = jitter(amplitude, 1);
            for index in 0..64 {
                let (dx, dy) = shake(index);
                assert!(dx.abs() <= MAX_JITTER && dy.abs() <= MAX_JITTER);
            }
            let (dx, dy) = jitter_offset(amplitude, 1, 0);
            assert!(dx.abs() <= MAX_JITTER && dy.abs() <= MAX_JITTER);
        }
    }

    #[test]
    fn zero_jitter_stays_put() {
        let shake = jitter(0, 99);
        assert!((0..8).all(|i| shake(i) == (0, 0)));
    }
}
