use rand::Rng;

/// Uniform samples in `[0, 1)`
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

/// Thread-local generator, seeded from the OS or `crypto.getRandomValues`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRandom;

impl RandomSource for SystemRandom {
    fn next_f64(&mut self) -> f64 {
        rand::thread_rng().r#gen::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_random_in_unit_interval() {
        let mut rng = SystemRandom;
        for _ in 0..1000 {
            let sample = rng.next_f64();
            assert!((0.0..1.0).contains(&sample));
        }
    }
}
