use rand::Rng;

/// Chooses which candidate endpoint the next attempt goes to.
pub trait EndpointPicker: Send + Sync {
    /// Index into a candidate list of length `len` (`len > 0`).
    fn pick(&self, len: usize) -> usize;
}

/// Uniform choice with replacement: a failed endpoint stays eligible.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPicker;

impl EndpointPicker for RandomPicker {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_picker_stays_in_range() {
        let picker = RandomPicker;
        for len in 1..8 {
            for _ in 0..200 {
                assert!(picker.pick(len) < len);
            }
        }
    }

    #[test]
    fn test_random_picker_reaches_every_index() {
        let picker = RandomPicker;
        let mut seen = [false; 3];
        for _ in 0..1000 {
            seen[picker.pick(3)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
