//! First-responder randomization (§4.4.4): when a new main or follow-up
//! question is created, the first answerer is chosen uniformly at random.

use interview_core::answer::Answerer;
use rand::Rng;

pub fn choose_first_responder(rng: &mut impl Rng) -> Answerer {
    if rng.gen_bool(0.5) {
        Answerer::User
    } else {
        Answerer::Ai
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Testable Properties §8: over 1000 samples the fraction choosing each
    /// answerer should land close to one half.
    #[test]
    fn is_uniform_over_many_samples() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut user_count = 0;
        const SAMPLES: u32 = 1000;
        for _ in 0..SAMPLES {
            if choose_first_responder(&mut rng) == Answerer::User {
                user_count += 1;
            }
        }
        let fraction = f64::from(user_count) / f64::from(SAMPLES);
        assert!((0.4..0.6).contains(&fraction), "fraction was {fraction}");
    }

    #[test]
    fn is_deterministic_for_a_fixed_seed() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let sequence_a: Vec<_> = (0..20).map(|_| choose_first_responder(&mut a)).collect();
        let sequence_b: Vec<_> = (0..20).map(|_| choose_first_responder(&mut b)).collect();
        assert_eq!(sequence_a, sequence_b);
    }
}
