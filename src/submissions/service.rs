use rand::Rng;

use crate::submissions::repo::SubmissionStatus;

/// There is no judge: submitted code is never executed against test cases.
/// The verdict is simulated, accepting roughly 70% of submissions.
pub fn judge(rng: &mut impl Rng) -> SubmissionStatus {
    if rng.gen_bool(0.7) {
        SubmissionStatus::Accepted
    } else {
        SubmissionStatus::Wrong
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn verdict_is_always_one_of_the_two_statuses() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let status = judge(&mut rng);
            assert!(matches!(
                status,
                SubmissionStatus::Accepted | SubmissionStatus::Wrong
            ));
        }
    }

    #[test]
    fn both_verdicts_occur() {
        let mut rng = StdRng::seed_from_u64(42);
        let verdicts: Vec<SubmissionStatus> = (0..200).map(|_| judge(&mut rng)).collect();
        assert!(verdicts.contains(&SubmissionStatus::Accepted));
        assert!(verdicts.contains(&SubmissionStatus::Wrong));
    }
}
