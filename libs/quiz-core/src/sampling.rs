//! Drawing questions from a pool.

use crate::types::Question;
use crate::weights::WeightMap;
use rand::seq::SliceRandom;
use rand::Rng;

/// Draw a question with probability proportional to its weight.
///
/// Walks the pool in order, subtracting each weight from a uniform draw in
/// `[0, total)`, and returns the first question that brings the remainder to
/// zero or below. Falls back to the first question if the total weight is
/// zero or rounding leaves no hit. Returns `None` only for an empty pool.
pub fn weighted_choice<'a, R: Rng>(
    pool: &'a [Question],
    weights: &WeightMap,
    rng: &mut R,
) -> Option<&'a Question> {
    let first = pool.first()?;

    let total: f64 = pool.iter().map(|q| weights.get(&q.id)).sum();
    if !(total.is_finite() && total > 0.0) {
        return Some(first);
    }

    let mut remainder = rng.gen::<f64>() * total;
    for question in pool {
        remainder -= weights.get(&question.id);
        if remainder <= 0.0 {
            return Some(question);
        }
    }

    Some(first)
}

/// Draw uniformly from `candidates`.
pub fn uniform_choice<'a, R: Rng>(
    candidates: &[&'a Question],
    rng: &mut R,
) -> Option<&'a Question> {
    candidates.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QuestionId;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn question(id: i64) -> Question {
        Question {
            id: QuestionId::from(id),
            prompt: format!("Question {}", id),
            options: vec!["A) yes".into(), "B) no".into()],
            correct_option: "A) yes".into(),
        }
    }

    #[test]
    fn empty_pool_yields_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(weighted_choice(&[], &WeightMap::new(), &mut rng).is_none());
        assert!(uniform_choice(&[], &mut rng).is_none());
    }

    #[test]
    fn always_returns_pool_member() {
        let pool: Vec<Question> = (1..=6).map(question).collect();
        let weights: WeightMap = vec![(QuestionId::from(3), 9.0), (QuestionId::from(5), 0.01)]
            .into_iter()
            .collect();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let picked = weighted_choice(&pool, &weights, &mut rng).unwrap();
            assert!(pool.iter().any(|q| q.id == picked.id));
        }
    }

    #[test]
    fn selection_follows_weight_ratio() {
        let pool = vec![question(1), question(2)];
        let weights: WeightMap = vec![(QuestionId::from(1), 9.0), (QuestionId::from(2), 1.0)]
            .into_iter()
            .collect();
        let mut rng = StdRng::seed_from_u64(42);

        let trials = 20_000;
        let heavy = (0..trials)
            .filter(|_| weighted_choice(&pool, &weights, &mut rng).unwrap().id == pool[0].id)
            .count();

        let share = heavy as f64 / trials as f64;
        assert!((share - 0.9).abs() < 0.02, "heavy question share was {}", share);
    }

    #[test]
    fn single_question_pool_always_wins() {
        let pool = vec![question(9)];
        let weights: WeightMap = vec![(QuestionId::from(9), 0.01)].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            assert_eq!(weighted_choice(&pool, &weights, &mut rng).unwrap().id, pool[0].id);
        }
    }
}
