use crate::domain::model::Question;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Which questions are eligible for a quiz draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every question, regardless of category.
    All,
    /// Only questions whose category equals this id.
    Only(i32),
}

impl CategoryFilter {
    pub fn matches(&self, question: &Question) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(id) => question.category == *id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizOutcome {
    Question(Question),
    /// Every candidate has already been answered; the quiz is over.
    Exhausted,
}

/// Draws one question uniformly at random from `candidates`, skipping any id in
/// `previously_answered`.
///
/// The selector keeps no state between calls: the caller owns the quiz session
/// and passes the answered ids on every draw.
pub fn select_next<R>(
    candidates: Vec<Question>,
    previously_answered: &HashSet<i32>,
    rng: &mut R,
) -> QuizOutcome
where
    R: Rng + ?Sized,
{
    let remaining: Vec<Question> = candidates
        .into_iter()
        .filter(|q| !previously_answered.contains(&q.id))
        .collect();

    match remaining.choose(rng) {
        Some(question) => QuizOutcome::Question(question.clone()),
        None => QuizOutcome::Exhausted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn q(id: i32, category: i32) -> Question {
        Question {
            id,
            question: format!("question {}", id),
            answer: format!("answer {}", id),
            category,
            difficulty: 1,
        }
    }

    fn art_questions() -> Vec<Question> {
        vec![q(16, 2), q(17, 2), q(18, 2), q(19, 2)]
    }

    #[test]
    fn never_returns_an_answered_question() {
        let mut rng = StdRng::seed_from_u64(7);
        let answered: HashSet<i32> = [16, 18].into_iter().collect();
        for _ in 0..200 {
            match select_next(art_questions(), &answered, &mut rng) {
                QuizOutcome::Question(question) => {
                    assert!(!answered.contains(&question.id));
                    assert_eq!(question.category, 2);
                }
                QuizOutcome::Exhausted => panic!("two questions remain"),
            }
        }
    }

    #[test]
    fn exhausted_when_everything_answered() {
        let mut rng = StdRng::seed_from_u64(1);
        let answered: HashSet<i32> = [16, 17, 18, 19, 42].into_iter().collect();
        assert_eq!(
            select_next(art_questions(), &answered, &mut rng),
            QuizOutcome::Exhausted
        );
    }

    #[test]
    fn exhausted_on_empty_candidates() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            select_next(Vec::new(), &HashSet::new(), &mut rng),
            QuizOutcome::Exhausted
        );
    }

    #[test]
    fn single_remaining_question_is_returned() {
        let mut rng = StdRng::seed_from_u64(3);
        let answered: HashSet<i32> = [16, 17, 19].into_iter().collect();
        assert_eq!(
            select_next(art_questions(), &answered, &mut rng),
            QuizOutcome::Question(q(18, 2))
        );
    }

    #[test]
    fn draws_are_spread_across_the_remaining_set() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts: HashMap<i32, usize> = HashMap::new();
        for _ in 0..4000 {
            if let QuizOutcome::Question(question) =
                select_next(art_questions(), &HashSet::new(), &mut rng)
            {
                *counts.entry(question.id).or_default() += 1;
            }
        }
        assert_eq!(counts.len(), 4);
        for count in counts.values() {
            assert!(*count > 800, "skewed draw: {:?}", counts);
        }
    }

    #[test]
    fn filter_matches_exact_category() {
        assert!(CategoryFilter::All.matches(&q(1, 5)));
        assert!(CategoryFilter::Only(2).matches(&q(1, 2)));
        assert!(!CategoryFilter::Only(2).matches(&q(1, 12)));
    }
}
