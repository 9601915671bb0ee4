use chrono::NaiveDate;
use itertools::Itertools;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

use crate::*;

fn date(s: &str) -> PuzzleDate {
    s.parse().unwrap()
}

fn ids(s: &[&str]) -> Vec<OperationId> {
    s.iter().map(|&id| OperationId::from(id)).collect()
}

fn arb_date() -> impl Strategy<Value = PuzzleDate> {
    (1990..=2150_i32, 1..=366_u32).prop_filter_map("no such day", |(year, ordinal)| {
        NaiveDate::from_yo_opt(year, ordinal).map(PuzzleDate::from)
    })
}

#[test]
fn test_fallback_example() {
    let puzzle = Puzzle::fallback(date("2024-01-05"), 10);
    assert_eq!(27.0, puzzle.target_number);
    assert_eq!(ids(&["add-5", "multiply-2", "subtract-3"]), puzzle.solution);

    let evaluation = puzzle.evaluate(&puzzle.solution);
    assert_eq!(Evaluation { result: 27.0, correct: true }, evaluation);

    let evaluation = puzzle.evaluate(&ids(&["subtract-3", "multiply-2", "add-5"]));
    assert_eq!(Evaluation { result: 19.0, correct: false }, evaluation);
}

#[test]
fn test_unsolvable_operations_use_fallback() {
    let cubes = (0..3)
        .map(|i| Operation::generated(OperationKind::Cube.with_operand(0), i))
        .collect_vec();
    let d = date("2025-03-14");
    let mut rng = ChaCha12Rng::seed_from_u64(99);
    let puzzle = Puzzle::from_operations(d, 50, cubes, &mut rng);

    assert_eq!(Puzzle::fallback(d, 50), puzzle);
    assert_eq!(f64::from((50 + 5) * 2 - 3), puzzle.target_number);
    assert!(puzzle.check_completion(&puzzle.solution));
}

#[test]
fn test_generated_date_uses_fallback() {
    // Starts at 23 with x², ×9, and x³, and every ordering exceeds the limit.
    let d = date("2024-01-16");
    let generated = generate_operations(d.seed() + 200, 3);
    assert_eq!(
        ids(&["square-0", "multiply-9-1", "cube-2"]),
        generated.iter().map(|op| op.id().clone()).collect_vec(),
    );

    let puzzle = puzzle_for_date_str("2024-01-16").unwrap();
    assert_eq!(Puzzle::fallback(d, 23), puzzle);
    assert_eq!(53.0, puzzle.target_number);
    assert_eq!(Evaluation { result: 53.0, correct: true }, puzzle.evaluate(&puzzle.solution));
}

#[test]
fn test_evaluate_rejects_incomplete_orderings() {
    let puzzle = Puzzle::fallback(date("2024-01-05"), 10);

    // Foreign ID appended to a correct ordering still reaches 27.
    let mut with_foreign = puzzle.solution.clone();
    with_foreign.push(OperationId::from("add-0"));
    let evaluation = puzzle.evaluate(&with_foreign);
    assert_eq!(27.0, evaluation.result);
    assert!(!evaluation.correct);

    // Omitted and duplicated.
    assert!(!puzzle.check_completion(&ids(&["add-5", "multiply-2"])));
    assert!(!puzzle.check_completion(&ids(&["add-5", "add-5", "multiply-2"])));
    assert!(!puzzle.check_completion(&[]));
}

#[test]
fn test_some_reordering_is_wrong() {
    // Subtraction and multiplication don't commute.
    let d = date("2024-08-08");
    let operations = vec![
        Operation::new("a", "-4".parse().unwrap()),
        Operation::new("b", "×3".parse().unwrap()),
        Operation::new("c", "+1".parse().unwrap()),
    ];
    let puzzle = Puzzle::from_operations(d, 20, operations, &mut ChaCha12Rng::seed_from_u64(1));
    assert!(puzzle.check_completion(&puzzle.solution));

    let wrong = puzzle
        .solution
        .iter()
        .cloned()
        .permutations(3)
        .filter(|order| !puzzle.check_completion(order))
        .count();
    assert!(wrong > 0);
}

#[test]
fn test_puzzle_for_date_str() {
    assert_eq!(
        puzzle_for_date_str("2024-06-01"),
        Ok(Puzzle::for_date(date("2024-06-01"))),
    );
    assert!(puzzle_for_date_str("June 1").is_err());
    assert!(puzzle_for_date_str("2024-06-31").is_err());
}

#[test]
fn test_serialization() {
    let puzzle = Puzzle::fallback(date("2024-01-05"), 10);
    let value = serde_json::to_value(&puzzle).unwrap();
    assert_eq!(
        serde_json::json!({
            "date": "2024-01-05",
            "starting_number": 10,
            "target_number": 27.0,
            "operations": [
                { "id": "add-5", "shape": "binary", "op": "add", "operand": 5, "label": "+5" },
                { "id": "multiply-2", "shape": "binary", "op": "multiply", "operand": 2, "label": "×2" },
                { "id": "subtract-3", "shape": "binary", "op": "subtract", "operand": 3, "label": "-3" },
            ],
            "solution": ["add-5", "multiply-2", "subtract-3"],
        }),
        value,
    );

    let sqrt = Operation::generated(OperationKind::Sqrt.with_operand(0), 2);
    assert_eq!(
        serde_json::json!({ "id": "sqrt-2", "shape": "unary", "op": "sqrt", "label": "√x" }),
        serde_json::to_value(&sqrt).unwrap(),
    );
}

proptest! {
    #[test]
    fn proptest_generation_is_deterministic(d in arb_date()) {
        prop_assert_eq!(Puzzle::for_date(d), Puzzle::for_date(d));
    }

    #[test]
    fn proptest_canonical_solution_is_correct(d in arb_date()) {
        let puzzle = Puzzle::for_date(d);
        let evaluation = puzzle.evaluate(&puzzle.solution);
        prop_assert!(evaluation.correct, "{puzzle:?} evaluated to {}", evaluation.result);
        prop_assert_eq!(puzzle.target_number, evaluation.result);
    }

    #[test]
    fn proptest_puzzle_is_well_formed(d in arb_date()) {
        let puzzle = Puzzle::for_date(d);
        prop_assert_eq!(d, puzzle.date);
        prop_assert!((1..=99).contains(&puzzle.starting_number));
        prop_assert!((MIN_OPERATIONS..=MAX_OPERATIONS).contains(&puzzle.operations.len()));
        prop_assert!(0.0 < puzzle.target_number && puzzle.target_number < TARGET_LIMIT);
        prop_assert!(puzzle.operations.iter().map(|op| op.id()).all_unique());
        prop_assert_eq!(puzzle.operations.len(), puzzle.solution.len());
        prop_assert!(puzzle.solution.iter().all(|id| puzzle.operation(id.as_ref()).is_some()));
        // At most 2 decimal places
        let hundredths = puzzle.target_number * 100.0;
        prop_assert!((hundredths - hundredths.round()).abs() < 1e-6);
    }

    #[test]
    fn proptest_pseudo_random_in_unit_interval(seed: u64) {
        let x = random::pseudo_random(seed);
        prop_assert!((0.0..1.0).contains(&x));
    }

    #[test]
    fn proptest_date_string_roundtrip(d in arb_date()) {
        prop_assert_eq!(Ok(d), d.to_string().parse::<PuzzleDate>());
    }
}
