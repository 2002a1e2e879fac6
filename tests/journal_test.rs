use std::sync::Arc;
use std::thread;

use assert_float_eq::assert_float_absolute_eq;

use smart_meal::models::{MacroDensity, WeightSource};
use smart_meal::{FusionConfig, MealError, MealJournal, NutritionTable, SharedTable};

fn sample_table() -> NutritionTable {
    NutritionTable::new(vec![
        ("white_rice", MacroDensity::new(130.0, 2.7, 28.0, 0.3)),
        ("chicken_breast", MacroDensity::new(165.0, 31.0, 0.0, 3.6)),
        ("apple", MacroDensity::new(52.0, 0.3, 14.0, 0.2)),
    ])
    .unwrap()
}

fn new_journal() -> MealJournal {
    MealJournal::new(
        Arc::new(SharedTable::new(sample_table())),
        FusionConfig::default(),
    )
}

#[test]
fn test_unrecognized_food_leaves_journal_unchanged() {
    let journal = new_journal();
    journal.record_meal("apple", None).unwrap();
    let before = journal.snapshot();

    let err = journal.record_meal("unknown_label_xyz", None).unwrap_err();

    assert!(matches!(err, MealError::FoodNotRecognized { ref label } if label == "unknown_label_xyz"));
    assert_eq!(journal.snapshot(), before);
    assert_eq!(journal.len(), 1);
    assert_float_absolute_eq!(journal.daily_total(), 52.0, 1e-9);
}

#[test]
fn test_sensor_weight_beats_default() {
    let journal = new_journal();
    journal.record_sensor_weight(250.0).unwrap();

    let outcome = journal.record_meal("white_rice", None).unwrap();
    let n = outcome.entry.nutrition;

    assert_eq!(outcome.entry.weight_g, 250.0);
    assert_eq!(outcome.entry.weight_source, WeightSource::Sensor);
    assert_float_absolute_eq!(n.calories, 325.0, 1e-9);
    assert_float_absolute_eq!(n.protein, 6.75, 1e-9);
    assert_float_absolute_eq!(n.carbs, 70.0, 1e-9);
    assert_float_absolute_eq!(n.fat, 0.75, 1e-9);
    assert_float_absolute_eq!(outcome.daily_total, 325.0, 1e-9);
}

#[test]
fn test_manual_weight_beats_sensor() {
    let journal = new_journal();
    journal.record_sensor_weight(250.0).unwrap();

    let outcome = journal.record_meal("white_rice", Some(200.0)).unwrap();
    assert_eq!(outcome.entry.weight_g, 200.0);
    assert_eq!(outcome.entry.weight_source, WeightSource::Manual);
    assert_float_absolute_eq!(outcome.entry.nutrition.calories, 260.0, 1e-9);

    // Non-positive manual weight falls back to the scale.
    let outcome = journal.record_meal("white_rice", Some(0.0)).unwrap();
    assert_eq!(outcome.entry.weight_source, WeightSource::Sensor);
}

#[test]
fn test_journal_keeps_twenty_most_recent() {
    let journal = new_journal();
    for _ in 0..20 {
        journal.record_meal("apple", None).unwrap();
    }
    assert_eq!(journal.len(), 20);
    let oldest = journal.entries().last().unwrap().seq;
    assert_eq!(oldest, 1);

    journal.record_meal("white_rice", None).unwrap();

    let entries = journal.entries();
    assert_eq!(entries.len(), 20);
    assert_eq!(entries[0].food_id, "white_rice");
    assert!(entries.iter().all(|e| e.seq != 1));

    // The total still counts every meal ever recorded.
    assert_float_absolute_eq!(journal.daily_total(), 20.0 * 52.0 + 130.0, 1e-6);
}

#[test]
fn test_running_total_never_decreases() {
    let journal = new_journal();
    let mut previous = 0.0;
    for (food, weight) in [("apple", 80.0), ("white_rice", 150.0), ("chicken", 120.0)] {
        let outcome = journal.record_meal(food, Some(weight)).unwrap();
        assert!(outcome.daily_total >= previous);
        previous = outcome.daily_total;
    }
    assert!(journal.record_meal("nope", None).is_err());
    assert_eq!(journal.daily_total(), previous);
}

#[test]
fn test_summary_limit() {
    let journal = new_journal();
    journal.record_sensor_weight(90.0).unwrap();
    for _ in 0..15 {
        journal.record_meal("apple", None).unwrap();
    }

    let summary = journal.daily_summary();
    assert_eq!(summary.recent.len(), 10);
    assert_eq!(summary.last_sensor_weight, Some(90.0));
    assert_eq!(summary.recent[0].seq, 15);

    assert_eq!(journal.summary(3).recent.len(), 3);
}

#[test]
fn test_concurrent_meals_keep_total_consistent() {
    let journal = Arc::new(new_journal());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let journal = Arc::clone(&journal);
            thread::spawn(move || {
                for _ in 0..25 {
                    journal.record_meal("white_rice", Some(100.0)).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_float_absolute_eq!(journal.daily_total(), 200.0 * 130.0, 1e-6);
    assert_eq!(journal.len(), 20);

    // Sequence numbers are unique and the retained ones are the newest.
    let seqs: Vec<u64> = journal.entries().iter().map(|e| e.seq).collect();
    let expected: Vec<u64> = (181..=200).rev().collect();
    assert_eq!(seqs, expected);
}

#[test]
fn test_table_reload_is_seen_by_later_meals() {
    let shared = Arc::new(SharedTable::new(sample_table()));
    let journal = MealJournal::new(Arc::clone(&shared), FusionConfig::default());

    assert!(journal.record_meal("banana", None).is_err());

    shared.replace(
        NutritionTable::new(vec![("banana", MacroDensity::new(89.0, 1.1, 22.8, 0.3))]).unwrap(),
    );

    let outcome = journal.record_meal("banana", None).unwrap();
    assert_eq!(outcome.entry.food, "Banana");
    assert!(journal.record_meal("apple", None).is_err());
}
