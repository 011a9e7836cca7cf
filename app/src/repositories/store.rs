//! Record store shared by every repository implementation
//!
//! Holds all cats and their records in one serializable value. Each
//! collection is kept newest first. Writes for a (cat, day) that already has
//! an entry replace it: the old entry is filtered out, then the new one is
//! inserted.

use chrono::NaiveDate;
use happy_kitty_shared::{Cat, HealthRecord, WeightGoal, WeightRecord, WeightUnit};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Everything the app persists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    #[serde(default)]
    pub cats: Vec<Cat>,
    #[serde(default)]
    pub health_records: Vec<HealthRecord>,
    #[serde(default)]
    pub weight_records: Vec<WeightRecord>,
    #[serde(default)]
    pub weight_goals: Vec<WeightGoal>,
    #[serde(default)]
    pub selected_cat_id: Option<Uuid>,
    #[serde(default)]
    pub preferred_unit: WeightUnit,
}

impl StoreState {
    /// Empty store with the given preferred unit
    pub fn with_unit(preferred_unit: WeightUnit) -> Self {
        Self {
            preferred_unit,
            ..Self::default()
        }
    }

    // ========================================================================
    // Cats
    // ========================================================================

    pub fn cat(&self, id: Uuid) -> Option<&Cat> {
        self.cats.iter().find(|c| c.id == id)
    }

    /// Insert a cat or replace the one with the same id
    pub fn upsert_cat(&mut self, cat: Cat) {
        match self.cats.iter_mut().find(|c| c.id == cat.id) {
            Some(existing) => *existing = cat,
            None => self.cats.push(cat),
        }
    }

    /// Remove a cat and everything that belongs to it
    pub fn remove_cat(&mut self, id: Uuid) -> bool {
        let before = self.cats.len();
        self.cats.retain(|c| c.id != id);
        if self.cats.len() == before {
            return false;
        }

        self.health_records.retain(|r| r.cat_id != id);
        self.weight_records.retain(|r| r.cat_id != id);
        self.weight_goals.retain(|g| g.cat_id != id);
        if self.selected_cat_id == Some(id) {
            self.selected_cat_id = None;
        }
        true
    }

    // ========================================================================
    // Health records
    // ========================================================================

    pub fn health_records_for(&self, cat_id: Uuid) -> Vec<HealthRecord> {
        self.health_records
            .iter()
            .filter(|r| r.cat_id == cat_id)
            .cloned()
            .collect()
    }

    pub fn upsert_health_record(&mut self, record: HealthRecord) {
        self.health_records
            .retain(|r| !(r.cat_id == record.cat_id && r.date == record.date));
        self.health_records.push(record);
        self.health_records.sort_by(|a, b| b.date.cmp(&a.date));
    }

    // ========================================================================
    // Weight
    // ========================================================================

    pub fn weight_records_for(&self, cat_id: Uuid) -> Vec<WeightRecord> {
        self.weight_records
            .iter()
            .filter(|r| r.cat_id == cat_id)
            .cloned()
            .collect()
    }

    pub fn upsert_weight_record(&mut self, record: WeightRecord) {
        self.weight_records
            .retain(|r| !(r.cat_id == record.cat_id && r.date == record.date));
        self.weight_records.push(record);
        self.weight_records.sort_by(|a, b| b.date.cmp(&a.date));
    }

    pub fn remove_weight_record(&mut self, cat_id: Uuid, date: NaiveDate) -> bool {
        let before = self.weight_records.len();
        self.weight_records
            .retain(|r| !(r.cat_id == cat_id && r.date == date));
        self.weight_records.len() != before
    }

    pub fn goal_for(&self, cat_id: Uuid) -> Option<&WeightGoal> {
        self.weight_goals.iter().find(|g| g.cat_id == cat_id)
    }

    /// Set the goal for a cat, discarding any previous one
    pub fn replace_goal(&mut self, goal: WeightGoal) {
        self.weight_goals.retain(|g| g.cat_id != goal.cat_id);
        self.weight_goals.push(goal);
    }

    pub fn remove_goal(&mut self, cat_id: Uuid) -> bool {
        let before = self.weight_goals.len();
        self.weight_goals.retain(|g| g.cat_id != cat_id);
        self.weight_goals.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use happy_kitty_shared::HealthAnswers;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn answers(poop: &str) -> HealthAnswers {
        HealthAnswers {
            eating: "2-3".into(),
            water: "normal".into(),
            pee: "2-4".into(),
            poop: poop.into(),
            activity: "normal".into(),
            mood: "normal".into(),
            vomiting: "no".into(),
            appetite: "normal".into(),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, d).unwrap()
    }

    #[test]
    fn test_same_day_health_record_is_replaced() {
        let mut store = StoreState::default();
        let cat = Cat::new("Tofu", None);
        store.upsert_cat(cat.clone());

        store.upsert_health_record(HealthRecord::new(cat.id, day(1), answers("normal")));
        store.upsert_health_record(HealthRecord::new(cat.id, day(2), answers("normal")));
        store.upsert_health_record(HealthRecord::new(cat.id, day(1), answers("diarrhea")));

        let records = store.health_records_for(cat.id);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].date, day(2));
        assert_eq!(records[1].answers.poop, "diarrhea");
    }

    #[test]
    fn test_same_day_for_other_cat_is_kept() {
        let mut store = StoreState::default();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        for cat_id in [a, b] {
            store.upsert_weight_record(WeightRecord {
                date: day(3),
                cat_id,
                weight: 4.0,
                unit: WeightUnit::Kg,
            });
        }
        assert_eq!(store.weight_records.len(), 2);
        assert!(store.remove_weight_record(a, day(3)));
        assert!(!store.remove_weight_record(a, day(3)));
        assert_eq!(store.weight_records_for(b).len(), 1);
    }

    #[test]
    fn test_remove_cat_cascades() {
        let mut store = StoreState::default();
        let keep = Cat::new("Keep", None);
        let gone = Cat::new("Gone", None);
        store.upsert_cat(keep.clone());
        store.upsert_cat(gone.clone());
        store.selected_cat_id = Some(gone.id);

        for cat in [&keep, &gone] {
            store.upsert_health_record(HealthRecord::new(cat.id, day(1), answers("normal")));
            store.upsert_weight_record(WeightRecord {
                date: day(1),
                cat_id: cat.id,
                weight: 4.0,
                unit: WeightUnit::Kg,
            });
            store.replace_goal(WeightGoal {
                cat_id: cat.id,
                min_weight: 3.0,
                max_weight: 5.0,
                unit: WeightUnit::Kg,
            });
        }

        assert!(store.remove_cat(gone.id));
        assert!(!store.remove_cat(gone.id));
        assert_eq!(store.cats.len(), 1);
        assert!(store.health_records_for(gone.id).is_empty());
        assert!(store.weight_records_for(gone.id).is_empty());
        assert!(store.goal_for(gone.id).is_none());
        assert_eq!(store.selected_cat_id, None);
        assert_eq!(store.health_records_for(keep.id).len(), 1);
        assert!(store.goal_for(keep.id).is_some());
    }

    #[test]
    fn test_goal_replacement_keeps_one_per_cat() {
        let mut store = StoreState::default();
        let cat_id = Uuid::new_v4();
        for max in [5.0, 6.0] {
            store.replace_goal(WeightGoal {
                cat_id,
                min_weight: 3.0,
                max_weight: max,
                unit: WeightUnit::Kg,
            });
        }
        assert_eq!(store.weight_goals.len(), 1);
        assert_eq!(store.goal_for(cat_id).map(|g| g.max_weight), Some(6.0));
        assert!(store.remove_goal(cat_id));
        assert!(!store.remove_goal(cat_id));
    }

    #[test]
    fn test_state_json_shape() {
        let mut store = StoreState::with_unit(WeightUnit::Lbs);
        let cat = Cat::new("Pixel", None);
        store.selected_cat_id = Some(cat.id);
        store.upsert_cat(cat);

        let json = serde_json::to_value(&store).unwrap();
        assert_eq!(json["preferredUnit"], "lbs");
        assert!(json["selectedCatId"].is_string());
        assert!(json["healthRecords"].as_array().unwrap().is_empty());

        // missing collections load as empty
        let parsed: StoreState = serde_json::from_str(r#"{"cats": []}"#).unwrap();
        assert_eq!(parsed, StoreState::default());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: one weight entry per day, newest first, holding the last value written
        #[test]
        fn prop_weight_upsert_keeps_last_entry_per_day(
            entries in prop::collection::vec((1u32..29, 1u32..200), 0..40)
        ) {
            let cat_id = Uuid::new_v4();
            let mut state = StoreState::default();
            let mut expected = BTreeMap::new();
            for (d, tenths) in &entries {
                let weight = *tenths as f64 / 10.0;
                state.upsert_weight_record(WeightRecord {
                    date: day(*d),
                    cat_id,
                    weight,
                    unit: WeightUnit::Kg,
                });
                expected.insert(day(*d), weight);
            }

            let got: Vec<(NaiveDate, f64)> = state
                .weight_records_for(cat_id)
                .iter()
                .map(|r| (r.date, r.weight))
                .collect();
            let want: Vec<(NaiveDate, f64)> = expected.into_iter().rev().collect();
            prop_assert_eq!(got, want);
        }
    }
}
