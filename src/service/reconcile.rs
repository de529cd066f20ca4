//! Three-way diff of a user's stored skills against a submitted skill list.

use crate::models::SkillRating;
use std::collections::HashSet;

/// Partition of the union of old and new skill names.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SkillDiff {
    /// Held before and after; carries the submitted rating.
    pub changed: Vec<SkillRating>,
    /// Only in the submitted list.
    pub learned: Vec<SkillRating>,
    /// Only in the stored list.
    pub lost: Vec<SkillRating>,
}

impl SkillDiff {
    pub fn lost_names(&self) -> Vec<String> {
        self.lost.iter().map(|s| s.skill.clone()).collect()
    }

    /// `+1` per learned skill and `-1` per lost skill, sorted by name. Applying
    /// them in this order makes every writer lock `skills` rows in one sequence.
    pub fn frequency_deltas(&self) -> Vec<(&str, i32)> {
        let mut deltas: Vec<(&str, i32)> = self
            .learned
            .iter()
            .map(|s| (s.skill.as_str(), 1))
            .chain(self.lost.iter().map(|s| (s.skill.as_str(), -1)))
            .collect();
        deltas.sort_unstable_by(|a, b| a.0.cmp(b.0));
        deltas
    }
}

/// Drop repeated skill names, keeping the first occurrence.
pub fn dedup_skills(skills: &[SkillRating]) -> Vec<SkillRating> {
    let mut seen = HashSet::new();
    skills
        .iter()
        .filter(|s| seen.insert(s.skill.as_str()))
        .cloned()
        .collect()
}

/// Names compare exactly. Output keeps the order of the list each entry came from.
pub fn reconcile(previous: &[SkillRating], updated: &[SkillRating]) -> SkillDiff {
    let updated = dedup_skills(updated);
    let prev_names: HashSet<&str> = previous.iter().map(|s| s.skill.as_str()).collect();
    let new_names: HashSet<&str> = updated.iter().map(|s| s.skill.as_str()).collect();

    let (changed, learned): (Vec<_>, Vec<_>) = updated
        .iter()
        .cloned()
        .partition(|s| prev_names.contains(s.skill.as_str()));
    let lost = previous
        .iter()
        .filter(|s| !new_names.contains(s.skill.as_str()))
        .cloned()
        .collect();

    SkillDiff {
        changed,
        learned,
        lost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sr(skill: &str, rating: i32) -> SkillRating {
        SkillRating {
            skill: skill.to_string(),
            rating,
        }
    }

    fn names(v: &[SkillRating]) -> Vec<&str> {
        v.iter().map(|s| s.skill.as_str()).collect()
    }

    #[test]
    fn splits_into_changed_learned_lost() {
        let prev = vec![sr("Rust", 3), sr("Go", 2), sr("SQL", 4)];
        let next = vec![sr("Rust", 5), sr("Python", 1), sr("SQL", 4)];
        let diff = reconcile(&prev, &next);
        assert_eq!(diff.changed, vec![sr("Rust", 5), sr("SQL", 4)]);
        assert_eq!(diff.learned, vec![sr("Python", 1)]);
        assert_eq!(diff.lost, vec![sr("Go", 2)]);
        assert_eq!(diff.lost_names(), vec!["Go".to_string()]);
    }

    #[test]
    fn partitions_are_exhaustive_and_disjoint() {
        let prev = vec![sr("a", 1), sr("b", 2), sr("c", 3), sr("d", 4)];
        let next = vec![sr("c", 1), sr("e", 2), sr("a", 5), sr("f", 1)];
        let diff = reconcile(&prev, &next);

        let mut all: Vec<&str> = names(&diff.changed);
        all.extend(names(&diff.learned));
        all.extend(names(&diff.lost));
        let unique: HashSet<&str> = all.iter().copied().collect();
        assert_eq!(all.len(), unique.len(), "a skill landed in two partitions");

        let expected: HashSet<&str> = ["a", "b", "c", "d", "e", "f"].into_iter().collect();
        assert_eq!(unique, expected);
    }

    #[test]
    fn empty_submission_loses_everything() {
        let prev = vec![sr("a", 1), sr("b", 2)];
        let diff = reconcile(&prev, &[]);
        assert!(diff.changed.is_empty());
        assert!(diff.learned.is_empty());
        assert_eq!(names(&diff.lost), vec!["a", "b"]);
    }

    #[test]
    fn first_duplicate_wins() {
        let diff = reconcile(&[], &[sr("Rust", 2), sr("Rust", 5)]);
        assert_eq!(diff.learned, vec![sr("Rust", 2)]);
    }

    #[test]
    fn frequency_deltas_are_name_ordered_whatever_the_submission_order() {
        let prev = vec![sr("m", 1), sr("b", 1)];
        let forward = reconcile(&prev, &[sr("z", 1), sr("a", 1), sr("k", 1)]);
        let backward = reconcile(&prev, &[sr("k", 1), sr("a", 1), sr("z", 1)]);
        let expected = vec![("a", 1), ("b", -1), ("k", 1), ("m", -1), ("z", 1)];
        assert_eq!(forward.frequency_deltas(), expected);
        assert_eq!(backward.frequency_deltas(), expected);
    }

    #[test]
    fn names_are_case_sensitive() {
        let diff = reconcile(&[sr("rust", 1)], &[sr("Rust", 1)]);
        assert_eq!(names(&diff.learned), vec!["Rust"]);
        assert_eq!(names(&diff.lost), vec!["rust"]);
    }
}
