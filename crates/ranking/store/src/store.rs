//! The ranking store.
//!
//! One [`RwLock`] guards the whole population. Queries take shared read
//! guards. [`RankingStore::upsert`] takes an upgradable read guard, which
//! still admits readers, to look the id up and validate the delta; it is
//! upgraded to exclusive only once a structural change is certain. Upgradable
//! guards exclude each other, so no two upserts can interleave between the
//! existence check and the write.

use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use podium_skiplist::{IndexedSkipList, NodeRef, SkipListError};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::entry::{Entry, RankedEntry, Standing, to_rank};
use crate::{StoreConfig, StoreError};

/// In-memory leaderboard keyed by `u64` identities.
#[derive(Debug)]
pub struct RankingStore {
    config: StoreConfig,
    standings: RwLock<Standings>,
}

/// The ordered population and its identity index.
#[derive(Debug, Default)]
struct Standings {
    list: IndexedSkipList<Entry>,
    /// id → current bottom-level node. The list owns the nodes.
    index: FxHashMap<u64, NodeRef>,
}

impl Standings {
    fn entry(&self, node: NodeRef) -> Result<Entry, StoreError> {
        self.list
            .get(node)
            .copied()
            .ok_or(StoreError::InvalidOperation(SkipListError::DanglingNode(
                node,
            )))
    }

    fn standing(&self, node: NodeRef) -> Result<Standing, StoreError> {
        let entry = self.entry(node)?;
        let rank = self.list.rank_of(node)?;
        Ok(Standing {
            score: entry.score,
            rank: to_rank(rank),
        })
    }

    /// Inserts `entry` as a fresh node and points the index at it.
    fn place(&mut self, entry: Entry) -> Result<Standing, StoreError> {
        let node = self.list.insert(entry);
        self.index.insert(entry.id, node);
        self.standing(node)
    }
}

impl Default for RankingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RankingStore {
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            standings: RwLock::new(Standings::default()),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Adds `delta` to the score of `id`, creating the entry if needed.
    ///
    /// A zero delta on a known id is a read: nothing is relinked. Rejected
    /// deltas leave the store untouched.
    pub fn upsert(&self, id: u64, delta: i64) -> Result<Standing, StoreError> {
        let standings = self.standings.upgradable_read();
        let existing = standings.index.get(&id).copied();

        let Some(node) = existing else {
            self.config.check_delta(delta)?;
            let mut standings = RwLockUpgradableReadGuard::upgrade(standings);
            let standing = standings.place(Entry { id, score: delta })?;
            debug!(id, score = standing.score, rank = standing.rank, "inserted entry");
            return Ok(standing);
        };

        if delta == 0 {
            return standings.standing(node);
        }

        self.config.check_delta(delta)?;
        let current = standings.entry(node)?;
        let score = current
            .score
            .checked_add(delta)
            .ok_or(StoreError::ArithmeticOverflow {
                id,
                score: current.score,
                delta,
            })?;

        let mut standings = RwLockUpgradableReadGuard::upgrade(standings);
        standings.list.remove(node);
        let standing = standings.place(Entry { id, score })?;
        debug!(
            id,
            delta,
            score = standing.score,
            rank = standing.rank,
            "updated entry"
        );
        Ok(standing)
    }

    /// Entries ranked `start..=end` in rank order, up to the first entry whose
    /// score is not positive.
    ///
    /// `start` below 1 is clamped to 1 and `end` past the population is
    /// clamped to the last entry.
    pub fn range(&self, start: i32, end: i32) -> Result<Vec<RankedEntry>, StoreError> {
        if end < start {
            return Err(StoreError::InvalidRange { start, end });
        }
        let start = start.max(1);

        let standings = self.standings.read();
        let Some(first) = standings.list.node_at_rank(start.unsigned_abs() as usize) else {
            trace!(start, end, len = standings.list.len(), "range starts past population");
            return Ok(Vec::new());
        };

        let rows: Vec<_> = (start..=end)
            .zip(standings.list.iter_from(first))
            .take_while(|(_, (_, entry))| entry.score > 0)
            .map(|(rank, (_, entry))| RankedEntry::new(*entry, rank))
            .collect();
        trace!(start, end, rows = rows.len(), "range query");
        Ok(rows)
    }

    /// The neighbourhood of `id`: up to `high` entries ranked above it, the
    /// entry itself, and up to `low` entries ranked below it.
    ///
    /// Entries with a score that is not positive are left out, but still
    /// count towards `high`/`low` and keep their rank slot. Unknown ids yield
    /// an empty window.
    pub fn window(&self, id: u64, high: i32, low: i32) -> Vec<RankedEntry> {
        let standings = self.standings.read();
        let Some(node) = standings.index.get(&id).copied() else {
            return Vec::new();
        };
        let (entry, rank) = match (standings.entry(node), standings.list.rank_of(node)) {
            (Ok(entry), Ok(rank)) => (entry, to_rank(rank)),
            _ => return Vec::new(),
        };

        let mut rows = Vec::new();
        let mut cursor = standings.list.prev(node);
        let mut position = rank;
        for _ in 0..high.max(0) {
            let Some(prev) = cursor else {
                break;
            };
            position -= 1;
            if let Some(above) = standings.list.get(prev).filter(|e| e.score > 0) {
                rows.push(RankedEntry::new(*above, position));
            }
            cursor = standings.list.prev(prev);
        }
        rows.reverse();

        if entry.score > 0 {
            rows.push(RankedEntry::new(entry, rank));
            let below = standings
                .list
                .iter_from(node)
                .skip(1)
                .take(low.max(0).unsigned_abs() as usize)
                .take_while(|(_, e)| e.score > 0)
                .zip(rank.saturating_add(1)..)
                .map(|((_, e), rank)| RankedEntry::new(*e, rank));
            rows.extend(below);
        }

        trace!(id, high, low, rows = rows.len(), "window query");
        rows
    }

    /// Whether `id` has ever been upserted, whatever its score.
    pub fn contains(&self, id: u64) -> bool {
        self.standings.read().index.contains_key(&id)
    }

    /// Current score and rank of `id`, whatever its score.
    pub fn get(&self, id: u64) -> Option<Standing> {
        let standings = self.standings.read();
        let node = standings.index.get(&id).copied()?;
        standings.standing(node).ok()
    }

    /// Number of known ids.
    pub fn len(&self) -> usize {
        self.standings.read().list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use proptest::prelude::*;

    use super::*;

    fn row(id: u64, score: i64, rank: i32) -> RankedEntry {
        RankedEntry { id, score, rank }
    }

    #[test]
    fn insert_reports_score_and_rank() {
        let store = RankingStore::new();
        assert_eq!(store.upsert(5, 50), Ok(Standing { score: 50, rank: 1 }));
        assert_eq!(store.upsert(6, 60), Ok(Standing { score: 60, rank: 1 }));
        assert_eq!(store.get(5), Some(Standing { score: 50, rank: 2 }));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn zero_delta_is_a_read() {
        let store = RankingStore::new();
        store.upsert(1, 10).unwrap();
        store.upsert(2, 20).unwrap();
        let before = store.standings.read().index[&1];

        assert_eq!(store.upsert(1, 0), Ok(Standing { score: 10, rank: 2 }));
        assert_eq!(store.standings.read().index[&1], before);
    }

    #[test]
    fn zero_delta_creates_unknown_id() {
        let store = RankingStore::new();
        assert_eq!(store.upsert(9, 0), Ok(Standing { score: 0, rank: 1 }));
        assert!(store.contains(9));
        assert_eq!(store.range(1, 10), Ok(vec![]));
    }

    #[test]
    fn update_relinks_node() {
        let store = RankingStore::new();
        store.upsert(1, 10).unwrap();
        let before = store.standings.read().index[&1];
        store.upsert(1, 5).unwrap();
        let after = store.standings.read().index[&1];

        assert_ne!(before, after);
        let standings = store.standings.read();
        assert!(!standings.list.contains_node(before));
        assert_eq!(standings.list.len(), 1);
    }

    #[test]
    fn overflow_is_rejected_without_mutation() {
        let store = RankingStore::with_config(StoreConfig::with_max_delta(u64::MAX));
        store.upsert(1, i64::MAX - 1).unwrap();
        assert_eq!(
            store.upsert(1, 2),
            Err(StoreError::ArithmeticOverflow {
                id: 1,
                score: i64::MAX - 1,
                delta: 2
            })
        );
        assert_eq!(store.get(1), Some(Standing { score: i64::MAX - 1, rank: 1 }));

        store.upsert(2, i64::MIN + 1).unwrap();
        assert!(matches!(
            store.upsert(2, -2),
            Err(StoreError::ArithmeticOverflow { .. })
        ));
    }

    #[test]
    fn out_of_bounds_delta_on_new_id_is_not_inserted() {
        let store = RankingStore::new();
        assert!(matches!(
            store.upsert(3, 1_001),
            Err(StoreError::ScoreOutOfBounds { .. })
        ));
        assert!(!store.contains(3));
        assert!(store.is_empty());
    }

    #[test]
    fn range_validates_and_clamps() {
        let store = RankingStore::new();
        for (id, score) in [(1, 100), (2, 200), (3, 300)] {
            store.upsert(id, score).unwrap();
        }

        assert_eq!(
            store.range(10, 5),
            Err(StoreError::InvalidRange { start: 10, end: 5 })
        );
        assert_eq!(store.range(4, 10), Ok(vec![]));
        assert_eq!(store.range(0, 1), Ok(vec![row(3, 300, 1)]));
        assert_eq!(store.range(-5, 0), Ok(vec![]));
        assert_eq!(store.range(2, i32::MAX).unwrap().len(), 2);
        assert_eq!(store.range(i32::MIN, i32::MAX).unwrap().len(), 3);
    }

    #[test]
    fn range_on_empty_store() {
        let store = RankingStore::new();
        assert_eq!(store.range(0, 0), Ok(vec![]));
        assert_eq!(store.range(1, 10), Ok(vec![]));
    }

    #[test]
    fn window_clamps_negative_extents() {
        let store = RankingStore::new();
        for (id, score) in [(1, 100), (2, 200), (3, 300)] {
            store.upsert(id, score).unwrap();
        }
        assert_eq!(store.window(2, -100, -100), vec![row(2, 200, 2)]);
        assert_eq!(store.window(2, 100, 100).len(), 3);
        assert_eq!(store.window(42, 1, 1), vec![]);
    }

    #[test]
    fn window_keeps_structural_ranks() {
        let store = RankingStore::new();
        store.upsert(1, 30).unwrap();
        store.upsert(2, 20).unwrap();
        store.upsert(3, 0).unwrap();
        store.upsert(4, -10).unwrap();

        assert_eq!(
            store.window(2, 1, 5),
            vec![row(1, 30, 1), row(2, 20, 2)]
        );
        assert_eq!(store.window(4, 3, 0), vec![row(1, 30, 1), row(2, 20, 2)]);
        assert_eq!(store.window(4, 1, 0), vec![]);
    }

    // Reference model: a fully sorted vector rebuilt on every call.
    #[derive(Default)]
    struct Model {
        scores: BTreeMap<u64, i64>,
    }

    impl Model {
        fn sorted(&self) -> Vec<Entry> {
            let mut entries: Vec<_> = self
                .scores
                .iter()
                .map(|(&id, &score)| Entry { id, score })
                .collect();
            entries.sort();
            entries
        }

        fn rank(&self, id: u64) -> i32 {
            let position = self.sorted().iter().position(|e| e.id == id).unwrap();
            to_rank(position + 1)
        }

        fn upsert(&mut self, config: &StoreConfig, id: u64, delta: i64) -> Result<Standing, StoreError> {
            match self.scores.get(&id).copied() {
                Some(score) if delta == 0 => Ok(Standing { score, rank: self.rank(id) }),
                Some(score) => {
                    config.check_delta(delta)?;
                    let score = score.checked_add(delta).ok_or(StoreError::ArithmeticOverflow {
                        id,
                        score,
                        delta,
                    })?;
                    self.scores.insert(id, score);
                    Ok(Standing { score, rank: self.rank(id) })
                }
                None => {
                    config.check_delta(delta)?;
                    self.scores.insert(id, delta);
                    Ok(Standing { score: delta, rank: self.rank(id) })
                }
            }
        }

        fn range(&self, start: i32, end: i32) -> Result<Vec<RankedEntry>, StoreError> {
            if end < start {
                return Err(StoreError::InvalidRange { start, end });
            }
            let sorted = self.sorted();
            let mut rows = Vec::new();
            for rank in start.max(1)..=end {
                let Some(entry) = sorted.get(rank as usize - 1) else {
                    break;
                };
                if entry.score <= 0 {
                    break;
                }
                rows.push(RankedEntry::new(*entry, rank));
            }
            Ok(rows)
        }

        fn window(&self, id: u64, high: i32, low: i32) -> Vec<RankedEntry> {
            let sorted = self.sorted();
            let Some(position) = sorted.iter().position(|e| e.id == id) else {
                return Vec::new();
            };
            let rank = position as i32 + 1;
            let mut rows = Vec::new();
            for k in (1..=high.max(0)).rev() {
                let r = rank - k;
                if r < 1 {
                    continue;
                }
                let entry = sorted[r as usize - 1];
                if entry.score > 0 {
                    rows.push(RankedEntry::new(entry, r));
                }
            }
            if sorted[position].score > 0 {
                rows.push(RankedEntry::new(sorted[position], rank));
                for k in 1..=low.max(0) {
                    let Some(entry) = sorted.get(position + k as usize) else {
                        break;
                    };
                    if entry.score <= 0 {
                        break;
                    }
                    rows.push(RankedEntry::new(*entry, rank + k));
                }
            }
            rows
        }
    }

    #[derive(Debug, Clone)]
    enum Op {
        Upsert(u64, i64),
        Range(i32, i32),
        Window(u64, i32, i32),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            6 => (0u64..40, -1_200i64..1_200).prop_map(|(id, delta)| Op::Upsert(id, delta)),
            1 => (0u64..40, Just(0i64)).prop_map(|(id, delta)| Op::Upsert(id, delta)),
            2 => (-3i32..50, -3i32..50).prop_map(|(start, end)| Op::Range(start, end)),
            2 => (0u64..45, -2i32..8, -2i32..8).prop_map(|(id, high, low)| Op::Window(id, high, low)),
        ]
    }

    proptest! {
        #[test]
        fn matches_sorted_model(ops in prop::collection::vec(op(), 1..150)) {
            let store = RankingStore::new();
            let mut model = Model::default();

            for op in ops {
                match op {
                    Op::Upsert(id, delta) => {
                        prop_assert_eq!(store.upsert(id, delta), model.upsert(store.config(), id, delta));
                    }
                    Op::Range(start, end) => {
                        prop_assert_eq!(store.range(start, end), model.range(start, end));
                    }
                    Op::Window(id, high, low) => {
                        prop_assert_eq!(store.window(id, high, low), model.window(id, high, low));
                    }
                }
                prop_assert_eq!(store.len(), model.scores.len());
            }
        }

        #[test]
        fn split_deltas_accumulate(id in any::<u64>(), d1 in -1_000i64..=1_000, d2 in -1_000i64..=1_000) {
            prop_assume!(d1 != 0);
            let split = RankingStore::new();
            for other in [1u64, 2, 3] {
                if other != id {
                    split.upsert(other, 500).unwrap();
                }
            }

            split.upsert(id, d1).unwrap();
            let split_result = split.upsert(id, d2).unwrap();

            // the combined delta can exceed the per-call bound, so widen it
            let wide = RankingStore::with_config(StoreConfig::with_max_delta(2_000));
            for other in [1u64, 2, 3] {
                if other != id {
                    wide.upsert(other, 500).unwrap();
                }
            }
            let single_result = wide.upsert(id, d1 + d2).unwrap();
            prop_assert_eq!(split_result, single_result);
        }
    }
}
