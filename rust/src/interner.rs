//! Task id interning and arena slot allocation.
//!
//! Converts caller-facing task id strings to compact integer indices so the
//! graph and the scheduling passes can work with direct array indexing.
//! Released slots are recycled, so an index is only stable while its task
//! is alive.

use rustc_hash::FxHashMap;

/// Arena index of a task (u32 for compact storage and fast hashing).
pub type TaskIndex = u32;

/// String interner that maps task id strings to arena slots.
#[derive(Debug, Clone)]
pub struct TaskIdInterner {
    to_index: FxHashMap<String, TaskIndex>,
    from_index: Vec<Option<String>>,
    free: Vec<TaskIndex>,
}

impl TaskIdInterner {
    /// Create a new interner with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            to_index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            from_index: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    /// Intern a string, returning its slot index.
    /// If already interned, returns the existing index.
    pub fn intern(&mut self, s: &str) -> TaskIndex {
        if let Some(&idx) = self.to_index.get(s) {
            return idx;
        }
        let idx = match self.free.pop() {
            Some(idx) => {
                self.from_index[idx as usize] = Some(s.to_string());
                idx
            }
            None => {
                let idx = self.from_index.len() as TaskIndex;
                self.from_index.push(Some(s.to_string()));
                idx
            }
        };
        self.to_index.insert(s.to_string(), idx);
        idx
    }

    /// Get the index for a string, if it is live.
    #[inline]
    pub fn get(&self, s: &str) -> Option<TaskIndex> {
        self.to_index.get(s).copied()
    }

    /// Get the string for an index, if the slot is live.
    #[inline]
    pub fn resolve(&self, idx: TaskIndex) -> Option<&str> {
        self.from_index
            .get(idx as usize)
            .and_then(|slot| slot.as_deref())
    }

    /// Release a string. Its slot may be handed out again by a later `intern`.
    pub fn release(&mut self, s: &str) -> Option<TaskIndex> {
        let idx = self.to_index.remove(s)?;
        self.from_index[idx as usize] = None;
        self.free.push(idx);
        Some(idx)
    }

    /// Number of live interned strings.
    pub fn len(&self) -> usize {
        self.to_index.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.to_index.is_empty()
    }

    /// Number of slots ever allocated (live and released).
    /// Per-task vectors indexed by `TaskIndex` are sized to this.
    pub fn slot_count(&self) -> usize {
        self.from_index.len()
    }
}

impl Default for TaskIdInterner {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}
