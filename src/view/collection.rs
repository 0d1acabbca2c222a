use indexmap::IndexMap;

use crate::model::task::Task;

/// Key of a row in the collection. Tasks the store returned without an id
/// get a positional key so they can still be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKey {
    Id(u64),
    Unsaved(usize),
}

/// The task list as last returned by the store, patched in place after
/// mutations. Order is the store's order; lookups by id are O(1).
#[derive(Debug, Clone, Default)]
pub struct TaskCollection {
    rows: IndexMap<RowKey, Task>,
    next_unsaved: usize,
}

impl TaskCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything with a fresh list result
    pub fn replace(&mut self, tasks: Vec<Task>) {
        self.rows.clear();
        self.next_unsaved = 0;
        for task in tasks {
            self.push(task);
        }
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.next_unsaved = 0;
    }

    fn push(&mut self, task: Task) {
        let key = match task.id {
            Some(id) => RowKey::Id(id),
            None => {
                let key = RowKey::Unsaved(self.next_unsaved);
                self.next_unsaved += 1;
                key
            }
        };
        self.rows.insert(key, task);
    }

    /// Append a newly created task. If the id is already present the
    /// existing row is replaced in place.
    pub fn append(&mut self, task: Task) {
        self.push(task);
    }

    /// Replace the row with the same id. Returns false if it is not present.
    pub fn replace_by_id(&mut self, task: Task) -> bool {
        let Some(id) = task.id else {
            return false;
        };
        match self.rows.get_mut(&RowKey::Id(id)) {
            Some(slot) => {
                *slot = task;
                true
            }
            None => false,
        }
    }

    /// Remove the row with this id, keeping the order of the rest
    pub fn remove_by_id(&mut self, id: u64) -> Option<Task> {
        self.rows.shift_remove(&RowKey::Id(id))
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.rows.get(&RowKey::Id(id))
    }

    pub fn get_index(&self, index: usize) -> Option<&Task> {
        self.rows.get_index(index).map(|(_, task)| task)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.rows.contains_key(&RowKey::Id(id))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.rows.values()
    }

    pub fn ids(&self) -> Vec<Option<u64>> {
        self.rows.values().map(|t| t.id).collect()
    }
}

impl<'a> IntoIterator for &'a TaskCollection {
    type Item = &'a Task;
    type IntoIter = indexmap::map::Values<'a, RowKey, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.values()
    }
}
