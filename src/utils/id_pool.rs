use std::collections::BTreeSet;

use crate::error::{PhysicsError, Result};

/// Dense pool of small physics ids.
///
/// `take_id` always hands out the smallest id not currently in use, so the
/// live id range stays compact and the pair cache can be sized from the bound.
#[derive(Debug, Clone)]
pub struct IdPool {
    max: usize,
    next_fresh: usize,
    released: BTreeSet<u8>,
}

impl IdPool {
    /// Creates a pool handing out ids in `0..max`. `max` must not exceed
    /// [`crate::config::PHYSICS_ID_MAX`].
    pub fn new(max: usize) -> Self {
        Self {
            max,
            next_fresh: 0,
            released: BTreeSet::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.max
    }

    pub fn in_use(&self) -> usize {
        self.next_fresh - self.released.len()
    }

    pub fn take_id(&mut self) -> Result<u8> {
        if let Some(id) = self.released.pop_first() {
            return Ok(id);
        }
        if self.next_fresh >= self.max {
            log::warn!("physics id pool exhausted at {} live bodies", self.max);
            return Err(PhysicsError::IdPoolExhausted { max: self.max });
        }
        let id = self.next_fresh as u8;
        self.next_fresh += 1;
        Ok(id)
    }

    pub fn give_back_id(&mut self, id: u8) {
        let id_usize = id as usize;
        if id_usize >= self.next_fresh {
            return;
        }
        if id_usize + 1 == self.next_fresh {
            // Shrink the fresh range so fully-released tails don't pile up.
            self.next_fresh -= 1;
            while let Some(&last) = self.released.last() {
                if last as usize + 1 != self.next_fresh {
                    break;
                }
                self.released.pop_last();
                self.next_fresh -= 1;
            }
        } else {
            self.released.insert(id);
        }
    }

    pub fn reset(&mut self) {
        self.next_fresh = 0;
        self.released.clear();
    }
}
