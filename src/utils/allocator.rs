use serde::{Deserialize, Serialize};

/// Opaque handle to a registered body. A slot's generation is bumped every
/// time it is vacated, so handles to removed bodies never resolve again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct BodyHandle {
    pub index: u32,
    pub generation: u32,
}

impl BodyHandle {
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Generational slot storage that also remembers insertion order.
///
/// Slots are recycled most-recently-vacated first; iteration through
/// [`Arena::iter`] and [`Arena::handles`] always follows insertion order,
/// independent of slot reuse.
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    vacant: Vec<u32>,
    order: Vec<BodyHandle>,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            vacant: Vec::new(),
            order: Vec::new(),
        }
    }

    pub fn insert(&mut self, value: T) -> BodyHandle {
        let handle = match self.vacant.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.value = Some(value);
                BodyHandle {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    value: Some(value),
                });
                BodyHandle {
                    index: (self.slots.len() - 1) as u32,
                    generation: 0,
                }
            }
        };
        self.order.push(handle);
        handle
    }

    pub fn remove(&mut self, handle: BodyHandle) -> Option<T> {
        let value = self.slot_mut(handle)?.value.take()?;
        self.vacate(handle.index);
        self.order.retain(|&live| live != handle);
        Some(value)
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&T> {
        self.slots
            .get(handle.index())
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut T> {
        self.slot_mut(handle)?.value.as_mut()
    }

    /// Borrows two distinct live entries mutably, in argument order.
    pub fn get2_mut(&mut self, a: BodyHandle, b: BodyHandle) -> Option<(&mut T, &mut T)> {
        if a.index == b.index || !self.contains(a) || !self.contains(b) {
            return None;
        }
        let split = a.index().max(b.index());
        let (head, tail) = self.slots.split_at_mut(split);
        let low = head[a.index().min(b.index())].value.as_mut()?;
        let high = tail[0].value.as_mut()?;
        if a.index() < b.index() {
            Some((low, high))
        } else {
            Some((high, low))
        }
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.get(handle).is_some()
    }

    /// Live handles in insertion order.
    pub fn handles(&self) -> &[BodyHandle] {
        &self.order
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &T)> + '_ {
        self.order
            .iter()
            .filter_map(|&handle| self.get(handle).map(|value| (handle, value)))
    }

    /// Mutable access to every live value, in slot order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.slots.iter_mut().filter_map(|slot| slot.value.as_mut())
    }

    #[cfg(feature = "parallel")]
    pub fn par_values_mut(&mut self) -> impl rayon::iter::ParallelIterator<Item = &mut T> + '_
    where
        T: Send,
    {
        use rayon::prelude::*;
        self.slots.par_iter_mut().filter_map(|slot| slot.value.as_mut())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Removes every value, returning them in insertion order.
    pub fn drain(&mut self) -> Vec<T> {
        let order = std::mem::take(&mut self.order);
        order
            .into_iter()
            .filter_map(|handle| {
                let value = self.slots[handle.index()].value.take()?;
                self.vacate(handle.index);
                Some(value)
            })
            .collect()
    }

    pub fn clear(&mut self) {
        drop(self.drain());
    }

    fn slot_mut(&mut self, handle: BodyHandle) -> Option<&mut Slot<T>> {
        self.slots
            .get_mut(handle.index())
            .filter(|slot| slot.generation == handle.generation)
    }

    fn vacate(&mut self, index: u32) {
        let slot = &mut self.slots[index as usize];
        slot.generation = slot.generation.wrapping_add(1);
        self.vacant.push(index);
    }
}
