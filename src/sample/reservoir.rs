//! Reservoir sampling implementation (Algorithm R) that remembers arrival order.
//!
//! Every slot carries the sequence number of the record it holds, so the
//! sample can be handed back in input order even though replacements land
//! at random slot indices.

use crate::rng::RandomRange;
use rand::rngs::StdRng;

/// One reservoir position: the record's 0-based arrival index plus its value.
#[derive(Debug, Clone)]
struct Slot<T> {
    seq: u64,
    payload: T,
}

/// Index of a slot chosen by [`Reservoir::offer_slot`].
///
/// Only meaningful for the reservoir that produced it. Until it is passed
/// to [`Reservoir::commit`] the slot holds `T::default()`.
#[must_use = "the chosen slot holds a placeholder until it is committed"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotIndex(usize);

impl SlotIndex {
    pub fn get(self) -> usize {
        self.0
    }
}

/// Outcome of the membership decision for one candidate.
enum Placement {
    Append,
    Replace(usize),
    Discard,
}

/// Reservoir sampler using Algorithm R.
///
/// Maintains a fixed-size sample of items seen so far,
/// with each item having equal probability of being in the sample.
#[derive(Debug)]
pub struct Reservoir<T, R = StdRng> {
    /// Maximum capacity of the reservoir
    capacity: usize,
    /// Total count of items seen
    consumed: u64,
    /// Current slots, never more than `capacity`
    slots: Vec<Slot<T>>,
    /// Random number source
    rng: R,
}

impl<T, R: RandomRange> Reservoir<T, R> {
    /// Create a new reservoir with the given capacity.
    ///
    /// A capacity of zero is valid and produces an always-empty sample.
    pub fn new(capacity: usize, rng: R) -> Self {
        Self {
            capacity,
            consumed: 0,
            slots: Vec::with_capacity(capacity),
            rng,
        }
    }

    /// Assign the next sequence number and decide where (if anywhere) it goes.
    ///
    /// The draw bound is the count *including* the current candidate.
    fn place(&mut self) -> (u64, Placement) {
        let seq = self.consumed;
        self.consumed += 1;

        if self.slots.len() < self.capacity {
            return (seq, Placement::Append);
        }

        let j = self.rng.below(self.consumed);
        if j < self.capacity as u64 {
            (seq, Placement::Replace(j as usize))
        } else {
            (seq, Placement::Discard)
        }
    }

    /// Consider an item for inclusion in the reservoir
    pub fn offer(&mut self, item: T) {
        match self.place() {
            (seq, Placement::Append) => self.slots.push(Slot { seq, payload: item }),
            (seq, Placement::Replace(j)) => self.slots[j] = Slot { seq, payload: item },
            (_, Placement::Discard) => {}
        }
    }

    /// Get the number of items seen so far
    pub fn total_seen(&self) -> u64 {
        self.consumed
    }

    /// Get the current size of the reservoir
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the reservoir is empty
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Get the capacity of the reservoir
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True until the reservoir has been filled once; after that every
    /// further candidate competes for a random slot.
    pub fn is_filling(&self) -> bool {
        self.slots.len() < self.capacity
    }

    /// Consume the reservoir and return the sampled items in arrival order
    pub fn into_items(self) -> Vec<T> {
        let mut slots = self.slots;
        slots.sort_unstable_by_key(|slot| slot.seq);
        slots.into_iter().map(|slot| slot.payload).collect()
    }
}

impl<T: Clone, R: RandomRange> Reservoir<T, R> {
    /// Get the sampled items in arrival order.
    ///
    /// Leaves the reservoir untouched, so it can keep accepting offers.
    pub fn items(&self) -> Vec<T> {
        let mut ordered: Vec<&Slot<T>> = self.slots.iter().collect();
        ordered.sort_unstable_by_key(|slot| slot.seq);
        ordered.into_iter().map(|slot| slot.payload.clone()).collect()
    }
}

impl<T: Default, R: RandomRange> Reservoir<T, R> {
    /// First half of a deferred offer.
    ///
    /// Makes exactly the same decision [`offer`](Self::offer) would, but
    /// leaves the payload to the caller: when `Some` is returned, the
    /// candidate must be written with [`commit`](Self::commit) before the
    /// next offer. `None` means the candidate was not sampled and never
    /// needs to be materialized.
    #[must_use = "a returned slot must be filled with `commit`"]
    pub fn offer_slot(&mut self) -> Option<SlotIndex> {
        match self.place() {
            (seq, Placement::Append) => {
                self.slots.push(Slot {
                    seq,
                    payload: T::default(),
                });
                Some(SlotIndex(self.slots.len() - 1))
            }
            (seq, Placement::Replace(j)) => {
                // The evicted payload must not survive under the new seq.
                self.slots[j] = Slot {
                    seq,
                    payload: T::default(),
                };
                Some(SlotIndex(j))
            }
            (_, Placement::Discard) => None,
        }
    }

    /// Second half of a deferred offer: store the payload for `slot`.
    pub fn commit(&mut self, slot: SlotIndex, item: T) {
        self.slots[slot.0].payload = item;
    }
}
