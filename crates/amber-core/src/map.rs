//! Hash map with chained-bucket slots, matching the VM's storage layout.
//!
//! Lookup starts at a key's home slot (hash modulo capacity) and follows
//! the per-slot `next` links. The slot array itself, holes and chain links
//! included, is the observable layout: serialization must reproduce it so
//! that lookups behave identically after reconstruction.

use crate::string::VmStr;
use crate::value::Value;

/// An occupied map slot. `next` links to the following slot of the same
/// chain, by index into the slot array.
#[derive(Clone, Debug)]
pub struct MapSlot {
    pub key: Value,
    pub value: Value,
    pub next: Option<u32>,
}

#[derive(Clone, Debug, Default)]
pub struct Map {
    slots: Vec<Option<MapSlot>>,
    count: usize,
}

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs(pairs: impl IntoIterator<Item = (Value, Value)>) -> Self {
        let mut map = Self::new();
        for (key, value) in pairs {
            map.insert(key, value);
        }
        map
    }

    /// Number of occupied slots.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Length of the raw slot array, holes included.
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// Slot-array length with trailing holes dropped. Interior holes are
    /// load-bearing (chain links are slot indices) and stay put.
    pub fn compacted_size(&self) -> usize {
        self.slots
            .iter()
            .rposition(|s| s.is_some())
            .map_or(0, |i| i + 1)
    }

    pub fn slots(&self) -> &[Option<MapSlot>] {
        &self.slots
    }

    /// Occupied slots in slot order, with their indices.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &MapSlot)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|s| (i, s)))
    }

    pub fn insert(&mut self, key: Value, value: Value) {
        if self.count == self.slots.len() {
            self.grow();
        }
        let cap = self.slots.len();
        let home = hash_key(&key) as usize % cap;
        if self.slots[home].is_none() {
            self.slots[home] = Some(MapSlot {
                key,
                value,
                next: None,
            });
            self.count += 1;
            return;
        }
        // walk the chain through the home slot: replace on key match,
        // otherwise append at the tail
        let mut tail = home;
        let existing = loop {
            let slot = self.slots[tail].as_ref().expect("chain slot is occupied");
            if keys_equal(&slot.key, &key) {
                break Some(tail);
            }
            match slot.next {
                Some(n) => tail = n as usize,
                None => break None,
            }
        };
        if let Some(idx) = existing {
            self.slots[idx].as_mut().expect("chain slot is occupied").value = value;
            return;
        }
        let free = self.free_slot(home);
        self.slots[free] = Some(MapSlot {
            key,
            value,
            next: None,
        });
        self.slots[tail].as_mut().expect("tail slot is occupied").next = Some(free as u32);
        self.count += 1;
    }

    /// Chain-walking lookup from the key's home slot.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        if self.slots.is_empty() {
            return None;
        }
        let mut idx = hash_key(key) as usize % self.slots.len();
        loop {
            let slot = self.slots[idx].as_ref()?;
            if keys_equal(&slot.key, key) {
                return Some(&slot.value);
            }
            idx = slot.next? as usize;
        }
    }

    pub fn get_str(&self, key: &str) -> Option<&Value> {
        self.get(&Value::Str(VmStr::from(key)))
    }

    fn grow(&mut self) {
        let cap = (self.slots.len() * 2).max(4);
        let pairs: Vec<(Value, Value)> = self
            .slots
            .drain(..)
            .flatten()
            .map(|s| (s.key, s.value))
            .collect();
        self.slots = vec![None; cap];
        self.count = 0;
        for (key, value) in pairs {
            self.insert(key, value);
        }
    }

    fn free_slot(&self, home: usize) -> usize {
        let cap = self.slots.len();
        (1..cap)
            .map(|d| (home + d) % cap)
            .find(|&i| self.slots[i].is_none())
            .expect("map has a free slot after growth")
    }
}

fn hash_key(key: &Value) -> u32 {
    match key {
        Value::Str(s) => fnv1a(s.as_bytes()),
        Value::Int(i) => fnv1a(&i.to_le_bytes()),
        // other key kinds are invalid; they land in bucket 0 and are
        // rejected at serialization time
        _ => 0,
    }
}

fn keys_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::Int(x), Value::Int(y)) => x == y,
        _ => false,
    }
}

fn fnv1a(bytes: &[u8]) -> u32 {
    let mut hash: u32 = 0x811c_9dc5;
    for &b in bytes {
        hash ^= b as u32;
        hash = hash.wrapping_mul(0x0100_0193);
    }
    hash
}
