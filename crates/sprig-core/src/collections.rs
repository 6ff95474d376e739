#![forbid(unsafe_code)]

//! Sprite collections.
//!
//! - [`NodeList`]: a doubly-linked list stored in an arena. Nodes live in
//!   slots addressed by index and freed slots are reused, so unlinking a node
//!   is O(1) once its slot is known and no node owns another.
//! - [`OrderedList`]: a [`NodeList`] kept sorted by a comparator.
//! - [`ZOrderedList`]: an [`OrderedList`] sorted by [`Sprite::z_index`].
//! - [`SpriteSet`]: an unordered set keyed by [`Uid`].
//!
//! # Ordering rule
//!
//! `compare(a, b) == Ordering::Greater` means `a` sorts before `b`. A new item
//! is inserted in front of the first node it out-ranks, scanning from the
//! head, and appended if it out-ranks none. Items that compare equal therefore
//! keep their insertion order.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::sprite::{Sprite, Uid};

/// Maximum number of ids rendered by the `Display` impl of [`OrderedList`].
const DISPLAY_MAX_IDS: usize = 100;

#[derive(Debug, Clone, Copy, Default)]
struct Links {
    prev: Option<usize>,
    next: Option<usize>,
}

/// Doubly-linked list with arena-allocated nodes.
pub struct NodeList<T> {
    items: Vec<Option<T>>,
    links: Vec<Links>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<T> Default for NodeList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for NodeList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> NodeList<T> {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            links: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Number of items.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True if the list holds no items.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Item at `index`, or `None` if out of range.
    pub fn item_at(&self, index: usize) -> Option<&T> {
        let slot = self.slot_at(index)?;
        self.items[slot].as_ref()
    }

    /// Mutable item at `index`, or `None` if out of range.
    pub fn item_at_mut(&mut self, index: usize) -> Option<&mut T> {
        let slot = self.slot_at(index)?;
        self.items[slot].as_mut()
    }

    /// First item.
    pub fn first(&self) -> Option<&T> {
        self.items[self.head?].as_ref()
    }

    /// Last item.
    pub fn last(&self) -> Option<&T> {
        self.items[self.tail?].as_ref()
    }

    /// Append an item at the end.
    pub fn push_back(&mut self, item: T) {
        let slot = self.alloc(item);
        self.links[slot].prev = self.tail;
        match self.tail {
            Some(tail) => self.links[tail].next = Some(slot),
            None => self.head = Some(slot),
        }
        self.tail = Some(slot);
        self.len += 1;
    }

    /// Insert an item so that it ends up at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, item: T, index: usize) {
        assert!(
            index <= self.len,
            "insert index {index} out of range for list of length {}",
            self.len
        );
        match self.slot_at(index) {
            Some(at) => self.insert_before(at, item),
            None => self.push_back(item),
        }
    }

    /// Remove and return the item at `index`, or `None` if out of range.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        let slot = self.slot_at(index)?;
        self.unlink(slot)
    }

    /// Keep the first `index` items and drop the rest.
    ///
    /// `truncate(0)` empties the list; an index at or past the end is a no-op.
    pub fn truncate(&mut self, index: usize) {
        if index >= self.len {
            return;
        }
        if index == 0 {
            self.clear();
            return;
        }
        let Some(cut) = self.slot_at(index) else {
            return;
        };
        let new_tail = self.links[cut].prev;
        if let Some(tail) = new_tail {
            self.links[tail].next = None;
        }
        self.tail = new_tail;

        let mut cursor = Some(cut);
        while let Some(slot) = cursor {
            cursor = self.links[slot].next;
            self.release(slot);
        }
        self.len = index;
    }

    /// Remove all items.
    pub fn clear(&mut self) {
        self.items.clear();
        self.links.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Visit items front to back, stopping early when `f` returns `true`.
    pub fn for_each(&self, mut f: impl FnMut(&T) -> bool) {
        for item in self.iter() {
            if f(item) {
                break;
            }
        }
    }

    /// Visit items front to back mutably, stopping early when `f` returns `true`.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut T) -> bool) {
        let mut cursor = self.head;
        while let Some(slot) = cursor {
            cursor = self.links[slot].next;
            if let Some(item) = self.items[slot].as_mut() {
                if f(item) {
                    break;
                }
            }
        }
    }

    /// Iterate front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Remove every item matching `pred` in a single forward pass.
    ///
    /// Returns the number of items removed.
    pub fn remove_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let mut removed = 0;
        let mut cursor = self.head;
        while let Some(slot) = cursor {
            cursor = self.links[slot].next;
            if self.items[slot].as_ref().is_some_and(&mut pred) {
                self.unlink(slot);
                removed += 1;
            }
        }
        removed
    }

    /// Slot of the first item matching `pred`.
    fn find_slot(&self, mut pred: impl FnMut(&T) -> bool) -> Option<usize> {
        let mut cursor = self.head;
        while let Some(slot) = cursor {
            if self.items[slot].as_ref().is_some_and(&mut pred) {
                return Some(slot);
            }
            cursor = self.links[slot].next;
        }
        None
    }

    /// Slot holding the item at `index`, by linear traversal.
    fn slot_at(&self, index: usize) -> Option<usize> {
        if index >= self.len {
            return None;
        }
        let mut slot = self.head?;
        for _ in 0..index {
            slot = self.links[slot].next?;
        }
        Some(slot)
    }

    fn alloc(&mut self, item: T) -> usize {
        match self.free.pop() {
            Some(slot) => {
                self.items[slot] = Some(item);
                self.links[slot] = Links::default();
                slot
            }
            None => {
                self.items.push(Some(item));
                self.links.push(Links::default());
                self.items.len() - 1
            }
        }
    }

    /// Drop the slot's contents and make it reusable.
    fn release(&mut self, slot: usize) -> Option<T> {
        self.links[slot] = Links::default();
        self.free.push(slot);
        self.items[slot].take()
    }

    fn insert_before(&mut self, at: usize, item: T) {
        let slot = self.alloc(item);
        let prev = self.links[at].prev;
        self.links[slot] = Links {
            prev,
            next: Some(at),
        };
        self.links[at].prev = Some(slot);
        match prev {
            Some(prev) => self.links[prev].next = Some(slot),
            None => self.head = Some(slot),
        }
        self.len += 1;
    }

    fn unlink(&mut self, slot: usize) -> Option<T> {
        let Links { prev, next } = self.links[slot];
        match prev {
            Some(prev) => self.links[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.links[next].prev = prev,
            None => self.tail = prev,
        }
        self.len -= 1;
        self.release(slot)
    }
}

/// Front-to-back iterator over a [`NodeList`].
pub struct Iter<'a, T> {
    list: &'a NodeList<T>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let slot = self.cursor?;
        self.cursor = self.list.links[slot].next;
        self.remaining = self.remaining.saturating_sub(1);
        self.list.items[slot].as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> IntoIterator for &'a NodeList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A sprite list kept sorted by a comparator.
///
/// Mutating an item through [`for_each_mut`](Self::for_each_mut) does not
/// re-sort the list; the caller must not change the sort key in place.
pub struct OrderedList<T, F> {
    list: NodeList<T>,
    compare: F,
}

impl<T, F> fmt::Debug for OrderedList<T, F>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedList")
            .field("items", &self.list)
            .finish_non_exhaustive()
    }
}

impl<T, F> OrderedList<T, F>
where
    T: AsRef<Sprite>,
    F: Fn(&T, &T) -> Ordering,
{
    /// Create an empty list sorted by `compare`.
    pub fn new(compare: F) -> Self {
        Self {
            list: NodeList::new(),
            compare,
        }
    }

    /// Insert `item` in front of the first item it out-ranks.
    pub fn add(&mut self, item: T) {
        let compare = &self.compare;
        let at = self
            .list
            .find_slot(|existing| compare(&item, existing) == Ordering::Greater);
        match at {
            Some(at) => self.list.insert_before(at, item),
            None => self.list.push_back(item),
        }
    }

    /// Remove every inactive sprite. Returns how many were removed.
    pub fn purge_inactive(&mut self) -> usize {
        let removed = self.list.remove_where(|item| !item.as_ref().active);
        if removed > 0 {
            tracing::trace!(removed, remaining = self.list.len(), "purged inactive sprites");
        }
        removed
    }

    /// Remove the sprite with the given uid.
    pub fn remove_sprite(&mut self, uid: Uid) -> Option<T> {
        let slot = self.list.find_slot(|item| item.as_ref().uid() == uid)?;
        self.list.unlink(slot)
    }

    /// Remove and return the item at `index`, or `None` if out of range.
    pub fn remove_at(&mut self, index: usize) -> Option<T> {
        self.list.remove_at(index)
    }

    /// Keep the first `index` items and drop the rest.
    pub fn truncate(&mut self, index: usize) {
        self.list.truncate(index);
    }

    /// Remove all items.
    pub fn clear(&mut self) {
        self.list.clear();
    }

    /// Number of items.
    pub const fn len(&self) -> usize {
        self.list.len()
    }

    /// True if the list holds no items.
    pub const fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Item at `index`, or `None` if out of range.
    pub fn item_at(&self, index: usize) -> Option<&T> {
        self.list.item_at(index)
    }

    /// Visit items in order, stopping early when `f` returns `true`.
    pub fn for_each(&self, f: impl FnMut(&T) -> bool) {
        self.list.for_each(f);
    }

    /// Visit items in order mutably, stopping early when `f` returns `true`.
    pub fn for_each_mut(&mut self, f: impl FnMut(&mut T) -> bool) {
        self.list.for_each_mut(f);
    }

    /// Iterate in order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.list.iter()
    }

    /// Comma-separated ids of at most `max` leading sprites.
    pub fn ids(&self, max: usize) -> String {
        let ids: Vec<&str> = self
            .iter()
            .take(max)
            .map(|item| item.as_ref().id.as_str())
            .collect();
        ids.join(",")
    }
}

impl<T, F> fmt::Display for OrderedList<T, F>
where
    T: AsRef<Sprite>,
    F: Fn(&T, &T) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ids(DISPLAY_MAX_IDS))
    }
}

/// Comparator for [`ZOrderedList`]: lower z-index sorts first.
fn lower_z_first<T: AsRef<Sprite>>(a: &T, b: &T) -> Ordering {
    b.as_ref().z_index.cmp(&a.as_ref().z_index)
}

/// A sprite list in back-to-front z order.
///
/// Lower [`Sprite::z_index`] values come first; equal values keep insertion
/// order.
pub type ZOrderedList<T> = OrderedList<T, fn(&T, &T) -> Ordering>;

impl<T: AsRef<Sprite>> ZOrderedList<T> {
    /// Create an empty z-ordered list.
    #[must_use]
    pub fn by_z_index() -> Self {
        Self::new(lower_z_first::<T>)
    }
}

/// Unordered sprite set keyed by uid, iterated in ascending uid order.
#[derive(Debug)]
pub struct SpriteSet<T> {
    sprites: BTreeMap<Uid, T>,
}

impl<T> Default for SpriteSet<T> {
    fn default() -> Self {
        Self {
            sprites: BTreeMap::new(),
        }
    }
}

impl<T: AsRef<Sprite>> SpriteSet<T> {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sprite, returning the previous one with the same uid.
    pub fn add(&mut self, sprite: T) -> Option<T> {
        self.sprites.insert(sprite.as_ref().uid(), sprite)
    }

    /// Remove the sprite with `uid`.
    pub fn remove(&mut self, uid: Uid) -> Option<T> {
        self.sprites.remove(&uid)
    }

    /// Sprite with `uid`.
    pub fn get(&self, uid: Uid) -> Option<&T> {
        self.sprites.get(&uid)
    }

    /// Mutable sprite with `uid`.
    pub fn get_mut(&mut self, uid: Uid) -> Option<&mut T> {
        self.sprites.get_mut(&uid)
    }

    /// Number of sprites.
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// True if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Remove all sprites.
    pub fn clear(&mut self) {
        self.sprites.clear();
    }

    /// Visit sprites, stopping early when `f` returns `true`.
    pub fn for_each(&self, mut f: impl FnMut(&T) -> bool) {
        for sprite in self.sprites.values() {
            if f(sprite) {
                break;
            }
        }
    }

    /// Visit sprites mutably, stopping early when `f` returns `true`.
    pub fn for_each_mut(&mut self, mut f: impl FnMut(&mut T) -> bool) {
        for sprite in self.sprites.values_mut() {
            if f(sprite) {
                break;
            }
        }
    }

    /// Iterate in ascending uid order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.sprites.values()
    }
}
