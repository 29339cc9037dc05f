//! Handle registries.
//!
//! Connections and data channels are addressed across the control boundary
//! by small integer handles. A [`HandleRegistry`] is an append-growing list
//! of optional slots: index 0 is reserved as "no handle", released slots are
//! emptied but never compacted or reassigned, so a handle held by the
//! controller can only ever resolve to the item it was issued for.


use std::fmt;
use std::marker::PhantomData;

use shared::error::{Error, Result};

/// Handle is a strongly typed index into a [`HandleRegistry`].
pub trait Handle: Copy + Eq + fmt::Debug {
    fn from_index(index: usize) -> Self;
    fn index(&self) -> usize;

    /// Whether this is the reserved "no handle" value.
    fn is_none(&self) -> bool {
        self.index() == 0
    }
}

/// Identity decides whether two registered items are the same object.
pub trait Identity {
    type Id: PartialEq;

    fn identity(&self) -> Self::Id;
}

/// RTCPeerConnectionHandle identifies a registered peer connection.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RTCPeerConnectionHandle(pub(crate) usize);

/// RTCDataChannelHandle identifies a registered data channel.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RTCDataChannelHandle(pub(crate) usize);

impl Handle for RTCPeerConnectionHandle {
    fn from_index(index: usize) -> Self {
        RTCPeerConnectionHandle(index)
    }

    fn index(&self) -> usize {
        self.0
    }
}

impl Handle for RTCDataChannelHandle {
    fn from_index(index: usize) -> Self {
        RTCDataChannelHandle(index)
    }

    fn index(&self) -> usize {
        self.0
    }
}

impl From<usize> for RTCPeerConnectionHandle {
    fn from(index: usize) -> Self {
        RTCPeerConnectionHandle(index)
    }
}

impl From<usize> for RTCDataChannelHandle {
    fn from(index: usize) -> Self {
        RTCDataChannelHandle(index)
    }
}

impl fmt::Display for RTCPeerConnectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pc#{}", self.0)
    }
}

impl fmt::Display for RTCDataChannelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dc#{}", self.0)
    }
}

/// HandleRegistry maps handles of type `H` to items of type `T`.
pub struct HandleRegistry<H, T> {
    slots: Vec<Option<T>>,
    _handle: PhantomData<H>,
}

impl<H: Handle, T: Identity> Default for HandleRegistry<H, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Handle, T: Identity> HandleRegistry<H, T> {
    pub fn new() -> Self {
        Self {
            slots: vec![None],
            _handle: PhantomData,
        }
    }

    /// register stores `item` and returns its handle. When an item with the
    /// same identity is already registered, its handle is returned and
    /// `item` is dropped.
    pub fn register(&mut self, item: T) -> H {
        let id = item.identity();
        if let Some(handle) = self.find(|existing| existing.identity() == id) {
            return handle;
        }

        self.slots.push(Some(item));
        H::from_index(self.slots.len() - 1)
    }

    /// lookup returns the item for `handle`, or `None` if the handle was
    /// released, is out of range or is the reserved handle.
    pub fn lookup(&self, handle: H) -> Option<&T> {
        if handle.is_none() {
            return None;
        }
        self.slots.get(handle.index()).and_then(Option::as_ref)
    }

    pub fn lookup_mut(&mut self, handle: H) -> Option<&mut T> {
        if handle.is_none() {
            return None;
        }
        self.slots.get_mut(handle.index()).and_then(Option::as_mut)
    }

    /// get is [`HandleRegistry::lookup`] for callers propagating errors.
    pub fn get(&self, handle: H) -> Result<&T> {
        self.lookup(handle).ok_or(Error::ErrInvalidHandle)
    }

    pub fn get_mut(&mut self, handle: H) -> Result<&mut T> {
        self.lookup_mut(handle).ok_or(Error::ErrInvalidHandle)
    }

    /// release empties the slot of `handle` and returns its item. The slot
    /// is not reused.
    pub fn release(&mut self, handle: H) -> Option<T> {
        if handle.is_none() {
            return None;
        }
        self.slots.get_mut(handle.index()).and_then(Option::take)
    }

    /// find returns the handle of the first live item matching `predicate`.
    pub fn find<P>(&self, mut predicate: P) -> Option<H>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter()
            .find(|(_, item)| predicate(item))
            .map(|(handle, _)| handle)
    }

    /// iter walks the live items in handle order.
    pub fn iter(&self) -> impl Iterator<Item = (H, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|item| (H::from_index(index), item)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (H, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_mut().map(|item| (H::from_index(index), item)))
    }

    pub fn handles(&self) -> Vec<H> {
        self.iter().map(|(handle, _)| handle).collect()
    }

    /// Number of live items.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
