//! Sprite identities and the handle table resolved once at startup.
//!
//! Loading images is somebody else's job.  An [`AssetSource`] turns each
//! logical sprite into an optional opaque handle; the core only passes those
//! handles along with its draw items.

use std::collections::HashMap;

use log::warn;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Defender,
    Invader1,
    Invader2,
    Invader3,
    LifeIcon,
}

impl SpriteId {
    pub const ALL: [SpriteId; 5] = [
        SpriteId::Defender,
        SpriteId::Invader1,
        SpriteId::Invader2,
        SpriteId::Invader3,
        SpriteId::LifeIcon,
    ];

    /// Sprite used by formation row `row` (top row is 0).
    pub fn for_row(row: usize) -> Self {
        match row {
            0 => SpriteId::Invader1,
            1 => SpriteId::Invader2,
            _ => SpriteId::Invader3,
        }
    }
}

/// Opaque reference into whatever the renderer uses to store images.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpriteHandle(pub u32);

pub trait AssetSource {
    fn load(&mut self, sprite: SpriteId) -> Option<SpriteHandle>;
}

#[derive(Clone, Debug, Default)]
pub struct SpriteTable {
    handles: HashMap<SpriteId, SpriteHandle>,
}

impl SpriteTable {
    /// A table with no handles; every entity falls back to a plain rect.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn resolve<A: AssetSource + ?Sized>(source: &mut A) -> Self {
        let mut handles = HashMap::new();
        for sprite in SpriteId::ALL {
            match source.load(sprite) {
                Some(handle) => {
                    handles.insert(sprite, handle);
                }
                None => warn!("no image for sprite {sprite:?}; drawing a plain rect"),
            }
        }
        SpriteTable { handles }
    }

    pub fn get(&self, sprite: SpriteId) -> Option<SpriteHandle> {
        self.handles.get(&sprite).copied()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}
