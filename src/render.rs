//! Draw-item emission.
//!
//! The core never touches pixels.  Once per frame it walks every live entity
//! and hands a [`DrawItem`] (kind, rect, optional sprite handle) to a
//! [`RenderSink`]; the sink decides how to show it.

use crate::assets::{SpriteHandle, SpriteId, SpriteTable};
use crate::entities::{GameState, Side, LIFE_ICON_SIZE};
use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DrawKind {
    Invader { points: u32 },
    Bullet(Side),
    Defender,
    BarrierBlock,
    LifeIcon,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawItem {
    pub kind: DrawKind,
    pub rect: Rect,
    /// `None` means draw a plain filled rect.
    pub sprite: Option<SpriteHandle>,
}

pub trait RenderSink {
    fn begin_frame(&mut self) {}
    fn draw(&mut self, item: &DrawItem);
    fn end_frame(&mut self) {}
}

/// Sink that keeps every item, handy for tests and headless runs.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    pub frames: usize,
    pub items: Vec<DrawItem>,
}

impl RecordingSink {
    pub fn count(&self, pred: impl Fn(&DrawKind) -> bool) -> usize {
        self.items.iter().filter(|i| pred(&i.kind)).count()
    }
}

impl RenderSink for RecordingSink {
    fn begin_frame(&mut self) {
        self.frames += 1;
        self.items.clear();
    }

    fn draw(&mut self, item: &DrawItem) {
        self.items.push(*item);
    }
}

/// Rect of the `index`-th life icon along the bottom-left corner.
pub fn life_icon_rect(index: u32, screen_height: i32) -> Rect {
    Rect::new(
        10 + index as i32 * 25,
        screen_height - 25,
        LIFE_ICON_SIZE,
        LIFE_ICON_SIZE,
    )
}

/// Emit one frame: invaders, bullets, the ship, live barrier blocks, then a
/// life icon per remaining life.
pub fn draw_frame<S: RenderSink + ?Sized>(state: &GameState, sprites: &SpriteTable, sink: &mut S) {
    sink.begin_frame();

    for inv in &state.invaders {
        sink.draw(&DrawItem {
            kind: DrawKind::Invader { points: inv.points },
            rect: inv.rect(),
            sprite: sprites.get(inv.sprite),
        });
    }

    for bullet in state.player_bullets.iter().chain(&state.enemy_bullets) {
        sink.draw(&DrawItem {
            kind: DrawKind::Bullet(bullet.side),
            rect: bullet.rect(),
            sprite: None,
        });
    }

    sink.draw(&DrawItem {
        kind: DrawKind::Defender,
        rect: state.player.rect(),
        sprite: sprites.get(SpriteId::Defender),
    });

    for block in state.barriers.iter().flat_map(|b| b.live_blocks()) {
        sink.draw(&DrawItem {
            kind: DrawKind::BarrierBlock,
            rect: block.rect(),
            sprite: None,
        });
    }

    let icon = sprites.get(SpriteId::LifeIcon);
    for i in 0..state.player.lives {
        sink.draw(&DrawItem {
            kind: DrawKind::LifeIcon,
            rect: life_icon_rect(i, state.screen_height()),
            sprite: icon,
        });
    }

    sink.end_frame();
}
