//! Rendering layer: all terminal I/O lives here.
//!
//! `TerminalScreen` is a `RenderSink`: the core hands it draw items in
//! playfield pixels and it scales them onto the terminal grid, buffering
//! crossterm commands until `present` writes the whole frame at once.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use space_invaders::assets::{AssetSource, SpriteHandle, SpriteId};
use space_invaders::entities::Side;
use space_invaders::game_loop::LoopSignal;
use space_invaders::geometry::Rect;
use space_invaders::render::{DrawItem, DrawKind, RenderSink};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::Green;
const C_INVADER_TOP: Color = Color::Magenta;
const C_INVADER_MID: Color = Color::Cyan;
const C_INVADER_LOW: Color = Color::White;
const C_BULLET_PLAYER: Color = Color::Yellow;
const C_BULLET_ENEMY: Color = Color::Red;
const C_BARRIER: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

// ── Glyph atlas ───────────────────────────────────────────────────────────────

/// Terminal stand-in for image loading: each sprite resolves to a short glyph
/// string and the handle is its index.
#[derive(Debug, Default)]
pub struct GlyphAtlas {
    glyphs: Vec<&'static str>,
}

impl GlyphAtlas {
    pub fn new() -> Self {
        Self::default()
    }

    fn glyph(&self, handle: SpriteHandle) -> Option<&'static str> {
        self.glyphs.get(handle.0 as usize).copied()
    }
}

impl AssetSource for GlyphAtlas {
    fn load(&mut self, sprite: SpriteId) -> Option<SpriteHandle> {
        let glyph = match sprite {
            SpriteId::Defender => "/▲\\",
            SpriteId::Invader1 => "«▼»",
            SpriteId::Invader2 => "(◎)",
            SpriteId::Invader3 => "╚═╝",
            SpriteId::LifeIcon => "♥",
        };
        self.glyphs.push(glyph);
        Some(SpriteHandle(self.glyphs.len() as u32 - 1))
    }
}

// ── Terminal screen ───────────────────────────────────────────────────────────

pub struct TerminalScreen {
    buf: Vec<u8>,
    atlas: GlyphAtlas,
    cols: u16,
    rows: u16,
    field_w: i32,
    field_h: i32,
    error: Option<io::Error>,
}

impl TerminalScreen {
    pub fn new(atlas: GlyphAtlas, field_w: i32, field_h: i32) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(TerminalScreen {
            buf: Vec::new(),
            atlas,
            cols,
            rows,
            field_w: field_w.max(1),
            field_h: field_h.max(1),
            error: None,
        })
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    /// Map a playfield pixel to a cell inside the border.  Row 0 is the HUD
    /// and the last row is the controls hint.
    fn to_cell(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        if x < 0 || y < 0 || x >= self.field_w || y >= self.field_h {
            return None;
        }
        let inner_w = i64::from(self.cols.saturating_sub(2));
        let inner_h = i64::from(self.rows.saturating_sub(4));
        if inner_w == 0 || inner_h == 0 {
            return None;
        }
        let col = 1 + i64::from(x) * inner_w / i64::from(self.field_w);
        let row = 2 + i64::from(y) * inner_h / i64::from(self.field_h);
        Some((col as u16, row as u16))
    }

    fn put(&mut self, col: u16, row: u16, color: Color, text: &str) {
        if self.error.is_some() {
            return;
        }
        let result = self
            .buf
            .queue(cursor::MoveTo(col, row))
            .and_then(|b| b.queue(style::SetForegroundColor(color)))
            .and_then(|b| b.queue(Print(text)))
            .map(|_| ());
        if let Err(e) = result {
            self.error = Some(e);
        }
    }

    fn put_centered(&mut self, row: u16, color: Color, text: &str) {
        let col = (self.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
        self.put(col, row, color, text);
    }

    fn draw_border(&mut self) {
        let w = self.cols as usize;
        let bar = "─".repeat(w.saturating_sub(2));
        self.put(0, 1, C_BORDER, &format!("┌{bar}┐"));
        let bottom = self.rows.saturating_sub(2);
        self.put(0, bottom, C_BORDER, &format!("└{bar}┘"));
        for row in 2..bottom {
            self.put(0, row, C_BORDER, "│");
            self.put(self.cols.saturating_sub(1), row, C_BORDER, "│");
        }
    }

    /// Score on the left, remaining lives on the right of row 0.
    pub fn draw_hud(&mut self, score: u32, lives: u32) {
        self.put(1, 0, C_HUD_SCORE, &format!("Score:{score:>6}"));
        let lives_str = format!("Lives:{lives}");
        let col = self
            .cols
            .saturating_sub(lives_str.chars().count() as u16 + 1);
        self.put(col, 0, C_HUD_LIVES, &lives_str);

        let hint_row = self.rows.saturating_sub(1);
        self.put(1, hint_row, C_HINT, "← → / A D : Move   SPACE : Shoot   Q : Quit");
    }

    /// End-of-game overlay; nothing is drawn while the game is running.
    pub fn draw_banner(&mut self, signal: LoopSignal, score: u32) {
        let (title, color) = match signal {
            LoopSignal::Continue => return,
            LoopSignal::GameOver => ("║    GAME  OVER      ║", Color::Red),
            LoopSignal::FormationCleared => ("║  FORMATION CLEARED ║", Color::Green),
        };
        let start = (self.rows / 2).saturating_sub(3);
        self.put_centered(start, color, "╔════════════════════╗");
        self.put_centered(start + 1, color, title);
        self.put_centered(start + 2, color, "╚════════════════════╝");
        self.put_centered(start + 3, Color::Yellow, &format!("Final Score: {score:>6}"));
        self.put_centered(start + 4, Color::White, "R - Play Again  Q - Quit");
    }

    /// Write the buffered frame to `out`.
    pub fn present<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if let Some(e) = self.error.take() {
            self.buf.clear();
            return Err(e);
        }
        self.buf.queue(style::ResetColor)?;
        self.buf.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        out.write_all(&self.buf)?;
        out.flush()?;
        self.buf.clear();
        Ok(())
    }

    fn fill(&mut self, rect: &Rect, color: Color, ch: &str) {
        let Some((c0, r0)) = self.to_cell(rect.x.max(0), rect.y.max(0)) else {
            return;
        };
        let (c1, r1) = self
            .to_cell(
                (rect.right() - 1).min(self.field_w - 1),
                (rect.bottom() - 1).min(self.field_h - 1),
            )
            .unwrap_or((c0, r0));
        for row in r0..=r1 {
            let line = ch.repeat(usize::from(c1.saturating_sub(c0)) + 1);
            self.put(c0, row, color, &line);
        }
    }
}

fn color_for(kind: &DrawKind) -> Color {
    match kind {
        DrawKind::Invader { points } if *points >= 30 => C_INVADER_TOP,
        DrawKind::Invader { points } if *points >= 20 => C_INVADER_MID,
        DrawKind::Invader { .. } => C_INVADER_LOW,
        DrawKind::Bullet(Side::Player) => C_BULLET_PLAYER,
        DrawKind::Bullet(Side::Enemy) => C_BULLET_ENEMY,
        DrawKind::Defender => C_PLAYER,
        DrawKind::BarrierBlock => C_BARRIER,
        DrawKind::LifeIcon => C_HUD_LIVES,
    }
}

impl RenderSink for TerminalScreen {
    fn begin_frame(&mut self) {
        self.buf.clear();
        if let Err(e) = self.buf.queue(terminal::Clear(terminal::ClearType::All)) {
            self.error = Some(e);
        }
        self.draw_border();
    }

    fn draw(&mut self, item: &DrawItem) {
        let color = color_for(&item.kind);
        let glyph = item.sprite.and_then(|h| self.atlas.glyph(h));
        match (glyph, item.kind) {
            (Some(glyph), _) => {
                let cx = item.rect.x + item.rect.width / 2;
                let cy = item.rect.y + item.rect.height / 2;
                if let Some((col, row)) = self.to_cell(cx, cy) {
                    let col = col.saturating_sub(glyph.chars().count() as u16 / 2).max(1);
                    self.put(col, row, color, glyph);
                }
            }
            // No icon image: lives are still shown in the HUD.
            (None, DrawKind::LifeIcon) => {}
            (None, DrawKind::Bullet(_)) => self.fill(&item.rect, color, "│"),
            (None, DrawKind::BarrierBlock) => self.fill(&item.rect, color, "▓"),
            (None, _) => self.fill(&item.rect, color, "█"),
        }
    }
}
