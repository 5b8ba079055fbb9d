//! Tunable game rules, loaded from TOML.
//!
//! Every field defaults to the classic arcade values, so an empty file (or no
//! file at all) yields the standard game.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::entities::{DEFENDER_WIDTH, INVADER_WIDTH};
use crate::error::ConfigError;

pub const MAX_LIVES: u32 = 9;
pub const MAX_FORMATION_ROWS: usize = 16;
pub const MAX_FORMATION_COLUMNS: usize = 32;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen: ScreenConfig,
    pub player: PlayerConfig,
    pub formation: FormationConfig,
    pub bullets: BulletConfig,
}

/// Playfield size in pixels and the target tick rate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: i32,
    pub height: i32,
    pub fps: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub lives: u32,
    /// Pixels moved per tick while a direction is held.
    pub speed: i32,
    /// Distance kept from both screen edges.
    pub edge_margin: i32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormationConfig {
    /// Point value of each row, top to bottom.  Its length is the row count.
    pub row_points: Vec<u32>,
    pub columns: usize,
    pub origin_x: f32,
    pub origin_y: f32,
    pub spacing_x: f32,
    pub spacing_y: f32,
    pub base_speed: f32,
    /// Added to the sweep speed for every invader destroyed.
    pub speed_increment: f32,
    /// Vertical drop applied to every invader on a bounce.
    pub drop: f32,
    pub edge_margin: f32,
    /// Minimum simulated time between two enemy shots.
    pub shot_interval_ms: u64,
}

/// Bullet speeds are magnitudes; the owning side decides the sign.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulletConfig {
    pub player_speed: i32,
    pub enemy_speed: i32,
    /// How far past the playfield edge a bullet may travel before removal.
    pub offscreen_slack: i32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        ScreenConfig {
            width: 600,
            height: 700,
            fps: 60,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            lives: 3,
            speed: 6,
            edge_margin: 8,
        }
    }
}

impl Default for FormationConfig {
    fn default() -> Self {
        FormationConfig {
            row_points: vec![30, 20, 10, 10],
            columns: 10,
            origin_x: 40.0,
            origin_y: 80.0,
            spacing_x: 48.0,
            spacing_y: 48.0,
            base_speed: 0.3,
            speed_increment: 0.07,
            drop: 18.0,
            edge_margin: 8.0,
            shot_interval_ms: 2500,
        }
    }
}

impl Default for BulletConfig {
    fn default() -> Self {
        BulletConfig {
            player_speed: 8,
            enemy_speed: 6,
            offscreen_slack: 20,
        }
    }
}

impl GameConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.screen.width <= 0 || self.screen.height <= 0 {
            return invalid("screen dimensions must be positive");
        }
        if self.screen.fps == 0 {
            return invalid("fps must be positive");
        }
        if self.player.lives == 0 || self.player.lives > MAX_LIVES {
            return invalid("player lives must be between 1 and 9");
        }
        if self.player.speed < 0 || self.player.edge_margin < 0 {
            return invalid("player speed and edge margin must not be negative");
        }
        let min_width = DEFENDER_WIDTH.saturating_add(self.player.edge_margin.saturating_mul(2));
        if self.screen.width < min_width {
            return invalid("screen is too narrow for the defender and its margins");
        }
        if self.formation.row_points.is_empty() || self.formation.columns == 0 {
            return invalid("formation needs at least one row and one column");
        }
        if self.formation.row_points.len() > MAX_FORMATION_ROWS
            || self.formation.columns > MAX_FORMATION_COLUMNS
        {
            return invalid("formation is limited to 16 rows and 32 columns");
        }
        if self.formation.spacing_x < 0.0 || self.formation.spacing_y < 0.0 {
            return invalid("formation spacing must not be negative");
        }
        if self.formation.base_speed < 0.0
            || self.formation.speed_increment < 0.0
            || self.formation.drop < 0.0
            || self.formation.edge_margin < 0.0
        {
            return invalid("formation speeds, drop and margin must not be negative");
        }
        // The starting grid must sit strictly inside both margins, or it
        // bounces on every tick.
        let margin = self.formation.edge_margin;
        let grid_right = self.formation.origin_x
            + (self.formation.columns - 1) as f32 * self.formation.spacing_x
            + INVADER_WIDTH as f32;
        if self.formation.origin_x <= margin || grid_right >= self.screen.width as f32 - margin {
            return invalid("formation does not fit between the screen margins");
        }
        if self.bullets.player_speed <= 0 || self.bullets.enemy_speed <= 0 {
            return invalid("bullet speeds must be positive");
        }
        if self.bullets.offscreen_slack < 0 {
            return invalid("offscreen slack must not be negative");
        }
        Ok(())
    }

    /// Wall-clock length of one tick at the configured rate.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.screen.fps.max(1)))
    }
}
