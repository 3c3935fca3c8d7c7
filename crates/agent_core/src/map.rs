//! Static environment data: obstacle grid, spawn point and unit prices.
//!
//! The game generates the map; the policy only reads it. Cells are stored in
//! row-major order and addressed by `(x, y)` with `(0, 0)` in the corner the
//! game calls the origin.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{AgentError, Result};
use crate::math::Vec2;

/// Boolean grid of impassable cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObstacleMap {
    /// Grid width in cells.
    width: u32,
    /// Grid height in cells.
    height: u32,
    /// `true` marks an obstacle. Row-major.
    blocked: Vec<bool>,
}

impl ObstacleMap {
    /// Create a map with every cell passable.
    #[must_use]
    pub fn open(width: u32, height: u32) -> Self {
        let cell_count = (width as usize) * (height as usize);
        Self {
            width,
            height,
            blocked: vec![false; cell_count],
        }
    }

    /// Create a map from row-major obstacle flags.
    pub fn from_cells(width: u32, height: u32, blocked: Vec<bool>) -> Result<Self> {
        let map = Self {
            width,
            height,
            blocked,
        };
        map.validate()?;
        Ok(map)
    }

    /// Check that the grid is non-empty and matches its dimensions.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(AgentError::InvalidEnvironment(format!(
                "map must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        let expected = (self.width as usize) * (self.height as usize);
        if self.blocked.len() != expected {
            return Err(AgentError::InvalidEnvironment(format!(
                "obstacle grid has {} cells, expected {expected}",
                self.blocked.len()
            )));
        }
        Ok(())
    }

    /// Grid width in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn coords_to_index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Check if coordinates are within grid bounds.
    #[must_use]
    pub fn in_bounds(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Mark or clear an obstacle. Returns `false` if out of bounds.
    pub fn set_blocked(&mut self, x: u32, y: u32, blocked: bool) -> bool {
        if self.in_bounds(x, y) {
            let index = self.coords_to_index(x, y);
            self.blocked[index] = blocked;
            true
        } else {
            false
        }
    }

    /// Whether a unit can stand in this cell. Out of bounds is never passable.
    #[must_use]
    pub fn is_passable(&self, x: u32, y: u32) -> bool {
        self.in_bounds(x, y) && !self.blocked[self.coords_to_index(x, y)]
    }

    /// Whether the cell under a world position is passable.
    #[must_use]
    pub fn is_passable_at(&self, position: Vec2) -> bool {
        position.cell().is_some_and(|(x, y)| self.is_passable(x, y))
    }

    /// Draw uniformly random cells until one is passable.
    ///
    /// Gives up after `max_attempts` draws and returns `None`, so a map that
    /// is almost entirely blocked costs bounded time.
    pub fn random_passable_cell<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        max_attempts: u32,
    ) -> Option<(u32, u32)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        (0..max_attempts)
            .map(|_| {
                let x = rng.gen_range(0..self.width);
                (x, rng.gen_range(0..self.height))
            })
            .find(|&(x, y)| self.is_passable(x, y))
    }
}

/// Game-wide constants delivered once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// Passability grid; also defines the map size.
    pub obstacles: ObstacleMap,
    /// Where this faction's units appear.
    pub spawn_point: Vec2,
    /// Price of a worker.
    pub worker_cost: u32,
    /// Price of a warrior.
    pub warrior_cost: u32,
}

impl Environment {
    /// Build and validate an environment.
    pub fn new(
        obstacles: ObstacleMap,
        spawn_point: Vec2,
        worker_cost: u32,
        warrior_cost: u32,
    ) -> Result<Self> {
        let env = Self {
            obstacles,
            spawn_point,
            worker_cost,
            warrior_cost,
        };
        env.validate()?;
        Ok(env)
    }

    /// Check grid consistency and that the spawn point lies on the map.
    pub fn validate(&self) -> Result<()> {
        self.obstacles.validate()?;
        let inside = self
            .spawn_point
            .cell()
            .is_some_and(|(x, y)| self.obstacles.in_bounds(x, y));
        if !inside {
            return Err(AgentError::InvalidEnvironment(format!(
                "spawn point ({}, {}) is outside the {}x{} map",
                self.spawn_point.x,
                self.spawn_point.y,
                self.width(),
                self.height()
            )));
        }
        Ok(())
    }

    /// Map width in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.obstacles.width()
    }

    /// Map height in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.obstacles.height()
    }

    /// Map corner inside the spawn quadrant.
    #[must_use]
    pub fn home_corner(&self) -> Vec2 {
        let (x, y) = self.home_corner_cell();
        Vec2::new(x as f32, y as f32)
    }

    /// Corner diagonally opposite [`Self::home_corner`].
    #[must_use]
    pub fn watch_corner(&self) -> Vec2 {
        let (x, y) = self.home_corner_cell();
        let max_x = self.width().saturating_sub(1);
        let max_y = self.height().saturating_sub(1);
        Vec2::new((max_x - x) as f32, (max_y - y) as f32)
    }

    /// Cell near the home corner, pulled `inset` cells toward the map centre.
    #[must_use]
    pub fn home_corner_inset(&self, inset: u32) -> (u32, u32) {
        let (x, y) = self.home_corner_cell();
        let max_x = self.width().saturating_sub(1);
        let max_y = self.height().saturating_sub(1);
        let x = if x == 0 {
            inset.min(max_x)
        } else {
            max_x.saturating_sub(inset)
        };
        let y = if y == 0 {
            inset.min(max_y)
        } else {
            max_y.saturating_sub(inset)
        };
        (x, y)
    }

    fn home_corner_cell(&self) -> (u32, u32) {
        let left = self.spawn_point.x < self.width() as f32 / 2.0;
        let bottom = self.spawn_point.y < self.height() as f32 / 2.0;
        let x = if left {
            0
        } else {
            self.width().saturating_sub(1)
        };
        let y = if bottom {
            0
        } else {
            self.height().saturating_sub(1)
        };
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn env(spawn: Vec2) -> Environment {
        Environment::new(ObstacleMap::open(100, 60), spawn, 100, 150).unwrap()
    }

    #[test]
    fn test_from_cells_rejects_size_mismatch() {
        let err = ObstacleMap::from_cells(4, 4, vec![false; 15]).unwrap_err();
        assert!(matches!(err, AgentError::InvalidEnvironment(_)));
    }

    #[test]
    fn test_out_of_bounds_is_not_passable() {
        let map = ObstacleMap::open(8, 8);
        assert!(map.is_passable(7, 7));
        assert!(!map.is_passable(8, 0));
        assert!(!map.is_passable_at(Vec2::new(-1.0, 3.0)));
    }

    #[test]
    fn test_set_blocked() {
        let mut map = ObstacleMap::open(8, 8);
        assert!(map.set_blocked(2, 3, true));
        assert!(!map.is_passable(2, 3));
        assert!(map.is_passable(3, 2));
        assert!(!map.set_blocked(9, 9, true));
    }

    #[test]
    fn test_random_passable_cell_only_returns_open_cells() {
        let mut map = ObstacleMap::open(4, 4);
        for x in 0..4 {
            for y in 0..4 {
                if (x, y) != (2, 1) {
                    map.set_blocked(x, y, true);
                }
            }
        }
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert_eq!(map.random_passable_cell(&mut rng, 10_000), Some((2, 1)));
    }

    #[test]
    fn test_random_passable_cell_gives_up_on_blocked_map() {
        let map = ObstacleMap::from_cells(3, 3, vec![true; 9]).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(map.random_passable_cell(&mut rng, 300), None);
    }

    #[test]
    fn test_spawn_point_must_be_on_map() {
        let err = Environment::new(ObstacleMap::open(10, 10), Vec2::new(12.0, 3.0), 1, 1)
            .unwrap_err();
        assert!(matches!(err, AgentError::InvalidEnvironment(_)));
    }

    #[test]
    fn test_corners_follow_spawn_quadrant() {
        let bottom_left = env(Vec2::new(5.0, 5.0));
        assert_eq!(bottom_left.home_corner(), Vec2::new(0.0, 0.0));
        assert_eq!(bottom_left.watch_corner(), Vec2::new(99.0, 59.0));
        assert_eq!(bottom_left.home_corner_inset(3), (3, 3));

        let top_right = env(Vec2::new(90.0, 50.0));
        assert_eq!(top_right.home_corner(), Vec2::new(99.0, 59.0));
        assert_eq!(top_right.watch_corner(), Vec2::new(0.0, 0.0));
        assert_eq!(top_right.home_corner_inset(4), (95, 55));
    }
}
