/// A cell on the territory grid.
///
/// (0,0) is the top-left corner,
/// `col` increases to the right, `row` increases downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub col: i32,
    pub row: i32,
}

impl GridPos {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    pub fn offset(&self, dc: i32, dr: i32) -> Self {
        Self {
            col: self.col + dc,
            row: self.row + dr,
        }
    }

    /// Chebyshev distance, so diagonal neighbours are 1 apart.
    pub fn chebyshev(&self, other: &GridPos) -> u32 {
        (self.col - other.col)
            .unsigned_abs()
            .max((self.row - other.row).unsigned_abs())
    }

    /// Center of the cell in world coordinates.
    pub fn center(&self, tile_size: f64) -> WorldPos {
        WorldPos::new(
            (self.col as f64 + 0.5) * tile_size,
            (self.row as f64 + 0.5) * tile_size,
        )
    }
}

/// A continuous position in world pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WorldPos {
    pub x: f64,
    pub y: f64,
}

impl WorldPos {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The cell containing this position. Positions left of or above the
    /// origin map to negative cells.
    pub fn to_grid(&self, tile_size: f64) -> GridPos {
        GridPos::new(
            (self.x / tile_size).floor() as i32,
            (self.y / tile_size).floor() as i32,
        )
    }

    pub fn distance(&self, other: &WorldPos) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Free,
    Owned,
}

impl Cell {
    pub fn is_owned(&self) -> bool {
        matches!(self, Cell::Owned)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct TerritoryGrid {
    /// Width of the grid in cells
    width: u32,
    /// Height of the grid in cells
    height: u32,
    /// Row-major cell storage
    cells: Vec<Cell>,
}

impl TerritoryGrid {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Free; width as usize * height as usize],
        }
    }

    pub fn get_grid_dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn in_bounds(&self, pos: &GridPos) -> bool {
        pos.col >= 0 && pos.row >= 0 &&
            (pos.col as u32) < self.width &&
            (pos.row as u32) < self.height
    }

    fn pos_to_index(&self, pos: &GridPos) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.row as usize * self.width as usize + pos.col as usize)
        } else {
            None
        }
    }

    fn index_to_pos(&self, idx: usize) -> GridPos {
        let width = self.width as usize;
        GridPos::new((idx % width) as i32, (idx / width) as i32)
    }

    /// Out-of-bounds cells read as [`Cell::Free`].
    pub fn get(&self, pos: &GridPos) -> Cell {
        self.pos_to_index(pos)
            .map(|idx| self.cells[idx])
            .unwrap_or(Cell::Free)
    }

    /// Writes outside the grid are ignored.
    pub fn set(&mut self, pos: &GridPos, cell: Cell) {
        if let Some(idx) = self.pos_to_index(pos) {
            self.cells[idx] = cell;
        }
    }

    pub fn is_owned(&self, pos: &GridPos) -> bool {
        self.get(pos).is_owned()
    }

    pub fn reset(&mut self) {
        self.cells.fill(Cell::Free);
    }

    /// Marks every cell within Euclidean distance `radius` of `center` as owned.
    ///
    /// Returns the number of in-bounds cells that were marked.
    pub fn seed_spawn_area(&mut self, center: &GridPos, radius: i32) -> usize {
        let mut seeded = 0;
        for dr in -radius..=radius {
            for dc in -radius..=radius {
                if dc * dc + dr * dr > radius * radius {
                    continue;
                }
                let pos = center.offset(dc, dr);
                if self.in_bounds(&pos) {
                    self.set(&pos, Cell::Owned);
                    seeded += 1;
                }
            }
        }
        seeded
    }

    pub fn count_owned(&self) -> usize {
        self.cells.iter().filter(|c| c.is_owned()).count()
    }

    pub fn get_total_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn owned_cells(&self) -> Vec<GridPos> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_owned())
            .map(|(idx, _)| self.index_to_pos(idx))
            .collect()
    }

    /// Raw row-major view of the cells.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl std::fmt::Debug for TerritoryGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerritoryGrid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("owned_cells", &self.count_owned())
            .finish()
    }
}

/// One recorded sample of the excursion path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub world: WorldPos,
    pub cell: GridPos,
}

impl TrailPoint {
    pub fn at(world: WorldPos, tile_size: f64) -> Self {
        Self {
            world,
            cell: world.to_grid(tile_size),
        }
    }
}

/// Samples recorded while the player is outside owned territory.
#[derive(Debug, Clone, Default)]
pub struct Trail {
    points: Vec<TrailPoint>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: TrailPoint) {
        self.points.push(point);
    }

    /// Appends `point` only if it lies strictly farther than `min_spacing`
    /// from the last sample. Returns whether it was recorded.
    pub fn push_spaced(&mut self, point: TrailPoint, min_spacing: f64) -> bool {
        let far_enough = self
            .points
            .last()
            .is_none_or(|last| last.world.distance(&point.world) > min_spacing);
        if far_enough {
            self.points.push(point);
        }
        far_enough
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&TrailPoint> {
        self.points.last()
    }

    pub fn points(&self) -> &[TrailPoint] {
        &self.points
    }

    /// Every sample except the `recent` most recent ones.
    pub fn older_than(&self, recent: usize) -> &[TrailPoint] {
        let end = self.points.len().saturating_sub(recent);
        &self.points[..end]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeState {
    AliveInside,
    AliveOutside,
    Dead,
}

#[derive(Debug, Clone)]
pub struct Player {
    /// Current position in world pixels
    pub position: WorldPos,
    /// Heading in radians, 0 points right, positive turns clockwise on screen
    pub angle: f64,
    /// Pixels travelled per tick
    pub speed: f64,
    /// Whether the player has left owned territory since the last capture
    pub is_outside: bool,
    /// Path recorded since leaving territory
    pub trail: Trail,
    /// Whether the player is currently alive
    pub alive: bool,
}

impl Player {
    pub fn new(position: WorldPos, speed: f64) -> Self {
        Self {
            position,
            angle: 0.0,
            speed,
            is_outside: false,
            trail: Trail::new(),
            alive: true,
        }
    }

    pub fn cell(&self, tile_size: f64) -> GridPos {
        self.position.to_grid(tile_size)
    }

    pub fn has_trail(&self) -> bool {
        !self.trail.is_empty()
    }

    pub fn life_state(&self) -> LifeState {
        match (self.alive, self.is_outside) {
            (false, _) => LifeState::Dead,
            (true, true) => LifeState::AliveOutside,
            (true, false) => LifeState::AliveInside,
        }
    }
}

#[derive(Debug)]
pub struct GameState {
    pub player: Player,
    /// Territory ownership grid
    pub territory: TerritoryGrid,
}

impl GameState {
    pub fn new(width: u32, height: u32, spawn: WorldPos, speed: f64) -> Self {
        Self {
            player: Player::new(spawn, speed),
            territory: TerritoryGrid::new(width, height),
        }
    }
}
