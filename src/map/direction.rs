use glam::{IVec2, Vec2};
use strum_macros::{AsRefStr, EnumIter};

/// The four cardinal directions. Rows grow downwards, so `Up` is negative Y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    /// The four cardinal directions, in the order explosion rays are cast.
    pub const DIRECTIONS: [Direction; 4] = [Direction::Right, Direction::Left, Direction::Down, Direction::Up];

    /// Returns the opposite direction. Constant time.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn as_ivec2(self) -> IVec2 {
        self.into()
    }

    /// Unit vector in grid units.
    pub fn as_vec2(self) -> Vec2 {
        self.as_ivec2().as_vec2()
    }

    /// Whether movement in this direction changes the column rather than the row.
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// The `[dx, dy]` pair used by the network protocol.
    pub fn to_wire(self) -> [i32; 2] {
        self.as_ivec2().to_array()
    }

    /// Parses a `[dx, dy]` wire vector. Anything but a unit axis vector is rejected.
    pub fn from_wire(vector: [i32; 2]) -> Option<Direction> {
        match vector {
            [0, -1] => Some(Direction::Up),
            [0, 1] => Some(Direction::Down),
            [-1, 0] => Some(Direction::Left),
            [1, 0] => Some(Direction::Right),
            _ => None,
        }
    }
}

impl From<Direction> for IVec2 {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => -IVec2::Y,
            Direction::Down => IVec2::Y,
            Direction::Left => -IVec2::X,
            Direction::Right => IVec2::X,
        }
    }
}
