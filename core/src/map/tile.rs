/// Tile kinds used by the office maps. Maps are written as ASCII rows, one char per tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Wall,
    Floor,
    Carpet,
    Desk,
    Plant,
    Window,
    ServerRack,
    /// Reception and kitchen counters. NPCs can be talked to across them.
    Counter,
    Door,
}

impl Tile {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Tile::Wall),
            '.' => Some(Tile::Floor),
            '=' => Some(Tile::Carpet),
            'D' => Some(Tile::Desk),
            'P' => Some(Tile::Plant),
            'W' => Some(Tile::Window),
            'S' => Some(Tile::ServerRack),
            'T' => Some(Tile::Counter),
            '+' => Some(Tile::Door),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Floor => '.',
            Tile::Carpet => '=',
            Tile::Desk => 'D',
            Tile::Plant => 'P',
            Tile::Window => 'W',
            Tile::ServerRack => 'S',
            Tile::Counter => 'T',
            Tile::Door => '+',
        }
    }

    pub fn is_walkable(self) -> bool {
        matches!(self, Tile::Floor | Tile::Carpet | Tile::Door)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walkable_tiles() {
        assert!(Tile::Floor.is_walkable());
        assert!(Tile::Door.is_walkable());
        assert!(!Tile::Wall.is_walkable());
        assert!(!Tile::Counter.is_walkable());
        assert_eq!(Tile::from_char('x'), None);
        assert_eq!(Tile::from_char('S').map(Tile::to_char), Some('S'));
    }
}
