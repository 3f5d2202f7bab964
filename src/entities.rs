use crate::error::MapError;
use crossterm::style::Color;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimension {
    pub width: usize,
    pub height: usize,
}

/// A position on the map where `x` is the column and `y` the row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Mountain {
    pub coordinates: Coordinate,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Treasure {
    pub coordinates: Coordinate,
    pub amount: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Adventurer {
    pub name: String,
    pub coordinates: Coordinate,
    pub orientation: Orientation,
    pub movements: Vec<Movement>,
    pub treasure: u32,
}

/// Represents the direction an adventurer is facing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Orientation {
    North,
    East,
    South,
    West,
}

impl Orientation {
    pub fn from_code(code: &str) -> Result<Orientation, MapError> {
        match code {
            "N" => Ok(Orientation::North),
            "E" => Ok(Orientation::East),
            "S" => Ok(Orientation::South),
            "W" => Ok(Orientation::West),
            _ => Err(MapError::InvalidOrientation(code.to_string())),
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Orientation::North => 'N',
            Orientation::East => 'E',
            Orientation::South => 'S',
            Orientation::West => 'W',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Orientation::North => "North",
            Orientation::East => "East",
            Orientation::South => "South",
            Orientation::West => "West",
        }
    }

    pub fn right(self) -> Orientation {
        match self {
            Orientation::North => Orientation::East,
            Orientation::East => Orientation::South,
            Orientation::South => Orientation::West,
            Orientation::West => Orientation::North,
        }
    }

    pub fn left(self) -> Orientation {
        match self {
            Orientation::North => Orientation::West,
            Orientation::West => Orientation::South,
            Orientation::South => Orientation::East,
            Orientation::East => Orientation::North,
        }
    }
}

/// Represents a single scripted command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Movement {
    Advance,
    TurnLeft,
    TurnRight,
}

impl Movement {
    pub fn from_char(value: char) -> Result<Movement, MapError> {
        match value {
            'A' => Ok(Movement::Advance),
            'D' => Ok(Movement::TurnRight),
            'G' => Ok(Movement::TurnLeft),
            _ => Err(MapError::InvalidMovement(value)),
        }
    }
}

pub fn adventurer_to_color(index: usize) -> Color {
    // Colors repeat past six adventurers
    match index % 6 {
        0 => Color::Red,
        1 => Color::Green,
        2 => Color::Blue,
        3 => Color::Yellow,
        4 => Color::Magenta,
        _ => Color::Cyan,
    }
}
