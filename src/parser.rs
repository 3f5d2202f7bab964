use crate::entities::{Adventurer, Coordinate, Dimension, Mountain, Movement, Orientation, Treasure};
use crate::error::MapError;
use crate::map::Map;
use regex::Regex;

enum Line {
    Dimension(Dimension),
    Mountain(Mountain),
    Treasure(Treasure),
    Adventurer(Adventurer),
}

/// Parses the textual description of a map into a ready-to-explore [`Map`].
///
/// Blank lines and `#` comment lines are ignored. The dimension line may
/// appear anywhere; entities are placed on the map in input order.
pub fn parse(map_contents: &str) -> Result<Map, MapError> {
    let separator = Regex::new(r"\s*-\s*").unwrap();

    let mut parsed = Vec::new();
    for line in map_contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        parsed.push((line, parse_line(line, &separator)?));
    }

    let mut dimension = None;
    for (line, parsed_line) in &parsed {
        if let Line::Dimension(d) = parsed_line {
            if dimension.is_some() {
                return Err(MapError::DuplicateDimension((*line).to_string()));
            }
            dimension = Some(*d);
        }
    }
    let dimension = dimension.ok_or(MapError::MissingDimension)?;

    let mut map = Map::new(dimension);
    for (_, parsed_line) in parsed {
        match parsed_line {
            Line::Dimension(_) => {}
            Line::Mountain(mountain) => map.add_mountain(mountain)?,
            Line::Treasure(treasure) => map.add_treasure(treasure)?,
            Line::Adventurer(adventurer) => map.add_adventurer(adventurer)?,
        }
    }

    Ok(map)
}

fn parse_line(line: &str, separator: &Regex) -> Result<Line, MapError> {
    let tokens: Vec<&str> = separator.split(line).collect();

    match tokens[0] {
        "C" => parse_dimension(line, &tokens),
        "M" => parse_mountain(line, &tokens),
        "T" => parse_treasure(line, &tokens),
        "A" => parse_adventurer(line, &tokens),
        code => Err(MapError::InvalidLineCode(code.to_string())),
    }
}

fn parse_dimension(line: &str, tokens: &[&str]) -> Result<Line, MapError> {
    let invalid = || MapError::InvalidDimension(line.to_string());

    if tokens.len() != 3 {
        return Err(invalid());
    }
    let width: usize = tokens[1].parse().map_err(|_| invalid())?;
    let height: usize = tokens[2].parse().map_err(|_| invalid())?;
    if width == 0 || height == 0 {
        return Err(invalid());
    }

    Ok(Line::Dimension(Dimension { width, height }))
}

fn parse_mountain(line: &str, tokens: &[&str]) -> Result<Line, MapError> {
    let invalid = || MapError::InvalidMountain(line.to_string());

    if tokens.len() != 3 {
        return Err(invalid());
    }
    let x = tokens[1].parse().map_err(|_| invalid())?;
    let y = tokens[2].parse().map_err(|_| invalid())?;

    Ok(Line::Mountain(Mountain {
        coordinates: Coordinate { x, y },
    }))
}

fn parse_treasure(line: &str, tokens: &[&str]) -> Result<Line, MapError> {
    let invalid = || MapError::InvalidTreasure(line.to_string());

    if tokens.len() != 4 {
        return Err(invalid());
    }
    let x = tokens[1].parse().map_err(|_| invalid())?;
    let y = tokens[2].parse().map_err(|_| invalid())?;
    let amount: u32 = tokens[3].parse().map_err(|_| invalid())?;
    if amount == 0 {
        return Err(invalid());
    }

    Ok(Line::Treasure(Treasure {
        coordinates: Coordinate { x, y },
        amount,
    }))
}

fn parse_adventurer(line: &str, tokens: &[&str]) -> Result<Line, MapError> {
    let invalid = || MapError::InvalidAdventurer(line.to_string());

    if tokens.len() != 6 {
        return Err(invalid());
    }
    let name = tokens[1].to_string();
    let x = tokens[2].parse().map_err(|_| invalid())?;
    let y = tokens[3].parse().map_err(|_| invalid())?;
    let orientation = Orientation::from_code(tokens[4])?;
    let movements = tokens[5]
        .chars()
        .map(Movement::from_char)
        .collect::<Result<Vec<Movement>, MapError>>()?;

    Ok(Line::Adventurer(Adventurer {
        name,
        coordinates: Coordinate { x, y },
        orientation,
        movements,
        treasure: 0,
    }))
}
