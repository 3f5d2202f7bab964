use crate::entities::{
    adventurer_to_color, Adventurer, Coordinate, Dimension, Mountain, Movement, Orientation,
    Treasure,
};
use crate::error::MapError;
use crossterm::{
    execute,
    style::{Color, Print, SetForegroundColor},
};
use std::io::{stdout, Write};

/// Occupancy of a single grid cell, derived from the entity lists.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Mountain,
    Treasure(u32),
    Adventurer,
}

impl Cell {
    fn char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Mountain => 'M',
            Cell::Treasure(_) => 'T',
            Cell::Adventurer => 'A',
        }
    }
}

/// Outcome of a single advance attempt.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Advance {
    Moved(Coordinate),
    Collected(Coordinate),
    BlockedByMountain,
    BlockedByAdventurer,
    RefusedBorder,
    Died,
}

/// The treasure map. The entity lists are the source of truth; the grid is a
/// lookup rebuilt from them after every state-changing action.
#[derive(Debug, PartialEq)]
pub struct Map {
    width: usize,
    height: usize,
    mountains: Vec<Mountain>,
    treasures: Vec<Treasure>,
    adventurers: Vec<Adventurer>,
    grid: Vec<Cell>,
}

impl Map {
    pub fn new(dimension: Dimension) -> Map {
        Map {
            width: dimension.width,
            height: dimension.height,
            mountains: Vec::new(),
            treasures: Vec::new(),
            adventurers: Vec::new(),
            grid: vec![Cell::Empty; dimension.width * dimension.height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn mountains(&self) -> &[Mountain] {
        &self.mountains
    }

    pub fn treasures(&self) -> &[Treasure] {
        &self.treasures
    }

    pub fn adventurers(&self) -> &[Adventurer] {
        &self.adventurers
    }

    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.grid[y * self.width + x]
    }

    pub fn add_mountain(&mut self, mountain: Mountain) -> Result<(), MapError> {
        self.check_coordinates("mountain", mountain.coordinates)?;
        self.mountains.push(mountain);
        Ok(())
    }

    pub fn add_treasure(&mut self, treasure: Treasure) -> Result<(), MapError> {
        self.check_coordinates("treasure", treasure.coordinates)?;
        self.treasures.push(treasure);
        Ok(())
    }

    pub fn add_adventurer(&mut self, adventurer: Adventurer) -> Result<(), MapError> {
        self.check_coordinates("adventurer", adventurer.coordinates)?;
        self.adventurers.push(adventurer);
        Ok(())
    }

    /// Recomputes the grid from scratch. Adventurers are written last so their
    /// cells always read as occupied, whatever lies beneath them.
    pub fn build_grid(&mut self) {
        self.grid.fill(Cell::Empty);

        for mountain in &self.mountains {
            self.grid[mountain.coordinates.y * self.width + mountain.coordinates.x] = Cell::Mountain;
        }

        for treasure in &self.treasures {
            self.grid[treasure.coordinates.y * self.width + treasure.coordinates.x] =
                Cell::Treasure(treasure.amount);
        }

        for adventurer in &self.adventurers {
            self.grid[adventurer.coordinates.y * self.width + adventurer.coordinates.x] =
                Cell::Adventurer;
        }
    }

    pub fn rotate_adventurer(&mut self, index: usize, movement: Movement) -> Orientation {
        let adventurer = &mut self.adventurers[index];
        adventurer.orientation = match movement {
            Movement::TurnRight => adventurer.orientation.right(),
            Movement::TurnLeft => adventurer.orientation.left(),
            // An advance never changes the orientation
            Movement::Advance => adventurer.orientation,
        };
        adventurer.orientation
    }

    pub fn advance_adventurer(&mut self, index: usize, hardcore_mode: bool) -> Advance {
        let from = self.adventurers[index].coordinates;
        let orientation = self.adventurers[index].orientation;

        let candidate = match self.neighbor(from, orientation) {
            Some(coordinates) => coordinates,
            None => {
                if hardcore_mode {
                    self.adventurers.remove(index);
                    self.build_grid();
                    return Advance::Died;
                }
                return Advance::RefusedBorder;
            }
        };

        match self.cell(candidate.x, candidate.y) {
            Cell::Mountain => Advance::BlockedByMountain,
            Cell::Adventurer => Advance::BlockedByAdventurer,
            Cell::Empty => {
                self.adventurers[index].coordinates = candidate;
                self.build_grid();
                Advance::Moved(candidate)
            }
            Cell::Treasure(_) => {
                self.adventurers[index].coordinates = candidate;
                self.adventurers[index].treasure += 1;

                if let Some(treasure) = self
                    .treasures
                    .iter_mut()
                    .find(|treasure| treasure.coordinates == candidate)
                {
                    treasure.amount -= 1;
                }
                self.treasures.retain(|treasure| treasure.amount > 0);

                self.build_grid();
                Advance::Collected(candidate)
            }
        }
    }

    pub fn serialize(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("C - {} - {}\n", self.width, self.height));

        if !self.mountains.is_empty() {
            out.push_str("# {M comme Montagne} - {Axe horizontal} - {Axe vertical}\n");
        }
        for mountain in &self.mountains {
            out.push_str(&format!(
                "M - {} - {}\n",
                mountain.coordinates.x, mountain.coordinates.y
            ));
        }

        if !self.treasures.is_empty() {
            out.push_str(
                "# {T comme Trésor} - {Axe horizontal} - {Axe vertical} - {Nb. de trésors restants}\n",
            );
        }
        for treasure in &self.treasures {
            out.push_str(&format!(
                "T - {} - {} - {}\n",
                treasure.coordinates.x, treasure.coordinates.y, treasure.amount
            ));
        }

        if !self.adventurers.is_empty() {
            out.push_str(
                "# {A comme Aventurier} - {Nom de l’aventurier} - {Axe horizontal} - {Axe vertical} - {Orientation} - {Nb. trésors ramassés}\n",
            );
        }
        for adventurer in &self.adventurers {
            out.push_str(&format!(
                "A - {} - {} - {} - {} - {}\n",
                adventurer.name,
                adventurer.coordinates.x,
                adventurer.coordinates.y,
                adventurer.orientation.to_char(),
                adventurer.treasure
            ));
        }

        out
    }

    pub fn draw(&self, round: usize) {
        let mut stdout = stdout();

        execute!(
            stdout,
            Print("Round: "),
            Print(round.to_string()),
            Print("\n")
        )
        .unwrap();

        for (index, adventurer) in self.adventurers.iter().enumerate() {
            execute!(
                stdout,
                SetForegroundColor(adventurer_to_color(index)),
                Print(&adventurer.name),
                Print(": position = ("),
                Print(adventurer.coordinates.x.to_string()),
                Print(", "),
                Print(adventurer.coordinates.y.to_string()),
                Print("), facing "),
                Print(adventurer.orientation.name()),
                Print(", treasures = "),
                Print(adventurer.treasure.to_string()),
                SetForegroundColor(Color::Reset),
                Print("\n")
            )
            .unwrap();
        }

        for y in 0..self.height {
            for x in 0..self.width {
                let cell = self.cell(x, y);
                let color = match cell {
                    Cell::Empty => Color::Reset,
                    Cell::Mountain => Color::Grey,
                    Cell::Treasure(_) => Color::DarkYellow,
                    Cell::Adventurer => self
                        .adventurers
                        .iter()
                        .position(|a| a.coordinates.x == x && a.coordinates.y == y)
                        .map_or(Color::White, adventurer_to_color),
                };
                execute!(
                    stdout,
                    SetForegroundColor(color),
                    Print(cell.char()),
                    SetForegroundColor(Color::Reset)
                )
                .unwrap();
            }
            execute!(stdout, Print("\n")).unwrap();
        }
        execute!(stdout, Print("\n")).unwrap();

        stdout.flush().unwrap();
    }

    fn check_coordinates(&self, kind: &'static str, coordinates: Coordinate) -> Result<(), MapError> {
        if coordinates.x >= self.width || coordinates.y >= self.height {
            return Err(MapError::OutOfBounds {
                kind,
                x: coordinates.x,
                y: coordinates.y,
            });
        }
        Ok(())
    }

    fn neighbor(&self, from: Coordinate, orientation: Orientation) -> Option<Coordinate> {
        let (x, y) = match orientation {
            Orientation::North => (Some(from.x), from.y.checked_sub(1)),
            Orientation::South => (Some(from.x), Some(from.y + 1)),
            Orientation::East => (Some(from.x + 1), Some(from.y)),
            Orientation::West => (from.x.checked_sub(1), Some(from.y)),
        };

        match (x, y) {
            (Some(x), Some(y)) if x < self.width && y < self.height => Some(Coordinate { x, y }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mountain(x: usize, y: usize) -> Mountain {
        Mountain {
            coordinates: Coordinate { x, y },
        }
    }

    fn treasure(x: usize, y: usize, amount: u32) -> Treasure {
        Treasure {
            coordinates: Coordinate { x, y },
            amount,
        }
    }

    fn adventurer(
        name: &str,
        x: usize,
        y: usize,
        orientation: Orientation,
        movements: Vec<Movement>,
    ) -> Adventurer {
        Adventurer {
            name: name.to_string(),
            coordinates: Coordinate { x, y },
            orientation,
            movements,
            treasure: 0,
        }
    }

    #[test]
    fn when_adding_an_entity_inside_the_grid_it_is_appended_to_its_list() {
        let mut map = Map::new(Dimension {
            width: 3,
            height: 4,
        });

        map.add_mountain(mountain(1, 0)).unwrap();
        map.add_treasure(treasure(0, 3, 2)).unwrap();
        map.add_adventurer(adventurer("Lara", 1, 1, Orientation::South, vec![]))
            .unwrap();

        assert_eq!(map.mountains().len(), 1);
        assert_eq!(map.treasures().len(), 1);
        assert_eq!(map.adventurers().len(), 1);
    }

    #[test]
    fn when_adding_a_mountain_out_of_bounds_an_error_is_returned() {
        let mut map = Map::new(Dimension {
            width: 3,
            height: 4,
        });

        assert_eq!(
            map.add_mountain(mountain(3, 0)),
            Err(MapError::OutOfBounds {
                kind: "mountain",
                x: 3,
                y: 0
            })
        );
        assert!(map.mountains().is_empty());
    }

    #[test]
    fn when_adding_a_treasure_out_of_bounds_an_error_is_returned() {
        let mut map = Map::new(Dimension {
            width: 3,
            height: 4,
        });

        assert_eq!(
            map.add_treasure(treasure(0, 4, 1)),
            Err(MapError::OutOfBounds {
                kind: "treasure",
                x: 0,
                y: 4
            })
        );
    }

    #[test]
    fn when_adding_an_adventurer_out_of_bounds_an_error_is_returned() {
        let mut map = Map::new(Dimension {
            width: 3,
            height: 4,
        });

        assert_eq!(
            map.add_adventurer(adventurer("Lara", 5, 5, Orientation::North, vec![])),
            Err(MapError::OutOfBounds {
                kind: "adventurer",
                x: 5,
                y: 5
            })
        );
    }

    #[test]
    fn when_building_the_grid_every_entity_marks_its_cell() {
        let mut map = Map::new(Dimension {
            width: 3,
            height: 4,
        });
        map.add_mountain(mountain(1, 0)).unwrap();
        map.add_treasure(treasure(0, 3, 2)).unwrap();
        map.add_adventurer(adventurer("Lara", 1, 1, Orientation::South, vec![]))
            .unwrap();

        map.build_grid();

        assert_eq!(map.cell(1, 0), Cell::Mountain);
        assert_eq!(map.cell(0, 3), Cell::Treasure(2));
        assert_eq!(map.cell(1, 1), Cell::Adventurer);
        assert_eq!(map.cell(0, 0), Cell::Empty);
        assert_eq!(map.cell(2, 3), Cell::Empty);
    }

    #[test]
    fn when_building_the_grid_an_adventurer_covers_the_treasure_it_stands_on() {
        let mut map = Map::new(Dimension {
            width: 2,
            height: 2,
        });
        map.add_treasure(treasure(0, 0, 3)).unwrap();
        map.add_adventurer(adventurer("Lara", 0, 0, Orientation::South, vec![]))
            .unwrap();

        map.build_grid();

        assert_eq!(map.cell(0, 0), Cell::Adventurer);
    }

    #[test]
    fn when_rotating_an_adventurer_only_its_orientation_changes() {
        let mut map = Map::new(Dimension {
            width: 2,
            height: 2,
        });
        map.add_adventurer(adventurer("Lara", 0, 0, Orientation::North, vec![]))
            .unwrap();
        map.build_grid();

        let orientation = map.rotate_adventurer(0, Movement::TurnRight);

        assert_eq!(orientation, Orientation::East);
        assert_eq!(map.adventurers()[0].orientation, Orientation::East);
        assert_eq!(
            map.adventurers()[0].coordinates,
            Coordinate { x: 0, y: 0 }
        );
    }

    #[test]
    fn when_advancing_into_an_empty_cell_the_adventurer_moves_and_the_grid_is_rebuilt() {
        let mut map = Map::new(Dimension {
            width: 3,
            height: 3,
        });
        map.add_adventurer(adventurer("Lara", 1, 1, Orientation::South, vec![]))
            .unwrap();
        map.build_grid();

        let outcome = map.advance_adventurer(0, false);

        assert_eq!(outcome, Advance::Moved(Coordinate { x: 1, y: 2 }));
        assert_eq!(map.adventurers()[0].coordinates, Coordinate { x: 1, y: 2 });
        assert_eq!(map.cell(1, 1), Cell::Empty);
        assert_eq!(map.cell(1, 2), Cell::Adventurer);
    }

    #[test]
    fn when_advancing_into_a_treasure_cell_one_unit_is_collected() {
        let mut map = Map::new(Dimension {
            width: 3,
            height: 3,
        });
        map.add_treasure(treasure(1, 2, 2)).unwrap();
        map.add_adventurer(adventurer("Lara", 1, 1, Orientation::South, vec![]))
            .unwrap();
        map.build_grid();

        let outcome = map.advance_adventurer(0, false);

        assert_eq!(outcome, Advance::Collected(Coordinate { x: 1, y: 2 }));
        assert_eq!(map.adventurers()[0].treasure, 1);
        assert_eq!(map.treasures()[0].amount, 1);
        // The adventurer now covers the treasure cell
        assert_eq!(map.cell(1, 2), Cell::Adventurer);
    }

    #[test]
    fn when_collecting_the_last_unit_the_treasure_is_removed_from_the_list() {
        let mut map = Map::new(Dimension {
            width: 3,
            height: 3,
        });
        map.add_treasure(treasure(1, 2, 1)).unwrap();
        map.add_adventurer(adventurer("Lara", 1, 1, Orientation::South, vec![]))
            .unwrap();
        map.build_grid();

        map.advance_adventurer(0, false);

        assert!(map.treasures().is_empty());
        assert_eq!(map.adventurers()[0].treasure, 1);
    }

    #[test]
    fn when_advancing_into_a_mountain_the_move_is_refused() {
        let mut map = Map::new(Dimension {
            width: 3,
            height: 3,
        });
        map.add_mountain(mountain(1, 2)).unwrap();
        map.add_adventurer(adventurer("Lara", 1, 1, Orientation::South, vec![]))
            .unwrap();
        map.build_grid();

        let outcome = map.advance_adventurer(0, false);

        assert_eq!(outcome, Advance::BlockedByMountain);
        assert_eq!(map.adventurers()[0].coordinates, Coordinate { x: 1, y: 1 });
    }

    #[test]
    fn when_advancing_into_another_adventurer_the_move_is_refused() {
        let mut map = Map::new(Dimension {
            width: 3,
            height: 3,
        });
        map.add_adventurer(adventurer("Lara", 1, 1, Orientation::South, vec![]))
            .unwrap();
        map.add_adventurer(adventurer("Indy", 1, 2, Orientation::North, vec![]))
            .unwrap();
        map.build_grid();

        let outcome = map.advance_adventurer(0, false);

        assert_eq!(outcome, Advance::BlockedByAdventurer);
        assert_eq!(map.adventurers()[0].coordinates, Coordinate { x: 1, y: 1 });
    }

    #[test]
    fn when_advancing_over_the_border_the_move_is_refused() {
        let mut map = Map::new(Dimension {
            width: 3,
            height: 3,
        });
        map.add_adventurer(adventurer("Lara", 0, 0, Orientation::North, vec![]))
            .unwrap();
        map.build_grid();

        let outcome = map.advance_adventurer(0, false);

        assert_eq!(outcome, Advance::RefusedBorder);
        assert_eq!(map.adventurers()[0].coordinates, Coordinate { x: 0, y: 0 });
    }

    #[test]
    fn when_advancing_over_the_border_in_hardcore_mode_the_adventurer_is_removed() {
        let mut map = Map::new(Dimension {
            width: 3,
            height: 3,
        });
        map.add_adventurer(adventurer("Lara", 2, 2, Orientation::South, vec![]))
            .unwrap();
        map.build_grid();

        let outcome = map.advance_adventurer(0, true);

        assert_eq!(outcome, Advance::Died);
        assert!(map.adventurers().is_empty());
        assert_eq!(map.cell(2, 2), Cell::Empty);
    }

    #[test]
    fn when_serializing_an_empty_map_only_the_dimension_line_is_emitted() {
        let map = Map::new(Dimension {
            width: 3,
            height: 4,
        });

        assert_eq!(map.serialize(), "C - 3 - 4\n");
    }

    #[test]
    fn when_serializing_section_headers_are_only_emitted_for_non_empty_sections() {
        let mut map = Map::new(Dimension {
            width: 3,
            height: 4,
        });
        map.add_mountain(mountain(1, 0)).unwrap();

        let serialized = map.serialize();

        assert!(serialized.contains("# {M comme Montagne}"));
        assert!(!serialized.contains("# {T comme Trésor}"));
        assert!(!serialized.contains("# {A comme Aventurier}"));
    }

    #[test]
    fn when_serializing_entities_are_emitted_in_insertion_order() {
        let mut map = Map::new(Dimension {
            width: 3,
            height: 4,
        });
        map.add_mountain(mountain(1, 0)).unwrap();
        map.add_mountain(mountain(2, 1)).unwrap();
        map.add_treasure(treasure(0, 3, 2)).unwrap();
        map.add_treasure(treasure(1, 3, 3)).unwrap();
        map.add_adventurer(adventurer("Lara", 1, 1, Orientation::South, vec![]))
            .unwrap();

        assert_eq!(
            map.serialize(),
            "C - 3 - 4\n\
             # {M comme Montagne} - {Axe horizontal} - {Axe vertical}\n\
             M - 1 - 0\n\
             M - 2 - 1\n\
             # {T comme Trésor} - {Axe horizontal} - {Axe vertical} - {Nb. de trésors restants}\n\
             T - 0 - 3 - 2\n\
             T - 1 - 3 - 3\n\
             # {A comme Aventurier} - {Nom de l’aventurier} - {Axe horizontal} - {Axe vertical} - {Orientation} - {Nb. trésors ramassés}\n\
             A - Lara - 1 - 1 - S - 0\n"
        );
    }
}
