use crate::entities::{adventurer_to_color, Movement};
use crate::error::MapError;
use crate::map::{Advance, Map};
use crate::parser;
use crate::replay::{create_replay_logger, ReplayLogger};
use crossterm::{
    execute,
    style::{Color, Print, SetForegroundColor},
};
use std::io::{stdout, Write};

/// The treasure map game.
/// Main entry point for running an exploration.
pub struct Game {
    map: Map,
    round: usize,
    replay_logger: Box<dyn ReplayLogger>,
}

impl Game {
    /// Creates a new game from the string representation of a map.
    ///
    /// # Arguments
    /// * `map_contents` - The map as a string.
    /// * `replay_filename` - The filename to save the replay of the exploration to. If `None`, no replay will be saved.
    pub fn new(map_contents: &str, replay_filename: Option<String>) -> Result<Game, MapError> {
        let map = parser::parse(map_contents)?;
        let replay_logger = create_replay_logger(
            replay_filename,
            map.width(),
            map.height(),
            map_contents.to_string(),
        );

        Ok(Game {
            map,
            round: 0,
            replay_logger,
        })
    }

    /// Runs the full scripted exploration, one round per movement index.
    ///
    /// Within a round adventurers act in insertion order, so an adventurer can
    /// enter a cell vacated earlier in the same round but not one that will
    /// only be vacated later.
    ///
    /// # Arguments
    /// * `verbose` - Narrate every step and draw the grid after each state change.
    /// * `hardcore_mode` - Crossing the border kills the adventurer instead of refusing the move.
    pub fn explore(&mut self, verbose: bool, hardcore_mode: bool) {
        let max_rounds = self
            .map
            .adventurers()
            .iter()
            .map(|adventurer| adventurer.movements.len())
            .max()
            .unwrap_or(0);

        self.round = 0;
        self.replay_logger.clear();
        self.map.build_grid();
        self.log_round();

        for script_index in 0..max_rounds {
            self.round = script_index + 1;

            let mut index = 0;
            while index < self.map.adventurers().len() {
                let movement = match self.map.adventurers()[index].movements.get(script_index) {
                    Some(movement) => *movement,
                    None => {
                        // This adventurer's script is shorter than the longest one
                        index += 1;
                        continue;
                    }
                };

                match movement {
                    Movement::TurnLeft | Movement::TurnRight => {
                        let orientation = self.map.rotate_adventurer(index, movement);
                        let name = self.map.adventurers()[index].name.clone();
                        self.replay_logger
                            .log_rotate(self.round, name.clone(), orientation.to_char());
                        if verbose {
                            let side = match movement {
                                Movement::TurnRight => "right",
                                _ => "left",
                            };
                            self.narrate(
                                index,
                                &format!(
                                    "{} turns {} and is now facing {}",
                                    name,
                                    side,
                                    orientation.name()
                                ),
                            );
                        }
                        index += 1;
                    }
                    Movement::Advance => {
                        let name = self.map.adventurers()[index].name.clone();
                        let from = self.map.adventurers()[index].coordinates;

                        match self.map.advance_adventurer(index, hardcore_mode) {
                            Advance::Moved(to) => {
                                self.replay_logger.log_move(
                                    self.round,
                                    name.clone(),
                                    (from.x, from.y),
                                    (to.x, to.y),
                                );
                                if verbose {
                                    self.narrate(
                                        index,
                                        &format!("{} moved to {},{}", name, to.x, to.y),
                                    );
                                    self.map.draw(self.round);
                                }
                                index += 1;
                            }
                            Advance::Collected(to) => {
                                let carrying = self.map.adventurers()[index].treasure;
                                self.replay_logger.log_move(
                                    self.round,
                                    name.clone(),
                                    (from.x, from.y),
                                    (to.x, to.y),
                                );
                                self.replay_logger.log_collect(
                                    self.round,
                                    name.clone(),
                                    (to.x, to.y),
                                );
                                if verbose {
                                    self.narrate(
                                        index,
                                        &format!(
                                            "{} moved to {},{} and found a treasure! Carrying {} treasure{}.",
                                            name,
                                            to.x,
                                            to.y,
                                            carrying,
                                            if carrying > 1 { "s" } else { "" }
                                        ),
                                    );
                                    self.map.draw(self.round);
                                }
                                index += 1;
                            }
                            outcome @ (Advance::BlockedByMountain
                            | Advance::BlockedByAdventurer) => {
                                if verbose {
                                    let blocker = match outcome {
                                        Advance::BlockedByMountain => "a mountain",
                                        _ => "an adventurer",
                                    };
                                    self.narrate(
                                        index,
                                        &format!(
                                            "{} couldn't move this time, there was {} blocking the way",
                                            name, blocker
                                        ),
                                    );
                                }
                                index += 1;
                            }
                            Advance::RefusedBorder => {
                                if verbose {
                                    self.narrate(
                                        index,
                                        &format!(
                                            "{} tried to cross the border but, overcome with fear, turned back.",
                                            name
                                        ),
                                    );
                                }
                                index += 1;
                            }
                            Advance::Died => {
                                self.replay_logger.log_remove(
                                    self.round,
                                    name.clone(),
                                    (from.x, from.y),
                                );
                                if verbose {
                                    self.narrate(
                                        index,
                                        &format!(
                                            "{} crossed the border and was killed by a wild animal, and all the recovered treasures were lost. This is a sad story.",
                                            name
                                        ),
                                    );
                                    self.map.draw(self.round);
                                }
                                // The removal shifted the list, the next adventurer is already at this index
                            }
                        }
                    }
                }
            }

            self.log_round();
        }

        if verbose {
            for (index, adventurer) in self.map.adventurers().iter().enumerate() {
                self.narrate(
                    index,
                    &format!(
                        "{} ended at ({}, {}) with {} treasure{}.",
                        adventurer.name,
                        adventurer.coordinates.x,
                        adventurer.coordinates.y,
                        adventurer.treasure,
                        if adventurer.treasure > 1 { "s" } else { "" }
                    ),
                );
            }
        }

        self.replay_logger.save();
    }

    /// Serializes the current world back into the textual map format.
    pub fn serialize(&self) -> String {
        self.map.serialize()
    }

    /// Draws the current world to the console.
    pub fn draw(&self) {
        self.map.draw(self.round);
    }

    /// The world state, for inspection after an exploration.
    pub fn map(&self) -> &Map {
        &self.map
    }

    fn log_round(&mut self) {
        let carried = self
            .map
            .adventurers()
            .iter()
            .map(|adventurer| adventurer.treasure)
            .collect();
        let treasures_remaining = self
            .map
            .treasures()
            .iter()
            .map(|treasure| treasure.amount)
            .sum();
        self.replay_logger
            .log_round(self.round, carried, treasures_remaining);
    }

    fn narrate(&self, index: usize, message: &str) {
        let mut stdout = stdout();
        execute!(
            stdout,
            SetForegroundColor(adventurer_to_color(index)),
            Print(message),
            SetForegroundColor(Color::Reset),
            Print("\n")
        )
        .unwrap();
        stdout.flush().unwrap();
    }
}
