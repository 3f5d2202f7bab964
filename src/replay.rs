use serde_json::json;
use std::{collections::HashMap, fs::File, io::BufWriter};

pub fn create_replay_logger(
    filename: Option<String>,
    map_width: usize,
    map_height: usize,
    map_contents: String,
) -> Box<dyn ReplayLogger> {
    match filename {
        None => Box::new(NoOpReplayLogger {}),
        Some(filename) => Box::new(JsonReplayLogger::new(
            filename,
            map_width,
            map_height,
            map_contents,
        )),
    }
}

pub trait ReplayLogger {
    #[allow(unused_variables)]
    fn log_round(&mut self, round: usize, carried: Vec<u32>, treasures_remaining: u32) {}

    #[allow(unused_variables)]
    fn log_event(&mut self, round: usize, event: Event) {}

    fn clear(&mut self) {}

    fn save(&self) {}

    fn log_rotate(&mut self, round: usize, adventurer: String, orientation: char) {
        self.log_event(
            round,
            Event {
                event_type: EventType::Rotate,
                adventurer,
                location: None,
                destination: None,
                orientation: Some(orientation),
            },
        );
    }

    fn log_move(
        &mut self,
        round: usize,
        adventurer: String,
        location: (usize, usize),
        destination: (usize, usize),
    ) {
        self.log_event(
            round,
            Event {
                event_type: EventType::Move,
                adventurer,
                location: Some(location),
                destination: Some(destination),
                orientation: None,
            },
        );
    }

    fn log_collect(&mut self, round: usize, adventurer: String, location: (usize, usize)) {
        self.log_event(
            round,
            Event {
                event_type: EventType::Collect,
                adventurer,
                location: Some(location),
                destination: None,
                orientation: None,
            },
        );
    }

    fn log_remove(&mut self, round: usize, adventurer: String, location: (usize, usize)) {
        self.log_event(
            round,
            Event {
                event_type: EventType::Remove,
                adventurer,
                location: Some(location),
                destination: None,
                orientation: None,
            },
        );
    }
}

#[derive(serde::Serialize)]
enum EventType {
    Move,
    Rotate,
    Collect,
    Remove,
}

#[derive(serde::Serialize)]
pub struct Event {
    event_type: EventType,
    adventurer: String,
    location: Option<(usize, usize)>,
    destination: Option<(usize, usize)>,
    orientation: Option<char>,
}

struct Round {
    round: usize,
    carried: Vec<u32>,
    treasures_remaining: u32,
}

struct NoOpReplayLogger;
impl ReplayLogger for NoOpReplayLogger {}

struct JsonReplayLogger {
    filename: String,
    map_width: usize,
    map_height: usize,
    map_contents: String,
    rounds: Vec<Round>,
    events: HashMap<usize, Vec<Event>>,
}

impl JsonReplayLogger {
    pub fn new(
        filename: String,
        map_width: usize,
        map_height: usize,
        map_contents: String,
    ) -> JsonReplayLogger {
        JsonReplayLogger {
            filename,
            map_width,
            map_height,
            map_contents,
            rounds: Vec::new(),
            events: HashMap::new(),
        }
    }
}

impl ReplayLogger for JsonReplayLogger {
    fn log_round(&mut self, round: usize, carried: Vec<u32>, treasures_remaining: u32) {
        self.rounds.push(Round {
            round,
            carried,
            treasures_remaining,
        });
    }

    fn log_event(&mut self, round: usize, event: Event) {
        self.events.entry(round).or_default().push(event);
    }

    fn clear(&mut self) {
        self.rounds.clear();
        self.events.clear();
    }

    fn save(&self) {
        let file = File::create(&self.filename).unwrap();
        let rounds: Vec<_> = self
            .rounds
            .iter()
            .map(|round| {
                json!({
                    "round": round.round,
                    "carried": round.carried,
                    "treasures_remaining": round.treasures_remaining,
                    "events": self.events.get(&round.round).unwrap_or(&Vec::new()),
                })
            })
            .collect();

        let data = json!({
            "map": {
                "width": self.map_width,
                "height": self.map_height,
                "contents": self.map_contents,
            },
            "rounds": rounds,
        });

        let mut writer = BufWriter::new(&file);
        serde_json::to_writer_pretty(&mut writer, &data).unwrap();
    }
}
