//! Built-in example drills.
//!
//! Used by `drill example`, as reference input for generators, and as test
//! and benchmark input.

use crate::models::Drill;
use crate::schema::{self, SchemaError};

/// A named example drill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixture {
    pub name: &'static str,
    /// Drill JSON
    pub source: &'static str,
}

impl Fixture {
    pub fn drill(&self) -> Result<Drill, SchemaError> {
        schema::parse_str(self.source)
    }
}

pub const PASSING_TRIANGLE: Fixture =
    Fixture { name: "passing_triangle", source: include_str!("../drills/passing_triangle.json") };
pub const FINISHING_2V1: Fixture =
    Fixture { name: "finishing_2v1", source: include_str!("../drills/finishing_2v1.json") };
pub const SLALOM_FINISH: Fixture =
    Fixture { name: "slalom_finish", source: include_str!("../drills/slalom_finish.json") };
pub const DRIBBLE_THROUGH_GATES: Fixture = Fixture {
    name: "dribble_through_gates",
    source: include_str!("../drills/dribble_through_gates.json"),
};
pub const CROSSING_AND_FINISHING: Fixture = Fixture {
    name: "crossing_and_finishing",
    source: include_str!("../drills/crossing_and_finishing.json"),
};
pub const RONDO_4V2: Fixture =
    Fixture { name: "rondo_4v2", source: include_str!("../drills/rondo_4v2.json") };
pub const GIVE_AND_GO: Fixture =
    Fixture { name: "give_and_go", source: include_str!("../drills/give_and_go.json") };

/// Every built-in drill, in listing order.
pub const ALL: &[Fixture] = &[
    PASSING_TRIANGLE,
    FINISHING_2V1,
    SLALOM_FINISH,
    DRIBBLE_THROUGH_GATES,
    CROSSING_AND_FINISHING,
    RONDO_4V2,
    GIVE_AND_GO,
];

/// Look up a fixture by name.
pub fn get(name: &str) -> Option<&'static Fixture> {
    ALL.iter().find(|f| f.name == name)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    ALL.iter().map(|f| f.name)
}
