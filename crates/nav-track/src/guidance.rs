//! Turn-by-turn instructions from provider steps.
//!
//! Step locations are projected onto the route once, when the route is
//! installed, so each fix only needs its own along-route offset to find the
//! next maneuver.
//!
//! | Maneuver type / modifier        | Class        |
//! |---------------------------------|--------------|
//! | `turn` + `*left*`               | `Left`       |
//! | `turn` + `*right*`              | `Right`      |
//! | `new name`, `depart`, other     | `Straight`   |
//! | `merge`                         | `Merge`      |
//! | `arrive`                        | `Arrive`     |
//! | modifier `sharp left`           | `SharpLeft`  |
//! | modifier `sharp right`          | `SharpRight` |
//! | modifier `uturn`                | `UTurn`      |
//!
//! The three modifier rows override whatever the type produced.

use nav_core::{Point, path_length, project_onto_polyline};
use nav_spatial::Step;

/// Maneuvers closer than this are considered already taken.
pub const MANEUVER_LOOKAHEAD_M: f64 = 30.0;

/// Remaining distance below which the destination is announced.
pub const APPROACH_RADIUS_M: f64 = 50.0;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InstructionClass {
    Straight,
    Left,
    Right,
    SharpLeft,
    SharpRight,
    UTurn,
    Merge,
    Arrive,
}

impl InstructionClass {
    /// Classify a maneuver type and optional modifier.
    pub fn from_maneuver(maneuver_type: &str, modifier: Option<&str>) -> Self {
        let mut class = match maneuver_type {
            "turn" => match modifier {
                Some(m) if m.contains("left")  => InstructionClass::Left,
                Some(m) if m.contains("right") => InstructionClass::Right,
                _ => InstructionClass::Straight,
            },
            "arrive" => InstructionClass::Arrive,
            "merge"  => InstructionClass::Merge,
            _ => InstructionClass::Straight,
        };
        match modifier {
            Some("sharp left")  => class = InstructionClass::SharpLeft,
            Some("sharp right") => class = InstructionClass::SharpRight,
            Some("uturn")       => class = InstructionClass::UTurn,
            _ => {}
        }
        class
    }

    pub fn text(self) -> &'static str {
        match self {
            InstructionClass::Straight   => "Go straight",
            InstructionClass::Left       => "Turn left",
            InstructionClass::Right      => "Turn right",
            InstructionClass::SharpLeft  => "Sharp left",
            InstructionClass::SharpRight => "Sharp right",
            InstructionClass::UTurn      => "Make a U-turn",
            InstructionClass::Merge      => "Merge",
            InstructionClass::Arrive     => "Arrive",
        }
    }

    /// Icon key for the renderer's sprite sheet.
    pub fn icon(self) -> &'static str {
        match self {
            InstructionClass::Straight   => "straight",
            InstructionClass::Left       => "turn-left",
            InstructionClass::Right      => "turn-right",
            InstructionClass::SharpLeft  => "sharp-left",
            InstructionClass::SharpRight => "sharp-right",
            InstructionClass::UTurn      => "u-turn",
            InstructionClass::Merge      => "merge",
            InstructionClass::Arrive     => "flag",
        }
    }
}

/// What to show the user right now.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instruction {
    pub class:                  InstructionClass,
    pub text:                   String,
    pub icon:                   String,
    /// Distance along the route to the maneuver, metres.
    pub distance_to_maneuver_m: f64,
    /// Distance along the route to its end, metres.
    pub remaining_m:            f64,
}

/// Step offsets for one route.
#[derive(Clone, Debug, Default)]
pub struct Guidance {
    /// `(along_m, step)` in route order.
    steps:   Vec<(f64, Step)>,
    total_m: f64,
}

impl Guidance {
    pub fn new(points: &[Point], steps: &[Step]) -> Self {
        let total_m = path_length(points);
        let mut offsets: Vec<(f64, Step)> = steps
            .iter()
            .map(|s| {
                let along = project_onto_polyline(s.location, points).map_or(0.0, |p| p.along_m);
                (along, s.clone())
            })
            .collect();
        // A route that doubles back can project a later step onto an earlier
        // segment; keep offsets monotone so lookups stay in step order.
        let mut floor = 0.0_f64;
        for (along, _) in &mut offsets {
            floor = floor.max(*along);
            *along = floor;
        }
        Self { steps: offsets, total_m }
    }

    pub fn total_m(&self) -> f64 {
        self.total_m
    }

    /// Along-route offset of each step, in order.
    pub fn offsets(&self) -> impl Iterator<Item = f64> + '_ {
        self.steps.iter().map(|(a, _)| *a)
    }

    /// Instruction for a user `along_m` metres into the route.
    pub fn instruction(&self, along_m: f64) -> Instruction {
        let remaining_m = (self.total_m - along_m).max(0.0);

        if remaining_m < APPROACH_RADIUS_M {
            return Instruction {
                class: InstructionClass::Arrive,
                text: "Approaching destination".to_owned(),
                icon: InstructionClass::Arrive.icon().to_owned(),
                distance_to_maneuver_m: remaining_m,
                remaining_m,
            };
        }

        match self.steps.iter().find(|(a, _)| *a > along_m + MANEUVER_LOOKAHEAD_M) {
            Some((at, step)) => {
                let class = InstructionClass::from_maneuver(&step.maneuver_type, step.modifier.as_deref());
                let street = if step.street_name.is_empty() { "road" } else { &step.street_name };
                Instruction {
                    class,
                    text: format!("{} ({street})", class.text()),
                    icon: class.icon().to_owned(),
                    distance_to_maneuver_m: at - along_m,
                    remaining_m,
                }
            }
            None => Instruction {
                class: InstructionClass::Straight,
                text: "Continue along the route".to_owned(),
                icon: InstructionClass::Straight.icon().to_owned(),
                distance_to_maneuver_m: remaining_m,
                remaining_m,
            },
        }
    }
}
