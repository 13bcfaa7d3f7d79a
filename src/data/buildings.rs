use serde::{Deserialize, Serialize};

use crate::simulation::state::Resources;

/// Placement on the town map, as percentages of the map area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapPosition {
    pub top: f32,
    pub left: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub id: String,
    pub title: String,
    pub cost: Resources,
    pub position: MapPosition,
    pub quote: String,
}

impl Building {
    pub fn is_free(&self) -> bool {
        self.cost.stone == 0 && self.cost.wood == 0
    }
}

fn building(id: &str, title: &str, stone: i64, wood: i64, top: f32, left: f32, quote: &str) -> Building {
    Building {
        id: id.to_string(),
        title: title.to_string(),
        cost: Resources::new(stone, wood),
        position: MapPosition { top, left },
        quote: quote.to_string(),
    }
}

pub fn builtin_buildings() -> Vec<Building> {
    vec![
        building(
            "settlers-house",
            "Settler's House",
            0,
            0,
            20.0,
            15.0,
            "This town's shaping up real fine, partner.",
        ),
        building(
            "doctors-hut",
            "Doctor's Hut",
            4,
            6,
            25.0,
            50.0,
            "Every nail and plank's a step toward a better frontier.",
        ),
        building(
            "saloon",
            "Saloon",
            8,
            10,
            50.0,
            20.0,
            "Looks like the dust is turning into a home.",
        ),
        building(
            "blacksmith-forge",
            "Blacksmith's Forge",
            6,
            8,
            55.0,
            65.0,
            "One more building, one less worry for our folks.",
        ),
        building(
            "sheriff-office",
            "Sheriff's Office",
            10,
            12,
            75.0,
            40.0,
            "These lots are still quiet... need more wood and stone before life moves in.",
        ),
    ]
}
