use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisputeLevel {
    pub id: String,
    pub number: u32,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisputeChoice {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dispute {
    pub id: String,
    pub level_id: String,
    pub text: String,
    pub choices: Vec<DisputeChoice>,
    /// Index into `choices`. Carried with the content but not consulted by
    /// the gameplay flow: every choice completes the dispute the same way.
    pub correct_choice: usize,
}

pub fn builtin_levels() -> Vec<DisputeLevel> {
    [
        ("ranch-disputes", 1, "Ranch Disputes"),
        ("town-affairs", 2, "Town Affairs"),
        ("frontier-cooperation", 3, "Frontier Cooperation"),
        ("moral-compass", 4, "Moral Compass"),
        ("town-rising", 5, "Town Rising"),
    ]
    .into_iter()
    .map(|(id, number, title)| DisputeLevel {
        id: id.to_string(),
        number,
        title: title.to_string(),
    })
    .collect()
}

fn dispute(id: &str, level_id: &str, text: &str, choices: [&str; 2], correct_choice: usize) -> Dispute {
    Dispute {
        id: id.to_string(),
        level_id: level_id.to_string(),
        text: text.to_string(),
        choices: choices
            .iter()
            .enumerate()
            .map(|(idx, text)| DisputeChoice {
                id: format!("choice-{}", idx + 1),
                text: text.to_string(),
            })
            .collect(),
        correct_choice,
    }
}

pub fn builtin_disputes() -> Vec<Dispute> {
    vec![
        dispute(
            "dispute-1-1",
            "ranch-disputes",
            "Two ranchers want to hire the same worker.",
            [
                "Let them fight it out.",
                "Ask the worker who he prefers to help first.",
            ],
            1,
        ),
        dispute(
            "dispute-1-2",
            "ranch-disputes",
            "A farmer refuses to help during a storm.",
            [
                "Remind him that next time he might need help too.",
                "Leave him be; it's his problem.",
            ],
            0,
        ),
        dispute(
            "dispute-1-3",
            "ranch-disputes",
            "Two families claim the same piece of land.",
            [
                "Split the land equally between them.",
                "Let the first settler keep it.",
            ],
            0,
        ),
    ]
}
