use serde::{Deserialize, Serialize};

/// Narrative text tied to a building. Shares the building id space.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub quote: String,
}

impl Story {
    pub fn heading(&self) -> String {
        format!("{} \u{2014} '{}'", self.title, self.subtitle)
    }
}

fn story(id: &str, title: &str, subtitle: &str, lines: &[&str]) -> Story {
    Story {
        id: id.to_string(),
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        quote: lines.join("\n"),
    }
}

pub fn builtin_stories() -> Vec<Story> {
    vec![
        story(
            "settlers-house",
            "Settler's House",
            "The Lone Start",
            &[
                "He came with nothing but a horse, a rope, and",
                "a promise \u{2014} to turn dust into home.",
                "Each nail in the wall marked a day he refused",
                "to quit.",
                "Now, when the sun hits his porch, it's not just",
                "light \u{2014} it's proof he made it.",
            ],
        ),
        story(
            "doctors-hut",
            "Doctor's Hut",
            "Nora's Oath",
            &[
                "She arrived with a bag full of herbs and a heart",
                "full of hope. In a land where death came easy,",
                "she chose to fight for every breath.",
                "Her hands, steady as stone, mended wounds",
                "that words couldn't heal.",
                "The frontier needed a healer, and she became",
                "its guardian angel.",
            ],
        ),
        story(
            "saloon",
            "Saloon",
            "Whiskey and Wisdom",
            &[
                "Where whiskey flows and stories grow,",
                "strangers become neighbors, and neighbors",
                "become family.",
                "In the dim light, deals are made, friendships",
                "forged, and the weight of the frontier lifts",
                "for just a moment.",
                "This isn't just a bar \u{2014} it's the heart of the town.",
            ],
        ),
        story(
            "blacksmith-forge",
            "Blacksmith's Forge",
            "Iron Will",
            &[
                "Fire and steel, sweat and determination.",
                "Every hammer strike shapes not just metal,",
                "but the future of this town.",
                "His forge burns day and night, a beacon of",
                "progress in the wilderness.",
                "Where there's iron, there's hope.",
            ],
        ),
        story(
            "sheriff-office",
            "Sheriff's Office",
            "Law of the Dust",
            &[
                "In a land where law was just a word,",
                "he made it real. With a badge and a steady hand,",
                "he brought order to chaos.",
                "Justice wasn't just his job \u{2014} it was his promise",
                "to every soul who called this place home.",
                "The frontier needed a lawman, and he answered.",
            ],
        ),
    ]
}
