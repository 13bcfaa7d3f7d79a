use serde::{Deserialize, Serialize};

/// One intro page. Image fields are opaque asset ids resolved by whatever
/// front end draws the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingPage {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub button_text: String,
    pub background_asset: String,
    pub character_asset: String,
}

pub fn builtin_onboarding() -> Vec<OnboardingPage> {
    [
        (
            1,
            "Welcome to the Frontier",
            "Start your new life in the Wild West. Build, explore, and turn this dusty land into a thriving town.",
            "RIDE ON",
        ),
        (
            2,
            "Be the Mediator",
            "Solve disputes peacefully and earn wood and stone to build new homes for your growing town.",
            "Got It",
        ),
        (
            3,
            "Grow Your Town",
            "Each building brings new stories, people, and challenges. The frontier is yours to shape.",
            "Start Building",
        ),
    ]
    .into_iter()
    .map(|(id, title, description, button_text)| OnboardingPage {
        id,
        title: title.to_string(),
        description: description.to_string(),
        button_text: button_text.to_string(),
        background_asset: format!("onboarding/bg-{}", id),
        character_asset: format!("onboarding/cowboy-{}", id),
    })
    .collect()
}
