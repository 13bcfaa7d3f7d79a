//! Plain-text views of each screen, built from a [`Snapshot`].

use crate::config::GameConfig;
use crate::core::clock::MILLIS_PER_MINUTE;
use crate::core::world::{BuildingSummary, Snapshot};
use crate::data::Story;
use crate::simulation::lifecycle::BuildingPhase;
use crate::simulation::state::Resources;
use crate::ui::navigation::{MenuItem, Screen};

pub fn render_screen(snapshot: &Snapshot, config: &GameConfig) -> String {
    match &snapshot.screen {
        Screen::Onboarding { page } => render_onboarding(snapshot, *page),
        Screen::MainMenu => render_main_menu(),
        Screen::TownDisputes => render_town_disputes(snapshot),
        Screen::DisputeGameplay { .. } => render_dispute(snapshot),
        Screen::LevelComplete { level_id } => render_level_complete(level_id, config),
        Screen::MyTown => render_town(snapshot),
        Screen::Stories => render_stories(snapshot),
        Screen::Resources => render_resources(snapshot, config),
    }
}

fn render_onboarding(snapshot: &Snapshot, page: usize) -> String {
    let Some(onboarding) = &snapshot.onboarding else {
        return String::new();
    };
    let mut output = String::new();
    output.push_str(&format!(
        "=== {} ({}/{}) ===\n",
        onboarding.title,
        page + 1,
        snapshot.onboarding_pages
    ));
    output.push_str(&onboarding.description);
    output.push('\n');
    output.push_str(&format!("[next] {}   [skip]\n", onboarding.button_text));
    output
}

fn render_main_menu() -> String {
    let mut output = String::from("=== Main Menu ===\n");
    for (idx, item) in MenuItem::ALL.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", idx + 1, item.label()));
    }
    output
}

fn render_town_disputes(snapshot: &Snapshot) -> String {
    let mut output = String::from("=== Town Disputes ===\n");
    for status in &snapshot.levels {
        let marker = if status.completed {
            "done"
        } else if status.unlocked {
            "open"
        } else {
            "locked"
        };
        output.push_str(&format!(
            "  Level {} {} [{}] ({})\n",
            status.level.number, status.level.title, marker, status.level.id
        ));
    }
    output
}

fn render_dispute(snapshot: &Snapshot) -> String {
    let Some(dispute) = &snapshot.dispute else {
        return String::new();
    };
    let mut output = String::new();
    output.push_str(&format!(
        "=== {} : dispute {}/{} ===\n",
        dispute.level_title,
        dispute.index + 1,
        dispute.total
    ));
    output.push_str(&format!("Time left: {}s\n", dispute.seconds_left));
    output.push_str(&dispute.text);
    output.push('\n');
    for (idx, choice) in dispute.choices.iter().enumerate() {
        let marker = if dispute.selected == Some(idx) { '*' } else { ' ' };
        output.push_str(&format!(" {}{}. {}\n", marker, idx + 1, choice));
    }
    output
}

fn render_level_complete(level_id: &str, config: &GameConfig) -> String {
    let reward = config.dispute.reward;
    format!(
        "=== LEVEL DONE ({level_id}) ===\n\
         You handled the disputes like a true frontier mediator. The town stands stronger thanks to your wisdom.\n\
         Reward: stone +{} wood +{}\n\
         [back] [disputes] [menu]\n",
        reward.stone, reward.wood
    )
}

fn render_town(snapshot: &Snapshot) -> String {
    let mut output = String::from("=== My Town ===\n");
    output.push_str(&format!(
        "Stone: {}  Wood: {}\n",
        snapshot.resources.stone, snapshot.resources.wood
    ));
    for building in &snapshot.buildings {
        output.push_str(&render_building_line(building));
    }
    output
}

fn render_building_line(building: &BuildingSummary) -> String {
    let state = match building.phase {
        BuildingPhase::Unlocked => "built",
        BuildingPhase::UnderConstruction(_) => "building",
        BuildingPhase::Locked => "locked",
    };
    let cost = if building.phase == BuildingPhase::Locked && building.cost != Resources::default() {
        let afford = if building.can_afford { "" } else { ", short" };
        format!(
            " cost {}s/{}w{}",
            building.cost.stone, building.cost.wood, afford
        )
    } else {
        String::new()
    };
    format!(
        "  {:<16} {:<8} [{}]{} ({})\n",
        building.title, state, building.action_label, cost, building.id
    )
}

fn render_stories(snapshot: &Snapshot) -> String {
    let mut output = String::from("=== Stories ===\n");
    for story in &snapshot.stories {
        let marker = if story.unlocked { "Open" } else { "locked" };
        output.push_str(&format!("  {} [{}] ({})\n", story.heading, marker, story.id));
    }
    output
}

fn render_resources(snapshot: &Snapshot, config: &GameConfig) -> String {
    let minutes = config.construction_duration_ms / MILLIS_PER_MINUTE;
    format!(
        "=== Resources ===\n\
         Stone: {}  Wood: {}\n\
         HOW TO BUILD?\n  Select a building and start construction. Each building takes {} minutes to complete.\n\
         BUILDING PROGRESS\n  Check your town to see building progress and completion times.\n\
         STORY ACCESS\n  Once built, you can read each building's story once per day.\n",
        snapshot.resources.stone, snapshot.resources.wood, minutes
    )
}

/// Story popup text shared by the town and stories screens.
pub fn render_story(story: &Story) -> String {
    format!("--- {} ---\n{}\n", story.heading(), story.quote)
}
