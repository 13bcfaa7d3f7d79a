use std::sync::Arc;

use bevy_ecs::prelude::*;
use bevy_utils::tracing::{debug, info, warn};
use thiserror::Error;

use crate::config::GameConfig;
use crate::core::clock::{Clock, Millis};
use crate::core::ecs::{create_schedule, create_world};
use crate::core::serialization::SaveState;
use crate::data::{Building, ContentCatalog, MapPosition, OnboardingPage, Story};
use crate::simulation::dispute::{DisputeError, DisputeRound};
use crate::simulation::levels::{is_level_unlocked, level_statuses, LevelStatus};
use crate::simulation::lifecycle::{
    format_construction_remaining, format_cooldown_remaining, BuildingPhase, ConstructionProgress,
    LifecycleEvaluator, StoryGate,
};
use crate::simulation::state::{GameState, Resources};
use crate::simulation::store::GameStore;
use crate::simulation::timer::IntervalTimer;
use crate::systems::construction::ConstructionTicker;
use crate::systems::dispute::DisputeSession;
use crate::systems::events::{GameEvent, GameEventLog, Now};
use crate::ui::navigation::{MenuItem, Navigator, Screen};

/// Player input, one per button press on a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerIntent {
    ContinueOnboarding,
    SkipOnboarding,
    OpenMenu(MenuItem),
    Back,
    EnterLevel { level_id: String },
    ChooseAnswer { choice: usize },
    InspectBuilding { building_id: String },
    BuildingAction { building_id: String },
    StartConstruction { building_id: String },
    OpenStory { story_id: String },
    ReturnToDisputes,
    ReturnToMenu,
}

impl PlayerIntent {
    pub fn name(&self) -> &'static str {
        match self {
            PlayerIntent::ContinueOnboarding => "continue",
            PlayerIntent::SkipOnboarding => "skip",
            PlayerIntent::OpenMenu(_) => "open menu entry",
            PlayerIntent::Back => "back",
            PlayerIntent::EnterLevel { .. } => "enter level",
            PlayerIntent::ChooseAnswer { .. } => "choose answer",
            PlayerIntent::InspectBuilding { .. } => "inspect building",
            PlayerIntent::BuildingAction { .. } => "building action",
            PlayerIntent::StartConstruction { .. } => "start construction",
            PlayerIntent::OpenStory { .. } => "open story",
            PlayerIntent::ReturnToDisputes => "return to disputes",
            PlayerIntent::ReturnToMenu => "return to menu",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum IntentOutcome {
    Navigated(Screen),
    Stayed,
    Quote { building_id: String, text: String },
    StoryOpened { story: Story, recorded_view: bool },
    BuildPrompt {
        building: Building,
        can_afford: bool,
        duration_ms: Millis,
    },
    ConstructionStarted {
        building_id: String,
        completes_at: Millis,
    },
    ChoiceAccepted { dispute_index: usize, choice: usize },
}

/// Refusals at the input layer. The state store itself never fails; these
/// stand in for buttons a screen would disable or hide.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("{intent} is not available on the {screen} screen")]
    WrongScreen {
        intent: &'static str,
        screen: &'static str,
    },
    #[error("unknown building {0}")]
    UnknownBuilding(String),
    #[error("unknown story {0}")]
    UnknownStory(String),
    #[error("unknown level {0}")]
    UnknownLevel(String),
    #[error("level {0} is locked")]
    LevelLocked(String),
    #[error("level {0} has no disputes")]
    EmptyLevel(String),
    #[error("story {0} is locked")]
    StoryLocked(String),
    #[error("story {building_id} can be read again in {remaining}")]
    StoryOnCooldown {
        building_id: String,
        remaining: String,
    },
    #[error("{building_id} is under construction ({remaining} left)")]
    UnderConstruction {
        building_id: String,
        remaining: String,
    },
    #[error("{0} is already built")]
    AlreadyBuilt(String),
    #[error("no dispute is in progress")]
    NoActiveDispute,
    #[error(transparent)]
    Dispute(#[from] DisputeError),
}

/// Data snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub screen: Screen,
    pub now: Millis,
    pub resources: Resources,
    pub onboarding: Option<OnboardingPage>,
    pub onboarding_pages: usize,
    pub buildings: Vec<BuildingSummary>,
    pub stories: Vec<StorySummary>,
    pub levels: Vec<LevelStatus>,
    pub dispute: Option<DisputeSummary>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildingSummary {
    pub id: String,
    pub title: String,
    pub cost: Resources,
    pub position: MapPosition,
    pub phase: BuildingPhase,
    pub story_gate: Option<StoryGate>,
    pub action_label: String,
    pub can_afford: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorySummary {
    pub id: String,
    pub heading: String,
    pub unlocked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisputeSummary {
    pub level_id: String,
    pub level_title: String,
    pub index: usize,
    pub total: usize,
    pub seconds_left: u32,
    pub text: String,
    pub choices: Vec<String>,
    pub selected: Option<usize>,
}

/// Wrapper around the ECS world, schedule, clock and navigation stack.
pub struct Game {
    world: World,
    schedule: Schedule,
    clock: Arc<dyn Clock>,
    navigator: Navigator,
    last_step: Millis,
    events: Vec<GameEvent>,
}

impl Game {
    /// Start a fresh session.
    pub fn new(config: GameConfig, catalog: ContentCatalog, clock: Arc<dyn Clock>) -> Self {
        let state = GameState::initial(&config);
        Self::with_state(config, catalog, clock, state)
    }

    /// Start a session from previously saved progress.
    pub fn with_state(
        config: GameConfig,
        catalog: ContentCatalog,
        clock: Arc<dyn Clock>,
        state: GameState,
    ) -> Self {
        let store = GameStore::new(state, clock.clone());
        let last_step = clock.now_ms();
        let world = create_world(config, catalog, store);
        Self {
            world,
            schedule: create_schedule(),
            clock,
            navigator: Navigator::default(),
            last_step,
            events: Vec::new(),
        }
    }

    pub fn now(&self) -> Millis {
        self.clock.now_ms()
    }

    pub fn state(&self) -> &GameState {
        self.store().state()
    }

    pub fn store(&self) -> &GameStore {
        self.world.resource::<GameStore>()
    }

    pub fn catalog(&self) -> &ContentCatalog {
        self.world.resource::<ContentCatalog>()
    }

    pub fn config(&self) -> &GameConfig {
        self.world.resource::<GameConfig>()
    }

    pub fn evaluator(&self) -> LifecycleEvaluator {
        *self.world.resource::<LifecycleEvaluator>()
    }

    pub fn screen(&self) -> &Screen {
        self.navigator.current()
    }

    pub fn construction_timer_active(&self) -> bool {
        self.world.contains_resource::<ConstructionTicker>()
    }

    pub fn dispute_round(&self) -> Option<&DisputeRound> {
        self.world
            .get_resource::<DisputeSession>()
            .map(|session| &session.round)
    }

    /// Events raised since the last call.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Replace progress with a saved snapshot.
    pub fn load_state(&mut self, save: SaveState) {
        self.world.resource_mut::<GameStore>().replace(save.state);
        info!(saved_at = save.saved_at_ms, "progress loaded");
    }

    pub fn save_state(&self) -> SaveState {
        SaveState::new(self.state().clone(), self.now())
    }

    /// Bring timers up to the current clock.
    ///
    /// While a dispute is open the schedule is stepped once per tick interval
    /// so the countdown and the post-choice delay resolve in order, until the
    /// round has nothing left to resolve. The town
    /// timer only compares stored timestamps, so one step is enough for it.
    pub fn pump(&mut self) {
        let now = self.now();
        let step = self.config().tick_interval_ms;
        let mut at = self.last_step;
        while !self.dispute_settled() && now > at && now - at > step {
            at += step;
            self.run_step(at);
        }
        self.run_step(now);
    }

    /// True when stepping cannot change the open round any more: no round,
    /// or the countdown is at zero with no advance pending.
    fn dispute_settled(&self) -> bool {
        match self.dispute_round() {
            None => true,
            Some(round) => {
                round.is_finished() || (round.seconds_left() == 0 && round.advance_due().is_none())
            }
        }
    }

    fn run_step(&mut self, at: Millis) {
        self.world.resource_mut::<Now>().0 = at;
        self.schedule.run(&mut self.world);
        self.last_step = at;

        let events = self.world.resource_mut::<GameEventLog>().drain();
        for event in &events {
            if let GameEvent::LevelCompleted { level_id, .. } = event {
                self.navigator.replace(Screen::LevelComplete {
                    level_id: level_id.clone(),
                });
                self.sync_screen_resources(at);
            }
        }
        self.events.extend(events);
    }

    /// Arm the timers owned by the current screen and tear down the rest.
    fn sync_screen_resources(&mut self, now: Millis) {
        let period = self.config().tick_interval_ms;
        let screen = self.navigator.current().clone();

        let wants_ticker = matches!(screen, Screen::MyTown);
        let has_ticker = self.world.contains_resource::<ConstructionTicker>();
        if wants_ticker && !has_ticker {
            self.world.insert_resource(ConstructionTicker {
                timer: IntervalTimer::start(now, period),
            });
            debug!("construction timer armed");
        } else if !wants_ticker && has_ticker {
            self.world.remove_resource::<ConstructionTicker>();
            debug!("construction timer torn down");
        }

        let wanted_level = match &screen {
            Screen::DisputeGameplay { level_id } => Some(level_id.clone()),
            _ => None,
        };
        let active_level = self.dispute_round().map(|round| round.level_id().to_string());
        if wanted_level == active_level {
            return;
        }
        if active_level.is_some() {
            self.world.remove_resource::<DisputeSession>();
            debug!("dispute session torn down");
        }
        if let Some(level_id) = wanted_level {
            let disputes = self.catalog().disputes_for_level(&level_id);
            let seconds = self.config().dispute.seconds_per_dispute;
            if let Some(round) = DisputeRound::new(&level_id, disputes, seconds) {
                self.world.insert_resource(DisputeSession {
                    round,
                    countdown: IntervalTimer::start(now, period),
                });
                debug!(level_id = %level_id, "dispute session opened");
            }
        }
    }

    fn go(&mut self, change: impl FnOnce(&mut Navigator)) -> IntentOutcome {
        change(&mut self.navigator);
        let now = self.now();
        self.sync_screen_resources(now);
        IntentOutcome::Navigated(self.navigator.current().clone())
    }

    fn require(&self, intent: &PlayerIntent, allowed: fn(&Screen) -> bool) -> Result<(), GameError> {
        if allowed(self.screen()) {
            Ok(())
        } else {
            Err(GameError::WrongScreen {
                intent: intent.name(),
                screen: self.screen().name(),
            })
        }
    }

    /// Apply one player intent after catching timers up to now.
    pub fn handle(&mut self, intent: PlayerIntent) -> Result<IntentOutcome, GameError> {
        self.pump();
        let result = self.dispatch(&intent);
        if let Err(err) = &result {
            warn!(intent = intent.name(), error = %err, "intent refused");
        }
        result
    }

    fn dispatch(&mut self, intent: &PlayerIntent) -> Result<IntentOutcome, GameError> {
        match intent {
            PlayerIntent::ContinueOnboarding => {
                let page = match self.screen() {
                    Screen::Onboarding { page } => *page,
                    other => {
                        return Err(GameError::WrongScreen {
                            intent: intent.name(),
                            screen: other.name(),
                        })
                    }
                };
                if page + 1 < self.catalog().onboarding.len() {
                    Ok(self.go(|nav| nav.replace(Screen::Onboarding { page: page + 1 })))
                } else {
                    Ok(self.go(|nav| nav.reset(Screen::MainMenu)))
                }
            }
            PlayerIntent::SkipOnboarding => {
                self.require(intent, |s| matches!(s, Screen::Onboarding { .. }))?;
                Ok(self.go(|nav| nav.reset(Screen::MainMenu)))
            }
            PlayerIntent::OpenMenu(item) => {
                self.require(intent, |s| matches!(s, Screen::MainMenu))?;
                let target = item.screen();
                Ok(self.go(|nav| nav.push(target)))
            }
            PlayerIntent::Back => {
                let mut moved = false;
                let outcome = self.go(|nav| moved = nav.back());
                Ok(if moved { outcome } else { IntentOutcome::Stayed })
            }
            PlayerIntent::EnterLevel { level_id } => {
                self.require(intent, |s| matches!(s, Screen::TownDisputes))?;
                self.enter_level(level_id)
            }
            PlayerIntent::ChooseAnswer { choice } => {
                self.require(intent, |s| matches!(s, Screen::DisputeGameplay { .. }))?;
                let now = self.now();
                let delay = self.config().dispute.advance_delay_ms;
                let mut session = self
                    .world
                    .get_resource_mut::<DisputeSession>()
                    .ok_or(GameError::NoActiveDispute)?;
                let dispute_index = session.round.index();
                session.round.select_choice(*choice, now, delay)?;
                Ok(IntentOutcome::ChoiceAccepted {
                    dispute_index,
                    choice: *choice,
                })
            }
            PlayerIntent::InspectBuilding { building_id } => {
                self.require(intent, |s| matches!(s, Screen::MyTown))?;
                let building = self
                    .catalog()
                    .building(building_id)
                    .ok_or_else(|| GameError::UnknownBuilding(building_id.clone()))?;
                Ok(IntentOutcome::Quote {
                    building_id: building.id.clone(),
                    text: building.quote.clone(),
                })
            }
            PlayerIntent::BuildingAction { building_id } => {
                self.require(intent, |s| matches!(s, Screen::MyTown))?;
                self.building_action(building_id)
            }
            PlayerIntent::StartConstruction { building_id } => {
                self.require(intent, |s| matches!(s, Screen::MyTown))?;
                self.start_construction(building_id)
            }
            PlayerIntent::OpenStory { story_id } => {
                self.require(intent, |s| matches!(s, Screen::Stories))?;
                let story = self
                    .catalog()
                    .story(story_id)
                    .cloned()
                    .ok_or_else(|| GameError::UnknownStory(story_id.clone()))?;
                if !self.state().is_story_unlocked(story_id) {
                    return Err(GameError::StoryLocked(story_id.clone()));
                }
                Ok(IntentOutcome::StoryOpened {
                    story,
                    recorded_view: false,
                })
            }
            PlayerIntent::ReturnToDisputes => {
                self.require(intent, |s| matches!(s, Screen::LevelComplete { .. }))?;
                Ok(self.go(|nav| nav.navigate(Screen::TownDisputes)))
            }
            PlayerIntent::ReturnToMenu => {
                self.require(intent, |s| matches!(s, Screen::LevelComplete { .. }))?;
                Ok(self.go(|nav| nav.navigate(Screen::MainMenu)))
            }
        }
    }

    fn enter_level(&mut self, level_id: &str) -> Result<IntentOutcome, GameError> {
        let catalog = self.catalog();
        if catalog.level(level_id).is_none() {
            return Err(GameError::UnknownLevel(level_id.to_string()));
        }
        if !is_level_unlocked(&catalog.levels, self.state(), level_id) {
            return Err(GameError::LevelLocked(level_id.to_string()));
        }
        if catalog.disputes_for_level(level_id).is_empty() {
            return Err(GameError::EmptyLevel(level_id.to_string()));
        }
        self.world
            .resource_mut::<GameStore>()
            .set_current_level(Some(level_id));
        let target = Screen::DisputeGameplay {
            level_id: level_id.to_string(),
        };
        Ok(self.go(|nav| nav.push(target)))
    }

    fn building_action(&mut self, building_id: &str) -> Result<IntentOutcome, GameError> {
        let building = self
            .catalog()
            .building(building_id)
            .cloned()
            .ok_or_else(|| GameError::UnknownBuilding(building_id.to_string()))?;
        let now = self.now();
        let evaluator = self.evaluator();
        match evaluator.phase(self.state(), building_id, now) {
            BuildingPhase::Unlocked => match evaluator.story_gate(self.state(), building_id, now) {
                StoryGate::Ready => {
                    let Some(story) = self.catalog().story(building_id).cloned() else {
                        return Ok(IntentOutcome::Stayed);
                    };
                    self.world
                        .resource_mut::<GameStore>()
                        .record_story_view(building_id);
                    self.events.push(GameEvent::StoryViewed {
                        building_id: building_id.to_string(),
                    });
                    Ok(IntentOutcome::StoryOpened {
                        story,
                        recorded_view: true,
                    })
                }
                StoryGate::Cooldown { remaining_ms } => Err(GameError::StoryOnCooldown {
                    building_id: building_id.to_string(),
                    remaining: format_cooldown_remaining(remaining_ms),
                }),
            },
            BuildingPhase::UnderConstruction(progress) => Err(GameError::UnderConstruction {
                building_id: building_id.to_string(),
                remaining: construction_text(progress),
            }),
            BuildingPhase::Locked => {
                let can_afford = self.state().resources.covers(&building.cost);
                Ok(IntentOutcome::BuildPrompt {
                    building,
                    can_afford,
                    duration_ms: evaluator.construction_duration_ms,
                })
            }
        }
    }

    fn start_construction(&mut self, building_id: &str) -> Result<IntentOutcome, GameError> {
        if self.catalog().building(building_id).is_none() {
            return Err(GameError::UnknownBuilding(building_id.to_string()));
        }
        let now = self.now();
        let evaluator = self.evaluator();
        match evaluator.phase(self.state(), building_id, now) {
            BuildingPhase::Unlocked => Err(GameError::AlreadyBuilt(building_id.to_string())),
            BuildingPhase::UnderConstruction(progress) => Err(GameError::UnderConstruction {
                building_id: building_id.to_string(),
                remaining: construction_text(progress),
            }),
            BuildingPhase::Locked => {
                self.world
                    .resource_mut::<GameStore>()
                    .start_building(building_id);
                info!(building = building_id, "construction started");
                self.events.push(GameEvent::ConstructionStarted {
                    building_id: building_id.to_string(),
                });
                Ok(IntentOutcome::ConstructionStarted {
                    building_id: building_id.to_string(),
                    completes_at: now.saturating_add(evaluator.construction_duration_ms),
                })
            }
        }
    }

    /// Capture everything the current screen needs to draw itself.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}

fn construction_text(progress: ConstructionProgress) -> String {
    match progress {
        ConstructionProgress::Remaining(ms) => format_construction_remaining(ms),
        ConstructionProgress::Complete => "Building...".to_string(),
    }
}

fn action_label(phase: BuildingPhase, gate: Option<StoryGate>) -> String {
    match phase {
        BuildingPhase::Locked => "Build".to_string(),
        BuildingPhase::UnderConstruction(progress) => construction_text(progress),
        BuildingPhase::Unlocked => match gate {
            Some(StoryGate::Cooldown { remaining_ms }) => format_cooldown_remaining(remaining_ms),
            _ => "Open".to_string(),
        },
    }
}

impl Snapshot {
    fn capture(game: &Game) -> Self {
        let now = game.now();
        let state = game.state();
        let catalog = game.catalog();
        let evaluator = game.evaluator();
        let screen = game.screen().clone();

        let buildings = catalog
            .buildings
            .iter()
            .map(|building| {
                let phase = evaluator.phase(state, &building.id, now);
                let story_gate = match phase {
                    BuildingPhase::Unlocked => Some(evaluator.story_gate(state, &building.id, now)),
                    _ => None,
                };
                BuildingSummary {
                    id: building.id.clone(),
                    title: building.title.clone(),
                    cost: building.cost,
                    position: building.position,
                    phase,
                    story_gate,
                    action_label: action_label(phase, story_gate),
                    can_afford: state.resources.covers(&building.cost),
                }
            })
            .collect();

        let stories = catalog
            .stories
            .iter()
            .map(|story| StorySummary {
                id: story.id.clone(),
                heading: story.heading(),
                unlocked: state.is_story_unlocked(&story.id),
            })
            .collect();

        let onboarding = match &screen {
            Screen::Onboarding { page } => catalog.onboarding.get(*page).cloned(),
            _ => None,
        };

        let dispute = game.dispute_round().and_then(|round| {
            let current = round.current()?;
            Some(DisputeSummary {
                level_id: round.level_id().to_string(),
                level_title: catalog
                    .level(round.level_id())
                    .map(|level| level.title.clone())
                    .unwrap_or_else(|| round.level_id().to_string()),
                index: round.index(),
                total: round.len(),
                seconds_left: round.seconds_left(),
                text: current.text.clone(),
                choices: current.choices.iter().map(|c| c.text.clone()).collect(),
                selected: round.selected(),
            })
        });

        Snapshot {
            screen,
            now,
            resources: state.resources,
            onboarding,
            onboarding_pages: catalog.onboarding.len(),
            buildings,
            stories,
            levels: level_statuses(&catalog.levels, state),
            dispute,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;

    fn game() -> (Game, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(1_000_000));
        let game = Game::new(GameConfig::default(), ContentCatalog::builtin(), clock.clone());
        (game, clock)
    }

    #[test]
    fn onboarding_walks_three_pages_into_menu() {
        let (mut game, _clock) = game();
        assert_eq!(game.screen(), &Screen::Onboarding { page: 0 });
        game.handle(PlayerIntent::ContinueOnboarding).unwrap();
        game.handle(PlayerIntent::ContinueOnboarding).unwrap();
        assert_eq!(game.screen(), &Screen::Onboarding { page: 2 });
        game.handle(PlayerIntent::ContinueOnboarding).unwrap();
        assert_eq!(game.screen(), &Screen::MainMenu);
        assert_eq!(game.handle(PlayerIntent::Back).unwrap(), IntentOutcome::Stayed);
    }

    #[test]
    fn skip_goes_straight_to_menu() {
        let (mut game, _clock) = game();
        game.handle(PlayerIntent::SkipOnboarding).unwrap();
        assert_eq!(game.screen(), &Screen::MainMenu);
    }

    #[test]
    fn intents_outside_their_screen_are_refused() {
        let (mut game, _clock) = game();
        let err = game
            .handle(PlayerIntent::StartConstruction {
                building_id: "saloon".into(),
            })
            .unwrap_err();
        assert_eq!(
            err,
            GameError::WrongScreen {
                intent: "start construction",
                screen: "Onboarding"
            }
        );
        assert!(!game.state().is_under_construction("saloon"));
    }

    #[test]
    fn town_timer_exists_only_on_town_screen() {
        let (mut game, _clock) = game();
        game.handle(PlayerIntent::SkipOnboarding).unwrap();
        assert!(!game.construction_timer_active());
        game.handle(PlayerIntent::OpenMenu(MenuItem::MyTown)).unwrap();
        assert!(game.construction_timer_active());
        game.handle(PlayerIntent::Back).unwrap();
        assert!(!game.construction_timer_active());
    }

    #[test]
    fn snapshot_labels_follow_building_phase() {
        let (mut game, clock) = game();
        game.handle(PlayerIntent::SkipOnboarding).unwrap();
        game.handle(PlayerIntent::OpenMenu(MenuItem::MyTown)).unwrap();
        game.handle(PlayerIntent::StartConstruction {
            building_id: "saloon".into(),
        })
        .unwrap();
        clock.advance(65_000);

        let snapshot = game.snapshot();
        let label = |id: &str| {
            snapshot
                .buildings
                .iter()
                .find(|b| b.id == id)
                .map(|b| b.action_label.clone())
                .unwrap()
        };
        assert_eq!(label("settlers-house"), "Open");
        assert_eq!(label("saloon"), "28:55");
        assert_eq!(label("doctors-hut"), "Build");
    }

    #[test]
    fn save_and_load_replace_progress() {
        let (mut game, _clock) = game();
        let mut save = game.save_state();
        save.state.resources = Resources::new(1, 2);
        save.state.completed_levels.push("ranch-disputes".into());
        game.load_state(save);
        assert_eq!(game.state().resources, Resources::new(1, 2));
        assert!(game.state().is_level_completed("ranch-disputes"));
    }
}
