use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use bevy_utils::tracing::{info, warn};
use clap::Parser;

use frontier_town::config::GameConfig;
use frontier_town::core::clock::SystemClock;
use frontier_town::core::serialization::{load_state_from_path, save_state_to_path};
use frontier_town::core::world::{Game, GameError, IntentOutcome, PlayerIntent};
use frontier_town::data::{load_content_catalog, ContentCatalog};
use frontier_town::simulation::state::GameState;
use frontier_town::systems::events::GameEvent;
use frontier_town::ui::navigation::{MenuItem, Screen};
use frontier_town::ui::render::{render_screen, render_story};
use frontier_town::world::{TownDb, TownRepository};

const COMMANDS: &str = "Commands: look | next | skip | menu <talks|town|stories|resources> | back | enter <level> | choose <n> | inspect <building> | act <building> | build <building> | read <story> | disputes | home | wait | export <path> | import <path> | save | quit";

#[derive(Parser, Debug)]
#[command(author, version, about = "Frontier town builder and dispute mediator", long_about = None)]
struct Cli {
    /// JSON file overriding game tunables.
    #[arg(long, env = "FRONTIER_TOWN_CONFIG")]
    config: Option<PathBuf>,

    /// JSON content catalog replacing the built-in tables.
    #[arg(long)]
    content: Option<PathBuf>,

    /// SQLite file to load progress from and save it to.
    #[arg(long)]
    save: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match GameConfig::from_file(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Failed to load config: {}", err);
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    let catalog = match &cli.content {
        Some(path) => match load_content_catalog(path) {
            Ok(catalog) => catalog,
            Err(err) => {
                eprintln!("Failed to load content: {}", err);
                std::process::exit(1);
            }
        },
        None => ContentCatalog::builtin(),
    };

    let mut repo: Option<Box<dyn TownRepository>> = match &cli.save {
        Some(path) => match TownDb::open(path) {
            Ok(db) => Some(Box::new(db)),
            Err(err) => {
                eprintln!("Failed to open save DB: {}", err);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let state = match repo.as_mut() {
        Some(repo) => match repo.load_or_init(&config) {
            Ok(state) => state,
            Err(err) => {
                warn!(error = %err, "failed to load saved town, starting fresh");
                GameState::initial(&config)
            }
        },
        None => GameState::initial(&config),
    };

    let mut game = Game::with_state(config, catalog, Arc::new(SystemClock), state);
    println!("{}", render_screen(&game.snapshot(), game.config()));
    println!("{}", COMMANDS);

    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let trimmed = input.trim();
        if trimmed.is_empty() {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or("").to_lowercase();
        let arg = parts.next();

        let intent = match cmd.as_str() {
            "quit" | "exit" => break,
            "help" => {
                println!("{}", COMMANDS);
                continue;
            }
            "look" | "wait" => None,
            "save" => {
                persist(repo.as_mut(), &game);
                continue;
            }
            "export" => {
                match arg {
                    Some(path) => match save_state_to_path(&game.save_state(), path) {
                        Ok(()) => println!("Exported progress to {}", path),
                        Err(err) => println!("Export failed: {}", err),
                    },
                    None => println!("Usage: export <path>"),
                }
                continue;
            }
            "import" => {
                match arg {
                    Some(path) => match load_state_from_path(path) {
                        Ok(save) => {
                            game.load_state(save);
                            println!("Imported progress from {}", path);
                        }
                        Err(err) => println!("Import failed: {}", err),
                    },
                    None => println!("Usage: import <path>"),
                }
                continue;
            }
            "next" => Some(PlayerIntent::ContinueOnboarding),
            "skip" => Some(PlayerIntent::SkipOnboarding),
            "back" => Some(PlayerIntent::Back),
            "disputes" => Some(PlayerIntent::ReturnToDisputes),
            "home" => Some(PlayerIntent::ReturnToMenu),
            "menu" => match arg.and_then(parse_menu_item) {
                Some(item) => Some(PlayerIntent::OpenMenu(item)),
                None => {
                    println!("Usage: menu <talks|town|stories|resources>");
                    continue;
                }
            },
            "enter" => match arg.and_then(|raw| resolve_level(&game, raw)) {
                Some(level_id) => Some(PlayerIntent::EnterLevel { level_id }),
                None => {
                    println!("Usage: enter <level id or number>");
                    continue;
                }
            },
            "choose" => match arg.and_then(|raw| raw.parse::<usize>().ok()) {
                Some(n) if n >= 1 => Some(PlayerIntent::ChooseAnswer { choice: n - 1 }),
                _ => {
                    println!("Usage: choose <n>");
                    continue;
                }
            },
            "inspect" | "act" | "build" | "read" => {
                let Some(id) = arg else {
                    println!("Usage: {} <id>", cmd);
                    continue;
                };
                let id = id.to_string();
                Some(match cmd.as_str() {
                    "inspect" => PlayerIntent::InspectBuilding { building_id: id },
                    "act" => PlayerIntent::BuildingAction { building_id: id },
                    "build" => PlayerIntent::StartConstruction { building_id: id },
                    _ => PlayerIntent::OpenStory { story_id: id },
                })
            }
            _ => {
                println!("Unknown command: {}", cmd);
                continue;
            }
        };

        match intent {
            Some(intent) => match game.handle(intent) {
                Ok(outcome) => print_outcome(&outcome),
                Err(err) => print_refusal(&err),
            },
            None => game.pump(),
        }
        print_events(&game.take_events());
        println!("{}", render_screen(&game.snapshot(), game.config()));
    }

    persist(repo.as_mut(), &game);
}

fn persist(repo: Option<&mut Box<dyn TownRepository>>, game: &Game) {
    let Some(repo) = repo else {
        return;
    };
    match repo.save_state(game.state()) {
        Ok(()) => {
            info!("town saved");
            println!("Town saved.");
        }
        Err(err) => println!("Save failed: {}", err),
    }
}

fn parse_menu_item(raw: &str) -> Option<MenuItem> {
    match raw.to_lowercase().as_str() {
        "talks" | "disputes" | "1" => Some(MenuItem::FrontierTalks),
        "town" | "2" => Some(MenuItem::MyTown),
        "stories" | "3" => Some(MenuItem::Stories),
        "resources" | "4" => Some(MenuItem::Resources),
        _ => None,
    }
}

fn resolve_level(game: &Game, raw: &str) -> Option<String> {
    let levels = &game.catalog().levels;
    if let Ok(number) = raw.parse::<u32>() {
        return levels
            .iter()
            .find(|level| level.number == number)
            .map(|level| level.id.clone());
    }
    Some(raw.to_string())
}

fn print_outcome(outcome: &IntentOutcome) {
    match outcome {
        IntentOutcome::Navigated(screen) => {
            if let Screen::DisputeGameplay { level_id } = screen {
                println!("Entering {}", level_id);
            }
        }
        IntentOutcome::Stayed => {}
        IntentOutcome::Quote { text, .. } => println!("\"{}\"", text),
        IntentOutcome::StoryOpened { story, .. } => print!("{}", render_story(story)),
        IntentOutcome::BuildPrompt {
            building,
            can_afford,
            duration_ms,
        } => {
            println!(
                "{} costs {} stone and {} wood{}. Building will take {} minutes. Type `build {}` to start.",
                building.title,
                building.cost.stone,
                building.cost.wood,
                if *can_afford { "" } else { " (you are short)" },
                duration_ms / 60_000,
                building.id
            );
        }
        IntentOutcome::ConstructionStarted { building_id, .. } => {
            println!("Construction of {} started.", building_id)
        }
        IntentOutcome::ChoiceAccepted { choice, .. } => println!("You chose {}.", choice + 1),
    }
}

fn print_refusal(err: &GameError) {
    println!("Not now: {}", err);
}

fn print_events(events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::ConstructionFinished { building_id } => {
                println!("* {} is finished.", building_id)
            }
            GameEvent::CountdownExpired { .. } => println!("* Time is up."),
            GameEvent::LevelCompleted { reward, .. } => println!(
                "* Level complete: +{} stone, +{} wood.",
                reward.stone, reward.wood
            ),
            _ => {}
        }
    }
}
