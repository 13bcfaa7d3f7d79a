use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Onboarding { page: usize },
    MainMenu,
    TownDisputes,
    DisputeGameplay { level_id: String },
    LevelComplete { level_id: String },
    MyTown,
    Stories,
    Resources,
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Onboarding { .. } => "Onboarding",
            Screen::MainMenu => "MainMenu",
            Screen::TownDisputes => "TownDisputes",
            Screen::DisputeGameplay { .. } => "DisputeGameplay",
            Screen::LevelComplete { .. } => "LevelComplete",
            Screen::MyTown => "MyTown",
            Screen::Stories => "Stories",
            Screen::Resources => "Resources",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    FrontierTalks,
    MyTown,
    Stories,
    Resources,
}

impl MenuItem {
    pub const ALL: [MenuItem; 4] = [
        MenuItem::FrontierTalks,
        MenuItem::MyTown,
        MenuItem::Stories,
        MenuItem::Resources,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::FrontierTalks => "FRONTIER TALKS",
            MenuItem::MyTown => "MY TOWN",
            MenuItem::Stories => "STORIES",
            MenuItem::Resources => "RESOURCES",
        }
    }

    pub fn screen(self) -> Screen {
        match self {
            MenuItem::FrontierTalks => Screen::TownDisputes,
            MenuItem::MyTown => Screen::MyTown,
            MenuItem::Stories => Screen::Stories,
            MenuItem::Resources => Screen::Resources,
        }
    }
}

/// Stack navigator. The stack is never empty.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Screen>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Screen::Onboarding { page: 0 })
    }
}

impl Navigator {
    pub fn new(root: Screen) -> Self {
        Self { stack: vec![root] }
    }

    pub fn current(&self) -> &Screen {
        // The stack always holds at least the root.
        &self.stack[self.stack.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn push(&mut self, screen: Screen) {
        self.stack.push(screen);
    }

    pub fn replace(&mut self, screen: Screen) {
        let top = self.stack.len() - 1;
        self.stack[top] = screen;
    }

    /// Pop the top screen. Returns false on the root.
    pub fn back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    /// Go to `screen`: pop back to an existing entry of the same kind
    /// (taking the new parameters), otherwise push it.
    pub fn navigate(&mut self, screen: Screen) {
        if let Some(pos) = self
            .stack
            .iter()
            .rposition(|entry| entry.name() == screen.name())
        {
            self.stack.truncate(pos + 1);
            self.replace(screen);
        } else {
            self.push(screen);
        }
    }

    /// Drop the whole history and start again from `screen`.
    pub fn reset(&mut self, screen: Screen) {
        self.stack.clear();
        self.stack.push(screen);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_stops_at_root() {
        let mut nav = Navigator::new(Screen::MainMenu);
        assert!(!nav.back());
        nav.push(Screen::Stories);
        assert!(nav.back());
        assert_eq!(nav.current(), &Screen::MainMenu);
    }

    #[test]
    fn navigate_pops_to_existing_screen() {
        let mut nav = Navigator::new(Screen::MainMenu);
        nav.push(Screen::TownDisputes);
        nav.push(Screen::DisputeGameplay {
            level_id: "ranch-disputes".into(),
        });
        nav.replace(Screen::LevelComplete {
            level_id: "ranch-disputes".into(),
        });
        nav.navigate(Screen::TownDisputes);
        assert_eq!(nav.current(), &Screen::TownDisputes);
        assert_eq!(nav.depth(), 2);

        nav.navigate(Screen::MyTown);
        assert_eq!(nav.depth(), 3);
    }

    #[test]
    fn replace_keeps_depth() {
        let mut nav = Navigator::new(Screen::MainMenu);
        nav.push(Screen::DisputeGameplay {
            level_id: "ranch-disputes".into(),
        });
        nav.replace(Screen::LevelComplete {
            level_id: "ranch-disputes".into(),
        });
        assert_eq!(nav.depth(), 2);
        assert!(nav.back());
        assert_eq!(nav.current(), &Screen::MainMenu);
    }

    #[test]
    fn menu_items_map_to_screens() {
        assert_eq!(MenuItem::FrontierTalks.screen(), Screen::TownDisputes);
        assert_eq!(MenuItem::ALL.len(), 4);
    }
}
