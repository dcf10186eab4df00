use serde::Serialize;
use tracing::debug;

/// Top-level views. Exactly one is mounted at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Upload,
    Review,
    Jobs,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Upload, Tab::Review, Tab::Jobs];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Upload => "Upload Resume",
            Tab::Review => "Review Score",
            Tab::Jobs => "Job Suggestions",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Shell {
    active: Tab,
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn select(&mut self, tab: Tab) {
        debug!("Switching view {:?} -> {:?}", self.active, tab);
        self.active = tab;
    }

    /// Called once the upload workflow succeeds.
    pub fn upload_completed(&mut self) {
        self.select(Tab::Review);
    }

    /// One-line tab bar with the active view bracketed.
    pub fn render_nav(&self) -> String {
        Tab::ALL
            .iter()
            .map(|tab| {
                if *tab == self.active {
                    format!("[{}]", tab.label())
                } else {
                    tab.label().to_string()
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    }
}
