use serde::{Deserialize, Serialize};

/// Collapsible sections of the booking modal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Date,
    Time,
    Language,
    Options,
    Participants,
    Addons,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::Date,
        Step::Time,
        Step::Language,
        Step::Options,
        Step::Participants,
        Step::Addons,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Date => "date",
            Step::Time => "time",
            Step::Language => "language",
            Step::Options => "options",
            Step::Participants => "participants",
            Step::Addons => "addons",
        }
    }

    fn index(&self) -> usize {
        Step::ALL.iter().position(|s| s == self).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct StepPanel {
    pub collapsed: bool,
    pub active: bool,
}

/// Open/closed state of every step section
#[derive(Debug, Clone, Default)]
pub struct StepPanels {
    panels: [StepPanel; 6],
}

impl StepPanels {
    pub fn get(&self, step: Step) -> StepPanel {
        self.panels[step.index()]
    }

    /// A step whose summary changed stays expanded while editing a cart item
    pub fn keep_open(&mut self, step: Step) -> StepPanel {
        let panel = &mut self.panels[step.index()];
        panel.collapsed = false;
        panel.active = true;
        *panel
    }

    /// Header click: clears `active` everywhere, then flips the clicked step.
    /// Returns the new state of every panel.
    pub fn toggle_header(&mut self, step: Step) -> Vec<(Step, StepPanel)> {
        let was_collapsed = self.get(step).collapsed;
        for panel in self.panels.iter_mut() {
            panel.active = false;
        }
        let panel = &mut self.panels[step.index()];
        panel.collapsed = !was_collapsed;
        panel.active = was_collapsed;

        Step::ALL.iter().map(|s| (*s, self.get(*s))).collect()
    }
}
