//! Practice session: the state behind every button
//!
//! A `Session` is owned by the event loop task and only mutated there, so it
//! holds its parts directly instead of behind locks.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{AlarmSchedule, TimerState, TimerStatus, View, ViewSwitcher};
use crate::{
    engine::{
        parse_duration, AlarmNotifier, Fired, IgnoreReason, ScheduledEvent, Scheduler,
        TimeUnit, TimerEngine, TimerOutcome,
    },
    services::{FolderSelection, PictureSource},
};

/// User actions, one per control of the practice surface
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// New picture and a fresh countdown from the given amount
    Start { amount: String, unit: TimeUnit },
    Pause,
    Resume,
    /// The pause/resume button
    TogglePause,
    /// Flip between picker and picture without touching the timer
    ToggleView,
    SelectFolder(FolderSelection),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Start { .. } => "start",
            Action::Pause => "pause",
            Action::Resume => "resume",
            Action::TogglePause => "toggle-pause",
            Action::ToggleView => "toggle-view",
            Action::SelectFolder(_) => "select-folder",
        }
    }
}

/// What an action did
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Applied(String),
    Ignored(IgnoreReason),
}

impl ActionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ActionOutcome::Applied(_))
    }

    pub fn message(&self) -> String {
        match self {
            ActionOutcome::Applied(message) => message.clone(),
            ActionOutcome::Ignored(reason) => format!("Ignored: {}", reason),
        }
    }
}

/// Point-in-time view of the session, published after every change
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub timer: TimerState,
    /// Countdown text, e.g. "4:59"
    pub display: String,
    pub view: View,
    pub folder: FolderSelection,
    pub picture: Option<PathBuf>,
    pub alarm: AlarmSchedule,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

#[derive(Debug)]
pub struct Session {
    timer: TimerEngine,
    view: ViewSwitcher,
    alarm: AlarmNotifier,
    pictures: PictureSource,
    folder: FolderSelection,
    picture: Option<PathBuf>,
    last_action: Option<String>,
    last_action_time: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(pictures: PictureSource, alarm: AlarmNotifier) -> Self {
        Self {
            timer: TimerEngine::new(),
            view: ViewSwitcher::new(),
            alarm,
            pictures,
            folder: FolderSelection::All,
            picture: None,
            last_action: None,
            last_action_time: None,
        }
    }

    pub fn timer(&self) -> &TimerEngine {
        &self.timer
    }

    pub fn view(&self) -> View {
        self.view.active()
    }

    pub fn alarm(&self) -> &AlarmNotifier {
        &self.alarm
    }

    pub fn picture(&self) -> Option<&PathBuf> {
        self.picture.as_ref()
    }

    pub fn folder(&self) -> &FolderSelection {
        &self.folder
    }

    /// Apply one user action
    pub fn apply<S: Scheduler>(&mut self, action: Action, scheduler: &mut S) -> ActionOutcome {
        let name = action.name();
        let outcome = match action {
            Action::Start { amount, unit } => self.start(&amount, unit, scheduler),
            Action::Pause => self.pause(scheduler),
            Action::Resume => self.resume(scheduler),
            Action::TogglePause => match self.timer.state().status {
                TimerStatus::Running => self.pause(scheduler),
                TimerStatus::Paused => self.resume(scheduler),
                _ => ActionOutcome::Ignored(IgnoreReason::NotRunning),
            },
            Action::ToggleView => {
                let view = self.view.toggle();
                ActionOutcome::Applied(format!("Showing {:?}", view))
            }
            Action::SelectFolder(folder) => {
                info!("Folder selected: {:?}", folder);
                self.folder = folder;
                ActionOutcome::Applied("Folder selected".to_string())
            }
        };

        if outcome.is_applied() {
            self.last_action = Some(name.to_string());
            self.last_action_time = Some(Utc::now());
        } else {
            debug!("Action {} ignored: {}", name, outcome.message());
        }
        outcome
    }

    /// Handle a scheduled callback that came due
    pub fn on_fired<S: Scheduler>(&mut self, fired: Fired, scheduler: &mut S) {
        match fired.event {
            ScheduledEvent::Tick => {
                if self.timer.on_tick(fired.id, scheduler) == TimerOutcome::Expired {
                    let repeats = self.alarm.repeats();
                    self.alarm.trigger(repeats, scheduler);
                }
            }
            ScheduledEvent::AlarmRepeat { repeats } => {
                self.alarm.on_repeat(repeats, scheduler);
            }
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let timer = self.timer.state().clone();
        Snapshot {
            display: timer.display(),
            timer,
            view: self.view.active(),
            folder: self.folder.clone(),
            picture: self.picture.clone(),
            alarm: *self.alarm.schedule(),
            last_action: self.last_action.clone(),
            last_action_time: self.last_action_time,
        }
    }

    fn start<S: Scheduler>(&mut self, amount: &str, unit: TimeUnit, scheduler: &mut S) -> ActionOutcome {
        let duration = match parse_duration(amount, unit) {
            Ok(duration) => duration,
            Err(e) => return ActionOutcome::Ignored(e.into()),
        };

        match self.pictures.pick_random(&self.folder) {
            Some(picture) => {
                info!("Showing picture {}", picture.display());
                self.picture = Some(picture);
                self.view.show_picture();
            }
            None => debug!("No picture available, keeping the current display"),
        }

        match self.timer.start(duration, scheduler) {
            TimerOutcome::Ignored(reason) => ActionOutcome::Ignored(reason),
            _ => ActionOutcome::Applied(format!(
                "Countdown started at {}",
                self.timer.state().display()
            )),
        }
    }

    fn pause<S: Scheduler>(&mut self, scheduler: &mut S) -> ActionOutcome {
        match self.timer.pause(scheduler) {
            TimerOutcome::Ignored(reason) => ActionOutcome::Ignored(reason),
            _ => {
                self.view.show_picker();
                ActionOutcome::Applied(format!(
                    "Countdown paused at {}",
                    self.timer.state().display()
                ))
            }
        }
    }

    fn resume<S: Scheduler>(&mut self, scheduler: &mut S) -> ActionOutcome {
        match self.timer.resume(scheduler) {
            TimerOutcome::Ignored(reason) => ActionOutcome::Ignored(reason),
            _ => {
                self.view.show_picture();
                ActionOutcome::Applied(format!(
                    "Countdown resumed at {}",
                    self.timer.state().display()
                ))
            }
        }
    }
}
