//! Ports to the user-facing shell: confirmation prompts and notices.

use crate::model::mood::Mood;
use crate::timer::pomodoro::PomodoroMode;
use log::info;
use std::fmt::{Display, Formatter};

/// Blocking yes/no prompt shown before destructive actions.
pub trait Confirmer {
    fn confirm(&self, message: &str) -> bool;
}

/// Alert-style message sink.
pub trait Notifier {
    fn notify(&self, notice: &Notice);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Add or edit was attempted with blank text.
    EmptyInput,
    PomodoroFinished(PomodoroMode),
    MoodLogged(Mood),
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => f.write_str("Please enter a value"),
            Self::PomodoroFinished(mode) => write!(f, "Pomodoro {mode} finished!"),
            Self::MoodLogged(mood) => write!(f, "Logged mood: {} {}", mood.label(), mood.emoji()),
        }
    }
}

/// Confirmer with a fixed answer, for headless shells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticConfirmer(pub bool);

impl Confirmer for StaticConfirmer {
    fn confirm(&self, _message: &str) -> bool {
        self.0
    }
}

/// Notifier that records notices in the log instead of showing them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &Notice) {
        let kind = match notice {
            Notice::EmptyInput => "empty_input",
            Notice::PomodoroFinished(_) => "pomodoro_finished",
            Notice::MoodLogged(_) => "mood_logged",
        };
        info!("event=notice module=port status=ok kind={kind}");
    }
}

#[cfg(test)]
mod tests {
    use super::Notice;
    use crate::model::mood::Mood;
    use crate::timer::pomodoro::PomodoroMode;

    #[test]
    fn notices_render_user_facing_messages() {
        assert_eq!(Notice::EmptyInput.to_string(), "Please enter a value");
        assert_eq!(
            Notice::PomodoroFinished(PomodoroMode::ShortBreak).to_string(),
            "Pomodoro short-break finished!"
        );
        assert_eq!(
            Notice::MoodLogged(Mood::Happy).to_string(),
            "Logged mood: Happy \u{1F60A}"
        );
    }
}
