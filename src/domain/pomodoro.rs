use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

pub const WORK_DURATION_RANGE: RangeInclusive<u32> = 1..=60;
pub const BREAK_DURATION_RANGE: RangeInclusive<u32> = 1..=30;
pub const LONG_BREAK_DURATION_RANGE: RangeInclusive<u32> = 1..=60;
pub const LONG_BREAK_INTERVAL_RANGE: RangeInclusive<u32> = 1..=10;
pub const VOLUME_RANGE: RangeInclusive<u8> = 0..=100;

/// Countdown mode of the pomodoro timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    Work,
    ShortBreak,
    LongBreak,
}

impl Mode {
    /// Get the display name for this mode
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Work => "Focus",
            Mode::ShortBreak => "Short Break",
            Mode::LongBreak => "Long Break",
        }
    }

    pub fn is_break(&self) -> bool {
        !matches!(self, Mode::Work)
    }

    /// Get all modes as a list
    pub fn all() -> &'static [Mode] {
        &[Mode::Work, Mode::ShortBreak, Mode::LongBreak]
    }
}

/// User-editable timer settings. Durations are whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub work_duration: u32,
    pub break_duration: u32,
    pub long_break_duration: u32,
    /// Completed work sessions between long breaks
    pub long_break_interval: u32,
    pub auto_start_breaks: bool,
    pub auto_start_pomodoros: bool,
    /// 0-100
    pub notification_volume: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work_duration: 25,
            break_duration: 5,
            long_break_duration: 15,
            long_break_interval: 4,
            auto_start_breaks: true,
            auto_start_pomodoros: false,
            notification_volume: 50,
        }
    }
}

fn clamp_to(value: u32, range: &RangeInclusive<u32>) -> u32 {
    value.clamp(*range.start(), *range.end())
}

impl Settings {
    /// Force every field into its allowed range
    pub fn clamped(self) -> Self {
        Self {
            work_duration: clamp_to(self.work_duration, &WORK_DURATION_RANGE),
            break_duration: clamp_to(self.break_duration, &BREAK_DURATION_RANGE),
            long_break_duration: clamp_to(self.long_break_duration, &LONG_BREAK_DURATION_RANGE),
            long_break_interval: clamp_to(self.long_break_interval, &LONG_BREAK_INTERVAL_RANGE),
            notification_volume: self
                .notification_volume
                .clamp(*VOLUME_RANGE.start(), *VOLUME_RANGE.end()),
            ..self
        }
    }

    /// Configured length of a mode in minutes
    pub fn duration_minutes(&self, mode: Mode) -> u32 {
        match mode {
            Mode::Work => self.work_duration,
            Mode::ShortBreak => self.break_duration,
            Mode::LongBreak => self.long_break_duration,
        }
    }

    /// Configured length of a mode in seconds
    pub fn duration_seconds(&self, mode: Mode) -> u32 {
        self.duration_minutes(mode) * 60
    }

    /// Return a copy with one field nudged by `delta` steps (toggles flip on any delta)
    pub fn adjusted(self, field: SettingField, delta: i32) -> Self {
        let step = |value: u32| (value as i64 + delta as i64).max(0) as u32;
        let mut next = self;
        match field {
            SettingField::WorkDuration => next.work_duration = step(self.work_duration),
            SettingField::BreakDuration => next.break_duration = step(self.break_duration),
            SettingField::LongBreakDuration => {
                next.long_break_duration = step(self.long_break_duration)
            }
            SettingField::LongBreakInterval => {
                next.long_break_interval = step(self.long_break_interval)
            }
            SettingField::NotificationVolume => {
                let volume = (self.notification_volume as i32 + delta).clamp(0, 100);
                next.notification_volume = volume as u8;
            }
            SettingField::AutoStartBreaks => {
                if delta != 0 {
                    next.auto_start_breaks = !self.auto_start_breaks;
                }
            }
            SettingField::AutoStartPomodoros => {
                if delta != 0 {
                    next.auto_start_pomodoros = !self.auto_start_pomodoros;
                }
            }
        }
        next.clamped()
    }

    /// Human-readable value of one field (for the settings modal)
    pub fn display_value(&self, field: SettingField) -> String {
        let on_off = |b: bool| if b { "On" } else { "Off" }.to_string();
        match field {
            SettingField::WorkDuration => format!("{} min", self.work_duration),
            SettingField::BreakDuration => format!("{} min", self.break_duration),
            SettingField::LongBreakDuration => format!("{} min", self.long_break_duration),
            SettingField::LongBreakInterval => {
                format!("every {} pomodoros", self.long_break_interval)
            }
            SettingField::NotificationVolume => format!("{}%", self.notification_volume),
            SettingField::AutoStartBreaks => on_off(self.auto_start_breaks),
            SettingField::AutoStartPomodoros => on_off(self.auto_start_pomodoros),
        }
    }
}

/// One editable row of the settings modal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    WorkDuration,
    BreakDuration,
    LongBreakDuration,
    LongBreakInterval,
    NotificationVolume,
    AutoStartBreaks,
    AutoStartPomodoros,
}

impl SettingField {
    pub fn label(&self) -> &'static str {
        match self {
            SettingField::WorkDuration => "Focus Duration",
            SettingField::BreakDuration => "Short Break",
            SettingField::LongBreakDuration => "Long Break",
            SettingField::LongBreakInterval => "Long Break Interval",
            SettingField::NotificationVolume => "Notification Volume",
            SettingField::AutoStartBreaks => "Auto-start Breaks",
            SettingField::AutoStartPomodoros => "Auto-start Pomodoros",
        }
    }

    pub fn all() -> &'static [SettingField] {
        &[
            SettingField::WorkDuration,
            SettingField::BreakDuration,
            SettingField::LongBreakDuration,
            SettingField::LongBreakInterval,
            SettingField::NotificationVolume,
            SettingField::AutoStartBreaks,
            SettingField::AutoStartPomodoros,
        ]
    }
}

/// Emitted by `Pomodoro::tick` when a countdown runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// Mode whose countdown just finished
    pub finished: Mode,
    /// Mode the timer moved to
    pub next: Mode,
    /// Whether the next countdown started without user action
    pub auto_started: bool,
    /// Volume for the audible cue
    pub volume: u8,
    pub completed_work_sessions: u32,
}

/// The pomodoro countdown state machine.
///
/// Knows nothing about wall-clock time or rendering: the owner calls `tick`
/// once per elapsed second while the timer is active.
#[derive(Debug, Clone)]
pub struct Pomodoro {
    mode: Mode,
    remaining_seconds: u32,
    is_active: bool,
    settings: Settings,
    completed_work_sessions: u32,
}

impl Default for Pomodoro {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Pomodoro {
    /// Fresh timer: Work mode, full work duration, inactive
    pub fn new(settings: Settings) -> Self {
        Self::with_completed_sessions(settings, 0)
    }

    /// Fresh countdown that keeps a previously saved session counter
    pub fn with_completed_sessions(settings: Settings, completed_work_sessions: u32) -> Self {
        let settings = settings.clamped();
        Self {
            mode: Mode::Work,
            remaining_seconds: settings.duration_seconds(Mode::Work),
            is_active: false,
            settings,
            completed_work_sessions,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn completed_work_sessions(&self) -> u32 {
        self.completed_work_sessions
    }

    /// Full length of a mode under the current settings, in seconds
    pub fn mode_duration_seconds(&self, mode: Mode) -> u32 {
        self.settings.duration_seconds(mode)
    }

    pub fn start(&mut self) {
        self.is_active = true;
    }

    pub fn pause(&mut self) {
        self.is_active = false;
    }

    /// Start if paused, pause if running
    pub fn toggle(&mut self) {
        if self.is_active {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Stop and rewind the current mode to its full duration
    pub fn reset(&mut self) {
        self.is_active = false;
        self.remaining_seconds = self.mode_duration_seconds(self.mode);
    }

    /// Jump to `target`, stopped, with its full duration
    pub fn switch_mode(&mut self, target: Mode) {
        self.is_active = false;
        self.mode = target;
        self.remaining_seconds = self.mode_duration_seconds(target);
    }

    /// Replace the settings. A running countdown keeps its remaining time;
    /// new durations apply at the next reset, switch or transition.
    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings.clamped();
    }

    /// Advance the countdown by one second.
    ///
    /// The tick that takes the clock to zero fires the mode transition and
    /// returns the completion event. Does nothing while inactive.
    pub fn tick(&mut self) -> Option<Completion> {
        if !self.is_active {
            return None;
        }

        if self.remaining_seconds > 1 {
            self.remaining_seconds -= 1;
            return None;
        }

        self.remaining_seconds = 0;
        Some(self.complete())
    }

    fn complete(&mut self) -> Completion {
        self.is_active = false;
        let finished = self.mode;

        let (next, auto_start) = match finished {
            Mode::Work => {
                self.completed_work_sessions += 1;
                let next = if self.completed_work_sessions % self.settings.long_break_interval == 0 {
                    Mode::LongBreak
                } else {
                    Mode::ShortBreak
                };
                (next, self.settings.auto_start_breaks)
            }
            Mode::ShortBreak | Mode::LongBreak => (Mode::Work, self.settings.auto_start_pomodoros),
        };

        self.mode = next;
        self.remaining_seconds = self.mode_duration_seconds(next);
        self.is_active = auto_start;

        Completion {
            finished,
            next,
            auto_started: auto_start,
            volume: self.settings.notification_volume,
            completed_work_sessions: self.completed_work_sessions,
        }
    }

    /// Clock display as "MM:SS"
    pub fn formatted_time(&self) -> String {
        format_clock(self.remaining_seconds)
    }

    /// Work sessions left before the next long break
    pub fn sessions_until_long_break(&self) -> u32 {
        let interval = self.settings.long_break_interval;
        interval - self.completed_work_sessions % interval
    }

    /// Total focused minutes across completed work sessions
    pub fn focused_minutes(&self) -> u32 {
        self.completed_work_sessions * self.settings.work_duration
    }

    /// Fraction of the current countdown already elapsed (0.0 to 1.0)
    pub fn progress_ratio(&self) -> f64 {
        let total = self.mode_duration_seconds(self.mode);
        if total == 0 || self.remaining_seconds >= total {
            return 0.0;
        }
        1.0 - self.remaining_seconds as f64 / total as f64
    }
}

/// Format seconds as zero-padded "MM:SS"
pub fn format_clock(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Format minutes as "X hrs Y mins"
pub fn format_focus_time(minutes: u32) -> String {
    format!("{} hrs {} mins", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn settings(work: u32, short: u32, long: u32, interval: u32) -> Settings {
        Settings {
            work_duration: work,
            break_duration: short,
            long_break_duration: long,
            long_break_interval: interval,
            ..Settings::default()
        }
    }

    /// Start if needed and tick until the current countdown completes
    fn run_to_completion(timer: &mut Pomodoro) -> Completion {
        timer.start();
        loop {
            if let Some(completion) = timer.tick() {
                return completion;
            }
        }
    }

    fn assert_in_bounds(timer: &Pomodoro) {
        assert!(timer.remaining_seconds() <= timer.mode_duration_seconds(timer.mode()));
    }

    #[test]
    fn test_initial_state() {
        let timer = Pomodoro::default();
        assert_eq!(timer.mode(), Mode::Work);
        assert_eq!(timer.remaining_seconds(), 25 * 60);
        assert!(!timer.is_active());
        assert_eq!(timer.completed_work_sessions(), 0);
        assert_eq!(timer.formatted_time(), "25:00");
    }

    #[test]
    fn test_start_pause_are_idempotent() {
        let mut timer = Pomodoro::default();
        timer.start();
        timer.start();
        assert!(timer.is_active());
        timer.pause();
        timer.pause();
        assert!(!timer.is_active());
        timer.toggle();
        assert!(timer.is_active());
        timer.toggle();
        assert!(!timer.is_active());
    }

    #[test]
    fn test_tick_while_inactive_does_nothing() {
        let mut timer = Pomodoro::default();
        assert_eq!(timer.tick(), None);
        assert_eq!(timer.remaining_seconds(), 25 * 60);
    }

    #[test]
    fn test_tick_decrements_by_one() {
        let mut timer = Pomodoro::default();
        timer.start();
        timer.tick();
        timer.tick();
        assert_eq!(timer.remaining_seconds(), 25 * 60 - 2);
        assert_eq!(timer.formatted_time(), "24:58");
    }

    #[test]
    fn test_last_second_triggers_short_break() {
        let mut timer = Pomodoro::default();
        timer.remaining_seconds = 1;
        timer.start();

        let completion = timer.tick().expect("completion");
        assert_eq!(completion.finished, Mode::Work);
        assert_eq!(completion.next, Mode::ShortBreak);
        assert_eq!(timer.mode(), Mode::ShortBreak);
        assert_eq!(timer.completed_work_sessions(), 1);
        assert_eq!(timer.remaining_seconds(), 5 * 60);
    }

    #[test]
    fn test_clock_already_at_zero_completes() {
        let mut timer = Pomodoro::default();
        timer.remaining_seconds = 0;
        timer.start();
        assert!(timer.tick().is_some());
        assert_eq!(timer.mode(), Mode::ShortBreak);
    }

    #[test]
    fn test_last_second_triggers_long_break_on_interval() {
        let mut timer = Pomodoro::with_completed_sessions(Settings::default(), 3);
        timer.remaining_seconds = 1;
        timer.start();

        let completion = timer.tick().expect("completion");
        assert_eq!(completion.next, Mode::LongBreak);
        assert_eq!(timer.completed_work_sessions(), 4);
        assert_eq!(timer.remaining_seconds(), 15 * 60);
    }

    #[test]
    fn test_long_break_every_fourth_session() {
        let mut timer = Pomodoro::new(settings(1, 1, 2, 4));
        let mut work_completions = Vec::new();

        for _ in 0..12 {
            let work = run_to_completion(&mut timer);
            assert_eq!(work.finished, Mode::Work);
            work_completions.push(work.next);
            let rest = run_to_completion(&mut timer);
            assert_eq!(rest.next, Mode::Work);
        }

        for (index, next) in work_completions.iter().enumerate() {
            let session = index + 1;
            let expected = if session % 4 == 0 {
                Mode::LongBreak
            } else {
                Mode::ShortBreak
            };
            assert_eq!(*next, expected, "session {}", session);
        }
    }

    #[test]
    fn test_switch_mode_always_stops_with_full_duration() {
        let mut timer = Pomodoro::default();
        for &from in Mode::all() {
            for &to in Mode::all() {
                timer.switch_mode(from);
                timer.start();
                timer.tick();
                timer.switch_mode(to);
                assert_eq!(timer.mode(), to);
                assert_eq!(timer.remaining_seconds(), timer.mode_duration_seconds(to));
                assert!(!timer.is_active());
            }
        }
    }

    #[test]
    fn test_reset_preserves_mode_and_counter() {
        let mut timer = Pomodoro::with_completed_sessions(Settings::default(), 2);
        timer.switch_mode(Mode::ShortBreak);
        timer.start();
        for _ in 0..10 {
            timer.tick();
        }

        timer.reset();
        assert_eq!(timer.mode(), Mode::ShortBreak);
        assert_eq!(timer.completed_work_sessions(), 2);
        assert_eq!(timer.remaining_seconds(), 5 * 60);
        assert!(!timer.is_active());
    }

    #[test]
    fn test_no_auto_start_breaks_leaves_timer_paused() {
        let mut timer = Pomodoro::new(Settings {
            auto_start_breaks: false,
            ..Settings::default()
        });
        let completion = run_to_completion(&mut timer);
        assert!(!completion.auto_started);
        assert!(!timer.is_active());
        assert_eq!(timer.mode(), Mode::ShortBreak);
    }

    #[test]
    fn test_auto_start_breaks_keeps_running() {
        let mut timer = Pomodoro::default();
        let completion = run_to_completion(&mut timer);
        assert!(completion.auto_started);
        assert!(timer.is_active());
    }

    #[test]
    fn test_auto_start_pomodoros() {
        let mut timer = Pomodoro::new(Settings {
            auto_start_pomodoros: true,
            ..Settings::default()
        });
        timer.switch_mode(Mode::ShortBreak);
        let completion = run_to_completion(&mut timer);
        assert_eq!(completion.next, Mode::Work);
        assert!(timer.is_active());
        assert_eq!(timer.remaining_seconds(), 25 * 60);

        let mut manual = Pomodoro::default();
        manual.switch_mode(Mode::LongBreak);
        run_to_completion(&mut manual);
        assert_eq!(manual.mode(), Mode::Work);
        assert!(!manual.is_active());
    }

    #[test]
    fn test_break_completion_does_not_count_session() {
        let mut timer = Pomodoro::default();
        timer.switch_mode(Mode::ShortBreak);
        run_to_completion(&mut timer);
        assert_eq!(timer.completed_work_sessions(), 0);
    }

    #[test]
    fn test_remaining_stays_in_bounds() {
        let mut timer = Pomodoro::new(settings(2, 1, 3, 2));
        timer.start();
        for step in 0..2_000 {
            if !timer.is_active() {
                timer.start();
            }
            timer.tick();
            assert_in_bounds(&timer);
            if step % 97 == 0 {
                timer.pause();
            }
        }
    }

    #[test]
    fn test_settings_change_does_not_rescale_running_countdown() {
        let mut timer = Pomodoro::default();
        timer.start();
        timer.tick();
        let before = timer.remaining_seconds();

        timer.update_settings(Settings {
            work_duration: 50,
            ..Settings::default()
        });
        assert_eq!(timer.remaining_seconds(), before);
        assert!(timer.is_active());

        timer.reset();
        assert_eq!(timer.remaining_seconds(), 50 * 60);
    }

    #[test]
    fn test_four_session_scenario() {
        let mut timer = Pomodoro::new(settings(25, 5, 15, 4));

        for session in 1..=4 {
            let completion = run_to_completion(&mut timer);
            assert_eq!(completion.completed_work_sessions, session);
            if session < 4 {
                assert_eq!(timer.mode(), Mode::ShortBreak);
                run_to_completion(&mut timer);
                assert_eq!(timer.mode(), Mode::Work);
            }
        }

        assert_eq!(timer.mode(), Mode::LongBreak);
        assert_eq!(timer.remaining_seconds(), 15 * 60);
        assert_eq!(timer.completed_work_sessions(), 4);
    }

    #[test]
    fn test_settings_are_clamped() {
        let clamped = Settings {
            work_duration: 0,
            break_duration: 90,
            long_break_duration: 61,
            long_break_interval: 0,
            notification_volume: 200,
            ..Settings::default()
        }
        .clamped();

        assert_eq!(clamped.work_duration, 1);
        assert_eq!(clamped.break_duration, 30);
        assert_eq!(clamped.long_break_duration, 60);
        assert_eq!(clamped.long_break_interval, 1);
        assert_eq!(clamped.notification_volume, 100);
    }

    #[test]
    fn test_adjusted_settings() {
        let base = Settings::default();
        assert_eq!(base.adjusted(SettingField::WorkDuration, 5).work_duration, 30);
        assert_eq!(base.adjusted(SettingField::WorkDuration, -100).work_duration, 1);
        assert_eq!(
            base.adjusted(SettingField::NotificationVolume, -60)
                .notification_volume,
            0
        );
        assert!(!base.adjusted(SettingField::AutoStartBreaks, 1).auto_start_breaks);
        assert!(base.adjusted(SettingField::AutoStartBreaks, 0).auto_start_breaks);
    }

    #[test]
    fn test_progress_helpers() {
        let timer = Pomodoro::with_completed_sessions(Settings::default(), 5);
        assert_eq!(timer.sessions_until_long_break(), 3);
        assert_eq!(timer.focused_minutes(), 125);
        assert_eq!(format_focus_time(timer.focused_minutes()), "2 hrs 5 mins");
        assert_eq!(timer.progress_ratio(), 0.0);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(59), "00:59");
        assert_eq!(format_clock(61), "01:01");
        assert_eq!(format_clock(60 * 60), "60:00");
    }
}
