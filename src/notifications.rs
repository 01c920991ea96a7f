//! Completion cues for the pomodoro timer.
//! Failures are logged and swallowed; they never touch timer state.
use crate::config::AppConfig;
use crate::domain::{Completion, Mode};
use anyhow::Result;
use std::io::Write;
use tracing::{debug, warn};

#[cfg(any(target_os = "macos", target_os = "linux"))]
use anyhow::Context;
#[cfg(any(target_os = "macos", target_os = "linux"))]
use std::process::{Command, Stdio};
#[cfg(any(target_os = "macos", target_os = "linux"))]
use std::thread;

/// Title and body of the message announcing a completion
pub fn completion_message(completion: &Completion) -> (String, String) {
    let title = match completion.finished {
        Mode::Work => format!(
            "UniVerse - Pomodoro #{} complete",
            completion.completed_work_sessions
        ),
        Mode::ShortBreak | Mode::LongBreak => {
            format!("UniVerse - {} over", completion.finished.name())
        }
    };

    let next = match completion.next {
        Mode::Work => "Time to focus",
        Mode::ShortBreak => "Take a short break",
        Mode::LongBreak => "Take a long break",
    };
    let body = if completion.auto_started {
        format!("{}. Timer started.", next)
    } else {
        format!("{}. Press space to start.", next)
    };

    (title, body)
}

/// Number of terminal bells for a 0-100 volume
pub fn bell_count(volume: u8) -> usize {
    match volume {
        0 => 0,
        1..=33 => 1,
        34..=66 => 2,
        _ => 3,
    }
}

/// Play every enabled cue for a completed countdown
pub fn announce_completion(completion: &Completion, config: &AppConfig) {
    if config.terminal_bell {
        if let Err(e) = ring_bell(completion.volume) {
            warn!(error = %e, "Failed to play completion cue");
        }
    }

    if config.desktop_notifications {
        let (title, body) = completion_message(completion);
        if let Err(e) = notify_desktop(&title, &body) {
            warn!(error = %e, "Failed to send desktop notification");
        }
    }
}

fn ring_bell(volume: u8) -> Result<()> {
    let rings = bell_count(volume);
    if rings == 0 {
        debug!("Notification volume is zero, skipping bell");
        return Ok(());
    }

    let mut stdout = std::io::stdout();
    stdout.write_all("\x07".repeat(rings).as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Start a notifier without blocking the event loop. A background thread reaps it.
#[cfg(any(target_os = "macos", target_os = "linux"))]
fn spawn_notifier(command: &mut Command, name: &'static str) -> Result<()> {
    let mut child = command
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to run {}", name))?;

    thread::spawn(move || match child.wait() {
        Ok(status) if !status.success() => warn!(%status, "{} exited with an error", name),
        Ok(_) => {}
        Err(e) => warn!(error = %e, "Failed to wait for {}", name),
    });
    Ok(())
}

#[cfg(target_os = "macos")]
fn notify_desktop(title: &str, body: &str) -> Result<()> {
    let script = format!(
        r#"display notification "{}" with title "{}""#,
        body.replace('"', "\\\""),
        title.replace('"', "\\\"")
    );

    spawn_notifier(Command::new("osascript").arg("-e").arg(&script), "osascript")
}

#[cfg(target_os = "linux")]
fn notify_desktop(title: &str, body: &str) -> Result<()> {
    spawn_notifier(Command::new("notify-send").arg(title).arg(body), "notify-send")
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
fn notify_desktop(title: &str, body: &str) -> Result<()> {
    // No-op on other platforms
    let _ = (title, body);
    Ok(())
}
