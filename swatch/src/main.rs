#![warn(clippy::pedantic)]

pub mod grid;
pub mod script;
pub mod settings;

use anyhow::Result as AnyResult;
use swatch_core::{FnListener, Notification, SelectionController};

/// Usage: `swatch [--settings <path>] [--save-settings <path>] [script]`.
/// Reads the script from stdin if no path is given.
struct Args {
    settings: Option<std::path::PathBuf>,
    /// Write out the effective settings instead of running a script.
    save_settings: Option<std::path::PathBuf>,
    script: Option<std::path::PathBuf>,
}
impl Args {
    fn parse(mut args: impl Iterator<Item = std::ffi::OsString>) -> AnyResult<Self> {
        let mut parsed = Self {
            settings: None,
            save_settings: None,
            script: None,
        };
        while let Some(arg) = args.next() {
            if arg == "--settings" || arg == "--save-settings" {
                let path = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("{arg:?} needs a path"))?;
                if arg == "--settings" {
                    parsed.settings = Some(path.into());
                } else {
                    parsed.save_settings = Some(path.into());
                }
            } else if parsed.script.is_none() {
                parsed.script = Some(arg.into());
            } else {
                anyhow::bail!("unexpected argument {arg:?}");
            }
        }
        Ok(parsed)
    }
}

/// Play the commands against a fresh picker, returning every notification in the order they were emitted.
fn run(
    settings: &settings::Settings,
    commands: &[script::Command],
) -> AnyResult<Vec<Notification>> {
    use script::Command;

    let palette = grid::GridPalette::new(settings.colors().collect(), settings.columns);
    let mut picker = SelectionController::new(palette, settings.bounds());
    // Lay the palette out for the initial bounds.
    picker.set_bounds(settings.bounds());
    if let Some(initial) = settings.initial {
        picker.set_color(initial.0);
    }

    let (send, notifications) = crossbeam::channel::unbounded::<Notification>();
    picker.add_listener(send);
    picker.add_listener(
        FnListener::new()
            .with_selected(|_, color| {
                log::info!("Picked {color}");
                Ok(())
            })
            .with_cancel(|source| {
                log::info!("Pick cancelled, keeping {}", source.color());
                Ok(())
            }),
    );

    for command in commands {
        match command {
            Command::Pointer(event) => {
                let response = picker.handle_pointer_event(*event)?;
                if response.needs_redraw() {
                    log::trace!("Redraw requested");
                }
            }
            Command::Resize { width, height } => picker.on_size_changed(*width, *height),
            Command::Set(color) => picker.set_color(*color),
            Command::Draw(path) => {
                use az::SaturatingAs;
                let bounds = picker.bounds();
                let mut image = image::RgbaImage::new(
                    bounds.width().max(0.0).ceil().saturating_as(),
                    bounds.height().max(0.0).ceil().saturating_as(),
                );
                picker.draw(&mut image);
                image.save(path)?;
                log::debug!("Wrote snapshot to {path:?}");
            }
        }
    }

    Ok(notifications.try_iter().collect())
}

fn main() -> AnyResult<()> {
    let has_term = std::io::IsTerminal::is_terminal(&std::io::stdin());
    // Log to a terminal, if available. Else, log to "swatch.log" in the working directory.
    if has_term {
        env_logger::builder()
            .filter_level(log::LevelFilter::Info)
            .init();
    } else {
        let _ = simple_logging::log_to_file("swatch.log", log::LevelFilter::Debug);
    }

    let args = Args::parse(std::env::args_os().skip(1))?;
    let settings = match &args.settings {
        // Asked for explicitly, so failing to read it is an error.
        Some(path) => settings::Settings::load(path)?,
        None => settings::Settings::from_default_file(),
    };
    if let Some(path) = &args.save_settings {
        settings.save(path)?;
        log::info!("Saved settings to {path:?}");
        return Ok(());
    }
    let text = match &args.script {
        Some(path) => std::fs::read_to_string(path)?,
        None => std::io::read_to_string(std::io::stdin())?,
    };
    let commands = script::parse(&text)?;

    for notification in run(&settings, &commands)? {
        println!("{notification}");
    }
    Ok(())
}
