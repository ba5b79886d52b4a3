use std::io::Write;

use clap::Args;
use tokio::io::AsyncBufReadExt;

use hourglass_core::{notify, preset, Config, Event, Hms, RunState, TimerSession};

#[derive(Args)]
pub struct RunArgs {
    /// Duration as SS, MM:SS, or HH:MM:SS
    duration: Option<String>,
    /// Hours component
    #[arg(long, default_value_t = 0, conflicts_with = "duration")]
    hours: u32,
    /// Minutes component (0-59)
    #[arg(long, default_value_t = 0, conflicts_with = "duration")]
    minutes: u32,
    /// Seconds component (0-59)
    #[arg(long, default_value_t = 0, conflicts_with = "duration")]
    seconds: u32,
    /// Start from a named preset (see `hourglass preset list`)
    #[arg(long, conflicts_with_all = ["duration", "hours", "minutes", "seconds"])]
    preset: Option<String>,
    /// Print transition events as JSON lines instead of live rendering
    #[arg(long)]
    json: bool,
}

fn resolve_duration(args: &RunArgs, config: &Config) -> Result<Hms, Box<dyn std::error::Error>> {
    if let Some(name) = &args.preset {
        let presets = config.all_presets();
        let preset =
            preset::find(&presets, name).ok_or_else(|| format!("unknown preset: {name}"))?;
        return Ok(preset.duration);
    }
    if let Some(text) = &args.duration {
        return Ok(text.parse()?);
    }
    Ok(Hms::new(args.hours, args.minutes, args.seconds)?)
}

fn emit(json: bool, event: Option<Event>) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        if let Some(event) = &event {
            println!("{}", serde_json::to_string(event)?);
        }
    }
    Ok(())
}

fn render(session: &TimerSession) {
    let label = match session.state() {
        RunState::Idle => "idle",
        RunState::Running => "running",
        RunState::Paused => "paused",
        RunState::Completed => "done",
    };
    print!("\r{}  [{label}]   ", session.remaining());
    let _ = std::io::stdout().flush();
}

pub async fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let duration = resolve_duration(&args, &config)?;

    let sink = notify::for_config(&config.notifications);
    let (mut session, mut ticks) = TimerSession::new(sink);

    emit(args.json, session.set_duration(duration))?;
    let started = session.start();
    if started.is_none() {
        return Err("cannot start a zero-length timer".into());
    }
    emit(args.json, started)?;

    if !args.json {
        eprintln!("p pause, r resume, s restart, q quit");
        render(&session);
    }

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            tick = ticks.recv() => {
                let Some(tick) = tick else { break };
                let event = session.handle_tick(tick);
                emit(args.json, event)?;
                if !args.json {
                    render(&session);
                }
                if session.state() == RunState::Completed {
                    if !args.json {
                        println!();
                    }
                    break;
                }
            }
            line = lines.next_line(), if stdin_open => {
                match line {
                    Ok(Some(command)) => {
                        let event = match command.trim() {
                            "p" => session.pause(),
                            "r" => session.resume(),
                            "s" => {
                                emit(args.json, session.reset())?;
                                session.start()
                            }
                            "q" => {
                                emit(args.json, session.reset())?;
                                if !args.json {
                                    println!();
                                }
                                return Ok(());
                            }
                            "" => None,
                            other => {
                                if !args.json {
                                    eprintln!("\nunknown command: {other} (p pause, r resume, s restart, q quit)");
                                }
                                None
                            }
                        };
                        emit(args.json, event)?;
                        if !args.json {
                            render(&session);
                        }
                    }
                    // Stdin closed (piped input ran out): keep counting down.
                    Ok(None) | Err(_) => {
                        stdin_open = false;
                    }
                }
            }
        }
    }

    Ok(())
}
