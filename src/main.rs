use clap::Parser;
use colored::Colorize;
use runways::journal::Entry;
use runways::{board, Aircraft, Scenario, Time, Tower};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
struct Args {
    /// Path to the JSON scenario file
    #[arg(short, long, value_name = "FILE")]
    scenario: Option<PathBuf>,

    /// Number of runways, overrides the scenario
    #[arg(short, long)]
    runways: Option<usize>,

    /// Clock period in milliseconds, overrides the scenario
    #[arg(short, long, value_name = "MS")]
    period_ms: Option<u64>,

    /// Log filter, e.g. "info" or "runways=debug"; falls back to RUST_LOG
    #[arg(short, long, value_name = "FILTER")]
    log_level: Option<String>,
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let mut candidates = Vec::new();

        for cmd in &self.commands {
            if cmd.starts_with(line) {
                candidates.push(Pair {
                    display: cmd.clone(),
                    replacement: format!("{} ", cmd),
                });
            }
        }

        Ok((0, candidates))
    }
}

fn paginate(content: &str) -> std::io::Result<()> {
    let mut pager = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        // Fallback to 'more' if 'less' isn't available
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn())?;

    if let Some(mut stdin) = pager.stdin.take() {
        if let Err(e) = stdin.write_all(content.as_bytes()) {
            // Broken pipe is common if the user quits the pager early
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(e);
            }
        }
    }

    pager.wait()?;
    Ok(())
}

fn init_logging(filter: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let filter = match filter {
        Some(f) => EnvFilter::try_new(f)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn print_journal(entries: &[Entry]) {
    if entries.is_empty() {
        println!("Nothing logged yet.");
        return;
    }
    let content = entries.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("\n");
    if entries.len() > 20 {
        if let Err(e) = paginate(&content) {
            tracing::warn!(error = %e, "pager unavailable");
            println!("{}", content);
        }
    } else {
        println!("{}", content);
    }
}

fn add(tower: &Tower, aircraft: Aircraft) {
    let id = aircraft.id().clone();
    match tower.assign(aircraft) {
        Ok(runway) => println!("{} added to runway {}.", id, runway + 1),
        Err(e) => println!("{}", e.to_string().red()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.log_level.as_deref())?;

    let mut scenario = match &args.scenario {
        Some(path) => Scenario::load_from_file(path)?,
        None => Scenario::default(),
    };
    if let Some(runways) = args.runways {
        scenario.runways = runways;
    }
    if let Some(period_ms) = args.period_ms {
        scenario.tick_period_ms = period_ms;
    }

    let aerodrome = scenario.build()?;
    let mut tower = Tower::new(aerodrome);
    tower.start(scenario.tick_period(), scenario.tick_delta())?;
    println!(
        "Tower online. {} runways, clock advances {} every {} ms.",
        scenario.runways, scenario.tick_delta, scenario.tick_period_ms
    );

    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: ["ls", "add", "random", "around", "divert", "tick", "log", "help", "exit"]
            .iter()
            .map(|c| c.to_string())
            .collect(),
    };

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() { continue; }

                rl.add_history_entry(trimmed)?;

                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                match parts[0] {
                    "ls" => {
                        println!("T+{}", tower.elapsed().0);
                        println!("{}", board::render(&tower.snapshot()));
                    },
                    "add" => {
                        if let (Some(id), Some(duration)) = (parts.get(1), parts.get(2)) {
                            let emergency = matches!(parts.get(3), Some(&"e") | Some(&"emergency"));
                            match duration.parse::<i64>() {
                                Ok(duration) => match Aircraft::new(*id, duration, emergency) {
                                    Ok(aircraft) => add(&tower, aircraft),
                                    Err(e) => println!("{}", e.to_string().red()),
                                },
                                Err(_) => println!("{}", format!("Not a duration: {}", duration).red()),
                            }
                        } else {
                            println!("Usage: add <callsign> <duration> [e]");
                        }
                    },
                    "random" => add(&tower, Aircraft::random(&mut rand::thread_rng())),
                    "around" => {
                        if let Some(id) = parts.get(1) {
                            if tower.send_for_second_round(id) {
                                println!("{} sent around.", id);
                            } else {
                                println!("{}", format!("No aircraft {} in the pattern.", id).red());
                            }
                        } else {
                            println!("Usage: around <callsign>");
                        }
                    },
                    "divert" => {
                        if let Some(id) = parts.get(1) {
                            match tower.send_to_another_runway(id) {
                                Some(t) => println!("{} moved from runway {} to runway {}.", t.id, t.from + 1, t.to + 1),
                                None => println!("{}", format!("No aircraft {} in the pattern.", id).red()),
                            }
                        } else {
                            println!("Usage: divert <callsign>");
                        }
                    },
                    "tick" => {
                        let n = parts.get(1).and_then(|s| s.parse::<i64>().ok()).unwrap_or(1);
                        let landed = match tower.tick_now(Time(n)) {
                            Ok(landed) => landed,
                            Err(e) => {
                                println!("{}", e.to_string().red());
                                continue;
                            }
                        };
                        if landed.is_empty() {
                            println!("Clock advanced by {}. No landings.", n);
                        } else {
                            for l in landed {
                                println!("{} landed on runway {}.", l.id.green(), l.runway + 1);
                            }
                        }
                    },
                    "log" => print_journal(&tower.journal()),
                    "help" | "?" => {
                        println!("\nAvailable Commands:");
                        println!("  ls                      - Show every runway queue");
                        println!("  add <id> <t> [e]        - Add aircraft <id> needing <t> to land, 'e' for emergency");
                        println!("  random                  - Add an aircraft with random callsign, time and priority");
                        println!("  around <id>             - Send aircraft <id> for a second round");
                        println!("  divert <id>             - Move aircraft <id> to the next runway");
                        println!("  tick [n]                - Advance the clock by <n> units right away (default 1)");
                        println!("  log                     - Show the tower journal");
                        println!("  help / ?                - Show this help menu");
                        println!("  exit / quit             - Exit the simulator\n");
                    },
                    "exit" | "quit" => break,
                    _ => println!("Unknown command: {}", parts[0]),
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            },
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            },
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    tower.stop();
    Ok(())
}
