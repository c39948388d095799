//! UVB-76 CLI
//!
//! Usage:
//!   uvb76 --play                            # Play a session in the terminal
//!   uvb76 --serve                           # HTTP API server
//!   uvb76 --deal                            # Print one shuffled deck as JSON
//!   uvb76 --play --authentic real.txt --fabricated fake.txt --seed 7

use clap::Parser;
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread::sleep;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

use uvb76::core::api::NewSessionResponse;
use uvb76::core::{run_server, AppState, GestureInterpreter, PhrasePool, RoundController, SessionEvent, TagReferee};
use uvb76::types::{GestureOutcome, Key, Phase, Transition};
use uvb76::{REVEAL_DWELL_MS, SWIPE_THRESHOLD, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "uvb76",
    version = VERSION,
    about = "UVB-76 - real intercepted transmission or neural network fake?",
    long_about = "Each round shows a short Russian voice message. Decide whether it was\n\
                  really broadcast on 4625 kHz or generated by a neural network.\n\n\
                  Modes:\n  \
                  --play   Terminal session (default)\n  \
                  --serve  HTTP API server\n  \
                  --deal   Print one deck as JSON\n\n\
                  Controls (play mode):\n  \
                  r, right, >   UVB-76 (authentic)\n  \
                  l, left, <    Neural network (fabricated)\n  \
                  drag <dx>     Swipe the card by dx\n  \
                  restart       New deck\n  \
                  quit          Exit"
)]
struct Args {
    /// Play a session in the terminal
    #[arg(short, long)]
    play: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Print one shuffled deck as JSON and exit
    #[arg(short, long)]
    deal: bool,

    /// Server address
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// Authentic phrases, one per line (built-in set if omitted)
    #[arg(long, requires = "fabricated")]
    authentic: Option<PathBuf>,

    /// Fabricated phrases, one per line (built-in set if omitted)
    #[arg(long, requires = "authentic")]
    fabricated: Option<PathBuf>,

    /// Swipe distance needed to commit
    #[arg(long, default_value_t = SWIPE_THRESHOLD)]
    threshold: f64,

    /// Verdict display time between rounds (milliseconds)
    #[arg(long, default_value_t = REVEAL_DWELL_MS)]
    dwell_ms: u64,

    /// Seed for deterministic shuffles
    #[arg(long)]
    seed: Option<u64>,

    /// Output transitions as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Debug-level logging
    #[arg(long)]
    verbose: bool,
}

/// One line of play-mode input
#[derive(Debug, Clone, Copy, PartialEq)]
enum Command {
    Key(Key),
    Drag(f64),
    Restart,
    Quit,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    if args.no_color {
        colored::control::set_override(false);
    }

    let pool = load_pool(&args)?;

    if args.serve {
        run_serve(&args, pool).await?;
    } else if args.deal {
        run_deal(&args, &pool)?;
    } else {
        run_play(&args, &pool)?;
    }
    Ok(())
}

fn load_pool(args: &Args) -> anyhow::Result<PhrasePool> {
    match (&args.authentic, &args.fabricated) {
        (Some(authentic), Some(fabricated)) => Ok(PhrasePool::from_files(authentic, fabricated)?),
        _ => Ok(PhrasePool::builtin()),
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Print one deck in the `/session/new` shape
fn run_deal(args: &Args, pool: &PhrasePool) -> anyhow::Result<()> {
    let phrases = pool.deal(&mut make_rng(args.seed))?;
    let response = NewSessionResponse {
        total: phrases.len(),
        phrases,
    };
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// Run a terminal session
fn run_play(args: &Args, pool: &PhrasePool) -> anyhow::Result<()> {
    let mut rng = make_rng(args.seed);
    let mut controller = RoundController::with_referee(TagReferee, Duration::from_millis(args.dwell_ms));
    let mut gesture = GestureInterpreter::new(args.threshold);

    print_header();
    let t = controller.load(pool.deal(&mut rng));
    print_transition(&t, args)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print_screen(&controller);
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(command) = parse_command(line) else {
            println!("{}", "⚠ r / l / drag <dx> / restart / quit".yellow());
            continue;
        };

        let t = match command {
            Command::Quit => break,
            Command::Restart => {
                controller.restart();
                controller.load(pool.deal(&mut rng))
            }
            Command::Key(key) => match GestureInterpreter::key(key) {
                Some(guess) => controller.decide(guess),
                None => continue,
            },
            Command::Drag(dx) => {
                gesture.press(0.0);
                gesture.drag_to(dx);
                if let Some(lean) = gesture.lean() {
                    println!("  {}", lean.badge().bold());
                }
                match gesture.release() {
                    GestureOutcome::Commit(guess) => controller.decide(guess),
                    GestureOutcome::Cancel => {
                        println!("{}", "  ↺ snap back".dimmed());
                        continue;
                    }
                }
            }
        };
        print_transition(&t, args)?;

        if controller.phase() == Phase::Revealing {
            sleep(controller.dwell());
            let t = controller.handle(SessionEvent::Tick(Instant::now()));
            print_transition(&t, args)?;
        }
    }

    let snapshot = controller.snapshot();
    println!();
    println!("Session ended. {}", snapshot.to_parseable_string());
    Ok(())
}

fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let head = parts.next()?.to_lowercase();
    match head.as_str() {
        "r" | "right" | ">" | "→" => Some(Command::Key(Key::ArrowRight)),
        "l" | "left" | "<" | "←" => Some(Command::Key(Key::ArrowLeft)),
        "drag" => parts.next()?.parse().ok().map(Command::Drag),
        "restart" => Some(Command::Restart),
        "quit" | "exit" | "q" => Some(Command::Quit),
        _ => None,
    }
}

fn print_header() {
    println!("{}", "╔══════════════════════════════════════════╗".bold());
    println!("{}", format!("║   УВБ-76 v{}                           ║", VERSION).bold());
    println!("{}", "║   Реальная фраза или нейросеть?          ║".bold());
    println!("{}", "╚══════════════════════════════════════════╝".bold());
    println!("← l: НЕЙРОСЕТЬ | r: УВБ-76 → | drag <dx> | restart | quit");
    println!();
}

/// Current card, or the final / error screen
fn print_screen<R: uvb76::core::Referee>(controller: &RoundController<R>) {
    let snapshot = controller.snapshot();
    match snapshot.phase {
        Phase::Active => {
            if let Some(phrase) = &snapshot.phrase {
                println!();
                println!("  {}", phrase.text.white().bold());
                println!("  {}", snapshot.to_terminal_string());
            }
        }
        Phase::Complete => {
            println!();
            println!("{}", "Игра завершена".bold());
            println!(
                "  {} / {} правильных ответов | точность {}%",
                snapshot.score.correct.to_string().green(),
                snapshot.score.total,
                snapshot.percentage
            );
            println!("  restart — играть снова");
        }
        Phase::Unavailable => {
            println!("{}", "  Не удалось загрузить фразы. restart — повторить".red());
        }
        Phase::Loading | Phase::Revealing => {}
    }
}

fn print_transition(t: &Transition, args: &Args) -> anyhow::Result<()> {
    if args.json {
        println!("{}", serde_json::to_string(t)?);
        return Ok(());
    }
    match t {
        Transition::Revealed { verdict, streak, .. } => {
            let mark = if verdict.correct {
                "✓".green().bold()
            } else {
                "✗".red().bold()
            };
            println!("  {} {} | серия {}", mark, verdict.actual().badge(), streak);
        }
        Transition::JudgeFailed { reason } | Transition::Unavailable { reason } => {
            println!("{}", format!("  ⚠ {}", reason).red());
        }
        Transition::Discarded { .. } => {
            println!("{}", "  (ignored)".dimmed());
        }
        Transition::Started { .. }
        | Transition::Advanced { .. }
        | Transition::Completed { .. }
        | Transition::Restarted
        | Transition::Idle => {}
    }
    Ok(())
}

/// Run HTTP API server
async fn run_serve(args: &Args, pool: PhrasePool) -> anyhow::Result<()> {
    println!();
    println!("╔══════════════════════════════════════════╗");
    println!("║  UVB-76 API Server                       ║");
    println!("║  Version: {}                          ║", VERSION);
    println!("╚══════════════════════════════════════════╝");
    println!();

    run_server(&args.addr, AppState::new(pool, args.seed)).await?;
    Ok(())
}
