use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
    time::Instant,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "choreo", version)]
struct Cli {
    /// Log engine events to stderr (repeat for more detail).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a show document for clashing formation times, duplicate ids and off-grid positions.
    Validate(ShowArgs),
    /// Print the stage (resolved formations and dancer positions) at one time as JSON.
    Resolve(ResolveArgs),
    /// Play the timeline to the end, printing the playhead every whole second.
    Play(PlayArgs),
    /// Write the default five-dancer show document.
    Demo(DemoArgs),
}

#[derive(Parser, Debug)]
struct ShowArgs {
    /// Input show JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct ResolveArgs {
    /// Input show JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Timeline position in seconds.
    #[arg(long)]
    time: f64,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input show JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Start position in seconds.
    #[arg(long, default_value_t = 0.0)]
    from: f64,

    /// Override the show's timeline length in seconds.
    #[arg(long)]
    duration: Option<f64>,

    /// Tick on wall-clock time instead of as fast as possible.
    #[arg(long)]
    realtime: bool,
}

#[derive(Parser, Debug)]
struct DemoArgs {
    /// Output show JSON path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Resolve(args) => cmd_resolve(args),
        Command::Play(args) => cmd_play(args),
        Command::Demo(args) => cmd_demo(args),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "choreo=debug",
        _ => "choreo=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_show_json(path: &Path) -> anyhow::Result<choreo::Show> {
    let f = File::open(path).with_context(|| format!("open show '{}'", path.display()))?;
    let r = BufReader::new(f);
    let show: choreo::Show = serde_json::from_reader(r)
        .with_context(|| format!("parse show JSON '{}'", path.display()))?;
    Ok(show)
}

fn cmd_validate(args: ShowArgs) -> anyhow::Result<()> {
    let show = read_show_json(&args.in_path)?;
    show.validate()?;
    eprintln!(
        "ok: {} dancers, {} formations, {} messages",
        show.dancers().len(),
        show.formations().len(),
        show.messages().len()
    );
    Ok(())
}

fn cmd_resolve(args: ResolveArgs) -> anyhow::Result<()> {
    let show = read_show_json(&args.in_path)?;
    let frame = choreo::Evaluator::eval_at(&show, args.time);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &frame).context("write stage frame")?;
    writeln!(out)?;
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let mut show = read_show_json(&args.in_path)?;
    if let Some(duration) = args.duration {
        show.set_total_duration(duration)?;
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if args.realtime {
        let mut clock = choreo::PlaybackClock::new(show.config(), choreo::IntervalTicks::new());
        clock.seek(args.from);
        clock.play();
        let mut last_second = None;
        report(&mut out, &show, clock.current_time(), &mut last_second)?;
        while clock.is_playing() {
            if let Some(deadline) = clock.source().next_deadline() {
                std::thread::sleep(deadline.saturating_duration_since(Instant::now()));
            }
            clock.drive(Instant::now());
            report(&mut out, &show, clock.current_time(), &mut last_second)?;
        }
    } else {
        let mut ticks = choreo::ManualTicks::new();
        let mut clock = choreo::PlaybackClock::new(show.config(), &mut ticks);
        clock.seek(args.from);
        clock.play();
        let mut last_second = None;
        report(&mut out, &show, clock.current_time(), &mut last_second)?;
        while clock.is_playing() {
            clock.tick();
            report(&mut out, &show, clock.current_time(), &mut last_second)?;
        }
    }
    Ok(())
}

fn report(
    out: &mut impl std::io::Write,
    show: &choreo::Show,
    time: f64,
    last_second: &mut Option<u64>,
) -> anyhow::Result<()> {
    let second = choreo::floor_second(time);
    if *last_second == Some(second) {
        return Ok(());
    }
    *last_second = Some(second);

    let resolved = show.resolve_at_time(time);
    match resolved.current {
        Some(_) => writeln!(
            out,
            "{} formation {}/{}",
            choreo::format_clock(time),
            resolved.current_index + 1,
            show.formations().len()
        )?,
        None => writeln!(out, "{} no formations", choreo::format_clock(time))?,
    }
    Ok(())
}

fn cmd_demo(args: DemoArgs) -> anyhow::Result<()> {
    let show = choreo::Show::demo()?;
    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, show.to_json_pretty()?)
        .with_context(|| format!("write show '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
