use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context};
use bomber::config::Config;
use bomber::game::state::GameStage;
use bomber::game::Game;
use bomber::input::controller::{ControlScheme, LocalController};
use bomber::input::{InputEvent, KeyCode};
use bomber::logging::setup_logging;
use bomber::map::Level;
use clap::Parser;
use tracing::{info, warn};

/// Plays a round headless, feeding recorded key presses at fixed ticks.
#[derive(Parser, Debug)]
#[command(name = "bomber", version, about)]
struct Cli {
    /// Level file to play.
    level: PathBuf,
    /// Number of players; the first two are bound to the local control schemes.
    #[arg(short, long, default_value_t = 2)]
    players: usize,
    /// Seed of the round's random number generator.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Input script, one `<tick> <down|up> <key>` or `<tick> quit` per line.
    #[arg(long)]
    script: Option<PathBuf>,
    /// Give up after this many ticks.
    #[arg(long, default_value_t = 3000)]
    max_ticks: u64,
}

/// Key events keyed by the tick they are delivered on.
#[derive(Debug, Default, PartialEq)]
struct Script {
    events: Vec<(u64, InputEvent)>,
}

impl Script {
    fn parse(source: &str) -> anyhow::Result<Script> {
        let mut events = Vec::new();
        for (index, line) in source.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let event = Self::parse_line(line).with_context(|| format!("script line {}", index + 1))?;
            events.push(event);
        }
        events.sort_by_key(|(tick, _)| *tick);
        Ok(Script { events })
    }

    fn parse_line(line: &str) -> anyhow::Result<(u64, InputEvent)> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let tick: u64 = fields
            .first()
            .ok_or_else(|| anyhow!("missing tick"))?
            .parse()
            .context("invalid tick")?;
        let key = |field: Option<&&str>| -> anyhow::Result<KeyCode> {
            let name = field.ok_or_else(|| anyhow!("missing key"))?;
            KeyCode::from_str(name).map_err(|_| anyhow!("unknown key {name:?}"))
        };
        let event = match fields.get(1).copied() {
            Some("down") => InputEvent::KeyDown(key(fields.get(2))?),
            Some("up") => InputEvent::KeyUp(key(fields.get(2))?),
            Some("quit") => InputEvent::Quit,
            Some(other) => bail!("unknown event {other:?}"),
            None => bail!("missing event"),
        };
        Ok((tick, event))
    }

    fn events_at(&self, tick: u64) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.iter().filter(move |(at, _)| *at == tick).map(|(_, event)| *event)
    }
}

fn main() -> anyhow::Result<()> {
    setup_logging();
    let cli = Cli::parse();

    let config = Config::load()?;
    let source = fs::read_to_string(&cli.level).with_context(|| format!("reading {}", cli.level.display()))?;
    let level = Level::load(&source, config.screen_size())?;
    let script = match &cli.script {
        Some(path) => Script::parse(&fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?)?,
        None => Script::default(),
    };

    let dt = config.dt();
    let mut game = Game::new(config);
    for index in 0..cli.players {
        if let Some(scheme) = ControlScheme::for_local_player(index) {
            game.router_mut().register(Box::new(LocalController::new(index, scheme)));
        }
    }
    game.start_round(level, cli.players, cli.seed)?;

    for tick in 0..cli.max_ticks {
        for event in script.events_at(tick) {
            game.handle_input(event);
        }
        game.tick(dt);
        if !game.stage().is_running() {
            break;
        }
    }

    match game.stage() {
        GameStage::RoundOver { winner } => info!(?winner, ticks = game.ticks(), "Round finished"),
        GameStage::Terminated => info!(ticks = game.ticks(), "Quit"),
        stage => warn!(stage = stage.as_ref(), ticks = game.ticks(), "Round still running after the tick limit"),
    }
    for (name, score) in game.scoreboard().table() {
        println!("{name:>12} {score:>4}");
    }

    game.quit();
    Ok(())
}
