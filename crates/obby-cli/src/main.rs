mod script;

use tracing_subscriber::EnvFilter;

use obby_core::config::ObbyConfig;
use obby_core::level::{DEFAULT_THEME, Difficulty, LevelDescription};
use obby_levelgen::{
    GeneratorConfig, HttpLevelGenerator, LevelSlot, ProceduralGenerator, validate_level,
};
use obby_sim::{ObbyGame, SessionState};

use script::{KeyEdge, Timeline};

const DEFAULT_FRAMES: u64 = 600;

/// Where the level comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LevelSource {
    Builtin,
    File(String),
    Procedural(u64),
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    source: LevelSource,
    difficulty: Difficulty,
    theme: String,
    script: Option<String>,
    frames: u64,
    config: Option<String>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            source: LevelSource::Builtin,
            difficulty: Difficulty::default(),
            theme: DEFAULT_THEME.to_string(),
            script: None,
            frames: DEFAULT_FRAMES,
            config: None,
        }
    }
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args, String> {
    let mut parsed = Args::default();
    for arg in args {
        if let Some(path) = arg.strip_prefix("--level=") {
            parsed.source = LevelSource::File(path.to_string());
        } else if let Some(seed) = arg.strip_prefix("--seed=") {
            let seed = seed
                .parse::<u64>()
                .map_err(|e| format!("bad --seed '{seed}': {e}"))?;
            parsed.source = LevelSource::Procedural(seed);
        } else if arg == "--remote" {
            parsed.source = LevelSource::Remote;
        } else if let Some(difficulty) = arg.strip_prefix("--difficulty=") {
            parsed.difficulty = difficulty.parse()?;
        } else if let Some(theme) = arg.strip_prefix("--theme=") {
            parsed.theme = theme.to_string();
        } else if let Some(path) = arg.strip_prefix("--script=") {
            parsed.script = Some(path.to_string());
        } else if let Some(frames) = arg.strip_prefix("--frames=") {
            parsed.frames = frames
                .parse::<u64>()
                .map_err(|e| format!("bad --frames '{frames}': {e}"))?;
        } else if let Some(path) = arg.strip_prefix("--config=") {
            parsed.config = Some(path.to_string());
        } else {
            return Err(format!("unknown argument '{arg}'"));
        }
    }
    Ok(parsed)
}

async fn load_level(args: &Args) -> Result<LevelDescription, String> {
    let mut slot = LevelSlot::new(LevelDescription::default());
    match &args.source {
        LevelSource::Builtin => {},
        LevelSource::File(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("failed to read {path}: {e}"))?;
            let level = LevelDescription::from_json(&text)
                .map_err(obby_levelgen::GenerateError::from)
                .and_then(validate_level)
                .map_err(|e| format!("{path}: {e}"))?;
            slot.accept(level);
        },
        LevelSource::Procedural(seed) => {
            slot.regenerate(&ProceduralGenerator::new(*seed), &args.theme, args.difficulty)
                .await
                .map_err(|e| e.to_string())?;
        },
        LevelSource::Remote => {
            generate_remote(&mut slot, GeneratorConfig::from_env(), &args.theme, args.difficulty)
                .await?;
        },
    }
    Ok(slot.level().clone())
}

/// Ask the level service for a level. A failed call keeps whatever `slot` holds.
async fn generate_remote(
    slot: &mut LevelSlot,
    config: GeneratorConfig,
    theme: &str,
    difficulty: Difficulty,
) -> Result<(), String> {
    let generator = HttpLevelGenerator::new(config).map_err(|e| e.to_string())?;
    if let Err(e) = slot.regenerate(&generator, theme, difficulty).await {
        tracing::warn!(error = %e, "remote generation failed, running the built-in level");
    }
    Ok(())
}

/// Run `frames` frames, applying `timeline` before each one.
fn run(game: &mut ObbyGame, timeline: &mut Timeline, frames: u64) -> usize {
    let mut emitted = 0;
    for frame in 0..frames {
        for directive in timeline.take_due(frame) {
            match directive.edge {
                KeyEdge::Down => {
                    if let Some(action) = game.key_down(&directive.code) {
                        tracing::debug!(frame, code = %directive.code, ?action, "key down");
                    }
                },
                KeyEdge::Up => game.key_up(&directive.code),
            }
        }
        for event in game.frame() {
            emitted += 1;
            if event.is_terminal() {
                tracing::info!(frame, ?event, "attempt over");
            } else {
                tracing::debug!(frame, ?event, "session event");
            }
        }
    }
    emitted
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!(
                "usage: obby-cli [--level=<file.json> | --seed=<u64> | --remote] \
                 [--difficulty=easy|medium|hard] [--theme=<text>] [--script=<file>] \
                 [--frames=<n>] [--config=<file.toml>]"
            );
            std::process::exit(1);
        },
    };

    let config = match &args.config {
        Some(path) => ObbyConfig::load_from(path),
        None => ObbyConfig::load(),
    };

    let mut timeline = match &args.script {
        Some(path) => {
            let parsed = std::fs::read_to_string(path)
                .map_err(|e| format!("failed to read {path}: {e}"))
                .and_then(|text| Timeline::parse(&text).map_err(|e| format!("{path}: {e}")));
            match parsed {
                Ok(timeline) => timeline,
                Err(e) => {
                    tracing::error!("{e}");
                    std::process::exit(1);
                },
            }
        },
        None => Timeline::default(),
    };

    let level = match load_level(&args).await {
        Ok(level) => level,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        },
    };

    let mut game = ObbyGame::new(config, level);
    let emitted = run(&mut game, &mut timeline, args.frames);

    let session = game.session();
    let actor = game.actor();
    tracing::info!(
        state = ?game.state(),
        deaths = session.deaths(),
        wins = session.wins(),
        x = actor.x,
        y = actor.y,
        events = emitted,
        frames = args.frames,
        "run finished"
    );
    if game.state() == SessionState::Won {
        tracing::info!("course cleared");
    }
}
