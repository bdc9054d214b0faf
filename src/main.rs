// What you SEE in `play`:
// • A white canvas. Hold Left Mouse to draw one stroke; sparkles trail the pen.
// • Release: the stroke is compared against the target shown top-right.
// • N picks a new target, C clears the canvas, ESC quits.
//
// `signatures` prints the diagonal signature of every template as JSON.

mod fx;
mod scene;
mod window;

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

use scene::Scene;
use sketch_match::draw::{blit_canonical, draw_crosshair, draw_frame, draw_text_5x7};
use sketch_match::{
    BoundingBox, BoundingBoxTracker, ComparatorKind, Error, Figure, FrameBuffer, Recognizer, Signature,
    TemplateRepository, ToleranceConfig,
};
use window::Drawer;

#[derive(Parser)]
#[command(name = "sketch-match", about = "Freehand shape recognizer")]
struct Cli {
    /// JSON file with image_size / padding_margin / similarity_threshold
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Canonical image side in pixels
    #[arg(long, global = true)]
    image_size: Option<u32>,

    /// Blank border inside the canonical image
    #[arg(long, global = true)]
    padding: Option<u32>,

    /// Similarity threshold in (0, 1]
    #[arg(long, global = true)]
    threshold: Option<f32>,

    /// Comparison strategy
    #[arg(long, global = true, value_enum, default_value_t = ComparatorArg::Signature)]
    comparator: ComparatorArg,

    #[command(subcommand)]
    action: Option<Action>,
}

#[derive(Subcommand)]
enum Action {
    /// Open the drawing window (default)
    Play {
        /// Folder of template images; built-in shapes when omitted
        #[arg(long)]
        templates: Option<PathBuf>,
        #[arg(long, default_value_t = 800)]
        width: usize,
        #[arg(long, default_value_t = 600)]
        height: usize,
    },
    /// Print template signatures as JSON lines
    Signatures {
        #[arg(long)]
        templates: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ComparatorArg {
    Signature,
    TemplateMatch,
}

impl From<ComparatorArg> for ComparatorKind {
    fn from(arg: ComparatorArg) -> Self {
        match arg {
            ComparatorArg::Signature => ComparatorKind::Signature,
            ComparatorArg::TemplateMatch => ComparatorKind::TemplateMatch,
        }
    }
}

impl Cli {
    /// File (or defaults), then flag overrides, then validation.
    fn tolerance_config(&self) -> Result<ToleranceConfig, Error> {
        let mut config = match &self.config {
            Some(path) => ToleranceConfig::from_json_file(path)?,
            None => ToleranceConfig::default(),
        };
        if let Some(n) = self.image_size { config.image_size = n; }
        if let Some(p) = self.padding { config.padding_margin = p; }
        if let Some(t) = self.threshold { config.similarity_threshold = t; }
        config.validate()
    }
}

fn main() -> Result<(), Error> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = cli.tolerance_config()?;
    let kind = ComparatorKind::from(cli.comparator);

    match cli.action {
        Some(Action::Signatures { templates }) => signatures(templates.as_deref(), &config),
        Some(Action::Play { templates, width, height }) => play(templates.as_deref(), width, height, config, kind),
        None => play(None, 800, 600, config, kind),
    }
}

fn load_templates(dir: Option<&Path>, config: &ToleranceConfig) -> Result<TemplateRepository, Error> {
    match dir {
        Some(dir) => TemplateRepository::from_dir(dir, config),
        None => Ok(TemplateRepository::builtin(config)),
    }
}

#[derive(Serialize)]
struct SignatureLine<'a> {
    name: &'a str,
    signature: Signature,
}

fn signatures(dir: Option<&Path>, config: &ToleranceConfig) -> Result<(), Error> {
    let repo = load_templates(dir, config)?;
    for fig in repo.iter() {
        let line = SignatureLine { name: fig.name(), signature: fig.signature() };
        println!("{}", serde_json::to_string(&line)?);
    }
    Ok(())
}

fn play(
    dir: Option<&Path>,
    width: usize,
    height: usize,
    config: ToleranceConfig,
    kind: ComparatorKind,
) -> Result<(), Error> {
    let repo = load_templates(dir, &config)?;
    let mut rng = StdRng::from_entropy();
    let mut target: Option<&Figure> = repo.pick_random(&mut rng);

    let mut drawer = Drawer::new("Sketch Match", width, height)?;
    let mut scene = Scene::new(width, height);
    let mut screen = FrameBuffer::filled(width, height, 0);

    let mut recognizer = Recognizer::new(config, kind)?;
    let mut tracker = BoundingBoxTracker::new();
    let mut board = BoundingBox::default();

    let mut pen_down = false;
    let mut verdict: Option<bool> = None;
    let mut hits: u32 = 0;
    let mut last_frame_time = Instant::now();

    tracing::info!(templates = repo.len(), comparator = recognizer.comparator_name(), "play");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();
        let dt = (now - last_frame_time).as_secs_f32();
        last_frame_time = now;

        /* 1) Keys */
        if drawer.n_pressed_once() {
            target = repo.pick_random(&mut rng);
            verdict = None;
        }
        if drawer.c_pressed_once() {
            scene.clear_ink();
            tracker.clear();
            board.clear();
            verdict = None;
        }

        /* 2) Pen: press starts a fresh stroke, drag inks it, release recognizes. */
        let down = drawer.left_mouse_down();
        if down && !pen_down {
            scene.clear_ink();
            tracker.clear();
            board.clear();
            verdict = None;
        }
        if down {
            if let Some(pos) = drawer.mouse_pos() {
                let last = tracker.last();
                if last != Some(pos) {
                    scene.pen_to(last, pos);
                    tracker.track_sample(pos);
                }
            }
        }
        if !down && pen_down {
            tracker.finalize_stroke(&mut board);
            if let (Some(t), false) = (target, board.is_empty()) {
                let hit = recognizer.matches(&board, &mut scene, t);
                verdict = Some(hit);
                if hit {
                    hits += 1;
                    target = repo.pick_random(&mut rng);
                }
            }
            board.clear();
        }
        pen_down = down;

        /* 3) Compose: canvas + trail, target thumbnail, crosshair, HUD */
        scene.tick(dt);
        scene.render_into(&mut screen);

        if let Some(t) = target {
            let n = t.image().size() as i32;
            let x = width as i32 - n * 2 - 8;
            blit_canonical(&mut screen, t.image(), x, 8, 2);
            draw_frame(&mut screen, x - 1, 7, n * 2 + 2, n * 2 + 2, 0x0060_6060);
        }

        if let Some(pos) = drawer.mouse_pos() {
            draw_crosshair(&mut screen, pos.x as i32, pos.y as i32, 12, 0x00_33_66_FF);
        }

        let status = match verdict {
            Some(true) => "MATCH",
            Some(false) => "MISS",
            None => "DRAW",
        };
        let name = target.map(|t| t.name()).unwrap_or("-");
        let hud = format!("TARGET: {name} | {status} | HITS: {hits} | N: NEXT  C: CLEAR");
        draw_text_5x7(&mut screen, 8, 8, &hud, 0x00_20_20_20);

        drawer.present(&screen)?;
    }

    Ok(())
}
