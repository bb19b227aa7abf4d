use ecoviz::config::VizConfig;
use ecoviz::core::{DataLayer, StoryCatalog, Viewport};
use ecoviz::render::{ChartRenderer, NullRenderer};
use ecoviz::scene::{GlobeView, HeadlessBackend, HeadlessMount};
use ecoviz::stories::DataStories;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const USAGE: &str = "usage: story_trace_tool <stories|globe> [--config <path>] [--stories <path>] [--frame-ms <n>] [--frames <n>] [--output <path>]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CommandKind {
    Stories,
    Globe,
}

#[derive(Debug)]
struct CliArgs {
    command: CommandKind,
    config: Option<PathBuf>,
    stories: Option<PathBuf>,
    frame_ms: u64,
    frames: u64,
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct StoryTrace {
    story_index: usize,
    title: String,
    chart_type: String,
    samples: Vec<StorySample>,
}

#[derive(Debug, Serialize)]
struct StorySample {
    time_ms: u64,
    is_playing: bool,
    live_tweens: usize,
    primitives: usize,
    counters: Vec<String>,
}

#[derive(Debug, Serialize)]
struct GlobeTrace {
    interactive: bool,
    fallback_title: Option<String>,
    frames_drawn: usize,
    live_resources_per_layer: Vec<(String, usize)>,
    live_resources_after_dispose: usize,
}

fn main() {
    let _ = ecoviz::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => VizConfig::from_json_str(&read_file(path)?)
            .map_err(|err| format!("invalid config `{}`: {err}", path.display()))?,
        None => VizConfig::default(),
    };

    match args.command {
        CommandKind::Stories => {
            let catalog = match &args.stories {
                Some(path) => StoryCatalog::from_json_str(&read_file(path)?)
                    .map_err(|err| format!("invalid stories `{}`: {err}", path.display()))?,
                None => StoryCatalog::builtin().map_err(|err| err.to_string())?,
            };
            let traces = trace_stories(catalog, config, args.frame_ms)?;
            write_json(args.output.as_deref(), &traces)
        }
        CommandKind::Globe => {
            let trace = trace_globe(config, args.frames)?;
            write_json(args.output.as_deref(), &trace)
        }
    }
}

fn trace_stories(
    catalog: StoryCatalog,
    config: VizConfig,
    frame_ms: u64,
) -> Result<Vec<StoryTrace>, String> {
    let mut viewer = DataStories::new(catalog, config.stories).map_err(|err| err.to_string())?;
    let mut renderer = NullRenderer::default();
    let frame = Duration::from_millis(frame_ms);
    let mut traces = Vec::with_capacity(viewer.story_count());

    for index in 0..viewer.story_count() {
        viewer.select(index).map_err(|err| err.to_string())?;
        if !viewer.is_playing() {
            viewer.play().map_err(|err| err.to_string())?;
        }
        let mut samples = Vec::new();
        let mut time_ms = 0;
        loop {
            let chart = viewer.build_frame();
            renderer.render(&chart).map_err(|err| err.to_string())?;
            samples.push(StorySample {
                time_ms,
                is_playing: viewer.is_playing(),
                live_tweens: viewer.engine().live_tweens(),
                primitives: renderer.last_primitive_count,
                counters: viewer
                    .engine()
                    .elements()
                    .map(|elements| elements.counters().iter().map(|c| c.text.clone()).collect())
                    .unwrap_or_default(),
            });
            if !viewer.is_playing() && !viewer.engine().is_animating() {
                break;
            }
            viewer.advance(frame);
            time_ms += frame_ms;
        }
        let story = viewer.current_story();
        traces.push(StoryTrace {
            story_index: index,
            title: story.title().to_owned(),
            chart_type: format!("{:?}", story.chart_type()).to_lowercase(),
            samples,
        });
    }
    Ok(traces)
}

fn trace_globe(config: VizConfig, frames: u64) -> Result<GlobeTrace, String> {
    let mount = HeadlessMount::new(Viewport::new(800, 600), 2.0);
    let mut view = GlobeView::mount(HeadlessBackend::new(), mount, config.scene)
        .map_err(|err| err.to_string())?;

    if let Some(summary) = view.summary() {
        return Ok(GlobeTrace {
            interactive: false,
            fallback_title: Some(summary.title.clone()),
            frames_drawn: 0,
            live_resources_per_layer: Vec::new(),
            live_resources_after_dispose: 0,
        });
    }
    let Some(scene) = view.scene_mut() else {
        return Err("globe view is neither interactive nor a fallback".to_owned());
    };

    let mut live_resources_per_layer = Vec::with_capacity(DataLayer::ALL.len());
    for layer in DataLayer::ALL {
        scene.set_layer(layer).map_err(|err| err.to_string())?;
        for _ in 0..frames {
            scene.tick().map_err(|err| err.to_string())?;
        }
        live_resources_per_layer.push((
            layer.key().to_owned(),
            scene.backend().live_resources(),
        ));
    }
    let frames_drawn = scene.backend().frames_drawn();
    scene.dispose();

    Ok(GlobeTrace {
        interactive: true,
        fallback_title: None,
        frames_drawn,
        live_resources_per_layer,
        live_resources_after_dispose: scene.backend().live_resources(),
    })
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let command = match args.next().as_deref() {
        Some("stories") => CommandKind::Stories,
        Some("globe") => CommandKind::Globe,
        _ => return Err(USAGE.to_owned()),
    };

    let mut parsed = CliArgs {
        command,
        config: None,
        stories: None,
        frame_ms: 16,
        frames: 60,
        output: None,
    };

    while let Some(flag) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {name}"))
        };
        match flag.as_str() {
            "--config" => parsed.config = Some(PathBuf::from(value("--config")?)),
            "--stories" => parsed.stories = Some(PathBuf::from(value("--stories")?)),
            "--output" => parsed.output = Some(PathBuf::from(value("--output")?)),
            "--frame-ms" => {
                parsed.frame_ms = value("--frame-ms")?
                    .parse()
                    .map_err(|err| format!("invalid --frame-ms: {err}"))?;
                if parsed.frame_ms == 0 {
                    return Err("--frame-ms must be > 0".to_owned());
                }
            }
            "--frames" => {
                parsed.frames = value("--frames")?
                    .parse()
                    .map_err(|err| format!("invalid --frames: {err}"))?;
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            other => return Err(format!("unknown flag `{other}`\n{USAGE}")),
        }
    }
    Ok(parsed)
}

fn read_file(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|err| format!("failed to read `{}`: {err}", path.display()))
}

fn write_json<T: Serialize>(output: Option<&Path>, value: &T) -> Result<(), String> {
    let json =
        serde_json::to_string_pretty(value).map_err(|err| format!("failed to encode: {err}"))?;
    match output {
        Some(path) => fs::write(path, json + "\n")
            .map_err(|err| format!("failed to write `{}`: {err}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}
