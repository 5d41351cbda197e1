use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "strada", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Paint the backdrop frame for a scroll offset and write it as a PNG.
    Frame(FrameArgs),
    /// Mount the page, settle the loading choreography, glide to a scroll
    /// offset, and print the state snapshot as JSON.
    Inspect(InspectArgs),
    /// Solve the page layout for a viewport and print it as JSON.
    Layout(LayoutArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Page model JSON; defaults to the built-in showcase page.
    #[arg(long = "page")]
    page_path: Option<PathBuf>,

    /// Directory the frame sequence resolves under; defaults to the page
    /// JSON's directory, or `.` for the built-in page.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// Scroll offset in pixels.
    #[arg(long, default_value_t = 0.0)]
    scroll: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Page model JSON; defaults to the built-in showcase page.
    #[arg(long = "page")]
    page_path: Option<PathBuf>,

    /// Directory the frame sequence resolves under; defaults to the page
    /// JSON's directory, or `.` for the built-in page.
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 720.0)]
    height: f64,

    /// Scroll offset to glide to once the loading screen has left.
    #[arg(long, default_value_t = 0.0)]
    scroll: f64,

    /// Simulated seconds to run before printing, loading time included.
    #[arg(long, default_value_t = 8.0)]
    settle: f64,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Page model JSON; defaults to the built-in showcase page.
    #[arg(long = "page")]
    page_path: Option<PathBuf>,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in pixels.
    #[arg(long, default_value_t = 720.0)]
    height: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Inspect(args) => cmd_inspect(args),
        Command::Layout(args) => cmd_layout(args),
    }
}

fn read_page_json(path: Option<&Path>) -> anyhow::Result<strada::Page> {
    let Some(path) = path else {
        return Ok(strada::showcase_page());
    };
    let f = File::open(path).with_context(|| format!("open page '{}'", path.display()))?;
    let r = BufReader::new(f);
    let page: strada::Page = serde_json::from_reader(r).with_context(|| "parse page JSON")?;
    page.validate()?;
    Ok(page)
}

fn resolve_assets_root(assets: Option<PathBuf>, page_path: Option<&Path>) -> PathBuf {
    assets.unwrap_or_else(|| {
        page_path
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    })
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let page = read_page_json(args.page_path.as_deref())?;
    let viewport = strada::Viewport::new(args.width, args.height)?;
    let layout = strada::solve_layout(&page, viewport)?;

    let assets_root = resolve_assets_root(args.assets, args.page_path.as_deref());
    let mut frames = strada::Preloader::spawn(&page.frames, &assets_root)?;
    frames.wait();

    let mut backdrop = strada::Backdrop::new(viewport)?;
    backdrop.render(args.scroll, layout.frame_window_px, &frames);
    if frames.frame(backdrop.frame_index()).is_none() {
        eprintln!(
            "frame {} did not decode; canvas left transparent",
            backdrop.frame_index()
        );
    }

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let image = backdrop.surface().to_rgba8();
    image::save_buffer_with_format(
        &args.out,
        image.as_raw(),
        image.width(),
        image.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let page = read_page_json(args.page_path.as_deref())?;
    let viewport = strada::Viewport::new(args.width, args.height)?;
    let assets_root = resolve_assets_root(args.assets, args.page_path.as_deref());

    let mut app = strada::App::mount(page, viewport, &assets_root)?;
    app.wait_for_frames();

    let dt = 1.0 / 60.0;
    let mut budget = (args.settle.max(0.0) / dt).ceil() as u64;

    while !app.state().loading_done && budget > 0 {
        app.tick(dt)?;
        budget -= 1;
    }
    app.scroll_to(args.scroll);
    while budget > 0 {
        app.tick(dt)?;
        budget -= 1;
        if !app.is_scrolling() {
            break;
        }
    }

    println!("{}", app.snapshot().to_json()?);
    Ok(())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let page = read_page_json(args.page_path.as_deref())?;
    let viewport = strada::Viewport::new(args.width, args.height)?;
    let layout = strada::solve_layout(&page, viewport)?;
    let json = serde_json::to_string_pretty(&layout).with_context(|| "serialize layout")?;
    println!("{json}");
    Ok(())
}
