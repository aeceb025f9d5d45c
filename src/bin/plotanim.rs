use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use plotanim::{
    AnimationOptions, AnimationRequest, BarProgress, FolderSource, FrameSource, FunctionSource,
    LogProgress, NoProgress, Params, Progress, SvgTemplate,
};

#[derive(Parser, Debug)]
#[command(name = "plotanim", version)]
struct Cli {
    /// Log progress and diagnostics to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Hide the progress bar.
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Animate the image files of a folder (`<EXPORT_PATH>[/<NAME>]` without extension).
    Folder(FolderArgs),
    /// Animate an SVG template, substituting `{{param}}` with each value.
    Template(TemplateArgs),
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output directory, or output path stem when `--name` is omitted.
    export_path: PathBuf,

    /// Output file name (its extension is replaced by the container extension).
    #[arg(long)]
    name: Option<String>,

    /// JSON file with animation options; flags below override it.
    #[arg(long)]
    options: Option<PathBuf>,

    /// Frames per second.
    #[arg(long)]
    fps: Option<f64>,

    /// Play the animation once instead of looping (GIF only).
    #[arg(long)]
    no_loop: bool,

    /// Play forward then backward.
    #[arg(long)]
    pingpong: bool,

    /// Output container.
    #[arg(long, value_enum)]
    format: Option<FormatChoice>,
}

#[derive(Args, Debug)]
struct FolderArgs {
    #[command(flatten)]
    out: OutputArgs,

    /// Extension of the frame images to collect.
    #[arg(long, default_value = ".png")]
    frame_ext: String,
}

#[derive(Args, Debug)]
struct TemplateArgs {
    #[command(flatten)]
    out: OutputArgs,

    /// SVG template file.
    #[arg(long)]
    svg: PathBuf,

    /// Name of the animated placeholder.
    #[arg(long)]
    param: String,

    /// Comma-separated values for the animated placeholder.
    #[arg(long, value_delimiter = ',', conflicts_with = "linspace")]
    values: Vec<String>,

    /// Evenly spaced numeric values, as `from:to:count`.
    #[arg(long)]
    linspace: Option<String>,

    /// Fixed placeholder values, as `key=value` (repeatable).
    #[arg(long = "set", value_name = "KEY=VALUE")]
    fixed: Vec<String>,

    /// Rasterization resolution.
    #[arg(long)]
    dpi: Option<f32>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Gif,
    Mp4,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_writer(std::io::stderr)
            .init();
    }

    let mut progress: Box<dyn Progress> = if cli.verbose {
        Box::new(LogProgress::default())
    } else if cli.quiet {
        Box::new(NoProgress)
    } else {
        Box::new(BarProgress::new())
    };
    let progress = progress.as_mut();

    match cli.cmd {
        Command::Folder(args) => cmd_folder(args, progress),
        Command::Template(args) => cmd_template(args, progress),
    }
}

fn load_options(args: &OutputArgs) -> anyhow::Result<AnimationOptions> {
    let mut opts = match &args.options {
        Some(path) => AnimationOptions::from_path(path)?,
        None => AnimationOptions::default(),
    };
    if let Some(fps) = args.fps {
        opts.fps = fps;
    }
    if args.no_loop {
        opts.looping = false;
    }
    if args.pingpong {
        opts.pingpong = true;
    }
    if let Some(format) = args.format {
        opts.extension = match format {
            FormatChoice::Gif => ".gif",
            FormatChoice::Mp4 => ".mp4",
        }
        .to_string();
    }
    Ok(opts)
}

fn run(
    out: &OutputArgs,
    options: AnimationOptions,
    source: FrameSource<'_>,
    progress: &mut dyn Progress,
) -> anyhow::Result<()> {
    let mut request = AnimationRequest::new(&out.export_path, source).with_options(options);
    if let Some(name) = &out.name {
        request = request.with_name(name);
    }
    let out_path = request.output_path()?;
    plotanim::make_animation_with_progress(request, progress)?;
    eprintln!("wrote {}", out_path.display());
    Ok(())
}

fn cmd_folder(args: FolderArgs, progress: &mut dyn Progress) -> anyhow::Result<()> {
    let options = load_options(&args.out)?;
    let source = FrameSource::Folder(FolderSource::new(args.frame_ext));
    run(&args.out, options, source, progress)
}

fn cmd_template(args: TemplateArgs, progress: &mut dyn Progress) -> anyhow::Result<()> {
    let mut options = load_options(&args.out)?;
    if let Some(dpi) = args.dpi {
        options.dpi = dpi;
    }

    let template = SvgTemplate::from_path(&args.svg)?;
    let values = match &args.linspace {
        Some(spec) => linspace(spec)?,
        None => args.values.iter().map(|v| parse_value(v)).collect(),
    };
    anyhow::ensure!(
        !values.is_empty(),
        "provide --values or --linspace for '{}'",
        args.param
    );

    let mut fixed = Params::new();
    for kv in &args.fixed {
        let (key, value) = kv
            .split_once('=')
            .with_context(|| format!("--set expects KEY=VALUE, got '{kv}'"))?;
        fixed.insert(key.trim().to_string(), parse_value(value));
    }

    let source = FunctionSource::new(|params: &Params| template.render(params))
        .with_params(fixed)
        .animate(args.param.clone(), values);
    run(&args.out, options, FrameSource::Function(source), progress)
}

/// Numbers and booleans become JSON values, anything else stays a string.
fn parse_value(s: &str) -> serde_json::Value {
    match serde_json::from_str::<serde_json::Value>(s.trim()) {
        Ok(v @ (serde_json::Value::Number(_) | serde_json::Value::Bool(_))) => v,
        _ => serde_json::Value::String(s.to_string()),
    }
}

fn linspace(spec: &str) -> anyhow::Result<Vec<serde_json::Value>> {
    let parts: Vec<&str> = spec.split(':').collect();
    let [from, to, count] = parts.as_slice() else {
        anyhow::bail!("--linspace expects from:to:count, got '{spec}'");
    };
    let from: f64 = from.trim().parse().context("parse linspace start")?;
    let to: f64 = to.trim().parse().context("parse linspace end")?;
    let count: usize = count.trim().parse().context("parse linspace count")?;
    let values = match count {
        0 => Vec::new(),
        1 => vec![from],
        n => (0..n)
            .map(|i| from + (to - from) * (i as f64) / ((n - 1) as f64))
            .collect(),
    };
    Ok(values.into_iter().map(serde_json::Value::from).collect())
}
