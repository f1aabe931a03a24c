use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueHint};
use image_effect::PreprocessPreset;
use log::{info, warn};
use std::{fs, path::PathBuf};
use volshot::{Session, config, scene::VolumeScene, viewer};

#[derive(Parser)]
#[command(author, version, about = "View a grayscale image as 3D surfaces and pseudo volumes")]
struct Cli {
    /// Configuration file, created with defaults when missing
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Directory for figures, scenes and downloads (overrides the config)
    #[arg(long, global = true, value_hint = ValueHint::DirPath)]
    output_dir: Option<PathBuf>,

    /// Preprocessing preset: 1 blur, 2 blur + contrast, 3 sharpen + contrast
    #[arg(long, global = true, value_parser = clap::value_parser!(u8).range(1..=3))]
    preset: Option<u8>,

    /// JPEG or PNG image
    #[arg(value_hint = ValueHint::FilePath)]
    image: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Clone, Copy, PartialEq)]
enum Command {
    /// Surface plot with intensity as height
    Surface,

    /// Contour plot of the height field
    Contour,

    /// Wireframe through every pixel
    Wireframe,

    /// Interactive pseudo-volume of 10 identical slices
    Volume,

    /// Pseudo-volume with adjustable opacity
    AdjustedVolume {
        /// Volume opacity in [0, 1], defaults to the configured value
        #[arg(long)]
        opacity: Option<f32>,
    },

    /// Pseudo time series of 10 brightening frames
    TimeSeries,

    /// Re-encode the grayscale image as PNG
    Download,

    /// Produce every artifact above
    All,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        log::error!("{e:?}");
        eprintln!("Error: {e:?}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_CONFIG_FILE));
    config::init(&config_path)?;

    let conf = config::all();
    volshot::init_logger(&conf.log.level);
    if let Some(reason) = &conf.parse_error {
        warn!("{reason}, using defaults");
    }

    let output_dir = cli.output_dir.clone().unwrap_or(conf.output.dir.clone());
    let preset = cli.preset.map(PreprocessPreset::from_level).transpose()?;

    let mut session = Session::new();
    session
        .upload_path(&cli.image, preset)
        .with_context(|| format!("load {} failed", cli.image.display()))?;

    fs::create_dir_all(&output_dir)
        .with_context(|| format!("create {} failed", output_dir.display()))?;

    let wants = |c: Command| cli.command == c || cli.command == Command::All;

    if wants(Command::Surface) {
        session.surface_figure()?.save(output_dir.join("surface.json"))?;
    }

    if wants(Command::Contour) {
        session.contour_figure()?.save(output_dir.join("contour.json"))?;
    }

    if wants(Command::Wireframe) {
        session.wireframe_figure()?.save(output_dir.join("wireframe.json"))?;
    }

    if wants(Command::Volume) {
        show(&conf, session.volume_scene(&output_dir)?)?;
    }

    if matches!(cli.command, Command::AdjustedVolume { .. } | Command::All) {
        let opacity = match cli.command {
            Command::AdjustedVolume { opacity: Some(opacity) } => opacity,
            _ => conf.viewer.default_opacity,
        };
        show(&conf, session.adjusted_volume_scene(&output_dir, opacity)?)?;
    }

    if wants(Command::TimeSeries) {
        show(&conf, session.time_series_scene(&output_dir)?)?;
    }

    if wants(Command::Download) {
        let path = output_dir.join(&conf.output.download_file_name);
        fs::write(&path, session.download_png()?)
            .with_context(|| format!("write {} failed", path.display()))?;
        info!("image saved to {}", path.display());
    }

    Ok(())
}

fn show(conf: &config::Config, scene: VolumeScene) -> Result<()> {
    viewer::show(&conf.viewer, &scene)?;
    Ok(())
}
