use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sha2::{Digest, Sha256};

use photobooth::{
    ComposeConfig, ComposeRequest, ComposeSession, CompositeArtifact, LayoutKind, PhotoSource,
    TemplateCatalog, TemplateSource,
};

#[derive(Parser, Debug)]
#[command(name = "photobooth", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite photos into a template and write a PNG.
    Compose(ComposeArgs),
    /// Resolve a template through the catalog, then composite.
    Catalog(CatalogArgs),
    /// Print the slots detected in a template as JSON.
    Slots(SlotsArgs),
}

#[derive(Parser, Debug)]
struct OutputArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Also write the PNG as a `data:` URI next to the output (`<out>.txt`).
    #[arg(long, default_value_t = false)]
    data_uri: bool,

    /// Write a JSON compose report to this path.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Print the SHA-256 of the written PNG.
    #[arg(long, default_value_t = false)]
    sha256: bool,

    /// Compose config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Template path or http(s) URL.
    #[arg(long)]
    template: String,

    /// Layout: `1x1`..`1x4`, a name (`single`, `strip`, ..) or a template id (`1x3-kawaii`).
    #[arg(long)]
    layout: LayoutKind,

    /// Style identifier; picks the fallback palette.
    #[arg(long, default_value = "default")]
    style: String,

    /// Photo path or data URI, in slot order. Repeatable.
    #[arg(long = "photo")]
    photos: Vec<String>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Parser, Debug)]
struct CatalogArgs {
    /// Directory the catalog's asset paths are relative to.
    #[arg(long)]
    assets_root: PathBuf,

    /// Catalog JSON; the built-in catalog is used when omitted.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Template id, e.g. `1x4-strip`.
    #[arg(long)]
    template_id: String,

    /// Style id, e.g. `1x4-groovy`.
    #[arg(long)]
    style_id: String,

    /// Photo path or data URI. Only the first N are used for an N-slot layout.
    #[arg(long = "photo")]
    photos: Vec<String>,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Parser, Debug)]
struct SlotsArgs {
    /// Template path or http(s) URL.
    #[arg(long)]
    template: String,

    /// Layout the template is rendered at.
    #[arg(long)]
    layout: LayoutKind,

    /// Compose config JSON.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Catalog(args) => cmd_catalog(args),
        Command::Slots(args) => cmd_slots(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ComposeConfig> {
    match path {
        Some(p) => Ok(ComposeConfig::from_path(p)?),
        None => Ok(ComposeConfig::default()),
    }
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.output.config.as_deref())?;
    let req = ComposeRequest {
        template: TemplateSource::from_reference(&args.template),
        layout: args.layout,
        style: args.style,
        photos: args
            .photos
            .iter()
            .map(|p| PhotoSource::from_reference(p))
            .collect(),
    };
    let artifact = ComposeSession::new(cfg)?.compose(&req)?;
    write_outputs(&artifact, &args.output)
}

fn cmd_catalog(args: CatalogArgs) -> anyhow::Result<()> {
    let catalog = match &args.catalog {
        Some(p) => TemplateCatalog::from_path(p)?,
        None => TemplateCatalog::default(),
    };
    let resolved = catalog.resolve(&args.template_id, &args.style_id)?;
    let photos: Vec<PhotoSource> = args
        .photos
        .iter()
        .map(|p| PhotoSource::from_reference(p))
        .collect();

    let cfg = load_config(args.output.config.as_deref())?;
    let req = ComposeRequest {
        template: TemplateSource::Path(args.assets_root.join(&resolved.asset)),
        layout: resolved.layout,
        style: resolved.style,
        photos: photobooth::select_photos(&photos, resolved.layout),
    };
    let artifact = ComposeSession::new(cfg)?.compose(&req)?;
    write_outputs(&artifact, &args.output)
}

fn cmd_slots(args: SlotsArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let loaded = photobooth::load_template(
        &TemplateSource::from_reference(&args.template),
        args.layout,
        "default",
        &cfg,
    );
    if let photobooth::TemplateOrigin::Fallback { reason } = &loaded.origin {
        anyhow::bail!("template could not be loaded: {reason}");
    }
    let (_, slots) = photobooth::segment_template(&loaded.buffer, &cfg);
    let json = serde_json::to_string_pretty(&slots).context("serialize slots")?;
    println!("{json}");
    Ok(())
}

fn write_outputs(artifact: &CompositeArtifact, out: &OutputArgs) -> anyhow::Result<()> {
    artifact.write_png(&out.out)?;
    eprintln!("wrote {}", out.out.display());

    if out.data_uri {
        let path = out.out.with_extension("png.txt");
        std::fs::write(&path, artifact.to_data_uri())
            .with_context(|| format!("write data uri '{}'", path.display()))?;
        eprintln!("wrote {}", path.display());
    }

    if let Some(path) = &out.report {
        let json = artifact.report.to_json()?;
        std::fs::write(path, json)
            .with_context(|| format!("write report '{}'", path.display()))?;
        eprintln!("wrote {}", path.display());
    }

    if out.sha256 {
        let digest = Sha256::digest(&artifact.png);
        let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
        println!("{hex}  {}", out.out.display());
    }

    Ok(())
}
