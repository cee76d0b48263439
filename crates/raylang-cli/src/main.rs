mod demo;
mod tree;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use raylang_core::hash::hash_document;
use raylang_core::{Color, RaylangConfig};
use raylang_ir::{codec, SceneDescriptor, SCHEMA_VERSION};
use raylang_render::{submit, CommandRenderer};

#[derive(Parser)]
#[command(
    name = "raylang",
    version,
    about = "Raylang: build, check and render ray tracer scenes",
    long_about = "Raylang describes ray tracer scenes as a tree of primitives, transforms,\nmaterials and meshes, and hands them to an external renderer as a versioned\nJSON document."
)]
struct Cli {
    /// Path to the project configuration file
    #[arg(long, global = true, default_value = RaylangConfig::FILE_NAME)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode and validate a scene document
    Check {
        /// Path to the scene .json file
        #[arg()]
        file: PathBuf,
    },

    /// Rewrite a scene document in canonical form
    Fmt {
        /// Path to the scene .json file
        #[arg()]
        file: PathBuf,

        /// Check mode: exit with error if input is not formatted (for CI)
        #[arg(long)]
        check: bool,
    },

    /// Print the node tree and the material each leaf resolves to
    Inspect {
        /// Path to the scene .json file
        #[arg()]
        file: PathBuf,
    },

    /// Hand a scene document to the external renderer
    Render {
        /// Path to the scene .json file
        #[arg()]
        file: PathBuf,

        /// Override the scene's thread count
        #[arg(long)]
        threads: Option<u32>,

        /// Override the output image path
        #[arg(short, long)]
        output: Option<String>,

        /// Renderer executable (default: from config)
        #[arg(long)]
        renderer: Option<String>,
    },

    /// Write an example scene document
    Demo {
        /// Where to write the document (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Display version and renderer info
    Info,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = RaylangConfig::load_or_default(&cli.config)
        .with_context(|| format!("failed to load config: {}", cli.config.display()))?;

    match cli.command {
        Commands::Check { file } => cmd_check(&file),
        Commands::Fmt { file, check } => cmd_fmt(&file, check),
        Commands::Inspect { file } => cmd_inspect(&file),
        Commands::Render {
            file,
            threads,
            output,
            renderer,
        } => cmd_render(&file, threads, output, renderer, config),
        Commands::Demo { output } => cmd_demo(output, &config),
        Commands::Info => cmd_info(&config),
    }
}

fn load_scene(file: &Path) -> Result<(Vec<u8>, SceneDescriptor)> {
    let bytes =
        std::fs::read(file).with_context(|| format!("failed to read file: {}", file.display()))?;
    let scene = codec::decode(&bytes)
        .with_context(|| format!("{} is not a valid scene document", file.display()))?;
    Ok((bytes, scene))
}

fn canonical(scene: &SceneDescriptor) -> Result<String> {
    let mut text = String::from_utf8(codec::encode_pretty(scene)?)?;
    text.push('\n');
    Ok(text)
}

fn cmd_check(file: &Path) -> Result<()> {
    println!("🔍 Checking {}", file.display());

    let (_, scene) = load_scene(file)?;
    println!("   ✓ Decode OK");
    println!("   ✓ Validate OK");

    let fingerprint = hash_document(&codec::encode(&scene)?);
    println!();
    println!(
        "   {}x{} px, {} subsample(s), {} thread(s)",
        scene.width, scene.height, scene.subsamples, scene.threads
    );
    println!(
        "   {} light(s), {} leaf node(s), depth {}",
        scene.lights.len(),
        scene.leaf_count(),
        scene.objects.depth()
    );
    println!("   Output:      {}", scene.image);
    println!("   Fingerprint: {}", fingerprint);
    println!();
    println!("   ✅ No errors found.");
    Ok(())
}

fn cmd_fmt(file: &Path, check: bool) -> Result<()> {
    let (bytes, scene) = load_scene(file)?;
    let formatted = canonical(&scene)?;

    if check {
        if bytes != formatted.as_bytes() {
            anyhow::bail!("File is not properly formatted: {}", file.display());
        }
        println!("   ✨ {} is properly formatted", file.display());
    } else {
        std::fs::write(file, formatted)
            .with_context(|| format!("failed to write formatter output: {}", file.display()))?;
        println!("   ✨ Formatted {}", file.display());
    }
    Ok(())
}

fn cmd_inspect(file: &Path) -> Result<()> {
    let (_, scene) = load_scene(file)?;

    println!("🔍 Raylang Scene Inspector");
    println!(
        "📦 Scene: {} ({}x{}, {} light(s))",
        file.display(),
        scene.width,
        scene.height,
        scene.lights.len()
    );
    if let Some(material) = &scene.default_material {
        println!("   Default material: {}", tree::describe_material(material));
    }
    println!();
    for line in tree::render_tree(&scene.objects) {
        println!("   {}", line);
    }

    println!();
    println!("   Leaves:");
    for leaf in scene.resolve_leaves() {
        let material = leaf
            .material
            .map(tree::describe_material)
            .unwrap_or_else(|| "<none>".to_string());
        println!("   {} → {}", leaf.path, material);
        let origin = leaf.world_matrix().transform_point(raylang_core::Vector3::zero());
        println!("      local origin at {}", origin);
    }
    Ok(())
}

fn cmd_render(
    file: &Path,
    threads: Option<u32>,
    output: Option<String>,
    renderer: Option<String>,
    mut config: RaylangConfig,
) -> Result<()> {
    let (_, mut scene) = load_scene(file)?;
    if let Some(threads) = threads {
        scene.threads = threads;
    }
    if let Some(output) = output {
        scene.image = output;
    }
    if let Some(program) = renderer {
        config.renderer.program = program;
    }

    let renderer = CommandRenderer::from_config(&config.renderer);
    if !renderer.is_available() {
        tracing::warn!(
            "Renderer '{}' did not answer --version; trying anyway",
            renderer.program()
        );
    }

    println!("🎬 Rendering {}", file.display());
    let outcome = submit(&renderer, &scene)
        .with_context(|| format!("failed to render {}", file.display()))?;

    println!();
    println!("   ✅ Wrote {}", outcome.image.display());
    println!("   Fingerprint: {}", outcome.fingerprint.short());
    println!("   Time:        {:.2}s", outcome.elapsed.as_secs_f64());
    Ok(())
}

fn cmd_demo(output: Option<PathBuf>, config: &RaylangConfig) -> Result<()> {
    // The image lands next to the document, relative to where the renderer runs.
    let image = match &output {
        Some(path) => path.with_extension("png").to_string_lossy().into_owned(),
        None => "demo.png".to_string(),
    };
    let scene = demo::demo_scene(&config.render, &image)?;
    let document = canonical(&scene)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            std::fs::write(&path, document)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("✅ Wrote demo scene to {}", path.display());
        }
        None => print!("{}", document),
    }
    Ok(())
}

fn cmd_info(config: &RaylangConfig) -> Result<()> {
    let renderer = CommandRenderer::from_config(&config.renderer);

    println!("🎨 Raylang Scene Toolkit");
    println!("   Version:   {}", env!("CARGO_PKG_VERSION"));
    println!("   Schema:    v{}", SCHEMA_VERSION);
    println!(
        "   Renderer:  {} {}",
        renderer.program(),
        if renderer.is_available() {
            "available ✓"
        } else {
            "NOT FOUND ✗"
        }
    );
    println!("   Staging:   {}", renderer.staging_dir().display());
    println!(
        "   Defaults:  {} thread(s), {} subsample(s)",
        config.render.threads, config.render.subsamples
    );
    let names: Vec<String> = Color::NAMED.iter().map(|c| c.to_string()).collect();
    println!("   Colors:    {}", names.join(", "));
    Ok(())
}
