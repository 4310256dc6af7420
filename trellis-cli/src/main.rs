//! Trellis CLI: lay out a panel scene headlessly and print the geometry.
//!
//! Usage:
//!   trellis <scene.json>                       Lay out and print a table
//!   trellis <scene.json> --json                Print the layouts as JSON
//!   trellis <scene.json> --resize 1024x768     Also lay out after a resize
//!
//! Set `RUST_LOG=debug` for pass-level logging.

mod scene;

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use serde::Serialize;
use trellis_common::warning::clear_warnings;
use trellis_common::{EdgeSizes, Size};
use trellis_dom::DomTree;
use trellis_layout::{LayoutBBox, LayoutContext, LayoutTree, ViewId};
use trellis_model::Document;

use scene::{Scene, parse_viewport};

/// Trellis: panel layout inspector
#[derive(Parser, Debug)]
#[command(name = "trellis")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Lay out a scene at its own viewport
    trellis scenes/dashboard.json

    # Override the viewport
    trellis scenes/dashboard.json --width 1920 --height 1080

    # Simulate two window resizes and dump JSON
    trellis scenes/dashboard.json --resize 1024x768 --resize 640x480 --json
"#)]
struct Cli {
    /// Scene file (JSON)
    #[arg(value_name = "SCENE")]
    scene: PathBuf,

    /// Viewport width, overriding the scene
    #[arg(long)]
    width: Option<u32>,

    /// Viewport height, overriding the scene
    #[arg(long)]
    height: Option<u32>,

    /// Resize the viewport after the initial layout (repeatable)
    #[arg(long = "resize", value_name = "WxH", value_parser = parse_viewport)]
    resizes: Vec<Size>,

    /// Print JSON instead of a table
    #[arg(short, long)]
    json: bool,
}

/// The geometry of every view after one pass.
#[derive(Debug, Serialize)]
struct Snapshot {
    viewport: Size,
    idle: bool,
    views: Vec<ViewRow>,
}

#[derive(Debug, Serialize)]
struct ViewRow {
    name: String,
    #[serde(flatten)]
    bbox: LayoutBBox,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let scene = Scene::load(&cli.scene)?;
    let snapshots = run(&cli, &scene)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshots)?);
    } else {
        for snapshot in &snapshots {
            print_snapshot(snapshot);
        }
    }
    Ok(())
}

/// Mount the scene, then lay it out again after every requested resize.
fn run(cli: &Cli, scene: &Scene) -> Result<Vec<Snapshot>> {
    clear_warnings();

    let viewport = Size::new(
        cli.width.map_or(scene.viewport.width, f64::from),
        cli.height.map_or(scene.viewport.height, f64::from),
    );
    let mut dom = DomTree::new(viewport);
    if let Some(margin) = scene.body_margin {
        let body = dom.body();
        dom.set_margin(body, EdgeSizes::uniform(margin));
    }

    let mut doc = Document::new();
    let root = doc.insert_tree(&scene.root);
    doc.add_root(root)?;

    let idle = Rc::new(Cell::new(false));
    let flag = Rc::clone(&idle);
    let _idle = doc.on_idle(move |_| flag.set(true));

    let mut tree = LayoutTree::new(scene.options.clone());
    let view = tree
        .mount(root, None, &mut LayoutContext::new(&doc, &mut dom))
        .context("initial layout failed")?;

    let mut snapshots = vec![snapshot(&tree, view, viewport, idle.get())?];
    for &size in &cli.resizes {
        dom.resize_viewport(size);
        let passes = tree
            .process_pending(&mut LayoutContext::new(&doc, &mut dom))
            .with_context(|| format!("layout after resize to {}x{} failed", size.width, size.height))?;
        log::debug!("resize to {}x{}: {passes} pass(es)", size.width, size.height);
        snapshots.push(snapshot(&tree, view, size, idle.get())?);
    }
    Ok(snapshots)
}

fn snapshot(tree: &LayoutTree, root: ViewId, viewport: Size, idle: bool) -> Result<Snapshot> {
    let views = tree
        .dump_layout(root)?
        .into_iter()
        .map(|(name, bbox)| ViewRow { name, bbox })
        .collect();
    Ok(Snapshot {
        viewport,
        idle,
        views,
    })
}

fn print_snapshot(snapshot: &Snapshot) {
    let heading = format!(
        "=== Viewport {}x{} ===",
        snapshot.viewport.width, snapshot.viewport.height
    );
    println!("{}", heading.bold());
    println!(
        "{:<28} {:>9} {:>9} {:>9} {:>9}",
        "view".dimmed(),
        "left".dimmed(),
        "top".dimmed(),
        "width".dimmed(),
        "height".dimmed()
    );
    for row in &snapshot.views {
        println!(
            "{:<28} {:>9.1} {:>9.1} {:>9.1} {:>9.1}",
            row.name.cyan(),
            row.bbox.left,
            row.bbox.top,
            row.bbox.width,
            row.bbox.height
        );
    }
    if snapshot.idle {
        println!("{}", "idle".green());
    } else {
        println!("{}", "waiting for deferred renders".yellow());
    }
    println!();
}
