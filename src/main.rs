mod cli;
mod scene;

use anyhow::{Context, Result};
use clap::Parser;
use tessel_blocks::BlockRegistry;
use tessel_world::{WorldGrid, draw_list, first_overlap, overlaps_solid};

use crate::cli::Args;
use crate::scene::Scene;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let registry = BlockRegistry::from_path(&args.blocks)
        .with_context(|| format!("loading block registry {}", args.blocks.display()))?;
    let scene = Scene::from_path(&args.scene)?;

    let mut grid = WorldGrid::with_config(tessel_mesh_cpu::CpuGeometry::new(), &scene.world);
    grid.load(&scene.cells(), scene.width, scene.height)
        .context("loading scene into world grid")?;

    for edit in &args.edits {
        grid.set(edit.x, edit.y, edit.id)
            .with_context(|| format!("applying edit {:?}", edit))?;
        log::info!("set ({}, {}) = {}", edit.x, edit.y, edit.id);
    }

    println!(
        "world {}x{}: {} runs",
        grid.width(),
        grid.height(),
        grid.run_index().len()
    );
    for run in grid.runs() {
        let ty = registry.lookup(run.id());
        println!(
            "  y={:<3} x={:<3} len={:<3} id={:<3} flags={:?}",
            run.y, run.x, run.length, run.id(), ty.flags
        );
    }

    for probe in &args.probes {
        let hit = if args.solid_only {
            overlaps_solid(&grid, &registry, probe)
        } else {
            first_overlap(&grid, probe).is_some()
        };
        println!(
            "probe ({}, {}) {}x{} angle={}: {}",
            probe.x,
            probe.y,
            probe.width,
            probe.height,
            probe.angle,
            if hit { "overlap" } else { "clear" }
        );
    }

    if let Some(camera) = args.draw {
        let items = draw_list(&grid, &registry, &camera);
        println!("draw list ({} items)", items.len());
        for item in items {
            let clip = camera.to_clip(item.center);
            println!(
                "  run ({}, {}) len={} texture={:?} center=({:.2}, {:.2}) clip=({:.3}, {:.3})",
                item.run.x,
                item.run.y,
                item.run.length,
                item.texture,
                item.center.x,
                item.center.y,
                clip.x,
                clip.y
            );
        }
    }

    Ok(())
}
