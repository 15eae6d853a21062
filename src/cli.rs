use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use tessel_world::{Camera, Probe};

/// Inspect a tile world from the command line.
#[derive(Parser, Debug)]
#[command(name = "tessel", version, about)]
pub struct Args {
    /// Block registry TOML
    #[arg(long)]
    pub blocks: PathBuf,

    /// Scene TOML with `width`, `height` and `rows`
    #[arg(long)]
    pub scene: PathBuf,

    /// Cell edit `x,y,id`, applied in order before any query
    #[arg(long = "set", value_parser = parse_edit)]
    pub edits: Vec<Edit>,

    /// Probe `x,y,w,h[,angle]` to test against the world
    #[arg(long = "probe", value_parser = parse_probe)]
    pub probes: Vec<Probe>,

    /// Camera `x,y,w,h`; prints the draw list it would see
    #[arg(long, value_parser = parse_camera)]
    pub draw: Option<Camera>,

    /// Only count overlaps with solid block types
    #[arg(long)]
    pub solid_only: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edit {
    pub x: usize,
    pub y: usize,
    pub id: u8,
}

fn parse_list<T: FromStr>(s: &str, min: usize, max: usize) -> Result<Vec<T>, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() < min || parts.len() > max {
        return Err(if min == max {
            format!("expected {} comma-separated values, got {}", min, parts.len())
        } else {
            format!(
                "expected {} to {} comma-separated values, got {}",
                min,
                max,
                parts.len()
            )
        });
    }
    parts
        .into_iter()
        .map(|p| p.parse::<T>().map_err(|_| format!("invalid value `{}`", p)))
        .collect()
}

pub fn parse_edit(s: &str) -> Result<Edit, String> {
    let v: Vec<usize> = parse_list(s, 3, 3)?;
    let id = u8::try_from(v[2]).map_err(|_| format!("block id {} does not fit in 0..=255", v[2]))?;
    Ok(Edit {
        x: v[0],
        y: v[1],
        id,
    })
}

pub fn parse_probe(s: &str) -> Result<Probe, String> {
    let v: Vec<f32> = parse_list(s, 4, 5)?;
    Ok(Probe {
        x: v[0],
        y: v[1],
        width: v[2],
        height: v[3],
        angle: v.get(4).copied().unwrap_or(0.0),
    })
}

pub fn parse_camera(s: &str) -> Result<Camera, String> {
    let v: Vec<f32> = parse_list(s, 4, 4)?;
    Ok(Camera::new(v[0], v[1], v[2], v[3]))
}
