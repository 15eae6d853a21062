//! Small TOML scene fixtures for poking at a world from the command line.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use tessel_world::WorldConfig;

/// `rows[y][x]` holds the block id at `(x, y)`.
#[derive(Clone, Debug, Deserialize)]
pub struct Scene {
    pub width: usize,
    pub height: usize,
    #[serde(default)]
    pub world: WorldConfig,
    pub rows: Vec<Vec<u8>>,
}

impl Scene {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let scene: Scene = toml::from_str(s).context("parsing scene")?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::from_toml_str(&s).with_context(|| format!("loading scene {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        if self.rows.len() != self.height {
            bail!("scene has {} rows, height is {}", self.rows.len(), self.height);
        }
        for (y, row) in self.rows.iter().enumerate() {
            if row.len() != self.width {
                bail!("row {} has {} cells, width is {}", y, row.len(), self.width);
            }
        }
        Ok(())
    }

    /// Row-major buffer in the layout `WorldGrid::load` expects.
    pub fn cells(&self) -> Vec<u8> {
        self.rows.iter().flatten().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessel_world::RebuildPolicy;

    #[test]
    fn parses_rows_and_world_section() {
        let scene = Scene::from_toml_str(
            r#"
            width = 3
            height = 2
            rows = [[0, 1, 1], [2, 0, 0]]

            [world]
            rebuild = "row"
        "#,
        )
        .unwrap();
        assert_eq!(scene.cells(), vec![0, 1, 1, 2, 0, 0]);
        assert_eq!(scene.world.rebuild, RebuildPolicy::RowLocal);
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = Scene::from_toml_str(
            r#"
            width = 3
            height = 2
            rows = [[0, 1, 1], [2, 0]]
        "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn bundled_demo_scene_loads_with_registry() {
        let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let scene = Scene::from_path(root.join("assets/demo_scene.toml")).unwrap();
        let reg = tessel_blocks::BlockRegistry::from_path(root.join("assets/blocks.toml")).unwrap();
        for id in scene.cells() {
            assert!(id == 0 || reg.lookup(id) != tessel_blocks::BlockType::EMPTY, "id {id}");
        }
        let mut grid = tessel_world::WorldGrid::cpu();
        grid.load(&scene.cells(), scene.width, scene.height).unwrap();
        assert_eq!(grid.run_index().row(0).len(), 1);
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.toml");
        fs::write(&path, "width = 1\nheight = 1\nrows = [[4]]\n").unwrap();
        let scene = Scene::from_path(&path).unwrap();
        assert_eq!(scene.world.rebuild, RebuildPolicy::Full);
        assert_eq!(scene.cells(), vec![4]);
    }
}
