//! Warnings emitted by overlap queries. Kept in its own test binary because
//! it installs a process-wide logger.

use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use tessel_world::{Probe, WorldGrid, first_overlap, overlapping_runs};

struct Capture {
    records: Mutex<Vec<(Level, String, String)>>,
}

impl Log for Capture {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        self.records.lock().unwrap().push((
            record.level(),
            record.target().to_string(),
            record.args().to_string(),
        ));
    }

    fn flush(&self) {}
}

static LOGGER: Capture = Capture {
    records: Mutex::new(Vec::new()),
};

fn collision_warnings() -> Vec<String> {
    LOGGER
        .records
        .lock()
        .unwrap()
        .drain(..)
        .filter(|(level, target, _)| *level == Level::Warn && target == "collision")
        .map(|(_, _, msg)| msg)
        .collect()
}

#[test]
fn rotated_query_warns_and_axis_aligned_does_not() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let mut grid = WorldGrid::cpu();
    grid.load(&[5, 0, 0, 0], 4, 1).unwrap();
    collision_warnings();

    let flat = Probe::axis_aligned(1.2, 0.0, 1.0, 1.0);
    assert!(flat.is_axis_aligned());
    assert!(!grid.overlaps(&flat));
    assert!(first_overlap(&grid, &flat).is_none());
    assert!(collision_warnings().is_empty());

    let tilted = Probe { angle: 0.25, ..flat };
    assert!(!tilted.is_axis_aligned());
    assert!(grid.overlaps(&tilted));
    let warnings = collision_warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("not axis-aligned"), "{}", warnings[0]);

    // one warning per query, not per run visited
    let wide = Probe {
        angle: 1.0,
        ..Probe::axis_aligned(0.0, 0.0, 20.0, 20.0)
    };
    assert_eq!(overlapping_runs(&grid, &wide).count(), 1);
    assert_eq!(collision_warnings().len(), 1);
}
