use anyhow::{Context, Result};
use clap::ValueEnum;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Accelerometer axis fed to the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Channel {
    X,
    Y,
    Z,
}

/// One walking trial, column by column.
#[derive(Debug, Clone, Default)]
pub struct Recording {
    pub timestamps: Vec<f64>,
    pub x: Vec<f32>,
    pub y: Vec<f32>,
    pub z: Vec<f32>,
}

impl Recording {
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn channel(&self, channel: Channel) -> &[f32] {
        match channel {
            Channel::X => &self.x,
            Channel::Y => &self.y,
            Channel::Z => &self.z,
        }
    }
}

/// Parse `t,x,y,z` records following a single header row.
///
/// The header is skipped without looking at its contents or width.
pub fn read_recording<R: Read>(reader: R) -> Result<Recording> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut recording = Recording::default();
    for (n, record) in rdr.deserialize::<(f64, f32, f32, f32)>().enumerate() {
        let (t, x, y, z) = record.with_context(|| format!("failed to read record {}", n + 1))?;
        recording.timestamps.push(t);
        recording.x.push(x);
        recording.y.push(y);
        recording.z.push(z);
    }

    Ok(recording)
}

pub fn read_recording_file(path: &Path) -> Result<Recording> {
    let file = File::open(path).with_context(|| format!("failed to open '{}'", path.display()))?;
    read_recording(BufReader::new(file))
        .with_context(|| format!("failed to parse '{}'", path.display()))
}
