use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::constants::generator::OUTPUT_EXTENSION;
use crate::data::{RecordShape, TrainingTriplet};
use crate::errors::SynthError;

/// Destination for assembled triplets.
///
/// A written triplet is permanent; there is no rollback when the
/// surrounding run later fails.
pub trait TripletSink {
    /// Persist one triplet.
    fn append(&mut self, triplet: &TrainingTriplet) -> Result<(), SynthError>;
}

/// Append-only JSON Lines writer, one stream per `(subject, name, shape)`.
///
/// Stream names are unique per worker, so append-mode collisions cannot
/// happen across workers.
pub struct JsonlTripletWriter {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl JsonlTripletWriter {
    /// Open (creating as needed) the stream for one worker.
    pub fn create(
        dir: &Path,
        subject: &str,
        name: &str,
        shape: RecordShape,
    ) -> Result<Self, SynthError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!(
            "{subject}_{name}_{}.{OUTPUT_EXTENSION}",
            shape.as_str()
        ));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    /// Path of the underlying stream.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TripletSink for JsonlTripletWriter {
    fn append(&mut self, triplet: &TrainingTriplet) -> Result<(), SynthError> {
        let line = serde_json::to_vec(triplet)
            .map_err(|err| SynthError::Persistence(std::io::Error::from(err)))?;
        self.writer.write_all(&line)?;
        self.writer.write_all(b"\n")?;
        // Flush per line so an interrupted worker loses no accepted triplet.
        self.writer.flush()?;
        Ok(())
    }
}

/// Collecting sink used by tests and dry runs.
impl TripletSink for Vec<TrainingTriplet> {
    fn append(&mut self, triplet: &TrainingTriplet) -> Result<(), SynthError> {
        self.push(triplet.clone());
        Ok(())
    }
}
