use crate::error::Result;
use crate::models::RunMetadata;
use crate::processors::ConversionOutput;
use crate::utils::filename::{metadata_path, output_paths};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// Writes the JSON artifacts of a conversion run into an output directory
pub struct JsonWriter {
    pretty: bool,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Write points, both heat arrays and the run metadata.
    ///
    /// The directory is created if needed. Returns the metadata as written.
    pub fn write_all(
        &self,
        output: &ConversionOutput,
        input_csv: &str,
        out_dir: &Path,
    ) -> Result<RunMetadata> {
        fs::create_dir_all(out_dir)?;

        let paths = output_paths(out_dir);
        self.write_json(&output.points, &paths.points)?;
        self.write_json(&output.heat_presence, &paths.heat_presence)?;
        self.write_json(&output.heat_engagement, &paths.heat_engagement)?;

        let metadata = output.metadata(input_csv, paths);
        let meta_path = metadata_path(out_dir);
        self.write_json(&metadata, &meta_path)?;

        info!(
            out_dir = %out_dir.display(),
            points = metadata.total_points_output,
            "Wrote map artifacts"
        );

        Ok(metadata)
    }

    /// Serialize one value to `path`
    pub fn write_json<T: Serialize + ?Sized>(&self, value: &T, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, value)?;
        } else {
            serde_json::to_writer(&mut writer, value)?;
        }
        writer.flush()?;

        debug!(path = %path.display(), "Wrote JSON file");
        Ok(())
    }

    /// Read back a metadata file written by [`JsonWriter::write_all`]
    pub fn read_metadata(&self, path: &Path) -> Result<RunMetadata> {
        let file = File::open(path)?;
        let metadata = serde_json::from_reader(BufReader::new(file))?;
        Ok(metadata)
    }
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new()
    }
}
