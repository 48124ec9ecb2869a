use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{MoveError, RecordError};
use crate::game::{Board, COLS};

/// One training example: the board a search player faced and the column it chose.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TrainingSample {
    /// Row-major cell values, 0 empty, 1 red, 2 yellow.
    pub board: Vec<u8>,
    /// One-hot over the seven columns.
    pub label: Vec<u8>,
}

impl TrainingSample {
    pub fn new(board: &Board, column: usize) -> Result<Self, MoveError> {
        if column >= COLS {
            return Err(MoveError::InvalidColumn(column));
        }
        let mut label = vec![0; COLS];
        label[column] = 1;
        Ok(TrainingSample {
            board: board.encode().to_vec(),
            label,
        })
    }

    /// Index of the chosen column, if the label is a valid one-hot vector.
    pub fn column(&self) -> Option<usize> {
        if self.label.len() != COLS || self.label.iter().filter(|&&v| v != 0).count() != 1 {
            return None;
        }
        self.label.iter().position(|&v| v == 1)
    }
}

/// Writes per-game sample files under one directory.
///
/// Layout: `<dir>/Game{n}_Depth_{depth}.jsonl`, one JSON sample per line.
#[derive(Debug, Clone)]
pub struct SampleRecorder {
    dir: PathBuf,
    depth: usize,
}

impl SampleRecorder {
    pub fn new(dir: impl Into<PathBuf>, depth: usize) -> Result<Self, RecordError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(SampleRecorder { dir, depth })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_path(&self, game: usize) -> PathBuf {
        self.dir
            .join(format!("Game{}_Depth_{}.jsonl", game, self.depth))
    }

    /// Open the temporary file for game `game`. Nothing is visible under the
    /// final name until [`GameSamples::finish`].
    pub fn start_game(&self, game: usize) -> Result<GameSamples, RecordError> {
        let final_path = self.file_path(game);
        let mut tmp_name = final_path.clone().into_os_string();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        let writer = BufWriter::new(File::create(&tmp_path)?);
        Ok(GameSamples {
            tmp_path,
            final_path,
            writer,
            count: 0,
        })
    }
}

/// Samples of a game in progress.
#[derive(Debug)]
pub struct GameSamples {
    tmp_path: PathBuf,
    final_path: PathBuf,
    writer: BufWriter<File>,
    count: usize,
}

impl GameSamples {
    pub fn record(&mut self, board: &Board, column: usize) -> Result<(), RecordError> {
        let line = serde_json::to_string(&TrainingSample::new(board, column)?)?;
        writeln!(self.writer, "{line}")?;
        self.count += 1;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Flush and move the file to its final name.
    pub fn finish(mut self) -> Result<PathBuf, RecordError> {
        self.writer.flush()?;
        drop(self.writer);
        if self.final_path.exists() {
            fs::remove_file(&self.final_path)?;
        }
        fs::rename(&self.tmp_path, &self.final_path)?;
        debug!(path = %self.final_path.display(), samples = self.count, "samples written");
        Ok(self.final_path)
    }
}

/// Load every sample from a file written by [`SampleRecorder`].
pub fn read_samples(path: &Path) -> Result<Vec<TrainingSample>, RecordError> {
    let reader = BufReader::new(File::open(path)?);
    let mut samples = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let sample =
            serde_json::from_str(&line).map_err(|source| RecordError::MalformedSample {
                path: path.to_path_buf(),
                line: idx + 1,
                source,
            })?;
        samples.push(sample);
    }
    Ok(samples)
}
