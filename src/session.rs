use crate::compare;
use crate::config::Settings;
use crate::errors::{CompareError, HashError};
use crate::file_ops;
use crate::models::{Algorithm, SessionRecord};
use anyhow::{Context, Result};
use log::{info, warn};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

const BANNER: &str = "===================================================";
const SEPARATOR: &str = "---------------------------------------------------";
const MODE_PROMPT: &str =
    "Choose (1) compute a hash or (2) compare two files ('history' to review, 'exit' to quit): ";
const PATH_PROMPT: &str = "Path of the file to hash: ";
const FIRST_PROMPT: &str = "Path of file 1: ";
const SECOND_PROMPT: &str = "Path of file 2: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Digest,
    Compare,
    History,
    Exit,
}

impl Mode {
    pub fn parse(input: &str) -> Option<Mode> {
        let t = input.trim();
        match t {
            "1" => Some(Mode::Digest),
            "2" => Some(Mode::Compare),
            _ if t.eq_ignore_ascii_case("exit") => Some(Mode::Exit),
            _ if t.eq_ignore_ascii_case("history") => Some(Mode::History),
            _ => None,
        }
    }
}

/// Everything one loop iteration needs, read up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Digest {
        algorithm: String,
        path: PathBuf,
    },
    Compare {
        algorithm: String,
        first: PathBuf,
        second: PathBuf,
    },
    History,
    Invalid(String),
    Exit,
}

/// The interactive console loop. Generic over its streams so it can be
/// scripted in tests.
pub struct Session<R, W> {
    input: R,
    output: W,
    settings: Settings,
    history: Vec<SessionRecord>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, settings: Settings) -> Self {
        Session {
            input,
            output,
            settings,
            history: Vec::new(),
        }
    }

    pub fn history(&self) -> &[SessionRecord] {
        &self.history
    }

    /// Runs until `exit` or end of input.
    pub async fn run(&mut self) -> Result<()> {
        writeln!(self.output, "{BANNER}")?;
        writeln!(self.output, "    File Integrity Checker (Basic Hashing Utility)")?;
        writeln!(self.output, "{BANNER}")?;
        info!("session started, default algorithm {}", self.settings.default_algorithm);

        loop {
            match self.read_request()? {
                Request::Exit => break,
                Request::Invalid(input) => {
                    warn!("invalid mode {:?}", input);
                    writeln!(self.output, "✗ Please enter 1 or 2 only")?;
                }
                Request::Digest { algorithm, path } => self.digest(algorithm, &path).await?,
                Request::Compare {
                    algorithm,
                    first,
                    second,
                } => self.compare(&algorithm, &first, &second).await?,
                Request::History => self.print_history()?,
            }
            writeln!(self.output, "{SEPARATOR}")?;
        }

        info!("session finished with {} records", self.history().len());
        Ok(())
    }

    fn read_request(&mut self) -> Result<Request> {
        let Some(line) = self.prompt(MODE_PROMPT)? else {
            return Ok(Request::Exit);
        };
        let Some(mode) = Mode::parse(&line) else {
            return Ok(Request::Invalid(line.trim().to_string()));
        };

        let request = match mode {
            Mode::Exit => Request::Exit,
            Mode::History => Request::History,
            Mode::Digest => {
                let Some(algorithm) = self.prompt_algorithm()? else {
                    return Ok(Request::Exit);
                };
                let Some(path) = self.prompt(PATH_PROMPT)? else {
                    return Ok(Request::Exit);
                };
                Request::Digest {
                    algorithm,
                    path: clean_path(&path),
                }
            }
            Mode::Compare => {
                let Some(algorithm) = self.prompt_algorithm()? else {
                    return Ok(Request::Exit);
                };
                let Some(first) = self.prompt(FIRST_PROMPT)? else {
                    return Ok(Request::Exit);
                };
                let Some(second) = self.prompt(SECOND_PROMPT)? else {
                    return Ok(Request::Exit);
                };
                Request::Compare {
                    algorithm,
                    first: clean_path(&first),
                    second: clean_path(&second),
                }
            }
        };
        Ok(request)
    }

    fn prompt_algorithm(&mut self) -> Result<Option<String>> {
        let default = self.settings.default_algorithm;
        let label = format!("Hash algorithm (e.g. md5, sha256 - default: {default}): ");
        Ok(self.prompt(&label)?.map(|a| {
            let a = a.trim();
            if a.is_empty() {
                default.as_str().to_string()
            } else {
                a.to_string()
            }
        }))
    }

    /// `None` at end of input.
    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .context("failed to read from console")?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    async fn digest(&mut self, algorithm: String, path: &Path) -> Result<()> {
        let job = move |p: &Path| file_ops::compute_digest(p, &algorithm);
        match file_ops::spawn_digest(path.to_path_buf(), job).await {
            Ok(digest) => {
                writeln!(
                    self.output,
                    "\n✓ Hash ({}): {}",
                    digest.algorithm().label(),
                    digest
                )?;
                self.history.push(SessionRecord::digest(path, &digest));
            }
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    async fn compare(&mut self, algorithm: &str, first: &Path, second: &Path) -> Result<()> {
        match compare::compare_files(first, second, algorithm).await {
            Ok(cmp) => {
                let label = cmp.algorithm.label();
                writeln!(self.output, "\n--- Comparison result ---")?;
                writeln!(self.output, "File 1 ({label}): {}", cmp.first_digest)?;
                writeln!(self.output, "File 2 ({label}): {}", cmp.second_digest)?;
                if cmp.is_match() {
                    writeln!(self.output, "✓ Hashes match: contents are identical")?;
                } else {
                    writeln!(
                        self.output,
                        "✗ Hashes differ: contents have been modified (tampered)"
                    )?;
                }
                self.history.push(SessionRecord::comparison(&cmp));
            }
            Err(CompareError::Algorithm(e)) => self.report(&e)?,
            Err(e) => {
                for err in e.errors() {
                    self.report(err)?;
                }
                writeln!(self.output, "✗ Could not compare the files; no verdict")?;
            }
        }
        Ok(())
    }

    fn report(&mut self, err: &HashError) -> Result<()> {
        warn!("{:?}: {err}", err.kind());
        match err {
            HashError::FileNotFound { path } => {
                writeln!(self.output, "✗ File not found: {}", path.display())?
            }
            HashError::UnsupportedAlgorithm { name } => {
                writeln!(self.output, "✗ Unsupported hash algorithm: {name:?}")?;
                writeln!(self.output, "  Supported: {}", Algorithm::supported_names())?
            }
            HashError::ReadFailure { path, source } => writeln!(
                self.output,
                "✗ Error while hashing {}: {source}",
                path.display()
            )?,
        }
        Ok(())
    }

    fn print_history(&mut self) -> Result<()> {
        if self.history.is_empty() {
            writeln!(self.output, "No checks recorded in this session yet")?;
            return Ok(());
        }
        let json = serde_json::to_string_pretty(&self.history)?;
        writeln!(self.output, "{json}")?;
        Ok(())
    }
}

/// Strip one layer of matching quotes, as left behind by drag-and-drop into
/// a terminal; quoted text is kept verbatim. Unquoted input is trimmed unless
/// it names an existing file exactly as typed.
fn clean_path(raw: &str) -> PathBuf {
    let t = raw.trim();
    if let Some(quoted) = ['"', '\'']
        .iter()
        .find_map(|q| t.strip_prefix(*q).and_then(|s| s.strip_suffix(*q)))
    {
        return PathBuf::from(quoted);
    }
    if t != raw && Path::new(raw).exists() {
        return PathBuf::from(raw);
    }
    PathBuf::from(t)
}
