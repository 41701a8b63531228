pub mod command;
pub mod decode;
pub mod info;
pub mod output;

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::Level;
use stratec::{DecodedImage, Decoder, DirectoryStore};

use crate::input::{InputReader, is_stdin};
use command::Cli;

/// Where a decoded image came from, as reported in its properties.
#[derive(Debug, Clone)]
pub struct InputSource {
    pub file_name: String,
    pub directory: String,
}

impl InputSource {
    pub fn from_path(path: &Path) -> Self {
        if is_stdin(path) {
            return Self {
                file_name: "stdin".to_string(),
                directory: String::new(),
            };
        }

        Self {
            file_name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            directory: path
                .parent()
                .map(|dir| dir.display().to_string())
                .unwrap_or_default(),
        }
    }
}

pub fn create_decoder(cli: &Cli) -> Decoder<DirectoryStore> {
    if !cli.typ_dir.is_dir() {
        log::warn!(
            "Calibration directory {} does not exist; every decode will fail",
            cli.typ_dir.display()
        );
    }

    let mut decoder = Decoder::new(DirectoryStore::new(&cli.typ_dir));
    if cli.strict {
        decoder.set_fail_level(Level::Warn);
    }
    decoder
}

fn decode_input(decoder: &Decoder<DirectoryStore>, input: &Path) -> Result<DecodedImage> {
    let image = if is_stdin(input) {
        let bytes = InputReader::new(input)?.read_all()?;
        decoder.decode(&bytes)?
    } else {
        decoder.decode_file(input)?
    };
    Ok(image)
}

/// Decodes every input independently and hands each image to `handle`.
///
/// Failed inputs are logged and skipped; with `--strict` the first failure
/// aborts. Returns the number of images handled.
pub fn process_inputs<F>(
    inputs: &[PathBuf],
    cli: &Cli,
    multi: Option<&MultiProgress>,
    mut handle: F,
) -> Result<usize>
where
    F: FnMut(&InputSource, &DecodedImage) -> Result<()>,
{
    let decoder = create_decoder(cli);

    let pb = match multi {
        Some(multi) => {
            let pb = multi.add(ProgressBar::new(inputs.len() as u64));
            pb.set_style(ProgressStyle::with_template(
                "{bar:40.cyan/blue} {pos}/{len} {msg}",
            )?);
            Some(pb)
        }
        None => None,
    };

    let mut handled = 0;
    for input in inputs {
        let source = InputSource::from_path(input);
        if let Some(ref pb) = pb {
            pb.set_message(source.file_name.clone());
        }

        match decode_input(&decoder, input) {
            Ok(image) => {
                match pb {
                    Some(ref pb) => pb.suspend(|| handle(&source, &image))?,
                    None => handle(&source, &image)?,
                }
                handled += 1;
            }
            Err(e) => {
                if cli.strict {
                    return Err(e.context(format!("Stratec file read failed: {}", input.display())));
                }
                log::warn!("Stratec file read failed: {}: {e:#}", input.display());
            }
        }

        if let Some(ref pb) = pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    if handled == 0 {
        bail!("None of the {} input(s) could be decoded", inputs.len());
    }
    if handled < inputs.len() {
        log::warn!("Decoded {handled} of {} input(s)", inputs.len());
    }

    Ok(handled)
}
