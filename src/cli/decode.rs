use std::fs;

use anyhow::{Context, Result};
use indicatif::MultiProgress;

use super::command::{Cli, DecodeArgs};
use super::output::{
    ImageMetadata, create_output_paths, output_base, write_image, write_metadata,
};
use super::process_inputs;

pub fn cmd_decode(args: &DecodeArgs, cli: &Cli, multi: Option<&MultiProgress>) -> Result<()> {
    if let Some(dir) = &args.output_path {
        fs::create_dir_all(dir)
            .with_context(|| format!("Could not create output directory {}", dir.display()))?;
    }

    let decoded = process_inputs(&args.inputs, cli, multi, |source, image| {
        let base = output_base(args.output_path.as_deref(), source);
        let (image_path, metadata_path) = create_output_paths(&base, args.format);

        write_image(&image_path, args.format, &image.pixels)
            .with_context(|| format!("Could not write {}", image_path.display()))?;
        log::info!(
            "{}: {}x{} px -> {}",
            source.file_name,
            image.width(),
            image.height(),
            image_path.display()
        );

        if !args.no_metadata {
            let metadata = ImageMetadata::new(&source.file_name, image, args.format);
            write_metadata(&metadata_path, &metadata)
                .with_context(|| format!("Could not write {}", metadata_path.display()))?;
            log::debug!("Metadata written to {}", metadata_path.display());
        }

        Ok(())
    })?;

    log::info!("Decoded {decoded} file(s)");

    Ok(())
}
