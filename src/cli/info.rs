use anyhow::Result;
use indicatif::MultiProgress;
use stratec::DecodedImage;

use super::command::{Cli, InfoArgs};
use super::{InputSource, process_inputs};

pub fn cmd_info(args: &InfoArgs, cli: &Cli, multi: Option<&MultiProgress>) -> Result<()> {
    log::info!("Analyzing {} Stratec file(s)", args.inputs.len());

    process_inputs(&args.inputs, cli, multi, |source, image| {
        print!("{}", render_info(source, image));
        Ok(())
    })?;

    Ok(())
}

pub fn render_info(source: &InputSource, image: &DecodedImage) -> String {
    let mut out = String::new();

    out.push('\n');
    out.push_str("Stratec File Information\n");
    out.push_str("========================\n\n");

    for (name, value) in image.properties(&source.file_name, &source.directory) {
        out.push_str(&format!("{name:<28}{value}\n"));
    }

    let display = image.display_calibration();
    out.push('\n');
    out.push_str(&format!(
        "{:<28}{} + {} * value [{}]\n",
        "Display Calibration", display.intercept, display.slope, display.unit
    ));
    match image.pixels.range() {
        Some(range) => out.push_str(&format!(
            "{:<28}{}..{} ({:.3}..{:.3} {})\n",
            "Display Range",
            range.min,
            range.max,
            display.apply(range.min),
            display.apply(range.max),
            display.unit
        )),
        None => out.push_str(&format!("{:<28}empty\n", "Display Range")),
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use stratec::{MemoryStore, decode};

    #[test]
    fn info_lists_properties_and_range() {
        let device = "XCT2000L.TYP";
        let mut buffer = vec![0u8; 1609];
        buffer[1050] = device.len() as u8;
        buffer[1051..1051 + device.len()].copy_from_slice(device.as_bytes());
        buffer[1529] = 1;
        buffer[1531] = 1;
        // raw 0 remaps to 0x8000, the calibration zero point
        buffer.extend_from_slice(&[0x00, 0x00]);

        let store = MemoryStore::new().with(device, "XSlope=1\nXInter=0\n");
        let image = decode(&buffer, store).unwrap();
        let source = InputSource {
            file_name: "I0000001.M01".to_string(),
            directory: "scans".to_string(),
        };

        let text = render_info(&source, &image);
        assert!(text.contains(&format!("{:<28}I0000001.M01\n", "File Name")));
        assert!(text.contains(&format!("{:<28}XCT2000L.TYP\n", "Device")));
        assert!(text.contains(&format!("{:<28}32768..32768 (", "Display Range")));
    }
}
