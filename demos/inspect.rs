//! Decode a PCX file and dump everything the viewer would show
//!
//! Usage: cargo run --example inspect -- <file.pcx>
//!
//! Prints the file information summary as JSON and writes
//! `<file>.decoded.png`, `<file>.palette.png` and `<file>.histogram.png`.

use std::path::{Path, PathBuf};

use pcxview_lib::config::ViewerSettings;
use pcxview_lib::pcx::PcxReader;

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".into());
    path.with_file_name(format!("{}.{}.png", stem, suffix))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = ViewerSettings::load(&ViewerSettings::default_path());
    pcxview_lib::init_logging(&settings.log_filter);

    let path = match std::env::args().nth(1) {
        Some(p) => PathBuf::from(p),
        None => {
            eprintln!("Usage: inspect <file.pcx>");
            std::process::exit(2);
        }
    };

    let pcx = PcxReader::open(&path)?;

    println!("{}", pcx.header);
    println!("{}", serde_json::to_string_pretty(&pcx.info())?);

    let decoded = sibling(&path, "decoded");
    pcx.image.save(&decoded)?;
    println!("Wrote {}", decoded.display());

    if let Some(grid) = pcx.palette_image(settings.palette_cell_size) {
        let out = sibling(&path, "palette");
        grid.save(&out)?;
        println!("Wrote {}", out.display());
    }

    if let Some(grid) =
        pcx.histogram_image(settings.palette_cell_size, settings.histogram_max_entries)
    {
        let out = sibling(&path, "histogram");
        grid.save(&out)?;
        println!("Wrote {}", out.display());
    }

    Ok(())
}
