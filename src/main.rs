use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use text_to_image::{default_save_dir, encode_text, ImageConfig, Rgb, Termination};

/// Encode text into PNG images, two bits per pixel
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Text to encode; read from --file or stdin when omitted
    text: Option<String>,

    /// Read the text from this file
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Image width in pixels
    #[arg(long, default_value_t = 1920)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 1080)]
    height: u32,

    /// Directory the images are written to
    #[arg(short, long)]
    save_dir: Option<PathBuf>,

    /// Colour for `01`, as r,g,b
    #[arg(long, default_value = "255,0,0")]
    first_color: Rgb,

    /// Colour for `10`, as r,g,b
    #[arg(long, default_value = "0,255,0")]
    second_color: Rgb,

    /// Colour for `11`, as r,g,b
    #[arg(long, default_value = "0,0,255")]
    third_color: Rgb,

    /// Stop painting after the last complete bit pair
    #[arg(long)]
    exact: bool,
}

fn read_text(args: &Args) -> io::Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    if let Some(file) = &args.file {
        return fs::read_to_string(file);
    }
    let mut text = String::new();
    io::stdin().read_to_string(&mut text)?;
    Ok(text)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let text = match read_text(&args) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("error: failed to read input: {e}");
            return ExitCode::FAILURE;
        }
    };

    let config = ImageConfig {
        width: args.width,
        height: args.height,
        first_color: args.first_color,
        second_color: args.second_color,
        third_color: args.third_color,
        save_dir: args.save_dir.clone().unwrap_or_else(default_save_dir),
        termination: if args.exact {
            Termination::Exact
        } else {
            Termination::Legacy
        },
    };

    match encode_text(&text, &config) {
        Ok(paths) => {
            for path in paths {
                println!("{}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
