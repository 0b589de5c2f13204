use clap::{Parser, Subcommand};
use image_utilities::imaging::{self, Format, RotateRequest, RustBackend, ThumbnailRequest};
use image_utilities::config::load_config;
use image_utilities::{bridge, config, output};
use std::io::Read;
use std::path::PathBuf;

/// Shared positional arguments for commands that read one image and write another.
#[derive(clap::Args, Clone)]
struct IoArgs {
    /// Source image (JPEG, PNG, TIFF, WebP, GIF or BMP)
    source: PathBuf,

    /// Where to write the result
    target: PathBuf,

    /// Output encoding
    #[arg(long, value_enum, default_value_t = Format::Jpeg)]
    format: Format,
}

#[derive(Parser)]
#[command(name = "image-utilities")]
#[command(about = "Generate thumbnails and rotate images")]
#[command(long_about = "\
Generate thumbnails and rotate images

Thumbnails keep the source aspect ratio with the longer side bounded by
--max-size; images already within the bound keep their size. Rotation turns
the image clockwise about its center and grows the canvas so no corner is
clipped.

Output is written atomically: on any error the target is left untouched.

Set RUST_LOG=debug to see the planned geometry.

Run 'image-utilities gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Optional config.toml overriding the stock defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a thumbnail bounded by a maximum size
    Thumbnail {
        #[command(flatten)]
        io: IoArgs,

        /// Maximum length of the longer side, in pixels
        #[arg(long)]
        max_size: i64,
    },
    /// Write a copy rotated clockwise by a number of degrees
    Rotate {
        #[command(flatten)]
        io: IoArgs,

        /// Clockwise angle; negative values rotate counter-clockwise
        #[arg(long, allow_hyphen_values = true)]
        degrees: i64,
    },
    /// Handle one JSON method call and print the JSON response
    Call {
        /// The call, e.g. '{"method":"rotate","arguments":{...}}'; read from stdin when omitted
        json: Option<String>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let backend = RustBackend::new();

    match cli.command {
        Command::Thumbnail { io, max_size } => {
            let config = load_config(cli.config.as_deref())?;
            let request = ThumbnailRequest {
                source: io.source,
                target: io.target,
                max_size,
                format: io.format,
            };
            let outcome =
                imaging::generate_thumbnail(&backend, &request, &config.thumbnail_config())?;
            output::print_thumbnail_output(&outcome);
        }
        Command::Rotate { io, degrees } => {
            let config = load_config(cli.config.as_deref())?;
            let request = RotateRequest {
                source: io.source,
                target: io.target,
                degrees,
                format: io.format,
            };
            let outcome = imaging::rotate(&backend, &request, &config.rotate_config())?;
            output::print_rotate_output(&outcome, degrees);
        }
        Command::Call { json } => {
            let config = load_config(cli.config.as_deref())?;
            let json = match json {
                Some(json) => json,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let call = bridge::parse_call(&json)?;
            let response = bridge::handle(&backend, &config, &call);
            println!("{}", output::format_response(&response));
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
