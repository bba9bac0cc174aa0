//! Finalize structured sections against an image directory.
//!
//! Reads a JSONL section log, resolves every `[IMAGE_PLACEHOLDER_<k>]`
//! token against the natural-sorted image inventory, and writes the
//! resolved sections as JSONL.
//!
//! Usage:
//!   finalize_sections <sections.jsonl> <image-dir> <output.jsonl>

use std::path::PathBuf;
use std::process;

use page_reflow::config::ReflowConfig;
use page_reflow::finalize::Finalizer;

struct Args {
    sections: PathBuf,
    image_dir: PathBuf,
    output: PathBuf,
}

impl Args {
    fn parse() -> Option<Self> {
        let args: Vec<String> = std::env::args().collect();
        let mut positional = Vec::new();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--help" | "-h" => return None,
                other => positional.push(other.to_string()),
            }
            i += 1;
        }

        if positional.len() != 3 {
            return None;
        }
        Some(Self {
            sections: PathBuf::from(&positional[0]),
            image_dir: PathBuf::from(&positional[1]),
            output: PathBuf::from(&positional[2]),
        })
    }
}

fn main() {
    env_logger::init();

    let args = match Args::parse() {
        Some(args) => args,
        None => {
            eprintln!("Usage: finalize_sections <sections.jsonl> <image-dir> <output.jsonl>");
            process::exit(2);
        },
    };

    let finalizer = Finalizer::from_config(&ReflowConfig::default());
    match finalizer.run(&args.sections, &args.image_dir, &args.output) {
        Ok(outcome) => {
            println!(
                "Finalized {} sections -> {}",
                outcome.sections.len(),
                args.output.display()
            );
            for warning in &outcome.warnings {
                eprintln!("warning: {}", warning);
            }
        },
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(1);
        },
    }
}
