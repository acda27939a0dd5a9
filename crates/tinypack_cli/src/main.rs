mod args;
mod config;

use std::time::Instant;

use ansi_term::Colour;
use args::{InputArgs, LogArgs, OutputArgs};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tinypack::{Bundler, OutputAsset};
use tinypack_error::BuildError;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Commands {
  #[clap(flatten)]
  input: InputArgs,

  #[clap(flatten)]
  output: OutputArgs,

  #[clap(flatten)]
  log: LogArgs,
}

fn init_tracing(silent: bool) {
  let default_directives = if silent { "tinypack=error" } else { "tinypack=info" };
  tracing_subscriber::registry()
    .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directives.into()))
    .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
    .init();
}

fn print_output_assets(dir: &str, outputs: Vec<OutputAsset>) {
  let mut left = 0;
  let mut right = 0;

  let mut assets = Vec::with_capacity(outputs.len());

  for output in outputs {
    let size = format!("{:.2}", output.content.len() as f64 / 1024.0);

    if size.len() > right {
      right = size.len();
    }

    if output.filename.len() > left {
      left = output.filename.len();
    }

    assets.push((output.filename, size));
  }

  let dim = Colour::White.dimmed();
  let color = Colour::Cyan;

  for (filename, size) in assets {
    let filename_len = filename.len();

    println!(
      "{}{}{:left$} {}{:right$}{} kB",
      dim.paint(format!("{dir}/")),
      color.paint(filename),
      "",
      dim.paint("bundle │ size: "),
      "",
      size,
      left = left - filename_len,
      right = right - size.len()
    );
  }
}

fn print_errors(errors: &BuildError) {
  for error in &**errors {
    eprintln!("{} {:#}", Colour::Red.paint("Error:"), error);
  }
}

fn main() -> std::process::ExitCode {
  let args = Commands::parse();
  let silent = args.log.silent;
  init_tracing(silent);

  let bundler = match config::resolve_options(args.input, args.output).and_then(Bundler::new) {
    Ok(bundler) => bundler,
    Err(errors) => {
      print_errors(&errors);
      return std::process::ExitCode::FAILURE;
    }
  };

  let start = Instant::now();
  match bundler.write() {
    Ok(output) => {
      if !silent {
        for warning in &output.warnings {
          println!("{} {}", Colour::Yellow.paint("Warning:"), warning);
        }

        if !output.assets.is_empty() {
          print_output_assets(&bundler.options().dir, output.assets);
        }

        let elapsed = format!("{:.2} ms", start.elapsed().as_secs_f64() * 1000.0);
        println!(
          "\n{} Finished in {}",
          Colour::Green.paint("✔"),
          Colour::White.bold().paint(elapsed)
        );
      }
      std::process::ExitCode::SUCCESS
    }
    Err(errors) => {
      print_errors(&errors);
      std::process::ExitCode::FAILURE
    }
  }
}
