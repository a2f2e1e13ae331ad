extern crate clap;
extern crate env_logger;
extern crate mandelbrot;

use clap::{App, Arg, ArgMatches};
use mandelbrot::config::{DEFAULT_FILE_NAME, DEFAULT_HEIGHT, DEFAULT_MAX_ITERATIONS, DEFAULT_WIDTH};
use mandelbrot::{Config, MandelbrotError};
use std::str::FromStr;

fn validate_number<T: FromStr>(s: &str, isnotanumber_err: &str) -> Result<(), String> {
    match T::from_str(s) {
        Ok(_) => Ok(()),
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const WIDTH: &str = "width";
const HEIGHT: &str = "height";
const EPOCH: &str = "epoch";
const FILENAME: &str = "fileName";
const THREADS: &str = "threads";

fn args<'a>(defaults: &'a [String; 3]) -> ArgMatches<'a> {
    App::new("mandel")
        .version("0.1.0")
        .about("Escape-time Mandelbrot renderer")
        .arg(
            Arg::with_name(WIDTH)
                .long(WIDTH)
                .short("w")
                .takes_value(true)
                .default_value(&defaults[0])
                .validator(|s| validate_number::<usize>(&s, "Could not parse image width"))
                .help("Image width."),
        )
        .arg(
            Arg::with_name(HEIGHT)
                .long(HEIGHT)
                .takes_value(true)
                .default_value(&defaults[1])
                .validator(|s| validate_number::<usize>(&s, "Could not parse image height"))
                .help("Image height."),
        )
        .arg(
            Arg::with_name(EPOCH)
                .long(EPOCH)
                .short("e")
                .takes_value(true)
                .default_value(&defaults[2])
                .validator(|s| validate_number::<usize>(&s, "Could not parse iteration count"))
                .help("Amount of calculations per pixel."),
        )
        .arg(
            Arg::with_name(FILENAME)
                .long(FILENAME)
                .short("o")
                .takes_value(true)
                .default_value(DEFAULT_FILE_NAME)
                .help("File name to save, without the .png extension."),
        )
        .arg(
            Arg::with_name(THREADS)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(|s| validate_number::<usize>(&s, "Could not parse thread count"))
                .help("Number of threads to use in solver (default: one per CPU)"),
        )
        .get_matches()
}

fn number_of(matches: &ArgMatches, name: &str) -> Result<Option<usize>, MandelbrotError> {
    match matches.value_of(name) {
        None => Ok(None),
        Some(s) => usize::from_str(s)
            .map(Some)
            .map_err(|_| MandelbrotError::Config(format!("could not parse --{} '{}'", name, s))),
    }
}

fn config(matches: &ArgMatches) -> Result<Config, MandelbrotError> {
    let defaults = Config::default();
    Ok(Config {
        width: number_of(matches, WIDTH)?.unwrap_or(defaults.width),
        height: number_of(matches, HEIGHT)?.unwrap_or(defaults.height),
        max_iterations: number_of(matches, EPOCH)?.unwrap_or(defaults.max_iterations),
        file_name: matches
            .value_of(FILENAME)
            .map(|s| s.to_string())
            .unwrap_or(defaults.file_name),
        threads: number_of(matches, THREADS)?.unwrap_or(defaults.threads),
    })
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let defaults = [
        DEFAULT_WIDTH.to_string(),
        DEFAULT_HEIGHT.to_string(),
        DEFAULT_MAX_ITERATIONS.to_string(),
    ];
    let matches = args(&defaults);

    match config(&matches).and_then(|config| mandelbrot::run(&config)) {
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
        Ok(path) => println!("Saved {}", path.display()),
    }
}
