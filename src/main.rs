mod alg;
mod error;
mod image;
mod imgio;
mod stack;

use crate::imgio::{ImageSource, JpgDirectory, PngPresenter, Presenter};
use failure::Error;
use log::debug;
use std::{env::args, path::PathBuf};

pub const OUTPUT_PATH: &str = "ghost.png";

/// What one run works on. The only input is a single positional directory.
#[derive(Debug, PartialEq)]
pub struct Options {
    pub dir: PathBuf,
}

impl Options {
    /// `None` unless there is exactly one argument.
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Option<Self> {
        let mut args = args.into_iter();
        match (args.next(), args.next()) {
            (Some(dir), None) => Some(Self {
                dir: PathBuf::from(dir),
            }),
            _ => None,
        }
    }
}

fn go<S, P>(options: Option<Options>, source: &S, presenter: &mut P) -> Result<(), Error>
where
    S: ImageSource + Sync,
    P: Presenter,
{
    match options {
        Some(options) => stack::solve(source, &options.dir, presenter),
        None => {
            debug!("Expected exactly one directory argument, doing nothing");
            Ok(())
        }
    }
}

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let mut presenter = PngPresenter {
        path: PathBuf::from(OUTPUT_PATH),
    };
    go(Options::from_args(args().skip(1)), &JpgDirectory, &mut presenter)
}
