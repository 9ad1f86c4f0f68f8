use crate::image::{Image, Pixel};
use failure::Error;
use log::info;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Where a burst comes from: enumerate the frames in a directory, then
/// decode each one.
pub trait ImageSource {
    fn enumerate(&self, dir: &Path) -> Result<Vec<PathBuf>, Error>;
    fn load(&self, path: &Path) -> Result<Image<Pixel>, Error>;

    /// Loads every enumerated frame, keeping enumeration order.
    fn load_all(&self, dir: &Path) -> Result<Vec<Image<Pixel>>, Error>
    where
        Self: Sync,
    {
        let paths = self.enumerate(dir)?;
        for path in &paths {
            info!("Reading {}", path.display());
        }
        paths
            .par_iter()
            .map(|path| {
                self.load(path).map_err(|err| {
                    failure::err_msg(format!("Error loading {}: {}", path.display(), err))
                })
            })
            .collect()
    }
}

/// Receives the finished image.
pub trait Presenter {
    fn present(&mut self, image: Image<Pixel>) -> Result<(), Error>;
}

/// Every `*.jpg` directly inside a directory, sorted by path.
pub struct JpgDirectory;

impl ImageSource for JpgDirectory {
    fn enumerate(&self, dir: &Path) -> Result<Vec<PathBuf>, Error> {
        let mut paths = Vec::new();
        for entry in dir.read_dir()? {
            let path = entry?.path();
            let is_jpg = path
                .file_name()
                .map_or(false, |name| name.to_string_lossy().ends_with(".jpg"));
            if is_jpg {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    fn load(&self, path: &Path) -> Result<Image<Pixel>, Error> {
        Image::load(path)
    }
}

pub struct PngPresenter {
    pub path: PathBuf,
}

impl Presenter for PngPresenter {
    fn present(&mut self, image: Image<Pixel>) -> Result<(), Error> {
        info!("Saving {}", self.path.display());
        image.save(&self.path)
    }
}
