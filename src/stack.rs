use crate::{
    alg,
    error::BurstError,
    image::{Image, Pixel},
    imgio::{ImageSource, Presenter},
};
use failure::Error;
use log::{debug, info};
use rayon::prelude::*;
use std::path::Path;

pub const MIN_BURST: usize = 3;

/// Frames of one fixed scene. Non-empty, at least `MIN_BURST` long, and
/// every frame has the same size.
pub struct Burst {
    images: Vec<Image<Pixel>>,
    size: (usize, usize),
}

impl Burst {
    pub fn new(images: Vec<Image<Pixel>>) -> Result<Self, BurstError> {
        if images.len() < MIN_BURST {
            return Err(BurstError::TooFewImages {
                count: images.len(),
                min: MIN_BURST,
            });
        }
        let size = images[0].size;
        for (index, image) in images.iter().enumerate().skip(1) {
            if image.size != size {
                return Err(BurstError::MismatchedSize {
                    index,
                    expected: size,
                    found: image.size,
                });
            }
        }
        Ok(Self { images, size })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn size(&self) -> (usize, usize) {
        self.size
    }

    /// Samples at `coord`, one per frame, in burst order.
    pub fn column_into(&self, coord: (usize, usize), out: &mut Vec<Pixel>) {
        out.clear();
        out.extend(self.images.iter().map(|image| image[coord]));
    }
}

/// Picks the background sample at every coordinate.
pub fn stack(burst: &Burst) -> Image<Pixel> {
    let count = burst.len();
    let mut solution = Image::new_val(Pixel::default(), burst.size());
    let coords = solution.iter_index().collect::<Vec<_>>();
    solution
        .data
        .par_iter_mut()
        .zip(coords.par_iter())
        .for_each_init(
            || Vec::with_capacity(count),
            |column, (out, &coord)| {
                burst.column_into(coord, column);
                *out = alg::best_pixel(column).expect("validated burst is non-empty");
            },
        );
    solution
}

pub fn solve<S, P>(source: &S, dir: &Path, presenter: &mut P) -> Result<(), Error>
where
    S: ImageSource + Sync,
    P: Presenter,
{
    let burst = Burst::new(source.load_all(dir)?)?;
    info!(
        "Stacking {} images of {}x{} with {} threads",
        burst.len(),
        burst.size().0,
        burst.size().1,
        rayon::current_num_threads()
    );
    let solution = stack(&burst);
    debug!("Stacked {} pixels", solution.data.len());
    presenter.present(solution)
}
