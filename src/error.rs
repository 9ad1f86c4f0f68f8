use failure::Fail;

#[derive(Debug, Fail, PartialEq, Eq)]
pub enum BurstError {
    #[fail(display = "A burst needs at least {} images, got {}", min, count)]
    TooFewImages { count: usize, min: usize },
    #[fail(
        display = "Mismatched sizes in burst: image {} is {:?}, expected {:?}",
        index, found, expected
    )]
    MismatchedSize {
        index: usize,
        expected: (usize, usize),
        found: (usize, usize),
    },
}
