use failure::Error;
use std::{fs::File, io::BufWriter, path::Path};

/// One RGB colour sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Pixel {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

#[cfg(test)]
impl From<(u8, u8, u8)> for Pixel {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Image<T: Copy> {
    pub data: Vec<T>,
    pub size: (usize, usize),
}

impl<T: Copy> Image<T> {
    pub fn new(data: Vec<T>, size: (usize, usize)) -> Self {
        assert_eq!(data.len(), size.0 * size.1);
        Self { data, size }
    }

    pub fn new_val(data: T, size: (usize, usize)) -> Self {
        Self::new(vec![data; size.0 * size.1], size)
    }

    pub fn iter_index(&self) -> impl Iterator<Item = (usize, usize)> {
        Range2d::new(self.size)
    }
}

impl<T: Copy> std::ops::Index<(usize, usize)> for Image<T> {
    type Output = T;
    fn index(&self, index: (usize, usize)) -> &T {
        if index.0 >= self.size.0 || index.1 >= self.size.1 {
            panic!("Index out of range: {:?} (size {:?})", index, self.size)
        }
        &self.data[self.size.0 * index.1 + index.0]
    }
}

impl<T: Copy> std::ops::IndexMut<(usize, usize)> for Image<T> {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut T {
        if index.0 >= self.size.0 || index.1 >= self.size.1 {
            panic!("Index out of range: {:?} (size {:?})", index, self.size)
        }
        &mut self.data[self.size.0 * index.1 + index.0]
    }
}

impl Image<Pixel> {
    /// Decodes any format the `image` crate was built with into 8-bit RGB.
    pub fn load(path: impl AsRef<Path>) -> Result<Image<Pixel>, Error> {
        let rgb = ::image::open(path)?.into_rgb8();
        Ok(Self::from_rgb8(rgb))
    }

    pub fn from_rgb8(rgb: ::image::RgbImage) -> Self {
        let size = (rgb.width() as usize, rgb.height() as usize);
        let data = rgb
            .into_raw()
            .chunks_exact(3)
            .map(|c| Pixel::from([c[0], c[1], c[2]]))
            .collect();
        Self::new(data, size)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let file = BufWriter::new(File::create(path)?);
        let mut encoder = png::Encoder::new(file, self.size.0 as u32, self.size.1 as u32);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        let mut output = vec![0; self.size.0 * self.size.1 * 3];
        for (i, pix) in self.data.iter().enumerate() {
            output[i * 3..i * 3 + 3].copy_from_slice(&pix.channels());
        }
        writer.write_image_data(&output)?;
        Ok(())
    }
}

struct Range2d {
    size: (usize, usize),
    cur: (usize, usize),
}

impl Range2d {
    fn new(size: (usize, usize)) -> Self {
        Self { size, cur: (0, 0) }
    }
}

impl Iterator for Range2d {
    type Item = (usize, usize);
    fn next(&mut self) -> Option<(usize, usize)> {
        if self.size.0 == 0 || self.cur.1 >= self.size.1 {
            None
        } else {
            let result = self.cur;
            self.cur.0 += 1;
            if self.cur.0 >= self.size.0 {
                self.cur.0 = 0;
                self.cur.1 += 1;
            }
            Some(result)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.size.0 == 0 || self.cur.1 >= self.size.1 {
            0
        } else {
            (self.size.1 - self.cur.1) * self.size.0 - self.cur.0
        };
        (remaining, Some(remaining))
    }
}
