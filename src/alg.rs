use crate::image::Pixel;

/// Squared euclidean distance between two colours. At most `3 * 255^2`.
pub fn dist2(left: Pixel, right: Pixel) -> u32 {
    left.channels()
        .iter()
        .zip(right.channels().iter())
        .map(|(&l, &r)| {
            let diff = u32::from((i16::from(l) - i16::from(r)).unsigned_abs());
            diff * diff
        })
        .sum()
}

/// Per-channel mean, truncated toward zero. `None` for an empty slice.
pub fn average(pixels: &[Pixel]) -> Option<Pixel> {
    if pixels.is_empty() {
        return None;
    }
    let mut sum = [0u64; 3];
    for pix in pixels {
        for (total, channel) in sum.iter_mut().zip(pix.channels().iter()) {
            *total += u64::from(*channel);
        }
    }
    let count = pixels.len() as u64;
    // a mean of u8 values is itself within u8 range
    let mean = |total: u64| (total / count) as u8;
    Some(Pixel::new(mean(sum[0]), mean(sum[1]), mean(sum[2])))
}

// Linear scan that only replaces on a strictly smaller key, so the first of
// several equal minima wins.
pub fn min_by_key_first<T: Copy, K: Ord>(
    seq: impl IntoIterator<Item = T>,
    key: impl Fn(T) -> K,
) -> Option<T> {
    let mut best: Option<(T, K)> = None;
    for item in seq {
        let item_key = key(item);
        let replace = match &best {
            Some((_, best_key)) => item_key < *best_key,
            None => true,
        };
        if replace {
            best = Some((item, item_key));
        }
    }
    best.map(|(item, _)| item)
}

/// The candidate closest to the mean of all candidates.
///
/// Transients that show up in a minority of frames only pull the mean a
/// little, so a background sample ends up nearest to it.
pub fn best_pixel(pixels: &[Pixel]) -> Option<Pixel> {
    let avg = average(pixels)?;
    min_by_key_first(pixels.iter().cloned(), |pix| dist2(pix, avg))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixels(raw: &[(u8, u8, u8)]) -> Vec<Pixel> {
        raw.iter().cloned().map(Pixel::from).collect()
    }

    fn random_pixel() -> Pixel {
        Pixel::from(rand::random::<[u8; 3]>())
    }

    #[test]
    fn dist2_known_values() {
        let one = Pixel::new(1, 1, 1);
        assert_eq!(dist2(one, Pixel::new(250, 250, 250)), 186003);
        assert_eq!(dist2(one, Pixel::new(100, 250, 0)), 71803);
        assert_eq!(dist2(one, one), 0);
        assert_eq!(dist2(Pixel::new(0, 0, 0), Pixel::new(255, 255, 255)), 195075);
    }

    #[test]
    fn dist2_symmetric_and_zero_only_at_equal() {
        for _ in 0..1000 {
            let a = random_pixel();
            let b = random_pixel();
            assert_eq!(dist2(a, b), dist2(b, a));
            assert_eq!(dist2(a, a), 0);
            assert_eq!(dist2(a, b) == 0, a == b);
        }
    }

    #[test]
    fn average_truncates() {
        assert_eq!(
            average(&pixels(&[(0, 0, 40), (0, 40, 0), (40, 0, 0), (4, 4, 4)])),
            Some(Pixel::new(11, 11, 11))
        );
        assert_eq!(
            average(&pixels(&[(1, 1, 1), (1, 1, 1), (28, 43, 58)])),
            Some(Pixel::new(10, 15, 20))
        );
        // 5/3, 254/3, 255/3 and 509/2 all drop a remainder
        assert_eq!(
            average(&pixels(&[(1, 0, 255), (2, 254, 0), (2, 0, 0)])),
            Some(Pixel::new(1, 84, 85))
        );
        assert_eq!(
            average(&pixels(&[(255, 255, 255), (254, 254, 254)])),
            Some(Pixel::new(254, 254, 254))
        );
    }

    #[test]
    fn average_of_identical_is_identity() {
        for _ in 0..100 {
            let pix = random_pixel();
            let count = rand::random::<usize>() % 20 + 1;
            assert_eq!(average(&vec![pix; count]), Some(pix));
        }
    }

    #[test]
    fn average_of_nothing() {
        assert_eq!(average(&[]), None);
        assert_eq!(best_pixel(&[]), None);
    }

    #[test]
    fn best_pixel_known_values() {
        let cases: [(Vec<(u8, u8, u8)>, (u8, u8, u8)); 4] = [
            (vec![(2, 2, 2), (2, 3, 4), (20, 20, 20)], (2, 3, 4)),
            (vec![(0, 0, 0), (250, 250, 250), (100, 100, 100)], (100, 100, 100)),
            (vec![(2, 2, 2), (2, 2, 2), (20, 20, 20)], (2, 2, 2)),
            (
                vec![(2, 2, 2), (2, 3, 4), (20, 20, 20), (250, 250, 250)],
                (20, 20, 20),
            ),
        ];
        for (input, expected) in cases.iter() {
            assert_eq!(
                best_pixel(&pixels(input)),
                Some(Pixel::from(*expected)),
                "input {:?}",
                input
            );
        }
    }

    #[test]
    fn best_pixel_tie_goes_to_first() {
        // mean is (1, 1, 1); every candidate is at distance 3
        let forward = pixels(&[(0, 0, 0), (2, 2, 2), (0, 0, 0), (2, 2, 2)]);
        assert_eq!(best_pixel(&forward), Some(Pixel::new(0, 0, 0)));
        let backward = pixels(&[(2, 2, 2), (0, 0, 0), (2, 2, 2), (0, 0, 0)]);
        assert_eq!(best_pixel(&backward), Some(Pixel::new(2, 2, 2)));
    }

    #[test]
    fn best_pixel_is_always_a_candidate() {
        for _ in 0..500 {
            let count = rand::random::<usize>() % 8 + 3;
            let candidates = (0..count).map(|_| random_pixel()).collect::<Vec<_>>();
            let best = best_pixel(&candidates).unwrap();
            assert!(candidates.contains(&best));
        }
    }

    #[test]
    fn min_by_key_first_keeps_earliest_minimum() {
        let items = [(0, 5), (1, 3), (2, 3), (3, 4)];
        assert_eq!(min_by_key_first(items.iter().cloned(), |(_, k)| k), Some((1, 3)));
        assert_eq!(min_by_key_first(Vec::<u8>::new(), |x| x), None);
    }
}
