//! Shelf packer
//!
//! Sprites are sorted tallest first (ties broken by width) and laid out in
//! rows. When a sprite does not fit, all progress is discarded, the smaller
//! texture dimension is doubled and packing restarts from scratch.

use super::{AtlasError, AtlasResult};

/// Transparent gutter kept around every sprite and along the texture edges
pub const BORDER: u32 = 1;

/// Smallest texture edge the packer starts from
pub const MIN_SIZE: u32 = 64;

/// Packed texture dimensions and the top-left corner of every sprite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packing {
    /// Texture width in pixels
    pub width: u32,
    /// Texture height in pixels
    pub height: u32,
    /// Sprite origins, indexed like the input sizes
    pub positions: Vec<[u32; 2]>,
}

/// Order in which sprites are placed: descending height, then descending width
///
/// The sort is stable so equal sprites keep their insertion order.
pub fn packing_order(sizes: &[[u32; 2]]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..sizes.len()).collect();
    order.sort_by(|&a, &b| {
        sizes[b][1]
            .cmp(&sizes[a][1])
            .then_with(|| sizes[b][0].cmp(&sizes[a][0]))
    });
    order
}

/// Pack `sizes` (`[width, height]` each) into the smallest texture the
/// doubling schedule reaches, never exceeding `max_size` on either edge
pub fn pack(sizes: &[[u32; 2]], max_size: u32) -> AtlasResult<Packing> {
    let order = packing_order(sizes);
    let (mut width, mut height) = (MIN_SIZE, MIN_SIZE);

    loop {
        if width > max_size || height > max_size {
            return Err(AtlasError::TooLarge { max_size });
        }

        if let Some(positions) = try_pack(sizes, &order, width, height) {
            return Ok(Packing { width, height, positions });
        }

        log::debug!("Atlas {}x{} too small for {} sprites, growing", width, height, sizes.len());
        let grown = if width <= height {
            width.checked_mul(2).map(|w| (w, height))
        } else {
            height.checked_mul(2).map(|h| (width, h))
        };
        match grown {
            Some(size) => (width, height) = size,
            None => return Err(AtlasError::TooLarge { max_size }),
        }
    }
}

fn try_pack(sizes: &[[u32; 2]], order: &[usize], width: u32, height: u32) -> Option<Vec<[u32; 2]>> {
    let mut positions = vec![[0, 0]; sizes.len()];
    let mut x = BORDER;
    let mut y = BORDER;
    let mut shelf_height = 0;

    for &index in order {
        let [w, h] = sizes[index];

        if x.saturating_add(w).saturating_add(BORDER) > width {
            x = BORDER;
            y = y.saturating_add(shelf_height + BORDER);
            shelf_height = 0;
        }
        let right = x.saturating_add(w).saturating_add(BORDER);
        let bottom = y.saturating_add(h).saturating_add(BORDER);
        if right > width || bottom > height {
            return None;
        }

        positions[index] = [x, y];
        x += w + BORDER;
        shelf_height = shelf_height.max(h);
    }

    Some(positions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlaps(a: [u32; 2], a_size: [u32; 2], b: [u32; 2], b_size: [u32; 2]) -> bool {
        // Grow one rectangle by the gutter so touching sprites count as overlapping.
        let (ax0, ay0) = (a[0], a[1]);
        let (ax1, ay1) = (a[0] + a_size[0] + BORDER, a[1] + a_size[1] + BORDER);
        let (bx0, by0) = (b[0], b[1]);
        let (bx1, by1) = (b[0] + b_size[0] + BORDER, b[1] + b_size[1] + BORDER);
        ax0 < bx1 && bx0 < ax1 && ay0 < by1 && by0 < ay1
    }

    #[test]
    fn test_order_is_tallest_then_widest() {
        let sizes = [[1, 1], [10, 20], [30, 5], [12, 20]];
        assert_eq!(packing_order(&sizes), vec![3, 1, 2, 0]);
    }

    #[test]
    fn test_order_is_stable_for_equal_sprites() {
        let sizes = [[4, 4], [4, 4], [4, 4]];
        assert_eq!(packing_order(&sizes), vec![0, 1, 2]);
    }

    #[test]
    fn test_taller_sprite_placed_first() {
        let sizes = [[1, 1], [10, 20], [30, 5]];
        let packing = pack(&sizes, 4096).unwrap();

        assert_eq!(packing.width, 64);
        assert_eq!(packing.height, 64);
        assert_eq!(packing.positions[1], [1, 1]);
        assert_eq!(packing.positions[2], [12, 1]);
        assert_eq!(packing.positions[0], [43, 1]);
    }

    #[test]
    fn test_growth_alternates_dimensions() {
        // Two 40px squares cannot share a 64px row, and a second shelf overflows 64px.
        let packing = pack(&[[40, 40], [40, 40]], 4096).unwrap();
        assert_eq!((packing.width, packing.height), (128, 64));

        let packing = pack(&[[100, 100], [100, 100], [100, 100]], 4096).unwrap();
        assert_eq!((packing.width, packing.height), (256, 256));
    }

    #[test]
    fn test_no_overlap_and_inside_texture() {
        let sizes: Vec<[u32; 2]> = (0..60u32).map(|i| [1 + (i * 7) % 23, 1 + (i * 13) % 17]).collect();
        let packing = pack(&sizes, 4096).unwrap();

        for (i, (&pos, &size)) in packing.positions.iter().zip(&sizes).enumerate() {
            assert!(pos[0] >= BORDER && pos[1] >= BORDER);
            assert!(pos[0] + size[0] + BORDER <= packing.width);
            assert!(pos[1] + size[1] + BORDER <= packing.height);
            for j in (i + 1)..sizes.len() {
                assert!(
                    !overlaps(pos, size, packing.positions[j], sizes[j]),
                    "sprites {} and {} overlap",
                    i,
                    j
                );
            }
        }
    }

    #[test]
    fn test_packing_is_deterministic() {
        let sizes: Vec<[u32; 2]> = (0..40u32).map(|i| [3 + i % 9, 2 + (i * 5) % 11]).collect();
        assert_eq!(pack(&sizes, 4096).unwrap(), pack(&sizes, 4096).unwrap());
    }

    #[test]
    fn test_exceeding_max_size_fails() {
        let result = pack(&[[200, 200]], 128);
        assert!(matches!(result, Err(AtlasError::TooLarge { max_size: 128 })));
    }

    #[test]
    fn test_unbounded_max_size_stops_before_overflow() {
        let result = pack(&[[1 << 31, 1]], u32::MAX);
        assert!(matches!(result, Err(AtlasError::TooLarge { max_size: u32::MAX })));
    }
}
