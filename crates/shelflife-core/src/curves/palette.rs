//! Fixed display palette for temperature curves.

pub const PALETTE: [&str; 8] = [
    "#636EFA", "#EF553B", "#00CC96", "#AB63FA", "#FFA15A", "#19D3F3", "#FF6692", "#B6E880",
];

/// Colour for the curve at `index` in the ordered range; wraps past the palette.
pub fn color_for_index(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_after_eight_entries() {
        assert_eq!(color_for_index(0), "#636EFA");
        assert_eq!(color_for_index(7), "#B6E880");
        assert_eq!(color_for_index(8), "#636EFA");
        assert_eq!(color_for_index(11), color_for_index(3));
    }
}
